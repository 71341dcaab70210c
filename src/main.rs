//! Curvedit - A terminal curve editor for delimited data files.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use curvedit::app::App;
use curvedit::config::{parse_columns, parse_delimiter, parse_history_depth, EditorConfig};
use curvedit::editor::CurveEditor;
use curvedit::history::DEFAULT_DEPTH;
use curvedit::prompt::PromptKind;
use curvedit::table::{inspect_file, load_file};
use curvedit::transform::AxisScale;
use curvedit::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "curvedit")]
#[command(about = "A terminal curve editor for delimited data files", long_about = None)]
struct Args {
    /// Delimited data files to open, one series each
    files: Vec<PathBuf>,

    /// Columns to plot as X,Y (zero-based indices or letters, e.g. 0,2 or A,C)
    #[arg(short, long)]
    columns: Option<String>,

    /// Field delimiter (a single character, or "tab")
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: char,

    /// Start with a logarithmic X axis
    #[arg(long)]
    log_x: bool,

    /// Start with a logarithmic Y axis
    #[arg(long)]
    log_y: bool,

    /// Number of undo steps kept (at least 1)
    #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = parse_history_depth)]
    history_depth: usize,

    /// Print the column layout of each file and exit
    #[arg(long)]
    inspect: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Curvedit");
    }

    let columns = args
        .columns
        .as_deref()
        .map(parse_columns)
        .transpose()
        .context("Invalid --columns")?;

    if args.inspect {
        return inspect(&args, columns);
    }

    let (x_column, y_column) = columns.unwrap_or((0, 1));
    let config = EditorConfig {
        delimiter: args.delimiter,
        history_depth: args.history_depth,
        x_column,
        y_column,
        x_scale: if args.log_x {
            AxisScale::Logarithmic
        } else {
            AxisScale::Linear
        },
        y_scale: if args.log_y {
            AxisScale::Logarithmic
        } else {
            AxisScale::Linear
        },
        ..EditorConfig::default()
    };

    let mut app = App::new(CurveEditor::new(config));
    app.columns = columns;
    for path in &args.files {
        app.open_file(path.clone());
    }
    if let Some(first) = app.editor.store().ids().first() {
        app.selected = Some(*first);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("Curvedit exited");
    }

    Ok(())
}

/// Print each file's columns and what loading it would produce.
fn inspect(args: &Args, columns: Option<(usize, usize)>) -> Result<()> {
    let mut failed = 0;

    for path in &args.files {
        println!("{}", path.display());
        let layout = match inspect_file(path, args.delimiter, columns) {
            Ok(layout) => layout,
            Err(e) => {
                println!("  error: {}", e);
                failed += 1;
                continue;
            },
        };

        println!("  header: {}", if layout.has_header { "yes" } else { "no" });
        for column in &layout.columns {
            println!("  {}", column);
        }

        let (x, y) = layout.plot_columns;
        let table = load_file(path, x, y, args.log_x, args.delimiter)?;
        let stats = table.stats;
        println!(
            "  plot x={} y={}: {} points, {} skipped ({} empty, {} short, {} non-numeric, {} x<=0)",
            x,
            y,
            stats.data_rows,
            stats.skipped(),
            stats.empty_lines,
            stats.short_rows,
            stats.non_numeric_rows,
            stats.domain_filtered
        );
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files could not be read", failed, args.files.len());
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(&mut app, key) {
                        return Ok(());
                    }
                },
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {},
            }
        }
    }
}

/// Returns `true` when the user asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Prompt mode - handle separately
    if app.prompt.is_active() {
        match key.code {
            KeyCode::Enter => app.submit_prompt(),
            KeyCode::Esc => app.prompt.cancel(),
            KeyCode::Backspace => app.prompt.backspace(),
            KeyCode::Char(c) => app.prompt.input(c),
            _ => {},
        }
        return false;
    }

    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => return true,

        // Series selection
        (KeyModifiers::NONE, KeyCode::Char('j')) => app.select_next(),
        (KeyModifiers::NONE, KeyCode::Char('k')) => app.select_prev(),

        // Series management
        (KeyModifiers::NONE, KeyCode::Char('a')) => app.start_prompt(PromptKind::AddSeries),
        (KeyModifiers::NONE, KeyCode::Char('o')) => app.start_prompt(PromptKind::SourcePath),
        (KeyModifiers::NONE, KeyCode::Char('x')) | (KeyModifiers::NONE, KeyCode::Delete) => {
            app.remove_selected()
        },
        (KeyModifiers::NONE, KeyCode::Char('n')) => app.start_prompt(PromptKind::Rename),
        (KeyModifiers::NONE, KeyCode::Char('c')) => app.start_prompt(PromptKind::Columns),
        (KeyModifiers::NONE, KeyCode::Char('m')) => app.cycle_marker(),
        (KeyModifiers::SHIFT, KeyCode::Char('M')) => app.cycle_line_style(),
        (KeyModifiers::NONE, KeyCode::Char('>')) | (KeyModifiers::SHIFT, KeyCode::Char('>')) => {
            app.adjust_marker_size(1.0)
        },
        (KeyModifiers::NONE, KeyCode::Char('<')) | (KeyModifiers::SHIFT, KeyCode::Char('<')) => {
            app.adjust_marker_size(-1.0)
        },

        // Editing
        (KeyModifiers::NONE, KeyCode::Char('e')) => app.toggle_drag_mode(),
        (KeyModifiers::NONE, KeyCode::Char('v')) => app.start_prompt(PromptKind::PointValue),
        (KeyModifiers::NONE, KeyCode::Char('u')) | (KeyModifiers::CONTROL, KeyCode::Char('z')) => {
            app.undo()
        },
        (KeyModifiers::SHIFT, KeyCode::Char('U')) | (KeyModifiers::CONTROL, KeyCode::Char('y')) => {
            app.redo()
        },
        (KeyModifiers::NONE, KeyCode::Char('r')) => app.reset_selected(),
        (KeyModifiers::NONE, KeyCode::Char('s')) => app.save_selected(None),
        (KeyModifiers::SHIFT, KeyCode::Char('S')) => app.start_prompt(PromptKind::SaveAs),

        // Plot settings
        (KeyModifiers::NONE, KeyCode::Char('g')) => app.toggle_x_scale(),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => app.toggle_y_scale(),
        (KeyModifiers::SHIFT, KeyCode::Char('R')) => app.toggle_x_reversed(),
        (KeyModifiers::NONE, KeyCode::Char('f')) => app.auto_range(),
        (KeyModifiers::NONE, KeyCode::Char('w')) => app.start_prompt(PromptKind::Range),
        (KeyModifiers::NONE, KeyCode::Char('t')) => app.start_prompt(PromptKind::Title),
        (KeyModifiers::SHIFT, KeyCode::Char('X')) => app.start_prompt(PromptKind::XLabel),
        (KeyModifiers::SHIFT, KeyCode::Char('Y')) => app.start_prompt(PromptKind::YLabel),
        (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),

        // View
        (KeyModifiers::NONE, KeyCode::Left) => app.pan(-1.0, 0.0),
        (KeyModifiers::NONE, KeyCode::Right) => app.pan(1.0, 0.0),
        (KeyModifiers::NONE, KeyCode::Up) => app.pan(0.0, 1.0),
        (KeyModifiers::NONE, KeyCode::Down) => app.pan(0.0, -1.0),
        (KeyModifiers::NONE, KeyCode::Char('+'))
        | (KeyModifiers::NONE, KeyCode::Char('='))
        | (KeyModifiers::SHIFT, KeyCode::Char('+')) => app.zoom(1),
        (KeyModifiers::NONE, KeyCode::Char('-')) => app.zoom(-1),

        (KeyModifiers::SHIFT, KeyCode::Char('?')) | (KeyModifiers::NONE, KeyCode::Char('?')) => {
            app.status = "Help: a=add o=source x=remove n=rename c=columns e=drag v=value u/U=undo/redo s/S=save r=reset g/G=log R=reverse f=fit w=range t/X/Y=titles m/M=style T=theme".to_string();
        },

        // Escape - leave drag mode
        (KeyModifiers::NONE, KeyCode::Esc) => {
            if app.editor.session().is_enabled() {
                app.toggle_drag_mode();
            }
        },

        _ => {},
    }
    false
}
