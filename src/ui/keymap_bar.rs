//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub fn draw_keymap(
    f: &mut Frame<'_>,
    area: Rect,
    drag_mode: bool,
    prompt_active: bool,
    colors: &ThemeColors,
) {
    let keymap_text = if prompt_active {
        "Enter:apply | Esc:cancel | Type to edit"
    } else if drag_mode {
        "mouse:drag points | v:set value | u/U:undo/redo | e:leave drag | s/S:save | r:reset | q:quit"
    } else {
        "q:quit | jk:series | a:add | e:drag | u/U:undo/redo | s/S:save | r:reset | c:cols | g/G:log | ←→↑↓ +-:view | w:range | ?:help"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
