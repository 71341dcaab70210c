//! One-line text prompt shown in the status bar.

/// What the typed text is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Path of a file to add as a new series.
    AddSeries,
    /// Point the selected series at another file.
    SourcePath,
    /// Destination for saving the selected series.
    SaveAs,
    /// New name for the selected series.
    Rename,
    /// Column pair for the selected series.
    Columns,
    /// New Y value for the hovered point.
    PointValue,
    /// Plot title.
    Title,
    /// X axis label.
    XLabel,
    /// Y axis label.
    YLabel,
    /// Visible range as `xmin,xmax,ymin,ymax`.
    Range,
}

impl PromptKind {
    /// Label shown before the input.
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::AddSeries => "Add file",
            PromptKind::SourcePath => "Source file",
            PromptKind::SaveAs => "Save as",
            PromptKind::Rename => "Name",
            PromptKind::Columns => "Columns X,Y",
            PromptKind::PointValue => "Y value",
            PromptKind::Title => "Title",
            PromptKind::XLabel => "X label",
            PromptKind::YLabel => "Y label",
            PromptKind::Range => "Range xmin,xmax,ymin,ymax",
        }
    }
}

/// Prompt state.
#[derive(Debug, Default)]
pub struct PromptState {
    kind: Option<PromptKind>,
    buffer: String,
}

impl PromptState {
    /// Create an inactive prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the prompt is open.
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    /// The open prompt's kind.
    pub fn kind(&self) -> Option<PromptKind> {
        self.kind
    }

    /// Open the prompt with some initial text.
    pub fn start(&mut self, kind: PromptKind, initial: impl Into<String>) {
        self.kind = Some(kind);
        self.buffer = initial.into();
    }

    /// Add a character to the buffer.
    pub fn input(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character from the buffer.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Close the prompt and hand back what was typed.
    pub fn submit(&mut self) -> Option<(PromptKind, String)> {
        let kind = self.kind.take()?;
        let text = std::mem::take(&mut self.buffer);
        Some((kind, text.trim().to_string()))
    }

    /// Close the prompt, discarding the input.
    pub fn cancel(&mut self) {
        self.kind = None;
        self.buffer.clear();
    }

    /// Get the buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}
