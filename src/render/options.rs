//! HTML rendering options.

/// Options for converting tables to HTML.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Wrap each table in `<figure class="...">`
    pub wrap_in_figure: bool,

    /// Class attribute of the wrapping figure
    pub figure_class: String,

    /// Put each row and section tag on its own line
    pub line_breaks: bool,

    /// Render paragraphs that sit outside tables
    pub include_paragraphs: bool,
}

impl HtmlOptions {
    /// Create new HTML options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the figure wrapper.
    pub fn with_figure(mut self, wrap: bool) -> Self {
        self.wrap_in_figure = wrap;
        self
    }

    /// Set the figure class.
    pub fn with_figure_class(mut self, class: impl Into<String>) -> Self {
        self.figure_class = class.into();
        self
    }

    /// Enable or disable line breaks between rows.
    pub fn with_line_breaks(mut self, enabled: bool) -> Self {
        self.line_breaks = enabled;
        self
    }

    /// Enable or disable rendering of top-level paragraphs.
    pub fn with_paragraphs(mut self, include: bool) -> Self {
        self.include_paragraphs = include;
        self
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            wrap_in_figure: true,
            figure_class: "table".to_string(),
            line_breaks: false,
            include_paragraphs: true,
        }
    }
}
