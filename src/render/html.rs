//! HTML conversion for documents and tables.
//!
//! Tables become `<figure class="table"><table>` with a `<thead>` for the
//! heading rows and a `<tbody>` for the rest; sections without rows are left
//! out. Cells are `<th>` or `<td>` depending on their resolved position.

use crate::error::Result;
use crate::grid::{
    body_section, cell_kind, heading_section, resolve_grid, CellKind, ResolvedGrid,
};
use crate::model::{Alignment, Block, Document, Paragraph, Table, TableCell, TextRun};

use super::HtmlOptions;
use std::ops::Range;

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &HtmlOptions) -> Result<String> {
    HtmlRenderer::new(options.clone()).render(doc)
}

/// Convert a single table to HTML.
pub fn table_to_html(table: &Table, options: &HtmlOptions) -> Result<String> {
    let mut output = String::new();
    HtmlRenderer::new(options.clone()).render_table(&mut output, table);
    Ok(output)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: HtmlOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Render a document to HTML.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        for block in &doc.blocks {
            match block {
                Block::Table(table) => self.render_table(&mut output, table),
                Block::Paragraph(para) if self.options.include_paragraphs => {
                    render_paragraph(&mut output, para);
                    self.newline(&mut output);
                }
                Block::Paragraph(_) => {}
            }
        }
        Ok(output)
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        let grid = resolve_grid(table);

        if self.options.wrap_in_figure {
            output.push_str(&format!(
                "<figure class=\"{}\">",
                escape_html(&self.options.figure_class)
            ));
        }
        output.push_str("<table>");
        self.newline(output);

        self.render_section(output, "thead", table, &grid, heading_section(table));
        self.render_section(output, "tbody", table, &grid, body_section(table));

        output.push_str("</table>");
        if self.options.wrap_in_figure {
            output.push_str("</figure>");
        }
        self.newline(output);
    }

    fn render_section(
        &self,
        output: &mut String,
        tag: &str,
        table: &Table,
        grid: &ResolvedGrid,
        rows: Range<usize>,
    ) {
        if rows.is_empty() {
            return;
        }
        output.push_str(&format!("<{}>", tag));
        self.newline(output);
        for row in rows {
            self.render_row(output, table, grid, row);
        }
        output.push_str(&format!("</{}>", tag));
        self.newline(output);
    }

    fn render_row(&self, output: &mut String, table: &Table, grid: &ResolvedGrid, row: usize) {
        output.push_str("<tr>");
        for (index, cell) in table.rows[row].cells.iter().enumerate() {
            let kind = grid
                .anchor_of(row, index)
                .map(|entry| cell_kind(entry, table.heading_rows, table.heading_columns))
                .unwrap_or(if row < table.heading_rows {
                    CellKind::Heading
                } else {
                    CellKind::Body
                });
            render_cell(output, cell, kind);
        }
        output.push_str("</tr>");
        self.newline(output);
    }

    fn newline(&self, output: &mut String) {
        if self.options.line_breaks {
            output.push('\n');
        }
    }
}

fn render_cell(output: &mut String, cell: &TableCell, kind: CellKind) {
    let tag = match kind {
        CellKind::Heading => "th",
        CellKind::Body => "td",
    };

    let mut attrs = String::new();
    if cell.colspan > 1 {
        attrs.push_str(&format!(" colspan=\"{}\"", cell.colspan));
    }
    if cell.rowspan > 1 {
        attrs.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
    }

    output.push_str(&format!("<{}{}>", tag, attrs));
    match cell.content.as_slice() {
        [single] if single.alignment == Alignment::Left => {
            render_runs(output, &single.runs);
        }
        paragraphs => {
            for para in paragraphs {
                render_paragraph(output, para);
            }
        }
    }
    output.push_str(&format!("</{}>", tag));
}

fn render_paragraph(output: &mut String, para: &Paragraph) {
    if para.alignment == Alignment::Left {
        output.push_str("<p>");
    } else {
        output.push_str(&format!("<p style=\"text-align:{}\">", para.alignment.as_css()));
    }
    render_runs(output, &para.runs);
    output.push_str("</p>");
}

fn render_runs(output: &mut String, runs: &[TextRun]) {
    for run in runs {
        if run.is_empty() {
            continue;
        }
        let style = &run.style;
        let tags: Vec<&str> = [
            (style.bold, "strong"),
            (style.italic, "i"),
            (style.underline, "u"),
            (style.strikethrough, "s"),
        ]
        .into_iter()
        .filter_map(|(on, tag)| on.then_some(tag))
        .collect();

        for tag in &tags {
            output.push_str(&format!("<{}>", tag));
        }
        output.push_str(&escape_html(&run.text));
        for tag in tags.iter().rev() {
            output.push_str(&format!("</{}>", tag));
        }
    }
}

/// Escape text for use in HTML content and attribute values.
fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
