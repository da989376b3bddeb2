//! Data converters: HTML and JSON projections of the model.

mod html;
mod json;
mod options;

pub use html::{table_to_html, to_html, HtmlRenderer};
pub use json::{table_to_json, to_json, JsonFormat};
pub use options::HtmlOptions;
