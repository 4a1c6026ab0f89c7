//! Rendering of structured documents to text, HTML and JSON.

mod html;
mod json;
mod options;
mod text;

pub use html::{escape_html, to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use text::{to_text, TextRenderer};
