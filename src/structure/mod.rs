//! Structural inference: turns a styled body into a [`Document`].
//!
//! The pipeline is one forward pass over the body units
//! ([`DocumentBuilder`]) followed by a document-global ranking of header
//! font sizes ([`HeaderLevelNormalizer`]):
//!
//! ```
//! use docsift::body::{BodyUnit, StyledBody, StyledParagraph, StyledRun};
//! use docsift::structure::{structure_document, BuildOptions};
//!
//! let mut body = StyledBody::default();
//! body.default_font_size = Some(10);
//! body.push(BodyUnit::Paragraph(StyledParagraph::new(vec![StyledRun::sized("Title", 18)])));
//! body.push(BodyUnit::Paragraph(StyledParagraph::new(vec![StyledRun::new("Body text.")])));
//!
//! let doc = structure_document(body, BuildOptions::default())?;
//! assert_eq!(doc.elements[0].header_level(), Some(1));
//! # Ok::<(), docsift::Error>(())
//! ```

mod builder;
mod classify;
mod cursor;
mod list;
mod normalize;
mod options;
mod style;

pub use builder::DocumentBuilder;
pub use classify::{classify, Classification};
pub use cursor::UnitCursor;
pub use list::accumulate;
pub use normalize::HeaderLevelNormalizer;
pub use options::BuildOptions;
pub use style::{resolve_default_font_size, resolve_font_size, FALLBACK_FONT_SIZE};

use crate::body::StyledBody;
use crate::error::Result;
use crate::model::Document;

/// Build, rank and validate a document.
pub fn structure_document(body: StyledBody, options: BuildOptions) -> Result<Document> {
    let mut document = DocumentBuilder::new(options).build(body)?;
    HeaderLevelNormalizer::new().normalize(&mut document);
    document.validate()?;
    Ok(document)
}
