//! Document rendering for the docgen service.
//!
//! Turns a `(title, content, kind)` triple into a paginated PDF. The content
//! string is interpreted according to the declared kind:
//! - `docs`: newline-separated free text, one paragraph per non-blank line
//! - `agenda`: JSON array of agenda records, rendered as a styled table
//! - `planilhas`: JSON 2-D array, rendered as a styled spreadsheet table
//! - anything else: title-only document
//!
//! Structured payloads that fail to parse degrade to a plain paragraph of
//! the raw content; the renderer always produces a valid document.

pub mod compose;
pub mod error;
pub mod metrics;
pub mod model;
pub mod pdf;

pub use compose::compose;
pub use error::RenderError;
pub use model::{Block, DocKind, DocumentSpec, RenderRequest, RenderedDocument, TableBlock};

/// Render a request into finished PDF bytes plus a suggested filename.
pub fn render(request: &RenderRequest) -> Result<RenderedDocument, RenderError> {
    let spec = compose(request);
    let bytes = pdf::serialize(&spec)?;
    Ok(RenderedDocument {
        bytes,
        filename: suggested_filename(&request.title),
    })
}

/// Download filename for a document title: spaces become underscores.
pub fn suggested_filename(title: &str) -> String {
    format!("{}.pdf", title.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_replaces_spaces() {
        assert_eq!(suggested_filename("Meeting Notes Q1"), "Meeting_Notes_Q1.pdf");
    }

    #[test]
    fn test_filename_without_spaces_is_untouched() {
        assert_eq!(suggested_filename("Relatório"), "Relatório.pdf");
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let req = RenderRequest {
            title: "Smoke Test".into(),
            content: "hello\nworld".into(),
            kind: DocKind::Docs,
        };
        let doc = render(&req).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-"));
        assert_eq!(doc.filename, "Smoke_Test.pdf");
    }
}
