//! Data models for the Docgen API

use docgen_core::{DocKind, RenderRequest};
use serde::{Deserialize, Serialize};

/// Request body for `/api/generate-pdf`. The kind tag arrives as a free
/// string; unrecognized values map to the title-only document kind.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePdfRequest {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<GeneratePdfRequest> for RenderRequest {
    fn from(req: GeneratePdfRequest) -> Self {
        RenderRequest {
            kind: DocKind::from_tag(&req.kind),
            title: req.title,
            content: req.content,
        }
    }
}

/// Banner returned from the API root.
#[derive(Debug, Clone, Serialize)]
pub struct ApiBanner {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_type_field() {
        let json = r#"{"title":"T","content":"c","type":"agenda"}"#;
        let req: GeneratePdfRequest = serde_json::from_str(json).unwrap();
        let render: RenderRequest = req.into();
        assert_eq!(render.kind, DocKind::Agenda);
    }

    #[test]
    fn test_unknown_type_maps_to_other() {
        let json = r#"{"title":"T","content":"c","type":"slides"}"#;
        let req: GeneratePdfRequest = serde_json::from_str(json).unwrap();
        let render: RenderRequest = req.into();
        assert_eq!(render.kind, DocKind::Other);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"title":"T","content":"c"}"#;
        assert!(serde_json::from_str::<GeneratePdfRequest>(json).is_err());
    }
}
