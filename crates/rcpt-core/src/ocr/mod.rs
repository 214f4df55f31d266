//! OCR provider input: text fragments and the documents that carry them.

mod ordering;
pub mod textract;

pub use ordering::{OrderedFragments, compare_reading_order};
pub use textract::TextractDocument;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Page-relative position of a fragment, all values in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Distance from the top edge; increases downward.
    pub top: f64,

    /// Distance from the left edge.
    pub left: f64,

    #[serde(default)]
    pub width: f64,

    #[serde(default)]
    pub height: f64,
}

impl Position {
    /// Position with no extent.
    pub fn at(top: f64, left: f64) -> Self {
        Self {
            top,
            left,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// One OCR-recognized text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Recognized text, possibly noisy.
    pub text: String,

    /// OCR engine confidence (0.0 - 100.0).
    pub confidence: f64,

    /// Where the span sits on the page.
    #[serde(flatten)]
    pub position: Position,
}

impl Fragment {
    /// Create a fragment at `(top, left)`.
    pub fn new(text: impl Into<String>, confidence: f64, top: f64, left: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
            position: Position::at(top, left),
        }
    }
}

/// A decoded OCR document: page count plus every recognized line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrDocument {
    #[serde(default)]
    pub page_count: u32,

    /// Fragments in the order the provider emitted them.
    #[serde(alias = "fragments")]
    pub lines: Vec<Fragment>,
}

/// The input shapes accepted by [`OcrDocument::from_json`].
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentInput {
    Textract(TextractDocument),
    Lines(OcrDocument),
}

impl OcrDocument {
    /// Create a single-page document from fragments.
    pub fn from_fragments(lines: Vec<Fragment>) -> Self {
        Self {
            page_count: 1,
            lines,
        }
    }

    /// Decode either a raw Textract response or a flattened line list.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let input: DocumentInput = serde_json::from_str(json).map_err(|e| {
            InputError::Malformed(format!(
                "expected a Textract response or a line list: {}",
                e
            ))
        })?;

        Ok(match input {
            DocumentInput::Textract(doc) => doc.into_document(),
            DocumentInput::Lines(doc) => doc,
        })
    }

    /// Fragments sorted into reading order with the given row tolerance.
    pub fn ordered(&self, row_tolerance: f64) -> OrderedFragments<'_> {
        OrderedFragments::with_tolerance(&self.lines, row_tolerance)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_line_list() {
        let json = r#"{
            "page_count": 1,
            "lines": [
                {"text": "STORE NAME", "confidence": 97.0, "top": 0.05, "left": 0.1},
                {"text": "Total $5.39", "confidence": 97.0, "top": 0.6, "left": 0.1}
            ]
        }"#;

        let doc = OcrDocument::from_json(json).unwrap();
        assert_eq!(doc.page_count, 1);
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[1].position.top, 0.6);
        assert_eq!(doc.lines[1].position.width, 0.0);
    }

    #[test]
    fn test_from_json_fragments_alias() {
        let json = r#"{"fragments": [{"text": "A", "confidence": 50, "top": 0, "left": 0}]}"#;

        let doc = OcrDocument::from_json(json).unwrap();
        assert_eq!(doc.page_count, 0);
        assert_eq!(doc.lines[0].text, "A");
    }

    #[test]
    fn test_from_json_textract() {
        let json = r#"{
            "DocumentMetadata": {"Pages": 1},
            "Blocks": [
                {"BlockType": "PAGE", "Id": "p1"},
                {"BlockType": "LINE", "Id": "l1", "Confidence": 99.1, "Text": "Total $5.39",
                 "Geometry": {"BoundingBox": {"Width": 0.3, "Height": 0.02, "Left": 0.1, "Top": 0.6}}}
            ]
        }"#;

        let doc = OcrDocument::from_json(json).unwrap();
        assert_eq!(doc.page_count, 1);
        assert_eq!(doc.lines, vec![Fragment {
            text: "Total $5.39".to_string(),
            confidence: 99.1,
            position: Position {
                top: 0.6,
                left: 0.1,
                width: 0.3,
                height: 0.02,
            },
        }]);
    }

    #[test]
    fn test_from_json_empty_document_is_not_an_error() {
        let doc = OcrDocument::from_json(r#"{"page_count": 1, "lines": []}"#).unwrap();
        assert!(doc.is_empty());

        let doc = OcrDocument::from_json(r#"{"Blocks": []}"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            OcrDocument::from_json(r#"{"foo": 1}"#),
            Err(InputError::Malformed(_))
        ));
        assert!(OcrDocument::from_json("not json").is_err());
    }
}
