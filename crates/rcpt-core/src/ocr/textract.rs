//! Decoding of AWS Textract `DetectDocumentText` responses.

use serde::Deserialize;
use tracing::debug;

use super::{Fragment, OcrDocument, Position};

const LINE_BLOCK: &str = "LINE";

/// Full Textract response, restricted to the fields we read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextractDocument {
    #[serde(default)]
    pub document_metadata: DocumentMetadata,

    pub blocks: Vec<TextractBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub pages: u32,
}

/// A single Textract block (PAGE, LINE, WORD, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextractBlock {
    pub block_type: String,

    #[serde(default)]
    pub confidence: f64,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub geometry: Option<BlockGeometry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockGeometry {
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl From<BoundingBox> for Position {
    fn from(bbox: BoundingBox) -> Self {
        Position {
            top: bbox.top,
            left: bbox.left,
            width: bbox.width,
            height: bbox.height,
        }
    }
}

impl TextractDocument {
    /// Keep the non-empty LINE blocks, in provider order. Blocks without
    /// geometry sit at the top-left corner.
    pub fn into_document(self) -> OcrDocument {
        let total_blocks = self.blocks.len();

        let lines: Vec<Fragment> = self
            .blocks
            .into_iter()
            .filter(|b| b.block_type == LINE_BLOCK)
            .filter_map(|b| {
                let text = b.text.filter(|t| !t.is_empty())?;
                let position = b
                    .geometry
                    .and_then(|g| g.bounding_box)
                    .map(Position::from)
                    .unwrap_or_default();
                Some(Fragment {
                    text,
                    confidence: b.confidence,
                    position,
                })
            })
            .collect();

        debug!(
            "Decoded {} LINE blocks out of {} Textract blocks",
            lines.len(),
            total_blocks
        );

        OcrDocument {
            page_count: self.document_metadata.pages,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(block_type: &str, text: Option<&str>) -> TextractBlock {
        TextractBlock {
            block_type: block_type.to_string(),
            confidence: 95.0,
            text: text.map(String::from),
            geometry: None,
        }
    }

    #[test]
    fn test_only_non_empty_lines_kept() {
        let doc = TextractDocument {
            document_metadata: DocumentMetadata { pages: 2 },
            blocks: vec![
                block("PAGE", None),
                block("LINE", Some("Milk $4.99")),
                block("WORD", Some("Milk")),
                block("LINE", Some("")),
                block("LINE", None),
            ],
        }
        .into_document();

        assert_eq!(doc.page_count, 2);
        assert_eq!(doc.lines.len(), 1);
        assert_eq!(doc.lines[0].text, "Milk $4.99");
        assert_eq!(doc.lines[0].position, Position::default());
    }

    #[test]
    fn test_missing_metadata_defaults_to_zero_pages() {
        let doc: TextractDocument = serde_json::from_str(r#"{"Blocks": []}"#).unwrap();
        assert_eq!(doc.into_document().page_count, 0);
    }
}
