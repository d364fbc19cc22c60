//! Block JSON schema.
//!
//! The caller posts an ordered array of block objects discriminated by a
//! `type` tag. Dispatch over block kinds is a closed enum match, but an
//! unrecognized tag must stay a recoverable per-block condition, so
//! deserialization captures it as [`Block::Unknown`] instead of failing the
//! whole request. A wrong-typed field inside a known block is a request
//! error and fails deserialization normally.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Free text paragraphs. Also the payload of `title` blocks, which only
/// differ in their defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub font_size: Option<u32>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub padding: Option<u32>,
    /// Font family name; `None` uses the service default.
    #[serde(default)]
    pub font: Option<String>,
}

/// Bulleted list.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListBlock {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub font_size: Option<u32>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default = "default_bullet")]
    pub bullet: String,
    #[serde(default)]
    pub font: Option<String>,
}

fn default_bullet() -> String {
    "•".to_string()
}

/// Horizontal separator.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeparatorBlock {
    /// "line" (default), "dotted", "blank". Unrecognized styles draw a line.
    #[serde(default)]
    pub style: Option<String>,
}

/// Image fetched from a URL.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ImageUrlBlock {
    #[serde(default)]
    pub url: String,
}

/// Inline base64-encoded image.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ImageB64Block {
    #[serde(default)]
    pub image: String,
}

/// One declarative content block.
///
/// The closed set of renderable kinds plus [`Block::Unknown`], which records
/// the unrecognized tag so the compositor can produce its warning.
#[derive(Debug, Clone)]
pub enum Block {
    Text(TextBlock),
    Title(TextBlock),
    List(ListBlock),
    Separator(SeparatorBlock),
    ImageUrl(ImageUrlBlock),
    ImageB64(ImageB64Block),
    Unknown(String),
}

impl Block {
    /// The wire tag, used in warnings and the `/health` capability list.
    pub fn tag(&self) -> &str {
        match self {
            Block::Text(_) => "text",
            Block::Title(_) => "title",
            Block::List(_) => "list",
            Block::Separator(_) => "separator",
            Block::ImageUrl(_) => "image_url",
            Block::ImageB64(_) => "image_b64",
            Block::Unknown(tag) => tag,
        }
    }

    /// All tags the pipeline can render.
    pub fn supported_tags() -> &'static [&'static str] {
        &["text", "title", "list", "separator", "image_url", "image_b64"]
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .to_string();

        fn from<T: serde::de::DeserializeOwned, E: DeError>(v: serde_json::Value) -> Result<T, E> {
            serde_json::from_value(v).map_err(E::custom)
        }

        match tag.as_str() {
            "text" => Ok(Block::Text(from(value)?)),
            "title" => Ok(Block::Title(from(value)?)),
            "list" => Ok(Block::List(from(value)?)),
            "separator" => Ok(Block::Separator(from(value)?)),
            "image_url" => Ok(Block::ImageUrl(from(value)?)),
            "image_b64" => Ok(Block::ImageB64(from(value)?)),
            _ => Ok(Block::Unknown(tag)),
        }
    }
}

/// Top-level print request body.
#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(v: serde_json::Value) -> Block {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_text_block_defaults() {
        let b = block(json!({"type": "text", "text": "Hello"}));
        match b {
            Block::Text(t) => {
                assert_eq!(t.text, "Hello");
                assert!(!t.bold);
                assert_eq!(t.font_size, None);
                assert_eq!(t.align, None);
            }
            other => panic!("expected text, got {}", other.tag()),
        }
    }

    #[test]
    fn test_text_block_full() {
        let b = block(json!({
            "type": "text", "text": "x", "font_size": 30, "bold": true,
            "align": "right", "padding": 10, "font": "Liberation"
        }));
        match b {
            Block::Text(t) => {
                assert_eq!(t.font_size, Some(30));
                assert!(t.bold);
                assert_eq!(t.align, Some(Align::Right));
                assert_eq!(t.padding, Some(10));
                assert_eq!(t.font.as_deref(), Some("Liberation"));
            }
            other => panic!("expected text, got {}", other.tag()),
        }
    }

    #[test]
    fn test_list_block_defaults() {
        let b = block(json!({"type": "list", "items": ["A", "B"]}));
        match b {
            Block::List(l) => {
                assert_eq!(l.items, vec!["A", "B"]);
                assert_eq!(l.bullet, "•");
            }
            other => panic!("expected list, got {}", other.tag()),
        }
    }

    #[test]
    fn test_separator_styles() {
        let b = block(json!({"type": "separator"}));
        assert!(matches!(b, Block::Separator(SeparatorBlock { style: None })));
        let b = block(json!({"type": "separator", "style": "dotted"}));
        match b {
            Block::Separator(s) => assert_eq!(s.style.as_deref(), Some("dotted")),
            other => panic!("expected separator, got {}", other.tag()),
        }
    }

    #[test]
    fn test_unknown_tag_is_recoverable() {
        let b = block(json!({"type": "bogus", "whatever": 1}));
        match b {
            Block::Unknown(tag) => assert_eq!(tag, "bogus"),
            other => panic!("expected unknown, got {}", other.tag()),
        }
        // Missing tag entirely is also captured, not fatal
        let b = block(json!({"text": "no type"}));
        assert!(matches!(b, Block::Unknown(tag) if tag.is_empty()));
    }

    #[test]
    fn test_wrong_typed_field_is_a_request_error() {
        let result: Result<Block, _> =
            serde_json::from_value(json!({"type": "text", "text": ["not", "a", "string"]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_print_request_array() {
        let req: PrintRequest = serde_json::from_value(json!({
            "blocks": [
                {"type": "title", "text": "Hello"},
                {"type": "separator"},
                {"type": "list", "items": ["A"]}
            ]
        }))
        .unwrap();
        assert_eq!(req.blocks.len(), 3);
        assert_eq!(req.blocks[0].tag(), "title");

        let empty: PrintRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.blocks.is_empty());
    }
}
