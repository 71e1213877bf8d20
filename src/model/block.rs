//! Screen render blocks.

use serde::{Deserialize, Serialize};

use super::InlineSpan;

/// Classification of a screen display node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Top-level section heading.
    SectionHeader,
    /// Subsection heading.
    SubsectionHeader,
    /// Free paragraph line.
    Paragraph,
    /// Stripped list item line.
    ListItem,
    /// Fallback node shown when no renderable feedback exists.
    Placeholder,
}

/// One display node of the screen renderer.
///
/// Blocks carry their resolved inline spans and a stable key derived from
/// their position in the section sequence, so a presentation layer can key
/// a node list without re-deriving positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderBlock {
    /// Stable position-derived key (e.g. `s0`, `s0-sub1`, `s0-sub1-li0`).
    pub key: String,

    /// Node classification.
    pub kind: BlockKind,

    /// Resolved inline spans in order.
    pub spans: Vec<InlineSpan>,

    /// Accent color as `#rrggbb`, set on section headers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl RenderBlock {
    /// Create a block from pre-resolved spans.
    pub fn new(key: impl Into<String>, kind: BlockKind, spans: Vec<InlineSpan>) -> Self {
        Self {
            key: key.into(),
            kind,
            spans,
            accent: None,
        }
    }

    /// Attach an accent color.
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    /// Concatenated plain text of the block's spans.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Check if this block is a heading of either level.
    pub fn is_heading(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::SectionHeader | BlockKind::SubsectionHeader
        )
    }
}
