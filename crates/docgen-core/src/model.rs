//! Data model for a single render operation.

use serde::{Deserialize, Serialize};

/// Content kind declared by the caller.
///
/// Unrecognized tags map to `Other`, which renders a title-only document.
/// This is the degenerate case, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Docs,
    Agenda,
    Planilhas,
    Other,
}

impl DocKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "docs" => DocKind::Docs,
            "agenda" => DocKind::Agenda,
            "planilhas" => DocKind::Planilhas,
            _ => DocKind::Other,
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocKind::Docs => write!(f, "docs"),
            DocKind::Agenda => write!(f, "agenda"),
            DocKind::Planilhas => write!(f, "planilhas"),
            DocKind::Other => write!(f, "other"),
        }
    }
}

/// Immutable input to a single render operation.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    pub title: String,
    pub content: String,
    pub kind: DocKind,
}

/// An RGB color in the 0.0..=1.0 range used by PDF `rg`/`RG` operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Title ink (#1a1a2e).
pub const TITLE_COLOR: Color = Color::new(0.102, 0.102, 0.180);
/// Agenda header background (#0f3460).
pub const AGENDA_HEADER_BG: Color = Color::new(0.059, 0.204, 0.376);
/// Spreadsheet header background (#16213e).
pub const SHEET_HEADER_BG: Color = Color::new(0.086, 0.129, 0.243);
/// Whitesmoke header text.
pub const HEADER_TEXT: Color = Color::new(0.961, 0.961, 0.961);
/// Beige agenda body background.
pub const AGENDA_BODY_BG: Color = Color::new(0.961, 0.961, 0.863);
/// Light grey spreadsheet body background.
pub const SHEET_BODY_BG: Color = Color::new(0.827, 0.827, 0.827);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

/// Two-tier visual style for a table: a dark header row over light body
/// rows, all cells centered behind a uniform grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub header_bg: Color,
    pub header_text: Color,
    pub header_font_size: f32,
    pub body_bg: Color,
    pub body_text: Color,
    pub body_font_size: f32,
    /// Extra bottom padding under the header row's text.
    pub header_bottom_padding: f32,
}

impl TableStyle {
    pub fn agenda() -> Self {
        Self {
            header_bg: AGENDA_HEADER_BG,
            header_text: HEADER_TEXT,
            header_font_size: 14.0,
            body_bg: AGENDA_BODY_BG,
            body_text: BLACK,
            body_font_size: 10.0,
            header_bottom_padding: 12.0,
        }
    }

    pub fn spreadsheet() -> Self {
        Self {
            header_bg: SHEET_HEADER_BG,
            header_text: HEADER_TEXT,
            header_font_size: 12.0,
            body_bg: SHEET_BODY_BG,
            body_text: BLACK,
            body_font_size: 10.0,
            header_bottom_padding: 12.0,
        }
    }
}

/// A rectangular grid of cell strings. Row 0 is the header row.
///
/// Rows are always normalized to a uniform column count before the block is
/// built, so the serializer can assume a rectangular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub rows: Vec<Vec<String>>,
    /// Fixed column widths in points; `None` means size columns from content.
    pub col_widths: Option<Vec<f32>>,
    pub style: TableStyle,
}

/// One laid-out element of the document flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Paragraph(String),
    /// Fixed vertical gap in points.
    Spacer(f32),
    Table(TableBlock),
}

/// Ordered block sequence built during a single render operation.
#[derive(Debug, Clone, Default)]
pub struct DocumentSpec {
    pub blocks: Vec<Block>,
}

impl DocumentSpec {
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .count()
    }

    pub fn table(&self) -> Option<&TableBlock> {
        self.blocks.iter().find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }
}

/// Final output of a render operation: the PDF bytes and the filename to
/// suggest in the download headers.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
}
