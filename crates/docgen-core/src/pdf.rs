//! PDF serialization: flows a [`DocumentSpec`] onto letter pages.
//!
//! Pages are assembled with lopdf: one content stream per page, a shared
//! resource dictionary carrying the two base-14 Helvetica fonts, and a
//! standard Pages/Catalog tree. A cursor tracks the remaining vertical
//! space; paragraph lines and table rows that no longer fit spill onto a
//! fresh page.

use std::fmt::Write;

use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::error::RenderError;
use crate::metrics::{string_width, to_winansi_hex, word_wrap, Font};
use crate::model::{Block, Color, DocumentSpec, TableBlock, TITLE_COLOR};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_FONT_SIZE: f32 = 24.0;
const TITLE_SPACE_AFTER: f32 = 30.0;
const BODY_FONT_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0;

/// Horizontal cell padding on each side.
const CELL_PAD_X: f32 = 6.0;
/// Vertical padding above cell text.
const CELL_PAD_TOP: f32 = 3.0;
/// Vertical padding below body-row text (header rows carry their own).
const CELL_PAD_BOTTOM: f32 = 3.0;

/// Baseline offset from the top of a text line, as a fraction of font size.
const ASCENT: f32 = 0.8;

/// Serialize a block sequence into complete PDF bytes.
pub fn serialize(spec: &DocumentSpec) -> Result<Vec<u8>, RenderError> {
    let mut writer = PageWriter::new();

    for block in &spec.blocks {
        match block {
            Block::Title(text) => {
                writer.draw_text_block(text, Font::HelveticaBold, TITLE_FONT_SIZE, TITLE_COLOR);
                writer.advance(TITLE_SPACE_AFTER);
            }
            Block::Paragraph(text) => {
                writer.draw_text_block(text, Font::Helvetica, BODY_FONT_SIZE, crate::model::BLACK);
            }
            Block::Spacer(height) => writer.advance(*height),
            Block::Table(table) => writer.draw_table(table),
        }
    }

    writer.finish()
}

/// Accumulates page content streams while flowing blocks top to bottom.
struct PageWriter {
    pages: Vec<String>,
    content: String,
    /// Top of the remaining free space on the current page.
    cursor: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            content: String::new(),
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.content));
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    /// Start a new page unless `height` still fits on the current one.
    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < MARGIN && self.cursor < PAGE_HEIGHT - MARGIN {
            self.break_page();
        }
    }

    fn advance(&mut self, height: f32) {
        self.cursor -= height;
    }

    /// Wrapped text flow: title blocks and paragraphs differ only in font,
    /// size, and ink.
    fn draw_text_block(&mut self, text: &str, font: Font, size: f32, color: Color) {
        let leading = size * 1.2;
        for line in word_wrap(text, CONTENT_WIDTH, font, size) {
            self.ensure_space(leading);
            let baseline = self.cursor - size * ASCENT;
            let _ = writeln!(self.content, "{:.3} {:.3} {:.3} rg", color.r, color.g, color.b);
            self.content.push_str("BT\n");
            let _ = writeln!(self.content, "/{} {:.1} Tf", font.resource_name(), size);
            let _ = writeln!(self.content, "{:.2} {:.2} Td", MARGIN, baseline);
            let _ = writeln!(self.content, "<{}> Tj", to_winansi_hex(&line));
            self.content.push_str("ET\n");
            self.advance(leading);
        }
    }

    fn draw_table(&mut self, table: &TableBlock) {
        if table.rows.is_empty() {
            return;
        }

        let widths = column_widths(table);
        let total: f32 = widths.iter().sum();
        // Tables are centered within the content area.
        let x0 = MARGIN + ((CONTENT_WIDTH - total) / 2.0).max(0.0);

        for (index, row) in table.rows.iter().enumerate() {
            let header = index == 0;
            let (font, size, pad_bottom, bg, ink) = if header {
                (
                    Font::HelveticaBold,
                    table.style.header_font_size,
                    table.style.header_bottom_padding,
                    table.style.header_bg,
                    table.style.header_text,
                )
            } else {
                (
                    Font::Helvetica,
                    table.style.body_font_size,
                    CELL_PAD_BOTTOM,
                    table.style.body_bg,
                    table.style.body_text,
                )
            };
            let row_height = size + CELL_PAD_TOP + pad_bottom;
            self.ensure_space(row_height);
            let top = self.cursor;
            let bottom = top - row_height;

            // Row background.
            let _ = writeln!(self.content, "{:.3} {:.3} {:.3} rg", bg.r, bg.g, bg.b);
            let _ = writeln!(
                self.content,
                "{:.2} {:.2} {:.2} {:.2} re f",
                x0, bottom, total, row_height
            );

            // Centered cell text.
            let _ = writeln!(self.content, "{:.3} {:.3} {:.3} rg", ink.r, ink.g, ink.b);
            let mut x = x0;
            for (cell, width) in row.iter().zip(&widths) {
                let text_width = string_width(cell, font, size);
                let tx = x + ((width - text_width) / 2.0).max(CELL_PAD_X.min(*width / 2.0));
                let baseline = top - CELL_PAD_TOP - size * ASCENT;
                self.content.push_str("BT\n");
                let _ = writeln!(self.content, "/{} {:.1} Tf", font.resource_name(), size);
                let _ = writeln!(self.content, "{:.2} {:.2} Td", tx, baseline);
                let _ = writeln!(self.content, "<{}> Tj", to_winansi_hex(cell));
                self.content.push_str("ET\n");
                x += width;
            }

            // Uniform 1pt grid around every cell.
            self.content.push_str("1 w\n0 0 0 RG\n");
            let mut x = x0;
            for width in &widths {
                let _ = writeln!(
                    self.content,
                    "{:.2} {:.2} {:.2} {:.2} re S",
                    x, bottom, width, row_height
                );
                x += width;
            }

            self.advance(row_height);
        }
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        self.pages.push(std::mem::take(&mut self.content));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let fonts: Dictionary = [Font::Helvetica, Font::HelveticaBold]
            .into_iter()
            .fold(Dictionary::new(), |mut dict, font| {
                let font_id = doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.postscript_name(),
                    "Encoding" => "WinAnsiEncoding",
                });
                dict.set(font.resource_name(), Object::Reference(font_id));
                dict
            });
        let resources_id = doc.add_object(dictionary! {
            "Font" => Object::Dictionary(fonts),
        });

        let mut page_refs = Vec::new();
        for content in self.pages {
            let content_id =
                doc.add_object(Object::Stream(Stream::new(Dictionary::new(), content.into_bytes())));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH as i64),
                    Object::Integer(PAGE_HEIGHT as i64),
                ],
            });
            page_refs.push(Object::Reference(page_id));
        }

        let page_count = page_refs.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => page_count,
                "Kids" => page_refs,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::SerializationError(e.to_string()))?;
        Ok(buffer)
    }
}

/// Column widths in points: fixed widths when the block carries them,
/// otherwise sized from the widest cell per column and scaled down to the
/// content width if the natural total overflows.
fn column_widths(table: &TableBlock) -> Vec<f32> {
    if let Some(widths) = &table.col_widths {
        return widths.clone();
    }

    let columns = table.rows[0].len();
    let mut widths = vec![0.0f32; columns];
    for (index, row) in table.rows.iter().enumerate() {
        let (font, size) = if index == 0 {
            (Font::HelveticaBold, table.style.header_font_size)
        } else {
            (Font::Helvetica, table.style.body_font_size)
        };
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = width.max(string_width(cell, font, size) + 2.0 * CELL_PAD_X);
        }
    }

    let total: f32 = widths.iter().sum();
    if total > CONTENT_WIDTH && total > 0.0 {
        let scale = CONTENT_WIDTH / total;
        for width in &mut widths {
            *width *= scale;
        }
    }
    widths
}
