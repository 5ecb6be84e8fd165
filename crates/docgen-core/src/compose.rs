//! Builds the block sequence for a render request.
//!
//! The dispatcher selects a layout strategy per [`DocKind`]; the two tabular
//! strategies parse `content` as JSON and degrade to a plain paragraph of
//! the raw content when the payload does not have the expected shape.

use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    Block, DocKind, DocumentSpec, RenderRequest, TableBlock, TableStyle,
};

const INCH: f32 = 72.0;

/// Gap emitted after the title and after every docs paragraph.
const SPACER_HEIGHT: f32 = 12.0;

/// Fixed agenda column widths: 2.5 / 1.5 / 1 / 1.5 inches.
const AGENDA_COL_WIDTHS: [f32; 4] = [2.5 * INCH, 1.5 * INCH, 1.0 * INCH, 1.5 * INCH];

/// Outcome of parsing a structured tabular payload. The fallback arm is a
/// deliberate degrade path, not a suppressed error: the raw content is
/// rendered as a single unstyled paragraph.
enum TableOutcome {
    Table(TableBlock),
    Fallback(String),
    /// Parsed fine but there is nothing to show (empty spreadsheet).
    Empty,
}

/// Build the ordered block sequence for a request.
///
/// Always emits the title block and a spacer; the content body depends on
/// the declared kind. This never fails — unparsable structured content and
/// unknown kinds both degrade to valid documents.
pub fn compose(request: &RenderRequest) -> DocumentSpec {
    let mut spec = DocumentSpec::default();
    spec.push(Block::Title(request.title.clone()));
    spec.push(Block::Spacer(SPACER_HEIGHT));

    match request.kind {
        DocKind::Docs => compose_text_flow(&mut spec, &request.content),
        DocKind::Agenda => apply_outcome(&mut spec, compose_agenda(&request.content)),
        DocKind::Planilhas => apply_outcome(&mut spec, compose_spreadsheet(&request.content)),
        // Unknown kinds produce a title-only document.
        DocKind::Other => {}
    }

    spec
}

fn apply_outcome(spec: &mut DocumentSpec, outcome: TableOutcome) {
    match outcome {
        TableOutcome::Table(table) => spec.push(Block::Table(table)),
        TableOutcome::Fallback(raw) => spec.push(Block::Paragraph(raw)),
        TableOutcome::Empty => {}
    }
}

/// `docs`: one paragraph + spacer per non-blank line, blank lines skipped.
fn compose_text_flow(spec: &mut DocumentSpec, content: &str) {
    for line in content.split('\n') {
        if !line.trim().is_empty() {
            spec.push(Block::Paragraph(line.to_string()));
            spec.push(Block::Spacer(SPACER_HEIGHT));
        }
    }
}

/// An agenda record; every field is optional in the payload.
#[derive(Debug, Deserialize)]
struct AgendaItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    completed: Value,
}

/// `agenda`: JSON array of records into a fixed four-column table.
fn compose_agenda(content: &str) -> TableOutcome {
    let items: Vec<AgendaItem> = match serde_json::from_str(content) {
        Ok(items) => items,
        Err(_) => return TableOutcome::Fallback(content.to_string()),
    };

    let mut rows = vec![vec![
        "Título".to_string(),
        "Data".to_string(),
        "Hora".to_string(),
        "Status".to_string(),
    ]];
    for item in items {
        let status = if truthy(&item.completed) {
            "Concluído"
        } else {
            "Pendente"
        };
        rows.push(vec![item.title, item.date, item.time, status.to_string()]);
    }

    TableOutcome::Table(TableBlock {
        rows,
        col_widths: Some(AGENDA_COL_WIDTHS.to_vec()),
        style: TableStyle::agenda(),
    })
}

/// `planilhas`: JSON 2-D array taken as table rows, row 0 the header.
///
/// Ragged input is normalized to the header's column count: short rows are
/// padded with empty cells, long rows truncated.
fn compose_spreadsheet(content: &str) -> TableOutcome {
    let raw_rows: Vec<Vec<Value>> = match serde_json::from_str(content) {
        Ok(rows) => rows,
        Err(_) => return TableOutcome::Fallback(content.to_string()),
    };

    if raw_rows.is_empty() {
        return TableOutcome::Empty;
    }

    let columns = raw_rows[0].len();
    let rows = raw_rows
        .into_iter()
        .map(|row| {
            let mut cells: Vec<String> = row.iter().take(columns).map(cell_text).collect();
            cells.resize(columns, String::new());
            cells
        })
        .collect();

    TableOutcome::Table(TableBlock {
        rows,
        col_widths: None,
        style: TableStyle::spreadsheet(),
    })
}

/// Truthiness over a JSON value: agenda payloads flag completion with
/// booleans, 0/1, or non-empty strings.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
