//! Tabular workbook extraction for `.xlsx` files.

use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

use crate::extraction::types::{ExtractionFailure, RawUnit};

/// Flatten the first worksheet: cells joined by a space, rows joined by `\n`.
///
/// A workbook without worksheets yields no candidates.
pub fn extract_xlsx(bytes: &[u8]) -> Result<Vec<RawUnit>, ExtractionFailure> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Vec::new());
    };
    let range = range?;
    tracing::debug!(
        rows = range.height(),
        columns = range.width(),
        "Loaded worksheet"
    );

    let text = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(vec![RawUnit::whole(text)])
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
