use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};

use super::table::RawTable;
use crate::error::FeedError;

/// Decodes a CSV document with a header row into a [`RawTable`].
///
/// Rows are read flexibly: ragged rows are kept and missing trailing cells
/// read as absent later on. Cell text is kept untrimmed, and bytes that are
/// not valid UTF-8 become U+FFFD. A document without a usable header row, or
/// with no data rows, is rejected as a whole.
pub fn decode_csv<R: Read>(reader: R) -> Result<RawTable, FeedError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = lossy_cells(rdr.byte_headers()?);
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FeedError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in rdr.byte_records() {
        rows.push(lossy_cells(&record?));
    }

    if rows.is_empty() {
        return Err(FeedError::Empty);
    }

    Ok(RawTable::new(headers, rows))
}

fn lossy_cells(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).into_owned())
        .collect()
}
