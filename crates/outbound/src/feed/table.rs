/// An untyped feed table: the header row as received plus one string per cell.
///
/// Header names are kept verbatim; whitespace normalization is the
/// normalizer's job so that the cache always holds exactly what was fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = RawRecord<'_>> {
        self.rows.iter().map(move |cells| RawRecord { cells })
    }
}

/// One row of a [`RawTable`]. Rows may be shorter than the header row.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    cells: &'a [String],
}

impl<'a> RawRecord<'a> {
    /// Cell at `index`, or `None` when the row is too short.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_rows_yield_none() {
        let table = RawTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1".to_string()]],
        );
        let record = table.records().next().unwrap();
        assert_eq!(record.get(0), Some("1"));
        assert_eq!(record.get(1), None);
        assert_eq!(table.len(), 1);
    }
}
