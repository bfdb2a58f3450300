use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::cells::{parse_date, parse_identifier, parse_text, try_parse_quantity};
use super::columns::{self, normalize_header};
use super::line_item::{LineItem, Status};
use crate::feed::{RawRecord, RawTable};

/// Which measure column feeds the top-line volume figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum VolumeColumn {
    /// `Total M3`, used whenever the source carries it.
    TotalM3,
    /// `volume`, the fallback for feeds without `Total M3`.
    Volume,
}

impl VolumeColumn {
    pub fn value(self, item: &LineItem) -> f64 {
        match self {
            VolumeColumn::TotalM3 => item.total_m3,
            VolumeColumn::Volume => item.volume,
        }
    }
}

/// The clean, typed table produced from one feed pull.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    items: Vec<LineItem>,
    /// Normalized names of the columns the source actually carried.
    columns: BTreeSet<String>,
}

impl NormalizedTable {
    pub fn new(items: Vec<LineItem>, columns: BTreeSet<String>) -> Self {
        Self { items, columns }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn columns(&self) -> &BTreeSet<String> {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn volume_column(&self) -> VolumeColumn {
        if self.has_column(columns::TOTAL_M3) || !self.has_column(columns::VOLUME) {
            VolumeColumn::TotalM3
        } else {
            VolumeColumn::Volume
        }
    }
}

/// Header lookup keyed by normalized column name. When two headers normalize
/// to the same name the leftmost wins.
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(headers: &[String]) -> Self {
        let mut positions = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            let name = normalize_header(header);
            if !name.is_empty() {
                positions.entry(name).or_insert(i);
            }
        }
        Self { positions }
    }

    fn cell<'a>(&self, record: &RawRecord<'a>, name: &str) -> Option<&'a str> {
        self.positions.get(name).and_then(|&i| record.get(i))
    }

    fn names(&self) -> BTreeSet<String> {
        self.positions.keys().cloned().collect()
    }
}

#[derive(Debug, Default)]
struct CellStats {
    malformed_dates: usize,
    malformed_quantities: usize,
}

/// Turns a raw feed table into typed line items.
///
/// Never fails: malformed dates become absent, malformed or missing measures
/// become `0`, sentinel statuses become absent. Columns missing from the feed
/// read as blank on every row.
pub fn normalize(table: &RawTable) -> NormalizedTable {
    let index = ColumnIndex::new(table.headers());
    let mut stats = CellStats::default();

    let items: Vec<LineItem> = table
        .records()
        .map(|record| normalize_record(&index, &record, &mut stats))
        .collect();

    let missing: Vec<&str> = columns::QUANTITY_COLUMNS
        .iter()
        .copied()
        .filter(|name| !index.positions.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        debug!(columns = ?missing, "measure columns absent from feed, reading as 0");
    }

    debug!(
        rows = items.len(),
        malformed_dates = stats.malformed_dates,
        malformed_quantities = stats.malformed_quantities,
        "normalized feed"
    );

    NormalizedTable::new(items, index.names())
}

fn normalize_record(
    index: &ColumnIndex,
    record: &RawRecord<'_>,
    stats: &mut CellStats,
) -> LineItem {
    let text = |name: &str| index.cell(record, name).map(parse_text).unwrap_or_default();
    let identifier = |name: &str| index.cell(record, name).and_then(parse_identifier);
    let status = |name: &str| index.cell(record, name).and_then(Status::parse);

    let mut date = |name: &str| {
        let raw = index.cell(record, name)?;
        let parsed = parse_date(raw);
        if parsed.is_none() && parse_identifier(raw).is_some() {
            stats.malformed_dates += 1;
        }
        parsed
    };
    let create_date = date(columns::CREATE_DATE);
    let pack_date = date(columns::PACK_DATE);
    let load_date = date(columns::LOAD_DATE);

    let mut quantity = |name: &str| {
        let Some(raw) = index.cell(record, name) else {
            return 0.0;
        };
        match try_parse_quantity(raw) {
            Some(v) if v > 0.0 => v,
            Some(_) => 0.0,
            None => {
                if parse_identifier(raw).is_some() {
                    stats.malformed_quantities += 1;
                }
                0.0
            }
        }
    };
    let planned_qty = quantity(columns::DP_QTY);
    let packed_qty = quantity(columns::QTY_PACKING);
    let loaded_qty = quantity(columns::QTY_LOADING);
    let volume = quantity(columns::VOLUME);
    let total_m3 = quantity(columns::TOTAL_M3);
    let weight = quantity(columns::WEIGHT);
    let total_weight = quantity(columns::TOTAL_WEIGHT);

    LineItem {
        job_id: identifier(columns::JOB_NUM),
        order_id: identifier(columns::ORDER_NO),
        customer_name: text(columns::CUSTOMER),
        product_code: text(columns::PROD_CODE),
        product_desc: text(columns::PROD_DESC),
        create_date,
        pack_date,
        load_date,
        planned_qty,
        packed_qty,
        loaded_qty,
        volume,
        total_m3,
        weight,
        total_weight,
        packing_status: status(columns::STATUS_PACKING),
        loading_status: status(columns::STATUS_LOADING),
    }
}
