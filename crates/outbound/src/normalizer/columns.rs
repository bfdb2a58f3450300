//! Recognized feed columns, by their whitespace-normalized header names.

pub const JOB_NUM: &str = "JOB Num";
pub const ORDER_NO: &str = "Order No";
pub const CUSTOMER: &str = "TP Full Name";
pub const PROD_CODE: &str = "Prod Code";
pub const PROD_DESC: &str = "Prod Desc";

pub const CREATE_DATE: &str = "Create Date";
pub const PACK_DATE: &str = "Tgl_Packing";
pub const LOAD_DATE: &str = "Tgl_loading";

pub const DP_QTY: &str = "DP Qty";
pub const QTY_PACKING: &str = "Qty_Packing";
pub const QTY_LOADING: &str = "Qty_Loading";
pub const TOTAL_M3: &str = "Total M3";
pub const VOLUME: &str = "volume";
pub const WEIGHT: &str = "Weight";
pub const TOTAL_WEIGHT: &str = "Total Weight";

pub const STATUS_PACKING: &str = "Status_Packing";
pub const STATUS_LOADING: &str = "Status_Loading";

pub const DATE_COLUMNS: [&str; 3] = [CREATE_DATE, PACK_DATE, LOAD_DATE];

/// Measure columns. Absent ones read as zero on every row.
pub const QUANTITY_COLUMNS: [&str; 7] = [
    QTY_PACKING,
    QTY_LOADING,
    DP_QTY,
    VOLUME,
    TOTAL_M3,
    WEIGHT,
    TOTAL_WEIGHT,
];

pub const STATUS_COLUMNS: [&str; 2] = [STATUS_PACKING, STATUS_LOADING];

/// Collapses every run of whitespace to one space and trims both ends, so
/// `" JOB   Num\t"` and `"JOB Num"` name the same column.
pub fn normalize_header(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
