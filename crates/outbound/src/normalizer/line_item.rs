use chrono::NaiveDateTime;
use serde::Serialize;

pub const COMPLETE: &str = "COMPLETE";
pub const PACKING_DONE: &str = "PACKING DONE";
pub const LOADING_DONE: &str = "LOADING DONE";
pub const OVERLOAD: &str = "OVERLOAD";

/// Cell text that means "no value" in the feed, compared after upper-casing.
pub const STATUS_SENTINELS: [&str; 4] = ["NAN", "NAT", "NULL", "0"];

/// A canonical packing or loading status: trimmed, upper-cased, never a
/// sentinel and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    /// Canonicalizes raw cell text. Blank cells and sentinel tokens
    /// (`nan`, `NaT`, `null`, `0` in any case) are absent.
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical = raw.trim().to_uppercase();
        if canonical.is_empty() || STATUS_SENTINELS.contains(&canonical.as_str()) {
            return None;
        }
        Some(Status(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `PACKING DONE` or `COMPLETE`.
    pub fn is_packing_done(&self) -> bool {
        matches!(self.0.as_str(), PACKING_DONE | COMPLETE)
    }

    /// `LOADING DONE` or `COMPLETE`.
    pub fn is_loading_done(&self) -> bool {
        matches!(self.0.as_str(), LOADING_DONE | COMPLETE)
    }

    /// Any status mentioning `OVERLOAD`, e.g. `OVERLOAD 2%`.
    pub fn is_overload(&self) -> bool {
        self.0.contains(OVERLOAD)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One shipment line of an outbound job, after normalization.
///
/// Every measure is present and non-negative. Dates and statuses are absent
/// when the source cell was blank or unparseable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineItem {
    pub job_id: Option<String>,
    pub order_id: Option<String>,
    pub customer_name: String,
    pub product_code: String,
    pub product_desc: String,

    pub create_date: Option<NaiveDateTime>,
    pub pack_date: Option<NaiveDateTime>,
    pub load_date: Option<NaiveDateTime>,

    /// `DP Qty`
    pub planned_qty: f64,
    pub packed_qty: f64,
    pub loaded_qty: f64,
    pub volume: f64,
    /// `Total M3`
    pub total_m3: f64,
    pub weight: f64,
    pub total_weight: f64,

    pub packing_status: Option<Status>,
    pub loading_status: Option<Status>,
}

impl LineItem {
    pub fn is_packing_done(&self) -> bool {
        self.packing_status.as_ref().is_some_and(Status::is_packing_done)
    }

    pub fn is_loading_done(&self) -> bool {
        self.loading_status.as_ref().is_some_and(Status::is_loading_done)
    }

    pub fn is_overloaded(&self) -> bool {
        self.loading_status.as_ref().is_some_and(Status::is_overload)
    }
}

impl AsRef<LineItem> for LineItem {
    fn as_ref(&self) -> &LineItem {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_canonicalized() {
        assert_eq!(
            Status::parse("  loading done ").unwrap().as_str(),
            LOADING_DONE
        );
    }

    #[test]
    fn test_status_sentinels_are_absent() {
        for raw in ["nan", "NaN", "NAT", "nat", "null", "Null", "0", " 0 ", "", "   "] {
            assert_eq!(Status::parse(raw), None, "{raw:?} should be absent");
        }
    }

    #[test]
    fn test_status_sentinel_is_whole_token_only() {
        assert!(Status::parse("10").is_some());
        assert!(Status::parse("NANO").is_some());
    }

    #[test]
    fn test_done_vocabulary() {
        let complete = Status::parse("complete").unwrap();
        assert!(complete.is_packing_done());
        assert!(complete.is_loading_done());

        let packed = Status::parse("PACKING DONE").unwrap();
        assert!(packed.is_packing_done());
        assert!(!packed.is_loading_done());

        let loaded = Status::parse("LOADING DONE").unwrap();
        assert!(!loaded.is_packing_done());
        assert!(loaded.is_loading_done());
    }

    #[test]
    fn test_overload_is_substring_match() {
        assert!(Status::parse("overload 2%").unwrap().is_overload());
        assert!(Status::parse("PARTIAL OVERLOAD").unwrap().is_overload());
        assert!(!Status::parse("PENDING").unwrap().is_overload());
    }

    #[test]
    fn test_line_item_predicates_with_absent_status() {
        let item = LineItem::default();
        assert!(!item.is_packing_done());
        assert!(!item.is_loading_done());
        assert!(!item.is_overloaded());
    }
}
