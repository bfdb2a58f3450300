//! Builders for test line items and CSV feeds.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use outbound::{LineItem, Status};

/// Builder for `LineItem` values.
pub struct LineItemBuilder {
    item: LineItem,
}

impl LineItemBuilder {
    /// A row of job `job` and order `order` with no statuses.
    pub fn new(job: &str, order: &str) -> Self {
        Self {
            item: LineItem {
                job_id: Some(job.to_string()),
                order_id: Some(order.to_string()),
                ..Default::default()
            },
        }
    }

    /// A row without job or order.
    pub fn orphan() -> Self {
        Self {
            item: LineItem::default(),
        }
    }

    pub fn customer(mut self, name: &str) -> Self {
        self.item.customer_name = name.to_string();
        self
    }

    pub fn product(mut self, desc: &str) -> Self {
        self.item.product_desc = desc.to_string();
        self
    }

    pub fn packing(mut self, status: &str) -> Self {
        self.item.packing_status = Status::parse(status);
        self
    }

    pub fn loading(mut self, status: &str) -> Self {
        self.item.loading_status = Status::parse(status);
        self
    }

    pub fn created(mut self, ymd: (i32, u32, u32)) -> Self {
        self.item.create_date = Some(at(ymd));
        self
    }

    pub fn loaded_on(mut self, ymd: (i32, u32, u32)) -> Self {
        self.item.load_date = Some(at(ymd));
        self
    }

    pub fn total_weight(mut self, kg: f64) -> Self {
        self.item.total_weight = kg;
        self
    }

    pub fn total_m3(mut self, m3: f64) -> Self {
        self.item.total_m3 = m3;
        self
    }

    pub fn build(self) -> LineItem {
        self.item
    }
}

fn at((y, m, d): (i32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .expect("valid test date")
}

/// Builder for CSV feed text with the dashboard's usual header.
pub struct FeedBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

pub const STANDARD_HEADERS: [&str; 13] = [
    "JOB Num",
    "Order No",
    "TP Full Name",
    "Prod Code",
    "Prod Desc",
    "Create Date",
    "Tgl_loading",
    "DP Qty",
    "Qty_Loading",
    "Total M3",
    "Total Weight",
    "Status_Packing",
    "Status_Loading",
];

impl FeedBuilder {
    pub fn new() -> Self {
        Self::with_headers(&STANDARD_HEADERS)
    }

    pub fn with_headers(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; cells beyond the header are kept, missing ones are blank.
    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn build(&self) -> String {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record(&self.headers).expect("write header");
        for row in &self.rows {
            writer.write_record(row).expect("write row");
        }
        let bytes = writer.into_inner().expect("flush csv");
        String::from_utf8(bytes).expect("utf-8 csv")
    }
}

impl Default for FeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}
