pub mod cells;
pub mod columns;
pub mod line_item;
pub mod table;

pub use columns::normalize_header;
pub use line_item::{LineItem, Status};
pub use table::{normalize, NormalizedTable, VolumeColumn};
