//! Feed retrieval: decoding the published CSV into a [`RawTable`], fetching it
//! over HTTP or from disk, and caching it with a time-to-live.

pub mod cache;
pub mod decode;
pub mod refresh;
pub mod source;
pub mod table;

pub use cache::FeedCache;
pub use decode::decode_csv;
pub use refresh::{RefreshEvent, RefreshScheduler};
pub use source::{FeedSource, FileFeedSource, HttpFeedSource, LocationFeedSource};
pub use table::{RawRecord, RawTable};
