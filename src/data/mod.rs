//! Derived projections over the fetched collections.
//!
//! The app state holds the raw collections exactly as the latest poll
//! returned them; everything the UI shows is derived on render by the
//! helpers in this module.
//!
//! ## Submodules
//!
//! - [`feed`]: topic de-duplication and stat-card warn limits
//! - [`page`]: pagination arithmetic for the readings table
//! - [`trend`]: chart series extraction for the overview trend chart

pub mod feed;
pub mod page;
pub mod trend;

pub use feed::{unique_topics, Thresholds};
pub use page::{PageView, PAGE_SIZE};
pub use trend::TrendSeries;
