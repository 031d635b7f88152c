//! Segmentation strategies
//!
//! Every algorithm implements [`SegmentationStrategy`]. Use [`Algorithm`]
//! to parse a selector string and [`build_strategy`] to construct it.

mod even;
mod selector;
mod texttiling;
mod traits;

pub use even::EvenStrategy;
pub use selector::{build_strategy, Algorithm};
pub use texttiling::TextTilingStrategy;
pub use traits::SegmentationStrategy;
