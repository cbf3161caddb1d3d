//! Segment memory and file-size statistics: per-shard accumulation,
//! cluster-wide merging, a binary exchange format and a structured report.

pub mod error;
pub mod segments;
pub mod utils;

pub use error::{Result, StatsError};
pub use segments::extension::{DescriptionLookup, LuceneFileExtensions};
pub use segments::options::StatsOptions;
pub use segments::render::Emitter;
pub use segments::stats::SegmentsStats;
pub use utils::byte_size::ByteSize;
