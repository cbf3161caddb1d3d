//! Builds a shard's [`SegmentsStats`] from the figures the engine reports.

use tracing::{debug, instrument};

use super::extension::file_key;
use super::options::StatsOptions;
use super::stats::SegmentsStats;

/// Memory figures and files of one segment, as estimated by the engine.
#[derive(Debug, Clone, Default)]
pub struct SegmentMemory {
    pub ram_bytes_used: i64,
    pub terms: i64,
    pub stored_fields: i64,
    pub term_vectors: i64,
    pub norms: i64,
    pub points: i64,
    pub doc_values: i64,
    /// File names with their sizes in bytes.
    pub files: Vec<(String, i64)>,
}

/// Engine-wide figures, counted once per shard.
#[derive(Debug, Clone)]
pub struct EngineMemory {
    pub index_writer: i64,
    pub version_map: i64,
    pub bitset: i64,
    pub max_unsafe_auto_id_timestamp: i64,
}

impl Default for EngineMemory {
    fn default() -> Self {
        Self {
            index_writer: 0,
            version_map: 0,
            bitset: 0,
            max_unsafe_auto_id_timestamp: i64::MIN,
        }
    }
}

#[instrument(skip_all, fields(include_file_sizes = options.include_file_sizes))]
pub fn collect<'a, I>(segments: I, engine: &EngineMemory, options: &StatsOptions) -> SegmentsStats
where
    I: IntoIterator<Item = &'a SegmentMemory>,
{
    let mut stats = SegmentsStats::new();
    for segment in segments {
        stats.add(1, segment.ram_bytes_used);
        stats.add_terms_memory_in_bytes(segment.terms);
        stats.add_stored_fields_memory_in_bytes(segment.stored_fields);
        stats.add_term_vectors_memory_in_bytes(segment.term_vectors);
        stats.add_norms_memory_in_bytes(segment.norms);
        stats.add_points_memory_in_bytes(segment.points);
        stats.add_doc_values_memory_in_bytes(segment.doc_values);
        if options.include_file_sizes {
            stats.add_file_sizes(
                segment
                    .files
                    .iter()
                    .map(|(name, size)| (file_key(name), *size)),
            );
        }
    }
    stats.add_index_writer_memory_in_bytes(engine.index_writer);
    stats.add_version_map_memory_in_bytes(engine.version_map);
    stats.add_bitset_memory_in_bytes(engine.bitset);
    stats.update_max_unsafe_auto_id_timestamp(engine.max_unsafe_auto_id_timestamp);
    debug!(
        segments = stats.count(),
        memory_in_bytes = stats.memory_in_bytes(),
        "collected segments stats"
    );
    stats
}
