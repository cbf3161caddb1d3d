use std::collections::HashMap;

use tracing::{debug, trace};

use crate::utils::byte_size::ByteSize;

/// Generates the accumulate / raw read / human read triple for one memory
/// sub-category.
macro_rules! memory_metric {
    ($(#[$doc:meta])* $field:ident, $add:ident, $human:ident) => {
        $(#[$doc])*
        pub fn $field(&self) -> i64 {
            self.$field
        }

        pub fn $add(&mut self, bytes: i64) {
            self.$field = self.$field.wrapping_add(bytes);
        }

        pub fn $human(&self) -> ByteSize {
            ByteSize(self.$field)
        }
    };
}

/// Memory and file-size statistics summed over the segments of one or more
/// shards.
///
/// Counters and memory figures are summed, the unsafe auto-id timestamp
/// keeps the maximum seen and file sizes are summed per key, so merging is
/// associative and commutative and `SegmentsStats::default()` is its
/// identity. The value does no locking of its own: confine it to one task
/// or put it behind a mutex when several writers share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentsStats {
    pub(super) count: u64,
    pub(super) memory_in_bytes: i64,
    pub(super) terms_memory_in_bytes: i64,
    pub(super) stored_fields_memory_in_bytes: i64,
    pub(super) term_vectors_memory_in_bytes: i64,
    pub(super) norms_memory_in_bytes: i64,
    pub(super) points_memory_in_bytes: i64,
    pub(super) doc_values_memory_in_bytes: i64,
    pub(super) index_writer_memory_in_bytes: i64,
    pub(super) version_map_memory_in_bytes: i64,
    pub(super) bitset_memory_in_bytes: i64,
    pub(super) max_unsafe_auto_id_timestamp: i64,
    pub(super) file_sizes: HashMap<String, i64>,
}

impl Default for SegmentsStats {
    fn default() -> Self {
        Self {
            count: 0,
            memory_in_bytes: 0,
            terms_memory_in_bytes: 0,
            stored_fields_memory_in_bytes: 0,
            term_vectors_memory_in_bytes: 0,
            norms_memory_in_bytes: 0,
            points_memory_in_bytes: 0,
            doc_values_memory_in_bytes: 0,
            index_writer_memory_in_bytes: 0,
            version_map_memory_in_bytes: 0,
            bitset_memory_in_bytes: 0,
            max_unsafe_auto_id_timestamp: i64::MIN,
            file_sizes: HashMap::new(),
        }
    }
}

impl SegmentsStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` segments using `memory_in_bytes` of memory in total.
    ///
    /// Counts above `i64::MAX` still encode, but readers of the signed
    /// varint stream format only accept counts up to `i64::MAX`.
    pub fn add(&mut self, count: u64, memory_in_bytes: i64) {
        self.count = self.count.wrapping_add(count);
        self.memory_in_bytes = self.memory_in_bytes.wrapping_add(memory_in_bytes);
    }

    /// Raises the unsafe auto-id watermark to `timestamp` if it is larger.
    /// Only the merge path and the engine collector move this watermark.
    pub(crate) fn update_max_unsafe_auto_id_timestamp(&mut self, timestamp: i64) {
        self.max_unsafe_auto_id_timestamp = self.max_unsafe_auto_id_timestamp.max(timestamp);
    }

    /// Sums `sizes` into the per-file sizes, key by key. Zero sizes still
    /// create their key.
    pub fn add_file_sizes<I, K>(&mut self, sizes: I)
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str> + Into<String>,
    {
        for (key, size) in sizes {
            match self.file_sizes.get_mut(key.as_ref()) {
                Some(total) => *total = total.wrapping_add(size),
                None => {
                    trace!(key = key.as_ref(), size, "new file size key");
                    self.file_sizes.insert(key.into(), size);
                }
            }
        }
    }

    /// Folds `other` into `self`. `None` leaves `self` untouched.
    pub fn merge(&mut self, other: Option<&SegmentsStats>) {
        let Some(other) = other else {
            return;
        };
        self.update_max_unsafe_auto_id_timestamp(other.max_unsafe_auto_id_timestamp);
        self.add(other.count, other.memory_in_bytes);
        self.add_terms_memory_in_bytes(other.terms_memory_in_bytes);
        self.add_stored_fields_memory_in_bytes(other.stored_fields_memory_in_bytes);
        self.add_term_vectors_memory_in_bytes(other.term_vectors_memory_in_bytes);
        self.add_norms_memory_in_bytes(other.norms_memory_in_bytes);
        self.add_points_memory_in_bytes(other.points_memory_in_bytes);
        self.add_doc_values_memory_in_bytes(other.doc_values_memory_in_bytes);
        self.add_index_writer_memory_in_bytes(other.index_writer_memory_in_bytes);
        self.add_version_map_memory_in_bytes(other.version_map_memory_in_bytes);
        self.add_bitset_memory_in_bytes(other.bitset_memory_in_bytes);
        self.add_file_sizes(other.file_sizes.iter().map(|(key, size)| (key.as_str(), *size)));
        debug!(
            merged = other.count,
            count = self.count,
            file_keys = self.file_sizes.len(),
            "merged segments stats"
        );
    }

    /// Drops the per-file sizes, keeping every other figure.
    pub fn clear_file_sizes(&mut self) {
        self.file_sizes.clear();
    }

    /// The number of segments.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Estimation of the memory used by the segments.
    pub fn memory_in_bytes(&self) -> i64 {
        self.memory_in_bytes
    }

    pub fn memory(&self) -> ByteSize {
        ByteSize(self.memory_in_bytes)
    }

    memory_metric!(
        /// Estimation of the terms dictionary memory.
        terms_memory_in_bytes,
        add_terms_memory_in_bytes,
        terms_memory
    );

    memory_metric!(
        /// Estimation of the stored fields memory.
        stored_fields_memory_in_bytes,
        add_stored_fields_memory_in_bytes,
        stored_fields_memory
    );

    memory_metric!(
        /// Estimation of the term vectors memory.
        term_vectors_memory_in_bytes,
        add_term_vectors_memory_in_bytes,
        term_vectors_memory
    );

    memory_metric!(
        /// Estimation of the norms memory.
        norms_memory_in_bytes,
        add_norms_memory_in_bytes,
        norms_memory
    );

    memory_metric!(
        /// Estimation of the points memory.
        points_memory_in_bytes,
        add_points_memory_in_bytes,
        points_memory
    );

    memory_metric!(
        /// Estimation of the doc values memory.
        doc_values_memory_in_bytes,
        add_doc_values_memory_in_bytes,
        doc_values_memory
    );

    memory_metric!(
        /// Estimation of the memory buffered by the index writer.
        index_writer_memory_in_bytes,
        add_index_writer_memory_in_bytes,
        index_writer_memory
    );

    memory_metric!(
        /// Estimation of the memory held by the version map.
        version_map_memory_in_bytes,
        add_version_map_memory_in_bytes,
        version_map_memory
    );

    memory_metric!(
        /// Estimation of the memory taken by cached bitsets (nested and
        /// parent/child filters rely on them).
        bitset_memory_in_bytes,
        add_bitset_memory_in_bytes,
        bitset_memory
    );

    /// Latest timestamp at which appending documents with auto-generated ids
    /// was unsafe. Writes at or before it must check for duplicates.
    /// `i64::MIN` when nothing was recorded.
    pub fn max_unsafe_auto_id_timestamp(&self) -> i64 {
        self.max_unsafe_auto_id_timestamp
    }

    pub fn file_sizes(&self) -> &HashMap<String, i64> {
        &self.file_sizes
    }
}
