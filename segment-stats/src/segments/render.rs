//! Structured rendering of [`SegmentsStats`].
//!
//! The document is one `segments` object; its field names are consumed by
//! monitoring tools and must stay stable.

use std::collections::BTreeMap;

use super::extension::{DescriptionLookup, OTHERS};
use super::stats::SegmentsStats;
use crate::utils::byte_size::ByteSize;

/// Sink for a nested document of named fields.
pub trait Emitter {
    type Error;

    fn begin_object(&mut self, name: &str) -> Result<(), Self::Error>;

    fn field_u64(&mut self, name: &str, value: u64) -> Result<(), Self::Error>;

    fn field_i64(&mut self, name: &str, value: i64) -> Result<(), Self::Error>;

    fn field_str(&mut self, name: &str, value: &str) -> Result<(), Self::Error>;

    /// A byte count under `raw_name`, with its human form under `human_name`
    /// when the emitter renders human-readable output.
    fn human_readable_field(
        &mut self,
        raw_name: &str,
        human_name: &str,
        value: ByteSize,
    ) -> Result<(), Self::Error>;

    fn end_object(&mut self) -> Result<(), Self::Error>;
}

pub mod fields {
    pub const SEGMENTS: &str = "segments";
    pub const COUNT: &str = "count";
    pub const MEMORY: &str = "memory";
    pub const MEMORY_IN_BYTES: &str = "memory_in_bytes";
    pub const TERMS_MEMORY: &str = "terms_memory";
    pub const TERMS_MEMORY_IN_BYTES: &str = "terms_memory_in_bytes";
    pub const STORED_FIELDS_MEMORY: &str = "stored_fields_memory";
    pub const STORED_FIELDS_MEMORY_IN_BYTES: &str = "stored_fields_memory_in_bytes";
    pub const TERM_VECTORS_MEMORY: &str = "term_vectors_memory";
    pub const TERM_VECTORS_MEMORY_IN_BYTES: &str = "term_vectors_memory_in_bytes";
    pub const NORMS_MEMORY: &str = "norms_memory";
    pub const NORMS_MEMORY_IN_BYTES: &str = "norms_memory_in_bytes";
    pub const POINTS_MEMORY: &str = "points_memory";
    pub const POINTS_MEMORY_IN_BYTES: &str = "points_memory_in_bytes";
    pub const DOC_VALUES_MEMORY: &str = "doc_values_memory";
    pub const DOC_VALUES_MEMORY_IN_BYTES: &str = "doc_values_memory_in_bytes";
    pub const INDEX_WRITER_MEMORY: &str = "index_writer_memory";
    pub const INDEX_WRITER_MEMORY_IN_BYTES: &str = "index_writer_memory_in_bytes";
    pub const VERSION_MAP_MEMORY: &str = "version_map_memory";
    pub const VERSION_MAP_MEMORY_IN_BYTES: &str = "version_map_memory_in_bytes";
    pub const FIXED_BIT_SET: &str = "fixed_bit_set";
    pub const FIXED_BIT_SET_MEMORY_IN_BYTES: &str = "fixed_bit_set_memory_in_bytes";
    pub const MAX_UNSAFE_AUTO_ID_TIMESTAMP: &str = "max_unsafe_auto_id_timestamp";
    pub const FILE_SIZES: &str = "file_sizes";
    pub const SIZE: &str = "size";
    pub const SIZE_IN_BYTES: &str = "size_in_bytes";
    pub const DESCRIPTION: &str = "description";
}

impl SegmentsStats {
    /// Emits the `segments` object. File sizes are emitted in key order, so
    /// equal summaries always render identically.
    pub fn render<E, L>(&self, emitter: &mut E, lookup: &L) -> Result<(), E::Error>
    where
        E: Emitter,
        L: DescriptionLookup + ?Sized,
    {
        use fields::*;

        emitter.begin_object(SEGMENTS)?;
        emitter.field_u64(COUNT, self.count())?;
        let memory = [
            (MEMORY_IN_BYTES, MEMORY, self.memory()),
            (TERMS_MEMORY_IN_BYTES, TERMS_MEMORY, self.terms_memory()),
            (
                STORED_FIELDS_MEMORY_IN_BYTES,
                STORED_FIELDS_MEMORY,
                self.stored_fields_memory(),
            ),
            (
                TERM_VECTORS_MEMORY_IN_BYTES,
                TERM_VECTORS_MEMORY,
                self.term_vectors_memory(),
            ),
            (NORMS_MEMORY_IN_BYTES, NORMS_MEMORY, self.norms_memory()),
            (POINTS_MEMORY_IN_BYTES, POINTS_MEMORY, self.points_memory()),
            (
                DOC_VALUES_MEMORY_IN_BYTES,
                DOC_VALUES_MEMORY,
                self.doc_values_memory(),
            ),
            (
                INDEX_WRITER_MEMORY_IN_BYTES,
                INDEX_WRITER_MEMORY,
                self.index_writer_memory(),
            ),
            (
                VERSION_MAP_MEMORY_IN_BYTES,
                VERSION_MAP_MEMORY,
                self.version_map_memory(),
            ),
            (FIXED_BIT_SET_MEMORY_IN_BYTES, FIXED_BIT_SET, self.bitset_memory()),
        ];
        for (raw_name, human_name, value) in memory {
            emitter.human_readable_field(raw_name, human_name, value)?;
        }
        emitter.field_i64(MAX_UNSAFE_AUTO_ID_TIMESTAMP, self.max_unsafe_auto_id_timestamp())?;

        emitter.begin_object(FILE_SIZES)?;
        let sorted: BTreeMap<&str, i64> = self
            .file_sizes()
            .iter()
            .map(|(key, size)| (key.as_str(), *size))
            .collect();
        for (key, size) in sorted {
            emitter.begin_object(key)?;
            emitter.human_readable_field(SIZE_IN_BYTES, SIZE, ByteSize(size))?;
            emitter.field_str(DESCRIPTION, lookup.lookup(key).unwrap_or(OTHERS))?;
            emitter.end_object()?;
        }
        emitter.end_object()?;

        emitter.end_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::extension::LuceneFileExtensions;
    use crate::segments::stats::tests::sample_stats;
    use std::convert::Infallible;

    /// Records every call as a line of text.
    #[derive(Default)]
    struct Transcript(Vec<String>);

    impl Emitter for Transcript {
        type Error = Infallible;

        fn begin_object(&mut self, name: &str) -> Result<(), Infallible> {
            self.0.push(format!("begin {name}"));
            Ok(())
        }

        fn field_u64(&mut self, name: &str, value: u64) -> Result<(), Infallible> {
            self.0.push(format!("{name}={value}"));
            Ok(())
        }

        fn field_i64(&mut self, name: &str, value: i64) -> Result<(), Infallible> {
            self.0.push(format!("{name}={value}"));
            Ok(())
        }

        fn field_str(&mut self, name: &str, value: &str) -> Result<(), Infallible> {
            self.0.push(format!("{name}={value:?}"));
            Ok(())
        }

        fn human_readable_field(
            &mut self,
            raw_name: &str,
            human_name: &str,
            value: ByteSize,
        ) -> Result<(), Infallible> {
            self.0.push(format!("{raw_name}={} {human_name}={value}", value.bytes()));
            Ok(())
        }

        fn end_object(&mut self) -> Result<(), Infallible> {
            self.0.push("end".to_string());
            Ok(())
        }
    }

    fn transcript(stats: &SegmentsStats) -> Vec<String> {
        let mut emitter = Transcript::default();
        stats.render(&mut emitter, &LuceneFileExtensions).unwrap();
        emitter.0
    }

    #[test]
    fn document_shape() {
        let mut stats = SegmentsStats::new();
        stats.add(2, 2200);
        stats.add_bitset_memory_in_bytes(1024);
        stats.update_max_unsafe_auto_id_timestamp(42);
        stats.add_file_sizes([("si", 5), ("cfs", 50), ("segments_5", 3)]);

        let expected = vec![
            "begin segments",
            "count=2",
            "memory_in_bytes=2200 memory=2.1kb",
            "terms_memory_in_bytes=0 terms_memory=0b",
            "stored_fields_memory_in_bytes=0 stored_fields_memory=0b",
            "term_vectors_memory_in_bytes=0 term_vectors_memory=0b",
            "norms_memory_in_bytes=0 norms_memory=0b",
            "points_memory_in_bytes=0 points_memory=0b",
            "doc_values_memory_in_bytes=0 doc_values_memory=0b",
            "index_writer_memory_in_bytes=0 index_writer_memory=0b",
            "version_map_memory_in_bytes=0 version_map_memory=0b",
            "fixed_bit_set_memory_in_bytes=1024 fixed_bit_set=1kb",
            "max_unsafe_auto_id_timestamp=42",
            "begin file_sizes",
            "begin cfs",
            "size_in_bytes=50 size=50b",
            "description=\"Compound Files\"",
            "end",
            "begin segments_5",
            "size_in_bytes=3 size=3b",
            "description=\"Others\"",
            "end",
            "begin si",
            "size_in_bytes=5 size=5b",
            "description=\"Segment Info\"",
            "end",
            "end",
            "end",
        ];
        assert_eq!(transcript(&stats), expected);
    }

    #[test]
    fn empty_stats_render_sentinel_timestamp() {
        let lines = transcript(&SegmentsStats::default());
        assert!(lines.contains(&format!("max_unsafe_auto_id_timestamp={}", i64::MIN)));
        let file_sizes = lines.iter().position(|l| l == "begin file_sizes").unwrap();
        assert_eq!(&lines[file_sizes + 1..], &["end", "end"]);
    }

    #[test]
    fn custom_lookup() {
        let mut stats = SegmentsStats::new();
        stats.add_file_sizes([("cfs", 1)]);
        let lookup = |ext: &str| if ext == "cfs" { Some("Packed") } else { None };
        let mut emitter = Transcript::default();
        stats.render(&mut emitter, &lookup).unwrap();
        assert!(emitter.0.contains(&"description=\"Packed\"".to_string()));
    }

    #[test]
    fn rendering_is_deterministic() {
        let stats = sample_stats();
        assert_eq!(transcript(&stats), transcript(&stats));
        assert_eq!(transcript(&stats), transcript(&stats.clone()));
    }

    #[test]
    fn rendering_does_not_mutate() {
        let stats = sample_stats();
        transcript(&stats);
        assert_eq!(stats, sample_stats());
    }
}
