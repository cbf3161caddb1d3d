//! Binary form of [`SegmentsStats`] exchanged between nodes.
//!
//! Layout, in order:
//!
//! | field | encoding |
//! |---|---|
//! | count | varint |
//! | memory, terms, stored fields, term vectors, norms, points, doc values, index writer, version map, bitset | fixed i64 each |
//! | max unsafe auto-id timestamp | fixed i64 |
//! | file sizes | varint entry count, then (string key, fixed i64 size) pairs |
//!
//! The timestamp follows the bitset figure for historical reasons; the order
//! is a compatibility contract and must not change.

use std::collections::HashMap;
use std::io::{Error, ErrorKind, Read, Result, Write};

use async_stream::try_stream;
use futures_util::pin_mut;
use futures_util::stream::TryStreamExt;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_stream::Stream;
use tracing::{debug, instrument, warn};

use super::stats::SegmentsStats;
use crate::utils::fixedint::{
    async_read_fixed_i64, async_write_fixed_i64, read_fixed_i64, write_fixed_i64,
};
use crate::utils::string::{async_read_string, async_write_string, read_string, write_string};
use crate::utils::varint::len::len_varint;
use crate::utils::varint::read::{async_read_varint, read_varint};
use crate::utils::varint::write::{async_write_varint, write_varint};

/// Entry count prefix of the file sizes map.
fn entry_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("{len} file size entries exceed the wire limit"),
        )
    })
}

impl SegmentsStats {
    fn fixed_fields(&self) -> [i64; 11] {
        [
            self.memory_in_bytes,
            self.terms_memory_in_bytes,
            self.stored_fields_memory_in_bytes,
            self.term_vectors_memory_in_bytes,
            self.norms_memory_in_bytes,
            self.points_memory_in_bytes,
            self.doc_values_memory_in_bytes,
            self.index_writer_memory_in_bytes,
            self.version_map_memory_in_bytes,
            self.bitset_memory_in_bytes,
            self.max_unsafe_auto_id_timestamp,
        ]
    }

    fn from_fixed_fields(count: u64, fixed: [i64; 11], file_sizes: HashMap<String, i64>) -> Self {
        let [
            memory_in_bytes,
            terms_memory_in_bytes,
            stored_fields_memory_in_bytes,
            term_vectors_memory_in_bytes,
            norms_memory_in_bytes,
            points_memory_in_bytes,
            doc_values_memory_in_bytes,
            index_writer_memory_in_bytes,
            version_map_memory_in_bytes,
            bitset_memory_in_bytes,
            max_unsafe_auto_id_timestamp,
        ] = fixed;
        Self {
            count,
            memory_in_bytes,
            terms_memory_in_bytes,
            stored_fields_memory_in_bytes,
            term_vectors_memory_in_bytes,
            norms_memory_in_bytes,
            points_memory_in_bytes,
            doc_values_memory_in_bytes,
            index_writer_memory_in_bytes,
            version_map_memory_in_bytes,
            bitset_memory_in_bytes,
            max_unsafe_auto_id_timestamp,
            file_sizes,
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_varint(self.count, writer)?;
        for value in self.fixed_fields() {
            write_fixed_i64(value, writer)?;
        }
        write_varint(entry_count(self.file_sizes.len())?, writer)?;
        for (key, size) in &self.file_sizes {
            write_string(key, writer)?;
            write_fixed_i64(*size, writer)?;
        }
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let count = read_varint(reader)?;
        let mut fixed = [0i64; 11];
        for value in fixed.iter_mut() {
            *value = read_fixed_i64(reader)?;
        }
        let entries: u32 = read_varint(reader)?;
        let mut file_sizes = HashMap::new();
        for _ in 0..entries {
            let key = read_string(reader)?;
            let size = read_fixed_i64(reader)?;
            file_sizes.insert(key, size);
        }
        Ok(Self::from_fixed_fields(count, fixed, file_sizes))
    }

    /// Number of bytes `write_to` produces.
    pub fn encoded_len(&self) -> usize {
        let entries: usize = self
            .file_sizes
            .keys()
            .map(|key| len_varint(key.len()) + key.len() + 8)
            .sum();
        len_varint(self.count) + 11 * 8 + len_varint(self.file_sizes.len()) + entries
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut buffer).expect("writing to a Vec cannot fail");
        buffer
    }

    #[instrument(skip_all, fields(count = self.count, file_keys = self.file_sizes.len()))]
    pub async fn async_write_to<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> Result<()> {
        async_write_varint(self.count, writer).await?;
        for value in self.fixed_fields() {
            async_write_fixed_i64(value, writer).await?;
        }
        async_write_varint(entry_count(self.file_sizes.len())?, writer).await?;
        for (key, size) in &self.file_sizes {
            async_write_string(key, writer).await?;
            async_write_fixed_i64(*size, writer).await?;
        }
        writer.flush().await?;
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn async_read_from<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Self> {
        let count = async_read_varint(reader).await?;
        let mut fixed = [0i64; 11];
        for value in fixed.iter_mut() {
            *value = async_read_fixed_i64(reader).await?;
        }
        let entries: u32 = async_read_varint(reader).await?;
        let mut file_sizes = HashMap::new();
        for _ in 0..entries {
            let key = async_read_string(reader).await?;
            let size = async_read_fixed_i64(reader).await?;
            file_sizes.insert(key, size);
        }
        debug!(count, file_keys = file_sizes.len(), "read segments stats");
        Ok(Self::from_fixed_fields(count, fixed, file_sizes))
    }
}

/// Reads summaries written back to back until the reader is exhausted.
///
/// End of input exactly between two summaries ends the stream; end of input
/// inside a summary is yielded as an `UnexpectedEof` error.
pub fn iter_from<R: AsyncRead + Unpin>(
    mut reader: R,
) -> impl Stream<Item = Result<SegmentsStats>> {
    try_stream! {
        loop {
            let mut first = [0u8; 1];
            if reader.read(&mut first).await? == 0 {
                break;
            }
            let mut chained = AsyncReadExt::chain(first.as_slice(), &mut reader);
            let stats = SegmentsStats::async_read_from(&mut chained)
                .await
                .map_err(|err| {
                    if err.kind() == ErrorKind::UnexpectedEof {
                        warn!("input ended inside a segments stats summary");
                    }
                    err
                })?;
            yield stats;
        }
    }
}

/// Merges every summary of `stream` into one.
pub async fn merge_all<S>(stream: S) -> Result<SegmentsStats>
where
    S: Stream<Item = Result<SegmentsStats>>,
{
    pin_mut!(stream);
    let mut total = SegmentsStats::default();
    while let Some(stats) = stream.try_next().await? {
        total.merge(Some(&stats));
    }
    Ok(total)
}
