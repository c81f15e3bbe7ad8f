use byteorder::{BigEndian, LittleEndian};
use std::sync::Arc;

use crate::{
    AttributeDescriptor, ChunkedByteWindow, Endianness, FileSlice, PerfEventHeader, ReadError,
    RecordType, Session,
};

/// A record from the data section, together with the attr that describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub header: PerfEventHeader,
    /// The file offset of the record header.
    pub file_offset: u64,
    /// The record bytes after the header.
    pub payload: FileSlice<'a>,
    /// `None` for user records, and for non-SAMPLE records if the file was
    /// recorded without `sample_id_all` and has more than one attr.
    pub attr: Option<Arc<AttributeDescriptor>>,
    pub endian: Endianness,
}

impl<'a> RawRecord<'a> {
    pub fn record_type(&self) -> RecordType {
        self.header.record_type()
    }

    /// The record's timestamp, if its attr asks for one to be recorded.
    pub fn timestamp(&self) -> Option<u64> {
        self.attr
            .as_ref()?
            .record_timestamp(self.record_type(), &self.payload, self.endian)
    }
}

/// Splits the data section of a perf.data file into records.
///
/// The file contents are supplied in chunks of any size with
/// [`push_chunk`](Self::push_chunk). [`next_record`](Self::next_record)
/// returns `Ok(None)` until the next record is fully buffered. Bytes of a
/// record are released when the following record is requested.
#[derive(Debug)]
pub struct RecordReader {
    window: ChunkedByteWindow,
    session: Arc<Session>,
    next_record_offset: u64,
}

impl RecordReader {
    /// Create a reader for records starting at file offset 0.
    pub fn new(session: Arc<Session>) -> Self {
        Self::with_file_offset(session, 0)
    }

    /// Create a reader whose first chunk starts at `file_offset`, usually
    /// the start of the data section.
    pub fn with_file_offset(session: Arc<Session>, file_offset: u64) -> Self {
        Self {
            window: ChunkedByteWindow::with_file_offset(file_offset),
            session,
            next_record_offset: file_offset,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The file offset of the next record.
    pub fn file_offset(&self) -> u64 {
        self.next_record_offset
    }

    /// The number of buffered bytes, including those of the last returned record.
    pub fn buffered_len(&self) -> usize {
        self.window.len()
    }

    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        self.window.push_back(chunk);
    }

    /// Returns the next record, or `Ok(None)` if more data is needed.
    ///
    /// If the record's attr cannot be determined, [`ReadError::Resolve`] is
    /// returned and the reader moves on, so the next call returns the
    /// following record. [`ReadError::InvalidRecordSize`] is returned again
    /// on every call, because the start of the next record is unknown.
    pub fn next_record(&mut self) -> Result<Option<RawRecord<'_>>, ReadError> {
        let offset = self.next_record_offset;
        // Only fails if nothing has been consumed since the last eviction.
        self.window.pop_front_bytes_until(offset);

        let endian = self.session.endian();
        let header = match self.window.slice_off(offset, PerfEventHeader::STRUCT_SIZE) {
            Some(bytes) => match endian {
                Endianness::LittleEndian => PerfEventHeader::parse::<_, LittleEndian>(&bytes[..])?,
                Endianness::BigEndian => PerfEventHeader::parse::<_, BigEndian>(&bytes[..])?,
            },
            None => return Ok(None),
        };
        let payload_len = header.payload_len().ok_or(ReadError::InvalidRecordSize {
            offset,
            size: header.size,
        })?;

        let payload_offset = offset + PerfEventHeader::STRUCT_SIZE as u64;
        let payload = match self.window.slice_off(payload_offset, payload_len) {
            Some(payload) => payload,
            None => return Ok(None),
        };
        self.next_record_offset = payload_offset + payload_len as u64;

        let attr = self
            .session
            .find_attr_for_record(&header, &payload)
            .map_err(|source| {
                log::debug!("Skipping record at file offset {offset}: {source}");
                ReadError::Resolve { offset, source }
            })?;

        Ok(Some(RawRecord {
            header,
            file_offset: offset,
            payload,
            attr,
            endian,
        }))
    }
}
