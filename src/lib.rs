//! # linux-perf-stream-reader
//!
//! This crate is the input layer for importing Linux `perf.data` files
//! incrementally, without having the whole file in memory.
//!
//! It answers two questions for a record parser:
//!
//!  - "What bytes are at file offset X?" [`ChunkedByteWindow`] buffers the
//!    file as a sequence of chunks and hands out byte ranges, without copying
//!    unless a range straddles two chunks.
//!  - "Which `perf_event_attr` describes this record?" A [`Session`] knows
//!    all attrs of the file and the event ids assigned to them, and finds the
//!    attr of a record by reading the event id out of the record.
//!
//! [`RecordReader`] combines the two.
//!
//! ## Example
//!
//! ```rust
//! use linux_perf_stream_reader::{
//!     AttrFlags, PerfEventAttr, RecordReader, RecordType, SampleFormat, SessionBuilder,
//! };
//!
//! # fn it_works() -> Result<(), Box<dyn std::error::Error>> {
//! // Two events, both recorded with PERF_SAMPLE_IDENTIFIER.
//! let attr = |config| PerfEventAttr {
//!     config,
//!     sample_format: SampleFormat::IDENTIFIER | SampleFormat::TIME,
//!     flags: AttrFlags::SAMPLE_ID_ALL,
//!     ..Default::default()
//! };
//! let session = SessionBuilder::new(0)
//!     .add_attr_and_ids(attr(0), vec![10])
//!     .add_attr_and_ids(attr(1), vec![20])
//!     .build()?;
//!
//! // A SAMPLE record: header, then identifier and time.
//! let mut data = vec![9, 0, 0, 0, 0, 0, 24, 0];
//! data.extend_from_slice(&20u64.to_le_bytes());
//! data.extend_from_slice(&123456u64.to_le_bytes());
//!
//! let mut reader = RecordReader::new(session);
//! reader.push_chunk(data[..10].to_vec());
//! assert!(reader.next_record()?.is_none());
//! reader.push_chunk(data[10..].to_vec());
//!
//! let record = reader.next_record()?.unwrap();
//! assert_eq!(record.record_type(), RecordType::SAMPLE);
//! assert_eq!(record.attr.as_ref().unwrap().attr().config, 1);
//! assert_eq!(record.timestamp(), Some(123456));
//! # Ok(())
//! # }
//! # it_works().unwrap();
//! ```
mod attr;
pub mod consts;
mod endian;
mod error;
mod parse_info;
mod perf_event;
mod record_reader;
mod session;
mod types;
mod window;

pub use attr::*;
pub use endian::*;
pub use error::*;
pub use parse_info::*;
pub use perf_event::*;
pub use record_reader::*;
pub use session::*;
pub use types::*;
pub use window::*;

#[cfg(test)]
mod test {
    use crate::{
        AttrFlags, ChunkedByteWindow, PerfEventAttr, PerfEventHeader, RecordType, SampleFormat,
        SessionBuilder,
    };

    #[test]
    fn it_works() {
        // Records in one chunk, sliced and resolved by hand, the way a
        // tokenizer which does its own framing would use this crate.
        let attr = |config| PerfEventAttr {
            config,
            sample_format: SampleFormat::IP | SampleFormat::ID,
            flags: AttrFlags::SAMPLE_ID_ALL,
            ..Default::default()
        };
        let session = SessionBuilder::new(0)
            .add_attr_and_ids(attr(100), vec![10])
            .add_attr_and_ids(attr(200), vec![20])
            .build()
            .unwrap();

        let mut window = ChunkedByteWindow::new();
        let mut comm = vec![3, 0, 0, 0, 0, 0, 24, 0];
        comm.extend_from_slice(b"comm\0\0\0\0");
        comm.extend_from_slice(&20u64.to_le_bytes());
        window.push_back(comm);

        let header_bytes = window.slice_off(0, PerfEventHeader::STRUCT_SIZE).unwrap();
        let header =
            PerfEventHeader::parse::<_, byteorder::LittleEndian>(&header_bytes[..]).unwrap();
        assert_eq!(header.record_type(), RecordType::COMM);
        let payload = window.slice_off(8, header.payload_len().unwrap()).unwrap();
        let attr = session.find_attr_for_record(&header, &payload).unwrap().unwrap();
        assert_eq!(attr.attr().config, 200);

        assert!(window.pop_front_bytes_until(u64::from(header.size)));
        assert!(window.is_empty());
    }
}
