use crate::consts::*;
use crate::types::*;
use byteorder::{ByteOrder, ReadBytesExt};
use std::io;
use std::io::Read;

/// `perf_event_header`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfEventHeader {
    pub type_: u32,
    pub misc: u16,
    /// The size of the whole record, including this header.
    pub size: u16,
}

impl PerfEventHeader {
    pub const STRUCT_SIZE: usize = 4 + 2 + 2;

    pub fn parse<R: Read, T: ByteOrder>(mut reader: R) -> Result<Self, std::io::Error> {
        let type_ = reader.read_u32::<T>()?;
        let misc = reader.read_u16::<T>()?;
        let size = reader.read_u16::<T>()?;
        Ok(Self { type_, misc, size })
    }

    pub fn record_type(&self) -> RecordType {
        RecordType(self.type_)
    }

    /// The number of payload bytes following the header, or `None` if the
    /// declared size is smaller than the header itself.
    pub fn payload_len(&self) -> Option<usize> {
        usize::from(self.size).checked_sub(Self::STRUCT_SIZE)
    }
}

/// `perf_event_attr`, reduced to the fields which determine how records
/// in a recorded file are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfEventAttr {
    /// Major type: hardware/software/tracepoint/etc.
    pub type_: u32,

    /// Type-specific configuration.
    pub config: u64,

    /// The union of `sample_period` and `sample_freq`. Which one it is
    /// depends on [`AttrFlags::FREQ`].
    pub sample_period_or_freq: u64,

    /// Specifies values included in sample. (original name `sample_type`)
    pub sample_format: SampleFormat,

    /// Specifies the structure values returned by read() on a perf event fd,
    /// see [`ReadFormat`].
    pub read_format: ReadFormat,

    /// Bitset of flags.
    pub flags: AttrFlags,

    /// `config1`, or `bp_addr` / `kprobe_func` / `uprobe_path`.
    pub config1: u64,

    /// `config2`, or `bp_len` / `kprobe_addr` / `probe_offset`.
    /// Zero in attrs older than `PERF_ATTR_SIZE_VER1`.
    pub config2: u64,
}

impl Default for PerfEventAttr {
    fn default() -> Self {
        Self {
            type_: 0,
            config: 0,
            sample_period_or_freq: 0,
            sample_format: SampleFormat::empty(),
            read_format: ReadFormat::empty(),
            flags: AttrFlags::empty(),
            config1: 0,
            config2: 0,
        }
    }
}

impl PerfEventAttr {
    /// Parses a `perf_event_attr`. If `size` is `None`, the size stored in
    /// the struct itself is used. Exactly `size` bytes are consumed, so that
    /// attrs written by newer kernels can be skipped over.
    pub fn parse<R: Read, T: ByteOrder>(
        mut reader: R,
        size: Option<u32>,
    ) -> Result<Self, std::io::Error> {
        let type_ = reader.read_u32::<T>()?;
        let self_described_size = reader.read_u32::<T>()?;
        let config = reader.read_u64::<T>()?;

        let size = size.unwrap_or(self_described_size);
        if size < PERF_ATTR_SIZE_VER0 {
            return Err(io::ErrorKind::InvalidInput.into());
        }

        let sample_period_or_freq = reader.read_u64::<T>()?;
        let sample_type = reader.read_u64::<T>()?;
        let read_format = reader.read_u64::<T>()?;
        let flags = reader.read_u64::<T>()?;
        let _wakeup_events_or_watermark = reader.read_u32::<T>()?;
        let _bp_type = reader.read_u32::<T>()?;
        let config1 = reader.read_u64::<T>()?;

        let (config2, consumed) = if size >= PERF_ATTR_SIZE_VER1 {
            (reader.read_u64::<T>()?, PERF_ATTR_SIZE_VER1)
        } else {
            (0, PERF_ATTR_SIZE_VER0)
        };

        // Skip the fields we don't care about, and anything a newer kernel appended.
        let remaining = u64::from(size - consumed);
        let skipped = io::copy(&mut reader.by_ref().take(remaining), &mut io::sink())?;
        if skipped != remaining {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }

        Ok(Self {
            type_,
            config,
            sample_period_or_freq,
            sample_format: SampleFormat::from_bits_truncate(sample_type),
            read_format: ReadFormat::from_bits_truncate(read_format),
            flags: AttrFlags::from_bits_truncate(flags),
            config1,
            config2,
        })
    }
}
