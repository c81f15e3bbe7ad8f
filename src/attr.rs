use crate::consts::DEFAULT_TIMEBASE_THRESHOLD;
use crate::{
    AttrFlags, Endianness, PerfEventAttr, ReadFormat, RecordFieldOffsets, RecordType, SampleFormat,
};

/// A `perf_event_attr` together with the record offsets derived from it.
///
/// Descriptors are created once per attr found in the file and are then
/// shared, read-only, by every record that gets resolved to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    attr: PerfEventAttr,
    offsets: RecordFieldOffsets,
    timebase_threshold: u64,
}

impl AttributeDescriptor {
    pub fn new(attr: PerfEventAttr) -> Self {
        Self::with_timebase_threshold(attr, DEFAULT_TIMEBASE_THRESHOLD)
    }

    /// Like [`AttributeDescriptor::new`], but with a custom cut-off for
    /// [`is_timebase`](Self::is_timebase).
    pub fn with_timebase_threshold(attr: PerfEventAttr, timebase_threshold: u64) -> Self {
        Self {
            offsets: RecordFieldOffsets::new(&attr),
            attr,
            timebase_threshold,
        }
    }

    pub fn attr(&self) -> &PerfEventAttr {
        &self.attr
    }

    pub fn sample_format(&self) -> SampleFormat {
        self.attr.sample_format
    }

    pub fn read_format(&self) -> ReadFormat {
        self.attr.read_format
    }

    pub fn flags(&self) -> AttrFlags {
        self.attr.flags
    }

    /// Whether non-SAMPLE records carry a trailing `sample_id` block.
    pub fn sample_id_all(&self) -> bool {
        self.attr.flags.contains(AttrFlags::SAMPLE_ID_ALL)
    }

    /// The sampling period, unless the attr samples at a frequency.
    pub fn sample_period(&self) -> Option<u64> {
        if self.attr.flags.contains(AttrFlags::FREQ) {
            None
        } else {
            Some(self.attr.sample_period_or_freq)
        }
    }

    /// The sampling frequency in Hz, if the attr samples at a frequency.
    pub fn sample_frequency(&self) -> Option<u64> {
        if self.attr.flags.contains(AttrFlags::FREQ) {
            Some(self.attr.sample_period_or_freq)
        } else {
            None
        }
    }

    /// Whether this event drives sampling itself. simpleperf gives events
    /// which are only read as part of another event's samples a huge period.
    pub fn is_timebase(&self) -> bool {
        self.attr.sample_period_or_freq < self.timebase_threshold
    }

    /// Offset of the time field from the start of a SAMPLE payload.
    pub fn time_offset_from_start(&self) -> Option<usize> {
        self.offsets.sample_record_time_offset_from_start
    }

    /// Offset of the time field from the end of a non-SAMPLE payload.
    pub fn time_offset_from_end(&self) -> Option<usize> {
        self.offsets.nonsample_record_time_offset_from_end
    }

    /// Offset of the id field from the start of a SAMPLE payload.
    pub fn id_offset_from_start(&self) -> Option<usize> {
        self.offsets.sample_record_id_offset_from_start
    }

    /// Offset of the id field from the end of a non-SAMPLE payload. Only
    /// present if [`sample_id_all`](Self::sample_id_all) is set.
    pub fn id_offset_from_end(&self) -> Option<usize> {
        self.offsets.nonsample_record_id_offset_from_end
    }

    /// Get the timestamp of a record described by this attr.
    ///
    /// This can be used for record sorting without parsing the record.
    pub fn record_timestamp(
        &self,
        record_type: RecordType,
        payload: &[u8],
        endian: Endianness,
    ) -> Option<u64> {
        if record_type.is_user_type() {
            return None;
        }

        let offset = if record_type == RecordType::SAMPLE {
            self.time_offset_from_start()?
        } else {
            payload.len().checked_sub(self.time_offset_from_end()?)?
        };
        endian.read_u64_at(payload, offset)
    }
}
