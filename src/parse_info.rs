use crate::{AttrFlags, PerfEventAttr, SampleFormat};

/// Where the time and id fields sit inside record payloads described by
/// one attr. All offsets are in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RecordFieldOffsets {
    pub sample_record_time_offset_from_start: Option<usize>, // 0..=24
    pub nonsample_record_time_offset_from_end: Option<usize>, // 8..=40
    pub sample_record_id_offset_from_start: Option<usize>,   // 0..=32
    pub nonsample_record_id_offset_from_end: Option<usize>,  // 8..=24
}

/// Size of the fields in `format`, which are all either a u64 or a pair of u32.
fn u64_slots(format: SampleFormat) -> usize {
    format.bits().count_ones() as usize * 8
}

impl RecordFieldOffsets {
    pub fn new(attr: &PerfEventAttr) -> Self {
        let sample_format = attr.sample_format;
        let sample_id_all = attr.flags.contains(AttrFlags::SAMPLE_ID_ALL);

        // Start of a SAMPLE record:
        //
        // { u64 id;           } && PERF_SAMPLE_IDENTIFIER
        // { u64 ip;           } && PERF_SAMPLE_IP
        // { u32 pid; u32 tid; } && PERF_SAMPLE_TID
        // { u64 time;         } && PERF_SAMPLE_TIME
        // { u64 addr;         } && PERF_SAMPLE_ADDR
        // { u64 id;           } && PERF_SAMPLE_ID
        let sample_record_time_offset_from_start = if sample_format.contains(SampleFormat::TIME) {
            Some(u64_slots(sample_format.intersection(
                SampleFormat::IDENTIFIER | SampleFormat::IP | SampleFormat::TID,
            )))
        } else {
            None
        };

        let sample_record_id_offset_from_start = if sample_format.contains(SampleFormat::IDENTIFIER)
        {
            Some(0)
        } else if sample_format.contains(SampleFormat::ID) {
            Some(u64_slots(sample_format.intersection(
                SampleFormat::IP | SampleFormat::TID | SampleFormat::TIME | SampleFormat::ADDR,
            )))
        } else {
            None
        };

        // With sample_id_all, every non-SAMPLE record ends with:
        //
        // struct sample_id {
        //     { u32 pid, tid; }   /* if PERF_SAMPLE_TID set */
        //     { u64 time;     }   /* if PERF_SAMPLE_TIME set */
        //     { u64 id;       }   /* if PERF_SAMPLE_ID set */
        //     { u64 stream_id;}   /* if PERF_SAMPLE_STREAM_ID set  */
        //     { u32 cpu, res; }   /* if PERF_SAMPLE_CPU set */
        //     { u64 id;       }   /* if PERF_SAMPLE_IDENTIFIER set */
        // };
        let nonsample_record_time_offset_from_end =
            if sample_id_all && sample_format.contains(SampleFormat::TIME) {
                Some(u64_slots(sample_format.intersection(
                    SampleFormat::TIME
                        | SampleFormat::ID
                        | SampleFormat::STREAM_ID
                        | SampleFormat::CPU
                        | SampleFormat::IDENTIFIER,
                )))
            } else {
                None
            };

        let nonsample_record_id_offset_from_end = if !sample_id_all {
            None
        } else if sample_format.contains(SampleFormat::IDENTIFIER) {
            Some(8)
        } else if sample_format.contains(SampleFormat::ID) {
            Some(u64_slots(sample_format.intersection(
                SampleFormat::ID | SampleFormat::STREAM_ID | SampleFormat::CPU,
            )))
        } else {
            None
        };

        Self {
            sample_record_time_offset_from_start,
            nonsample_record_time_offset_from_end,
            sample_record_id_offset_from_start,
            nonsample_record_id_offset_from_end,
        }
    }
}

#[cfg(test)]
mod test {
    use super::RecordFieldOffsets;
    use crate::{AttrFlags, PerfEventAttr, SampleFormat};

    fn offsets(sample_format: SampleFormat, flags: AttrFlags) -> RecordFieldOffsets {
        RecordFieldOffsets::new(&PerfEventAttr {
            sample_format,
            flags,
            ..Default::default()
        })
    }

    #[test]
    fn identifier_is_first_and_last() {
        let o = offsets(
            SampleFormat::IDENTIFIER
                | SampleFormat::IP
                | SampleFormat::TID
                | SampleFormat::TIME
                | SampleFormat::CPU,
            AttrFlags::SAMPLE_ID_ALL,
        );
        assert_eq!(o.sample_record_id_offset_from_start, Some(0));
        assert_eq!(o.nonsample_record_id_offset_from_end, Some(8));
        assert_eq!(o.sample_record_time_offset_from_start, Some(24));
        // time, cpu, identifier
        assert_eq!(o.nonsample_record_time_offset_from_end, Some(24));
    }

    #[test]
    fn id_without_identifier() {
        let o = offsets(
            SampleFormat::IP
                | SampleFormat::TID
                | SampleFormat::TIME
                | SampleFormat::ID
                | SampleFormat::CPU
                | SampleFormat::PERIOD,
            AttrFlags::SAMPLE_ID_ALL,
        );
        assert_eq!(o.sample_record_id_offset_from_start, Some(24));
        // id, cpu
        assert_eq!(o.nonsample_record_id_offset_from_end, Some(16));
        assert_eq!(o.nonsample_record_time_offset_from_end, Some(24));
    }

    #[test]
    fn no_sample_id_all() {
        let o = offsets(SampleFormat::IDENTIFIER | SampleFormat::TIME, AttrFlags::empty());
        assert_eq!(o.sample_record_id_offset_from_start, Some(0));
        assert_eq!(o.sample_record_time_offset_from_start, Some(8));
        assert_eq!(o.nonsample_record_id_offset_from_end, None);
        assert_eq!(o.nonsample_record_time_offset_from_end, None);
    }

    #[test]
    fn nothing_enabled() {
        assert_eq!(
            offsets(SampleFormat::IP, AttrFlags::SAMPLE_ID_ALL),
            RecordFieldOffsets::default()
        );
    }
}
