//! Numeric values from `linux/perf_event.h` that this crate needs.

// perf_event_header.type
pub const PERF_RECORD_MMAP: u32 = 1;
pub const PERF_RECORD_LOST: u32 = 2;
pub const PERF_RECORD_COMM: u32 = 3;
pub const PERF_RECORD_EXIT: u32 = 4;
pub const PERF_RECORD_THROTTLE: u32 = 5;
pub const PERF_RECORD_UNTHROTTLE: u32 = 6;
pub const PERF_RECORD_FORK: u32 = 7;
pub const PERF_RECORD_READ: u32 = 8;
pub const PERF_RECORD_SAMPLE: u32 = 9;
pub const PERF_RECORD_MMAP2: u32 = 10;
pub const PERF_RECORD_AUX: u32 = 11;
pub const PERF_RECORD_ITRACE_START: u32 = 12;
pub const PERF_RECORD_LOST_SAMPLES: u32 = 13;
pub const PERF_RECORD_SWITCH: u32 = 14;
pub const PERF_RECORD_SWITCH_CPU_WIDE: u32 = 15;
pub const PERF_RECORD_NAMESPACES: u32 = 16;
pub const PERF_RECORD_KSYMBOL: u32 = 17;
pub const PERF_RECORD_BPF_EVENT: u32 = 18;
pub const PERF_RECORD_CGROUP: u32 = 19;
pub const PERF_RECORD_TEXT_POKE: u32 = 20;
pub const PERF_RECORD_AUX_OUTPUT_HW_ID: u32 = 21;

/// Record types at or above this value are synthesized by the tool which
/// wrote the file (perf / simpleperf), not by the kernel.
pub const PERF_RECORD_USER_TYPE_START: u32 = 64;

// perf_event_attr.sample_type
pub const PERF_SAMPLE_IP: u64 = 1 << 0;
pub const PERF_SAMPLE_TID: u64 = 1 << 1;
pub const PERF_SAMPLE_TIME: u64 = 1 << 2;
pub const PERF_SAMPLE_ADDR: u64 = 1 << 3;
pub const PERF_SAMPLE_READ: u64 = 1 << 4;
pub const PERF_SAMPLE_CALLCHAIN: u64 = 1 << 5;
pub const PERF_SAMPLE_ID: u64 = 1 << 6;
pub const PERF_SAMPLE_CPU: u64 = 1 << 7;
pub const PERF_SAMPLE_PERIOD: u64 = 1 << 8;
pub const PERF_SAMPLE_STREAM_ID: u64 = 1 << 9;
pub const PERF_SAMPLE_RAW: u64 = 1 << 10;
pub const PERF_SAMPLE_BRANCH_STACK: u64 = 1 << 11;
pub const PERF_SAMPLE_REGS_USER: u64 = 1 << 12;
pub const PERF_SAMPLE_STACK_USER: u64 = 1 << 13;
pub const PERF_SAMPLE_WEIGHT: u64 = 1 << 14;
pub const PERF_SAMPLE_DATA_SRC: u64 = 1 << 15;
pub const PERF_SAMPLE_IDENTIFIER: u64 = 1 << 16;
pub const PERF_SAMPLE_TRANSACTION: u64 = 1 << 17;
pub const PERF_SAMPLE_REGS_INTR: u64 = 1 << 18;
pub const PERF_SAMPLE_PHYS_ADDR: u64 = 1 << 19;
pub const PERF_SAMPLE_AUX: u64 = 1 << 20;
pub const PERF_SAMPLE_CGROUP: u64 = 1 << 21;
pub const PERF_SAMPLE_DATA_PAGE_SIZE: u64 = 1 << 22;
pub const PERF_SAMPLE_CODE_PAGE_SIZE: u64 = 1 << 23;
pub const PERF_SAMPLE_WEIGHT_STRUCT: u64 = 1 << 24;

// perf_event_attr.read_format
pub const PERF_FORMAT_TOTAL_TIME_ENABLED: u64 = 1 << 0;
pub const PERF_FORMAT_TOTAL_TIME_RUNNING: u64 = 1 << 1;
pub const PERF_FORMAT_ID: u64 = 1 << 2;
pub const PERF_FORMAT_GROUP: u64 = 1 << 3;
pub const PERF_FORMAT_LOST: u64 = 1 << 4;

// The bitfield that follows read_format in perf_event_attr.
pub const ATTR_FLAG_BIT_DISABLED: u64 = 1 << 0;
pub const ATTR_FLAG_BIT_INHERIT: u64 = 1 << 1;
pub const ATTR_FLAG_BIT_MMAP: u64 = 1 << 8;
pub const ATTR_FLAG_BIT_COMM: u64 = 1 << 9;
pub const ATTR_FLAG_BIT_FREQ: u64 = 1 << 10;
pub const ATTR_FLAG_BIT_TASK: u64 = 1 << 13;
pub const ATTR_FLAG_BIT_WATERMARK: u64 = 1 << 14;
pub const ATTR_FLAG_BIT_MMAP_DATA: u64 = 1 << 17;
pub const ATTR_FLAG_BIT_SAMPLE_ID_ALL: u64 = 1 << 18;
pub const ATTR_FLAG_BIT_MMAP2: u64 = 1 << 23;
pub const ATTR_FLAG_BIT_COMM_EXEC: u64 = 1 << 24;
pub const ATTR_FLAG_BIT_USE_CLOCKID: u64 = 1 << 25;
pub const ATTR_FLAG_BIT_CONTEXT_SWITCH: u64 = 1 << 26;

// Sizes of the successive perf_event_attr revisions.
pub const PERF_ATTR_SIZE_VER0: u32 = 64;
pub const PERF_ATTR_SIZE_VER1: u32 = 72;

/// simpleperf sets the sample period of events which only count alongside
/// another event's samples to a value at or above this.
pub const DEFAULT_TIMEBASE_THRESHOLD: u64 = 1 << 62;
