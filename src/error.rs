use crate::RecordType;

/// Why a [`SessionBuilder`](crate::SessionBuilder) refused to build a session.
///
/// These errors mean that records in the file cannot be attributed reliably,
/// so the import of the file should be aborted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("No perf_event_attr was added to the session")]
    EmptyInput,

    #[error("perf_event_attr #{attr_index} has a different sample_id_all value than the first attr")]
    InconsistentIdentifierReporting { attr_index: usize },

    #[error("perf_event_attr #{attr_index} has different id offsets than the first attr")]
    InconsistentIdentifierOffsets { attr_index: usize },

    #[error("Event id {0} maps to multiple perf_event_attrs")]
    DuplicateIdentifier(u64),

    #[error("Multiple perf_event_attrs, but records don't contain an id to tell them apart")]
    MissingIdentifierOffsets,
}

/// A single record could not be attributed to a perf_event_attr.
///
/// The rest of the file may still be fine; callers can skip the record.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{record_type:?} record with {payload_len} payload bytes is too short to contain an event id")]
    TruncatedRecord {
        record_type: RecordType,
        payload_len: usize,
    },

    #[error("No perf_event_attr for event id {0}")]
    UnresolvedIdentifier(u64),
}

/// The error type used by [`RecordReader`](crate::RecordReader).
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("The record at file offset {offset} declares size {size}, which is smaller than its header")]
    InvalidRecordSize { offset: u64, size: u16 },

    #[error("Could not resolve the record at file offset {offset}: {source}")]
    Resolve {
        offset: u64,
        #[source]
        source: ResolveError,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
