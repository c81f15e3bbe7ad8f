use std::collections::HashMap;
use std::sync::Arc;

use crate::consts::DEFAULT_TIMEBASE_THRESHOLD;
use crate::{
    AttributeDescriptor, BuildError, Endianness, PerfEventAttr, PerfEventHeader, RecordType,
    ResolveError,
};

/// Collects the perf_event_attrs of a file, together with the event ids
/// which were assigned to each of them, and turns them into a [`Session`].
///
/// Attrs are kept in the order they were added; the first one is used as
/// the reference that all others are checked against.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    session_id: u32,
    endian: Endianness,
    timebase_threshold: u64,
    attrs_with_ids: Vec<(PerfEventAttr, Vec<u64>)>,
}

impl SessionBuilder {
    pub fn new(session_id: u32) -> Self {
        Self {
            session_id,
            endian: Endianness::default(),
            timebase_threshold: DEFAULT_TIMEBASE_THRESHOLD,
            attrs_with_ids: Vec::new(),
        }
    }

    /// The byte order in which event ids are stored in records.
    pub fn endian(&mut self, endian: Endianness) -> &mut Self {
        self.endian = endian;
        self
    }

    /// See [`AttributeDescriptor::is_timebase`].
    pub fn timebase_threshold(&mut self, timebase_threshold: u64) -> &mut Self {
        self.timebase_threshold = timebase_threshold;
        self
    }

    pub fn add_attr_and_ids(&mut self, attr: PerfEventAttr, ids: Vec<u64>) -> &mut Self {
        self.attrs_with_ids.push((attr, ids));
        self
    }

    pub fn build(&self) -> Result<Arc<Session>, BuildError> {
        let session = self.build_impl().map_err(|err| {
            log::debug!("Rejecting perf session {}: {}", self.session_id, err);
            err
        })?;
        log::debug!(
            "Built perf session {} with {} attrs and {} event ids",
            session.session_id,
            session.attrs.len(),
            session.attrs_by_id.len()
        );
        Ok(Arc::new(session))
    }

    fn build_impl(&self) -> Result<Session, BuildError> {
        let (first_attr, _) = self.attrs_with_ids.first().ok_or(BuildError::EmptyInput)?;
        let base = AttributeDescriptor::with_timebase_threshold(*first_attr, self.timebase_threshold);

        let mut attrs = Vec::with_capacity(self.attrs_with_ids.len());
        let mut attrs_by_id = HashMap::new();
        for (attr_index, (attr, ids)) in self.attrs_with_ids.iter().enumerate() {
            let desc = Arc::new(AttributeDescriptor::with_timebase_threshold(
                *attr,
                self.timebase_threshold,
            ));
            if desc.sample_id_all() != base.sample_id_all() {
                return Err(BuildError::InconsistentIdentifierReporting { attr_index });
            }
            if !id_offsets_match(&base, &desc) {
                return Err(BuildError::InconsistentIdentifierOffsets { attr_index });
            }
            for &id in ids {
                if attrs_by_id.insert(id, Arc::clone(&desc)).is_some() {
                    return Err(BuildError::DuplicateIdentifier(id));
                }
            }
            attrs.push(desc);
        }

        let has_single_attr = attrs.len() == 1;
        if !has_single_attr
            && (base.id_offset_from_start().is_none()
                || (base.sample_id_all() && base.id_offset_from_end().is_none()))
        {
            return Err(BuildError::MissingIdentifierOffsets);
        }

        Ok(Session {
            session_id: self.session_id,
            endian: self.endian,
            attrs,
            attrs_by_id,
            has_single_attr,
        })
    }
}

/// The end offset only matters if non-SAMPLE records carry ids at all.
fn id_offsets_match(base: &AttributeDescriptor, other: &AttributeDescriptor) -> bool {
    base.id_offset_from_start() == other.id_offset_from_start()
        && (!base.sample_id_all() || base.id_offset_from_end() == other.id_offset_from_end())
}

/// The perf_event_attrs of one recorded file, and the mapping from event
/// ids to attrs.
///
/// A session is immutable once built. It tells you which attr describes a
/// record, which you need to know before the record's payload can be parsed.
#[derive(Debug)]
pub struct Session {
    session_id: u32,
    endian: Endianness,
    /// In the order they were added. Guaranteed to have at least one element.
    attrs: Vec<Arc<AttributeDescriptor>>,
    attrs_by_id: HashMap<u64, Arc<AttributeDescriptor>>,
    /// Multiple ids can map to the same attr. If there's only one attr, finding
    /// the attr for a record doesn't require reading an id from the record.
    has_single_attr: bool,
}

impl Session {
    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn endian(&self) -> Endianness {
        self.endian
    }

    pub fn has_single_attr(&self) -> bool {
        self.has_single_attr
    }

    /// All attrs, in the order they were added to the builder.
    pub fn attrs(&self) -> &[Arc<AttributeDescriptor>] {
        &self.attrs
    }

    fn first_attr(&self) -> &Arc<AttributeDescriptor> {
        &self.attrs[0]
    }

    pub fn find_attr_for_event_id(&self, id: u64) -> Option<Arc<AttributeDescriptor>> {
        self.attrs_by_id.get(&id).cloned()
    }

    /// Finds the attr which describes the record with this header and payload.
    ///
    /// Returns `Ok(None)` for records which don't belong to any attr: user
    /// records, and non-SAMPLE records in files without `sample_id_all`.
    pub fn find_attr_for_record(
        &self,
        header: &PerfEventHeader,
        payload: &[u8],
    ) -> Result<Option<Arc<AttributeDescriptor>>, ResolveError> {
        let first = self.first_attr();
        if self.has_single_attr {
            return Ok(Some(Arc::clone(first)));
        }

        let record_type = header.record_type();
        if record_type.is_user_type() || (record_type != RecordType::SAMPLE && !first.sample_id_all())
        {
            return Ok(None);
        }

        let id = self
            .read_event_id(record_type, payload)
            .ok_or(ResolveError::TruncatedRecord {
                record_type,
                payload_len: payload.len(),
            })?;
        self.find_attr_for_event_id(id)
            .map(Some)
            .ok_or(ResolveError::UnresolvedIdentifier(id))
    }

    /// SAMPLE records have the id at a fixed offset from the start. All
    /// other records have it in the trailing `sample_id` block.
    fn read_event_id(&self, record_type: RecordType, payload: &[u8]) -> Option<u64> {
        let first = self.first_attr();
        // Both offsets were checked to exist when the session was built.
        let offset = if record_type == RecordType::SAMPLE {
            first.id_offset_from_start()?
        } else {
            payload.len().checked_sub(first.id_offset_from_end()?)?
        };
        self.endian.read_u64_at(payload, offset)
    }
}
