use byteorder::{LittleEndian, WriteBytesExt};
use linux_perf_stream_reader::{
    AttrFlags, PerfEventAttr, ReadError, RecordReader, RecordType, ResolveError, SampleFormat,
    SessionBuilder,
};

/// A 128-byte perf_event_attr as written by a recent perf.
fn attr_bytes(
    config: u64,
    sample_period: u64,
    sample_type: SampleFormat,
    flags: AttrFlags,
) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.write_u32::<LittleEndian>(0).unwrap(); // PERF_TYPE_HARDWARE
    buf.write_u32::<LittleEndian>(128).unwrap();
    buf.write_u64::<LittleEndian>(config).unwrap();
    buf.write_u64::<LittleEndian>(sample_period).unwrap();
    buf.write_u64::<LittleEndian>(sample_type.bits()).unwrap();
    buf.write_u64::<LittleEndian>(0).unwrap();
    buf.write_u64::<LittleEndian>(flags.bits()).unwrap();
    buf.resize(128, 0);
    buf
}

fn record(record_type: RecordType, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.write_u32::<LittleEndian>(record_type.0).unwrap();
    buf.write_u16::<LittleEndian>(0).unwrap();
    buf.write_u16::<LittleEndian>((payload.len() + 8) as u16).unwrap();
    buf.extend_from_slice(payload);
    buf
}

/// ip, pid/tid, time, id, cpu
fn sample(id: u64, time: u64) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u64::<LittleEndian>(0x5555_0000_1000).unwrap();
    payload.write_u32::<LittleEndian>(100).unwrap();
    payload.write_u32::<LittleEndian>(101).unwrap();
    payload.write_u64::<LittleEndian>(time).unwrap();
    payload.write_u64::<LittleEndian>(id).unwrap();
    payload.write_u64::<LittleEndian>(2).unwrap();
    record(RecordType::SAMPLE, &payload)
}

/// A MMAP record with a trailing sample_id block: pid/tid, time, id, cpu.
fn mmap(id: u64, time: u64, path: &str) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u32::<LittleEndian>(100).unwrap();
    payload.write_u32::<LittleEndian>(101).unwrap();
    payload.write_u64::<LittleEndian>(0x5555_0000_0000).unwrap();
    payload.write_u64::<LittleEndian>(0x2000).unwrap();
    payload.write_u64::<LittleEndian>(0).unwrap();
    payload.extend_from_slice(path.as_bytes());
    payload.resize((payload.len() + 8) & !7, 0);
    payload.write_u32::<LittleEndian>(100).unwrap();
    payload.write_u32::<LittleEndian>(101).unwrap();
    payload.write_u64::<LittleEndian>(time).unwrap();
    payload.write_u64::<LittleEndian>(id).unwrap();
    payload.write_u64::<LittleEndian>(2).unwrap();
    record(RecordType::MMAP, &payload)
}

#[test]
fn multiplexed_events_from_parsed_attrs() {
    let sample_type = SampleFormat::IP
        | SampleFormat::TID
        | SampleFormat::TIME
        | SampleFormat::ID
        | SampleFormat::CPU;
    let mut attrs_section = attr_bytes(0, 4000, sample_type, AttrFlags::SAMPLE_ID_ALL);
    // A counter which is only read alongside the cycles samples.
    attrs_section.extend(attr_bytes(1, u64::MAX, sample_type, AttrFlags::SAMPLE_ID_ALL));

    let mut cursor = &attrs_section[..];
    let cycles = PerfEventAttr::parse::<_, LittleEndian>(&mut cursor, None).unwrap();
    let instructions = PerfEventAttr::parse::<_, LittleEndian>(&mut cursor, None).unwrap();
    assert!(cursor.is_empty());

    let session = SessionBuilder::new(7)
        .add_attr_and_ids(cycles, vec![1001, 1002])
        .add_attr_and_ids(instructions, vec![2001, 2002])
        .build()
        .unwrap();
    assert!(session.attrs()[0].is_timebase());
    assert!(!session.attrs()[1].is_timebase());
    assert_eq!(session.attrs()[0].id_offset_from_start(), Some(24));
    assert_eq!(session.attrs()[0].id_offset_from_end(), Some(16));

    let mut stream = Vec::new();
    stream.extend(mmap(1001, 5, "/usr/bin/some-binary"));
    stream.extend(sample(1002, 10));
    stream.extend(sample(2001, 11));
    stream.extend(record(RecordType(68), &[])); // FINISHED_ROUND
    stream.extend(sample(3003, 12));
    stream.extend(mmap(2002, 13, "/lib/libc.so.6"));

    let mut reader = RecordReader::with_file_offset(session, 0x1000);
    let mut configs = Vec::new();
    let mut failures = Vec::new();
    let chunk_sizes = [1, 5, 13, 64, 3, 200, 9];
    let mut pos = 0;
    let mut next_size = chunk_sizes.iter().cycle();
    while pos < stream.len() {
        let end = (pos + next_size.next().unwrap()).min(stream.len());
        reader.push_chunk(stream[pos..end].to_vec());
        pos = end;
        loop {
            match reader.next_record() {
                Ok(Some(record)) => configs.push((
                    record.record_type(),
                    record.attr.as_ref().map(|attr| attr.attr().config),
                    record.timestamp(),
                )),
                Ok(None) => break,
                Err(ReadError::Resolve { source, .. }) => failures.push(source),
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
    }

    assert_eq!(
        configs,
        vec![
            (RecordType::MMAP, Some(0), Some(5)),
            (RecordType::SAMPLE, Some(0), Some(10)),
            (RecordType::SAMPLE, Some(1), Some(11)),
            (RecordType(68), None, None),
            (RecordType::MMAP, Some(1), Some(13)),
        ]
    );
    assert_eq!(failures, vec![ResolveError::UnresolvedIdentifier(3003)]);
    assert_eq!(reader.file_offset(), 0x1000 + stream.len() as u64);
}

#[test]
fn single_event_needs_no_ids() {
    let attr = PerfEventAttr {
        sample_period_or_freq: 1000,
        sample_format: SampleFormat::IP | SampleFormat::TIME,
        flags: AttrFlags::FREQ,
        ..Default::default()
    };
    let session = SessionBuilder::new(0)
        .add_attr_and_ids(attr, vec![])
        .build()
        .unwrap();
    assert_eq!(session.attrs()[0].sample_frequency(), Some(1000));

    let mut payload = Vec::new();
    payload.write_u64::<LittleEndian>(0x1234).unwrap();
    payload.write_u64::<LittleEndian>(99).unwrap();
    let mut stream = record(RecordType::SAMPLE, &payload);
    stream.extend(record(RecordType::COMM, b"name\0\0\0\0"));

    let mut reader = RecordReader::new(session);
    reader.push_chunk(stream);
    let first = reader.next_record().unwrap().unwrap();
    assert!(first.attr.is_some());
    assert_eq!(first.timestamp(), Some(99));
    let second = reader.next_record().unwrap().unwrap();
    assert!(second.attr.is_some());
    assert_eq!(second.timestamp(), None);
    assert!(reader.next_record().unwrap().is_none());
}
