use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// The byte order of the recorded file.
///
/// `perf.data` files are written in the byte order of the recording machine,
/// which is almost always little endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    LittleEndian,
    BigEndian,
}

impl Endianness {
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::LittleEndian;

    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::BigEndian;

    /// Reads the u64 at `offset` in `data`, or `None` if the eight bytes
    /// aren't all there.
    pub fn read_u64_at(self, data: &[u8], offset: usize) -> Option<u64> {
        let end = offset.checked_add(8)?;
        let bytes = data.get(offset..end)?;
        Some(match self {
            Self::LittleEndian => LittleEndian::read_u64(bytes),
            Self::BigEndian => BigEndian::read_u64(bytes),
        })
    }
}
