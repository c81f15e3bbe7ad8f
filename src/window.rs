use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;

/// A contiguous range of file bytes handed out by [`ChunkedByteWindow::slice_off`].
///
/// If the range lies within a single chunk, the slice points straight into
/// that chunk. Ranges which straddle chunks have to be copied into a fresh
/// buffer. Either way, it derefs to the bytes in file order.
#[derive(Clone)]
pub enum FileSlice<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl<'a> FileSlice<'a> {
    /// Whether the bytes alias the window's memory, i.e. no copy was made.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, FileSlice::Borrowed(_))
    }

    pub fn into_owned(self) -> Vec<u8> {
        match self {
            FileSlice::Borrowed(bytes) => bytes.to_vec(),
            FileSlice::Owned(bytes) => bytes,
        }
    }
}

impl<'a> Deref for FileSlice<'a> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileSlice::Borrowed(bytes) => bytes,
            FileSlice::Owned(bytes) => bytes,
        }
    }
}

impl<'a> AsRef<[u8]> for FileSlice<'a> {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// Two slices are equal if they contain the same bytes, wherever those live.
impl<'a, 'b> PartialEq<FileSlice<'b>> for FileSlice<'a> {
    fn eq(&self, other: &FileSlice<'b>) -> bool {
        self[..] == other[..]
    }
}

impl<'a> Eq for FileSlice<'a> {}

/// A helper which prints out byte slices but limits the output to 20 elements.
struct DisplayableSlice<'a>(&'a [u8]);

impl<'a> fmt::Display for DisplayableSlice<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        const MAX_PRINT_COUNT: usize = 20;
        let len = self.0.len();
        fmt.write_str("[")?;
        for (i, b) in self.0.iter().take(MAX_PRINT_COUNT).enumerate() {
            if i != 0 {
                fmt.write_str(", ")?;
            }
            write!(fmt, "{b}")?;
        }
        if len > MAX_PRINT_COUNT {
            write!(
                fmt,
                ", ... (and {} more, total length {})",
                len - MAX_PRINT_COUNT,
                len
            )?;
        }
        fmt.write_str("]")
    }
}

impl<'a> fmt::Debug for FileSlice<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            FileSlice::Borrowed(bytes) => {
                write!(fmt, "FileSlice::Borrowed({})", DisplayableSlice(bytes))
            }
            FileSlice::Owned(bytes) => write!(fmt, "FileSlice::Owned({})", DisplayableSlice(bytes)),
        }
    }
}

struct Chunk {
    /// The file offset of `data[0]`. This byte may already have been evicted.
    file_offset: u64,
    data: Vec<u8>,
}

impl Chunk {
    fn end_offset(&self) -> u64 {
        self.file_offset + self.data.len() as u64
    }
}

/// A window over a file whose contents arrive as a sequence of chunks.
///
/// Chunks are appended at the back as they are read, and dropped from the
/// front once all of their bytes have been consumed. Any byte range between
/// [`file_offset`](Self::file_offset) and [`end_offset`](Self::end_offset)
/// can be requested; ranges inside a single chunk are returned without
/// copying.
///
/// Returned [`FileSlice`]s borrow the window, so the window can't be
/// modified while one is alive.
pub struct ChunkedByteWindow {
    /// In file order, without gaps, none of them empty.
    chunks: VecDeque<Chunk>,
    file_offset: u64,
    end_offset: u64,
}

impl ChunkedByteWindow {
    pub fn new() -> Self {
        Self::with_file_offset(0)
    }

    /// Create an empty window whose first chunk will start at `file_offset`.
    pub fn with_file_offset(file_offset: u64) -> Self {
        Self {
            chunks: VecDeque::new(),
            file_offset,
            end_offset: file_offset,
        }
    }

    /// The file offset of the first byte which hasn't been evicted.
    pub fn file_offset(&self) -> u64 {
        self.file_offset
    }

    /// The file offset just past the last buffered byte.
    pub fn end_offset(&self) -> u64 {
        self.end_offset
    }

    /// The number of bytes which can currently be sliced.
    pub fn len(&self) -> usize {
        (self.end_offset - self.file_offset) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end_offset == self.file_offset
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Appends the next piece of the file.
    pub fn push_back(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        let file_offset = self.end_offset;
        self.end_offset += chunk.len() as u64;
        self.chunks.push_back(Chunk {
            file_offset,
            data: chunk,
        });
    }

    /// Discards everything before `target_offset`.
    ///
    /// Returns false, and does nothing, if `target_offset` lies before the
    /// current start of the window or after the end of the buffered data.
    pub fn pop_front_bytes_until(&mut self, target_offset: u64) -> bool {
        if target_offset < self.file_offset || target_offset > self.end_offset {
            return false;
        }
        while self
            .chunks
            .front()
            .is_some_and(|chunk| chunk.end_offset() <= target_offset)
        {
            self.chunks.pop_front();
        }
        log::trace!(
            "Evicted file bytes {}..{}, {} chunks left",
            self.file_offset,
            target_offset,
            self.chunks.len()
        );
        self.file_offset = target_offset;
        true
    }

    /// Returns the `len` bytes starting at file offset `offset`, or `None`
    /// if not all of them are buffered.
    pub fn slice_off(&self, offset: u64, len: usize) -> Option<FileSlice<'_>> {
        let end = offset.checked_add(u64::try_from(len).ok()?)?;
        if offset < self.file_offset || end > self.end_offset {
            return None;
        }
        if len == 0 {
            return Some(FileSlice::Borrowed(&[]));
        }

        let index = self
            .chunks
            .partition_point(|chunk| chunk.end_offset() <= offset);
        let first = self.chunks.get(index)?;
        let local_offset = (offset - first.file_offset) as usize;
        if end <= first.end_offset() {
            return Some(FileSlice::Borrowed(
                &first.data[local_offset..local_offset + len],
            ));
        }

        log::trace!("Copying {len} bytes at file offset {offset} across chunk boundaries");
        let mut bytes = Vec::with_capacity(len);
        bytes.extend_from_slice(&first.data[local_offset..]);
        for chunk in self.chunks.range(index + 1..) {
            let remaining = len - bytes.len();
            if remaining == 0 {
                break;
            }
            let n = remaining.min(chunk.data.len());
            bytes.extend_from_slice(&chunk.data[..n]);
        }
        Some(FileSlice::Owned(bytes))
    }
}

impl Default for ChunkedByteWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChunkedByteWindow {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        fmt.debug_struct("ChunkedByteWindow")
            .field("file_offset", &self.file_offset)
            .field("end_offset", &self.end_offset)
            .field("chunk_count", &self.chunks.len())
            .finish()
    }
}
