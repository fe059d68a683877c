//! Buffered copy shared by the archiver and the extractor.
//!
//! Both directions stream payloads through one reusable 64 KiB buffer and
//! report every chunk to a [`ProgressCallback`].

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::ProgressCallback;
use crate::Result;

/// Buffer size for payload copies (64 KiB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Heap buffer reused across every entry of one operation.
///
/// # Examples
///
/// ```no_run
/// use pathzip_core::NoopProgress;
/// use pathzip_core::copy::CopyBuffer;
/// use pathzip_core::copy::copy_with_buffer;
///
/// # fn example() -> pathzip_core::Result<()> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("input.txt")?;
/// let mut output = std::fs::File::create("output.txt")?;
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer, &mut NoopProgress)?;
/// println!("Copied {copied} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Vec<u8>,
}

impl CopyBuffer {
    /// Creates a new zero-filled copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE],
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` into `writer` through `buffer`, returning the byte count.
///
/// Interrupted reads are retried. Every chunk written is reported through
/// `progress.on_bytes_written`.
///
/// # Errors
///
/// Returns `ArchiveError::Io` if reading or writing fails.
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        let chunk = bytes_read as u64;
        total = total.saturating_add(chunk);
        progress.on_bytes_written(chunk);
    }

    Ok(total)
}
