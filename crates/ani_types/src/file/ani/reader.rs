//! Sequential byte cursor over the raw block stream.

use std::io::Read;

use crate::file::AniError;

/// Little-endian cursor over a forward-only byte source.
///
/// End of stream is only legal at a block boundary: [`ByteReader::read_tag`]
/// maps a clean EOF to [`AniError::EndOfStream`], while every other short
/// read is reported as a truncated block.
pub(crate) struct ByteReader<R> {
	inner: R,
}

impl<R: Read> ByteReader<R> {
	pub(crate) fn new(inner: R) -> Self {
		Self {
			inner,
		}
	}

	/// Reads the next block tag, or signals the clean end of the stream.
	pub(crate) fn read_tag(&mut self) -> Result<u8, AniError> {
		let mut byte = [0u8; 1];
		loop {
			match self.inner.read(&mut byte) {
				Ok(0) => return Err(AniError::EndOfStream),
				Ok(_) => return Ok(byte[0]),
				Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
				Err(e) => return Err(AniError::Io(e)),
			}
		}
	}

	pub(crate) fn read_u8(&mut self) -> Result<u8, AniError> {
		let mut buf = [0u8; 1];
		self.fill(&mut buf)?;
		Ok(buf[0])
	}

	pub(crate) fn read_u16(&mut self) -> Result<u16, AniError> {
		let mut buf = [0u8; 2];
		self.fill(&mut buf)?;
		Ok(u16::from_le_bytes(buf))
	}

	pub(crate) fn read_u32(&mut self) -> Result<u32, AniError> {
		let mut buf = [0u8; 4];
		self.fill(&mut buf)?;
		Ok(u32::from_le_bytes(buf))
	}

	/// Reads exactly `len` bytes into a fresh buffer.
	pub(crate) fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, AniError> {
		let mut buf = vec![0u8; len];
		self.fill(&mut buf)?;
		Ok(buf)
	}

	/// Fills `buf` completely, reporting a short read as block truncation.
	pub(crate) fn fill(&mut self, buf: &mut [u8]) -> Result<(), AniError> {
		let mut filled = 0;
		while filled < buf.len() {
			match self.inner.read(&mut buf[filled..]) {
				Ok(0) => {
					return Err(AniError::TruncatedBlock {
						expected: buf.len(),
						actual: filled,
					});
				}
				Ok(n) => filled += n,
				Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
				Err(e) => return Err(AniError::Io(e)),
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn test_read_tag_maps_clean_eof() {
		let mut reader = ByteReader::new(Cursor::new(Vec::new()));
		assert!(matches!(reader.read_tag(), Err(AniError::EndOfStream)));
	}

	#[test]
	fn test_fill_reports_truncation() {
		let mut reader = ByteReader::new(Cursor::new(vec![1u8, 2]));
		let mut buf = [0u8; 4];
		assert!(matches!(
			reader.fill(&mut buf),
			Err(AniError::TruncatedBlock { expected: 4, actual: 2 })
		));
	}

	#[test]
	fn test_little_endian_reads() {
		let mut reader = ByteReader::new(Cursor::new(vec![0x34, 0x12, 0x78, 0x56, 0x00, 0x00]));
		assert_eq!(reader.read_u16().unwrap(), 0x1234);
		assert_eq!(reader.read_u32().unwrap(), 0x5678);
	}
}
