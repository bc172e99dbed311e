//! Streaming block parser for ANI containers.

use std::io::Read;

use crate::file::AniError;

use super::reader::ByteReader;
use super::{Header, Palette, Timing, constants};

/// One self-describing unit of the block stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
	/// Palette change; applies to frames completed after this point
	Palette(Palette),

	/// Raw PCM samples for the sound track
	Sound(Vec<u8>),

	/// One compressed strip of the current frame
	Data(DataBlock),
}

/// An image-strip data block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
	/// Number of frame rows this strip contributes
	pub strip_height: u16,

	/// Uncompressed payload size hint, used to size the LZSS output buffer
	pub raw_size: u32,

	/// When set, the payload is already raw and bypasses the LZSS stage
	pub special: bool,

	/// Strip payload (LZSS bitstream, or raw RLE packets when special)
	pub payload: Vec<u8>,
}

/// Lazy, forward-only reader over an ANI block stream.
///
/// [`Stream::open`] validates the header before any block is read;
/// [`Stream::next_block`] then yields typed blocks until the stream ends.
/// There is no seeking and no backtracking.
pub struct Stream<R> {
	header: Header,
	timing: Timing,
	reader: ByteReader<R>,
}

impl<R: Read> Stream<R> {
	/// Opens a block stream, parsing and validating the header.
	pub fn open(reader: R) -> Result<Self, AniError> {
		let mut reader = ByteReader::new(reader);

		let mut buffer = [0u8; constants::HEADER_SIZE];
		match reader.fill(&mut buffer) {
			Ok(()) => {}
			Err(AniError::TruncatedBlock {
				actual, ..
			}) => {
				return Err(AniError::InsufficientData {
					expected: constants::HEADER_SIZE,
					actual,
				});
			}
			Err(e) => return Err(e),
		}
		let header = Header::from_bytes(&buffer)?;
		let timing = Timing::for_language(header.language());

		Ok(Self {
			header,
			timing,
			reader,
		})
	}

	/// Returns the parsed header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the timing parameters selected by the header's language tag.
	pub fn timing(&self) -> Timing {
		self.timing
	}

	/// Reads the next block.
	///
	/// Returns [`AniError::EndOfStream`] when the stream has ended cleanly;
	/// any other error is a terminal format or IO failure.
	pub fn next_block(&mut self) -> Result<Block, AniError> {
		match self.reader.read_tag()? {
			constants::BLOCK_PALETTE => {
				let size = self.reader.read_u32()? as usize;
				if size != Palette::PAYLOAD_SIZE {
					return Err(AniError::BadPaletteSize {
						expected: Palette::PAYLOAD_SIZE,
						actual: size,
					});
				}
				let payload = self.reader.read_vec(size)?;
				Ok(Block::Palette(Palette::from_payload(&payload)?))
			}
			constants::BLOCK_SOUND => {
				let size = self.reader.read_u32()? as usize;
				Ok(Block::Sound(self.reader.read_vec(size)?))
			}
			constants::BLOCK_DATA => {
				let strip_height = self.reader.read_u16()?;
				let raw_size = self.reader.read_u32()?;
				let flags = self.reader.read_u8()?;
				let size = self.reader.read_u32()? as usize;
				let payload = self.reader.read_vec(size)?;
				Ok(Block::Data(DataBlock {
					strip_height,
					raw_size,
					special: flags & constants::FLAG_SPECIAL != 0,
					payload,
				}))
			}
			other => Err(AniError::UnknownBlockTag(other)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::ani::Algorithm;
	use std::io::Cursor;

	fn header_bytes() -> Vec<u8> {
		Header::new(4, 2, 1, 0, Algorithm::Rle1).unwrap().to_bytes().to_vec()
	}

	#[test]
	fn test_open_validates_before_blocks() {
		let mut data = header_bytes();
		data[0] = 0;
		data[1] = 0;
		// a malformed block follows, but the header must fail first
		data.push(0x7F);
		assert!(matches!(
			Stream::open(Cursor::new(data)),
			Err(AniError::InvalidGeometry { .. })
		));
	}

	#[test]
	fn test_short_header_is_insufficient_data() {
		assert!(matches!(
			Stream::open(Cursor::new(vec![1u8, 2, 3])),
			Err(AniError::InsufficientData { expected: 10, actual: 3 })
		));
	}

	#[test]
	fn test_empty_stream_ends_immediately() {
		let mut stream = Stream::open(Cursor::new(header_bytes())).unwrap();
		assert!(matches!(stream.next_block(), Err(AniError::EndOfStream)));
	}

	#[test]
	fn test_unknown_tag_is_rejected() {
		let mut data = header_bytes();
		data.push(0x7F);
		let mut stream = Stream::open(Cursor::new(data)).unwrap();
		assert!(matches!(stream.next_block(), Err(AniError::UnknownBlockTag(0x7F))));
	}

	#[test]
	fn test_sound_block_roundtrip() {
		let mut data = header_bytes();
		data.push(super::constants::BLOCK_SOUND);
		data.extend_from_slice(&4u32.to_le_bytes());
		data.extend_from_slice(&[10, 20, 30, 40]);
		let mut stream = Stream::open(Cursor::new(data)).unwrap();
		assert_eq!(stream.next_block().unwrap(), Block::Sound(vec![10, 20, 30, 40]));
		assert!(matches!(stream.next_block(), Err(AniError::EndOfStream)));
	}

	#[test]
	fn test_truncated_payload_is_an_error() {
		let mut data = header_bytes();
		data.push(super::constants::BLOCK_SOUND);
		data.extend_from_slice(&8u32.to_le_bytes());
		data.extend_from_slice(&[1, 2, 3]);
		let mut stream = Stream::open(Cursor::new(data)).unwrap();
		assert!(matches!(
			stream.next_block(),
			Err(AniError::TruncatedBlock { expected: 8, actual: 3 })
		));
	}

	#[test]
	fn test_bad_palette_size_is_rejected() {
		let mut data = header_bytes();
		data.push(super::constants::BLOCK_PALETTE);
		data.extend_from_slice(&512u32.to_le_bytes());
		let mut stream = Stream::open(Cursor::new(data)).unwrap();
		assert!(matches!(
			stream.next_block(),
			Err(AniError::BadPaletteSize { expected: 1024, actual: 512 })
		));
	}

	#[test]
	fn test_data_block_fields() {
		let mut data = header_bytes();
		data.push(super::constants::BLOCK_DATA);
		data.extend_from_slice(&2u16.to_le_bytes());
		data.extend_from_slice(&64u32.to_le_bytes());
		data.push(super::constants::FLAG_SPECIAL);
		data.extend_from_slice(&3u32.to_le_bytes());
		data.extend_from_slice(&[0, 1, 2]);
		let mut stream = Stream::open(Cursor::new(data)).unwrap();
		let block = stream.next_block().unwrap();
		assert_eq!(
			block,
			Block::Data(DataBlock {
				strip_height: 2,
				raw_size: 64,
				special: true,
				payload: vec![0, 1, 2],
			})
		);
	}
}
