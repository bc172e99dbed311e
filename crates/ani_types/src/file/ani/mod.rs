//! `.ANI` cutscene container support for the `ani-rs` project.
//!
//! This module provides support for decoding ANI files, the proprietary
//! cutscene container used by the original game. An ANI file interleaves
//! compressed bitmap strips with palette changes and a raw PCM sound track;
//! the player reconstructs full frames from the strips and paces them
//! against the audio clock.
//!
//! # File Structure Overview
//!
//! The format is play-forward only: a fixed header followed by a sequence of
//! self-describing blocks. There are no resynchronization markers and no
//! index; the stream simply ends when no further block tag can be read.
//!
//! ## Header Structure (10 bytes at offset 0x00)
//!
//! ```text
//! Offset  Size  Field       Description
//! ------  ----  ----------  ------------------------------------------
//! 0x00    2     width       Frame width in pixels (u16, > 0)
//! 0x02    2     height      Frame height in pixels (u16, > 0)
//! 0x04    2     frames      Declared frame count (u16, > 0)
//! 0x06    2     language    Localization tag selecting timing parameters
//! 0x08    1     algorithm   Raster codec: 1 = RLE variant 1, 2 = variant 2
//! 0x09    1     reserved    Unused, set to zero
//! ```
//!
//! All multi-byte fields are little-endian.
//!
//! ## Block Stream
//!
//! Each block begins with a one-byte tag:
//!
//! ```text
//! Tag   Block    Layout after the tag
//! ----  -------  ------------------------------------------------------
//! 0x01  Palette  size: u32 (always 1024), 256 x u32 packed ARGB entries
//! 0x02  Sound    size: u32, raw PCM samples (unsigned 8-bit mono 22050 Hz)
//! 0x03  Data     strip_height: u16, raw_size: u32, flags: u8, size: u32,
//!                payload (LZSS unless flags bit 0, "special", marks it raw)
//! ```
//!
//! A clean EOF while reading the tag byte is the end of the stream. EOF
//! anywhere inside a block, or an unknown tag, is a format error: with no
//! resync markers, everything downstream of a fault is unrecoverable.
//!
//! ## Decode Pipeline
//!
//! Data payloads pass through up to two stages. Unless the block is marked
//! special, the payload is first replayed through the LZSS decoder
//! ([`lzss`]); the result (or the raw payload) is then fed to one of two
//! differential RLE raster decoders ([`rle`]) selected once per file by the
//! header's algorithm tag. The RLE stage writes palette indices into a
//! persistent width x height raster that is never cleared between frames
//! or palette changes; see [`FrameAssembler`] for why that persistence is
//! load-bearing.
//!
//! The alpha byte of palette entries is reserved (the original renderer
//! ignored it); decoded colors are surfaced fully opaque.
//!
//! # Usage Examples
//!
//! ## Decoding a whole file
//!
//! ```no_run
//! use ani_types::file::ani::File;
//!
//! # fn main() -> Result<(), ani_types::file::AniError> {
//! let ani = File::open("INTRO.ANI")?;
//! println!("{}", ani.header());
//! println!("{} frames, {} PCM bytes", ani.frames().len(), ani.audio().len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Walking the block stream lazily
//!
//! ```no_run
//! use ani_types::file::ani::{Block, Stream};
//!
//! # fn main() -> Result<(), ani_types::file::AniError> {
//! let reader = std::fs::File::open("INTRO.ANI")?;
//! let mut stream = Stream::open(std::io::BufReader::new(reader))?;
//! loop {
//! 	match stream.next_block() {
//! 		Ok(Block::Palette(_)) => println!("palette change"),
//! 		Ok(Block::Sound(pcm)) => println!("{} PCM bytes", pcm.len()),
//! 		Ok(Block::Data(strip)) => println!("strip of {} rows", strip.strip_height),
//! 		Err(e) if e.is_end_of_stream() => break,
//! 		Err(e) => return Err(e),
//! 	}
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;
use std::io::Read;
use std::time::Duration;

use serde::Serialize;

use crate::file::AniError;

/// Wire-format constants for the ANI container.
pub mod constants {
	/// Size of the fixed file header in bytes
	pub const HEADER_SIZE: usize = 10;

	/// Tag byte opening a palette block
	pub const BLOCK_PALETTE: u8 = 0x01;

	/// Tag byte opening a sound block
	pub const BLOCK_SOUND: u8 = 0x02;

	/// Tag byte opening an image-strip data block
	pub const BLOCK_DATA: u8 = 0x03;

	/// Data block flag bit marking a payload as raw (not LZSS-compressed)
	pub const FLAG_SPECIAL: u8 = 0x01;
}

mod file;
mod frame;
pub mod lzss;
mod palette;
mod parser;
mod reader;
pub mod rle;


// Re-exports for convenience
pub use self::file::File;
pub use self::frame::FrameAssembler;
pub use self::palette::{Color, Palette};
pub use self::parser::{Block, DataBlock, Stream};

/// Raster codecs an ANI header can select.
///
/// The choice is fixed per file; there is no fallback or auto-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Algorithm {
	/// Byte-granular differential RLE, used by low-motion cutscenes
	Rle1 = 1,

	/// Word-granular differential RLE, used by high-motion cutscenes
	Rle2 = 2,
}

impl Algorithm {
	/// Maps a header tag byte to an algorithm.
	pub fn from_tag(tag: u8) -> Result<Self, AniError> {
		match tag {
			1 => Ok(Algorithm::Rle1),
			2 => Ok(Algorithm::Rle2),
			other => Err(AniError::UnknownAlgorithm(other)),
		}
	}
}

impl Display for Algorithm {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Algorithm::Rle1 => write!(f, "RLE variant 1"),
			Algorithm::Rle2 => write!(f, "RLE variant 2"),
		}
	}
}

/// Header structure for `.ANI` files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Header {
	width: u16,
	height: u16,
	frames: u16,
	language: u16,
	algorithm: Algorithm,
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::HEADER_SIZE;

	/// Creates a header, validating it the same way parsing does.
	pub fn new(
		width: u16,
		height: u16,
		frames: u16,
		language: u16,
		algorithm: Algorithm,
	) -> Result<Self, AniError> {
		if width == 0 || height == 0 {
			return Err(AniError::InvalidGeometry {
				width,
				height,
			});
		}
		if frames == 0 {
			return Err(AniError::NoFrames);
		}
		Ok(Self {
			width,
			height,
			frames,
			language,
			algorithm,
		})
	}

	/// Returns the frame width in pixels.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the frame height in pixels.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the declared frame count.
	pub fn frames(&self) -> u16 {
		self.frames
	}

	/// Returns the localization tag.
	pub fn language(&self) -> u16 {
		self.language
	}

	/// Returns the raster codec this file uses.
	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	/// Returns the size of one raw raster in bytes (one byte per pixel).
	pub fn raster_len(&self) -> usize {
		usize::from(self.width) * usize::from(self.height)
	}

	/// Parses a `.ANI` file header from the given byte slice.
	///
	/// Inconsistent fields (zero dimensions, zero frames, unknown algorithm
	/// tag) are rejected here, before any block is read.
	pub fn from_bytes(data: &[u8]) -> Result<Header, AniError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(AniError::InsufficientData {
				expected: constants::HEADER_SIZE,
				actual: data.len(),
			});
		}

		let width = u16::from_le_bytes([data[0], data[1]]);
		let height = u16::from_le_bytes([data[2], data[3]]);
		let frames = u16::from_le_bytes([data[4], data[5]]);
		let language = u16::from_le_bytes([data[6], data[7]]);
		let algorithm = Algorithm::from_tag(data[8])?;
		// data[9] is reserved padding

		Header::new(width, height, frames, language, algorithm)
	}

	/// Loads a `.ANI` file header from any reader.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, AniError> {
		let mut buffer = [0u8; constants::HEADER_SIZE];
		reader.read_exact(&mut buffer)?;
		Self::from_bytes(&buffer)
	}

	/// Converts the `Header` to bytes
	pub fn to_bytes(&self) -> [u8; constants::HEADER_SIZE] {
		let mut bytes = [0u8; constants::HEADER_SIZE];

		bytes[0..2].copy_from_slice(&self.width.to_le_bytes());
		bytes[2..4].copy_from_slice(&self.height.to_le_bytes());
		bytes[4..6].copy_from_slice(&self.frames.to_le_bytes());
		bytes[6..8].copy_from_slice(&self.language.to_le_bytes());
		bytes[8] = self.algorithm as u8;
		bytes[9] = 0;

		bytes
	}
}

impl Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			".ANI File Header:\n\
			- Geometry: {}x{} pixels\n\
			- Frames: {}\n\
			- Language: {}\n\
			- Raster Codec: {}",
			self.width, self.height, self.frames, self.language, self.algorithm,
		)
	}
}

/// Playback timing parameters selected by a header's language tag.
///
/// Localized releases re-dubbed the sound tracks and shipped with slightly
/// different frame rates and audio lead-ins; the tag in the header picks the
/// matching pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
	/// Video frame rate in frames per second
	pub fps: f64,

	/// Number of video frames to decode before audio playback starts
	pub audio_delay: u32,
}

impl Timing {
	/// Timing used for language tags without a dedicated entry.
	pub const DEFAULT: Timing = Timing {
		fps: 10.0,
		audio_delay: 4,
	};

	/// Returns the timing parameters for a header's language tag.
	pub fn for_language(language: u16) -> Timing {
		match language {
			1 => Timing {
				fps: 12.5,
				audio_delay: 5,
			},
			2 => Timing {
				fps: 15.0,
				audio_delay: 6,
			},
			_ => Timing::DEFAULT,
		}
	}

	/// Returns the nominal wall-clock interval between frames.
	pub fn frame_interval(&self) -> Duration {
		Duration::from_secs_f64(1.0 / self.fps)
	}
}

impl Default for Timing {
	fn default() -> Self {
		Timing::DEFAULT
	}
}

#[cfg(test)]
mod header_tests {
	use super::*;

	#[test]
	fn test_header_roundtrip() {
		let header = Header::new(320, 200, 142, 1, Algorithm::Rle2).unwrap();
		let parsed = Header::from_bytes(&header.to_bytes()).unwrap();
		assert_eq!(parsed, header);
	}

	#[test]
	fn test_header_rejects_zero_geometry() {
		let mut bytes = Header::new(320, 200, 1, 0, Algorithm::Rle1).unwrap().to_bytes();
		bytes[0] = 0;
		bytes[1] = 0;
		assert!(matches!(
			Header::from_bytes(&bytes),
			Err(AniError::InvalidGeometry { width: 0, height: 200 })
		));
	}

	#[test]
	fn test_header_rejects_zero_frames() {
		let mut bytes = Header::new(320, 200, 1, 0, Algorithm::Rle1).unwrap().to_bytes();
		bytes[4] = 0;
		bytes[5] = 0;
		assert!(matches!(Header::from_bytes(&bytes), Err(AniError::NoFrames)));
	}

	#[test]
	fn test_header_rejects_unknown_algorithm() {
		let mut bytes = Header::new(320, 200, 1, 0, Algorithm::Rle1).unwrap().to_bytes();
		bytes[8] = 7;
		assert!(matches!(Header::from_bytes(&bytes), Err(AniError::UnknownAlgorithm(7))));
	}

	#[test]
	fn test_header_rejects_short_input() {
		assert!(matches!(
			Header::from_bytes(&[0u8; 4]),
			Err(AniError::InsufficientData { expected: 10, actual: 4 })
		));
	}

	#[test]
	fn test_timing_lookup() {
		assert_eq!(Timing::for_language(1).fps, 12.5);
		assert_eq!(Timing::for_language(2).audio_delay, 6);
		assert_eq!(Timing::for_language(99), Timing::DEFAULT);
	}

	#[test]
	fn test_frame_interval() {
		let timing = Timing::for_language(1);
		assert_eq!(timing.frame_interval(), Duration::from_millis(80));
	}
}
