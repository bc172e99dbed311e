//! Error types for ANI container parsing and decoding.

use thiserror::Error;

/// Errors that can occur when parsing or decoding ANI streams
#[derive(Debug, Error)]
pub enum AniError {
	/// The block stream ended at a block boundary.
	///
	/// This is the normal termination signal of a play-forward container,
	/// not a failure; consumers match on it to leave the decode loop.
	#[error("end of block stream")]
	EndOfStream,

	/// Not enough data to parse the fixed-size header
	#[error("insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Header declares unusable frame geometry
	#[error("invalid frame geometry: {width}x{height}")]
	InvalidGeometry {
		/// Declared frame width in pixels
		width: u16,
		/// Declared frame height in pixels
		height: u16,
	},

	/// Header declares an empty animation
	#[error("header declares zero frames")]
	NoFrames,

	/// Header carries a raster algorithm tag this decoder does not know
	#[error("unknown raster algorithm tag: {0}")]
	UnknownAlgorithm(u8),

	/// A block starts with an unrecognized tag byte
	#[error("unknown block tag: 0x{0:02X}")]
	UnknownBlockTag(u8),

	/// The stream or a payload ended in the middle of a block
	#[error("truncated block: expected {expected} bytes, got {actual} bytes")]
	TruncatedBlock {
		/// Number of bytes the block still required
		expected: usize,
		/// Number of bytes actually available
		actual: usize,
	},

	/// Palette block payload has the wrong size
	#[error("bad palette payload: expected {expected} bytes, got {actual} bytes")]
	BadPaletteSize {
		/// Required payload size in bytes
		expected: usize,
		/// Declared payload size in bytes
		actual: usize,
	},

	/// A decoder would write past the end of its destination buffer
	#[error("decoder overrun: {needed} bytes at offset {offset} exceed capacity {capacity}")]
	Overrun {
		/// Write position at the time of the fault
		offset: usize,
		/// Number of bytes the decoder wanted to write
		needed: usize,
		/// Capacity of the destination buffer
		capacity: usize,
	},

	/// An LZSS back-reference points before the start of the output
	#[error("back-reference distance {distance} exceeds {written} written bytes")]
	BadBackref {
		/// Distance encoded in the reference pair
		distance: usize,
		/// Bytes written so far in this call
		written: usize,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// WAV encoding error
	#[error(transparent)]
	Wav(#[from] hound::Error),
}

impl AniError {
	/// Returns `true` for the normal end-of-stream termination signal.
	pub fn is_end_of_stream(&self) -> bool {
		matches!(self, AniError::EndOfStream)
	}
}
