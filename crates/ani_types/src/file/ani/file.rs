//! Eager decoding of whole ANI files.

use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::file::{AniError, SAMPLE_RATE};

use super::frame::FrameAssembler;
use super::parser::{Block, Stream};
use super::{Header, Timing};

/// Representation of a fully decoded `.ANI` file.
///
/// Decodes the whole block stream up front: every finished RGBA frame plus
/// the concatenated PCM sound track. Playback paces frames lazily instead;
/// this type serves tools and tests that want the complete result.
#[derive(Debug)]
pub struct File {
	header: Header,
	timing: Timing,
	frames: Vec<Vec<u8>>,
	audio: Vec<u8>,
	palette_swaps: u32,
}

impl File {
	/// Opens and fully decodes a `.ANI` file from the specified path.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AniError> {
		let reader = std::fs::File::open(path)?;
		Self::from_reader(std::io::BufReader::new(reader))
	}

	/// Fully decodes a `.ANI` stream from any reader.
	pub fn from_reader<R: Read>(reader: R) -> Result<Self, AniError> {
		let mut stream = Stream::open(reader)?;
		let header = *stream.header();
		let timing = stream.timing();
		let mut assembler = FrameAssembler::new(&header);

		let mut frames = Vec::with_capacity(usize::from(header.frames()));
		let mut audio = Vec::new();
		let mut palette_swaps = 0;

		loop {
			match stream.next_block() {
				Ok(Block::Palette(palette)) => {
					assembler.set_palette(palette);
					palette_swaps += 1;
				}
				Ok(Block::Sound(pcm)) => audio.extend_from_slice(&pcm),
				Ok(Block::Data(strip)) => {
					if let Some(frame) = assembler.push_strip(&strip)? {
						frames.push(frame);
					}
				}
				Err(e) if e.is_end_of_stream() => break,
				Err(e) => return Err(e),
			}
		}

		Ok(Self {
			header,
			timing,
			frames,
			audio,
			palette_swaps,
		})
	}

	/// Returns the file header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the timing parameters selected by the header's language tag.
	pub fn timing(&self) -> Timing {
		self.timing
	}

	/// Returns the decoded RGBA frames (each width x height x 4, row-major).
	pub fn frames(&self) -> &[Vec<u8>] {
		&self.frames
	}

	/// Returns the concatenated PCM sound track.
	pub fn audio(&self) -> &[u8] {
		&self.audio
	}

	/// Returns how many palette blocks the stream carried.
	pub fn palette_swaps(&self) -> u32 {
		self.palette_swaps
	}

	/// Returns the sound track duration in milliseconds.
	pub fn audio_duration_ms(&self) -> u64 {
		self.audio.len() as u64 * 1000 / u64::from(SAMPLE_RATE)
	}

	/// Writes the sound track as a WAV file to the given writer.
	pub fn write_audio_wav<W: Write + Seek>(&self, writer: &mut W) -> Result<(), AniError> {
		let spec = hound::WavSpec {
			channels: 1,
			sample_rate: SAMPLE_RATE,
			bits_per_sample: 8,
			sample_format: hound::SampleFormat::Int,
		};

		let mut wav_writer = hound::WavWriter::new(writer, spec)?;

		// hound takes 8-bit samples as i8 and stores them WAV-unsigned
		for &sample in &self.audio {
			wav_writer.write_sample((i16::from(sample) - 128) as i8)?;
		}

		wav_writer.finalize()?;

		Ok(())
	}
}
