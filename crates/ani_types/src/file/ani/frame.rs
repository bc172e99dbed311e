//! Frame assembly: strips in, RGBA frames out.

use crate::file::AniError;

use super::parser::DataBlock;
use super::{Algorithm, Header, Palette, lzss, rle};

/// Accumulates data-block strips into full frames and applies the current
/// palette on completion.
///
/// The assembler owns the persistent palette-index raster. The raster is
/// deliberately never cleared, not between frames and not when the palette
/// changes: the RLE stage writes deltas against the index values already in
/// the buffer, so a palette swap must leave the indices intact and only
/// changes how the next completed frame is colored. Clearing the buffer
/// here would corrupt every subsequent frame.
pub struct FrameAssembler {
	width: usize,
	height: usize,
	algorithm: Algorithm,
	palette: Palette,
	raster: Vec<u8>,
	scratch: Vec<u8>,
	accumulated_height: u32,
	cursor: usize,
	frames_completed: u32,
}

impl FrameAssembler {
	/// Creates an assembler for one playback pass over a file.
	///
	/// Starts from the grayscale palette; streams normally deliver a palette
	/// block before the first strip, but the format does not promise it.
	pub fn new(header: &Header) -> Self {
		Self {
			width: usize::from(header.width()),
			height: usize::from(header.height()),
			algorithm: header.algorithm(),
			palette: Palette::grayscale(),
			raster: vec![0; header.raster_len()],
			scratch: Vec::new(),
			accumulated_height: 0,
			cursor: 0,
			frames_completed: 0,
		}
	}

	/// Installs a freshly parsed palette block.
	///
	/// Takes effect for the next completed frame; the raster indices are
	/// untouched by design.
	pub fn set_palette(&mut self, palette: Palette) {
		self.palette = palette;
	}

	/// Returns the palette currently in effect.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Returns the number of frames completed so far in this pass.
	pub fn frames_completed(&self) -> u32 {
		self.frames_completed
	}

	/// Feeds one data block through the decode pipeline.
	///
	/// Runs the LZSS stage unless the block is special, applies the file's
	/// RLE variant to the raster, and accounts for the strip height. When
	/// the accumulated strips cover the frame, returns the finished RGBA
	/// frame (width x height x 4, row-major) and resets the per-frame
	/// counters.
	pub fn push_strip(&mut self, block: &DataBlock) -> Result<Option<Vec<u8>>, AniError> {
		let decoded: &[u8] = if block.special {
			&block.payload
		} else {
			let hint = block.raw_size as usize;
			if self.scratch.len() < hint {
				self.scratch.resize(hint, 0);
			}
			let written = lzss::decompress(&block.payload, &mut self.scratch[..hint], 0)?;
			&self.scratch[..written]
		};

		self.cursor = match self.algorithm {
			Algorithm::Rle1 => rle::decode_variant1(decoded, &mut self.raster, self.cursor)?,
			Algorithm::Rle2 => rle::decode_variant2(decoded, &mut self.raster, self.cursor)?,
		};
		self.accumulated_height += u32::from(block.strip_height);

		if self.accumulated_height >= self.height as u32 {
			self.accumulated_height = 0;
			self.cursor = 0;
			self.frames_completed += 1;
			Ok(Some(self.render()))
		} else {
			Ok(None)
		}
	}

	/// Colors the current raster with the current palette.
	fn render(&self) -> Vec<u8> {
		let mut rgba = Vec::with_capacity(self.raster.len() * 4);
		for &index in &self.raster {
			let color = self.palette.get(index);
			rgba.extend_from_slice(&[color.r, color.g, color.b, color.a]);
		}
		rgba
	}

	/// Returns the frame width in pixels.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Returns the frame height in pixels.
	pub fn height(&self) -> usize {
		self.height
	}
}
