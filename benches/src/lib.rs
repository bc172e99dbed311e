//! Benchmark helper utilities for ani-rs
//!
//! This module generates synthetic ANI payloads sized like real cutscene
//! workloads, so the decoder benchmarks run without shipping game data.

/// Generates an LZSS payload of literal-heavy content decoding to `len` bytes.
pub fn generate_lzss_literals(len: usize) -> Vec<u8> {
	let mut out = Vec::with_capacity(len + len / 8 + 1);
	let mut produced = 0usize;
	while produced < len {
		let chunk = (len - produced).min(8);
		// control byte with one set flag per literal
		out.push(((1u16 << chunk) - 1) as u8);
		for _ in 0..chunk {
			out.push((produced.wrapping_mul(31) % 251) as u8);
			produced += 1;
		}
	}
	out
}

/// Generates a back-reference-heavy LZSS payload.
///
/// Returns the payload and the exact decoded length. Eight literal bytes
/// seed the dictionary, then every control byte emits eight maximum-length
/// matches.
pub fn generate_lzss_matches(rounds: usize) -> (Vec<u8>, usize) {
	let mut out = vec![0xFF];
	out.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
	let mut decoded = 8usize;

	for _ in 0..rounds {
		out.push(0x00);
		for _ in 0..8 {
			// distance 8, length 18
			let pair = 8u16 | (0x0F << 12);
			out.extend_from_slice(&pair.to_le_bytes());
			decoded += 18;
		}
	}

	(out, decoded)
}

/// Generates variant-1 RLE packets alternating skips, runs, and literals
/// that advance the raster by `raster_len` bytes in total.
pub fn generate_rle1(raster_len: usize) -> Vec<u8> {
	let mut out = Vec::new();
	let mut cursor = 0usize;
	let mut toggle = false;
	while cursor < raster_len {
		let remaining = raster_len - cursor;
		if toggle && remaining >= 4 + 100 {
			// skip 4, run of 100
			out.extend_from_slice(&[4, 0x80 | 100, 0x5A]);
			cursor += 104;
		} else {
			let literals = remaining.min(64);
			out.push(0);
			out.push(literals as u8);
			for i in 0..literals {
				out.push((i % 256) as u8);
			}
			cursor += literals;
		}
		toggle = !toggle;
	}
	out
}

/// Generates variant-2 RLE packets covering `raster_len` bytes with wide runs.
pub fn generate_rle2(raster_len: usize) -> Vec<u8> {
	let mut out = Vec::new();
	let mut cursor = 0usize;
	while cursor < raster_len {
		let remaining = raster_len - cursor;
		let run = remaining.min(0x4000);
		out.extend_from_slice(&0u16.to_le_bytes());
		out.extend_from_slice(&(0x8000u16 | run as u16).to_le_bytes());
		out.push(0x33);
		cursor += run;
	}
	out
}

/// Common raster sizes for synthetic benchmark data
pub mod sizes {
	/// Cutscene raster: 320x200 (64,000 pixels), the common clip geometry
	pub const CUTSCENE: usize = 320 * 200;
	/// Full-screen raster: 640x480 (307,200 pixels)
	pub const FULLSCREEN: usize = 640 * 480;
}

#[cfg(test)]
mod tests {
	use super::*;
	use ani_types::file::ani::{lzss, rle};

	#[test]
	fn test_literal_payload_roundtrips() {
		let payload = generate_lzss_literals(1000);
		let mut dst = vec![0u8; 1000];
		let written = lzss::decompress(&payload, &mut dst, 0).unwrap();
		assert_eq!(written, 1000);
	}

	#[test]
	fn test_match_payload_decodes_to_declared_len() {
		let (payload, decoded) = generate_lzss_matches(16);
		let mut dst = vec![0u8; decoded];
		let written = lzss::decompress(&payload, &mut dst, 0).unwrap();
		assert_eq!(written, decoded);
	}

	#[test]
	fn test_rle_payloads_cover_raster() {
		let mut raster = vec![0u8; sizes::CUTSCENE];
		let cursor = rle::decode_variant1(&generate_rle1(sizes::CUTSCENE), &mut raster, 0).unwrap();
		assert_eq!(cursor, sizes::CUTSCENE);

		let cursor = rle::decode_variant2(&generate_rle2(sizes::CUTSCENE), &mut raster, 0).unwrap();
		assert_eq!(cursor, sizes::CUTSCENE);
	}
}
