//! File type support for the `ani-rs` project.

mod error;

pub mod ani;

/// Sample rate of the raw PCM sound track carried by ANI containers, in Hz.
///
/// Sound blocks hold unsigned 8-bit mono samples, so a sample count equals a
/// byte count. The audio/video tail arithmetic divides by this rate.
pub const SAMPLE_RATE: u32 = 22_050;

// Re-export unified error type
pub use error::AniError;

// Re-export main file types
pub use ani::File as AniFile;
