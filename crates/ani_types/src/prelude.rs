//! Prelude module for `ani_types`.
//!
//! This module provides a convenient way to import commonly used types,
//! traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use ani_types::prelude::*;
//!
//! # fn main() -> Result<(), AniError> {
//! let ani = AniFile::open("INTRO.ANI")?;
//! println!("{}", ani.header());
//! # Ok(())
//! # }
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Error type
	AniError,

	// Sound track sample rate
	SAMPLE_RATE,
};

// ANI container types
#[doc(inline)]
pub use crate::file::ani::{
	Algorithm,
	Block,
	Color,
	DataBlock,
	File as AniFile,
	FrameAssembler,
	Header as AniHeader,
	Palette,
	Stream as AniStream,
	Timing,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
