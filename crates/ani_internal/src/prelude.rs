//! Prelude module for `ani_internal`.
//!
//! This module provides a convenient way to import commonly used types and
//! traits.
//!
//! # Examples
//!
//! ```no_run
//! use ani_internal::prelude::*;
//!
//! # fn main() -> Result<(), AniError> {
//! let ani = AniFile::open("INTRO.ANI")?;
//! println!("{} frames", ani.frames().len());
//! # Ok(())
//! # }
//! ```

// Re-export everything from ani_types::prelude
#[doc(inline)]
pub use ani_types::prelude::*;

// Playback engine types
#[doc(inline)]
pub use ani_player::{
	AudioSink, CancelToken, DirectoryProvider, FrameClock, NullSink, PlaybackHost, Player,
	PlayerError, SessionOutcome, SessionState, StreamProvider, VideoInfo,
};

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use ani_player;
#[doc(inline)]
pub use ani_types;
