//! This module is separated into its own crate to keep the public surface of
//! `ani-rs` in one place, and should not be used directly.

/// `use ani_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use ani_player;
pub use ani_types;

// Re-export commonly used types at crate root
pub use ani_player::{Player, SessionOutcome, SessionState};
pub use ani_types::file::{AniError, AniFile, SAMPLE_RATE};
