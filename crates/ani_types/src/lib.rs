//! This crate provides the data types and container format support for the
//! `ani-rs` project.
//!
//! # File Formats
//!
//! - **ANI**: block-structured cutscene containers holding a header, palette
//!   blocks, raw PCM sound blocks, and LZSS-compressed image-strip blocks
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use ani_types::prelude::*;
//!
//! # fn main() -> Result<(), AniError> {
//! // Decode a whole cutscene eagerly
//! let ani = AniFile::open("INTRO.ANI")?;
//! println!("{} frames decoded", ani.frames().len());
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use ani_types::file::ani::File;
//!
//! let ani = File::open("INTRO.ANI");
//! ```

pub mod file;

/// `use ani_types::prelude::*;` to import commonly used items.
pub mod prelude;
