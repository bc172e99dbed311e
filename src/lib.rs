#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `ani-rs` revives the ANI cutscene player of an old `DirectDraw`-era game
//! and brings it to modern platforms using Rust.
//!
//! The container format combines LZSS-compressed, palette-indexed bitmap
//! strips with a raw PCM sound track; this crate decodes it and paces
//! playback against the audio clock.

pub use ani_internal::*;
