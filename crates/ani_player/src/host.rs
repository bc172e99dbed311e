//! Collaborator boundary for playback sessions.
//!
//! The engine calls outward through these traits and never owns a window,
//! an audio device, or a resource directory itself. Implement them on plain
//! value types: one instance serves every session of a player, so there is
//! no per-session closure allocation.

use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

use ani_types::file::AniError;
use ani_types::file::ani::{Header, Timing};

/// Fatal session errors.
#[derive(Debug, Error)]
pub enum PlayerError {
	/// The named source could not be opened or buffered
	#[error("cannot open source {name:?}: {source}")]
	Resource {
		/// Source name the provider was asked for
		name: String,
		/// Underlying IO failure
		#[source]
		source: std::io::Error,
	},

	/// The stream is malformed or failed mid-decode
	#[error("stream error: {0}")]
	Stream(#[from] AniError),
}

/// Terminal outcome of one playback session.
///
/// Exactly one of these is reported per session, letting the caller release
/// surfaces and audio resources deterministically.
#[derive(Debug)]
pub enum SessionOutcome {
	/// The stream played to its natural end
	Finished,

	/// The session was cancelled cooperatively via `stop`
	Stopped,

	/// The session died on an unrecoverable error
	Failed(PlayerError),
}

/// Parameters reported to the host once per session, before the first frame.
#[derive(Debug, Clone)]
pub struct VideoInfo {
	/// Frame width in pixels
	pub width: u16,
	/// Frame height in pixels
	pub height: u16,
	/// Declared frame count
	pub frame_count: u16,
	/// Localization tag from the header
	pub language: u16,
	/// Frame rate selected by the language tag
	pub fps: f64,
	/// Frames to decode before audio starts
	pub audio_delay: u32,
}

impl VideoInfo {
	pub(crate) fn new(header: &Header, timing: Timing) -> Self {
		Self {
			width: header.width(),
			height: header.height(),
			frame_count: header.frames(),
			language: header.language(),
			fps: timing.fps,
			audio_delay: timing.audio_delay,
		}
	}
}

/// Supplies a fresh byte stream for a named source.
///
/// Called once per playback pass; loop mode re-opens the source rather than
/// rewinding a shared reader.
pub trait StreamProvider: Send + Sync {
	/// Opens the named source from its beginning.
	fn open(&self, name: &str) -> std::io::Result<Box<dyn Read + Send>>;
}

/// Receives decoded output and steers an active session.
pub trait PlaybackHost: Send + Sync {
	/// Called once per session with the stream's geometry and timing.
	fn prepare(&self, info: &VideoInfo);

	/// Receives one finished RGBA frame (width x height x 4, row-major),
	/// already pace-gated. Frames arrive strictly in decode order.
	fn present_frame(&self, rgba: &[u8]);

	/// Polled between blocks; `true` holds frame delivery without
	/// cancelling the session.
	fn pause_requested(&self) -> bool {
		false
	}

	/// Receives the single terminal notification for a session.
	fn session_ended(&self, outcome: &SessionOutcome);
}

/// Sound device boundary.
///
/// The sink drains submitted buffers on its own execution context; the
/// decode loop only ever pushes. Buffers arrive strictly in stream order.
pub trait AudioSink: Send + Sync {
	/// Queues raw PCM (unsigned 8-bit mono 22.05 kHz) ahead of or during
	/// playback.
	fn queue(&self, pcm: &[u8]);

	/// Starts draining queued audio. Called once per pass, after the
	/// file's audio-delay frames have been presented.
	fn begin(&self);

	/// Live gain update, `0.0..=1.0`.
	fn set_gain(&self, gain: f32);

	/// Live mute toggle.
	fn set_muted(&self, muted: bool);

	/// Stops the device and joins its draining context. Called on every
	/// session exit path; must be idempotent.
	fn stop(&self);
}

/// Audio sink for sessions with no sound device attached (tests, headless
/// frame export).
pub struct NullSink;

impl AudioSink for NullSink {
	fn queue(&self, _pcm: &[u8]) {}

	fn begin(&self) {}

	fn set_gain(&self, _gain: f32) {}

	fn set_muted(&self, _muted: bool) {}

	fn stop(&self) {}
}

/// Stream provider resolving source names inside a base directory.
pub struct DirectoryProvider {
	root: PathBuf,
}

impl DirectoryProvider {
	/// Creates a provider rooted at `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
		}
	}
}

impl StreamProvider for DirectoryProvider {
	fn open(&self, name: &str) -> std::io::Result<Box<dyn Read + Send>> {
		let file = std::fs::File::open(self.root.join(name))?;
		Ok(Box::new(std::io::BufReader::new(file)))
	}
}
