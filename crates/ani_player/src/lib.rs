//! Playback engine for ANI cutscenes.
//!
//! This crate drives decoded output from [`ani_types`] to the outside
//! world: it owns one background decode thread per active session, paces
//! frames against wall-clock targets derived from the file's frame rate,
//! starts the sound track after the file's audio lead-in, and holds the
//! last frame on screen while queued audio drains.
//!
//! The windowing surface, the audio device, and resource resolution are
//! collaborators behind the traits in [`host`]; the engine never talks to
//! hardware itself.
//!
//! # Example
//!
//! ```no_run
//! use ani_player::{DirectoryProvider, NullSink, Player};
//! # use ani_player::{PlaybackHost, SessionOutcome, VideoInfo};
//!
//! struct PrintHost;
//!
//! impl PlaybackHost for PrintHost {
//! 	fn prepare(&self, info: &VideoInfo) {
//! 		println!("{}x{} @ {} fps", info.width, info.height, info.fps);
//! 	}
//! 	fn present_frame(&self, _rgba: &[u8]) {}
//! 	fn session_ended(&self, outcome: &SessionOutcome) {
//! 		println!("session ended: {outcome:?}");
//! 	}
//! }
//!
//! # fn main() -> std::io::Result<()> {
//! let player = Player::new(DirectoryProvider::new("data"), PrintHost, NullSink);
//! player.set_source("INTRO.ANI");
//! player.start()?;
//! player.stop_and_wait();
//! # Ok(())
//! # }
//! ```

mod cancel;
mod host;
mod pacer;
mod session;

pub use cancel::CancelToken;
pub use host::{
	AudioSink, DirectoryProvider, NullSink, PlaybackHost, PlayerError, SessionOutcome,
	StreamProvider, VideoInfo,
};
pub use pacer::{FrameClock, tail_frames};
pub use session::{Player, SessionState};
