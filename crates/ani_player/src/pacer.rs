//! Frame pacing and audio lead/tail arithmetic.

use std::time::{Duration, Instant};

use ani_types::file::SAMPLE_RATE;

use crate::cancel::CancelToken;

/// Wall-clock scheduler for frame delivery.
///
/// Every frame's target is computed from its ordinal and the session start
/// instant, never from the previous frame's actual delivery time, so jitter
/// in block decoding cannot accumulate into drift.
pub struct FrameClock {
	origin: Instant,
	fps: f64,
}

impl FrameClock {
	/// Starts a clock at the current instant.
	pub fn new(fps: f64) -> Self {
		Self {
			origin: Instant::now(),
			fps,
		}
	}

	/// Returns frame `n`'s target offset from the session start.
	pub fn target(&self, frame: u64) -> Duration {
		Duration::from_secs_f64(frame as f64 / self.fps)
	}

	/// Returns frame `n`'s absolute deadline.
	pub fn deadline(&self, frame: u64) -> Instant {
		self.origin + self.target(frame)
	}

	/// Blocks until frame `n`'s deadline or cancellation.
	///
	/// Returns `true` if the session was cancelled during the wait. A frame
	/// that is already late is released immediately.
	pub fn pace(&self, frame: u64, cancel: &CancelToken) -> bool {
		cancel.wait_until(self.deadline(frame))
	}

	/// Shifts the origin forward, excusing a pause from the schedule.
	///
	/// Without this a resumed session would burst-deliver every frame whose
	/// target passed while paused.
	pub fn defer(&mut self, by: Duration) {
		self.origin += by;
	}
}

/// Computes how many extra video frames to hold after the block stream
/// ends, so trailing queued audio finishes under a live picture.
///
/// `audio_samples` counts decoded PCM samples; `frames_decoded` and
/// `audio_delay` are in frames. A sound track shorter than the video yields
/// zero, never a negative hold.
pub fn tail_frames(audio_samples: u64, frames_decoded: u64, audio_delay: u32, fps: f64) -> u32 {
	let audio_secs = audio_samples as f64 / f64::from(SAMPLE_RATE);
	let video_secs = (frames_decoded as f64 - f64::from(audio_delay)) / fps;
	let excess = ((audio_secs - video_secs) * fps).floor();
	if excess > 0.0 { excess as u32 } else { 0 }
}
