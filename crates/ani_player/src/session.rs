//! Playback session driver.
//!
//! One [`Player`] owns at most one active decode session. A session runs on
//! a dedicated background thread that parses the block stream, feeds the
//! audio sink, and emits pace-gated frames to the host; the caller's thread
//! never blocks except in [`Player::stop_and_wait`].

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use ani_types::file::ani::{Block, FrameAssembler, Header, Stream, Timing};

use crate::cancel::CancelToken;
use crate::host::{AudioSink, PlaybackHost, PlayerError, SessionOutcome, StreamProvider, VideoInfo};
use crate::pacer::{FrameClock, tail_frames};

/// Lifecycle of a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
	/// No session has been started, or the last one was torn down
	Idle,
	/// A decode thread is running
	Playing,
	/// Cancellation is latched but the decode thread has not exited yet
	Stopping,
	/// The decode thread has exited; teardown already ran
	Stopped,
}

struct SessionHandle {
	cancel: Arc<CancelToken>,
	thread: JoinHandle<()>,
}

/// Everything one decode thread needs, captured at `start()`.
struct SessionCtx {
	provider: Arc<dyn StreamProvider>,
	host: Arc<dyn PlaybackHost>,
	sink: Arc<dyn AudioSink>,
	source: String,
	buffered: bool,
	looping: Arc<AtomicBool>,
	tail_fade: Arc<AtomicBool>,
	cancel: Arc<CancelToken>,
}

enum PassEnd {
	Completed,
	Cancelled,
}

/// Drives ANI cutscene playback.
///
/// At most one session is active per player: `start()` stops and joins any
/// previous session before spawning the next, so two decode loops can never
/// run concurrently against the same surface.
pub struct Player {
	provider: Arc<dyn StreamProvider>,
	host: Arc<dyn PlaybackHost>,
	sink: Arc<dyn AudioSink>,
	source: Mutex<String>,
	buffered: AtomicBool,
	looping: Arc<AtomicBool>,
	tail_fade: Arc<AtomicBool>,
	gain: Mutex<f32>,
	muted: AtomicBool,
	session: Mutex<Option<SessionHandle>>,
}

impl Player {
	/// Creates a player wired to its collaborators.
	pub fn new(
		provider: impl StreamProvider + 'static,
		host: impl PlaybackHost + 'static,
		sink: impl AudioSink + 'static,
	) -> Self {
		Self {
			provider: Arc::new(provider),
			host: Arc::new(host),
			sink: Arc::new(sink),
			source: Mutex::new(String::new()),
			buffered: AtomicBool::new(false),
			looping: Arc::new(AtomicBool::new(false)),
			tail_fade: Arc::new(AtomicBool::new(false)),
			gain: Mutex::new(1.0),
			muted: AtomicBool::new(false),
			session: Mutex::new(None),
		}
	}

	/// Sets the source name the next session will ask the provider for.
	pub fn set_source(&self, name: impl Into<String>) {
		*self.source.lock().unwrap_or_else(PoisonError::into_inner) = name.into();
	}

	/// Enables or disables loop mode, observed at the end of each pass.
	pub fn set_looping(&self, looping: bool) {
		self.looping.store(looping, Ordering::SeqCst);
	}

	/// Enables in-memory buffering: the next session reads the whole source
	/// up front instead of streaming from it.
	pub fn set_buffered(&self, buffered: bool) {
		self.buffered.store(buffered, Ordering::SeqCst);
	}

	/// Enables the optional darken-to-black effect on tail frames.
	///
	/// Off by default; tail frame repetition happens either way.
	pub fn set_tail_fade(&self, fade: bool) {
		self.tail_fade.store(fade, Ordering::SeqCst);
	}

	/// Forwards a gain change to the audio sink immediately.
	///
	/// The value is remembered and re-applied when the next session starts.
	pub fn set_gain(&self, gain: f32) {
		let gain = gain.clamp(0.0, 1.0);
		*self.gain.lock().unwrap_or_else(PoisonError::into_inner) = gain;
		self.sink.set_gain(gain);
	}

	/// Forwards a mute toggle to the audio sink immediately.
	pub fn set_muted(&self, muted: bool) {
		self.muted.store(muted, Ordering::SeqCst);
		self.sink.set_muted(muted);
	}

	/// Returns whether a decode thread is currently running.
	pub fn is_active(&self) -> bool {
		matches!(self.state(), SessionState::Playing | SessionState::Stopping)
	}

	/// Returns the current session lifecycle state.
	pub fn state(&self) -> SessionState {
		let guard = self.session.lock().unwrap_or_else(PoisonError::into_inner);
		match guard.as_ref() {
			None => SessionState::Idle,
			Some(handle) if handle.thread.is_finished() => SessionState::Stopped,
			Some(handle) if handle.cancel.is_cancelled() => SessionState::Stopping,
			Some(_) => SessionState::Playing,
		}
	}

	/// Starts playback of the configured source.
	///
	/// If a session is still active it is stopped and joined first; the new
	/// session's first frame can only follow the old session's teardown.
	pub fn start(&self) -> std::io::Result<()> {
		let mut guard = self.session.lock().unwrap_or_else(PoisonError::into_inner);

		if let Some(previous) = guard.take() {
			previous.cancel.cancel();
			if previous.thread.join().is_err() {
				log::warn!("previous playback thread panicked during teardown");
			}
		}

		let cancel = Arc::new(CancelToken::new());
		let ctx = SessionCtx {
			provider: Arc::clone(&self.provider),
			host: Arc::clone(&self.host),
			sink: Arc::clone(&self.sink),
			source: self.source.lock().unwrap_or_else(PoisonError::into_inner).clone(),
			buffered: self.buffered.load(Ordering::SeqCst),
			looping: Arc::clone(&self.looping),
			tail_fade: Arc::clone(&self.tail_fade),
			cancel: Arc::clone(&cancel),
		};

		// a sink recreated between sessions still honors the last settings
		self.sink.set_gain(*self.gain.lock().unwrap_or_else(PoisonError::into_inner));
		self.sink.set_muted(self.muted.load(Ordering::SeqCst));

		let thread = std::thread::Builder::new()
			.name("ani-playback".into())
			.spawn(move || run_session(ctx))?;

		*guard = Some(SessionHandle {
			cancel,
			thread,
		});
		Ok(())
	}

	/// Requests cooperative cancellation of the active session.
	///
	/// Observed at block granularity and at every pacing wait; returns
	/// immediately without waiting for teardown.
	pub fn stop(&self) {
		let guard = self.session.lock().unwrap_or_else(PoisonError::into_inner);
		if let Some(handle) = guard.as_ref() {
			handle.cancel.cancel();
		}
	}

	/// Requests cancellation and blocks until teardown completes.
	pub fn stop_and_wait(&self) {
		let taken = self.session.lock().unwrap_or_else(PoisonError::into_inner).take();
		if let Some(handle) = taken {
			handle.cancel.cancel();
			if handle.thread.join().is_err() {
				log::warn!("playback thread panicked during teardown");
			}
		}
	}
}

impl Drop for Player {
	fn drop(&mut self) {
		self.stop_and_wait();
	}
}

/// Decode thread entry point: runs passes until termination, then reports
/// the single terminal outcome.
fn run_session(ctx: SessionCtx) {
	log::debug!("playback session starting for {:?}", ctx.source);

	let mut first_pass = true;
	let outcome = loop {
		match play_pass(&ctx, first_pass) {
			Ok(PassEnd::Cancelled) => break SessionOutcome::Stopped,
			Ok(PassEnd::Completed) => {
				if ctx.cancel.is_cancelled() {
					break SessionOutcome::Stopped;
				}
				if !ctx.looping.load(Ordering::SeqCst) {
					break SessionOutcome::Finished;
				}
				// loop-repeat: a deliberate restart over a fresh stream,
				// not error recovery
				first_pass = false;
			}
			Err(err) => {
				log::error!("playback of {:?} failed: {err}", ctx.source);
				break SessionOutcome::Failed(err);
			}
		}
	};

	match outcome {
		SessionOutcome::Finished => {
			// natural completion is announced off the decode thread, after
			// the audio sink has already been torn down by the final pass
			let host = Arc::clone(&ctx.host);
			let spawned = std::thread::Builder::new()
				.name("ani-notify".into())
				.spawn(move || host.session_ended(&SessionOutcome::Finished));
			if spawned.is_err() {
				ctx.host.session_ended(&SessionOutcome::Finished);
			}
		}
		other => ctx.host.session_ended(&other),
	}
}

/// Runs one pass over the source. The audio sink is torn down on every exit
/// path before this returns.
fn play_pass(ctx: &SessionCtx, first_pass: bool) -> Result<PassEnd, PlayerError> {
	let end = decode_pass(ctx, first_pass);
	ctx.sink.stop();
	end
}

fn decode_pass(ctx: &SessionCtx, first_pass: bool) -> Result<PassEnd, PlayerError> {
	// the stream is owned by this pass alone and closes on every exit path
	let source = acquire_stream(ctx)?;
	let mut stream = Stream::open(source)?;
	let header: Header = *stream.header();
	let timing: Timing = stream.timing();

	if first_pass {
		ctx.host.prepare(&VideoInfo::new(&header, timing));
		log::info!(
			"{:?}: {}x{}, {} frames, {} fps",
			ctx.source,
			header.width(),
			header.height(),
			header.frames(),
			timing.fps
		);
	}

	let mut assembler = FrameAssembler::new(&header);
	let mut clock = FrameClock::new(timing.fps);
	let mut frames: u64 = 0;
	let mut audio_samples: u64 = 0;
	let mut audio_started = false;
	let mut last_frame: Option<Vec<u8>> = None;

	loop {
		if ctx.cancel.is_cancelled() {
			return Ok(PassEnd::Cancelled);
		}
		hold_while_paused(ctx, &mut clock);

		match stream.next_block() {
			Ok(Block::Palette(palette)) => {
				log::trace!("palette change after {frames} frames");
				assembler.set_palette(palette);
			}
			Ok(Block::Sound(pcm)) => {
				audio_samples += pcm.len() as u64;
				ctx.sink.queue(&pcm);
			}
			Ok(Block::Data(strip)) => {
				if let Some(rgba) = assembler.push_strip(&strip).map_err(PlayerError::Stream)? {
					if clock.pace(frames, &ctx.cancel) {
						return Ok(PassEnd::Cancelled);
					}
					ctx.host.present_frame(&rgba);
					last_frame = Some(rgba);
					frames += 1;
					if !audio_started && frames >= u64::from(timing.audio_delay) {
						ctx.sink.begin();
						audio_started = true;
					}
				}
			}
			Err(e) if e.is_end_of_stream() => break,
			Err(e) => return Err(PlayerError::Stream(e)),
		}
	}

	// a clip shorter than its audio delay still gets its sound track
	if !audio_started && audio_samples > 0 {
		ctx.sink.begin();
	}

	// hold the last frame while the queued sound track drains
	let tail = tail_frames(audio_samples, frames, timing.audio_delay, timing.fps);
	if tail > 0 {
		if let Some(frame) = last_frame {
			log::debug!("holding {tail} tail frames");
			let fade = ctx.tail_fade.load(Ordering::SeqCst);
			for step in 1..=u64::from(tail) {
				if clock.pace(frames, &ctx.cancel) {
					return Ok(PassEnd::Cancelled);
				}
				if fade {
					let faded = darken(&frame, u64::from(tail) - step, u64::from(tail));
					ctx.host.present_frame(&faded);
				} else {
					ctx.host.present_frame(&frame);
				}
				frames += 1;
			}
		}
	}

	Ok(PassEnd::Completed)
}

fn acquire_stream(ctx: &SessionCtx) -> Result<Box<dyn Read + Send>, PlayerError> {
	let resource_err = |source| PlayerError::Resource {
		name: ctx.source.clone(),
		source,
	};

	let mut raw = ctx.provider.open(&ctx.source).map_err(&resource_err)?;
	if !ctx.buffered {
		return Ok(raw);
	}

	let mut buffer = Vec::new();
	raw.read_to_end(&mut buffer).map_err(&resource_err)?;
	Ok(Box::new(std::io::Cursor::new(buffer)))
}

/// Parks the decode thread while the host requests a pause, then excuses
/// the paused span from the frame schedule.
fn hold_while_paused(ctx: &SessionCtx, clock: &mut FrameClock) {
	if !ctx.host.pause_requested() {
		return;
	}

	let paused_at = Instant::now();
	while ctx.host.pause_requested() && !ctx.cancel.is_cancelled() {
		ctx.cancel.wait_until(Instant::now() + Duration::from_millis(10));
	}
	clock.defer(paused_at.elapsed());
}

/// Linearly darkens a frame toward black, leaving alpha untouched.
fn darken(rgba: &[u8], keep: u64, total: u64) -> Vec<u8> {
	rgba.iter()
		.enumerate()
		.map(|(i, &value)| {
			if i % 4 == 3 {
				value
			} else {
				(u64::from(value) * keep / total) as u8
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_darken_scales_color_not_alpha() {
		let frame = [200u8, 100, 50, 255];
		assert_eq!(darken(&frame, 1, 2), vec![100, 50, 25, 255]);
		assert_eq!(darken(&frame, 0, 2), vec![0, 0, 0, 255]);
	}
}
