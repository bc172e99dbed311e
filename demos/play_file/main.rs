//! Headless playback walkthrough.
//!
//! Drives a real playback session against a directory-backed provider: the
//! host logs paced frame arrivals instead of blitting them, which makes the
//! session lifecycle (prepare, frames, audio begin, terminal outcome)
//! observable from a terminal.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ani_rs::prelude::{
	DirectoryProvider, NullSink, PlaybackHost, Player, SessionOutcome, VideoInfo,
};

#[derive(Parser)]
#[command(name = "play_file")]
#[command(author = "ani-rs project")]
#[command(version)]
#[command(about = "Play a .ANI file headlessly, logging the session", long_about = None)]
struct Cli {
	/// Path to a single .ANI file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Repeat the clip until interrupted
	#[arg(long = "loop", default_value_t = false)]
	looping: bool,

	/// Read the whole file into memory before decoding
	#[arg(long, default_value_t = false)]
	buffered: bool,

	/// Stop automatically after this many seconds (0 = play to the end)
	#[arg(long, value_name = "SECS", default_value_t = 0)]
	limit: u64,
}

struct LogHost {
	frames: AtomicU64,
	done: Arc<AtomicBool>,
}

impl PlaybackHost for LogHost {
	fn prepare(&self, info: &VideoInfo) {
		log::info!(
			"clip: {}x{}, {} frames declared, {} fps, audio delay {} frames",
			info.width,
			info.height,
			info.frame_count,
			info.fps,
			info.audio_delay
		);
	}

	fn present_frame(&self, _rgba: &[u8]) {
		let n = self.frames.fetch_add(1, Ordering::SeqCst) + 1;
		if n % 25 == 0 {
			log::info!("{n} frames presented");
		}
	}

	fn session_ended(&self, outcome: &SessionOutcome) {
		match outcome {
			SessionOutcome::Finished => log::info!("session finished"),
			SessionOutcome::Stopped => log::info!("session stopped"),
			SessionOutcome::Failed(err) => log::error!("session failed: {err}"),
		}
		self.done.store(true, Ordering::SeqCst);
	}
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	if !cli.file.is_file() {
		bail!("{} is not a file", cli.file.display());
	}
	let dir = cli.file.parent().context("file has no parent directory")?.to_path_buf();
	let name = cli
		.file
		.file_name()
		.context("file has no name")?
		.to_string_lossy()
		.into_owned();

	let done = Arc::new(AtomicBool::new(false));
	let host = LogHost {
		frames: AtomicU64::new(0),
		done: Arc::clone(&done),
	};

	let player = Player::new(DirectoryProvider::new(dir), host, NullSink);
	player.set_source(name);
	player.set_looping(cli.looping);
	player.set_buffered(cli.buffered);
	player.start().context("cannot spawn playback session")?;

	let deadline = (cli.limit > 0).then(|| std::time::Instant::now() + Duration::from_secs(cli.limit));
	while !done.load(Ordering::SeqCst) {
		if deadline.is_some_and(|d| std::time::Instant::now() >= d) {
			log::info!("time limit reached, stopping");
			player.stop_and_wait();
			break;
		}
		std::thread::sleep(Duration::from_millis(50));
	}

	Ok(())
}
