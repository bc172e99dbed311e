//! ANI inspection utility.
//!
//! Provides three subcommands:
//! - `info`: parse and fully decode a single `.ANI` file and print its
//!   header, timing, and stream statistics (optionally as JSON).
//! - `frames`: export every decoded frame as a PNG sequence.
//! - `audio`: export the sound track as a WAV file.

use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use ani_rs::prelude::{AniFile, file::ani::Header};

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(opts) => run_info(opts),
		Command::Frames(opts) => run_frames(opts),
		Command::Audio(opts) => run_audio(opts),
	}
}

#[derive(Parser)]
#[command(name = "ani_utils")]
#[command(author = "ani-rs project")]
#[command(version)]
#[command(about = "Inspect and export cutscene (.ANI) files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Decode a .ANI file and print header and stream statistics
	Info(InfoArgs),
	/// Export decoded frames as a PNG sequence
	Frames(FramesArgs),
	/// Export the sound track as a WAV file
	Audio(AudioArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Path to a single .ANI file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Emit machine-readable JSON instead of text
	#[arg(long, default_value_t = false)]
	json: bool,

	/// Also dump the raw header bytes as hex
	#[arg(long, default_value_t = false)]
	raw: bool,
}

#[derive(Args)]
struct FramesArgs {
	/// Path to a single .ANI file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Output directory for the PNG sequence
	#[arg(short = 'o', long, value_name = "DIR", default_value = "frames_out")]
	out: PathBuf,
}

#[derive(Args)]
struct AudioArgs {
	/// Path to a single .ANI file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Output WAV path
	#[arg(short = 'o', long, value_name = "WAV", default_value = "track.wav")]
	out: PathBuf,
}

fn run_info(args: InfoArgs) -> Result<()> {
	let ani = AniFile::open(&args.file)
		.with_context(|| format!("failed to decode {}", args.file.display()))?;

	if args.json {
		let report = serde_json::json!({
			"header": ani.header(),
			"timing": ani.timing(),
			"frames_decoded": ani.frames().len(),
			"palette_swaps": ani.palette_swaps(),
			"audio_bytes": ani.audio().len(),
			"audio_duration_ms": ani.audio_duration_ms(),
		});
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	println!("{}", ani.header());
	println!(
		"- Timing: {} fps, audio delay {} frames",
		ani.timing().fps,
		ani.timing().audio_delay
	);
	println!("- Frames decoded: {}", ani.frames().len());
	println!("- Palette changes: {}", ani.palette_swaps());
	println!("- Sound track: {} bytes ({} ms)", ani.audio().len(), ani.audio_duration_ms());

	if args.raw {
		let header: &Header = ani.header();
		println!("- Raw header: {}", hex::encode(header.to_bytes()));
	}

	Ok(())
}

fn run_frames(args: FramesArgs) -> Result<()> {
	let ani = AniFile::open(&args.file)
		.with_context(|| format!("failed to decode {}", args.file.display()))?;
	if ani.frames().is_empty() {
		bail!("{} contains no complete frames", args.file.display());
	}

	fs::create_dir_all(&args.out)
		.with_context(|| format!("cannot create {}", args.out.display()))?;

	let width = u32::from(ani.header().width());
	let height = u32::from(ani.header().height());

	for (index, frame) in ani.frames().iter().enumerate() {
		let image = image::RgbaImage::from_raw(width, height, frame.clone())
			.context("frame buffer does not match header geometry")?;
		let path = args.out.join(format!("frame_{index:04}.png"));
		image.save(&path).with_context(|| format!("cannot write {}", path.display()))?;
	}

	log::info!("exported {} frames to {}", ani.frames().len(), args.out.display());
	Ok(())
}

fn run_audio(args: AudioArgs) -> Result<()> {
	let ani = AniFile::open(&args.file)
		.with_context(|| format!("failed to decode {}", args.file.display()))?;
	if ani.audio().is_empty() {
		bail!("{} carries no sound track", args.file.display());
	}

	let out = fs::File::create(&args.out)
		.with_context(|| format!("cannot create {}", args.out.display()))?;
	let mut writer = BufWriter::new(out);
	ani.write_audio_wav(&mut writer)
		.with_context(|| format!("cannot write {}", args.out.display()))?;

	log::info!("exported {} ms of audio to {}", ani.audio_duration_ms(), args.out.display());
	Ok(())
}
