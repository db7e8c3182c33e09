use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use conv15to42s::{decode, translate, Detect, Error, Tables};

/// Convert an HP-15C program listing into an HP-42S program listing.
///
/// The output is meant for txt2raw (or the DM42 decoder). Lines starting with
/// '##' mark steps that need manual translation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Listing exported by the HP-15C emulator (UTF-16, UTF-8 or ISO-8859-1)
	file: PathBuf,

	/// Write the HP-42S listing here instead of stdout
	#[arg(short, long, value_name = "FILE")]
	output: Option<PathBuf>,

	/// More log output on stderr; repeat for more detail (RUST_LOG overrides)
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,

	/// Fail if any step could not be translated
	#[arg(long)]
	strict: bool,
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	};
	let filter = EnvFilter::builder()
		.with_default_directive(level.into())
		.from_env_lossy();
	tracing_subscriber::fmt()
		.compact()
		.without_time()
		.with_writer(io::stderr)
		.with_env_filter(filter)
		.init();
}

fn main() -> miette::Result<()> {
	let args = Args::parse();
	init_logging(args.verbose);

	let tables = Tables::load()?;
	let text = decode::read_listing(&args.file, &Detect)?;

	let stats = match &args.output {
		Some(path) => {
			let file = File::create(path).map_err(|e| Error::Io(path.clone(), e))?;
			translate(&text, &tables, BufWriter::new(file)).map_err(|e| Error::Io(path.clone(), e))?
		}
		None => translate(&text, &tables, io::stdout().lock()).map_err(|e| Error::Io("<stdout>".into(), e))?,
	};

	if args.strict && stats.unmapped > 0 {
		return Err(Error::Unmapped(stats.unmapped).into());
	}
	Ok(())
}
