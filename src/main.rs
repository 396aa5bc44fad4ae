#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]

use {
	clap::Parser,
	nds_thumbnailer::{run, Config, Result},
	std::{num::NonZeroU32, path::PathBuf, process::ExitCode},
};

/// Thumbnail Nintendo DS ROMs
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
	/// NDS ROM to take the icon from
	input: PathBuf,
	/// PNG file to write the thumbnail to
	output: PathBuf,
	/// Size of the thumbnail in pixels [default: 64]
	#[clap(short, long)]
	size: Option<NonZeroU32>,
	/// Make all warnings fatal
	#[clap(long, alias = "g-fatal-warnings")]
	fatal_warnings: bool,
	/// TOML file supplying defaults for the options above
	#[clap(short, long)]
	config: Option<PathBuf>,
}

impl Args {
	fn config(&self) -> Result<Config> {
		let mut config = match &self.config {
			Some(path) => Config::load(path)?,
			None => Config::default(),
		};
		if let Some(size) = self.size {
			config.size = size;
		}
		config.fatal_warnings |= self.fatal_warnings;
		Ok(config)
	}
}

/// `--help` and `--version` come back as errors too; only real usage errors fail.
fn usage_status(err: &clap::Error) -> u8 {
	u8::from(err.use_stderr())
}

/// Reports the one fatal diagnostic regardless of the log filter.
fn run_status(result: &Result<()>) -> u8 {
	match result {
		Ok(()) => 0,
		Err(err) => {
			eprintln!("nds_thumbnailer: {err}");
			1
		}
	}
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(err) => {
			_ = err.print();
			return ExitCode::from(usage_status(&err));
		}
	};
	ExitCode::from(run_status(&args.config().and_then(|config| run(&config, &args.input, &args.output))))
}
