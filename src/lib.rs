#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]

pub mod banner;
pub mod config;
pub mod emit;
pub mod error;
pub mod icon;
pub mod source;

pub use {
	banner::{Banner, Language},
	config::Config,
	error::{Error, Result},
	icon::Icon,
	source::{resolve_banner_offset, ByteSource, FileSource},
};

use {
	error::NOT_A_ROM,
	log::info,
	std::path::Path,
};

/// Reads the banner out of any byte source and decodes its icon.
pub fn extract_icon(source: &mut impl ByteSource, config: &Config) -> Result<Icon> {
	let offset = resolve_banner_offset(source)?;
	if offset == 0 {
		config.warnings().warn(format!("ROM declares no banner{NOT_A_ROM}"))?;
	}
	let banner = Banner::load(source, offset, &config.accepted_versions)?;
	let title = banner.title(Language::English);
	if !title.is_empty() {
		info!("icon of {:?}", title.replace('\n', " / "));
	}
	Ok(Icon::from_banner(&banner))
}

/// Thumbnails the ROM at `input` into a `config.size` square PNG at `output`.
pub fn run(config: &Config, input: &Path, output: &Path) -> Result<()> {
	config.validate()?;
	let icon = {
		let source = &mut FileSource::open(input)?;
		info!("reading {} for a {}px thumbnail", source.path().display(), config.size);
		extract_icon(source, config)?
	};
	emit::write_png(output, &emit::scale(&icon, config.size))
}
