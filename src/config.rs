use {
	crate::{
		banner::DEFAULT_ACCEPTED_VERSIONS,
		emit::DEFAULT_SIZE,
		error::{Error, Result, Warnings},
	},
	serde::Deserialize,
	std::{fs, num::NonZeroU32, path::Path},
};

/// Everything a run needs to know besides its input and output paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
	pub size: NonZeroU32,
	pub fatal_warnings: bool,
	pub accepted_versions: Vec<u16>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			size: NonZeroU32::new(DEFAULT_SIZE).unwrap_or(NonZeroU32::MIN),
			fatal_warnings: false,
			accepted_versions: DEFAULT_ACCEPTED_VERSIONS.to_vec(),
		}
	}
}

impl Config {
	pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
		toml::from_str(text)
	}

	pub fn load(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path).map_err(Error::io(path))?;
		Self::from_toml(&text).map_err(|source| Error::Config { path: path.to_owned(), source })
	}

	pub fn validate(&self) -> Result<()> {
		if self.accepted_versions.is_empty() {
			return Err(Error::Usage("no icon versions are accepted".into()));
		}
		Ok(())
	}

	pub fn warnings(&self) -> Warnings {
		Warnings { fatal: self.fatal_warnings }
	}
}
