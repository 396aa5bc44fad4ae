use {
	const_format::concatcp,
	log::warn,
	std::{io, path::PathBuf},
	thiserror::Error,
};

/// Appended to every format diagnostic; a non-ROM input is by far the usual cause.
pub const NOT_A_ROM: &str = ", probably not an NDS ROM";

pub const CANNOT_READ_LOGO_OFFSET: &str = concatcp!("cannot read logo offset", NOT_A_ROM);
pub const BANNER_TRUNCATED: &str = concatcp!("banner truncated", NOT_A_ROM);

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	#[error("usage error: {0}")]
	Usage(String),

	#[error("{0}")]
	Format(String),

	#[error("{}: {source}", .path.display())]
	Io { path: PathBuf, source: io::Error },

	#[error("{}: {source}", .path.display())]
	Config { path: PathBuf, source: toml::de::Error },

	#[error("warning treated as fatal: {0}")]
	FatalWarning(String),
}

impl Error {
	pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { path, source }
	}
}

/// A read landed outside `[0, len)` of its byte source.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("read of {count} bytes at {offset:#x} exceeds source length {len:#x}")]
pub struct OutOfBounds {
	pub offset: u64,
	pub count: usize,
	pub len: u64,
}

impl From<OutOfBounds> for Error {
	fn from(error: OutOfBounds) -> Self {
		Self::Format(format!("{error}{NOT_A_ROM}"))
	}
}

/// Soft-failure channel. With `fatal` set, the first warning aborts the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Warnings {
	pub fatal: bool,
}

impl Warnings {
	pub fn warn(self, message: impl Into<String>) -> Result<()> {
		let message = message.into();
		warn!("{message}");
		if self.fatal {
			return Err(Error::FatalWarning(message));
		}
		Ok(())
	}
}
