use {
	crate::error::{Error, OutOfBounds, Result, CANNOT_READ_LOGO_OFFSET, NOT_A_ROM},
	byteorder::{ByteOrder, LE},
	log::debug,
	std::{
		fs::File,
		io::{Read, Seek, SeekFrom},
		path::{Path, PathBuf},
	},
};

/// Header field holding the absolute file offset of the icon/banner block.
pub const LOGO_OFFSET_FIELD: u64 = 0x068;

/// Random-access view of a ROM. Implementations must never read outside `[0, len)`.
pub trait ByteSource {
	fn len(&self) -> u64;

	/// Fills `buffer` with the bytes starting at `offset`, or fails without reading anything.
	fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<()>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn check_bounds(&self, offset: u64, count: usize) -> std::result::Result<(), OutOfBounds> {
		let len = self.len();
		match offset.checked_add(count as u64) {
			Some(end) if end <= len => Ok(()),
			_ => Err(OutOfBounds { offset, count, len }),
		}
	}
}

impl ByteSource for &[u8] {
	fn len(&self) -> u64 {
		<[u8]>::len(self) as _
	}

	fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<()> {
		self.check_bounds(offset, buffer.len())?;
		let start = offset as usize;
		buffer.copy_from_slice(&self[start..][..buffer.len()]);
		Ok(())
	}
}

impl ByteSource for Vec<u8> {
	fn len(&self) -> u64 {
		Vec::len(self) as _
	}

	fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<()> {
		self.as_slice().read_at(offset, buffer)
	}
}

/// A ROM on disk, addressed by seeking. Dropping it closes the file.
pub struct FileSource {
	path: PathBuf,
	file: File,
	len: u64,
}

impl FileSource {
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let file = File::open(path).map_err(Error::io(path))?;
		let len = file.metadata().map_err(Error::io(path))?.len();
		debug!("opened {} ({len} bytes)", path.display());
		Ok(Self { path: path.to_owned(), file, len })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ByteSource for FileSource {
	fn len(&self) -> u64 {
		self.len
	}

	fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<()> {
		self.check_bounds(offset, buffer.len())?;
		self.file.seek(SeekFrom::Start(offset)).map_err(Error::io(&self.path))?;
		self.file.read_exact(buffer).map_err(Error::io(&self.path))
	}
}

/// Follows the logo offset field to the absolute offset of the banner block.
pub fn resolve_banner_offset(source: &mut impl ByteSource) -> Result<u64> {
	if source.check_bounds(LOGO_OFFSET_FIELD, 4).is_err() {
		return Err(Error::Format(CANNOT_READ_LOGO_OFFSET.into()));
	}
	let field = &mut [0; 4];
	source.read_at(LOGO_OFFSET_FIELD, field)?;
	let offset = u64::from(LE::read_u32(field));
	if offset >= source.len() {
		return Err(Error::Format(format!("offset out of bounds: {offset:#x}{NOT_A_ROM}")));
	}
	debug!("banner block at {offset:#x}");
	Ok(offset)
}
