use {
	crate::{
		error::{Error, Result, BANNER_TRUNCATED, NOT_A_ROM},
		source::ByteSource,
	},
	byteorder::{ByteOrder, LE},
	log::{debug, info},
};

pub const BANNER_LEN: usize = 2112;
pub const TILE_DATA_OFFSET: usize = 32;
pub const TILE_DATA_LEN: usize = 512;
pub const PALETTE_DATA_OFFSET: usize = TILE_DATA_OFFSET + TILE_DATA_LEN;
pub const PALETTE_DATA_LEN: usize = 32;
pub const PALETTE_ENTRIES: usize = PALETTE_DATA_LEN / 2;
pub const TITLES_OFFSET: usize = 0x240;
pub const TITLE_LEN: usize = 0x100;

/// Icon format revisions whose static icon sits at the same place as version 1's.
pub const DEFAULT_ACCEPTED_VERSIONS: [u16; 2] = [1, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
	Japanese,
	English,
	French,
	German,
	Italian,
	Spanish,
}

/// The fixed-size icon/banner block, read whole and immutable afterwards.
pub struct Banner {
	bytes: Box<[u8; BANNER_LEN]>,
}

impl Banner {
	/// Reads the block at `offset` and checks its version tag against `accepted_versions`.
	pub fn load(source: &mut impl ByteSource, offset: u64, accepted_versions: &[u16]) -> Result<Self> {
		if source.check_bounds(offset, BANNER_LEN).is_err() {
			return Err(Error::Format(BANNER_TRUNCATED.into()));
		}
		let mut bytes = Box::new([0; BANNER_LEN]);
		source.read_at(offset, &mut bytes[..])?;
		let banner = Self { bytes };
		let version = banner.version();
		if !accepted_versions.contains(&version) {
			return Err(Error::Format(format!("unsupported icon version: {version}{NOT_A_ROM}")));
		}
		if version == 1 {
			debug!("icon version 1");
		} else {
			info!("icon version {version}, using its static version-1 icon");
		}
		Ok(banner)
	}

	pub fn from_bytes(bytes: [u8; BANNER_LEN]) -> Self {
		Self { bytes: Box::new(bytes) }
	}

	pub fn version(&self) -> u16 {
		LE::read_u16(&self.bytes[..2])
	}

	pub fn tile_data(&self) -> &[u8; TILE_DATA_LEN] {
		self.region(TILE_DATA_OFFSET)
	}

	pub fn palette_data(&self) -> [u16; PALETTE_ENTRIES] {
		let mut palette = [0; PALETTE_ENTRIES];
		LE::read_u16_into(self.region::<PALETTE_DATA_LEN>(PALETTE_DATA_OFFSET), &mut palette);
		palette
	}

	/// UTF-16LE title up to its first NUL; malformed code units become U+FFFD.
	pub fn title(&self, language: Language) -> String {
		let units = &mut [0; TITLE_LEN / 2];
		LE::read_u16_into(self.region::<TITLE_LEN>(TITLES_OFFSET + language as usize * TITLE_LEN), units);
		let end = units.iter().position(|&unit| unit == 0).unwrap_or(units.len());
		String::from_utf16_lossy(&units[..end])
	}

	fn region<const N: usize>(&self, offset: usize) -> &[u8; N] {
		self.bytes[offset..]
			.first_chunk()
			.unwrap_or_else(|| unreachable!("{N} bytes at {offset:#x} overrun the banner"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn block(version: u16) -> [u8; BANNER_LEN] {
		let mut bytes = [0; BANNER_LEN];
		bytes[..2].copy_from_slice(&version.to_le_bytes());
		bytes
	}

	#[test]
	fn loads_version_1() {
		let rom = block(1);
		let banner = Banner::load(&mut rom.as_slice(), 0, &DEFAULT_ACCEPTED_VERSIONS).unwrap();
		assert_eq!(banner.version(), 1);
	}

	#[test]
	fn loads_version_3() {
		let rom = block(3);
		let banner = Banner::load(&mut rom.as_slice(), 0, &DEFAULT_ACCEPTED_VERSIONS).unwrap();
		assert_eq!(banner.version(), 3);
	}

	#[test]
	fn rejects_version_2() {
		let rom = block(2);
		match Banner::load(&mut rom.as_slice(), 0, &DEFAULT_ACCEPTED_VERSIONS) {
			Err(Error::Format(message)) => {
				assert_eq!(message, "unsupported icon version: 2, probably not an NDS ROM");
			}
			other => panic!("{:?}", other.map(|banner| banner.version())),
		}
	}

	#[test]
	fn strict_list_rejects_version_3() {
		let rom = block(3);
		assert!(Banner::load(&mut rom.as_slice(), 0, &[1]).is_err());
	}

	#[test]
	fn short_block_is_truncated() {
		let rom = block(1);
		match Banner::load(&mut &rom[..BANNER_LEN - 1], 0, &[1]) {
			Err(Error::Format(message)) => assert_eq!(message, BANNER_TRUNCATED),
			other => panic!("{:?}", other.map(|banner| banner.version())),
		}
	}

	#[test]
	fn regions_sit_at_fixed_offsets() {
		let mut bytes = block(1);
		bytes[TILE_DATA_OFFSET] = 0xAB;
		bytes[PALETTE_DATA_OFFSET..][..4].copy_from_slice(&[0x34, 0x12, 0xFF, 0x7F]);
		let banner = Banner::from_bytes(bytes);
		assert_eq!(banner.tile_data()[0], 0xAB);
		assert_eq!(banner.palette_data()[..2], [0x1234, 0x7FFF]);
	}

	#[test]
	fn decodes_titles() {
		let mut bytes = block(1);
		let english = TITLES_OFFSET + TITLE_LEN;
		for (i, unit) in "Mario\nNintendo".encode_utf16().enumerate() {
			bytes[english + i * 2..][..2].copy_from_slice(&unit.to_le_bytes());
		}
		let banner = Banner::from_bytes(bytes);
		assert_eq!(banner.title(Language::English), "Mario\nNintendo");
		assert_eq!(banner.title(Language::Japanese), "");
	}
}
