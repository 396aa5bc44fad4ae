use {
	crate::banner::{Banner, PALETTE_ENTRIES, TILE_DATA_LEN},
	array_macro::array,
};

pub const ICON_SIZE: usize = 32;
pub const TILE_SIZE: usize = 8;
pub const TILES_PER_ROW: usize = ICON_SIZE / TILE_SIZE;
/// Two 4-bit pixels per byte.
pub const TILE_BYTES: usize = TILE_SIZE * TILE_SIZE / 2;
pub const RGBA_SIZE: usize = 4;

pub type Rgba = [u8; RGBA_SIZE];
pub type Palette = [Rgba; PALETTE_ENTRIES];

pub const FULLY_TRANSPARENT: u8 = u8::MIN;
pub const FULLY_OPAQUE: u8 = u8::MAX;

/// Expands one BGR555 entry. Index 0 is the transparent colour whatever its bits say.
pub fn decode_color(raw: u16, index: usize) -> Rgba {
	[
		((raw & 0x001F) << 3) as _,
		((raw & 0x03E0) >> 2) as _,
		((raw & 0x7C00) >> 7) as _,
		if index == 0 { FULLY_TRANSPARENT } else { FULLY_OPAQUE },
	]
}

pub fn decode_palette(raw: &[u16; PALETTE_ENTRIES]) -> Palette {
	array![i => decode_color(raw[i], i); PALETTE_ENTRIES]
}

/// The 32x32 RGBA raster. Every pixel is one of its palette's entries.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Icon {
	pixels: [Rgba; ICON_SIZE * ICON_SIZE],
}

impl Icon {
	pub fn from_banner(banner: &Banner) -> Self {
		Self::decode(banner.tile_data(), &decode_palette(&banner.palette_data()))
	}

	/*
		4x4 tiles of 8x8 pixels, tiles in row-major order, pixels within a tile
		row-major too. Each byte holds two horizontally adjacent pixels: low
		nibble on the left, high nibble on the right.
	*/
	pub fn decode(tiles: &[u8; TILE_DATA_LEN], palette: &Palette) -> Self {
		let mut pixels = [[FULLY_TRANSPARENT; RGBA_SIZE]; ICON_SIZE * ICON_SIZE];
		for (tile, tile_bytes) in tiles.chunks_exact(TILE_BYTES).enumerate() {
			let (x0, y0) = (tile % TILES_PER_ROW * TILE_SIZE, tile / TILES_PER_ROW * TILE_SIZE);
			for (y, row) in tile_bytes.chunks_exact(TILE_SIZE / 2).enumerate() {
				for (x, &pair) in row.iter().enumerate() {
					let at = (y0 + y) * ICON_SIZE + x0 + x * 2;
					pixels[at] = palette[usize::from(pair & 0x0F)];
					pixels[at + 1] = palette[usize::from(pair >> 4)];
				}
			}
		}
		Self { pixels }
	}

	pub fn pixel(&self, x: usize, y: usize) -> Rgba {
		self.pixels[y * ICON_SIZE + x]
	}

	pub fn pixels(&self) -> &[Rgba] {
		&self.pixels
	}

	pub fn to_rgba_bytes(&self) -> Vec<u8> {
		self.pixels.concat()
	}
}

#[cfg(test)]
mod tests {
	use {super::*, rand::Rng};

	fn gray_ramp() -> Palette {
		decode_palette(&array![i => (i as u16) * 0x0421; PALETTE_ENTRIES])
	}

	#[test]
	fn index_zero_is_transparent() {
		assert_eq!(decode_color(0x0000, 0), [0, 0, 0, 0]);
		assert_eq!(decode_color(0x0000, 5), [0, 0, 0, 255]);
		assert_eq!(decode_color(0x7FFF, 0)[3], FULLY_TRANSPARENT);
	}

	#[test]
	fn channels_expand_to_eight_bits() {
		assert_eq!(decode_color(0x7FFF, 1), [248, 248, 248, 255]);
		assert_eq!(decode_color(0x001F, 1), [248, 0, 0, 255]);
		assert_eq!(decode_color(0x03E0, 1), [0, 248, 0, 255]);
		assert_eq!(decode_color(0x7C00, 1), [0, 0, 248, 255]);
		// bit 15 is unused
		assert_eq!(decode_color(0x8001, 2), [8, 0, 0, 255]);
	}

	#[test]
	fn tiles_land_in_row_major_order() {
		let palette = gray_ramp();
		let tiles = &mut [0; TILE_DATA_LEN];
		tiles[0] = 0x21;
		tiles[1] = 0x43;
		tiles[4] = 0x65;
		tiles[TILE_BYTES] = 0x87;
		tiles[TILES_PER_ROW * TILE_BYTES] = 0xA9;
		tiles[TILE_DATA_LEN - 1] = 0xCB;
		let icon = Icon::decode(tiles, &palette);
		for (x, y, index) in [
			(0, 0, 1),
			(1, 0, 2),
			(2, 0, 3),
			(3, 0, 4),
			(0, 1, 5),
			(1, 1, 6),
			(8, 0, 7),
			(9, 0, 8),
			(0, 8, 9),
			(1, 8, 10),
			(30, 31, 11),
			(31, 31, 12),
		] {
			assert_eq!(icon.pixel(x, y), palette[index], "pixel ({x}, {y})");
		}
		assert_eq!(icon.pixel(4, 0), palette[0]);
	}

	#[test]
	fn each_tile_fills_its_own_square() {
		let palette = gray_ramp();
		let tiles = &mut [0; TILE_DATA_LEN];
		for (tile, bytes) in tiles.chunks_exact_mut(TILE_BYTES).enumerate() {
			bytes.fill(tile as u8 * 0x11);
		}
		let icon = Icon::decode(tiles, &palette);
		for y in 0..ICON_SIZE {
			for x in 0..ICON_SIZE {
				assert_eq!(icon.pixel(x, y), palette[y / TILE_SIZE * TILES_PER_ROW + x / TILE_SIZE]);
			}
		}
	}

	#[test]
	fn every_pixel_is_written() {
		let mut raw = [0; PALETTE_ENTRIES];
		raw[1] = 0x7FFF;
		let icon = Icon::decode(&[0x11; TILE_DATA_LEN], &decode_palette(&raw));
		assert_eq!(icon.pixels().len(), ICON_SIZE * ICON_SIZE);
		assert!(icon.pixels().iter().all(|&pixel| pixel == [248, 248, 248, 255]));
	}

	#[test]
	fn decoding_is_deterministic_and_stays_in_palette() {
		let rng = &mut rand::thread_rng();
		let tiles = &mut [0; TILE_DATA_LEN];
		rng.fill(&mut tiles[..]);
		let palette = decode_palette(&core::array::from_fn(|_| rng.gen()));
		let icon = Icon::decode(tiles, &palette);
		assert_eq!(icon, Icon::decode(tiles, &palette));
		assert!(icon.pixels().iter().all(|pixel| palette.contains(pixel)));
		assert_eq!(icon.to_rgba_bytes().len(), ICON_SIZE * ICON_SIZE * RGBA_SIZE);
	}
}
