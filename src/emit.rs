use {
	crate::{
		error::{Error, Result},
		icon::{Icon, ICON_SIZE},
	},
	image::{imageops, imageops::FilterType, Rgba, Rgba32FImage, RgbaImage},
	log::info,
	png::{BitDepth, ColorType},
	std::{
		io::{self, BufWriter, Write},
		num::NonZeroU32,
		path::Path,
	},
	tempfile::NamedTempFile,
};

pub const DEFAULT_SIZE: u32 = 64;

/// Normalized, alpha-premultiplied copy of the icon. Transparent pixels become all zero,
/// so whatever colour palette entry 0 carries never reaches a filter tap.
pub fn premultiplied(icon: &Icon) -> Rgba32FImage {
	Rgba32FImage::from_fn(ICON_SIZE as _, ICON_SIZE as _, |x, y| {
		let [r, g, b, a] = icon.pixel(x as _, y as _).map(|channel| f32::from(channel) / 255.0);
		Rgba([r * a, g * a, b * a, a])
	})
}

fn unpremultiplied(image: &Rgba32FImage) -> RgbaImage {
	fn quantize(value: f32) -> u8 {
		(value * 255.0).round().clamp(0.0, 255.0) as _
	}
	RgbaImage::from_fn(image.width(), image.height(), |x, y| {
		let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
		match quantize(a) {
			0 => Rgba([0; 4]),
			alpha => Rgba([quantize(r / a), quantize(g / a), quantize(b / a), alpha]),
		}
	})
}

/// Bilinear resample to `size`x`size`, filtering in premultiplied alpha.
pub fn scale(icon: &Icon, size: NonZeroU32) -> RgbaImage {
	unpremultiplied(&imageops::resize(&premultiplied(icon), size.get(), size.get(), FilterType::Triangle))
}

pub fn encode_png(writer: impl Write, image: &RgbaImage) -> std::result::Result<(), png::EncodingError> {
	let mut encoder = png::Encoder::new(writer, image.width(), image.height());
	encoder.set_color(ColorType::Rgba);
	encoder.set_depth(BitDepth::Eight);
	let mut writer = encoder.write_header()?;
	writer.write_image_data(image.as_raw())?;
	writer.finish()
}

/// Writes `image` as PNG next to `path` and renames it into place, so `path`
/// either holds a complete PNG or is left as it was.
pub fn write_png(path: &Path, image: &RgbaImage) -> Result<()> {
	let directory = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let mut file = NamedTempFile::new_in(directory).map_err(Error::io(path))?;
	{
		let mut out = BufWriter::new(file.as_file_mut());
		encode_png(&mut out, image).map_err(io::Error::from).map_err(Error::io(path))?;
		out.flush().map_err(Error::io(path))?;
	}
	file.persist(path).map_err(|error| Error::io(path)(error.error))?;
	info!("wrote {}x{} thumbnail to {}", image.width(), image.height(), path.display());
	Ok(())
}
