use crate::error::IconError;
use mono_silhouette::RasterImage;
use std::io::Cursor;
use std::path::Path;

/// Decode any 8-bit or 16-bit PNG into a straight-alpha raster.
///
/// Palette and low-bit-depth images are expanded, 16-bit channels are
/// stripped to 8 bits, and missing alpha becomes opaque.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage, IconError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IconError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IconError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[0], c[0], c[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(IconError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    RasterImage::from_rgba_bytes(info.width, info.height, &rgba)
        .map_err(|e| IconError::PngDecode(e.to_string()))
}

/// Encode a raster as an RGBA8 PNG, optionally re-compressed with oxipng.
pub fn encode_png(image: &RasterImage, optimize: bool) -> Result<Vec<u8>, IconError> {
    if image.is_empty() {
        return Err(IconError::InvalidImage {
            width: image.width(),
            height: image.height(),
        });
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| IconError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&image.to_rgba_bytes())
            .map_err(|e| IconError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            ..Default::default()
        },
    ) {
        Ok(optimized) => Ok(optimized),
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}

pub fn read_png(path: &Path) -> Result<RasterImage, IconError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

pub fn write_png(path: &Path, image: &RasterImage, optimize: bool) -> Result<(), IconError> {
    let bytes = encode_png(image, optimize)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
