//! Decoding PDF image streams to pixels and re-encoding them as JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Document, Object, Stream};

use crate::error::ImageError;
use crate::model::{ImageEncoding, ImageInfo};

/// Pixel layout of an image's `/ColorSpace`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    Gray,
    Rgb,
    Cmyk,
}

impl ColorModel {
    fn components(self) -> usize {
        match self {
            ColorModel::Gray => 1,
            ColorModel::Rgb => 3,
            ColorModel::Cmyk => 4,
        }
    }
}

/// A decoded image plus what must change in its dictionary when re-encoded.
pub struct DecodedImage {
    pub pixels: DynamicImage,
    /// Colour space to write back; `None` keeps the existing entry
    pub color_space: Option<&'static [u8]>,
}

fn color_model(doc: &Document, obj: &Object) -> Result<ColorModel, ImageError> {
    match obj {
        Object::Name(name) => match name.as_slice() {
            b"DeviceGray" | b"G" => Ok(ColorModel::Gray),
            b"DeviceRGB" | b"RGB" => Ok(ColorModel::Rgb),
            b"DeviceCMYK" | b"CMYK" => Ok(ColorModel::Cmyk),
            other => Err(ImageError::UnsupportedColorSpace(
                String::from_utf8_lossy(other).into_owned(),
            )),
        },
        Object::Reference(id) => color_model(doc, doc.get_object(*id)?),
        Object::Array(parts) => match parts.first() {
            Some(Object::Name(family)) if family == b"ICCBased" => {
                let profile = match parts.get(1) {
                    Some(Object::Reference(id)) => doc.get_object(*id)?.as_stream()?,
                    _ => {
                        return Err(ImageError::UnsupportedColorSpace(
                            "ICCBased without profile".to_string(),
                        ))
                    }
                };
                match profile.dict.get(b"N") {
                    Ok(Object::Integer(1)) => Ok(ColorModel::Gray),
                    Ok(Object::Integer(3)) => Ok(ColorModel::Rgb),
                    _ => Err(ImageError::UnsupportedColorSpace(
                        "ICCBased with unsupported component count".to_string(),
                    )),
                }
            }
            Some(Object::Name(family)) => Err(ImageError::UnsupportedColorSpace(
                String::from_utf8_lossy(family).into_owned(),
            )),
            _ => Err(ImageError::UnsupportedColorSpace("empty array".to_string())),
        },
        _ => Err(ImageError::UnsupportedColorSpace("malformed".to_string())),
    }
}

fn from_raw(
    width: u32,
    height: u32,
    model: ColorModel,
    data: Vec<u8>,
) -> Result<DynamicImage, ImageError> {
    let expected = width as usize * height as usize * model.components();
    if data.len() < expected {
        return Err(ImageError::SizeMismatch {
            got: data.len(),
            expected,
        });
    }

    let mismatch = || ImageError::SizeMismatch {
        got: data.len(),
        expected,
    };
    match model {
        ColorModel::Gray => GrayImage::from_raw(width, height, data[..expected].to_vec())
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(mismatch),
        ColorModel::Rgb => RgbImage::from_raw(width, height, data[..expected].to_vec())
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(mismatch),
        ColorModel::Cmyk => {
            let rgb: Vec<u8> = data[..expected]
                .chunks_exact(4)
                .flat_map(|px| {
                    let k = 255 - px[3] as u32;
                    [
                        ((255 - px[0] as u32) * k / 255) as u8,
                        ((255 - px[1] as u32) * k / 255) as u8,
                        ((255 - px[2] as u32) * k / 255) as u8,
                    ]
                })
                .collect();
            RgbImage::from_raw(width, height, rgb)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(mismatch)
        }
    }
}

/// Decode an image XObject stream into pixels.
///
/// Supports 8-bit raw, Flate and DCT images in gray, RGB, CMYK or
/// ICC-based gray/RGB. Masks, decode arrays and other filters are rejected.
pub fn decode_image(doc: &Document, stream: &Stream) -> Result<DecodedImage, ImageError> {
    let dict = &stream.dict;
    if matches!(dict.get(b"ImageMask"), Ok(Object::Boolean(true))) {
        return Err(ImageError::UnsupportedLayout("stencil mask".to_string()));
    }
    if dict.has(b"Decode") {
        return Err(ImageError::UnsupportedLayout("decode array".to_string()));
    }
    // Colour-key masks need exact pixel values, which JPEG cannot keep
    if matches!(dict.get(b"Mask"), Ok(Object::Array(_))) {
        return Err(ImageError::UnsupportedLayout("colour-key mask".to_string()));
    }
    match dict.get(b"BitsPerComponent") {
        Ok(Object::Integer(8)) => {}
        Ok(Object::Integer(bits)) => {
            return Err(ImageError::UnsupportedLayout(format!(
                "{} bits per component",
                bits
            )))
        }
        _ => return Err(ImageError::UnsupportedLayout("missing bit depth".to_string())),
    }

    let model = match dict.get(b"ColorSpace") {
        Ok(obj) => color_model(doc, obj)?,
        Err(_) => return Err(ImageError::UnsupportedColorSpace("missing".to_string())),
    };

    let info = ImageInfo::from_stream(stream);
    if info.width == 0 || info.height == 0 {
        return Err(ImageError::UnsupportedLayout("missing dimensions".to_string()));
    }

    let pixels = match info.encoding {
        ImageEncoding::Raw => from_raw(info.width, info.height, model, stream.content.clone())?,
        ImageEncoding::Flate => {
            from_raw(info.width, info.height, model, stream.decompressed_content()?)?
        }
        ImageEncoding::Jpeg => {
            if model == ColorModel::Cmyk {
                return Err(ImageError::UnsupportedColorSpace("CMYK JPEG".to_string()));
            }
            image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg)?
        }
        ImageEncoding::Other(filter) => return Err(ImageError::UnsupportedFilter(filter)),
    };

    let color_space: Option<&'static [u8]> = match model {
        ColorModel::Cmyk => Some(b"DeviceRGB"),
        _ => None,
    };
    Ok(DecodedImage {
        pixels,
        color_space,
    })
}

/// Encode pixels as a baseline JPEG at `quality` (1-100).
pub fn encode_jpeg(pixels: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    match pixels {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => {
            pixels.write_with_encoder(encoder)?
        }
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA8(_) => {
            DynamicImage::ImageLuma8(pixels.to_luma8()).write_with_encoder(encoder)?
        }
        _ => DynamicImage::ImageRgb8(pixels.to_rgb8()).write_with_encoder(encoder)?,
    }
    Ok(out)
}
