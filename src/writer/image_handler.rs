//! Logo images for the listing.
//!
//! Images are embedded as Image XObjects (ISO 32000-1 Section 8.9).
//!
//! # Supported Formats
//!
//! - **JPEG**: Pass-through embedding using DCTDecode filter
//! - **PNG**: Decoded and re-compressed with FlateDecode; an alpha channel
//!   becomes a DeviceGray soft mask

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crate::object::Object;

/// Image format for PDF embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image (DCTDecode filter)
    Jpeg,
    /// Decoded pixels, Flate-compressed
    Flate,
    /// Raw uncompressed image data
    Raw,
}

/// Color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRGB,
    /// CMYK color (4 components per pixel)
    DeviceCMYK,
}

impl ColorSpace {
    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

/// Image embedding error.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Neither JPEG nor PNG
    #[error("Unsupported image format")]
    UnsupportedFormat,

    /// Failed to decode image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),

    /// Reading or compressing failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Image data for PDF embedding.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per component (usually 8)
    pub bits_per_component: u8,
    /// Color space
    pub color_space: ColorSpace,
    /// Image format
    pub format: ImageFormat,
    /// Raw or encoded image data
    pub data: Vec<u8>,
    /// Flate-compressed alpha channel
    pub soft_mask: Option<Vec<u8>>,
}

impl ImageData {
    /// Create new image data.
    pub fn new(width: u32, height: u32, color_space: ColorSpace, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bits_per_component: 8,
            color_space,
            format: ImageFormat::Raw,
            data,
            soft_mask: None,
        }
    }

    /// Load a JPEG image from raw JPEG data.
    ///
    /// JPEG images can be embedded directly without transcoding.
    pub fn from_jpeg(data: Vec<u8>) -> Result<Self, ImageError> {
        let (width, height, color_space) = parse_jpeg_header(&data)?;

        Ok(Self {
            width,
            height,
            bits_per_component: 8,
            color_space,
            format: ImageFormat::Jpeg,
            data,
            soft_mask: None,
        })
    }

    /// Load a PNG image from raw PNG data.
    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        use image::GenericImageView;

        let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::DecodeError(e.to_string()))?;

        let (width, height) = img.dimensions();
        let pixel_count = (width * height) as usize;

        let (color_space, pixels, alpha) = match img.color() {
            image::ColorType::L8 | image::ColorType::L16 => {
                (ColorSpace::DeviceGray, img.to_luma8().into_raw(), None)
            },
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = img.to_luma_alpha8();
                let mut gray = Vec::with_capacity(pixel_count);
                let mut alpha = Vec::with_capacity(pixel_count);
                for pixel in la.pixels() {
                    gray.push(pixel.0[0]);
                    alpha.push(pixel.0[1]);
                }
                (ColorSpace::DeviceGray, gray, Some(alpha))
            },
            image::ColorType::Rgba8 | image::ColorType::Rgba16 => {
                let rgba = img.to_rgba8();
                let mut rgb = Vec::with_capacity(pixel_count * 3);
                let mut alpha = Vec::with_capacity(pixel_count);
                for pixel in rgba.pixels() {
                    rgb.extend_from_slice(&pixel.0[..3]);
                    alpha.push(pixel.0[3]);
                }
                (ColorSpace::DeviceRGB, rgb, Some(alpha))
            },
            _ => (ColorSpace::DeviceRGB, img.to_rgb8().into_raw(), None),
        };

        // A fully opaque alpha channel adds nothing
        let alpha = alpha.filter(|a| a.iter().any(|&v| v != 0xFF));

        Ok(Self {
            width,
            height,
            bits_per_component: 8,
            color_space,
            format: ImageFormat::Flate,
            data: compress_image_data(&pixels)?,
            soft_mask: alpha.map(|a| compress_image_data(&a)).transpose()?,
        })
    }

    /// Load an image from raw bytes, auto-detecting format.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        if data.starts_with(&[0xFF, 0xD8]) {
            return Self::from_jpeg(data.to_vec());
        }

        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Self::from_png(data);
        }

        Err(ImageError::UnsupportedFormat)
    }

    /// Load an image from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Build the PDF Image XObject dictionary. `/Length` is added on output.
    pub fn build_xobject_dict(&self) -> HashMap<String, Object> {
        let mut dict = image_dict(self.width, self.height, self.color_space, self.bits_per_component);

        match self.format {
            ImageFormat::Jpeg => {
                dict.insert("Filter".to_string(), Object::Name("DCTDecode".to_string()));
            },
            ImageFormat::Flate => {
                dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
            },
            ImageFormat::Raw => {},
        }

        dict
    }

    /// Build a soft mask (alpha channel) XObject dictionary.
    pub fn build_soft_mask_dict(&self) -> Option<HashMap<String, Object>> {
        self.soft_mask.as_ref().map(|_| {
            let mut dict = image_dict(self.width, self.height, ColorSpace::DeviceGray, 8);
            dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
            dict
        })
    }

    /// Get the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Height for a given display width, keeping the aspect ratio.
    pub fn height_for_width(&self, width: f32) -> f32 {
        width / self.aspect_ratio()
    }
}

fn image_dict(width: u32, height: u32, color_space: ColorSpace, bpc: u8) -> HashMap<String, Object> {
    let mut dict = HashMap::new();
    dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
    dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
    dict.insert("Width".to_string(), Object::Integer(width as i64));
    dict.insert("Height".to_string(), Object::Integer(height as i64));
    dict.insert("ColorSpace".to_string(), Object::Name(color_space.pdf_name().to_string()));
    dict.insert("BitsPerComponent".to_string(), Object::Integer(bpc as i64));
    dict
}

/// Parse JPEG header to extract dimensions and color space.
fn parse_jpeg_header(data: &[u8]) -> Result<(u32, u32, ColorSpace), ImageError> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return Err(ImageError::InvalidData("Not a valid JPEG".to_string()));
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        pos += 2;

        if marker == 0xFF || marker == 0x00 {
            continue;
        }

        // Start of Frame markers (DHT, JPG and DAC share the range)
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            if pos + 8 > data.len() {
                return Err(ImageError::InvalidData("Truncated JPEG header".to_string()));
            }

            let height = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as u32;
            let width = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
            let color_space = match data[pos + 7] {
                1 => ColorSpace::DeviceGray,
                4 => ColorSpace::DeviceCMYK,
                _ => ColorSpace::DeviceRGB,
            };

            return Ok((width, height, color_space));
        }

        if pos + 2 > data.len() {
            break;
        }
        let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        pos += length;
    }

    Err(ImageError::InvalidData("Could not find JPEG dimensions".to_string()))
}

/// Compress image data using Flate.
fn compress_image_data(data: &[u8]) -> Result<Vec<u8>, ImageError> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageOutputFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_logo_height_keeps_ratio() {
        let logo = ImageData::new(600, 200, ColorSpace::DeviceRGB, vec![]);
        assert!((logo.aspect_ratio() - 3.0).abs() < 0.001);
        assert!((logo.height_for_width(170.08) - 56.693).abs() < 0.01);
        assert_eq!(ColorSpace::DeviceGray.pdf_name(), "DeviceGray");
    }

    #[test]
    fn test_jpeg_header() {
        // SOI, APP0 with empty payload, SOF0 8bpc 16x32 3 components
        let data = vec![
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x02, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x20, 0x00,
            0x10, 0x03,
        ];
        let image = ImageData::from_bytes(&data).unwrap();
        assert_eq!((image.width, image.height), (16, 32));
        assert_eq!(image.color_space, ColorSpace::DeviceRGB);
        assert_eq!(image.format, ImageFormat::Jpeg);

        let dict = image.build_xobject_dict();
        assert_eq!(dict.get("Filter"), Some(&Object::Name("DCTDecode".to_string())));
        assert_eq!(dict.get("Width"), Some(&Object::Integer(16)));
    }

    #[test]
    fn test_invalid_jpeg_header() {
        assert!(matches!(parse_jpeg_header(&[0x00, 0x00]), Err(ImageError::InvalidData(_))));
        assert!(matches!(parse_jpeg_header(&[0xFF, 0xD8]), Err(ImageError::InvalidData(_))));
    }

    #[test]
    fn test_png_with_alpha_gets_soft_mask() {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 128]));
        let image = ImageData::from_bytes(&png_bytes(image::DynamicImage::ImageRgba8(img))).unwrap();

        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.color_space, ColorSpace::DeviceRGB);
        assert!(image.soft_mask.is_some());

        let dict = image.build_xobject_dict();
        assert_eq!(dict.get("Filter"), Some(&Object::Name("FlateDecode".to_string())));
        assert!(dict.get("DecodeParms").is_none());

        let mask = image.build_soft_mask_dict().unwrap();
        assert_eq!(mask.get("ColorSpace"), Some(&Object::Name("DeviceGray".to_string())));
    }

    #[test]
    fn test_opaque_png_has_no_soft_mask() {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 255, 255]));
        let image = ImageData::from_bytes(&png_bytes(image::DynamicImage::ImageRgba8(img))).unwrap();
        assert!(image.soft_mask.is_none());
        assert!(image.build_soft_mask_dict().is_none());
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(ImageData::from_bytes(b"GIF89a"), Err(ImageError::UnsupportedFormat)));
    }

    #[test]
    fn test_missing_file() {
        let result = ImageData::from_file("/nonexistent/logo.png");
        assert!(matches!(result, Err(ImageError::Io(_))));
    }
}
