use crate::refs::{ObjectReferences, RefType};
use crate::units::{Mm, Px};
use crate::PDFError;
use base64::Engine;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::io::Read;
use std::path::Path;

/// How the pixels of an [Image] are kept until the document is written
pub enum ImageData {
    /// RGB JPEG data that can be embedded into the PDF as-is
    Jpeg(Vec<u8>),
    /// Decoded pixels, re-encoded with zlib when written
    Decoded(DynamicImage),
}

/// A raster image that can be placed on pages. Like fonts, images are stored
/// once in the [Document](crate::Document) and referred to by id.
pub struct Image {
    pub data: ImageData,
    pub width: Px,
    pub height: Px,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image file. The format is sniffed from the contents, except for TGA
    /// files which have no magic number and are recognised by their extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Image, PDFError> {
        let path = path.as_ref();
        let is_tga = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tga"));
        let data = std::fs::read(path)?;
        if is_tga {
            Self::from_bytes_with_format(data, ImageFormat::Tga)
        } else {
            Self::from_bytes(data)
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) held in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Image, PDFError> {
        let format = image::guess_format(&data)?;
        Self::from_bytes_with_format(data, format)
    }

    fn from_bytes_with_format(data: Vec<u8>, format: ImageFormat) -> Result<Image, PDFError> {
        let image = image::load_from_memory_with_format(&data, format)?;
        match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => Ok(Image {
                width: Px(image.width()),
                height: Px(image.height()),
                data: ImageData::Jpeg(data),
            }),
            _ => Ok(Self::from_dynamic(image)),
        }
    }

    /// Decode a base64 string holding an encoded image
    pub fn from_base64(encoded: &str) -> Result<Image, PDFError> {
        let data = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
        Self::from_bytes(data)
    }

    /// Download and decode an image. This blocks until the whole body is read.
    pub fn from_url(url: &str) -> Result<Image, PDFError> {
        let response = ureq::get(url).call().map_err(Box::new)?;
        let mut data = Vec::new();
        response.into_reader().read_to_end(&mut data)?;
        tracing::debug!(url, bytes = data.len(), "downloaded image");
        Self::from_bytes(data)
    }

    /// Wrap already-decoded pixels
    pub fn from_dynamic(image: DynamicImage) -> Image {
        Image {
            width: Px(image.width()),
            height: Px(image.height()),
            data: ImageData::Decoded(image),
        }
    }

    /// Shrink the image so that it fits within `max_width` x `max_height`, keeping
    /// its aspect ratio. Images that already fit are returned untouched.
    pub fn thumbnail(self, max_width: Px, max_height: Px) -> Result<Image, PDFError> {
        if self.width <= max_width && self.height <= max_height {
            return Ok(self);
        }
        let decoded = match self.data {
            ImageData::Decoded(image) => image,
            ImageData::Jpeg(bytes) => {
                image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg)?
            }
        };
        Ok(Self::from_dynamic(decoded.thumbnail(max_width.0, max_height.0)))
    }

    /// Pixel dimensions
    pub fn size_px(&self) -> (Px, Px) {
        (self.width, self.height)
    }

    /// Dimensions in millimetres at 96 DPI
    pub fn size_mm(&self) -> (Mm, Mm) {
        (self.width.into(), self.height.into())
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            ImageData::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            ImageData::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;
                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|(_, _, p)| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.allocate(RefType::Image(image_index));
        let encoded = self.encode();
        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.allocate(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width.0 as i32);
        image.height(self.height.0 as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width.0 as i32);
            s_mask.height(self.height.0 as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::new_rgba8(width, height)
            .write_to(&mut out, image::ImageOutputFormat::Png)
            .expect("can encode png");
        out.into_inner()
    }

    #[test]
    fn thumbnails_keep_the_aspect_ratio() {
        let image = Image::from_dynamic(DynamicImage::new_rgb8(400, 200));
        let thumb = image.thumbnail(Px(100), Px(100)).unwrap();
        assert_eq!(thumb.size_px(), (Px(100), Px(50)));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let image = Image::from_dynamic(DynamicImage::new_rgb8(40, 20));
        let thumb = image.thumbnail(Px(100), Px(100)).unwrap();
        assert_eq!(thumb.size_px(), (Px(40), Px(20)));
    }

    #[test]
    fn base64_images_decode() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes(100, 50));
        let image = Image::from_base64(&encoded).unwrap();
        assert_eq!(image.size_px(), (Px(100), Px(50)));
        assert_eq!(image.size_mm(), (Mm(26.458), Mm(13.229)));
    }

    #[test]
    fn invalid_base64_is_an_error() {
        assert!(matches!(
            Image::from_base64("not base64!"),
            Err(PDFError::Base64(_))
        ));
    }
}
