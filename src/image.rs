use crate::refs::{ObjectReferences, RefType};
use crate::Error;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf, Ref};
use std::path::Path;

/// How the pixels will be stored in the PDF
pub enum RasterImage {
    /// Baseline RGB JPEG data, embedded untouched
    Jpeg(Vec<u8>),
    /// Anything else the `image` crate can decode, re-encoded with flate
    Decoded(DynamicImage),
}

/// A raster image ready to be placed on the page, such as a scanned signature
pub struct Image {
    pub raster: RasterImage,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Image {
    /// Read and decode an image file. The file is read once and closed before returning.
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
        let data = std::fs::read(path)?;
        Self::new_from_bytes(data)
    }

    pub fn new_from_bytes(data: Vec<u8>) -> Result<Image, Error> {
        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;
        let (width, height) = decoded.dimensions();

        let raster = match (format, decoded.color()) {
            // we can embed it directly!
            (ImageFormat::Jpeg, ColorType::Rgb8) => RasterImage::Jpeg(data),
            _ => RasterImage::Decoded(decoded),
        };

        Ok(Image {
            raster,
            width,
            height,
        })
    }

    fn encode(&self) -> EncodeOutput {
        match &self.raster {
            RasterImage::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterImage::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::Image);
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        id
    }
}
