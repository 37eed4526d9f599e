//! Back cover logo loading

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use lopdf::{Stream, dictionary};

use crate::constants::LOGO_MAX_PIXELS;

/// Decoded logo, alpha already composited on white
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    /// Packed 8-bit RGB samples, row by row from the top
    pub rgb: Vec<u8>,
}

impl LogoImage {
    pub fn from_image(image: &DynamicImage) -> Self {
        let (w, h) = image.dimensions();
        let image = if w > LOGO_MAX_PIXELS || h > LOGO_MAX_PIXELS {
            image.thumbnail(LOGO_MAX_PIXELS, LOGO_MAX_PIXELS)
        } else {
            image.clone()
        };

        let rgba = image.to_rgba8();
        let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = a as u32;
            for channel in [r, g, b] {
                let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
                rgb.push(blended as u8);
            }
        }

        Self {
            width: rgba.width(),
            height: rgba.height(),
            rgb,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Image XObject stream for this logo
    pub fn to_stream(&self) -> Stream {
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => self.width as i64,
                "Height" => self.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            },
            self.rgb.clone(),
        )
    }
}

/// Load a logo, or log a warning and carry on without one.
pub fn load_logo(path: &Path) -> Option<LogoImage> {
    match image::open(path) {
        Ok(image) => {
            let logo = LogoImage::from_image(&image);
            log::debug!(
                "Loaded logo {} ({}x{})",
                path.display(),
                logo.width,
                logo.height
            );
            Some(logo)
        }
        Err(e) => {
            log::warn!("Skipping logo {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_alpha_on_white() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let logo = LogoImage::from_image(&DynamicImage::ImageRgba8(img));
        assert_eq!(logo.size(), (2, 1));
        assert_eq!(logo.rgb, vec![255, 255, 255, 10, 20, 30]);
    }

    #[test]
    fn test_large_logo_scaled_down() {
        let img = RgbaImage::new(1200, 300);
        let logo = LogoImage::from_image(&DynamicImage::ImageRgba8(img));
        assert_eq!(logo.width, LOGO_MAX_PIXELS);
        assert_eq!(logo.height, 150);
        assert_eq!(logo.rgb.len(), (logo.width * logo.height * 3) as usize);
    }

    #[test]
    fn test_missing_logo_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_logo(&dir.path().join("absent.png")).is_none());
    }

    #[test]
    fn test_undecodable_logo_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(load_logo(&path).is_none());
    }
}
