use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::{core::Canvas, error::RevealResult};

/// Decoded source picture, kept as straight RGBA until it is fitted to a surface.
#[derive(Clone, Debug)]
pub struct SourceImage {
    rgba: Arc<image::RgbaImage>,
}

impl SourceImage {
    pub fn from_rgba(rgba: image::RgbaImage) -> Self {
        Self {
            rgba: Arc::new(rgba),
        }
    }

    pub fn decode(bytes: &[u8]) -> RevealResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_rgba(dyn_img.to_rgba8()))
    }

    pub fn open(path: &Path) -> RevealResult<Self> {
        let dyn_img =
            image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
        Ok(Self::from_rgba(dyn_img.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Natural size of the picture as a canvas.
    pub fn canvas(&self) -> RevealResult<Canvas> {
        Canvas::new(self.width(), self.height())
    }

    /// Stretches the picture over `canvas` and returns premultiplied RGBA8 bytes.
    pub fn fit_premul(&self, canvas: Canvas) -> Vec<u8> {
        let mut bytes = if self.rgba.dimensions() == (canvas.width, canvas.height) {
            self.rgba.as_raw().clone()
        } else {
            image::imageops::resize(
                &*self.rgba,
                canvas.width,
                canvas.height,
                image::imageops::FilterType::Triangle,
            )
            .into_raw()
        };
        premultiply_rgba8_in_place(&mut bytes);
        bytes
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decode_png_keeps_dimensions() {
        let img = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 0, 0, 0, 255]).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let src = SourceImage::decode(&buf).unwrap();
        assert_eq!((src.width(), src.height()), (2, 1));
        assert_eq!(src.canvas().unwrap(), Canvas::new(2, 1).unwrap());
    }

    #[test]
    fn fit_at_natural_size_premultiplies() {
        let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
        let src = SourceImage::from_rgba(img);
        let bytes = src.fit_premul(Canvas::new(1, 1).unwrap());
        assert_eq!(bytes, vec![50, 25, 100, 128]);
    }

    #[test]
    fn fit_stretches_to_canvas() {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        let src = SourceImage::from_rgba(img);
        let canvas = Canvas::new(8, 2).unwrap();
        let bytes = src.fit_premul(canvas);
        assert_eq!(bytes.len(), canvas.pixel_count() * 4);
        assert!(bytes.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(SourceImage::decode(b"not an image").is_err());
    }
}
