pub(crate) mod composite;
pub(crate) mod raster;
pub(crate) mod source;

use crate::{
    blob::ring::BlobRing,
    foundation::{
        core::Canvas,
        error::{RevealError, RevealResult},
    },
};

/// Opaque white, so the mask coverage equals the fill alpha.
const MASK_PAINT: [u8; 4] = [255, 255, 255, 255];
const HELPER_PAINT: [u8; 4] = [255, 0, 0, 255];

/// A rendered surface: premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Straight-alpha copy, as image encoders expect.
    pub fn to_rgba_image(&self) -> RevealResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        for px in straight.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| RevealError::render("frame buffer does not match its dimensions"))
    }
}

/// Draws `image_premul`, keeps it only inside the blob, then optionally marks the points.
///
/// `image_premul` must already be fitted to `canvas`.
pub fn render_reveal(
    canvas: Canvas,
    image_premul: &[u8],
    ring: &BlobRing,
    show_helpers: bool,
) -> RevealResult<FrameRGBA> {
    if image_premul.len() != canvas.pixel_count() * 4 {
        return Err(RevealError::render(
            "source image bytes do not match the canvas",
        ));
    }

    let mut data = image_premul.to_vec();
    let mask = raster::fill_path_rgba8(&ring.curve_geometry(), canvas, MASK_PAINT)?;
    composite::dest_in_in_place(&mut data, &mask)?;

    if show_helpers {
        let dots = raster::fill_path_rgba8(
            &raster::helper_dots(ring.positions()),
            canvas,
            HELPER_PAINT,
        )?;
        composite::over_in_place(&mut data, &dots)?;
    }

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data,
    })
}
