use crate::foundation::error::{RevealError, RevealResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Destination-in: keeps `dst` scaled by the source coverage `mask_alpha`.
pub fn dest_in(dst: PremulRgba8, mask_alpha: u8) -> PremulRgba8 {
    match mask_alpha {
        0 => [0, 0, 0, 0],
        255 => dst,
        m => dst.map(|c| mul_div255(u16::from(c), u16::from(m))),
    }
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> RevealResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RevealError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Masks `dst` with the alpha channel of the premultiplied `mask` buffer.
pub fn dest_in_in_place(dst: &mut [u8], mask: &[u8]) -> RevealResult<()> {
    if dst.len() != mask.len() || !dst.len().is_multiple_of(4) {
        return Err(RevealError::render(
            "dest_in_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, m) in dst.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let out = dest_in([d[0], d[1], d[2], d[3]], m[3]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
