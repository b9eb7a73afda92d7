use crate::foundation::{
    core::RasterImage,
    error::{InkError, InkResult},
};

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel onto another.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    if a == 255 {
        return px;
    }
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 255 || a == 0 {
        return px;
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

/// Composite a premultiplied overlay onto a straight-alpha base and flatten to opaque.
///
/// Base pixels under fully transparent overlay pixels keep their color channels exactly; only
/// their alpha is forced to 255.
pub fn composite_flatten(base: &RasterImage, overlay_premul: &[u8]) -> InkResult<RasterImage> {
    let (width, height) = base.dimensions();
    let mut data: Vec<u8> = base.as_raw().clone();
    if data.len() != overlay_premul.len() {
        return Err(InkError::render(format!(
            "overlay is {} bytes, base {width}x{height} needs {}",
            overlay_premul.len(),
            data.len()
        )));
    }

    for (d, s) in data.chunks_exact_mut(4).zip(overlay_premul.chunks_exact(4)) {
        let base_px = [d[0], d[1], d[2], d[3]];
        let src = [s[0], s[1], s[2], s[3]];
        let out = if src[3] == 0 {
            base_px
        } else {
            unpremultiply(over(premultiply(base_px), src))
        };
        d[0] = out[0];
        d[1] = out[1];
        d[2] = out[2];
        d[3] = 255;
    }

    RasterImage::from_raw(width, height, data)
        .ok_or_else(|| InkError::render("composited buffer does not match image dimensions"))
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
