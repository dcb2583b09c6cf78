use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff "over" for premultiplied RGBA8 pixels.
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

/// "Over" a premultiplied pixel onto an opaque RGB8 pixel; the result stays opaque.
pub fn over_opaque(dst: [u8; 3], src: PremulRgba8) -> [u8; 3] {
    let a = src[3];
    if a == 0 {
        return dst;
    }
    if a == 255 {
        return [src[0], src[1], src[2]];
    }

    let inv = 255u16 - u16::from(a);
    [
        src[0].saturating_add(mul_div255(u16::from(dst[0]), inv)),
        src[1].saturating_add(mul_div255(u16::from(dst[1]), inv)),
        src[2].saturating_add(mul_div255(u16::from(dst[2]), inv)),
    ]
}

/// Flatten a premultiplied RGBA8 layer over an opaque RGB8 buffer in place.
pub fn flatten_over_in_place(dst_rgb: &mut [u8], src_premul: &[u8]) {
    for (d, s) in dst_rgb.chunks_exact_mut(3).zip(src_premul.chunks_exact(4)) {
        let out = over_opaque([d[0], d[1], d[2]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
