//! Additive light mixing.
//!
//! Mixing is a per-channel clamped RGB sum. It is not gamma-correct and does not model spectra;
//! it is the ground truth the mixing zone displays.

use crate::foundation::core::Rgb8;

/// Mix two light colors additively: each channel is `min(a + b, 255)`.
pub fn mix(c1: Rgb8, c2: Rgb8) -> Rgb8 {
    Rgb8 {
        r: c1.r.saturating_add(c2.r),
        g: c1.g.saturating_add(c2.g),
        b: c1.b.saturating_add(c2.b),
    }
}

#[cfg(test)]
#[path = "../tests/unit/mix.rs"]
mod tests;
