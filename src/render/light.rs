use crate::foundation::core::{IPoint, Rgb8, Rgba8Premul};
use crate::render::composite::flatten_over_in_place;
use crate::render::frame::{Frame, Layer};

/// Options for [`draw_radial_light`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightOpts {
    /// Number of concentric discs used to approximate the falloff.
    pub steps: u32,
}

impl Default for LightOpts {
    fn default() -> Self {
        Self { steps: 50 }
    }
}

/// Radius and straight alpha of glow disc `step` (1-based drawing order, `step <= steps`).
///
/// The first disc spans the full radius at near-zero alpha; each later disc is narrower by
/// `radius / steps` and more opaque, following `255 * (step / steps)^2`. Both truncate.
pub fn glow_step(radius: u32, step: u32, steps: u32) -> (u32, u8) {
    let shrink = f64::from(steps + 1 - step) / f64::from(steps);
    let t = f64::from(step) / f64::from(steps);
    let r = (f64::from(radius) * shrink) as u32;
    let a = (255.0 * t * t) as u8;
    (r, a)
}

/// Build the glow overlay for one light: discs from the widest (faintest) to the narrowest
/// (most opaque), each composited over the previous ones.
pub fn light_layer(
    frame: &Frame,
    center: IPoint,
    radius: u32,
    color: Rgb8,
    opts: LightOpts,
) -> Layer {
    let mut layer = Layer::transparent(frame.canvas());
    for step in 1..=opts.steps {
        let (r, a) = glow_step(radius, step, opts.steps);
        layer.fill_disc(center, r, Rgba8Premul::from_rgb(color, a));
    }
    layer
}

/// Composite a radial glow centered at `center` over `frame`. Parts outside the frame clip.
pub fn draw_radial_light(
    frame: &mut Frame,
    center: IPoint,
    radius: u32,
    color: Rgb8,
    opts: LightOpts,
) {
    let layer = light_layer(frame, center, radius, color, opts);
    flatten_over_in_place(&mut frame.data, &layer.data);
}

/// Owned-canvas form of [`draw_radial_light`].
pub fn render_radial_light(
    mut frame: Frame,
    center: IPoint,
    radius: u32,
    color: Rgb8,
    opts: LightOpts,
) -> Frame {
    draw_radial_light(&mut frame, center, radius, color, opts);
    frame
}

#[cfg(test)]
#[path = "../../tests/unit/render/light.rs"]
mod tests;
