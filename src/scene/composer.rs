use crate::foundation::core::{Canvas, IPoint, IRect, Rgb8};
use crate::render::frame::Frame;
use crate::render::light::{LightOpts, draw_radial_light};
use crate::scene::config::TaskConfig;
use crate::scene::task::TaskData;

/// One glowing light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightSource {
    pub center: IPoint,
    pub radius: u32,
    pub color: Rgb8,
}

/// The bordered square in the middle of the canvas where the mixed color appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MixingZone {
    /// Top-left corner. Negative when the zone is larger than the canvas.
    pub origin: IPoint,
    pub size: u32,
    pub border_width: u32,
}

impl MixingZone {
    /// Pixels covered by the fill, `size + 1` per axis.
    pub fn fill_rect(&self) -> IRect {
        IRect::from_origin(self.origin, i64::from(self.size))
    }

    /// Outline `i`, `i` pixels outside the fill edge.
    pub fn outline(&self, i: u32) -> IRect {
        self.fill_rect().inflate(i64::from(i))
    }

    pub fn center(&self) -> IPoint {
        self.fill_rect().center()
    }

    fn draw_border(&self, frame: &mut Frame) {
        for i in 0..self.border_width {
            frame.stroke_rect(self.outline(i), Rgb8::WHITE);
        }
    }
}

/// How the zone interior is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneFill {
    /// Border only.
    Empty,
    /// Opaque fill with the mixed color.
    Solid,
    /// Mixed color composited over the lights at this alpha.
    Blend(u8),
}

/// Geometry shared by every frame of a task, derived from [`TaskConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneLayout {
    pub canvas: Canvas,
    pub left_center: IPoint,
    pub right_center: IPoint,
    pub light_radius: u32,
    pub zone: MixingZone,
    pub light_opts: LightOpts,
}

impl SceneLayout {
    pub fn from_config(cfg: &TaskConfig) -> Self {
        let canvas = cfg.canvas();
        let w = i64::from(canvas.width);
        let h = i64::from(canvas.height);
        let size = i64::from(cfg.mixing_zone_size);
        Self {
            canvas,
            left_center: IPoint::new(w / 4, h / 2),
            right_center: IPoint::new(3 * w / 4, h / 2),
            light_radius: cfg.light_radius,
            zone: MixingZone {
                origin: IPoint::new((w - size).div_euclid(2), (h - size).div_euclid(2)),
                size: cfg.mixing_zone_size,
                border_width: cfg.mixing_zone_border_width,
            },
            light_opts: LightOpts::default(),
        }
    }

    /// Left and right lights for `task`, in drawing order.
    pub fn lights(&self, task: &TaskData) -> [LightSource; 2] {
        [
            LightSource {
                center: self.left_center,
                radius: self.light_radius,
                color: task.color1,
            },
            LightSource {
                center: self.right_center,
                radius: self.light_radius,
                color: task.color2,
            },
        ]
    }

    /// Black canvas with both glows; the right one is composited over the left.
    pub fn render_lights(&self, task: &TaskData) -> Frame {
        let mut frame = Frame::black(self.canvas);
        for light in self.lights(task) {
            draw_radial_light(
                &mut frame,
                light.center,
                light.radius,
                light.color,
                self.light_opts,
            );
        }
        frame
    }

    /// Render a complete still. The border always goes on top of the fill.
    pub fn render(&self, task: &TaskData, fill: ZoneFill) -> Frame {
        let mut frame = self.render_lights(task);
        let rect = self.zone.fill_rect();
        match fill {
            ZoneFill::Empty => {}
            ZoneFill::Solid => frame.fill_rect(rect, task.result),
            ZoneFill::Blend(alpha) => frame.blend_rect(rect, task.result, alpha),
        }
        self.zone.draw_border(&mut frame);
        frame
    }
}

/// Black canvas with both lights and no zone.
pub fn compose_lights(task: &TaskData, cfg: &TaskConfig) -> Frame {
    SceneLayout::from_config(cfg).render_lights(task)
}

/// Initial state: both lights and an empty bordered zone.
pub fn compose_initial(task: &TaskData, cfg: &TaskConfig) -> Frame {
    SceneLayout::from_config(cfg).render(task, ZoneFill::Empty)
}

/// Final state: as [`compose_initial`], with the zone filled with the mixed color.
pub fn compose_final(task: &TaskData, cfg: &TaskConfig) -> Frame {
    SceneLayout::from_config(cfg).render(task, ZoneFill::Solid)
}

/// Intermediate state with the mixed color at `alpha` inside the zone.
pub fn compose_transition(task: &TaskData, cfg: &TaskConfig, alpha: u8) -> Frame {
    SceneLayout::from_config(cfg).render(task, ZoneFill::Blend(alpha))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/composer.rs"]
mod tests;
