use crate::foundation::core::Rgb8;
use crate::mix::mix;
use rand::Rng;
use rand::seq::SliceRandom as _;

/// How [`TaskData::random`] picks the two light colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Every channel of both lights uniform in `[0, 255]`.
    #[default]
    Random,
    /// Two distinct primaries out of red, green and blue.
    Primary,
    /// Two primaries at a shared random intensity in `[128, 255]`, so the mix is a shade of
    /// yellow, cyan or magenta.
    Secondary,
}

impl ColorMode {
    /// Prompt table key for tasks generated in this mode.
    pub fn task_type(self) -> &'static str {
        match self {
            Self::Random => "default",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// The colors of one task. Renderers only read it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TaskData {
    /// Left light.
    pub color1: Rgb8,
    /// Right light.
    pub color2: Rgb8,
    /// Additive mix of both lights.
    pub result: Rgb8,
    /// Prompt table key.
    pub task_type: String,
}

impl TaskData {
    pub fn new(color1: Rgb8, color2: Rgb8, task_type: impl Into<String>) -> Self {
        Self {
            color1,
            color2,
            result: mix(color1, color2),
            task_type: task_type.into(),
        }
    }

    /// Draw a color pair from `rng` according to `mode`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, mode: ColorMode) -> Self {
        let (color1, color2) = match mode {
            ColorMode::Random => (random_color(rng), random_color(rng)),
            ColorMode::Primary => {
                let mut primaries = [Rgb8::RED, Rgb8::GREEN, Rgb8::BLUE];
                primaries.shuffle(rng);
                (primaries[0], primaries[1])
            }
            ColorMode::Secondary => {
                const PAIRS: [[Rgb8; 2]; 3] = [
                    [Rgb8::RED, Rgb8::GREEN],
                    [Rgb8::GREEN, Rgb8::BLUE],
                    [Rgb8::RED, Rgb8::BLUE],
                ];
                let mut pair = PAIRS[rng.gen_range(0..PAIRS.len())];
                let level: u8 = rng.gen_range(128..=255);
                pair.shuffle(rng);
                let dim = |c: Rgb8| Rgb8::new(c.r.min(level), c.g.min(level), c.b.min(level));
                (dim(pair[0]), dim(pair[1]))
            }
        };
        Self::new(color1, color2, mode.task_type())
    }
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb8 {
    Rgb8::new(
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/task.rs"]
mod tests;
