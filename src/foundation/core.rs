use crate::foundation::error::{LightmixError, LightmixResult};

/// Absolute 0-based frame index in an animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> LightmixResult<Self> {
        if den == 0 {
            return Err(LightmixError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LightmixError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Number of pixels covered by the canvas.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Integer pixel coordinate. Signed so geometry may sit partially off-canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IPoint {
    pub x: i64,
    pub y: i64,
}

impl IPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Inclusive pixel box `[x0, x1] x [y0, y1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl IRect {
    /// Box whose top-left corner is `origin` and whose far edge sits `extent` pixels away, so it
    /// spans `extent + 1` pixels per axis.
    pub const fn from_origin(origin: IPoint, extent: i64) -> Self {
        Self {
            x0: origin.x,
            y0: origin.y,
            x1: origin.x + extent,
            y1: origin.y + extent,
        }
    }

    /// Grow the box by `by` pixels on every side.
    pub const fn inflate(self, by: i64) -> Self {
        Self {
            x0: self.x0 - by,
            y0: self.y0 - by,
            x1: self.x1 + by,
            y1: self.y1 + by,
        }
    }

    pub fn contains(self, p: IPoint) -> bool {
        self.x0 <= p.x && p.x <= self.x1 && self.y0 <= p.y && p.y <= self.y1
    }

    pub fn center(self) -> IPoint {
        IPoint::new((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    /// Intersect with `canvas`; `None` when nothing remains visible.
    pub fn clip(self, canvas: Canvas) -> Option<Self> {
        let x0 = self.x0.max(0);
        let y0 = self.y0.max(0);
        let x1 = self.x1.min(i64::from(canvas.width) - 1);
        let y1 = self.y1.min(i64::from(canvas.height) - 1);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some(Self { x0, y0, x1, y1 })
    }
}

/// Opaque RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse `"r,g,b"` with decimal channels.
    pub fn parse_triplet(s: &str) -> LightmixResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [r, g, b] = parts.as_slice() else {
            return Err(LightmixError::validation(format!(
                "expected color as 'r,g,b', got '{s}'"
            )));
        };
        let channel = |v: &str| {
            v.parse::<u8>().map_err(|e| {
                LightmixError::validation(format!("invalid color channel '{v}' in '{s}': {e}"))
            })
        };
        Ok(Self::new(channel(*r)?, channel(*g)?, channel(*b)?))
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Premultiply an opaque color with `alpha`.
    pub fn from_rgb(color: Rgb8, alpha: u8) -> Self {
        Self::from_straight_rgba(color.r, color.g, color.b, alpha)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
