use crate::foundation::core::{Canvas, IPoint, IRect, Rgb8, Rgba8Premul};
use crate::foundation::error::{LightmixError, LightmixResult};
use crate::render::composite::{over, over_opaque};
use std::path::Path;

/// A rendered frame as opaque RGB8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a frame filled with `color`.
    pub fn filled(canvas: Canvas, color: Rgb8) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: color.to_array().repeat(canvas.area()),
        }
    }

    /// Create an opaque black frame.
    pub fn black(canvas: Canvas) -> Self {
        Self::filled(canvas, Rgb8::BLACK)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Read one pixel; `None` outside the frame.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb8> {
        let idx = self.index(x, y)?;
        Some(Rgb8::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
        ))
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 3)
    }

    /// Write one pixel, ignoring coordinates outside the frame.
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgb8) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx..idx + 3].copy_from_slice(&color.to_array());
        }
    }

    /// Fill the inclusive box `rect` with an opaque color. Off-canvas parts are clipped.
    pub fn fill_rect(&mut self, rect: IRect, color: Rgb8) {
        let Some(r) = rect.clip(self.canvas()) else {
            return;
        };
        let px = color.to_array();
        for y in r.y0..=r.y1 {
            for x in r.x0..=r.x1 {
                if let Some(idx) = self.index(x, y) {
                    self.data[idx..idx + 3].copy_from_slice(&px);
                }
            }
        }
    }

    /// Composite `color` at straight `alpha` over the inclusive box `rect`.
    pub fn blend_rect(&mut self, rect: IRect, color: Rgb8, alpha: u8) {
        let Some(r) = rect.clip(self.canvas()) else {
            return;
        };
        let src = Rgba8Premul::from_rgb(color, alpha).to_array();
        for y in r.y0..=r.y1 {
            for x in r.x0..=r.x1 {
                if let Some(idx) = self.index(x, y) {
                    let d = [self.data[idx], self.data[idx + 1], self.data[idx + 2]];
                    self.data[idx..idx + 3].copy_from_slice(&over_opaque(d, src));
                }
            }
        }
    }

    /// Draw a 1px outline tracing the edge pixels of the inclusive box `rect`.
    pub fn stroke_rect(&mut self, rect: IRect, color: Rgb8) {
        if rect.x0 > rect.x1 || rect.y0 > rect.y1 {
            return;
        }
        for x in rect.x0..=rect.x1 {
            self.put_pixel(x, rect.y0, color);
            self.put_pixel(x, rect.y1, color);
        }
        for y in rect.y0..=rect.y1 {
            self.put_pixel(rect.x0, y, color);
            self.put_pixel(rect.x1, y, color);
        }
    }

    /// Copy into an `image` buffer for encoding.
    pub fn to_rgb_image(&self) -> LightmixResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| {
                LightmixError::validation("frame.data size mismatch with width*height*3")
            })
    }

    /// Write the frame as a PNG file.
    pub fn save_png(&self, path: &Path) -> LightmixResult<()> {
        use anyhow::Context as _;
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Transparent premultiplied RGBA8 overlay that shapes are composited onto before the whole
/// layer is flattened over a [`Frame`].
#[derive(Clone, Debug)]
pub struct Layer {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Layer {
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; canvas.area() * 4],
        }
    }

    fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// Composite a filled disc over the layer. A pixel is covered when its distance to `center`
    /// is at most `radius`; radius 0 covers just the center pixel.
    pub fn fill_disc(&mut self, center: IPoint, radius: u32, color: Rgba8Premul) {
        let r = i64::from(radius);
        let bounds = IRect {
            x0: center.x - r,
            y0: center.y - r,
            x1: center.x + r,
            y1: center.y + r,
        };
        let Some(clip) = bounds.clip(self.canvas()) else {
            return;
        };
        let src = color.to_array();
        let r2 = r * r;
        let stride = self.width as usize;
        for y in clip.y0..=clip.y1 {
            let dy = y - center.y;
            for x in clip.x0..=clip.x1 {
                let dx = x - center.x;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let idx = ((y as usize) * stride + (x as usize)) * 4;
                let d = [
                    self.data[idx],
                    self.data[idx + 1],
                    self.data[idx + 2],
                    self.data[idx + 3],
                ];
                self.data[idx..idx + 4].copy_from_slice(&over(d, src));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
