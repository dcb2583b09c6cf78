use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{LightmixError, LightmixResult};
use crate::render::frame::Frame;
use std::path::{Path, PathBuf};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming frames in animation order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> LightmixResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> LightmixResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> LightmixResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Frame)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, Frame)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> LightmixResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> LightmixResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> LightmixResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Stream `frames` through `sink` (begin, every frame in order, end). Returns the frame count.
pub fn encode_frames<I>(
    sink: &mut dyn FrameSink,
    cfg: SinkConfig,
    frames: I,
) -> LightmixResult<u64>
where
    I: IntoIterator<Item = Frame>,
{
    let mut frames = frames.into_iter().peekable();
    if frames.peek().is_none() {
        return Err(LightmixError::encode("no frames to encode"));
    }

    sink.begin(cfg)?;
    let mut count = 0u64;
    for frame in frames {
        sink.push_frame(FrameIndex(count), &frame)?;
        count += 1;
    }
    sink.end()?;
    Ok(count)
}

/// Turns a frame sequence into a video file.
///
/// Implementations report failure as an error; callers that treat video as optional decide
/// whether to drop it.
pub trait VideoEncoder {
    /// Encode `frames` to `out_path` and return the path written.
    fn encode(
        &mut self,
        frames: &mut dyn Iterator<Item = Frame>,
        cfg: SinkConfig,
        out_path: &Path,
    ) -> LightmixResult<PathBuf>;
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
