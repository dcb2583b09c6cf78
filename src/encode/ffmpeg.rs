use crate::encode::sink::{FrameSink, SinkConfig, VideoEncoder, encode_frames};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{LightmixError, LightmixResult};
use crate::render::frame::Frame;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

/// Where [`FfmpegSink`] writes its MP4. An existing file at `out_path` is replaced.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGB frames to its stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<JoinHandle<std::io::Result<String>>>,

    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> LightmixResult<()> {
        validate_sink_config(&cfg)?;

        ensure_parent_dir(&self.opts.out_path)?;

        if !is_ffmpeg_on_path() {
            return Err(LightmixError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut child = x264_command(&cfg, &self.opts.out_path).spawn().map_err(|e| {
            LightmixError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| LightmixError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| LightmixError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = drain_stderr(stderr);

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> LightmixResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| LightmixError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(LightmixError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        validate_frame(cfg, frame)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(LightmixError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            LightmixError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> LightmixResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| LightmixError::encode("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            LightmixError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| LightmixError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| LightmixError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => String::new(),
        };

        if !status.success() {
            return Err(LightmixError::encode(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // Abandoned mid-stream: close stdin and reap the child.
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// [`VideoEncoder`] backed by [`FfmpegSink`].
#[derive(Clone, Debug, Default)]
pub struct FfmpegEncoder;

impl VideoEncoder for FfmpegEncoder {
    fn encode(
        &mut self,
        frames: &mut dyn Iterator<Item = Frame>,
        cfg: SinkConfig,
        out_path: &Path,
    ) -> LightmixResult<PathBuf> {
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path));
        let count = encode_frames(&mut sink, cfg, frames)?;
        tracing::debug!(frames = count, path = %out_path.display(), "encoded mp4");
        Ok(out_path.to_path_buf())
    }
}

pub(crate) fn validate_sink_config(cfg: &SinkConfig) -> LightmixResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(LightmixError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(LightmixError::validation(
            "ffmpeg sink width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(LightmixError::validation(
            "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
        ));
    }
    Ok(())
}

fn validate_frame(cfg: &SinkConfig, frame: &Frame) -> LightmixResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(LightmixError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 3 {
        return Err(LightmixError::validation(
            "frame.data size mismatch with width*height*3",
        ));
    }
    Ok(())
}

/// `ffmpeg` reading packed rgb24 frames of `cfg` size from stdin and writing H.264 MP4 to
/// `out_path`.
fn x264_command(cfg: &SinkConfig, out_path: &Path) -> Command {
    let Fps { num, den } = cfg.fps;
    let mut cmd = Command::new("ffmpeg");
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .args(["-y", "-loglevel", "error"])
        .args(["-f", "rawvideo", "-pix_fmt", "rgb24"])
        .args(["-s", &format!("{}x{}", cfg.width, cfg.height)])
        // Input rate must precede `-i`.
        .args(["-r", &format!("{num}/{den}")])
        .args(["-i", "pipe:0", "-an"])
        .args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"])
        .arg(out_path);
    cmd
}

/// Read ffmpeg's stderr to the end on its own thread.
fn drain_stderr(mut stderr: ChildStderr) -> JoinHandle<std::io::Result<String>> {
    std::thread::spawn(move || {
        let mut text = String::new();
        stderr.read_to_string(&mut text)?;
        Ok(text)
    })
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> LightmixResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
