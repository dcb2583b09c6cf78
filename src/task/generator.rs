use crate::animation::builder::{AnimationOpts, build_animation};
use crate::encode::ffmpeg::{FfmpegEncoder, is_ffmpeg_on_path};
use crate::encode::sink::{SinkConfig, VideoEncoder};
use crate::foundation::error::LightmixResult;
use crate::prompts::get_prompt;
use crate::scene::composer::{compose_final, compose_initial};
use crate::scene::config::TaskConfig;
use crate::scene::task::TaskData;
use crate::task::pair::{TaskPair, TaskPairGenerator};
use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Additive light-mixing task generator.
///
/// Owns its random source, so a seeded generator reproduces the same dataset. Video encoding
/// is optional: when it is disabled, unavailable, or fails, pairs are still produced without a
/// video path.
pub struct TaskGenerator<R = StdRng> {
    config: TaskConfig,
    rng: R,
    encoder: Option<Box<dyn VideoEncoder>>,
    animation: AnimationOpts,
    /// Scratch video directory when `config.video_dir` is unset; deleted on drop.
    scratch: Option<TempDir>,
}

impl TaskGenerator<StdRng> {
    pub fn with_seed(config: TaskConfig, seed: u64) -> LightmixResult<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: TaskConfig) -> LightmixResult<Self> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> TaskGenerator<R> {
    /// Validate `config` and set up the default `ffmpeg` encoder when videos are requested.
    ///
    /// Without `config.video_dir`, videos are encoded into a fresh scratch directory that lives
    /// as long as the generator.
    pub fn new(config: TaskConfig, rng: R) -> LightmixResult<Self> {
        config.validate()?;
        let scratch = if config.generate_videos && config.video_dir.is_none() {
            let dir = tempfile::Builder::new()
                .prefix(&format!("{}_videos", config.domain))
                .tempdir()
                .context("create scratch video dir")?;
            Some(dir)
        } else {
            None
        };
        let encoder: Option<Box<dyn VideoEncoder>> = if !config.generate_videos {
            None
        } else if is_ffmpeg_on_path() {
            Some(Box::new(FfmpegEncoder))
        } else {
            tracing::warn!("ffmpeg not found on PATH; generating stills without videos");
            None
        };
        Ok(Self {
            config,
            rng,
            encoder,
            animation: AnimationOpts::default(),
            scratch,
        })
    }

    /// Replace the video encoder. Ignored unless `generate_videos` is set.
    pub fn with_encoder(mut self, encoder: Box<dyn VideoEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn with_animation_opts(mut self, opts: AnimationOpts) -> Self {
        self.animation = opts;
        self
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Draw the next color pair.
    pub fn generate_task_data(&mut self) -> TaskData {
        TaskData::random(&mut self.rng, self.config.color_mode)
    }

    /// Directory encoded videos are written to.
    pub fn video_dir(&self) -> Option<&Path> {
        match (&self.config.video_dir, &self.scratch) {
            (Some(dir), _) => Some(dir.as_path()),
            (None, Some(scratch)) => Some(scratch.path()),
            (None, None) => None,
        }
    }

    fn video_path(&self, task_id: &str) -> Option<PathBuf> {
        let dir = self.video_dir()?;
        Some(dir.join(format!("{task_id}_ground_truth.mp4")))
    }

    fn render_video(&mut self, task_id: &str, task: &TaskData) -> Option<PathBuf> {
        if !self.config.generate_videos {
            return None;
        }
        let out_path = self.video_path(task_id)?;
        let canvas = self.config.canvas();
        let fps = match self.config.fps() {
            Ok(fps) => fps,
            Err(e) => {
                tracing::warn!(task_id, error = %e, "skipping video");
                return None;
            }
        };
        let encoder = self.encoder.as_mut()?;

        let cfg = SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps,
        };
        let mut frames = build_animation(task, &self.config, self.animation);
        match encoder.encode(&mut frames, cfg, &out_path) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(
                    task_id,
                    error = %e,
                    "video encoding failed; continuing without video"
                );
                None
            }
        }
    }
}

impl<R: Rng> TaskPairGenerator for TaskGenerator<R> {
    fn domain(&self) -> &str {
        &self.config.domain
    }

    #[tracing::instrument(skip(self))]
    fn generate_task_pair(&mut self, task_id: &str) -> TaskPair {
        let task = self.generate_task_data();
        tracing::debug!(
            color1 = ?task.color1,
            color2 = ?task.color2,
            result = ?task.result,
            "task colors"
        );

        let first_image = compose_initial(&task, &self.config);
        let final_image = compose_final(&task, &self.config);
        let ground_truth_video = self.render_video(task_id, &task);
        let prompt = get_prompt(&task.task_type, &mut self.rng).to_string();

        TaskPair {
            task_id: task_id.to_string(),
            domain: self.config.domain.clone(),
            prompt,
            first_image,
            final_image,
            ground_truth_video,
            task,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/task/generator.rs"]
mod tests;
