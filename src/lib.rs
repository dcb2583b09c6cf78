//! lightmix synthesizes additive light-mixing task pairs for visual reasoning datasets.
//!
//! Each task shows two colored lights on a black canvas and a bordered mixing zone between
//! them. The initial frame leaves the zone empty; the final frame fills it with the clamped
//! RGB sum of both lights. An optional MP4 animates the fill.
//!
//! - Pick colors with [`TaskData::random`] or build them with [`TaskData::new`]
//! - Render stills with [`compose_initial`] / [`compose_final`]
//! - Stream an animation with [`build_animation`] into a [`FrameSink`]
//! - Or let [`TaskGenerator`] and [`generate_dataset`] do all of it
#![forbid(unsafe_code)]

mod foundation;

/// Hold / transition / hold animations.
pub mod animation;
/// Encoding sinks.
pub mod encode;
pub mod mix;
pub mod prompts;
/// CPU rasterization.
pub mod render;
/// Scene geometry and composition.
pub mod scene;
/// Task assembly and dataset output.
pub mod task;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, IPoint, IRect, Rgb8, Rgba8Premul};
pub use crate::foundation::error::{LightmixError, LightmixResult};

pub use crate::animation::builder::{
    AnimationFrames, AnimationOpts, build_animation, transition_alpha,
};
pub use crate::encode::ffmpeg::{FfmpegEncoder, FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig, VideoEncoder, encode_frames};
pub use crate::mix::mix;
pub use crate::render::frame::{Frame, Layer};
pub use crate::render::light::{LightOpts, draw_radial_light, render_radial_light};
pub use crate::scene::composer::{
    LightSource, MixingZone, SceneLayout, ZoneFill, compose_final, compose_initial,
    compose_lights, compose_transition,
};
pub use crate::scene::config::TaskConfig;
pub use crate::scene::task::{ColorMode, TaskData};
pub use crate::task::dataset::{DatasetOpts, DatasetSummary, generate_dataset, write_task_pair};
pub use crate::task::generator::TaskGenerator;
pub use crate::task::pair::{TaskMetadata, TaskPair, TaskPairGenerator};
