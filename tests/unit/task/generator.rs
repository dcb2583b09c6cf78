use super::*;
use crate::encode::sink::{InMemorySink, encode_frames};
use crate::foundation::error::LightmixError;
use crate::render::frame::Frame;
use crate::scene::task::ColorMode;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

fn cfg(generate_videos: bool) -> TaskConfig {
    TaskConfig {
        image_size: [64, 48],
        light_radius: 8,
        mixing_zone_size: 12,
        mixing_zone_border_width: 1,
        generate_videos,
        ..TaskConfig::default()
    }
}

/// Captures frames in memory and pretends to write `out_path`.
struct RecordingEncoder {
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl VideoEncoder for RecordingEncoder {
    fn encode(
        &mut self,
        frames: &mut dyn Iterator<Item = Frame>,
        cfg: SinkConfig,
        out_path: &Path,
    ) -> LightmixResult<PathBuf> {
        let mut sink = InMemorySink::new();
        encode_frames(&mut sink, cfg, frames)?;
        self.frames
            .borrow_mut()
            .extend(sink.frames().iter().map(|(_, f)| f.clone()));
        Ok(out_path.to_path_buf())
    }
}

struct FailingEncoder;

impl VideoEncoder for FailingEncoder {
    fn encode(
        &mut self,
        _frames: &mut dyn Iterator<Item = Frame>,
        _cfg: SinkConfig,
        _out_path: &Path,
    ) -> LightmixResult<PathBuf> {
        Err(LightmixError::encode("encoder unavailable"))
    }
}

#[test]
fn pair_stills_match_the_composer() {
    let mut generator = TaskGenerator::with_seed(cfg(false), 5).unwrap();
    let pair = generator.generate_task_pair("t_0000");
    assert_eq!(pair.task_id, "t_0000");
    assert_eq!(pair.domain, "color_mixing_additive");
    assert_eq!(pair.first_image, compose_initial(&pair.task, generator.config()));
    assert_eq!(pair.final_image, compose_final(&pair.task, generator.config()));
    assert!(pair.ground_truth_video.is_none());
    assert!(crate::prompts::all_prompts("default").contains(&pair.prompt.as_str()));
}

#[test]
fn same_seed_same_pairs() {
    let mut a = TaskGenerator::with_seed(cfg(false), 99).unwrap();
    let mut b = TaskGenerator::with_seed(cfg(false), 99).unwrap();
    for i in 0..3 {
        let id = format!("t_{i}");
        let pa = a.generate_task_pair(&id);
        let pb = b.generate_task_pair(&id);
        assert_eq!(pa.task, pb.task);
        assert_eq!(pa.prompt, pb.prompt);
        assert_eq!(pa.final_image, pb.final_image);
    }
}

#[test]
fn video_is_encoded_through_the_configured_encoder() {
    let recorded = Rc::new(RefCell::new(Vec::new()));
    let video_dir = std::env::temp_dir().join("lightmix_generator_test");
    let config = TaskConfig {
        video_dir: Some(video_dir.clone()),
        ..cfg(true)
    };
    let mut generator = TaskGenerator::with_seed(config, 1)
        .unwrap()
        .with_animation_opts(AnimationOpts {
            hold_frames: 2,
            transition_frames: 3,
        })
        .with_encoder(Box::new(RecordingEncoder {
            frames: Rc::clone(&recorded),
        }));

    let pair = generator.generate_task_pair("t_0007");
    assert_eq!(
        pair.ground_truth_video,
        Some(video_dir.join("t_0007_ground_truth.mp4"))
    );
    let frames = recorded.borrow();
    assert_eq!(frames.len(), 7);
    assert_eq!(frames[0], pair.first_image);
    assert_eq!(frames[6], pair.final_image);
}

#[test]
fn encoder_failure_only_drops_the_video() {
    let mut generator = TaskGenerator::with_seed(cfg(true), 2)
        .unwrap()
        .with_encoder(Box::new(FailingEncoder));
    let pair = generator.generate_task_pair("t_0001");
    assert!(pair.ground_truth_video.is_none());
    assert_eq!(pair.first_image.width, 64);
}

#[test]
fn disabled_videos_ignore_the_encoder() {
    let recorded = Rc::new(RefCell::new(Vec::new()));
    let mut generator = TaskGenerator::with_seed(cfg(false), 3)
        .unwrap()
        .with_encoder(Box::new(RecordingEncoder {
            frames: Rc::clone(&recorded),
        }));
    let pair = generator.generate_task_pair("t_0002");
    assert!(pair.ground_truth_video.is_none());
    assert!(recorded.borrow().is_empty());
}

#[test]
fn primary_mode_uses_primary_prompts() {
    let config = TaskConfig {
        color_mode: ColorMode::Primary,
        ..cfg(false)
    };
    let mut generator = TaskGenerator::with_seed(config, 4).unwrap();
    let pair = generator.generate_task_pair("t_0003");
    assert_eq!(pair.task.task_type, "primary");
    assert!(crate::prompts::all_prompts("primary").contains(&pair.prompt.as_str()));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = TaskConfig {
        video_fps: 0,
        ..cfg(false)
    };
    assert!(TaskGenerator::with_seed(config, 0).is_err());
}

#[test]
fn scratch_video_dir_is_removed_with_the_generator() {
    let recorded = Rc::new(RefCell::new(Vec::new()));
    let generator = TaskGenerator::with_seed(cfg(true), 8)
        .unwrap()
        .with_encoder(Box::new(RecordingEncoder {
            frames: Rc::clone(&recorded),
        }));
    let scratch = generator.video_dir().unwrap().to_path_buf();
    assert!(scratch.is_dir());
    assert!(
        scratch
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("color_mixing_additive_videos")
    );
    drop(generator);
    assert!(!scratch.exists());
}

#[test]
fn configured_video_dir_wins_over_scratch() {
    let config = TaskConfig {
        video_dir: Some(PathBuf::from("videos_here")),
        ..cfg(true)
    };
    let generator = TaskGenerator::with_seed(config, 0).unwrap();
    assert_eq!(generator.video_dir(), Some(Path::new("videos_here")));
    assert_eq!(generator.domain(), "color_mixing_additive");

    let stills_only = TaskGenerator::with_seed(cfg(false), 0).unwrap();
    assert!(stills_only.video_dir().is_none());
}

#[test]
fn secondary_mode_uses_secondary_prompts() {
    let config = TaskConfig {
        color_mode: ColorMode::Secondary,
        ..cfg(false)
    };
    let mut generator = TaskGenerator::with_seed(config, 6).unwrap();
    let pair = generator.generate_task_pair("t_0004");
    assert_eq!(pair.task.task_type, "secondary");
    assert!(crate::prompts::all_prompts("secondary").contains(&pair.prompt.as_str()));
}
