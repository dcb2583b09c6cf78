use super::*;
use crate::foundation::core::{Canvas, Rgb8};
use crate::render::frame::Frame;
use crate::scene::task::TaskData;
use crate::task::pair::TaskMetadata;

struct FixedGenerator {
    calls: u32,
}

impl TaskPairGenerator for FixedGenerator {
    fn domain(&self) -> &str {
        "unit"
    }

    fn generate_task_pair(&mut self, task_id: &str) -> TaskPair {
        self.calls += 1;
        let canvas = Canvas {
            width: 8,
            height: 6,
        };
        TaskPair {
            task_id: task_id.to_string(),
            domain: "unit".to_string(),
            prompt: "mix the lights".to_string(),
            first_image: Frame::black(canvas),
            final_image: Frame::filled(canvas, Rgb8::new(255, 255, 0)),
            ground_truth_video: None,
            task: TaskData::new(Rgb8::RED, Rgb8::GREEN, "default"),
        }
    }
}

#[test]
fn task_ids_are_zero_padded() {
    assert_eq!(task_id("color_mixing_additive", 7), "color_mixing_additive_0007");
    assert_eq!(task_id("d", 12345), "d_12345");
}

#[test]
fn writes_one_directory_per_task() {
    let dir = tempfile::tempdir().unwrap();
    let mut generator = FixedGenerator { calls: 0 };
    let opts = DatasetOpts {
        out_dir: dir.path().to_path_buf(),
        num_samples: 3,
    };
    let summary = generate_dataset(&mut generator, &opts);
    assert_eq!(
        summary,
        DatasetSummary {
            written: 3,
            failed: 0
        }
    );
    assert_eq!(generator.calls, 3);

    let task_dir = dir.path().join("unit_task").join("unit_0002");
    for name in ["first_frame.png", "final_frame.png", "prompt.txt", "metadata.json"] {
        assert!(task_dir.join(name).exists(), "missing {name}");
    }
    assert!(!task_dir.join("ground_truth.mp4").exists());

    let prompt = std::fs::read_to_string(task_dir.join("prompt.txt")).unwrap();
    assert_eq!(prompt, "mix the lights");

    let meta: TaskMetadata =
        serde_json::from_slice(&std::fs::read(task_dir.join("metadata.json")).unwrap()).unwrap();
    assert_eq!(meta.task_id, "unit_0002");
    assert_eq!((meta.width, meta.height), (8, 6));
    assert_eq!(meta.task.result, Rgb8::new(255, 255, 0));
    assert!(!meta.has_video);

    let png = image::open(task_dir.join("final_frame.png")).unwrap().to_rgb8();
    assert_eq!(png.get_pixel(3, 3).0, [255, 255, 0]);
}

#[test]
fn write_failures_do_not_stop_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the task root directory should go makes every write fail.
    std::fs::write(dir.path().join("unit_task"), b"blocker").unwrap();
    let mut generator = FixedGenerator { calls: 0 };
    let opts = DatasetOpts {
        out_dir: dir.path().to_path_buf(),
        num_samples: 4,
    };
    let summary = generate_dataset(&mut generator, &opts);
    assert_eq!(summary.failed, 4);
    assert_eq!(summary.written, 0);
    assert_eq!(generator.calls, 4);
}

#[test]
fn video_is_moved_next_to_the_frames() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir_all(&work).unwrap();
    let video = work.join("unit_0000_ground_truth.mp4");
    std::fs::write(&video, b"not really an mp4").unwrap();

    let mut pair = FixedGenerator { calls: 0 }.generate_task_pair("unit_0000");
    pair.ground_truth_video = Some(video.clone());
    let out = write_task_pair(&dir.path().join("unit_task"), &pair).unwrap();
    assert_eq!(
        std::fs::read(out.join("ground_truth.mp4")).unwrap(),
        b"not really an mp4"
    );
    assert!(!video.exists(), "working copy left behind");
}

#[test]
fn missing_video_fails_the_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut pair = FixedGenerator { calls: 0 }.generate_task_pair("unit_0000");
    pair.ground_truth_video = Some(dir.path().join("gone.mp4"));
    assert!(write_task_pair(&dir.path().join("unit_task"), &pair).is_err());
}
