use super::*;
use crate::foundation::core::{Canvas, Rgb8};

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(10, 1).unwrap(),
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(validate_sink_config(&cfg(0, 10)).is_err());
    assert!(validate_sink_config(&cfg(11, 10)).is_err());
    assert!(validate_sink_config(&cfg(10, 7)).is_err());
    assert!(
        validate_sink_config(&SinkConfig {
            fps: Fps { num: 0, den: 1 },
            ..cfg(10, 10)
        })
        .is_err()
    );
    assert!(validate_sink_config(&cfg(10, 10)).is_ok());
}

#[test]
fn frame_size_must_match_config() {
    let frame = Frame::black(Canvas {
        width: 4,
        height: 4,
    });
    assert!(validate_frame(&cfg(4, 4), &frame).is_ok());
    assert!(validate_frame(&cfg(4, 2), &frame).is_err());

    let mut short = frame.clone();
    short.data.pop();
    assert!(validate_frame(&cfg(4, 4), &short).is_err());
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = Frame::black(Canvas {
        width: 2,
        height: 2,
    });
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn encodes_mp4_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("clip.mp4");
    let canvas = Canvas {
        width: 16,
        height: 16,
    };
    let mut frames = (0..5u8).map(|i| Frame::filled(canvas, Rgb8::new(i * 40, 0, 0)));
    let path = FfmpegEncoder
        .encode(&mut frames, cfg(16, 16), &out)
        .unwrap();
    assert_eq!(path, out);
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn command_streams_rgb24_at_the_configured_rate() {
    let cmd = x264_command(
        &SinkConfig {
            width: 32,
            height: 18,
            fps: Fps::new(25, 2).unwrap(),
        },
        Path::new("out/clip.mp4"),
    );
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let after = |flag: &str| {
        let i = args.iter().position(|a| a == flag).unwrap();
        args[i + 1].clone()
    };
    assert_eq!(after("-s"), "32x18");
    assert_eq!(after("-r"), "25/2");
    assert_eq!(after("-c:v"), "libx264");
    let rate = args.iter().position(|a| a == "-r").unwrap();
    let input = args.iter().position(|a| a == "-i").unwrap();
    assert!(rate < input);
    assert_eq!(args.last().map(String::as_str), Some("out/clip.mp4"));
    assert!(args.contains(&"rgb24".to_string()));
}
