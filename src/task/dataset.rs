use crate::foundation::error::LightmixResult;
use crate::task::pair::{TaskPair, TaskPairGenerator};
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Options for [`generate_dataset`].
#[derive(Clone, Debug)]
pub struct DatasetOpts {
    /// Root directory; tasks land in `<out_dir>/<domain>_task/<task_id>/`.
    pub out_dir: PathBuf,
    /// Number of tasks to generate.
    pub num_samples: u32,
}

/// Outcome of a dataset run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub written: u32,
    pub failed: u32,
}

/// Task id for sample `index`, e.g. `color_mixing_additive_0007`.
pub fn task_id(domain: &str, index: u32) -> String {
    format!("{domain}_{index:04}")
}

/// Generate `num_samples` tasks and write each one to disk.
///
/// A task that cannot be written is logged and counted in [`DatasetSummary::failed`]; the
/// remaining tasks are still generated.
#[tracing::instrument(
    skip(generator, opts),
    fields(out_dir = %opts.out_dir.display(), n = opts.num_samples)
)]
pub fn generate_dataset(
    generator: &mut dyn TaskPairGenerator,
    opts: &DatasetOpts,
) -> DatasetSummary {
    let domain = generator.domain().to_string();
    let task_root = opts.out_dir.join(format!("{domain}_task"));
    let mut summary = DatasetSummary::default();
    for index in 0..opts.num_samples {
        let id = task_id(&domain, index);
        let pair = generator.generate_task_pair(&id);
        match write_task_pair(&task_root, &pair) {
            Ok(dir) => {
                tracing::debug!(task_id = %id, dir = %dir.display(), "wrote task");
                summary.written += 1;
            }
            Err(e) => {
                tracing::error!(task_id = %id, error = %e, "failed to write task");
                summary.failed += 1;
            }
        }
    }
    tracing::info!(
        written = summary.written,
        failed = summary.failed,
        "dataset generation finished"
    );
    summary
}

/// Write one pair into `<task_root>/<task_id>/` and return that directory.
///
/// Files: `first_frame.png`, `final_frame.png`, `prompt.txt`, `metadata.json` and, when the
/// pair has one, `ground_truth.mp4`. The video is moved out of the generator's working
/// directory, not copied.
pub fn write_task_pair(task_root: &Path, pair: &TaskPair) -> LightmixResult<PathBuf> {
    let dir = task_root.join(&pair.task_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create task dir '{}'", dir.display()))?;

    pair.first_image.save_png(&dir.join("first_frame.png"))?;
    pair.final_image.save_png(&dir.join("final_frame.png"))?;

    let prompt_path = dir.join("prompt.txt");
    std::fs::write(&prompt_path, &pair.prompt)
        .with_context(|| format!("write prompt '{}'", prompt_path.display()))?;

    if let Some(video) = pair.ground_truth_video.as_deref() {
        move_file(video, &dir.join("ground_truth.mp4"))?;
    }

    let meta_path = dir.join("metadata.json");
    let meta = serde_json::to_string_pretty(&pair.metadata())?;
    std::fs::write(&meta_path, meta)
        .with_context(|| format!("write metadata '{}'", meta_path.display()))?;

    Ok(dir)
}

/// Rename `src` to `dst`, falling back to copy and delete across filesystems.
fn move_file(src: &Path, dst: &Path) -> LightmixResult<()> {
    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    std::fs::copy(src, dst)
        .with_context(|| format!("copy video '{}' to '{}'", src.display(), dst.display()))?;
    std::fs::remove_file(src)
        .with_context(|| format!("remove video '{}'", src.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/task/dataset.rs"]
mod tests;
