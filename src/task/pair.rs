use crate::render::frame::Frame;
use crate::scene::task::TaskData;
use std::path::PathBuf;

/// One generated sample, handed over to the caller as-is.
#[derive(Clone, Debug)]
pub struct TaskPair {
    pub task_id: String,
    pub domain: String,
    pub prompt: String,
    /// Initial state: lights and an empty zone.
    pub first_image: Frame,
    /// Final state: zone filled with the mixed color.
    pub final_image: Frame,
    /// Encoded animation, absent when video is disabled or encoding failed.
    pub ground_truth_video: Option<PathBuf>,
    /// Colors the frames were rendered from.
    pub task: TaskData,
}

impl TaskPair {
    pub fn metadata(&self) -> TaskMetadata {
        TaskMetadata {
            task_id: self.task_id.clone(),
            domain: self.domain.clone(),
            prompt: self.prompt.clone(),
            width: self.first_image.width,
            height: self.first_image.height,
            has_video: self.ground_truth_video.is_some(),
            task: self.task.clone(),
        }
    }
}

/// Pixel-free summary of a [`TaskPair`], written next to the images.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TaskMetadata {
    pub task_id: String,
    pub domain: String,
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub has_video: bool,
    pub task: TaskData,
}

/// Anything that can produce task pairs by id.
pub trait TaskPairGenerator {
    /// Domain tag for task ids and the output folder.
    fn domain(&self) -> &str;

    fn generate_task_pair(&mut self, task_id: &str) -> TaskPair;
}
