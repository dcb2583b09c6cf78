use crate::render::frame::Frame;
use crate::scene::composer::{SceneLayout, ZoneFill};
use crate::scene::config::TaskConfig;
use crate::scene::task::TaskData;
use std::iter::FusedIterator;

/// Shape of the hold / transition / hold animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationOpts {
    /// Copies of the initial (and, separately, the final) still.
    pub hold_frames: u32,
    /// Interpolated frames between the two holds. With 0 only the holds are produced.
    pub transition_frames: u32,
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            hold_frames: 5,
            transition_frames: 30,
        }
    }
}

impl AnimationOpts {
    /// Total number of frames the animation yields.
    pub fn len_frames(self) -> usize {
        2 * self.hold_frames as usize + self.transition_frames as usize
    }
}

/// Fill alpha of transition frame `i` out of `n`: `round(255 * (i + 1) / n)`.
///
/// Non-decreasing in `i` and 255 at `i = n - 1`.
pub fn transition_alpha(i: u32, n: u32) -> u8 {
    if n == 0 {
        return 255;
    }
    let step = u64::from(i.min(n - 1)) + 1;
    let n = u64::from(n);
    ((255 * step + n / 2) / n) as u8
}

/// Build the animation for `task`. Frames are rendered lazily, in order.
pub fn build_animation(
    task: &TaskData,
    cfg: &TaskConfig,
    opts: AnimationOpts,
) -> AnimationFrames {
    let layout = SceneLayout::from_config(cfg);
    AnimationFrames {
        initial: layout.render(task, ZoneFill::Empty),
        final_frame: layout.render(task, ZoneFill::Solid),
        layout,
        task: task.clone(),
        opts,
        next: 0,
    }
}

/// Finite frame sequence produced by [`build_animation`].
#[derive(Clone, Debug)]
pub struct AnimationFrames {
    layout: SceneLayout,
    task: TaskData,
    initial: Frame,
    final_frame: Frame,
    opts: AnimationOpts,
    next: usize,
}

impl AnimationFrames {
    pub fn opts(&self) -> AnimationOpts {
        self.opts
    }

    /// The still repeated during the leading hold.
    pub fn initial(&self) -> &Frame {
        &self.initial
    }

    /// The still repeated during the trailing hold.
    pub fn final_frame(&self) -> &Frame {
        &self.final_frame
    }

    fn frame_at(&self, idx: usize) -> Frame {
        let hold = self.opts.hold_frames as usize;
        let transition = self.opts.transition_frames as usize;
        if idx < hold {
            self.initial.clone()
        } else if idx < hold + transition {
            let i = (idx - hold) as u32;
            let alpha = transition_alpha(i, self.opts.transition_frames);
            self.layout.render(&self.task, ZoneFill::Blend(alpha))
        } else {
            self.final_frame.clone()
        }
    }
}

impl Iterator for AnimationFrames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.next >= self.opts.len_frames() {
            return None;
        }
        let frame = self.frame_at(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.opts.len_frames().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AnimationFrames {}

impl FusedIterator for AnimationFrames {}

#[cfg(test)]
#[path = "../../tests/unit/animation/builder.rs"]
mod tests;
