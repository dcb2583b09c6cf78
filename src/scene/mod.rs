/// Generation settings.
pub mod config;
/// Still-frame composition: lights, mixing zone, border.
pub mod composer;
/// Per-task color data.
pub mod task;
