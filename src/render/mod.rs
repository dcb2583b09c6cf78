//! CPU rasterization: opaque frames, premultiplied overlays and the radial light glow.

/// Premultiplied RGBA8 "over" compositing.
pub mod composite;
/// Frame and overlay buffers with clipped drawing primitives.
pub mod frame;
/// Radial light glow.
pub mod light;
