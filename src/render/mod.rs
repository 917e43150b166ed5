//! Frame scene construction and CPU rasterization.

/// Premultiplied RGBA8 buffer compositing for the trail.
pub mod composite;
/// `vello_cpu` rasterizer with a persistent trail buffer.
pub mod cpu;
/// Seven-segment hex glyphs for the signature overlay.
pub mod glyphs;
/// Pure scene builder: pattern + frame input → draw commands.
pub mod scene;
/// Word wrap and Parley-shaped intention overlay.
pub mod text;
