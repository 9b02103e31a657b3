//! CPU-side quad vertices for the sprite batcher.

use glam::Vec4;

/// One corner of a particle quad, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position (z is always 0 for 2D sprites).
    pub position: [f32; 3],
    /// Packed ABGR color shared by all four corners of a quad.
    pub color: u32,
    /// Texture coordinate.
    pub uv: [f32; 2],
}

/// The fixed uv corners of a particle quad, in emission order.
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];

/// Pack an RGBA color into the 32-bit vertex format.
///
/// Channels are clamped to `[0, 1]` here and only here; during simulation
/// color channels are free to overshoot their ramp targets.
pub fn pack_color(color: Vec4) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0) as u32;
    let a = (color.w.clamp(0.0, 1.0) * 255.0) as u32;
    (a << 24) | (b << 16) | (g << 8) | r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_color_channels() {
        assert_eq!(pack_color(Vec4::new(1.0, 0.0, 0.0, 1.0)), 0xFF00_00FF);
        assert_eq!(pack_color(Vec4::new(0.0, 0.0, 0.0, 0.0)), 0);
        assert_eq!(pack_color(Vec4::ONE), 0xFFFF_FFFF);
    }

    #[test]
    fn test_pack_color_clamps_overshoot() {
        // Simulation can legally push channels outside [0, 1].
        assert_eq!(pack_color(Vec4::new(2.0, -1.0, 0.5, 1.5)), pack_color(Vec4::new(1.0, 0.0, 0.5, 1.0)));
    }
}
