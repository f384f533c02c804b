//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::Vec4;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    pub const YELLOW: Color = Color { r: 255, g: 255, b: 0 };
    pub const CYAN: Color = Color { r: 0, g: 255, b: 255 };
    pub const MAGENTA: Color = Color { r: 255, g: 0, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Truncate to 5-6-5 and pack into one cell, red in the top bits
    pub fn pack(self) -> u16 {
        let r5 = (self.r >> 3) as u16;
        let g6 = (self.g >> 2) as u16;
        let b5 = (self.b >> 3) as u16;
        (r5 << 11) | (g6 << 5) | b5
    }

    /// Expand a packed cell back to 8 bits per channel. The low bits are
    /// filled by replicating each channel's own high bits, so full
    /// intensity expands to 255 rather than 248. The round-trip through
    /// `pack` is lossy on purpose.
    pub fn unpack(cell: u16) -> Color {
        let r5 = ((cell >> 11) & 0x1F) as u8;
        let g6 = ((cell >> 5) & 0x3F) as u8;
        let b5 = (cell & 0x1F) as u8;
        Color {
            r: (r5 << 3) | (r5 >> 2),
            g: (g6 << 2) | (g6 >> 4),
            b: (b5 << 3) | (b5 >> 2),
        }
    }

    /// `0x00RRGGBB`, the display surface's channel order
    pub fn to_xrgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

/// A triangle face: indices into the mesh vertex table plus a solid color
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub color: Color,
}

impl Face {
    pub fn new(v0: usize, v1: usize, v2: usize, color: Color) -> Self {
        Self { v0, v1, v2, color }
    }
}

/// A fixed triangle mesh, built once at startup and never mutated
pub struct Mesh {
    pub vertices: Vec<Vec4>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Unit cube: 8 corners, 12 triangles, one solid color per side
    pub fn cube() -> Mesh {
        let vertices = vec![
            Vec4::point(-1.0, -1.0, -1.0),
            Vec4::point(1.0, -1.0, -1.0),
            Vec4::point(1.0, 1.0, -1.0),
            Vec4::point(-1.0, 1.0, -1.0),
            Vec4::point(-1.0, -1.0, 1.0),
            Vec4::point(1.0, -1.0, 1.0),
            Vec4::point(1.0, 1.0, 1.0),
            Vec4::point(-1.0, 1.0, 1.0),
        ];

        let faces = vec![
            Face::new(0, 1, 2, Color::RED),
            Face::new(0, 2, 3, Color::RED),
            Face::new(4, 5, 6, Color::GREEN),
            Face::new(4, 6, 7, Color::GREEN),
            Face::new(0, 1, 5, Color::BLUE),
            Face::new(0, 5, 4, Color::BLUE),
            Face::new(2, 3, 7, Color::YELLOW),
            Face::new(2, 7, 6, Color::YELLOW),
            Face::new(1, 2, 6, Color::CYAN),
            Face::new(1, 6, 5, Color::CYAN),
            Face::new(0, 3, 7, Color::MAGENTA),
            Face::new(0, 7, 4, Color::MAGENTA),
        ];

        Mesh { vertices, faces }
    }
}

/// Rasterization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Depth-tested solid triangles
    Filled,
    /// Bresenham edges, no fill, no depth
    Wireframe,
}

/// Projection and clear settings for one run
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub mode: RenderMode,
    /// Pixels per unit of x/z at the projection divide
    pub scale: f32,
    /// Forward translation applied after rotation; keeps the cube
    /// clear of the near plane
    pub distance: f32,
    pub background: Color,
}

impl RenderSettings {
    pub fn filled() -> Self {
        Self {
            mode: RenderMode::Filled,
            scale: 200.0,
            distance: 3.0,
            background: Color::BLACK,
        }
    }

    pub fn wireframe() -> Self {
        Self {
            mode: RenderMode::Wireframe,
            scale: 160.0,
            distance: 4.0,
            background: Color::BLACK,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::filled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_extremes() {
        assert_eq!(Color::BLACK.pack(), 0x0000);
        assert_eq!(Color::WHITE.pack(), 0xFFFF);
        assert_eq!(Color::RED.pack(), 0xF800);
        assert_eq!(Color::GREEN.pack(), 0x07E0);
        assert_eq!(Color::BLUE.pack(), 0x001F);
    }

    #[test]
    fn expand_replicates_high_bits() {
        assert_eq!(Color::unpack(0xFFFF), Color::WHITE);
        assert_eq!(Color::unpack(0xF800), Color::RED);
        assert_eq!(Color::unpack(0x07E0), Color::GREEN);
        assert_eq!(Color::unpack(0x001F), Color::BLUE);
        // Low bits come from the channel's own high bits, not zero-fill
        assert_eq!(Color::unpack(0b10001 << 11).r, (0b10001 << 3) | (0b10001 >> 2));
        assert_eq!(Color::unpack(1 << 11).r, 1 << 3);
    }

    #[test]
    fn round_trip_error_bounds() {
        for r in (0..=255u16).step_by(7) {
            for g in (0..=255u16).step_by(11) {
                for b in (0..=255u16).step_by(13) {
                    let c = Color::new(r as u8, g as u8, b as u8);
                    let back = Color::unpack(c.pack());
                    assert!((c.r as i16 - back.r as i16).abs() <= 7);
                    assert!((c.g as i16 - back.g as i16).abs() <= 3);
                    assert!((c.b as i16 - back.b as i16).abs() <= 7);
                }
            }
        }
    }

    #[test]
    fn pack_is_idempotent_after_expansion() {
        for cell in [0x0000u16, 0xFFFF, 0xF800, 0x07E0, 0x001F, 0x1234, 0xABCD] {
            assert_eq!(Color::unpack(cell).pack(), cell);
        }
        let c = Color::new(201, 77, 13);
        assert_eq!(Color::unpack(c.pack()).pack(), c.pack());
    }

    #[test]
    fn xrgb_channel_order() {
        assert_eq!(Color::new(0x11, 0x22, 0x33).to_xrgb(), 0x0011_2233);
        assert_eq!(Color::RED.to_xrgb(), 0x00FF_0000);
    }

    #[test]
    fn cube_has_six_solid_sides() {
        let mesh = Mesh::cube();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.faces.len(), 12);
        // Two triangles per side, same color
        for pair in mesh.faces.chunks(2) {
            assert_eq!(pair[0].color, pair[1].color);
        }
        for face in &mesh.faces {
            assert!(face.v0 < 8 && face.v1 < 8 && face.v2 < 8);
        }
    }
}
