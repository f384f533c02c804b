//! Framebuffer, projection, and the two rasterization strategies

use super::math::{Mat4, Vec4};
use super::types::{Color, Mesh, RenderMode, RenderSettings};

/// Depth clear sentinel, far beyond any projected vertex
const DEPTH_CLEAR: f32 = 1e9;

/// Triangles with less than this much doubled signed area are dropped
const AREA_EPSILON: f32 = 1e-6;

/// Edge-function weights this far outside zero still count as covered,
/// so pixels exactly on shared edges land deterministically
const EDGE_EPSILON: f32 = -1e-6;

/// Signed-area edge function: positive when `(cx, cy)` lies on the
/// clockwise side of the directed segment `(ax, ay) -> (bx, by)`
#[inline]
fn edge(ax: f32, ay: f32, bx: f32, by: f32, cx: f32, cy: f32) -> f32 {
    (cx - ax) * (by - ay) - (cy - ay) * (bx - ax)
}

/// A vertex projected to screen space, camera-space z kept for the depth test
#[derive(Debug, Clone, Copy)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Project a camera-space vertex to screen space.
/// Returns `None` at or behind the near plane; callers skip the whole
/// triangle when any of its vertices fails.
pub fn project(v: Vec4, width: usize, height: usize, scale: f32) -> Option<ScreenPoint> {
    if v.z <= 0.0 {
        return None;
    }
    Some(ScreenPoint {
        x: width as f32 / 2.0 + (v.x / v.z) * scale,
        y: height as f32 / 2.0 - (v.y / v.z) * scale,
        depth: v.z,
    })
}

/// Packed-color framebuffer with an optional depth plane.
///
/// Color cells are RGB565; the display plane is regenerated from them by
/// `export` once per frame and is never written directly.
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    /// Packed RGB565 color plane
    pub cells: Vec<u16>,
    /// Camera-space z per cell; absent in wireframe runs
    pub depth: Option<Vec<f32>>,
    /// `0x00RRGGBB` display plane
    display: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, depth_enabled: bool) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
            depth: depth_enabled.then(|| vec![DEPTH_CLEAR; width * height]),
            display: vec![0; width * height],
        }
    }

    /// Fill every color cell with `color` packed once; reset the depth plane
    pub fn clear(&mut self, color: Color) {
        let packed = color.pack();
        self.cells.fill(packed);
        if let Some(depth) = &mut self.depth {
            depth.fill(DEPTH_CLEAR);
        }
    }

    /// Bounds-checked write; out-of-range coordinates are dropped
    #[inline]
    pub fn write_cell(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.cells[idx] = color.pack();
    }

    /// Bounds-checked write that lands only when `depth` is strictly nearer
    /// than the stored value. Color and depth update together; without a
    /// depth plane the write is unconditional.
    #[inline]
    pub fn write_cell_depth(&mut self, x: i32, y: i32, depth: f32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if let Some(plane) = &mut self.depth {
            if depth >= plane[idx] {
                return;
            }
            plane[idx] = depth;
        }
        self.cells[idx] = color.pack();
    }

    /// Regenerate the display plane from the packed cells: every cell is
    /// expanded to `0x00RRGGBB`. Pure function of the current cells.
    pub fn export(&mut self) -> &[u32] {
        for (cell, out) in self.cells.iter().zip(self.display.iter_mut()) {
            *out = Color::unpack(*cell).to_xrgb();
        }
        &self.display
    }
}

/// Rasterize a depth-tested solid triangle from projected vertices
fn fill_triangle(fb: &mut Framebuffer, a: ScreenPoint, b: ScreenPoint, c: ScreenPoint, color: Color) {
    let min_x = (a.x.min(b.x).min(c.x).floor() as i32).max(0);
    let min_y = (a.y.min(b.y).min(c.y).floor() as i32).max(0);
    let max_x = (a.x.max(b.x).max(c.x).ceil() as i32).min(fb.width as i32 - 1);
    let max_y = (a.y.max(b.y).max(c.y).ceil() as i32).min(fb.height as i32 - 1);

    let area = edge(a.x, a.y, b.x, b.y, c.x, c.y);
    if area.abs() < AREA_EPSILON {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let w0 = edge(b.x, b.y, c.x, c.y, px, py) / area;
            let w1 = edge(c.x, c.y, a.x, a.y, px, py) / area;
            let w2 = edge(a.x, a.y, b.x, b.y, px, py) / area;
            if w0 >= EDGE_EPSILON && w1 >= EDGE_EPSILON && w2 >= EDGE_EPSILON {
                let depth = w0 * a.depth + w1 * b.depth + w2 * c.depth;
                fb.write_cell_depth(x, y, depth, color);
            }
        }
    }
}

/// Draw a line with Bresenham's algorithm, no depth test
fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        fb.write_cell(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a projected triangle's three edges
fn wire_triangle(fb: &mut Framebuffer, a: ScreenPoint, b: ScreenPoint, c: ScreenPoint, color: Color) {
    let (ax, ay) = (a.x.round() as i32, a.y.round() as i32);
    let (bx, by) = (b.x.round() as i32, b.y.round() as i32);
    let (cx, cy) = (c.x.round() as i32, c.y.round() as i32);
    draw_line(fb, ax, ay, bx, by, color);
    draw_line(fb, bx, by, cx, cy, color);
    draw_line(fb, cx, cy, ax, ay, color);
}

/// Per-run renderer: framebuffer, mesh, settings, and the animation angles
pub struct Renderer {
    pub fb: Framebuffer,
    pub settings: RenderSettings,
    pub angle_x: f32,
    pub angle_y: f32,
    mesh: Mesh,
}

impl Renderer {
    pub fn new(width: usize, height: usize, settings: RenderSettings) -> Self {
        let depth_enabled = settings.mode == RenderMode::Filled;
        Self {
            fb: Framebuffer::new(width, height, depth_enabled),
            settings,
            angle_x: 0.0,
            angle_y: 0.0,
            mesh: Mesh::cube(),
        }
    }

    /// Switch strategy mid-run, keeping the current rotation. The buffers
    /// are rebuilt because the depth plane only exists for filled runs.
    pub fn set_settings(&mut self, settings: RenderSettings) {
        let depth_enabled = settings.mode == RenderMode::Filled;
        self.fb = Framebuffer::new(self.fb.width, self.fb.height, depth_enabled);
        self.settings = settings;
    }

    /// Render one frame and return the display-ready buffer.
    ///
    /// `dx`/`dy` advance the X/Y angles unless `paused`; the caller folds
    /// base spin rates and keyboard deltas into them. The whole sequence
    /// (clear, transform, rasterize, export) runs to completion here.
    pub fn render_frame(&mut self, dx: f32, dy: f32, paused: bool) -> &[u32] {
        if !paused {
            self.angle_y += dy;
            self.angle_x += dx;
        }

        // Y rotation applies first under the row-vector convention
        let rotation = Mat4::rotation_y(self.angle_y) * Mat4::rotation_x(self.angle_x);

        self.fb.clear(self.settings.background);

        let (width, height) = (self.fb.width, self.fb.height);
        let scale = self.settings.scale;
        let distance = self.settings.distance;

        for face in &self.mesh.faces {
            let mut v0 = self.mesh.vertices[face.v0] * rotation;
            let mut v1 = self.mesh.vertices[face.v1] * rotation;
            let mut v2 = self.mesh.vertices[face.v2] * rotation;
            v0.z += distance;
            v1.z += distance;
            v2.z += distance;

            let (Some(a), Some(b), Some(c)) = (
                project(v0, width, height, scale),
                project(v1, width, height, scale),
                project(v2, width, height, scale),
            ) else {
                continue;
            };

            match self.settings.mode {
                RenderMode::Filled => fill_triangle(&mut self.fb, a, b, c, face.color),
                RenderMode::Wireframe => wire_triangle(&mut self.fb, a, b, c, face.color),
            }
        }

        self.fb.export()
    }
}
