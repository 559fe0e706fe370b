//! Lyon-based vector rendering.
//!
//! Shapes are tessellated on the CPU into a flat triangle-list buffer
//! (x, y, r, g, b, a per vertex) that the host uploads as-is.
//!
//! ```ignore
//! // In your Game::render():
//! ctx.vectors.stroke_circle(center, 100.0, 2.0, VectorColor::LIGHT_GRAY);
//! ctx.vectors.stroke_polyline(&path, 4.0, VectorColor::WHITE);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

const TOLERANCE: f32 = 0.5;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from 0-255 channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const LIGHT_GRAY: Self = Self::rgb(0.89, 0.91, 0.94);
    pub const DARK_GRAY: Self = Self::rgb(0.25, 0.25, 0.25);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        let c = self.color;
        VectorVertex { x: p.x, y: p.y, r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        let c = self.color;
        VectorVertex { x: p.x, y: p.y, r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

/// Tessellators plus the per-frame output buffer.
///
/// Cleared each frame by the runner and filled by `Game::render`.
/// Shapes that would overflow `max_vertices` are dropped whole.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn new(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// The flat float buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        let incoming = self.geometry.indices.len();
        if self.vertex_count() + incoming > self.max_vertices {
            log::warn!(
                "vector buffer full ({} + {} > {}), shape dropped",
                self.vertex_count(),
                incoming,
                self.max_vertices
            );
        } else {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    pub fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: VectorColor) {
        if size.x <= 0.0 || size.y <= 0.0 || color.a <= 0.0 {
            return;
        }
        self.fill_path(&rect_path(pos, size), color);
    }

    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("fill tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.stroke_path(&builder.build(), width, color);
    }

    pub fn stroke_rect(&mut self, pos: Vec2, size: Vec2, width: f32, color: VectorColor) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        self.stroke_path(&rect_path(pos, size), width, color);
    }

    /// Stroke an open polyline. Fewer than two points draws nothing.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        self.stroke_path(&builder.build(), width, color);
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        if width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(TOLERANCE).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("stroke tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

fn rect_path(pos: Vec2, size: Vec2) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(pos.x, pos.y));
    builder.line_to(point(pos.x + size.x, pos.y));
    builder.line_to(point(pos.x + size.x, pos.y + size.y));
    builder.line_to(point(pos.x, pos.y + size.y));
    builder.close();
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn rgb8_scales_channels() {
        let c = VectorColor::rgb8(255, 128, 0);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.5).abs() < 0.01);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.with_alpha(0.5).a, 0.5);
    }

    #[test]
    fn fill_rect_produces_two_triangles() {
        let mut state = VectorState::new(1024);
        state.fill_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 6);
        assert_eq!(state.as_slice().len(), 6 * VectorVertex::FLOATS);
    }

    #[test]
    fn stroke_polyline_needs_two_points() {
        let mut state = VectorState::new(1024);
        state.stroke_polyline(&[Vec2::ZERO], 2.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);

        state.stroke_polyline(&[Vec2::ZERO, Vec2::new(50.0, 50.0)], 2.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
    }

    #[test]
    fn transparent_shapes_are_skipped() {
        let mut state = VectorState::new(1024);
        state.fill_circle(Vec2::new(10.0, 10.0), 5.0, VectorColor::WHITE.with_alpha(0.0));
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn overflow_drops_whole_shape() {
        let mut state = VectorState::new(8);
        state.fill_rect(Vec2::ZERO, Vec2::ONE * 10.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 6);
        state.fill_rect(Vec2::ONE * 20.0, Vec2::ONE * 10.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 6);
    }

    #[test]
    fn clear_resets_buffer() {
        let mut state = VectorState::new(1024);
        state.stroke_circle(Vec2::new(50.0, 50.0), 20.0, 2.0, VectorColor::LIGHT_GRAY);
        assert!(state.vertex_count() > 0);
        state.clear();
        assert_eq!(state.vertex_count(), 0);
    }
}
