//! Shared drawing utilities for the tiling viewer.

use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
use nalgebra::Point2;
use tiling_core::{EdgeRef, Polygon, Tiling, ViewTransform};

pub mod config;
pub mod controls;
pub mod logging;

pub use config::ViewerConfig;
pub use controls::{Command, Controls};

/// Fill colors, indexed by the color a polygon got from the session.
pub const PALETTE: [Color; 11] = [
    Color::new(0.9, 0.1, 0.1, 1.0),
    Color::new(1.0, 0.5, 0.0, 1.0),
    Color::new(1.0, 0.9, 0.0, 1.0),
    Color::new(0.1, 0.8, 0.1, 1.0),
    Color::new(0.6, 0.8, 1.0, 1.0),
    Color::new(0.1, 0.1, 0.9, 1.0),
    Color::new(0.6, 0.0, 0.9, 1.0),
    Color::new(1.0, 0.3, 0.7, 1.0),
    Color::new(0.6, 0.3, 0.2, 1.0),
    Color::new(0.6, 0.6, 0.6, 1.0),
    Color::new(1.0, 1.0, 1.0, 1.0),
];

const OUTLINE: Color = Color::new(0.05, 0.05, 0.08, 1.0);
const OPEN_EDGE: Color = Color::new(0.95, 0.95, 0.95, 1.0);
const CURSOR_EDGE: Color = Color::new(1.0, 0.2, 0.2, 1.0);

/// Palette entry for a session color index, cycling past the end.
pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Maps view coordinates to pixels.
///
/// The smaller window side spans `[-1, 1]`, so shapes keep their aspect ratio
/// whatever the window size. The y axis points up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    center: Vec2,
    scale: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            center: vec2(width / 2.0, height / 2.0),
            scale: width.min(height) / 2.0,
        }
    }

    /// Uses the current window size.
    pub fn current() -> Self {
        Self::new(screen_width(), screen_height())
    }

    /// Pixels per view unit.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_pixels(&self, view: &ViewTransform, point: &Point2<f64>) -> Vec2 {
        let p = view.apply(point);
        vec2(
            self.center.x + p.x as f32 * self.scale,
            self.center.y - p.y as f32 * self.scale,
        )
    }
}

/// Draws a polygon by triangulating it (fan triangulation) using a Mesh.
pub fn draw_polygon(polygon: &Polygon, view: &ViewTransform, screen: &Screen) {
    let corners: Vec<Vec2> = polygon
        .world_vertices()
        .map(|p| screen.to_pixels(view, &p))
        .collect();
    if corners.len() < 3 {
        return;
    }

    let color = palette_color(polygon.color());
    let mesh_vertices: Vec<Vertex> = corners
        .iter()
        .map(|p| Vertex::new2(vec3(p.x, p.y, 0.0), vec2(0.0, 0.0), color))
        .collect();

    // Regular polygons are convex, so vertex 0 sees every other edge.
    let mut indices: Vec<u16> = Vec::with_capacity((corners.len() - 2) * 3);
    for i in 1..corners.len() - 1 {
        indices.push(0);
        indices.push(i as u16);
        indices.push((i + 1) as u16);
    }

    draw_mesh(&Mesh {
        vertices: mesh_vertices,
        indices,
        texture: None,
    });

    for (i, a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        draw_line(a.x, a.y, b.x, b.y, 1.5, OUTLINE);
    }
}

fn draw_edge(tiling: &Tiling, edge: EdgeRef, screen: &Screen, thickness: f32, color: Color) {
    if let Ok((a, b)) = tiling.edge_segment(edge) {
        let a = screen.to_pixels(tiling.view(), &a);
        let b = screen.to_pixels(tiling.view(), &b);
        draw_line(a.x, a.y, b.x, b.y, thickness, color);
    }
}

/// Draws every polygon, underlines the open edges and highlights the cursor.
pub fn draw_tiling(tiling: &Tiling, screen: &Screen) {
    for polygon in tiling.iter_polygons() {
        draw_polygon(polygon, tiling.view(), screen);
    }
    for edge in tiling.iter_boundary_edges() {
        draw_edge(tiling, edge, screen, 2.0, OPEN_EDGE);
    }
    draw_edge(tiling, tiling.current_cursor_edge(), screen, 5.0, CURSOR_EDGE);
}
