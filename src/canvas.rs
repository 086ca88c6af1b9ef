//! Raster canvas with a world-coordinate view transform.
//!
//! This is the drawing surface every animation renders into: an RGBA buffer
//! plus a mapping from scene coordinates (y up) to pixel coordinates (y
//! down). Primitives are deliberately minimal (segments, polylines,
//! circles, polygons, markers), which is all the scenes need.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

/// Maps a world rectangle onto a pixel rectangle.
///
/// `world` is (x_min, x_max, y_min, y_max) with y increasing upward;
/// `px` is (left, top, width, height) with y increasing downward.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub world: (f64, f64, f64, f64),
    pub px: (f32, f32, f32, f32),
}

impl View {
    /// View covering the full image.
    pub fn full(width: u32, height: u32, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            world: (x_min, x_max, y_min, y_max),
            px: (0.0, 0.0, width as f32, height as f32),
        }
    }

    /// View covering a pixel sub-rectangle (stacked panels).
    pub fn panel(
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Self {
        Self {
            world: (x_min, x_max, y_min, y_max),
            px: (left, top, width, height),
        }
    }

    /// World point to pixel point. Y axis flips here.
    pub fn to_px(&self, x: f64, y: f64) -> (f32, f32) {
        let (x_min, x_max, y_min, y_max) = self.world;
        let (left, top, w, h) = self.px;
        let fx = ((x - x_min) / (x_max - x_min)) as f32;
        let fy = ((y - y_min) / (y_max - y_min)) as f32;
        (left + fx * w, top + (1.0 - fy) * h)
    }

    /// Pixels per world unit along x (used to size circles drawn in world units).
    pub fn scale_x(&self) -> f32 {
        self.px.2 / (self.world.1 - self.world.0) as f32
    }
}

/// Linear blend of a color toward a background, the raster stand-in for
/// artist alpha on the solid dark backgrounds all scenes use.
pub fn fade(color: Rgba<u8>, alpha: f32, background: Rgba<u8>) -> Rgba<u8> {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |c: u8, b: u8| (c as f32 * a + b as f32 * (1.0 - a)).round() as u8;
    Rgba([
        mix(color[0], background[0]),
        mix(color[1], background[1]),
        mix(color[2], background[2]),
        255,
    ])
}

/// Drawing surface for one animation.
pub struct Canvas {
    img: RgbaImage,
    background: Rgba<u8>,
    view: View,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        let img = RgbaImage::from_pixel(width, height, background);
        let view = View::full(width, height, 0.0, 1.0, 0.0, 1.0);
        Self {
            img,
            background,
            view,
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    /// Reset every pixel to the background color (start of a frame).
    pub fn clear(&mut self) {
        for px in self.img.pixels_mut() {
            *px = self.background;
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Fade a color toward this canvas's background.
    pub fn faded(&self, color: Rgba<u8>, alpha: f32) -> Rgba<u8> {
        fade(color, alpha, self.background)
    }

    /// Line segment in world coordinates, `width_px` pixels thick.
    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba<u8>, width_px: f32) {
        let a = self.view.to_px(x0, y0);
        let b = self.view.to_px(x1, y1);
        self.line_px(a, b, color, width_px);
    }

    /// Line segment in pixel coordinates.
    pub fn line_px(&mut self, a: (f32, f32), b: (f32, f32), color: Rgba<u8>, width_px: f32) {
        if !(a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()) {
            return;
        }
        let n = width_px.round().max(1.0) as i32;
        if n == 1 {
            draw_line_segment_mut(&mut self.img, a, b, color);
            return;
        }
        // Offset parallel 1px strokes perpendicular to the segment.
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt().max(1e-6);
        let (nx, ny) = (-dy / len, dx / len);
        for i in 0..n {
            let off = i as f32 - (n - 1) as f32 / 2.0;
            draw_line_segment_mut(
                &mut self.img,
                (a.0 + nx * off, a.1 + ny * off),
                (b.0 + nx * off, b.1 + ny * off),
                color,
            );
        }
    }

    /// Connected line through the given world points.
    pub fn polyline(&mut self, points: &[(f64, f64)], color: Rgba<u8>, width_px: f32) {
        for pair in points.windows(2) {
            self.line(
                pair[0].0, pair[0].1, pair[1].0, pair[1].1, color, width_px,
            );
        }
    }

    /// Dashed segment, dash/gap lengths in pixels.
    pub fn dashed_line(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        color: Rgba<u8>,
        width_px: f32,
        dash_px: f32,
    ) {
        let a = self.view.to_px(x0, y0);
        let b = self.view.to_px(x1, y1);
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-3 {
            return;
        }
        let step = dash_px.max(1.0);
        let mut t = 0.0;
        while t < len {
            let t2 = (t + step).min(len);
            let p = (a.0 + dx * t / len, a.1 + dy * t / len);
            let q = (a.0 + dx * t2 / len, a.1 + dy * t2 / len);
            self.line_px(p, q, color, width_px);
            t += 2.0 * step;
        }
    }

    /// Circle outline centered at a world point with a world-unit radius.
    /// Drawn as a polyline so non-square views still produce round circles
    /// when their aspect is uniform, and visible ellipses when it is not.
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba<u8>, width_px: f32) {
        const SEGMENTS: usize = 96;
        let mut prev = self.view.to_px(cx + radius, cy);
        for i in 1..=SEGMENTS {
            let a = i as f64 / SEGMENTS as f64 * std::f64::consts::TAU;
            let p = self.view.to_px(cx + radius * a.cos(), cy + radius * a.sin());
            self.line_px(prev, p, color, width_px);
            prev = p;
        }
    }

    /// Arc outline from `start` to `end` (radians, counter-clockwise).
    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        color: Rgba<u8>,
        width_px: f32,
    ) {
        let sweep = end - start;
        let segments = ((sweep.abs() / std::f64::consts::TAU * 96.0).ceil() as usize).max(2);
        let mut prev = self
            .view
            .to_px(cx + radius * start.cos(), cy + radius * start.sin());
        for i in 1..=segments {
            let a = start + sweep * i as f64 / segments as f64;
            let p = self.view.to_px(cx + radius * a.cos(), cy + radius * a.sin());
            self.line_px(prev, p, color, width_px);
            prev = p;
        }
    }

    /// Filled dot marker with a pixel radius (bobs, trace points).
    pub fn marker(&mut self, x: f64, y: f64, radius_px: i32, color: Rgba<u8>) {
        let (px, py) = self.view.to_px(x, y);
        if !(px.is_finite() && py.is_finite()) {
            return;
        }
        draw_filled_circle_mut(&mut self.img, (px as i32, py as i32), radius_px, color);
    }

    /// Filled polygon in world coordinates.
    pub fn polygon_fill(&mut self, points: &[(f64, f64)], color: Rgba<u8>) {
        if points.len() < 3 {
            return;
        }
        let mut poly: Vec<Point<i32>> = points
            .iter()
            .map(|&(x, y)| {
                let (px, py) = self.view.to_px(x, y);
                Point::new(px as i32, py as i32)
            })
            .collect();
        // imageproc rejects polygons whose first and last vertex coincide.
        if poly.first() == poly.last() {
            poly.pop();
        }
        if poly.len() >= 3 {
            draw_polygon_mut(&mut self.img, &poly, color);
        }
    }

    /// Vertical fill from `y0` up to `y1` at world x (one column of a
    /// fill-between region).
    pub fn fill_column(&mut self, x: f64, y0: f64, y1: f64, color: Rgba<u8>) {
        let a = self.view.to_px(x, y0);
        let b = self.view.to_px(x, y1);
        self.line_px(a, b, color, 1.0);
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_maps_corners() {
        let view = View::full(100, 200, -1.0, 1.0, -2.0, 2.0);

        // World origin lands in the pixel center.
        assert_eq!(view.to_px(0.0, 0.0), (50.0, 100.0));

        // Top-left world corner (x_min, y_max) is pixel (0, 0).
        assert_eq!(view.to_px(-1.0, 2.0), (0.0, 0.0));

        // Bottom-right world corner is (width, height).
        assert_eq!(view.to_px(1.0, -2.0), (100.0, 200.0));
    }

    #[test]
    fn test_panel_view_offsets() {
        let view = View::panel(10.0, 20.0, 80.0, 40.0, 0.0, 8.0, 0.0, 4.0);
        assert_eq!(view.to_px(0.0, 4.0), (10.0, 20.0));
        assert_eq!(view.to_px(8.0, 0.0), (90.0, 60.0));
    }

    #[test]
    fn test_fade_endpoints() {
        let bg = Rgba([0, 0, 0, 255]);
        let c = Rgba([200, 100, 50, 255]);
        assert_eq!(fade(c, 1.0, bg), c);
        assert_eq!(fade(c, 0.0, bg), bg);
        let half = fade(c, 0.5, bg);
        assert_eq!(half[0], 100);
    }

    #[test]
    fn test_line_touches_pixels() {
        let mut canvas = Canvas::new(10, 10, Rgba([0, 0, 0, 255]));
        canvas.set_view(View::full(10, 10, 0.0, 10.0, 0.0, 10.0));
        canvas.line(0.0, 5.0, 10.0, 5.0, Rgba([255, 255, 255, 255]), 1.0);
        let lit = canvas.image().pixels().filter(|p| p[0] > 0).count();
        assert!(lit >= 9, "horizontal line should light a full row, got {}", lit);
    }

    #[test]
    fn test_clear_resets_to_background() {
        let bg = Rgba([10, 20, 30, 255]);
        let mut canvas = Canvas::new(4, 4, bg);
        canvas.marker(0.5, 0.5, 2, Rgba([255, 0, 0, 255]));
        canvas.clear();
        assert!(canvas.image().pixels().all(|p| *p == bg));
    }
}
