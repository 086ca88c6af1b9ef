//! Rotating hyperbolic paraboloid ("Pringle") surface.
//!
//! A 40x40 quad mesh of z = x^2 - y^2 is rendered with a painter's
//! depth sort: quads are projected with an orbiting camera, sorted back
//! to front, filled with a yellow-to-brown height ramp and outlined in
//! dark gray. One full turn over 180 frames at 2 degrees per frame.

use std::path::{Path, PathBuf};

use anyhow::Result;
use glam::{DMat4, DVec3, DVec4};
use image::Rgba;

use crate::canvas::{Canvas, View};
use crate::text;
use crate::video::VideoSink;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 1200;
const FPS: u32 = 30;
const FRAMES: usize = 180;

/// Frames handed to the video sink over the full clip.
pub fn frame_count() -> usize {
    FRAMES
}
/// Mesh resolution per axis.
const MESH: usize = 40;
/// Surface extent in u and v.
const EXTENT: f64 = 0.8;

/// Surface height, z = x^2 - y^2 with unit semi-axes.
pub fn surface_z(x: f64, y: f64) -> f64 {
    x * x - y * y
}

/// Height mapped onto a yellow-to-brown ramp; `t` in [0, 1] with 1 at
/// the top of the surface.
pub fn height_color(t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    // Dark brown at the bottom through ochre to pale yellow.
    let stops: [(f64, [u8; 3]); 4] = [
        (0.0, [80, 40, 10]),
        (0.4, [160, 100, 20]),
        (0.7, [230, 180, 60]),
        (1.0, [255, 240, 170]),
    ];
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            let mix = |a: u8, b: u8| (a as f64 * (1.0 - f) + b as f64 * f).round() as u8;
            return Rgba([mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2]), 255]);
        }
    }
    Rgba([255, 240, 170, 255])
}

struct Camera {
    view_proj: DMat4,
    eye: DVec3,
}

fn camera(elev_deg: f64, azim_deg: f64) -> Camera {
    let elev = elev_deg.to_radians();
    let azim = azim_deg.to_radians();
    let eye = DVec3::new(
        3.2 * elev.cos() * azim.cos(),
        3.2 * elev.cos() * azim.sin(),
        3.2 * elev.sin(),
    );
    let view = DMat4::look_at_rh(eye, DVec3::ZERO, DVec3::Z);
    let proj = DMat4::perspective_rh(
        32f64.to_radians(),
        WIDTH as f64 / HEIGHT as f64,
        0.1,
        100.0,
    );
    Camera {
        view_proj: proj * view,
        eye,
    }
}

fn project(cam: &Camera, p: DVec3) -> Option<(f64, f64)> {
    let clip: DVec4 = cam.view_proj * p.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    Some((
        (clip.x / clip.w + 1.0) * 0.5 * WIDTH as f64,
        (1.0 - clip.y / clip.w) * 0.5 * HEIGHT as f64,
    ))
}

fn draw_segment_3d(canvas: &mut Canvas, cam: &Camera, a: DVec3, b: DVec3, color: Rgba<u8>, width: f32) {
    if let (Some(pa), Some(pb)) = (project(cam, a), project(cam, b)) {
        canvas.line_px(
            (pa.0 as f32, pa.1 as f32),
            (pb.0 as f32, pb.1 as f32),
            color,
            width,
        );
    }
}

pub fn generate(output_dir: &Path) -> Result<PathBuf> {
    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let yellow = Rgba([255, 255, 0, 255]);
    let edge = Rgba([68, 68, 68, 255]);
    let mut canvas = Canvas::new(WIDTH, HEIGHT, background);
    // Identity view: world coordinates are pixel coordinates, since all
    // projection happens through the camera here.
    canvas.set_view(View::full(
        WIDTH, HEIGHT,
        0.0, WIDTH as f64,
        HEIGHT as f64, 0.0,
    ));

    // Mesh vertices, shared by all frames.
    let grid: Vec<Vec<DVec3>> = (0..=MESH)
        .map(|i| {
            let x = -EXTENT + 2.0 * EXTENT * i as f64 / MESH as f64;
            (0..=MESH)
                .map(|j| {
                    let y = -EXTENT + 2.0 * EXTENT * j as f64 / MESH as f64;
                    DVec3::new(x, y, surface_z(x, y))
                })
                .collect()
        })
        .collect();
    let z_min = -EXTENT * EXTENT;
    let z_max = EXTENT * EXTENT;

    let mut sink = VideoSink::create(output_dir, "hyperbolic_paraboloid", FPS)?;
    let elev = 28.0;

    for frame in 0..frame_count() {
        canvas.clear();
        let cam = camera(elev, frame as f64 * 2.0);

        // Coordinate axes through the surface.
        for (a, b) in [
            (DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)),
            (DVec3::new(0.0, -1.0, 0.0), DVec3::new(0.0, 1.0, 0.0)),
            (DVec3::new(0.0, 0.0, -1.0), DVec3::new(0.0, 0.0, 1.0)),
        ] {
            draw_segment_3d(&mut canvas, &cam, a, b, white, 1.0);
        }
        // Faint reference grid on the floor plane.
        let grid_c = canvas.faded(white, 0.2);
        for k in [-1.0, -0.5, 0.5, 1.0] {
            draw_segment_3d(&mut canvas, &cam, DVec3::new(-1.0, k, -0.9), DVec3::new(1.0, k, -0.9), grid_c, 1.0);
            draw_segment_3d(&mut canvas, &cam, DVec3::new(k, -1.0, -0.9), DVec3::new(k, 1.0, -0.9), grid_c, 1.0);
        }

        // Painter's algorithm: sort quads far to near by centroid
        // distance to the eye, then fill and outline each.
        let mut quads: Vec<(f64, [DVec3; 4])> = Vec::with_capacity(MESH * MESH);
        for i in 0..MESH {
            for j in 0..MESH {
                let q = [
                    grid[i][j],
                    grid[i + 1][j],
                    grid[i + 1][j + 1],
                    grid[i][j + 1],
                ];
                let centroid = (q[0] + q[1] + q[2] + q[3]) / 4.0;
                let dist = (centroid - cam.eye).length();
                quads.push((dist, q));
            }
        }
        quads.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, q) in &quads {
            let screen: Vec<(f64, f64)> = match q
                .iter()
                .map(|&p| project(&cam, p))
                .collect::<Option<Vec<_>>>()
            {
                Some(s) => s,
                None => continue,
            };
            let centroid_z = (q[0].z + q[1].z + q[2].z + q[3].z) / 4.0;
            let t = (centroid_z - z_min) / (z_max - z_min);
            let fill = height_color(t);
            canvas.polygon_fill(&screen, fill);
            for k in 0..4 {
                let (a, b) = (screen[k], screen[(k + 1) % 4]);
                canvas.line_px(
                    (a.0 as f32, a.1 as f32),
                    (b.0 as f32, b.1 as f32),
                    edge,
                    1.0,
                );
            }
        }

        let img = canvas.image_mut();
        text::draw_text_centered(img, WIDTH as i32 / 2, 60, "PRINGLE", 6, yellow);
        text::draw_text_centered(img, WIDTH as i32 / 2, 120, "_____________", 3, yellow);
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 210, "x = u", 3, yellow);
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 160, "y = v", 3, yellow);
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 110, "z = x²/a² - y²/b²", 3, yellow);
        text::draw_text_centered(img, WIDTH as i32 / 2, HEIGHT as i32 - 50, "@maths.1089", 2, Rgba([119, 119, 119, 255]));

        sink.add_frame(canvas.image())?;
    }

    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saddle_shape() {
        // Rising along x, falling along y, zero on the diagonals.
        assert!(surface_z(0.8, 0.0) > 0.0);
        assert!(surface_z(0.0, 0.8) < 0.0);
        assert_eq!(surface_z(0.5, 0.5), 0.0);
        assert_eq!(surface_z(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_height_color_ramp_brightens() {
        let low = height_color(0.0);
        let high = height_color(1.0);
        assert!(high[0] > low[0] && high[1] > low[1]);
        let mid = height_color(0.5);
        assert!(mid[1] > low[1] && mid[1] < high[1]);
    }

    #[test]
    fn test_projection_centers_origin() {
        let cam = camera(28.0, 45.0);
        let (x, y) = project(&cam, DVec3::ZERO).unwrap();
        assert!((x - WIDTH as f64 / 2.0).abs() < 1.0);
        assert!((y - HEIGHT as f64 / 2.0).abs() < 1.0);
    }

    #[test]
    fn test_rotation_is_a_full_turn() {
        assert_eq!(FRAMES * 2, 360);
    }
}
