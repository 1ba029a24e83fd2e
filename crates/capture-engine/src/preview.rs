//! Debug preview rendering.

use std::path::Path;

use gerbil_common::error::{GerbilError, GerbilResult};
use gerbil_model::Point2D;
use image::Rgb;
use imageproc::drawing::draw_line_segment_mut;

use crate::frame::Frame;

pub const BOUNDARY_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const HULL_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Copy of `frame` with the boundary drawn in blue and the hull in yellow.
pub fn annotate(frame: &Frame, boundary: &[Point2D], hull: &[Point2D]) -> Frame {
    let mut preview = frame.clone();
    draw_closed_polyline(&mut preview, boundary, BOUNDARY_COLOR);
    draw_closed_polyline(&mut preview, hull, HULL_COLOR);
    preview
}

fn draw_closed_polyline(canvas: &mut Frame, points: &[Point2D], color: Rgb<u8>) {
    if points.len() < 2 {
        return;
    }

    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        draw_line_segment_mut(
            canvas,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            color,
        );
    }
}

/// Write a preview image; the format follows the file extension.
pub fn save_preview(preview: &Frame, path: &Path) -> GerbilResult<()> {
    preview.save(path).map_err(|e| {
        GerbilError::vision(format!("Failed to save preview {}: {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "Preview saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_draws_both_outlines() {
        let frame = Frame::new(50, 50);
        let boundary = [Point2D::new(5, 5), Point2D::new(40, 5), Point2D::new(40, 40)];
        let hull = [Point2D::new(10, 20), Point2D::new(30, 20)];

        let preview = annotate(&frame, &boundary, &hull);

        assert_eq!(preview.get_pixel(20, 5), &BOUNDARY_COLOR);
        assert_eq!(preview.get_pixel(20, 20), &HULL_COLOR);
        assert_eq!(frame.get_pixel(20, 5), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_annotate_ignores_degenerate_outlines() {
        let frame = Frame::new(8, 8);
        let preview = annotate(&frame, &[], &[Point2D::new(3, 3)]);
        assert_eq!(preview, frame);
    }
}
