//! Silhouette extraction.
//!
//! The session asks two things of the vision stage: the largest outer
//! boundary in a frame, and the convex hull of a boundary. Everything else
//! about how the silhouette is found stays behind [`SilhouetteExtractor`].

use std::collections::VecDeque;

use gerbil_common::error::GerbilResult;
use gerbil_model::{Boundary, ConvexHull, Point2D};
use image::{GrayImage, Luma};
use imageproc::contours::{self, BorderType};
use imageproc::distance_transform::Norm;
use imageproc::point::Point;
use imageproc::{edges, filter, geometry, morphology};

use crate::frame::Frame;

/// Largest detected outline together with its enclosed area.
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette {
    pub boundary: Boundary,
    pub area: f64,
}

impl Silhouette {
    pub fn new(boundary: Boundary) -> Self {
        let area = boundary.area();
        Self { boundary, area }
    }
}

/// Contour-detection capability used by the session.
pub trait SilhouetteExtractor {
    /// Outer boundary enclosing the largest area, or `None` when the frame
    /// holds no shape at all.
    fn largest_boundary(&mut self, frame: &Frame) -> GerbilResult<Option<Silhouette>>;

    /// Convex hull of `boundary`.
    fn convex_hull(&self, boundary: &Boundary) -> ConvexHull {
        hull_of(boundary)
    }
}

/// Convex hull through imageproc, preserving the hull's vertex order.
pub fn hull_of(boundary: &Boundary) -> ConvexHull {
    if boundary.is_empty() {
        return ConvexHull::default();
    }

    let points: Vec<Point<i32>> = boundary
        .points
        .iter()
        .map(|p| Point::new(p.x, p.y))
        .collect();
    let hull = geometry::convex_hull(&points[..]);

    ConvexHull::new(hull.into_iter().map(|p| Point2D::new(p.x, p.y)).collect())
}

/// Edge-based hand segmentation.
///
/// 1. Mask out pixels whose HSV value (max channel) is below `min_value`.
/// 2. Gaussian blur, Canny edges.
/// 3. Close the edge map: square dilate, round dilate, square erode.
/// 4. Keep edges inside the mask and take the external contours.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSilhouetteExtractor {
    pub min_value: u8,
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
}

impl Default for EdgeSilhouetteExtractor {
    fn default() -> Self {
        Self {
            min_value: 100,
            // Equivalent sigma of a 5x5 Gaussian kernel.
            blur_sigma: 1.1,
            canny_low: 30.0,
            canny_high: 40.0,
        }
    }
}

impl EdgeSilhouetteExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binary image whose foreground outlines the hand.
    pub fn edge_mask(&self, frame: &Frame) -> GrayImage {
        let gray = image::imageops::grayscale(frame);
        let blurred = filter::gaussian_blur_f32(&gray, self.blur_sigma);
        let edges = edges::canny(&blurred, self.canny_low, self.canny_high);

        let closed = morphology::dilate(&edges, Norm::LInf, 2);
        let closed = morphology::dilate(&closed, Norm::L1, 2);
        let mut closed = morphology::erode(&closed, Norm::LInf, 2);

        for (x, y, pixel) in closed.enumerate_pixels_mut() {
            let value = frame.get_pixel(x, y).0.iter().copied().max().unwrap_or(0);
            if value < self.min_value {
                *pixel = Luma([0]);
            }
        }

        closed
    }
}

impl SilhouetteExtractor for EdgeSilhouetteExtractor {
    fn largest_boundary(&mut self, frame: &Frame) -> GerbilResult<Option<Silhouette>> {
        let mask = self.edge_mask(frame);

        let largest = contours::find_contours::<i32>(&mask)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| {
                Silhouette::new(Boundary::new(
                    c.points.iter().map(|p| Point2D::new(p.x, p.y)).collect(),
                ))
            })
            .max_by(|a, b| a.area.total_cmp(&b.area));

        if let Some(silhouette) = &largest {
            tracing::trace!(
                points = silhouette.boundary.len(),
                area = silhouette.area,
                "Largest boundary"
            );
        }

        Ok(largest)
    }
}

/// Extractor replaying a fixed list of boundaries, one per frame.
///
/// Once the script runs out every frame is empty.
#[derive(Debug, Default)]
pub struct ScriptedExtractor {
    script: VecDeque<Option<Boundary>>,
}

impl ScriptedExtractor {
    pub fn new(script: impl IntoIterator<Item = Option<Boundary>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// One scripted polygon per frame.
    pub fn polygons<I, P>(polygons: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = (i32, i32)>,
    {
        Self::new(polygons.into_iter().map(|poly| {
            Some(Boundary::new(
                poly.into_iter().map(|(x, y)| Point2D::new(x, y)).collect(),
            ))
        }))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SilhouetteExtractor for ScriptedExtractor {
    fn largest_boundary(&mut self, _frame: &Frame) -> GerbilResult<Option<Silhouette>> {
        Ok(self.script.pop_front().flatten().map(Silhouette::new))
    }
}
