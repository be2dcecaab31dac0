//! Point generation for regular polygons and stars.
//!
//! Points are centered on the origin; callers position the resulting polygon
//! through its [`crate::object::Transform`].

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::PI;

use crate::object::Point;

/// Vertices of a regular polygon with `sides` sides, starting on the +x axis.
#[must_use]
pub fn polygon_points(sides: u32, radius: f64) -> Vec<Point> {
    let step = 2.0 * PI / f64::from(sides.max(1));
    (0..sides)
        .map(|i| {
            let angle = f64::from(i) * step;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Vertices of a star with `points` tips, alternating outer and inner radius.
#[must_use]
pub fn star_points(points: u32, outer_radius: f64, inner_radius: f64) -> Vec<Point> {
    let step = PI / f64::from(points.max(1));
    (0..points * 2)
        .map(|i| {
            let angle = f64::from(i) * step;
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}
