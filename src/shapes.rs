//! Shape and grouped-pattern construction.
//!
//! Builders only produce [`SceneObject`]s; adding them to a surface (and the
//! resulting change notification) is the session's job.

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use rand::Rng;
use scene::geometry::{polygon_points, star_points};
use scene::{Group, Paint, Primitive, SceneObject, Shape, Transform};

use crate::color;

/// Where new shapes and patterns land.
const PLACEMENT: f64 = 100.0;

/// Side length of one pattern cell shape.
const CELL_SIZE: f64 = 20.0;
/// Distance between neighbouring pattern cells.
const CELL_SPACING: f64 = 40.0;
/// Maximum per-channel deviation from a pattern's base color.
const PATTERN_COLOR_SPREAD: f64 = 30.0;

const STAR_TIPS: u32 = 5;

/// Single shape the user can add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
    /// Regular hexagon.
    Polygon,
    /// Five-pointed star.
    Star,
}

impl ShapeKind {
    pub const ALL: [Self; 5] = [Self::Circle, Self::Rectangle, Self::Triangle, Self::Polygon, Self::Star];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
            Self::Polygon => "polygon",
            Self::Star => "star",
        }
    }

    /// Geometry at full size.
    fn shape(self) -> Shape {
        match self {
            Self::Circle => Shape::Circle { radius: 50.0 },
            Self::Rectangle => Shape::Rect { width: 100.0, height: 80.0 },
            Self::Triangle => Shape::Triangle { width: 100.0, height: 100.0 },
            Self::Polygon => Shape::Polygon { points: polygon_points(6, 50.0) },
            Self::Star => Shape::Polygon { points: star_points(STAR_TIPS, 50.0, 25.0) },
        }
    }

    /// Geometry sized to fit one pattern cell.
    fn cell_shape(self) -> Shape {
        let half = CELL_SIZE / 2.0;
        match self {
            Self::Circle => Shape::Circle { radius: half },
            Self::Rectangle => Shape::Rect { width: CELL_SIZE, height: CELL_SIZE },
            Self::Triangle => Shape::Triangle { width: CELL_SIZE, height: CELL_SIZE },
            Self::Polygon => Shape::Polygon { points: polygon_points(6, half) },
            Self::Star => Shape::Polygon { points: star_points(STAR_TIPS, half, CELL_SIZE / 4.0) },
        }
    }
}

/// Grid pattern the user can add as one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Dots,
    Grid,
    Triangles,
    Stars,
}

impl PatternKind {
    pub const ALL: [Self; 4] = [Self::Dots, Self::Grid, Self::Triangles, Self::Stars];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dots => "dots",
            Self::Grid => "grid",
            Self::Triangles => "triangles",
            Self::Stars => "stars",
        }
    }

    /// Cell shape and `(rows, cols)`.
    #[must_use]
    pub fn layout(self) -> (ShapeKind, u32, u32) {
        match self {
            Self::Dots => (ShapeKind::Circle, 10, 10),
            Self::Grid => (ShapeKind::Rectangle, 8, 8),
            Self::Triangles => (ShapeKind::Triangle, 6, 6),
            Self::Stars => (ShapeKind::Star, 4, 4),
        }
    }
}

/// Build one shape filled with `color`, or a random palette color.
pub fn build_shape<R: Rng + ?Sized>(kind: ShapeKind, color: Option<&str>, rng: &mut R) -> SceneObject {
    let fill = match color {
        Some(color) => color.to_owned(),
        None => color::random_color(rng).to_owned(),
    };
    Primitive::new(kind.shape(), Paint::filled(fill), Transform::at(PLACEMENT, PLACEMENT)).into()
}

/// Build a pattern group.
///
/// With a `#rrggbb` base color every cell gets a jittered variant of it;
/// otherwise each cell gets its own random palette color.
pub fn build_pattern<R: Rng + ?Sized>(kind: PatternKind, base_color: Option<&str>, rng: &mut R) -> SceneObject {
    let (cell, rows, cols) = kind.layout();
    let mut children = Vec::with_capacity(usize::try_from(rows * cols).unwrap_or_default());
    for row in 0..rows {
        for col in 0..cols {
            let fill = base_color
                .and_then(|base| color::jitter_color(base, PATTERN_COLOR_SPREAD, rng))
                .unwrap_or_else(|| color::random_color(rng).to_owned());
            let at = Transform::at(f64::from(col) * CELL_SPACING, f64::from(row) * CELL_SPACING);
            children.push(Primitive::new(cell.cell_shape(), Paint::filled(fill), at).into());
        }
    }
    Group::new(children, Transform::at(PLACEMENT, PLACEMENT)).into()
}
