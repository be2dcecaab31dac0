//! Scene object model: primitives, groups, paint, and transforms.
//!
//! A scene is an ordered list of top-level [`SceneObject`]s. Each object is
//! either a single [`Primitive`] shape or a [`Group`] that owns an ordered list
//! of child objects and is treated as one opaque whole by bulk operations.
//! Objects carry their own [`Paint`] (fill, stroke, opacity) and
//! [`Transform`] (position, rotation, scale, skew).
//!
//! Everything here is serde-serializable because the full scene is exported
//! as JSON to build history snapshots.

#[cfg(test)]
#[path = "object_test.rs"]
mod object_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_FILL, DEFAULT_STROKE_WIDTH};

/// Unique identifier for a scene object.
pub type ObjectId = Uuid;

/// A 2-D point in object-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of a primitive object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Circle of the given radius.
    Circle { radius: f64 },
    /// Axis-aligned rectangle.
    Rect { width: f64, height: f64 },
    /// Isosceles triangle with its apex at the top center of the box.
    Triangle { width: f64, height: f64 },
    /// Closed polygon through the given points (regular polygons and stars).
    Polygon { points: Vec<Point> },
    /// Embedded raster image referenced by `src`.
    Image { src: String, width: f64, height: f64 },
}

impl Shape {
    /// Whether this shape is an embedded image (filters use an image operator
    /// instead of recoloring the fill).
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// Fill, stroke, and opacity of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// Fill color: `#rrggbb`, `rgb(...)`, a named color, or any other CSS paint.
    pub fill: String,
    /// Stroke color, if the object is outlined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in scene units.
    pub stroke_width: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Paint {
    /// Paint with the given fill and default stroke/opacity.
    #[must_use]
    pub fn filled(fill: impl Into<String>) -> Self {
        Self { fill: fill.into(), ..Self::default() }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self { fill: DEFAULT_FILL.to_owned(), stroke: None, stroke_width: DEFAULT_STROKE_WIDTH, opacity: 1.0 }
    }
}

/// Placement of an object. Angles and skews are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Left edge in parent coordinates.
    pub left: f64,
    /// Top edge in parent coordinates.
    pub top: f64,
    /// Clockwise rotation in degrees.
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl Transform {
    /// Identity transform translated to `(left, top)`.
    #[must_use]
    pub fn at(left: f64, top: f64) -> Self {
        Self { left, top, ..Self::default() }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self { left: 0.0, top: 0.0, angle: 0.0, scale_x: 1.0, scale_y: 1.0, skew_x: 0.0, skew_y: 0.0 }
    }
}

/// Image operator attached to an image primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFilter {
    Grayscale,
    Sepia,
}

/// A single drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub id: ObjectId,
    pub shape: Shape,
    pub paint: Paint,
    pub transform: Transform,
    /// Image operator chain. Only meaningful for [`Shape::Image`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<ImageFilter>,
}

impl Primitive {
    /// New primitive with a fresh id.
    #[must_use]
    pub fn new(shape: Shape, paint: Paint, transform: Transform) -> Self {
        Self { id: Uuid::new_v4(), shape, paint, transform, filters: Vec::new() }
    }
}

/// An ordered collection of objects sharing one transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: ObjectId,
    /// Children, bottom first. Child transforms are relative to the group.
    pub children: Vec<SceneObject>,
    pub paint: Paint,
    pub transform: Transform,
}

impl Group {
    /// New group with a fresh id and default paint.
    #[must_use]
    pub fn new(children: Vec<SceneObject>, transform: Transform) -> Self {
        Self { id: Uuid::new_v4(), children, paint: Paint::default(), transform }
    }
}

/// A top-level (or nested) scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneObject {
    Primitive(Primitive),
    Group(Group),
}

impl SceneObject {
    #[must_use]
    pub fn id(&self) -> ObjectId {
        match self {
            Self::Primitive(p) => p.id,
            Self::Group(g) => g.id,
        }
    }

    #[must_use]
    pub fn paint(&self) -> &Paint {
        match self {
            Self::Primitive(p) => &p.paint,
            Self::Group(g) => &g.paint,
        }
    }

    pub fn paint_mut(&mut self) -> &mut Paint {
        match self {
            Self::Primitive(p) => &mut p.paint,
            Self::Group(g) => &mut g.paint,
        }
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        match self {
            Self::Primitive(p) => &p.transform,
            Self::Group(g) => &g.transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            Self::Primitive(p) => &mut p.transform,
            Self::Group(g) => &mut g.transform,
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Deep copy with fresh ids throughout, translated by `(dx, dy)`.
    #[must_use]
    pub fn duplicate_offset(&self, dx: f64, dy: f64) -> Self {
        let mut copy = self.with_fresh_ids();
        let transform = copy.transform_mut();
        transform.left += dx;
        transform.top += dy;
        copy
    }

    fn with_fresh_ids(&self) -> Self {
        match self {
            Self::Primitive(p) => Self::Primitive(Primitive { id: Uuid::new_v4(), ..p.clone() }),
            Self::Group(g) => Self::Group(Group {
                id: Uuid::new_v4(),
                children: g.children.iter().map(Self::with_fresh_ids).collect(),
                paint: g.paint.clone(),
                transform: g.transform,
            }),
        }
    }

    /// Image sources referenced by this object and its descendants.
    pub(crate) fn collect_image_sources<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Primitive(Primitive { shape: Shape::Image { src, .. }, .. }) => out.push(src),
            Self::Primitive(_) => {}
            Self::Group(g) => {
                for child in &g.children {
                    child.collect_image_sources(out);
                }
            }
        }
    }
}

impl From<Primitive> for SceneObject {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<Group> for SceneObject {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}
