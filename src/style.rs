//! Art style and filter appliers.
//!
//! DESIGN
//! ======
//! An applier is a bulk mutation over every top-level object plus the scene
//! background, followed by a re-render. Appliers never touch history; the
//! session pushes a snapshot synchronously right after calling one.
//!
//! Groups are opaque: appliers only ever change the group's own paint and
//! transform, never its children. Cubism skips groups outright.
//!
//! Randomized styles draw from an injected RNG so tests can seed them.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::fmt;

use rand::Rng;
use scene::consts::NEUTRAL_BACKGROUND;
use scene::{ImageFilter, SceneObject};
use serde::{Deserialize, Serialize};

use crate::color;
use crate::surface::Surface;

const WHITE: &str = "#ffffff";
const BLACK: &str = "#000000";

/// Maximum absolute skew or rotation jitter, in degrees.
const ANGLE_JITTER_DEG: f64 = 10.0;
/// Expressionism scales each axis by a factor in `[1 - s, 1 + s]`.
const SCALE_JITTER: f64 = 0.2;

// =============================================================================
// ART STYLES
// =============================================================================

/// Named art style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtStyle {
    Impressionism,
    Cubism,
    PopArt,
    Expressionism,
}

impl ArtStyle {
    pub const ALL: [Self; 4] = [Self::Impressionism, Self::Cubism, Self::PopArt, Self::Expressionism];

    /// Parse a style name. Returns `None` for unrecognized names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Impressionism => "impressionism",
            Self::Cubism => "cubism",
            Self::PopArt => "popart",
            Self::Expressionism => "expressionism",
        }
    }

    #[must_use]
    pub fn background(self) -> &'static str {
        match self {
            Self::Impressionism => "#e6f7ff",
            Self::Cubism => "#f0e68c",
            Self::PopArt => WHITE,
            Self::Expressionism => "#ffcccc",
        }
    }
}

impl fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Restyle every top-level object and set the style's background.
pub fn apply_art_style<S, R>(surface: &mut S, style: ArtStyle, rng: &mut R)
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    for object in surface.objects_mut() {
        match style {
            ArtStyle::Impressionism => {
                object.paint_mut().opacity = 0.8;
                stroke(object, WHITE, 2.0);
            }
            ArtStyle::Cubism => {
                if object.is_group() {
                    continue;
                }
                let transform = object.transform_mut();
                transform.skew_x = rng.random_range(-ANGLE_JITTER_DEG..=ANGLE_JITTER_DEG);
                transform.skew_y = rng.random_range(-ANGLE_JITTER_DEG..=ANGLE_JITTER_DEG);
                stroke(object, BLACK, 2.0);
            }
            ArtStyle::PopArt => {
                object.paint_mut().fill = color::random_color(rng).to_owned();
                stroke(object, BLACK, 3.0);
            }
            ArtStyle::Expressionism => {
                let transform = object.transform_mut();
                transform.angle = rng.random_range(-ANGLE_JITTER_DEG..=ANGLE_JITTER_DEG);
                transform.scale_x *= rng.random_range(1.0 - SCALE_JITTER..=1.0 + SCALE_JITTER);
                transform.scale_y *= rng.random_range(1.0 - SCALE_JITTER..=1.0 + SCALE_JITTER);
                stroke(object, BLACK, 4.0);
            }
        }
    }
    surface.set_background(style.background());
    surface.render_all();
}

fn stroke(object: &mut SceneObject, color: &str, width: f64) {
    let paint = object.paint_mut();
    paint.stroke = Some(color.to_owned());
    paint.stroke_width = width;
}

// =============================================================================
// FILTERS
// =============================================================================

/// Named color filter. `None` is the neutral default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    #[default]
    None,
    Vintage,
    BlackAndWhite,
    Sepia,
    Vibrant,
}

impl Filter {
    pub const ALL: [Self; 5] = [Self::None, Self::Vintage, Self::BlackAndWhite, Self::Sepia, Self::Vibrant];

    /// Parse a filter name. Unrecognized names map to [`Filter::None`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL.into_iter().find(|f| f.name() == name).unwrap_or_default()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vintage => "vintage",
            Self::BlackAndWhite => "blackAndWhite",
            Self::Sepia => "sepia",
            Self::Vibrant => "vibrant",
        }
    }

    #[must_use]
    pub fn background(self) -> &'static str {
        match self {
            Self::None => NEUTRAL_BACKGROUND,
            Self::Vintage => "#f5e8c0",
            Self::BlackAndWhite => WHITE,
            Self::Sepia => "#f0e6d8",
            Self::Vibrant => "#f0f8ff",
        }
    }

    /// Fill transform for non-image objects, if the filter recolors.
    fn fill_transform(self) -> Option<fn(&str) -> String> {
        match self {
            Self::BlackAndWhite => Some(color::grayscale),
            Self::Sepia => Some(color::sepia),
            Self::Vibrant => Some(color::vibrant),
            Self::None | Self::Vintage => None,
        }
    }

    /// Image operator for image objects, if the filter has one.
    fn image_operator(self) -> Option<ImageFilter> {
        match self {
            Self::BlackAndWhite => Some(ImageFilter::Grayscale),
            Self::Sepia => Some(ImageFilter::Sepia),
            Self::None | Self::Vintage | Self::Vibrant => None,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clear every object's image filter chain, then apply `filter`.
///
/// Fills are transformed from their current value, so a hex fill becomes an
/// `rgb(...)` fill that later transforms leave alone.
pub fn apply_filter<S: Surface + ?Sized>(surface: &mut S, filter: Filter) {
    for object in surface.objects_mut() {
        if let SceneObject::Primitive(prim) = object {
            prim.filters.clear();
        }
        match filter {
            Filter::None => {}
            Filter::Vintage => object.paint_mut().opacity = 0.9,
            Filter::BlackAndWhite | Filter::Sepia | Filter::Vibrant => recolor(object, filter),
        }
    }
    surface.set_background(filter.background());
    surface.render_all();
}

fn recolor(object: &mut SceneObject, filter: Filter) {
    if let SceneObject::Primitive(prim) = object {
        if prim.shape.is_image() {
            prim.filters.extend(filter.image_operator());
            return;
        }
    }
    if let Some(transform) = filter.fill_transform() {
        let paint = object.paint_mut();
        paint.fill = transform(&paint.fill);
    }
}

/// Unrecognized style: neutral background, objects untouched.
pub fn reset_background<S: Surface + ?Sized>(surface: &mut S) {
    surface.set_background(NEUTRAL_BACKGROUND);
    surface.render_all();
}
