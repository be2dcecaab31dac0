//! Rendering: serializes a scene to an SVG document.
//!
//! This module produces thumbnails. It receives a read-only [`SceneState`]
//! and never mutates it. Objects are emitted bottom first, so the SVG paint
//! order matches the scene stacking order. Image filters map onto SVG
//! `feColorMatrix` filters declared once in `<defs>`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::object::{Group, ImageFilter, Paint, Primitive, SceneObject, Shape, Transform};
use crate::store::SceneState;

const GRAYSCALE_FILTER_ID: &str = "f-grayscale";
const SEPIA_FILTER_ID: &str = "f-sepia";

/// Render `state` as an SVG document scaled by `scale`.
#[must_use]
pub fn to_svg(state: &SceneState, scale: f64) -> String {
    let width = f64::from(state.width) * scale;
    let height = f64::from(state.height) * scale;

    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {} {}\">",
        state.width, state.height
    );
    out.push_str(&defs());
    out.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape(&state.background)
    ));
    for object in &state.objects {
        draw_object(&mut out, object);
    }
    out.push_str("</svg>");
    out
}

fn defs() -> String {
    format!(
        "<defs>\
         <filter id=\"{GRAYSCALE_FILTER_ID}\"><feColorMatrix type=\"saturate\" values=\"0\"/></filter>\
         <filter id=\"{SEPIA_FILTER_ID}\"><feColorMatrix type=\"matrix\" \
         values=\"0.393 0.769 0.189 0 0 0.349 0.686 0.168 0 0 0.272 0.534 0.131 0 0 0 0 0 1 0\"/></filter>\
         </defs>"
    )
}

// =============================================================================
// OBJECT DISPATCH
// =============================================================================

fn draw_object(out: &mut String, object: &SceneObject) {
    match object {
        SceneObject::Primitive(p) => draw_primitive(out, p),
        SceneObject::Group(g) => draw_group(out, g),
    }
}

fn draw_group(out: &mut String, group: &Group) {
    out.push_str(&format!(
        "<g transform=\"{}\" opacity=\"{}\">",
        transform_attr(&group.transform),
        group.paint.opacity
    ));
    for child in &group.children {
        draw_object(out, child);
    }
    out.push_str("</g>");
}

fn draw_primitive(out: &mut String, prim: &Primitive) {
    out.push_str(&format!("<g transform=\"{}\">", transform_attr(&prim.transform)));
    let paint = paint_attrs(&prim.paint);
    match &prim.shape {
        Shape::Circle { radius } => {
            out.push_str(&format!("<circle cx=\"{radius}\" cy=\"{radius}\" r=\"{radius}\"{paint}/>"));
        }
        Shape::Rect { width, height } => {
            out.push_str(&format!("<rect width=\"{width}\" height=\"{height}\"{paint}/>"));
        }
        Shape::Triangle { width, height } => {
            let apex = width / 2.0;
            out.push_str(&format!("<polygon points=\"{apex},0 {width},{height} 0,{height}\"{paint}/>"));
        }
        Shape::Polygon { points } => {
            let list = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&format!("<polygon points=\"{list}\"{paint}/>"));
        }
        Shape::Image { src, width, height } => {
            let filter = filter_attr(&prim.filters);
            out.push_str(&format!(
                "<image href=\"{}\" width=\"{width}\" height=\"{height}\" opacity=\"{}\"{filter}/>",
                escape(src),
                prim.paint.opacity
            ));
        }
    }
    out.push_str("</g>");
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

fn transform_attr(t: &Transform) -> String {
    format!(
        "translate({} {}) rotate({}) skewX({}) skewY({}) scale({} {})",
        t.left, t.top, t.angle, t.skew_x, t.skew_y, t.scale_x, t.scale_y
    )
}

fn paint_attrs(paint: &Paint) -> String {
    let mut attrs = format!(" fill=\"{}\" opacity=\"{}\"", escape(&paint.fill), paint.opacity);
    if let Some(stroke) = &paint.stroke {
        attrs.push_str(&format!(" stroke=\"{}\" stroke-width=\"{}\"", escape(stroke), paint.stroke_width));
    }
    attrs
}

/// Only the last operator in the chain is rendered; SVG takes one filter ref.
fn filter_attr(filters: &[ImageFilter]) -> String {
    match filters.last() {
        Some(ImageFilter::Grayscale) => format!(" filter=\"url(#{GRAYSCALE_FILTER_ID})\""),
        Some(ImageFilter::Sepia) => format!(" filter=\"url(#{SEPIA_FILTER_ID})\""),
        None => String::new(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
