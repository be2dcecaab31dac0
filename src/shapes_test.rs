#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(5)
}

#[test]
fn names_roundtrip() {
    for kind in ShapeKind::ALL {
        assert_eq!(ShapeKind::from_name(kind.name()), Some(kind));
    }
    for kind in PatternKind::ALL {
        assert_eq!(PatternKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(ShapeKind::from_name("ellipse"), None);
    assert_eq!(PatternKind::from_name("stripes"), None);
}

#[test]
fn shape_uses_given_color_and_placement() {
    let object = build_shape(ShapeKind::Rectangle, Some("#123456"), &mut rng());
    let SceneObject::Primitive(prim) = object else {
        panic!("shape must be a primitive");
    };
    assert_eq!(prim.shape, Shape::Rect { width: 100.0, height: 80.0 });
    assert_eq!(prim.paint.fill, "#123456");
    assert_eq!((prim.transform.left, prim.transform.top), (100.0, 100.0));
}

#[test]
fn shape_without_color_uses_palette() {
    let object = build_shape(ShapeKind::Circle, None, &mut rng());
    assert!(color::PALETTE.contains(&object.paint().fill.as_str()));
}

#[test]
fn polygon_is_hexagon_and_star_has_ten_vertices() {
    let hex = build_shape(ShapeKind::Polygon, None, &mut rng());
    let star = build_shape(ShapeKind::Star, None, &mut rng());
    let vertex_count = |object: &SceneObject| match object {
        SceneObject::Primitive(Primitive { shape: Shape::Polygon { points }, .. }) => points.len(),
        _ => 0,
    };
    assert_eq!(vertex_count(&hex), 6);
    assert_eq!(vertex_count(&star), 10);
}

#[test]
fn pattern_cell_counts() {
    for (kind, expected) in [
        (PatternKind::Dots, 100),
        (PatternKind::Grid, 64),
        (PatternKind::Triangles, 36),
        (PatternKind::Stars, 16),
    ] {
        let SceneObject::Group(group) = build_pattern(kind, None, &mut rng()) else {
            panic!("pattern must be a group");
        };
        assert_eq!(group.children.len(), expected, "{}", kind.name());
        assert_eq!((group.transform.left, group.transform.top), (100.0, 100.0));
    }
}

#[test]
fn pattern_cells_are_laid_out_on_a_40_unit_grid() {
    let SceneObject::Group(group) = build_pattern(PatternKind::Grid, None, &mut rng()) else {
        panic!("pattern must be a group");
    };
    let last = group.children.last().unwrap().transform();
    assert_eq!((last.left, last.top), (280.0, 280.0));
    let second = group.children[1].transform();
    assert_eq!((second.left, second.top), (40.0, 0.0));
    assert!(matches!(
        &group.children[0],
        SceneObject::Primitive(Primitive { shape: Shape::Rect { width, height }, .. }) if *width == 20.0 && *height == 20.0
    ));
}

#[test]
fn pattern_with_hex_base_jitters_every_cell() {
    let SceneObject::Group(group) = build_pattern(PatternKind::Stars, Some("#808080"), &mut rng()) else {
        panic!("pattern must be a group");
    };
    for child in &group.children {
        assert!(child.paint().fill.starts_with("rgb("), "{}", child.paint().fill);
    }
}

#[test]
fn pattern_with_non_hex_base_falls_back_to_palette() {
    let SceneObject::Group(group) = build_pattern(PatternKind::Dots, Some("teal"), &mut rng()) else {
        panic!("pattern must be a group");
    };
    for child in &group.children {
        assert!(color::PALETTE.contains(&child.paint().fill.as_str()));
    }
}
