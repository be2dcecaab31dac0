use scene::{Paint, Primitive, SceneObject, SceneStore, Shape, Transform};

use super::*;
use crate::surface::test_helpers::{ImportMode, TestSurface};

fn circle(fill: &str) -> SceneObject {
    Primitive::new(Shape::Circle { radius: 50.0 }, Paint::filled(fill), Transform::at(100.0, 100.0)).into()
}

fn image(src: &str) -> SceneObject {
    Primitive::new(Shape::Image { src: src.into(), width: 10.0, height: 10.0 }, Paint::default(), Transform::default())
        .into()
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

#[test]
fn encode_is_stable_for_an_unchanged_scene() {
    let mut store = SceneStore::default();
    store.add(circle("#f44336"));
    assert_eq!(encode(&store).unwrap(), encode(&store).unwrap());
}

#[test]
fn decode_encode_is_scene_equivalent() {
    let mut store = SceneStore::default();
    store.add(circle("#f44336"));
    store.set_background("#ffffff");

    let snapshot = encode(&store).unwrap();
    let state = decode(&snapshot).unwrap();

    assert_eq!(state, store.export_state());
    assert_eq!(encode_state(&state).unwrap(), snapshot);
}

#[test]
fn decode_rejects_malformed_input() {
    let err = decode(&Snapshot::from_raw("{not json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Decode(_)));
}

#[test]
fn snapshot_serializes_as_bare_string() {
    let snapshot = Snapshot::from_raw("{}");
    assert_eq!(serde_json::to_string(&snapshot).unwrap(), r#""{}""#);
}

// =============================================================================
// RESTORE
// =============================================================================

#[tokio::test]
async fn restore_replaces_scene_and_renders() {
    let mut source = SceneStore::default();
    source.add(circle("#2196f3"));
    let snapshot = encode(&source).unwrap();

    let target = RefCell::new(SceneStore::default());
    target.borrow_mut().render_all();
    target.borrow_mut().add(circle("#000000"));
    restore(&target, &snapshot).await.unwrap();

    assert_eq!(target.borrow().export_state(), source.export_state());
    assert_eq!(target.borrow().render_count(), 2);
    assert!(!target.borrow().needs_render());
}

#[tokio::test]
async fn restore_of_malformed_snapshot_leaves_scene_untouched() {
    let target = RefCell::new(SceneStore::default());
    target.borrow_mut().add(circle("#000000"));
    let before = target.borrow().export_state();

    let err = restore(&target, &Snapshot::from_raw("[]")).await.unwrap_err();

    assert!(matches!(err, SnapshotError::Decode(_)));
    assert_eq!(target.borrow().export_state(), before);
}

#[tokio::test]
async fn restore_propagates_import_rejection() {
    let mut source = SceneStore::default();
    source.add(image(""));
    let snapshot = encode(&source).unwrap();

    let target = RefCell::new(SceneStore::default());
    let err = restore(&target, &snapshot).await.unwrap_err();

    assert!(matches!(err, SnapshotError::Import(scene::SceneError::UnresolvedImage(_))));
    assert!(target.borrow().objects().is_empty());
}

#[tokio::test]
async fn restore_reports_abandoned_import() {
    let snapshot = encode(&SceneStore::default()).unwrap();
    let target = RefCell::new(TestSurface::new(ImportMode::Abandon));

    let err = restore(&target, &snapshot).await.unwrap_err();

    assert!(matches!(err, SnapshotError::Abandoned));
    assert_eq!(target.borrow().import_calls, 1);
}
