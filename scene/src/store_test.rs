#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::object::{Paint, Primitive, Shape, Transform};

fn rect(left: f64) -> SceneObject {
    Primitive::new(Shape::Rect { width: 10.0, height: 10.0 }, Paint::filled("#336699"), Transform::at(left, 0.0)).into()
}

fn image(src: &str) -> SceneObject {
    Primitive::new(Shape::Image { src: src.into(), width: 8.0, height: 8.0 }, Paint::default(), Transform::default())
        .into()
}

fn recording(store: &mut SceneStore) -> Rc<RefCell<Vec<SceneEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.on_change(Box::new(move |event| sink.borrow_mut().push(*event)));
    events
}

fn ids(store: &SceneStore) -> Vec<ObjectId> {
    store.objects().iter().map(SceneObject::id).collect()
}

// =============================================================================
// EVENTS
// =============================================================================

#[test]
fn add_modify_remove_emit_events_in_order() {
    let mut store = SceneStore::default();
    let events = recording(&mut store);

    let id = store.add(rect(0.0));
    store.modify(id, |o| o.transform_mut().left = 50.0).unwrap();
    store.remove(id);

    assert_eq!(
        *events.borrow(),
        vec![SceneEvent::ObjectAdded(id), SceneEvent::ObjectModified(Some(id)), SceneEvent::ObjectRemoved(id)]
    );
}

#[test]
fn bulk_edits_are_silent_until_fire_modified() {
    let mut store = SceneStore::default();
    store.add(rect(0.0));
    let events = recording(&mut store);

    for object in store.objects_mut() {
        object.paint_mut().opacity = 0.5;
    }
    store.set_background("#ffffff");
    assert!(events.borrow().is_empty());

    store.fire_modified();
    assert_eq!(*events.borrow(), vec![SceneEvent::ObjectModified(None)]);
}

#[test]
fn modify_unknown_object_fails() {
    let mut store = SceneStore::default();
    let missing = uuid::Uuid::new_v4();
    assert_eq!(store.modify(missing, |_| {}), Err(SceneError::ObjectNotFound(missing)));
}

// =============================================================================
// ORDERING AND SELECTION
// =============================================================================

#[test]
fn bring_to_front_and_send_to_back_reorder() {
    let mut store = SceneStore::default();
    let a = store.add(rect(0.0));
    let b = store.add(rect(1.0));
    let c = store.add(rect(2.0));

    assert!(store.bring_to_front(a));
    assert_eq!(ids(&store), vec![b, c, a]);

    assert!(store.send_to_back(c));
    assert_eq!(ids(&store), vec![c, b, a]);

    assert!(!store.bring_to_front(uuid::Uuid::new_v4()));
}

#[test]
fn removing_active_object_clears_selection() {
    let mut store = SceneStore::default();
    let id = store.add(rect(0.0));
    assert!(store.set_active(Some(id)));
    store.remove(id);
    assert_eq!(store.active(), None);
}

#[test]
fn set_active_rejects_unknown_id() {
    let mut store = SceneStore::default();
    let id = store.add(rect(0.0));
    store.set_active(Some(id));
    assert!(!store.set_active(Some(uuid::Uuid::new_v4())));
    assert_eq!(store.active(), Some(id));
}

#[test]
fn clone_with_offset_adds_shifted_copy_on_top() {
    let mut store = SceneStore::default();
    let id = store.add(rect(10.0));
    let events = recording(&mut store);

    let copy = store.clone_with_offset(id, 20.0, 20.0).unwrap();

    assert_ne!(copy, id);
    assert_eq!(ids(&store), vec![id, copy]);
    assert_eq!(store.get(copy).unwrap().transform().left, 30.0);
    assert_eq!(*events.borrow(), vec![SceneEvent::ObjectAdded(copy)]);
}

#[test]
fn clear_keeps_background() {
    let mut store = SceneStore::default();
    store.set_background("#e6f7ff");
    store.add(rect(0.0));
    store.clear();
    assert!(store.objects().is_empty());
    assert_eq!(store.background(), "#e6f7ff");
}

// =============================================================================
// IMPORT / EXPORT
// =============================================================================

#[test]
fn import_replaces_state_silently_and_reports_success() {
    let mut source = SceneStore::new(400, 300, "#ffcccc");
    source.add(rect(5.0));
    let state = source.export_state();

    let mut target = SceneStore::default();
    target.add(rect(99.0));
    let events = recording(&mut target);
    let outcome = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&outcome);

    target.import_state(state.clone(), Box::new(move |result| *slot.borrow_mut() = Some(result)));

    assert_eq!(*outcome.borrow(), Some(Ok(())));
    assert_eq!(target.export_state(), state);
    assert!(events.borrow().is_empty());
}

#[test]
fn import_with_unresolvable_image_leaves_scene_untouched() {
    let mut store = SceneStore::default();
    let kept = store.add(rect(0.0));
    let state = SceneState { width: 10, height: 10, background: "#000000".into(), objects: vec![image("  ")] };
    let outcome = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&outcome);

    store.import_state(state, Box::new(move |result| *slot.borrow_mut() = Some(result)));

    assert!(matches!(*outcome.borrow(), Some(Err(SceneError::UnresolvedImage(_)))));
    assert_eq!(ids(&store), vec![kept]);
    assert_eq!(store.background(), NEUTRAL_BACKGROUND);
}

#[test]
fn import_accepts_resolvable_images() {
    let mut store = SceneStore::default();
    let state = SceneState { width: 10, height: 10, background: "#000000".into(), objects: vec![image("a.png")] };
    let outcome = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&outcome);
    store.import_state(state, Box::new(move |result| *slot.borrow_mut() = Some(result)));
    assert_eq!(*outcome.borrow(), Some(Ok(())));
    assert_eq!(store.objects().len(), 1);
}

// =============================================================================
// RENDERING
// =============================================================================

#[test]
fn render_all_clears_dirty_flag() {
    let mut store = SceneStore::default();
    assert!(store.needs_render());
    store.render_all();
    assert!(!store.needs_render());
    assert_eq!(store.render_count(), 1);
    store.add(rect(0.0));
    assert!(store.needs_render());
}

#[test]
fn thumbnail_is_svg_data_token() {
    let mut store = SceneStore::default();
    store.add(rect(0.0));
    let token = store.export_thumbnail("svg", 0.8).unwrap();
    assert!(token.starts_with(SVG_DATA_PREFIX));
    assert!(token.contains("<svg"));
    assert!(!token.contains('#'), "hex colors are escaped");
}

#[test]
fn thumbnail_rejects_raster_formats() {
    let store = SceneStore::default();
    assert_eq!(
        store.export_thumbnail("png", 0.8),
        Err(SceneError::UnsupportedThumbnailFormat("png".into()))
    );
}
