//! The capability set the editing session needs from a drawing surface.
//!
//! History, capture, and the style appliers only ever talk to a scene through
//! this trait. [`scene::SceneStore`] is the production implementation; tests
//! substitute surfaces with deferred import completion to exercise the
//! in-flight navigation rules.

#[cfg(test)]
#[path = "surface_helpers_test.rs"]
pub mod test_helpers;

use scene::{ChangeListener, ImportCallback, ObjectId, SceneError, SceneObject, SceneState, SceneStore};

/// Mutable container of drawable objects with whole-state import/export.
pub trait Surface {
    /// Top-level objects, bottom first.
    fn objects(&self) -> &[SceneObject];
    /// Bulk programmatic edit access. Must not emit change events.
    fn objects_mut(&mut self) -> &mut [SceneObject];
    fn add(&mut self, object: SceneObject) -> ObjectId;
    fn remove(&mut self, id: ObjectId) -> Option<SceneObject>;
    /// Interactive edit of one object. Emits "modified".
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] for an unknown id.
    fn modify(&mut self, id: ObjectId, edit: &mut dyn FnMut(&mut SceneObject)) -> Result<(), SceneError>;
    fn set_active(&mut self, id: Option<ObjectId>) -> bool;
    fn active(&self) -> Option<ObjectId>;
    fn bring_to_front(&mut self, id: ObjectId) -> bool;
    fn send_to_back(&mut self, id: ObjectId) -> bool;
    fn clone_with_offset(&mut self, id: ObjectId, dx: f64, dy: f64) -> Option<ObjectId>;
    fn clear(&mut self);
    fn background(&self) -> &str;
    fn set_background(&mut self, color: &str);
    fn export_state(&self) -> SceneState;
    /// Replace the whole scene. Completion may be signalled after return.
    fn import_state(&mut self, state: SceneState, on_complete: ImportCallback);
    fn on_change(&mut self, listener: ChangeListener);
    /// Emit a synthetic "modified" notification after bulk edits.
    fn fire_modified(&mut self);
    fn render_all(&mut self);
    fn export_thumbnail(&self, format: &str, quality: f64) -> Result<String, SceneError>;
}

impl Surface for SceneStore {
    fn objects(&self) -> &[SceneObject] {
        SceneStore::objects(self)
    }

    fn objects_mut(&mut self) -> &mut [SceneObject] {
        SceneStore::objects_mut(self)
    }

    fn add(&mut self, object: SceneObject) -> ObjectId {
        SceneStore::add(self, object)
    }

    fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        SceneStore::remove(self, id)
    }

    fn modify(&mut self, id: ObjectId, edit: &mut dyn FnMut(&mut SceneObject)) -> Result<(), SceneError> {
        SceneStore::modify(self, id, edit)
    }

    fn set_active(&mut self, id: Option<ObjectId>) -> bool {
        SceneStore::set_active(self, id)
    }

    fn active(&self) -> Option<ObjectId> {
        SceneStore::active(self)
    }

    fn bring_to_front(&mut self, id: ObjectId) -> bool {
        SceneStore::bring_to_front(self, id)
    }

    fn send_to_back(&mut self, id: ObjectId) -> bool {
        SceneStore::send_to_back(self, id)
    }

    fn clone_with_offset(&mut self, id: ObjectId, dx: f64, dy: f64) -> Option<ObjectId> {
        SceneStore::clone_with_offset(self, id, dx, dy)
    }

    fn clear(&mut self) {
        SceneStore::clear(self);
    }

    fn background(&self) -> &str {
        SceneStore::background(self)
    }

    fn set_background(&mut self, color: &str) {
        SceneStore::set_background(self, color);
    }

    fn export_state(&self) -> SceneState {
        SceneStore::export_state(self)
    }

    fn import_state(&mut self, state: SceneState, on_complete: ImportCallback) {
        SceneStore::import_state(self, state, on_complete);
    }

    fn on_change(&mut self, listener: ChangeListener) {
        SceneStore::on_change(self, listener);
    }

    fn fire_modified(&mut self) {
        SceneStore::fire_modified(self);
    }

    fn render_all(&mut self) {
        SceneStore::render_all(self);
    }

    fn export_thumbnail(&self, format: &str, quality: f64) -> Result<String, SceneError> {
        SceneStore::export_thumbnail(self, format, quality)
    }
}
