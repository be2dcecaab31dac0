//! The live scene: ordered objects, background, selection, and change events.
//!
//! `SceneStore` is the in-memory drawing surface. Objects are kept in stacking
//! order (index 0 is drawn first, the last element is on top). Interactive
//! mutations (`add`, `modify`, `clone_with_offset`) notify registered
//! listeners; bulk programmatic edits through `objects_mut` do not, and
//! callers that want them observed follow up with `fire_modified`.
//!
//! Full-state import goes through a completion callback rather than a return
//! value so that surfaces which must resolve embedded resources can finish
//! asynchronously. This store resolves synchronously and invokes the callback
//! before returning. Import never emits change events.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, NEUTRAL_BACKGROUND, SVG_DATA_PREFIX};
use crate::object::{ObjectId, SceneObject};
use crate::render;

/// Error returned by fallible scene operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("image source could not be resolved: {0:?}")]
    UnresolvedImage(String),
    #[error("unsupported thumbnail format: {0}")]
    UnsupportedThumbnailFormat(String),
}

/// Notification emitted when the scene changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// An object was appended to the scene.
    ObjectAdded(ObjectId),
    /// An object was modified. `None` is a synthetic whole-scene notification.
    ObjectModified(Option<ObjectId>),
    /// An object was removed.
    ObjectRemoved(ObjectId),
}

/// Listener invoked synchronously for every [`SceneEvent`].
pub type ChangeListener = Box<dyn Fn(&SceneEvent)>;

/// Completion callback for [`SceneStore::import_state`].
pub type ImportCallback = Box<dyn FnOnce(Result<(), SceneError>)>;

/// Full serializable state of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub objects: Vec<SceneObject>,
}

/// In-memory scene.
pub struct SceneStore {
    width: u32,
    height: u32,
    background: String,
    objects: Vec<SceneObject>,
    active: Option<ObjectId>,
    listeners: Vec<ChangeListener>,
    dirty: bool,
    renders: u64,
}

impl SceneStore {
    /// Create an empty scene.
    #[must_use]
    pub fn new(width: u32, height: u32, background: impl Into<String>) -> Self {
        Self {
            width,
            height,
            background: background.into(),
            objects: Vec::new(),
            active: None,
            listeners: Vec::new(),
            dirty: true,
            renders: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    // --- Objects ---

    /// Top-level objects in stacking order (bottom first).
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Mutable access for bulk programmatic edits. Emits no events.
    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        self.dirty = true;
        &mut self.objects
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    /// Append an object on top of the stack.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id();
        self.objects.push(object);
        self.dirty = true;
        self.emit(&SceneEvent::ObjectAdded(id));
        id
    }

    /// Remove an object, clearing the selection if it was active.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.index_of(id)?;
        let removed = self.objects.remove(index);
        if self.active == Some(id) {
            self.active = None;
        }
        self.dirty = true;
        self.emit(&SceneEvent::ObjectRemoved(id));
        Some(removed)
    }

    /// Interactive edit of one object (drag, resize, recolor).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if no object has this id.
    pub fn modify(&mut self, id: ObjectId, edit: impl FnOnce(&mut SceneObject)) -> Result<(), SceneError> {
        let index = self.index_of(id).ok_or(SceneError::ObjectNotFound(id))?;
        edit(&mut self.objects[index]);
        self.dirty = true;
        self.emit(&SceneEvent::ObjectModified(Some(id)));
        Ok(())
    }

    /// Copy an object with fresh ids, offset by `(dx, dy)`, and add it on top.
    pub fn clone_with_offset(&mut self, id: ObjectId, dx: f64, dy: f64) -> Option<ObjectId> {
        let copy = self.get(id)?.duplicate_offset(dx, dy);
        Some(self.add(copy))
    }

    /// Move an object to the top of the stack. Returns false if it is absent.
    pub fn bring_to_front(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let object = self.objects.remove(index);
        self.objects.push(object);
        self.dirty = true;
        true
    }

    /// Move an object to the bottom of the stack. Returns false if it is absent.
    pub fn send_to_back(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let object = self.objects.remove(index);
        self.objects.insert(0, object);
        self.dirty = true;
        true
    }

    /// Remove every object and the selection. The background is kept.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.active = None;
        self.dirty = true;
    }

    // --- Selection ---

    #[must_use]
    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    /// Select an object, or clear the selection with `None`.
    /// Returns false (and leaves the selection alone) for an unknown id.
    pub fn set_active(&mut self, id: Option<ObjectId>) -> bool {
        match id {
            Some(id) if self.index_of(id).is_none() => false,
            _ => {
                self.active = id;
                true
            }
        }
    }

    // --- Background ---

    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background = color.into();
        self.dirty = true;
    }

    // --- Full state ---

    #[must_use]
    pub fn export_state(&self) -> SceneState {
        SceneState {
            width: self.width,
            height: self.height,
            background: self.background.clone(),
            objects: self.objects.clone(),
        }
    }

    /// Replace the whole scene with `state` and report completion.
    ///
    /// Every embedded image source must resolve; on failure the scene is left
    /// untouched and the callback receives the error.
    pub fn import_state(&mut self, state: SceneState, on_complete: ImportCallback) {
        if let Err(err) = resolve_images(&state) {
            on_complete(Err(err));
            return;
        }
        self.width = state.width;
        self.height = state.height;
        self.background = state.background;
        self.objects = state.objects;
        self.active = None;
        self.dirty = true;
        on_complete(Ok(()));
    }

    // --- Events ---

    /// Register a change listener.
    pub fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    /// Emit a synthetic whole-scene modification notification.
    pub fn fire_modified(&mut self) {
        self.emit(&SceneEvent::ObjectModified(None));
    }

    fn emit(&self, event: &SceneEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    // --- Rendering ---

    /// Flush pending draw operations.
    pub fn render_all(&mut self) {
        self.dirty = false;
        self.renders += 1;
    }

    /// Whether the scene changed since the last `render_all`.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.dirty
    }

    /// Number of completed `render_all` calls.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Render a thumbnail and return it as a data token.
    ///
    /// Only `"svg"` is supported. `quality` in `(0, 1]` scales the thumbnail
    /// dimensions; values outside that range are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnsupportedThumbnailFormat`] for any other format.
    pub fn export_thumbnail(&self, format: &str, quality: f64) -> Result<String, SceneError> {
        if !format.eq_ignore_ascii_case("svg") {
            return Err(SceneError::UnsupportedThumbnailFormat(format.to_owned()));
        }
        let scale = if quality.is_finite() { quality.clamp(0.05, 1.0) } else { 1.0 };
        let svg = render::to_svg(&self.export_state(), scale);
        Ok(format!("{SVG_DATA_PREFIX}{}", svg.replace('#', "%23")))
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, NEUTRAL_BACKGROUND)
    }
}

impl fmt::Debug for SceneStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStore")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .field("objects", &self.objects.len())
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

fn resolve_images(state: &SceneState) -> Result<(), SceneError> {
    let mut sources = Vec::new();
    for object in &state.objects {
        object.collect_image_sources(&mut sources);
    }
    match sources.into_iter().find(|src| src.trim().is_empty()) {
        Some(src) => Err(SceneError::UnresolvedImage(src.to_owned())),
        None => Ok(()),
    }
}
