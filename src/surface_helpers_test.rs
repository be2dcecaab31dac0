//! Test surfaces with controllable import completion.

use super::*;

/// How a [`TestSurface`] completes `import_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Complete synchronously, like `SceneStore`.
    Immediate,
    /// Queue the import until [`TestSurface::complete_imports`] runs.
    Deferred,
    /// Drop the completion callback without calling it.
    Abandon,
}

/// `SceneStore` wrapper whose import completion is driven by the test.
pub struct TestSurface {
    pub inner: SceneStore,
    pub mode: ImportMode,
    pub import_calls: usize,
    queued: Vec<(SceneState, ImportCallback)>,
}

impl TestSurface {
    #[must_use]
    pub fn new(mode: ImportMode) -> Self {
        Self { inner: SceneStore::default(), mode, import_calls: 0, queued: Vec::new() }
    }

    /// Apply every queued import in order. Returns how many completed.
    pub fn complete_imports(&mut self) -> usize {
        let queued = std::mem::take(&mut self.queued);
        let count = queued.len();
        for (state, on_complete) in queued {
            self.inner.import_state(state, on_complete);
        }
        count
    }

    #[must_use]
    pub fn pending_imports(&self) -> usize {
        self.queued.len()
    }
}

impl Surface for TestSurface {
    fn objects(&self) -> &[SceneObject] {
        self.inner.objects()
    }

    fn objects_mut(&mut self) -> &mut [SceneObject] {
        self.inner.objects_mut()
    }

    fn add(&mut self, object: SceneObject) -> ObjectId {
        self.inner.add(object)
    }

    fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.inner.remove(id)
    }

    fn modify(&mut self, id: ObjectId, edit: &mut dyn FnMut(&mut SceneObject)) -> Result<(), SceneError> {
        self.inner.modify(id, edit)
    }

    fn set_active(&mut self, id: Option<ObjectId>) -> bool {
        self.inner.set_active(id)
    }

    fn active(&self) -> Option<ObjectId> {
        self.inner.active()
    }

    fn bring_to_front(&mut self, id: ObjectId) -> bool {
        self.inner.bring_to_front(id)
    }

    fn send_to_back(&mut self, id: ObjectId) -> bool {
        self.inner.send_to_back(id)
    }

    fn clone_with_offset(&mut self, id: ObjectId, dx: f64, dy: f64) -> Option<ObjectId> {
        self.inner.clone_with_offset(id, dx, dy)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn background(&self) -> &str {
        self.inner.background()
    }

    fn set_background(&mut self, color: &str) {
        self.inner.set_background(color);
    }

    fn export_state(&self) -> SceneState {
        self.inner.export_state()
    }

    fn import_state(&mut self, state: SceneState, on_complete: ImportCallback) {
        self.import_calls += 1;
        match self.mode {
            ImportMode::Immediate => self.inner.import_state(state, on_complete),
            ImportMode::Deferred => self.queued.push((state, on_complete)),
            ImportMode::Abandon => drop(on_complete),
        }
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.inner.on_change(listener);
    }

    fn fire_modified(&mut self) {
        self.inner.fire_modified();
    }

    fn render_all(&mut self) {
        self.inner.render_all();
    }

    fn export_thumbnail(&self, format: &str, quality: f64) -> Result<String, SceneError> {
        self.inner.export_thumbnail(format, quality)
    }
}
