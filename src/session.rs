//! Editing session: one surface, its history, and everything that edits it.
//!
//! DESIGN
//! ======
//! A `Session` owns the surface handle, the history stack, the debounced
//! change capture, and the RNG used for cosmetic randomness. Nothing is
//! global; each session (and each test) builds its own.
//!
//! Everything runs on one thread inside a `tokio::task::LocalSet`. Shared
//! state lives in `Rc<RefCell<_>>` / `Cell`, and no `RefCell` borrow is held
//! across an `.await`.
//!
//! HISTORY RULES
//! =============
//! - Construction, `clear`, and loads reset history to the resulting scene.
//! - Interactive edits (add, clone, delete, reorder) are captured through
//!   the debounce. Delete and reorder emit no "added" event, so they fire a
//!   synthetic "modified" to be observed.
//! - Style and filter appliers push synchronously. A pending debounced edit
//!   is flushed first so it keeps its own entry.
//! - `undo` / `redo` flush a pending edit, then apply the target snapshot and
//!   only move the cursor once the import completed. A failed apply leaves
//!   the cursor where it was.
//! - Only one navigation (undo, redo, load) may be applying at a time. While
//!   one is, every other history write (another navigation, appliers,
//!   `push_now`, `clear`) fails with [`SessionError::NavigationInFlight`] and
//!   debounced captures are deferred. Once the import lands the cursor is set
//!   to the exact entry that was applied.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use scene::consts::NEUTRAL_BACKGROUND;
use scene::{ObjectId, SceneError, SceneObject};
use tracing::{debug, info};

use crate::capture::{ChangeCapture, Hold};
use crate::config::SessionConfig;
use crate::gallery::{Artwork, DEFAULT_ARTWORK_NAME, GalleryError, GalleryStore};
use crate::history::HistoryStack;
use crate::shapes::{self, PatternKind, ShapeKind};
use crate::snapshot::{self, Snapshot, SnapshotError};
use crate::style::{self, ArtStyle, Filter};
use crate::surface::Surface;

/// Offset applied to a cloned object.
const CLONE_OFFSET: f64 = 20.0;

/// Thumbnail format and quality used when saving to the gallery.
const THUMBNAIL_FORMAT: &str = "svg";
const THUMBNAIL_QUALITY: f64 = 0.8;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("another history navigation is still applying")]
    NavigationInFlight,
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Gallery(#[from] GalleryError),
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

pub struct Session<S: Surface + 'static> {
    surface: Rc<RefCell<S>>,
    history: Rc<RefCell<HistoryStack>>,
    capture: ChangeCapture<S>,
    rng: RefCell<StdRng>,
    artwork_name: RefCell<String>,
    selected_filter: Cell<Option<Filter>>,
}

impl<S: Surface + 'static> Session<S> {
    /// Wrap `surface`, register the change listener, and seed history with
    /// the surface's current state.
    ///
    /// Must be called inside a `LocalSet`.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial scene cannot be encoded.
    pub fn new(surface: S, config: &SessionConfig) -> Result<Self, SessionError> {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let surface = Rc::new(RefCell::new(surface));
        let history = Rc::new(RefCell::new(HistoryStack::new()));
        let capture = ChangeCapture::new(&surface, Rc::clone(&history), config.capture_debounce);
        surface.borrow_mut().on_change(capture.listener());

        let initial = snapshot::encode(&*surface.borrow())?;
        history.borrow_mut().reset(initial);
        info!(debounce = ?config.capture_debounce, "session started");

        Ok(Self {
            surface,
            history,
            capture,
            rng: RefCell::new(rng),
            artwork_name: RefCell::new(DEFAULT_ARTWORK_NAME.to_owned()),
            selected_filter: Cell::new(None),
        })
    }

    // =============================================================================
    // ACCESSORS
    // =============================================================================

    #[must_use]
    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    #[must_use]
    pub fn history(&self) -> Ref<'_, HistoryStack> {
        self.history.borrow()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.borrow().can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.borrow().can_redo()
    }

    /// Whether an edit is waiting out the debounce window.
    #[must_use]
    pub fn capture_pending(&self) -> bool {
        self.capture.is_pending()
    }

    /// Whether an undo, redo, or load is still applying.
    #[must_use]
    pub fn is_navigating(&self) -> bool {
        self.capture.is_held()
    }

    #[must_use]
    pub fn artwork_name(&self) -> String {
        self.artwork_name.borrow().clone()
    }

    pub fn set_artwork_name(&self, name: impl Into<String>) {
        *self.artwork_name.borrow_mut() = name.into();
    }

    /// Last filter applied, restored by loads and cleared by `clear`.
    #[must_use]
    pub fn selected_filter(&self) -> Option<Filter> {
        self.selected_filter.get()
    }

    // =============================================================================
    // SHAPES AND OBJECT ACTIONS
    // =============================================================================

    /// Add a shape at the default placement and select it.
    pub fn add_shape(&self, kind: ShapeKind, color: Option<&str>) -> ObjectId {
        let object = shapes::build_shape(kind, color, &mut *self.rng.borrow_mut());
        let mut surface = self.surface.borrow_mut();
        let id = surface.add(object);
        surface.set_active(Some(id));
        surface.render_all();
        debug!(shape = kind.name(), %id, "shape added");
        id
    }

    /// Add a grouped pattern and select it.
    pub fn add_pattern(&self, kind: PatternKind, base_color: Option<&str>) -> ObjectId {
        let object = shapes::build_pattern(kind, base_color, &mut *self.rng.borrow_mut());
        let mut surface = self.surface.borrow_mut();
        let id = surface.add(object);
        surface.set_active(Some(id));
        surface.render_all();
        debug!(pattern = kind.name(), %id, "pattern added");
        id
    }

    /// Remove the active object. Returns false when nothing is selected.
    pub fn delete_selected(&self) -> bool {
        let mut surface = self.surface.borrow_mut();
        let Some(id) = surface.active() else {
            return false;
        };
        if surface.remove(id).is_none() {
            return false;
        }
        surface.fire_modified();
        surface.render_all();
        debug!(%id, "object deleted");
        true
    }

    /// Duplicate the active object, offset by 20 units, and select the copy.
    pub fn clone_selected(&self) -> Option<ObjectId> {
        let mut surface = self.surface.borrow_mut();
        let id = surface.active()?;
        let copy = surface.clone_with_offset(id, CLONE_OFFSET, CLONE_OFFSET)?;
        surface.set_active(Some(copy));
        surface.render_all();
        debug!(source = %id, %copy, "object cloned");
        Some(copy)
    }

    /// Set the fill of the active object, or of every shape in the active
    /// group. Captured through the debounce like any interactive edit.
    /// Returns false when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface no longer holds the active object.
    pub fn set_selected_fill(&self, color: &str) -> Result<bool, SessionError> {
        let mut surface = self.surface.borrow_mut();
        let Some(id) = surface.active() else {
            return Ok(false);
        };
        surface.modify(id, &mut |object: &mut SceneObject| recolor(object, color))?;
        surface.render_all();
        debug!(%id, fill = color, "selection recolored");
        Ok(true)
    }

    pub fn bring_to_front(&self) -> bool {
        self.reorder(|surface, id| surface.bring_to_front(id))
    }

    pub fn send_to_back(&self) -> bool {
        self.reorder(|surface, id| surface.send_to_back(id))
    }

    fn reorder(&self, op: impl FnOnce(&mut S, ObjectId) -> bool) -> bool {
        let mut surface = self.surface.borrow_mut();
        let Some(id) = surface.active() else {
            return false;
        };
        if !op(&mut surface, id) {
            return false;
        }
        surface.fire_modified();
        surface.render_all();
        true
    }

    /// Empty the scene, reset the background and selected filter, and reseed
    /// history with the cleared scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleared scene cannot be encoded.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.capture.cancel();
        let cleared = {
            let mut surface = self.surface.borrow_mut();
            surface.clear();
            surface.set_background(NEUTRAL_BACKGROUND);
            surface.render_all();
            snapshot::encode(&*surface)?
        };
        self.selected_filter.set(None);
        self.history.borrow_mut().reset(cleared);
        info!("scene cleared");
        Ok(())
    }

    // =============================================================================
    // APPLIERS
    // =============================================================================

    /// Apply an art style and push the result immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be encoded.
    pub fn apply_art_style(&self, style: ArtStyle) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.capture.flush();
        style::apply_art_style(&mut *self.surface.borrow_mut(), style, &mut *self.rng.borrow_mut());
        self.commit()?;
        info!(style = style.name(), "art style applied");
        Ok(())
    }

    /// Apply a style by name. Unknown names reset the background only.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be encoded.
    pub fn apply_art_style_named(&self, name: &str) -> Result<(), SessionError> {
        if let Some(style) = ArtStyle::from_name(name) {
            return self.apply_art_style(style);
        }
        self.ensure_idle()?;
        self.capture.flush();
        style::reset_background(&mut *self.surface.borrow_mut());
        self.commit()?;
        info!(style = name, "unknown art style; background reset");
        Ok(())
    }

    /// Apply a filter, remember it as selected, and push immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be encoded.
    pub fn apply_filter(&self, filter: Filter) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.capture.flush();
        style::apply_filter(&mut *self.surface.borrow_mut(), filter);
        self.selected_filter.set(Some(filter));
        self.commit()?;
        info!(filter = filter.name(), "filter applied");
        Ok(())
    }

    /// Apply a filter by name. Unknown names behave like `none`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be encoded.
    pub fn apply_filter_named(&self, name: &str) -> Result<(), SessionError> {
        self.apply_filter(Filter::from_name(name))
    }

    /// Push the current scene now, superseding any pending debounced edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be encoded.
    pub fn push_now(&self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.capture.cancel();
        self.commit()
    }

    fn commit(&self) -> Result<(), SessionError> {
        let snapshot = snapshot::encode(&*self.surface.borrow())?;
        let mut history = self.history.borrow_mut();
        history.push(snapshot);
        debug!(entries = history.len(), cursor = ?history.cursor(), "history push");
        Ok(())
    }

    // =============================================================================
    // NAVIGATION
    // =============================================================================

    fn begin_navigation(&self) -> Result<Hold<'_, S>, SessionError> {
        self.capture.hold().ok_or(SessionError::NavigationInFlight)
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.capture.is_held() {
            return Err(SessionError::NavigationInFlight);
        }
        Ok(())
    }

    /// Step back one entry. Returns false at the oldest entry.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NavigationInFlight`] while another navigation
    /// is applying, or the restore error; the cursor does not move on error.
    pub async fn undo(&self) -> Result<bool, SessionError> {
        self.navigate(Direction::Back).await
    }

    /// Step forward one entry. Returns false at the newest entry.
    ///
    /// # Errors
    ///
    /// Same as [`Session::undo`].
    pub async fn redo(&self) -> Result<bool, SessionError> {
        self.navigate(Direction::Forward).await
    }

    async fn navigate(&self, direction: Direction) -> Result<bool, SessionError> {
        let hold = self.begin_navigation()?;
        self.capture.flush();
        let Some((index, target)) = self.neighbor(direction) else {
            return Ok(false);
        };
        let restored = snapshot::restore(&*self.surface, &target).await;
        hold.settle(restored.is_ok());
        restored?;
        let mut history = self.history.borrow_mut();
        history.seek(index);
        debug!(?direction, cursor = ?history.cursor(), "history navigation applied");
        Ok(true)
    }

    fn neighbor(&self, direction: Direction) -> Option<(usize, Snapshot)> {
        let history = self.history.borrow();
        let cursor = history.cursor()?;
        let index = match direction {
            Direction::Back => cursor.checked_sub(1)?,
            Direction::Forward => cursor + 1,
        };
        history.entries().get(index).map(|entry| (index, entry.clone()))
    }

    /// Replace the scene with `snapshot` and make it the sole history entry.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NavigationInFlight`] while another navigation
    /// is applying, or the restore error; history is untouched on error.
    pub async fn load_snapshot(&self, snapshot: Snapshot) -> Result<(), SessionError> {
        let hold = self.begin_navigation()?;
        self.capture.cancel();
        let restored = snapshot::restore(&*self.surface, &snapshot).await;
        hold.settle(restored.is_ok());
        restored?;
        self.history.borrow_mut().reset(snapshot);
        debug!("snapshot loaded; history reset");
        Ok(())
    }

    // =============================================================================
    // GALLERY
    // =============================================================================

    /// Store the current scene in `gallery` under the current artwork name.
    /// History is not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding, thumbnail export, or the gallery write fails.
    pub fn save_artwork<G: GalleryStore + ?Sized>(&self, gallery: &mut G) -> Result<Artwork, SessionError> {
        let (snapshot, thumbnail) = {
            let surface = self.surface.borrow();
            (snapshot::encode(&*surface)?, surface.export_thumbnail(THUMBNAIL_FORMAT, THUMBNAIL_QUALITY)?)
        };
        let artwork = Artwork::new(self.artwork_name(), snapshot, thumbnail, self.selected_filter.get());
        gallery.add(artwork.clone())?;
        info!(id = %artwork.id, name = %artwork.name, "artwork saved");
        Ok(artwork)
    }

    /// Load a stored artwork, adopting its name and filter, and reset history.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotFound`] for an unknown id, otherwise the
    /// errors of [`Session::load_snapshot`].
    pub async fn load_artwork<G: GalleryStore + ?Sized>(&self, gallery: &G, id: &str) -> Result<(), SessionError> {
        let artwork = gallery.get(id).cloned().ok_or_else(|| GalleryError::NotFound(id.to_owned()))?;
        self.load_snapshot(artwork.snapshot).await?;
        self.set_artwork_name(artwork.name.clone());
        self.selected_filter.set(artwork.filter);
        info!(id = %artwork.id, name = %artwork.name, "artwork loaded");
        Ok(())
    }
}

fn recolor(object: &mut SceneObject, fill: &str) {
    match object {
        SceneObject::Primitive(primitive) => primitive.paint.fill = fill.to_owned(),
        SceneObject::Group(group) => {
            for child in &mut group.children {
                recolor(child, fill);
            }
        }
    }
}
