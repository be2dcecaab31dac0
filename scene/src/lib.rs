//! In-memory drawing surface for the art editor.
//!
//! This crate owns the scene: the ordered list of drawable objects, the
//! background color, the active selection, and the change notifications that
//! fire when objects are added or modified. It knows nothing about history;
//! the application crate snapshots and restores it through
//! [`store::SceneStore::export_state`] and [`store::SceneStore::import_state`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`object`] | Scene object model (`Primitive` / `Group`), paint and transform |
//! | [`store`] | `SceneStore`, change events, import/export of full state |
//! | [`geometry`] | Point generation for regular polygons and stars |
//! | [`render`] | SVG rendering used for gallery thumbnails |
//! | [`consts`] | Shared defaults (canvas size, neutral background, paint defaults) |

pub mod consts;
pub mod geometry;
pub mod object;
pub mod render;
pub mod store;

pub use object::{Group, ImageFilter, ObjectId, Paint, Point, Primitive, SceneObject, Shape, Transform};
pub use store::{ChangeListener, ImportCallback, SceneError, SceneEvent, SceneState, SceneStore};
