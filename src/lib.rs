//! Scene history and snapshot engine for the art editor.
//!
//! Edits to a [`scene::SceneStore`] are observed through change events,
//! debounced, and recorded as JSON snapshots on a linear undo/redo timeline.
//! Style and filter appliers rewrite the whole scene and record one entry
//! each. Finished artworks go to a gallery with an SVG thumbnail.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | `Session`: wires surface, history, capture, appliers, and gallery |
//! | [`history`] | `HistoryStack`: entries plus cursor, branch truncation |
//! | [`capture`] | Debounced change capture into history |
//! | [`timer`] | Cancellable one-shot timers on the local task set |
//! | [`snapshot`] | Snapshot encode, decode, and async restore |
//! | [`surface`] | `Surface` trait over the drawing surface |
//! | [`style`] | Art styles and color filters |
//! | [`color`] | Palette, hex parsing, and color transforms |
//! | [`shapes`] | Shape and pattern construction |
//! | [`gallery`] | Saved artworks, in memory or in a JSON file |
//! | [`config`] | Environment-driven session configuration |

pub mod capture;
pub mod color;
pub mod config;
pub mod gallery;
pub mod history;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod style;
pub mod surface;
pub mod timer;

pub use config::SessionConfig;
pub use gallery::{Artwork, GalleryStore, JsonFileGallery, MemoryGallery};
pub use history::HistoryStack;
pub use session::{Session, SessionError};
pub use snapshot::{Snapshot, SnapshotError};
pub use style::{ArtStyle, Filter};
pub use surface::Surface;
