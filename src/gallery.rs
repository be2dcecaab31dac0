//! Saved-artwork gallery.
//!
//! DESIGN
//! ======
//! A gallery is an ordered list of [`Artwork`] records behind the
//! [`GalleryStore`] trait. [`MemoryGallery`] keeps them in memory;
//! [`JsonFileGallery`] mirrors them to a JSON file, reading it once on open
//! (a missing file is an empty gallery) and rewriting it after every
//! mutation through a temp file and rename. Gallery changes are never part of
//! the undo/redo timeline.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::snapshot::Snapshot;
use crate::style::Filter;

/// Default name for a new artwork.
pub const DEFAULT_ARTWORK_NAME: &str = "Untitled Masterpiece";

/// One saved artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub name: String,
    pub snapshot: Snapshot,
    /// Image data token produced by thumbnail export.
    pub thumbnail: String,
    /// Calendar date the artwork was saved, `YYYY-MM-DD`.
    pub date: String,
    /// Filter that was selected when saving.
    pub filter: Option<Filter>,
}

impl Artwork {
    /// New record with a fresh id, dated today (UTC).
    #[must_use]
    pub fn new(name: impl Into<String>, snapshot: Snapshot, thumbnail: String, filter: Option<Filter>) -> Self {
        Self::dated(name, snapshot, thumbnail, filter, OffsetDateTime::now_utc().date())
    }

    #[must_use]
    pub fn dated(
        name: impl Into<String>,
        snapshot: Snapshot,
        thumbnail: String,
        filter: Option<Filter>,
        date: Date,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            snapshot,
            thumbnail,
            date: date.to_string(),
            filter,
        }
    }

    /// File name used when downloading the thumbnail.
    #[must_use]
    pub fn download_name(&self) -> String {
        let stem: String = self
            .name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let stem = stem.trim();
        let stem = if stem.is_empty() { "artwork" } else { stem };
        format!("{stem}.svg")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("gallery io failed: {path}")]
    Io { path: PathBuf, source: io::Error },
    #[error("gallery file is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("artwork not found: {0}")]
    NotFound(String),
    #[error("thumbnail is not an svg data token")]
    UnsupportedThumbnail,
}

/// Key-value store of artworks, in insertion order.
pub trait GalleryStore {
    fn list(&self) -> &[Artwork];

    fn get(&self, id: &str) -> Option<&Artwork> {
        self.list().iter().find(|a| a.id == id)
    }

    /// Append an artwork.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn add(&mut self, artwork: Artwork) -> Result<(), GalleryError>;

    /// Remove an artwork and return it.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotFound`] for an unknown id, or an error if
    /// the backing storage cannot be written.
    fn delete(&mut self, id: &str) -> Result<Artwork, GalleryError>;
}

// =============================================================================
// IN-MEMORY
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryGallery {
    artworks: Vec<Artwork>,
}

impl MemoryGallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GalleryStore for MemoryGallery {
    fn list(&self) -> &[Artwork] {
        &self.artworks
    }

    fn add(&mut self, artwork: Artwork) -> Result<(), GalleryError> {
        self.artworks.push(artwork);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<Artwork, GalleryError> {
        take_by_id(&mut self.artworks, id)
    }
}

fn take_by_id(artworks: &mut Vec<Artwork>, id: &str) -> Result<Artwork, GalleryError> {
    let index = artworks
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| GalleryError::NotFound(id.to_owned()))?;
    Ok(artworks.remove(index))
}

// =============================================================================
// JSON FILE
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct GalleryFile {
    #[serde(default)]
    artworks: Vec<Artwork>,
}

/// Gallery persisted as one JSON document.
#[derive(Debug)]
pub struct JsonFileGallery {
    path: PathBuf,
    artworks: Vec<Artwork>,
}

impl JsonFileGallery {
    /// Open the gallery at `path`. A missing file is an empty gallery.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GalleryError> {
        let path = path.into();
        let artworks = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| GalleryError::Io { path: path.clone(), source })?;
            serde_json::from_str::<GalleryFile>(&raw)?.artworks
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), count = artworks.len(), "gallery opened");
        Ok(Self { path, artworks })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), GalleryError> {
        let file = GalleryFile { artworks: self.artworks.clone() };
        let serialized = serde_json::to_string_pretty(&file)?;
        let tmp = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GalleryError::Io { path: parent.to_path_buf(), source })?;
        }
        fs::write(&tmp, serialized).map_err(|source| GalleryError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &self.path).map_err(|source| GalleryError::Io { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), count = self.artworks.len(), "gallery written");
        Ok(())
    }
}

impl GalleryStore for JsonFileGallery {
    fn list(&self) -> &[Artwork] {
        &self.artworks
    }

    fn add(&mut self, artwork: Artwork) -> Result<(), GalleryError> {
        self.artworks.push(artwork);
        if let Err(e) = self.persist() {
            self.artworks.pop();
            return Err(e);
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<Artwork, GalleryError> {
        let index = self
            .artworks
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| GalleryError::NotFound(id.to_owned()))?;
        let removed = self.artworks.remove(index);
        if let Err(e) = self.persist() {
            self.artworks.insert(index, removed);
            return Err(e);
        }
        Ok(removed)
    }
}

// =============================================================================
// DOWNLOAD
// =============================================================================

/// Write an artwork's thumbnail into `dir` as an SVG file.
///
/// # Errors
///
/// Returns [`GalleryError::UnsupportedThumbnail`] if the thumbnail is not an
/// SVG data token, or an io error if the file cannot be written.
pub fn download(artwork: &Artwork, dir: &Path) -> Result<PathBuf, GalleryError> {
    let svg = artwork
        .thumbnail
        .strip_prefix(scene::consts::SVG_DATA_PREFIX)
        .ok_or(GalleryError::UnsupportedThumbnail)?
        .replace("%23", "#");
    let path = dir.join(artwork.download_name());
    fs::write(&path, svg).map_err(|source| GalleryError::Io { path: path.clone(), source })?;
    Ok(path)
}
