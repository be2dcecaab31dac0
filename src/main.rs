use std::error::Error;

use atelier::gallery::{self, GalleryStore, JsonFileGallery};
use atelier::shapes::{PatternKind, ShapeKind};
use atelier::{ArtStyle, Filter, Session, SessionConfig};
use scene::SceneStore;
use scene::consts::NEUTRAL_BACKGROUND;
use tokio::task::LocalSet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let env_file = dotenvy::dotenv().is_ok();
    tracing_subscriber::fmt::init();
    tracing::debug!(env_file, "environment loaded");

    let config = SessionConfig::from_env();
    LocalSet::new().run_until(run(config)).await
}

async fn run(config: SessionConfig) -> Result<(), Box<dyn Error>> {
    let surface = SceneStore::new(config.canvas_width, config.canvas_height, NEUTRAL_BACKGROUND);
    let session = Session::new(surface, &config)?;
    let mut gallery = JsonFileGallery::open(&config.gallery_path)?;
    tracing::info!(path = %gallery.path().display(), artworks = gallery.list().len(), "gallery ready");

    session.add_shape(ShapeKind::Circle, Some("#2196f3"));
    session.add_shape(ShapeKind::Star, None);
    tokio::time::sleep(config.capture_debounce * 2).await;
    session.set_selected_fill("#e91e63")?;
    session.add_pattern(PatternKind::Dots, Some("#ff9800"));
    tokio::time::sleep(config.capture_debounce * 2).await;

    session.apply_art_style(ArtStyle::PopArt)?;
    session.apply_filter(Filter::Vintage)?;
    tracing::info!(entries = session.history().len(), "edits recorded");

    session.undo().await?;
    session.redo().await?;

    session.set_artwork_name("Morning Study");
    let artwork = session.save_artwork(&mut gallery)?;
    let exported = gallery::download(&artwork, std::path::Path::new("."))?;
    tracing::info!(id = %artwork.id, file = %exported.display(), "artwork exported");
    Ok(())
}
