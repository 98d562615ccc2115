use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clients::entities::{ArtistData, ArtistId, SongData};
use crate::clients::errors::{Error, Result};
use crate::clients::registry::Registry;

pub const SAVE_DIR_ENV_VAR: &str = "LYRICIST_SAVE_DIR";

/// Snapshot of an artist and every song found for them, one file per artist.
#[derive(Serialize, Deserialize, Debug)]
struct ArtistSnapshot {
    #[serde(flatten)]
    artist: ArtistData,
    /// Unix timestamp (seconds) of when the snapshot was written
    time: f64,
    songs: Vec<SongData>,
    featured_on: Vec<SongData>,
}

/// JSON snapshots of artists, stored as `<dir>/<artist id>.json`.
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalStorage { dir: dir.into() }
    }

    // Use LYRICIST_SAVE_DIR if set, otherwise a directory in the user's cache dir
    pub fn try_default() -> Result<Self> {
        let dir = match std::env::var(SAVE_DIR_ENV_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(std::env::VarError::NotPresent) => dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
                .join("lyricist")
                .join("artists"),
            Err(e) => return Err(Error::from(e)),
        };
        debug!("Using save directory {dir:?}");
        Ok(LocalStorage { dir })
    }

    pub fn path_for(&self, artist_id: ArtistId) -> PathBuf {
        self.dir.join(format!("{artist_id}.json"))
    }

    pub async fn is_saved(&self, artist_id: ArtistId) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path_for(artist_id)).await?)
    }

    /// Writes the artist and all of their songs, lyrics included.
    pub async fn save(&self, registry: &Registry, artist_id: ArtistId) -> Result<PathBuf> {
        let artist = registry
            .artist(artist_id)
            .ok_or_else(|| Error::LookupError(format!("Unknown artist {artist_id}")))?;
        let snapshot = ArtistSnapshot {
            artist: ArtistData::from(artist),
            time: unix_time(),
            songs: artist
                .songs
                .iter()
                .filter_map(|id| registry.song_data(*id))
                .collect(),
            featured_on: artist
                .featured_on
                .iter()
                .filter_map(|id| registry.song_data(*id))
                .collect(),
        };

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(artist_id);
        tokio::fs::write(&path, serde_json::to_vec(&snapshot)?).await?;
        debug!(
            "Saved {} songs and {} features of {} to {path:?}",
            snapshot.songs.len(),
            snapshot.featured_on.len(),
            snapshot.artist.name
        );
        Ok(path)
    }

    /// Rebuilds a saved artist and their songs into `registry`.
    ///
    /// Stored lyrics are restored as they were written, without refetching.
    pub async fn load(&self, registry: &mut Registry, artist_id: ArtistId) -> Result<ArtistId> {
        let path = self.path_for(artist_id);
        let contents = tokio::fs::read(&path).await?;
        let snapshot: ArtistSnapshot = serde_json::from_slice(&contents)?;

        let id = registry.get_or_create_artist(&snapshot.artist);
        for song_data in snapshot.songs.iter().chain(&snapshot.featured_on) {
            let song_id = registry.get_or_create_song(song_data);
            if let Some(song) = registry.song_mut(song_id) {
                song.lyrics.clone_from(&song_data.lyrics);
            }
        }
        debug!("Loaded artist {id} from {path:?}");
        Ok(id)
    }
}

#[allow(clippy::cast_precision_loss)]
fn unix_time() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
