use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric id Genius assigns to every artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(pub u64);

/// Numeric id Genius assigns to every song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(pub u64);

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub url: String,
    /// Songs where this artist is the primary artist, in discovery order
    pub songs: Vec<SongId>,
    /// Songs where this artist is credited as featured
    pub featured_on: Vec<SongId>,
}

#[derive(Debug)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub full_title: String,
    pub url: String,
    pub artist: ArtistId,
    pub featured_artists: Vec<ArtistId>,
    // None: never fetched. Some(""): fetch failed or the page had no lyrics.
    pub lyrics: Option<String>,
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_title)
    }
}

/// Artist record as returned by the API and as embedded in snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArtistData {
    pub id: ArtistId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Song record as returned by the API and as embedded in snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SongData {
    pub id: SongId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub full_title: String,
    #[serde(default)]
    pub url: String,
    pub primary_artist: ArtistData,
    #[serde(default)]
    pub featured_artists: Vec<ArtistData>,
    // Only present in snapshots; API song records carry no lyrics.
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl From<&Artist> for ArtistData {
    fn from(artist: &Artist) -> ArtistData {
        ArtistData {
            id: artist.id,
            name: artist.name.clone(),
            url: artist.url.clone(),
        }
    }
}
