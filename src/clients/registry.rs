use std::collections::HashMap;

use log::debug;
use unicode_normalization::UnicodeNormalization;

use crate::clients::entities::{Artist, ArtistData, ArtistId, Song, SongData, SongId};

/// De-duplicating arena of every artist and song decoded during a session.
///
/// At most one `Artist` exists per `ArtistId` and one `Song` per `SongId`. The
/// first record seen for an id wins; later records with the same id are ignored.
/// Entities refer to each other by id and are resolved through the registry.
#[derive(Debug, Default)]
pub struct Registry {
    artists: HashMap<ArtistId, Artist>,
    songs: HashMap<SongId, Song>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn get_or_create_artist(&mut self, data: &ArtistData) -> ArtistId {
        self.artists.entry(data.id).or_insert_with(|| {
            debug!("Registering artist {} ({})", data.name, data.id);
            Artist {
                id: data.id,
                name: data.name.clone(),
                url: data.url.clone(),
                songs: Vec::new(),
                featured_on: Vec::new(),
            }
        });
        data.id
    }

    /// Registers a song together with its primary and featured artists, and links
    /// it into their `songs` and `featured_on` lists.
    pub fn get_or_create_song(&mut self, data: &SongData) -> SongId {
        if self.songs.contains_key(&data.id) {
            return data.id;
        }

        let artist = self.get_or_create_artist(&data.primary_artist);
        let featured_artists: Vec<ArtistId> = data
            .featured_artists
            .iter()
            .map(|a| self.get_or_create_artist(a))
            .collect();

        if let Some(primary) = self.artists.get_mut(&artist) {
            primary.songs.push(data.id);
        }
        for featured_id in &featured_artists {
            if let Some(featured) = self.artists.get_mut(featured_id) {
                featured.featured_on.push(data.id);
            }
        }

        debug!("Registering song {} ({})", data.full_title, data.id);
        self.songs.insert(
            data.id,
            Song {
                id: data.id,
                title: data.title.nfkd().collect(),
                full_title: data.full_title.nfkd().collect(),
                url: data.url.clone(),
                artist,
                featured_artists,
                lyrics: None,
            },
        );
        data.id
    }

    pub fn artist(&self, id: ArtistId) -> Option<&Artist> {
        self.artists.get(&id)
    }

    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.songs.get(&id)
    }

    pub fn song_mut(&mut self, id: SongId) -> Option<&mut Song> {
        self.songs.get_mut(&id)
    }

    /// Ids of the artist's own songs followed by the songs they feature on.
    pub fn discography(&self, id: ArtistId, include_featured: bool) -> Vec<SongId> {
        let Some(artist) = self.artists.get(&id) else {
            return Vec::new();
        };
        let mut ids = artist.songs.clone();
        if include_featured {
            ids.extend_from_slice(&artist.featured_on);
        }
        ids
    }

    /// Snapshot form of a registered song, with its artists embedded.
    pub fn song_data(&self, id: SongId) -> Option<SongData> {
        let song = self.songs.get(&id)?;
        let primary_artist = ArtistData::from(self.artists.get(&song.artist)?);
        let featured_artists = song
            .featured_artists
            .iter()
            .filter_map(|a| self.artists.get(a).map(ArtistData::from))
            .collect();
        Some(SongData {
            id: song.id,
            title: song.title.clone(),
            full_title: song.full_title.clone(),
            url: song.url.clone(),
            primary_artist,
            featured_artists,
            lyrics: song.lyrics.clone(),
        })
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }
}
