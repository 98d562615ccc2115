use std::path::PathBuf;

use log::info;

use crate::clients::entities::{ArtistId, Song, SongId};
use crate::clients::errors::Result;
use crate::clients::search::SearchOptions;
use crate::clients::{
    GeniusRequester, LocalStorage, Registry, Requester, discography, lyrics, resolver, search,
};

/// Configuration for the `Lyricist` struct
pub struct Config<R: Requester> {
    pub requester: R,
    pub storage: LocalStorage,
}

#[derive(Default)]
pub struct ConfigBuilder {
    token: Option<String>,
    save_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            token: None,
            save_dir: None,
        }
    }

    /// Access token to use instead of `GENIUS_ACCESS_TOKEN`
    #[must_use]
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    #[must_use]
    pub fn save_dir(mut self, save_dir: Option<PathBuf>) -> Self {
        self.save_dir = save_dir;
        self
    }

    pub fn build(self) -> Result<Config<GeniusRequester>> {
        let requester = GeniusRequester::try_default(self.token)?;
        let storage = match self.save_dir {
            Some(dir) => LocalStorage::new(dir),
            None => LocalStorage::try_default()?,
        };
        Ok(Config { requester, storage })
    }
}

/// Finds artists on Genius and searches their lyrics, caching everything it fetches.
pub struct Lyricist<R: Requester> {
    config: Config<R>,
    registry: Registry,
}

impl<R: Requester> Lyricist<R> {
    pub fn new(config: Config<R>) -> Self {
        Lyricist {
            config,
            registry: Registry::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub async fn canonical_name(&self, alias: &str) -> Result<String> {
        resolver::resolve_canonical_name(&self.config.requester, alias).await
    }

    pub async fn artist_id(&self, name: &str) -> Result<ArtistId> {
        resolver::resolve_id(&self.config.requester, name).await
    }

    pub async fn artist_from_id(&mut self, artist_id: ArtistId) -> Result<ArtistId> {
        discography::fetch_artist(&self.config.requester, &mut self.registry, artist_id).await
    }

    pub async fn artist_from_name(&mut self, name: &str) -> Result<ArtistId> {
        let artist_id = self.artist_id(name).await?;
        self.artist_from_id(artist_id).await
    }

    pub async fn fetch_artist_songs(&mut self, artist_id: ArtistId) -> Result<()> {
        discography::fetch_artist_songs(&self.config.requester, &mut self.registry, artist_id)
            .await
    }

    pub async fn fetch_lyrics(&mut self, song_id: SongId) -> Result<String> {
        lyrics::fetch_lyrics(&self.config.requester, &mut self.registry, song_id).await
    }

    pub async fn fetch_all_lyrics(&mut self, artist_id: ArtistId) -> Result<()> {
        lyrics::fetch_all_lyrics(&self.config.requester, &mut self.registry, artist_id).await
    }

    pub fn search<S: AsRef<str>>(
        &self,
        artist_id: ArtistId,
        queries: &[S],
        options: SearchOptions,
    ) -> Vec<&Song> {
        search::search(&self.registry, artist_id, queries, options)
    }

    pub async fn is_saved(&self, artist_id: ArtistId) -> Result<bool> {
        self.config.storage.is_saved(artist_id).await
    }

    pub async fn save(&self, artist_id: ArtistId) -> Result<PathBuf> {
        self.config.storage.save(&self.registry, artist_id).await
    }

    pub async fn load(&mut self, artist_id: ArtistId) -> Result<ArtistId> {
        self.config.storage.load(&mut self.registry, artist_id).await
    }

    /// Loads the artist from their snapshot, or fetches the artist, their songs and
    /// all lyrics and then writes the snapshot.
    pub async fn catalog(&mut self, artist_id: ArtistId) -> Result<ArtistId> {
        if self.is_saved(artist_id).await? {
            info!("Loading artist from saved JSON");
            return self.load(artist_id).await;
        }

        info!("Artist is not saved. Getting artist and songs");
        let artist_id = self.artist_from_id(artist_id).await?;
        self.fetch_artist_songs(artist_id).await?;
        self.fetch_all_lyrics(artist_id).await?;
        let path = self.save(artist_id).await?;
        info!("Saved artist to {path:?}");
        Ok(artist_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::fake::FakeRequester;
    use serde_json::json;
    use tempfile::TempDir;

    fn genius_fake() -> FakeRequester {
        let charli = json!({"id": 45349, "name": "Charli XCX", "url": "https://genius.com/artists/Charli-xcx"});
        let troye = json!({"id": 5, "name": "Troye Sivan", "url": "https://genius.com/artists/Troye-sivan"});
        let song = |id: u64, title: &str, primary: &serde_json::Value, featured: serde_json::Value| {
            json!({
                "id": id,
                "title": title,
                "full_title": format!("{title} by Charli XCX"),
                "url": format!("https://genius.com/songs/{id}"),
                "primary_artist": primary,
                "featured_artists": featured,
            })
        };
        FakeRequester::new()
            .with_api("artists/45349", json!({"artist": charli.clone()}))
            .with_api(
                "artists/45349/songs?per_page=50&page=1",
                json!({
                    "songs": [
                        song(1, "Boom Clap", &charli, json!([])),
                        song(2, "1999", &charli, json!([troye.clone()])),
                        song(3, "Broken Song", &charli, json!([])),
                        song(4, "Feature", &troye, json!([charli.clone()])),
                    ],
                    "next_page": null
                }),
            )
            .with_page(
                "https://genius.com/songs/1",
                r#"<div data-lyrics-container="true">[Chorus]<br/>Boom clap, the sound of my heart</div>"#,
            )
            .with_page(
                "https://genius.com/songs/2",
                r#"<div data-lyrics-container="true">I just wanna go back, back to 1999</div>"#,
            )
            .with_page(
                "https://genius.com/songs/4",
                r#"<div data-lyrics-container="true">My heart goes back</div>"#,
            )
    }

    #[tokio::test]
    async fn test_catalog_fetches_then_loads_from_disk() {
        let temp_dir = TempDir::new().unwrap();

        let mut lyricist = Lyricist::new(Config {
            requester: genius_fake(),
            storage: LocalStorage::new(temp_dir.path()),
        });
        let id = lyricist.catalog(ArtistId(45349)).await.unwrap();
        assert!(lyricist.is_saved(id).await.unwrap());
        assert_eq!(lyricist.registry().song(SongId(3)).unwrap().lyrics.as_deref(), Some(""));

        let titles: Vec<&str> = lyricist
            .search(id, &["heart"], SearchOptions::default())
            .into_iter()
            .map(|s| s.full_title.as_str())
            .collect();
        assert_eq!(titles, vec!["Boom Clap by Charli XCX", "Feature by Charli XCX"]);

        // A fresh session with no network data must be served from the snapshot
        let offline = FakeRequester::new();
        let mut reloaded = Lyricist::new(Config {
            requester: offline,
            storage: LocalStorage::new(temp_dir.path()),
        });
        let id = reloaded.catalog(ArtistId(45349)).await.unwrap();
        assert!(reloaded.config.requester.calls().is_empty());

        let options = SearchOptions {
            match_all: true,
            ..SearchOptions::default()
        };
        let found: Vec<SongId> = reloaded
            .search(id, &["back", "heart"], options)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(found, vec![SongId(4)]);
    }

    #[tokio::test]
    async fn test_artist_from_name() {
        let page = r#"<h1 class="profile_identity-name_iq_and_role_icon">Charli XCX</h1>
            <preload-content data-preload_data="{&quot;artist_songs&quot;:[{&quot;primary_artist&quot;:{&quot;id&quot;:45349,&quot;name&quot;:&quot;Charli XCX&quot;}}]}"></preload-content>"#;
        let requester = genius_fake()
            .with_page("artists/Charli", page)
            .with_page("artists/Charli-XCX", page);
        let mut lyricist = Lyricist::new(Config {
            requester,
            storage: LocalStorage::new("unused"),
        });

        assert_eq!(lyricist.canonical_name("Charli").await.unwrap(), "Charli XCX");
        let id = lyricist.artist_from_name("Charli").await.unwrap();
        assert_eq!(id, ArtistId(45349));
        assert_eq!(lyricist.registry().artist(id).unwrap().name, "Charli XCX");
    }
}
