use log::debug;
use serde::Deserialize;

use crate::clients::entities::{ArtistData, ArtistId, SongData};
use crate::clients::errors::Result;
use crate::clients::genius::Requester;
use crate::clients::registry::Registry;

const SONGS_PER_PAGE: u32 = 50;

#[derive(Deserialize, Debug)]
struct ArtistResponse {
    artist: ArtistData,
}

#[derive(Deserialize, Debug)]
struct SongsPage {
    songs: Vec<SongData>,
    next_page: Option<u32>,
}

/// Gets the artist with the given id from the API and registers it.
pub async fn fetch_artist<R: Requester>(
    requester: &R,
    registry: &mut Registry,
    artist_id: ArtistId,
) -> Result<ArtistId> {
    let response = requester
        .api_get(&format!("artists/{artist_id}"), &[])
        .await?;
    let response: ArtistResponse = serde_json::from_value(response)?;
    Ok(registry.get_or_create_artist(&response.artist))
}

/// Registers every song listed for the artist, following the API's pagination.
pub async fn fetch_artist_songs<R: Requester>(
    requester: &R,
    registry: &mut Registry,
    artist_id: ArtistId,
) -> Result<()> {
    let path = format!("artists/{artist_id}/songs");
    let mut page = Some(1);
    while let Some(current) = page {
        let params = [
            ("per_page", SONGS_PER_PAGE.to_string()),
            ("page", current.to_string()),
        ];
        let response = requester.api_get(&path, &params).await?;
        let response: SongsPage = serde_json::from_value(response)?;
        debug!(
            "Got {} songs from page {current} for artist {artist_id}",
            response.songs.len()
        );
        for song in &response.songs {
            registry.get_or_create_song(song);
        }
        page = response.next_page;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::entities::SongId;
    use crate::clients::errors::Error;
    use crate::clients::fake::FakeRequester;
    use serde_json::{Value, json};

    fn song(id: u64, primary: Value, featured: Value) -> Value {
        json!({
            "id": id,
            "title": format!("Song {id}"),
            "full_title": format!("Song {id} by someone"),
            "url": format!("https://genius.com/song-{id}-lyrics"),
            "primary_artist": primary,
            "featured_artists": featured,
        })
    }

    #[tokio::test]
    async fn test_fetch_artist() {
        let requester = FakeRequester::new().with_api(
            "artists/45349",
            json!({"artist": {"id": 45349, "name": "Charli XCX", "url": "https://genius.com/artists/Charli-xcx"}}),
        );
        let mut registry = Registry::new();

        let id = fetch_artist(&requester, &mut registry, ArtistId(45349)).await.unwrap();
        let artist = registry.artist(id).unwrap();
        assert_eq!(artist.name, "Charli XCX");
        assert_eq!(artist.url, "https://genius.com/artists/Charli-xcx");
    }

    #[tokio::test]
    async fn test_fetch_artist_missing_field() {
        let requester = FakeRequester::new().with_api("artists/1", json!({"user": {}}));
        let mut registry = Registry::new();

        let result = fetch_artist(&requester, &mut registry, ArtistId(1)).await;
        assert!(matches!(result, Err(Error::DeserializationError(_))));
    }

    #[tokio::test]
    async fn test_fetch_artist_songs_follows_pages() {
        let me = json!({"id": 1, "name": "Me", "url": ""});
        let other = json!({"id": 2, "name": "Other", "url": ""});
        let requester = FakeRequester::new()
            .with_api(
                "artists/1/songs?per_page=50&page=1",
                json!({"songs": [song(10, me.clone(), json!([])), song(11, other.clone(), json!([me.clone()]))], "next_page": 2}),
            )
            .with_api(
                "artists/1/songs?per_page=50&page=2",
                json!({"songs": [song(12, me.clone(), json!([other]))], "next_page": null}),
            );
        let mut registry = Registry::new();
        registry.get_or_create_artist(&ArtistData {
            id: ArtistId(1),
            name: "Me".into(),
            url: String::new(),
        });

        fetch_artist_songs(&requester, &mut registry, ArtistId(1)).await.unwrap();

        let artist = registry.artist(ArtistId(1)).unwrap();
        assert_eq!(artist.songs, vec![SongId(10), SongId(12)]);
        assert_eq!(artist.featured_on, vec![SongId(11)]);
        assert_eq!(registry.artist(ArtistId(2)).unwrap().featured_on, vec![SongId(12)]);
        assert_eq!(requester.calls().len(), 2);
    }
}
