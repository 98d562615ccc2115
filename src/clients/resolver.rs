//! Turns a user supplied artist alias into the id Genius uses for the artist.
//!
//! Genius has no endpoint mapping a name to an id. The canonical name is read
//! from the artist's profile page, then the id is looked up in the song credits
//! embedded in that page. Producers are often credited on none of the songs
//! listed on their own page, so the API search results are scanned as a last resort.

use std::sync::LazyLock;

use log::{debug, info};
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::clients::entities::{ArtistData, ArtistId};
use crate::clients::errors::{Error, Result};
use crate::clients::genius::Requester;
use crate::clients::lyrics::remove_punctuation;

static PROFILE_NAME: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1.profile_identity-name_iq_and_role_icon").expect("profile name selector")
});
static PRELOAD_CONTENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("preload-content[data-preload_data]").expect("preload content selector")
});
const ARTIST_SONGS_MARKER: &str = r#"{"artist_songs":["#;

/// Primary and featured artist credits of a song.
#[derive(Deserialize, Debug)]
pub struct SongCredits {
    pub primary_artist: ArtistData,
    #[serde(default)]
    pub featured_artists: Vec<ArtistData>,
}

#[derive(Deserialize, Debug)]
struct PreloadedSongs {
    artist_songs: Vec<SongCredits>,
}

#[derive(Deserialize, Debug)]
struct SearchHit {
    result: SongCredits,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    hits: Vec<SearchHit>,
}

fn artist_page_path(name: &str) -> String {
    format!("artists/{}", remove_punctuation(name).replace(' ', "-"))
}

/// Text of the profile heading, without the whitespace around it.
pub fn parse_canonical_name(page: &str) -> Option<String> {
    let html = Html::parse_document(page);
    let heading = html.select(&PROFILE_NAME).next()?;
    heading
        .text()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Song credits embedded in an artist page, if the page carries them.
pub fn parse_preloaded_credits(page: &str) -> Option<Vec<SongCredits>> {
    let page = page.replace("<br/>", "\n");
    let html = Html::parse_document(&page);
    let raw = html
        .select(&PRELOAD_CONTENT)
        .filter_map(|el| el.value().attr("data-preload_data"))
        .find(|data| data.contains(ARTIST_SONGS_MARKER))?;

    match serde_json::from_str::<PreloadedSongs>(raw) {
        Ok(preloaded) => Some(preloaded.artist_songs),
        Err(e) => {
            debug!("Malformed artist_songs payload: {e}");
            None
        }
    }
}

// First credited artist, primary before featured, whose name is exactly `name`
fn find_credited_id<'a, I>(credits: I, name: &str) -> Option<ArtistId>
where
    I: IntoIterator<Item = &'a SongCredits>,
{
    credits.into_iter().find_map(|song| {
        std::iter::once(&song.primary_artist)
            .chain(&song.featured_artists)
            .find(|artist| artist.name == name)
            .map(|artist| artist.id)
    })
}

/// Gets the name Genius uses for the artist known as `alias`.
///
/// For example "Olsen Twins" resolves to "Mary Kate & Ashley Olsen" and
/// "Tina Snow" to "Megan Thee Stallion".
pub async fn resolve_canonical_name<R: Requester>(requester: &R, alias: &str) -> Result<String> {
    let page = requester.web_page(&artist_page_path(alias)).await?;
    parse_canonical_name(&page).ok_or_else(|| {
        Error::LookupError(format!("Couldn't find the Genius name for {alias}"))
    })
}

pub async fn resolve_id<R: Requester>(requester: &R, name: &str) -> Result<ArtistId> {
    let name = resolve_canonical_name(requester, name).await?;
    debug!("Canonical name is {name}");

    let page = requester.web_page(&artist_page_path(&name)).await?;
    match parse_preloaded_credits(&page) {
        Some(credits) => {
            if let Some(id) = find_credited_id(&credits, &name) {
                return Ok(id);
            }
            info!("{name} is not credited on their own songs, trying search");
        }
        None => info!("No song credits on the page of {name}, trying search"),
    }

    let response = requester.api_get("search", &[("q", name.clone())]).await?;
    let response: SearchResponse = serde_json::from_value(response)?;
    find_credited_id(response.hits.iter().map(|hit| &hit.result), &name)
        .ok_or_else(|| Error::LookupError(format!("Couldn't get the id for {name}")))
}
