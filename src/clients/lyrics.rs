use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use caseless::default_case_fold_str;
use scraper::{Html, Selector};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::clients::entities::{ArtistId, SongId};
use crate::clients::errors::{Error, Result};
use crate::clients::genius::Requester;
use crate::clients::registry::Registry;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern"));
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br\s*/?>").expect("line break pattern"));
// Section headers such as "[Chorus]" that sit on their own line
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]\n").expect("section header pattern"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("blank lines pattern"));
static LYRICS_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[data-lyrics-container="true"]"#).expect("lyrics container selector")
});

/// Removes every character that is neither a word character nor whitespace.
///
/// Combining marks count as punctuation, so decomposed accents are dropped with it.
pub fn remove_punctuation(text: &str) -> String {
    let text: String = text.chars().filter(|c| !is_combining_mark(*c)).collect();
    PUNCTUATION.replace_all(&text, "").into_owned()
}

/// Normalizes raw lyric text into the searchable form stored on a `Song`.
pub fn normalize_lyrics(text: &str) -> String {
    let text: String = text.nfkd().collect();
    let text = SECTION_HEADER.replace_all(&text, "");
    let text = remove_punctuation(&default_case_fold_str(&text));
    BLANK_LINES.replace_all(&text, "\n").into_owned()
}

/// Normalizes a search query the same way stored lyrics are.
pub fn normalize_query(query: &str) -> String {
    let query: String = query.nfkd().collect();
    remove_punctuation(&default_case_fold_str(&query))
}

/// Extracts the text of the first lyrics container on a song page.
pub fn extract_lyrics(page: &str) -> Option<String> {
    let page = LINE_BREAK.replace_all(page, "\n");
    let html = Html::parse_document(&page);
    let container = html.select(&LYRICS_CONTAINER).next()?;
    Some(container.text().collect())
}

async fn scrape_lyrics<R: Requester>(requester: &R, url: &str) -> Result<String> {
    let page = requester.web_page(url).await?;
    let text = extract_lyrics(&page)
        .ok_or_else(|| Error::ParseError(format!("No lyrics container found on {url}")))?;
    Ok(normalize_lyrics(&text))
}

/// Returns the song's lyrics, fetching them on first use.
///
/// A failed fetch is stored as an empty string and never reported as an error,
/// so a single broken page cannot abort a batch.
pub async fn fetch_lyrics<R: Requester>(
    requester: &R,
    registry: &mut Registry,
    song_id: SongId,
) -> Result<String> {
    let song = registry
        .song_mut(song_id)
        .ok_or_else(|| Error::LookupError(format!("Unknown song {song_id}")))?;
    if let Some(lyrics) = &song.lyrics {
        return Ok(lyrics.clone());
    }

    let lyrics = match scrape_lyrics(requester, &song.url).await {
        Ok(lyrics) => lyrics,
        Err(e) => {
            debug!("Could not get lyrics for {}: {e}", song.full_title);
            String::new()
        }
    };
    song.lyrics = Some(lyrics.clone());
    Ok(lyrics)
}

/// Fetches lyrics for the artist's songs, then the songs they are featured on.
pub async fn fetch_all_lyrics<R: Requester>(
    requester: &R,
    registry: &mut Registry,
    artist_id: ArtistId,
) -> Result<()> {
    let song_ids = registry.discography(artist_id, true);
    info!("Fetching lyrics for {} songs", song_ids.len());
    for song_id in song_ids {
        fetch_lyrics(requester, registry, song_id).await?;
    }
    Ok(())
}
