use crate::clients::entities::{ArtistId, Song};
use crate::clients::lyrics::normalize_query;
use crate::clients::registry::Registry;

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Also search the songs the artist is featured on
    pub include_featured: bool,
    /// Require every query to match instead of any
    pub match_all: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            include_featured: true,
            match_all: false,
        }
    }
}

/// Songs of `artist_id` whose lyrics contain the queries, songs first then
/// featured songs, each in the order they were registered.
///
/// Songs without lyrics (never fetched, or fetched empty) never match.
pub fn search<'r, S: AsRef<str>>(
    registry: &'r Registry,
    artist_id: ArtistId,
    queries: &[S],
    options: SearchOptions,
) -> Vec<&'r Song> {
    let queries: Vec<String> = queries.iter().map(|q| normalize_query(q.as_ref())).collect();

    registry
        .discography(artist_id, options.include_featured)
        .into_iter()
        .filter_map(|id| registry.song(id))
        .filter(|song| match song.lyrics.as_deref() {
            None | Some("") => false,
            Some(lyrics) => {
                let mut hits = queries.iter().map(|q| lyrics.contains(q.as_str()));
                if options.match_all {
                    hits.all(|hit| hit)
                } else {
                    hits.any(|hit| hit)
                }
            }
        })
        .collect()
}
