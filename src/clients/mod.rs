/// Paginated retrieval of an artist and their songs from the API
pub mod discography;
/// Artist and song entities and their raw API records
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Genius API and web front-end requester
pub mod genius;
/// Lyric scraping and normalization
pub mod lyrics;
/// JSON snapshots of artists on local disk
pub mod local_storage;
/// De-duplicating artist and song arena
pub mod registry;
/// Alias to canonical name to artist id resolution
pub mod resolver;
/// Lyric substring search over an artist's songs
pub mod search;

#[cfg(test)]
pub(crate) mod fake;

pub use genius::{GeniusRequester, Requester};
pub use local_storage::LocalStorage;
pub use registry::Registry;
