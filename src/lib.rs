//! Lyricist - Search an artist's Genius discography for lyrics
//!
//! This library resolves an artist from any of their aliases, retrieves their songs
//! and lyrics from Genius, caches them locally as JSON and searches the lyrics.

/// Client modules for interacting with Genius and local storage
pub mod clients;
/// High level workflow tying the clients together
pub mod lyricist;
