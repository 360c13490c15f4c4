//! Mixtape payload rules shared by create and update.

use crate::error::CoreError;

/// Provenance recorded for mixtapes created through the API.
pub const DEFAULT_SOURCE: &str = "sidebar";

/// Message returned when the name or song list is missing.
pub const NAME_AND_SONGS_REQUIRED: &str = "Mixtape name and at least one song are required.";

/// Message returned when a song lacks a name or an artist.
pub const SONG_FIELDS_REQUIRED: &str = "Every song needs a name and an artist.";

/// Check the shape every create/update payload must have.
///
/// Returns the trimmed name and the song slice. A blank name, a missing
/// song list and an empty song list are all rejected with the same message.
pub fn validate_payload<'a, T>(
    name: Option<&'a str>,
    songs: Option<&'a [T]>,
) -> Result<(&'a str, &'a [T]), CoreError> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let songs = songs.filter(|s| !s.is_empty());

    match (name, songs) {
        (Some(name), Some(songs)) => Ok((name, songs)),
        _ => Err(CoreError::Validation(NAME_AND_SONGS_REQUIRED.into())),
    }
}

/// Check one submitted song and return its trimmed name and artist.
pub fn validate_song<'a>(
    name: Option<&'a str>,
    artist: Option<&'a str>,
) -> Result<(&'a str, &'a str), CoreError> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let artist = artist.map(str::trim).filter(|a| !a.is_empty());

    name.zip(artist)
        .ok_or_else(|| CoreError::Validation(SONG_FIELDS_REQUIRED.into()))
}
