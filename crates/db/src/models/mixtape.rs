//! Mixtape entity model and DTOs.
//!
//! A mixtape owns an ordered list of songs stored in `mixtape_songs`.
//! Songs carry a `position` so submission order survives a round trip.

use mixtape_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `mixtapes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mixtape {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub source: String,
    pub artwork_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `mixtape_songs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MixtapeSong {
    pub id: DbId,
    pub mixtape_id: DbId,
    pub position: i32,
    pub name: String,
    pub artist: String,
    pub preview_url: Option<String>,
    pub artwork_url: Option<String>,
    pub created_at: Timestamp,
}

/// A mixtape with its songs in submission order.
#[derive(Debug, Clone, Serialize)]
pub struct MixtapeWithSongs {
    #[serde(flatten)]
    pub mixtape: Mixtape,
    pub songs: Vec<MixtapeSong>,
}

/// One song ready for insertion, already checked for a name and artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMixtapeSong {
    pub name: String,
    pub artist: String,
    pub preview_url: Option<String>,
    pub artwork_url: Option<String>,
}

/// DTO for inserting a mixtape together with its songs.
#[derive(Debug, Clone)]
pub struct CreateMixtape {
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub source: String,
    pub songs: Vec<CreateMixtapeSong>,
}

/// DTO for a full replace of a mixtape's editable fields and songs.
///
/// `cover_url: None` keeps the stored cover. Source and owner are never
/// touched by an update.
#[derive(Debug, Clone)]
pub struct UpdateMixtape {
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub songs: Vec<CreateMixtapeSong>,
}
