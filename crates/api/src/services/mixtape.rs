//! Mixtape orchestration: payload checks, cover link vetting, owner-scoped
//! repository calls, and the response shapes clients consume.

use mixtape_core::asset_link::AssetLinkValidator;
use mixtape_core::error::CoreError;
use mixtape_core::mixtape::{validate_payload, validate_song, DEFAULT_SOURCE};
use mixtape_core::types::DbId;
use mixtape_db::models::mixtape::{
    CreateMixtape, CreateMixtapeSong, MixtapeSong, MixtapeWithSongs, UpdateMixtape,
};
use mixtape_db::repositories::MixtapeRepo;
use mixtape_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Body of create and update requests.
///
/// Missing fields, here and on each song, surface as validation errors.
/// Values of the wrong JSON type are rejected by the extractor instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MixtapePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
    pub songs: Option<Vec<SongPayload>>,
}

/// One song as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongPayload {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub preview_url: Option<String>,
    pub artwork_url: Option<String>,
}

impl SongPayload {
    fn to_row(&self) -> Result<CreateMixtapeSong, CoreError> {
        let (name, artist) = validate_song(self.name.as_deref(), self.artist.as_deref())?;
        Ok(CreateMixtapeSong {
            name: name.to_string(),
            artist: artist.to_string(),
            preview_url: self.preview_url.clone(),
            artwork_url: self.artwork_url.clone(),
        })
    }
}

/// Check every song, keeping submission order.
fn song_rows(songs: &[SongPayload]) -> Result<Vec<CreateMixtapeSong>, CoreError> {
    songs.iter().map(SongPayload::to_row).collect()
}

/// One song as listed to clients.
///
/// `url` duplicates `preview_url` for older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongView {
    pub name: String,
    pub artist: String,
    pub preview_url: Option<String>,
    pub url: Option<String>,
    pub artwork_url: Option<String>,
}

impl From<MixtapeSong> for SongView {
    fn from(song: MixtapeSong) -> Self {
        Self {
            name: song.name,
            artist: song.artist,
            url: song.preview_url.clone(),
            preview_url: song.preview_url,
            artwork_url: song.artwork_url,
        }
    }
}

/// One mixtape as listed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct MixtapeView {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub source: String,
    pub artwork_url: Option<String>,
    pub songs: Vec<SongView>,
}

impl From<MixtapeWithSongs> for MixtapeView {
    fn from(entry: MixtapeWithSongs) -> Self {
        let MixtapeWithSongs { mixtape, songs } = entry;
        Self {
            id: mixtape.id,
            name: mixtape.name,
            description: mixtape.description,
            cover: mixtape.cover_url,
            source: mixtape.source,
            artwork_url: mixtape.artwork_url,
            songs: songs.into_iter().map(SongView::from).collect(),
        }
    }
}

/// Outcome of a successful create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMixtape {
    pub id: DbId,
    /// Cover URL actually stored.
    pub cover_url: Option<String>,
}

/// Drives the mixtape repository on behalf of one authenticated user.
pub struct MixtapeService<'a> {
    pool: &'a DbPool,
    links: &'a AssetLinkValidator,
}

impl<'a> MixtapeService<'a> {
    pub fn new(pool: &'a DbPool, links: &'a AssetLinkValidator) -> Self {
        Self { pool, links }
    }

    /// Create a mixtape owned by `owner_id`.
    pub async fn create(&self, owner_id: DbId, payload: MixtapePayload) -> AppResult<SavedMixtape> {
        let (name, songs) = validate_payload(payload.name.as_deref(), payload.songs.as_deref())?;
        let songs = song_rows(songs)?;
        let cover_url = self
            .links
            .validate(payload.photo_url.as_deref())
            .map_err(CoreError::from)?;

        let input = CreateMixtape {
            name: name.to_string(),
            description: payload.description,
            cover_url,
            source: DEFAULT_SOURCE.to_string(),
            songs,
        };
        let mixtape = MixtapeRepo::create(self.pool, owner_id, &input).await?;

        tracing::info!(
            user_id = owner_id,
            mixtape_id = mixtape.id,
            song_count = input.songs.len(),
            "Mixtape created",
        );

        Ok(SavedMixtape {
            id: mixtape.id,
            cover_url: mixtape.cover_url,
        })
    }

    /// List the caller's mixtapes, newest first.
    pub async fn list(&self, owner_id: DbId) -> AppResult<Vec<MixtapeView>> {
        let mixtapes = MixtapeRepo::list_for_owner(self.pool, owner_id).await?;
        Ok(mixtapes.into_iter().map(MixtapeView::from).collect())
    }

    /// Fetch one of the caller's mixtapes.
    pub async fn get(&self, owner_id: DbId, id: DbId) -> AppResult<MixtapeView> {
        MixtapeRepo::find_for_owner(self.pool, id, owner_id)
            .await?
            .map(MixtapeView::from)
            .ok_or_else(|| not_found(id))
    }

    /// Replace the caller's mixtape `id` with `payload`.
    ///
    /// A payload without `photoUrl` keeps the stored cover.
    pub async fn update(
        &self,
        owner_id: DbId,
        id: DbId,
        payload: MixtapePayload,
    ) -> AppResult<SavedMixtape> {
        let (name, songs) = validate_payload(payload.name.as_deref(), payload.songs.as_deref())?;
        let songs = song_rows(songs)?;
        let cover_url = self
            .links
            .validate(payload.photo_url.as_deref())
            .map_err(CoreError::from)?;

        let input = UpdateMixtape {
            name: name.to_string(),
            description: payload.description,
            cover_url,
            songs,
        };
        let cover_url = MixtapeRepo::replace(self.pool, id, owner_id, &input)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(
            user_id = owner_id,
            mixtape_id = id,
            song_count = input.songs.len(),
            "Mixtape updated",
        );

        Ok(SavedMixtape { id, cover_url })
    }

    /// Delete the caller's mixtape `id` and its songs.
    pub async fn delete(&self, owner_id: DbId, id: DbId) -> AppResult<()> {
        let deleted = MixtapeRepo::delete(self.pool, id, owner_id).await?;
        if deleted == 0 {
            return Err(not_found(id));
        }

        tracing::info!(user_id = owner_id, mixtape_id = id, "Mixtape deleted");
        Ok(())
    }
}

/// Missing and foreign mixtapes produce the same error.
fn not_found(id: DbId) -> crate::error::AppError {
    CoreError::NotFound {
        entity: "Mixtape",
        id,
    }
    .into()
}
