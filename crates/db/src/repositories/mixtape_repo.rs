//! Repository for the `mixtapes` and `mixtape_songs` tables.
//!
//! Every public method is one transaction. Reads and writes are always
//! scoped by owner, so a mixtape owned by someone else looks exactly like
//! one that does not exist.

use std::collections::HashMap;

use mixtape_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::mixtape::{
    CreateMixtape, CreateMixtapeSong, Mixtape, MixtapeSong, MixtapeWithSongs, UpdateMixtape,
};

/// Column list for the `mixtapes` table.
const COLUMNS: &str = "id, user_id, name, description, cover_url, source, artwork_url, \
    created_at, updated_at";

/// Column list for the `mixtape_songs` table.
const SONG_COLUMNS: &str =
    "id, mixtape_id, position, name, artist, preview_url, artwork_url, created_at";

/// Provides the persistence protocol for mixtapes and their songs.
pub struct MixtapeRepo;

impl MixtapeRepo {
    /// Insert a mixtape and all of its songs.
    ///
    /// Songs keep the order of `input.songs`. If any insert fails the whole
    /// transaction rolls back, so no mixtape is ever left without its songs.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateMixtape,
    ) -> Result<Mixtape, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO mixtapes (user_id, name, description, cover_url, source) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let mixtape = sqlx::query_as::<_, Mixtape>(&insert_query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.cover_url)
            .bind(&input.source)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_songs(&mut tx, mixtape.id, &input.songs).await?;

        tx.commit().await?;

        tracing::debug!(
            mixtape_id = mixtape.id,
            owner_id,
            song_count = input.songs.len(),
            "Mixtape inserted",
        );
        Ok(mixtape)
    }

    /// List every mixtape owned by `owner_id`, newest first, each with its
    /// songs in submission order.
    ///
    /// Both reads share one snapshot so a concurrent replace is seen either
    /// entirely or not at all.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<MixtapeWithSongs>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM mixtapes \
             WHERE user_id = $1 \
             ORDER BY id DESC"
        );
        let mixtapes = sqlx::query_as::<_, Mixtape>(&query)
            .bind(owner_id)
            .fetch_all(&mut *tx)
            .await?;

        if mixtapes.is_empty() {
            tx.commit().await?;
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = mixtapes.iter().map(|m| m.id).collect();
        let song_query = format!(
            "SELECT {SONG_COLUMNS} FROM mixtape_songs \
             WHERE mixtape_id = ANY($1) \
             ORDER BY mixtape_id, position, id"
        );
        let songs = sqlx::query_as::<_, MixtapeSong>(&song_query)
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut by_mixtape: HashMap<DbId, Vec<MixtapeSong>> = HashMap::new();
        for song in songs {
            by_mixtape.entry(song.mixtape_id).or_default().push(song);
        }

        Ok(mixtapes
            .into_iter()
            .map(|mixtape| {
                let songs = by_mixtape.remove(&mixtape.id).unwrap_or_default();
                MixtapeWithSongs { mixtape, songs }
            })
            .collect())
    }

    /// Find one mixtape owned by `owner_id`, with its songs.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<MixtapeWithSongs>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM mixtapes WHERE id = $1 AND user_id = $2");
        let Some(mixtape) = sqlx::query_as::<_, Mixtape>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let songs = Self::songs_for(&mut tx, mixtape.id).await?;
        tx.commit().await?;

        Ok(Some(MixtapeWithSongs { mixtape, songs }))
    }

    /// Replace a mixtape's editable fields and its entire song list.
    ///
    /// The current row is locked first; when `input.cover_url` is `None` the
    /// stored cover is kept. Returns the cover in effect after the replace,
    /// or `None` if no mixtape with `id` belongs to `owner_id`.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateMixtape,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current_cover = sqlx::query_scalar::<_, Option<String>>(
            "SELECT cover_url FROM mixtapes \
             WHERE id = $1 AND user_id = $2 \
             FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current_cover) = current_cover else {
            return Ok(None);
        };

        let cover_url = input.cover_url.clone().or(current_cover);

        sqlx::query(
            "UPDATE mixtapes SET name = $3, description = $4, cover_url = $5 \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&cover_url)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM mixtape_songs WHERE mixtape_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insert_songs(&mut tx, id, &input.songs).await?;

        tx.commit().await?;

        tracing::debug!(
            mixtape_id = id,
            owner_id,
            song_count = input.songs.len(),
            "Mixtape replaced",
        );
        Ok(Some(cover_url))
    }

    /// Delete a mixtape and its songs.
    ///
    /// Ownership is confirmed before anything is removed. Returns the number
    /// of mixtapes deleted: `0` when the id is unknown or owned by someone
    /// else, in which case no row was touched.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owned = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM mixtapes WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            return Ok(0);
        }

        sqlx::query("DELETE FROM mixtape_songs WHERE mixtape_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM mixtapes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert songs within an existing transaction, numbering positions from 0.
    async fn insert_songs(
        tx: &mut Transaction<'_, Postgres>,
        mixtape_id: DbId,
        songs: &[CreateMixtapeSong],
    ) -> Result<(), sqlx::Error> {
        for (index, song) in songs.iter().enumerate() {
            let position =
                i32::try_from(index).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            sqlx::query(
                "INSERT INTO mixtape_songs \
                    (mixtape_id, position, name, artist, preview_url, artwork_url) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(mixtape_id)
            .bind(position)
            .bind(&song.name)
            .bind(&song.artist)
            .bind(&song.preview_url)
            .bind(&song.artwork_url)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Songs of one mixtape in submission order.
    async fn songs_for(
        tx: &mut Transaction<'_, Postgres>,
        mixtape_id: DbId,
    ) -> Result<Vec<MixtapeSong>, sqlx::Error> {
        let query = format!(
            "SELECT {SONG_COLUMNS} FROM mixtape_songs \
             WHERE mixtape_id = $1 \
             ORDER BY position, id"
        );
        sqlx::query_as::<_, MixtapeSong>(&query)
            .bind(mixtape_id)
            .fetch_all(&mut **tx)
            .await
    }
}
