use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::application::ports::venue_repository::VenueRepository;
use crate::domain::venues::venue::{NewVenue, Sport, Venue, VenueFilter, VenuePatch, VenueStatus};
use crate::infrastructure::db::PgPool;

const VENUE_COLUMNS: &str = "id, owner_id, name, description, address, sports, amenities, photos, \
     average_rating, status, created_at, updated_at";

pub struct SqlxVenueRepository {
    pub pool: PgPool,
}

impl SqlxVenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn venue_from_row(r: &PgRow) -> anyhow::Result<Venue> {
    let Json(sports): Json<Vec<Sport>> = r.get("sports");
    let Json(amenities): Json<Vec<String>> = r.get("amenities");
    let Json(photos): Json<Vec<String>> = r.get("photos");
    let status: String = r.get("status");
    Ok(Venue {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        name: r.get("name"),
        description: r.get("description"),
        address: r.get("address"),
        sports,
        amenities,
        photos,
        average_rating: r.get("average_rating"),
        status: status.parse()?,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl VenueRepository for SqlxVenueRepository {
    async fn list(&self, filter: &VenueFilter) -> anyhow::Result<Vec<Venue>> {
        let sport = filter
            .sport
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let needle = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let rows = sqlx::query(&format!(
            r#"SELECT {VENUE_COLUMNS} FROM venues
               WHERE ($1::text IS NULL OR status = $1)
                 AND ($2::uuid IS NULL OR owner_id = $2)
                 AND ($3::text IS NULL OR EXISTS (
                       SELECT 1 FROM jsonb_array_elements(sports) s
                       WHERE lower(trim(s->>'name')) = lower($3)))
                 -- Literal substring match; LIKE would treat % and _ as wildcards
                 AND ($4::text IS NULL
                      OR strpos(lower(name), lower($4)) > 0
                      OR strpos(lower(address), lower($4)) > 0)
               ORDER BY created_at DESC"#
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.owner_id)
        .bind(sport)
        .bind(needle)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(venue_from_row).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Venue>> {
        let row = sqlx::query(&format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(venue_from_row).transpose()
    }

    async fn create(
        &self,
        owner_id: Uuid,
        venue: &NewVenue,
        status: VenueStatus,
    ) -> anyhow::Result<Venue> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO venues (owner_id, name, description, address, sports, amenities, photos, status)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {VENUE_COLUMNS}"#
        ))
        .bind(owner_id)
        .bind(&venue.name)
        .bind(&venue.description)
        .bind(&venue.address)
        .bind(Json(&venue.sports))
        .bind(Json(&venue.amenities))
        .bind(Json(&venue.photos))
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        venue_from_row(&row)
    }

    async fn update(&self, id: Uuid, patch: &VenuePatch) -> anyhow::Result<Option<Venue>> {
        let row = sqlx::query(&format!(
            r#"UPDATE venues SET
                   name = COALESCE($2, name),
                   description = CASE WHEN $3::text IS NULL THEN description ELSE NULLIF($3, '') END,
                   address = COALESCE($4, address),
                   sports = COALESCE($5, sports),
                   amenities = COALESCE($6, amenities),
                   photos = COALESCE($7, photos),
                   updated_at = now()
               WHERE id = $1
               RETURNING {VENUE_COLUMNS}"#
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.address)
        .bind(patch.sports.as_ref().map(Json))
        .bind(patch.amenities.as_ref().map(Json))
        .bind(patch.photos.as_ref().map(Json))
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(venue_from_row).transpose()
    }

    async fn set_status(&self, id: Uuid, status: VenueStatus) -> anyhow::Result<Option<Venue>> {
        let row = sqlx::query(&format!(
            r#"UPDATE venues SET status = $2, updated_at = now()
               WHERE id = $1
               RETURNING {VENUE_COLUMNS}"#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(venue_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
