use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VenueStatus {
    Pending,
    Approved,
}

impl VenueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueStatus::Pending => "pending",
            VenueStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for VenueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenueStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VenueStatus::Pending),
            "approved" => Ok(VenueStatus::Approved),
            other => anyhow::bail!("unknown venue status `{other}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sport {
    pub name: String,
    #[serde(default, alias = "pricePerHour")]
    pub price_per_hour: f64,
}

#[derive(Debug, Clone)]
pub struct Venue {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub sports: Vec<Sport>,
    pub amenities: Vec<String>,
    pub photos: Vec<String>,
    pub average_rating: f64,
    pub status: VenueStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Sport names compare trimmed and Unicode case-folded, like SQL `lower()`.
pub fn same_sport_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl Venue {
    pub fn find_sport(&self, name: &str) -> Option<&Sport> {
        self.sports.iter().find(|s| same_sport_name(&s.name, name))
    }

    pub fn is_bookable(&self) -> bool {
        self.status == VenueStatus::Approved
    }
}

#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub sports: Vec<Sport>,
    pub amenities: Vec<String>,
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VenuePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub sports: Option<Vec<Sport>>,
    pub amenities: Option<Vec<String>>,
    pub photos: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    pub status: Option<VenueStatus>,
    pub owner_id: Option<Uuid>,
    pub sport: Option<String>,
    pub query: Option<String>,
}

impl VenueFilter {
    pub fn matches(&self, venue: &Venue) -> bool {
        if let Some(status) = self.status {
            if venue.status != status {
                return false;
            }
        }
        if let Some(owner) = self.owner_id {
            if venue.owner_id != owner {
                return false;
            }
        }
        if let Some(sport) = self.sport.as_deref().filter(|s| !s.trim().is_empty()) {
            if venue.find_sport(sport).is_none() {
                return false;
            }
        }
        if let Some(q) = self.query.as_deref().filter(|s| !s.trim().is_empty()) {
            let q = q.trim().to_lowercase();
            if !venue.name.to_lowercase().contains(&q) && !venue.address.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        true
    }
}
