pub mod create_venue;
pub mod delete_venue;
pub mod get_venue;
pub mod list_venues;
pub mod set_venue_status;
pub mod update_venue;

use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::venues::venue::Sport;

pub(crate) fn validate_sports(sports: &[Sport]) -> ServiceResult<Vec<Sport>> {
    sports
        .iter()
        .map(|s| {
            let name = s.name.trim();
            if name.is_empty() {
                return Err(ServiceError::validation("Sport name is required"));
            }
            if !s.price_per_hour.is_finite() || s.price_per_hour < 0.0 {
                return Err(ServiceError::validation(
                    "Sport price must be a non-negative number",
                ));
            }
            Ok(Sport {
                name: name.to_string(),
                price_per_hour: s.price_per_hour,
            })
        })
        .collect()
}

pub(crate) fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
