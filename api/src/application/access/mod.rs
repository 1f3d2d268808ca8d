use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::bookings::booking::Booking;
use crate::domain::users::user::{Role, User};
use crate::domain::venues::venue::Venue;

/// The authenticated caller. Banned users never become actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Actor {
    fn from(u: &User) -> Self {
        Actor {
            id: u.id,
            role: u.role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    None,
    View,
    Edit,
}

// Presentation builds the Actor; policies here stay HTTP-agnostic.

pub fn require_role(actor: &Actor, allowed: &[Role]) -> ServiceResult<()> {
    if allowed.contains(&actor.role) {
        Ok(())
    } else {
        Err(ServiceError::forbidden("Access denied"))
    }
}

pub fn require_admin(actor: &Actor) -> ServiceResult<()> {
    require_role(actor, &[Role::Admin])
}

pub fn resolve_venue(actor: Option<&Actor>, venue: &Venue) -> Capability {
    match actor {
        Some(a) if a.is_admin() || a.id == venue.owner_id => Capability::Edit,
        _ if venue.is_bookable() => Capability::View,
        _ => Capability::None,
    }
}

/// `venue_owner` is the owner of the booked venue, when known.
pub fn resolve_booking(actor: &Actor, booking: &Booking, venue_owner: Option<Uuid>) -> Capability {
    if actor.is_admin() || actor.id == booking.user_id {
        Capability::Edit
    } else if venue_owner == Some(actor.id) {
        Capability::View
    } else {
        Capability::None
    }
}
