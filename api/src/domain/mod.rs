pub mod admin;
pub mod bookings;
pub mod users;
pub mod venues;
