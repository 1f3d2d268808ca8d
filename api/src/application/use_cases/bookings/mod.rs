pub mod cancel_booking;
pub mod create_booking;
pub mod get_booking;
pub mod list_bookings;
