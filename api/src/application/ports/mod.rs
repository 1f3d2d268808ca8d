pub mod booking_repository;
pub mod otp_sender;
pub mod otp_store;
pub mod stats_repository;
pub mod user_repository;
pub mod venue_repository;
