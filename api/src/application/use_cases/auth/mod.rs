pub mod forgot_password;
pub mod login;
pub mod me;
pub mod reset_password;
pub mod send_otp;
pub mod update_profile;
pub mod verify_otp;
