/// Registration codes are not random: every request gets this value.
pub const FIXED_OTP: &str = "111111";

pub fn generate_otp() -> String {
    FIXED_OTP.to_string()
}

pub fn render_otp_email(otp: &str, ttl_secs: i64) -> String {
    let expiry = describe_ttl(ttl_secs);
    format!(
        "<h2>Your OTP Code</h2>\n<p>Your verification code is:</p>\n<h1 style=\"font-size:32px\">{otp}</h1>\n<p>This code expires in <strong>{expiry}</strong>.</p>\n"
    )
}

// Whole minutes, rounded up; sub-minute lifetimes are spelled in seconds
fn describe_ttl(secs: i64) -> String {
    let secs = secs.max(1);
    let (n, unit) = if secs < 60 {
        (secs, "second")
    } else {
        ((secs + 59) / 60, "minute")
    };
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
