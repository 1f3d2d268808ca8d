use async_trait::async_trait;

use crate::application::ports::otp_sender::OtpSender;
use crate::application::services::otp::render_otp_email;

/// Delivers OTP emails to the log instead of a mail server.
pub struct LogOtpSender {
    ttl_secs: i64,
}

impl LogOtpSender {
    pub fn new(ttl_secs: i64) -> Self {
        Self { ttl_secs }
    }
}

#[async_trait]
impl OtpSender for LogOtpSender {
    async fn send_otp(&self, email: &str, otp: &str) -> anyhow::Result<()> {
        let body = render_otp_email(otp, self.ttl_secs);
        tracing::info!(to = %email, subject = "Your OTP Code", "otp_email_sent");
        tracing::debug!(to = %email, body = %body, "otp_email_body");
        Ok(())
    }
}
