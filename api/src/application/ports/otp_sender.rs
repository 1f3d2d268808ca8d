use async_trait::async_trait;

#[async_trait]
pub trait OtpSender: Send + Sync {
    async fn send_otp(&self, email: &str, otp: &str) -> anyhow::Result<()>;
}
