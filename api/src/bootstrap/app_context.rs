use std::sync::Arc;

use crate::application::ports::booking_repository::BookingRepository;
use crate::application::ports::otp_sender::OtpSender;
use crate::application::ports::otp_store::OtpStore;
use crate::application::ports::stats_repository::StatsRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::ports::venue_repository::VenueRepository;
use crate::bootstrap::config::{Config, DataBackend};
use crate::infrastructure::db::repositories::booking_repository_sqlx::SqlxBookingRepository;
use crate::infrastructure::db::repositories::stats_repository_sqlx::SqlxStatsRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::db::repositories::venue_repository_sqlx::SqlxVenueRepository;
use crate::infrastructure::db::{self, PgPool};
use crate::infrastructure::mail::LogOtpSender;
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::otp::InMemoryOtpStore;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    venue_repo: Arc<dyn VenueRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    stats_repo: Arc<dyn StatsRepository>,
    otp_store: Arc<dyn OtpStore>,
    otp_sender: Arc<dyn OtpSender>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        venue_repo: Arc<dyn VenueRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        stats_repo: Arc<dyn StatsRepository>,
        otp_store: Arc<dyn OtpStore>,
        otp_sender: Arc<dyn OtpSender>,
    ) -> Self {
        Self {
            user_repo,
            venue_repo,
            booking_repo,
            stats_repo,
            otp_store,
            otp_sender,
        }
    }

    pub fn postgres(pool: PgPool, cfg: &Config) -> Self {
        Self::new(
            Arc::new(SqlxUserRepository::new(pool.clone())),
            Arc::new(SqlxVenueRepository::new(pool.clone())),
            Arc::new(SqlxBookingRepository::new(pool.clone())),
            Arc::new(SqlxStatsRepository::new(pool)),
            Arc::new(InMemoryOtpStore::new()),
            Arc::new(LogOtpSender::new(cfg.otp_ttl_secs)),
        )
    }

    pub fn memory(cfg: &Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            Arc::new(InMemoryOtpStore::new()),
            Arc::new(LogOtpSender::new(cfg.otp_ttl_secs)),
        )
    }

    /// Wires the adapters selected by `cfg.data_backend`.
    pub async fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        match cfg.data_backend {
            DataBackend::Postgres => {
                let pool = db::connect_pool(&cfg.database_url).await?;
                db::migrate(&pool).await?;
                Ok(Self::postgres(pool, cfg))
            }
            DataBackend::Memory => Ok(Self::memory(cfg)),
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn venue_repo(&self) -> Arc<dyn VenueRepository> {
        self.services.venue_repo.clone()
    }

    pub fn booking_repo(&self) -> Arc<dyn BookingRepository> {
        self.services.booking_repo.clone()
    }

    pub fn stats_repo(&self) -> Arc<dyn StatsRepository> {
        self.services.stats_repo.clone()
    }

    pub fn otp_store(&self) -> Arc<dyn OtpStore> {
        self.services.otp_store.clone()
    }

    pub fn otp_sender(&self) -> Arc<dyn OtpSender> {
        self.services.otp_sender.clone()
    }
}
