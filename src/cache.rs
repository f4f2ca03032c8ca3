//! In-memory caching using moka
//!
//! Holds admin sessions and the dashboard statistics. Sessions expire on the
//! configured TTL; the dashboard entry is short-lived and dropped on every
//! write to the tables it summarises.
//!
//! Dashboard loads race with writes, so every invalidation bumps a generation
//! counter. A load only publishes its stats if the generation it started
//! under is still current.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::admin::auth::AdminSession;
use crate::admin::dashboard::{load_dashboard_stats, DashboardStats};

pub const DASHBOARD_KEY: &str = "dashboard";

/// Application cache
#[derive(Clone)]
pub struct AppCache {
    /// Admin sessions (token -> session)
    pub sessions: Cache<String, Arc<AdminSession>>,
    /// Dashboard statistics (singleton)
    pub dashboard: Cache<String, Arc<DashboardStats>>,
    dashboard_generation: Arc<AtomicU64>,
}

impl AppCache {
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            // Sessions: 1000 entries, expire after the configured TTL
            sessions: Cache::builder()
                .max_capacity(1000)
                .time_to_live(session_ttl)
                .build(),

            // Dashboard: 1 entry, 5 min TTL
            dashboard: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            dashboard_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            sessions: self.sessions.entry_count(),
            dashboard_cached: self.dashboard.entry_count() > 0,
        }
    }

    /// Drop the cached dashboard so the next read sees fresh counts
    pub async fn invalidate_dashboard(&self) {
        self.dashboard_generation.fetch_add(1, Ordering::SeqCst);
        self.dashboard.invalidate(DASHBOARD_KEY).await;
    }

    /// Generation to capture before loading dashboard stats
    pub fn dashboard_generation(&self) -> u64 {
        self.dashboard_generation.load(Ordering::SeqCst)
    }

    /// Cache stats loaded under `generation`.
    ///
    /// Returns false and leaves the cache empty when a write invalidated the
    /// dashboard after the load began.
    pub async fn store_dashboard(&self, generation: u64, stats: Arc<DashboardStats>) -> bool {
        if self.dashboard_generation() != generation {
            return false;
        }

        self.dashboard.insert(DASHBOARD_KEY.to_string(), stats).await;

        // An invalidation between the check and the insert must still win
        if self.dashboard_generation() != generation {
            self.dashboard.invalidate(DASHBOARD_KEY).await;
            return false;
        }
        true
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(8 * 60 * 60))
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub sessions: u64,
    pub dashboard_cached: bool,
}

/// Start background cache warmer
///
/// Warms the dashboard on startup and refreshes it every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

async fn warm_cache(cache: &AppCache, db: &PgPool) {
    let generation = cache.dashboard_generation();
    match load_dashboard_stats(db).await {
        Ok(stats) => {
            if cache.store_dashboard(generation, Arc::new(stats)).await {
                info!("Dashboard cache warmed. Stats: {:?}", cache.stats());
            } else {
                info!("Dashboard changed while warming, left for the next read");
            }
        }
        Err(e) => warn!("Failed to warm dashboard cache: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::queries::InstantBookingStats;
    use crate::contacts::queries::ContactStats;
    use crate::quotes::queries::QuoteStats;
    use crate::service_bookings::queries::ServiceBookingStats;
    use rust_decimal::Decimal;

    fn stats(total: i64) -> Arc<DashboardStats> {
        Arc::new(DashboardStats {
            bookings: ServiceBookingStats {
                total,
                pending: 0,
                completed: 0,
            },
            instant_bookings: InstantBookingStats {
                total,
                pending: 0,
                completed: 0,
                revenue: Decimal::ZERO,
            },
            quotes: QuoteStats {
                total: 0,
                pending: 0,
                quoted_value: Decimal::ZERO,
            },
            contacts: ContactStats { total: 0, unread: 0 },
            generated_at: chrono::Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_dashboard_stored_when_generation_current() {
        let cache = AppCache::default();
        let generation = cache.dashboard_generation();

        assert!(cache.store_dashboard(generation, stats(3)).await);

        let cached = cache.dashboard.get(DASHBOARD_KEY).await.unwrap();
        assert_eq!(cached.instant_bookings.total, 3);
    }

    #[tokio::test]
    async fn test_stale_dashboard_load_is_discarded() {
        let cache = AppCache::default();

        // Load starts, then a write lands before it finishes
        let generation = cache.dashboard_generation();
        cache.invalidate_dashboard().await;

        assert!(!cache.store_dashboard(generation, stats(3)).await);
        assert!(cache.dashboard.get(DASHBOARD_KEY).await.is_none());

        let generation = cache.dashboard_generation();
        assert!(cache.store_dashboard(generation, stats(4)).await);
        assert_eq!(cache.dashboard.get(DASHBOARD_KEY).await.unwrap().instant_bookings.total, 4);
    }

    #[tokio::test]
    async fn test_sessions_round_trip() {
        let cache = AppCache::default();
        let session = Arc::new(AdminSession::new("office@freshplus.example"));

        cache
            .sessions
            .insert(session.token.clone(), session.clone())
            .await;

        let found = cache.sessions.get(&session.token).await.unwrap();
        assert_eq!(found.email, "office@freshplus.example");

        cache.sessions.invalidate(&session.token).await;
        assert!(cache.sessions.get(&session.token).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_expire() {
        let cache = AppCache::new(Duration::from_millis(50));
        let session = Arc::new(AdminSession::new("office@freshplus.example"));
        cache
            .sessions
            .insert(session.token.clone(), session.clone())
            .await;

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.sessions.get(&session.token).await.is_none());
    }
}
