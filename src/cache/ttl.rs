// Named TTL tiers for cache consumers.
// Values mirror the refresh cadence of portal reference data.

use std::time::Duration;

/// Fast-moving data (notifications): 1 minute.
pub const SHORT: Duration = Duration::from_secs(60);

/// Module-wide default (partner lists, product catalogs): 5 minutes.
pub const MEDIUM: Duration = Duration::from_secs(5 * 60);

/// Slow-changing reference data: 15 minutes.
pub const LONG: Duration = Duration::from_secs(15 * 60);

/// Near-static data (CMS text): 30 minutes.
pub const VERY_LONG: Duration = Duration::from_secs(30 * 60);

/// Static catalogs: 1 hour.
pub const ONE_HOUR: Duration = Duration::from_secs(60 * 60);
