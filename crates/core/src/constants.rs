//! Application constants and configuration defaults.

/// Fixed network tag recorded with every captured message.
pub const SOURCE_TELEGRAM: &str = "telegram";

/// Highest numbered `TG{i}_*` account slot scanned by the registry.
pub const MAX_ACCOUNT_SLOTS: u32 = 16;

/// Default per-conversation backfill limit.
pub const DEFAULT_HISTORY_PER_CHAT: u32 = 50;

/// Default HTTP server port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default database connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 5;

/// Smallest accepted search page size.
pub const SEARCH_LIMIT_MIN: i64 = 1;

/// Largest accepted search page size.
pub const SEARCH_LIMIT_MAX: i64 = 100;

/// Page size used when the request omits `limit`.
pub const SEARCH_LIMIT_DEFAULT: i64 = 20;

/// Largest accepted search offset.
pub const SEARCH_OFFSET_MAX: i64 = 10_000;
