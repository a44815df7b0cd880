//! Environment-driven configuration for msgvault.
//!
//! The configuration surface is flat environment variables: a required
//! `DATABASE_URL`, numbered `TG{i}_*` account slots, and a handful of
//! optional ingestion/HTTP knobs. The registry validates and normalizes
//! the account slots; everything else is read with defaults.

use crate::constants::{
    DEFAULT_DB_POOL_SIZE, DEFAULT_HISTORY_PER_CHAT, DEFAULT_HTTP_PORT, MAX_ACCOUNT_SLOTS,
};
use crate::error::{Error, Result};
use crate::types::AccountConfig;
use tracing::warn;

/// Process-level configuration read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store connection string (required).
    pub database_url: String,

    /// Run a historical backfill pass before live capture.
    pub sync_history_on_start: bool,

    /// Per-conversation backfill limit.
    pub history_per_chat: u32,

    /// HTTP listen port for the search API.
    pub http_port: u16,

    /// Log freshly established session credentials for operator reuse.
    pub print_session_string: bool,

    /// Store connection pool size.
    pub db_pool_size: u32,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails only when `DATABASE_URL` is missing or blank; every other
    /// variable falls back to its default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config("DATABASE_URL is required"))?;

        Ok(Self {
            database_url,
            sync_history_on_start: flag(&lookup, "SYNC_HISTORY_ON_START"),
            history_per_chat: parse_or(&lookup, "HISTORY_PER_CHAT", DEFAULT_HISTORY_PER_CHAT),
            http_port: parse_or(&lookup, "HTTP_PORT", DEFAULT_HTTP_PORT),
            print_session_string: flag(&lookup, "PRINT_SESSION_STRING"),
            db_pool_size: parse_or(&lookup, "DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE),
        })
    }
}

/// Loads and validates the set of configured accounts.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    accounts: Vec<AccountConfig>,
}

impl AccountRegistry {
    /// Scan `TG1_*` .. `TG{MAX_ACCOUNT_SLOTS}_*` and collect every slot
    /// with a complete identity.
    ///
    /// Slots with incomplete configuration are skipped with a warning;
    /// the registry is only an error when no valid account remains.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut accounts = Vec::new();

        for i in 1..=MAX_ACCOUNT_SLOTS {
            let label = format!("tg{i}");
            let api_id = lookup(&format!("TG{i}_API_ID"))
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|v| *v != 0);
            let api_hash = non_blank(lookup(&format!("TG{i}_API_HASH")));
            let phone = non_blank(lookup(&format!("TG{i}_PHONE")));
            let session = non_blank(lookup(&format!("TG{i}_SESSION")));

            let configured = [
                lookup(&format!("TG{i}_API_ID")),
                lookup(&format!("TG{i}_API_HASH")),
                lookup(&format!("TG{i}_PHONE")),
            ]
            .iter()
            .any(|v| v.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false));

            match (api_id, api_hash, phone) {
                (Some(api_id), Some(api_hash), Some(phone)) => accounts.push(AccountConfig {
                    label,
                    api_id,
                    api_hash,
                    phone,
                    session,
                }),
                _ if configured => {
                    warn!(label = %label, "skipping account slot with incomplete configuration");
                }
                _ => {}
            }
        }

        if accounts.is_empty() {
            return Err(Error::config("no valid accounts configured"));
        }

        Ok(Self { accounts })
    }

    /// Validated accounts, in slot order.
    pub fn accounts(&self) -> &[AccountConfig] {
        &self.accounts
    }

    /// Number of validated accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Consume the registry, yielding the account list.
    pub fn into_accounts(self) -> Vec<AccountConfig> {
        self.accounts
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> bool {
    lookup(name).map(|v| v.trim() == "1").unwrap_or(false)
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    lookup(name)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn app_config_requires_database_url() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn app_config_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();
        assert!(!config.sync_history_on_start);
        assert_eq!(config.history_per_chat, DEFAULT_HISTORY_PER_CHAT);
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert!(!config.print_session_string);
    }

    #[test]
    fn app_config_reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite:msgvault.db"),
            ("SYNC_HISTORY_ON_START", "1"),
            ("HISTORY_PER_CHAT", "25"),
            ("HTTP_PORT", "9000"),
            ("HISTORY_PER_CHAT_JUNK", "zzz"),
        ]))
        .unwrap();
        assert!(config.sync_history_on_start);
        assert_eq!(config.history_per_chat, 25);
        assert_eq!(config.http_port, 9000);
    }

    #[test]
    fn registry_collects_complete_slots_in_order() {
        let registry = AccountRegistry::from_lookup(lookup_from(&[
            ("TG1_API_ID", "111"),
            ("TG1_API_HASH", "hash1"),
            ("TG1_PHONE", "+100"),
            ("TG3_API_ID", "333"),
            ("TG3_API_HASH", "hash3"),
            ("TG3_PHONE", "+300"),
            ("TG3_SESSION", "sess3"),
        ]))
        .unwrap();

        let accounts = registry.accounts();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].label, "tg1");
        assert_eq!(accounts[0].api_id, 111);
        assert!(accounts[0].session.is_none());
        assert_eq!(accounts[1].label, "tg3");
        assert_eq!(accounts[1].session.as_deref(), Some("sess3"));
    }

    #[test]
    fn registry_skips_incomplete_slots() {
        // tg1 is missing its hash; tg2 is complete.
        let registry = AccountRegistry::from_lookup(lookup_from(&[
            ("TG1_API_ID", "111"),
            ("TG1_PHONE", "+100"),
            ("TG2_API_ID", "222"),
            ("TG2_API_HASH", "hash2"),
            ("TG2_PHONE", "+200"),
        ]))
        .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.accounts()[0].label, "tg2");
    }

    #[test]
    fn registry_fails_when_empty() {
        let err = AccountRegistry::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn registry_rejects_non_numeric_api_id() {
        let err = AccountRegistry::from_lookup(lookup_from(&[
            ("TG1_API_ID", "not-a-number"),
            ("TG1_API_HASH", "hash1"),
            ("TG1_PHONE", "+100"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
