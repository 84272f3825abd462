//! Service settings loaded via OrthoConfig.
//!
//! Values come from `PASTEBIN_*` environment variables, an optional config
//! file, and command-line flags. Unset values fall back to the defaults
//! exposed by the accessor methods.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::domain::DEFAULT_SLUG_LENGTH;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime configuration for the paste service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PASTEBIN")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Public origin used to build paste links.
    pub base_url: Option<String>,
    /// PostgreSQL URL. Pastes are kept in memory when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Honour the `x-test-now-ms` clock override header.
    #[ortho_config(default = false)]
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub test_mode: bool,
    /// Seconds between background purges; disabled when absent.
    pub sweep_interval_secs: Option<u64>,
    /// Length of generated paste ids.
    pub slug_length: Option<usize>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Sweep period; zero disables the sweeper like an absent value.
    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn slug_length(&self) -> usize {
        self.slug_length.unwrap_or(DEFAULT_SLUG_LENGTH)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Environment layers hand `1` over as a number, so flags accept numbers,
/// booleans, and the usual spellings.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean flag (true/false, 1/0, yes/no)")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            match u64::try_from(value) {
                Ok(unsigned) => self.visit_u64(unsigned),
                Err(_) => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            parse_bool(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 7] = [
        "PASTEBIN_BIND_ADDR",
        "PASTEBIN_BASE_URL",
        "PASTEBIN_DATABASE_URL",
        "PASTEBIN_DB_MAX_CONNECTIONS",
        "PASTEBIN_TEST_MODE",
        "PASTEBIN_SWEEP_INTERVAL_SECS",
        "PASTEBIN_SLUG_LENGTH",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("pastebin")]).expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert!(!settings.test_mode);
        assert!(settings.sweep_interval().is_none());
        assert_eq!(settings.slug_length(), DEFAULT_SLUG_LENGTH);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("PASTEBIN_BIND_ADDR", "127.0.0.1:9000"),
            ("PASTEBIN_BASE_URL", "https://paste.example.com"),
            ("PASTEBIN_DATABASE_URL", "postgres://paste@localhost/pastes"),
            ("PASTEBIN_DB_MAX_CONNECTIONS", "4"),
            ("PASTEBIN_TEST_MODE", "true"),
            ("PASTEBIN_SWEEP_INTERVAL_SECS", "300"),
            ("PASTEBIN_SLUG_LENGTH", "8"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), "127.0.0.1:9000");
        assert_eq!(settings.base_url(), "https://paste.example.com");
        assert_eq!(
            settings.database_url(),
            Some("postgres://paste@localhost/pastes")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(settings.test_mode);
        assert_eq!(settings.sweep_interval(), Some(Duration::from_secs(300)));
        assert_eq!(settings.slug_length(), 8);
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("postgres://db/pastes", Some("postgres://db/pastes"))]
    fn blank_database_url_means_in_memory(#[case] raw: &str, #[case] expected: Option<&str>) {
        let _guard = lock_env(env_with(&[("PASTEBIN_DATABASE_URL", raw)]));

        assert_eq!(load_from_empty_args().database_url(), expected);
    }

    #[rstest]
    #[case("1", true)]
    #[case("true", true)]
    #[case("yes", true)]
    #[case("0", false)]
    #[case("false", false)]
    fn test_mode_accepts_common_flag_spellings(#[case] raw: &str, #[case] expected: bool) {
        let _guard = lock_env(env_with(&[("PASTEBIN_TEST_MODE", raw)]));

        assert_eq!(load_from_empty_args().test_mode, expected);
    }

    #[rstest]
    fn unrecognised_test_mode_fails_to_load() {
        let _guard = lock_env(env_with(&[("PASTEBIN_TEST_MODE", "maybe")]));

        assert!(AppSettings::load_from_iter([OsString::from("pastebin")]).is_err());
    }

    #[rstest]
    fn zero_sweep_interval_disables_sweeper() {
        let _guard = lock_env(env_with(&[("PASTEBIN_SWEEP_INTERVAL_SECS", "0")]));

        assert!(load_from_empty_args().sweep_interval().is_none());
    }
}
