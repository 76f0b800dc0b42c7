//! # Configuration
//!
//! Tunables for the platform layer. Every field has a sensible default; the
//! `HOSTKIT_*` environment variables override them:
//!
//! - `HOSTKIT_MEMORY_CEILING`: upper bound for reported physical memory, in bytes
//! - `HOSTKIT_CONVERSION_ATTEMPTS`: retry cap for buffer-growth conversions
//! - `HOSTKIT_CANONICAL_FORM`: `nfkc` (default) or `passthrough`
//! - `HOSTKIT_TEMP_DIR`: use this directory instead of `TMPDIR`/`TEMP`/`TMP`
//!
//! Invalid values are logged and ignored.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::memory::DEFAULT_MEMORY_CEILING;
use crate::text::growth::DEFAULT_MAX_ATTEMPTS;
use crate::text::CanonicalForm;

/// Platform-layer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig
{
    /// Physical memory readings above this are clamped to it
    pub memory_ceiling: u64,
    /// Maximum transform invocations per buffer-growth conversion
    pub max_conversion_attempts: u32,
    /// Form produced by the text normalizer
    pub canonical_form: CanonicalForm,
    /// Temp directory to use instead of the environment lookup
    pub temp_dir_override: Option<PathBuf>,
}

impl Default for HostConfig
{
    fn default() -> Self
    {
        Self {
            memory_ceiling: DEFAULT_MEMORY_CEILING,
            max_conversion_attempts: DEFAULT_MAX_ATTEMPTS,
            canonical_form: CanonicalForm::default(),
            temp_dir_override: None,
        }
    }
}

impl HostConfig
{
    /// Build a config from the process environment.
    #[must_use]
    pub fn from_env() -> Self
    {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config using `lookup` to read variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            memory_ceiling: parse_var(&lookup, "HOSTKIT_MEMORY_CEILING").unwrap_or(defaults.memory_ceiling),
            max_conversion_attempts: parse_var::<_, u32>(&lookup, "HOSTKIT_CONVERSION_ATTEMPTS")
                .filter(|attempts| *attempts > 0)
                .unwrap_or(defaults.max_conversion_attempts),
            canonical_form: parse_var(&lookup, "HOSTKIT_CANONICAL_FORM").unwrap_or(defaults.canonical_form),
            temp_dir_override: lookup("HOSTKIT_TEMP_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {name}={raw:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String>
    {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_variables()
    {
        let config = HostConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_variables_override_defaults()
    {
        let config = HostConfig::from_lookup(lookup_from(&[
            ("HOSTKIT_MEMORY_CEILING", "4096"),
            ("HOSTKIT_CONVERSION_ATTEMPTS", "3"),
            ("HOSTKIT_CANONICAL_FORM", "passthrough"),
            ("HOSTKIT_TEMP_DIR", "/var/tmp"),
        ]));
        assert_eq!(config.memory_ceiling, 4096);
        assert_eq!(config.max_conversion_attempts, 3);
        assert_eq!(config.canonical_form, CanonicalForm::Passthrough);
        assert_eq!(config.temp_dir_override, Some(PathBuf::from("/var/tmp")));
    }

    #[test]
    fn test_invalid_values_fall_back()
    {
        let config = HostConfig::from_lookup(lookup_from(&[
            ("HOSTKIT_MEMORY_CEILING", "lots"),
            ("HOSTKIT_CONVERSION_ATTEMPTS", "0"),
            ("HOSTKIT_TEMP_DIR", ""),
        ]));
        assert_eq!(config.memory_ceiling, DEFAULT_MEMORY_CEILING);
        assert_eq!(config.max_conversion_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.temp_dir_override, None);
    }
}
