//! Executor configuration via `docbridge.toml`
//!
//! Every field is optional in the file; omitted fields take the built-in
//! bounds. A missing file is not an error for callers that use
//! [`ExecutorConfig::default`] directly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "docbridge.toml";

/// Result-size and sampling bounds applied to every command.
///
/// # Example
///
/// ```toml
/// default_limit = 100
/// max_limit = 1000
/// default_sample_size = 100
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Limit used when a request asks for zero or fewer rows.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Hard cap on rows returned by a single read.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Sample size used when a request asks for zero or fewer documents.
    #[serde(default = "default_sample_size")]
    pub default_sample_size: usize,
}

fn default_limit() -> usize {
    100
}

fn default_max_limit() -> usize {
    1000
}

fn default_sample_size() -> usize {
    100
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            default_sample_size: default_sample_size(),
        }
    }
}

impl ExecutorConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# docbridge executor configuration
#
# Rows returned when a request omits `limit` or passes a value <= 0.
default_limit = 100

# Upper bound on `limit`; larger requests are clamped silently.
max_limit = 1000

# Documents sampled by schema_inspector when `sample_size` is omitted or <= 0.
default_sample_size = 100
"#
    }

    /// Parse and validate config text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ExecutorConfig = toml::from_str(content)
            .map_err(|e| Error::invalid(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject bounds that would make limit resolution inconsistent.
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 || self.default_sample_size == 0 {
            return Err(Error::invalid("config bounds must be greater than zero"));
        }
        if self.max_limit < self.default_limit {
            return Err(Error::invalid(format!(
                "max_limit ({}) must not be below default_limit ({})",
                self.max_limit, self.default_limit
            )));
        }
        Ok(())
    }
}
