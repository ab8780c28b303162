//! Required-field checks and numeric bounds.
//!
//! Clamping is silent: a response never says whether its limit was
//! adjusted.

use docbridge_core::CollectionRef;

use crate::config::ExecutorConfig;
use crate::{Error, Result};

/// Resolve a requested result limit.
///
/// `<= 0` (or absent) becomes the default; anything above the cap is
/// clamped to the cap.
pub fn resolve_limit(requested: Option<i64>, config: &ExecutorConfig) -> usize {
    match requested {
        Some(n) if n > 0 => usize::try_from(n).map_or(config.max_limit, |n| n.min(config.max_limit)),
        _ => config.default_limit,
    }
}

/// Resolve a requested sample size; `<= 0` (or absent) becomes the default.
pub fn resolve_sample_size(requested: Option<i64>, config: &ExecutorConfig) -> usize {
    match requested {
        Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => config.default_sample_size,
    }
}

/// Both parts of a collection reference must be non-empty.
pub fn require_collection(collection: &CollectionRef) -> Result<()> {
    if collection.namespace.is_empty() || collection.collection.is_empty() {
        return Err(Error::invalid("namespace and collection names are required"));
    }
    Ok(())
}

/// A namespace name must be non-empty.
pub fn require_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Err(Error::invalid("namespace name is required"));
    }
    Ok(())
}

/// A named string parameter must be non-empty.
pub fn require(name: &str, value: &str, operation: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid(format!("{} is required for {}", name, operation)));
    }
    Ok(())
}
