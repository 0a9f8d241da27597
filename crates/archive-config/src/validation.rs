//! Cross-field validation lives in `loader::validate`, invoked automatically
//! by `ConfigResolver::load`. This module exposes it for callers that
//! assemble a `Config` outside the resolver (e.g. tests building one by
//! hand) and still want the same invariants enforced.

use crate::loader::ConfigError;
use crate::models::Config;

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    crate::loader::validate(config)
}
