use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Service/binary version information, surfaced by `health()`/`stats()` responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceVersion {
    pub name: String,
    pub version: String,
    pub build_hash: Option<String>,
}

impl ServiceVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            build_hash: None,
        }
    }

    pub fn with_build_hash(mut self, hash: impl Into<String>) -> Self {
        self.build_hash = Some(hash.into());
        self
    }
}

impl Display for ServiceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.build_hash {
            Some(hash) => write!(f, "{} v{} ({})", self.name, self.version, hash),
            None => write!(f, "{} v{}", self.name, self.version),
        }
    }
}
