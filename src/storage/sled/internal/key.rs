use std::fmt::Display;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::storage::sled::error::SledStorageError;
use strum::AsRefStr;
use strum_macros::{Display, EnumString};

#[derive(Debug, EnumString, AsRefStr, Display, PartialEq, Eq, Copy, Clone)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum PrefixKind {
    Todo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyPrefix {
    prefix: String,
}

impl KeyPrefix {
    pub fn from_kind(kind: PrefixKind) -> Self {
        Self {
            prefix: format!("{}:", kind.as_ref()),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        self.prefix.as_str()
    }
}

impl std::fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.prefix.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Key {
    prefix: KeyPrefix,
    full_key: String,
}

impl Key {
    pub fn new(prefix: KeyPrefix, value: impl Display) -> Self {
        Self {
            full_key: format!("{}{}", prefix.as_str(), value),
            prefix,
        }
    }

    /// Parses `<kind>:<value>`; the kind must be known and the value non-empty.
    #[instrument(name = "Key::from_bytes", skip_all, level = "debug")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SledStorageError> {
        let full_key = std::str::from_utf8(bytes)
            .map_err(SledStorageError::Conversion)?
            .to_string();

        let Some((kind, value)) = full_key.split_once(':') else {
            return Err(SledStorageError::InvalidKey(full_key));
        };

        let kind = match PrefixKind::from_str(kind) {
            Ok(kind) => kind,
            Err(_) => return Err(SledStorageError::InvalidKey(full_key)),
        };

        if value.is_empty() || value.contains(':') {
            return Err(SledStorageError::InvalidKey(full_key));
        }

        let prefix = KeyPrefix::from_kind(kind);
        debug!(key = %full_key, prefix = %prefix, "created key from bytes");

        Ok(Self { prefix, full_key })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.full_key.as_bytes()
    }

    /// Part of the key after its prefix.
    pub fn value(&self) -> &str {
        &self.full_key[self.prefix.as_str().len()..]
    }

    pub fn starts_with(&self, prefix: &KeyPrefix) -> bool {
        self.full_key.starts_with(prefix.as_str())
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.full_key.fmt(f)
    }
}
