//! Option-string parsing for vectorizer configuration
//!
//! Vectorizer subcommands accept `--*_kwargs` strings of the form
//! `key1=val1;key2=val2`, forwarded verbatim to the vectorizer that owns
//! them. Each vectorizer takes the keys it understands; leftovers are a
//! usage error so a typo never silently falls back to a default.

use std::collections::HashMap;

use crate::error::{AltairError, Result};

/// A parsed `key=value;key=value` option string
#[derive(Debug, Default, Clone)]
pub struct Kwargs {
    entries: HashMap<String, String>,
}

impl Kwargs {
    /// Parse an optional option string. `None` and `""` are both empty.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let mut entries = HashMap::new();
        let Some(raw) = raw else {
            return Ok(Self { entries });
        };

        for pair in raw.split(';').filter(|p| !p.trim().is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(AltairError::InvalidKwargs {
                    raw: raw.to_string(),
                    reason: format!("expected key=value, got {:?}", pair.trim()),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(AltairError::InvalidKwargs {
                    raw: raw.to_string(),
                    reason: "empty key".to_string(),
                });
            }
            entries.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self { entries })
    }

    /// Take a boolean option (`true`/`false`/`1`/`0`), or the default if absent
    pub fn take_bool(&mut self, key: &str, default: bool) -> Result<bool> {
        match self.entries.remove(key) {
            None => Ok(default),
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(AltairError::InvalidOptionValue {
                    key: key.to_string(),
                    value,
                    reason: "expected true or false".to_string(),
                }),
            },
        }
    }

    /// Take an integer option, or the default if absent
    pub fn take_usize(&mut self, key: &str, default: usize) -> Result<usize> {
        match self.entries.remove(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|_| AltairError::InvalidOptionValue {
                key: key.to_string(),
                value,
                reason: "expected a non-negative integer".to_string(),
            }),
        }
    }

    /// Take a float option, or the default if absent
    pub fn take_f64(&mut self, key: &str, default: f64) -> Result<f64> {
        match self.entries.remove(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|_| AltairError::InvalidOptionValue {
                key: key.to_string(),
                value,
                reason: "expected a number".to_string(),
            }),
        }
    }

    /// Take a string option, or the default if absent
    pub fn take_str(&mut self, key: &str, default: &str) -> String {
        self.entries
            .remove(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Fail if any unconsumed keys remain, naming the keys the caller
    /// actually supports
    pub fn finish(self, expected: &[&str]) -> Result<()> {
        if let Some(key) = self.entries.into_keys().next() {
            return Err(AltairError::UnknownOption {
                key,
                expected: expected.join(", "),
            });
        }
        Ok(())
    }
}
