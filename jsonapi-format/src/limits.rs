//! Security limits and configuration

use crate::error::{JsonApiError, Result};

/// Limits applied while reading and writing documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum container nesting depth (default: 64, hard: 512)
    pub max_depth: usize,
    /// Maximum elements in a single `data` array (default: 100,000, hard: 10,000,000)
    pub max_list_len: usize,
    /// Maximum bytes read from an input source (default: 16 MiB, hard: 256 MiB)
    pub max_document_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_list_len: 100_000,
            max_document_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Hard maximum limits that cannot be exceeded
    pub fn hard_maximums() -> Self {
        Self {
            max_depth: 512,
            max_list_len: 10_000_000,
            max_document_bytes: 256 * 1024 * 1024,
        }
    }

    /// Validate limits against hard maximums
    pub fn validate(&self) -> Result<()> {
        let hard = Self::hard_maximums();

        let checks = [
            ("max_depth", self.max_depth, hard.max_depth),
            ("max_list_len", self.max_list_len, hard.max_list_len),
            (
                "max_document_bytes",
                self.max_document_bytes,
                hard.max_document_bytes,
            ),
        ];

        for (name, value, max) in checks {
            if value > max {
                return Err(JsonApiError::ConfigurationExceedsHardLimits {
                    reason: format!("{} {} exceeds hard limit {}", name, value, max),
                });
            }
            if value == 0 {
                return Err(JsonApiError::ConfigurationExceedsHardLimits {
                    reason: format!("{} must be greater than zero", name),
                });
            }
        }

        Ok(())
    }
}
