//! Rounding configuration loading.
//!
//! This module provides the [`RoundingConfig`] type holding the per-client
//! rounding policies, loaded from a YAML file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

use super::rounding::RoundingPolicy;

#[derive(Debug, Clone, Deserialize)]
struct RoundingConfigFile {
    #[serde(default)]
    default: Option<RoundingPolicy>,
    #[serde(default)]
    clients: HashMap<String, RoundingPolicy>,
}

/// Per-client rounding policies plus the documented default.
///
/// Policy lookup never fails: an unknown client, or a record with no client
/// at all, degrades to the default policy. Attendance display must never
/// hard-fail on a missing configuration row, so the soft fallback lives
/// here and nowhere else.
///
/// # File format
///
/// ```yaml
/// default:
///   unit_minutes: 15
///   mode: nearest
/// clients:
///   client-acme:
///     unit_minutes: 30
///     mode: floor
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoundingConfig {
    default: RoundingPolicy,
    clients: HashMap<String, RoundingPolicy>,
}

impl RoundingConfig {
    /// Loads the configuration from a YAML file.
    ///
    /// File-level problems — a missing file or unparseable YAML — surface
    /// as errors at startup; only per-client lookup softens.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let file: RoundingConfigFile =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self {
            default: file.default.unwrap_or_default(),
            clients: file.clients,
        })
    }

    /// Builds a configuration from explicit policies. Intended for tests
    /// and embedders that manage configuration themselves.
    pub fn with_policies(
        default: RoundingPolicy,
        clients: HashMap<String, RoundingPolicy>,
    ) -> Self {
        Self { default, clients }
    }

    /// Returns the policy for a client, falling back to the default for an
    /// unknown or absent client id.
    pub fn policy_for(&self, client_id: Option<&str>) -> RoundingPolicy {
        client_id
            .and_then(|id| self.clients.get(id).copied())
            .unwrap_or(self.default)
    }

    /// Returns the default policy.
    pub fn default_policy(&self) -> RoundingPolicy {
        self.default
    }
}
