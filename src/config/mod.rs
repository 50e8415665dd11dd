//! Prover and verifier configuration.
//!
//! A [`FriConfig`] fixes everything about a proof that is not part of the
//! statement itself: how many queries to issue (directly or through a
//! security target) and how far to fold.  Configurations are plain serde
//! structs and are usually loaded from JSON or picked by profile name.
//!
//! Three profiles are shipped:
//!
//! | profile        | queries |
//! |----------------|---------|
//! | `standard`     | 64      |
//! | `high-security`| 96      |
//! | `throughput`   | 48      |

use serde::{Deserialize, Serialize};

use crate::fri::{queries_for_security, FriError, FriOptions};

/// Identifier describing a configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub u8);

/// Balanced default profile.
pub const PROFILE_STD: ProfileId = ProfileId(1);

/// Profile favouring query redundancy.
pub const PROFILE_HISEC: ProfileId = ProfileId(2);

/// Profile trading queries for proof size and verifier time.  Benchmark
/// before enabling it.
pub const PROFILE_THROUGHPUT: ProfileId = ProfileId(3);

impl ProfileId {
    /// Canonical profile name accepted by [`FriConfig::profile`].
    pub const fn name(self) -> &'static str {
        match self.0 {
            1 => "standard",
            2 => "high-security",
            3 => "throughput",
            _ => "unknown",
        }
    }

    /// Query budget of the profile.
    pub const fn query_budget(self) -> usize {
        match self.0 {
            2 => 96,
            3 => 48,
            _ => 64,
        }
    }
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configured query count is zero.
    #[error("query count must be non-zero")]
    ZeroQueries,
    /// Final layer size is zero or not a power of two.
    #[error("final layer size {size} is not a power of two")]
    InvalidFinalLayerSize {
        /// Offending size.
        size: usize,
    },
    /// Security target is zero.
    #[error("security target must be non-zero")]
    ZeroSecurityTarget,
    /// No profile with the given name exists.
    #[error("unknown profile `{0}`")]
    UnknownProfile(String),
    /// The JSON document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration shared by prover and verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FriConfig {
    /// Number of queries, used unless `security_bits_target` is set.
    pub query_count: usize,
    /// Size of the last committed layer; derived from the degree bound when
    /// absent.
    pub final_layer_size: Option<usize>,
    /// Conjectured security level to derive the query count from.
    pub security_bits_target: Option<u32>,
}

impl Default for FriConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl FriConfig {
    /// Builds the configuration of a profile.
    pub const fn from_profile(profile: ProfileId) -> Self {
        Self {
            query_count: profile.query_budget(),
            final_layer_size: None,
            security_bits_target: None,
        }
    }

    pub const fn standard() -> Self {
        Self::from_profile(PROFILE_STD)
    }

    pub const fn high_security() -> Self {
        Self::from_profile(PROFILE_HISEC)
    }

    pub const fn throughput() -> Self {
        Self::from_profile(PROFILE_THROUGHPUT)
    }

    /// Resolves a profile by name.
    pub fn profile(name: &str) -> Result<Self, ConfigError> {
        [PROFILE_STD, PROFILE_HISEC, PROFILE_THROUGHPUT]
            .into_iter()
            .find(|profile| profile.name() == name)
            .map(Self::from_profile)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_owned()))
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query_count == 0 {
            return Err(ConfigError::ZeroQueries);
        }
        if let Some(size) = self.final_layer_size {
            if size == 0 || !size.is_power_of_two() {
                return Err(ConfigError::InvalidFinalLayerSize { size });
            }
        }
        if self.security_bits_target == Some(0) {
            return Err(ConfigError::ZeroSecurityTarget);
        }
        Ok(())
    }

    /// Options handed to [`crate::fri::FriProver`] and
    /// [`crate::fri::FriVerifier`].
    pub fn options(&self) -> FriOptions {
        FriOptions {
            final_layer_size: self.final_layer_size,
        }
    }

    /// Query count for a statement: derived from the security target when
    /// one is set, the configured count otherwise.
    pub fn query_count_for(&self, domain_size: usize, degree_bound: usize) -> Result<usize, FriError> {
        match self.security_bits_target {
            Some(bits) => queries_for_security(bits, domain_size, degree_bound),
            None => Ok(self.query_count),
        }
    }
}
