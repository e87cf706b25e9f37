//! Compile-time backend configuration.
//!
//! The backend tier and the index policy are fixed when the crate is built
//! (cargo features `tier-narrow`, `tier-wide` and `strict-index`). This module
//! exposes them as plain constants, plus a serializable [`SimdConfig`] snapshot
//! that tools can print or compare against a deployment's expectations.

use crate::error::SimdError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The hardware instruction-set level vector types are compiled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Plain per-lane arithmetic. The reference semantics.
    Scalar,
    /// 128-bit registers (SSE2, with SSE4.1 fast paths when enabled).
    Narrow,
    /// 256-bit registers (AVX, FMA when enabled).
    Wide,
}

impl Tier {
    /// Width of the widest native register this tier uses.
    pub const fn register_bits(self) -> u32 {
        match self {
            Tier::Scalar => 32,
            Tier::Narrow => 128,
            Tier::Wide => 256,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tier::Scalar => "scalar",
            Tier::Narrow => "narrow",
            Tier::Wide => "wide",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        ACTIVE_TIER
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What lane accessors and partial loads/stores do with out-of-range input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Clamp indices into `[0, N-1]` and counts into `[0, N]`.
    Clamp,
    /// Panic with the offending index or count.
    Panic,
}

impl Default for IndexPolicy {
    fn default() -> Self {
        INDEX_POLICY
    }
}

impl fmt::Display for IndexPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexPolicy::Clamp => f.write_str("clamp"),
            IndexPolicy::Panic => f.write_str("panic"),
        }
    }
}

/// The tier the crate root aliases (`Vec4f`, `Vec8b`, ...) resolve to.
pub const ACTIVE_TIER: Tier = <crate::Active as crate::backend::Backend>::TIER;

#[cfg(feature = "strict-index")]
pub const INDEX_POLICY: IndexPolicy = IndexPolicy::Panic;
#[cfg(not(feature = "strict-index"))]
pub const INDEX_POLICY: IndexPolicy = IndexPolicy::Clamp;

/// Resolves a lane index under [`INDEX_POLICY`].
#[inline(always)]
pub(crate) fn lane_index(idx: i64, lanes: usize) -> usize {
    match INDEX_POLICY {
        IndexPolicy::Clamp => idx.clamp(0, lanes as i64 - 1) as usize,
        IndexPolicy::Panic => match checked_index(idx, lanes) {
            Ok(i) => i,
            Err(e) => panic!("{e}"),
        },
    }
}

/// Resolves a partial load/store count under [`INDEX_POLICY`].
///
/// `available` is the length of the caller's slice; the result never exceeds it.
#[inline(always)]
pub(crate) fn lane_count(n: i64, lanes: usize, available: usize) -> usize {
    match INDEX_POLICY {
        IndexPolicy::Clamp => (n.clamp(0, lanes as i64) as usize).min(available),
        IndexPolicy::Panic => match checked_count(n, lanes, available) {
            Ok(n) => n,
            Err(e) => panic!("{e}"),
        },
    }
}

#[inline]
pub(crate) fn checked_index(idx: i64, lanes: usize) -> Result<usize, SimdError> {
    if (0..lanes as i64).contains(&idx) {
        Ok(idx as usize)
    } else {
        Err(SimdError::IndexOutOfRange { index: idx, lanes })
    }
}

#[inline]
pub(crate) fn checked_count(n: i64, lanes: usize, available: usize) -> Result<usize, SimdError> {
    if !(0..=lanes as i64).contains(&n) {
        return Err(SimdError::CountOutOfRange { count: n, lanes });
    }
    let n = n as usize;
    if n > available {
        return Err(SimdError::SliceTooShort {
            needed: n,
            len: available,
        });
    }
    Ok(n)
}

/// Snapshot of how this build was configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimdConfig {
    /// Backend tier.
    pub tier: Tier,
    /// Out-of-range index handling.
    pub index_policy: IndexPolicy,
    /// Widest register used by the tier, in bits.
    pub register_bits: u32,
    /// x86 target features the crate was compiled with and can take advantage of.
    pub target_features: Vec<String>,
}

impl Default for SimdConfig {
    fn default() -> Self {
        Self::current()
    }
}

impl SimdConfig {
    /// The configuration compiled into this binary.
    pub fn current() -> Self {
        let mut target_features = Vec::new();
        let known = [
            ("sse2", cfg!(target_feature = "sse2")),
            ("sse4.1", cfg!(target_feature = "sse4.1")),
            ("avx", cfg!(target_feature = "avx")),
            ("fma", cfg!(target_feature = "fma")),
        ];
        for (name, enabled) in known {
            if enabled {
                target_features.push(name.to_string());
            }
        }
        Self {
            tier: ACTIVE_TIER,
            index_policy: INDEX_POLICY,
            register_bits: ACTIVE_TIER.register_bits(),
            target_features,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SimdError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimdError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that this build satisfies `expected`.
    ///
    /// A build at a wider tier satisfies a narrower requirement. The index
    /// policy and the target features are informational and not compared.
    pub fn satisfies(&self, expected: &SimdConfig) -> Result<(), SimdError> {
        if self.tier < expected.tier {
            return Err(SimdError::TierMismatch {
                required: expected.tier,
                built: self.tier,
            });
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        info!(
            "SIMD tier: {} ({}-bit registers), index policy: {}",
            self.tier, self.register_bits, self.index_policy
        );
        if !self.target_features.is_empty() {
            info!("Target features: {}", self.target_features.join(", "));
        }
    }
}
