use crate::config::Tier;
use thiserror::Error;

/// Failures reported by the checked (`try_*`) vector APIs and the build config layer.
///
/// The unchecked APIs never return these; they follow [`crate::INDEX_POLICY`].
#[derive(Error, Debug)]
pub enum SimdError {
    #[error("lane index {index} out of range for a {lanes}-lane vector")]
    IndexOutOfRange { index: i64, lanes: usize },
    #[error("lane count {count} out of range for a {lanes}-lane vector")]
    CountOutOfRange { count: i64, lanes: usize },
    #[error("slice of length {len} is too short, {needed} lanes required")]
    SliceTooShort { needed: usize, len: usize },
    #[error("built for the {built} tier, but the {required} tier is required")]
    TierMismatch { required: Tier, built: Tier },
    #[error("{op}: lane {lane} is {actual:?}, the scalar tier gives {expected:?}")]
    Mismatch {
        op: &'static str,
        lane: usize,
        expected: f32,
        actual: f32,
    },
    #[error("{op}: error {error:e} exceeds tolerance {tolerance:e}")]
    ToleranceExceeded {
        op: &'static str,
        error: f32,
        tolerance: f32,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
