//! # pixelflow-simd
//!
//! Fixed-width SIMD vectors of `f32` and `bool` at 4, 8 and 16 lanes.
//!
//! The same API is provided by three backend tiers:
//!
//! | Tier     | Registers | Width 4  | Width 8          | Width 16            |
//! |----------|-----------|----------|------------------|---------------------|
//! | `scalar` | none      | `[f32;4]`| pair of width 4  | pair of width 8     |
//! | `narrow` | 128-bit   | `__m128` | pair of width 4  | pair of width 8     |
//! | `wide`   | 256-bit   | `__m128` | `__m256`         | pair of width 8     |
//!
//! One tier is active per build, chosen by the cargo features `tier-narrow`
//! and `tier-wide` (the widest requested wins; with none, `scalar`). The crate
//! root aliases ([`Vec4f`], [`Vec8b`], ...) point at the active tier. Every
//! compiled tier is also reachable by name through [`scalar`], [`narrow`] and
//! [`wide`], which is how the tiers are tested against each other.
//!
//! Arithmetic, comparisons, selection and rounding give bit-identical results
//! on every tier. Horizontal sums and transcendentals may differ slightly.
//!
//! ```
//! use pixelflow_simd::{Vec4b, Vec4f};
//!
//! let a = Vec4f::from_array([1.0, 2.0, 3.0, 4.0]);
//! let m = a.cmp_gt(Vec4f::splat(2.5));
//! assert_eq!(m, Vec4b::from_array([false, false, true, true]));
//! assert_eq!(Vec4f::blend(a, Vec4f::zeros(), m).to_array(), [0.0, 0.0, 3.0, 4.0]);
//! ```

#[cfg(all(feature = "tier-narrow", not(target_arch = "x86_64")))]
compile_error!("the `tier-narrow` feature requires an x86_64 target");

#[cfg(all(
    feature = "tier-wide",
    not(all(target_arch = "x86_64", target_feature = "avx"))
))]
compile_error!(
    "the `tier-wide` feature requires an x86_64 target compiled with AVX \
     (e.g. RUSTFLAGS=\"-C target-feature=+avx\" or -C target-cpu=native)"
);

pub mod backend;
pub mod config;
pub mod error;
pub mod float;
pub mod lanes;
pub mod mask;
pub mod ops;
pub mod verify;

pub use config::{IndexPolicy, SimdConfig, Tier, ACTIVE_TIER, INDEX_POLICY};
pub use error::SimdError;
pub use float::FloatVector;
pub use mask::BoolVector;
pub use ops::Blend;
pub use verify::{verify_against_scalar, VerifyReport};

/// The backend the crate root aliases resolve to.
#[cfg(feature = "tier-wide")]
pub type Active = backend::x86::Wide;
#[cfg(all(feature = "tier-narrow", not(feature = "tier-wide")))]
pub type Active = backend::x86::Narrow;
#[cfg(not(any(feature = "tier-narrow", feature = "tier-wide")))]
pub type Active = backend::scalar::Scalar;

macro_rules! tier_aliases {
    ($backend:ty) => {
        use crate::backend::Backend;
        use crate::{BoolVector, FloatVector};

        pub type Vec4f = FloatVector<<$backend as Backend>::F4>;
        pub type Vec8f = FloatVector<<$backend as Backend>::F8>;
        pub type Vec16f = FloatVector<<$backend as Backend>::F16>;
        pub type Vec4b = BoolVector<<$backend as Backend>::M4>;
        pub type Vec8b = BoolVector<<$backend as Backend>::M8>;
        pub type Vec16b = BoolVector<<$backend as Backend>::M16>;
    };
}

/// Vector types of the scalar tier. Always available.
pub mod scalar {
    tier_aliases!(crate::backend::scalar::Scalar);
}

/// Vector types of the 128-bit tier.
#[cfg(target_arch = "x86_64")]
pub mod narrow {
    tier_aliases!(crate::backend::x86::Narrow);
}

/// Vector types of the 256-bit tier.
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub mod wide {
    tier_aliases!(crate::backend::x86::Wide);
}

pub type Vec4f = FloatVector<<Active as backend::Backend>::F4>;
pub type Vec8f = FloatVector<<Active as backend::Backend>::F8>;
pub type Vec16f = FloatVector<<Active as backend::Backend>::F16>;
pub type Vec4b = BoolVector<<Active as backend::Backend>::M4>;
pub type Vec8b = BoolVector<<Active as backend::Backend>::M8>;
pub type Vec16b = BoolVector<<Active as backend::Backend>::M16>;
