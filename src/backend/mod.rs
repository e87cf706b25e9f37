//! Backend tiers and the lane-operation traits they implement.
//!
//! # Architecture
//!
//! - **Primitives** (`primitives.rs`): [`MaskPrimitives`] and [`Primitives`],
//!   operations that map 1:1 (or near 1:1) to hardware instructions.
//! - **Compounds** (`compounds.rs`): [`Transcendentals`], per-lane libm by
//!   default, polynomial kernels where a tier opts in.
//! - **Pair** (`pair.rs`): doubles the width of any primitive type by
//!   holding two halves. All width-16 types, and width-8 types on tiers
//!   without native 8-lane registers, are pairs.
//!
//! A [`Backend`] names the six concrete types of one tier. The public
//! vector types are thin wrappers generic over these.

use crate::config::Tier;
use core::fmt::Debug;

pub mod compounds;
pub mod pair;
pub mod primitives;
pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod x86;

pub use compounds::Transcendentals;
pub use pair::Pair;
pub use primitives::{MaskPrimitives, Primitives};

/// One tier's family of vector and mask types.
///
/// Every type family is closed: comparisons of `F8` produce `M8`, the halves
/// of `F16` are `F8`, and so on. Nothing converts between tiers.
pub trait Backend: 'static + Copy + Clone + Send + Sync + Debug + Default {
    const TIER: Tier;

    type M4: MaskPrimitives<Bools = [bool; 4]>;
    type F4: Transcendentals<Array = [f32; 4], Mask = Self::M4>;

    type M8: MaskPrimitives<Bools = [bool; 8]> + Halves<Half = Self::M4>;
    type F8: Transcendentals<Array = [f32; 8], Mask = Self::M8> + Halves<Half = Self::F4>;

    type M16: MaskPrimitives<Bools = [bool; 16]> + Halves<Half = Self::M8>;
    type F16: Transcendentals<Array = [f32; 16], Mask = Self::M16> + Halves<Half = Self::F8>;
}

/// Types made of a low and a high half.
///
/// `split(join(lo, hi)) == (lo, hi)` bit for bit.
pub trait Halves: Sized {
    type Half: Copy;

    fn join(lo: Self::Half, hi: Self::Half) -> Self;

    fn split(self) -> (Self::Half, Self::Half);
}
