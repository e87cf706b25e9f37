//! Primitive lane operations - 1:1 (or near 1:1) with hardware instructions.
//!
//! Every tier implements these for its width-4 types (and the wide tier for its
//! native width-8 types). Wider types get them mechanically from
//! [`Pair`](super::pair::Pair).
//!
//! Index and count arguments here are already resolved: callers guarantee
//! `idx < LANES`, `n <= LANES` and slices long enough for what they ask for.
//! Policy (clamp or panic) is applied one level up, in the vector wrappers.

use crate::lanes::LaneArray;
use core::fmt::Debug;
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

/// Boolean lane operations.
///
/// Lanes are all-ones (true) or all-zeros (false). Every operation here maps
/// canonical inputs to canonical outputs.
pub trait MaskPrimitives:
    Copy
    + Clone
    + Debug
    + Default
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// Number of lanes.
    const LANES: usize;

    /// One `bool` per lane.
    type Bools: LaneArray<bool>;

    /// Backend register type(s) behind this mask.
    type Native: Copy;

    /// Broadcast one value to every lane.
    fn splat(v: bool) -> Self;

    fn from_bools(lanes: Self::Bools) -> Self;

    fn to_bools(self) -> Self::Bools;

    /// Read lane `idx`.
    fn extract(self, idx: usize) -> bool;

    /// Return a copy with lane `idx` replaced.
    fn insert(self, idx: usize, v: bool) -> Self;

    /// `self & !rhs`.
    fn and_not(self, rhs: Self) -> Self;

    /// All lanes true?
    fn all(self) -> bool;

    /// Any lane true?
    fn any(self) -> bool;

    /// No lane true?
    #[inline(always)]
    fn none(self) -> bool {
        !self.any()
    }

    /// Lane-wise `mask ? if_true : if_false`, bitwise.
    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        (mask & if_true) | if_false.and_not(mask)
    }

    /// Bit `i` of the result is lane `i`.
    fn to_bitmask(self) -> u32;

    /// Inverse of [`to_bitmask`](Self::to_bitmask). Bits at or above `LANES` are ignored.
    fn from_bitmask(bits: u32) -> Self;

    fn from_native(native: Self::Native) -> Self;

    fn to_native(self) -> Self::Native;
}

/// Primitive f32 lane operations.
///
/// Arithmetic, comparisons, selection and rounding must be bit-identical
/// across tiers. Horizontal reductions may differ in summation order.
pub trait Primitives:
    Copy
    + Clone
    + Debug
    + Default
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
{
    /// Number of lanes.
    const LANES: usize;

    /// Comparison result type.
    type Mask: MaskPrimitives;

    /// One `f32` per lane.
    type Array: LaneArray<f32>;

    /// Backend register type(s) behind this vector.
    type Native: Copy;

    /// Broadcast one value to every lane.
    fn splat(v: f32) -> Self;

    /// Broadcast a raw bit pattern to every lane.
    fn splat_bits(bits: u32) -> Self;

    fn from_array(lanes: Self::Array) -> Self;

    fn to_array(self) -> Self::Array;

    /// Load `LANES` values. Panics if `src` is shorter.
    fn load(src: &[f32]) -> Self;

    /// Load the first `n` values and zero the rest. Reads nothing past `src[n - 1]`.
    fn load_partial(src: &[f32], n: usize) -> Self;

    /// Store `LANES` values. Panics if `dst` is shorter.
    fn store(self, dst: &mut [f32]);

    /// Store the first `n` lanes. Writes nothing past `dst[n - 1]`.
    fn store_partial(self, dst: &mut [f32], n: usize);

    fn extract(self, idx: usize) -> f32;

    fn insert(self, idx: usize, v: f32) -> Self;

    fn cmp_eq(self, rhs: Self) -> Self::Mask;

    /// Unordered: true when either lane is NaN.
    fn cmp_ne(self, rhs: Self) -> Self::Mask;

    fn cmp_lt(self, rhs: Self) -> Self::Mask;

    fn cmp_le(self, rhs: Self) -> Self::Mask;

    fn cmp_gt(self, rhs: Self) -> Self::Mask;

    fn cmp_ge(self, rhs: Self) -> Self::Mask;

    /// Lane-wise `mask ? if_true : if_false`, bitwise and branch-free.
    fn select(mask: Self::Mask, if_true: Self, if_false: Self) -> Self;

    /// `self < rhs ? self : rhs` (returns `rhs` when either is NaN).
    fn min(self, rhs: Self) -> Self;

    /// `self > rhs ? self : rhs` (returns `rhs` when either is NaN).
    fn max(self, rhs: Self) -> Self;

    fn abs(self) -> Self;

    fn sqrt(self) -> Self;

    fn floor(self) -> Self;

    fn ceil(self) -> Self;

    /// Round to nearest, ties to even. Never raises.
    fn round(self) -> Self;

    /// `self * b + c`, fused where the target has FMA.
    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        self * b + c
    }

    fn reduce_add(self) -> f32;

    fn reduce_max(self) -> f32;

    fn reduce_min(self) -> f32;

    fn from_native(native: Self::Native) -> Self;

    fn to_native(self) -> Self::Native;
}

/// Scalar `max` with the same NaN and signed-zero behaviour as `maxps`.
#[inline(always)]
pub(crate) fn max_lane(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}

/// Scalar `min` with the same NaN and signed-zero behaviour as `minps`.
#[inline(always)]
pub(crate) fn min_lane(a: f32, b: f32) -> f32 {
    if a < b {
        a
    } else {
        b
    }
}
