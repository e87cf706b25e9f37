//! # Boolean vectors
//!
//! `BoolVector<M>` wraps one tier's native mask type. Lanes are canonical:
//! every operation produces all-ones (true) or all-zeros (false). Values
//! smuggled in through [`BoolVector::from_native`] may hold other bit
//! patterns; the bitwise operators pass those through unchanged, but
//! `all`/`any`/`none` are unspecified for them.
//!
//! There is deliberately no conversion from integers:
//!
//! ```compile_fail
//! use pixelflow_simd::Vec4b;
//! let _ = Vec4b::splat(1);
//! ```

use crate::backend::{Halves, MaskPrimitives};
use crate::config::{checked_count, checked_index, lane_count, lane_index};
use crate::error::SimdError;
use core::fmt::{Debug, Formatter};
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A fixed-width vector of booleans.
#[derive(Copy, Clone, Default)]
#[repr(transparent)]
pub struct BoolVector<M>(pub(crate) M);

impl<M: MaskPrimitives> BoolVector<M> {
    /// Number of lanes.
    pub const LANES: usize = M::LANES;

    /// Every lane set to `v`.
    #[inline(always)]
    pub fn splat(v: bool) -> Self {
        Self(M::splat(v))
    }

    /// One value per lane, lane 0 first.
    #[inline(always)]
    pub fn from_array(lanes: M::Bools) -> Self {
        Self(M::from_bools(lanes))
    }

    /// Loads `LANES` values. Panics if `src` is shorter.
    #[inline]
    pub fn from_slice(src: &[bool]) -> Self {
        let mut v = Self::default();
        v.load(src);
        v
    }

    pub fn try_from_slice(src: &[bool]) -> Result<Self, SimdError> {
        if src.len() < M::LANES {
            return Err(SimdError::SliceTooShort {
                needed: M::LANES,
                len: src.len(),
            });
        }
        Ok(Self::from_slice(src))
    }

    /// Wraps a backend register without checking that its lanes are canonical.
    #[inline(always)]
    pub fn from_native(native: M::Native) -> Self {
        Self(M::from_native(native))
    }

    #[inline(always)]
    pub fn to_native(self) -> M::Native {
        self.0.to_native()
    }

    /// Bit `i` set for every true lane `i`. Identical on every tier.
    #[inline(always)]
    pub fn to_bitmask(self) -> u32 {
        self.0.to_bitmask()
    }

    /// Lane `i` is true when bit `i` is set. Higher bits are ignored.
    #[inline(always)]
    pub fn from_bitmask(bits: u32) -> Self {
        Self(M::from_bitmask(bits))
    }

    #[inline(always)]
    pub fn to_array(self) -> M::Bools {
        self.0.to_bools()
    }

    /// Iterates the lanes, lane 0 first.
    pub fn lanes(self) -> impl Iterator<Item = bool> {
        (0..M::LANES).map(move |i| self.0.extract(i))
    }

    /// Sets every lane to `v`.
    #[inline(always)]
    pub fn broadcast(&mut self, v: bool) -> &mut Self {
        self.0 = M::splat(v);
        self
    }

    /// Loads `LANES` values. Panics if `src` is shorter.
    #[inline]
    pub fn load(&mut self, src: &[bool]) -> &mut Self {
        let mut lanes = M::Bools::default();
        lanes.as_mut().copy_from_slice(&src[..M::LANES]);
        self.0 = M::from_bools(lanes);
        self
    }

    /// Loads the first `n` values and sets the remaining lanes to false.
    ///
    /// `n` is resolved against `[0, LANES]` and `src.len()` under the
    /// crate's [`IndexPolicy`](crate::IndexPolicy).
    #[inline]
    pub fn load_partial(&mut self, src: &[bool], n: i64) -> &mut Self {
        let n = lane_count(n, M::LANES, src.len());
        self.load_first(src, n)
    }

    pub fn try_load_partial(&mut self, src: &[bool], n: i64) -> Result<&mut Self, SimdError> {
        let n = checked_count(n, M::LANES, src.len())?;
        Ok(self.load_first(src, n))
    }

    #[inline(always)]
    fn load_first(&mut self, src: &[bool], n: usize) -> &mut Self {
        let mut lanes = M::Bools::default();
        lanes.as_mut()[..n].copy_from_slice(&src[..n]);
        self.0 = M::from_bools(lanes);
        self
    }

    /// Stores all lanes. Panics if `dst` is shorter than `LANES`.
    #[inline]
    pub fn store(&self, dst: &mut [bool]) {
        dst[..M::LANES].copy_from_slice(self.0.to_bools().as_ref());
    }

    /// Stores the first `n` lanes; `dst[n..]` is left untouched.
    #[inline]
    pub fn store_partial(&self, dst: &mut [bool], n: i64) {
        let n = lane_count(n, M::LANES, dst.len());
        dst[..n].copy_from_slice(&self.0.to_bools().as_ref()[..n]);
    }

    pub fn try_store_partial(&self, dst: &mut [bool], n: i64) -> Result<(), SimdError> {
        let n = checked_count(n, M::LANES, dst.len())?;
        dst[..n].copy_from_slice(&self.0.to_bools().as_ref()[..n]);
        Ok(())
    }

    /// Lane `idx`, resolved under the crate's index policy.
    #[inline(always)]
    pub fn access(&self, idx: i64) -> bool {
        self.0.extract(lane_index(idx, M::LANES))
    }

    pub fn try_access(&self, idx: i64) -> Result<bool, SimdError> {
        Ok(self.0.extract(checked_index(idx, M::LANES)?))
    }

    /// Sets lane `idx`, resolved under the crate's index policy.
    #[inline(always)]
    pub fn assign(&mut self, v: bool, idx: i64) -> &mut Self {
        self.0 = self.0.insert(lane_index(idx, M::LANES), v);
        self
    }

    pub fn try_assign(&mut self, v: bool, idx: i64) -> Result<&mut Self, SimdError> {
        self.0 = self.0.insert(checked_index(idx, M::LANES)?, v);
        Ok(self)
    }

    /// `self & !rhs`.
    #[inline(always)]
    pub fn and_not(self, rhs: Self) -> Self {
        Self(self.0.and_not(rhs.0))
    }

    /// In-place [`and_not`](Self::and_not).
    #[inline(always)]
    pub fn and_not_assign(&mut self, rhs: Self) -> &mut Self {
        self.0 = self.0.and_not(rhs.0);
        self
    }

    /// Every lane true?
    #[inline(always)]
    pub fn all(self) -> bool {
        self.0.all()
    }

    /// At least one lane true?
    #[inline(always)]
    pub fn any(self) -> bool {
        self.0.any()
    }

    /// No lane true? Always `!any()`.
    #[inline(always)]
    pub fn none(self) -> bool {
        self.0.none()
    }

    /// Lane-wise `mask[i] ? a[i] : b[i]`.
    #[inline(always)]
    pub fn blend(a: Self, b: Self, mask: Self) -> Self {
        Self(M::select(mask.0, a.0, b.0))
    }
}

impl<M> BoolVector<M>
where
    M: MaskPrimitives + Halves,
    M::Half: MaskPrimitives,
{
    /// Builds a vector from its low and high halves.
    #[inline(always)]
    pub fn from_halves(lo: BoolVector<M::Half>, hi: BoolVector<M::Half>) -> Self {
        Self(M::join(lo.0, hi.0))
    }

    #[inline(always)]
    pub fn split(self) -> (BoolVector<M::Half>, BoolVector<M::Half>) {
        let (lo, hi) = self.0.split();
        (BoolVector(lo), BoolVector(hi))
    }

    /// Lanes `0..LANES / 2`.
    #[inline(always)]
    pub fn low(self) -> BoolVector<M::Half> {
        self.split().0
    }

    /// Lanes `LANES / 2..LANES`.
    #[inline(always)]
    pub fn high(self) -> BoolVector<M::Half> {
        self.split().1
    }
}

impl<M: MaskPrimitives> Debug for BoolVector<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "BoolVector({:?})", self.to_array())
    }
}

/// Lane-wise equality of the boolean values.
impl<M: MaskPrimitives> PartialEq for BoolVector<M> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_bitmask() == other.to_bitmask()
    }
}

impl<M: MaskPrimitives> Eq for BoolVector<M> {}

impl<M: MaskPrimitives> From<bool> for BoolVector<M> {
    #[inline(always)]
    fn from(v: bool) -> Self {
        Self::splat(v)
    }
}

macro_rules! impl_mask_binop {
    ($trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident) => {
        impl<M: MaskPrimitives> $trait for BoolVector<M> {
            type Output = Self;
            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self(self.0.$method(rhs.0))
            }
        }

        impl<M: MaskPrimitives> $assign_trait for BoolVector<M> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                self.0 = self.0.$method(rhs.0);
            }
        }
    };
}

impl_mask_binop!(BitAnd::bitand, BitAndAssign::bitand_assign);
impl_mask_binop!(BitOr::bitor, BitOrAssign::bitor_assign);
impl_mask_binop!(BitXor::bitxor, BitXorAssign::bitxor_assign);

impl<M: MaskPrimitives> Not for BoolVector<M> {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Self(!self.0)
    }
}
