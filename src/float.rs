//! # Float vectors
//!
//! `FloatVector<F>` wraps one tier's native f32 vector type and gives it value
//! semantics: operators, comparisons into [`BoolVector`], horizontal
//! reductions and elementwise math.
//!
//! ```
//! use pixelflow_simd::Vec4f;
//!
//! let a = Vec4f::from_array([1.0, 2.0, 3.0, 4.0]);
//! let b = Vec4f::from_array([10.0, 20.0, 30.0, 40.0]);
//! assert_eq!((a + b).to_array(), [11.0, 22.0, 33.0, 44.0]);
//!
//! let mut c = a;
//! c.load_partial(&[9.0, 8.0, 7.0, 6.0], 2);
//! assert_eq!(c.to_array(), [9.0, 8.0, 0.0, 0.0]);
//! ```

use crate::backend::{Halves, MaskPrimitives, Primitives, Transcendentals};
use crate::config::{checked_count, checked_index, lane_count, lane_index};
use crate::error::SimdError;
use crate::mask::BoolVector;
use core::fmt::{Debug, Formatter};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A fixed-width vector of `f32`.
#[derive(Copy, Clone, Default)]
#[repr(transparent)]
pub struct FloatVector<F>(pub(crate) F);

impl<F: Primitives> FloatVector<F> {
    /// Number of lanes.
    pub const LANES: usize = F::LANES;

    /// All lanes `0.0`.
    #[inline(always)]
    pub fn zeros() -> Self {
        Self(F::splat(0.0))
    }

    /// Every lane set to `v`.
    #[inline(always)]
    pub fn splat(v: f32) -> Self {
        Self(F::splat(v))
    }

    /// One value per lane, lane 0 first.
    #[inline(always)]
    pub fn from_array(lanes: F::Array) -> Self {
        Self(F::from_array(lanes))
    }

    /// Loads `LANES` values. Panics if `src` is shorter.
    #[inline(always)]
    pub fn from_slice(src: &[f32]) -> Self {
        Self(F::load(src))
    }

    pub fn try_from_slice(src: &[f32]) -> Result<Self, SimdError> {
        if src.len() < F::LANES {
            return Err(SimdError::SliceTooShort {
                needed: F::LANES,
                len: src.len(),
            });
        }
        Ok(Self(F::load(src)))
    }

    /// The first `min(values.len(), LANES)` lanes from `values`, the rest zero.
    #[inline(always)]
    pub fn from_prefix(values: &[f32]) -> Self {
        Self(F::load_partial(values, values.len().min(F::LANES)))
    }

    /// Wraps a backend register.
    #[inline(always)]
    pub fn from_native(native: F::Native) -> Self {
        Self(F::from_native(native))
    }

    /// The backend register. Code using this is tied to one tier.
    #[inline(always)]
    pub fn to_native(self) -> F::Native {
        self.0.to_native()
    }

    #[inline(always)]
    pub fn to_array(self) -> F::Array {
        self.0.to_array()
    }

    /// Iterates the lanes, lane 0 first.
    pub fn lanes(self) -> impl Iterator<Item = f32> {
        (0..F::LANES).map(move |i| self.0.extract(i))
    }

    /// Sets every lane to `v`.
    #[inline(always)]
    pub fn broadcast(&mut self, v: f32) -> &mut Self {
        self.0 = F::splat(v);
        self
    }

    /// Loads `LANES` values. Panics if `src` is shorter.
    #[inline(always)]
    pub fn load(&mut self, src: &[f32]) -> &mut Self {
        self.0 = F::load(src);
        self
    }

    /// Loads the first `n` values and zeroes the remaining lanes.
    ///
    /// `n` is resolved against `[0, LANES]` and `src.len()` under the crate's
    /// [`IndexPolicy`](crate::IndexPolicy). Nothing past `src[n - 1]` is read.
    #[inline(always)]
    pub fn load_partial(&mut self, src: &[f32], n: i64) -> &mut Self {
        self.0 = F::load_partial(src, lane_count(n, F::LANES, src.len()));
        self
    }

    pub fn try_load_partial(&mut self, src: &[f32], n: i64) -> Result<&mut Self, SimdError> {
        self.0 = F::load_partial(src, checked_count(n, F::LANES, src.len())?);
        Ok(self)
    }

    /// Stores all lanes. Panics if `dst` is shorter than `LANES`.
    #[inline(always)]
    pub fn store(&self, dst: &mut [f32]) {
        self.0.store(dst);
    }

    /// Stores the first `n` lanes; `dst[n..]` is left untouched.
    #[inline(always)]
    pub fn store_partial(&self, dst: &mut [f32], n: i64) {
        let n = lane_count(n, F::LANES, dst.len());
        self.0.store_partial(dst, n);
    }

    pub fn try_store_partial(&self, dst: &mut [f32], n: i64) -> Result<(), SimdError> {
        let n = checked_count(n, F::LANES, dst.len())?;
        self.0.store_partial(dst, n);
        Ok(())
    }

    /// Lane `idx`, resolved under the crate's index policy.
    #[inline(always)]
    pub fn access(&self, idx: i64) -> f32 {
        self.0.extract(lane_index(idx, F::LANES))
    }

    pub fn try_access(&self, idx: i64) -> Result<f32, SimdError> {
        Ok(self.0.extract(checked_index(idx, F::LANES)?))
    }

    /// Sets lane `idx`, resolved under the crate's index policy.
    #[inline(always)]
    pub fn assign(&mut self, v: f32, idx: i64) -> &mut Self {
        self.0 = self.0.insert(lane_index(idx, F::LANES), v);
        self
    }

    pub fn try_assign(&mut self, v: f32, idx: i64) -> Result<&mut Self, SimdError> {
        self.0 = self.0.insert(checked_index(idx, F::LANES)?, v);
        Ok(self)
    }

    /// Prefix `++`: adds one to every lane.
    #[inline(always)]
    pub fn increment(&mut self) -> &mut Self {
        self.0 = self.0 + F::splat(1.0);
        self
    }

    /// Prefix `--`: subtracts one from every lane.
    #[inline(always)]
    pub fn decrement(&mut self) -> &mut Self {
        self.0 = self.0 - F::splat(1.0);
        self
    }

    /// Postfix `++`: adds one to every lane and returns the previous value.
    #[inline(always)]
    pub fn post_increment(&mut self) -> Self {
        let prev = *self;
        self.increment();
        prev
    }

    /// Postfix `--`: subtracts one from every lane and returns the previous value.
    #[inline(always)]
    pub fn post_decrement(&mut self) -> Self {
        let prev = *self;
        self.decrement();
        prev
    }

    #[inline(always)]
    pub fn cmp_eq(self, rhs: Self) -> BoolVector<F::Mask> {
        BoolVector(self.0.cmp_eq(rhs.0))
    }

    /// True where the lanes differ or either is NaN.
    #[inline(always)]
    pub fn cmp_ne(self, rhs: Self) -> BoolVector<F::Mask> {
        BoolVector(self.0.cmp_ne(rhs.0))
    }

    #[inline(always)]
    pub fn cmp_lt(self, rhs: Self) -> BoolVector<F::Mask> {
        BoolVector(self.0.cmp_lt(rhs.0))
    }

    #[inline(always)]
    pub fn cmp_le(self, rhs: Self) -> BoolVector<F::Mask> {
        BoolVector(self.0.cmp_le(rhs.0))
    }

    #[inline(always)]
    pub fn cmp_gt(self, rhs: Self) -> BoolVector<F::Mask> {
        BoolVector(self.0.cmp_gt(rhs.0))
    }

    #[inline(always)]
    pub fn cmp_ge(self, rhs: Self) -> BoolVector<F::Mask> {
        BoolVector(self.0.cmp_ge(rhs.0))
    }

    /// Lane-wise `mask[i] ? a[i] : b[i]`.
    #[inline(always)]
    pub fn blend(a: Self, b: Self, mask: BoolVector<F::Mask>) -> Self {
        Self(F::select(mask.0, a.0, b.0))
    }

    /// Lane-wise minimum; `rhs` wins when either lane is NaN.
    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        Self(self.0.min(rhs.0))
    }

    /// Lane-wise maximum; `rhs` wins when either lane is NaN.
    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        Self(self.0.max(rhs.0))
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self(self.0.sqrt())
    }

    #[inline(always)]
    pub fn floor(self) -> Self {
        Self(self.0.floor())
    }

    #[inline(always)]
    pub fn ceil(self) -> Self {
        Self(self.0.ceil())
    }

    /// Round to nearest, ties to even.
    #[inline(always)]
    pub fn round(self) -> Self {
        Self(self.0.round())
    }

    /// `self * b + c`, fused where the target has FMA (so not bit-identical across tiers).
    #[inline(always)]
    pub fn mul_add(self, b: Self, c: Self) -> Self {
        Self(self.0.mul_add(b.0, c.0))
    }

    /// Sum of all lanes. Summation order is tier-specific.
    #[inline(always)]
    pub fn horizontal_add(self) -> f32 {
        self.0.reduce_add()
    }

    #[inline(always)]
    pub fn horizontal_max(self) -> f32 {
        self.0.reduce_max()
    }

    #[inline(always)]
    pub fn horizontal_min(self) -> f32 {
        self.0.reduce_min()
    }
}

impl<F: Transcendentals> FloatVector<F> {
    #[inline(always)]
    pub fn sin(self) -> Self {
        Self(self.0.sin())
    }

    #[inline(always)]
    pub fn cos(self) -> Self {
        Self(self.0.cos())
    }

    #[inline(always)]
    pub fn tan(self) -> Self {
        Self(self.0.tan())
    }

    #[inline(always)]
    pub fn asin(self) -> Self {
        Self(self.0.asin())
    }

    #[inline(always)]
    pub fn acos(self) -> Self {
        Self(self.0.acos())
    }

    #[inline(always)]
    pub fn atan(self) -> Self {
        Self(self.0.atan())
    }

    /// Four-quadrant arctangent of `self / x`.
    #[inline(always)]
    pub fn atan2(self, x: Self) -> Self {
        Self(self.0.atan2(x.0))
    }
}

impl<F> FloatVector<F>
where
    F: Primitives + Halves,
    F::Half: Primitives,
{
    /// Builds a vector from its low and high halves.
    #[inline(always)]
    pub fn from_halves(lo: FloatVector<F::Half>, hi: FloatVector<F::Half>) -> Self {
        Self(F::join(lo.0, hi.0))
    }

    #[inline(always)]
    pub fn split(self) -> (FloatVector<F::Half>, FloatVector<F::Half>) {
        let (lo, hi) = self.0.split();
        (FloatVector(lo), FloatVector(hi))
    }

    /// Lanes `0..LANES / 2`.
    #[inline(always)]
    pub fn low(self) -> FloatVector<F::Half> {
        self.split().0
    }

    /// Lanes `LANES / 2..LANES`.
    #[inline(always)]
    pub fn high(self) -> FloatVector<F::Half> {
        self.split().1
    }
}

impl<F: Primitives> Debug for FloatVector<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "FloatVector({:?})", self.to_array())
    }
}

/// True when every lane compares equal (so any NaN lane makes it false).
impl<F: Primitives> PartialEq for FloatVector<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.cmp_eq(other.0).all()
    }
}

impl<F: Primitives> From<f32> for FloatVector<F> {
    #[inline(always)]
    fn from(v: f32) -> Self {
        Self::splat(v)
    }
}

macro_rules! impl_float_binop {
    ($trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident) => {
        impl<F: Primitives> $trait for FloatVector<F> {
            type Output = Self;
            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self(self.0.$method(rhs.0))
            }
        }

        impl<F: Primitives> $trait<f32> for FloatVector<F> {
            type Output = Self;
            #[inline(always)]
            fn $method(self, rhs: f32) -> Self {
                Self(self.0.$method(F::splat(rhs)))
            }
        }

        impl<F: Primitives> $trait<FloatVector<F>> for f32 {
            type Output = FloatVector<F>;
            #[inline(always)]
            fn $method(self, rhs: FloatVector<F>) -> FloatVector<F> {
                FloatVector(F::splat(self).$method(rhs.0))
            }
        }

        impl<F: Primitives> $assign_trait for FloatVector<F> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                self.0 = self.0.$method(rhs.0);
            }
        }

        impl<F: Primitives> $assign_trait<f32> for FloatVector<F> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: f32) {
                self.0 = self.0.$method(F::splat(rhs));
            }
        }
    };
}

impl_float_binop!(Add::add, AddAssign::add_assign);
impl_float_binop!(Sub::sub, SubAssign::sub_assign);
impl_float_binop!(Mul::mul, MulAssign::mul_assign);
impl_float_binop!(Div::div, DivAssign::div_assign);

impl<F: Primitives> Neg for FloatVector<F> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::scalar::Scalar;
    use crate::backend::Backend;
    use crate::FloatVector;

    type V4 = FloatVector<<Scalar as Backend>::F4>;
    type V8 = FloatVector<<Scalar as Backend>::F8>;

    #[test]
    fn scalar_operands_on_either_side() {
        let v = V4::from_array([1.0, 2.0, 4.0, 8.0]);
        assert_eq!((v * 2.0).to_array(), [2.0, 4.0, 8.0, 16.0]);
        assert_eq!((16.0 / v).to_array(), [16.0, 8.0, 4.0, 2.0]);
        assert_eq!((1.0 - v).to_array(), [0.0, -1.0, -3.0, -7.0]);
        assert_eq!((v / 2.0).to_array(), [0.5, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn increment_and_decrement() {
        let mut v = V4::from_array([1.0, 2.0, 3.0, 4.0]);
        let before = v.post_increment();
        assert_eq!(before.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.to_array(), [2.0, 3.0, 4.0, 5.0]);
        v.decrement();
        assert_eq!(v, before);
        let prev = v.post_decrement();
        assert_eq!(prev, before);
        v.increment();
        assert_eq!(v, before);
    }

    #[test]
    fn from_prefix_zero_fills() {
        let v = V8::from_prefix(&[1.0, 2.0, 3.0]);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let w = V4::from_prefix(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(w.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn nan_lanes_are_not_equal() {
        let v = V4::from_array([1.0, f32::NAN, 3.0, 4.0]);
        assert_ne!(v, v);
        assert!(v.cmp_ne(v).any());
    }

    #[test]
    fn division_by_zero_is_ieee() {
        let v = V4::from_array([1.0, -1.0, 0.0, 2.0]) / 0.0;
        let out = v.to_array();
        assert_eq!(out[0], f32::INFINITY);
        assert_eq!(out[1], f32::NEG_INFINITY);
        assert!(out[2].is_nan());
        assert_eq!(out[3], f32::INFINITY);
    }

    #[test]
    fn checked_lane_access() {
        let mut v = V8::zeros();
        assert!(v.try_assign(1.0, 8).is_err());
        v.try_assign(5.0, 7).unwrap();
        assert_eq!(v.try_access(7).unwrap(), 5.0);
        assert!(v.try_access(-1).is_err());
    }
}
