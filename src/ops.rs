//! Free-function forms of the vector operations.
//!
//! These mirror the methods on [`FloatVector`] and [`BoolVector`] so that
//! generic math reads like its scalar counterpart:
//!
//! ```
//! use pixelflow_simd::{ops, Vec4f};
//!
//! let v = Vec4f::from_array([-1.5, 2.0, -3.0, 0.25]);
//! assert_eq!(ops::horizontal_max(ops::abs(v)), 3.0);
//! ```

use crate::backend::{MaskPrimitives, Primitives, Transcendentals};
use crate::float::FloatVector;
use crate::mask::BoolVector;

/// Lane-wise selection, implemented by both float and boolean vectors.
pub trait Blend: Sized {
    /// The mask type that selects between lanes.
    type Mask;

    /// `mask[i] ? a[i] : b[i]`.
    fn blend(a: Self, b: Self, mask: Self::Mask) -> Self;
}

impl<F: Primitives> Blend for FloatVector<F> {
    type Mask = BoolVector<F::Mask>;

    #[inline(always)]
    fn blend(a: Self, b: Self, mask: Self::Mask) -> Self {
        FloatVector::blend(a, b, mask)
    }
}

impl<M: MaskPrimitives> Blend for BoolVector<M> {
    type Mask = Self;

    #[inline(always)]
    fn blend(a: Self, b: Self, mask: Self) -> Self {
        BoolVector::blend(a, b, mask)
    }
}

#[inline(always)]
pub fn blend<V: Blend>(a: V, b: V, mask: V::Mask) -> V {
    V::blend(a, b, mask)
}

#[inline(always)]
pub fn and_not<M: MaskPrimitives>(a: BoolVector<M>, b: BoolVector<M>) -> BoolVector<M> {
    a.and_not(b)
}

#[inline(always)]
pub fn max<F: Primitives>(a: FloatVector<F>, b: FloatVector<F>) -> FloatVector<F> {
    a.max(b)
}

#[inline(always)]
pub fn min<F: Primitives>(a: FloatVector<F>, b: FloatVector<F>) -> FloatVector<F> {
    a.min(b)
}

#[inline(always)]
pub fn horizontal_add<F: Primitives>(v: FloatVector<F>) -> f32 {
    v.horizontal_add()
}

#[inline(always)]
pub fn horizontal_max<F: Primitives>(v: FloatVector<F>) -> f32 {
    v.horizontal_max()
}

#[inline(always)]
pub fn horizontal_min<F: Primitives>(v: FloatVector<F>) -> f32 {
    v.horizontal_min()
}

#[inline(always)]
pub fn abs<F: Primitives>(v: FloatVector<F>) -> FloatVector<F> {
    v.abs()
}

#[inline(always)]
pub fn sqrt<F: Primitives>(v: FloatVector<F>) -> FloatVector<F> {
    v.sqrt()
}

#[inline(always)]
pub fn floor<F: Primitives>(v: FloatVector<F>) -> FloatVector<F> {
    v.floor()
}

#[inline(always)]
pub fn ceil<F: Primitives>(v: FloatVector<F>) -> FloatVector<F> {
    v.ceil()
}

#[inline(always)]
pub fn round<F: Primitives>(v: FloatVector<F>) -> FloatVector<F> {
    v.round()
}

#[inline(always)]
pub fn sin<F: Transcendentals>(v: FloatVector<F>) -> FloatVector<F> {
    v.sin()
}

#[inline(always)]
pub fn cos<F: Transcendentals>(v: FloatVector<F>) -> FloatVector<F> {
    v.cos()
}

#[inline(always)]
pub fn tan<F: Transcendentals>(v: FloatVector<F>) -> FloatVector<F> {
    v.tan()
}

#[inline(always)]
pub fn asin<F: Transcendentals>(v: FloatVector<F>) -> FloatVector<F> {
    v.asin()
}

#[inline(always)]
pub fn acos<F: Transcendentals>(v: FloatVector<F>) -> FloatVector<F> {
    v.acos()
}

#[inline(always)]
pub fn atan<F: Transcendentals>(v: FloatVector<F>) -> FloatVector<F> {
    v.atan()
}

/// Four-quadrant arctangent of `y / x`. `atan2(0, 0)` is `0`.
#[inline(always)]
pub fn atan2<F: Transcendentals>(y: FloatVector<F>, x: FloatVector<F>) -> FloatVector<F> {
    y.atan2(x)
}
