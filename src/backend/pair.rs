//! Width doubling: a vector made of two half-width vectors of the same tier.
//!
//! Every operation on a `Pair` is the same operation applied to `lo` and `hi`
//! independently, recombined by concatenation. Lane `i` lives in `lo` for
//! `i < H::LANES` and in `hi` at `i - H::LANES` otherwise.
//!
//! The only places where the halves interact are partial load/store (where
//! the count straddles the boundary), lane access, bit masks and horizontal
//! reductions.

use super::primitives::{max_lane, min_lane, MaskPrimitives, Primitives};
use super::{Halves, Transcendentals};
use crate::lanes::Concat;
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

/// Two half-width vectors (or masks) forming one of twice the width.
#[derive(Copy, Clone, Debug, Default)]
pub struct Pair<H> {
    pub(crate) lo: H,
    pub(crate) hi: H,
}

impl<H: Copy> Halves for Pair<H> {
    type Half = H;

    #[inline(always)]
    fn join(lo: H, hi: H) -> Self {
        Self { lo, hi }
    }

    #[inline(always)]
    fn split(self) -> (H, H) {
        (self.lo, self.hi)
    }
}

impl<H: Copy> Pair<H> {
    #[inline(always)]
    fn map(self, f: impl Fn(H) -> H) -> Self {
        Self {
            lo: f(self.lo),
            hi: f(self.hi),
        }
    }

    #[inline(always)]
    fn zip<O>(self, rhs: Self, f: impl Fn(H, H) -> O) -> Pair<O> {
        Pair {
            lo: f(self.lo, rhs.lo),
            hi: f(self.hi, rhs.hi),
        }
    }
}

macro_rules! impl_pair_binop {
    ($($trait:ident :: $method:ident),* $(,)?) => {
        $(
            impl<H: Copy + $trait<Output = H>> $trait for Pair<H> {
                type Output = Self;
                #[inline(always)]
                fn $method(self, rhs: Self) -> Self {
                    self.zip(rhs, H::$method)
                }
            }
        )*
    };
}

impl_pair_binop!(
    Add::add,
    Sub::sub,
    Mul::mul,
    Div::div,
    BitAnd::bitand,
    BitOr::bitor,
    BitXor::bitxor,
);

impl<H: Copy + Neg<Output = H>> Neg for Pair<H> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        self.map(H::neg)
    }
}

impl<H: Copy + Not<Output = H>> Not for Pair<H> {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        self.map(H::not)
    }
}

// ============================================================================
// Masks
// ============================================================================

impl<M> MaskPrimitives for Pair<M>
where
    M: MaskPrimitives,
    M::Bools: Concat<bool>,
{
    const LANES: usize = 2 * M::LANES;
    type Bools = <M::Bools as Concat<bool>>::Doubled;
    type Native = [M::Native; 2];

    #[inline(always)]
    fn splat(v: bool) -> Self {
        let half = M::splat(v);
        Self { lo: half, hi: half }
    }

    #[inline(always)]
    fn from_bools(lanes: Self::Bools) -> Self {
        let (lo, hi) = <M::Bools as Concat<bool>>::split(lanes);
        Self {
            lo: M::from_bools(lo),
            hi: M::from_bools(hi),
        }
    }

    #[inline(always)]
    fn to_bools(self) -> Self::Bools {
        <M::Bools as Concat<bool>>::concat(self.lo.to_bools(), self.hi.to_bools())
    }

    #[inline(always)]
    fn extract(self, idx: usize) -> bool {
        if idx < M::LANES {
            self.lo.extract(idx)
        } else {
            self.hi.extract(idx - M::LANES)
        }
    }

    #[inline(always)]
    fn insert(self, idx: usize, v: bool) -> Self {
        if idx < M::LANES {
            Self {
                lo: self.lo.insert(idx, v),
                hi: self.hi,
            }
        } else {
            Self {
                lo: self.lo,
                hi: self.hi.insert(idx - M::LANES, v),
            }
        }
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        self.zip(rhs, M::and_not)
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.lo.all() && self.hi.all()
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.lo.any() || self.hi.any()
    }

    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        Self {
            lo: M::select(mask.lo, if_true.lo, if_false.lo),
            hi: M::select(mask.hi, if_true.hi, if_false.hi),
        }
    }

    #[inline(always)]
    fn to_bitmask(self) -> u32 {
        self.lo.to_bitmask() | (self.hi.to_bitmask() << M::LANES)
    }

    #[inline(always)]
    fn from_bitmask(bits: u32) -> Self {
        let half_mask = (1u32 << M::LANES) - 1;
        Self {
            lo: M::from_bitmask(bits & half_mask),
            hi: M::from_bitmask((bits >> M::LANES) & half_mask),
        }
    }

    #[inline(always)]
    fn from_native(native: [M::Native; 2]) -> Self {
        let [lo, hi] = native;
        Self {
            lo: M::from_native(lo),
            hi: M::from_native(hi),
        }
    }

    #[inline(always)]
    fn to_native(self) -> [M::Native; 2] {
        [self.lo.to_native(), self.hi.to_native()]
    }
}

// ============================================================================
// Floats
// ============================================================================

impl<H> Primitives for Pair<H>
where
    H: Primitives,
    H::Array: Concat<f32>,
    <H::Mask as MaskPrimitives>::Bools: Concat<bool>,
{
    const LANES: usize = 2 * H::LANES;
    type Mask = Pair<H::Mask>;
    type Array = <H::Array as Concat<f32>>::Doubled;
    type Native = [H::Native; 2];

    #[inline(always)]
    fn splat(v: f32) -> Self {
        let half = H::splat(v);
        Self { lo: half, hi: half }
    }

    #[inline(always)]
    fn splat_bits(bits: u32) -> Self {
        let half = H::splat_bits(bits);
        Self { lo: half, hi: half }
    }

    #[inline(always)]
    fn from_array(lanes: Self::Array) -> Self {
        let (lo, hi) = <H::Array as Concat<f32>>::split(lanes);
        Self {
            lo: H::from_array(lo),
            hi: H::from_array(hi),
        }
    }

    #[inline(always)]
    fn to_array(self) -> Self::Array {
        <H::Array as Concat<f32>>::concat(self.lo.to_array(), self.hi.to_array())
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= Self::LANES);
        let (lo, hi) = src.split_at(H::LANES);
        Self {
            lo: H::load(lo),
            hi: H::load(hi),
        }
    }

    #[inline(always)]
    fn load_partial(src: &[f32], n: usize) -> Self {
        if n <= H::LANES {
            Self {
                lo: H::load_partial(src, n),
                hi: H::splat(0.0),
            }
        } else {
            let (lo, hi) = src.split_at(H::LANES);
            Self {
                lo: H::load(lo),
                hi: H::load_partial(hi, n - H::LANES),
            }
        }
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= Self::LANES);
        let (lo, hi) = dst.split_at_mut(H::LANES);
        self.lo.store(lo);
        self.hi.store(hi);
    }

    #[inline(always)]
    fn store_partial(self, dst: &mut [f32], n: usize) {
        if n <= H::LANES {
            self.lo.store_partial(dst, n);
        } else {
            let (lo, hi) = dst.split_at_mut(H::LANES);
            self.lo.store(lo);
            self.hi.store_partial(hi, n - H::LANES);
        }
    }

    #[inline(always)]
    fn extract(self, idx: usize) -> f32 {
        if idx < H::LANES {
            self.lo.extract(idx)
        } else {
            self.hi.extract(idx - H::LANES)
        }
    }

    #[inline(always)]
    fn insert(self, idx: usize, v: f32) -> Self {
        if idx < H::LANES {
            Self {
                lo: self.lo.insert(idx, v),
                hi: self.hi,
            }
        } else {
            Self {
                lo: self.lo,
                hi: self.hi.insert(idx - H::LANES, v),
            }
        }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self::Mask {
        self.zip(rhs, H::cmp_eq)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self::Mask {
        self.zip(rhs, H::cmp_ne)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self::Mask {
        self.zip(rhs, H::cmp_lt)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self::Mask {
        self.zip(rhs, H::cmp_le)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self::Mask {
        self.zip(rhs, H::cmp_gt)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self::Mask {
        self.zip(rhs, H::cmp_ge)
    }

    #[inline(always)]
    fn select(mask: Self::Mask, if_true: Self, if_false: Self) -> Self {
        Self {
            lo: H::select(mask.lo, if_true.lo, if_false.lo),
            hi: H::select(mask.hi, if_true.hi, if_false.hi),
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, H::min)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, H::max)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(H::abs)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map(H::sqrt)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        self.map(H::floor)
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        self.map(H::ceil)
    }

    #[inline(always)]
    fn round(self) -> Self {
        self.map(H::round)
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self {
            lo: self.lo.mul_add(b.lo, c.lo),
            hi: self.hi.mul_add(b.hi, c.hi),
        }
    }

    #[inline(always)]
    fn reduce_add(self) -> f32 {
        self.lo.reduce_add() + self.hi.reduce_add()
    }

    #[inline(always)]
    fn reduce_max(self) -> f32 {
        max_lane(self.lo.reduce_max(), self.hi.reduce_max())
    }

    #[inline(always)]
    fn reduce_min(self) -> f32 {
        min_lane(self.lo.reduce_min(), self.hi.reduce_min())
    }

    #[inline(always)]
    fn from_native(native: [H::Native; 2]) -> Self {
        let [lo, hi] = native;
        Self {
            lo: H::from_native(lo),
            hi: H::from_native(hi),
        }
    }

    #[inline(always)]
    fn to_native(self) -> [H::Native; 2] {
        [self.lo.to_native(), self.hi.to_native()]
    }
}

impl<H> Transcendentals for Pair<H>
where
    H: Transcendentals,
    H::Array: Concat<f32>,
    <H::Mask as MaskPrimitives>::Bools: Concat<bool>,
{
    #[inline]
    fn sin(self) -> Self {
        self.map(H::sin)
    }

    #[inline]
    fn cos(self) -> Self {
        self.map(H::cos)
    }

    #[inline]
    fn tan(self) -> Self {
        self.map(H::tan)
    }

    #[inline]
    fn asin(self) -> Self {
        self.map(H::asin)
    }

    #[inline]
    fn acos(self) -> Self {
        self.map(H::acos)
    }

    #[inline]
    fn atan(self) -> Self {
        self.map(H::atan)
    }

    #[inline]
    fn atan2(self, x: Self) -> Self {
        self.zip(x, H::atan2)
    }
}
