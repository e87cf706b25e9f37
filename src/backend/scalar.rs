//! Scalar backend: four plain `f32` lanes, no SIMD.
//!
//! This is the reference every other tier is checked against.

use super::pair::Pair;
use super::primitives::{max_lane, min_lane, MaskPrimitives, Primitives};
use super::{Backend, Transcendentals};
use crate::config::Tier;
use core::fmt::{Debug, Formatter};
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

/// Scalar tier marker.
#[derive(Copy, Clone, Debug, Default)]
pub struct Scalar;

impl Backend for Scalar {
    const TIER: Tier = Tier::Scalar;
    type M4 = ScalarMask4;
    type F4 = ScalarF32x4;
    type M8 = Pair<ScalarMask4>;
    type F8 = Pair<ScalarF32x4>;
    type M16 = Pair<Pair<ScalarMask4>>;
    type F16 = Pair<Pair<ScalarF32x4>>;
}

const TRUE_LANE: u32 = u32::MAX;
const MAGIC_ROUND: f32 = 8_388_608.0; // 2^23: every f32 at or above it is integral

#[inline(always)]
fn lane_bits(v: bool) -> u32 {
    if v {
        TRUE_LANE
    } else {
        0
    }
}

/// Round half to even without touching the rounding mode.
#[inline(always)]
fn round_lane(x: f32) -> f32 {
    let ax = libm::fabsf(x);
    if ax < MAGIC_ROUND {
        libm::copysignf((ax + MAGIC_ROUND) - MAGIC_ROUND, x)
    } else {
        x
    }
}

// ============================================================================
// ScalarMask4
// ============================================================================

/// Four `u32` mask lanes, each `0` or `u32::MAX`.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct ScalarMask4([u32; 4]);

impl Debug for ScalarMask4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "ScalarMask4({:04b})", self.to_bitmask())
    }
}

impl ScalarMask4 {
    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        let [a0, a1, a2, a3] = self.0;
        let [b0, b1, b2, b3] = rhs.0;
        Self([f(a0, b0), f(a1, b1), f(a2, b2), f(a3, b3)])
    }
}

impl MaskPrimitives for ScalarMask4 {
    const LANES: usize = 4;
    type Bools = [bool; 4];
    type Native = [u32; 4];

    #[inline(always)]
    fn splat(v: bool) -> Self {
        Self([lane_bits(v); 4])
    }

    #[inline(always)]
    fn from_bools(lanes: [bool; 4]) -> Self {
        Self(lanes.map(lane_bits))
    }

    #[inline(always)]
    fn to_bools(self) -> [bool; 4] {
        self.0.map(|lane| lane != 0)
    }

    #[inline(always)]
    fn extract(self, idx: usize) -> bool {
        self.0[idx] != 0
    }

    #[inline(always)]
    fn insert(mut self, idx: usize, v: bool) -> Self {
        self.0[idx] = lane_bits(v);
        self
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & !b)
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.0.iter().all(|&lane| lane != 0)
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.0.iter().any(|&lane| lane != 0)
    }

    #[inline(always)]
    fn to_bitmask(self) -> u32 {
        self.0
            .iter()
            .enumerate()
            .fold(0, |bits, (i, &lane)| bits | (((lane != 0) as u32) << i))
    }

    #[inline(always)]
    fn from_bitmask(bits: u32) -> Self {
        Self([0, 1, 2, 3].map(|i| lane_bits(bits & (1 << i) != 0)))
    }

    #[inline(always)]
    fn from_native(native: [u32; 4]) -> Self {
        Self(native)
    }

    #[inline(always)]
    fn to_native(self) -> [u32; 4] {
        self.0
    }
}

impl BitAnd for ScalarMask4 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }
}

impl BitOr for ScalarMask4 {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a | b)
    }
}

impl BitXor for ScalarMask4 {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }
}

impl Not for ScalarMask4 {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Self(self.0.map(|lane| !lane))
    }
}

// ============================================================================
// ScalarF32x4
// ============================================================================

/// Four `f32` lanes evaluated one at a time.
#[derive(Copy, Clone, Default)]
#[repr(transparent)]
pub struct ScalarF32x4([f32; 4]);

impl Debug for ScalarF32x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "ScalarF32x4({:?})", self.0)
    }
}

impl ScalarF32x4 {
    #[inline(always)]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self(self.0.map(f))
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let [a0, a1, a2, a3] = self.0;
        let [b0, b1, b2, b3] = rhs.0;
        Self([f(a0, b0), f(a1, b1), f(a2, b2), f(a3, b3)])
    }

    #[inline(always)]
    fn zip_bits(self, rhs: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        self.zip(rhs, |a, b| f32::from_bits(f(a.to_bits(), b.to_bits())))
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(f32, f32) -> bool) -> ScalarMask4 {
        let [a0, a1, a2, a3] = self.0;
        let [b0, b1, b2, b3] = rhs.0;
        ScalarMask4([
            lane_bits(f(a0, b0)),
            lane_bits(f(a1, b1)),
            lane_bits(f(a2, b2)),
            lane_bits(f(a3, b3)),
        ])
    }
}

impl Primitives for ScalarF32x4 {
    const LANES: usize = 4;
    type Mask = ScalarMask4;
    type Array = [f32; 4];
    type Native = [f32; 4];

    #[inline(always)]
    fn splat(v: f32) -> Self {
        Self([v; 4])
    }

    #[inline(always)]
    fn splat_bits(bits: u32) -> Self {
        Self([f32::from_bits(bits); 4])
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        Self(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        self.0
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        let mut lanes = [0.0; 4];
        lanes.copy_from_slice(&src[..4]);
        Self(lanes)
    }

    #[inline(always)]
    fn load_partial(src: &[f32], n: usize) -> Self {
        let mut lanes = [0.0; 4];
        lanes[..n].copy_from_slice(&src[..n]);
        Self(lanes)
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        dst[..4].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn store_partial(self, dst: &mut [f32], n: usize) {
        dst[..n].copy_from_slice(&self.0[..n]);
    }

    #[inline(always)]
    fn extract(self, idx: usize) -> f32 {
        self.0[idx]
    }

    #[inline(always)]
    fn insert(mut self, idx: usize, v: f32) -> Self {
        self.0[idx] = v;
        self
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> ScalarMask4 {
        self.compare(rhs, |a, b| a == b)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> ScalarMask4 {
        self.compare(rhs, |a, b| a != b)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> ScalarMask4 {
        self.compare(rhs, |a, b| a < b)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> ScalarMask4 {
        self.compare(rhs, |a, b| a <= b)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> ScalarMask4 {
        self.compare(rhs, |a, b| a > b)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> ScalarMask4 {
        self.compare(rhs, |a, b| a >= b)
    }

    #[inline(always)]
    fn select(mask: ScalarMask4, if_true: Self, if_false: Self) -> Self {
        let [m0, m1, m2, m3] = mask.0;
        let [t0, t1, t2, t3] = if_true.0;
        let [f0, f1, f2, f3] = if_false.0;
        let pick = |m: u32, t: f32, f: f32| f32::from_bits((t.to_bits() & m) | (f.to_bits() & !m));
        Self([pick(m0, t0, f0), pick(m1, t1, f1), pick(m2, t2, f2), pick(m3, t3, f3)])
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, min_lane)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, max_lane)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(libm::fabsf)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map(libm::sqrtf)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        self.map(libm::floorf)
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        self.map(libm::ceilf)
    }

    #[inline(always)]
    fn round(self) -> Self {
        self.map(round_lane)
    }

    #[inline(always)]
    fn reduce_add(self) -> f32 {
        let [a, b, c, d] = self.0;
        ((a + b) + c) + d
    }

    #[inline(always)]
    fn reduce_max(self) -> f32 {
        let [a, b, c, d] = self.0;
        max_lane(max_lane(a, b), max_lane(c, d))
    }

    #[inline(always)]
    fn reduce_min(self) -> f32 {
        let [a, b, c, d] = self.0;
        min_lane(min_lane(a, b), min_lane(c, d))
    }

    #[inline(always)]
    fn from_native(native: [f32; 4]) -> Self {
        Self(native)
    }

    #[inline(always)]
    fn to_native(self) -> [f32; 4] {
        self.0
    }
}

impl Transcendentals for ScalarF32x4 {}

impl Add for ScalarF32x4 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Sub for ScalarF32x4 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Mul for ScalarF32x4 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a * b)
    }
}

impl Div for ScalarF32x4 {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a / b)
    }
}

impl Neg for ScalarF32x4 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl BitAnd for ScalarF32x4 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.zip_bits(rhs, |a, b| a & b)
    }
}

impl BitOr for ScalarF32x4 {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.zip_bits(rhs, |a, b| a | b)
    }
}

impl BitXor for ScalarF32x4 {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip_bits(rhs, |a, b| a ^ b)
    }
}
