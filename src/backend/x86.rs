//! x86_64 backends.
//!
//! - [`Narrow`]: 128-bit SSE2 registers. SSE2 is part of the x86_64 baseline,
//!   so this tier is always available on x86_64. SSE4.1 rounding, blend and
//!   insert instructions are used when the target enables them.
//! - [`Wide`]: 256-bit AVX registers for the 8-lane types, SSE for the 4-lane
//!   ones. Requires `target_feature = "avx"`; uses FMA when enabled.

#[cfg(target_feature = "avx")]
use super::compounds::poly;
use super::pair::Pair;
use super::primitives::{MaskPrimitives, Primitives};
#[cfg(target_feature = "avx")]
use super::Halves;
use super::{Backend, Transcendentals};
use crate::config::Tier;
use crate::{BoolVector, FloatVector};
use core::arch::x86_64::*;
use core::fmt::{Debug, Formatter};
use core::ops::*;

#[cfg(not(target_feature = "sse4.1"))]
const MAGIC_ROUND: f32 = 8_388_608.0; // 2^23

#[inline(always)]
unsafe fn sign_mask_ps() -> __m128 {
    _mm_castsi128_ps(_mm_set1_epi32(i32::MIN))
}

// ============================================================================
// Narrow (SSE2) Backend
// ============================================================================

/// 128-bit tier marker.
#[derive(Copy, Clone, Debug, Default)]
pub struct Narrow;

impl Backend for Narrow {
    const TIER: Tier = Tier::Narrow;
    type M4 = Mask4;
    type F4 = F32x4;
    type M8 = Pair<Mask4>;
    type F8 = Pair<F32x4>;
    type M16 = Pair<Pair<Mask4>>;
    type F16 = Pair<Pair<F32x4>>;
}

// ============================================================================
// Mask4 - 4-lane mask for SSE (float-based, no separate mask unit)
// ============================================================================

/// 4-lane mask for SSE.
///
/// There is no separate mask register file below AVX-512, so masks are float
/// registers where each lane is all-1s (true) or all-0s (false).
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Mask4(__m128);

impl Default for Mask4 {
    fn default() -> Self {
        unsafe { Self(_mm_setzero_ps()) }
    }
}

impl Debug for Mask4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Mask4({:04b})", self.to_bitmask())
    }
}

impl MaskPrimitives for Mask4 {
    const LANES: usize = 4;
    type Bools = [bool; 4];
    type Native = __m128i;

    #[inline(always)]
    fn splat(v: bool) -> Self {
        unsafe { Self(_mm_castsi128_ps(_mm_set1_epi32(-(v as i32)))) }
    }

    #[inline(always)]
    fn from_bools(lanes: [bool; 4]) -> Self {
        let [a, b, c, d] = lanes.map(|v| -(v as i32));
        unsafe { Self(_mm_castsi128_ps(_mm_setr_epi32(a, b, c, d))) }
    }

    #[inline(always)]
    fn to_bools(self) -> [bool; 4] {
        let bits = self.to_bitmask();
        [0, 1, 2, 3].map(|i| bits & (1 << i) != 0)
    }

    #[inline(always)]
    fn extract(self, idx: usize) -> bool {
        (self.to_bitmask() >> idx) & 1 != 0
    }

    #[inline(always)]
    fn insert(self, idx: usize, v: bool) -> Self {
        Self::select(Self::from_bitmask(1 << idx), Self::splat(v), self)
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        // _mm_andnot_ps(a, b) computes (!a) & b
        unsafe { Self(_mm_andnot_ps(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.to_bitmask() == 0xF
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.to_bitmask() != 0
    }

    #[inline(always)]
    fn to_bitmask(self) -> u32 {
        unsafe { _mm_movemask_ps(self.0) as u32 }
    }

    #[inline(always)]
    fn from_bitmask(bits: u32) -> Self {
        unsafe {
            let lanes = _mm_setr_epi32(1, 2, 4, 8);
            let set = _mm_and_si128(_mm_set1_epi32(bits as i32), lanes);
            Self(_mm_castsi128_ps(_mm_cmpeq_epi32(set, lanes)))
        }
    }

    #[inline(always)]
    fn from_native(native: __m128i) -> Self {
        unsafe { Self(_mm_castsi128_ps(native)) }
    }

    #[inline(always)]
    fn to_native(self) -> __m128i {
        unsafe { _mm_castps_si128(self.0) }
    }
}

impl BitAnd for Mask4 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(self.0, rhs.0)) }
    }
}

impl BitOr for Mask4 {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_or_ps(self.0, rhs.0)) }
    }
}

impl BitXor for Mask4 {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_xor_ps(self.0, rhs.0)) }
    }
}

impl Not for Mask4 {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        unsafe {
            let all_ones = _mm_castsi128_ps(_mm_set1_epi32(-1));
            Self(_mm_xor_ps(self.0, all_ones))
        }
    }
}

// ============================================================================
// F32x4 - 4-lane f32 SIMD vector (SSE2)
// ============================================================================

/// 4-lane f32 SIMD vector for SSE.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x4(__m128);

impl Default for F32x4 {
    fn default() -> Self {
        unsafe { Self(_mm_setzero_ps()) }
    }
}

impl Debug for F32x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "F32x4({:?})", self.to_array())
    }
}

/// SSE2 floor: truncate, step down where truncation went up, keep the sign of zero.
#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
unsafe fn floor_sse2(x: __m128) -> __m128 {
    let sign = _mm_and_ps(x, sign_mask_ps());
    let small = _mm_cmplt_ps(_mm_andnot_ps(sign_mask_ps(), x), _mm_set1_ps(MAGIC_ROUND));
    let trunc = _mm_cvtepi32_ps(_mm_cvttps_epi32(x));
    let step = _mm_and_ps(_mm_cmplt_ps(x, trunc), _mm_set1_ps(1.0));
    let rounded = _mm_or_ps(_mm_sub_ps(trunc, step), sign);
    _mm_or_ps(_mm_and_ps(small, rounded), _mm_andnot_ps(small, x))
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
unsafe fn ceil_sse2(x: __m128) -> __m128 {
    let sign = _mm_and_ps(x, sign_mask_ps());
    let small = _mm_cmplt_ps(_mm_andnot_ps(sign_mask_ps(), x), _mm_set1_ps(MAGIC_ROUND));
    let trunc = _mm_cvtepi32_ps(_mm_cvttps_epi32(x));
    let step = _mm_and_ps(_mm_cmpgt_ps(x, trunc), _mm_set1_ps(1.0));
    let rounded = _mm_or_ps(_mm_add_ps(trunc, step), sign);
    _mm_or_ps(_mm_and_ps(small, rounded), _mm_andnot_ps(small, x))
}

/// Ties-to-even via the 2^23 trick; lanes at or above 2^23 (and NaN) pass through.
#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
unsafe fn round_sse2(x: __m128) -> __m128 {
    let magic = _mm_set1_ps(MAGIC_ROUND);
    let sign = _mm_and_ps(x, sign_mask_ps());
    let ax = _mm_andnot_ps(sign_mask_ps(), x);
    let small = _mm_cmplt_ps(ax, magic);
    let rounded = _mm_or_ps(_mm_sub_ps(_mm_add_ps(ax, magic), magic), sign);
    _mm_or_ps(_mm_and_ps(small, rounded), _mm_andnot_ps(small, x))
}

impl Primitives for F32x4 {
    const LANES: usize = 4;
    type Mask = Mask4;
    type Array = [f32; 4];
    type Native = __m128;

    #[inline(always)]
    fn splat(v: f32) -> Self {
        unsafe { Self(_mm_set1_ps(v)) }
    }

    #[inline(always)]
    fn splat_bits(bits: u32) -> Self {
        unsafe { Self(_mm_castsi128_ps(_mm_set1_epi32(bits as i32))) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        unsafe { Self(_mm_loadu_ps(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut arr = [0.0f32; 4];
        unsafe { _mm_storeu_ps(arr.as_mut_ptr(), self.0) };
        arr
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= Self::LANES);
        unsafe { Self(_mm_loadu_ps(src.as_ptr())) }
    }

    #[inline(always)]
    fn load_partial(src: &[f32], n: usize) -> Self {
        assert!(src.len() >= n.min(Self::LANES));
        unsafe {
            Self(match n {
                0 => _mm_setzero_ps(),
                1 => _mm_load_ss(src.as_ptr()),
                2 => _mm_setr_ps(src[0], src[1], 0.0, 0.0),
                3 => _mm_movelh_ps(
                    _mm_setr_ps(src[0], src[1], 0.0, 0.0),
                    _mm_load_ss(src.as_ptr().add(2)),
                ),
                _ => _mm_loadu_ps(src.as_ptr()),
            })
        }
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= Self::LANES);
        unsafe { _mm_storeu_ps(dst.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_partial(self, dst: &mut [f32], n: usize) {
        assert!(dst.len() >= n.min(Self::LANES));
        unsafe {
            let p = dst.as_mut_ptr();
            match n {
                0 => {}
                1 => _mm_store_ss(p, self.0),
                2 | 3 => {
                    _mm_store_ss(p, self.0);
                    _mm_store_ss(p.add(1), _mm_shuffle_ps::<0b01_01_01_01>(self.0, self.0));
                    if n == 3 {
                        _mm_store_ss(p.add(2), _mm_movehl_ps(self.0, self.0));
                    }
                }
                _ => _mm_storeu_ps(p, self.0),
            }
        }
    }

    #[inline(always)]
    fn extract(self, idx: usize) -> f32 {
        self.to_array()[idx]
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline(always)]
    fn insert(self, idx: usize, v: f32) -> Self {
        unsafe {
            let v = _mm_set1_ps(v);
            Self(match idx {
                0 => _mm_blend_ps::<0b0001>(self.0, v),
                1 => _mm_blend_ps::<0b0010>(self.0, v),
                2 => _mm_blend_ps::<0b0100>(self.0, v),
                _ => _mm_blend_ps::<0b1000>(self.0, v),
            })
        }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline(always)]
    fn insert(self, idx: usize, v: f32) -> Self {
        let mut arr = self.to_array();
        arr[idx] = v;
        Self::from_array(arr)
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Mask4 {
        unsafe { Mask4(_mm_cmpeq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Mask4 {
        unsafe { Mask4(_mm_cmpneq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Mask4 {
        unsafe { Mask4(_mm_cmplt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Mask4 {
        unsafe { Mask4(_mm_cmple_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Mask4 {
        unsafe { Mask4(_mm_cmpgt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Mask4 {
        unsafe { Mask4(_mm_cmpge_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Mask4, if_true: Self, if_false: Self) -> Self {
        unsafe {
            // (mask & if_true) | (!mask & if_false)
            let t = _mm_and_ps(mask.0, if_true.0);
            let f = _mm_andnot_ps(mask.0, if_false.0);
            Self(_mm_or_ps(t, f))
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Self(_mm_andnot_ps(sign_mask_ps(), self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(_mm_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        #[cfg(target_feature = "sse4.1")]
        unsafe {
            Self(_mm_floor_ps(self.0))
        }
        #[cfg(not(target_feature = "sse4.1"))]
        unsafe {
            Self(floor_sse2(self.0))
        }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        #[cfg(target_feature = "sse4.1")]
        unsafe {
            Self(_mm_ceil_ps(self.0))
        }
        #[cfg(not(target_feature = "sse4.1"))]
        unsafe {
            Self(ceil_sse2(self.0))
        }
    }

    #[inline(always)]
    fn round(self) -> Self {
        #[cfg(target_feature = "sse4.1")]
        unsafe {
            Self(_mm_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0))
        }
        #[cfg(not(target_feature = "sse4.1"))]
        unsafe {
            Self(round_sse2(self.0))
        }
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        #[cfg(target_feature = "fma")]
        unsafe {
            Self(_mm_fmadd_ps(self.0, b.0, c.0))
        }
        #[cfg(not(target_feature = "fma"))]
        {
            self * b + c
        }
    }

    #[inline(always)]
    fn reduce_add(self) -> f32 {
        unsafe {
            let hi = _mm_movehl_ps(self.0, self.0);
            let sums = _mm_add_ps(self.0, hi);
            let odd = _mm_shuffle_ps::<0b00_00_00_01>(sums, sums);
            _mm_cvtss_f32(_mm_add_ss(sums, odd))
        }
    }

    #[inline(always)]
    fn reduce_max(self) -> f32 {
        unsafe {
            let hi = _mm_movehl_ps(self.0, self.0);
            let m = _mm_max_ps(self.0, hi);
            let odd = _mm_shuffle_ps::<0b00_00_00_01>(m, m);
            _mm_cvtss_f32(_mm_max_ss(m, odd))
        }
    }

    #[inline(always)]
    fn reduce_min(self) -> f32 {
        unsafe {
            let hi = _mm_movehl_ps(self.0, self.0);
            let m = _mm_min_ps(self.0, hi);
            let odd = _mm_shuffle_ps::<0b00_00_00_01>(m, m);
            _mm_cvtss_f32(_mm_min_ss(m, odd))
        }
    }

    #[inline(always)]
    fn from_native(native: __m128) -> Self {
        Self(native)
    }

    #[inline(always)]
    fn to_native(self) -> __m128 {
        self.0
    }
}

impl Transcendentals for F32x4 {}

impl Add for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm_add_ps(self.0, rhs.0)) }
    }
}

impl Sub for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm_sub_ps(self.0, rhs.0)) }
    }
}

impl Mul for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm_mul_ps(self.0, rhs.0)) }
    }
}

impl Div for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm_div_ps(self.0, rhs.0)) }
    }
}

impl BitAnd for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { Self(_mm_and_ps(self.0, rhs.0)) }
    }
}

impl BitOr for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_or_ps(self.0, rhs.0)) }
    }
}

impl BitXor for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { Self(_mm_xor_ps(self.0, rhs.0)) }
    }
}

impl Neg for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        // Flip sign bit via XOR with -0.0
        unsafe { Self(_mm_xor_ps(self.0, sign_mask_ps())) }
    }
}

impl From<__m128> for FloatVector<F32x4> {
    #[inline(always)]
    fn from(native: __m128) -> Self {
        Self::from_native(native)
    }
}

impl From<FloatVector<F32x4>> for __m128 {
    #[inline(always)]
    fn from(v: FloatVector<F32x4>) -> Self {
        v.to_native()
    }
}

impl From<__m128i> for BoolVector<Mask4> {
    #[inline(always)]
    fn from(native: __m128i) -> Self {
        Self::from_native(native)
    }
}

impl From<BoolVector<Mask4>> for __m128i {
    #[inline(always)]
    fn from(v: BoolVector<Mask4>) -> Self {
        v.to_native()
    }
}

// ============================================================================
// Wide (AVX) Backend
// ============================================================================

/// 256-bit tier marker.
#[cfg(target_feature = "avx")]
#[derive(Copy, Clone, Debug, Default)]
pub struct Wide;

#[cfg(target_feature = "avx")]
impl Backend for Wide {
    const TIER: Tier = Tier::Wide;
    type M4 = Mask4;
    type F4 = F32x4;
    type M8 = Mask8;
    type F8 = F32x8;
    type M16 = Pair<Mask8>;
    type F16 = Pair<F32x8>;
}

// ============================================================================
// Mask8 - 8-lane mask for AVX
// ============================================================================

/// 8-lane mask for AVX. Same float-register encoding as [`Mask4`].
#[cfg(target_feature = "avx")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Mask8(__m256);

#[cfg(target_feature = "avx")]
impl Default for Mask8 {
    fn default() -> Self {
        unsafe { Self(_mm256_setzero_ps()) }
    }
}

#[cfg(target_feature = "avx")]
impl Debug for Mask8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Mask8({:08b})", self.to_bitmask())
    }
}

#[cfg(target_feature = "avx")]
impl Halves for Mask8 {
    type Half = Mask4;

    #[inline(always)]
    fn join(lo: Mask4, hi: Mask4) -> Self {
        unsafe { Self(_mm256_set_m128(hi.0, lo.0)) }
    }

    #[inline(always)]
    fn split(self) -> (Mask4, Mask4) {
        unsafe {
            (
                Mask4(_mm256_castps256_ps128(self.0)),
                Mask4(_mm256_extractf128_ps::<1>(self.0)),
            )
        }
    }
}

#[cfg(target_feature = "avx")]
impl MaskPrimitives for Mask8 {
    const LANES: usize = 8;
    type Bools = [bool; 8];
    type Native = __m256;

    #[inline(always)]
    fn splat(v: bool) -> Self {
        unsafe { Self(_mm256_castsi256_ps(_mm256_set1_epi32(-(v as i32)))) }
    }

    #[inline(always)]
    fn from_bools(lanes: [bool; 8]) -> Self {
        let [a, b, c, d, e, f, g, h] = lanes.map(|v| -(v as i32));
        unsafe { Self(_mm256_castsi256_ps(_mm256_setr_epi32(a, b, c, d, e, f, g, h))) }
    }

    #[inline(always)]
    fn to_bools(self) -> [bool; 8] {
        let bits = self.to_bitmask();
        [0, 1, 2, 3, 4, 5, 6, 7].map(|i| bits & (1 << i) != 0)
    }

    #[inline(always)]
    fn extract(self, idx: usize) -> bool {
        (self.to_bitmask() >> idx) & 1 != 0
    }

    #[inline(always)]
    fn insert(self, idx: usize, v: bool) -> Self {
        Self::select(Self::from_bitmask(1 << idx), Self::splat(v), self)
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_andnot_ps(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.to_bitmask() == 0xFF
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.to_bitmask() != 0
    }

    #[inline(always)]
    fn to_bitmask(self) -> u32 {
        unsafe { _mm256_movemask_ps(self.0) as u32 }
    }

    #[inline(always)]
    fn from_bitmask(bits: u32) -> Self {
        // No 256-bit integer compare below AVX2: build from two 128-bit halves.
        Self::join(Mask4::from_bitmask(bits & 0xF), Mask4::from_bitmask((bits >> 4) & 0xF))
    }

    #[inline(always)]
    fn from_native(native: __m256) -> Self {
        Self(native)
    }

    #[inline(always)]
    fn to_native(self) -> __m256 {
        self.0
    }
}

#[cfg(target_feature = "avx")]
impl BitAnd for Mask8 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_and_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl BitOr for Mask8 {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_or_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl BitXor for Mask8 {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_xor_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl Not for Mask8 {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        unsafe {
            let all_ones = _mm256_castsi256_ps(_mm256_set1_epi32(-1));
            Self(_mm256_xor_ps(self.0, all_ones))
        }
    }
}

// ============================================================================
// F32x8 - 8-lane f32 SIMD vector (AVX)
// ============================================================================

/// 8-lane f32 SIMD vector for AVX.
#[cfg(target_feature = "avx")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x8(__m256);

#[cfg(target_feature = "avx")]
impl Default for F32x8 {
    fn default() -> Self {
        unsafe { Self(_mm256_setzero_ps()) }
    }
}

#[cfg(target_feature = "avx")]
impl Debug for F32x8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "F32x8({:?})", self.to_array())
    }
}

#[cfg(target_feature = "avx")]
#[inline(always)]
unsafe fn sign_mask_256() -> __m256 {
    _mm256_castsi256_ps(_mm256_set1_epi32(i32::MIN))
}

#[cfg(target_feature = "avx")]
impl Halves for F32x8 {
    type Half = F32x4;

    #[inline(always)]
    fn join(lo: F32x4, hi: F32x4) -> Self {
        unsafe { Self(_mm256_set_m128(hi.0, lo.0)) }
    }

    #[inline(always)]
    fn split(self) -> (F32x4, F32x4) {
        unsafe {
            (
                F32x4(_mm256_castps256_ps128(self.0)),
                F32x4(_mm256_extractf128_ps::<1>(self.0)),
            )
        }
    }
}

#[cfg(target_feature = "avx")]
impl Primitives for F32x8 {
    const LANES: usize = 8;
    type Mask = Mask8;
    type Array = [f32; 8];
    type Native = __m256;

    #[inline(always)]
    fn splat(v: f32) -> Self {
        unsafe { Self(_mm256_set1_ps(v)) }
    }

    #[inline(always)]
    fn splat_bits(bits: u32) -> Self {
        unsafe { Self(_mm256_castsi256_ps(_mm256_set1_epi32(bits as i32))) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 8]) -> Self {
        unsafe { Self(_mm256_loadu_ps(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 8] {
        let mut arr = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(arr.as_mut_ptr(), self.0) };
        arr
    }

    #[inline(always)]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= Self::LANES);
        unsafe { Self(_mm256_loadu_ps(src.as_ptr())) }
    }

    #[inline(always)]
    fn load_partial(src: &[f32], n: usize) -> Self {
        match n {
            0 => Self::default(),
            1..=4 => Self::join(F32x4::load_partial(src, n), F32x4::default()),
            5..=7 => Self::join(F32x4::load(src), F32x4::load_partial(&src[4..], n - 4)),
            _ => Self::load(src),
        }
    }

    #[inline(always)]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= Self::LANES);
        unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_partial(self, dst: &mut [f32], n: usize) {
        let (lo, hi) = self.split();
        match n {
            0..=4 => lo.store_partial(dst, n),
            5..=7 => {
                let (dst_lo, dst_hi) = dst.split_at_mut(4);
                lo.store(dst_lo);
                hi.store_partial(dst_hi, n - 4);
            }
            _ => self.store(dst),
        }
    }

    #[inline(always)]
    fn extract(self, idx: usize) -> f32 {
        self.to_array()[idx]
    }

    #[inline(always)]
    fn insert(self, idx: usize, v: f32) -> Self {
        unsafe {
            let v = _mm256_set1_ps(v);
            Self(match idx {
                0 => _mm256_blend_ps::<0b0000_0001>(self.0, v),
                1 => _mm256_blend_ps::<0b0000_0010>(self.0, v),
                2 => _mm256_blend_ps::<0b0000_0100>(self.0, v),
                3 => _mm256_blend_ps::<0b0000_1000>(self.0, v),
                4 => _mm256_blend_ps::<0b0001_0000>(self.0, v),
                5 => _mm256_blend_ps::<0b0010_0000>(self.0, v),
                6 => _mm256_blend_ps::<0b0100_0000>(self.0, v),
                _ => _mm256_blend_ps::<0b1000_0000>(self.0, v),
            })
        }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Mask8 {
        unsafe { Mask8(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Mask8 {
        // Unordered, to match cmpneqps.
        unsafe { Mask8(_mm256_cmp_ps::<_CMP_NEQ_UQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Mask8 {
        unsafe { Mask8(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Mask8 {
        unsafe { Mask8(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Mask8 {
        unsafe { Mask8(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Mask8 {
        unsafe { Mask8(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Mask8, if_true: Self, if_false: Self) -> Self {
        // Bitwise rather than blendv, which only reads the sign bit.
        unsafe {
            let t = _mm256_and_ps(mask.0, if_true.0);
            let f = _mm256_andnot_ps(mask.0, if_false.0);
            Self(_mm256_or_ps(t, f))
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Self(_mm256_andnot_ps(sign_mask_256(), self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Self(_mm256_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Self(_mm256_floor_ps(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { Self(_mm256_ceil_ps(self.0)) }
    }

    #[inline(always)]
    fn round(self) -> Self {
        unsafe { Self(_mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        #[cfg(target_feature = "fma")]
        unsafe {
            Self(_mm256_fmadd_ps(self.0, b.0, c.0))
        }
        #[cfg(not(target_feature = "fma"))]
        {
            self * b + c
        }
    }

    #[inline(always)]
    fn reduce_add(self) -> f32 {
        let (lo, hi) = self.split();
        (lo + hi).reduce_add()
    }

    #[inline(always)]
    fn reduce_max(self) -> f32 {
        let (lo, hi) = self.split();
        lo.max(hi).reduce_max()
    }

    #[inline(always)]
    fn reduce_min(self) -> f32 {
        let (lo, hi) = self.split();
        lo.min(hi).reduce_min()
    }

    #[inline(always)]
    fn from_native(native: __m256) -> Self {
        Self(native)
    }

    #[inline(always)]
    fn to_native(self) -> __m256 {
        self.0
    }
}

#[cfg(target_feature = "avx")]
impl Transcendentals for F32x8 {
    #[inline(always)]
    fn sin(self) -> Self {
        poly::sin(self)
    }

    #[inline(always)]
    fn cos(self) -> Self {
        poly::cos(self)
    }

    #[inline(always)]
    fn tan(self) -> Self {
        poly::tan(self)
    }

    #[inline(always)]
    fn asin(self) -> Self {
        poly::asin(self)
    }

    #[inline(always)]
    fn acos(self) -> Self {
        poly::acos(self)
    }

    #[inline(always)]
    fn atan(self) -> Self {
        poly::atan(self)
    }

    #[inline(always)]
    fn atan2(self, x: Self) -> Self {
        poly::atan2(self, x)
    }
}

#[cfg(target_feature = "avx")]
impl Add for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_add_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl Sub for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_sub_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl Mul for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_mul_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl Div for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_div_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl BitAnd for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_and_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl BitOr for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_or_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl BitXor for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_xor_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl Neg for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Self(_mm256_xor_ps(self.0, sign_mask_256())) }
    }
}

#[cfg(target_feature = "avx")]
impl From<__m256> for FloatVector<F32x8> {
    #[inline(always)]
    fn from(native: __m256) -> Self {
        Self::from_native(native)
    }
}

#[cfg(target_feature = "avx")]
impl From<FloatVector<F32x8>> for __m256 {
    #[inline(always)]
    fn from(v: FloatVector<F32x8>) -> Self {
        v.to_native()
    }
}

#[cfg(target_feature = "avx")]
impl From<__m256> for BoolVector<Mask8> {
    #[inline(always)]
    fn from(native: __m256) -> Self {
        Self::from_native(native)
    }
}

#[cfg(target_feature = "avx")]
impl From<BoolVector<Mask8>> for __m256 {
    #[inline(always)]
    fn from(v: BoolVector<Mask8>) -> Self {
        v.to_native()
    }
}
