//! Transcendental functions built on top of [`Primitives`].
//!
//! The default methods of [`Transcendentals`] evaluate libm once per lane, so
//! they agree with `libm` bit for bit. Tiers that prefer throughput override
//! them with the polynomial kernels in [`poly`], which are built only from
//! primitives and stay within about 1e-6 of libm on their working ranges.

#![allow(clippy::excessive_precision)]

use super::primitives::Primitives;

/// Elementwise trigonometry.
pub trait Transcendentals: Primitives {
    #[inline]
    fn sin(self) -> Self {
        map_lanes(self, libm::sinf)
    }

    #[inline]
    fn cos(self) -> Self {
        map_lanes(self, libm::cosf)
    }

    #[inline]
    fn tan(self) -> Self {
        map_lanes(self, libm::tanf)
    }

    #[inline]
    fn asin(self) -> Self {
        map_lanes(self, libm::asinf)
    }

    #[inline]
    fn acos(self) -> Self {
        map_lanes(self, libm::acosf)
    }

    #[inline]
    fn atan(self) -> Self {
        map_lanes(self, libm::atanf)
    }

    /// Four-quadrant arctangent of `self / x`.
    #[inline]
    fn atan2(self, x: Self) -> Self {
        zip_lanes(self, x, libm::atan2f)
    }
}

#[inline(always)]
fn map_lanes<P: Primitives>(v: P, f: impl Fn(f32) -> f32) -> P {
    let mut lanes = v.to_array();
    for lane in lanes.as_mut() {
        *lane = f(*lane);
    }
    P::from_array(lanes)
}

#[inline(always)]
fn zip_lanes<P: Primitives>(a: P, b: P, f: impl Fn(f32, f32) -> f32) -> P {
    let mut lanes = a.to_array();
    let other = b.to_array();
    for (lane, &rhs) in lanes.as_mut().iter_mut().zip(other.as_ref()) {
        *lane = f(*lane, rhs);
    }
    P::from_array(lanes)
}

/// Polynomial approximations generic over any [`Primitives`] implementation.
///
/// Branch-free: every lane evaluates every path and the result is picked
/// with `select`.
pub mod poly {
    use super::Primitives;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const SIGN_BIT: u32 = 0x8000_0000;

    const FOUR_OVER_PI: f32 = 1.273_239_544_735_16;
    // pi/4 split in three parts for extended-precision range reduction.
    const DP1: f32 = 0.785_156_25;
    const DP2: f32 = 2.418_756_484_985_351_6e-4;
    const DP3: f32 = 3.774_894_977_445_941e-8;

    const SIN_P0: f32 = -1.951_529_589_1e-4;
    const SIN_P1: f32 = 8.332_160_873_6e-3;
    const SIN_P2: f32 = -1.666_665_461_1e-1;

    const COS_P0: f32 = 2.443_315_711_809_948e-5;
    const COS_P1: f32 = -1.388_731_625_493_765e-3;
    const COS_P2: f32 = 4.166_664_568_298_827e-2;

    const ATAN_P0: f32 = 8.053_744_495_38e-2;
    const ATAN_P1: f32 = -1.387_768_560_32e-1;
    const ATAN_P2: f32 = 1.997_771_064_78e-1;
    const ATAN_P3: f32 = -3.333_294_915_39e-1;
    const TAN_PI_8: f32 = 0.414_213_562_373_095;

    const ASIN_P0: f32 = 4.216_319_904_8e-2;
    const ASIN_P1: f32 = 2.418_131_104_9e-2;
    const ASIN_P2: f32 = 4.547_002_599_8e-2;
    const ASIN_P3: f32 = 7.495_300_268_6e-2;
    const ASIN_P4: f32 = 1.666_675_242_2e-1;

    #[inline(always)]
    fn sign_of<P: Primitives>(x: P) -> P {
        x & P::splat_bits(SIGN_BIT)
    }

    /// Lanes whose sign bit is set, including `-0.0` and negative NaNs.
    #[inline(always)]
    fn sign_set<P: Primitives>(x: P) -> P::Mask {
        (sign_of(x) | P::splat(1.0)).cmp_lt(P::splat(0.0))
    }

    /// `x mod m` for non-negative integral `x` and a power-of-two `m`.
    #[inline(always)]
    fn modulo<P: Primitives>(x: P, m: f32) -> P {
        x - (x * P::splat(1.0 / m)).floor() * P::splat(m)
    }

    /// Reduces `ax >= 0` to `[-pi/4, pi/4]`. Returns the even octant index and the remainder.
    #[inline(always)]
    fn reduce_octant<P: Primitives>(ax: P) -> (P, P) {
        let j = (ax * P::splat(FOUR_OVER_PI)).floor();
        let j = ((j + P::splat(1.0)) * P::splat(0.5)).floor() * P::splat(2.0);
        let r = j.mul_add(P::splat(-DP1), ax);
        let r = j.mul_add(P::splat(-DP2), r);
        let r = j.mul_add(P::splat(-DP3), r);
        (j, r)
    }

    #[inline(always)]
    fn sin_kernel<P: Primitives>(r: P) -> P {
        let z = r * r;
        let p = P::splat(SIN_P0)
            .mul_add(z, P::splat(SIN_P1))
            .mul_add(z, P::splat(SIN_P2));
        (p * z).mul_add(r, r)
    }

    #[inline(always)]
    fn cos_kernel<P: Primitives>(r: P) -> P {
        let z = r * r;
        let p = P::splat(COS_P0)
            .mul_add(z, P::splat(COS_P1))
            .mul_add(z, P::splat(COS_P2));
        (p * z * z) - P::splat(0.5) * z + P::splat(1.0)
    }

    /// Picks the kernel for octant `j` and negates the lanes in `flip`.
    #[inline(always)]
    fn octant_result<P: Primitives>(j: P, r: P, flip: P::Mask) -> P {
        let use_cos = modulo(j, 4.0).cmp_ge(P::splat(2.0));
        let y = P::select(use_cos, cos_kernel(r), sin_kernel(r));
        y ^ P::select(flip, P::splat_bits(SIGN_BIT), P::splat(0.0))
    }

    #[inline]
    pub fn sin<P: Primitives>(x: P) -> P {
        let (j, r) = reduce_octant(x.abs());
        let flip = modulo(j, 8.0).cmp_ge(P::splat(4.0));
        octant_result(j, r, flip) ^ sign_of(x)
    }

    #[inline]
    pub fn cos<P: Primitives>(x: P) -> P {
        let (j, r) = reduce_octant(x.abs());
        let j = j - P::splat(2.0);
        let flip = modulo(j, 8.0).cmp_lt(P::splat(4.0));
        octant_result(j, r, flip)
    }

    #[inline]
    pub fn tan<P: Primitives>(x: P) -> P {
        sin(x) / cos(x)
    }

    #[inline]
    pub fn atan2<P: Primitives>(y: P, x: P) -> P {
        let ax = x.abs();
        let ay = y.abs();

        // Fold into the first octant: t = min / max in [0, 1].
        let swapped = ay.cmp_gt(ax);
        let t = P::select(swapped, ax, ay) / P::select(swapped, ay, ax);
        // inf / inf lands on the diagonal.
        let inf = P::splat(f32::INFINITY);
        let both_inf = ax.cmp_eq(inf) & ay.cmp_eq(inf);
        let one = P::splat(1.0);
        let t = P::select(both_inf, one, t);

        let upper = t.cmp_ge(P::splat(TAN_PI_8));
        let z = P::select(upper, (t - one) / (t + one), t);
        let base = P::select(upper, P::splat(FRAC_PI_4), P::splat(0.0));

        let z2 = z * z;
        let p = P::splat(ATAN_P0)
            .mul_add(z2, P::splat(ATAN_P1))
            .mul_add(z2, P::splat(ATAN_P2))
            .mul_add(z2, P::splat(ATAN_P3));
        let mut res = base + (p * z2).mul_add(z, z);

        res = P::select(swapped, P::splat(FRAC_PI_2) - res, res);
        res = P::select(x.cmp_lt(P::splat(0.0)), P::splat(PI) - res, res);
        let origin = (x | y).cmp_eq(P::splat(0.0));
        let at_origin = P::select(sign_set(x), P::splat(PI), P::splat(0.0));
        res = P::select(origin, at_origin, res);
        res ^ sign_of(y)
    }

    #[inline]
    pub fn atan<P: Primitives>(x: P) -> P {
        atan2(x, P::splat(1.0))
    }

    /// asin of `|x|`'s reduced argument, plus the mask of lanes with `|x| > 0.5`.
    ///
    /// Those lanes hold `asin(sqrt((1 - |x|) / 2))`, the rest hold `asin(|x|)`.
    #[inline(always)]
    fn asin_reduced<P: Primitives>(ax: P) -> (P, P::Mask) {
        let half = P::splat(0.5);
        let upper = ax.cmp_gt(half);
        let w = half - half * ax;
        let z = P::select(upper, w, ax * ax);
        let r = P::select(upper, w.sqrt(), ax);
        let p = P::splat(ASIN_P0)
            .mul_add(z, P::splat(ASIN_P1))
            .mul_add(z, P::splat(ASIN_P2))
            .mul_add(z, P::splat(ASIN_P3))
            .mul_add(z, P::splat(ASIN_P4));
        ((p * z).mul_add(r, r), upper)
    }

    #[inline]
    pub fn asin<P: Primitives>(x: P) -> P {
        let (a, upper) = asin_reduced(x.abs());
        let res = P::select(upper, P::splat(FRAC_PI_2) - (a + a), a);
        res ^ sign_of(x)
    }

    #[inline]
    pub fn acos<P: Primitives>(x: P) -> P {
        let (a, upper) = asin_reduced(x.abs());
        let far = a + a;
        let far = P::select(x.cmp_lt(P::splat(0.0)), P::splat(PI) - far, far);
        let near = P::splat(FRAC_PI_2) - (a ^ sign_of(x));
        P::select(upper, far, near)
    }
}

#[cfg(test)]
mod tests {
    use super::poly;
    use crate::backend::primitives::Primitives;
    use crate::backend::scalar::ScalarF32x4;

    const TOL: f32 = 2e-6;

    fn check(name: &str, f: fn(ScalarF32x4) -> ScalarF32x4, reference: fn(f32) -> f32, lo: f32, hi: f32) {
        let steps = 2000;
        let mut max_err = 0.0f32;
        for i in 0..steps {
            let x = lo + (hi - lo) * (i as f32) / (steps - 1) as f32;
            let got = f(ScalarF32x4::splat(x)).extract(0);
            let want = reference(x);
            let err = (got - want).abs() / want.abs().max(1.0);
            max_err = max_err.max(err);
        }
        assert!(max_err < TOL, "{name}: max error {max_err:e} exceeds {TOL:e}");
    }

    #[test]
    fn sin_polynomial_tracks_libm() {
        check("sin", poly::sin, libm::sinf, -20.0, 20.0);
    }

    #[test]
    fn cos_polynomial_tracks_libm() {
        check("cos", poly::cos, libm::cosf, -20.0, 20.0);
    }

    #[test]
    fn tan_polynomial_tracks_libm() {
        check("tan", poly::tan, libm::tanf, -1.4, 1.4);
    }

    #[test]
    fn asin_polynomial_tracks_libm() {
        check("asin", poly::asin, libm::asinf, -1.0, 1.0);
    }

    #[test]
    fn acos_polynomial_tracks_libm() {
        check("acos", poly::acos, libm::acosf, -1.0, 1.0);
    }

    #[test]
    fn atan_polynomial_tracks_libm() {
        check("atan", poly::atan, libm::atanf, -50.0, 50.0);
    }

    #[test]
    fn atan2_covers_all_quadrants() {
        let points = [
            (1.0f32, 1.0f32),
            (1.0, -1.0),
            (-1.0, -1.0),
            (-1.0, 1.0),
            (0.5, 3.0),
            (3.0, 0.5),
            (-2.0, 0.25),
            (0.0, -1.0),
            (-0.0, -1.0),
            (1.0, 0.0),
        ];
        for (y, x) in points {
            let got = poly::atan2(ScalarF32x4::splat(y), ScalarF32x4::splat(x)).extract(0);
            let want = libm::atan2f(y, x);
            assert!(
                (got - want).abs() < TOL * 4.0,
                "atan2({y}, {x}) = {got}, expected {want}"
            );
        }
    }

    #[test]
    fn atan2_origin_is_zero() {
        let got = poly::atan2(ScalarF32x4::splat(0.0), ScalarF32x4::splat(0.0)).extract(0);
        assert_eq!(got, 0.0);
    }

    #[test]
    fn atan2_signed_zeros_and_infinities_match_libm() {
        let inf = f32::INFINITY;
        let points = [
            (0.0f32, -0.0f32),
            (-0.0, -0.0),
            (-0.0, 0.0),
            (0.0, -3.0),
            (inf, inf),
            (inf, -inf),
            (-inf, inf),
            (-inf, -inf),
            (inf, 2.0),
            (2.0, -inf),
            (-2.0, inf),
        ];
        for (y, x) in points {
            let got = poly::atan2(ScalarF32x4::splat(y), ScalarF32x4::splat(x)).extract(0);
            let want = libm::atan2f(y, x);
            assert!(
                (got - want).abs() < TOL * 4.0 && got.is_sign_negative() == want.is_sign_negative(),
                "atan2({y}, {x}) = {got}, expected {want}"
            );
        }
        let nan = poly::atan2(ScalarF32x4::splat(f32::NAN), ScalarF32x4::splat(-0.0)).extract(0);
        assert!(nan.is_nan());
    }

    #[test]
    fn asin_out_of_domain_is_nan() {
        assert!(poly::asin(ScalarF32x4::splat(1.5)).extract(0).is_nan());
        assert!(poly::acos(ScalarF32x4::splat(-1.5)).extract(0).is_nan());
    }

    #[test]
    fn sin_of_infinity_is_nan() {
        assert!(poly::sin(ScalarF32x4::splat(f32::INFINITY)).extract(0).is_nan());
    }
}
