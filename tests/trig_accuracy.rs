//! Accuracy of the transcendental functions against libm, on every tier.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

const TOLERANCE: f32 = 2e-6;

fn assert_close(op: &str, input: f32, want: f32, got: f32) {
    let error = (got - want).abs() / want.abs().max(1.0);
    assert!(
        error <= TOLERANCE,
        "{}({}) = {} but libm gives {} (error {:e})",
        op,
        input,
        got,
        want,
        error
    );
}

fn sample(lo: f32, hi: f32, count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| lo + (hi - lo) * i as f32 / (count - 1) as f32)
        .collect()
}

macro_rules! trig_tests {
    ($tier:ident) => {
        mod $tier {
            use super::*;
            use pixelflow_simd::ops;
            use pixelflow_simd::$tier::*;

            fn check(op: &str, xs: &[f32], f: impl Fn(Vec8f) -> Vec8f, reference: impl Fn(f32) -> f32) {
                for chunk in xs.chunks(8) {
                    let v = Vec8f::from_prefix(chunk);
                    let out = f(v).to_array();
                    for (i, &x) in chunk.iter().enumerate() {
                        assert_close(op, x, reference(x), out[i]);
                    }
                }
            }

            #[test]
            fn sin_and_cos() {
                let xs = sample(-4.0 * PI, 4.0 * PI, 257);
                check("sin", &xs, ops::sin, libm::sinf);
                check("cos", &xs, ops::cos, libm::cosf);
            }

            #[test]
            fn tan_away_from_poles() {
                let xs = sample(-1.4, 1.4, 129);
                check("tan", &xs, ops::tan, libm::tanf);
            }

            #[test]
            fn inverse_functions() {
                let unit = sample(-1.0, 1.0, 129);
                check("asin", &unit, ops::asin, libm::asinf);
                check("acos", &unit, ops::acos, libm::acosf);
                let wide = sample(-50.0, 50.0, 129);
                check("atan", &wide, ops::atan, libm::atanf);
            }

            #[test]
            fn atan2_quadrants() {
                let y = Vec4f::from_array([1.0, 1.0, -1.0, -1.0]);
                let x = Vec4f::from_array([1.0, -1.0, -1.0, 1.0]);
                let out = ops::atan2(y, x).to_array();
                let want = [FRAC_PI_4, 3.0 * FRAC_PI_4, -3.0 * FRAC_PI_4, -FRAC_PI_4];
                for i in 0..4 {
                    assert_close("atan2", i as f32, want[i], out[i]);
                }
            }

            #[test]
            fn atan2_axes_and_origin() {
                let y = Vec4f::from_array([0.0, 2.0, 0.0, -3.0]);
                let x = Vec4f::from_array([0.0, 0.0, -1.0, 0.0]);
                let out = y.atan2(x).to_array();
                assert_eq!(out[0], 0.0);
                assert_close("atan2", 1.0, FRAC_PI_2, out[1]);
                assert_close("atan2", 2.0, PI, out[2]);
                assert_close("atan2", 3.0, -FRAC_PI_2, out[3]);
            }

            #[test]
            fn atan2_matches_libm_on_a_grid() {
                let ys = sample(-3.0, 3.0, 16);
                let xs = sample(-2.5, 2.5, 16);
                let y = Vec16f::from_prefix(&ys);
                for &x0 in &xs {
                    let out = y.atan2(Vec16f::splat(x0)).to_array();
                    for (i, &y0) in ys.iter().enumerate() {
                        assert_close("atan2", y0, libm::atan2f(y0, x0), out[i]);
                    }
                }
            }

            #[test]
            fn nan_and_infinity_inputs() {
                let v = Vec8f::from_array([
                    f32::NAN,
                    f32::INFINITY,
                    f32::NEG_INFINITY,
                    2.0,
                    0.0,
                    -0.0,
                    -2.0,
                    f32::NAN,
                ]);
                let sin = v.sin();
                let cos = v.cos();
                assert!(sin.access(0).is_nan());
                assert!(sin.access(1).is_nan());
                assert!(cos.access(2).is_nan());
                assert!(v.asin().access(3).is_nan());
                assert!(v.acos().access(6).is_nan());
                assert_eq!(sin.access(5).to_bits(), (-0.0f32).to_bits());
                assert_eq!(cos.access(4), 1.0);

                let atan = v.atan();
                assert!(atan.access(0).is_nan());
                assert_close("atan", f32::INFINITY, FRAC_PI_2, atan.access(1));
                assert_close("atan", f32::NEG_INFINITY, -FRAC_PI_2, atan.access(2));
                assert_eq!(atan.access(5).to_bits(), (-0.0f32).to_bits());

                let wide = Vec16f::from_halves(v, -v);
                let out = wide.sin().to_array();
                assert!(out[8].is_nan() && out[9].is_nan() && out[15].is_nan());
                assert_eq!(out[12].to_bits(), (-0.0f32).to_bits());
            }

            #[test]
            fn atan2_signed_zeros_and_infinities() {
                let inf = f32::INFINITY;
                let ys = [0.0, -0.0, 0.0, -0.0, inf, inf, -inf, -inf, inf, -inf, 0.0, -0.0, 1.0, f32::NAN, -0.0, 3.0];
                let xs = [-0.0, -0.0, 0.0, 0.0, inf, -inf, inf, -inf, 5.0, -5.0, -inf, inf, -0.0, 1.0, -2.0, inf];
                let out8 = Vec8f::from_prefix(&ys).atan2(Vec8f::from_prefix(&xs)).to_array();
                let out16 = Vec16f::from_array(ys).atan2(Vec16f::from_array(xs)).to_array();
                for i in 0..16 {
                    let want = libm::atan2f(ys[i], xs[i]);
                    let got = out16[i];
                    if want.is_nan() {
                        assert!(got.is_nan(), "atan2({}, {}) = {}", ys[i], xs[i], got);
                        continue;
                    }
                    assert_close("atan2", ys[i], want, got);
                    assert_eq!(
                        got.is_sign_negative(),
                        want.is_sign_negative(),
                        "atan2({}, {}) sign",
                        ys[i],
                        xs[i]
                    );
                    if i < 8 {
                        assert_eq!(out8[i].to_bits(), got.to_bits(), "lane {}", i);
                    }
                }
            }
        }
    };
}

trig_tests!(scalar);
#[cfg(target_arch = "x86_64")]
trig_tests!(narrow);
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
trig_tests!(wide);
