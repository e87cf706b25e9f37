//! Cross-tier self check.
//!
//! Runs a fixed battery of inputs through one backend and through the scalar
//! backend and compares the results. Arithmetic, comparisons, selection and
//! rounding must match bit for bit (any NaN matches any NaN). Transcendentals,
//! fused multiply-add and horizontal sums are held to a relative tolerance.

use crate::backend::scalar::Scalar;
use crate::backend::{Backend, MaskPrimitives, Primitives, Transcendentals};
use crate::config::Tier;
use crate::error::SimdError;
use log::debug;
use serde::Serialize;

/// Relative tolerance for the transcendental kernels, scaled by `max(|expected|, 1)`.
pub const TRIG_TOLERANCE: f32 = 2e-6;

/// Relative tolerance for results whose rounding may legitimately differ
/// (fused multiply-add, horizontal sums).
pub const ARITH_TOLERANCE: f32 = 4e-6;

/// Outcome of a successful [`verify_against_scalar`] run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyReport {
    pub tier: Tier,
    /// Lanes compared bit for bit.
    pub exact_lanes: usize,
    /// Lanes compared within a tolerance.
    pub tolerance_lanes: usize,
    /// Worst relative error seen among the tolerance comparisons.
    pub max_relative_error: f32,
}

impl VerifyReport {
    fn new(tier: Tier) -> Self {
        Self {
            tier,
            exact_lanes: 0,
            tolerance_lanes: 0,
            max_relative_error: 0.0,
        }
    }

    fn exact(&mut self, op: &'static str, expected: &[f32], actual: &[f32]) -> Result<(), SimdError> {
        for (lane, (&e, &a)) in expected.iter().zip(actual).enumerate() {
            let same = e.to_bits() == a.to_bits() || (e.is_nan() && a.is_nan());
            if !same {
                return Err(SimdError::Mismatch {
                    op,
                    lane,
                    expected: e,
                    actual: a,
                });
            }
            self.exact_lanes += 1;
        }
        Ok(())
    }

    fn exact_bits(&mut self, op: &'static str, expected: u32, actual: u32) -> Result<(), SimdError> {
        if expected != actual {
            let lane = (expected ^ actual).trailing_zeros() as usize;
            return Err(SimdError::Mismatch {
                op,
                lane,
                expected: ((expected >> lane) & 1) as f32,
                actual: ((actual >> lane) & 1) as f32,
            });
        }
        self.exact_lanes += 1;
        Ok(())
    }

    fn close(
        &mut self,
        op: &'static str,
        expected: &[f32],
        actual: &[f32],
        tolerance: f32,
    ) -> Result<(), SimdError> {
        for (&e, &a) in expected.iter().zip(actual) {
            let error = relative_error(e, a);
            self.max_relative_error = self.max_relative_error.max(error);
            if error > tolerance {
                return Err(SimdError::ToleranceExceeded {
                    op,
                    error,
                    tolerance,
                });
            }
            self.tolerance_lanes += 1;
        }
        Ok(())
    }
}

fn relative_error(expected: f32, actual: f32) -> f32 {
    if expected.is_nan() || actual.is_nan() {
        return if expected.is_nan() && actual.is_nan() {
            0.0
        } else {
            f32::INFINITY
        };
    }
    if expected == actual {
        return 0.0;
    }
    (actual - expected).abs() / expected.abs().max(1.0)
}

/// Compares backend `B` against the scalar backend at widths 4, 8 and 16.
pub fn verify_against_scalar<B: Backend>() -> Result<VerifyReport, SimdError> {
    let mut report = VerifyReport::new(B::TIER);
    let rows = exact_rows();
    for (a, b) in rows.iter().zip(rows.iter().rev()) {
        check_exact::<B::F4, <Scalar as Backend>::F4>(a, b, &mut report)?;
        check_exact::<B::F8, <Scalar as Backend>::F8>(a, b, &mut report)?;
        check_exact::<B::F16, <Scalar as Backend>::F16>(a, b, &mut report)?;
    }
    for k in 0..8 {
        let a = ramp(-3.0, 3.0, k);
        let b = ramp(0.5, -2.5, k);
        check_close::<B::F4, <Scalar as Backend>::F4>(&a, &b, &mut report)?;
        check_close::<B::F8, <Scalar as Backend>::F8>(&a, &b, &mut report)?;
        check_close::<B::F16, <Scalar as Backend>::F16>(&a, &b, &mut report)?;
    }
    debug!(
        "{} tier: {} exact lanes, {} tolerance lanes, max relative error {:e}",
        report.tier, report.exact_lanes, report.tolerance_lanes, report.max_relative_error
    );
    Ok(report)
}

/// Inputs for the bit-exact checks: signed zeros, ties, denormals, huge
/// values, infinities and a NaN row.
fn exact_rows() -> [[f32; 16]; 4] {
    [
        [
            0.0, -0.0, 0.5, -0.5, 1.5, -1.5, 2.5, -2.5, 3.7, -3.7, 1e7, -1e7, 8388608.0, 1e-40,
            -1e-40, f32::MAX,
        ],
        [
            1.0,
            -1.0,
            0.49999997,
            -0.49999997,
            4.5,
            -4.5,
            1e-3,
            -1e-3,
            123.456,
            -654.321,
            f32::INFINITY,
            f32::NEG_INFINITY,
            0.1,
            -0.1,
            f32::MIN_POSITIVE,
            2.0,
        ],
        [
            f32::NAN,
            1.0,
            f32::NAN,
            -2.0,
            0.0,
            f32::NAN,
            7.25,
            -7.75,
            0.5,
            16777215.0,
            -16777215.0,
            3.0,
            -3.0,
            f32::NAN,
            1e-20,
            -1e20,
        ],
        [
            2.0, 2.0, -2.0, -2.0, 0.0, -0.0, 5.5, 5.5, -6.5, -6.5, 1e30, -1e30, 0.75, -0.75, 9.0,
            -9.0,
        ],
    ]
}

/// Sixteen evenly spaced values from `lo` towards `hi`, row `k` of eight.
fn ramp(lo: f32, hi: f32, k: usize) -> [f32; 16] {
    let mut out = [0.0; 16];
    for (i, slot) in out.iter_mut().enumerate() {
        let t = (k * 16 + i) as f32 / 127.0;
        *slot = lo + (hi - lo) * t;
    }
    out
}

macro_rules! exact_f32 {
    ($report:expr, $op:literal, $a:expr, $b:expr, |$x:ident, $y:ident| $body:expr) => {{
        let expected = {
            let $x = S::load($a);
            let $y = S::load($b);
            $body
        };
        let actual = {
            let $x = F::load($a);
            let $y = F::load($b);
            $body
        };
        $report.exact($op, expected.to_array().as_ref(), actual.to_array().as_ref())?;
    }};
}

macro_rules! exact_mask {
    ($report:expr, $op:literal, $a:expr, $b:expr, |$x:ident, $y:ident| $body:expr) => {{
        let expected = {
            let $x = S::load($a);
            let $y = S::load($b);
            $body
        };
        let actual = {
            let $x = F::load($a);
            let $y = F::load($b);
            $body
        };
        $report.exact_bits($op, expected.to_bitmask(), actual.to_bitmask())?;
    }};
}

fn check_exact<F, S>(a: &[f32], b: &[f32], report: &mut VerifyReport) -> Result<(), SimdError>
where
    F: Primitives,
    S: Primitives,
{
    exact_f32!(report, "add", a, b, |x, y| x + y);
    exact_f32!(report, "sub", a, b, |x, y| x - y);
    exact_f32!(report, "mul", a, b, |x, y| x * y);
    exact_f32!(report, "div", a, b, |x, y| x / y);
    exact_f32!(report, "neg", a, b, |x, _y| -x);
    exact_f32!(report, "min", a, b, |x, y| x.min(y));
    exact_f32!(report, "max", a, b, |x, y| x.max(y));
    exact_f32!(report, "abs", a, b, |x, _y| x.abs());
    exact_f32!(report, "sqrt", a, b, |x, _y| x.sqrt());
    exact_f32!(report, "floor", a, b, |x, _y| x.floor());
    exact_f32!(report, "ceil", a, b, |x, _y| x.ceil());
    exact_f32!(report, "round", a, b, |x, _y| x.round());
    exact_f32!(report, "blend", a, b, |x, y| {
        let mask = x.cmp_lt(y);
        Primitives::select(mask, x, y)
    });

    exact_mask!(report, "cmp_eq", a, b, |x, y| x.cmp_eq(y));
    exact_mask!(report, "cmp_ne", a, b, |x, y| x.cmp_ne(y));
    exact_mask!(report, "cmp_lt", a, b, |x, y| x.cmp_lt(y));
    exact_mask!(report, "cmp_le", a, b, |x, y| x.cmp_le(y));
    exact_mask!(report, "cmp_gt", a, b, |x, y| x.cmp_gt(y));
    exact_mask!(report, "cmp_ge", a, b, |x, y| x.cmp_ge(y));
    exact_mask!(report, "mask_and_not", a, b, |x, y| x.cmp_le(y).and_not(x.cmp_eq(y)));
    exact_mask!(report, "mask_xor", a, b, |x, y| x.cmp_lt(y) ^ !x.cmp_gt(y));

    let finite = a.iter().take(F::LANES).all(|v| v.is_finite());
    if finite {
        report.exact(
            "reduce_max",
            &[S::load(a).reduce_max()],
            &[F::load(a).reduce_max()],
        )?;
        report.exact(
            "reduce_min",
            &[S::load(a).reduce_min()],
            &[F::load(a).reduce_min()],
        )?;
    }
    Ok(())
}

fn check_close<F, S>(a: &[f32], b: &[f32], report: &mut VerifyReport) -> Result<(), SimdError>
where
    F: Transcendentals,
    S: Transcendentals,
{
    let (xs, ys) = (S::load(a), S::load(b));
    let (xf, yf) = (F::load(a), F::load(b));
    let unit: Vec<f32> = a.iter().map(|v| v / 3.0).collect();
    let (us, uf) = (S::load(&unit), F::load(&unit));
    let tan_in: Vec<f32> = a.iter().map(|v| v * 0.4).collect();
    let (ts, tf) = (S::load(&tan_in), F::load(&tan_in));

    let trig: [(&'static str, S, F); 8] = [
        ("sin", xs.sin(), xf.sin()),
        ("cos", xs.cos(), xf.cos()),
        ("tan", ts.tan(), tf.tan()),
        ("asin", us.asin(), uf.asin()),
        ("acos", us.acos(), uf.acos()),
        ("atan", xs.atan(), xf.atan()),
        ("atan2", ys.atan2(xs), yf.atan2(xf)),
        ("mul_add", xs.mul_add(ys, us), xf.mul_add(yf, uf)),
    ];
    for (op, expected, actual) in trig {
        let tolerance = if op == "mul_add" {
            ARITH_TOLERANCE
        } else {
            TRIG_TOLERANCE
        };
        report.close(
            op,
            expected.to_array().as_ref(),
            actual.to_array().as_ref(),
            tolerance,
        )?;
    }

    let scale: f32 = a.iter().take(F::LANES).map(|v| v.abs()).sum::<f32>().max(1.0);
    let sum_error = (xs.reduce_add() - xf.reduce_add()).abs() / scale;
    report.max_relative_error = report.max_relative_error.max(sum_error);
    if sum_error > ARITH_TOLERANCE {
        return Err(SimdError::ToleranceExceeded {
            op: "reduce_add",
            error: sum_error,
            tolerance: ARITH_TOLERANCE,
        });
    }
    report.tolerance_lanes += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_agrees_with_itself() {
        let report = verify_against_scalar::<Scalar>().unwrap();
        assert_eq!(report.tier, Tier::Scalar);
        assert!(report.exact_lanes > 0);
        assert_eq!(report.max_relative_error, 0.0);
    }

    #[test]
    fn mismatch_names_the_lane() {
        let mut report = VerifyReport::new(Tier::Scalar);
        let err = report
            .exact("add", &[1.0, 2.0, 3.0], &[1.0, 2.5, 3.0])
            .unwrap_err();
        assert!(matches!(err, SimdError::Mismatch { op: "add", lane: 1, .. }));
    }

    #[test]
    fn nan_matches_any_nan() {
        let mut report = VerifyReport::new(Tier::Scalar);
        let quiet = f32::from_bits(0x7fc0_0000);
        let negative = f32::from_bits(0xffc0_0000);
        assert!(report.exact("sqrt", &[quiet], &[negative]).is_ok());
        assert!(report.close("sin", &[quiet], &[negative], 0.0).is_ok());
        assert!(report.close("sin", &[quiet], &[1.0], 1.0).is_err());
    }

    #[test]
    fn report_serializes() {
        let report = verify_against_scalar::<Scalar>().unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tier"], "scalar");
    }
}
