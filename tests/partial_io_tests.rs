//! Partial loads and stores must stay inside the first `n` elements.
//!
//! Every store test surrounds the target with a guard pattern and checks that
//! nothing past `n` was written; every load test hands over a slice of exactly
//! `n` elements so that an over-read would panic.

const GUARD: f32 = -1.0;
const FILL: f32 = 7.5;

macro_rules! store_bounds {
    ($name:ident, $vec:ty, $lanes:expr) => {
        #[test]
        fn $name() {
            for n in 0..=$lanes {
                let mut buffer = [GUARD; $lanes + 4];
                <$vec>::splat(FILL).store_partial(&mut buffer, n as i64);
                for (i, &v) in buffer.iter().enumerate() {
                    let want = if i < n { FILL } else { GUARD };
                    assert_eq!(v, want, "n = {}, index {}", n, i);
                }
            }
        }
    };
}

macro_rules! load_bounds {
    ($name:ident, $vec:ty, $lanes:expr) => {
        #[test]
        fn $name() {
            let source: Vec<f32> = (1..=$lanes).map(|i| i as f32).collect();
            for n in 0..=$lanes {
                let mut v = <$vec>::splat(GUARD);
                v.load_partial(&source[..n], n as i64);
                for i in 0..$lanes {
                    let want = if i < n { (i + 1) as f32 } else { 0.0 };
                    assert_eq!(v.access(i as i64), want, "n = {}, lane {}", n, i);
                }
            }
        }
    };
}

macro_rules! partial_io_tests {
    ($tier:ident) => {
        mod $tier {
            use super::{FILL, GUARD};
            use pixelflow_simd::$tier::*;

            store_bounds!(store_partial_4, Vec4f, 4);
            store_bounds!(store_partial_8, Vec8f, 8);
            store_bounds!(store_partial_16, Vec16f, 16);
            load_bounds!(load_partial_4, Vec4f, 4);
            load_bounds!(load_partial_8, Vec8f, 8);
            load_bounds!(load_partial_16, Vec16f, 16);

            #[test]
            fn load_partial_zero_fills() {
                let mut v = Vec4f::splat(GUARD);
                v.load_partial(&[9.0, 8.0, 7.0, 6.0], 2);
                assert_eq!(v.to_array(), [9.0, 8.0, 0.0, 0.0]);
            }

            #[test]
            fn full_load_and_store() {
                let src: Vec<f32> = (0..20).map(|i| i as f32 * 0.5).collect();
                let v = Vec16f::from_slice(&src);
                let mut dst = [GUARD; 20];
                v.store(&mut dst);
                assert_eq!(dst[..16], src[..16]);
                assert!(dst[16..].iter().all(|&x| x == GUARD));

                let mut w = Vec8f::zeros();
                w.load(&src[4..]);
                assert_eq!(w.to_array(), [2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5]);
            }

            #[test]
            fn bool_partial_store_keeps_tail() {
                let m = Vec8b::splat(true);
                let mut dst = [false; 10];
                m.store_partial(&mut dst, 5);
                assert_eq!(dst, [true, true, true, true, true, false, false, false, false, false]);
            }

            #[test]
            fn bool_partial_load_false_fills() {
                let mut m = Vec16b::splat(true);
                m.load_partial(&[true, false, true], 3);
                assert_eq!(m.to_bitmask(), 0b101);
            }

            #[cfg(not(feature = "strict-index"))]
            #[test]
            fn counts_clamp_to_lanes_and_slice() {
                let mut v = Vec4f::splat(GUARD);
                v.load_partial(&[1.0, 2.0, 3.0, 4.0, 5.0], 10);
                assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);

                v.load_partial(&[1.0, 2.0, 3.0, 4.0], -3);
                assert_eq!(v.to_array(), [0.0; 4]);

                let mut short = [GUARD; 2];
                Vec8f::splat(FILL).store_partial(&mut short, 6);
                assert_eq!(short, [FILL; 2]);
            }

            #[test]
            fn checked_partial_io_rejects_bad_counts() {
                let mut v = Vec8f::zeros();
                assert!(v.try_load_partial(&[1.0; 8], 9).is_err());
                assert!(v.try_load_partial(&[1.0; 2], 3).is_err());
                assert!(v.try_load_partial(&[1.0; 8], -1).is_err());
                v.try_load_partial(&[1.0; 3], 3).unwrap();
                assert_eq!(v.horizontal_add(), 3.0);

                let mut dst = [GUARD; 4];
                assert!(v.try_store_partial(&mut dst, 5).is_err());
                assert_eq!(dst, [GUARD; 4]);
                v.try_store_partial(&mut dst, 4).unwrap();
                assert_eq!(dst, [1.0, 1.0, 1.0, 0.0]);
            }

            #[test]
            fn from_prefix_accepts_fewer_values() {
                let v = Vec16f::from_prefix(&[1.0, 2.0]);
                assert_eq!(v.horizontal_add(), 3.0);
                assert_eq!(v.access(1), 2.0);
                assert_eq!(v.access(2), 0.0);
            }
        }
    };
}

partial_io_tests!(scalar);
#[cfg(target_arch = "x86_64")]
partial_io_tests!(narrow);
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
partial_io_tests!(wide);
