//! Float vector behaviour, run against every compiled tier.

macro_rules! float_tests {
    ($tier:ident) => {
        mod $tier {
            use pixelflow_simd::$tier::*;
            use pixelflow_simd::ops;

            #[test]
            fn add_two_vectors() {
                let a = Vec4f::from_array([1.0, 2.0, 3.0, 4.0]);
                let b = Vec4f::from_array([10.0, 20.0, 30.0, 40.0]);
                assert_eq!((a + b).to_array(), [11.0, 22.0, 33.0, 44.0]);
            }

            #[test]
            fn compound_assignment() {
                let mut v = Vec8f::splat(2.0);
                v += Vec8f::splat(1.0);
                v *= 4.0;
                v -= 2.0;
                v /= Vec8f::splat(5.0);
                assert_eq!(v.to_array(), [2.0; 8]);
            }

            #[test]
            fn negation_flips_sign_of_zero() {
                let v = -Vec4f::from_array([0.0, -0.0, 1.0, -2.0]);
                let bits: Vec<u32> = v.lanes().map(f32::to_bits).collect();
                assert_eq!(
                    bits,
                    vec![(-0.0f32).to_bits(), 0.0f32.to_bits(), (-1.0f32).to_bits(), 2.0f32.to_bits()]
                );
            }

            #[test]
            fn scalar_broadcast_both_sides() {
                let v = Vec16f::from_array(core::array::from_fn(|i| i as f32));
                let left = 100.0 - v;
                let right = v - 100.0;
                for i in 0..16 {
                    assert_eq!(left.access(i as i64), 100.0 - i as f32);
                    assert_eq!(right.access(i as i64), i as f32 - 100.0);
                }
            }

            #[test]
            fn broadcast_then_access() {
                let mut v = Vec8f::zeros();
                v.broadcast(3.5);
                assert!(v.lanes().all(|x| x == 3.5));
            }

            #[test]
            fn assign_single_lane() {
                let mut v = Vec16f::zeros();
                v.assign(7.0, 11);
                for i in 0..16 {
                    let want = if i == 11 { 7.0 } else { 0.0 };
                    assert_eq!(v.access(i), want, "lane {}", i);
                }
            }

            #[cfg(not(feature = "strict-index"))]
            #[test]
            fn out_of_range_index_clamps() {
                let v = Vec4f::from_array([1.0, 2.0, 3.0, 4.0]);
                assert_eq!(v.access(-5), 1.0);
                assert_eq!(v.access(4), 4.0);
                assert_eq!(v.access(1000), 4.0);

                let mut w = Vec8f::zeros();
                w.assign(9.0, 8);
                assert_eq!(w.access(7), 9.0);
            }

            #[cfg(feature = "strict-index")]
            #[test]
            #[should_panic(expected = "out of range")]
            fn out_of_range_index_panics() {
                Vec4f::zeros().access(4);
            }

            #[test]
            fn comparisons() {
                let a = Vec4f::from_array([1.0, 2.0, 3.0, f32::NAN]);
                let b = Vec4f::splat(2.0);
                assert_eq!(a.cmp_lt(b).to_array(), [true, false, false, false]);
                assert_eq!(a.cmp_le(b).to_array(), [true, true, false, false]);
                assert_eq!(a.cmp_gt(b).to_array(), [false, false, true, false]);
                assert_eq!(a.cmp_ge(b).to_array(), [false, true, true, false]);
                assert_eq!(a.cmp_eq(b).to_array(), [false, true, false, false]);
                assert_eq!(a.cmp_ne(b).to_array(), [true, false, true, true]);
            }

            #[test]
            fn min_max_prefer_second_operand_on_nan() {
                let a = Vec4f::from_array([f32::NAN, 1.0, 5.0, -1.0]);
                let b = Vec4f::from_array([2.0, f32::NAN, 3.0, -2.0]);
                let lo = ops::min(a, b).to_array();
                let hi = ops::max(a, b).to_array();
                assert_eq!(lo[0], 2.0);
                assert!(lo[1].is_nan());
                assert_eq!(lo[2..], [3.0, -2.0]);
                assert_eq!(hi[0], 2.0);
                assert!(hi[1].is_nan());
                assert_eq!(hi[2..], [5.0, -1.0]);
            }

            #[test]
            fn rounding_family() {
                let v = Vec8f::from_array([-2.5, -1.5, -0.5, 0.5, 1.5, 2.5, 2.7, -2.7]);
                assert_eq!(
                    v.round().to_array(),
                    [-2.0, -2.0, -0.0, 0.0, 2.0, 2.0, 3.0, -3.0]
                );
                assert_eq!(
                    v.floor().to_array(),
                    [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 2.0, -3.0]
                );
                assert_eq!(
                    v.ceil().to_array(),
                    [-2.0, -1.0, -0.0, 1.0, 2.0, 3.0, 3.0, -2.0]
                );
            }

            #[test]
            fn round_keeps_large_and_special_values() {
                let v = Vec4f::from_array([16777216.5f32, f32::INFINITY, -1e20, f32::NAN]);
                let r = v.round().to_array();
                assert_eq!(r[0], 16777216.5f32);
                assert_eq!(r[1], f32::INFINITY);
                assert_eq!(r[2], -1e20);
                assert!(r[3].is_nan());
            }

            #[test]
            fn abs_and_sqrt() {
                let v = Vec4f::from_array([-4.0, 9.0, -0.0, 16.0]);
                assert_eq!(ops::abs(v).to_array(), [4.0, 9.0, 0.0, 16.0]);
                assert_eq!(ops::sqrt(ops::abs(v)).to_array(), [2.0, 3.0, 0.0, 4.0]);
                assert!(Vec4f::splat(-1.0).sqrt().lanes().all(f32::is_nan));
            }

            #[test]
            fn horizontal_reductions() {
                let v = Vec16f::from_array(core::array::from_fn(|i| (i as f32) - 5.0));
                assert_eq!(v.horizontal_add(), 40.0);
                assert_eq!(v.horizontal_max(), 10.0);
                assert_eq!(v.horizontal_min(), -5.0);
                assert_eq!(Vec4f::splat(f32::INFINITY).horizontal_max(), f32::INFINITY);
            }

            #[test]
            fn mul_add_is_close_to_separate_ops() {
                let a = Vec8f::splat(1.5);
                let b = Vec8f::splat(2.0);
                let c = Vec8f::splat(0.25);
                assert_eq!(a.mul_add(b, c).to_array(), [3.25; 8]);
            }

            #[test]
            fn blend_float_lanes() {
                let a = Vec8f::splat(1.0);
                let b = Vec8f::splat(2.0);
                let m = Vec8b::from_bitmask(0b1010_0101);
                assert_eq!(
                    ops::blend(a, b, m).to_array(),
                    [1.0, 2.0, 1.0, 2.0, 2.0, 1.0, 2.0, 1.0]
                );
            }

            #[test]
            fn increments() {
                let mut v = Vec4f::zeros();
                let before = v.post_increment();
                assert_eq!(before, Vec4f::zeros());
                v.increment().increment();
                assert_eq!(v, Vec4f::splat(3.0));
                v.decrement();
                assert_eq!(v.post_decrement(), Vec4f::splat(2.0));
                assert_eq!(v, Vec4f::splat(1.0));
            }

            #[test]
            fn ieee_specials_propagate() {
                let v = Vec4f::from_array([1.0, -1.0, 0.0, f32::INFINITY]);
                let q = v / 0.0;
                assert_eq!(q.access(0), f32::INFINITY);
                assert_eq!(q.access(1), f32::NEG_INFINITY);
                assert!(q.access(2).is_nan());
                assert!((Vec4f::splat(f32::INFINITY) - Vec4f::splat(f32::INFINITY))
                    .lanes()
                    .all(f32::is_nan));
            }

            #[test]
            fn equality_over_all_lanes() {
                let a = Vec16f::splat(1.0);
                let mut b = a;
                assert_eq!(a, b);
                b.assign(1.5, 15);
                assert_ne!(a, b);
            }
        }
    };
}

float_tests!(scalar);
#[cfg(target_arch = "x86_64")]
float_tests!(narrow);
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
float_tests!(wide);
