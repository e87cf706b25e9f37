//! Boolean vector behaviour, run against every compiled tier.

macro_rules! bool_tests {
    ($tier:ident) => {
        mod $tier {
            use pixelflow_simd::$tier::*;
            use pixelflow_simd::ops;

            #[test]
            fn splat_sets_every_lane() {
                assert!(Vec4b::splat(true).all());
                assert!(Vec8b::splat(false).none());
                assert_eq!(Vec16b::splat(true).to_bitmask(), 0xffff);
                assert_eq!(Vec16b::default().to_bitmask(), 0);
            }

            #[test]
            fn logic_laws_hold_for_every_4_lane_pattern() {
                for x in 0..16u32 {
                    for y in 0..16u32 {
                        let a = Vec4b::from_bitmask(x);
                        let b = Vec4b::from_bitmask(y);
                        assert_eq!((a & b).to_bitmask(), x & y);
                        assert_eq!((a | b).to_bitmask(), x | y);
                        assert_eq!((a ^ b).to_bitmask(), x ^ y);
                        assert_eq!((!a).to_bitmask(), !x & 0xf);
                        assert_eq!(ops::and_not(a, b).to_bitmask(), x & !y);
                        assert_eq!(a.and_not(b), a & !b);
                    }
                }
            }

            #[test]
            fn all_any_none_are_consistent() {
                for bits in [0u32, 1, 0x80, 0x7f, 0xff, 0x55] {
                    let m = Vec8b::from_bitmask(bits);
                    assert_eq!(m.all(), bits == 0xff, "all {:#x}", bits);
                    assert_eq!(m.any(), bits != 0, "any {:#x}", bits);
                    assert_eq!(m.none(), !m.any(), "none {:#x}", bits);
                }
            }

            #[test]
            fn bitmask_ignores_high_bits() {
                assert_eq!(Vec4b::from_bitmask(0xffff_fff5).to_bitmask(), 0x5);
                assert_eq!(Vec8b::from_bitmask(0x1ff).to_bitmask(), 0xff);
            }

            #[test]
            fn lane_access_and_assign() {
                let mut m = Vec16b::splat(false);
                m.assign(true, 3).assign(true, 12);
                assert_eq!(m.to_bitmask(), (1 << 3) | (1 << 12));
                assert!(m.access(12));
                assert!(!m.access(11));
            }

            #[test]
            fn from_array_matches_lane_order() {
                let m = Vec8b::from_array([true, false, false, true, false, false, false, true]);
                assert_eq!(m.to_bitmask(), 0b1000_1001);
                let collected: Vec<bool> = m.lanes().collect();
                assert_eq!(collected, m.to_array().to_vec());
            }

            #[test]
            fn in_place_operators() {
                let mut m = Vec8b::from_bitmask(0b1100_1100);
                m &= Vec8b::from_bitmask(0b1010_1010);
                assert_eq!(m.to_bitmask(), 0b1000_1000);
                m |= Vec8b::from_bitmask(0b0000_0001);
                assert_eq!(m.to_bitmask(), 0b1000_1001);
                m ^= Vec8b::splat(true);
                assert_eq!(m.to_bitmask(), 0b0111_0110);
                m.and_not_assign(Vec8b::from_bitmask(0b0000_0110));
                assert_eq!(m.to_bitmask(), 0b0111_0000);
            }

            #[test]
            fn blend_bool_lanes() {
                let a = Vec4b::from_bitmask(0b0011);
                let b = Vec4b::from_bitmask(0b0101);
                let m = Vec4b::from_bitmask(0b1100);
                assert_eq!(ops::blend(a, b, m).to_bitmask(), 0b0001);
                assert_eq!(Vec4b::blend(a, b, !m).to_bitmask(), 0b0111);
            }

            #[test]
            fn from_bool_broadcasts() {
                let m: Vec16b = true.into();
                assert!(m.all());
            }

            #[test]
            fn checked_slice_constructor() {
                assert!(Vec8b::try_from_slice(&[true; 7]).is_err());
                let m = Vec8b::try_from_slice(&[true; 9]).unwrap();
                assert!(m.all());
            }
        }
    };
}

bool_tests!(scalar);
#[cfg(target_arch = "x86_64")]
bool_tests!(narrow);
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
bool_tests!(wide);
