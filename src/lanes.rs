//! Fixed-size lane storage used at the array boundary of every vector type.

use core::fmt::Debug;

/// A `[T; N]` holding one value per lane.
pub trait LaneArray<T>:
    Copy + Debug + Default + Send + Sync + AsRef<[T]> + AsMut<[T]> + 'static
{
}

impl<T, const N: usize> LaneArray<T> for [T; N]
where
    T: Copy + Debug + Send + Sync + 'static,
    [T; N]: Default,
{
}

/// Lane arrays that can be joined into (and split back out of) one twice as long.
///
/// This is what lets a pair of half-width vectors present a full-width array.
pub trait Concat<T>: LaneArray<T> {
    type Doubled: LaneArray<T>;

    fn concat(lo: Self, hi: Self) -> Self::Doubled;

    fn split(whole: Self::Doubled) -> (Self, Self);
}

macro_rules! impl_concat {
    ($half:literal => $whole:literal) => {
        impl<T> Concat<T> for [T; $half]
        where
            T: Copy + Debug + Default + Send + Sync + 'static,
        {
            type Doubled = [T; $whole];

            #[inline(always)]
            fn concat(lo: Self, hi: Self) -> [T; $whole] {
                let mut whole = [T::default(); $whole];
                whole[..$half].copy_from_slice(&lo);
                whole[$half..].copy_from_slice(&hi);
                whole
            }

            #[inline(always)]
            fn split(whole: [T; $whole]) -> (Self, Self) {
                let mut lo = [T::default(); $half];
                let mut hi = [T::default(); $half];
                lo.copy_from_slice(&whole[..$half]);
                hi.copy_from_slice(&whole[$half..]);
                (lo, hi)
            }
        }
    };
}

impl_concat!(4 => 8);
impl_concat!(8 => 16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_then_split_preserves_halves() {
        let lo = [1.0f32, 2.0, 3.0, 4.0];
        let hi = [5.0f32, 6.0, 7.0, 8.0];
        let whole = <[f32; 4]>::concat(lo, hi);
        assert_eq!(whole, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(<[f32; 4]>::split(whole), (lo, hi));
    }

    #[test]
    fn split_sixteen_bools() {
        let mut whole = [false; 16];
        whole[7] = true;
        whole[8] = true;
        let (lo, hi) = <[bool; 8]>::split(whole);
        assert!(lo[7] && !lo[0]);
        assert!(hi[0] && !hi[7]);
    }
}
