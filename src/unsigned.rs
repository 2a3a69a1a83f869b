use std::{
    cmp::Ordering,
    fmt::{self, Binary, Display, LowerHex, UpperHex},
    ops::{Add, Sub},
    str::FromStr,
};

use crate::{
    cast::{Cast, CastFrom},
    error::Error,
    signal::SignalValue,
};

/// Fixed-width unsigned value. Every way of building one truncates to `N`
/// bits, so arithmetic wraps modulo 2^N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Unsigned<const N: usize>(u128);

pub type U<const N: usize> = Unsigned<N>;

impl<const N: usize> Unsigned<N> {
    const MASK: u128 = {
        assert!(N > 0 && N <= 128, "width must be in 1..=128");
        if N == 128 {
            u128::MAX
        } else {
            (1 << N) - 1
        }
    };

    #[inline]
    pub fn new(val: u128) -> Self {
        Self(val & Self::MASK)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub fn max_value() -> Self {
        Self(Self::MASK)
    }

    #[inline]
    pub fn value(self) -> u128 {
        self.0
    }

    /// Number of hex digits needed to print any value of this width.
    #[inline]
    pub const fn hex_digits() -> usize {
        (N + 3) / 4
    }

    /// Bits from the most significant one down, the order waveform dumps
    /// expect.
    pub fn bits(self) -> impl Iterator<Item = bool> {
        (0 .. N).rev().map(move |idx| (self.0 >> idx) & 1 == 1)
    }
}

impl<const N: usize> PartialOrd for Unsigned<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Unsigned<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<const N: usize> SignalValue for Unsigned<N> {}

macro_rules! impl_for_unsigned_prim_ty {
    ($( $prim:ty ),+) => {
        $(
            impl<const N: usize> CastFrom<$prim> for Unsigned<N> {
                #[inline]
                fn cast_from(val: $prim) -> Self {
                    Self::new(val as u128)
                }
            }

            impl<const N: usize> CastFrom<Unsigned<N>> for $prim {
                #[inline]
                fn cast_from(val: Unsigned<N>) -> Self {
                    val.0 as $prim
                }
            }

            impl<const N: usize> From<$prim> for Unsigned<N> {
                #[inline]
                fn from(val: $prim) -> Self {
                    val.cast()
                }
            }
        )+
    };
}

impl_for_unsigned_prim_ty!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_arith_op {
    ($( $trait:ident => $method:ident, $wrapping:ident ),+) => {
        $(
            impl<const N: usize> $trait for Unsigned<N> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Self) -> Self::Output {
                    Self::new(self.0.$wrapping(rhs.0))
                }
            }

            impl<const N: usize> $trait<u128> for Unsigned<N> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: u128) -> Self::Output {
                    self.$method(Self::new(rhs))
                }
            }
        )+
    };
}

impl_arith_op!(
    Add => add, wrapping_add,
    Sub => sub, wrapping_sub
);

impl<const N: usize> Display for Unsigned<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<const N: usize> LowerHex for Unsigned<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        LowerHex::fmt(&self.0, f)
    }
}

impl<const N: usize> UpperHex for Unsigned<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        UpperHex::fmt(&self.0, f)
    }
}

impl<const N: usize> Binary for Unsigned<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Binary::fmt(&self.0, f)
    }
}

impl<const N: usize> FromStr for Unsigned<N> {
    type Err = Error;

    /// Accepts decimal, `0x` hex and `0b` binary digits with `_`
    /// separators. Values of any length are reduced modulo 2^N.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| Error::ParseValue {
            text: s.to_string(),
            reason,
        };

        let text = s.trim();
        let (digits, radix) = match text.get(.. 2) {
            Some("0x" | "0X") => (&text[2 ..], 16),
            Some("0b" | "0B") => (&text[2 ..], 2),
            _ => (text, 10),
        };

        let mut value = None;
        for c in digits.chars().filter(|c| *c != '_') {
            let digit = c
                .to_digit(radix)
                .ok_or_else(|| invalid(format!("invalid digit '{c}'")))?;
            // 2^N divides 2^128, so wrapping here keeps the low N bits exact
            value = Some(
                value
                    .unwrap_or(0_u128)
                    .wrapping_mul(radix as u128)
                    .wrapping_add(digit as u128),
            );
        }

        value
            .map(Self::new)
            .ok_or_else(|| invalid("no digits".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_construction() {
        assert_eq!(U::<8>::new(0x1ff).value(), 0xff);
        assert_eq!(300_u16.cast::<U<8>>().value(), 44);
        assert_eq!(U::<3>::max_value().value(), 7);
        assert_eq!(U::<128>::new(u128::MAX).value(), u128::MAX);
    }

    #[test]
    fn add_wraps() {
        assert_eq!((U::<8>::new(255) + 1).value(), 0);
        assert_eq!((U::<8>::new(254) + 1).value(), 255);
        assert_eq!((U::<2>::new(3) + U::<2>::new(3)).value(), 2);
        assert_eq!((U::<8>::new(0) - 1).value(), 255);
    }

    #[test]
    fn cast_to_prim() {
        let v: U<8> = 200_u8.cast();
        assert_eq!(v.cast::<u8>(), 200);
        assert_eq!(u32::cast_from(v), 200);
    }

    #[test]
    fn parse() {
        assert_eq!("42".parse::<U<8>>().unwrap().value(), 42);
        assert_eq!("0x1F".parse::<U<8>>().unwrap().value(), 31);
        assert_eq!("0b1010_1010".parse::<U<8>>().unwrap().value(), 0xaa);
        assert_eq!("256".parse::<U<8>>().unwrap().value(), 0);
        assert!(matches!(
            "0xzz".parse::<U<8>>(),
            Err(Error::ParseValue { .. })
        ));
        assert!("".parse::<U<8>>().is_err());
        assert!("0x_".parse::<U<8>>().is_err());
    }

    #[test]
    fn parse_wider_than_u128_truncates() {
        // 2^128 and 2^128 + 5
        let wide = "340282366920938463463374607431768211456";
        assert_eq!(wide.parse::<U<8>>().unwrap().value(), 0);
        assert_eq!(wide.parse::<U<128>>().unwrap().value(), 0);
        let wide = "340282366920938463463374607431768211461";
        assert_eq!(wide.parse::<U<8>>().unwrap().value(), 5);
        assert_eq!(wide.parse::<U<128>>().unwrap().value(), 5);

        let hex = "0x1_0000_0000_0000_0000_0000_0000_0000_00ab";
        assert_eq!(hex.parse::<U<8>>().unwrap().value(), 0xab);
    }

    #[test]
    fn format() {
        let v = U::<8>::new(5);
        assert_eq!(format!("{v}"), "5");
        assert_eq!(format!("{v:02x}"), "05");
        assert_eq!(format!("{v:08b}"), "00000101");
        assert_eq!(U::<8>::hex_digits(), 2);
        assert_eq!(U::<9>::hex_digits(), 3);
    }

    #[test]
    fn bits_msb_first() {
        let v = U::<4>::new(0b1010);
        assert_eq!(v.bits().collect::<Vec<_>>(), [true, false, true, false]);
    }
}
