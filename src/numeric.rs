//! Little-endian integer readers and IEEE half/single float conversion.
//!
//! Grounded on `internal.h`'s `read_16`/`read_32`/`read_64` and
//! `half_to_float`/`float_to_half`, reimplemented without raw pointers or the
//! union-based `FP32` trick (`f32::from_bits`/`to_bits` do the same job
//! safely). `read_64` here is a plain little-endian read: the source's
//! version mixes `*` and `<<` by mistake (a leftover `*` where a `|` was
//! meant) and is unused by the parser's core paths — spec.md calls this out
//! explicitly as not to be transcribed.

/// Reads a little-endian `u16` from the first two bytes of `buf`.
#[inline]
pub fn read_u16_le(buf: &[u8]) -> u16 {
    u16::from_le_bytes([buf[0], buf[1]])
}

/// Reads a little-endian `u32` from the first four bytes of `buf`.
#[inline]
pub fn read_u32_le(buf: &[u8]) -> u32 {
    u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
}

/// Reads a little-endian `u64` from the first eight bytes of `buf`.
#[inline]
pub fn read_u64_le(buf: &[u8]) -> u64 {
    u64::from_le_bytes([
        buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
    ])
}

/// Converts an IEEE 754 half-precision float (as its raw bit pattern) to `f32`.
///
/// Preserves NaN payload class (quiet vs. signaling is not distinguished by
/// this format; any NaN bit pattern round-trips through `float_to_half` as
/// 0x7E00) and infinities.
pub fn half_to_f32(half: u16) -> f32 {
    let sign = (half & 0x8000) as u32;
    let exp = (half >> 10) & 0x1f;
    let mant = (half & 0x3ff) as u32;

    let bits = if exp == 0 {
        if mant == 0 {
            0
        } else {
            // Subnormal half -> normalized f32.
            let mut e = -1i32;
            let mut m = mant;
            loop {
                m <<= 1;
                e += 1;
                if m & 0x400 != 0 {
                    break;
                }
            }
            let m = (m & 0x3ff) << 13;
            ((127 - 15 - e) as u32) << 23 | m
        }
    } else if exp == 0x1f {
        // Inf / NaN.
        0xff << 23 | (mant << 13)
    } else {
        ((exp as u32) + (127 - 15)) << 23 | (mant << 13)
    };

    f32::from_bits((sign << 16) | bits)
}

/// Converts an `f32` to its nearest IEEE 754 half-precision bit pattern.
///
/// NaNs (of any payload) map to the quiet-NaN half encoding `0x7E00`; `+-inf`
/// map to `0x7C00`/`0xFC00`.
pub fn f32_to_half(value: f32) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 16) & 0x8000) as u16;
    let exp = ((bits >> 23) & 0xff) as i32;
    let mant = bits & 0x007f_ffff;

    if exp == 0xff {
        return if mant != 0 {
            sign | 0x7e00
        } else {
            sign | 0x7c00
        };
    }

    let half_exp = exp - 127 + 15;
    if half_exp >= 0x1f {
        return sign | 0x7c00;
    }
    if half_exp <= 0 {
        if half_exp < -10 {
            return sign;
        }
        // Subnormal result.
        let mant = mant | 0x0080_0000;
        let shift = (14 - half_exp) as u32;
        let half_mant = mant >> shift;
        return sign | (half_mant as u16);
    }

    sign | ((half_exp as u16) << 10) | ((mant >> 13) as u16)
}
