//! LEB128 integer decoding.

use crate::fmt::{binary::ErrorKind, Read};

macro_rules! decode_unsigned_leb128 {
    ($func:ident, $num_ty:ty) => {
        /// Decodes an unsigned LEB128 number.
        pub(super) fn $func<R>(reader: &mut R) -> Result<$num_ty, ErrorKind>
        where
            R: Read,
        {
            const BITS: u32 = <$num_ty>::BITS;

            let mut result: $num_ty = 0;
            let mut shift = 0;

            loop {
                let b = reader.next()?;
                let more = b & 0x80 != 0;
                let payload = b & 0x7f;

                // The final permitted group must terminate the sequence and
                // must not carry payload bits past the target width.
                if shift + 7 > BITS
                    && (more || <$num_ty>::from(payload) >> (BITS - shift) != 0)
                {
                    return Err(ErrorKind::Overflow);
                }

                result |= <$num_ty>::from(payload) << shift;

                if !more {
                    return Ok(result);
                }

                shift += 7;
            }
        }
    };
}

decode_unsigned_leb128!(decode_u32, u32);

macro_rules! decode_signed_leb128 {
    ($func:ident, $num_ty:ty) => {
        /// Decodes a signed LEB128 number.
        pub(super) fn $func<R>(reader: &mut R) -> Result<$num_ty, ErrorKind>
        where
            R: Read,
        {
            const BITS: u32 = <$num_ty>::BITS;

            let mut result: $num_ty = 0;
            let mut shift = 0;
            let mut b;

            loop {
                b = reader.next()?;
                let more = b & 0x80 != 0;
                let payload = b & 0x7f;

                // The final permitted group must terminate the sequence, and
                // every payload bit past the value width must match the sign
                // bit (a proper sign extension).
                if shift + 7 > BITS {
                    let top = payload >> (BITS - shift - 1);
                    if more || (top != 0 && top != 0x7f >> (BITS - shift - 1)) {
                        return Err(ErrorKind::Overflow);
                    }
                }

                result |= <$num_ty>::from(payload) << shift;
                shift += 7;

                if !more {
                    break;
                }
            }

            if shift < BITS && b & 0x40 != 0 {
                result |= -1 << shift;
            }

            Ok(result)
        }
    };
}

decode_signed_leb128!(decode_s32, i32);
decode_signed_leb128!(decode_s64, i64);

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::fmt::SliceRead;

    decode_unsigned_leb128!(decode_u64, u64);

    macro_rules! encode_unsigned_leb128 {
        ($func:ident, $num_ty:ty) => {
            /// Encodes a number in unsigned LEB128 format.
            fn $func(mut value: $num_ty) -> Vec<u8> {
                let mut result = Vec::new();

                loop {
                    let mut b = u8::try_from(value & 0x7f).unwrap();
                    value >>= 7;

                    let done = value == 0;

                    if !done {
                        b |= 0x80;
                    }
                    result.push(b);

                    if done {
                        return result;
                    }
                }
            }
        };
    }

    encode_unsigned_leb128!(encode_u32, u32);
    encode_unsigned_leb128!(encode_u64, u64);

    macro_rules! encode_signed_leb128 {
        ($func:ident, $num_ty:ty) => {
            /// Encodes a number in signed LEB128 format.
            fn $func(mut value: $num_ty) -> Vec<u8> {
                let mut result = Vec::new();

                loop {
                    let b = u8::try_from(value & 0x7f).unwrap();
                    value >>= 7;

                    if (value == 0 && b & 0x40 == 0) || (value == -1 && (b & 0x40) != 0) {
                        result.push(b);
                        return result;
                    }

                    result.push(b | 0x80);
                }
            }
        };
    }

    encode_signed_leb128!(encode_s32, i32);
    encode_signed_leb128!(encode_s64, i64);

    #[test]
    fn decode_u32_bounds() {
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0x0f];
        assert_eq!(decode_u32(&mut SliceRead::new(bytes)).unwrap(), u32::MAX);

        let bytes = &[0x00];
        assert_eq!(decode_u32(&mut SliceRead::new(bytes)).unwrap(), u32::MIN);

        // Valid but inefficient way to encode 0.
        let bytes = &[0x80, 0x80, 0x80, 0x80, 0x00];
        assert_eq!(decode_u32(&mut SliceRead::new(bytes)).unwrap(), u32::MIN);
    }

    #[test]
    fn decode_u32_overflow() {
        // Maximum of 5 groups; the continuation bit must be clear in the last.
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0x8f];
        assert!(matches!(
            decode_u32(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));

        // Same, with a byte following. The error must not be end of stream.
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0x8f, 0x00];
        assert!(matches!(
            decode_u32(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));

        // Part of 0x1f would be shifted out of the final value and lost.
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0x1f];
        assert!(matches!(
            decode_u32(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));
    }

    #[test]
    fn decode_u32_eof() {
        let bytes = &[0xff, 0xff];
        assert!(matches!(
            decode_u32(&mut SliceRead::new(bytes)),
            Err(ErrorKind::EndOfStream)
        ));
    }

    #[test]
    fn decode_u64_bounds() {
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
        assert_eq!(decode_u64(&mut SliceRead::new(bytes)).unwrap(), u64::MAX);

        // Maximum of 10 groups; one more continuation fails.
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x81];
        assert!(matches!(
            decode_u64(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));

        // 0x02 would be shifted out of the final value and lost.
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
        assert!(matches!(
            decode_u64(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));
    }

    #[test]
    fn decode_s32_bounds() {
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0x07];
        assert_eq!(decode_s32(&mut SliceRead::new(bytes)).unwrap(), i32::MAX);

        let bytes = &[0x80, 0x80, 0x80, 0x80, 0x78];
        assert_eq!(decode_s32(&mut SliceRead::new(bytes)).unwrap(), i32::MIN);

        let bytes = &[0x40];
        assert_eq!(decode_s32(&mut SliceRead::new(bytes)).unwrap(), -64);

        // Valid but inefficient way to encode -64.
        let bytes = &[0xc0, 0x7f];
        assert_eq!(decode_s32(&mut SliceRead::new(bytes)).unwrap(), -64);
    }

    #[test]
    fn decode_s32_overflow() {
        // Maximum of 5 groups; the continuation bit must be clear in the last.
        let bytes = &[0x80, 0x80, 0x80, 0x80, 0x80];
        assert!(matches!(
            decode_s32(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));

        // The high bit of the final group is set without a sign extension.
        let bytes = &[0x80, 0x80, 0x80, 0x80, 0x08];
        assert!(matches!(
            decode_s32(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));

        // A partial sign extension is as invalid as none at all.
        let bytes = &[0x80, 0x80, 0x80, 0x80, 0x38];
        assert!(matches!(
            decode_s32(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));
    }

    #[test]
    fn decode_s64_bounds() {
        let bytes = &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00];
        assert_eq!(decode_s64(&mut SliceRead::new(bytes)).unwrap(), i64::MAX);

        let bytes = &[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x7f];
        assert_eq!(decode_s64(&mut SliceRead::new(bytes)).unwrap(), i64::MIN);

        let bytes = &[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80];
        assert!(matches!(
            decode_s64(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));

        let bytes = &[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x08];
        assert!(matches!(
            decode_s64(&mut SliceRead::new(bytes)),
            Err(ErrorKind::Overflow)
        ));
    }

    proptest! {
        #[allow(clippy::ignored_unit_patterns)]
        #[test]
        fn decode_encoded_u32(n in any::<u32>()) {
            let bytes = encode_u32(n);
            prop_assert_eq!(n, decode_u32(&mut SliceRead::new(&bytes)).unwrap());
        }

        #[allow(clippy::ignored_unit_patterns)]
        #[test]
        fn decode_encoded_u64(n in any::<u64>()) {
            let bytes = encode_u64(n);
            prop_assert_eq!(n, decode_u64(&mut SliceRead::new(&bytes)).unwrap());
        }

        #[allow(clippy::ignored_unit_patterns)]
        #[test]
        fn decode_encoded_s32(n in any::<i32>()) {
            let bytes = encode_s32(n);
            prop_assert_eq!(n, decode_s32(&mut SliceRead::new(&bytes)).unwrap());
        }

        #[allow(clippy::ignored_unit_patterns)]
        #[test]
        fn decode_encoded_s64(n in any::<i64>()) {
            let bytes = encode_s64(n);
            prop_assert_eq!(n, decode_s64(&mut SliceRead::new(&bytes)).unwrap());
        }
    }
}
