use crate::error::{ExecError, ScriptError};

/// Maximum byte length of a number the interpreter will decode from the
/// stack. Longer encodings are a protocol error, not a saturating parse.
pub const MAX_NUM_SIZE: usize = 4;

/// Decodes a stack item as a Bitcoin Script number.
///
/// Accepts at most [`MAX_NUM_SIZE`] bytes. The high bit of the last byte is
/// the sign; the remaining bits (across all bytes) are the little-endian
/// magnitude.
///
/// # Errors
///
/// Returns [`ExecError::NumericOverflow`] if `bytes.len() > MAX_NUM_SIZE`.
pub fn decode_num(bytes: &[u8]) -> Result<i64, ScriptError> {
    if bytes.len() > MAX_NUM_SIZE {
        return Err(ExecError::NumericOverflow.into());
    }
    if bytes.is_empty() {
        return Ok(0);
    }

    let mut result: i64 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        result |= (byte as i64) << (8 * i);
    }

    let last = bytes[bytes.len() - 1];
    if last & 0x80 != 0 {
        // Clear the sign bit from the magnitude, then negate.
        result &= !(0x80i64 << (8 * (bytes.len() - 1)));
        result = -result;
    }

    Ok(result)
}

/// Encodes an integer as a minimal Bitcoin Script number.
///
/// Zero encodes as the empty vector. Otherwise the magnitude is emitted
/// little-endian, with a sign bit carried in the high bit of the final
/// byte (an extra `0x00`/`0x80` byte is appended if the magnitude's most
/// significant byte already has its high bit set).
pub fn encode_num(n: i64) -> Vec<u8> {
    if n == 0 {
        return vec![];
    }

    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut result = Vec::new();

    while abs > 0 {
        result.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    if result.last().map_or(false, |&b| b & 0x80 != 0) {
        result.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        let len = result.len();
        result[len - 1] |= 0x80;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_zero() {
        assert_eq!(encode_num(0), Vec::<u8>::new());
    }

    #[test]
    fn encode_positive() {
        assert_eq!(encode_num(1), vec![0x01]);
        assert_eq!(encode_num(127), vec![0x7f]);
        assert_eq!(encode_num(128), vec![0x80, 0x00]);
        assert_eq!(encode_num(255), vec![0xff, 0x00]);
        assert_eq!(encode_num(256), vec![0x00, 0x01]);
    }

    #[test]
    fn encode_negative() {
        assert_eq!(encode_num(-1), vec![0x81]);
        assert_eq!(encode_num(-127), vec![0xff]);
        assert_eq!(encode_num(-128), vec![0x80, 0x80]);
    }

    #[test]
    fn decode_zero() {
        assert_eq!(decode_num(&[]).unwrap(), 0);
    }

    #[test]
    fn decode_negative_zero_is_zero() {
        assert_eq!(decode_num(&[0x80]).unwrap(), 0);
    }

    #[test]
    fn roundtrip_small_values() {
        for n in -1000i64..=1000 {
            let encoded = encode_num(n);
            assert_eq!(decode_num(&encoded).unwrap(), n, "n = {n}");
        }
    }

    #[test]
    fn roundtrip_minimal_encodings() {
        for &bytes in &[
            &[0x01][..],
            &[0x7f][..],
            &[0x80, 0x00][..],
            &[0xff, 0x00][..],
            &[0x00, 0x01][..],
            &[0x81][..],
            &[0x80, 0x80][..],
        ] {
            let n = decode_num(bytes).unwrap();
            assert_eq!(encode_num(n), bytes, "bytes = {bytes:02x?}");
        }
    }

    #[test]
    fn decode_overflow() {
        let err = decode_num(&[0x01, 0x02, 0x03, 0x04, 0x05]).unwrap_err();
        assert!(matches!(err, ScriptError::Exec(ExecError::NumericOverflow)));
    }

    #[test]
    fn decode_four_bytes_ok() {
        assert!(decode_num(&[0x01, 0x02, 0x03, 0x04]).is_ok());
    }

    #[test]
    fn decode_1add_edge_case() {
        // OP_PUSHDATA([0x81]) OP_1ADD should leave 0 — -1 + 1 = 0.
        assert_eq!(decode_num(&[0x81]).unwrap(), -1);
        assert_eq!(encode_num(decode_num(&[0x81]).unwrap() + 1), Vec::<u8>::new());
    }
}
