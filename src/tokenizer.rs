use crate::error::{ParseError, ScriptError};
use crate::hex::decode_hex;
use crate::opcode::Opcode;
use crate::token::{PushEncoding, Token};

/// Consensus cap on total serialized script length.
pub const MAX_SCRIPT_SIZE: usize = 10_000;

/// Parses raw script bytes into a sequence of tokens.
///
/// Walks the byte slice left-to-right, dispatching on each byte:
/// - `0x01`-`0x4b`: direct push (byte value = data length)
/// - `0x4c`: OP_PUSHDATA1 (1-byte length prefix)
/// - `0x4d`: OP_PUSHDATA2 (2-byte little-endian length prefix)
/// - `0x4e`: OP_PUSHDATA4 (4-byte little-endian length prefix)
/// - All other bytes: looked up via [`Opcode::from_byte`], which never
///   fails — unrecognized bytes become `Opcode::OpInvalid` and are only
///   rejected when the engine tries to execute them.
///
/// Returns `ParseError::ScriptTooLarge` if `bytes.len()` exceeds
/// [`MAX_SCRIPT_SIZE`], or `ParseError::UnexpectedEndOfScript` if a
/// push-data instruction extends beyond the end of the byte slice.
pub fn parse_script(bytes: &[u8]) -> Result<Vec<Token>, ScriptError> {
    if bytes.len() > MAX_SCRIPT_SIZE {
        return Err(ParseError::ScriptTooLarge.into());
    }

    let mut tokens = Vec::new();
    let mut pos = 0;
    let len = bytes.len();

    while pos < len {
        let byte = bytes[pos];
        pos += 1;

        match byte {
            // Direct push: byte value is the data length (1-75 bytes)
            0x01..=0x4b => {
                let n = byte as usize;
                if pos + n > len {
                    return Err(ParseError::UnexpectedEndOfScript.into());
                }
                tokens.push(Token::PushData {
                    bytes: bytes[pos..pos + n].to_vec(),
                    encoding: PushEncoding::Direct,
                });
                pos += n;
            }

            // OP_PUSHDATA1: next 1 byte is the length
            0x4c => {
                if pos >= len {
                    return Err(ParseError::UnexpectedEndOfScript.into());
                }
                let n = bytes[pos] as usize;
                pos += 1;
                if pos + n > len {
                    return Err(ParseError::UnexpectedEndOfScript.into());
                }
                tokens.push(Token::PushData {
                    bytes: bytes[pos..pos + n].to_vec(),
                    encoding: PushEncoding::PushData1,
                });
                pos += n;
            }

            // OP_PUSHDATA2: next 2 bytes (little-endian) are the length
            0x4d => {
                if pos + 2 > len {
                    return Err(ParseError::UnexpectedEndOfScript.into());
                }
                let n = u16::from_le_bytes([bytes[pos], bytes[pos + 1]]) as usize;
                pos += 2;
                if pos + n > len {
                    return Err(ParseError::UnexpectedEndOfScript.into());
                }
                tokens.push(Token::PushData {
                    bytes: bytes[pos..pos + n].to_vec(),
                    encoding: PushEncoding::PushData2,
                });
                pos += n;
            }

            // OP_PUSHDATA4: next 4 bytes (little-endian) are the length
            0x4e => {
                if pos + 4 > len {
                    return Err(ParseError::UnexpectedEndOfScript.into());
                }
                let n = u32::from_le_bytes([
                    bytes[pos],
                    bytes[pos + 1],
                    bytes[pos + 2],
                    bytes[pos + 3],
                ]) as usize;
                pos += 4;
                if pos + n > len {
                    return Err(ParseError::UnexpectedEndOfScript.into());
                }
                tokens.push(Token::PushData {
                    bytes: bytes[pos..pos + n].to_vec(),
                    encoding: PushEncoding::PushData4,
                });
                pos += n;
            }

            // All other bytes: look up as opcode. Total, never fails.
            _ => tokens.push(Token::Op(Opcode::from_byte(byte))),
        }
    }

    Ok(tokens)
}

/// Parses a hex-encoded script string into tokens.
///
/// Convenience wrapper that decodes the hex string via [`decode_hex`],
/// then passes the resulting bytes to [`parse_script`].
pub fn parse_script_hex(hex: &str) -> Result<Vec<Token>, ScriptError> {
    let bytes = decode_hex(hex)?;
    parse_script(&bytes)
}

/// Serializes tokens back to raw script bytes.
///
/// Always emits the shortest push encoding for each `PushData` token's
/// length, regardless of the `encoding` field it carries — this is a
/// canonicalizing serializer, not a byte-identity round trip. Use the
/// original bytes, not `serialize_script(parse_script(bytes)?)`, when
/// byte-for-byte fidelity to a non-minimal encoding matters.
pub fn serialize_script(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::new();
    for token in tokens {
        match token {
            Token::PushData { bytes, .. } => {
                let len = bytes.len();
                if len <= 0x4b {
                    out.push(len as u8);
                } else if len <= 0xff {
                    out.push(0x4c);
                    out.push(len as u8);
                } else if len <= 0xffff {
                    out.push(0x4d);
                    out.extend_from_slice(&(len as u16).to_le_bytes());
                } else {
                    out.push(0x4e);
                    out.extend_from_slice(&(len as u32).to_le_bytes());
                }
                out.extend_from_slice(bytes);
            }
            Token::Op(opcode) => out.push(opcode.to_byte()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script() {
        let tokens = parse_script(&[]).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn single_opcode() {
        let tokens = parse_script(&[0x76]).unwrap(); // OP_DUP
        assert_eq!(tokens, vec![Token::Op(Opcode::OpDup)]);
    }

    #[test]
    fn direct_push_3_bytes() {
        let tokens = parse_script(&[0x03, 0xaa, 0xbb, 0xcc]).unwrap();
        assert_eq!(tokens, vec![Token::push(vec![0xaa, 0xbb, 0xcc])]);
    }

    #[test]
    fn direct_push_truncated() {
        let err = parse_script(&[0x03, 0xaa, 0xbb]).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Parse(ParseError::UnexpectedEndOfScript)
        ));
    }

    #[test]
    fn pushdata1() {
        let tokens = parse_script(&[0x4c, 0x02, 0xde, 0xad]).unwrap();
        assert_eq!(
            tokens,
            vec![Token::PushData {
                bytes: vec![0xde, 0xad],
                encoding: PushEncoding::PushData1,
            }]
        );
    }

    #[test]
    fn pushdata1_missing_length() {
        let err = parse_script(&[0x4c]).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Parse(ParseError::UnexpectedEndOfScript)
        ));
    }

    #[test]
    fn pushdata1_truncated_data() {
        let err = parse_script(&[0x4c, 0x05, 0x01, 0x02]).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Parse(ParseError::UnexpectedEndOfScript)
        ));
    }

    #[test]
    fn pushdata2() {
        let tokens = parse_script(&[0x4d, 0x03, 0x00, 0xaa, 0xbb, 0xcc]).unwrap();
        assert_eq!(
            tokens,
            vec![Token::PushData {
                bytes: vec![0xaa, 0xbb, 0xcc],
                encoding: PushEncoding::PushData2,
            }]
        );
    }

    #[test]
    fn pushdata2_missing_length() {
        let err = parse_script(&[0x4d, 0x03]).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Parse(ParseError::UnexpectedEndOfScript)
        ));
    }

    #[test]
    fn pushdata4() {
        let tokens = parse_script(&[0x4e, 0x03, 0x00, 0x00, 0x00, 0xaa, 0xbb, 0xcc]).unwrap();
        assert_eq!(
            tokens,
            vec![Token::PushData {
                bytes: vec![0xaa, 0xbb, 0xcc],
                encoding: PushEncoding::PushData4,
            }]
        );
    }

    #[test]
    fn pushdata4_missing_length() {
        let err = parse_script(&[0x4e, 0x01, 0x00]).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Parse(ParseError::UnexpectedEndOfScript)
        ));
    }

    #[test]
    fn unknown_opcode_parses_as_invalid() {
        let tokens = parse_script(&[0xba]).unwrap();
        assert_eq!(tokens, vec![Token::Op(Opcode::OpInvalid(0xba))]);
    }

    #[test]
    fn reserved_word_parses_fine_at_parse_time() {
        let tokens = parse_script(&[0x50]).unwrap(); // OP_RESERVED
        assert_eq!(tokens, vec![Token::Op(Opcode::OpReserved)]);
    }

    #[test]
    fn script_too_large_is_rejected() {
        let bytes = vec![0x61u8; MAX_SCRIPT_SIZE + 1]; // OP_NOP repeated
        let err = parse_script(&bytes).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Parse(ParseError::ScriptTooLarge)
        ));
    }

    #[test]
    fn op0_parses() {
        let tokens = parse_script(&[0x00]).unwrap();
        assert_eq!(tokens, vec![Token::Op(Opcode::Op0)]);
    }

    #[test]
    fn multi_token_script() {
        // OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
        let mut script = vec![0x76, 0xa9, 0x14];
        script.extend_from_slice(&[0xab; 20]);
        script.push(0x88);
        script.push(0xac);
        let tokens = parse_script(&script).unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], Token::Op(Opcode::OpDup));
        assert_eq!(tokens[1], Token::Op(Opcode::OpHash160));
        assert_eq!(tokens[2], Token::push(vec![0xab; 20]));
        assert_eq!(tokens[3], Token::Op(Opcode::OpEqualVerify));
        assert_eq!(tokens[4], Token::Op(Opcode::OpCheckSig));
    }

    #[test]
    fn parse_script_hex_roundtrip() {
        let hex = "76a914".to_string() + &"ab".repeat(20) + "88ac";
        let tokens = parse_script_hex(&hex).unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], Token::Op(Opcode::OpDup));
        assert_eq!(tokens[4], Token::Op(Opcode::OpCheckSig));
    }

    #[test]
    fn parse_script_hex_invalid() {
        let err = parse_script_hex("zzzz").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidHex));
    }

    #[test]
    fn pushdata1_zero_length() {
        let tokens = parse_script(&[0x4c, 0x00]).unwrap();
        assert_eq!(
            tokens,
            vec![Token::PushData {
                bytes: vec![],
                encoding: PushEncoding::PushData1,
            }]
        );
    }

    #[test]
    fn direct_push_1_byte() {
        let tokens = parse_script(&[0x01, 0xff]).unwrap();
        assert_eq!(tokens, vec![Token::push(vec![0xff])]);
    }

    #[test]
    fn serialize_script_picks_minimal_encoding_regardless_of_input_form() {
        let tokens = vec![Token::PushData {
            bytes: vec![0xaa, 0xbb, 0xcc],
            encoding: PushEncoding::PushData4,
        }];
        assert_eq!(serialize_script(&tokens), vec![0x03, 0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn serialize_then_parse_roundtrips_opcodes() {
        let tokens = vec![Token::Op(Opcode::OpDup), Token::Op(Opcode::OpHash160)];
        let bytes = serialize_script(&tokens);
        assert_eq!(parse_script(&bytes).unwrap(), tokens);
    }
}
