use crate::error::{ExecError, ScriptError};
use crate::opcode::Opcode;
use crate::token::Token;

/// Returns `true` if `tokens` is a P2PKH scriptPubKey:
/// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
///
/// Also accepts a single trailing `OP_NOP` — a quirk some historical
/// wallets left behind that is still considered a valid P2PKH shape, not
/// a malformed one.
pub fn is_p2pkh(tokens: &[Token]) -> bool {
    let core = match tokens {
        [rest @ .., Token::Op(Opcode::OpNop)] => rest,
        rest => rest,
    };
    matches!(
        core,
        [
            Token::Op(Opcode::OpDup),
            Token::Op(Opcode::OpHash160),
            Token::PushData { bytes, .. },
            Token::Op(Opcode::OpEqualVerify),
            Token::Op(Opcode::OpCheckSig),
        ] if bytes.len() == 20
    )
}

/// Returns `true` if `tokens` is a P2SH scriptPubKey:
/// `OP_HASH160 <20 bytes> OP_EQUAL`.
pub fn is_p2sh(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [
            Token::Op(Opcode::OpHash160),
            Token::PushData { bytes, .. },
            Token::Op(Opcode::OpEqual),
        ] if bytes.len() == 20
    )
}

/// Extracts the embedded 20-byte hash from a recognized P2PKH or P2SH
/// scriptPubKey. Returns `None` for any other shape.
pub fn public_key_hash(tokens: &[Token]) -> Option<[u8; 20]> {
    if is_p2pkh(tokens) {
        let core = match tokens {
            [rest @ .., Token::Op(Opcode::OpNop)] => rest,
            rest => rest,
        };
        return match core {
            [_, _, Token::PushData { bytes, .. }, _, _] => bytes.as_slice().try_into().ok(),
            _ => None,
        };
    }
    if is_p2sh(tokens) {
        return match tokens {
            [_, Token::PushData { bytes, .. }, _] => bytes.as_slice().try_into().ok(),
            _ => None,
        };
    }
    None
}

/// Builds an `m`-of-`n` multisig scriptPubKey:
/// `OP_M <key₁>..<keyₙ> OP_N OP_CHECKMULTISIG`.
///
/// `1 ≤ m ≤ n ≤ 16` is required; `OP_K` is encoded as the single-byte
/// opcode `0x50 + K`.
pub fn create_multisig_m_of_n(m: u8, keys: &[Vec<u8>]) -> Result<Vec<u8>, ScriptError> {
    let n = keys.len();
    if m == 0 || n == 0 || n > 16 || (m as usize) > n {
        return Err(ExecError::InvalidMultisigCount.into());
    }

    let mut out = Vec::new();
    out.push(0x50 + m);
    for key in keys {
        push_data(&mut out, key);
    }
    out.push(0x50 + n as u8);
    out.push(Opcode::OpCheckMultisig.to_byte());
    Ok(out)
}

fn push_data(out: &mut Vec<u8>, data: &[u8]) {
    let len = data.len();
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
    out.extend_from_slice(data);
}
