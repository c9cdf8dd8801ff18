use crate::error::SignatureEncodingError;
use crate::flags::{self, VerifyFlags};

/// Validates a raw signature's byte-level encoding against the policy
/// flags in effect. Splits off and validates the trailing sighash-type
/// byte under `STRICTENC`, and the DER body under `DERSIG`/`STRICTENC`
/// (which always imply DER-strictness) and `LOW_S`.
///
/// An empty signature is always accepted here: `OP_CHECKSIG` treats an
/// empty signature as "no signature supplied," which is a valid (if
/// always-failing) input, not an encoding error.
pub fn check_signature_encoding(
    sig: &[u8],
    flags: VerifyFlags,
) -> Result<(), SignatureEncodingError> {
    if sig.is_empty() {
        return Ok(());
    }

    let require_der = flags::contains(flags, flags::DERSIG) || flags::contains(flags, flags::STRICTENC);
    if require_der && !is_valid_der_signature(&sig[..sig.len() - 1]) {
        return Err(SignatureEncodingError::BadDerEncoding);
    }

    if flags::contains(flags, flags::LOW_S) && !has_low_s(&sig[..sig.len() - 1]) {
        return Err(SignatureEncodingError::HighS);
    }

    if flags::contains(flags, flags::STRICTENC) {
        let sighash_type = sig[sig.len() - 1] & !0x80; // mask ANYONECANPAY
        if !(1..=3).contains(&sighash_type) {
            return Err(SignatureEncodingError::BadSighashType);
        }
    }

    Ok(())
}

/// Validates a public key's byte-level encoding under `STRICTENC`.
/// Accepts compressed (33-byte, `0x02`/`0x03` prefix) and uncompressed
/// (65-byte, `0x04` prefix) SEC1 points.
pub fn check_pubkey_encoding(
    pubkey: &[u8],
    flags: VerifyFlags,
) -> Result<(), SignatureEncodingError> {
    if !flags::contains(flags, flags::STRICTENC) {
        return Ok(());
    }
    if is_valid_pubkey(pubkey) {
        Ok(())
    } else {
        Err(SignatureEncodingError::BadPubkeyEncoding)
    }
}

fn is_valid_pubkey(pubkey: &[u8]) -> bool {
    match pubkey.len() {
        33 => pubkey[0] == 0x02 || pubkey[0] == 0x03,
        65 => pubkey[0] == 0x04,
        _ => false,
    }
}

/// Checks the strict DER grammar for an ECDSA signature body (the
/// `SEQUENCE { INTEGER r, INTEGER s }` structure, without the trailing
/// sighash-type byte). This is the same byte grammar Bitcoin Core's
/// `IsValidSignatureEncoding` enforces, not a general ASN.1 parse.
fn is_valid_der_signature(sig: &[u8]) -> bool {
    // Minimum: 30 len 02 len(r) [r] 02 len(s) [s], with r, s each at
    // least 1 byte.
    if sig.len() < 9 || sig.len() > 73 {
        return false;
    }
    if sig[0] != 0x30 || sig[1] as usize != sig.len() - 2 {
        return false;
    }
    if sig[2] != 0x02 {
        return false;
    }
    let r_len = sig[3] as usize;
    if r_len == 0 || 4 + r_len >= sig.len() {
        return false;
    }
    let s_type_idx = 4 + r_len;
    if sig[s_type_idx] != 0x02 {
        return false;
    }
    let s_len_idx = s_type_idx + 1;
    if s_len_idx >= sig.len() {
        return false;
    }
    let s_len = sig[s_len_idx] as usize;
    let s_start = s_len_idx + 1;
    if s_len == 0 || s_start + s_len != sig.len() {
        return false;
    }

    let r = &sig[4..4 + r_len];
    let s = &sig[s_start..s_start + s_len];
    is_valid_der_integer(r) && is_valid_der_integer(s)
}

/// A DER INTEGER must have no unnecessary leading `0x00` bytes, and must
/// not have its high bit set without a leading `0x00` (which would make
/// it read as negative).
fn is_valid_der_integer(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    if bytes[0] & 0x80 != 0 {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == 0x00 && bytes[1] & 0x80 == 0 {
        return false;
    }
    true
}

/// Checks whether a DER-encoded signature's `s` value is in the lower
/// half of the secp256k1 curve order, the canonical "low S" form BIP62
/// requires. Pure byte comparison against the curve order's midpoint, no
/// field arithmetic needed.
fn has_low_s(sig: &[u8]) -> bool {
    if !is_valid_der_signature(sig) {
        return false;
    }
    let r_len = sig[3] as usize;
    let s_type_idx = 4 + r_len;
    let s_len = sig[s_type_idx + 1] as usize;
    let s_start = s_type_idx + 2;
    let s = &sig[s_start..s_start + s_len];

    // secp256k1 order n; low-S requires s <= n/2.
    const HALF_ORDER: [u8; 32] = [
        0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b,
        0x20, 0xa0,
    ];

    let mut padded = [0u8; 32];
    if s.len() > 32 {
        return false;
    }
    padded[32 - s.len()..].copy_from_slice(s);
    padded <= HALF_ORDER
}

/// Stub signature verification used when the `secp256k1` feature is
/// disabled: there is no way to check a real ECDSA signature without a
/// curve library, so any non-empty signature and non-empty pubkey are
/// treated as valid. This lets callers exercise script logic end to end
/// before wiring up a real sighash/crypto backend.
#[cfg(not(feature = "secp256k1"))]
pub fn verify_ecdsa(sig_der: &[u8], pubkey: &[u8], _digest: &[u8; 32]) -> bool {
    !sig_der.is_empty() && !pubkey.is_empty()
}

/// Real ECDSA verification against a 32-byte message digest, using
/// `secp256k1`'s verification-only context (no signing key material is
/// ever handled here).
#[cfg(feature = "secp256k1")]
pub fn verify_ecdsa(sig_der: &[u8], pubkey: &[u8], digest: &[u8; 32]) -> bool {
    use secp256k1::ecdsa::Signature;
    use secp256k1::{Message, PublicKey, Secp256k1};

    let secp = Secp256k1::verification_only();

    let signature = match Signature::from_der(sig_der) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    let public_key = match PublicKey::from_slice(pubkey) {
        Ok(pk) => pk,
        Err(_) => return false,
    };
    let message = match Message::from_digest_slice(digest) {
        Ok(msg) => msg,
        Err(_) => return false,
    };

    secp.verify_ecdsa(&message, &signature, &public_key).is_ok()
}
