use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Computes the SHA-1 hash of the input data.
///
/// Returns a 20-byte digest. Bitcoin Script exposes this as `OP_SHA1`;
/// it sees no use in address derivation, which relies on [`hash160`].
pub fn sha1(data: &[u8]) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes the SHA-256 hash of the input data.
///
/// Returns a 32-byte digest. This is the fundamental hash primitive
/// used throughout Bitcoin for transaction hashing, block hashing,
/// and as a building block for [`hash160`] and [`hash256`].
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes the RIPEMD-160 hash of the input data.
///
/// Returns a 20-byte digest. Used in Bitcoin as the second step
/// of the [`hash160`] address-derivation hash.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes HASH160: RIPEMD-160 of SHA-256.
///
/// This is the standard Bitcoin address hash function, used in P2PKH
/// to derive a 20-byte address from a public key.
///
/// `hash160(data) = ripemd160(sha256(data))`
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Computes HASH256: double SHA-256.
///
/// This is the standard Bitcoin transaction and block hash function.
///
/// `hash256(data) = sha256(sha256(data))`
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}
