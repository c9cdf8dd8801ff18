/// Script verification policy flags.
///
/// A plain `u32` bitset rather than a `bitflags`-generated type: the set
/// is small, fixed, and every bit has exactly one well-known meaning, so a
/// handful of `const` values plus `contains`/`union` cover it without
/// pulling in a macro-based dependency.
pub type VerifyFlags = u32;

/// No flags set: the bare interpreter with no extra policy checks.
pub const NONE: VerifyFlags = 0;

/// Evaluate P2SH (BIP16): after the normal two-script evaluation succeeds
/// and the scriptPubKey matches the P2SH pattern, re-run the scriptSig's
/// last pushed element as a redeem script against the rest of the
/// scriptSig's stack.
pub const P2SH: VerifyFlags = 1 << 0;

/// Require DER-strict signature encoding (reject BER-but-not-DER
/// signatures that libconsensus historically tolerated).
pub const DERSIG: VerifyFlags = 1 << 1;

/// Require signatures' `s` value to be in the lower half of the curve
/// order (the canonical low-S form).
pub const LOW_S: VerifyFlags = 1 << 2;

/// Require strict public key and sighash-type encoding in signature
/// checks, on top of `DERSIG`.
pub const STRICTENC: VerifyFlags = 1 << 3;

/// Require `OP_CHECKMULTISIG`'s extra dummy stack element to be the empty
/// byte string.
pub const NULLDUMMY: VerifyFlags = 1 << 4;

/// Require `scriptSig` to contain push operations only.
pub const SIGPUSHONLY: VerifyFlags = 1 << 5;

/// Require all pushes to use the shortest possible encoding for their
/// payload length.
pub const MINIMALDATA: VerifyFlags = 1 << 6;

/// Reject scripts that execute `OP_NOP1`/`OP_NOP4`-`OP_NOP10` (opcode
/// space reserved for future soft forks).
pub const DISCOURAGE_UPGRADABLE_NOPS: VerifyFlags = 1 << 7;

/// Returns `true` if every bit set in `flag` is also set in `flags`.
pub fn contains(flags: VerifyFlags, flag: VerifyFlags) -> bool {
    flags & flag == flag
}

/// Returns the union of two flag sets.
pub fn union(a: VerifyFlags, b: VerifyFlags) -> VerifyFlags {
    a | b
}

/// All flags a strict, modern-policy verifier would set.
pub const STANDARD: VerifyFlags =
    P2SH | DERSIG | LOW_S | STRICTENC | NULLDUMMY | SIGPUSHONLY | MINIMALDATA;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_checks_individual_bits() {
        let flags = union(P2SH, MINIMALDATA);
        assert!(contains(flags, P2SH));
        assert!(contains(flags, MINIMALDATA));
        assert!(!contains(flags, STRICTENC));
    }

    #[test]
    fn none_contains_nothing_but_itself() {
        assert!(contains(NONE, NONE));
        assert!(!contains(NONE, P2SH));
    }

    #[test]
    fn standard_includes_the_expected_flags() {
        assert!(contains(STANDARD, P2SH));
        assert!(contains(STANDARD, DERSIG));
        assert!(contains(STANDARD, LOW_S));
        assert!(contains(STANDARD, STRICTENC));
        assert!(contains(STANDARD, NULLDUMMY));
        assert!(contains(STANDARD, SIGPUSHONLY));
        assert!(contains(STANDARD, MINIMALDATA));
        assert!(!contains(STANDARD, DISCOURAGE_UPGRADABLE_NOPS));
    }

    #[test]
    fn bits_are_distinct() {
        let all = [
            P2SH,
            DERSIG,
            LOW_S,
            STRICTENC,
            NULLDUMMY,
            SIGPUSHONLY,
            MINIMALDATA,
            DISCOURAGE_UPGRADABLE_NOPS,
        ];
        for (i, &a) in all.iter().enumerate() {
            for (j, &b) in all.iter().enumerate() {
                if i != j {
                    assert_eq!(a & b, 0, "flags {i} and {j} overlap");
                }
            }
        }
    }
}
