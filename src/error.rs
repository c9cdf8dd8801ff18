use crate::opcode::Opcode;

/// Failures encountered while parsing raw script bytes into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Script byte stream ended mid-instruction (truncated push payload).
    UnexpectedEndOfScript,

    /// Script exceeds the 10 000-byte consensus cap.
    ScriptTooLarge,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedEndOfScript => write!(f, "unexpected end of script"),
            ParseError::ScriptTooLarge => write!(f, "script exceeds the 10000-byte limit"),
        }
    }
}

/// Policy violations: failures that depend on which [`crate::flags::VerifyFlags`]
/// are active, rather than being intrinsic to the bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// `scriptSig` contained a non-push opcode under `SIGPUSHONLY` (or P2SH,
    /// which always requires push-only regardless of flags).
    SigScriptNotPushOnly,

    /// A push used a non-canonical encoding while `MINIMALDATA` was set.
    NonMinimalPush,

    /// `OP_NOP1..10` executed while `DISCOURAGE_UPGRADABLE_NOPS` was set.
    DiscouragedUpgradableNop(Opcode),

    /// A pushed element exceeded 520 bytes.
    PushSizeExceeded,

    /// `OP_CHECKMULTISIG`'s dummy element was non-empty under `NULLDUMMY`.
    NullDummy,
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyError::SigScriptNotPushOnly => write!(f, "scriptSig is not push-only"),
            PolicyError::NonMinimalPush => write!(f, "non-minimal push data"),
            PolicyError::DiscouragedUpgradableNop(op) => {
                write!(f, "discouraged upgradable NOP: {op}")
            }
            PolicyError::PushSizeExceeded => write!(f, "push data exceeds 520 bytes"),
            PolicyError::NullDummy => {
                write!(f, "OP_CHECKMULTISIG dummy element must be empty")
            }
        }
    }
}

/// Failures intrinsic to executing the bytecode, independent of policy flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// Stack had fewer elements than the operation required.
    StackUnderflow,

    /// A disabled opcode was encountered (fails even in a dead branch).
    DisabledOpcode(Opcode),

    /// `OP_VERIF`/`OP_VERNOTIF` encountered (fails even in a dead branch).
    AlwaysInvalidOpcode(Opcode),

    /// A reserved word (`OP_RESERVED`, `OP_VER`, ...) executed in a live branch.
    BadOpcode(Opcode),

    /// An unmapped opcode byte (`OpInvalid`) executed in a live branch.
    UnknownOpcode(u8),

    /// `OP_VERIFY`, `OP_EQUALVERIFY`, `OP_NUMEQUALVERIFY`, or a `*VERIFY`
    /// signature op consumed a false value.
    VerifyFailed,

    /// `OP_IF`/`OP_NOTIF`/`OP_ELSE`/`OP_ENDIF` are not properly balanced.
    UnbalancedConditional,

    /// A numeric stack item exceeded the 4-byte decode cap.
    NumericOverflow,

    /// `|main| + |alt|` exceeded 1000 elements.
    StackSizeExceeded,

    /// `OP_RETURN` was reached in a live branch.
    OpReturn,

    /// `OP_CHECKMULTISIG`'s `m`/`n` counts were out of the consensus range.
    InvalidMultisigCount,
}

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecError::StackUnderflow => {
                write!(f, "stack underflow: not enough elements on the stack")
            }
            ExecError::DisabledOpcode(op) => write!(f, "disabled opcode: {op}"),
            ExecError::AlwaysInvalidOpcode(op) => write!(f, "always-invalid opcode: {op}"),
            ExecError::BadOpcode(op) => write!(f, "bad opcode: {op}"),
            ExecError::UnknownOpcode(b) => write!(f, "unknown opcode: 0x{b:02x}"),
            ExecError::VerifyFailed => write!(f, "verify failed: top stack element is false"),
            ExecError::UnbalancedConditional => {
                write!(f, "unbalanced conditional: mismatched IF/ELSE/ENDIF")
            }
            ExecError::NumericOverflow => write!(f, "numeric stack item exceeds 4 bytes"),
            ExecError::StackSizeExceeded => {
                write!(f, "combined stack size exceeds 1000 elements")
            }
            ExecError::OpReturn => write!(f, "OP_RETURN encountered: script is unspendable"),
            ExecError::InvalidMultisigCount => {
                write!(f, "invalid OP_CHECKMULTISIG key or signature count")
            }
        }
    }
}

/// Failures surfaced by the signature/pubkey encoding collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncodingError {
    /// The DER signature body is malformed.
    BadDerEncoding,

    /// The signature's `s` value is not in the lower half of the curve
    /// order, under `LOW_S`.
    HighS,

    /// The trailing sighash-type byte is not a recognized value, under
    /// `STRICTENC`.
    BadSighashType,

    /// The public key is not a valid compressed/uncompressed SEC1 encoding,
    /// under `STRICTENC`.
    BadPubkeyEncoding,
}

impl std::fmt::Display for SignatureEncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureEncodingError::BadDerEncoding => write!(f, "invalid DER signature encoding"),
            SignatureEncodingError::HighS => write!(f, "signature S value is not low-S"),
            SignatureEncodingError::BadSighashType => write!(f, "invalid sighash type byte"),
            SignatureEncodingError::BadPubkeyEncoding => write!(f, "invalid public key encoding"),
        }
    }
}

/// All error conditions that can arise during script parsing or execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Parse(ParseError),
    Policy(PolicyError),
    Exec(ExecError),
    SignatureEncoding(SignatureEncodingError),

    /// A hex string could not be decoded (odd length or invalid character).
    InvalidHex,
}

impl From<ParseError> for ScriptError {
    fn from(e: ParseError) -> Self {
        ScriptError::Parse(e)
    }
}

impl From<PolicyError> for ScriptError {
    fn from(e: PolicyError) -> Self {
        ScriptError::Policy(e)
    }
}

impl From<ExecError> for ScriptError {
    fn from(e: ExecError) -> Self {
        ScriptError::Exec(e)
    }
}

impl From<SignatureEncodingError> for ScriptError {
    fn from(e: SignatureEncodingError) -> Self {
        ScriptError::SignatureEncoding(e)
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Parse(e) => write!(f, "{e}"),
            ScriptError::Policy(e) => write!(f, "{e}"),
            ScriptError::Exec(e) => write!(f, "{e}"),
            ScriptError::SignatureEncoding(e) => write!(f, "{e}"),
            ScriptError::InvalidHex => write!(f, "invalid hex string"),
        }
    }
}

impl std::error::Error for ScriptError {}
