/// A Bitcoin Script opcode.
///
/// Unlike the stub engine this grew from, every byte value 0x00-0xff maps to
/// *something*: unrecognized bytes become `OpInvalid`, carried through
/// parsing and only rejected at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // Constants
    Op0,
    Op1Negate,
    Op1,
    Op2,
    Op3,
    Op4,
    Op5,
    Op6,
    Op7,
    Op8,
    Op9,
    Op10,
    Op11,
    Op12,
    Op13,
    Op14,
    Op15,
    Op16,

    // Reserved words (fail if executed live, legal in a dead branch)
    OpReserved,
    OpVer,
    OpReserved1,
    OpReserved2,

    // Flow control
    OpNop,
    OpIf,
    OpNotIf,
    OpVerIf,
    OpVerNotIf,
    OpElse,
    OpEndIf,
    OpVerify,
    OpReturn,

    // Stack manipulation
    OpToAltStack,
    OpFromAltStack,
    Op2Drop,
    Op2Dup,
    Op3Dup,
    Op2Over,
    Op2Rot,
    Op2Swap,
    OpIfDup,
    OpDepth,
    OpDrop,
    OpDup,
    OpNip,
    OpOver,
    OpPick,
    OpRoll,
    OpRot,
    OpSwap,
    OpTuck,

    // Splice
    OpCat,
    OpSubstr,
    OpLeft,
    OpRight,
    OpSize,

    // Bitwise logic
    OpInvert,
    OpAnd,
    OpOr,
    OpXor,
    OpEqual,
    OpEqualVerify,

    // Arithmetic
    Op1Add,
    Op1Sub,
    Op2Mul,
    Op2Div,
    OpNegate,
    OpAbs,
    OpNot,
    Op0NotEqual,
    OpAdd,
    OpSub,
    OpMul,
    OpDiv,
    OpMod,
    OpLShift,
    OpRShift,
    OpBoolAnd,
    OpBoolOr,
    OpNumEqual,
    OpNumEqualVerify,
    OpNumNotEqual,
    OpLessThan,
    OpGreaterThan,
    OpLessThanOrEqual,
    OpGreaterThanOrEqual,
    OpMin,
    OpMax,
    OpWithin,

    // Crypto
    OpRipemd160,
    OpSha1,
    OpSha256,
    OpHash160,
    OpHash256,
    OpCodeSeparator,
    OpCheckSig,
    OpCheckSigVerify,
    OpCheckMultisig,
    OpCheckMultisigVerify,

    // Upgradable NOPs
    OpNop1,
    OpCheckLockTimeVerify,
    OpCheckSequenceVerify,
    OpNop4,
    OpNop5,
    OpNop6,
    OpNop7,
    OpNop8,
    OpNop9,
    OpNop10,

    /// Byte values with no defined meaning, or explicitly disabled opcodes.
    /// Carries the raw byte so diagnostics can name it.
    OpInvalid(u8),
}

impl Opcode {
    /// Convert a byte to an `Opcode`. Never returns `None`: bytes that fall
    /// in the push-data range (`0x01`-`0x4e`) are handled by the tokenizer
    /// before this is called; everything else maps onto a named opcode or
    /// `OpInvalid`.
    pub fn from_byte(byte: u8) -> Opcode {
        match byte {
            0x00 => Opcode::Op0,
            0x4f => Opcode::Op1Negate,
            0x50 => Opcode::OpReserved,
            0x51 => Opcode::Op1,
            0x52 => Opcode::Op2,
            0x53 => Opcode::Op3,
            0x54 => Opcode::Op4,
            0x55 => Opcode::Op5,
            0x56 => Opcode::Op6,
            0x57 => Opcode::Op7,
            0x58 => Opcode::Op8,
            0x59 => Opcode::Op9,
            0x5a => Opcode::Op10,
            0x5b => Opcode::Op11,
            0x5c => Opcode::Op12,
            0x5d => Opcode::Op13,
            0x5e => Opcode::Op14,
            0x5f => Opcode::Op15,
            0x60 => Opcode::Op16,

            0x61 => Opcode::OpNop,
            0x62 => Opcode::OpVer,
            0x63 => Opcode::OpIf,
            0x64 => Opcode::OpNotIf,
            0x65 => Opcode::OpVerIf,
            0x66 => Opcode::OpVerNotIf,
            0x67 => Opcode::OpElse,
            0x68 => Opcode::OpEndIf,
            0x69 => Opcode::OpVerify,
            0x6a => Opcode::OpReturn,

            0x6b => Opcode::OpToAltStack,
            0x6c => Opcode::OpFromAltStack,
            0x6d => Opcode::Op2Drop,
            0x6e => Opcode::Op2Dup,
            0x6f => Opcode::Op3Dup,
            0x70 => Opcode::Op2Over,
            0x71 => Opcode::Op2Rot,
            0x72 => Opcode::Op2Swap,
            0x73 => Opcode::OpIfDup,
            0x74 => Opcode::OpDepth,
            0x75 => Opcode::OpDrop,
            0x76 => Opcode::OpDup,
            0x77 => Opcode::OpNip,
            0x78 => Opcode::OpOver,
            0x79 => Opcode::OpPick,
            0x7a => Opcode::OpRoll,
            0x7b => Opcode::OpRot,
            0x7c => Opcode::OpSwap,
            0x7d => Opcode::OpTuck,

            0x7e => Opcode::OpCat,
            0x7f => Opcode::OpSubstr,
            0x80 => Opcode::OpLeft,
            0x81 => Opcode::OpRight,
            0x82 => Opcode::OpSize,

            0x83 => Opcode::OpInvert,
            0x84 => Opcode::OpAnd,
            0x85 => Opcode::OpOr,
            0x86 => Opcode::OpXor,
            0x87 => Opcode::OpEqual,
            0x88 => Opcode::OpEqualVerify,
            0x89 => Opcode::OpReserved1,
            0x8a => Opcode::OpReserved2,

            0x8b => Opcode::Op1Add,
            0x8c => Opcode::Op1Sub,
            0x8d => Opcode::Op2Mul,
            0x8e => Opcode::Op2Div,
            0x8f => Opcode::OpNegate,
            0x90 => Opcode::OpAbs,
            0x91 => Opcode::OpNot,
            0x92 => Opcode::Op0NotEqual,
            0x93 => Opcode::OpAdd,
            0x94 => Opcode::OpSub,
            0x95 => Opcode::OpMul,
            0x96 => Opcode::OpDiv,
            0x97 => Opcode::OpMod,
            0x98 => Opcode::OpLShift,
            0x99 => Opcode::OpRShift,
            0x9a => Opcode::OpBoolAnd,
            0x9b => Opcode::OpBoolOr,
            0x9c => Opcode::OpNumEqual,
            0x9d => Opcode::OpNumEqualVerify,
            0x9e => Opcode::OpNumNotEqual,
            0x9f => Opcode::OpLessThan,
            0xa0 => Opcode::OpGreaterThan,
            0xa1 => Opcode::OpLessThanOrEqual,
            0xa2 => Opcode::OpGreaterThanOrEqual,
            0xa3 => Opcode::OpMin,
            0xa4 => Opcode::OpMax,
            0xa5 => Opcode::OpWithin,

            0xa6 => Opcode::OpRipemd160,
            0xa7 => Opcode::OpSha1,
            0xa8 => Opcode::OpSha256,
            0xa9 => Opcode::OpHash160,
            0xaa => Opcode::OpHash256,
            0xab => Opcode::OpCodeSeparator,
            0xac => Opcode::OpCheckSig,
            0xad => Opcode::OpCheckSigVerify,
            0xae => Opcode::OpCheckMultisig,
            0xaf => Opcode::OpCheckMultisigVerify,

            0xb0 => Opcode::OpNop1,
            0xb1 => Opcode::OpCheckLockTimeVerify,
            0xb2 => Opcode::OpCheckSequenceVerify,
            0xb3 => Opcode::OpNop4,
            0xb4 => Opcode::OpNop5,
            0xb5 => Opcode::OpNop6,
            0xb6 => Opcode::OpNop7,
            0xb7 => Opcode::OpNop8,
            0xb8 => Opcode::OpNop9,
            0xb9 => Opcode::OpNop10,

            other => Opcode::OpInvalid(other),
        }
    }

    /// Convert an `Opcode` back to its canonical byte value.
    pub fn to_byte(self) -> u8 {
        match self {
            Opcode::Op0 => 0x00,
            Opcode::Op1Negate => 0x4f,
            Opcode::OpReserved => 0x50,
            Opcode::Op1 => 0x51,
            Opcode::Op2 => 0x52,
            Opcode::Op3 => 0x53,
            Opcode::Op4 => 0x54,
            Opcode::Op5 => 0x55,
            Opcode::Op6 => 0x56,
            Opcode::Op7 => 0x57,
            Opcode::Op8 => 0x58,
            Opcode::Op9 => 0x59,
            Opcode::Op10 => 0x5a,
            Opcode::Op11 => 0x5b,
            Opcode::Op12 => 0x5c,
            Opcode::Op13 => 0x5d,
            Opcode::Op14 => 0x5e,
            Opcode::Op15 => 0x5f,
            Opcode::Op16 => 0x60,

            Opcode::OpNop => 0x61,
            Opcode::OpVer => 0x62,
            Opcode::OpIf => 0x63,
            Opcode::OpNotIf => 0x64,
            Opcode::OpVerIf => 0x65,
            Opcode::OpVerNotIf => 0x66,
            Opcode::OpElse => 0x67,
            Opcode::OpEndIf => 0x68,
            Opcode::OpVerify => 0x69,
            Opcode::OpReturn => 0x6a,

            Opcode::OpToAltStack => 0x6b,
            Opcode::OpFromAltStack => 0x6c,
            Opcode::Op2Drop => 0x6d,
            Opcode::Op2Dup => 0x6e,
            Opcode::Op3Dup => 0x6f,
            Opcode::Op2Over => 0x70,
            Opcode::Op2Rot => 0x71,
            Opcode::Op2Swap => 0x72,
            Opcode::OpIfDup => 0x73,
            Opcode::OpDepth => 0x74,
            Opcode::OpDrop => 0x75,
            Opcode::OpDup => 0x76,
            Opcode::OpNip => 0x77,
            Opcode::OpOver => 0x78,
            Opcode::OpPick => 0x79,
            Opcode::OpRoll => 0x7a,
            Opcode::OpRot => 0x7b,
            Opcode::OpSwap => 0x7c,
            Opcode::OpTuck => 0x7d,

            Opcode::OpCat => 0x7e,
            Opcode::OpSubstr => 0x7f,
            Opcode::OpLeft => 0x80,
            Opcode::OpRight => 0x81,
            Opcode::OpSize => 0x82,

            Opcode::OpInvert => 0x83,
            Opcode::OpAnd => 0x84,
            Opcode::OpOr => 0x85,
            Opcode::OpXor => 0x86,
            Opcode::OpEqual => 0x87,
            Opcode::OpEqualVerify => 0x88,
            Opcode::OpReserved1 => 0x89,
            Opcode::OpReserved2 => 0x8a,

            Opcode::Op1Add => 0x8b,
            Opcode::Op1Sub => 0x8c,
            Opcode::Op2Mul => 0x8d,
            Opcode::Op2Div => 0x8e,
            Opcode::OpNegate => 0x8f,
            Opcode::OpAbs => 0x90,
            Opcode::OpNot => 0x91,
            Opcode::Op0NotEqual => 0x92,
            Opcode::OpAdd => 0x93,
            Opcode::OpSub => 0x94,
            Opcode::OpMul => 0x95,
            Opcode::OpDiv => 0x96,
            Opcode::OpMod => 0x97,
            Opcode::OpLShift => 0x98,
            Opcode::OpRShift => 0x99,
            Opcode::OpBoolAnd => 0x9a,
            Opcode::OpBoolOr => 0x9b,
            Opcode::OpNumEqual => 0x9c,
            Opcode::OpNumEqualVerify => 0x9d,
            Opcode::OpNumNotEqual => 0x9e,
            Opcode::OpLessThan => 0x9f,
            Opcode::OpGreaterThan => 0xa0,
            Opcode::OpLessThanOrEqual => 0xa1,
            Opcode::OpGreaterThanOrEqual => 0xa2,
            Opcode::OpMin => 0xa3,
            Opcode::OpMax => 0xa4,
            Opcode::OpWithin => 0xa5,

            Opcode::OpRipemd160 => 0xa6,
            Opcode::OpSha1 => 0xa7,
            Opcode::OpSha256 => 0xa8,
            Opcode::OpHash160 => 0xa9,
            Opcode::OpHash256 => 0xaa,
            Opcode::OpCodeSeparator => 0xab,
            Opcode::OpCheckSig => 0xac,
            Opcode::OpCheckSigVerify => 0xad,
            Opcode::OpCheckMultisig => 0xae,
            Opcode::OpCheckMultisigVerify => 0xaf,

            Opcode::OpNop1 => 0xb0,
            Opcode::OpCheckLockTimeVerify => 0xb1,
            Opcode::OpCheckSequenceVerify => 0xb2,
            Opcode::OpNop4 => 0xb3,
            Opcode::OpNop5 => 0xb4,
            Opcode::OpNop6 => 0xb5,
            Opcode::OpNop7 => 0xb6,
            Opcode::OpNop8 => 0xb7,
            Opcode::OpNop9 => 0xb8,
            Opcode::OpNop10 => 0xb9,

            Opcode::OpInvalid(b) => b,
        }
    }

    /// Disabled opcodes fail unconditionally, even inside a branch that
    /// isn't executing, because the tokenizer still has to reject the
    /// script as a whole.
    pub fn is_disabled(self) -> bool {
        matches!(
            self,
            Opcode::OpCat
                | Opcode::OpSubstr
                | Opcode::OpLeft
                | Opcode::OpRight
                | Opcode::OpInvert
                | Opcode::OpAnd
                | Opcode::OpOr
                | Opcode::OpXor
                | Opcode::Op2Mul
                | Opcode::Op2Div
                | Opcode::OpMul
                | Opcode::OpDiv
                | Opcode::OpMod
                | Opcode::OpLShift
                | Opcode::OpRShift
        )
    }

    /// `OP_VERIF`/`OP_VERNOTIF` are invalid even in a dead conditional
    /// branch, unlike ordinary opcodes which are skipped there.
    pub fn is_always_invalid(self) -> bool {
        matches!(self, Opcode::OpVerIf | Opcode::OpVerNotIf)
    }

    /// `OP_NOP1`, `OP_NOP4..10` are reserved for future soft forks; callers
    /// that want to reject scripts using unassigned opcode space set
    /// `DISCOURAGE_UPGRADABLE_NOPS`.
    pub fn is_upgradable_nop(self) -> bool {
        matches!(
            self,
            Opcode::OpNop1
                | Opcode::OpNop4
                | Opcode::OpNop5
                | Opcode::OpNop6
                | Opcode::OpNop7
                | Opcode::OpNop8
                | Opcode::OpNop9
                | Opcode::OpNop10
        )
    }

    /// Reserved words: invalid if executed in a live branch, but (unlike
    /// `is_always_invalid`) legal to merely skip over in a dead one.
    pub fn is_reserved_word(self) -> bool {
        matches!(
            self,
            Opcode::OpReserved | Opcode::OpVer | Opcode::OpReserved1 | Opcode::OpReserved2
        )
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Opcode::Op0 => "OP_0",
            Opcode::Op1Negate => "OP_1NEGATE",
            Opcode::Op1 => "OP_1",
            Opcode::Op2 => "OP_2",
            Opcode::Op3 => "OP_3",
            Opcode::Op4 => "OP_4",
            Opcode::Op5 => "OP_5",
            Opcode::Op6 => "OP_6",
            Opcode::Op7 => "OP_7",
            Opcode::Op8 => "OP_8",
            Opcode::Op9 => "OP_9",
            Opcode::Op10 => "OP_10",
            Opcode::Op11 => "OP_11",
            Opcode::Op12 => "OP_12",
            Opcode::Op13 => "OP_13",
            Opcode::Op14 => "OP_14",
            Opcode::Op15 => "OP_15",
            Opcode::Op16 => "OP_16",

            Opcode::OpReserved => "OP_RESERVED",
            Opcode::OpVer => "OP_VER",
            Opcode::OpReserved1 => "OP_RESERVED1",
            Opcode::OpReserved2 => "OP_RESERVED2",

            Opcode::OpNop => "OP_NOP",
            Opcode::OpIf => "OP_IF",
            Opcode::OpNotIf => "OP_NOTIF",
            Opcode::OpVerIf => "OP_VERIF",
            Opcode::OpVerNotIf => "OP_VERNOTIF",
            Opcode::OpElse => "OP_ELSE",
            Opcode::OpEndIf => "OP_ENDIF",
            Opcode::OpVerify => "OP_VERIFY",
            Opcode::OpReturn => "OP_RETURN",

            Opcode::OpToAltStack => "OP_TOALTSTACK",
            Opcode::OpFromAltStack => "OP_FROMALTSTACK",
            Opcode::Op2Drop => "OP_2DROP",
            Opcode::Op2Dup => "OP_2DUP",
            Opcode::Op3Dup => "OP_3DUP",
            Opcode::Op2Over => "OP_2OVER",
            Opcode::Op2Rot => "OP_2ROT",
            Opcode::Op2Swap => "OP_2SWAP",
            Opcode::OpIfDup => "OP_IFDUP",
            Opcode::OpDepth => "OP_DEPTH",
            Opcode::OpDrop => "OP_DROP",
            Opcode::OpDup => "OP_DUP",
            Opcode::OpNip => "OP_NIP",
            Opcode::OpOver => "OP_OVER",
            Opcode::OpPick => "OP_PICK",
            Opcode::OpRoll => "OP_ROLL",
            Opcode::OpRot => "OP_ROT",
            Opcode::OpSwap => "OP_SWAP",
            Opcode::OpTuck => "OP_TUCK",

            Opcode::OpCat => "OP_CAT",
            Opcode::OpSubstr => "OP_SUBSTR",
            Opcode::OpLeft => "OP_LEFT",
            Opcode::OpRight => "OP_RIGHT",
            Opcode::OpSize => "OP_SIZE",

            Opcode::OpInvert => "OP_INVERT",
            Opcode::OpAnd => "OP_AND",
            Opcode::OpOr => "OP_OR",
            Opcode::OpXor => "OP_XOR",
            Opcode::OpEqual => "OP_EQUAL",
            Opcode::OpEqualVerify => "OP_EQUALVERIFY",

            Opcode::Op1Add => "OP_1ADD",
            Opcode::Op1Sub => "OP_1SUB",
            Opcode::Op2Mul => "OP_2MUL",
            Opcode::Op2Div => "OP_2DIV",
            Opcode::OpNegate => "OP_NEGATE",
            Opcode::OpAbs => "OP_ABS",
            Opcode::OpNot => "OP_NOT",
            Opcode::Op0NotEqual => "OP_0NOTEQUAL",
            Opcode::OpAdd => "OP_ADD",
            Opcode::OpSub => "OP_SUB",
            Opcode::OpMul => "OP_MUL",
            Opcode::OpDiv => "OP_DIV",
            Opcode::OpMod => "OP_MOD",
            Opcode::OpLShift => "OP_LSHIFT",
            Opcode::OpRShift => "OP_RSHIFT",
            Opcode::OpBoolAnd => "OP_BOOLAND",
            Opcode::OpBoolOr => "OP_BOOLOR",
            Opcode::OpNumEqual => "OP_NUMEQUAL",
            Opcode::OpNumEqualVerify => "OP_NUMEQUALVERIFY",
            Opcode::OpNumNotEqual => "OP_NUMNOTEQUAL",
            Opcode::OpLessThan => "OP_LESSTHAN",
            Opcode::OpGreaterThan => "OP_GREATERTHAN",
            Opcode::OpLessThanOrEqual => "OP_LESSTHANOREQUAL",
            Opcode::OpGreaterThanOrEqual => "OP_GREATERTHANOREQUAL",
            Opcode::OpMin => "OP_MIN",
            Opcode::OpMax => "OP_MAX",
            Opcode::OpWithin => "OP_WITHIN",

            Opcode::OpRipemd160 => "OP_RIPEMD160",
            Opcode::OpSha1 => "OP_SHA1",
            Opcode::OpSha256 => "OP_SHA256",
            Opcode::OpHash160 => "OP_HASH160",
            Opcode::OpHash256 => "OP_HASH256",
            Opcode::OpCodeSeparator => "OP_CODESEPARATOR",
            Opcode::OpCheckSig => "OP_CHECKSIG",
            Opcode::OpCheckSigVerify => "OP_CHECKSIGVERIFY",
            Opcode::OpCheckMultisig => "OP_CHECKMULTISIG",
            Opcode::OpCheckMultisigVerify => "OP_CHECKMULTISIGVERIFY",

            Opcode::OpNop1 => "OP_NOP1",
            Opcode::OpCheckLockTimeVerify => "OP_CHECKLOCKTIMEVERIFY",
            Opcode::OpCheckSequenceVerify => "OP_CHECKSEQUENCEVERIFY",
            Opcode::OpNop4 => "OP_NOP4",
            Opcode::OpNop5 => "OP_NOP5",
            Opcode::OpNop6 => "OP_NOP6",
            Opcode::OpNop7 => "OP_NOP7",
            Opcode::OpNop8 => "OP_NOP8",
            Opcode::OpNop9 => "OP_NOP9",
            Opcode::OpNop10 => "OP_NOP10",

            Opcode::OpInvalid(b) => return write!(f, "OP_UNKNOWN(0x{b:02x})"),
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMED_OPCODES: &[Opcode] = &[
        Opcode::Op0,
        Opcode::Op1Negate,
        Opcode::OpReserved,
        Opcode::Op1,
        Opcode::Op2,
        Opcode::Op16,
        Opcode::OpVer,
        Opcode::OpNop,
        Opcode::OpIf,
        Opcode::OpNotIf,
        Opcode::OpVerIf,
        Opcode::OpVerNotIf,
        Opcode::OpElse,
        Opcode::OpEndIf,
        Opcode::OpVerify,
        Opcode::OpReturn,
        Opcode::OpToAltStack,
        Opcode::OpFromAltStack,
        Opcode::Op2Drop,
        Opcode::Op2Dup,
        Opcode::Op3Dup,
        Opcode::Op2Over,
        Opcode::Op2Rot,
        Opcode::Op2Swap,
        Opcode::OpIfDup,
        Opcode::OpDepth,
        Opcode::OpDrop,
        Opcode::OpDup,
        Opcode::OpNip,
        Opcode::OpOver,
        Opcode::OpPick,
        Opcode::OpRoll,
        Opcode::OpRot,
        Opcode::OpSwap,
        Opcode::OpTuck,
        Opcode::OpCat,
        Opcode::OpSubstr,
        Opcode::OpLeft,
        Opcode::OpRight,
        Opcode::OpSize,
        Opcode::OpInvert,
        Opcode::OpAnd,
        Opcode::OpOr,
        Opcode::OpXor,
        Opcode::OpEqual,
        Opcode::OpEqualVerify,
        Opcode::OpReserved1,
        Opcode::OpReserved2,
        Opcode::Op1Add,
        Opcode::Op1Sub,
        Opcode::Op2Mul,
        Opcode::Op2Div,
        Opcode::OpNegate,
        Opcode::OpAbs,
        Opcode::OpNot,
        Opcode::Op0NotEqual,
        Opcode::OpAdd,
        Opcode::OpSub,
        Opcode::OpMul,
        Opcode::OpDiv,
        Opcode::OpMod,
        Opcode::OpLShift,
        Opcode::OpRShift,
        Opcode::OpBoolAnd,
        Opcode::OpBoolOr,
        Opcode::OpNumEqual,
        Opcode::OpNumEqualVerify,
        Opcode::OpNumNotEqual,
        Opcode::OpLessThan,
        Opcode::OpGreaterThan,
        Opcode::OpLessThanOrEqual,
        Opcode::OpGreaterThanOrEqual,
        Opcode::OpMin,
        Opcode::OpMax,
        Opcode::OpWithin,
        Opcode::OpRipemd160,
        Opcode::OpSha1,
        Opcode::OpSha256,
        Opcode::OpHash160,
        Opcode::OpHash256,
        Opcode::OpCodeSeparator,
        Opcode::OpCheckSig,
        Opcode::OpCheckSigVerify,
        Opcode::OpCheckMultisig,
        Opcode::OpCheckMultisigVerify,
        Opcode::OpNop1,
        Opcode::OpCheckLockTimeVerify,
        Opcode::OpCheckSequenceVerify,
        Opcode::OpNop4,
        Opcode::OpNop5,
        Opcode::OpNop6,
        Opcode::OpNop7,
        Opcode::OpNop8,
        Opcode::OpNop9,
        Opcode::OpNop10,
    ];

    #[test]
    fn roundtrip_all_named_opcodes() {
        for opcode in NAMED_OPCODES {
            let byte = opcode.to_byte();
            let recovered = Opcode::from_byte(byte);
            assert_eq!(recovered, *opcode, "roundtrip failed for {opcode}");
        }
    }

    #[test]
    fn push_data_bytes_are_not_named_opcodes() {
        // The tokenizer consumes 0x01-0x4e as push instructions before
        // from_byte is ever called on them; from_byte still maps them
        // somewhere sane (OpInvalid) since the function is total.
        for byte in 0x01..=0x4eu8 {
            assert!(matches!(Opcode::from_byte(byte), Opcode::OpInvalid(_)));
        }
    }

    #[test]
    fn unmapped_bytes_become_invalid() {
        for byte in [0xba, 0xc0, 0xfe, 0xff] {
            assert_eq!(Opcode::from_byte(byte), Opcode::OpInvalid(byte));
        }
    }

    #[test]
    fn disabled_opcodes_are_flagged() {
        assert!(Opcode::OpCat.is_disabled());
        assert!(Opcode::OpMul.is_disabled());
        assert!(!Opcode::OpAdd.is_disabled());
    }

    #[test]
    fn always_invalid_opcodes_are_flagged() {
        assert!(Opcode::OpVerIf.is_always_invalid());
        assert!(Opcode::OpVerNotIf.is_always_invalid());
        assert!(!Opcode::OpIf.is_always_invalid());
    }

    #[test]
    fn upgradable_nops_are_flagged() {
        assert!(Opcode::OpNop1.is_upgradable_nop());
        assert!(Opcode::OpNop10.is_upgradable_nop());
        assert!(!Opcode::OpNop.is_upgradable_nop());
        assert!(!Opcode::OpCheckLockTimeVerify.is_upgradable_nop());
    }

    #[test]
    fn display_formatting() {
        assert_eq!(format!("{}", Opcode::OpDup), "OP_DUP");
        assert_eq!(format!("{}", Opcode::OpHash160), "OP_HASH160");
        assert_eq!(format!("{}", Opcode::Op0), "OP_0");
        assert_eq!(format!("{}", Opcode::OpCheckMultisig), "OP_CHECKMULTISIG");
        assert_eq!(format!("{}", Opcode::OpInvalid(0xff)), "OP_UNKNOWN(0xff)");
    }
}
