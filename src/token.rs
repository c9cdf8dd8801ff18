use crate::opcode::Opcode;

/// Which of the four push-data instruction forms produced a given
/// [`Token::PushData`].
///
/// Plain bytes alone don't carry this; a 3-byte push could have been
/// written as a direct push (`0x03 <3 bytes>`) or, wastefully, as
/// `OP_PUSHDATA1 0x03 <3 bytes>`. Tracking the form is what lets the
/// `MINIMALDATA` policy check reject the wasteful one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushEncoding {
    /// `0x01`-`0x4b`: the opcode byte itself is the length.
    Direct,
    /// `OP_PUSHDATA1` (`0x4c`): one length byte follows.
    PushData1,
    /// `OP_PUSHDATA2` (`0x4d`): a little-endian 2-byte length follows.
    PushData2,
    /// `OP_PUSHDATA4` (`0x4e`): a little-endian 4-byte length follows.
    PushData4,
}

impl PushEncoding {
    /// The encoding a shortest-possible serializer would choose for a
    /// payload of the given length.
    pub fn minimal_for_len(len: usize) -> PushEncoding {
        if len <= 0x4b {
            PushEncoding::Direct
        } else if len <= 0xff {
            PushEncoding::PushData1
        } else if len <= 0xffff {
            PushEncoding::PushData2
        } else {
            PushEncoding::PushData4
        }
    }
}

/// A parsed script element — either an opcode instruction or pushed data.
///
/// This is the output of the tokenizer and the input to the execution
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Data pushed onto the stack by a push-data instruction, along with
    /// which encoding form produced it.
    PushData {
        bytes: Vec<u8>,
        encoding: PushEncoding,
    },

    /// An opcode instruction (any non-push operation, including `OP_0`
    /// and `OP_1`-`OP_16`, which are constants rather than pushes).
    Op(Opcode),
}

impl Token {
    /// Shorthand for the common case of a minimally-encoded push.
    pub fn push(bytes: Vec<u8>) -> Token {
        let encoding = PushEncoding::minimal_for_len(bytes.len());
        Token::PushData { bytes, encoding }
    }

    /// True for any push-data token or a constant-pushing opcode
    /// (`OP_0`, `OP_1NEGATE`, `OP_1`-`OP_16`). Used by the `SIGPUSHONLY`/
    /// P2SH-push-only check.
    pub fn is_push(&self) -> bool {
        match self {
            Token::PushData { .. } => true,
            Token::Op(op) => matches!(
                op,
                Opcode::Op0
                    | Opcode::Op1Negate
                    | Opcode::Op1
                    | Opcode::Op2
                    | Opcode::Op3
                    | Opcode::Op4
                    | Opcode::Op5
                    | Opcode::Op6
                    | Opcode::Op7
                    | Opcode::Op8
                    | Opcode::Op9
                    | Opcode::Op10
                    | Opcode::Op11
                    | Opcode::Op12
                    | Opcode::Op13
                    | Opcode::Op14
                    | Opcode::Op15
                    | Opcode::Op16
            ),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::PushData { bytes, .. } => {
                write!(f, "<")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, ">")
            }
            Token::Op(opcode) => write!(f, "{opcode}"),
        }
    }
}
