use crate::context::Context;
use crate::error::{ExecError, PolicyError, ScriptError};
use crate::flags::{self, VerifyFlags};
use crate::hash;
use crate::numeric::{decode_num, encode_num};
use crate::opcode::Opcode;
use crate::sig;
use crate::stack::{cast_to_bool, Stack, MAX_SCRIPT_ELEMENT_SIZE, MAX_STACK_SIZE};
use crate::token::{PushEncoding, Token};

/// Runs a token sequence against an initial main-stack state.
///
/// The alt stack and condition stack always start empty. Returns the
/// final main stack on success, or the first `ScriptError` encountered.
/// This does not itself decide pass/fail on the final stack value — that
/// judgment belongs to the verifier, which knows whether this was the
/// last script in the chain.
pub fn run(
    tokens: &[Token],
    initial_stack: Vec<Vec<u8>>,
    context: &Context,
    flags: VerifyFlags,
) -> Result<Vec<Vec<u8>>, ScriptError> {
    let mut stack = Stack::new();
    for item in initial_stack {
        stack.push(item);
    }
    let mut alt = Stack::new();
    let mut condition_stack: Vec<bool> = Vec::new();

    for token in tokens {
        let is_live = condition_stack.iter().all(|&b| b);

        if let Token::Op(opcode) = token {
            if opcode.is_disabled() {
                return Err(ExecError::DisabledOpcode(*opcode).into());
            }
            if opcode.is_always_invalid() {
                return Err(ExecError::AlwaysInvalidOpcode(*opcode).into());
            }
        }
        if let Token::PushData { bytes, .. } = token {
            if bytes.len() > MAX_SCRIPT_ELEMENT_SIZE {
                return Err(PolicyError::PushSizeExceeded.into());
            }
        }

        if !is_live {
            match token {
                Token::Op(Opcode::OpIf) | Token::Op(Opcode::OpNotIf) => {
                    condition_stack.push(false);
                }
                Token::Op(Opcode::OpElse) => {
                    let top = condition_stack
                        .last_mut()
                        .ok_or(ExecError::UnbalancedConditional)?;
                    *top = !*top;
                }
                Token::Op(Opcode::OpEndIf) => {
                    condition_stack
                        .pop()
                        .ok_or(ExecError::UnbalancedConditional)?;
                }
                _ => {}
            }
            check_stack_size(&stack, &alt)?;
            continue;
        }

        match token {
            Token::PushData { bytes, encoding } => {
                if flags::contains(flags, flags::MINIMALDATA) && !is_minimal_push(bytes, *encoding)
                {
                    return Err(PolicyError::NonMinimalPush.into());
                }
                stack.push(bytes.clone());
            }

            Token::Op(opcode) => dispatch(
                *opcode,
                &mut stack,
                &mut alt,
                &mut condition_stack,
                context,
                flags,
            )?,
        }

        check_stack_size(&stack, &alt)?;
    }

    if !condition_stack.is_empty() {
        return Err(ExecError::UnbalancedConditional.into());
    }

    Ok(stack.into_items())
}

/// Whether `bytes` pushed via `encoding` is the shortest way to push it.
///
/// A `PushData` token is never minimal for the three cases a constant
/// opcode covers more cheaply: the empty string (`OP_0`), a single byte
/// in `1..=16` (`OP_1`-`OP_16`), and the single byte `0x81` (`OP_1NEGATE`).
/// Otherwise minimality is just the shortest push-data encoding for the
/// payload length.
fn is_minimal_push(bytes: &[u8], encoding: PushEncoding) -> bool {
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() == 1 && (1..=16).contains(&bytes[0]) {
        return false;
    }
    if bytes.len() == 1 && bytes[0] == 0x81 {
        return false;
    }
    encoding == PushEncoding::minimal_for_len(bytes.len())
}

fn check_stack_size(stack: &Stack, alt: &Stack) -> Result<(), ScriptError> {
    if stack.len() + alt.len() > MAX_STACK_SIZE {
        return Err(ExecError::StackSizeExceeded.into());
    }
    Ok(())
}

fn dispatch(
    opcode: Opcode,
    stack: &mut Stack,
    alt: &mut Stack,
    condition_stack: &mut Vec<bool>,
    context: &Context,
    flags: VerifyFlags,
) -> Result<(), ScriptError> {
    match opcode {
        Opcode::Op0 => stack.push(vec![]),
        Opcode::Op1Negate => stack.push(encode_num(-1)),
        Opcode::Op1 => stack.push(encode_num(1)),
        Opcode::Op2 => stack.push(encode_num(2)),
        Opcode::Op3 => stack.push(encode_num(3)),
        Opcode::Op4 => stack.push(encode_num(4)),
        Opcode::Op5 => stack.push(encode_num(5)),
        Opcode::Op6 => stack.push(encode_num(6)),
        Opcode::Op7 => stack.push(encode_num(7)),
        Opcode::Op8 => stack.push(encode_num(8)),
        Opcode::Op9 => stack.push(encode_num(9)),
        Opcode::Op10 => stack.push(encode_num(10)),
        Opcode::Op11 => stack.push(encode_num(11)),
        Opcode::Op12 => stack.push(encode_num(12)),
        Opcode::Op13 => stack.push(encode_num(13)),
        Opcode::Op14 => stack.push(encode_num(14)),
        Opcode::Op15 => stack.push(encode_num(15)),
        Opcode::Op16 => stack.push(encode_num(16)),

        Opcode::OpReserved | Opcode::OpVer | Opcode::OpReserved1 | Opcode::OpReserved2 => {
            return Err(ExecError::BadOpcode(opcode).into());
        }

        Opcode::OpNop => {}
        Opcode::OpNop1
        | Opcode::OpNop4
        | Opcode::OpNop5
        | Opcode::OpNop6
        | Opcode::OpNop7
        | Opcode::OpNop8
        | Opcode::OpNop9
        | Opcode::OpNop10 => {
            if flags::contains(flags, flags::DISCOURAGE_UPGRADABLE_NOPS) {
                return Err(PolicyError::DiscouragedUpgradableNop(opcode).into());
            }
        }

        Opcode::OpIf => {
            let top = stack.pop()?;
            condition_stack.push(cast_to_bool(&top));
        }
        Opcode::OpNotIf => {
            let top = stack.pop()?;
            condition_stack.push(!cast_to_bool(&top));
        }
        Opcode::OpElse => {
            let top = condition_stack
                .last_mut()
                .ok_or(ExecError::UnbalancedConditional)?;
            *top = !*top;
        }
        Opcode::OpEndIf => {
            condition_stack
                .pop()
                .ok_or(ExecError::UnbalancedConditional)?;
        }
        Opcode::OpVerify => {
            let top = stack.pop()?;
            if !cast_to_bool(&top) {
                return Err(ExecError::VerifyFailed.into());
            }
        }
        Opcode::OpReturn => return Err(ExecError::OpReturn.into()),

        Opcode::OpToAltStack => {
            let item = stack.pop()?;
            alt.push(item);
        }
        Opcode::OpFromAltStack => {
            let item = alt.pop()?;
            stack.push(item);
        }
        Opcode::Op2Drop => {
            stack.pop()?;
            stack.pop()?;
        }
        Opcode::Op2Dup => {
            let a = stack.peek_from_top(1)?.to_vec();
            let b = stack.peek_from_top(0)?.to_vec();
            stack.push(a);
            stack.push(b);
        }
        Opcode::Op3Dup => {
            let a = stack.peek_from_top(2)?.to_vec();
            let b = stack.peek_from_top(1)?.to_vec();
            let c = stack.peek_from_top(0)?.to_vec();
            stack.push(a);
            stack.push(b);
            stack.push(c);
        }
        Opcode::Op2Over => {
            let a = stack.peek_from_top(3)?.to_vec();
            let b = stack.peek_from_top(2)?.to_vec();
            stack.push(a);
            stack.push(b);
        }
        Opcode::Op2Rot => {
            let a = stack.remove_from_top(5)?;
            let b = stack.remove_from_top(4)?;
            stack.push(a);
            stack.push(b);
        }
        Opcode::Op2Swap => {
            let a = stack.remove_from_top(3)?;
            let b = stack.remove_from_top(2)?;
            stack.push(a);
            stack.push(b);
        }
        Opcode::OpIfDup => {
            let top = stack.peek()?.to_vec();
            if cast_to_bool(&top) {
                stack.push(top);
            }
        }
        Opcode::OpDepth => {
            let depth = stack.len() as i64;
            stack.push(encode_num(depth));
        }
        Opcode::OpDrop => {
            stack.pop()?;
        }
        Opcode::OpDup => {
            let top = stack.peek()?.to_vec();
            stack.push(top);
        }
        Opcode::OpNip => {
            let idx = stack
                .len()
                .checked_sub(2)
                .ok_or(ExecError::StackUnderflow)?;
            stack.remove(idx)?;
        }
        Opcode::OpOver => {
            let item = stack.peek_from_top(1)?.to_vec();
            stack.push(item);
        }
        Opcode::OpPick => {
            let n = decode_num(&stack.pop()?)?;
            if n < 0 {
                return Err(ExecError::StackUnderflow.into());
            }
            let item = stack.peek_from_top(n as usize)?.to_vec();
            stack.push(item);
        }
        Opcode::OpRoll => {
            let n = decode_num(&stack.pop()?)?;
            if n < 0 {
                return Err(ExecError::StackUnderflow.into());
            }
            let item = stack.remove_from_top(n as usize)?;
            stack.push(item);
        }
        Opcode::OpRot => {
            let item = stack.remove_from_top(2)?;
            stack.push(item);
        }
        Opcode::OpSwap => {
            let item = stack.remove_from_top(1)?;
            stack.push(item);
        }
        Opcode::OpTuck => {
            let top = stack.peek()?.to_vec();
            let idx = stack
                .len()
                .checked_sub(2)
                .ok_or(ExecError::StackUnderflow)?;
            stack_insert(stack, idx, top)?;
        }

        Opcode::OpSize => {
            let len = stack.peek()?.len() as i64;
            stack.push(encode_num(len));
        }

        Opcode::OpEqual => {
            let b = stack.pop()?;
            let a = stack.pop()?;
            stack.push_bool(a == b);
        }
        Opcode::OpEqualVerify => {
            let b = stack.pop()?;
            let a = stack.pop()?;
            if a != b {
                return Err(ExecError::VerifyFailed.into());
            }
        }

        Opcode::Op1Add => unary_numeric(stack, |n| n + 1)?,
        Opcode::Op1Sub => unary_numeric(stack, |n| n - 1)?,
        Opcode::OpNegate => unary_numeric(stack, |n| -n)?,
        Opcode::OpAbs => unary_numeric(stack, |n| n.abs())?,
        Opcode::OpNot => {
            let n = decode_num(&stack.pop()?)?;
            stack.push_bool(n == 0);
        }
        Opcode::Op0NotEqual => {
            let n = decode_num(&stack.pop()?)?;
            stack.push_bool(n != 0);
        }
        Opcode::OpAdd => binary_numeric(stack, |a, b| a + b)?,
        Opcode::OpSub => binary_numeric(stack, |a, b| a - b)?,
        Opcode::OpBoolAnd => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push_bool(a != 0 && b != 0);
        }
        Opcode::OpBoolOr => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push_bool(a != 0 || b != 0);
        }
        Opcode::OpNumEqual => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push_bool(a == b);
        }
        Opcode::OpNumEqualVerify => {
            let (a, b) = pop_two_numbers(stack)?;
            if a != b {
                return Err(ExecError::VerifyFailed.into());
            }
        }
        Opcode::OpNumNotEqual => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push_bool(a != b);
        }
        Opcode::OpLessThan => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push_bool(a < b);
        }
        Opcode::OpGreaterThan => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push_bool(a > b);
        }
        Opcode::OpLessThanOrEqual => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push_bool(a <= b);
        }
        Opcode::OpGreaterThanOrEqual => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push_bool(a >= b);
        }
        Opcode::OpMin => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push(encode_num(a.min(b)));
        }
        Opcode::OpMax => {
            let (a, b) = pop_two_numbers(stack)?;
            stack.push(encode_num(a.max(b)));
        }
        Opcode::OpWithin => {
            let max = decode_num(&stack.pop()?)?;
            let min = decode_num(&stack.pop()?)?;
            let n = decode_num(&stack.pop()?)?;
            stack.push_bool(n >= min && n < max);
        }

        Opcode::OpRipemd160 => {
            let data = stack.pop()?;
            stack.push(hash::ripemd160(&data).to_vec());
        }
        Opcode::OpSha1 => {
            let data = stack.pop()?;
            stack.push(hash::sha1(&data).to_vec());
        }
        Opcode::OpSha256 => {
            let data = stack.pop()?;
            stack.push(hash::sha256(&data).to_vec());
        }
        Opcode::OpHash160 => {
            let data = stack.pop()?;
            stack.push(hash::hash160(&data).to_vec());
        }
        Opcode::OpHash256 => {
            let data = stack.pop()?;
            stack.push(hash::hash256(&data).to_vec());
        }
        Opcode::OpCodeSeparator => {
            // No-op in this core: splicing the signed script at the
            // separator point is a sighash concern, delegated entirely
            // to the caller's SighashProvider (see SPEC_FULL.md §9).
        }

        Opcode::OpCheckSig => {
            let result = check_sig(stack, context, flags)?;
            stack.push_bool(result);
        }
        Opcode::OpCheckSigVerify => {
            let result = check_sig(stack, context, flags)?;
            if !result {
                return Err(ExecError::VerifyFailed.into());
            }
        }
        Opcode::OpCheckMultisig => {
            let result = check_multisig(stack, context, flags)?;
            stack.push_bool(result);
        }
        Opcode::OpCheckMultisigVerify => {
            let result = check_multisig(stack, context, flags)?;
            if !result {
                return Err(ExecError::VerifyFailed.into());
            }
        }

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
        | Opcode::OpRShift => {
            // Disabled opcodes are intercepted before dispatch; reachable
            // only if that invariant is ever broken.
            return Err(ExecError::DisabledOpcode(opcode).into());
        }
        Opcode::OpVerIf | Opcode::OpVerNotIf => {
            return Err(ExecError::AlwaysInvalidOpcode(opcode).into());
        }

        Opcode::OpCheckLockTimeVerify | Opcode::OpCheckSequenceVerify => {
            // Both require a transaction's locktime/sequence fields,
            // out of this core's scope; treated as upgradable NOPs.
            if flags::contains(flags, flags::DISCOURAGE_UPGRADABLE_NOPS) {
                return Err(PolicyError::DiscouragedUpgradableNop(opcode).into());
            }
        }

        Opcode::OpInvalid(b) => return Err(ExecError::UnknownOpcode(b).into()),
    }

    Ok(())
}

/// Inserts `item` at absolute index `idx` (0 = bottom) by draining and
/// replaying the elements above it. `Stack` has no raw insert; `OP_TUCK`
/// is rare enough that this stays a small local helper instead of
/// growing the `Stack` API.
fn stack_insert(stack: &mut Stack, idx: usize, item: Vec<u8>) -> Result<(), ScriptError> {
    let mut buffer = Vec::new();
    while stack.len() > idx {
        buffer.push(stack.pop()?);
    }
    stack.push(item);
    while let Some(v) = buffer.pop() {
        stack.push(v);
    }
    Ok(())
}

fn unary_numeric(stack: &mut Stack, f: impl FnOnce(i64) -> i64) -> Result<(), ScriptError> {
    let n = decode_num(&stack.pop()?)?;
    stack.push(encode_num(f(n)));
    Ok(())
}

fn binary_numeric(
    stack: &mut Stack,
    f: impl FnOnce(i64, i64) -> i64,
) -> Result<(), ScriptError> {
    let (a, b) = pop_two_numbers(stack)?;
    stack.push(encode_num(f(a, b)));
    Ok(())
}

/// Pops `b` then `a`, returning `(a, b)` so callers can write `a OP b`
/// directly, matching the script's own `a b OP` reading order.
fn pop_two_numbers(stack: &mut Stack) -> Result<(i64, i64), ScriptError> {
    let b = decode_num(&stack.pop()?)?;
    let a = decode_num(&stack.pop()?)?;
    Ok((a, b))
}

fn check_sig(
    stack: &mut Stack,
    context: &Context,
    flags: VerifyFlags,
) -> Result<bool, ScriptError> {
    let pubkey = stack.pop()?;
    let sig_bytes = stack.pop()?;

    if sig::check_signature_encoding(&sig_bytes, flags).is_err() {
        if hard_fail_on_bad_encoding(flags) {
            return Err(ExecError::VerifyFailed.into());
        }
        return Ok(false);
    }
    if sig::check_pubkey_encoding(&pubkey, flags).is_err() {
        if flags::contains(flags, flags::STRICTENC) {
            return Err(ExecError::VerifyFailed.into());
        }
        return Ok(false);
    }
    if sig_bytes.is_empty() {
        return Ok(false);
    }

    let sighash_type = sig_bytes[sig_bytes.len() - 1];
    let der = &sig_bytes[..sig_bytes.len() - 1];
    let digest = match context.sighash {
        Some(provider) => provider.digest(sighash_type),
        None => return Ok(!der.is_empty() && !pubkey.is_empty()),
    };

    Ok(sig::verify_ecdsa(der, &pubkey, &digest))
}

fn check_multisig(
    stack: &mut Stack,
    context: &Context,
    flags: VerifyFlags,
) -> Result<bool, ScriptError> {
    let pubkey_count = decode_num(&stack.pop()?)?;
    if !(0..=20).contains(&pubkey_count) {
        return Err(ExecError::InvalidMultisigCount.into());
    }
    let mut pubkeys = Vec::with_capacity(pubkey_count as usize);
    for _ in 0..pubkey_count {
        pubkeys.push(stack.pop()?);
    }

    let sig_count = decode_num(&stack.pop()?)?;
    if !(0..=pubkey_count).contains(&sig_count) {
        return Err(ExecError::InvalidMultisigCount.into());
    }
    let mut sigs = Vec::with_capacity(sig_count as usize);
    for _ in 0..sig_count {
        sigs.push(stack.pop()?);
    }

    // Consensus bug reproduced intentionally: one extra item is popped
    // and otherwise ignored, except under NULLDUMMY.
    let dummy = stack.pop()?;
    if flags::contains(flags, flags::NULLDUMMY) && !dummy.is_empty() {
        return Err(PolicyError::NullDummy.into());
    }

    let mut sig_idx = 0;
    for pubkey in &pubkeys {
        if sig_idx == sigs.len() {
            break;
        }
        if sig::check_pubkey_encoding(pubkey, flags).is_err() {
            if flags::contains(flags, flags::STRICTENC) {
                return Err(ExecError::VerifyFailed.into());
            }
            continue;
        }
        let sig_bytes = &sigs[sig_idx];
        if sig::check_signature_encoding(sig_bytes, flags).is_err() {
            if hard_fail_on_bad_encoding(flags) {
                return Err(ExecError::VerifyFailed.into());
            }
            continue;
        }
        if sig_bytes.is_empty() {
            continue;
        }

        let sighash_type = sig_bytes[sig_bytes.len() - 1];
        let der = &sig_bytes[..sig_bytes.len() - 1];
        let matched = match context.sighash {
            Some(provider) => sig::verify_ecdsa(der, pubkey, &provider.digest(sighash_type)),
            None => !der.is_empty() && !pubkey.is_empty(),
        };
        if matched {
            sig_idx += 1;
        }
    }

    Ok(sig_idx == sigs.len())
}

fn hard_fail_on_bad_encoding(flags: VerifyFlags) -> bool {
    flags::contains(flags, flags::DERSIG) || flags::contains(flags, flags::STRICTENC)
}
