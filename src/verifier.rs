use crate::context::Context;
use crate::engine::run;
use crate::error::{PolicyError, ScriptError};
use crate::flags::{self, VerifyFlags};
use crate::opcode::Opcode;
use crate::stack::cast_to_bool;
use crate::token::Token;
use crate::tokenizer::parse_script;

/// Verifies a `(scriptSig, scriptPubKey)` pair end to end.
///
/// Runs `scriptSig` on an empty stack, then `scriptPubKey` on the
/// resulting stack, and inspects the final top-of-stack truthiness. When
/// `flags::P2SH` is set and `scriptPubKey` matches the P2SH pattern, the
/// redeem script embedded in `scriptSig` is extracted and run as a third
/// stage. A script that fails to produce a true top-of-stack value
/// returns `Ok(false)`, not an error — only a hard rule violation (a
/// banned opcode, stack underflow, an oversize push, and so on) is a
/// `ScriptError`.
pub fn verify_scripts(
    script_sig_bytes: &[u8],
    script_pubkey_bytes: &[u8],
    context: &Context,
    flags: VerifyFlags,
) -> Result<bool, ScriptError> {
    let sig_tokens = parse_script(script_sig_bytes)?;
    if flags::contains(flags, flags::SIGPUSHONLY) && !is_push_only(&sig_tokens) {
        return Err(PolicyError::SigScriptNotPushOnly.into());
    }

    let stack1 = run(&sig_tokens, vec![], context, flags)?;

    let pubkey_tokens = parse_script(script_pubkey_bytes)?;
    let stack2 = run(&pubkey_tokens, stack1.clone(), context, flags)?;

    if !top_is_true(&stack2) {
        return Ok(false);
    }

    if flags::contains(flags, flags::P2SH) && is_p2sh(&pubkey_tokens) {
        if !is_push_only(&sig_tokens) {
            return Err(PolicyError::SigScriptNotPushOnly.into());
        }

        let mut remainder = stack1;
        let redeem_script_bytes = remainder
            .pop()
            .ok_or(crate::error::ExecError::StackUnderflow)?;
        let redeem_tokens = parse_script(&redeem_script_bytes)?;
        let stack3 = run(&redeem_tokens, remainder, context, flags)?;
        return Ok(top_is_true(&stack3));
    }

    Ok(true)
}

fn top_is_true(stack: &[Vec<u8>]) -> bool {
    match stack.last() {
        Some(top) => cast_to_bool(top),
        None => false,
    }
}

/// A script is push-only if every token is a data push or one of the
/// small-integer constant opcodes (`OP_0`..`OP_16`, `OP_1NEGATE`).
fn is_push_only(tokens: &[Token]) -> bool {
    tokens.iter().all(|t| t.is_push())
}

fn is_p2sh(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [
            Token::Op(Opcode::OpHash160),
            Token::PushData { bytes, .. },
            Token::Op(Opcode::OpEqual)
        ] if bytes.len() == 20
    )
}
