//! Demonstrates Pay-to-Script-Hash (P2SH) validation wrapping a 2-of-3
//! multisig redeem script.
//!
//! Run with: `cargo run --example p2sh`

use bitcoin_script_vm::context::Context;
use bitcoin_script_vm::flags;
use bitcoin_script_vm::hash;
use bitcoin_script_vm::recognize::create_multisig_m_of_n;
use bitcoin_script_vm::verifier::verify_scripts;

fn main() {
    // 1. Build a 2-of-3 multisig redeem script from three fake public keys.
    let keys = vec![vec![0x02u8; 33], vec![0x03u8; 33], vec![0x04u8; 65]];
    let redeem_script = create_multisig_m_of_n(2, &keys).expect("valid multisig parameters");

    // 2. The scriptPubKey commits to HASH160(redeem_script), not the script
    //    itself: OP_HASH160 <20-byte hash> OP_EQUAL.
    let redeem_hash = hash::hash160(&redeem_script);
    let mut script_pubkey = vec![0xa9, 0x14];
    script_pubkey.extend_from_slice(&redeem_hash);
    script_pubkey.push(0x87);

    // 3. scriptSig supplies the CHECKMULTISIG dummy, two stub signatures,
    //    and finally the serialized redeem script itself.
    let mut script_sig = vec![0x00]; // OP_0, the CHECKMULTISIG dummy element
    for _ in 0..2 {
        let fake_sig = [0x30u8, 0x01];
        script_sig.push(fake_sig.len() as u8);
        script_sig.extend_from_slice(&fake_sig);
    }
    push_data(&mut script_sig, &redeem_script);

    // 4. Verification needs the P2SH flag to trigger redeem-script
    //    substitution after the outer scriptPubKey passes.
    let result = verify_scripts(&script_sig, &script_pubkey, &Context::none(), flags::P2SH)
        .expect("execution succeeded");
    println!("P2SH validation result: {result}");
}

fn push_data(out: &mut Vec<u8>, data: &[u8]) {
    let len = data.len();
    if len <= 0x4b {
        out.push(len as u8);
    } else {
        out.push(0x4c);
        out.push(len as u8);
    }
    out.extend_from_slice(data);
}
