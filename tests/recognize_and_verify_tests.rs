use bitcoin_script_vm::context::Context;
use bitcoin_script_vm::flags;
use bitcoin_script_vm::hash;
use bitcoin_script_vm::recognize::{create_multisig_m_of_n, is_p2pkh, is_p2sh, public_key_hash};
use bitcoin_script_vm::tokenizer::parse_script;
use bitcoin_script_vm::verifier::verify_scripts;

#[test]
fn multisig_script_is_neither_p2pkh_nor_p2sh() {
    let keys = vec![vec![0x02; 33], vec![0x03; 33]];
    let script = create_multisig_m_of_n(2, &keys).unwrap();
    let tokens = parse_script(&script).unwrap();
    assert!(!is_p2pkh(&tokens));
    assert!(!is_p2sh(&tokens));
    assert_eq!(public_key_hash(&tokens), None);
}

#[test]
fn p2sh_wrapping_a_multisig_redeem_script_verifies() {
    let keys = vec![vec![0x02; 33], vec![0x03; 33], vec![0x04; 65]];
    let redeem_script = create_multisig_m_of_n(2, &keys).unwrap();
    let redeem_hash = hash::hash160(&redeem_script);

    // scriptPubKey: OP_HASH160 <redeem_hash> OP_EQUAL
    let mut script_pubkey = vec![0xa9, 0x14];
    script_pubkey.extend_from_slice(&redeem_hash);
    script_pubkey.push(0x87);

    assert!(is_p2sh(&parse_script(&script_pubkey).unwrap()));
    assert_eq!(
        public_key_hash(&parse_script(&script_pubkey).unwrap()),
        Some(redeem_hash)
    );

    // scriptSig: OP_0 <sig1> <sig2> <redeem_script> — dummy, two matching
    // stub signatures, then the serialized redeem script itself.
    let mut script_sig = Vec::new();
    script_sig.push(0x00); // OP_0, the CHECKMULTISIG dummy
    for _ in 0..2 {
        let sig = vec![0x30, 0x01];
        script_sig.push(sig.len() as u8);
        script_sig.extend_from_slice(&sig);
    }
    push_data(&mut script_sig, &redeem_script);

    let ok =
        verify_scripts(&script_sig, &script_pubkey, &Context::none(), flags::P2SH).unwrap();
    assert!(ok);
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
