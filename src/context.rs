/// Supplies the 32-byte transaction digest that `OP_CHECKSIG`/
/// `OP_CHECKMULTISIG` verify against.
///
/// Computing a real sighash requires a full transaction model (inputs,
/// outputs, locktime, the sighash-type byte's ANYONECANPAY/SINGLE/NONE
/// variations) that this crate treats as out of scope; callers that have
/// one implement this trait to plug it in. `sighash_type` is the trailing
/// byte of the signature being checked, already split off by the caller.
pub trait SighashProvider {
    fn digest(&self, sighash_type: u8) -> [u8; 32];
}

/// A `SighashProvider` that always returns the same precomputed digest,
/// regardless of sighash type. Useful for tests and for callers that have
/// already computed a single digest out of band.
pub struct FixedSighash(pub [u8; 32]);

impl SighashProvider for FixedSighash {
    fn digest(&self, _sighash_type: u8) -> [u8; 32] {
        self.0
    }
}

/// Everything the engine needs beyond the token stream and policy flags:
/// the sighash collaborator used by signature checks.
pub struct Context<'a> {
    pub sighash: Option<&'a dyn SighashProvider>,
}

impl<'a> Context<'a> {
    /// A context with no sighash collaborator: `OP_CHECKSIG` and
    /// `OP_CHECKMULTISIG` fall back to stub mode (see `sig.rs`).
    pub fn none() -> Self {
        Context { sighash: None }
    }

    pub fn with_sighash(provider: &'a dyn SighashProvider) -> Self {
        Context {
            sighash: Some(provider),
        }
    }
}
