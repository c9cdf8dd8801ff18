//! A Bitcoin Script parser, interpreter, and P2SH-aware verifier.
//!
//! Bitcoin Script is the stack-based programming language used to define
//! spending conditions for Bitcoin transaction outputs. This crate
//! implements the full non-witness opcode set, Pay-to-Public-Key-Hash
//! (P2PKH), Pay-to-Script-Hash (P2SH, BIP16), and `m`-of-`n` multisig
//! recognition and construction.
//!
//! # Consensus warning
//!
//! **This crate is NOT consensus-compatible with Bitcoin Core.**
//!
//! A reimplementation of Bitcoin Script cannot guarantee identical
//! behavior to Bitcoin Core's C++ interpreter across every edge case —
//! number encoding boundaries, error ordering, and other subtle behaviors
//! that define Bitcoin's consensus rules. Transaction construction,
//! witness programs, and sighash computation are out of scope; this
//! crate depends on a caller-supplied [`context::SighashProvider`] for
//! the signing digest.
//!
//! **Do not use this crate to validate real transactions or protect real
//! funds.**
//!
//! # What this crate implements
//!
//! - [`tokenizer`]: parses raw script bytes into [`token::Token`]s,
//!   handling all four push-data encodings (direct, PUSHDATA1/2/4), and
//!   serializes them back to a canonical, minimally-encoded byte string.
//! - [`engine`]: a stack-based virtual machine implementing the full
//!   flow-control, stack-manipulation, arithmetic, hashing, and
//!   signature-check opcode set, with disabled/always-invalid/reserved
//!   opcode classification and policy-flag-gated checks.
//! - [`verifier`]: composes a `scriptSig`/`scriptPubKey` pair into a
//!   pass/fail verdict, including P2SH redeem-script substitution.
//! - [`recognize`]: P2PKH/P2SH pattern matching and `m`-of-`n` multisig
//!   script construction.
//! - [`flags`]: the policy bitset (`P2SH`, `DERSIG`, `LOW_S`, `STRICTENC`,
//!   `NULLDUMMY`, `SIGPUSHONLY`, `MINIMALDATA`,
//!   `DISCOURAGE_UPGRADABLE_NOPS`).
//! - [`hash`]: SHA-1, SHA-256, RIPEMD-160, HASH160, and HASH256.
//!
//! # OP_CHECKSIG / OP_CHECKMULTISIG behavior
//!
//! Signature verification needs a signing digest, which this crate does
//! not compute — it has no transaction model. Callers supply one through
//! [`context::SighashProvider`] via [`context::Context`]. With
//! `Context::none()`, `OP_CHECKSIG` and `OP_CHECKMULTISIG` fall back to a
//! stub mode that accepts any non-empty signature/pubkey pair, which is
//! useful for exercising script logic in isolation.
//!
//! With the `secp256k1` Cargo feature enabled, a supplied digest is
//! verified with real ECDSA via the `secp256k1` crate.
//!
//! # Quick example
//!
//! ```rust
//! use bitcoin_script_vm::tokenizer::parse_script_hex;
//! use bitcoin_script_vm::engine::run;
//! use bitcoin_script_vm::context::Context;
//! use bitcoin_script_vm::flags;
//!
//! // OP_1 OP_1 OP_EQUAL
//! let tokens = parse_script_hex("515187").unwrap();
//! let stack = run(&tokens, vec![], &Context::none(), flags::NONE).unwrap();
//! assert_eq!(stack.last().unwrap(), &[0x01]);
//! ```
//!
//! # Feature flags
//!
//! | Feature     | Description                                        |
//! |-------------|----------------------------------------------------|
//! | `secp256k1` | Enables real ECDSA signature verification for      |
//! |             | `OP_CHECKSIG`/`OP_CHECKMULTISIG` via `secp256k1`.  |

pub mod context;
pub mod engine;
pub mod error;
pub mod flags;
pub mod hash;
pub mod hex;
pub mod numeric;
pub mod opcode;
pub mod recognize;
pub(crate) mod sig;
pub(crate) mod stack;
pub mod token;
pub mod tokenizer;
pub mod verifier;
