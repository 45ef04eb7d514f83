// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol / APDU definitions for Ledger Ethereum app communication
//!
//! This module provides the wire-level protocol for the Ethereum
//! nanoapp: frame construction and payload chunking, the command set
//! with per-command request encoding and response parsing, and the
//! status word taxonomy.
//!
//! Commands are encoded as ISO 7816-style APDUs under class [`APDU_CLA`]
//! with a short/extended length field (see [`encode::encode_chunk_length`]).
//! Payloads larger than [`MAX_CHUNK_LEN`] bytes are split across frames
//! with a continuation marker in P1.

pub mod command;
pub mod encode;
pub mod frame;
pub mod path;
pub mod status;
pub mod types;

mod error;
pub use error::ApduError;

/// Ethereum app APDU class
pub const APDU_CLA: u8 = 0xe0;

/// Maximum payload bytes carried by a single frame
pub const MAX_CHUNK_LEN: usize = 150;

/// Ethereum app APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Instruction {
    /// Derive and return the address for a BIP32 path
    GetAddress = 0x02,

    /// Sign an RLP encoded transaction
    SignTransaction = 0x04,

    /// Fetch app flags and version
    GetAppConfiguration = 0x06,

    /// Sign an EIP-191 personal message
    SignPersonalMessage = 0x08,

    /// Provide trusted ERC-20 token metadata
    ProvideErc20TokenInfo = 0x0a,
}
