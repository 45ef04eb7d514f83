// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Ethereum app command set
//!
//! Each [`Command`] variant owns its request data for the lifetime of
//! one exchange and defines both the ordered frame sequence it encodes
//! to and the parsing of its final response payload. Framing and
//! parsing are pure functions of the command data, the exchange engine
//! in `ledger-eth` drives them over a transport.

use alloy_primitives::Address;

use crate::{
    encode::{decode_ascii_address, encode_string, encode_u32},
    frame::{chunk, ApduFrame, P1_FIRST},
    path::DerivationPath,
    types::{AppConfiguration, Signature, TokenInfo},
    ApduError, Instruction,
};

/// A single device command
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Command {
    /// Derive and return the address for a BIP32 path
    GetAddress { path: DerivationPath },

    /// Sign an RLP encoded transaction
    SignTransaction {
        raw_tx: Vec<u8>,
        path: DerivationPath,
    },

    /// Fetch app flags and version
    GetAppConfiguration,

    /// Sign an EIP-191 personal message
    SignPersonalMessage {
        message: String,
        path: DerivationPath,
    },

    /// Provide trusted ERC-20 token metadata
    ProvideErc20TokenInfo(TokenInfo),
}

/// Parsed response for a [`Command`], one variant per result shape
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Address(Address),
    Signature(Signature),
    AppConfig(AppConfiguration),
    /// Commands with no result payload
    Ack,
}

impl Command {
    /// Instruction code for this command
    pub fn instruction(&self) -> Instruction {
        match self {
            Command::GetAddress { .. } => Instruction::GetAddress,
            Command::SignTransaction { .. } => Instruction::SignTransaction,
            Command::GetAppConfiguration => Instruction::GetAppConfiguration,
            Command::SignPersonalMessage { .. } => Instruction::SignPersonalMessage,
            Command::ProvideErc20TokenInfo(_) => Instruction::ProvideErc20TokenInfo,
        }
    }

    /// Serialize into the ordered frame sequence for transmission
    pub fn frames(&self) -> Result<Vec<ApduFrame>, ApduError> {
        match self {
            Command::GetAddress { path } => Ok(vec![ApduFrame::new(
                Instruction::GetAddress,
                P1_FIRST,
                0x00,
                path.to_bytes()?,
            )]),

            Command::SignTransaction { raw_tx, path } => {
                let mut payload = path.to_bytes()?;
                payload.extend_from_slice(raw_tx);
                Ok(chunk(Instruction::SignTransaction, &payload))
            }

            // the fixed [0, 4] data field mirrors the app's expected
            // response length
            Command::GetAppConfiguration => Ok(vec![ApduFrame::new(
                Instruction::GetAppConfiguration,
                P1_FIRST,
                0x00,
                vec![0x00, 0x04],
            )]),

            Command::SignPersonalMessage { message, path } => {
                let mut payload = path.to_bytes()?;
                payload.extend_from_slice(&encode_string(message)?);
                Ok(chunk(Instruction::SignPersonalMessage, &payload))
            }

            Command::ProvideErc20TokenInfo(info) => {
                let mut payload = encode_string(&info.symbol)?;
                payload.extend_from_slice(info.address.as_slice());
                payload.extend_from_slice(&encode_u32(info.decimals));
                payload.extend_from_slice(&encode_u32(info.chain_id));
                payload.extend_from_slice(&info.signature);
                Ok(vec![ApduFrame::new(
                    Instruction::ProvideErc20TokenInfo,
                    P1_FIRST,
                    0x00,
                    payload,
                )])
            }
        }
    }

    /// Parse the final frame's response payload (status word already
    /// stripped by the exchange engine)
    pub fn parse_response(&self, payload: &[u8]) -> Result<Response, ApduError> {
        match self {
            Command::GetAddress { .. } => parse_address(payload).map(Response::Address),

            Command::SignTransaction { .. } | Command::SignPersonalMessage { .. } => {
                Signature::parse(payload).map(Response::Signature)
            }

            Command::GetAppConfiguration => {
                AppConfiguration::parse(payload).map(Response::AppConfig)
            }

            Command::ProvideErc20TokenInfo(_) => Ok(Response::Ack),
        }
    }
}

/// GetAddress response payload: a length-prefixed public key followed
/// by a length-prefixed 40 ASCII-hex-digit address
fn parse_address(payload: &[u8]) -> Result<Address, ApduError> {
    let key_len = *payload.first().ok_or(ApduError::MalformedResponse)? as usize;

    let rest = payload
        .get(1 + key_len..)
        .ok_or(ApduError::MalformedResponse)?;
    let addr_len = *rest.first().ok_or(ApduError::MalformedResponse)? as usize;
    if addr_len != 40 {
        return Err(ApduError::UnexpectedAddressLength(addr_len));
    }

    let addr = rest.get(1..41).ok_or(ApduError::MalformedResponse)?;
    decode_ascii_address(addr)
}
