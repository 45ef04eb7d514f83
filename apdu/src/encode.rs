// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Shared encoding / decoding primitives for APDU construction

use alloy_primitives::{Address, U256};
use byteorder::{BigEndian, ByteOrder};

use crate::ApduError;

/// Encode a string as a single length byte followed by its UTF-8 bytes
pub fn encode_string(value: &str) -> Result<Vec<u8>, ApduError> {
    let b = value.as_bytes();
    if b.len() > 0xff {
        return Err(ApduError::StringTooLong);
    }

    let mut out = Vec::with_capacity(1 + b.len());
    out.push(b.len() as u8);
    out.extend_from_slice(b);

    Ok(out)
}

/// Encode a fixed-width big-endian u32
pub fn encode_u32(value: u32) -> [u8; 4] {
    let mut b = [0u8; 4];
    BigEndian::write_u32(&mut b, value);
    b
}

/// Encode a frame payload length using the smart-card short/extended
/// convention: no bytes for empty payloads, one byte up to 255, the
/// single byte `[0]` for exactly 256, and `[0, hi, lo]` above that.
///
/// The `[0]` form for 256 is required to disambiguate a full short
/// frame from an empty one and must be preserved exactly.
pub fn encode_chunk_length(len: usize) -> Result<Vec<u8>, ApduError> {
    match len {
        0 => Ok(vec![]),
        1..=255 => Ok(vec![len as u8]),
        256 => Ok(vec![0]),
        257..=65535 => Ok(vec![0, (len >> 8) as u8, (len & 0xff) as u8]),
        _ => Err(ApduError::LengthOverflow),
    }
}

/// Decode an unsigned big-endian integer of up to 32 bytes
pub fn decode_u256(bytes: &[u8]) -> Result<U256, ApduError> {
    if bytes.len() > 32 {
        return Err(ApduError::MalformedResponse);
    }

    Ok(U256::from_be_slice(bytes))
}

/// Decode a 40 ASCII-hex-digit address as returned by the device
pub fn decode_ascii_address(bytes: &[u8]) -> Result<Address, ApduError> {
    if bytes.len() != 40 {
        return Err(ApduError::UnexpectedAddressLength(bytes.len()));
    }

    let mut raw = [0u8; 20];
    hex::decode_to_slice(bytes, &mut raw).map_err(|_| ApduError::MalformedResponse)?;

    Ok(Address::from(raw))
}
