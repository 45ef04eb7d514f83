// Copyright (c) 2022-2023 The MobileCoin Foundation

use thiserror::Error;

/// Protocol-level error type, covering request encoding and response
/// decoding failures
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApduError {
    /// Derivation path text does not match `m(/<digits>'?)*` or a
    /// segment index exceeds the hardening offset
    #[error("invalid derivation path")]
    InvalidDerivationPath,

    /// String exceeds the single length byte (255) limit
    #[error("string too long for length-prefixed encoding")]
    StringTooLong,

    /// Frame payload exceeds the 65535 byte extended-length limit
    #[error("payload too long for APDU length encoding")]
    LengthOverflow,

    /// Encode buffer too small for the frame
    #[error("invalid buffer length")]
    InvalidLength,

    /// Response payload does not match the command's decoding contract
    #[error("malformed response payload")]
    MalformedResponse,

    /// Signature payload was not exactly 65 bytes
    #[error("malformed signature (received {0} bytes, expected 65)")]
    MalformedSignature(usize),

    /// Address field was not the expected 40 ASCII hex digits
    #[error("unexpected address length (received {0} bytes, expected 40)")]
    UnexpectedAddressLength(usize),
}

/// Encode buffer failures from [`encdec`] map to [`ApduError::InvalidLength`]
impl From<encdec::Error> for ApduError {
    fn from(_: encdec::Error) -> Self {
        ApduError::InvalidLength
    }
}
