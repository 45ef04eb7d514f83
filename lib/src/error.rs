// Copyright (c) 2022-2023 The MobileCoin Foundation

use core::fmt::{Debug, Display};

use tokio::time::error::Elapsed;

use ledger_eth_apdu::{status::Status, ApduError};

/// Ledger Ethereum client error type, generic over the transport error
#[derive(Debug, thiserror::Error)]
pub enum Error<E: Debug + Display> {
    /// Transport failure in the underlying channel
    #[error("transport error: {0}")]
    Transport(E),

    /// Protocol encode / decode failure
    #[error("protocol error: {0}")]
    Apdu(#[from] ApduError),

    /// Response shorter than the two byte status word
    #[error("truncated response ({0} bytes)")]
    TruncatedResponse(usize),

    /// Non-success status word from the device, classified where the
    /// code is known
    #[error("device error {code:#06x}: {}", status_message(.kind))]
    Device { code: u16, kind: Option<Status> },

    /// Timeout waiting for device response
    #[error("timeout waiting for device response")]
    RequestTimeout,

    /// Response parsed to a result variant not matching the command
    #[error("unexpected response type")]
    UnexpectedResponse,
}

impl<E: Debug + Display> From<Elapsed> for Error<E> {
    fn from(_: Elapsed) -> Self {
        Error::RequestTimeout
    }
}

fn status_message(kind: &Option<Status>) -> String {
    match kind {
        Some(s) => s.to_string(),
        None => "unknown status".to_string(),
    }
}
