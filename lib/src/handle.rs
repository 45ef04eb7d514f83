// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Handle for a connected Ethereum app device
//!
//! This serializes command exchanges over one shared channel and
//! exposes the typed operation set. Generic over [Exchange] to support
//! different underlying transports.

use std::{sync::Arc, time::Duration};

use alloy_primitives::Address;
use log::debug;
use tokio::{sync::Mutex, time::timeout};

use ledger_eth_apdu::{
    command::{Command, Response},
    path::DerivationPath,
    status::{Status, STATUS_OK},
    types::{AppConfiguration, Signature, TokenInfo},
};

use crate::{transport::Exchange, Error};

/// Default per-request timeout, long enough to cover on-device user
/// confirmation of signing requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client handle for a connected device.
///
/// Cloning shares the underlying channel and its exchange lock, so
/// clones may issue commands concurrently without interleaving frames.
pub struct DeviceHandle<T: Exchange> {
    /// Shared channel, locked for the duration of one exchange
    t: Arc<Mutex<T>>,
    /// Timeout for a single frame exchange
    request_timeout: Duration,
}

impl<T: Exchange> Clone for DeviceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            t: self.t.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

/// Create a [DeviceHandle] wrapper from a type implementing [Exchange]
impl<T: Exchange> From<T> for DeviceHandle<T> {
    fn from(t: T) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl<T: Exchange + Send> DeviceHandle<T> {
    /// Override the per-frame request timeout
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Fetch the address for a derivation path
    pub async fn get_address(&self, path: &DerivationPath) -> Result<Address, Error<T::Error>> {
        debug!("requesting address for {path}");

        match self
            .execute(&Command::GetAddress { path: path.clone() })
            .await?
        {
            Response::Address(a) => Ok(a),
            _ => Err(Error::UnexpectedResponse),
        }
    }

    /// Sign an RLP encoded transaction, returning the recoverable
    /// signature after on-device confirmation
    pub async fn sign_transaction(
        &self,
        raw_tx: &[u8],
        path: &DerivationPath,
    ) -> Result<Signature, Error<T::Error>> {
        debug!("signing {} byte transaction with {path}", raw_tx.len());

        match self
            .execute(&Command::SignTransaction {
                raw_tx: raw_tx.to_vec(),
                path: path.clone(),
            })
            .await?
        {
            Response::Signature(s) => Ok(s),
            _ => Err(Error::UnexpectedResponse),
        }
    }

    /// Sign an EIP-191 personal message
    pub async fn sign_message(
        &self,
        message: &str,
        path: &DerivationPath,
    ) -> Result<Signature, Error<T::Error>> {
        debug!("signing {} byte message with {path}", message.len());

        match self
            .execute(&Command::SignPersonalMessage {
                message: message.to_string(),
                path: path.clone(),
            })
            .await?
        {
            Response::Signature(s) => Ok(s),
            _ => Err(Error::UnexpectedResponse),
        }
    }

    /// Provide trusted ERC-20 token metadata ahead of a token transfer
    pub async fn provide_erc20_token_info(
        &self,
        info: TokenInfo,
    ) -> Result<(), Error<T::Error>> {
        debug!("providing token metadata for {}", info.symbol);

        match self.execute(&Command::ProvideErc20TokenInfo(info)).await? {
            Response::Ack => Ok(()),
            _ => Err(Error::UnexpectedResponse),
        }
    }

    /// Fetch app flags and version
    pub async fn get_app_configuration(&self) -> Result<AppConfiguration, Error<T::Error>> {
        debug!("requesting app configuration");

        match self.execute(&Command::GetAppConfiguration).await? {
            Response::AppConfig(c) => Ok(c),
            _ => Err(Error::UnexpectedResponse),
        }
    }

    /// Execute one command: drive its frames through the channel in
    /// order, check each status word, and parse the final payload.
    ///
    /// Exactly one exchange may touch the channel at a time. Waiting
    /// callers queue in arrival order, and the lock guard releases on
    /// every exit path, cancellation included.
    pub async fn execute(&self, command: &Command) -> Result<Response, Error<T::Error>> {
        let frames = command.frames()?;

        let t = self.t.lock().await;

        let mut last = Vec::new();
        for (i, frame) in frames.iter().enumerate() {
            let wire = frame.to_bytes()?;

            debug!("frame {}/{} > {}", i + 1, frames.len(), hex::encode(&wire));

            let resp = timeout(self.request_timeout, t.exchange(&wire))
                .await?
                .map_err(Error::Transport)?;

            debug!("frame {}/{} < {}", i + 1, frames.len(), hex::encode(&resp));

            if resp.len() < 2 {
                return Err(Error::TruncatedResponse(resp.len()));
            }

            let code = u16::from_be_bytes([resp[resp.len() - 2], resp[resp.len() - 1]]);
            if code != STATUS_OK {
                // remaining frames are abandoned, the command is
                // terminal on first failure
                return Err(Error::Device {
                    code,
                    kind: Status::try_from(code).ok(),
                });
            }

            last = resp;
        }

        // frame sequences are never empty, so `last` holds the final
        // response here
        let payload = &last[..last.len() - 2];
        Ok(command.parse_response(payload)?)
    }
}
