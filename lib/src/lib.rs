// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Ledger Ethereum app client library
//!
//! Drives the Ethereum app command set over any byte channel
//! implementing [Exchange]. A [DeviceHandle] owns the shared channel
//! and serializes exchanges so at most one command (and at most one
//! frame) is in flight at a time, with waiting callers served in
//! arrival order.
//!
//! ```no_run
//! # use ledger_eth::{DeviceHandle, DerivationPath, Exchange};
//! # async fn example<T: Exchange + Send + Sync>(transport: T) -> anyhow::Result<()>
//! # where T::Error: Send + Sync + 'static {
//! let device = DeviceHandle::from(transport);
//!
//! let config = device.get_app_configuration().await?;
//! println!("app version {}.{}.{}", config.major_version, config.minor_version, config.patch_version);
//!
//! let address = device.get_address(&DerivationPath::default()).await?;
//! println!("address: {address}");
//! # Ok(())
//! # }
//! ```

/// Re-export `ledger-eth-apdu` for consumers
pub use ledger_eth_apdu as apdu;

pub mod transport;
pub use transport::Exchange;

mod handle;
pub use handle::DeviceHandle;

mod error;
pub use error::Error;

pub use apdu::{
    path::DerivationPath,
    status::Status,
    types::{AppConfiguration, Signature, TokenInfo},
};
