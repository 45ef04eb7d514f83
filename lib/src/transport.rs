// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transport abstraction for the byte channel to a device
//!
//! Concrete transports (USB HID, TCP, BLE bridges) live outside this
//! crate, the engine only requires the [Exchange] exchange primitive.

use core::fmt::{Debug, Display};

use async_trait::async_trait;

/// Byte-level exchange with a connected device.
///
/// Implementations move one command APDU to the device and return the
/// raw response, trailing status word included. The exchange engine
/// serializes calls, so implementations see at most one exchange at a
/// time and must preserve per-call ordering.
#[async_trait]
pub trait Exchange {
    /// Transport-specific error type
    type Error: Debug + Display;

    /// Send a command APDU and await the raw response
    async fn exchange(&self, command: &[u8]) -> Result<Vec<u8>, Self::Error>;
}

#[async_trait]
impl<T: Exchange + Sync> Exchange for &T {
    type Error = T::Error;

    async fn exchange(&self, command: &[u8]) -> Result<Vec<u8>, Self::Error> {
        (**self).exchange(command).await
    }
}
