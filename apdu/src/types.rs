// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Typed results returned by the Ethereum app

use alloy_primitives::{Address, U256};

use crate::{encode::decode_u256, ApduError};

/// Recoverable secp256k1 signature as returned by the signing commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Recovery byte
    pub v: u8,
    /// R component, big-endian
    pub r: U256,
    /// S component, big-endian
    pub s: U256,
}

impl Signature {
    /// Decode a 65 byte `v || r || s` device signature
    pub fn parse(buff: &[u8]) -> Result<Self, ApduError> {
        if buff.len() != 65 {
            return Err(ApduError::MalformedSignature(buff.len()));
        }

        Ok(Self {
            v: buff[0],
            r: decode_u256(&buff[1..33])?,
            s: decode_u256(&buff[33..65])?,
        })
    }
}

/// App flags and version reported by GetAppConfiguration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AppConfiguration {
    /// App can display contract data
    pub contract_support: bool,
    /// App requires token metadata via ProvideErc20TokenInfo
    pub needs_external_token_info: bool,
    pub major_version: u8,
    pub minor_version: u8,
    pub patch_version: u8,
}

impl AppConfiguration {
    /// Decode the 4 byte configuration response (flags then version)
    pub fn parse(buff: &[u8]) -> Result<Self, ApduError> {
        if buff.len() < 4 {
            return Err(ApduError::MalformedResponse);
        }

        Ok(Self {
            contract_support: buff[0] & 0x01 != 0,
            needs_external_token_info: buff[0] & 0x02 != 0,
            major_version: buff[1],
            minor_version: buff[2],
            patch_version: buff[3],
        })
    }
}

/// Trusted ERC-20 token metadata with issuer signature, provisioned to
/// the device ahead of token transfers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    /// Ticker symbol, at most 255 UTF-8 bytes
    pub symbol: String,
    /// Token contract address
    pub address: Address,
    /// Display decimals
    pub decimals: u32,
    /// Chain the metadata applies to
    pub chain_id: u32,
    /// Issuer signature over the record
    pub signature: Vec<u8>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn signature_decoding() {
        let mut buff = [0u8; 65];
        buff[0] = 0x1b;
        buff[1..33].copy_from_slice(&{
            let mut r = [0u8; 32];
            r[31] = 0x01;
            r
        });
        buff[33..65].copy_from_slice(&{
            let mut s = [0u8; 32];
            s[31] = 0x02;
            s
        });

        let sig = Signature::parse(&buff).unwrap();
        assert_eq!(sig.v, 27);
        assert_eq!(sig.r, U256::from(1));
        assert_eq!(sig.s, U256::from(2));
    }

    #[test]
    fn signature_full_width_components() {
        let mut buff = [0xffu8; 65];
        buff[0] = 0x1c;

        let sig = Signature::parse(&buff).unwrap();
        assert_eq!(sig.v, 28);
        assert_eq!(sig.r, U256::MAX);
        assert_eq!(sig.s, U256::MAX);
    }

    #[test]
    fn signature_length_mismatch() {
        assert_eq!(Signature::parse(&[0u8; 64]), Err(ApduError::MalformedSignature(64)));
        assert_eq!(Signature::parse(&[0u8; 66]), Err(ApduError::MalformedSignature(66)));
        assert_eq!(Signature::parse(&[]), Err(ApduError::MalformedSignature(0)));
    }

    #[test]
    fn app_configuration_decoding() {
        let c = AppConfiguration::parse(&[0x03, 1, 4, 2]).unwrap();
        assert_eq!(
            c,
            AppConfiguration {
                contract_support: true,
                needs_external_token_info: true,
                major_version: 1,
                minor_version: 4,
                patch_version: 2,
            }
        );

        let c = AppConfiguration::parse(&[0x00, 0, 9, 1]).unwrap();
        assert!(!c.contract_support);
        assert!(!c.needs_external_token_info);

        assert_eq!(AppConfiguration::parse(&[1, 2, 3]), Err(ApduError::MalformedResponse));
    }
}
