// Copyright (c) 2022-2023 The MobileCoin Foundation

//! APDU frame construction and payload chunking

use encdec::Encode;

use crate::{encode::encode_chunk_length, ApduError, Instruction, APDU_CLA, MAX_CHUNK_LEN};

/// P1 marker for the first frame of a command
pub const P1_FIRST: u8 = 0x00;

/// P1 marker for continuation frames
pub const P1_CONTINUE: u8 = 0x80;

/// Single APDU transmission unit.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   CLA (0xE0)  |      INS      |      P1       |      P2       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /  LENGTH (0-3 bytes, short/extended convention)                /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                            DATA...                            /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApduFrame {
    /// Instruction code
    pub ins: Instruction,
    /// First parameter byte (chunk continuation marker)
    pub p1: u8,
    /// Second parameter byte
    pub p2: u8,
    /// Frame payload
    pub data: Vec<u8>,
}

impl ApduFrame {
    /// Create a new [`ApduFrame`]
    pub fn new(ins: Instruction, p1: u8, p2: u8, data: Vec<u8>) -> Self {
        Self { ins, p1, p2, data }
    }

    /// Encode to an owned wire buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>, ApduError> {
        let mut buff = vec![0u8; self.encode_len()?];
        self.encode(&mut buff)?;
        Ok(buff)
    }
}

impl Encode for ApduFrame {
    type Error = ApduError;

    /// Compute the encoded frame length
    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(4 + encode_chunk_length(self.data.len())?.len() + self.data.len())
    }

    /// Encode the frame into the provided buffer
    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        let len = encode_chunk_length(self.data.len())?;
        let n = 4 + len.len() + self.data.len();

        if buff.len() < n {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = APDU_CLA;
        buff[1] = self.ins as u8;
        buff[2] = self.p1;
        buff[3] = self.p2;
        buff[4..][..len.len()].copy_from_slice(&len);
        buff[4 + len.len()..][..self.data.len()].copy_from_slice(&self.data);

        Ok(n)
    }
}

/// Split a payload into frames of at most [`MAX_CHUNK_LEN`] bytes,
/// marking continuations via P1. An empty payload still produces one
/// (empty) frame.
pub fn chunk(ins: Instruction, payload: &[u8]) -> Vec<ApduFrame> {
    let mut frames = Vec::with_capacity(payload.len() / MAX_CHUNK_LEN + 1);

    let mut chunks = payload.chunks(MAX_CHUNK_LEN);
    let first = chunks.next().unwrap_or(&[]);
    frames.push(ApduFrame::new(ins, P1_FIRST, 0x00, first.to_vec()));

    for c in chunks {
        frames.push(ApduFrame::new(ins, P1_CONTINUE, 0x00, c.to_vec()));
    }

    frames
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frame_encoding() {
        let f = ApduFrame::new(Instruction::GetAddress, 0x00, 0x00, vec![1, 2, 3]);

        assert_eq!(f.encode_len().unwrap(), 8);
        assert_eq!(f.to_bytes().unwrap(), vec![0xe0, 0x02, 0x00, 0x00, 3, 1, 2, 3]);
    }

    #[test]
    fn frame_encoding_empty() {
        let f = ApduFrame::new(Instruction::GetAppConfiguration, 0x00, 0x00, vec![]);
        assert_eq!(f.to_bytes().unwrap(), vec![0xe0, 0x06, 0x00, 0x00]);
    }

    #[test]
    fn frame_encoding_256_bytes() {
        let f = ApduFrame::new(Instruction::SignTransaction, 0x80, 0x00, vec![0xaa; 256]);

        let b = f.to_bytes().unwrap();
        assert_eq!(b.len(), 4 + 1 + 256);
        assert_eq!(&b[..5], &[0xe0, 0x04, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn frame_encoding_short_buffer() {
        let f = ApduFrame::new(Instruction::GetAddress, 0x00, 0x00, vec![1, 2, 3]);

        let mut buff = [0u8; 4];
        assert_eq!(f.encode(&mut buff), Err(ApduError::InvalidLength));
    }

    #[test]
    fn chunking_splits_at_150() {
        let payload: Vec<u8> = (0..310u16).map(|v| v as u8).collect();
        let frames = chunk(Instruction::SignTransaction, &payload);

        assert_eq!(frames.len(), 3);
        assert_eq!(
            frames.iter().map(|f| f.p1).collect::<Vec<_>>(),
            vec![P1_FIRST, P1_CONTINUE, P1_CONTINUE]
        );
        assert_eq!(
            frames.iter().map(|f| f.data.len()).collect::<Vec<_>>(),
            vec![150, 150, 10]
        );
        assert_eq!(frames[2].data, payload[300..]);
    }

    #[test]
    fn chunking_single_frame() {
        let frames = chunk(Instruction::SignPersonalMessage, &[1, 2, 3]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].p1, P1_FIRST);
    }

    #[test]
    fn chunking_empty_payload() {
        let frames = chunk(Instruction::SignTransaction, &[]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data.len(), 0);
    }
}
