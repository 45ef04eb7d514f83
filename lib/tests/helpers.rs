// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Shared test helpers: logging setup and a scripted mock channel

use std::{
    collections::VecDeque,
    str::FromStr,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::anyhow;
use log::LevelFilter;
use simplelog::SimpleLogger;

use ledger_eth::Exchange;

/// Setup test logging, with LOG_LEVEL env override
pub fn setup() {
    let log_level = match std::env::var("LOG_LEVEL").map(|v| LevelFilter::from_str(&v)) {
        Ok(Ok(l)) => l,
        _ => LevelFilter::Debug,
    };

    let _ = SimpleLogger::init(log_level, simplelog::Config::default());
}

/// Scripted mock channel, recording sent frames and answering from a
/// response queue in order. Clones share state so a test can keep one
/// handle for assertions after moving another into a [DeviceHandle].
#[derive(Clone)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
    delay: Duration,
}

struct State {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
}

impl MockTransport {
    pub fn new(responses: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                sent: vec![],
                responses: responses.into_iter().collect(),
            })),
            delay: Duration::ZERO,
        }
    }

    /// Delay each exchange, widening the window for interleaving bugs
    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queue further scripted responses
    #[allow(dead_code)]
    pub fn push_responses(&self, responses: impl IntoIterator<Item = Vec<u8>>) {
        self.state
            .lock()
            .unwrap()
            .responses
            .extend(responses);
    }

    /// Frames sent so far, in transmission order
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().sent.clone()
    }
}

#[async_trait::async_trait]
impl Exchange for MockTransport {
    type Error = anyhow::Error;

    async fn exchange(&self, command: &[u8]) -> Result<Vec<u8>, Self::Error> {
        let resp = {
            let mut s = self.state.lock().unwrap();
            s.sent.push(command.to_vec());
            s.responses.pop_front()
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        resp.ok_or_else(|| anyhow!("no scripted response"))
    }
}

/// Append a big-endian status word to a response payload
pub fn with_status(payload: &[u8], code: u16) -> Vec<u8> {
    let mut r = payload.to_vec();
    r.extend_from_slice(&code.to_be_bytes());
    r
}

/// Response payload with a trailing OK status word
pub fn ok_response(payload: &[u8]) -> Vec<u8> {
    with_status(payload, 0x9000)
}

/// 65 byte `v || r || s` signature response, r and s filled with the
/// given byte in their last position
pub fn signature_response(v: u8, r_last: u8, s_last: u8) -> Vec<u8> {
    let mut sig = [0u8; 65];
    sig[0] = v;
    sig[32] = r_last;
    sig[64] = s_last;
    ok_response(&sig)
}

/// GetAddress response payload: length-prefixed public key then the
/// 40 hex digit address
#[allow(dead_code)]
pub fn address_response(addr_hex: &[u8; 40]) -> Vec<u8> {
    let mut p = vec![65];
    p.extend_from_slice(&[0xee; 65]);
    p.push(40);
    p.extend_from_slice(addr_hex);
    ok_response(&p)
}
