//! Scripted transport for simulating a display

use brailink_hal::{SerialConfig, SerialPort};
use brailink_protocol::wire::DESCRIBE;
use brailink_protocol::MAX_FRAME_SIZE;
use heapless::{Deque, Vec};

/// Write failure injected by a test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortFault;

/// In-memory port that records writes and replays queued bytes
#[derive(Default)]
pub struct ScriptedPort {
    /// Bytes waiting to be read
    pub incoming: Deque<u8, 256>,
    /// Every write, in order
    pub written: Vec<Vec<u8, MAX_FRAME_SIZE>, 32>,
    /// Replies released one per describe probe
    pub probe_replies: Deque<Vec<u8, 4>, 8>,
    pub resets: u8,
    pub fail_writes: bool,
    /// Accept only this many bytes per write
    pub truncate_to: Option<usize>,
}

impl ScriptedPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device that answers the next probe with the given identifier
    pub fn answering(identifier: u8) -> Self {
        let mut port = Self::new();
        port.reply_to_probe(&[0xFE, 0xFE, identifier]);
        port
    }

    pub fn reply_to_probe(&mut self, reply: &[u8]) {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(reply).unwrap();
        self.probe_replies.push_back(bytes).unwrap();
    }

    /// Queue bytes as if the device had sent them
    pub fn push(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.incoming.push_back(byte).unwrap();
        }
    }

    /// Writes that were not describe probes
    pub fn frames(&self) -> impl Iterator<Item = &[u8]> {
        self.written
            .iter()
            .map(|w| w.as_slice())
            .filter(|w| *w != [DESCRIBE])
    }

    pub fn probes(&self) -> usize {
        self.written.iter().filter(|w| w.as_slice() == [DESCRIBE]).count()
    }
}

impl SerialPort for ScriptedPort {
    type Error = PortFault;

    fn reset(&mut self, _config: &SerialConfig) -> Result<(), PortFault> {
        self.resets += 1;
        self.incoming.clear();
        Ok(())
    }

    fn read_timed(&mut self, buf: &mut [u8], _timeout_ms: u32) -> Result<usize, PortFault> {
        let mut count = 0;
        while count < buf.len() {
            match self.incoming.pop_front() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<usize, PortFault> {
        if self.fail_writes {
            return Err(PortFault);
        }
        let accepted = self.truncate_to.map_or(data.len(), |n| n.min(data.len()));
        let mut record = Vec::new();
        record.extend_from_slice(&data[..accepted]).unwrap();
        self.written.push(record).unwrap();

        if data == [DESCRIBE] {
            if let Some(reply) = self.probe_replies.pop_front() {
                self.push(&reply);
            }
        }
        Ok(accepted)
    }

    fn await_readable(&mut self, _timeout_ms: u32) -> bool {
        !self.incoming.is_empty()
    }
}
