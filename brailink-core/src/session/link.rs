//! Display session
//!
//! A [`Session`] owns the transport, the detected model, the cell images and
//! the key state for one open display. The host drives it by calling
//! [`Session::poll`] repeatedly; all protocol work happens inside that call.

use brailink_hal::SerialPort;
use brailink_protocol::wire::{
    DESCRIBE, DESCRIPTION, DESCRIPTION_HEADER, DESCRIPTION_REPLY_LEN, DISCONNECT, WRITE_ACK,
    WRITE_ACK_PENDING,
};

use super::events::LinkEvent;
use super::state::{State, StateTracker};
use crate::command::Command;
use crate::config::SessionConfig;
use crate::display::{CellCountMismatch, DisplayBuffer};
use crate::error::Error;
use crate::keys::{Decoded, InputContext, InputMode, KeyDecoder};
use crate::model::{self, ModelDescriptor};

/// What to do with a byte after state dispatch
enum Dispatch {
    /// Byte fully handled by the link layer
    Consumed,
    /// Key event handled; end this poll with the result
    Key(Option<Command>),
    /// Byte not valid in the current state
    Unexpected,
}

/// One open braille display
pub struct Session<T: SerialPort> {
    port: T,
    model: &'static ModelDescriptor,
    config: SessionConfig,
    link: StateTracker,
    display: DisplayBuffer,
    keys: KeyDecoder,
    context: InputContext,
    repeat_counter: u8,
}

impl<T: SerialPort> Session<T> {
    /// Detect the display on `port` and start a session
    ///
    /// Fails if the device never answers or reports an unknown model.
    pub fn open(mut port: T, config: SessionConfig) -> Result<Self, Error<T::Error>> {
        let identifier = handshake(&mut port, &config)?;

        let Some(model) = model::resolve(identifier) else {
            error!("Detected unknown model with identifier {=u8:#x}", identifier);
            return Err(Error::UnknownModel(identifier));
        };
        info!(
            "Detected {}: {} data cells, {} status cells",
            model.name,
            model.columns,
            model.status_cells
        );

        let display = DisplayBuffer::new(model).map_err(cell_count)?;
        let mut link = StateTracker::new();
        link.apply(LinkEvent::Opened);

        Ok(Self {
            port,
            model,
            config,
            link,
            display,
            keys: KeyDecoder::new(),
            context: InputContext::Normal,
            repeat_counter: config.repeat_delay,
        })
    }

    /// Send the model's stop sequence and release the transport
    pub fn close(mut self) -> T {
        if !self.model.stop.is_empty() && send(&mut self.port, self.model.stop).is_err() {
            warn!("Failed to send stop sequence");
        }
        debug!("Session closed");
        self.port
    }

    pub fn model(&self) -> &'static ModelDescriptor {
        self.model
    }

    pub fn main_cells(&self) -> usize {
        self.model.columns as usize
    }

    pub fn status_cells(&self) -> usize {
        self.model.status_cells as usize
    }

    pub fn help_page(&self) -> u8 {
        self.model.help_page
    }

    pub fn state(&self) -> State {
        self.link.state()
    }

    /// Check if the device is attached and identified
    pub fn is_ready(&self) -> bool {
        self.link.state().is_connected()
    }

    pub fn input_mode(&self) -> InputMode {
        self.keys.input_mode()
    }

    /// Tell the decoder what the host is doing (affects the Bookworm)
    pub fn set_input_context(&mut self, context: InputContext) {
        self.context = context;
    }

    /// Update the main cells; sends a frame right away if the link is idle
    pub fn set_main_cells(&mut self, cells: &[u8]) -> Result<(), Error<T::Error>> {
        self.display.set_main(cells).map_err(cell_count)?;
        self.flush();
        Ok(())
    }

    /// Update the status cells; sent with the next frame
    pub fn set_status_cells(&mut self, cells: &[u8]) -> Result<(), Error<T::Error>> {
        self.display.set_status(cells).map_err(cell_count)?;
        Ok(())
    }

    /// Advance the session by `elapsed_ms` and fetch the next command
    ///
    /// Reads and dispatches every pending byte until one yields a key
    /// result. If nothing was read, timeout recovery runs for the current
    /// state. Pending cell updates are flushed and autorepeat is advanced
    /// before returning.
    pub fn poll(&mut self, elapsed_ms: u32) -> Option<Command> {
        self.link.tick(elapsed_ms);
        let mut idle = true;

        loop {
            let byte = match self.port.read_byte(self.config.read_timeout_ms) {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(_) => {
                    warn!("Read failed in state {}", self.link.state());
                    self.apply(LinkEvent::LinkFault);
                    break;
                }
            };
            idle = false;

            if byte == DISCONNECT
                && self.link.state() != State::Off
                && !self.port.await_readable(self.config.disconnect_grace_ms)
            {
                warn!("Display reported a fault");
                self.apply(LinkEvent::Disconnect);
                continue;
            }

            if byte == DESCRIPTION {
                self.apply(LinkEvent::DescriptionHeader);
                continue;
            }

            match self.dispatch(byte) {
                Dispatch::Consumed => {}
                Dispatch::Key(command) => {
                    self.repeat_counter = self.config.repeat_delay;
                    self.flush();
                    return command;
                }
                Dispatch::Unexpected => {
                    warn!(
                        "Unexpected byte {=u8:#x} in state {}",
                        byte,
                        self.link.state()
                    );
                }
            }
        }

        if idle {
            self.recover();
        }
        self.flush();
        self.autorepeat()
    }

    fn dispatch(&mut self, byte: u8) -> Dispatch {
        match self.link.state() {
            State::Off => Dispatch::Consumed,
            State::Resetting => Dispatch::Unexpected,
            State::Identifying => {
                if byte != self.model.identifier {
                    return Dispatch::Unexpected;
                }
                self.keys.clear();
                self.display.mark_dirty();
                self.apply(LinkEvent::Identified);
                Dispatch::Consumed
            }
            State::Writing if byte == WRITE_ACK_PENDING => {
                self.display.mark_dirty();
                self.apply(LinkEvent::Acknowledged);
                Dispatch::Consumed
            }
            State::Writing if byte == WRITE_ACK => {
                self.apply(LinkEvent::Acknowledged);
                Dispatch::Consumed
            }
            // Devices interleave key events with acknowledgements
            State::Writing | State::Ready => {
                match self.keys.decode(self.model, self.context, byte) {
                    Decoded::Command(command) => Dispatch::Key(Some(command)),
                    Decoded::Absorbed => Dispatch::Key(None),
                    Decoded::Unrecognized => Dispatch::Unexpected,
                }
            }
        }
    }

    /// Timeout handling, run when a poll read nothing
    fn recover(&mut self) {
        let elapsed = self.link.elapsed_ms();
        let exhausted = self.link.retries() > self.config.max_retries;

        match self.link.state() {
            State::Off | State::Ready => {}
            State::Resetting if elapsed > self.config.resetting_timeout_ms => {
                if exhausted {
                    warn!("Display not responding, giving up");
                    self.apply(LinkEvent::RetriesExhausted);
                } else {
                    self.probe();
                }
            }
            State::Identifying if elapsed > self.config.identifying_timeout_ms => {
                self.probe();
            }
            State::Writing if elapsed > self.config.writing_timeout_ms => {
                if exhausted {
                    warn!("Frames not acknowledged, re-detecting display");
                    self.probe();
                } else {
                    // Assume the acknowledgement was lost, not the link
                    self.display.mark_dirty();
                    self.transmit();
                }
            }
            _ => {}
        }
    }

    fn probe(&mut self) {
        match send(&mut self.port, &[DESCRIBE]) {
            Ok(()) => self.apply(LinkEvent::Probed),
            Err(_) => self.apply(LinkEvent::LinkFault),
        }
    }

    /// Send pending cells if the link is idle
    fn flush(&mut self) {
        if self.display.is_dirty() && self.link.state().accepts_frames() {
            self.transmit();
        }
    }

    fn transmit(&mut self) {
        let frame = match self.display.build_frame(self.model) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Cannot build frame: {}", e);
                return;
            }
        };

        match send(&mut self.port, frame.as_bytes()) {
            Ok(()) => {
                self.display.mark_clean();
                self.apply(LinkEvent::FrameSent);
            }
            Err(_) => self.apply(LinkEvent::LinkFault),
        }
    }

    fn autorepeat(&mut self) -> Option<Command> {
        self.repeat_counter = self.repeat_counter.saturating_sub(1);
        if self.repeat_counter > 0 {
            return None;
        }

        if self.link.state().is_connected() {
            if let Some(command) = self.keys.repeat(self.model) {
                self.repeat_counter = self.config.repeat_interval;
                return Some(command);
            }
        }
        self.repeat_counter = self.config.repeat_delay;
        None
    }

    fn apply(&mut self, event: LinkEvent) {
        let from = self.link.state();
        if let Some(to) = self.link.apply(event) {
            if event.is_failure() {
                info!("Link lost in state {} ({})", from, event);
            }
            trace!(
                "{} --{}--> {} (retry {})",
                from,
                event,
                to,
                self.link.retries()
            );
        }
    }
}

fn cell_count<E>(mismatch: CellCountMismatch) -> Error<E> {
    Error::CellCount {
        expected: mismatch.expected,
        actual: mismatch.actual,
    }
}

/// Write all of `data` or fail
fn send<T: SerialPort>(port: &mut T, data: &[u8]) -> Result<(), Error<T::Error>> {
    let written = port.write_all(data).map_err(|e| {
        warn!("Write failed");
        Error::Transport(e)
    })?;
    if written != data.len() {
        warn!("Truncated write: {} < {}", written, data.len());
        return Err(Error::TruncatedWrite {
            written,
            expected: data.len(),
        });
    }
    Ok(())
}

/// Probe until the device describes itself; returns its identifier
fn handshake<T: SerialPort>(port: &mut T, config: &SessionConfig) -> Result<u8, Error<T::Error>> {
    for attempt in 1..=config.open_attempts.max(1) {
        debug!("Describe probe, attempt {}", attempt);
        port.reset(&config.serial).map_err(Error::Transport)?;

        if send(port, &[DESCRIBE]).is_err() {
            continue;
        }
        if !port.await_readable(config.identify_wait_ms) {
            continue;
        }

        let mut reply = [0u8; DESCRIPTION_REPLY_LEN];
        match read_reply(port, &mut reply, config.read_timeout_ms) {
            Ok(n) if n == reply.len() && reply.starts_with(&DESCRIPTION_HEADER) => {
                return Ok(reply[DESCRIPTION_HEADER.len()]);
            }
            Ok(n) => warn!("Malformed description reply ({} bytes)", n),
            Err(_) => warn!("Read failed during handshake"),
        }
    }
    Err(Error::NoResponse)
}

fn read_reply<T: SerialPort>(
    port: &mut T,
    buf: &mut [u8],
    timeout_ms: u32,
) -> Result<usize, T::Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match port.read_timed(&mut buf[filled..], timeout_ms)? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
