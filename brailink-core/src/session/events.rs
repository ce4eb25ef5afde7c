//! Events that move the link between states

/// Link events, from received bytes, timers or transport results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Handshake in `open` identified a known model
    Opened,
    /// Description header byte received (device re-announcing itself)
    DescriptionHeader,
    /// Identifier matching the session's model received
    Identified,
    /// Device accepted the last frame
    Acknowledged,
    /// A frame was handed to the transport
    FrameSent,
    /// A describe probe was sent to re-detect the device
    Probed,
    /// Device reported a fault and went quiet
    Disconnect,
    /// A transport operation failed
    LinkFault,
    /// Retry bound exceeded while resetting
    RetriesExhausted,
}

impl LinkEvent {
    /// Check if this event abandons the link
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            LinkEvent::Disconnect | LinkEvent::LinkFault | LinkEvent::RetriesExhausted
        )
    }
}
