//! Signal bytes exchanged with the display

/// Request model identification (host → device)
pub const DESCRIBE: u8 = 0xFF;

/// Description reply header byte (device → host)
pub const DESCRIPTION: u8 = 0xFE;

/// Full description header preceding the model identifier
pub const DESCRIPTION_HEADER: [u8; 2] = [DESCRIPTION, DESCRIPTION];

/// Length of a complete description reply: header plus identifier
pub const DESCRIPTION_REPLY_LEN: usize = DESCRIPTION_HEADER.len() + 1;

/// Device reports a fault; confirmed by silence afterwards
pub const DISCONNECT: u8 = 0x06;

/// Previous frame accepted
pub const WRITE_ACK: u8 = 0x7E;

/// Previous frame accepted, device wants another update
pub const WRITE_ACK_PENDING: u8 = 0x7D;

/// Set on a key byte when the key is released
pub const KEY_RELEASE: u8 = 0x80;

/// First routing key code; one code per main cell follows
pub const KEY_ROUTING: u8 = 0x20;

/// First status key code; one code per status cell follows
pub const KEY_STATUS: u8 = 0x70;

/// Front key codes are bit positions below this value
pub const FRONT_KEY_LIMIT: u8 = 0x20;

/// General header preceding braille cell data
pub const BRAILLE_START: [u8; 1] = [0x01];

/// Trailer required by the Bookworm after braille cell data
pub const BOOKWORM_BRAILLE_END: [u8; 1] = [0x16];

/// Sent to the Bookworm when the session closes
pub const BOOKWORM_STOP: [u8; 2] = [0x05, 0x07];
