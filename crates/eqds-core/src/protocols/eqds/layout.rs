pub const FLAGS_OFFSET: usize = 0;
pub const PATH_ID_OFFSET: usize = 1;

pub const CTRL_WINDOW_SIZE_RANGE: std::ops::Range<usize> = 2..4;
pub const CTRL_ACK_NUMBER_RANGE: std::ops::Range<usize> = 4..6;
pub const CTRL_PULL_NUMBER_RANGE: std::ops::Range<usize> = 6..8;

pub const DATA_NEXT_PROTOCOL_OFFSET: usize = 2;
pub const DATA_RESERVED_OFFSET: usize = 3;
pub const DATA_SEQUENCE_RANGE: std::ops::Range<usize> = 4..6;
pub const DATA_PULL_TARGET_RANGE: std::ops::Range<usize> = 6..8;

pub const HDR_LEN: usize = 8;

pub const NEXT_PROTO_IP: u8 = 4;
pub const NEXT_PROTO_NATIVE: u8 = 0xFC;
