// nfctrace/nfctrace/src/constants.rs
//! Protocol and capture-format constants shared across the crate

/// Length of the CRC tail appended to NFC frames
pub const CHECKSUM_LEN: usize = 2;

/// Minimum frame length at which the trailing bytes are treated as a checksum
pub const CHECKSUM_MIN_FRAME_LEN: usize = 4;

/// Default poll/listen pairing window in milliseconds
pub const DEFAULT_PAIRING_TIMEOUT_MS: u64 = 100;

/// NFC-A command bytes with special-cased classification
pub const NFCA_REQA: u8 = 0x26;
pub const NFCA_WUPA: u8 = 0x52;
pub const NFCA_HLTA: u8 = 0x50;
pub const NFCA_SEL1: u8 = 0x93;
pub const NFCA_SEL2: u8 = 0x95;
pub const NFCA_SEL3: u8 = 0x97;
pub const NFCA_RATS: u8 = 0xE0;
pub const NFCA_AUTH_A: u8 = 0x60;
pub const NFCA_WRITE: u8 = 0xA2;
pub const NFCA_PPS_MASK: u8 = 0xF0;
pub const NFCA_PPS: u8 = 0xD0;

/// NVB value of a complete SELECT (7 bytes, 0 bits)
pub const NFCA_NVB_SELECT: u8 = 0x70;

/// UID cascade tag sent in place of the first UID byte
pub const NFCA_CASCADE_TAG: u8 = 0x88;

/// NFC-B command bytes
pub const NFCB_REQB: u8 = 0x05;
pub const NFCB_WUPB: u8 = 0x08;
pub const NFCB_ATTRIB: u8 = 0x1D;
pub const NFCB_HLTB: u8 = 0x50;
pub const NFCB_ATQB: u8 = 0x50;

/// NFC-F command codes
pub const NFCF_POLLING: u8 = 0x00;
pub const NFCF_READ_WITHOUT_ENCRYPTION: u8 = 0x06;
pub const NFCF_WRITE_WITHOUT_ENCRYPTION: u8 = 0x08;
pub const NFCF_READ: u8 = 0x14;
pub const NFCF_WRITE: u8 = 0x16;

/// NFC-V command codes
pub const NFCV_INVENTORY: u8 = 0x01;
pub const NFCV_GET_SYSTEM_INFO: u8 = 0x2B;

/// ISO 7816 PPS start byte (PPSS)
pub const ISO7816_PPSS: u8 = 0xFF;

/// Capture tool technology codes
pub const TECH_NFC_A: u32 = 0x0101;
pub const TECH_NFC_B: u32 = 0x0102;
pub const TECH_NFC_F: u32 = 0x0103;
pub const TECH_NFC_V: u32 = 0x0104;
pub const TECH_ISO7816: u32 = 0x0201;

/// Capture tool frame type codes
pub const FRAME_CARRIER_OFF: u32 = 0x0100;
pub const FRAME_CARRIER_ON: u32 = 0x0101;
pub const FRAME_POLL: u32 = 0x0102;
pub const FRAME_LISTEN: u32 = 0x0103;
pub const FRAME_ISO_ATR: u32 = 0x0201;
pub const FRAME_ISO_REQUEST: u32 = 0x0211;
pub const FRAME_ISO_RESPONSE: u32 = 0x0212;
pub const FRAME_ISO_EXCHANGE: u32 = 0x0213;
