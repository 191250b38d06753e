// nfctrace/nfctrace/src/protocol/tables.rs

//! Static command byte → name tables. Special cases (bit patterns,
//! length-dependent meanings) are handled by the per-technology rule lists
//! before these tables are consulted.

/// NFC-A commands resolved by plain byte lookup.
pub const NFCA_COMMANDS: &[(u8, &str)] = &[
    (0x26, "REQA"),
    (0x52, "WUPA"),
    (0xE0, "RATS"),
    (0x61, "AUTH_B"),
    (0x30, "READ"),
    (0x3A, "FAST_READ"),
    (0xA0, "COMPAT_WRITE"),
    (0x1A, "AUTH"),
    (0x1B, "PWD_AUTH"),
    (0x39, "READ_CNT"),
    (0x3C, "READ_SIG"),
    (0xA5, "INCR_CNT"),
    (0xC0, "DECREMENT"),
    (0xC1, "INCREMENT"),
    (0xB0, "TRANSFER"),
    // MIFARE RESTORE (0xC2) is left out: it is the S(DESELECT) PCB.
];

/// NFC-B commands.
pub const NFCB_COMMANDS: &[(u8, &str)] = &[
    (0x05, "REQB"),
    (0x08, "WUPB"),
    (0x1D, "ATTRIB"),
    (0x50, "HLTB"),
];

/// NFC-F request codes with the name used for their response (code + 1).
pub const NFCF_COMMANDS: &[(u8, &str, &str)] = &[
    (0x00, "POLLING", "POLLING_RESPONSE"),
    (0x02, "REQUEST_SERVICE", "REQUEST_SERVICE_RESPONSE"),
    (0x04, "REQUEST_RESPONSE", "REQUEST_RESPONSE_RESPONSE"),
    (0x06, "READ_WITHOUT_ENCRYPTION", "READ_WITHOUT_ENCRYPTION_RESPONSE"),
    (0x08, "WRITE_WITHOUT_ENCRYPTION", "WRITE_WITHOUT_ENCRYPTION_RESPONSE"),
    (0x0A, "SEARCH_SERVICE_CODE", "SEARCH_SERVICE_CODE_RESPONSE"),
    (0x0C, "REQUEST_SYSTEM_CODE", "REQUEST_SYSTEM_CODE_RESPONSE"),
    (0x10, "AUTHENTICATION1", "AUTHENTICATION1_RESPONSE"),
    (0x12, "AUTHENTICATION2", "AUTHENTICATION2_RESPONSE"),
    (0x14, "READ", "READ_RESPONSE"),
    (0x16, "WRITE", "WRITE_RESPONSE"),
    (0x32, "REQUEST_SPECIFICATION_VERSION", "REQUEST_SPECIFICATION_VERSION_RESPONSE"),
    (0x34, "RESET_MODE", "RESET_MODE_RESPONSE"),
];

/// NFC-V (ISO 15693) mandatory and optional commands.
pub const NFCV_COMMANDS: &[(u8, &str)] = &[
    (0x01, "INVENTORY"),
    (0x02, "STAY_QUIET"),
    (0x20, "READ_SINGLE_BLOCK"),
    (0x21, "WRITE_SINGLE_BLOCK"),
    (0x22, "LOCK_BLOCK"),
    (0x23, "READ_MULTIPLE_BLOCKS"),
    (0x24, "WRITE_MULTIPLE_BLOCKS"),
    (0x25, "SELECT"),
    (0x26, "RESET_TO_READY"),
    (0x27, "WRITE_AFI"),
    (0x28, "LOCK_AFI"),
    (0x29, "WRITE_DSFID"),
    (0x2A, "LOCK_DSFID"),
    (0x2B, "GET_SYSTEM_INFO"),
    (0x2C, "GET_MULTIPLE_BLOCK_SECURITY_STATUS"),
    (0x2D, "FAST_READ_MULTIPLE_BLOCKS"),
    (0x30, "EXT_READ_SINGLE_BLOCK"),
    (0x31, "EXT_WRITE_SINGLE_BLOCK"),
    (0x32, "EXT_LOCK_SINGLE_BLOCK"),
    (0x33, "EXT_READ_MULTIPLE_BLOCKS"),
    (0x34, "EXT_WRITE_MULTIPLE_BLOCKS"),
    (0x35, "AUTHENTICATE"),
    (0x39, "CHALLENGE"),
    (0x3A, "READ_BUFFER"),
    (0x3B, "EXT_GET_SYSTEM_INFO"),
    (0x3C, "EXT_GET_MULTIPLE_BLOCK_SECURITY_STATUS"),
    (0x3D, "FAST_EXT_READ_MULTIPLE_BLOCKS"),
    // tag specific, inside the custom range
    (0xC0, "FAST_READ_SINGLE_BLOCK"),
    (0xC1, "WRITE_CONFIGURATION"),
    (0xC2, "PICK_RANDOM_UID"),
    (0xC3, "FAST_READ_MULTIPLE"),
];

/// NFC-V error codes carried after the flags byte of an error answer.
pub const NFCV_ERRORS: &[(u8, &str)] = &[
    (0x01, "NOT_SUPPORTED"),
    (0x02, "NOT_RECOGNIZED"),
    (0x03, "OPTION_NOT_SUPPORTED"),
    (0x0F, "UNKNOWN"),
    (0x10, "BLOCK_NOT_AVAILABLE"),
    (0x11, "ALREADY_LOCKED"),
    (0x12, "LOCKED"),
    (0x13, "NOT_PROGRAMMED"),
    (0x14, "NOT_LOCKED"),
];

/// Look up a name in a two-column table.
pub fn lookup(table: &[(u8, &'static str)], code: u8) -> Option<&'static str> {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// NFC-F request name for a request code.
pub fn nfcf_request_name(code: u8) -> Option<&'static str> {
    NFCF_COMMANDS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
}

/// NFC-F response name for a response code. The table is keyed by request
/// code, so the response code is decremented first.
pub fn nfcf_response_name(code: u8) -> Option<&'static str> {
    let request = code.checked_sub(1)?;
    NFCF_COMMANDS
        .iter()
        .find(|(c, _, _)| *c == request)
        .map(|(_, _, name)| *name)
}
