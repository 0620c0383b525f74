//! Discovery record advertised for the example service.
//!
//! The bytes are an SDP data-element sequence describing a Serial Port service
//! ("COM Port" on RFCOMM channel 23). The agent never interprets them; the
//! service manager owns the format.

/// Serialized service record sent with `RegisterServiceRecord`.
pub const SERVICE_RECORD: [u8; 99] = [
    0x35, 0x61, 0x09, 0x00, 0x00, 0x0a, 0x00, 0x01, //
    0x00, 0x00, 0x09, 0x00, 0x01, 0x35, 0x03, 0x19, //
    0x11, 0x01, 0x09, 0x00, 0x04, 0x35, 0x0c, 0x35, //
    0x03, 0x19, 0x01, 0x00, 0x35, 0x05, 0x19, 0x00, //
    0x03, 0x08, 0x17, 0x09, 0x00, 0x05, 0x35, 0x03, //
    0x19, 0x10, 0x02, 0x09, 0x00, 0x06, 0x35, 0x09, //
    0x09, 0x65, 0x6e, 0x09, 0x00, 0x6a, 0x09, 0x01, //
    0x00, 0x09, 0x00, 0x09, 0x35, 0x08, 0x35, 0x06, //
    0x19, 0x11, 0x01, 0x09, 0x01, 0x00, 0x09, 0x01, //
    0x00, 0x25, 0x0b, 0x53, 0x65, 0x72, 0x69, 0x61, //
    0x6c, 0x20, 0x50, 0x6f, 0x72, 0x74, 0x09, 0x01, //
    0x01, 0x25, 0x08, 0x43, 0x4f, 0x4d, 0x20, 0x50, //
    0x6f, 0x72, 0x74,
];
