use bitflags::bitflags;

bitflags! {
    /// Optional-field bits of the crawler ping format byte.
    ///
    /// The bit values are fixed by the wire format. A pong echoes back the
    /// request's format byte masked to these recognized bits, so a crawler
    /// can verify which features were honored. Unrecognized bits are
    /// dropped silently rather than rejected.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Features: u8 {
        /// Per-record connection age, in minutes.
        const CONNECTION_TIME = 0x01;
        /// Per-record locale tag; also switches selection to
        /// locale-preferenced ordering.
        const LOCALE_INFO = 0x02;
        /// Restrict supernodes to peers advertising crawler support.
        const NEW_ONLY = 0x04;
        /// Compressed user-agent block appended after the records.
        const USER_AGENTS = 0x08;
        /// Responder's average peer uptime in the header.
        const NODE_UPTIME = 0x10;
        /// Per-record accepted-reply counters.
        const REPLY_COUNTS = 0x20;
        /// Reserved. Shifts the header offset by one zero byte but has no
        /// defined payload in this protocol revision.
        const DHT_STATUS = 0x40;
    }
}
