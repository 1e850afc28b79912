//! Message header definitions
//!
//! The header is the fixed 32-byte metadata block prefixing every chat
//! message. It exists in two forms: the logical [`Header`] record services
//! work with, and the packed [`RawHeader`] that matches the wire byte for
//! byte. Translating between them is the `codec` crate's job.

pub mod header;

pub use header::{timestamp_ms, Header, RawHeader};
