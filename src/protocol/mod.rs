//! Protocol type tags and the protocol-instance interface
//!
//! A protocol family/direction is identified by an opaque unsigned tag.
//! The surrounding system defines the full enumeration; this crate only
//! needs tags as map keys and ships the well-known ones for the optional
//! RTMP and RTSP families.

pub mod scheme;

pub use scheme::{SchemeMatcher, SchemeRule, SchemeTable};

/// Opaque tag identifying a protocol family and direction
///
/// Tags are plain `u64` values. For readability in logs they are usually
/// built from a short ASCII name via [`ProtocolType::from_tag`], which
/// `Display` renders back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtocolType(u64);

impl ProtocolType {
    /// Create a tag from a raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Create a tag from up to 8 ASCII bytes (NUL-padded)
    pub const fn from_tag(tag: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(tag))
    }

    /// Get the raw tag value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.0.to_be_bytes();
        let printable = bytes.iter().all(|b| *b == 0 || b.is_ascii_graphic());
        if printable && bytes[0] != 0 {
            for b in bytes.iter().filter(|b| **b != 0) {
                write!(f, "{}", *b as char)?;
            }
            Ok(())
        } else {
            write!(f, "{:#018x}", self.0)
        }
    }
}

/// Well-known tags for the optional protocol families
pub mod types {
    use super::ProtocolType;

    /// Inbound RTMP (a remote encoder pushes to us)
    pub const INBOUND_RTMP: ProtocolType = ProtocolType::from_tag(*b"IRTMP\0\0\0");

    /// Outbound RTMP (we originate toward a remote server)
    pub const OUTBOUND_RTMP: ProtocolType = ProtocolType::from_tag(*b"ORTMP\0\0\0");

    /// RTSP
    pub const RTSP: ProtocolType = ProtocolType::from_tag(*b"RTSP\0\0\0\0");
}

/// A live, connected occurrence of some protocol
///
/// Implemented by the surrounding system's protocol state machines.
/// This core only needs the instance's unique id (to key stream
/// ownership) and its type tag (to route to the owning handler).
pub trait ProtocolInstance {
    /// Process-unique id of this instance
    fn id(&self) -> u32;

    /// Tag of the protocol family/direction this instance belongs to
    fn protocol_type(&self) -> ProtocolType;

    /// Short description for log output
    fn describe(&self) -> String {
        format!("{}({})", self.protocol_type(), self.id())
    }
}
