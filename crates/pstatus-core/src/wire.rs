//! Wire form of a `Status` for cross-process transport.
//!
//! Two encodings of the same `WireStatus` message:
//! - JSON (`to_json` / `from_json`), with the context blob base64-encoded.
//! - A binary frame (`encode_frame` / `decode_frame`):
//!
//! ```text
//! [ magic: u32 ][ version: u16 ][ flags: u8 ][ reserved: u8 ]
//! [ code: i32 ][ msg_len: u32 ][ type_url_len: u32 ][ value_len: u32 ]
//! [ msg bytes … ][ type_url bytes … ][ value bytes … ]
//! [ blake3(header || body): 32 bytes ]
//! ```
//!
//! All integers are little-endian. `flags` bit 0 marks a present context; no
//! other bit may be set, `reserved` must be zero, and a frame without the
//! context flag must declare empty `type_url` and `value` sections.

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::config::WireConfig;
use crate::error::{Error, Result};
use crate::payload::{Payload, PayloadRegistry};
use crate::status::Status;

pub const MAGIC: u32 = 0x5453_5850; // "PXST"
pub const VERSION: u16 = 1;
pub const HEADER_LEN: usize = 4 + 2 + 1 + 1 + 4 + 4 + 4 + 4;
pub const CHECKSUM_LEN: usize = 32;

const FLAG_CONTEXT: u8 = 0b0000_0001;

/// Schema of a status on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStatus {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<WireContext>,
}

/// A typed blob: enough for a receiver to rebuild the payload if it knows
/// `type_url`, and to carry the bytes untouched if it does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireContext {
    pub type_url: String,
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
}

impl WireStatus {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code: code.as_i32(),
            message: message.into(),
            context: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Encode as a checksummed binary frame.
    pub fn encode_frame(&self) -> Vec<u8> {
        let empty: &[u8] = &[];
        let (flags, type_url, value) = match &self.context {
            Some(ctx) => (FLAG_CONTEXT, ctx.type_url.as_bytes(), ctx.value.as_slice()),
            None => (0, empty, empty),
        };
        let msg = self.message.as_bytes();
        let body_len = msg.len() + type_url.len() + value.len();

        let mut out = Vec::with_capacity(HEADER_LEN + body_len + CHECKSUM_LEN);
        out.extend_from_slice(&MAGIC.to_le_bytes());
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.push(flags);
        out.push(0u8); // reserved
        out.extend_from_slice(&self.code.to_le_bytes());
        out.extend_from_slice(&len_u32(msg.len()).to_le_bytes());
        out.extend_from_slice(&len_u32(type_url.len()).to_le_bytes());
        out.extend_from_slice(&len_u32(value.len()).to_le_bytes());
        out.extend_from_slice(msg);
        out.extend_from_slice(type_url);
        out.extend_from_slice(value);

        let checksum: [u8; 32] = blake3::hash(&out).into();
        out.extend_from_slice(&checksum);
        out
    }

    /// Decode a frame produced by `encode_frame`, enforcing `cfg` limits
    /// before any body bytes are copied.
    pub fn decode_frame(bytes: &[u8], cfg: &WireConfig) -> Result<Self> {
        if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
            return Err(Error::ShortFrame {
                need: HEADER_LEN + CHECKSUM_LEN,
                got: bytes.len(),
            });
        }

        let magic = u32::from_le_bytes(take::<4>(bytes, 0)?);
        if magic != MAGIC {
            return Err(Error::BadMagic(magic));
        }
        let version = u16::from_le_bytes(take::<2>(bytes, 4)?);
        if version != VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
        let [flags, reserved] = take::<2>(bytes, 6)?;
        let code = i32::from_le_bytes(take::<4>(bytes, 8)?);
        let msg_len = u32::from_le_bytes(take::<4>(bytes, 12)?) as usize;
        let type_url_len = u32::from_le_bytes(take::<4>(bytes, 16)?) as usize;
        let value_len = u32::from_le_bytes(take::<4>(bytes, 20)?) as usize;

        let bad_flags = |reason| Error::BadFlags {
            flags,
            reserved,
            reason,
        };
        if reserved != 0 {
            return Err(bad_flags("reserved byte is set"));
        }
        if flags & !FLAG_CONTEXT != 0 {
            return Err(bad_flags("unknown flag bits"));
        }
        if flags & FLAG_CONTEXT == 0 && (type_url_len != 0 || value_len != 0) {
            return Err(bad_flags("context bytes without the context flag"));
        }

        cfg.check("message", msg_len, cfg.max_message_bytes)?;
        cfg.check("type_url", type_url_len, cfg.max_type_url_bytes)?;
        cfg.check("context", value_len, cfg.max_context_bytes)?;

        let body_end = bytes.len() - CHECKSUM_LEN;
        let declared = msg_len + type_url_len + value_len;
        let actual = body_end - HEADER_LEN;
        if declared != actual {
            return Err(Error::LengthMismatch { declared, actual });
        }

        let expected: [u8; 32] = blake3::hash(&bytes[..body_end]).into();
        if bytes[body_end..] != expected {
            return Err(Error::ChecksumMismatch);
        }

        let body = &bytes[HEADER_LEN..body_end];
        let (msg, rest) = body.split_at(msg_len);
        let (type_url, value) = rest.split_at(type_url_len);

        let message = std::str::from_utf8(msg)
            .map_err(|_| Error::InvalidUtf8("message"))?
            .to_string();
        let context = if flags & FLAG_CONTEXT != 0 {
            Some(WireContext {
                type_url: std::str::from_utf8(type_url)
                    .map_err(|_| Error::InvalidUtf8("type_url"))?
                    .to_string(),
                value: value.to_vec(),
            })
        } else {
            None
        };

        Ok(Self {
            code,
            message,
            context,
        })
    }
}

fn len_u32(len: usize) -> u32 {
    // Saturates; decoders reject anything near this size.
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn take<const N: usize>(bytes: &[u8], at: usize) -> Result<[u8; N]> {
    bytes
        .get(at..at + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::ShortFrame {
            need: at + N,
            got: bytes.len(),
        })
}

impl Status {
    pub fn to_wire(&self) -> WireStatus {
        WireStatus::from(self.clone())
    }

    /// Lenient conversion: an unknown code becomes `UNKNOWN` and keeps its
    /// message; code 0 is the ok status regardless of the other fields.
    pub fn from_wire(wire: &WireStatus) -> Status {
        Status::from(wire.clone())
    }

    /// Strict conversion: unknown codes are rejected, and a context whose
    /// type is registered must decode as that type. Unregistered contexts are
    /// kept as opaque bytes.
    pub fn from_wire_checked(wire: &WireStatus, registry: &PayloadRegistry) -> Result<Status> {
        let code = Code::try_from(wire.code)?;
        let status = match &wire.context {
            Some(ctx) => {
                let payload = Payload::from_parts(ctx.type_url.clone(), ctx.value.clone());
                registry.resolve(&payload)?;
                Status::with_payload(code, wire.message.clone(), payload)
            }
            None => Status::new(code, wire.message.clone()),
        };
        Ok(status)
    }
}

impl From<Status> for WireStatus {
    fn from(s: Status) -> Self {
        match s.into_parts() {
            None => WireStatus::default(),
            Some((code, message, payload)) => WireStatus {
                code: code.as_i32(),
                message,
                context: payload.map(|p| {
                    let (type_url, value) = p.into_parts();
                    WireContext { type_url, value }
                }),
            },
        }
    }
}

impl From<WireStatus> for Status {
    fn from(wire: WireStatus) -> Self {
        let code = match Code::from_i32(wire.code) {
            Some(code) => code,
            None => {
                tracing::warn!(code = wire.code, "unknown status code on the wire; using UNKNOWN");
                Code::Unknown
            }
        };
        match wire.context {
            Some(ctx) => Status::with_payload(
                code,
                wire.message,
                Payload::from_parts(ctx.type_url, ctx.value),
            ),
            None => Status::new(code, wire.message),
        }
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(d)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
