//! Type-erased error context.
//!
//! A `Payload` is a type URL plus the JSON bytes of a value. It is opaque to
//! anyone who does not know the type; a recipient that does can `unpack` it,
//! and a `PayloadRegistry` lets generic code decode whatever it recognizes.
//!
//! Payloads are never mutated after construction. Cloning copies the bytes.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A value that may be attached to a failed `Status`.
///
/// `TYPE_URL` identifies the type across process boundaries and must be
/// unique among registered payloads.
pub trait PayloadMessage:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    const TYPE_URL: &'static str;
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payload {
    type_url: String,
    value: Vec<u8>,
}

impl Payload {
    /// Serialize `msg` into a payload tagged with its type URL.
    pub fn pack<T: PayloadMessage>(msg: &T) -> Result<Self> {
        Ok(Self {
            type_url: T::TYPE_URL.to_string(),
            value: serde_json::to_vec(msg)?,
        })
    }

    /// Rebuild a payload from its transported parts without interpreting them.
    pub fn from_parts(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn is<T: PayloadMessage>(&self) -> bool {
        self.type_url == T::TYPE_URL
    }

    /// Decode as `T`. Returns `Ok(None)` if the payload holds another type.
    pub fn unpack<T: PayloadMessage>(&self) -> Result<Option<T>> {
        if !self.is::<T>() {
            return Ok(None);
        }
        decode_typed::<T>(&self.type_url, &self.value).map(Some)
    }

    /// Like `unpack`, but a type mismatch is an error.
    pub fn unpack_exact<T: PayloadMessage>(&self) -> Result<T> {
        if !self.is::<T>() {
            return Err(Error::PayloadTypeMismatch {
                expected: T::TYPE_URL.to_string(),
                found: self.type_url.clone(),
            });
        }
        decode_typed::<T>(&self.type_url, &self.value)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<u8>) {
        (self.type_url, self.value)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_url", &self.type_url)
            .field("len", &self.value.len())
            .finish()
    }
}

fn decode_typed<T: PayloadMessage>(type_url: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| Error::PayloadDecode {
        type_url: type_url.to_string(),
        reason: e.to_string(),
    })
}

/// A decoded payload whose concrete type is only known at runtime.
pub trait ResolvedPayload: fmt::Debug + Send + Sync {
    fn type_url(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

impl<T: PayloadMessage> ResolvedPayload for T {
    fn type_url(&self) -> &'static str {
        T::TYPE_URL
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn ResolvedPayload {
    pub fn downcast_ref<T: PayloadMessage>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

type DecodeFn = fn(&[u8]) -> Result<Box<dyn ResolvedPayload>>;

fn decode_erased<T: PayloadMessage>(bytes: &[u8]) -> Result<Box<dyn ResolvedPayload>> {
    let v: T = decode_typed(T::TYPE_URL, bytes)?;
    Ok(Box::new(v))
}

/// Maps type URLs to decoders for the payload types a process knows about.
///
/// Unregistered payloads are not an error anywhere: they simply stay opaque.
#[derive(Default, Clone)]
pub struct PayloadRegistry {
    decoders: BTreeMap<&'static str, DecodeFn>,
}

impl PayloadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: PayloadMessage>(&mut self) -> &mut Self {
        let displaced = self.decoders.insert(T::TYPE_URL, decode_erased::<T>);
        debug_assert!(
            displaced.is_none(),
            "payload type '{}' registered twice",
            T::TYPE_URL
        );
        self
    }

    pub fn contains(&self, type_url: &str) -> bool {
        self.decoders.contains_key(type_url)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decode `payload` if its type is registered; `Ok(None)` if it is not.
    pub fn resolve(&self, payload: &Payload) -> Result<Option<Box<dyn ResolvedPayload>>> {
        match self.decoders.get(payload.type_url()) {
            Some(decode) => decode(payload.value()).map(Some),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for PayloadRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.decoders.keys()).finish()
    }
}
