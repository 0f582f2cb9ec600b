//! The tofu value cell.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{hash64, Kind, TofuError, TofuResult};

/// Whether a cell's payload may be replaced.
///
/// `Locked` is terminal: no operation leads out of it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutability {
    /// Payload may be replaced.
    #[default]
    Mutable,
    /// Payload is read-only, but the cell may be made mutable again.
    Frozen,
    /// Payload is permanently read-only.
    Locked,
}

impl Mutability {
    /// Check if writes to the payload are allowed.
    #[inline]
    pub const fn allows_writes(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Descriptive metadata attached to a cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: String,
    pub description: String,
    pub id: String,
    pub required: bool,
}

impl Attribute {
    /// Registry-derived attribute for `kind`.
    pub fn for_kind(kind: Kind) -> Self {
        Attribute {
            name: kind.name().to_owned(),
            description: kind.info().to_owned(),
            id: kind.id().to_owned(),
            required: false,
        }
    }

    /// Check if every string field is empty and the required flag is unset.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.id.is_empty() && !self.required
    }
}

/// A dynamically-typed value: kind tag plus owned string payload.
///
/// # Equality and ordering
///
/// Two cells are equal when their kinds and payloads are equal. Ordering is
/// by kind (registry declaration order), then lexicographically by payload.
/// Attributes, mutability and the identity hash are ignored by both.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "SerdeValue")
)]
pub struct TofuValue {
    kind: Kind,
    payload: String,
    mutability: Mutability,
    /// Identity hash of the payload, 0 when it is empty. Reserved for
    /// indexing, never consulted by `Eq`. Recomputed on deserialization.
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    hash: u64,
    attribute: Attribute,
}

impl TofuValue {
    /// Create a mutable cell of `kind` holding `value`.
    pub fn new(kind: Kind, value: impl Into<String>) -> Self {
        let payload = value.into();
        TofuValue {
            kind,
            hash: identity_hash_of(&payload),
            payload,
            mutability: Mutability::Mutable,
            attribute: Attribute::for_kind(kind),
        }
    }

    /// Create a cell from a type identifier such as `"i32"` or `"cstr"`.
    ///
    /// Unknown identifiers are rejected with [`TofuError::InvalidType`].
    pub fn create(type_id: &str, value: impl Into<String>) -> TofuResult<Self> {
        let kind = type_id.parse::<Kind>()?;
        Ok(TofuValue::new(kind, value))
    }

    /// The state left behind by [`take`](Self::take) and
    /// [`release`](Self::release).
    fn vacated() -> Self {
        TofuValue {
            kind: Kind::Any,
            payload: String::new(),
            mutability: Mutability::Frozen,
            hash: 0,
            attribute: Attribute::default(),
        }
    }

    pub(crate) fn from_parts(
        kind: Kind,
        payload: String,
        mutability: Mutability,
        attribute: Attribute,
    ) -> Self {
        TofuValue {
            kind,
            hash: identity_hash_of(&payload),
            payload,
            mutability,
            attribute,
        }
    }

    /// Move the contents out, leaving `self` vacated.
    ///
    /// A vacated cell has kind `any`, an empty payload and attribute, a zero
    /// hash, and is immutable (but not locked).
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::vacated())
    }

    /// Drop the payload and attribute strings, leaving `self` vacated.
    ///
    /// Releasing an already vacated cell is a no-op.
    pub fn release(&mut self) {
        *self = Self::vacated();
    }

    /// Check if this cell has been vacated by `take` or `release`.
    pub fn is_vacated(&self) -> bool {
        self.hash == 0 && self.payload.is_empty() && self.attribute.is_empty()
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The payload text.
    #[inline]
    pub fn value(&self) -> &str {
        &self.payload
    }

    /// The payload, or `default` when the payload is empty.
    pub fn value_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.payload.is_empty() {
            default
        } else {
            &self.payload
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// The identity hash of the current payload.
    #[inline]
    pub fn identity_hash(&self) -> u64 {
        self.hash
    }

    /// Replace the payload.
    ///
    /// Fails with [`TofuError::Immutable`] unless the cell is mutable.
    pub fn set_value(&mut self, value: impl Into<String>) -> TofuResult<()> {
        if !self.mutability.allows_writes() {
            tracing::warn!(kind = %self.kind, "write to immutable tofu value rejected");
            return Err(TofuError::Immutable);
        }
        self.payload = value.into();
        self.hash = identity_hash_of(&self.payload);
        Ok(())
    }

    #[inline]
    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.mutability.allows_writes()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.mutability == Mutability::Locked
    }

    /// Toggle mutability.
    ///
    /// Fails with [`TofuError::Locked`] once the cell has been locked.
    pub fn set_mutable(&mut self, mutable: bool) -> TofuResult<()> {
        if self.is_locked() {
            tracing::warn!(kind = %self.kind, "mutability change on locked tofu value rejected");
            return Err(TofuError::Locked);
        }
        self.mutability = if mutable {
            Mutability::Mutable
        } else {
            Mutability::Frozen
        };
        Ok(())
    }

    /// Make the cell permanently immutable.
    pub fn lock(&mut self) {
        if !self.is_locked() {
            tracing::debug!(kind = %self.kind, "tofu value locked");
        }
        self.mutability = Mutability::Locked;
    }

    #[inline]
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    /// Replace the attribute strings. The required flag is kept.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        id: impl Into<String>,
    ) {
        self.attribute.name = name.into();
        self.attribute.description = description.into();
        self.attribute.id = id.into();
    }

    pub fn set_required(&mut self, required: bool) {
        self.attribute.required = required;
    }

    /// Registry name of this cell's kind.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Registry description of this cell's kind.
    #[inline]
    pub fn type_info(&self) -> &'static str {
        self.kind.info()
    }

    /// Total order: kind first, then payload bytes.
    pub fn compare(&self, other: &TofuValue) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.payload.cmp(&other.payload))
    }

    /// Kind and payload equality.
    pub fn equals(&self, other: &TofuValue) -> bool {
        self.kind == other.kind && self.payload == other.payload
    }

    /// Multi-line description of every field.
    pub fn dump(&self) -> String {
        format!(
            "Tofu Dump:\n  Type: {} ({})\n  Value: {}\n  Value Hash: 0x{:016x}\n  Mutable: {}\n  Locked: {}\n  Attribute Name: {}\n  Description: {}\n  ID: {}\n  Required: {}\n",
            self.kind.name(),
            self.kind.id(),
            self.payload,
            self.hash,
            self.is_mutable(),
            self.is_locked(),
            self.attribute.name,
            self.attribute.description,
            self.attribute.id,
            self.attribute.required,
        )
    }
}

/// `hash64` of a non-empty payload; an empty payload hashes to 0, so a
/// vacated cell and its serialized copy agree.
fn identity_hash_of(payload: &str) -> u64 {
    if payload.is_empty() {
        0
    } else {
        hash64(payload.as_bytes())
    }
}

/// Deserialized shape of a [`TofuValue`]; the hash is derived, not trusted.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SerdeValue {
    kind: Kind,
    payload: String,
    mutability: Mutability,
    attribute: Attribute,
}

#[cfg(feature = "serde")]
impl From<SerdeValue> for TofuValue {
    fn from(raw: SerdeValue) -> Self {
        TofuValue::from_parts(raw.kind, raw.payload, raw.mutability, raw.attribute)
    }
}

impl Default for TofuValue {
    /// An empty, mutable `any` cell with registry attributes.
    fn default() -> Self {
        TofuValue::new(Kind::Any, String::new())
    }
}

impl PartialEq for TofuValue {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for TofuValue {}

impl PartialOrd for TofuValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TofuValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for TofuValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.payload.hash(state);
    }
}

impl fmt::Display for TofuValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}
