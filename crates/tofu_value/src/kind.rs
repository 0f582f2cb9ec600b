//! Value kind registry.
//!
//! One enum, three exhaustive matches. The identifier, display name and
//! description of a kind are all derived from the variant, so the tables
//! cannot drift apart.

use std::fmt;
use std::str::FromStr;

use crate::TofuError;

/// The closed set of value kinds a [`TofuValue`](crate::TofuValue) may hold.
///
/// Declaration order is significant: cells of different kinds order by
/// their position in this enum.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// Signed 8-bit integer
    I8,
    /// Signed 16-bit integer
    I16,
    /// Signed 32-bit integer
    I32,
    /// Signed 64-bit integer
    I64,
    /// Unsigned 8-bit integer
    U8,
    /// Unsigned 16-bit integer
    U16,
    /// Unsigned 32-bit integer
    U32,
    /// Unsigned 64-bit integer
    U64,
    /// Hexadecimal text
    Hex,
    /// Octal text
    Octal,
    /// Single-precision float
    Float,
    /// Double-precision float
    Double,
    /// Wide string
    Wstr,
    /// C string
    Cstr,
    /// Single character
    Cchar,
    /// Boolean
    Bool,
    /// Size / count
    Size,
    /// Binary blob, stored as hex digits
    Blob,
    /// Generic value
    Any,
}

impl Kind {
    /// Every registered kind, in declaration order.
    pub const ALL: [Kind; 19] = [
        Kind::I8,
        Kind::I16,
        Kind::I32,
        Kind::I64,
        Kind::U8,
        Kind::U16,
        Kind::U32,
        Kind::U64,
        Kind::Hex,
        Kind::Octal,
        Kind::Float,
        Kind::Double,
        Kind::Wstr,
        Kind::Cstr,
        Kind::Cchar,
        Kind::Bool,
        Kind::Size,
        Kind::Blob,
        Kind::Any,
    ];

    /// Look up a kind by its type identifier.
    ///
    /// Identifiers are case-sensitive. The legacy spellings `oct`, `f32`,
    /// `f64` and `char` are accepted as aliases.
    pub fn from_id(id: &str) -> Option<Kind> {
        match id {
            "i8" => Some(Kind::I8),
            "i16" => Some(Kind::I16),
            "i32" => Some(Kind::I32),
            "i64" => Some(Kind::I64),
            "u8" => Some(Kind::U8),
            "u16" => Some(Kind::U16),
            "u32" => Some(Kind::U32),
            "u64" => Some(Kind::U64),
            "hex" => Some(Kind::Hex),
            "octal" | "oct" => Some(Kind::Octal),
            "float" | "f32" => Some(Kind::Float),
            "double" | "f64" => Some(Kind::Double),
            "wstr" => Some(Kind::Wstr),
            "cstr" => Some(Kind::Cstr),
            "cchar" | "char" => Some(Kind::Cchar),
            "bool" => Some(Kind::Bool),
            "size" => Some(Kind::Size),
            "blob" => Some(Kind::Blob),
            "any" => Some(Kind::Any),
            _ => None,
        }
    }

    /// Canonical type identifier, as accepted by [`Kind::from_id`].
    pub const fn id(self) -> &'static str {
        match self {
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Hex => "hex",
            Kind::Octal => "octal",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::Wstr => "wstr",
            Kind::Cstr => "cstr",
            Kind::Cchar => "cchar",
            Kind::Bool => "bool",
            Kind::Size => "size",
            Kind::Blob => "blob",
            Kind::Any => "any",
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::I8 => "Signed 8-bit Integer",
            Kind::I16 => "Signed 16-bit Integer",
            Kind::I32 => "Signed 32-bit Integer",
            Kind::I64 => "Signed 64-bit Integer",
            Kind::U8 => "Unsigned 8-bit Integer",
            Kind::U16 => "Unsigned 16-bit Integer",
            Kind::U32 => "Unsigned 32-bit Integer",
            Kind::U64 => "Unsigned 64-bit Integer",
            Kind::Hex => "Hexadecimal",
            Kind::Octal => "Octal",
            Kind::Float => "Float",
            Kind::Double => "Double",
            Kind::Wstr => "Wide String",
            Kind::Cstr => "C String",
            Kind::Cchar => "Char",
            Kind::Bool => "Boolean",
            Kind::Size => "Size",
            Kind::Blob => "Blob",
            Kind::Any => "Any",
        }
    }

    /// One-line description.
    pub const fn info(self) -> &'static str {
        match self {
            Kind::I8 => "An 8-bit signed integer value",
            Kind::I16 => "A 16-bit signed integer value",
            Kind::I32 => "A 32-bit signed integer value",
            Kind::I64 => "A 64-bit signed integer value",
            Kind::U8 => "An 8-bit unsigned integer value",
            Kind::U16 => "A 16-bit unsigned integer value",
            Kind::U32 => "A 32-bit unsigned integer value",
            Kind::U64 => "A 64-bit unsigned integer value",
            Kind::Hex => "A hexadecimal value",
            Kind::Octal => "An octal value",
            Kind::Float => "A single-precision floating point value",
            Kind::Double => "A double-precision floating point value",
            Kind::Wstr => "A wide string value",
            Kind::Cstr => "A C string value",
            Kind::Cchar => "A character value",
            Kind::Bool => "A boolean value",
            Kind::Size => "A size value",
            Kind::Blob => "A binary blob encoded as hex digits",
            Kind::Any => "A generic value",
        }
    }

    /// Fixed-width integer kinds (`i8` through `u64`) and `size`.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
                | Kind::Size
        )
    }

    /// `float` and `double`.
    pub const fn is_float(self) -> bool {
        matches!(self, Kind::Float | Kind::Double)
    }

    /// Textual kinds whose payload is the value itself.
    pub const fn is_text(self) -> bool {
        matches!(self, Kind::Cstr | Kind::Wstr)
    }
}

impl FromStr for Kind {
    type Err = TofuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_id(s).ok_or_else(|| TofuError::InvalidType {
            type_id: s.to_owned(),
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
