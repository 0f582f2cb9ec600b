//! Typed constructors and accessors.
//!
//! `from_*` builds a cell of the matching kind from a native value.
//! `as_*` checks the kind and parses the payload back; it never guesses a
//! default on failure.

use crate::{Kind, TofuError, TofuResult, TofuValue};

macro_rules! integer_conversions {
    ($($from:ident, $as:ident, $ty:ty, $kind:expr;)*) => {
        impl TofuValue {
            $(
                #[doc = concat!("Create a `", stringify!($ty), "` cell.")]
                pub fn $from(value: $ty) -> Self {
                    TofuValue::new($kind, value.to_string())
                }

                #[doc = concat!("Read the payload as `", stringify!($ty), "`.")]
                ///
                /// Any integer kind is accepted; values outside the target
                /// range are reported as [`TofuError::Overflow`].
                pub fn $as(&self) -> TofuResult<$ty> {
                    let wide = self.integer_payload($kind)?;
                    <$ty>::try_from(wide).map_err(|_| TofuError::Overflow {
                        kind: $kind,
                        value: self.value().to_owned(),
                    })
                }
            )*
        }

        $(
            impl From<$ty> for TofuValue {
                fn from(value: $ty) -> Self {
                    TofuValue::$from(value)
                }
            }
        )*
    };
}

integer_conversions! {
    from_i8, as_i8, i8, Kind::I8;
    from_i16, as_i16, i16, Kind::I16;
    from_i32, as_i32, i32, Kind::I32;
    from_i64, as_i64, i64, Kind::I64;
    from_u8, as_u8, u8, Kind::U8;
    from_u16, as_u16, u16, Kind::U16;
    from_u32, as_u32, u32, Kind::U32;
    from_u64, as_u64, u64, Kind::U64;
    from_size, as_size, usize, Kind::Size;
}

impl TofuValue {
    fn require_kind(&self, accepted: bool, expected: Kind) -> TofuResult<()> {
        if accepted {
            Ok(())
        } else {
            Err(TofuError::TypeMismatch {
                expected,
                found: self.kind(),
            })
        }
    }

    fn integer_payload(&self, expected: Kind) -> TofuResult<i128> {
        self.require_kind(self.kind().is_integer(), expected)?;
        let text = self.value().trim();
        text.parse::<i128>()
            .map_err(|err| TofuError::parse(0, format!("`{text}` is not an integer: {err}")))
    }

    fn radix_payload(&self, kind: Kind, prefixes: &[&str], radix: u32) -> TofuResult<u64> {
        self.require_kind(self.kind() == kind, kind)?;
        let text = self.value().trim();
        let digits = prefixes
            .iter()
            .find_map(|prefix| text.strip_prefix(prefix))
            .unwrap_or(text);
        u64::from_str_radix(digits, radix)
            .map_err(|err| TofuError::parse(0, format!("`{text}` is not a {kind} number: {err}")))
    }

    /// Create a `hex` cell from its textual form (e.g. `"0xff"`).
    pub fn from_hex(text: impl Into<String>) -> Self {
        TofuValue::new(Kind::Hex, text)
    }

    /// Parse a `hex` payload, with or without a `0x` prefix.
    pub fn as_hex(&self) -> TofuResult<u64> {
        self.radix_payload(Kind::Hex, &["0x", "0X"], 16)
    }

    /// Create an `octal` cell from its textual form (e.g. `"0o17"`).
    pub fn from_octal(text: impl Into<String>) -> Self {
        TofuValue::new(Kind::Octal, text)
    }

    /// Parse an `octal` payload, with or without a `0o` prefix.
    pub fn as_octal(&self) -> TofuResult<u64> {
        self.radix_payload(Kind::Octal, &["0o", "0O"], 8)
    }

    pub fn from_f32(value: f32) -> Self {
        TofuValue::new(Kind::Float, value.to_string())
    }

    pub fn as_f32(&self) -> TofuResult<f32> {
        self.require_kind(self.kind().is_float(), Kind::Float)?;
        let text = self.value().trim();
        text.parse::<f32>()
            .map_err(|err| TofuError::parse(0, format!("`{text}` is not a float: {err}")))
    }

    pub fn from_f64(value: f64) -> Self {
        TofuValue::new(Kind::Double, value.to_string())
    }

    pub fn as_f64(&self) -> TofuResult<f64> {
        self.require_kind(self.kind().is_float(), Kind::Double)?;
        let text = self.value().trim();
        text.parse::<f64>()
            .map_err(|err| TofuError::parse(0, format!("`{text}` is not a double: {err}")))
    }

    pub fn from_bool(value: bool) -> Self {
        TofuValue::new(Kind::Bool, if value { "true" } else { "false" })
    }

    /// Read a `bool` payload. `true`/`1` and `false`/`0` are accepted.
    pub fn as_bool(&self) -> TofuResult<bool> {
        self.require_kind(self.kind() == Kind::Bool, Kind::Bool)?;
        match self.value().trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(TofuError::parse(0, format!("`{other}` is not a boolean"))),
        }
    }

    pub fn from_char(value: char) -> Self {
        TofuValue::new(Kind::Cchar, value.to_string())
    }

    /// Read a `cchar` payload, which must hold exactly one character.
    pub fn as_char(&self) -> TofuResult<char> {
        self.require_kind(self.kind() == Kind::Cchar, Kind::Cchar)?;
        let mut chars = self.value().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            (None, _) => Err(TofuError::parse(0, "empty character payload")),
            (Some(_), Some(_)) => Err(TofuError::parse(
                self.value().chars().next().map_or(0, char::len_utf8),
                "more than one character",
            )),
        }
    }

    /// Create a `cstr` cell.
    pub fn from_cstr(value: impl Into<String>) -> Self {
        TofuValue::new(Kind::Cstr, value)
    }

    /// Borrow a `cstr` or `wstr` payload.
    pub fn as_cstr(&self) -> TofuResult<&str> {
        self.require_kind(self.kind().is_text(), Kind::Cstr)?;
        Ok(self.value())
    }

    /// Create a `blob` cell; bytes are stored as lower-case hex digit pairs.
    pub fn from_blob(bytes: &[u8]) -> Self {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let mut text = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            text.push(char::from(DIGITS[usize::from(byte >> 4)]));
            text.push(char::from(DIGITS[usize::from(byte & 0x0f)]));
        }
        TofuValue::new(Kind::Blob, text)
    }

    /// Decode a `blob` payload back to bytes.
    pub fn as_blob(&self) -> TofuResult<Vec<u8>> {
        self.require_kind(self.kind() == Kind::Blob, Kind::Blob)?;
        let text = self.value().as_bytes();
        if text.len() % 2 != 0 {
            return Err(TofuError::parse(text.len(), "odd number of hex digits"));
        }
        text.chunks_exact(2)
            .enumerate()
            .map(|(i, pair)| match (hex_digit(pair[0]), hex_digit(pair[1])) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(TofuError::parse(i * 2, "invalid hex digit")),
            })
            .collect()
    }
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

impl From<f32> for TofuValue {
    fn from(value: f32) -> Self {
        TofuValue::from_f32(value)
    }
}

impl From<f64> for TofuValue {
    fn from(value: f64) -> Self {
        TofuValue::from_f64(value)
    }
}

impl From<bool> for TofuValue {
    fn from(value: bool) -> Self {
        TofuValue::from_bool(value)
    }
}

impl From<char> for TofuValue {
    fn from(value: char) -> Self {
        TofuValue::from_char(value)
    }
}

impl From<&str> for TofuValue {
    fn from(value: &str) -> Self {
        TofuValue::from_cstr(value)
    }
}

impl From<String> for TofuValue {
    fn from(value: String) -> Self {
        TofuValue::from_cstr(value)
    }
}
