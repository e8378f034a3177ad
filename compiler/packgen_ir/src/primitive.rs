//! Primitive catalog.
//!
//! Maps type-identifier spellings from source declarations onto the closed
//! set of [`Primitive`] kinds the serialization runtime has dedicated
//! read/write routines for. Anything else is an [`Primitive::Ident`] that
//! must either be whitelisted or implement the runtime's interfaces itself.

/// The primitive kinds with dedicated runtime read/write routines.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Primitive {
    #[default]
    Invalid,
    /// `[]byte`
    Bytes,
    String,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Byte,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Bool,
    /// `interface{}` / `any`
    Interface,
    /// `time.Time`
    Time,
    /// `time.Duration`
    Duration,
    /// `msgp.Extension`
    Extension,
    /// `json.Number`
    JsonNumber,
    /// Unrecognized identifier, pending whitelist classification.
    Ident,
}

/// External types known to satisfy every runtime interface already.
pub const WHITELIST: &[&str] = &["msgp.Raw", "msgp.Number"];

impl Primitive {
    /// Exact-match lookup of a type spelling.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        Some(match spelling {
            "[]byte" => Self::Bytes,
            "string" => Self::String,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "complex64" => Self::Complex64,
            "complex128" => Self::Complex128,
            "uint" => Self::Uint,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "byte" => Self::Byte,
            "int" => Self::Int,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" | "rune" => Self::Int32,
            "int64" => Self::Int64,
            "bool" => Self::Bool,
            "interface{}" | "any" => Self::Interface,
            "time.Time" => Self::Time,
            "time.Duration" => Self::Duration,
            "msgp.Extension" => Self::Extension,
            "json.Number" => Self::JsonNumber,
            _ => return None,
        })
    }

    /// Runtime routine stem, as in `ReadFloat64` / `WriteIntf`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "INVALID",
            Self::Bytes => "Bytes",
            Self::String => "String",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Complex64 => "Complex64",
            Self::Complex128 => "Complex128",
            Self::Uint => "Uint",
            Self::Uint8 => "Uint8",
            Self::Uint16 => "Uint16",
            Self::Uint32 => "Uint32",
            Self::Uint64 => "Uint64",
            Self::Byte => "Byte",
            Self::Int => "Int",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Bool => "Bool",
            Self::Interface => "Intf",
            Self::Time => "time.Time",
            Self::Duration => "time.Duration",
            Self::Extension => "Extension",
            Self::JsonNumber => "json.Number",
            Self::Ident => "Ident",
        }
    }

    /// Fixed-width and arbitrary-width integers, floats, and durations.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Float32
                | Self::Float64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
                | Self::Byte
                | Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Duration
        )
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a spelling; unknown spellings are [`Primitive::Ident`].
pub fn classify(spelling: &str) -> Primitive {
    Primitive::from_spelling(spelling).unwrap_or(Primitive::Ident)
}

/// Whether `spelling` names a whitelisted external type.
pub fn is_whitelisted(spelling: &str) -> bool {
    WHITELIST.contains(&spelling)
}
