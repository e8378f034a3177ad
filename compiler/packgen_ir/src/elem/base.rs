//! Leaf nodes: primitives, identifiers, and shimmed conversions.

use std::borrow::Cow;

use super::Common;
use crate::primitive::{is_whitelisted, Primitive};

/// How a shimmed value reaches its base representation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ShimMode {
    /// Type conversion `base(x)`.
    #[default]
    Cast,
    /// Call to a user-supplied conversion function.
    Convert,
}

/// A leaf the runtime can read and write directly, possibly through a shim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseElem {
    pub(super) common: Common,
    primitive: Primitive,
    shim_mode: ShimMode,
    shim_to_base: Option<String>,
    shim_from_base: Option<String>,
    /// Access goes through an explicit conversion.
    convert: bool,
    /// Byte sequences may alias the input buffer when decoding.
    zero_copy: bool,
    /// Not independently nameable; inline at use sites.
    must_inline: bool,
    /// Address must be taken before access.
    needs_ref: bool,
    allow_nil: Option<bool>,
}

impl BaseElem {
    /// A leaf of the given primitive kind.
    ///
    /// Identifiers carry their spelling, so build them with
    /// [`BaseElem::ident`] instead; passing [`Primitive::Ident`] here is a
    /// bug and is caught in debug builds.
    pub fn new(primitive: Primitive) -> Self {
        debug_assert_ne!(
            primitive,
            Primitive::Ident,
            "identifier leaves need a spelling; use BaseElem::ident"
        );
        Self {
            primitive,
            ..Self::default()
        }
    }

    /// Classify `spelling`; unknown spellings become identifiers whose
    /// alias is the spelling itself.
    pub fn ident(spelling: &str) -> Self {
        match Primitive::from_spelling(spelling) {
            Some(primitive) => Self::new(primitive),
            None => {
                let mut elem = Self {
                    primitive: Primitive::Ident,
                    ..Self::default()
                };
                elem.set_alias(spelling);
                elem
            }
        }
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    pub fn varname(&self) -> &str {
        &self.common.varname
    }

    /// Declare the type name. On a non-identifier this means the declared
    /// type is a named type over the primitive, so access needs a
    /// conversion; qualified names cannot be printed standalone.
    pub fn set_alias(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.primitive != Primitive::Ident {
            self.convert = true;
        }
        if name.contains('.') {
            self.must_inline = true;
        }
        self.common.declare(name);
    }

    /// Install shim expressions. `None` falls back to the base type
    /// (to-base) or the type name (from-base).
    pub fn set_shim(
        &mut self,
        mode: ShimMode,
        to_base: Option<String>,
        from_base: Option<String>,
    ) {
        self.shim_mode = mode;
        self.shim_to_base = to_base;
        self.shim_from_base = from_base;
    }

    pub fn shim_mode(&self) -> ShimMode {
        self.shim_mode
    }

    pub fn convert(&self) -> bool {
        self.convert
    }

    pub fn set_convert(&mut self, convert: bool) {
        self.convert = convert;
    }

    pub fn must_inline(&self) -> bool {
        self.must_inline
    }

    pub fn is_printable(&self) -> bool {
        !self.must_inline
    }

    pub fn needs_ref(&self) -> bool {
        self.needs_ref
    }

    pub fn set_needs_ref(&mut self, needs_ref: bool) {
        self.needs_ref = needs_ref;
    }

    pub fn zero_copy(&self) -> bool {
        self.zero_copy
    }

    pub fn set_zero_copy(&mut self, zero_copy: bool) {
        self.zero_copy = zero_copy;
    }

    /// Extensions and by-reference shims are accessed through their address,
    /// unless the path is already a dereference.
    pub(super) fn bind_name(&mut self, path: &str) {
        if self.primitive == Primitive::Extension || self.needs_ref {
            match path.strip_prefix('*') {
                Some(pointee) => self.common.set_varname(pointee),
                None => self.common.set_varname(format!("&{path}")),
            }
            return;
        }
        self.common.set_varname(path);
    }

    pub fn type_name(&self) -> &str {
        self.common.name_with(|| self.base_type().into_owned())
    }

    /// Routine stem with the package qualifier dropped, as in `ReadTime`.
    pub fn base_name(&self) -> &'static str {
        match self.primitive {
            Primitive::Time => "Time",
            Primitive::Duration => "Duration",
            Primitive::JsonNumber => "JSONNumber",
            other => other.name(),
        }
    }

    /// Spelling of the underlying primitive type, ignoring any alias
    /// except for identifiers.
    pub fn base_type(&self) -> Cow<'_, str> {
        match self.primitive {
            Primitive::Ident => Cow::Borrowed(self.common.declared().unwrap_or_default()),
            Primitive::Interface => Cow::Borrowed("interface{}"),
            Primitive::Bytes => Cow::Borrowed("[]byte"),
            Primitive::Time => Cow::Borrowed("time.Time"),
            Primitive::Duration => Cow::Borrowed("time.Duration"),
            Primitive::JsonNumber => Cow::Borrowed("json.Number"),
            Primitive::Extension => Cow::Borrowed("msgp.Extension"),
            other => Cow::Owned(other.name().to_lowercase()),
        }
    }

    /// Used as `tmp = {to_base}({varname})` when converting.
    pub fn to_base(&self) -> Cow<'_, str> {
        match &self.shim_to_base {
            Some(shim) => Cow::Borrowed(shim),
            None => self.base_type(),
        }
    }

    /// Used as `{varname} = {from_base}(tmp)` when converting.
    pub fn from_base(&self) -> &str {
        match &self.shim_from_base {
            Some(shim) => shim,
            None => self.type_name(),
        }
    }

    pub fn zero_expr(&self) -> Option<&'static str> {
        match self.primitive {
            Primitive::Bytes | Primitive::Interface => Some("nil"),
            Primitive::String | Primitive::JsonNumber => Some("\"\""),
            Primitive::Complex64 | Primitive::Complex128 => Some("complex(0,0)"),
            Primitive::Bool => Some("false"),
            Primitive::Time => Some("(time.Time{})"),
            p if p.is_numeric() => Some("0"),
            _ => None,
        }
    }

    /// Override if set, otherwise only byte sequences accept nil.
    pub fn allows_nil(&self) -> bool {
        self.allow_nil.unwrap_or(self.primitive == Primitive::Bytes)
    }

    pub fn set_allows_nil(&mut self, allow: bool) {
        self.allow_nil = Some(allow);
    }

    pub fn complexity(&self) -> usize {
        // unprintable leaves must report 1 so they get inlined
        if self.convert && !self.must_inline {
            2
        } else {
            1
        }
    }

    /// False for identifiers that are neither primitives nor whitelisted:
    /// the emitter cannot serialize those without the external type
    /// implementing the runtime interfaces.
    pub fn resolved(&self) -> bool {
        if self.primitive != Primitive::Ident {
            return true;
        }
        let ok = is_whitelisted(self.type_name());
        if !ok {
            tracing::debug!(ident = %self.type_name(), "identifier not whitelisted");
        }
        ok
    }
}
