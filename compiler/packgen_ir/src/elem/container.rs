//! Container nodes: fixed arrays, slices, and string-keyed maps.
//!
//! Each owns one element subtree and reports a constant complexity; nesting
//! cost is the element's own business.

use super::{Common, Elem};
use crate::naming::{NamingContext, NamingError};

/// Wrap an array size in the integer type used by serialized length
/// headers, so comparisons type-check however the size constant was declared.
pub fn coerce_array_size(size: &str) -> String {
    format!("uint32({size})")
}

/// `[N]T`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Array {
    pub(super) common: Common,
    /// Loop index name; empty until bound.
    index: String,
    /// Size expression as written (`4`, `N`, `pkg.Size`).
    size: String,
    elem: Box<Elem>,
}

impl Array {
    pub fn new(size: impl Into<String>, elem: impl Into<Elem>) -> Self {
        Self {
            common: Common::default(),
            index: String::new(),
            size: size.into(),
            elem: Box::new(elem.into()),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    /// The size expression cast for comparison with a length header.
    pub fn coerced_size(&self) -> String {
        coerce_array_size(&self.size)
    }

    pub fn elem(&self) -> &Elem {
        &self.elem
    }

    pub fn elem_mut(&mut self) -> &mut Elem {
        &mut self.elem
    }

    /// Picks an index name that does not occur in `path`, so a nested array
    /// never shadows the index of an enclosing container. Only the path is
    /// checked, not names chosen elsewhere in the tree.
    pub(super) fn bind_name(
        &mut self,
        path: &str,
        names: &mut NamingContext,
    ) -> Result<(), NamingError> {
        self.common.set_varname(path);
        // Candidates are pairwise distinct. Candidates of equal width can
        // only occur in `path` at distinct offsets, so at most `path.len()`
        // of them collide; the budget also covers one width rollover.
        let budget = 2 * (path.len() + 1);
        let index = names.allocate_until(budget, |candidate| !path.contains(candidate))?;
        tracing::trace!(%index, path, "bound array index");
        self.elem.bind_name(&format!("{path}[{index}]"), names)?;
        self.index = index;
        Ok(())
    }

    pub fn type_name(&self) -> &str {
        self.common.name_with(|| format!("[{}]{}", self.size, self.elem.type_name()))
    }

    pub fn complexity(&self) -> usize {
        2
    }

    /// Fixed-size arrays have no empty literal.
    pub fn zero_expr(&self) -> Option<String> {
        None
    }
}

/// `[]T`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Slice {
    pub(super) common: Common,
    index: String,
    allow_nil: Option<bool>,
    elem: Box<Elem>,
}

impl Slice {
    pub fn new(elem: impl Into<Elem>) -> Self {
        Self {
            common: Common::default(),
            index: String::new(),
            allow_nil: None,
            elem: Box::new(elem.into()),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn elem(&self) -> &Elem {
        &self.elem
    }

    pub fn elem_mut(&mut self) -> &mut Elem {
        &mut self.elem
    }

    pub(super) fn bind_name(
        &mut self,
        path: &str,
        names: &mut NamingContext,
    ) -> Result<(), NamingError> {
        self.common.set_varname(path);
        let index = names.allocate()?;
        tracing::trace!(%index, path, "bound slice index");
        // `*p[i]` would index before dereferencing
        let element = if path.starts_with('*') {
            format!("({path})[{index}]")
        } else {
            format!("{path}[{index}]")
        };
        self.elem.bind_name(&element, names)?;
        self.index = index;
        Ok(())
    }

    pub fn type_name(&self) -> &str {
        self.common.name_with(|| format!("[]{}", self.elem.type_name()))
    }

    pub fn complexity(&self) -> usize {
        2
    }

    pub fn zero_expr(&self) -> &'static str {
        "nil"
    }

    pub fn allows_nil(&self) -> bool {
        self.allow_nil.unwrap_or(true)
    }

    pub fn set_allows_nil(&mut self, allow: bool) {
        self.allow_nil = Some(allow);
    }
}

/// `map[string]T`. Keys are always strings; only the value is a subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    pub(super) common: Common,
    key_binding: String,
    value_binding: String,
    allow_nil: Option<bool>,
    value: Box<Elem>,
}

impl Map {
    pub fn new(value: impl Into<Elem>) -> Self {
        Self {
            common: Common::default(),
            key_binding: String::new(),
            value_binding: String::new(),
            allow_nil: None,
            value: Box::new(value.into()),
        }
    }

    /// Loop variable for keys; empty until bound.
    pub fn key_binding(&self) -> &str {
        &self.key_binding
    }

    /// Loop variable for values; empty until bound.
    pub fn value_binding(&self) -> &str {
        &self.value_binding
    }

    pub fn value(&self) -> &Elem {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Elem {
        &mut self.value
    }

    /// The value subtree is bound to the value loop variable, not to an
    /// index expression on `path`.
    pub(super) fn bind_name(
        &mut self,
        path: &str,
        names: &mut NamingContext,
    ) -> Result<(), NamingError> {
        self.common.set_varname(path);
        let key = names.allocate()?;
        // fresh names never repeat, so the first candidate always differs
        let value = names.allocate_until(2, |candidate| candidate != key)?;
        tracing::trace!(%key, %value, path, "bound map entry");
        self.value.bind_name(&value, names)?;
        self.key_binding = key;
        self.value_binding = value;
        Ok(())
    }

    pub fn type_name(&self) -> &str {
        self.common.name_with(|| format!("map[string]{}", self.value.type_name()))
    }

    pub fn complexity(&self) -> usize {
        3
    }

    pub fn zero_expr(&self) -> &'static str {
        "nil"
    }

    pub fn allows_nil(&self) -> bool {
        self.allow_nil.unwrap_or(true)
    }

    pub fn set_allows_nil(&mut self, allow: bool) {
        self.allow_nil = Some(allow);
    }
}
