//! Type-shape tree nodes.
//!
//! Consider the declaration:
//!
//! ```text
//! type Marshaler struct {
//!     Thing1 *float64 `msg:"thing1"`
//!     Body   []byte   `msg:"body"`
//! }
//! ```
//!
//! The parser builds `Ptr(Struct[thing1: Ptr(Base(Float64)), body: Base(Bytes)])`
//! and binding the root at `z` yields these access paths:
//!
//! ```text
//! Ptr             z
//!   Struct        z           (auto-deref through the pointer)
//!     Ptr         z.Thing1
//!       Base      *z.Thing1
//!     Base        z.Body
//! ```

mod base;
mod container;
mod ptr;
mod record;

pub use base::{BaseElem, ShimMode};
pub use container::{coerce_array_size, Array, Map, Slice};
pub use ptr::Ptr;
pub use record::{Struct, StructField};

use std::cell::OnceCell;

use crate::naming::{NamingContext, NamingError};
use crate::stack::ensure_sufficient_stack;

/// State every node carries regardless of variant.
#[derive(Clone, Debug, Default, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Common {
    /// Access path; empty until the naming pass reaches this node.
    varname: String,
    /// Type name supplied by the user or parser.
    declared: Option<String>,
    /// Memoized structural type name.
    #[cfg_attr(feature = "cache", serde(skip))]
    computed: OnceCell<String>,
    /// Generated methods should always use a pointer receiver.
    always_ptr: bool,
}

// The memo is a cache, not identity.
impl PartialEq for Common {
    fn eq(&self, other: &Self) -> bool {
        self.varname == other.varname
            && self.declared == other.declared
            && self.always_ptr == other.always_ptr
    }
}

impl Common {
    fn set_varname(&mut self, path: impl Into<String>) {
        self.varname = path.into();
    }

    fn declare(&mut self, name: String) {
        self.declared = Some(name);
    }

    fn declared(&self) -> Option<&str> {
        self.declared.as_deref()
    }

    /// Declared name if any, else the memoized result of `compute`.
    fn name_with(&self, compute: impl FnOnce() -> String) -> &str {
        match &self.declared {
            Some(name) => name,
            None => self.computed.get_or_init(compute),
        }
    }
}

/// A node in the type-shape tree.
///
/// `Clone`, `PartialEq` and `Drop` are written by hand so that trees nested
/// deeper than the native stack can still be copied, compared and freed.
#[derive(Debug, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Elem {
    /// `*T`
    Ptr(Ptr),
    /// Record with named, tagged fields.
    Struct(Struct),
    /// `[N]T`
    Array(Array),
    /// `[]T`
    Slice(Slice),
    /// `map[string]T`
    Map(Map),
    /// Primitive, identifier, or shimmed leaf.
    Base(BaseElem),
}

impl Elem {
    fn common(&self) -> &Common {
        match self {
            Elem::Ptr(e) => &e.common,
            Elem::Struct(e) => &e.common,
            Elem::Array(e) => &e.common,
            Elem::Slice(e) => &e.common,
            Elem::Map(e) => &e.common,
            Elem::Base(e) => &e.common,
        }
    }

    fn common_mut(&mut self) -> &mut Common {
        match self {
            Elem::Ptr(e) => &mut e.common,
            Elem::Struct(e) => &mut e.common,
            Elem::Array(e) => &mut e.common,
            Elem::Slice(e) => &mut e.common,
            Elem::Map(e) => &mut e.common,
            Elem::Base(e) => &mut e.common,
        }
    }

    /// Run the naming pass over the whole tree, rooted at `root`.
    ///
    /// Call once per tree instance, before reading any derived text.
    #[tracing::instrument(level = "debug", skip(self, names))]
    pub fn bind_root(&mut self, root: &str, names: &mut NamingContext) -> Result<(), NamingError> {
        self.bind_name(root, names)?;
        tracing::debug!(allocated = names.allocated(), "naming pass complete");
        Ok(())
    }

    /// Bind this node to `path` and every descendant to the path derived
    /// from it.
    pub fn bind_name(&mut self, path: &str, names: &mut NamingContext) -> Result<(), NamingError> {
        ensure_sufficient_stack(|| match self {
            Elem::Ptr(e) => e.bind_name(path, names),
            Elem::Struct(e) => e.bind_name(path, names),
            Elem::Array(e) => e.bind_name(path, names),
            Elem::Slice(e) => e.bind_name(path, names),
            Elem::Map(e) => e.bind_name(path, names),
            Elem::Base(e) => {
                e.bind_name(path);
                Ok(())
            }
        })
    }

    /// The bound access path, or `""` before binding.
    pub fn varname(&self) -> &str {
        &self.common().varname
    }

    /// Canonical type name, or the declared alias if one was set.
    ///
    /// Computed once; later calls return the cached string.
    pub fn type_name(&self) -> &str {
        ensure_sufficient_stack(|| match self {
            Elem::Ptr(e) => e.type_name(),
            Elem::Struct(e) => e.type_name(),
            Elem::Array(e) => e.type_name(),
            Elem::Slice(e) => e.type_name(),
            Elem::Map(e) => e.type_name(),
            Elem::Base(e) => e.type_name(),
        })
    }

    /// Declare a type name for this node.
    pub fn set_alias(&mut self, name: impl Into<String>) {
        match self {
            Elem::Base(e) => e.set_alias(name),
            other => other.common_mut().declare(name.into()),
        }
    }

    /// The user-declared type name, if any. Never a computed name.
    pub fn declared_alias(&self) -> Option<&str> {
        self.common().declared()
    }

    /// A fully independent copy of this subtree. Safe at any nesting depth.
    #[must_use]
    pub fn deep_copy(&self) -> Elem {
        self.clone()
    }

    /// Relative cost hint, always `>= 1`.
    pub fn complexity(&self) -> usize {
        ensure_sufficient_stack(|| match self {
            Elem::Ptr(e) => e.complexity(),
            Elem::Struct(e) => e.complexity(),
            Elem::Array(e) => e.complexity(),
            Elem::Slice(e) => e.complexity(),
            Elem::Map(e) => e.complexity(),
            Elem::Base(e) => e.complexity(),
        })
    }

    /// Expression for the zero/empty value, if this node has one.
    pub fn zero_expr(&self) -> Option<String> {
        match self {
            Elem::Ptr(e) => Some(e.zero_expr().to_string()),
            Elem::Struct(e) => e.zero_expr(),
            Elem::Array(e) => e.zero_expr(),
            Elem::Slice(e) => Some(e.zero_expr().to_string()),
            Elem::Map(e) => Some(e.zero_expr().to_string()),
            Elem::Base(e) => e.zero_expr().map(str::to_string),
        }
    }

    /// Emptiness test `varname == zero`, for `omitempty` code paths.
    pub fn if_zero_expr(&self) -> Option<String> {
        self.zero_expr()
            .map(|zero| format!("{} == {}", self.varname(), zero))
    }

    /// Whether the emitter may write and accept nil for this node.
    pub fn allows_nil(&self) -> bool {
        match self {
            Elem::Slice(e) => e.allows_nil(),
            Elem::Map(e) => e.allows_nil(),
            Elem::Base(e) => e.allows_nil(),
            Elem::Ptr(_) | Elem::Struct(_) | Elem::Array(_) => false,
        }
    }

    /// Override nil allowance. Returns `false` when this variant has no
    /// nil allowance to override (pointer, struct, array).
    ///
    /// Repeated calls replace the previous override; the last one wins.
    pub fn set_allows_nil(&mut self, allow: bool) -> bool {
        let applied = match self {
            Elem::Slice(e) => {
                e.set_allows_nil(allow);
                true
            }
            Elem::Map(e) => {
                e.set_allows_nil(allow);
                true
            }
            Elem::Base(e) => {
                e.set_allows_nil(allow);
                true
            }
            Elem::Ptr(_) | Elem::Struct(_) | Elem::Array(_) => false,
        };
        if !applied {
            tracing::debug!(ty = %self.type_name(), allow, "nil allowance not supported");
        }
        applied
    }

    /// Whether generated methods should always use a pointer receiver.
    pub fn always_ptr(&self) -> bool {
        self.common().always_ptr
    }

    /// Request (or stop requesting) pointer receivers.
    pub fn set_always_ptr(&mut self, always: bool) {
        self.common_mut().always_ptr = always;
    }

    /// False only for leaves that must be inlined at their use sites.
    pub fn is_printable(&self) -> bool {
        match self {
            Elem::Base(e) => e.is_printable(),
            _ => true,
        }
    }
}

impl Clone for Elem {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Elem::Ptr(e) => Elem::Ptr(e.clone()),
            Elem::Struct(e) => Elem::Struct(e.clone()),
            Elem::Array(e) => Elem::Array(e.clone()),
            Elem::Slice(e) => Elem::Slice(e.clone()),
            Elem::Map(e) => Elem::Map(e.clone()),
            Elem::Base(e) => Elem::Base(e.clone()),
        })
    }
}

impl PartialEq for Elem {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Elem::Ptr(a), Elem::Ptr(b)) => a == b,
            (Elem::Struct(a), Elem::Struct(b)) => a == b,
            (Elem::Array(a), Elem::Array(b)) => a == b,
            (Elem::Slice(a), Elem::Slice(b)) => a == b,
            (Elem::Map(a), Elem::Map(b)) => a == b,
            (Elem::Base(a), Elem::Base(b)) => a == b,
            _ => false,
        })
    }
}

impl Drop for Elem {
    fn drop(&mut self) {
        // Unlink children onto a work-list so drop glue never recurses
        // more than one level.
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut elem) = pending.pop() {
            elem.detach_children(&mut pending);
        }
    }
}

impl Elem {
    /// Move every direct child into `out`, leaving empty leaves behind.
    fn detach_children(&mut self, out: &mut Vec<Elem>) {
        let slots: Vec<&mut Elem> = match self {
            Elem::Ptr(e) => vec![e.value_mut()],
            Elem::Array(e) => vec![e.elem_mut()],
            Elem::Slice(e) => vec![e.elem_mut()],
            Elem::Map(e) => vec![e.value_mut()],
            Elem::Struct(e) => e.fields_mut().iter_mut().map(|f| &mut f.elem).collect(),
            Elem::Base(_) => return,
        };
        for slot in slots {
            if !matches!(slot, Elem::Base(_)) {
                out.push(std::mem::replace(slot, Elem::Base(BaseElem::default())));
            }
        }
    }
}

impl From<Ptr> for Elem {
    fn from(e: Ptr) -> Self {
        Elem::Ptr(e)
    }
}

impl From<Struct> for Elem {
    fn from(e: Struct) -> Self {
        Elem::Struct(e)
    }
}

impl From<Array> for Elem {
    fn from(e: Array) -> Self {
        Elem::Array(e)
    }
}

impl From<Slice> for Elem {
    fn from(e: Slice) -> Self {
        Elem::Slice(e)
    }
}

impl From<Map> for Elem {
    fn from(e: Map) -> Self {
        Elem::Map(e)
    }
}

impl From<BaseElem> for Elem {
    fn from(e: BaseElem) -> Self {
        Elem::Base(e)
    }
}
