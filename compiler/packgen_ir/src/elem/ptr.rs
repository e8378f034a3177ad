//! Pointer nodes.

use super::{Common, Elem};
use crate::naming::{NamingContext, NamingError};
use crate::primitive::Primitive;

/// `*T`, wrapping exactly one child.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Ptr {
    pub(super) common: Common,
    value: Box<Elem>,
}

impl Ptr {
    pub fn new(value: impl Into<Elem>) -> Self {
        Self {
            common: Common::default(),
            value: Box::new(value.into()),
        }
    }

    /// The pointee.
    pub fn value(&self) -> &Elem {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Elem {
        &mut self.value
    }

    /// Struct fields and identifier methods are reached through the pointer
    /// directly; everything else is explicitly dereferenced.
    pub(super) fn bind_name(
        &mut self,
        path: &str,
        names: &mut NamingContext,
    ) -> Result<(), NamingError> {
        self.common.set_varname(path);
        match self.value.as_mut() {
            Elem::Struct(record) => record.bind_name(path, names),
            Elem::Base(leaf) if leaf.primitive() == Primitive::Ident => {
                // already addressable through the pointer
                if leaf.convert() {
                    leaf.set_needs_ref(false);
                }
                leaf.bind_name(path);
                Ok(())
            }
            other => other.bind_name(&format!("*{path}"), names),
        }
    }

    pub fn type_name(&self) -> &str {
        self.common.name_with(|| format!("*{}", self.value.type_name()))
    }

    pub fn complexity(&self) -> usize {
        1 + self.value.complexity()
    }

    pub fn zero_expr(&self) -> &'static str {
        "nil"
    }

    /// Whether the emitter must allocate the pointee before decoding into it.
    pub fn needs_init(&self) -> bool {
        !matches!(self.value.as_ref(), Elem::Base(leaf) if leaf.needs_ref())
    }
}
