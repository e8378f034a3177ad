//! Tree Visitor Pattern
//!
//! Read-only traversal of an [`Elem`] tree. Default implementations call the
//! `walk_*` functions, which descend into children in declaration order.
//! Override `visit_*` to act at specific nodes.
//!
//! # Example
//!
//! ```
//! use packgen_ir::visitor::{walk_elem, Visitor};
//! use packgen_ir::{BaseElem, Elem, Primitive, Slice};
//!
//! struct CountLeaves(usize);
//!
//! impl<'e> Visitor<'e> for CountLeaves {
//!     fn visit_elem(&mut self, elem: &'e Elem) {
//!         if matches!(elem, Elem::Base(_)) {
//!             self.0 += 1;
//!         }
//!         walk_elem(self, elem);
//!     }
//! }
//!
//! let tree = Elem::from(Slice::new(BaseElem::new(Primitive::Int)));
//! let mut counter = CountLeaves(0);
//! counter.visit_elem(&tree);
//! assert_eq!(counter.0, 1);
//! ```

use crate::elem::{Elem, StructField};
use crate::stack::ensure_sufficient_stack;

/// Tree visitor. The visitor may mutate its own state; the tree is immutable.
pub trait Visitor<'e> {
    /// Visit any node.
    fn visit_elem(&mut self, elem: &'e Elem) {
        walk_elem(self, elem);
    }

    /// Visit a record field.
    fn visit_field(&mut self, field: &'e StructField) {
        walk_field(self, field);
    }
}

/// Visit the children of `elem`.
pub fn walk_elem<'e, V: Visitor<'e> + ?Sized>(visitor: &mut V, elem: &'e Elem) {
    ensure_sufficient_stack(|| match elem {
        Elem::Ptr(ptr) => visitor.visit_elem(ptr.value()),
        Elem::Struct(record) => {
            for field in record.fields() {
                visitor.visit_field(field);
            }
        }
        Elem::Array(array) => visitor.visit_elem(array.elem()),
        Elem::Slice(slice) => visitor.visit_elem(slice.elem()),
        Elem::Map(map) => visitor.visit_elem(map.value()),
        Elem::Base(_) => {}
    });
}

/// Visit the subtree of a record field.
pub fn walk_field<'e, V: Visitor<'e> + ?Sized>(visitor: &mut V, field: &'e StructField) {
    visitor.visit_elem(&field.elem);
}

/// Tracks the deepest node seen.
#[derive(Default)]
struct DepthMeter {
    current: usize,
    max: usize,
}

impl<'e> Visitor<'e> for DepthMeter {
    fn visit_elem(&mut self, elem: &'e Elem) {
        self.current += 1;
        self.max = self.max.max(self.current);
        walk_elem(self, elem);
        self.current -= 1;
    }
}

impl Elem {
    /// Number of nodes on the longest root-to-leaf chain.
    pub fn depth(&self) -> usize {
        let mut meter = DepthMeter::default();
        meter.visit_elem(self);
        meter.max
    }
}
