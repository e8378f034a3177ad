//! Unresolved-identifier reporting.
//!
//! A leaf whose [`BaseElem::resolved`] is false references a type the
//! generator cannot decompose and the runtime does not know. Generated code
//! for it would not compile, so the emitter must fail the run. This module
//! collects every such identifier so the failure can be reported at once.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::elem::{BaseElem, Elem};
use crate::visitor::{walk_elem, Visitor};

/// The tree references identifiers that cannot be serialized.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unresolved identifiers: {}", .idents.join(", "))]
    Unresolved { idents: Vec<String> },
}

#[derive(Default)]
struct UnresolvedCollector<'e> {
    idents: FxHashSet<&'e str>,
}

impl<'e> Visitor<'e> for UnresolvedCollector<'e> {
    fn visit_elem(&mut self, elem: &'e Elem) {
        if let Elem::Base(leaf) = elem {
            self.record(leaf);
        }
        walk_elem(self, elem);
    }
}

impl<'e> UnresolvedCollector<'e> {
    fn record(&mut self, leaf: &'e BaseElem) {
        if !leaf.resolved() {
            self.idents.insert(leaf.type_name());
        }
    }
}

impl Elem {
    /// Every unresolved identifier in the tree, sorted and deduplicated.
    pub fn unresolved_idents(&self) -> Vec<String> {
        let mut collector = UnresolvedCollector::default();
        collector.visit_elem(self);
        let mut idents: Vec<String> = collector.idents.into_iter().map(str::to_string).collect();
        idents.sort_unstable();
        idents
    }

    /// `Ok` when every leaf is a primitive or a whitelisted identifier.
    pub fn check_resolved(&self) -> Result<(), ResolveError> {
        let idents = self.unresolved_idents();
        if idents.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = idents.len(), "tree has unresolved identifiers");
            Err(ResolveError::Unresolved { idents })
        }
    }
}
