//! Packgen IR - Type Shape Trees
//!
//! This crate models the shape of a declared data type as a tree and exposes,
//! per node, the textual fragments the emitter needs to write serialization
//! routines:
//! - Type names (`[]float64`, `map[string]*Foo`, anonymous `struct{...}`)
//! - Access paths from a root receiver (`z.Items[za0001].Name`)
//! - Zero-value expressions and emptiness tests (`z.Body == nil`)
//! - Complexity hints for the inline-vs-temporary decision
//!
//! # Pipeline
//!
//! 1. The parser builds an [`Elem`] tree bottom-up, classifying leaves with
//!    [`classify`] / [`BaseElem::ident`].
//! 2. The emitter binds the root once with [`Elem::bind_root`], passing a
//!    [`NamingContext`] it owns for the whole generation run.
//! 3. The emitter reads [`Elem::type_name`], [`Elem::varname`],
//!    [`Elem::zero_expr`], [`Elem::complexity`] and friends.
//!
//! # Design
//!
//! - **Closed variants**: [`Elem`] is an exhaustive enum over the six node
//!   kinds; every behavioral difference is an exhaustive `match`.
//! - **Owned trees**: children are boxed and exclusively owned, so
//!   [`Elem::deep_copy`] yields a fully independent tree.
//! - **No global state**: identifier counters live in a caller-owned
//!   [`NamingContext`], so independent runs can proceed concurrently.
//! - **Declared vs computed names**: user-declared aliases and memoized
//!   computed type names are stored separately.

mod elem;
mod naming;
mod primitive;
mod resolve;
mod stack;
pub mod visitor;

pub use elem::{
    coerce_array_size, Array, BaseElem, Elem, Map, Ptr, ShimMode, Slice, Struct, StructField,
};
pub use naming::{NamingConfig, NamingContext, NamingError};
pub use primitive::{classify, is_whitelisted, Primitive, WHITELIST};
pub use resolve::ResolveError;
pub use stack::ensure_sufficient_stack;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG` is
/// set, e.g. `RUST_LOG=packgen_ir=trace` to see every generated binding name.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
