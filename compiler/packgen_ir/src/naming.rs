//! Synthetic identifier allocation for the naming pass.
//!
//! Container nodes need loop-variable names (`for za0001 := range z.Items`).
//! A [`NamingContext`] hands them out as `prefix + zero-padded counter`.
//!
//! # Ownership
//!
//! The context is an ordinary value owned by whoever drives the naming pass.
//! Independent generation runs (one per input file, say) each create their own
//! context, or [`reset`](NamingContext::reset) a shared one between runs so
//! output stays deterministic.

use thiserror::Error;

/// Default prefix for generated identifiers.
pub const DEFAULT_PREFIX: &str = "za";

/// Default zero-padding width of the counter part.
pub const DEFAULT_WIDTH: usize = 4;

/// Configuration for a [`NamingContext`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingConfig {
    /// Text placed before every counter value.
    pub prefix: String,
    /// Minimum number of digits; shorter counters are zero-padded.
    pub width: usize,
}

impl NamingConfig {
    /// Replace the identifier prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replace the counter padding width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            width: DEFAULT_WIDTH,
        }
    }
}

/// Failure to produce a usable synthetic identifier.
///
/// Both variants mean the identifier space was too small for the tree being
/// named. Generation must stop with a diagnostic; retrying cannot help.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NamingError {
    /// A collision-avoidance loop used up its attempt budget.
    #[error("no collision-free identifier with prefix `{prefix}` after {attempts} attempts")]
    Exhausted { prefix: String, attempts: usize },
    /// The counter would wrap around and start repeating names.
    #[error("identifier counter for prefix `{prefix}` overflowed")]
    CounterOverflow { prefix: String },
}

/// Per-run identifier allocator.
#[derive(Clone, Debug)]
pub struct NamingContext {
    prefix: String,
    width: usize,
    next: u32,
}

impl NamingContext {
    /// Create a context from explicit configuration.
    pub fn new(config: NamingConfig) -> Self {
        Self {
            prefix: config.prefix,
            width: config.width,
            next: 0,
        }
    }

    /// Start over with a new prefix. The padding width is kept.
    pub fn reset(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
        self.next = 0;
    }

    /// Current identifier prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of identifiers handed out since the last reset.
    pub fn allocated(&self) -> u32 {
        self.next
    }

    /// Produce the next identifier, e.g. `za0001`, `za0002`, ...
    ///
    /// Identifiers are unique between resets.
    pub fn allocate(&mut self) -> Result<String, NamingError> {
        self.next = self
            .next
            .checked_add(1)
            .ok_or_else(|| NamingError::CounterOverflow {
                prefix: self.prefix.clone(),
            })?;
        Ok(format!(
            "{}{:0width$}",
            self.prefix,
            self.next,
            width = self.width
        ))
    }

    /// Allocate identifiers until one satisfies `accept`, giving up after
    /// `max_attempts`.
    pub(crate) fn allocate_until(
        &mut self,
        max_attempts: usize,
        mut accept: impl FnMut(&str) -> bool,
    ) -> Result<String, NamingError> {
        for _ in 0..max_attempts {
            let candidate = self.allocate()?;
            if accept(&candidate) {
                return Ok(candidate);
            }
            tracing::trace!(%candidate, "rejected colliding identifier");
        }
        tracing::error!(
            prefix = %self.prefix,
            max_attempts,
            "identifier space exhausted"
        );
        Err(NamingError::Exhausted {
            prefix: self.prefix.clone(),
            attempts: max_attempts,
        })
    }
}

impl Default for NamingContext {
    fn default() -> Self {
        Self::new(NamingConfig::default())
    }
}

#[cfg(test)]
mod tests;
