//! # RTMatch Automaton
//!
//! Periodicity-aware KMP automaton used as a real-time matcher for short
//! patterns.
//!
//! [`FailureAutomaton::step`] consumes one text symbol in O(1): the expected
//! pattern symbol advances progress, anything else costs a single
//! [`KeyedTable`] lookup. Patterns with a long border are stored compactly:
//!
//! - [`Layout::Periodic`] keeps two periods worth of states;
//! - [`Layout::Break`] does the same for patterns that are periodic up to
//!   their last symbol, plus one extra state for that symbol.
//!
//! ```
//! use automaton::{Alphabet, FailureAutomaton, Layout};
//!
//! let pattern = b"abababx";
//! let mut automaton = FailureAutomaton::build(pattern, &Alphabet::from_pattern(pattern))?;
//! assert_eq!(automaton.layout(), Layout::Break { period: 2 });
//!
//! let hits: Vec<usize> = b"abababababx"
//!     .iter()
//!     .enumerate()
//!     .filter_map(|(i, &c)| automaton.step(c, i))
//!     .collect();
//! assert_eq!(hits, vec![10]);
//! # Ok::<(), automaton::AutomatonError>(())
//! ```

mod alphabet;
mod error;
mod failure;
mod lookup;

pub use crate::alphabet::Alphabet;
pub use crate::error::AutomatonError;
pub use crate::failure::{periodic_extent, FailureAutomaton, Layout};
pub use crate::lookup::KeyedTable;
