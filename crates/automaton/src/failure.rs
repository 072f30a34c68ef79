//! Streaming KMP automaton with periodicity compaction.

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::AutomatonError;
use crate::lookup::KeyedTable;

/// How the automaton stores its per-position states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One state per pattern position.
    Plain,
    /// The pattern has period `period` with `2 * period <= len`; only the
    /// first `2 * period` states are stored.
    Periodic { period: usize },
    /// Everything but the last symbol is periodic with `period`; the last
    /// position keeps its own symbol and table.
    Break { period: usize },
}

impl Layout {
    pub fn period(&self) -> Option<usize> {
        match *self {
            Layout::Plain => None,
            Layout::Periodic { period } | Layout::Break { period } => Some(period),
        }
    }
}

/// Real-time exact matcher for a single pattern.
///
/// `progress` is the number of pattern symbols currently matched. Each
/// [`FailureAutomaton::step`] takes O(1): either the next pattern symbol
/// matches, or one keyed lookup yields the fallback progress (absent keys
/// restart at 0).
#[derive(Debug, Clone)]
pub struct FailureAutomaton {
    len: usize,
    layout: Layout,
    symbols: Box<[u8]>,
    tables: Box<[KeyedTable]>,
    break_symbol: u8,
    break_table: KeyedTable,
    matched_reset: usize,
    progress: usize,
}

impl FailureAutomaton {
    /// Build the automaton for `pattern` over `alphabet`.
    pub fn build(pattern: &[u8], alphabet: &Alphabet) -> Result<Self, AutomatonError> {
        if pattern.is_empty() {
            return Err(AutomatonError::EmptyPattern);
        }
        alphabet.ensure_covers(pattern)?;

        let len = pattern.len();
        let borders = border_table(pattern);
        let layout = choose_layout(&borders, len);
        let stored = match layout {
            Layout::Plain => len,
            Layout::Periodic { period } => 2 * period,
            Layout::Break { period } => 2 * period,
        };

        let mut automaton = Self {
            len,
            layout,
            symbols: pattern[..stored].into(),
            tables: Box::default(),
            break_symbol: pattern[len - 1],
            break_table: KeyedTable::Empty,
            matched_reset: borders[len],
            progress: 0,
        };

        let mut tables = Vec::with_capacity(stored);
        tables.push(KeyedTable::Empty);
        for q in 1..stored {
            let table = automaton.fallback_table(&tables, q, borders[q], pattern[q], alphabet);
            tables.push(table);
        }
        if matches!(layout, Layout::Break { .. }) {
            let q = len - 1;
            automaton.break_table =
                automaton.fallback_table(&tables, q, borders[q], pattern[q], alphabet);
        }
        automaton.tables = tables.into_boxed_slice();

        debug!(
            pattern_len = len,
            ?layout,
            stored_states = automaton.stored_states(),
            matched_reset = automaton.matched_reset,
            "failure_automaton_built"
        );
        Ok(automaton)
    }

    /// Table for state `q`: for every symbol other than `expected`, where the
    /// border `border` of `pattern[..q]` leads on that symbol.
    fn fallback_table(
        &self,
        tables: &[KeyedTable],
        q: usize,
        border: usize,
        expected: u8,
        alphabet: &Alphabet,
    ) -> KeyedTable {
        debug_assert!(border < q);
        let slot = self.slot(border);
        let border_symbol = self.symbols[slot];
        KeyedTable::from_pairs(alphabet.symbols().iter().filter_map(|&c| {
            if c == expected {
                return None;
            }
            let target = if c == border_symbol {
                border + 1
            } else {
                tables[slot].get(c).unwrap_or(0)
            };
            (target > 0).then_some((c, target))
        }))
    }

    /// Stored state backing progress `q`, for every `q` below the break
    /// position.
    #[inline]
    fn slot(&self, q: usize) -> usize {
        match self.layout {
            Layout::Plain => q,
            Layout::Periodic { period } | Layout::Break { period } => {
                if q < 2 * period {
                    q
                } else {
                    q % period + period
                }
            }
        }
    }

    #[inline]
    fn is_break_position(&self, q: usize) -> bool {
        matches!(self.layout, Layout::Break { .. }) && q == self.len - 1
    }

    /// Advance on `symbol`; returns `Some(index)` when the pattern ends here.
    #[inline]
    pub fn step(&mut self, symbol: u8, index: usize) -> Option<usize> {
        let q = self.progress;
        let (expected, table) = if self.is_break_position(q) {
            (self.break_symbol, &self.break_table)
        } else {
            let slot = self.slot(q);
            (self.symbols[slot], &self.tables[slot])
        };
        let next = if symbol == expected {
            q + 1
        } else {
            table.get(symbol).unwrap_or(0)
        };

        if next == self.len {
            self.progress = self.matched_reset;
            Some(index)
        } else {
            self.progress = next;
            None
        }
    }

    /// Forget any partial match.
    pub fn reset(&mut self) {
        self.progress = 0;
    }

    /// Length of the pattern.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Progress kept after a full match: the longest border of the pattern.
    pub fn matched_reset(&self) -> usize {
        self.matched_reset
    }

    /// Number of explicit transition tables held.
    pub fn stored_states(&self) -> usize {
        self.tables.len() + usize::from(matches!(self.layout, Layout::Break { .. }))
    }
}

/// `borders[k]` is the length of the longest proper border of
/// `pattern[..k]`, for `k` in `0..=pattern.len()`.
pub(crate) fn border_table(pattern: &[u8]) -> Vec<usize> {
    let mut borders = vec![0; pattern.len() + 1];
    let mut k = 0;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = borders[k];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        borders[i + 1] = k;
    }
    borders
}

fn choose_layout(borders: &[usize], len: usize) -> Layout {
    let border = borders[len];
    if border > 0 && 2 * border >= len {
        return Layout::Periodic {
            period: len - border,
        };
    }
    if len >= 3 {
        let head = len - 1;
        let border = borders[head];
        if border > 0 && 2 * border >= head {
            return Layout::Break {
                period: head - border,
            };
        }
    }
    Layout::Plain
}

/// Length of the prefix of `pattern` a compact automaton should absorb,
/// starting from the first `initial` symbols.
///
/// If that block is periodic, the prefix is extended for as long as the
/// period persists, plus the first symbol that breaks it. Otherwise the
/// block is returned unchanged.
pub fn periodic_extent(pattern: &[u8], initial: usize) -> usize {
    let start = initial.min(pattern.len());
    if start == 0 {
        return 0;
    }
    let border = border_table(&pattern[..start])[start];
    if border == 0 || 2 * border < start {
        return start;
    }
    let period = start - border;
    let mut end = start;
    while end < pattern.len() && pattern[end] == pattern[end - period] {
        end += 1;
    }
    (end + 1).min(pattern.len())
}
