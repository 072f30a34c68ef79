//! Dyadic doubling matcher over a pattern prefix.

use automaton::{Alphabet, FailureAutomaton};
use fingerprint::{Fingerprint, FingerprintField};
use tracing::{debug, warn};

use crate::error::MatchError;
use crate::ring::RingBuffer;
use crate::row::{PatternRow, ViableOccurrence};

/// `floor(log2 len) + 1`.
///
/// For a prefix of this length it bounds the row count, and therefore how
/// many symbols may pass between a candidate coming due and being checked.
pub fn lag_for(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

/// Streaming matcher for a pattern prefix `Q` of length `M`.
///
/// A [`FailureAutomaton`] finds occurrences of the head `Q[..L0]`. Each row
/// holds candidate ends of some `Q[..L]` and, once a candidate has aged by
/// the row's block length `B`, compares the fingerprint of the `B` text
/// symbols after it with that of `Q[L..L + B]`. Block lengths roughly double
/// from row to row, so there are O(log M) rows, each with O(1) state.
///
/// Every step services exactly one row, in rotation. A candidate is thus
/// checked at most `rows - 1` symbols after it comes due, and an occurrence
/// of `Q` ending at `i` is reported no later than the step that consumes
/// `i + lag_for(M) - 1`, with its true end index. Blocks satisfy
/// `lag <= B <= L - lag`, so a row's live candidates always fall within a
/// window shorter than `L` and form an arithmetic progression.
///
/// When `Q[..L0]` has no period of `lag` or less, a service meets at most
/// one due candidate, so each step does O(1) fingerprint work.
#[derive(Debug, Clone)]
pub struct DoublingMatcher {
    field: FingerprintField,
    seed: FailureAutomaton,
    rows: Box<[PatternRow]>,
    prefix_len: usize,
    lag: usize,
    current: Fingerprint,
    /// Text-prefix fingerprints of the last `rows.len()` positions.
    recent: RingBuffer<Fingerprint>,
    last_index: Option<usize>,
    prefix_matches: usize,
    fingerprint_checks: usize,
    period_inconsistencies: usize,
}

impl DoublingMatcher {
    /// Build a matcher for `prefix` whose automaton covers at least the
    /// first `seed_len` symbols.
    ///
    /// The head is never shorter than `2 * lag_for(prefix.len())` (or the
    /// whole prefix), and may grow so that the rows tile the rest exactly.
    pub fn new(
        prefix: &[u8],
        alphabet: &Alphabet,
        field: FingerprintField,
        seed_len: usize,
    ) -> Result<Self, MatchError> {
        if prefix.is_empty() {
            return Err(MatchError::InvalidPattern);
        }
        let prefix_len = prefix.len();
        let lag = lag_for(prefix_len);
        let min_seed = seed_len.max(2 * lag).min(prefix_len);
        let (seed_len, blocks) = plan_blocks(prefix_len, min_seed, lag);
        let seed = FailureAutomaton::build(&prefix[..seed_len], alphabet)?;

        let rows: Box<[PatternRow]> = blocks
            .iter()
            .map(|&(start, len)| PatternRow::new(len, field.fingerprint(&prefix[start..start + len])))
            .collect();

        debug!(
            prefix_len,
            seed_len,
            lag,
            seed_layout = ?seed.layout(),
            rows = rows.len(),
            "doubling_matcher_built"
        );

        Ok(Self {
            field,
            seed,
            recent: RingBuffer::with_capacity(rows.len().max(1)),
            rows,
            prefix_len,
            lag,
            current: Fingerprint::EMPTY,
            last_index: None,
            prefix_matches: 0,
            fingerprint_checks: 0,
            period_inconsistencies: 0,
        })
    }

    /// Consume the symbol at `index`. Every prefix occurrence confirmed by
    /// this step is passed to `report` as its end index, in increasing order.
    ///
    /// Indices must be consecutive, starting at 0.
    pub fn step(&mut self, symbol: u8, index: usize, mut report: impl FnMut(usize)) {
        self.current = self.field.concat(self.current, self.field.symbol(symbol));
        self.last_index = Some(index);

        if let Some(row) = self.serviced_row(index) {
            self.recent.push_back(self.current);
            self.service(row, index, &mut report);
        }

        if self.seed.step(symbol, index).is_some() {
            if self.rows.is_empty() {
                self.prefix_matches += 1;
                report(index);
            } else {
                let vo = ViableOccurrence {
                    location: index,
                    print: self.current,
                };
                self.admit(0, vo);
            }
        }
    }

    /// Check the candidates still pending once the text has ended.
    pub fn finish(&mut self, mut report: impl FnMut(usize)) {
        let Some(index) = self.last_index else {
            return;
        };
        // Promotions made here are never due yet, so one pass suffices.
        for row in (0..self.rows.len()).rev() {
            self.service(row, index, &mut report);
        }
    }

    /// Row serviced by the step consuming `index`.
    pub fn serviced_row(&self, index: usize) -> Option<usize> {
        (!self.rows.is_empty()).then(|| index % self.rows.len())
    }

    fn service(&mut self, row: usize, index: usize, report: &mut impl FnMut(usize)) {
        while let Some(due) = self.rows[row].due(index) {
            let end = due.location + self.rows[row].block_len();
            self.fingerprint_checks += 1;
            let confirmed = self
                .print_at(end, index)
                .filter(|&print| self.field.suffix(print, due.print) == self.rows[row].block_print());
            self.rows[row].shift(&self.field);

            let Some(print) = confirmed else {
                continue;
            };
            if row + 1 == self.rows.len() {
                self.prefix_matches += 1;
                report(end);
            } else {
                self.admit(row + 1, ViableOccurrence { location: end, print });
            }
        }
    }

    /// Fingerprint of the text up to and including `position`.
    fn print_at(&self, position: usize, index: usize) -> Option<Fingerprint> {
        let age = index.checked_sub(position)?;
        let offset = self.recent.len().checked_sub(age + 1)?;
        self.recent.get(offset).copied()
    }

    fn admit(&mut self, row: usize, vo: ViableOccurrence) {
        if let Err(err) = self.rows[row].add(&self.field, vo) {
            self.period_inconsistencies += 1;
            warn!(row, error = %err, "period_inconsistency");
        }
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Length of the head matched by the automaton.
    pub fn seed_len(&self) -> usize {
        self.seed.len()
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    pub fn rows(&self) -> &[PatternRow] {
        &self.rows
    }

    pub fn prefix_matches(&self) -> usize {
        self.prefix_matches
    }

    /// Block fingerprint comparisons made so far.
    pub fn fingerprint_checks(&self) -> usize {
        self.fingerprint_checks
    }

    /// Candidates dropped because they disagreed with a row's period.
    pub fn period_inconsistencies(&self) -> usize {
        self.period_inconsistencies
    }
}

/// Tile `prefix[seed..]` with blocks `(start, len)` satisfying
/// `lag <= len <= start - lag`, working back from the end of the prefix.
/// Returns the head length and the blocks in prefix order.
fn plan_blocks(prefix_len: usize, min_seed: usize, lag: usize) -> (usize, Vec<(usize, usize)>) {
    let mut blocks = Vec::new();
    let mut end = prefix_len;
    while end >= 3 * lag {
        let start = (end + lag).div_ceil(2);
        if start < min_seed {
            break;
        }
        blocks.push((start, end - start));
        end = start;
    }
    blocks.reverse();
    (end, blocks)
}
