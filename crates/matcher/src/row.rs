//! Per-block bookkeeping of the doubling matcher.

use fingerprint::{Fingerprint, FingerprintField};

use crate::error::MatchError;
use crate::ring::RingBuffer;

/// Candidate end position of a pattern prefix.
///
/// `print` is the fingerprint of the text prefix `T[0..=location]`, so the
/// segment between two candidates is one [`FingerprintField::suffix`] away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViableOccurrence {
    pub location: usize,
    pub print: Fingerprint,
}

/// Distance between consecutive candidates of a row, and the fingerprint of
/// the text they are apart by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub distance: usize,
    pub print: Fingerprint,
}

/// Row of the doubling matcher for the block `prefix[len..len + block_len]`.
///
/// Holds ends of occurrences of `prefix[..len]` until each has aged by
/// `block_len` symbols and been checked. The matcher keeps all live
/// candidates within a window shorter than `len`, so they form an
/// arithmetic progression: the row stores the oldest and newest explicitly
/// and `count` says how many the progression represents.
#[derive(Debug, Clone)]
pub struct PatternRow {
    block_len: usize,
    block_print: Fingerprint,
    period: Option<Period>,
    count: usize,
    occurrences: RingBuffer<ViableOccurrence>,
}

impl PatternRow {
    pub fn new(block_len: usize, block_print: Fingerprint) -> Self {
        Self {
            block_len,
            block_print,
            period: None,
            count: 0,
            occurrences: RingBuffer::with_capacity(2),
        }
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    pub fn block_print(&self) -> Fingerprint {
        self.block_print
    }

    /// Number of candidates represented, explicit or implied.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn period(&self) -> Option<Period> {
        self.period
    }

    pub fn oldest(&self) -> Option<ViableOccurrence> {
        self.occurrences.front().copied()
    }

    pub fn newest(&self) -> Option<ViableOccurrence> {
        self.occurrences.back().copied()
    }

    /// The oldest candidate, if it has aged at least `block_len` by `index`.
    #[inline]
    pub fn due(&self, index: usize) -> Option<ViableOccurrence> {
        self.oldest()
            .filter(|vo| vo.location + self.block_len <= index)
    }

    /// Retire the oldest candidate. With a known period and more than two
    /// candidates, the next one is derived from the period instead.
    pub fn shift(&mut self, field: &FingerprintField) {
        match (self.count, self.period) {
            (0, _) => {}
            (count, Some(period)) if count > 2 => {
                if let Some(front) = self.occurrences.front_mut() {
                    front.location += period.distance;
                    front.print = field.concat(front.print, period.print);
                }
                self.count -= 1;
            }
            _ => {
                self.occurrences.pop_front();
                self.count -= 1;
                if self.count < 2 {
                    self.period = None;
                }
            }
        }
    }

    /// Record a new candidate ending at `vo.location`.
    ///
    /// Once a period is known, the candidate must sit exactly one period
    /// after the newest one, with a matching fingerprint delta.
    pub fn add(&mut self, field: &FingerprintField, vo: ViableOccurrence) -> Result<(), MatchError> {
        if let (Some(period), Some(newest)) = (self.period, self.occurrences.back_mut()) {
            let distance = vo.location - newest.location;
            if distance != period.distance || field.suffix(vo.print, newest.print) != period.print {
                return Err(MatchError::PeriodInconsistency {
                    location: vo.location,
                    expected: period.distance,
                    found: distance,
                });
            }
            *newest = vo;
            self.count += 1;
            return Ok(());
        }

        self.occurrences.push_back(vo);
        self.count += 1;
        if let (2, Some(oldest), Some(newest)) =
            (self.count, self.occurrences.front(), self.occurrences.back())
        {
            self.period = Some(Period {
                distance: newest.location - oldest.location,
                print: field.suffix(newest.print, oldest.print),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FingerprintField {
        FingerprintField::with_seed(1 << 10, 4, 11).unwrap()
    }

    /// Candidate ending at `location` of `text`.
    fn vo(field: &FingerprintField, text: &[u8], location: usize) -> ViableOccurrence {
        ViableOccurrence {
            location,
            print: field.fingerprint(&text[..=location]),
        }
    }

    #[test]
    fn two_candidates_infer_period() {
        let f = field();
        let text = b"abababab";
        let mut row = PatternRow::new(2, f.fingerprint(b"ab"));
        row.add(&f, vo(&f, text, 1)).unwrap();
        assert_eq!(row.period(), None);
        row.add(&f, vo(&f, text, 3)).unwrap();
        let period = row.period().unwrap();
        assert_eq!(period.distance, 2);
        assert_eq!(period.print, f.fingerprint(b"ab"));
        assert_eq!(row.count(), 2);
    }

    #[test]
    fn progression_is_stored_in_two_slots() {
        let f = field();
        let text = vec![b'a'; 16];
        let mut row = PatternRow::new(4, f.fingerprint(b"aaaa"));
        for location in 3..7 {
            row.add(&f, vo(&f, &text, location)).unwrap();
        }
        assert_eq!(row.count(), 4);
        assert_eq!(row.oldest().map(|v| v.location), Some(3));
        assert_eq!(row.newest().map(|v| v.location), Some(6));

        // Implied candidates surface one shift at a time.
        for expected in 4..7 {
            row.shift(&f);
            assert_eq!(row.oldest(), Some(vo(&f, &text, expected)));
        }
        assert_eq!(row.count(), 1);
        assert_eq!(row.period(), None);
        row.shift(&f);
        assert_eq!(row.count(), 0);
        assert_eq!(row.oldest(), None);
    }

    #[test]
    fn off_period_candidate_is_rejected() {
        let f = field();
        let text = b"aaaaaaaa";
        let mut row = PatternRow::new(2, f.fingerprint(b"aa"));
        row.add(&f, vo(&f, text, 2)).unwrap();
        row.add(&f, vo(&f, text, 3)).unwrap();
        let err = row.add(&f, vo(&f, text, 5)).unwrap_err();
        assert_eq!(
            err,
            MatchError::PeriodInconsistency {
                location: 5,
                expected: 1,
                found: 2
            }
        );
        assert_eq!(row.count(), 2);
    }

    #[test]
    fn mismatched_period_print_is_rejected() {
        let f = field();
        let text = b"aaaab";
        let mut row = PatternRow::new(2, f.fingerprint(b"aa"));
        row.add(&f, vo(&f, text, 2)).unwrap();
        row.add(&f, vo(&f, text, 3)).unwrap();
        // Right distance, wrong symbol in between.
        assert!(matches!(
            row.add(&f, vo(&f, text, 4)),
            Err(MatchError::PeriodInconsistency {
                location: 4,
                expected: 1,
                found: 1
            })
        ));
    }

    #[test]
    fn due_once_aged_until_shifted() {
        let f = field();
        let text = b"abcabc";
        let mut row = PatternRow::new(3, f.fingerprint(b"abc"));
        row.add(&f, vo(&f, text, 2)).unwrap();
        assert_eq!(row.due(4), None);
        assert_eq!(row.due(5).map(|v| v.location), Some(2));
        assert_eq!(row.due(7).map(|v| v.location), Some(2));
        row.shift(&f);
        assert_eq!(row.due(7), None);
    }
}
