//! Whole-pattern streaming matcher.

use automaton::{periodic_extent, Alphabet, FailureAutomaton};
use fingerprint::FingerprintField;
use serde::{Deserialize, Serialize};
use tracing::{debug, span, warn, Level};

use crate::config::MatcherConfig;
use crate::doubling::{lag_for, DoublingMatcher};
use crate::error::MatchError;
use crate::ring::RingBuffer;

/// Counters collected while streaming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherStats {
    /// Symbols consumed so far.
    pub symbols: usize,
    /// Full pattern occurrences reported.
    pub matches: usize,
    /// Occurrences of the fingerprinted prefix. Always zero for compact
    /// matchers.
    pub prefix_matches: usize,
    /// Block fingerprint comparisons made by the doubling rows.
    pub fingerprint_checks: usize,
    pub period_inconsistencies: usize,
    /// Doubling rows in use.
    pub rows: usize,
}

#[derive(Debug, Clone)]
enum Engine {
    /// The automaton covers the whole pattern.
    Compact(FailureAutomaton),
    /// Doubling matcher on `pattern[..m - tail_len]`, automaton on the last
    /// `tail_len` symbols, joined through the buffer of prefix ends. The
    /// doubling matcher reports a prefix end fewer than `tail_len` symbols
    /// late, so it is buffered before the tail can complete.
    Split {
        head: DoublingMatcher,
        tail: FailureAutomaton,
        tail_len: usize,
        prefix_ends: RingBuffer<usize>,
    },
}

/// Real-time exact matcher: every [`ExactMatcher::step`] does a bounded
/// amount of work and reports an occurrence on the symbol that completes it.
///
/// Occurrences found through fingerprints are correct with high
/// probability; see [`MatcherConfig::error_exponent`].
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    engine: Engine,
    pattern_len: usize,
    max_text_len: usize,
    position: usize,
    matches: usize,
    overrun_reported: bool,
}

impl ExactMatcher {
    /// Build a matcher for `pattern` with a freshly drawn fingerprint base.
    pub fn build(
        pattern: &[u8],
        alphabet: &Alphabet,
        max_text_len: usize,
        error_exponent: u32,
    ) -> Result<Self, MatchError> {
        let config = MatcherConfig::new()
            .with_max_text_len(max_text_len)
            .with_error_exponent(error_exponent);
        config.validate()?;
        let field = FingerprintField::new(max_text_len, error_exponent)?;
        Self::assemble(pattern, alphabet, field, &config)
    }

    pub fn new(pattern: &[u8], config: &MatcherConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let alphabet = match &config.alphabet {
            Some(symbols) => Alphabet::from(symbols.as_slice()),
            None => Alphabet::from_pattern(pattern),
        };
        let field = match config.seed {
            Some(seed) => {
                FingerprintField::with_seed(config.max_text_len, config.error_exponent, seed)?
            }
            None => FingerprintField::new(config.max_text_len, config.error_exponent)?,
        };
        Self::assemble(pattern, &alphabet, field, config)
    }

    fn assemble(
        pattern: &[u8],
        alphabet: &Alphabet,
        field: FingerprintField,
        config: &MatcherConfig,
    ) -> Result<Self, MatchError> {
        if pattern.is_empty() {
            return Err(MatchError::InvalidPattern);
        }
        alphabet.ensure_covers(pattern)?;

        let pattern_len = pattern.len();
        let span = span!(Level::DEBUG, "exact_matcher_build", pattern_len);
        let _guard = span.enter();

        let tail_len = lag_for(pattern_len);
        let head_len = pattern_len - tail_len;
        let compact = head_len == 0
            || (config.periodic_shortcut && periodic_extent(pattern, tail_len) == pattern_len);

        let engine = if compact {
            Engine::Compact(FailureAutomaton::build(pattern, alphabet)?)
        } else {
            let head = &pattern[..head_len];
            let initial = (2 * lag_for(head_len)).min(head_len);
            let seed_len = if config.periodic_shortcut {
                periodic_extent(head, initial)
            } else {
                initial
            };
            Engine::Split {
                head: DoublingMatcher::new(head, alphabet, field, seed_len)?,
                tail: FailureAutomaton::build(&pattern[head_len..], alphabet)?,
                tail_len,
                prefix_ends: RingBuffer::with_capacity(2 * tail_len),
            }
        };

        debug!(
            pattern_len,
            tail_len,
            compact,
            modulus_bits = 64 - field.modulus().leading_zeros(),
            "exact_matcher_built"
        );

        Ok(Self {
            engine,
            pattern_len,
            max_text_len: config.max_text_len,
            position: 0,
            matches: 0,
            overrun_reported: false,
        })
    }

    /// Consume the next text symbol; returns the index it occupies if a
    /// pattern occurrence ends there.
    pub fn step(&mut self, symbol: u8) -> Option<usize> {
        let index = self.position;
        self.position += 1;
        if index >= self.max_text_len && !self.overrun_reported {
            self.overrun_reported = true;
            warn!(max_text_len = self.max_text_len, "text_exceeds_max_len");
        }

        let found = match &mut self.engine {
            Engine::Compact(automaton) => automaton.step(symbol, index),
            Engine::Split {
                head,
                tail,
                tail_len,
                prefix_ends,
            } => {
                head.step(symbol, index, |end| {
                    prefix_ends.push_back(end);
                });
                match tail.step(symbol, index) {
                    Some(end) if end >= *tail_len => {
                        let head_end = end - *tail_len;
                        while prefix_ends.front().is_some_and(|&e| e < head_end) {
                            prefix_ends.pop_front();
                        }
                        (prefix_ends.front() == Some(&head_end)).then_some(end)
                    }
                    _ => None,
                }
            }
        };

        if found.is_some() {
            self.matches += 1;
        }
        found
    }

    /// Stream a whole chunk, returning every occurrence that ends in it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<usize> {
        chunk.iter().filter_map(|&symbol| self.step(symbol)).collect()
    }

    /// Number of symbols consumed, which is also the index of the next one.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern_len
    }

    /// Whether the pattern is matched by the automaton alone, without
    /// fingerprints.
    pub fn is_compact(&self) -> bool {
        matches!(self.engine, Engine::Compact(_))
    }

    pub fn stats(&self) -> MatcherStats {
        let (prefix_matches, fingerprint_checks, period_inconsistencies, rows) =
            match &self.engine {
                Engine::Compact(_) => (0, 0, 0, 0),
                Engine::Split { head, .. } => (
                    head.prefix_matches(),
                    head.fingerprint_checks(),
                    head.period_inconsistencies(),
                    head.rows().len(),
                ),
            };
        MatcherStats {
            symbols: self.position,
            matches: self.matches,
            prefix_matches,
            fingerprint_checks,
            period_inconsistencies,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_TEXT: &[u8] = b"aaaaabbbbbcccccaaaaaaaaaabbbbbcccccdddddaaaaabbbbbcccccaaaaaaaaaabbbbbbbbbbaaaaaaaaaabbbbbcccccaaaaa";

    fn config(text_len: usize) -> MatcherConfig {
        MatcherConfig::new()
            .with_max_text_len(text_len)
            .with_error_exponent(4)
            .with_seed(0xC0FFEE)
    }

    #[test]
    fn example_patterns_split_across_engines() {
        let mut matcher = ExactMatcher::new(b"aaaaabbbbbcccccaaaaa", &config(100)).unwrap();
        assert!(!matcher.is_compact());
        assert_eq!(matcher.feed(EXAMPLE_TEXT), vec![19, 59, 99]);

        let stats = matcher.stats();
        assert_eq!(stats.symbols, 100);
        assert_eq!(stats.matches, 3);
        assert!(stats.prefix_matches >= 3);
        assert_eq!(stats.period_inconsistencies, 0);

        let pattern = b"aaaaabbbbbcccccaaaaaaaaaabbbbbcccccddddd";
        let mut matcher = ExactMatcher::new(pattern, &config(100)).unwrap();
        assert_eq!(matcher.feed(EXAMPLE_TEXT), vec![39]);
    }

    #[test]
    fn unary_pattern_is_compact_unless_disabled() {
        let text = vec![b'a'; 100];
        let pattern = vec![b'a'; 20];
        let expected: Vec<usize> = (19..100).collect();

        let mut compact = ExactMatcher::new(&pattern, &config(100)).unwrap();
        assert!(compact.is_compact());
        assert_eq!(compact.feed(&text), expected);

        let cfg = config(100).with_periodic_shortcut(false);
        let mut split = ExactMatcher::new(&pattern, &cfg).unwrap();
        assert!(!split.is_compact());
        assert_eq!(split.feed(&text), expected);
        assert_eq!(split.stats().period_inconsistencies, 0);
    }

    #[test]
    fn break_symbol_patterns() {
        let mut text = vec![b'a'; 63];
        text.push(b'b');
        text.extend(std::iter::repeat_n(b'a', 135));
        text.push(b'b');

        let mut pattern = vec![b'a'; 63];
        pattern.push(b'b');
        for shortcut in [true, false] {
            let cfg = config(text.len()).with_periodic_shortcut(shortcut);
            let mut matcher = ExactMatcher::new(&pattern, &cfg).unwrap();
            assert_eq!(matcher.is_compact(), shortcut);
            assert_eq!(matcher.feed(&text), vec![63, 199]);
        }

        let mut variant = vec![b'a'; 62];
        variant.extend_from_slice(b"bb");
        let mut matcher = ExactMatcher::new(&variant, &config(text.len())).unwrap();
        assert!(matcher.feed(&text).is_empty());
    }

    #[test]
    fn short_patterns_use_automaton_only() {
        for pattern in [&b"x"[..], b"xy", b"aaa"] {
            let matcher = ExactMatcher::new(pattern, &config(16)).unwrap();
            assert!(matcher.is_compact(), "{pattern:?}");
        }
        for (pattern, expected) in [(&b"xyz"[..], vec![3, 6]), (&b"wxyz"[..], vec![3])] {
            let mut matcher = ExactMatcher::new(pattern, &config(16)).unwrap();
            assert!(!matcher.is_compact(), "{pattern:?}");
            assert_eq!(matcher.feed(b"wxyzxyz"), expected);
        }
    }

    #[test]
    fn step_reports_on_completing_symbol() {
        let mut matcher = ExactMatcher::new(b"needle", &config(64)).unwrap();
        let text = b"a needle in a needle";
        let mut reported = Vec::new();
        for (i, &c) in text.iter().enumerate() {
            assert_eq!(matcher.position(), i);
            if let Some(end) = matcher.step(c) {
                assert_eq!(end, i);
                reported.push(end);
            }
        }
        assert_eq!(reported, vec![7, 19]);
        assert_eq!(matcher.pattern_len(), 6);
    }

    #[test]
    fn feed_preserves_state_across_chunks() {
        let mut whole = ExactMatcher::new(b"abcabd", &config(64)).unwrap();
        let mut chunked = ExactMatcher::new(b"abcabd", &config(64)).unwrap();
        let text = b"abcabcabdabcabdab";
        let expected = whole.feed(text);
        let mut got = Vec::new();
        for chunk in text.chunks(4) {
            got.extend(chunked.feed(chunk));
        }
        assert_eq!(got, expected);
        assert_eq!(got, vec![8, 14]);
    }

    #[test]
    fn build_with_explicit_alphabet() {
        let alphabet = Alphabet::from(&b"abcd"[..]);
        let mut matcher = ExactMatcher::build(b"abcdabca", &alphabet, 64, 4).unwrap();
        assert_eq!(matcher.feed(b"dabcdabcabcdabca"), vec![8, 15]);
    }

    #[test]
    fn build_errors() {
        assert_eq!(
            ExactMatcher::new(b"", &MatcherConfig::default()).unwrap_err(),
            MatchError::InvalidPattern
        );
        let cfg = MatcherConfig::default().with_alphabet(*b"ab");
        assert_eq!(
            ExactMatcher::new(b"abc", &cfg).unwrap_err(),
            MatchError::Automaton(automaton::AutomatonError::SymbolOutsideAlphabet {
                symbol: b'c'
            })
        );
        let cfg = MatcherConfig::default().with_max_text_len(0);
        assert!(matches!(
            ExactMatcher::new(b"abc", &cfg),
            Err(MatchError::InvalidConfigMaxTextLen { .. })
        ));
        let cfg = MatcherConfig::default().with_error_exponent(4);
        assert!(matches!(
            ExactMatcher::new(b"abc", &cfg),
            Err(MatchError::InvalidConfigErrorExponent { .. })
        ));
        assert!(matches!(
            ExactMatcher::build(b"abc", &Alphabet::from_pattern(b"abc"), 1 << 16, 2),
            Err(MatchError::InvalidConfigErrorExponent { .. })
        ));
    }

    #[test]
    fn streams_past_max_text_len() {
        let mut matcher = ExactMatcher::new(b"ab", &config(4)).unwrap();
        assert_eq!(matcher.feed(b"abababab"), vec![1, 3, 5, 7]);
        assert_eq!(matcher.stats().symbols, 8);
    }

    #[test]
    fn split_engine_checks_at_most_one_block_per_step() {
        let pattern: Vec<u8> = b"abaababaabaababaababaabaababaabaab"
            .iter()
            .chain(b"abbabaab")
            .copied()
            .collect();
        let mut text = Vec::new();
        for cut in [5, 42, 17, 42, 33, 42, 2, 42, 29] {
            text.extend_from_slice(&pattern[..cut]);
        }
        let mut matcher = ExactMatcher::new(&pattern, &config(text.len())).unwrap();
        assert!(!matcher.is_compact());
        assert!(matcher.stats().rows > 0);

        let mut found = Vec::new();
        for &c in &text {
            let before = matcher.stats().fingerprint_checks;
            found.extend(matcher.step(c));
            assert!(matcher.stats().fingerprint_checks - before <= 1);
        }
        let expected: Vec<usize> = text
            .windows(pattern.len())
            .enumerate()
            .filter(|(_, w)| *w == pattern.as_slice())
            .map(|(i, _)| i + pattern.len() - 1)
            .collect();
        assert_eq!(found, expected);
        assert_eq!(found, vec![46, 105, 180, 224]);
    }

    #[test]
    fn stats_serialize_to_json() {
        let mut matcher = ExactMatcher::new(b"aaaaabbbbbcccccaaaaa", &config(100)).unwrap();
        matcher.feed(EXAMPLE_TEXT);
        let stats = matcher.stats();
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["symbols"], 100);
        assert_eq!(json["matches"], 3);
        let back: MatcherStats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn matchers_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExactMatcher>();
    }
}
