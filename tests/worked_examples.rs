use rtmatch::{ExactMatcher, MatcherConfig, match_all, match_with_config};

const TEXT: &[u8] = b"aaaaabbbbbcccccaaaaaaaaaabbbbbcccccdddddaaaaabbbbbcccccaaaaaaaaaabbbbbbbbbbaaaaaaaaaabbbbbcccccaaaaa";

fn runs(parts: &[(u8, usize)]) -> Vec<u8> {
    parts
        .iter()
        .flat_map(|&(symbol, count)| std::iter::repeat_n(symbol, count))
        .collect()
}

#[test]
fn short_pattern_in_block_text() {
    assert_eq!(match_all(TEXT, b"aaaaabbbbbcccccaaaaa", 4).unwrap(), vec![19, 59, 99]);
}

#[test]
fn long_pattern_in_block_text() {
    let pattern = b"aaaaabbbbbcccccaaaaaaaaaabbbbbcccccddddd";
    assert_eq!(match_all(TEXT, pattern, 4).unwrap(), vec![39]);
}

#[test]
fn unary_text_and_pattern() {
    let text = vec![b'a'; 100];
    let pattern = vec![b'a'; 20];
    let expected: Vec<usize> = (19..=99).collect();

    assert_eq!(match_all(&text, &pattern, 4).unwrap(), expected);

    let cfg = MatcherConfig::new()
        .with_error_exponent(4)
        .with_max_text_len(100)
        .with_periodic_shortcut(false);
    let mut matcher = ExactMatcher::new(&pattern, &cfg).unwrap();
    assert!(!matcher.is_compact());
    assert_eq!(matcher.feed(&text), expected);
    assert!(matcher.stats().rows > 0);
}

#[test]
fn periodic_run_with_break_symbol() {
    let text = runs(&[(b'a', 63), (b'b', 1), (b'a', 135), (b'b', 1)]);
    let pattern = runs(&[(b'a', 63), (b'b', 1)]);
    assert_eq!(match_all(&text, &pattern, 4).unwrap(), vec![63, 199]);

    let variant = runs(&[(b'a', 62), (b'b', 2)]);
    assert!(match_all(&text, &variant, 4).unwrap().is_empty());
}

#[test]
fn both_engines_agree_on_worked_examples() {
    let cases: Vec<(Vec<u8>, Vec<u8>)> = vec![
        (TEXT.to_vec(), b"aaaaabbbbbcccccaaaaa".to_vec()),
        (TEXT.to_vec(), b"bbbbbcccccaaaaaaaaaabbbbb".to_vec()),
        (
            runs(&[(b'a', 63), (b'b', 1), (b'a', 135), (b'b', 1)]),
            runs(&[(b'a', 40), (b'b', 1)]),
        ),
    ];
    for (text, pattern) in cases {
        let base = MatcherConfig::new()
            .with_error_exponent(4)
            .with_max_text_len(text.len());
        let with = match_with_config(&text, &pattern, &base).unwrap();
        let without =
            match_with_config(&text, &pattern, &base.clone().with_periodic_shortcut(false)).unwrap();
        assert_eq!(with, without);
    }
}

#[test]
fn occurrences_are_reported_without_delay() {
    let mut matcher = ExactMatcher::new(
        b"aaaaabbbbbcccccaaaaa",
        &MatcherConfig::new().with_error_exponent(4).with_max_text_len(TEXT.len()),
    )
    .unwrap();
    for (i, &symbol) in TEXT.iter().enumerate() {
        let reported = matcher.step(symbol);
        let expected = matches!(i, 19 | 59 | 99).then_some(i);
        assert_eq!(reported, expected, "index {i}");
    }
}
