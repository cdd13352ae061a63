//! Property tests for the recursive splitter.

use pdf_ingest::{RecursiveSplitter, SplitterConfig};
use proptest::prelude::*;

fn arb_config() -> impl Strategy<Value = SplitterConfig> {
    (2usize..80).prop_flat_map(|size| {
        (Just(size), 0..size).prop_map(|(size, overlap)| SplitterConfig::new(size, overlap).unwrap())
    })
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zé \n]{0,400}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn chunks_never_exceed_chunk_size(cfg in arb_config(), text in arb_text()) {
        let s = RecursiveSplitter::new(cfg);
        for chunk in s.split(&text) {
            prop_assert!(chunk.chars().count() <= cfg.chunk_size);
        }
    }

    #[test]
    fn spans_are_ordered_trimmed_slices(cfg in arb_config(), text in arb_text()) {
        let s = RecursiveSplitter::new(cfg);
        let spans = s.split_spans(&text);
        for pair in spans.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
            prop_assert!(pair[0].end <= pair[1].end);
        }
        for span in &spans {
            let chunk = &text[span.clone()];
            prop_assert!(!chunk.is_empty());
            prop_assert_eq!(chunk, chunk.trim());
        }
    }

    #[test]
    fn every_visible_character_is_covered(cfg in arb_config(), text in arb_text()) {
        let s = RecursiveSplitter::new(cfg);
        let spans = s.split_spans(&text);
        for (i, c) in text.char_indices() {
            if c.is_whitespace() {
                continue;
            }
            prop_assert!(
                spans.iter().any(|r| r.start <= i && i < r.end),
                "byte {} ({:?}) not covered", i, c
            );
        }
    }
}
