#[cfg(test)]
mod tests {
    use crate::counting::{CountingWorkload, PATTERN_REPEATS, entry_api, fx_entry_api, get_then_insert};
    use zenbench_core::Workload;

    #[test]
    fn test_counts_match_across_variants() {
        let w = CountingWorkload::new(PATTERN_REPEATS);
        let manual = get_then_insert(&w);
        let entry = entry_api(&w);
        let fx = fx_entry_api(&w);

        assert_eq!(manual.get("a"), Some(&300));
        assert_eq!(manual.get("b"), Some(&200));
        assert_eq!(manual.get("c"), Some(&100));
        assert_eq!(manual, entry);
        assert_eq!(fx.len(), manual.len());
        for (word, count) in &manual {
            assert_eq!(fx.get(word), Some(count));
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(CountingWorkload::new(2).summary(), "12 words, 3 distinct");
    }
}
