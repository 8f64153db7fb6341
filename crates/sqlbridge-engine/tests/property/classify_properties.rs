//! Property tests for statement classification.

use proptest::prelude::*;

use sqlbridge_core::{Category, TransactionMode};
use sqlbridge_engine::Classifier;

fn keyword_case(keyword: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), keyword.len()).prop_map(move |upper| {
        keyword
            .chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect()
    })
}

fn leading_ws() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,4}"
}

// Tail that starts at a word boundary and never introduces a keyword at
// the front.
fn tail() -> impl Strategy<Value = String> {
    "( [a-z0-9_(),*=']{0,24})?"
}

proptest! {
    #[test]
    fn select_any_case_any_indent(ws in leading_ws(), kw in keyword_case("select"), rest in tail()) {
        let c = Classifier::default();
        prop_assert_eq!(c.classify(&format!("{ws}{kw}{rest}")), Category::Select);
    }

    #[test]
    fn insert_any_case_any_indent(ws in leading_ws(), kw in keyword_case("insert"), rest in tail()) {
        let c = Classifier::default();
        prop_assert_eq!(c.classify(&format!("{ws}{kw}{rest}")), Category::Insert);
    }

    #[test]
    fn transaction_keywords_only_in_legacy_mode(
        ws in leading_ws(),
        kw in prop_oneof![keyword_case("begin"), keyword_case("end"), keyword_case("commit")],
        rest in tail(),
    ) {
        let sql = format!("{ws}{kw}{rest}");
        prop_assert_eq!(Classifier::new(TransactionMode::None).classify(&sql), Category::Mutation);

        let legacy = Classifier::new(TransactionMode::LegacyExplicit).classify(&sql);
        let expected = if kw.eq_ignore_ascii_case("begin") {
            Category::BeginTxn
        } else {
            Category::EndTxn
        };
        prop_assert_eq!(legacy, expected);
    }

    #[test]
    fn classification_is_total_and_never_panics(sql in ".{0,64}") {
        let c = Classifier::new(TransactionMode::LegacyExplicit);
        let _ = c.classify(&sql);
    }

    #[test]
    fn other_leading_words_are_mutations(word in "[a-z]{1,10}", rest in tail()) {
        prop_assume!(!["select", "insert", "begin", "end", "commit"].contains(&word.as_str()));
        let c = Classifier::default();
        prop_assert_eq!(c.classify(&format!("{word}{rest}")), Category::Mutation);
    }
}
