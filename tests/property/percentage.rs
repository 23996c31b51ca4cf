//! Match percentage and position boost stay in range.

use fieldseek::{match_percentage, position_boost};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-eA-E ]{0,20}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_percentage_in_range(matched in text(), query in text()) {
        let pct = match_percentage(&matched, &query);
        prop_assert!((0.0..=100.0).contains(&pct), "{} for {:?} / {:?}", pct, matched, query);
    }

    #[test]
    fn prop_identical_is_100(value in text()) {
        prop_assert_eq!(match_percentage(&value, &value), 100.0);
    }

    #[test]
    fn prop_nonblank_query_at_least_floor(
        matched in "[a-e]{1,8}( [a-e]{1,8}){0,3}",
        query in "[a-e]{1,8}( [a-e]{1,8}){0,3}"
    ) {
        prop_assert!(match_percentage(&matched, &query) >= 50.0);
    }

    #[test]
    fn prop_boost_in_range(matched in text(), query in text()) {
        let boost = position_boost(&matched, &query);
        prop_assert!((1.0..=1.3).contains(&boost));
    }
}
