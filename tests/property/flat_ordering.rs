//! Property-based tests for flat path ordering

use filelist::manifest::order_by_length;
use proptest::prelude::*;

/// Test that ordering is by character count and stable among equal lengths
#[test]
fn test_order_by_length_is_stable_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec("[a-cé/]{0,6}", 0..32), |paths| {
            let mut ordered = paths.clone();
            order_by_length(&mut ordered);

            prop_assert_eq!(ordered.len(), paths.len());
            for pair in ordered.windows(2) {
                prop_assert!(pair[0].chars().count() <= pair[1].chars().count());
            }

            // Each length class keeps its discovery order
            for length in ordered.iter().map(|p| p.chars().count()) {
                let before: Vec<&String> =
                    paths.iter().filter(|p| p.chars().count() == length).collect();
                let after: Vec<&String> =
                    ordered.iter().filter(|p| p.chars().count() == length).collect();
                prop_assert_eq!(before, after);
            }
            Ok(())
        })
        .unwrap();
}
