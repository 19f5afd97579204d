use proptest::prelude::*;
use tapestry_diff::{diff_chars, diff_lines};

fn text_strategy() -> impl Strategy<Value = String> {
    let line = prop::string::string_regex("[ -~]{0,30}").expect("valid regex");
    prop::collection::vec(line, 0..20).prop_map(|lines| {
        if lines.is_empty() {
            String::new()
        } else {
            lines.join("\n")
        }
    })
}

proptest! {
    #[test]
    fn equal_inputs_collapse_to_one_unchanged_run(input in text_strategy()) {
        let diff = diff_chars(&input, &input);

        if input.is_empty() {
            prop_assert!(diff.is_empty());
        } else {
            prop_assert_eq!(diff.len(), 1);
            prop_assert!(diff[0].is_unchanged());
            prop_assert_eq!(diff[0].value.as_str(), input.as_str());
            prop_assert_eq!(diff[0].count, input.chars().count());
        }
    }

    #[test]
    fn char_components_reconstruct_both_inputs(
        a in prop::string::string_regex("[ -~]{0,60}").expect("valid regex"),
        b in prop::string::string_regex("[ -~]{0,60}").expect("valid regex"),
    ) {
        let diff = diff_chars(&a, &b);

        let old_side = diff
            .iter()
            .filter(|component| !component.added)
            .map(|component| component.value.as_str())
            .collect::<String>();
        let new_side = diff
            .iter()
            .filter(|component| !component.removed)
            .map(|component| component.value.as_str())
            .collect::<String>();

        prop_assert_eq!(old_side, a);
        prop_assert_eq!(new_side, b);
    }

    #[test]
    fn line_components_reconstruct_both_inputs(a in text_strategy(), b in text_strategy()) {
        let diff = diff_lines(&a, &b);

        let old_side = diff
            .iter()
            .filter(|component| !component.added)
            .map(|component| component.value.as_str())
            .collect::<String>();
        let new_side = diff
            .iter()
            .filter(|component| !component.removed)
            .map(|component| component.value.as_str())
            .collect::<String>();

        prop_assert_eq!(old_side, a);
        prop_assert_eq!(new_side, b);
    }

    #[test]
    fn single_inserted_char_is_one_added_component(
        base in prop::string::string_regex("[ -~]{0,30}").expect("valid regex"),
        split in 0usize..31,
        inserted in prop::char::range('!', '~'),
    ) {
        let at = split.min(base.len());
        let mut grown = base.clone();
        grown.insert(at, inserted);

        let diff = diff_chars(&base, &grown);

        let added = diff.iter().filter(|component| component.added).collect::<Vec<_>>();
        prop_assert_eq!(added.len(), 1);
        prop_assert_eq!(added[0].count, 1);
        prop_assert!(diff.iter().all(|component| !component.removed));
    }

    #[test]
    fn diff_is_deterministic(a in text_strategy(), b in text_strategy()) {
        let one = diff_lines(&a, &b);
        let two = diff_lines(&a, &b);

        prop_assert_eq!(one, two);
    }
}
