use std::collections::HashSet;

pub const NESTED_SEPARATOR: char = '.';

/// Drop dotted child columns whose parent column is selected too.
///
/// `address.city` is removed when `address` is also in `columns`, since
/// selecting the structured parent already returns all of its fields. A child
/// selected on its own is kept. Surviving columns keep their input order.
pub fn filter_redundant_nested_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    let selected = columns.iter().map(AsRef::as_ref).collect::<HashSet<&str>>();

    columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|column| match column.split_once(NESTED_SEPARATOR) {
            Some((parent, _)) => !selected.contains(parent),
            None => true,
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_dropped_when_parent_selected() {
        let filtered = filter_redundant_nested_columns(&["address", "address.city", "name"]);
        assert_eq!(filtered, vec!["address", "name"]);
    }

    #[test]
    fn test_child_kept_without_parent() {
        let filtered = filter_redundant_nested_columns(&["address.city", "name"]);
        assert_eq!(filtered, vec!["address.city", "name"]);
    }

    #[test]
    fn test_parent_after_child_still_wins() {
        let filtered = filter_redundant_nested_columns(&["address.zip", "name", "address"]);
        assert_eq!(filtered, vec!["name", "address"]);
    }

    #[test]
    fn test_only_first_segment_is_the_parent() {
        // `a.b.c` belongs to `a`, selecting `a.b` does not cover it
        let filtered = filter_redundant_nested_columns(&["a.b", "a.b.c"]);
        assert_eq!(filtered, vec!["a.b", "a.b.c"]);

        let filtered = filter_redundant_nested_columns(&["a", "a.b", "a.b.c"]);
        assert_eq!(filtered, vec!["a"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let inputs: Vec<Vec<&str>> = vec![
            vec![],
            vec!["address", "address.city", "name"],
            vec!["address.city", "name"],
            vec!["a.b", "a", "a.b.c", "x.y", "z"],
            vec!["dup", "dup", "dup.child"],
        ];

        for input in inputs {
            let once = filter_redundant_nested_columns(&input);
            let twice = filter_redundant_nested_columns(&once);
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert!(filter_redundant_nested_columns(&empty).is_empty());
    }
}
