use std::cmp::Ordering;

use crate::core::{Record, Value};
use crate::query::{ReportSort, SortDirection};

/// Multi-key stable ordering of records
pub struct SortComparator;

impl SortComparator {
    /// Return the records ordered by `keys`; the input slice is left untouched.
    ///
    /// Keys are read once per record, then compared in priority order. Records
    /// that tie on every key keep their input order. A key that holds numbers
    /// for any record compares its numeric text numerically as well.
    pub fn sort<'a, R: Record>(records: &[&'a R], keys: &[ReportSort]) -> Vec<&'a R> {
        if keys.is_empty() {
            return records.to_vec();
        }

        let mut decorated: Vec<(Vec<Value>, &'a R)> = records
            .iter()
            .map(|record| {
                let sort_values = keys.iter().map(|key| record.value_of(&key.field)).collect();
                (sort_values, *record)
            })
            .collect();

        let numeric_text: Vec<bool> = (0..keys.len())
            .map(|idx| decorated.iter().any(|(values, _)| values[idx].is_number()))
            .collect();

        decorated.sort_by(|(a, _), (b, _)| Self::compare_keys(a, b, keys, &numeric_text));
        decorated.into_iter().map(|(_, record)| record).collect()
    }

    /// Three-way comparison of two records under the given keys
    pub fn compare<R: Record>(a: &R, b: &R, keys: &[ReportSort]) -> Ordering {
        for key in keys {
            let (val_a, val_b) = (a.value_of(&key.field), b.value_of(&key.field));
            let numeric_text = val_a.is_number() || val_b.is_number();
            let ord = Self::compare_values(&val_a, &val_b, key.direction, numeric_text);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    fn compare_keys(a: &[Value], b: &[Value], keys: &[ReportSort], numeric_text: &[bool]) -> Ordering {
        for (((val_a, val_b), key), numeric_text) in a.iter().zip(b).zip(keys).zip(numeric_text) {
            let ord = Self::compare_values(val_a, val_b, key.direction, *numeric_text);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Nulls go last in both directions; only real comparisons are inverted
    fn compare_values(a: &Value, b: &Value, direction: SortDirection, numeric_text: bool) -> Ordering {
        match (a, b) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            _ => {
                let cmp = a.sort_cmp(b, numeric_text);
                match direction {
                    SortDirection::Asc => cmp,
                    SortDirection::Desc => cmp.reverse(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JsonRecord;

    fn person(name: &str, age: Option<i64>) -> JsonRecord {
        let record = JsonRecord::new().with("name", name);
        match age {
            Some(age) => record.with("age", age),
            None => record,
        }
    }

    fn names(records: &[&JsonRecord]) -> Vec<String> {
        records.iter().map(|r| r.value_of("name").to_text()).collect()
    }

    #[test]
    fn test_multi_key_sort() {
        let records = vec![person("Bo", Some(30)), person("Ana", Some(40)), person("Cy", Some(30))];
        let refs: Vec<&JsonRecord> = records.iter().collect();

        let sorted = SortComparator::sort(&refs, &[ReportSort::desc("age"), ReportSort::asc("name")]);
        assert_eq!(names(&sorted), vec!["Ana", "Bo", "Cy"]);

        // Input untouched
        assert_eq!(names(&refs), vec!["Bo", "Ana", "Cy"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let records = vec![
            person("first", Some(1)),
            person("second", Some(1)),
            person("third", Some(0)),
            person("fourth", Some(1)),
        ];
        let refs: Vec<&JsonRecord> = records.iter().collect();
        let sorted = SortComparator::sort(&refs, &[ReportSort::asc("age")]);
        assert_eq!(names(&sorted), vec!["third", "first", "second", "fourth"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let records = vec![person("b", Some(2)), person("a", Some(2)), person("c", Some(1))];
        let refs: Vec<&JsonRecord> = records.iter().collect();
        let keys = [ReportSort::asc("age"), ReportSort::desc("name")];
        let once = SortComparator::sort(&refs, &keys);
        let twice = SortComparator::sort(&once, &keys);
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let records = vec![person("none", None), person("old", Some(70)), person("young", Some(20))];
        let refs: Vec<&JsonRecord> = records.iter().collect();

        let asc = SortComparator::sort(&refs, &[ReportSort::asc("age")]);
        assert_eq!(names(&asc), vec!["young", "old", "none"]);

        let desc = SortComparator::sort(&refs, &[ReportSort::desc("age")]);
        assert_eq!(names(&desc), vec!["old", "young", "none"]);
    }

    #[test]
    fn test_mixed_number_and_text_keys_compare_numerically() {
        let records = vec![
            JsonRecord::new().with("name", "num20").with("k", 20),
            JsonRecord::new().with("name", "text10").with("k", "10"),
            JsonRecord::new().with("name", "text9").with("k", "9"),
            JsonRecord::new().with("name", "word").with("k", "n/a"),
        ];
        let refs: Vec<&JsonRecord> = records.iter().collect();
        let sorted = SortComparator::sort(&refs, &[ReportSort::asc("k")]);
        assert_eq!(names(&sorted), vec!["text9", "text10", "num20", "word"]);

        assert_eq!(
            SortComparator::compare(&records[0], &records[1], &[ReportSort::asc("k")]),
            Ordering::Greater
        );
    }

    #[test]
    fn test_text_only_keys_compare_by_code_point() {
        let records = vec![
            JsonRecord::new().with("name", "nine").with("k", "9"),
            JsonRecord::new().with("name", "ten").with("k", "10"),
        ];
        let refs: Vec<&JsonRecord> = records.iter().collect();
        let sorted = SortComparator::sort(&refs, &[ReportSort::asc("k")]);
        assert_eq!(names(&sorted), vec!["ten", "nine"]);
    }

    #[test]
    fn test_empty_keys_keep_order() {
        let records = vec![person("z", None), person("a", None)];
        let refs: Vec<&JsonRecord> = records.iter().collect();
        assert_eq!(names(&SortComparator::sort(&refs, &[])), vec!["z", "a"]);
    }

    #[test]
    fn test_compare_single_records() {
        let a = person("a", Some(1));
        let b = person("b", Some(2));
        assert_eq!(SortComparator::compare(&a, &b, &[ReportSort::asc("age")]), Ordering::Less);
        assert_eq!(SortComparator::compare(&a, &b, &[ReportSort::desc("age")]), Ordering::Greater);
        assert_eq!(SortComparator::compare(&a, &a, &[ReportSort::asc("name")]), Ordering::Equal);
    }
}
