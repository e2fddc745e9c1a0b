//! Daily lesson selection.

use chrono::{Datelike, NaiveDate};

use crate::catalog::Catalog;

/// Day of the year for a local date, with January 1st as day 1.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Pick the lesson assigned to `date`.
///
/// Indexes the free lessons by `day_of_year mod count`. Falls back to the
/// catalog's first lesson when every lesson is premium.
pub fn daily_selection(catalog: &Catalog, date: NaiveDate) -> &str {
    let free: Vec<_> = catalog.free_lessons().collect();
    if free.is_empty() {
        return &catalog.first().id;
    }

    let index = day_of_year(date) as usize % free.len();
    let lesson = free[index];
    &lesson.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LessonRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            LessonRecord::new("a", "A"),
            LessonRecord::new("p", "P").premium(),
            LessonRecord::new("b", "B"),
            LessonRecord::new("c", "C"),
        ])
        .unwrap()
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(date(2024, 1, 1)), 1);
        assert_eq!(day_of_year(date(2024, 2, 1)), 32);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366);
        assert_eq!(day_of_year(date(2023, 12, 31)), 365);
    }

    #[test]
    fn test_selection_indexes_free_lessons() {
        let catalog = catalog();
        // Free lessons: a, b, c
        assert_eq!(daily_selection(&catalog, date(2024, 1, 1)), "b"); // 1 % 3
        assert_eq!(daily_selection(&catalog, date(2024, 1, 2)), "c"); // 2 % 3
        assert_eq!(daily_selection(&catalog, date(2024, 1, 3)), "a"); // 3 % 3
    }

    #[test]
    fn test_selection_never_premium() {
        let catalog = catalog();
        let mut day = date(2024, 1, 1);
        for _ in 0..366 {
            assert_ne!(daily_selection(&catalog, day), "p");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_all_premium_falls_back_to_first() {
        let catalog = Catalog::new(vec![
            LessonRecord::new("x", "X").premium(),
            LessonRecord::new("y", "Y").premium(),
        ])
        .unwrap();
        assert_eq!(daily_selection(&catalog, date(2024, 6, 1)), "x");
    }

    #[test]
    fn test_single_free_lesson_every_day() {
        let catalog = Catalog::new(vec![
            LessonRecord::new("only", "Only"),
            LessonRecord::new("p", "P").premium(),
        ])
        .unwrap();
        assert_eq!(daily_selection(&catalog, date(2024, 3, 15)), "only");
        assert_eq!(daily_selection(&catalog, date(2024, 9, 2)), "only");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_selection_is_deterministic(offset in 0u64..3_650) {
                let catalog = Catalog::builtin();
                let day = date(2020, 1, 1) + chrono::Days::new(offset);
                let first = daily_selection(&catalog, day).to_string();
                let second = daily_selection(&catalog, day).to_string();
                prop_assert_eq!(&first, &second);
                prop_assert!(!catalog.get(&first).unwrap().is_premium);
            }
        }
    }
}
