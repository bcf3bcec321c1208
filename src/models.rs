use chrono::{Datelike, NaiveDate};
use mockable::{Clock, DefaultClock};

use std::fmt;

use crate::sink::{LineSink, StdoutSink};

pub const FIRST_NAME_REQUIRED: &str = "First name must contain minimum one character.";
pub const LAST_NAME_REQUIRED: &str = "Last name must contain minimum one character.";
pub const BIRTH_DATE_IN_FUTURE: &str = "Birth date must not be in future.";

/// Row identity. Zero means the person was never given one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub u32);

impl PersonId {
    pub const UNASSIGNED: PersonId = PersonId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeCategory {
    Baby,
    Child,
    Teen,
    Adult,
    Senior,
    Unknown,
}

impl AgeCategory {
    /// Buckets a whole-year age. The edges are uneven on purpose: 19 is still
    /// a teen and 50 is still an adult.
    pub fn from_years(years: i64) -> Self {
        match years {
            0..=1 => Self::Baby,
            2..=12 => Self::Child,
            13..=19 => Self::Teen,
            20..=50 => Self::Adult,
            y if y > 50 => Self::Senior,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Baby => "BABY",
            Self::Child => "CHILD",
            Self::Teen => "TEEN",
            Self::Adult => "ADULT",
            Self::Senior => "SENIOR",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(tag)
    }
}

/// Completed anniversaries between `birth` and `today`, rounded down.
///
/// Negative when `birth` lies after `today`. A 29 February birthday is only
/// reached on 1 March in common years.
pub fn years_between(birth: NaiveDate, today: NaiveDate) -> i64 {
    let years = i64::from(today.year()) - i64::from(birth.year());
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}

pub fn today(clock: &impl Clock) -> NaiveDate {
    clock.local().date_naive()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    person_id: PersonId,
    first_name: Option<String>,
    last_name: Option<String>,
    birth_date: Option<NaiveDate>,
}

impl Person {
    pub fn new(first_name: &str, last_name: &str, birth_date: Option<NaiveDate>) -> Self {
        Self {
            person_id: PersonId::UNASSIGNED,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            birth_date,
        }
    }

    pub fn person_id(&self) -> PersonId {
        self.person_id
    }

    pub fn set_person_id(&mut self, person_id: PersonId) {
        self.person_id = person_id;
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.first_name = first_name;
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.last_name = last_name;
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>) {
        self.birth_date = birth_date;
    }

    /// An absent date passes; only a date after today is rejected.
    pub fn is_valid_birth_date(birth_date: Option<NaiveDate>, errors: &mut Vec<String>) -> bool {
        Self::is_valid_birth_date_on(birth_date, today(&DefaultClock), errors)
    }

    pub fn is_valid_birth_date_on(
        birth_date: Option<NaiveDate>,
        today: NaiveDate,
        errors: &mut Vec<String>,
    ) -> bool {
        match birth_date {
            Some(date) if date > today => {
                errors.push(BIRTH_DATE_IN_FUTURE.to_string());
                false
            }
            _ => true,
        }
    }

    pub fn is_valid_person(&self, errors: &mut Vec<String>) -> bool {
        self.is_valid_person_with(&DefaultClock, errors)
    }

    /// Runs every check and records one message per failure, in field order.
    pub fn is_valid_person_with(&self, clock: &impl Clock, errors: &mut Vec<String>) -> bool {
        let mut is_valid = true;

        if is_blank(self.first_name()) {
            errors.push(FIRST_NAME_REQUIRED.to_string());
            is_valid = false;
        }

        if is_blank(self.last_name()) {
            errors.push(LAST_NAME_REQUIRED.to_string());
            is_valid = false;
        }

        if !Self::is_valid_birth_date_on(self.birth_date, today(clock), errors) {
            is_valid = false;
        }

        is_valid
    }

    pub fn age_category(&self) -> AgeCategory {
        self.age_category_with(&DefaultClock)
    }

    pub fn age_category_with(&self, clock: &impl Clock) -> AgeCategory {
        match self.birth_date {
            Some(birth) => AgeCategory::from_years(years_between(birth, today(clock))),
            None => AgeCategory::Unknown,
        }
    }

    pub fn save(&self, errors: &mut Vec<String>) -> bool {
        self.save_with(&DefaultClock, &mut StdoutSink, errors)
    }

    /// Validates, then writes the confirmation line. Nothing is written when
    /// validation fails.
    pub fn save_with(
        &self,
        clock: &impl Clock,
        sink: &mut impl LineSink,
        errors: &mut Vec<String>,
    ) -> bool {
        if !self.is_valid_person_with(clock, errors) {
            tracing::warn!(person_id = %self.person_id, failures = errors.len(), "Refusing to save invalid person");
            return false;
        }

        sink.emit_line(&format!("Saved {self}"));
        tracing::debug!(person_id = %self.person_id, "Person saved");
        true
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[personId={}, firstName={}, lastName={}, birthDate=",
            self.person_id,
            self.first_name.as_deref().unwrap_or("null"),
            self.last_name.as_deref().unwrap_or("null"),
        )?;
        match self.birth_date {
            Some(date) => write!(f, "{}]", date.format("%Y-%m-%d")),
            None => f.write_str("null]"),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_support::FixedClock;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    const TODAY: (i32, u32, u32) = (2024, 6, 15);

    fn clock() -> FixedClock {
        FixedClock(date(TODAY.0, TODAY.1, TODAY.2))
    }

    fn born_years_ago(years: i32) -> NaiveDate {
        date(TODAY.0 - years, TODAY.1, TODAY.2)
    }

    #[rstest]
    #[case(0, AgeCategory::Baby)]
    #[case(1, AgeCategory::Baby)]
    #[case(2, AgeCategory::Child)]
    #[case(12, AgeCategory::Child)]
    #[case(13, AgeCategory::Teen)]
    #[case(19, AgeCategory::Teen)]
    #[case(20, AgeCategory::Adult)]
    #[case(50, AgeCategory::Adult)]
    #[case(51, AgeCategory::Senior)]
    #[case(104, AgeCategory::Senior)]
    fn buckets_age_on_anniversary(#[case] years: i32, #[case] expected: AgeCategory) {
        let person = Person::new("Ada", "Lovelace", Some(born_years_ago(years)));
        assert_eq!(person.age_category_with(&clock()), expected);
    }

    #[test]
    fn day_before_twentieth_birthday_is_still_teen() {
        let birth = born_years_ago(20).succ_opt().expect("valid date");
        let person = Person::new("Ada", "Lovelace", Some(birth));
        assert_eq!(person.age_category_with(&clock()), AgeCategory::Teen);
    }

    #[test]
    fn birth_date_tomorrow_is_unknown() {
        let tomorrow = clock().0.succ_opt().expect("valid date");
        assert_eq!(years_between(tomorrow, clock().0), -1);

        let person = Person::new("Ada", "Lovelace", Some(tomorrow));
        assert_eq!(person.age_category_with(&clock()), AgeCategory::Unknown);
    }

    #[test]
    fn missing_birth_date_is_unknown() {
        assert_eq!(Person::default().age_category_with(&clock()), AgeCategory::Unknown);
        assert_eq!(Person::default().age_category(), AgeCategory::Unknown);
    }

    #[rstest]
    #[case(date(2001, 2, 28), 0)]
    #[case(date(2001, 3, 1), 1)]
    #[case(date(2004, 2, 29), 4)]
    fn leap_day_anniversary(#[case] today: NaiveDate, #[case] expected: i64) {
        assert_eq!(years_between(date(2000, 2, 29), today), expected);
    }

    #[test]
    fn future_birth_date_adds_one_message() {
        let mut errors = Vec::new();
        let tomorrow = clock().0.succ_opt().expect("valid date");

        assert!(!Person::is_valid_birth_date_on(Some(tomorrow), clock().0, &mut errors));
        assert_eq!(errors, vec![BIRTH_DATE_IN_FUTURE.to_string()]);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(date(2024, 6, 15)))]
    #[case(Some(date(1815, 12, 10)))]
    fn present_or_past_birth_date_is_valid(#[case] birth: Option<NaiveDate>) {
        let mut errors = Vec::new();
        assert!(Person::is_valid_birth_date_on(birth, clock().0, &mut errors));
        assert!(errors.is_empty());
    }

    #[test]
    fn validation_accumulates_all_failures_in_order() {
        let tomorrow = clock().0.succ_opt().expect("valid date");
        let person = Person::new("", "  ", Some(tomorrow));
        let mut errors = Vec::new();

        assert!(!person.is_valid_person_with(&clock(), &mut errors));
        assert_eq!(
            errors,
            vec![
                FIRST_NAME_REQUIRED.to_string(),
                LAST_NAME_REQUIRED.to_string(),
                BIRTH_DATE_IN_FUTURE.to_string(),
            ]
        );
    }

    #[test]
    fn absent_names_fail_validation() {
        let mut errors = Vec::new();
        assert!(!Person::default().is_valid_person_with(&clock(), &mut errors));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn textual_form() {
        let mut person = Person::new("Ada", "Lovelace", Some(date(1815, 12, 10)));
        person.set_person_id(PersonId(7));
        assert_eq!(
            person.to_string(),
            "[personId=7, firstName=Ada, lastName=Lovelace, birthDate=1815-12-10]"
        );

        assert_eq!(
            Person::default().to_string(),
            "[personId=0, firstName=null, lastName=null, birthDate=null]"
        );
    }

    #[test]
    fn setters_replace_attributes() {
        let mut person = Person::default();
        person.set_first_name(Some("Grace".to_string()));
        person.set_last_name(Some("Hopper".to_string()));
        person.set_birth_date(Some(date(1906, 12, 9)));

        assert_eq!(person.first_name(), Some("Grace"));
        assert_eq!(person.last_name(), Some("Hopper"));
        assert_eq!(person.age_category_with(&clock()), AgeCategory::Senior);
        assert!(!person.person_id().is_assigned());
    }
}
