//! Age classification from a birth date field value
//!
//! Birth dates arrive exactly as typed into the masked date input:
//! `dd/mm/yyyy`, optionally followed by a space and `hh:mm`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Reasons a birth date string could not be understood
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BirthDateError {
    #[error("birth date is empty")]
    Empty,
    #[error("expected dd/mm/yyyy[ hh:mm], got '{0}'")]
    Malformed(String),
    #[error("{day:02}/{month:02}/{year} is not a calendar date")]
    InvalidDate { day: u32, month: u32, year: i32 },
    #[error("{hour:02}:{minute:02} is not a valid time of day")]
    InvalidTime { hour: u32, minute: u32 },
}

/// Minimum age, in whole years, at which someone counts as an adult
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AdultThreshold(pub u32);

impl AdultThreshold {
    pub const DEFAULT_YEARS: u32 = 18;

    pub fn years(self) -> u32 {
        self.0
    }
}

impl Default for AdultThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT_YEARS)
    }
}

/// Result of classifying a birth date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Adult,
    Minor,
    /// Empty or unreadable birth date
    Unknown,
}

impl Classification {
    pub fn is_adult(self) -> bool {
        self == Classification::Adult
    }

    /// Unknown birth dates are handled like minors for requirement purposes
    pub fn needs_guardian(self) -> bool {
        !self.is_adult()
    }
}

/// Parse a birth date in the `dd/mm/yyyy[ hh:mm]` format
pub fn parse_birth_date(input: &str) -> Result<NaiveDateTime, BirthDateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BirthDateError::Empty);
    }
    let malformed = || BirthDateError::Malformed(trimmed.to_string());

    let (date_part, time_part) = match trimmed.split_once(' ') {
        Some((date, time)) => (date, Some(time)),
        None => (trimmed, None),
    };

    let mut pieces = date_part.split('/');
    let (Some(day), Some(month), Some(year), None) =
        (pieces.next(), pieces.next(), pieces.next(), pieces.next())
    else {
        return Err(malformed());
    };
    if !is_digits(day, 1..=2) || !is_digits(month, 1..=2) || !is_digits(year, 4..=4) {
        return Err(malformed());
    }
    let day: u32 = day.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let year: i32 = year.parse().map_err(|_| malformed())?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(BirthDateError::InvalidDate { day, month, year })?;

    let time = match time_part {
        None => NaiveTime::MIN,
        Some(time) => {
            let (hour, minute) = time.split_once(':').ok_or_else(malformed)?;
            if !is_digits(hour, 1..=2) || !is_digits(minute, 2..=2) {
                return Err(malformed());
            }
            let hour: u32 = hour.parse().map_err(|_| malformed())?;
            let minute: u32 = minute.parse().map_err(|_| malformed())?;
            NaiveTime::from_hms_opt(hour, minute, 0)
                .ok_or(BirthDateError::InvalidTime { hour, minute })?
        }
    };

    Ok(NaiveDateTime::new(date, time))
}

fn is_digits(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Whole years between `birth` and `today`.
///
/// Counts the year difference and takes one off when this year's birthday
/// has not happened yet. Negative for birth dates in the future.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Classifies birth dates against a configured threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeClassifier {
    threshold: AdultThreshold,
}

impl AgeClassifier {
    pub fn new(threshold: AdultThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> AdultThreshold {
        self.threshold
    }

    pub fn classify(&self, birth_date: &str, today: NaiveDate) -> Classification {
        match parse_birth_date(birth_date) {
            Ok(birth) => {
                let age = age_on(birth.date(), today);
                if age >= 0 && age as u32 >= self.threshold.years() {
                    Classification::Adult
                } else {
                    Classification::Minor
                }
            }
            Err(BirthDateError::Empty) => Classification::Unknown,
            Err(err) => {
                tracing::debug!("Treating birth date as unknown: {err}");
                Classification::Unknown
            }
        }
    }
}

/// `Some(true)` for adults, `Some(false)` for minors, `None` when the birth
/// date is empty or unreadable.
pub fn is_adult(birth_date: &str, threshold: AdultThreshold, today: NaiveDate) -> Option<bool> {
    match AgeClassifier::new(threshold).classify(birth_date, today) {
        Classification::Adult => Some(true),
        Classification::Minor => Some(false),
        Classification::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod parsing {
        use super::*;

        #[test]
        fn test_parses_date_only() {
            let parsed = parse_birth_date("25/12/1995").unwrap();
            assert_eq!(parsed.date(), date(1995, 12, 25));
            assert_eq!(parsed.time(), NaiveTime::MIN);
        }

        #[test]
        fn test_parses_date_with_time() {
            let parsed = parse_birth_date("01/02/2003 14:30").unwrap();
            assert_eq!(parsed.date(), date(2003, 2, 1));
            assert_eq!(parsed.time(), NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        }

        #[test]
        fn test_accepts_single_digit_day_and_month() {
            let parsed = parse_birth_date("1/2/2003").unwrap();
            assert_eq!(parsed.date(), date(2003, 2, 1));
        }

        #[test]
        fn test_ignores_surrounding_whitespace() {
            assert!(parse_birth_date("  10/05/2006 ").is_ok());
        }

        #[test]
        fn test_empty_is_its_own_error() {
            assert_eq!(parse_birth_date(""), Err(BirthDateError::Empty));
            assert_eq!(parse_birth_date("   "), Err(BirthDateError::Empty));
        }

        #[test]
        fn test_mask_placeholder_is_malformed() {
            assert!(matches!(
                parse_birth_date("__/__/____"),
                Err(BirthDateError::Malformed(_))
            ));
        }

        #[test]
        fn test_partial_input_is_malformed() {
            assert!(matches!(
                parse_birth_date("10/05/20"),
                Err(BirthDateError::Malformed(_))
            ));
            assert!(matches!(
                parse_birth_date("10/05"),
                Err(BirthDateError::Malformed(_))
            ));
            assert!(matches!(
                parse_birth_date("10/05/2006/1"),
                Err(BirthDateError::Malformed(_))
            ));
        }

        #[test]
        fn test_iso_format_is_malformed() {
            assert!(matches!(
                parse_birth_date("2006-05-10"),
                Err(BirthDateError::Malformed(_))
            ));
        }

        #[test]
        fn test_impossible_day_is_rejected() {
            assert_eq!(
                parse_birth_date("31/02/2000"),
                Err(BirthDateError::InvalidDate {
                    day: 31,
                    month: 2,
                    year: 2000
                })
            );
        }

        #[test]
        fn test_impossible_time_is_rejected() {
            assert_eq!(
                parse_birth_date("10/05/2006 25:00"),
                Err(BirthDateError::InvalidTime {
                    hour: 25,
                    minute: 0
                })
            );
        }

        #[test]
        fn test_error_messages() {
            let err = parse_birth_date("31/02/2000").unwrap_err();
            assert_eq!(err.to_string(), "31/02/2000 is not a calendar date");
        }
    }

    mod age {
        use super::*;

        #[test]
        fn test_birthday_already_passed() {
            assert_eq!(age_on(date(2000, 1, 1), date(2023, 6, 1)), 23);
        }

        #[test]
        fn test_birthday_not_yet_reached() {
            assert_eq!(age_on(date(2000, 12, 31), date(2023, 6, 1)), 22);
        }

        #[test]
        fn test_birthday_today() {
            assert_eq!(age_on(date(2006, 5, 10), date(2024, 5, 10)), 18);
        }

        #[test]
        fn test_leap_day_birthday() {
            assert_eq!(age_on(date(2004, 2, 29), date(2022, 2, 28)), 17);
            assert_eq!(age_on(date(2004, 2, 29), date(2022, 3, 1)), 18);
        }

        #[test]
        fn test_future_birth_date_is_negative() {
            assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), -6);
        }

        #[test]
        fn test_earlier_birth_is_never_younger() {
            let today = date(2024, 5, 10);
            let births = [
                date(1990, 1, 1),
                date(1999, 12, 31),
                date(2006, 5, 10),
                date(2006, 5, 11),
                date(2010, 2, 28),
                date(2024, 5, 10),
            ];
            for pair in births.windows(2) {
                assert!(age_on(pair[0], today) >= age_on(pair[1], today));
            }
        }
    }

    mod classification {
        use super::*;

        #[test]
        fn test_eighteenth_birthday_today_is_adult() {
            let classifier = AgeClassifier::default();
            assert_eq!(
                classifier.classify("10/05/2006", date(2024, 5, 10)),
                Classification::Adult
            );
        }

        #[test]
        fn test_one_day_short_is_minor() {
            let classifier = AgeClassifier::default();
            assert_eq!(
                classifier.classify("11/05/2006", date(2024, 5, 10)),
                Classification::Minor
            );
        }

        #[test]
        fn test_time_of_day_is_ignored() {
            let classifier = AgeClassifier::default();
            assert_eq!(
                classifier.classify("10/05/2006 23:59", date(2024, 5, 10)),
                Classification::Adult
            );
        }

        #[test]
        fn test_empty_is_unknown() {
            let classifier = AgeClassifier::default();
            assert_eq!(
                classifier.classify("", date(2024, 5, 10)),
                Classification::Unknown
            );
        }

        #[test]
        fn test_garbage_is_unknown() {
            let classifier = AgeClassifier::default();
            assert_eq!(
                classifier.classify("ontem", date(2024, 5, 10)),
                Classification::Unknown
            );
        }

        #[test]
        fn test_future_birth_is_minor() {
            let classifier = AgeClassifier::default();
            assert_eq!(
                classifier.classify("01/01/2030", date(2024, 5, 10)),
                Classification::Minor
            );
        }

        #[test]
        fn test_custom_threshold() {
            let classifier = AgeClassifier::new(AdultThreshold(21));
            assert_eq!(
                classifier.classify("01/01/2000", date(2020, 6, 1)),
                Classification::Minor
            );
            assert_eq!(
                classifier.classify("01/01/2000", date(2021, 6, 1)),
                Classification::Adult
            );
        }

        #[test]
        fn test_zero_threshold_makes_everyone_born_adult() {
            let classifier = AgeClassifier::new(AdultThreshold(0));
            assert_eq!(
                classifier.classify("10/05/2024", date(2024, 5, 10)),
                Classification::Adult
            );
        }

        #[test]
        fn test_unknown_needs_guardian() {
            assert!(Classification::Unknown.needs_guardian());
            assert!(Classification::Minor.needs_guardian());
            assert!(!Classification::Adult.needs_guardian());
            assert!(!Classification::Unknown.is_adult());
        }

        #[test]
        fn test_is_adult_helper() {
            let today = date(2023, 6, 1);
            assert_eq!(is_adult("01/01/2000", AdultThreshold::default(), today), Some(true));
            assert_eq!(is_adult("01/01/2010", AdultThreshold::default(), today), Some(false));
            assert_eq!(is_adult("", AdultThreshold::default(), today), None);
        }

        #[test]
        fn test_default_threshold_is_eighteen() {
            assert_eq!(AdultThreshold::default().years(), 18);
            assert_eq!(AgeClassifier::default().threshold(), AdultThreshold(18));
        }
    }
}
