//! Competitor (fencer or referee) identity data.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Federation license number; the stable identity of a competitor.
pub type LicenseId = String;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// A licensed competitor. Identity is immutable once ingested.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub license: LicenseId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub club: String,
}

impl Competitor {
    pub fn new(
        license: impl Into<LicenseId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
        gender: Gender,
        club: impl Into<String>,
    ) -> Self {
        Self {
            license: license.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            gender,
            club: club.into(),
        }
    }

    /// Age in whole years on `day` (the birthday itself counts).
    pub fn age_on(&self, day: NaiveDate) -> u32 {
        let before_birthday =
            (day.month(), day.day()) < (self.birth_date.month(), self.birth_date.day());
        let years = day.year() - self.birth_date.year() - i32::from(before_birthday);
        years.max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn born(y: i32, m: u32, d: u32) -> Competitor {
        Competitor::new(
            "L1",
            "Ada",
            "Lovelace",
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Gender::Female,
            "CEB",
        )
    }

    #[test]
    fn age_counts_birthday_as_passed() {
        let c = born(2000, 6, 15);
        assert_eq!(c.age_on(NaiveDate::from_ymd_opt(2020, 6, 14).unwrap()), 19);
        assert_eq!(c.age_on(NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()), 20);
    }

    #[test]
    fn age_never_negative() {
        let c = born(2030, 1, 1);
        assert_eq!(c.age_on(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()), 0);
    }
}
