//! Semester identity: the compound `(term, academic year)` key that scopes every
//! activity and score.
//!
//! The canonical token is `hoc_ky_<term>_<year>` (e.g. `hoc_ky_1_2025`). Two legacy
//! spellings still circulate in stored data and query strings, `hoc_ky_1-2025` and
//! `hoc_ky_12025`; both parse to the same key.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const TOKEN_PREFIX: &str = "hoc_ky_";

/// Term within an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    First,
    Second,
}

impl Term {
    pub const fn code(self) -> &'static str {
        match self {
            Term::First => "hoc_ky_1",
            Term::Second => "hoc_ky_2",
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Term::First => 1,
            Term::Second => 2,
        }
    }

    fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Term::First),
            '2' => Some(Term::Second),
            _ => None,
        }
    }
}

/// Compound semester key. Ordered by academic year, then term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemesterKey {
    academic_year: u16,
    term: Term,
}

/// Inclusive calendar window of a semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SemesterWindow {
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

impl SemesterWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.starts_on <= date && date <= self.ends_on
    }
}

impl SemesterKey {
    pub const fn new(term: Term, academic_year: u16) -> Self {
        Self {
            academic_year,
            term,
        }
    }

    pub const fn term(&self) -> Term {
        self.term
    }

    pub const fn academic_year(&self) -> u16 {
        self.academic_year
    }

    /// Parse a single semester token as supplied by a caller.
    pub fn parse(raw: &str) -> Result<Self, SemesterKeyError> {
        let malformed = || SemesterKeyError::Malformed(raw.to_string());
        let rest = raw.trim().strip_prefix(TOKEN_PREFIX).ok_or_else(malformed)?;

        let mut chars = rest.chars();
        let term = chars
            .next()
            .and_then(Term::from_digit)
            .ok_or_else(malformed)?;

        let tail = chars.as_str();
        let year = tail
            .strip_prefix('_')
            .or_else(|| tail.strip_prefix('-'))
            .unwrap_or(tail);

        let academic_year = parse_year(year).ok_or_else(malformed)?;
        Ok(Self::new(term, academic_year))
    }

    /// Build a key from the stored `(semester code, academic year)` pair.
    ///
    /// The year is either `YYYY` or the span `YYYY-YYYY`; a span must cover two
    /// consecutive years and is keyed by its first year.
    pub fn from_parts(code: &str, year: &str) -> Result<Self, SemesterKeyError> {
        let term = code
            .trim()
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|digit| {
                let mut chars = digit.chars();
                match (chars.next(), chars.next()) {
                    (Some(digit), None) => Term::from_digit(digit),
                    _ => None,
                }
            })
            .ok_or_else(|| SemesterKeyError::Malformed(code.to_string()))?;

        let year = year.trim();
        let academic_year = match year.split_once('-') {
            Some((first, second)) => {
                let first_year = parse_year(first)
                    .ok_or_else(|| SemesterKeyError::Malformed(year.to_string()))?;
                let second_year = parse_year(second)
                    .ok_or_else(|| SemesterKeyError::Malformed(year.to_string()))?;
                if u32::from(second_year) != u32::from(first_year) + 1 {
                    return Err(SemesterKeyError::YearMismatch {
                        first: first_year,
                        second: second_year,
                    });
                }
                first_year
            }
            None => {
                parse_year(year).ok_or_else(|| SemesterKeyError::Malformed(year.to_string()))?
            }
        };

        Ok(Self::new(term, academic_year))
    }

    /// Semester a calendar date falls into. May and June are the summer break and
    /// resolve to the upcoming first term.
    ///
    /// Only external collaborators resolve "the current semester"; the engine is
    /// always handed a key.
    pub fn containing(date: NaiveDate) -> Result<Self, SemesterKeyError> {
        let year = date.year();
        let (term, academic_year) = match date.month() {
            7..=11 => (Term::First, year),
            12 => (Term::Second, year),
            1..=4 => (Term::Second, year - 1),
            _ => (Term::First, year),
        };

        let academic_year =
            u16::try_from(academic_year).map_err(|_| SemesterKeyError::YearOutOfRange(year))?;
        Ok(Self::new(term, academic_year))
    }

    /// Both terms of an academic year, in order.
    pub const fn terms_of(academic_year: u16) -> [SemesterKey; 2] {
        [
            SemesterKey::new(Term::First, academic_year),
            SemesterKey::new(Term::Second, academic_year),
        ]
    }

    /// First term runs July through November; the second runs December through
    /// April of the following calendar year.
    pub fn window(&self) -> SemesterWindow {
        let year = i32::from(self.academic_year);
        // Month/day constants are valid for every representable year.
        let ymd = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        match self.term {
            Term::First => SemesterWindow {
                starts_on: ymd(year, 7, 1),
                ends_on: ymd(year, 11, 30),
            },
            Term::Second => SemesterWindow {
                starts_on: ymd(year, 12, 1),
                ends_on: ymd(year + 1, 4, 30),
            },
        }
    }

    /// Canonical `hoc_ky_X_YYYY` token.
    pub fn token(&self) -> String {
        format!("{}_{:04}", self.term.code(), self.academic_year)
    }

    /// Human label, e.g. `HK1 2025-2026`.
    pub fn label(&self) -> String {
        format!(
            "HK{} {}-{}",
            self.term.number(),
            self.academic_year,
            u32::from(self.academic_year) + 1
        )
    }
}

fn parse_year(raw: &str) -> Option<u16> {
    if raw.len() != 4 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

impl fmt::Display for SemesterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl FromStr for SemesterKey {
    type Err = SemesterKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemesterKey {
    type Error = SemesterKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SemesterKey> for String {
    fn from(value: SemesterKey) -> Self {
        value.token()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemesterKeyError {
    #[error("malformed semester key '{0}' (expected hoc_ky_<1|2>_<YYYY>)")]
    Malformed(String),
    #[error("academic year span {first}-{second} does not cover consecutive years")]
    YearMismatch { first: u16, second: u16 },
    #[error("calendar year {0} cannot be expressed as an academic year")]
    YearOutOfRange(i32),
}
