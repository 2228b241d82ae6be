//! Contact form predicates: per-field validation, phone masking and the
//! rating summary shown after submission.

use alloc::{format, string::String};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_PHONE_DIGITS: usize = 15;
const MIN_PHONE_DIGITS: usize = 7;
/// Counted in UTF-16 code units, like a browser input's `value.length`.
const MIN_ADDRESS_UNITS: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Surname,
    Email,
    Address,
    Rating,
    Phone,
}

impl Field {
    /// Maps the form's `data-validate` value to a field kind.
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "name" => Self::Name,
            "surname" => Self::Surname,
            "email" => Self::Email,
            "address" => Self::Address,
            "rating" => Self::Rating,
            "phone" => Self::Phone,
            _ => return None,
        })
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Only letters allowed")]
    LettersOnly,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Address is too short")]
    AddressTooShort,
    #[error("Value must be between 0 and 10")]
    RatingOutOfRange,
    #[error("Phone number is too short")]
    PhoneTooShort,
}

pub fn validate(field: Field, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }

    match field {
        Field::Name | Field::Surname if !value.chars().all(|c| c.is_ascii_alphabetic()) => {
            Err(FieldError::LettersOnly)
        }
        Field::Email if !is_email_shaped(value) => Err(FieldError::InvalidEmail),
        Field::Address if value.encode_utf16().count() < MIN_ADDRESS_UNITS => {
            Err(FieldError::AddressTooShort)
        }
        Field::Rating if parse_rating(value).is_none() => Err(FieldError::RatingOutOfRange),
        Field::Phone if phone_digits(value).count() < MIN_PHONE_DIGITS => {
            Err(FieldError::PhoneTooShort)
        }
        _ => Ok(()),
    }
}

/// A rating in `[0, 10]`, `None` for anything else.
pub fn parse_rating(value: &str) -> Option<f64> {
    parse_number(value.trim()).filter(|rating| (0.0..=10.0).contains(rating))
}

/// Numeric input as a browser reads it: decimal floats plus unsigned
/// `0x`/`0o`/`0b` integer literals.
fn parse_number(value: &str) -> Option<f64> {
    let radix = match value.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return value.parse::<f64>().ok(),
    };
    let digits = &value[2..];
    if digits.starts_with('+') {
        return None;
    }
    u64::from_str_radix(digits, radix)
        .ok()
        .map(|number| number as f64)
}

/// `local@domain.tld`: no whitespace, something before `@`, and a `.` with
/// something on both sides after it.
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    value
        .match_indices('@')
        .filter(|&(at, _)| at > 0)
        .any(|(at, _)| {
            let domain = &value[at + 1..];
            domain
                .match_indices('.')
                .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
        })
}

fn phone_digits(value: &str) -> impl Iterator<Item = char> + '_ {
    value.chars().filter(char::is_ascii_digit)
}

/// Masks a phone input as `+ddd ddd ddd dddd`.
pub fn format_phone(raw: &str) -> String {
    let digits: String = phone_digits(raw).take(MAX_PHONE_DIGITS).collect();

    let mut formatted = String::from("+");
    for (index, (start, end)) in [(0, 3), (3, 6), (6, 9), (9, 13)].into_iter().enumerate() {
        if digits.len() <= start {
            break;
        }
        if index > 0 {
            formatted.push(' ');
        }
        formatted.push_str(&digits[start..end.min(digits.len())]);
    }
    formatted
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingBand {
    Red,
    Orange,
    Green,
}

impl RatingBand {
    pub fn from_average(average: f64) -> Self {
        if average < 4.0 {
            Self::Red
        } else if average < 7.0 {
            Self::Orange
        } else {
            Self::Green
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Red => "avg-red",
            Self::Orange => "avg-orange",
            Self::Green => "avg-green",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub ratings: [f64; 3],
}

impl Submission {
    pub fn average(&self) -> f64 {
        self.ratings.iter().sum::<f64>() / self.ratings.len() as f64
    }

    pub fn band(&self) -> RatingBand {
        RatingBand::from_average(self.average())
    }

    pub fn summary(&self) -> String {
        format!("{} {}: {:.1}", self.name, self.surname, self.average())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_required() {
        assert_eq!(validate(Field::Email, "   "), Err(FieldError::Required));
        assert_eq!(validate(Field::Rating, ""), Err(FieldError::Required));
    }

    #[test]
    fn names_accept_letters_only() {
        assert_eq!(validate(Field::Name, " Ada "), Ok(()));
        assert_eq!(validate(Field::Surname, "O'Neil"), Err(FieldError::LettersOnly));
        assert_eq!(validate(Field::Name, "Zoë"), Err(FieldError::LettersOnly));
    }

    #[test]
    fn email_needs_at_and_dotted_domain() {
        assert_eq!(validate(Field::Email, "ada@example.org"), Ok(()));
        assert_eq!(validate(Field::Email, "a@b.c"), Ok(()));
        for bad in ["ada", "@example.org", "ada@example", "ada@.org", "ada@org.", "a da@x.y"] {
            assert_eq!(validate(Field::Email, bad), Err(FieldError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn address_and_phone_lengths() {
        assert_eq!(validate(Field::Address, "Main"), Err(FieldError::AddressTooShort));
        assert_eq!(validate(Field::Address, "Main St"), Ok(()));
        assert_eq!(validate(Field::Phone, "+385 12 3"), Err(FieldError::PhoneTooShort));
        assert_eq!(validate(Field::Phone, "+385 12 34"), Ok(()));
        assert_eq!(validate(Field::Phone, "+385 123 4567"), Ok(()));
    }

    #[test]
    fn address_length_counts_utf16_units() {
        // each emoji is a surrogate pair, two units
        assert_eq!(validate(Field::Address, "🏠🏠"), Err(FieldError::AddressTooShort));
        assert_eq!(validate(Field::Address, "🏠🏠a"), Ok(()));
    }

    #[test]
    fn rating_accepts_prefixed_integer_literals() {
        assert_eq!(parse_rating("0x5"), Some(5.0));
        assert_eq!(parse_rating("0XA"), Some(10.0));
        assert_eq!(parse_rating("0o7"), Some(7.0));
        assert_eq!(parse_rating("0b11"), Some(3.0));
        assert_eq!(validate(Field::Rating, "0x5"), Ok(()));
        assert_eq!(validate(Field::Rating, "0xB"), Err(FieldError::RatingOutOfRange));
        assert_eq!(validate(Field::Rating, "0x"), Err(FieldError::RatingOutOfRange));
        assert_eq!(validate(Field::Rating, "-0x5"), Err(FieldError::RatingOutOfRange));
        assert_eq!(validate(Field::Rating, "0x+5"), Err(FieldError::RatingOutOfRange));
    }

    #[test]
    fn rating_must_be_between_zero_and_ten() {
        assert_eq!(validate(Field::Rating, "0"), Ok(()));
        assert_eq!(validate(Field::Rating, "7.5"), Ok(()));
        assert_eq!(validate(Field::Rating, "10"), Ok(()));
        for bad in ["-1", "10.5", "abc", "NaN"] {
            assert_eq!(validate(Field::Rating, bad), Err(FieldError::RatingOutOfRange), "{bad}");
        }
    }

    #[test]
    fn phone_mask_groups_digits() {
        assert_eq!(format_phone(""), "+");
        assert_eq!(format_phone("38"), "+38");
        assert_eq!(format_phone("3859"), "+385 9");
        assert_eq!(format_phone("+385 91 234 5678"), "+385 912 345 678");
        assert_eq!(format_phone("123456789012345678"), "+123 456 789 0123");
    }

    #[test]
    fn submission_summary_and_band() {
        let submission = Submission {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            email: "ada@example.org".into(),
            phone: "+385 912 345 678".into(),
            address: "Main St 1".into(),
            ratings: [5.0, 6.0, 6.5],
        };

        assert_eq!(submission.summary(), "Ada Lovelace: 5.8");
        assert_eq!(submission.band(), RatingBand::Orange);
        assert_eq!(RatingBand::from_average(3.9).css_class(), "avg-red");
        assert_eq!(RatingBand::from_average(7.0).css_class(), "avg-green");
    }

    #[test]
    fn field_keys_match_form_attributes() {
        assert_eq!(Field::from_key("phone"), Some(Field::Phone));
        assert_eq!(Field::from_key("zip"), None);
    }
}
