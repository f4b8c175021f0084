use std::fmt;
use std::str::FromStr;

use err_derive::Error;
use serde::{Serialize, Serializer};

use infra::ids::{Entity, Id};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Course {
    Starters,
    Mains,
    Dessert,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(display = "Unknown course: {:?}", _0)]
pub struct UnknownCourse(pub String);

/// A menu entry. Only ever built by the validator, so every field has
/// already been checked.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub(super) id: Id<MenuItem>,
    pub(super) dish_name: String,
    pub(super) description: String,
    pub(super) course: Course,
    pub(super) price: Price,
}

/// The price exactly as entered, alongside the amount it was read as.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    text: String,
    amount: f64,
}

impl Course {
    pub const ALL: [Course; 3] = [Course::Starters, Course::Mains, Course::Dessert];

    pub fn name(&self) -> &'static str {
        match self {
            Course::Starters => "Starters",
            Course::Mains => "Mains",
            Course::Dessert => "Dessert",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

impl FromStr for Course {
    type Err = UnknownCourse;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(src.trim()))
            .copied()
            .ok_or_else(|| UnknownCourse(src.to_string()))
    }
}

impl MenuItem {
    pub fn id(&self) -> Id<MenuItem> {
        self.id
    }
    pub fn dish_name(&self) -> &str {
        &self.dish_name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn course(&self) -> Course {
        self.course
    }
    pub fn price(&self) -> &Price {
        &self.price
    }
}

impl Entity for MenuItem {
    const PREFIX: &'static str = "dish";
}

impl Price {
    pub(super) fn new(text: &str, amount: f64) -> Self {
        let text = text.to_string();
        Price { text, amount }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&self.text)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Reads the longest numeric prefix of `src`, the way a permissive float
/// parse does: leading whitespace, an optional sign, digits with an optional
/// fraction, then an optional exponent. Anything after that is ignored.
pub(super) fn parse_leading_number(src: &str) -> Option<f64> {
    let s = src.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let sign_end = end;

    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    let mut has_digits = int_end > sign_end;
    if mantissa_end < bytes.len() && bytes[mantissa_end] == b'.' {
        let frac_end = digits_from(mantissa_end + 1);
        has_digits |= frac_end > mantissa_end + 1;
        mantissa_end = frac_end;
    }
    if !has_digits {
        return None;
    }
    end = mantissa_end;

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_parse_course_names() {
        assert_eq!("Starters".parse::<Course>(), Ok(Course::Starters));
        assert_eq!("mains".parse::<Course>(), Ok(Course::Mains));
        assert_eq!(" Dessert ".parse::<Course>(), Ok(Course::Dessert));
    }

    #[test]
    fn should_reject_free_form_courses() {
        assert_eq!(
            "Sides".parse::<Course>(),
            Err(UnknownCourse("Sides".to_string()))
        );
        assert!("".parse::<Course>().is_err());
    }

    #[test]
    fn courses_display_as_their_names() {
        let names = Course::ALL.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Starters", "Mains", "Dessert"]);
    }

    #[test]
    fn should_read_plain_numbers() {
        assert_eq!(parse_leading_number("25.00"), Some(25.0));
        assert_eq!(parse_leading_number("  150"), Some(150.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("5."), Some(5.0));
        assert_eq!(parse_leading_number("-3"), Some(-3.0));
        assert_eq!(parse_leading_number("1e3"), Some(1000.0));
    }

    #[test]
    fn should_ignore_trailing_garbage() {
        assert_eq!(parse_leading_number("12.5abc"), Some(12.5));
        assert_eq!(parse_leading_number("12.50 rand"), Some(12.5));
        assert_eq!(parse_leading_number("7e"), Some(7.0));
        assert_eq!(parse_leading_number("7e+x"), Some(7.0));
        assert_eq!(parse_leading_number("1.2.3"), Some(1.2));
    }

    #[test]
    fn should_reject_text_without_a_numeric_prefix() {
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number("."), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("R25"), None);
        assert_eq!(parse_leading_number(""), None);
    }

    #[test]
    fn should_read_infinity_like_a_float_parse() {
        assert_eq!(parse_leading_number("Infinity"), Some(std::f64::INFINITY));
        assert_eq!(
            parse_leading_number("-Infinityx"),
            Some(std::f64::NEG_INFINITY)
        );
    }
}
