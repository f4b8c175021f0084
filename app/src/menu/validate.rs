use std::fmt;

use err_derive::Error;
use log::*;

use infra::ids::IdGen;

use super::models::{parse_leading_number, Course, MenuItem, Price};
use crate::config::ValidationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DishName,
    Description,
    Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(display = "{} must not be empty", _0)]
    EmptyField(Field),
    #[error(display = "Price is not a usable amount: {:?}", _0)]
    InvalidPrice(String),
    #[error(display = "Unknown course: {:?}", _0)]
    UnknownCourse(String),
}

/// Gatekeeper for the menu: turns raw form input into a `MenuItem`, or
/// explains why it can't.
#[derive(Debug)]
pub struct Validator {
    idgen: IdGen,
    strict_prices: bool,
}

impl Validator {
    pub fn new(config: &ValidationConfig) -> Self {
        let idgen = IdGen::new();
        let strict_prices = config.strict_prices;
        Validator {
            idgen,
            strict_prices,
        }
    }

    pub fn validate(
        &self,
        dish_name: &str,
        description: &str,
        course: &str,
        price_text: &str,
    ) -> Result<MenuItem, ValidationError> {
        require(dish_name, Field::DishName)?;
        require(description, Field::Description)?;
        require(price_text, Field::Price)?;

        let amount = self
            .parse_price(price_text)
            .ok_or_else(|| ValidationError::InvalidPrice(price_text.to_string()))?;
        let course = course
            .parse::<Course>()
            .map_err(|e| ValidationError::UnknownCourse(e.0))?;

        let item = MenuItem {
            id: self.idgen.generate(),
            dish_name: dish_name.to_string(),
            description: description.to_string(),
            course,
            price: Price::new(price_text, amount),
        };
        debug!("Validated {:?}", item);
        Ok(item)
    }

    fn parse_price(&self, price_text: &str) -> Option<f64> {
        let amount = if self.strict_prices {
            price_text.trim().parse::<f64>().ok()
        } else {
            parse_leading_number(price_text)
        }?;

        if amount.is_finite() && amount >= 0.0 {
            Some(amount)
        } else {
            None
        }
    }
}

fn require(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

impl fmt::Display for Field {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &Field::DishName => write!(fmt, "Dish name"),
            &Field::Description => write!(fmt, "Description"),
            &Field::Price => write!(fmt, "Price"),
        }
    }
}
