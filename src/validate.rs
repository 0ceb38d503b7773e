//! Format checks for caller-supplied identifiers.
//!
//! Every check runs before any network call; a mismatch is a caller error
//! and is never retried.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    static ref IBAN: Regex = Regex::new("^IR[0-9]{24}$").unwrap();
    static ref CARD: Regex = Regex::new("^[0-9]{16}$").unwrap();
    static ref NATIONAL_ID: Regex = Regex::new("^[0-9]{10}$").unwrap();
    static ref PHONE: Regex = Regex::new("^[0-9]{11}$").unwrap();
    static ref OTP: Regex = Regex::new("^[0-9]{4}$").unwrap();
    static ref BIRTH_DATE: Regex = Regex::new("^[0-9]{4}/[0-1][0-9]/[0-9]{2}$").unwrap();
    static ref GENDER: Regex = Regex::new("^(مرد|زن)$").unwrap();
}

fn check(pattern: &Regex, field: &'static str, value: &str) -> Result<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidInput {
            field,
            value: value.to_owned(),
        })
    }
}

pub(crate) fn iban(value: &str) -> Result<()> {
    check(&IBAN, "iban", value)
}

// TODO: Luhn-check card numbers locally to cut the api call rate.
pub(crate) fn card(value: &str) -> Result<()> {
    check(&CARD, "card", value)
}

pub(crate) fn national_id(value: &str) -> Result<()> {
    check(&NATIONAL_ID, "national_id", value)
}

pub(crate) fn phone(value: &str) -> Result<()> {
    check(&PHONE, "phone_number", value)
}

pub(crate) fn otp(value: &str) -> Result<()> {
    check(&OTP, "otp", value)
}

pub(crate) fn birth_date(value: &str) -> Result<()> {
    check(&BIRTH_DATE, "birth_date", value)
}

pub(crate) fn gender(value: &str) -> Result<()> {
    check(&GENDER, "gender", value)
}
