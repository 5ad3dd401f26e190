//! Field-format rules for offer submissions. Pure functions, no I/O.
//!
//! Field names in error messages use the wire names (`plz`, `ort`, ...) so a
//! client can map them back to its form inputs.

use crate::domain::types::{OfferFields, OfferSubmission};

/// Why a submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("plz must consist of exactly 5 digits")]
    InvalidPostalCode,
    #[error("ort may only contain letters, spaces and hyphens")]
    InvalidCity,
    #[error("name may only contain letters, spaces and hyphens")]
    InvalidName,
    #[error("email is not a valid email address")]
    InvalidEmail,
    #[error("handy may only contain digits with an optional leading +")]
    InvalidPhone,
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidPostalCode => "INVALID_POSTAL_CODE",
            Self::InvalidCity => "INVALID_CITY",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPhone => "INVALID_PHONE",
        }
    }
}

/// Validate a submission. The first failing rule wins: presence of all
/// required fields, then postal code, city, name, email, phone.
///
/// Accepted values are kept exactly as submitted.
pub fn validate_submission(sub: OfferSubmission) -> Result<OfferFields, ValidationError> {
    let postal_code = required(sub.postal_code, "plz")?;
    let city = required(sub.city, "ort")?;
    let name = required(sub.name, "name")?;
    let email = required(sub.email, "email")?;

    if !is_valid_postal_code(&postal_code) {
        return Err(ValidationError::InvalidPostalCode);
    }
    if !is_valid_place_or_name(&city) {
        return Err(ValidationError::InvalidCity);
    }
    if !is_valid_place_or_name(&name) {
        return Err(ValidationError::InvalidName);
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    if let Some(phone) = sub.phone.as_deref() {
        if !phone.is_empty() && !is_valid_phone(phone) {
            return Err(ValidationError::InvalidPhone);
        }
    }

    Ok(OfferFields {
        postal_code,
        city,
        street: sub.street,
        name,
        email,
        class_label: sub.class_label,
        phone: sub.phone,
        valid_from: sub.valid_from,
        valid_to: sub.valid_to,
        notes: sub.notes,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Exactly five ASCII digits (German postal code).
pub fn is_valid_postal_code(value: &str) -> bool {
    value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit())
}

/// One or more letters (any script, so umlauts and accents pass), spaces or
/// hyphens. Used for both city and person names.
pub fn is_valid_place_or_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-')
}

/// `local@domain.tld`, where local and domain are word characters, dots and
/// hyphens, and the top-level part after the last dot is word characters only.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, host)) = value.split_once('@') else {
        return false;
    };
    let Some((domain, tld)) = host.rsplit_once('.') else {
        return false;
    };
    !local.is_empty()
        && local.chars().all(is_email_char)
        && !domain.is_empty()
        && domain.chars().all(is_email_char)
        && !tld.is_empty()
        && tld.chars().all(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_email_char(c: char) -> bool {
    is_word_char(c) || c == '.' || c == '-'
}

/// Optional leading `+`, then one or more ASCII digits.
pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
