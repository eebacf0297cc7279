//! Form-level validation run before any request is issued.

use chrono::{NaiveDate, Utc};
use movienest_api_models::{Credentials, Registration, parse_birth_date};

use crate::error::{ClientError, ClientResult};

/// Trimmed value of a mandatory field.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] when the value is blank.
pub fn required(field: &'static str, value: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Normalised email address.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for blank or malformed addresses.
pub fn email(value: &str) -> ClientResult<String> {
    let address = required("email", value)?;
    if address.chars().any(char::is_whitespace) {
        return Err(ClientError::validation("email", "must not contain spaces"));
    }
    let Some((local, domain)) = address.split_once('@') else {
        return Err(ClientError::validation("email", "must contain '@'"));
    };
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(ClientError::validation(
            "email",
            format!("'{address}' is not a valid address"),
        ));
    }
    Ok(address)
}

/// Parsed birth date, rejecting dates in the future.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for blank, unparsable or future dates.
pub fn birth_date(value: &str) -> ClientResult<NaiveDate> {
    let raw = required("birth date", value)?;
    let date = parse_birth_date(&raw).ok_or_else(|| {
        ClientError::validation("birth date", format!("'{raw}' is not a YYYY-MM-DD date"))
    })?;
    if date > Utc::now().date_naive() {
        return Err(ClientError::validation(
            "birth date",
            "must not be in the future",
        ));
    }
    Ok(date)
}

/// Normalised login body. The password is kept verbatim.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] when either field is blank.
pub fn credentials(username: &str, password: &str) -> ClientResult<Credentials> {
    let username = required("username", username)?;
    if password.is_empty() {
        return Err(ClientError::validation("password", "is required"));
    }
    Ok(Credentials {
        username,
        password: password.to_string(),
    })
}

/// Normalised registration body with the birth date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for the first invalid field.
pub fn registration(
    username: &str,
    password: &str,
    email_address: &str,
    birth: &str,
) -> ClientResult<Registration> {
    let Credentials { username, password } = credentials(username, password)?;
    Ok(Registration {
        username,
        password,
        email: email(email_address)?,
        birth_date: birth_date(birth)?.format("%Y-%m-%d").to_string(),
    })
}
