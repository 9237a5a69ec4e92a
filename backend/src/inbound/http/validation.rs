//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes an `invalid_request` error whose details
//! name the offending field and a stable machine code.

use chrono::NaiveDate;
use pagination::PageRequestError;
use serde_json::json;

use crate::domain::{Error, UserValidationError};

/// Validation error codes owned by the HTTP adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCode {
    InvalidBirthDate,
    LimitOutOfRange,
    NegativeOffset,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBirthDate => "invalid_birth_date",
            ErrorCode::LimitOutOfRange => "limit_out_of_range",
            ErrorCode::NegativeOffset => "negative_offset",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

/// Map a domain field validation failure.
pub(crate) fn user_validation_error(err: &UserValidationError) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(&err.code())
}

fn invalid_birth_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a calendar date (YYYY-MM-DD)"))
        .with_value(ErrorCode::InvalidBirthDate, value)
}

/// Parse an ISO-8601 calendar date.
pub(crate) fn parse_birth_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_birth_date_error(field, value))
}

/// Map a rejected page window.
pub(crate) fn page_request_error(err: PageRequestError) -> Error {
    let (field, code, value) = match err {
        PageRequestError::LimitOutOfRange { actual, .. } => {
            ("limit", ErrorCode::LimitOutOfRange, actual)
        }
        PageRequestError::NegativeOffset { actual } => ("offset", ErrorCode::NegativeOffset, actual),
    };
    ValidationError::new(field, err.to_string()).with_value(code, value.to_string())
}

#[cfg(test)]
mod tests {
    //! Detail payloads of validation errors.
    use super::*;
    use crate::domain::{EmailAddress, ErrorCode as DomainErrorCode};
    use rstest::rstest;

    const BIRTH_DATE: FieldName = FieldName::new("birthDate");

    #[rstest]
    #[case("1990-04-12", 1990, 4, 12)]
    #[case(" 2000-02-29 ", 2000, 2, 29)]
    fn parses_calendar_dates(
        #[case] raw: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let parsed = parse_birth_date(raw, BIRTH_DATE).expect("valid date");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(year, month, day).expect("date"));
    }

    #[rstest]
    #[case("1990-02-30")]
    #[case("12/04/1990")]
    #[case("")]
    #[case("1990-04-12T00:00:00Z")]
    fn rejects_malformed_dates(#[case] raw: &str) {
        let err = parse_birth_date(raw, BIRTH_DATE).expect_err("invalid date");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "birthDate");
        assert_eq!(details["code"], "invalid_birth_date");
        assert_eq!(details["value"], raw);
    }

    #[rstest]
    fn user_validation_errors_carry_field_and_code() {
        let err = EmailAddress::new("nope").expect_err("invalid email");
        let mapped = user_validation_error(&err);
        let details = mapped.details().expect("details");
        assert_eq!(details["field"], "email");
        assert_eq!(details["code"], "invalid_email");
        assert_eq!(mapped.message(), "email must be a valid address");
    }

    #[rstest]
    #[case(PageRequestError::LimitOutOfRange { min: 1, max: 200, actual: 0 }, "limit", "limit_out_of_range", "0")]
    #[case(PageRequestError::NegativeOffset { actual: -3 }, "offset", "negative_offset", "-3")]
    fn page_errors_name_the_parameter(
        #[case] err: PageRequestError,
        #[case] field: &str,
        #[case] code: &str,
        #[case] value: &str,
    ) {
        let mapped = page_request_error(err);
        let details = mapped.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
        assert_eq!(details["value"], value);
    }
}
