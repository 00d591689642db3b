use crate::errors::ApiError;
use axum::extract::rejection::{JsonRejection, QueryRejection};

pub fn json_422(err: JsonRejection, expected: &str) -> ApiError {
    ApiError::Validation(format!("Invalid JSON body: {} (expected: {})", err, expected))
}

pub fn query_422(err: QueryRejection) -> ApiError {
    ApiError::Validation(format!("Invalid query parameters: {}", err))
}

/// Path ids are roll numbers rendered as strings.
pub fn parse_roll_number(id: &str) -> Result<i64, ApiError> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::Validation(format!("Invalid student id '{}': expected an integer", id)))
}

/// Parses the `age` query parameter. Empty means "not given"; otherwise it must be > 0.
pub fn parse_min_age(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(v) => v,
    };
    let age = raw
        .parse::<i64>()
        .map_err(|_| ApiError::Validation(format!("Invalid age '{}': expected an integer", raw)))?;
    if age <= 0 {
        return Err(ApiError::Validation(format!(
            "Invalid age '{}': must be greater than 0",
            age
        )));
    }
    Ok(Some(age))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_numbers_must_be_integers() {
        assert_eq!(parse_roll_number("12").unwrap(), 12);
        assert_eq!(parse_roll_number(" 3 ").unwrap(), 3);
        assert!(matches!(parse_roll_number("abc"), Err(ApiError::Validation(_))));
        assert!(matches!(parse_roll_number("1.5"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn min_age_is_optional_and_positive() {
        assert_eq!(parse_min_age(None).unwrap(), None);
        assert_eq!(parse_min_age(Some("")).unwrap(), None);
        assert_eq!(parse_min_age(Some("18")).unwrap(), Some(18));
        assert!(parse_min_age(Some("0")).is_err());
        assert!(parse_min_age(Some("-4")).is_err());
        assert!(parse_min_age(Some("old")).is_err());
    }
}
