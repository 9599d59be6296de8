//! Input validation for craft requests.
//!
//! Requests arrive either typed (from Rust callers) or as loose JSON values
//! (from the runner's stdin). Both paths end in a [`CraftRequest`] that is
//! guaranteed to carry a non-empty name and a count of at least one; all
//! rejections are [`CraftError::InvalidArgument`] and happen before any
//! external call.

use serde_json::Value;

use crate::error::CraftError;

/// Count used when a request omits it.
pub const DEFAULT_COUNT: u32 = 1;

/// A validated craft request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftRequest {
    /// Machine name of the item to craft.
    pub name: String,
    /// Number of times to execute the recipe.
    pub count: u32,
}

impl CraftRequest {
    /// Validate a typed request.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::InvalidArgument`] if the name is blank or the
    /// count is zero.
    pub fn new(name: impl Into<String>, count: u32) -> Result<Self, CraftError> {
        let name = name.into();
        validate_name(&name)?;
        if count == 0 {
            return Err(CraftError::invalid("count for craft_item must be at least 1"));
        }
        Ok(Self { name, count })
    }

    /// Validate loose name and count values.
    ///
    /// `count` of `None` means the caller omitted it and defaults to
    /// [`DEFAULT_COUNT`]. An explicit `null` is rejected like any other
    /// non-number.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::InvalidArgument`] if the name is not a
    /// non-empty string or the count is not a whole number of at least one
    /// that fits in `u32`.
    pub fn from_values(name: &Value, count: Option<&Value>) -> Result<Self, CraftError> {
        let Value::String(name) = name else {
            return Err(CraftError::invalid("name for craft_item must be a string"));
        };
        let count = match count {
            None => DEFAULT_COUNT,
            Some(Value::Number(n)) => count_from_number(n)?,
            Some(_) => {
                return Err(CraftError::invalid("count for craft_item must be a number"));
            }
        };
        Self::new(name.as_str(), count)
    }

    /// Validate a JSON object of the form `{"name": .., "count": ..}`.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::InvalidArgument`] if the value is not an
    /// object, or for any of the reasons listed on
    /// [`CraftRequest::from_values`].
    pub fn from_json(request: &Value) -> Result<Self, CraftError> {
        let Value::Object(fields) = request else {
            return Err(CraftError::invalid("craft request must be a JSON object"));
        };
        let name = fields.get("name").unwrap_or(&Value::Null);
        Self::from_values(name, fields.get("count"))
    }
}

fn validate_name(name: &str) -> Result<(), CraftError> {
    if name.trim().is_empty() {
        return Err(CraftError::invalid("name for craft_item must not be empty"));
    }
    Ok(())
}

/// Convert a JSON number to a positive `u32` count.
fn count_from_number(n: &serde_json::Number) -> Result<u32, CraftError> {
    if let Some(value) = n.as_u64() {
        if value == 0 {
            return Err(CraftError::invalid("count for craft_item must be at least 1"));
        }
        return u32::try_from(value)
            .map_err(|e| CraftError::invalid(format!("count for craft_item is too large: {e}")));
    }
    if n.is_i64() {
        return Err(CraftError::invalid("count for craft_item must be at least 1"));
    }

    let value = n.as_f64().unwrap_or(f64::NAN);
    #[allow(clippy::float_cmp)]
    let whole = value.is_finite() && value.fract() == 0.0;
    if !whole {
        return Err(CraftError::invalid(format!(
            "count for craft_item must be a whole number, got {value}"
        )));
    }
    if value < 1.0 {
        return Err(CraftError::invalid("count for craft_item must be at least 1"));
    }
    if value > f64::from(u32::MAX) {
        return Err(CraftError::invalid(format!(
            "count for craft_item is too large: {value}"
        )));
    }
    // Range and integrality were checked above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = value as u32;
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use artisan_types::CraftFailureKind;

    fn kind_of(result: Result<CraftRequest, CraftError>) -> Option<CraftFailureKind> {
        result.err().map(|e| e.kind())
    }

    #[test]
    fn typed_request_accepts_valid_input() {
        let req = CraftRequest::new("oak_planks", 2).unwrap();
        assert_eq!(req.name, "oak_planks");
        assert_eq!(req.count, 2);
    }

    #[test]
    fn typed_request_rejects_blank_name_and_zero_count() {
        assert_eq!(
            kind_of(CraftRequest::new("", 1)),
            Some(CraftFailureKind::InvalidArgument)
        );
        assert_eq!(
            kind_of(CraftRequest::new("   ", 1)),
            Some(CraftFailureKind::InvalidArgument)
        );
        assert_eq!(
            kind_of(CraftRequest::new("stick", 0)),
            Some(CraftFailureKind::InvalidArgument)
        );
    }

    #[test]
    fn non_string_names_rejected() {
        for name in [json!(42), json!(null), json!(true), json!(["stick"]), json!({"n": 1})] {
            assert_eq!(
                kind_of(CraftRequest::from_values(&name, Some(&json!(1)))),
                Some(CraftFailureKind::InvalidArgument),
                "name {name} should be rejected"
            );
        }
    }

    #[test]
    fn non_numeric_counts_rejected() {
        for count in [json!("2"), json!(null), json!(false), json!([2])] {
            assert_eq!(
                kind_of(CraftRequest::from_values(&json!("stick"), Some(&count))),
                Some(CraftFailureKind::InvalidArgument),
                "count {count} should be rejected"
            );
        }
    }

    #[test]
    fn out_of_range_counts_rejected() {
        for count in [json!(0), json!(-3), json!(1.5), json!(0.0), json!(5_000_000_000_u64)] {
            assert_eq!(
                kind_of(CraftRequest::from_values(&json!("stick"), Some(&count))),
                Some(CraftFailureKind::InvalidArgument),
                "count {count} should be rejected"
            );
        }
    }

    #[test]
    fn whole_float_count_accepted() {
        let req = CraftRequest::from_values(&json!("stick"), Some(&json!(3.0))).unwrap();
        assert_eq!(req.count, 3);
    }

    #[test]
    fn missing_count_defaults_to_one() {
        let req = CraftRequest::from_json(&json!({"name": "torch"})).unwrap();
        assert_eq!(req.count, DEFAULT_COUNT);
    }

    #[test]
    fn from_json_requires_object_and_name() {
        assert_eq!(
            kind_of(CraftRequest::from_json(&json!("torch"))),
            Some(CraftFailureKind::InvalidArgument)
        );
        assert_eq!(
            kind_of(CraftRequest::from_json(&json!({"count": 2}))),
            Some(CraftFailureKind::InvalidArgument)
        );
        let req = CraftRequest::from_json(&json!({"name": "oak_planks", "count": 2})).unwrap();
        assert_eq!(req, CraftRequest::new("oak_planks", 2).unwrap());
    }
}
