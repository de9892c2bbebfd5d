//! Typed actions
//!
//! [`ServiceProxy::invoke`](crate::ServiceProxy::invoke) works with names and
//! untyped results. For actions used often, a [`Tr064Action`] fixes the
//! service, the action and the shape of the result at compile time; see
//! [`define_action!`](crate::define_action) and the [`operations`](crate::operations)
//! module.

use indexmap::IndexMap;
use soap_client::{ActionResult, Arguments, Value};

use crate::{ApiError, Result};

/// An action with a known service, inputs and result type
pub trait Tr064Action {
    type Output: FromActionResult;

    /// Friendly service name, e.g. "Hosts"
    const SERVICE: &'static str;

    /// Friendly action name, e.g. "GetSpecificHostEntry"
    const ACTION: &'static str;

    /// Input arguments in wire order
    fn arguments(&self) -> Arguments;
}

/// Conversion from a decoded action result
pub trait FromActionResult: Sized {
    fn from_action_result(result: ActionResult) -> Result<Self>;
}

impl FromActionResult for ActionResult {
    fn from_action_result(result: ActionResult) -> Result<Self> {
        Ok(result)
    }
}

impl FromActionResult for () {
    fn from_action_result(_result: ActionResult) -> Result<Self> {
        Ok(())
    }
}

impl FromActionResult for Value {
    fn from_action_result(result: ActionResult) -> Result<Self> {
        match result {
            ActionResult::Single(value) => Ok(value),
            ActionResult::Values(values) => Err(ApiError::UnexpectedResult(format!(
                "expected a single value, got {} values",
                values.len()
            ))),
        }
    }
}

impl FromActionResult for u64 {
    fn from_action_result(result: ActionResult) -> Result<Self> {
        let value = Value::from_action_result(result)?;
        value
            .as_u64()
            .ok_or_else(|| ApiError::UnexpectedResult(format!("expected an integer, got '{}'", value)))
    }
}

impl FromActionResult for String {
    fn from_action_result(result: ActionResult) -> Result<Self> {
        Value::from_action_result(result).map(Value::into_string)
    }
}

impl FromActionResult for IndexMap<String, Value> {
    fn from_action_result(result: ActionResult) -> Result<Self> {
        match result {
            ActionResult::Values(values) => Ok(values),
            ActionResult::Single(value) => Err(ApiError::UnexpectedResult(format!(
                "expected named values, got single value '{}'",
                value
            ))),
        }
    }
}

/// Text of a named output
pub(crate) fn text_value(result: &ActionResult, name: &str) -> Result<String> {
    result
        .get(name)
        .map(|value| value.to_string())
        .ok_or_else(|| ApiError::UnexpectedResult(format!("missing output '{}'", name)))
}

/// Integer value of a named output
pub(crate) fn integer_value(result: &ActionResult, name: &str) -> Result<u64> {
    let value = result
        .get(name)
        .ok_or_else(|| ApiError::UnexpectedResult(format!("missing output '{}'", name)))?;

    value
        .as_u64()
        .ok_or_else(|| ApiError::UnexpectedResult(format!("output '{}' is not an integer: '{}'", name, value)))
}
