//! Value transform pipeline
//!
//! Every handler runs its first argument token through the same sequence
//! before mutating anything: coerce → adjust → clamp → validate. A validator
//! rejection aborts strictly before any mutation, leaving both the target
//! and the session untouched.

use crate::descriptor::ParameterDescriptor;
use crate::error::OverrideError;
use crate::invocation::KeywordInvocation;
use crate::value;
use kor_host::{GenerationRequest, Value};

/// Run the full transform pipeline for one invocation
///
/// Returns the validated value ready to apply.
///
/// # Errors
/// - `MissingArgument` when the invocation carries no tokens
/// - `TypeCoercion` when the token does not parse as the declared type
/// - `Validation` when the configured validator rejects the value
pub fn prepare(
    descriptor: &ParameterDescriptor,
    request: &GenerationRequest,
    invocation: &KeywordInvocation,
) -> Result<Value, OverrideError> {
    let token = invocation
        .first_argument()
        .ok_or_else(|| OverrideError::MissingArgument {
            keyword: descriptor.name.clone(),
        })?;

    let mut value = value::coerce(&descriptor.name, token, descriptor.value_type)?;

    if let Some(adjust) = descriptor.adjust {
        value = adjust(value, request);
    }

    value = value::clamp(value, descriptor.min, descriptor.max);

    if let Some(validate) = descriptor.validate {
        if let Some(message) = validate(&value, request) {
            return Err(OverrideError::validation(&descriptor.name, message));
        }
    }

    Ok(value)
}
