//! External argument patcher
//!
//! Rewrites one named slot of an extension step's positional arguments. The
//! argument sequence is shared by value across the request's steps, so a
//! patch never mutates in place: it copies the whole sequence, writes the
//! slot, and reassigns the fresh sequence to the request. Partial in-place
//! mutation on a stale copy would silently desynchronize the steps.

use crate::error::OverrideError;
use crate::extensions::ExtensionBinding;
use kor_host::{GenerationRequest, HostError, Value};

/// Patch one named slot of an extension's arguments on this request
///
/// The absolute slot is the step's argument-range start plus the contract's
/// logical offset for the named slot.
///
/// # Errors
/// `Host(ArgSlotOutOfRange)` when the computed slot falls outside the step's
/// range or the request's argument sequence.
///
/// # Panics
/// Panics when the request carries no step for the binding's module, or the
/// contract does not declare the slot. Both indicate host-driver corruption
/// (a binding was discovered but its step never attached, or a handler was
/// built against a slot the contract does not describe), not user input.
pub fn patch_slot(
    request: &mut GenerationRequest,
    binding: &ExtensionBinding,
    slot: &str,
    value: Value,
) -> Result<(), OverrideError> {
    let step = request
        .step_for_module(binding.module_name)
        .unwrap_or_else(|| {
            panic!(
                "extension {} discovered but no step attached to request",
                binding.logical_name
            )
        });

    let logical = binding
        .contract
        .offset(slot)
        .unwrap_or_else(|| panic!("extension {} has no slot {slot}", binding.logical_name));

    let absolute = step.args_range.start + logical;
    if absolute >= step.args_range.end || absolute >= request.script_args.len() {
        return Err(OverrideError::Host(HostError::ArgSlotOutOfRange {
            slot: absolute,
            len: request.script_args.len().min(step.args_range.end),
        }));
    }

    // Copy-on-write: never mutate the shared sequence in place.
    let mut args: Vec<Value> = request.script_args.to_vec();
    args[absolute] = value;
    request.reassign_script_args(args);
    Ok(())
}
