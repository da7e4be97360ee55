//! Builtin keyword vocabulary
//!
//! The full descriptor table wired to concrete handlers. This table is the
//! system's effective public contract: what a user-facing keyword resolves
//! to, its declared type, bounds and applicability.

use crate::descriptor::{ParameterDescriptor, TargetKind};
use crate::extensions::ADDITIONAL_NETWORKS;
use crate::handlers::{
    CheckpointHandler, ExtensionArgHandler, GlobalOptionHandler, OverrideHandler,
    RequestAttributeHandler, VaeHandler,
};
use crate::value::{self, ValueType};
use kor_host::{samplers, GenerationRequest, RequestKind, Value};

/// Number of additional-networks sub-blocks exposed as keywords
const ADDNET_KEYWORD_BLOCKS: usize = 2;

fn snap_to_grid(value: Value, _request: &GenerationRequest) -> Value {
    value::round_down_to_multiple(value, 8)
}

fn validate_sampler(value: &Value, request: &GenerationRequest) -> Option<String> {
    let name = value.as_text()?;
    if samplers::is_known(request.kind, name) {
        None
    } else {
        Some(format!("unknown sampler: {name}"))
    }
}

fn text_to_image_only(request: &GenerationRequest) -> bool {
    request.kind == RequestKind::TextToImage
}

fn image_to_image_only(request: &GenerationRequest) -> bool {
    request.kind == RequestKind::ImageToImage
}

fn attr(name: &str, value_type: ValueType) -> ParameterDescriptor {
    ParameterDescriptor::new(name, TargetKind::RequestAttribute, value_type)
}

/// Build the full builtin handler table
#[must_use]
pub fn builtin_handlers() -> Vec<Box<dyn OverrideHandler>> {
    let mut handlers: Vec<Box<dyn OverrideHandler>> = vec![
        // Global options (restored after the request)
        Box::new(GlobalOptionHandler::new(
            ParameterDescriptor::new("clip_skip", TargetKind::GlobalOption, ValueType::Int)
                .with_min(1.0)
                .with_max(12.0),
            "clip_stop_at_last_layers",
        )),
        Box::new(GlobalOptionHandler::new(
            ParameterDescriptor::new(
                "eta_noise_seed_delta",
                TargetKind::GlobalOption,
                ValueType::Int,
            )
            .with_min(0.0),
            "eta_noise_seed_delta",
        )),
        // Sampler parameters (request-scoped, never restored)
        Box::new(RequestAttributeHandler::same_name(attr(
            "seed",
            ValueType::Int,
        ))),
        Box::new(RequestAttributeHandler::same_name(
            attr("steps", ValueType::Int).with_min(1.0).with_max(150.0),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("cfg_scale", ValueType::Float)
                .with_min(1.0)
                .with_max(30.0),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("sampler_name", ValueType::Text).with_validate(validate_sampler),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("width", ValueType::Int)
                .with_adjust(snap_to_grid)
                .with_min(64.0),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("height", ValueType::Int)
                .with_adjust(snap_to_grid)
                .with_min(64.0),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("denoising_strength", ValueType::Float)
                .with_min(0.0)
                .with_max(1.0),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("image_cfg_scale", ValueType::Float)
                .with_min(0.0)
                .with_max(3.0)
                .with_applicability(image_to_image_only),
        )),
        // High-resolution pass controls (text-to-image only)
        Box::new(RequestAttributeHandler::same_name(
            attr("enable_hr", ValueType::Bool).with_applicability(text_to_image_only),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("hr_scale", ValueType::Float)
                .with_min(1.0)
                .with_max(4.0)
                .with_applicability(text_to_image_only),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("hr_upscaler", ValueType::Text).with_applicability(text_to_image_only),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("hr_second_pass_steps", ValueType::Int)
                .with_min(0.0)
                .with_max(150.0)
                .with_applicability(text_to_image_only),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("hr_resize_x", ValueType::Int)
                .with_adjust(snap_to_grid)
                .with_min(0.0)
                .with_applicability(text_to_image_only),
        )),
        Box::new(RequestAttributeHandler::same_name(
            attr("hr_resize_y", ValueType::Int)
                .with_adjust(snap_to_grid)
                .with_min(0.0)
                .with_applicability(text_to_image_only),
        )),
        // Hot-swapped shared resources (restored, reloads on both ends)
        Box::new(CheckpointHandler::new(ParameterDescriptor::new(
            "checkpoint",
            TargetKind::ModelCheckpoint,
            ValueType::Text,
        ))),
        Box::new(VaeHandler::new(ParameterDescriptor::new(
            "vae",
            TargetKind::VaeResource,
            ValueType::Text,
        ))),
        // Additional-networks extension arguments
        Box::new(ExtensionArgHandler::new(
            ParameterDescriptor::new("addnet_enable", TargetKind::ExternalArgSlot, ValueType::Bool),
            ADDITIONAL_NETWORKS,
            "enabled",
        )),
    ];

    for block in 1..=ADDNET_KEYWORD_BLOCKS {
        handlers.push(Box::new(
            ExtensionArgHandler::new(
                ParameterDescriptor::new(
                    format!("addnet_model_{block}"),
                    TargetKind::ExternalArgSlot,
                    ValueType::Text,
                ),
                ADDITIONAL_NETWORKS,
                format!("model_{block}"),
            )
            .resolving_model(),
        ));
        handlers.push(Box::new(ExtensionArgHandler::new(
            ParameterDescriptor::new(
                format!("addnet_weight_{block}"),
                TargetKind::ExternalArgSlot,
                ValueType::Float,
            )
            .with_min(-1.0)
            .with_max(2.0),
            ADDITIONAL_NETWORKS,
            format!("unet_weight_{block}"),
        )));
        handlers.push(Box::new(ExtensionArgHandler::new(
            ParameterDescriptor::new(
                format!("addnet_te_weight_{block}"),
                TargetKind::ExternalArgSlot,
                ValueType::Float,
            )
            .with_min(-1.0)
            .with_max(2.0),
            ADDITIONAL_NETWORKS,
            format!("te_weight_{block}"),
        )));
    }

    handlers
}
