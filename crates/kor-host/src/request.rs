//! Generation request model
//!
//! A request is single-use: the host builds it, runs it through the override
//! registry and the generation pipeline, then discards it. Overrides against
//! request attributes therefore never need restoring.

use crate::error::HostError;
use crate::scripts::ScriptStep;
use crate::value::Value;
use std::sync::Arc;

/// Request variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Text-to-image generation
    TextToImage,
    /// Image-conditioned generation
    ImageToImage,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TextToImage => write!(f, "txt2img"),
            Self::ImageToImage => write!(f, "img2img"),
        }
    }
}

/// A single generation request
///
/// Attribute access is name-based (`attr`/`set_attr`) so the override
/// registry can target fields through its descriptor table.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Request variant
    pub kind: RequestKind,
    /// Prompt text (keyword syntax already stripped by the extractor)
    pub prompt: String,
    /// RNG seed (-1 = random)
    pub seed: i64,
    /// Sampling step count
    pub steps: i64,
    /// Classifier-free guidance scale
    pub cfg_scale: f64,
    /// Sampler name
    pub sampler_name: String,
    /// Output width in pixels
    pub width: i64,
    /// Output height in pixels
    pub height: i64,
    /// Denoising strength (image-conditioned and high-res pass)
    pub denoising_strength: f64,
    /// Image guidance scale (image-conditioned only)
    pub image_cfg_scale: f64,
    /// High-resolution pass enabled (text-to-image only)
    pub enable_hr: bool,
    /// High-resolution upscale factor
    pub hr_scale: f64,
    /// High-resolution upscaler name
    pub hr_upscaler: String,
    /// Step count for the high-resolution pass (0 = reuse `steps`)
    pub hr_second_pass_steps: i64,
    /// Explicit high-resolution target width (0 = derive from `hr_scale`)
    pub hr_resize_x: i64,
    /// Explicit high-resolution target height (0 = derive from `hr_scale`)
    pub hr_resize_y: i64,
    /// Processing steps attached by optional extensions
    pub script_steps: Vec<ScriptStep>,
    /// Shared positional arguments for all script steps (copy-on-write)
    pub script_args: Arc<[Value]>,
}

impl GenerationRequest {
    /// New text-to-image request with stock defaults
    #[must_use]
    pub fn text_to_image(prompt: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::TextToImage,
            prompt: prompt.into(),
            seed: -1,
            steps: 20,
            cfg_scale: 7.0,
            sampler_name: "Euler a".to_string(),
            width: 512,
            height: 512,
            denoising_strength: 0.7,
            image_cfg_scale: 1.5,
            enable_hr: false,
            hr_scale: 2.0,
            hr_upscaler: "Latent".to_string(),
            hr_second_pass_steps: 0,
            hr_resize_x: 0,
            hr_resize_y: 0,
            script_steps: Vec::new(),
            script_args: Arc::from(Vec::new()),
        }
    }

    /// New image-conditioned request with stock defaults
    #[must_use]
    pub fn image_to_image(prompt: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::ImageToImage,
            ..Self::text_to_image(prompt)
        }
    }

    /// Attach a script step
    #[inline]
    #[must_use]
    pub fn with_script_step(mut self, step: ScriptStep) -> Self {
        self.script_steps.push(step);
        self
    }

    /// Set the shared script argument sequence
    #[inline]
    #[must_use]
    pub fn with_script_args(mut self, args: Vec<Value>) -> Self {
        self.script_args = Arc::from(args);
        self
    }

    /// Find the unique step owned by a module, if attached
    #[must_use]
    pub fn step_for_module(&self, module_name: &str) -> Option<&ScriptStep> {
        self.script_steps
            .iter()
            .find(|step| step.module_name == module_name)
    }

    /// Read a named attribute
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<Value> {
        match name {
            "seed" => Some(Value::Int(self.seed)),
            "steps" => Some(Value::Int(self.steps)),
            "cfg_scale" => Some(Value::Float(self.cfg_scale)),
            "sampler_name" => Some(Value::Text(self.sampler_name.clone())),
            "width" => Some(Value::Int(self.width)),
            "height" => Some(Value::Int(self.height)),
            "denoising_strength" => Some(Value::Float(self.denoising_strength)),
            "image_cfg_scale" => Some(Value::Float(self.image_cfg_scale)),
            "enable_hr" => Some(Value::Bool(self.enable_hr)),
            "hr_scale" => Some(Value::Float(self.hr_scale)),
            "hr_upscaler" => Some(Value::Text(self.hr_upscaler.clone())),
            "hr_second_pass_steps" => Some(Value::Int(self.hr_second_pass_steps)),
            "hr_resize_x" => Some(Value::Int(self.hr_resize_x)),
            "hr_resize_y" => Some(Value::Int(self.hr_resize_y)),
            _ => None,
        }
    }

    /// Write a named attribute
    ///
    /// # Errors
    /// `UnknownAttribute` for an unrecognized name, `TypeMismatch` when the
    /// value's primitive type does not match the field.
    pub fn set_attr(&mut self, name: &str, value: Value) -> Result<(), HostError> {
        fn int(name: &str, value: &Value) -> Result<i64, HostError> {
            value.as_i64().ok_or_else(|| HostError::TypeMismatch {
                name: name.to_string(),
                expected: "int",
            })
        }
        fn float(name: &str, value: &Value) -> Result<f64, HostError> {
            value.as_f64().ok_or_else(|| HostError::TypeMismatch {
                name: name.to_string(),
                expected: "float",
            })
        }

        match name {
            "seed" => self.seed = int(name, &value)?,
            "steps" => self.steps = int(name, &value)?,
            "cfg_scale" => self.cfg_scale = float(name, &value)?,
            "sampler_name" => {
                self.sampler_name = value
                    .as_text()
                    .ok_or_else(|| HostError::TypeMismatch {
                        name: name.to_string(),
                        expected: "text",
                    })?
                    .to_string();
            }
            "width" => self.width = int(name, &value)?,
            "height" => self.height = int(name, &value)?,
            "denoising_strength" => self.denoising_strength = float(name, &value)?,
            "image_cfg_scale" => self.image_cfg_scale = float(name, &value)?,
            "enable_hr" => {
                self.enable_hr = value.as_bool().ok_or_else(|| HostError::TypeMismatch {
                    name: name.to_string(),
                    expected: "bool",
                })?;
            }
            "hr_scale" => self.hr_scale = float(name, &value)?,
            "hr_upscaler" => {
                self.hr_upscaler = value
                    .as_text()
                    .ok_or_else(|| HostError::TypeMismatch {
                        name: name.to_string(),
                        expected: "text",
                    })?
                    .to_string();
            }
            "hr_second_pass_steps" => self.hr_second_pass_steps = int(name, &value)?,
            "hr_resize_x" => self.hr_resize_x = int(name, &value)?,
            "hr_resize_y" => self.hr_resize_y = int(name, &value)?,
            _ => return Err(HostError::UnknownAttribute(name.to_string())),
        }
        Ok(())
    }

    /// Replace the whole script argument sequence
    ///
    /// The sequence is shared by value; patches produce a fresh sequence and
    /// reassign it here rather than mutating in place.
    #[inline]
    pub fn reassign_script_args(&mut self, args: Vec<Value>) {
        self.script_args = Arc::from(args);
    }
}
