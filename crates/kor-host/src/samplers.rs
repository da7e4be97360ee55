//! Sampler catalogs per request variant
//!
//! The override registry validates `sampler_name` overrides against the live
//! set for the request's variant; image-conditioned requests support a
//! narrower set than text-to-image.

use crate::request::RequestKind;

/// Samplers available to text-to-image requests
pub const TEXT_TO_IMAGE: &[&str] = &[
    "Euler a",
    "Euler",
    "LMS",
    "Heun",
    "DPM2",
    "DPM2 a",
    "DPM++ 2S a",
    "DPM++ 2M",
    "DPM++ SDE",
    "DDIM",
    "PLMS",
    "UniPC",
];

/// Samplers available to image-conditioned requests
pub const IMAGE_TO_IMAGE: &[&str] = &[
    "Euler a",
    "Euler",
    "LMS",
    "Heun",
    "DPM2",
    "DPM2 a",
    "DPM++ 2S a",
    "DPM++ 2M",
    "DPM++ SDE",
    "DDIM",
];

/// Sampler names applicable to a request variant
#[inline]
#[must_use]
pub fn for_kind(kind: RequestKind) -> &'static [&'static str] {
    match kind {
        RequestKind::TextToImage => TEXT_TO_IMAGE,
        RequestKind::ImageToImage => IMAGE_TO_IMAGE,
    }
}

/// Check whether a sampler name is valid for a request variant
#[inline]
#[must_use]
pub fn is_known(kind: RequestKind, name: &str) -> bool {
    for_kind(kind).contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plms_is_text_to_image_only() {
        assert!(is_known(RequestKind::TextToImage, "PLMS"));
        assert!(!is_known(RequestKind::ImageToImage, "PLMS"));
    }

    #[test]
    fn euler_a_everywhere() {
        assert!(is_known(RequestKind::TextToImage, "Euler a"));
        assert!(is_known(RequestKind::ImageToImage, "Euler a"));
    }

    #[test]
    fn unknown_sampler() {
        assert!(!is_known(RequestKind::TextToImage, "NotASampler"));
    }
}
