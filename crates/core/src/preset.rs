//! Pre-composed prompt presets.
//!
//! Each preset is a complete positive prompt. Building from a preset can
//! append a camera view and free-form modification tags.

use crate::error::CoreError;
use crate::prompt::{camera_angle_fragment, is_blank, PromptParts};

/* --------------------------------------------------------------------------
   Preset table
   -------------------------------------------------------------------------- */

/// Preset used when the requested name is unknown.
pub const FALLBACK_PRESET: &str = "casual";

/// Preset names paired with their templates, in display order.
pub const PRESETS: &[(&str, &str)] = &[
    (
        "schoolgirl",
        "1girl, school uniform, short skirt, white socks, long black hair, blue eyes, \
         standing, looking at viewer, smiling, classroom, sunlight, daytime, high quality, \
         masterpiece, anime illustration",
    ),
    (
        "maid",
        "1girl, maid outfit, maid headband, black hair, red eyes, standing, bowing slightly, \
         embarrassed blush, mansion interior, warm lighting, high quality, masterpiece, \
         anime illustration",
    ),
    (
        "elf",
        "1girl, elf, pointed ears, long silver hair, green eyes, fantasy dress, forest, \
         magical lighting, night, high quality, masterpiece, anime illustration",
    ),
    (
        "demon",
        "1girl, demon, horns, red skin, devil tail, seductive pose, looking at viewer, \
         underworld, red lighting, high quality, masterpiece, anime illustration",
    ),
    (
        "angel",
        "1girl, angel, white wings, halo, long white hair, blue eyes, heavenly light, clouds, \
         peaceful expression, high quality, masterpiece, anime illustration",
    ),
    (
        "casual",
        "1girl, casual clothes, jeans, t-shirt, sneakers, relaxed pose, comfortable \
         expression, bedroom, warm lighting, high quality, masterpiece, anime illustration",
    ),
    (
        "formal",
        "1girl, formal dress, elegant, sophisticated, ballroom, dramatic lighting, confident \
         expression, high quality, masterpiece, anime illustration",
    ),
    (
        "fantasy",
        "1girl, fantasy warrior, armor, sword, epic pose, dramatic lighting, castle \
         background, heroic expression, high quality, masterpiece, anime illustration",
    ),
];

/// All preset names in display order.
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

/* --------------------------------------------------------------------------
   Lookup
   -------------------------------------------------------------------------- */

/// Strict lookup of a preset template by exact name.
pub fn lookup(name: &str) -> Result<&'static str, CoreError> {
    PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, template)| *template)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown preset '{name}'. Must be one of: {}",
                preset_names().join(", ")
            ))
        })
}

/// Lookup that substitutes [`FALLBACK_PRESET`] for unknown names.
pub fn template_or_fallback(name: &str) -> &'static str {
    match lookup(name) {
        Ok(template) => template,
        Err(_) => {
            tracing::debug!(preset = name, fallback = FALLBACK_PRESET, "Unknown preset, using fallback");
            fallback_template()
        }
    }
}

fn fallback_template() -> &'static str {
    PRESETS
        .iter()
        .find(|(preset, _)| *preset == FALLBACK_PRESET)
        .map(|(_, template)| *template)
        .unwrap_or(PRESETS[0].1)
}

/* --------------------------------------------------------------------------
   Build
   -------------------------------------------------------------------------- */

/// Build a prompt from a preset, then the camera view, then `modify`.
///
/// With the default camera angle and a blank `modify`, the result is the
/// stored template unchanged.
pub fn build(preset: &str, camera_angle: &str, modify: &str) -> String {
    let template = template_or_fallback(preset);
    if camera_angle_fragment(camera_angle).is_none() && is_blank(modify) {
        return template.to_string();
    }

    let mut parts = PromptParts::new();
    parts.push(template);
    parts.push_opt(camera_angle_fragment(camera_angle));
    parts.push(modify);
    parts.join()
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
