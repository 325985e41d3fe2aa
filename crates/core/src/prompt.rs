//! Shared fragment rules for the prompt assemblers.
//!
//! Every assembler builds its output through [`PromptParts`], which drops
//! blank fragments and joins the rest with `", "`. The small helpers here
//! encode the per-field formatting rules (hair suffixing, clothing color
//! de-duplication, camera angle sentinel) so each node applies them the
//! same way.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Separator placed between prompt fragments.
pub const FRAGMENT_SEPARATOR: &str = ", ";

/// Negative prompt substituted when the caller leaves the field blank.
pub const DEFAULT_NEGATIVE_PROMPT: &str =
    "ugly, deformed, blurry, lowres, watermark, text, extra fingers";

/// Camera angle that emits no fragment.
pub const DEFAULT_CAMERA_ANGLE: &str = "eye level";

/// Camera angles offered by the assembler nodes, default first.
pub const CAMERA_ANGLES: &[&str] = &[
    DEFAULT_CAMERA_ANGLE,
    "dutch angle",
    "low angle",
    "high angle",
    "overhead",
    "POV",
    "isometric",
    "profile",
    "3/4 view",
];

/// Hair lengths offered by the assembler nodes.
pub const HAIR_LENGTHS: &[&str] = &["short", "shoulder-length", "long", "very long"];

/// Art styles offered by the assembler nodes, default first.
pub const ART_STYLES: &[&str] = &["anime", "manga", "illustration", "pixelart"];

/// Quality tags used as the default for every assembler.
pub const DEFAULT_QUALITY_TAGS: &str = "high quality, masterpiece, detailed";

// ---------------------------------------------------------------------------
// Fragment accumulator
// ---------------------------------------------------------------------------

/// Ordered list of prompt fragments.
///
/// Blank fragments are never stored and stored fragments are trimmed, so
/// [`PromptParts::join`] cannot produce empty tokens or doubled separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptParts {
    parts: Vec<String>,
}

impl PromptParts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `fragment` if it is not blank.
    pub fn push(&mut self, fragment: &str) {
        let trimmed = fragment.trim();
        if !trimmed.is_empty() {
            self.parts.push(trimmed.to_string());
        }
    }

    /// Append an optional fragment.
    pub fn push_opt(&mut self, fragment: Option<String>) {
        if let Some(fragment) = fragment {
            self.push(&fragment);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Join all fragments with `", "`.
    pub fn join(&self) -> String {
        self.parts.join(FRAGMENT_SEPARATOR)
    }
}

/// Join the non-blank entries of `fields` with `", "`, trimming each one.
pub fn join_non_blank<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// Whether a free-text field counts as absent.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Return the caller's negative prompt, or the default when it is blank.
pub fn resolve_negative_prompt(negative_prompt: &str) -> String {
    if is_blank(negative_prompt) {
        DEFAULT_NEGATIVE_PROMPT.to_string()
    } else {
        negative_prompt.to_string()
    }
}

/// Camera fragment: nothing for blank or `"eye level"`, otherwise
/// `"{angle} view"`.
pub fn camera_angle_fragment(camera_angle: &str) -> Option<String> {
    let angle = camera_angle.trim();
    if angle.is_empty() || angle == DEFAULT_CAMERA_ANGLE {
        None
    } else {
        Some(format!("{angle} view"))
    }
}

/// Append `" hair"` unless the value already mentions hair.
fn with_hair_suffix(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else if value.to_lowercase().contains("hair") {
        Some(value.to_string())
    } else {
        Some(format!("{value} hair"))
    }
}

/// Hair group: color and style get a `" hair"` suffix independently,
/// length is emitted verbatim.
///
/// `("black", "long", "straight")` gives `"black hair, long, straight hair"`.
pub fn hair_fragment(color: &str, length: &str, style: &str) -> String {
    let color = with_hair_suffix(color).unwrap_or_default();
    let style = with_hair_suffix(style).unwrap_or_default();
    join_non_blank(&[color.as_str(), length, style.as_str()])
}

/// Eye group: `"{color} eyes"` followed by the shape, if any.
pub fn eye_fragment(color: &str, shape: &str) -> String {
    let color = color.trim();
    let color = if color.is_empty() {
        String::new()
    } else {
        format!("{color} eyes")
    };
    join_non_blank(&[color.as_str(), shape])
}

/// Clothing group: the color goes ahead of the clothing unless the
/// clothing name already contains it (case-insensitive).
pub fn clothing_fragment(clothing: &str, clothing_color: &str) -> String {
    let color = clothing_color.trim();
    if color.is_empty() || clothing.to_lowercase().contains(&color.to_lowercase()) {
        join_non_blank(&[clothing])
    } else {
        join_non_blank(&[color, clothing])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- PromptParts ---

    #[test]
    fn parts_skip_blank_and_trim() {
        let mut parts = PromptParts::new();
        parts.push("  1girl ");
        parts.push("");
        parts.push("   ");
        parts.push("smiling");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts.join(), "1girl, smiling");
    }

    #[test]
    fn parts_never_double_separator() {
        let mut parts = PromptParts::new();
        for f in ["x", "", " ", "y", "", "z"] {
            parts.push(f);
        }
        assert!(!parts.join().contains(", , "));
    }

    // --- Negative prompt ---

    #[test]
    fn negative_prompt_verbatim_when_present() {
        assert_eq!(resolve_negative_prompt(" bad hands "), " bad hands ");
    }

    #[test]
    fn negative_prompt_defaults_when_blank() {
        assert_eq!(resolve_negative_prompt("   "), DEFAULT_NEGATIVE_PROMPT);
        assert_eq!(resolve_negative_prompt(""), DEFAULT_NEGATIVE_PROMPT);
    }

    // --- Camera ---

    #[test]
    fn camera_eye_level_is_suppressed() {
        assert_eq!(camera_angle_fragment("eye level"), None);
        assert_eq!(camera_angle_fragment(""), None);
    }

    #[test]
    fn camera_other_angles_get_view_suffix() {
        assert_eq!(camera_angle_fragment("low angle").as_deref(), Some("low angle view"));
        assert_eq!(camera_angle_fragment("POV").as_deref(), Some("POV view"));
    }

    // --- Hair ---

    #[test]
    fn hair_fragment_matches_documented_example() {
        assert_eq!(
            hair_fragment("black", "long", "straight"),
            "black hair, long, straight hair"
        );
    }

    #[test]
    fn hair_style_already_mentioning_hair_is_verbatim() {
        assert_eq!(hair_fragment("", "", "messy hair"), "messy hair");
        assert_eq!(hair_fragment("silver", "", "twintails"), "silver hair, twintails hair");
    }

    #[test]
    fn hair_fragment_empty_when_all_blank() {
        assert_eq!(hair_fragment(" ", "", ""), "");
    }

    // --- Eyes ---

    #[test]
    fn eye_fragment_formats_color_and_shape() {
        assert_eq!(eye_fragment("blue", "cat eyes"), "blue eyes, cat eyes");
        assert_eq!(eye_fragment("", "large eyes"), "large eyes");
        assert_eq!(eye_fragment("", ""), "");
    }

    // --- Clothing ---

    #[test]
    fn clothing_color_inserted_ahead() {
        assert_eq!(clothing_fragment("dress", "red"), "red, dress");
    }

    #[test]
    fn clothing_color_dropped_when_already_in_name() {
        assert_eq!(clothing_fragment("Red Dress", "red"), "Red Dress");
    }

    #[test]
    fn clothing_color_alone_when_clothing_blank() {
        assert_eq!(clothing_fragment("", "red"), "red");
        assert_eq!(clothing_fragment("", ""), "");
    }
}
