//! The command catalog, by feature tier.
//!
//! Two variants of the extension have shipped: a basic one without images,
//! patterns, shadows, bezier curves or composite modes, and an extended one
//! with all of them. The core implements the superset once; hosts that want
//! the basic variant register only the basic names. The tables here are the
//! single source of truth for that gating, and the menu tables list the
//! exact words each enumerated parameter accepts.

/// Which command catalog a host registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureTier {
    Basic,
    Extended,
}

/// Commands and reporters present in both tiers.
pub const BASIC_COMMANDS: &[&str] = &[
    "clear",
    "refresh",
    "to_pixel_x",
    "to_pixel_y",
    "to_stage_x",
    "to_stage_y",
    "color_to_hex",
    "fill_color",
    "stroke_color",
    "fill_gradient",
    "stroke_gradient",
    "create_linear_gradient",
    "create_radial_gradient",
    "add_gradient_stop",
    "line_width",
    "line_cap",
    "line_join",
    "miter_limit",
    "line_dash",
    "line_dash_offset",
    "set_alpha",
    "translate",
    "rotate",
    "scale",
    "reset_transform",
    "clear_rect",
    "fill_rect",
    "stroke_rect",
    "begin_path",
    "close_path",
    "move_to",
    "line_to",
    "arc",
    "fill",
    "stroke",
    "font",
    "text_align",
    "text_baseline",
    "fill_text",
    "stroke_text",
    "text_width",
];

/// Commands and reporters only the extended tier registers.
pub const EXTENDED_COMMANDS: &[&str] = &[
    "fill_pattern",
    "stroke_pattern",
    "create_pattern",
    "capture_image",
    "begin_image_load",
    "draw_image",
    "image_width",
    "image_height",
    "quadratic_curve_to",
    "bezier_curve_to",
    "composite_mode",
    "shadow_blur",
    "shadow_color",
    "shadow_offset_x",
    "shadow_offset_y",
];

impl FeatureTier {
    /// The command names a host registers for this tier. Extended is a
    /// strict superset of basic.
    pub fn commands(self) -> Vec<&'static str> {
        match self {
            FeatureTier::Basic => BASIC_COMMANDS.to_vec(),
            FeatureTier::Extended => BASIC_COMMANDS
                .iter()
                .chain(EXTENDED_COMMANDS)
                .copied()
                .collect(),
        }
    }
}

/// The exact word sets for enumerated parameters.
pub mod menus {
    pub const ANGLE_UNIT: &[&str] = &["degrees", "radians"];
    pub const ARC_DIRECTION: &[&str] = &["clockwise", "anticlockwise"];
    pub const LINE_CAP: &[&str] = &["butt", "round", "square"];
    pub const LINE_JOIN: &[&str] = &["miter", "bevel", "round"];
    pub const TEXT_ALIGN: &[&str] = &["start", "end", "left", "center", "right"];
    pub const TEXT_BASELINE: &[&str] = &[
        "top",
        "hanging",
        "middle",
        "alphabetic",
        "ideographic",
        "bottom",
    ];
    pub const PATTERN_REPEAT: &[&str] = &["repeat", "repeat-x", "repeat-y", "no-repeat"];
    pub const COMPOSITE_MODE: &[&str] = &[
        "source-over",
        "source-in",
        "source-out",
        "source-atop",
        "destination-over",
        "destination-in",
        "destination-out",
        "destination-atop",
        "lighter",
        "copy",
        "xor",
        "multiply",
        "screen",
        "overlay",
        "darken",
        "lighten",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn extended_is_a_strict_superset() {
        let basic = FeatureTier::Basic.commands();
        let extended = FeatureTier::Extended.commands();
        assert!(basic.iter().all(|c| extended.contains(c)));
        assert_eq!(extended.len(), basic.len() + EXTENDED_COMMANDS.len());
    }

    #[test]
    fn no_duplicate_command_names() {
        let mut all = FeatureTier::Extended.commands();
        all.sort_unstable();
        let before = all.len();
        all.dedup();
        assert_eq!(all.len(), before);
    }

    #[test]
    fn menu_words_parse_into_their_enums() {
        for word in menus::LINE_CAP {
            crate::LineCap::from_str(word).unwrap();
        }
        for word in menus::LINE_JOIN {
            crate::LineJoin::from_str(word).unwrap();
        }
        for word in menus::TEXT_ALIGN {
            crate::TextAlign::from_str(word).unwrap();
        }
        for word in menus::TEXT_BASELINE {
            crate::TextBaseline::from_str(word).unwrap();
        }
        for word in menus::PATTERN_REPEAT {
            crate::PatternRepeat::from_str(word).unwrap();
        }
        for word in menus::COMPOSITE_MODE {
            crate::CompositeMode::from_str(word).unwrap();
        }
        for word in menus::ANGLE_UNIT {
            crate::AngleUnit::from_str(word).unwrap();
        }
        for word in menus::ARC_DIRECTION {
            crate::ArcDirection::from_str(word).unwrap();
        }
    }
}
