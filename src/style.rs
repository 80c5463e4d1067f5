//! Enumerated drawing-style parameters and their canvas keywords.
//!
//! Hosts hand these in as menu words; `FromStr` maps a word into the typed
//! value and rejects anything outside the menu set. `as_str` gives back the
//! exact keyword the drawing surface expects.

use std::str::FromStr;

use crate::Error;

/// Shape of the ends of stroked lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

impl FromStr for LineCap {
    type Err = Error;

    fn from_str(s: &str) -> Result<LineCap, Error> {
        match s {
            "butt" => Ok(LineCap::Butt),
            "round" => Ok(LineCap::Round),
            "square" => Ok(LineCap::Square),
            _ => Err(Error::unknown_word("line cap", s)),
        }
    }
}

/// Shape of the corners where stroked lines meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Bevel,
    Round,
}

impl LineJoin {
    pub fn as_str(self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Bevel => "bevel",
            LineJoin::Round => "round",
        }
    }
}

impl FromStr for LineJoin {
    type Err = Error;

    fn from_str(s: &str) -> Result<LineJoin, Error> {
        match s {
            "miter" => Ok(LineJoin::Miter),
            "bevel" => Ok(LineJoin::Bevel),
            "round" => Ok(LineJoin::Round),
            _ => Err(Error::unknown_word("line join", s)),
        }
    }
}

/// Horizontal anchoring of drawn text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::End => "end",
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

impl FromStr for TextAlign {
    type Err = Error;

    fn from_str(s: &str) -> Result<TextAlign, Error> {
        match s {
            "start" => Ok(TextAlign::Start),
            "end" => Ok(TextAlign::End),
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            _ => Err(Error::unknown_word("text alignment", s)),
        }
    }
}

/// Vertical anchoring of drawn text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Hanging => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Ideographic => "ideographic",
            TextBaseline::Bottom => "bottom",
        }
    }
}

impl FromStr for TextBaseline {
    type Err = Error;

    fn from_str(s: &str) -> Result<TextBaseline, Error> {
        match s {
            "top" => Ok(TextBaseline::Top),
            "hanging" => Ok(TextBaseline::Hanging),
            "middle" => Ok(TextBaseline::Middle),
            "alphabetic" => Ok(TextBaseline::Alphabetic),
            "ideographic" => Ok(TextBaseline::Ideographic),
            "bottom" => Ok(TextBaseline::Bottom),
            _ => Err(Error::unknown_word("text baseline", s)),
        }
    }
}

/// How new drawing composites against what the surface already holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    #[default]
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Lighter,
    Copy,
    Xor,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
}

impl CompositeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::SourceIn => "source-in",
            CompositeMode::SourceOut => "source-out",
            CompositeMode::SourceAtop => "source-atop",
            CompositeMode::DestinationOver => "destination-over",
            CompositeMode::DestinationIn => "destination-in",
            CompositeMode::DestinationOut => "destination-out",
            CompositeMode::DestinationAtop => "destination-atop",
            CompositeMode::Lighter => "lighter",
            CompositeMode::Copy => "copy",
            CompositeMode::Xor => "xor",
            CompositeMode::Multiply => "multiply",
            CompositeMode::Screen => "screen",
            CompositeMode::Overlay => "overlay",
            CompositeMode::Darken => "darken",
            CompositeMode::Lighten => "lighten",
        }
    }
}

impl FromStr for CompositeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<CompositeMode, Error> {
        match s {
            "source-over" => Ok(CompositeMode::SourceOver),
            "source-in" => Ok(CompositeMode::SourceIn),
            "source-out" => Ok(CompositeMode::SourceOut),
            "source-atop" => Ok(CompositeMode::SourceAtop),
            "destination-over" => Ok(CompositeMode::DestinationOver),
            "destination-in" => Ok(CompositeMode::DestinationIn),
            "destination-out" => Ok(CompositeMode::DestinationOut),
            "destination-atop" => Ok(CompositeMode::DestinationAtop),
            "lighter" => Ok(CompositeMode::Lighter),
            "copy" => Ok(CompositeMode::Copy),
            "xor" => Ok(CompositeMode::Xor),
            "multiply" => Ok(CompositeMode::Multiply),
            "screen" => Ok(CompositeMode::Screen),
            "overlay" => Ok(CompositeMode::Overlay),
            "darken" => Ok(CompositeMode::Darken),
            "lighten" => Ok(CompositeMode::Lighten),
            _ => Err(Error::unknown_word("composite mode", s)),
        }
    }
}

/// Tiling of a pattern's source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatternRepeat {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

impl PatternRepeat {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternRepeat::Repeat => "repeat",
            PatternRepeat::RepeatX => "repeat-x",
            PatternRepeat::RepeatY => "repeat-y",
            PatternRepeat::NoRepeat => "no-repeat",
        }
    }
}

impl FromStr for PatternRepeat {
    type Err = Error;

    fn from_str(s: &str) -> Result<PatternRepeat, Error> {
        match s {
            "repeat" => Ok(PatternRepeat::Repeat),
            "repeat-x" => Ok(PatternRepeat::RepeatX),
            "repeat-y" => Ok(PatternRepeat::RepeatY),
            "no-repeat" => Ok(PatternRepeat::NoRepeat),
            _ => Err(Error::unknown_word("pattern repeat", s)),
        }
    }
}

/// Sweep direction for arcs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArcDirection {
    #[default]
    Clockwise,
    Anticlockwise,
}

impl ArcDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            ArcDirection::Clockwise => "clockwise",
            ArcDirection::Anticlockwise => "anticlockwise",
        }
    }

    /// The surface's arc primitive takes a counter-clockwise flag.
    pub fn is_anticlockwise(self) -> bool {
        matches!(self, ArcDirection::Anticlockwise)
    }
}

impl FromStr for ArcDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<ArcDirection, Error> {
        match s {
            "clockwise" => Ok(ArcDirection::Clockwise),
            "anticlockwise" => Ok(ArcDirection::Anticlockwise),
            _ => Err(Error::unknown_word("arc direction", s)),
        }
    }
}

/// Unit of a script-supplied rotation angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "degrees",
            AngleUnit::Radians => "radians",
        }
    }

    /// Bring an angle in this unit into radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }
}

impl FromStr for AngleUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<AngleUnit, Error> {
        match s {
            "degrees" => Ok(AngleUnit::Degrees),
            "radians" => Ok(AngleUnit::Radians),
            _ => Err(Error::unknown_word("angle unit", s)),
        }
    }
}

/// Parse a comma-separated dash list, e.g. `"5, 5, 15, 5"`.
///
/// Blank and non-numeric entries are skipped, matching the lenient handling
/// of the surface's own dash setter; an empty result turns dashing off.
pub fn parse_dash_list(s: &str) -> Vec<f64> {
    s.split(',')
        .filter_map(|seg| seg.trim().parse::<f64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip() {
        for cap in [LineCap::Butt, LineCap::Round, LineCap::Square] {
            assert_eq!(cap.as_str().parse::<LineCap>().unwrap(), cap);
        }
        for join in [LineJoin::Miter, LineJoin::Bevel, LineJoin::Round] {
            assert_eq!(join.as_str().parse::<LineJoin>().unwrap(), join);
        }
        for mode in [
            CompositeMode::SourceOver,
            CompositeMode::DestinationAtop,
            CompositeMode::Xor,
            CompositeMode::Lighten,
        ] {
            assert_eq!(mode.as_str().parse::<CompositeMode>().unwrap(), mode);
        }
        for repeat in [
            PatternRepeat::Repeat,
            PatternRepeat::RepeatX,
            PatternRepeat::RepeatY,
            PatternRepeat::NoRepeat,
        ] {
            assert_eq!(repeat.as_str().parse::<PatternRepeat>().unwrap(), repeat);
        }
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert!("dotted".parse::<LineCap>().is_err());
        assert!("widdershins".parse::<ArcDirection>().is_err());
        assert!("".parse::<AngleUnit>().is_err());
    }

    #[test]
    fn defaults_match_a_fresh_surface() {
        assert_eq!(LineCap::default(), LineCap::Butt);
        assert_eq!(LineJoin::default(), LineJoin::Miter);
        assert_eq!(TextAlign::default(), TextAlign::Start);
        assert_eq!(TextBaseline::default(), TextBaseline::Alphabetic);
        assert_eq!(CompositeMode::default(), CompositeMode::SourceOver);
    }

    #[test]
    fn degrees_convert_radians_pass_through() {
        assert!((AngleUnit::Degrees.to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(AngleUnit::Radians.to_radians(1.25), 1.25);
    }

    #[test]
    fn dash_lists_parse_leniently() {
        assert_eq!(parse_dash_list("5, 5, 15, 5"), vec![5.0, 5.0, 15.0, 5.0]);
        assert_eq!(parse_dash_list(""), Vec::<f64>::new());
        assert_eq!(parse_dash_list("3, x, 7"), vec![3.0, 7.0]);
    }
}
