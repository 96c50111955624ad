//! Centralized, hardcoded console settings: labels, glyphs and colors.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Layout / indentation
// ---------------------------------------------------------------------------

pub const INDENT_1: &str = "  ";
pub const BANNER_RULE_TOP: char = '=';
pub const BANNER_RULE_SUB: char = '-';

// ---------------------------------------------------------------------------
// Labels / prompts
// ---------------------------------------------------------------------------

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";
pub const GLYPH_ACTIVITY: &str = "•";
pub const STEP_PROMPT_PREFIX: &str = "  >>> 'Enter' to run";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_BANNER_RULE: Color = Color::DarkGrey;
pub const COLOR_BANNER_TITLE: Color = Color::Cyan;
pub const COLOR_BANNER_DESC: Color = Color::White;
pub const COLOR_ACTIVITY_GLYPH: Color = Color::DarkGrey;
pub const COLOR_ACTIVITY_TEXT: Color = Color::Blue;
pub const COLOR_DECISION: Color = Color::Magenta;
pub const COLOR_REDIRECT: Color = Color::Green;
pub const COLOR_PROMPT: Color = Color::Yellow;
pub const COLOR_OUTPUT: Color = Color::DarkGrey;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;
