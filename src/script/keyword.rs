//! Command keywords and their fixed dispatch priority.

use std::fmt;

/// One keyword a command dictionary may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Session,
    Window,
    Pane,
    Split,
    Delay,
    Echo,
    Sequence,
    Shell,
    Extract,
    Capture,
    Prompt,
    Decide,
    Pause,
    Abort,
}

impl Keyword {
    /// Handler order used for every command dictionary, independent of the
    /// order the script author wrote the keys in.
    pub const DISPATCH_ORDER: [Keyword; 14] = [
        Keyword::Session,
        Keyword::Window,
        Keyword::Pane,
        Keyword::Split,
        Keyword::Delay,
        Keyword::Echo,
        Keyword::Sequence,
        Keyword::Shell,
        Keyword::Extract,
        Keyword::Capture,
        Keyword::Prompt,
        Keyword::Decide,
        Keyword::Pause,
        Keyword::Abort,
    ];

    /// Script spelling of this keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Session => "SESSION",
            Self::Window => "WINDOW",
            Self::Pane => "PANE",
            Self::Split => "SPLIT",
            Self::Delay => "DELAY",
            Self::Echo => "ECHO",
            Self::Sequence => "SEQUENCE",
            Self::Shell => "SHELL",
            Self::Extract => "EXTRACT",
            Self::Capture => "CAPTURE",
            Self::Prompt => "PROMPT",
            Self::Decide => "DECIDE",
            Self::Pause => "PAUSE",
            Self::Abort => "ABORT",
        }
    }

    /// Parse a script key; matching is exact (keywords are upper case).
    pub fn parse(name: &str) -> Option<Self> {
        Self::DISPATCH_ORDER
            .into_iter()
            .find(|keyword| keyword.as_str() == name)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
