use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Event type identifier.
///
/// Built-in lifecycle and input events have dedicated variants; anything else
/// is `Named`. String forms round-trip through `FromStr`/`Display`, so
/// `"mousemove".parse()` and `EventKind::MouseMove` address the same handlers.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    Start,
    Stop,
    Update,
    Resize,
    MouseMove,
    /// Recoverable problems reported from inside the frame loop.
    Warning,
    Named(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Start => "start",
            EventKind::Stop => "stop",
            EventKind::Update => "update",
            EventKind::Resize => "resize",
            EventKind::MouseMove => "mousemove",
            EventKind::Warning => "warning",
            EventKind::Named(name) => name,
        }
    }
}

impl FromStr for EventKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "start" => EventKind::Start,
            "stop" => EventKind::Stop,
            "update" => EventKind::Update,
            "resize" => EventKind::Resize,
            "mousemove" => EventKind::MouseMove,
            "warning" => EventKind::Warning,
            other => EventKind::Named(other.to_string()),
        })
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        EventKind::from(s.as_str())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
