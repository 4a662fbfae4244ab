use std::fmt;
use std::str::FromStr;

use crate::error::SketchError;

/// Sketch properties addressable by name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Property {
    Width,
    Height,
    Time,
    MouseX,
    MouseY,
}

impl Property {
    pub fn name(self) -> &'static str {
        match self {
            Property::Width => "width",
            Property::Height => "height",
            Property::Time => "time",
            Property::MouseX => "mouse.x",
            Property::MouseY => "mouse.y",
        }
    }

    /// Derived properties cannot be assigned.
    pub fn is_readonly(self) -> bool {
        matches!(self, Property::Width | Property::Height | Property::Time)
    }
}

impl FromStr for Property {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "width" => Ok(Property::Width),
            "height" => Ok(Property::Height),
            "time" => Ok(Property::Time),
            "mouse.x" => Ok(Property::MouseX),
            "mouse.y" => Ok(Property::MouseY),
            other => Err(SketchError::UnknownProperty { name: other.to_string() }),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
