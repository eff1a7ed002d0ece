use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Priority levels Linear assigns to projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// No priority (0)
    #[default]
    None = 0,
    /// Urgent priority (1)
    Urgent = 1,
    /// High priority (2)
    High = 2,
    /// Medium priority (3)
    Medium = 3,
    /// Low priority (4)
    Low = 4,
}

impl Priority {
    /// Create Priority from an integer value. Out-of-range values mean no priority.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => Priority::Urgent,
            2 => Priority::High,
            3 => Priority::Medium,
            4 => Priority::Low,
            _ => Priority::None,
        }
    }

    /// Get the integer value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the label for this priority.
    pub fn label(self) -> &'static str {
        match self {
            Priority::None => "None",
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Sort key: urgent first, no priority after every explicit one.
    pub fn rank(self) -> u8 {
        match self {
            Priority::None => u8::MAX,
            other => other as u8,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept integers or floats; null means no priority.
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(value.map_or(Priority::None, |v| Priority::from_i32(v as i32)))
    }
}
