use serde::{Deserialize, Serialize};

/// Whose income the statement describes.
///
/// Guardians fill in statements for themselves (`Adult`) and for the
/// children in their care (`Child`). Only adults may opt into the highest
/// fee, and only adults must give an end date for a final statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    #[default]
    Adult,
    Child,
}

impl PersonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Child => "child",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "adult" => Some(Self::Adult),
            "child" => Some(Self::Child),
            _ => None,
        }
    }
}
