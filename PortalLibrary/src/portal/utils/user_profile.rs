use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub allergies: Option<String>,
    pub dislikes: Option<String>,
    pub preferences: Option<String>,
}

impl UserProfile {
    pub fn has_preferences(&self) -> bool {
        Self::filled(&self.allergies) || Self::filled(&self.dislikes) || Self::filled(&self.preferences)
    }

    fn filled(field: &Option<String>) -> bool {
        field.as_deref().map(|value| !value.trim().is_empty()).unwrap_or(false)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PreferenceUpdate {
    pub email: String,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub dislikes: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
}
