use serde::{Deserialize, Serialize};

//What the external identity step hands over. Nothing downstream depends on
//the provider; the email is the whole identity as far as the portal cares.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExternalIdentity {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SignInContext {
    pub identity: ExternalIdentity,
    pub first_sign_in: bool,
    pub has_preferences: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PolicyDecision {
    Continue,
    Deny(String),
    Redirect(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignInOutcome {
    Allowed { email: String, redirect: String },
    Denied { reason: String },
}
