use crate::portal::preference_store::PreferenceStore;
use crate::portal::utils::sign_in::{ExternalIdentity, PolicyDecision, SignInContext, SignInOutcome};
use crate::utils::logging::LogEntry;

pub const DASHBOARD_LANDING: &str = "/dashboard";
pub const ONBOARDING_LANDING: &str = "/onboarding";

pub struct SignInPolicy {
    pub name: &'static str,
    pub evaluate: fn(&SignInContext) -> PolicyDecision,
}

//Admission and routing run as an ordered list of named policies over an
//immutable context. The first Deny or Redirect wins; policies never touch
//storage, which happens once while the context is built.
pub struct AuthOrchestrator {
    store: PreferenceStore,
    policies: Vec<SignInPolicy>,
}

impl AuthOrchestrator {
    pub fn new(store: PreferenceStore) -> Self {
        Self {
            store,
            policies: vec![
                SignInPolicy { name: "require_identified_user", evaluate: require_identified_user },
                SignInPolicy { name: "route_first_sign_in", evaluate: route_first_sign_in },
                SignInPolicy { name: "route_returning_user", evaluate: route_returning_user },
            ],
        }
    }

    pub async fn sign_in(&self, identity: ExternalIdentity) -> Result<SignInOutcome, LogEntry> {
        let context = self.build_context(identity).await?;
        for policy in &self.policies {
            match (policy.evaluate)(&context) {
                PolicyDecision::Continue => continue,
                PolicyDecision::Deny(reason) => {
                    return Ok(SignInOutcome::Denied { reason });
                },
                PolicyDecision::Redirect(target) => {
                    return Ok(SignInOutcome::Allowed { email: context.identity.email, redirect: target });
                },
            }
        }
        Ok(SignInOutcome::Allowed { email: context.identity.email, redirect: DASHBOARD_LANDING.to_string() })
    }

    async fn build_context(&self, identity: ExternalIdentity) -> Result<SignInContext, LogEntry> {
        if identity.email.trim().is_empty() {
            //No record for an anonymous attempt; the first policy denies it.
            return Ok(SignInContext {
                identity,
                first_sign_in: true,
                has_preferences: false,
            });
        }
        let (profile, created) = self.store.ensure_user(&identity).await?;
        Ok(SignInContext {
            identity,
            first_sign_in: created,
            has_preferences: profile.has_preferences(),
        })
    }

    pub fn policy_names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|policy| policy.name).collect()
    }
}

fn require_identified_user(context: &SignInContext) -> PolicyDecision {
    if context.identity.email.trim().is_empty() {
        PolicyDecision::Deny("Email is required".to_string())
    } else {
        PolicyDecision::Continue
    }
}

fn route_first_sign_in(context: &SignInContext) -> PolicyDecision {
    if context.first_sign_in || !context.has_preferences {
        PolicyDecision::Redirect(ONBOARDING_LANDING.to_string())
    } else {
        PolicyDecision::Continue
    }
}

fn route_returning_user(_context: &SignInContext) -> PolicyDecision {
    PolicyDecision::Redirect(DASHBOARD_LANDING.to_string())
}
