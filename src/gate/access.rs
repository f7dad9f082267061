//! Access gate: credential-aware redirect decisions.
//!
//! Evaluation order:
//! 1. Dev bypass → allow everything.
//! 2. Credential present and path is auth-only → redirect home.
//! 3. No credential and path is not public → redirect to login,
//!    carrying the original path.
//! 4. Otherwise allow.
//!
//! Unknown paths fall through to step 3, so the gate fails closed.

use url::form_urlencoded;

use crate::config::AccessConfig;
use crate::routing::{any_prefix_matches, PathPrefix};

/// Outcome of evaluating a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin { original_path: String },
    RedirectToHome,
}

impl Decision {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::RedirectToLogin { .. } => "redirect_to_login",
            Decision::RedirectToHome => "redirect_to_home",
        }
    }
}

/// Compiled access rules. Immutable after construction.
#[derive(Debug, Clone)]
pub struct AccessGate {
    public: Vec<PathPrefix>,
    auth_only: Vec<PathPrefix>,
    login_path: String,
    home_path: String,
    redirect_param: String,
    dev_bypass: bool,
}

impl AccessGate {
    /// Compile the configured prefixes. Trailing slashes are normalized.
    pub fn from_config(config: &AccessConfig) -> Self {
        Self {
            public: config.public_prefixes.iter().map(PathPrefix::new).collect(),
            auth_only: config
                .auth_only_prefixes
                .iter()
                .map(PathPrefix::new)
                .collect(),
            login_path: config.login_path.clone(),
            home_path: config.home_path.clone(),
            redirect_param: config.redirect_param.clone(),
            dev_bypass: config.dev_bypass,
        }
    }

    /// Whether every request is allowed unconditionally.
    pub fn dev_bypass(&self) -> bool {
        self.dev_bypass
    }

    /// True if `path` is reachable without a credential.
    pub fn is_public(&self, path: &str) -> bool {
        any_prefix_matches(&self.public, path)
    }

    /// True if a signed-in user should be sent away from `path`.
    pub fn is_auth_only(&self, path: &str) -> bool {
        any_prefix_matches(&self.auth_only, path)
    }

    /// Decide what to do with a request for `path`.
    pub fn evaluate(&self, path: &str, has_credential: bool) -> Decision {
        if self.dev_bypass {
            return Decision::Allow;
        }

        if has_credential && self.is_auth_only(path) {
            return Decision::RedirectToHome;
        }

        if !has_credential && !self.is_public(path) {
            return Decision::RedirectToLogin {
                original_path: path.to_string(),
            };
        }

        Decision::Allow
    }

    /// Redirect target for a decision, or `None` for [`Decision::Allow`].
    pub fn location(&self, decision: &Decision) -> Option<String> {
        match decision {
            Decision::Allow => None,
            Decision::RedirectToHome => Some(self.home_path.clone()),
            Decision::RedirectToLogin { original_path } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(&self.redirect_param, original_path)
                    .finish();
                Some(format!("{}?{}", self.login_path, query))
            }
        }
    }
}
