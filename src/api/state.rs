//! Application state for the calculation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PolicyConfig};

/// Shared application state.
///
/// Holds the policy every request is computed under. The policy is never
/// mutated after startup and has passed validation in [`ConfigLoader`].
#[derive(Clone)]
pub struct AppState {
    policy: Arc<PolicyConfig>,
}

impl AppState {
    /// Creates a new application state from a validated policy.
    pub fn new(loader: ConfigLoader) -> Self {
        Self {
            policy: Arc::new(loader.into_policy()),
        }
    }

    /// Returns a reference to the policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConfigLoader::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_default_state_uses_builtin_policy() {
        let state = AppState::default();
        assert_eq!(state.policy(), &PolicyConfig::hangzhou());
    }

    #[test]
    fn test_state_from_loaded_policy() {
        let mut policy = PolicyConfig::default();
        policy.name = "Custom".to_string();
        let state = AppState::new(ConfigLoader::from_policy(policy).unwrap());
        assert_eq!(state.policy().name, "Custom");
    }
}
