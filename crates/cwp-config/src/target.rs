//! AWS target selection: environment name -> shared-config profile, plus region.

use serde::Serialize;

/// Environments with a dedicated shared-config profile of the same name.
pub const KNOWN_ENVIRONMENTS: &[&str] = &["currentsite-dev", "currentsite-prod"];

pub const DEFAULT_PROFILE: &str = "currentsite-dev";
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Resolved account target handed to the backend constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetConfig {
    /// Environment name as given by the operator.
    pub environment: String,
    pub profile: String,
    pub region: String,
}

impl TargetConfig {
    /// Map `env` to a profile and default an empty `region`.
    ///
    /// Unknown environments fall back to [`DEFAULT_PROFILE`]; see
    /// [`TargetConfig::fell_back`].
    pub fn resolve(env: &str, region: &str) -> Self {
        let environment = env.trim().to_string();
        let profile = KNOWN_ENVIRONMENTS
            .iter()
            .find(|known| **known == environment)
            .copied()
            .unwrap_or(DEFAULT_PROFILE)
            .to_string();

        let region = match region.trim() {
            "" => DEFAULT_REGION.to_string(),
            r => r.to_string(),
        };

        Self {
            environment,
            profile,
            region,
        }
    }

    /// True when the environment was not recognised and the default profile
    /// was substituted.
    pub fn fell_back(&self) -> bool {
        !KNOWN_ENVIRONMENTS.contains(&self.environment.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_environments_select_their_profile() {
        let t = TargetConfig::resolve("currentsite-prod", "us-east-1");
        assert_eq!(t.profile, "currentsite-prod");
        assert_eq!(t.region, "us-east-1");
        assert!(!t.fell_back());

        let t = TargetConfig::resolve("currentsite-dev", "ap-northeast-1");
        assert_eq!(t.profile, "currentsite-dev");
        assert!(!t.fell_back());
    }

    #[test]
    fn unknown_environment_falls_back_to_default_profile() {
        let t = TargetConfig::resolve("staging", "eu-west-1");
        assert_eq!(t.profile, DEFAULT_PROFILE);
        assert_eq!(t.environment, "staging");
        assert!(t.fell_back());

        let t = TargetConfig::resolve("", "eu-west-1");
        assert_eq!(t.profile, DEFAULT_PROFILE);
        assert!(t.fell_back());
    }

    #[test]
    fn environment_match_is_case_sensitive() {
        let t = TargetConfig::resolve("CURRENTSITE-PROD", "");
        assert_eq!(t.profile, DEFAULT_PROFILE);
        assert!(t.fell_back());
    }

    #[test]
    fn empty_region_uses_default() {
        assert_eq!(TargetConfig::resolve("currentsite-dev", "").region, DEFAULT_REGION);
        assert_eq!(TargetConfig::resolve("currentsite-dev", "   ").region, DEFAULT_REGION);
    }
}
