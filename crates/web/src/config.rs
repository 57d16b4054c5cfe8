// =============================================================================
// Lumen Web - Hosted Provider Configuration
// =============================================================================
// Settings are baked in at build time (Trunk passes the environment through
// to rustc), the same way the API base URL is chosen.
// =============================================================================

/// Endpoints and credentials for the hosted identity and document services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostedConfig {
    /// Public web API key of the hosted project.
    pub api_key: String,

    /// Project whose document store holds the `users` collection.
    pub project_id: String,

    /// OAuth client used by the Google sign-in popup.
    pub google_client_id: String,

    /// Identity REST base, e.g. `https://identitytoolkit.googleapis.com/v1`.
    pub identity_url: String,

    /// Document store REST base, e.g. `https://firestore.googleapis.com/v1`.
    pub documents_url: String,
}

impl HostedConfig {
    /// Resolve the configuration from build-time environment variables.
    ///
    /// `ENVIRONMENT=development` points both services at the local emulators.
    pub fn from_build_env() -> Self {
        let environment = option_env!("ENVIRONMENT").unwrap_or("production");
        Self::for_environment(
            environment,
            option_env!("LUMEN_FIREBASE_API_KEY").unwrap_or_default(),
            option_env!("LUMEN_FIREBASE_PROJECT_ID").unwrap_or_default(),
            option_env!("LUMEN_GOOGLE_CLIENT_ID").unwrap_or_default(),
        )
    }

    pub fn for_environment(
        environment: &str,
        api_key: &str,
        project_id: &str,
        google_client_id: &str,
    ) -> Self {
        let (identity_url, documents_url) = if environment == "development" {
            (
                "http://localhost:9099/identitytoolkit.googleapis.com/v1",
                "http://localhost:8080/v1",
            )
        } else {
            (
                "https://identitytoolkit.googleapis.com/v1",
                "https://firestore.googleapis.com/v1",
            )
        };

        Self {
            api_key: api_key.to_string(),
            project_id: project_id.to_string(),
            google_client_id: google_client_id.to_string(),
            identity_url: identity_url.to_string(),
            documents_url: documents_url.to_string(),
        }
    }

    /// Whether the identity service can be called at all.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.project_id.is_empty()
    }
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_uses_emulators() {
        let config = HostedConfig::for_environment("development", "key", "demo", "client");
        assert!(config.identity_url.starts_with("http://localhost:9099/"));
        assert!(config.documents_url.starts_with("http://localhost:8080/"));
        assert!(config.is_configured());
    }

    #[test]
    fn test_production_endpoints() {
        let config = HostedConfig::for_environment("production", "", "", "");
        assert_eq!(config.identity_url, "https://identitytoolkit.googleapis.com/v1");
        assert!(!config.is_configured());
    }
}
