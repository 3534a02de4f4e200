//! Resolution of the shared secret guarding the combined-quote endpoint.

use std::env;
use std::fmt;
use tracing::warn;

use crate::substitution::has_unresolved_env_vars;
use crate::validator::ValidationError;
use crate::AuthConfig;

/// Environment variable holding the shared secret.
pub const SECRET_TOKEN_ENV: &str = "API_SECRET_TOKEN";

/// Well-known token accepted only in dev mode.
pub const INSECURE_FALLBACK_TOKEN: &str = "fallback_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Environment,
    ConfigFile,
    InsecureFallback,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SecretSource::Environment => SECRET_TOKEN_ENV,
            SecretSource::ConfigFile => "auth.secret_token",
            SecretSource::InsecureFallback => "insecure dev fallback",
        };
        f.write_str(s)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    pub token: String,
    pub source: SecretSource,
}

impl ResolvedSecret {
    pub fn is_insecure(&self) -> bool {
        self.source == SecretSource::InsecureFallback
    }
}

// never print the token itself
impl fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve the secret from the process environment and `auth`.
pub fn resolve_secret(auth: &AuthConfig) -> Result<ResolvedSecret, ValidationError> {
    resolve_secret_with(auth, env::var(SECRET_TOKEN_ENV).ok())
}

/// Resolve the secret with an explicit value for `API_SECRET_TOKEN`.
///
/// Order: environment, then `auth.secret_token`, then the fallback token
/// when `auth.dev_mode` is set. Blank values count as unset. The environment
/// value is taken verbatim; only the file value is checked for unresolved
/// `${VAR}` placeholders.
pub fn resolve_secret_with(
    auth: &AuthConfig,
    env_value: Option<String>,
) -> Result<ResolvedSecret, ValidationError> {
    if let Some(token) = non_blank(env_value) {
        return Ok(ResolvedSecret {
            token,
            source: SecretSource::Environment,
        });
    }

    if let Some(token) =
        non_blank(auth.secret_token.clone()).filter(|v| !has_unresolved_env_vars(v))
    {
        return Ok(ResolvedSecret {
            token,
            source: SecretSource::ConfigFile,
        });
    }

    if auth.dev_mode {
        warn!(
            "{} is not set; accepting the insecure fallback token (dev mode)",
            SECRET_TOKEN_ENV
        );
        return Ok(ResolvedSecret {
            token: INSECURE_FALLBACK_TOKEN.to_string(),
            source: SecretSource::InsecureFallback,
        });
    }

    Err(ValidationError::MissingSecret {
        var: SECRET_TOKEN_ENV.to_string(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn auth(secret: Option<&str>, dev_mode: bool) -> AuthConfig {
        AuthConfig {
            secret_token: secret.map(str::to_string),
            dev_mode,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_environment_wins() {
        let resolved =
            resolve_secret_with(&auth(Some("from-file"), true), Some("from-env".into())).unwrap();

        assert_eq!(resolved.token, "from-env");
        assert_eq!(resolved.source, SecretSource::Environment);
    }

    #[test]
    fn test_config_file_used_without_env() {
        let resolved = resolve_secret_with(&auth(Some("from-file"), false), None).unwrap();

        assert_eq!(resolved.token, "from-file");
        assert_eq!(resolved.source, SecretSource::ConfigFile);
        assert!(!resolved.is_insecure());
    }

    #[test]
    fn test_unresolved_placeholder_is_ignored() {
        let result = resolve_secret_with(&auth(Some("${API_SECRET_TOKEN}"), false), None);
        assert_matches!(result, Err(ValidationError::MissingSecret { .. }));
    }

    #[test]
    fn test_env_secret_with_dollar_signs_is_kept() {
        for dev_mode in [false, true] {
            let resolved =
                resolve_secret_with(&auth(None, dev_mode), Some("Pa$$word_2024".into())).unwrap();

            assert_eq!(resolved.token, "Pa$$word_2024");
            assert_eq!(resolved.source, SecretSource::Environment);
        }
    }

    #[test]
    fn test_blank_env_falls_through() {
        let resolved = resolve_secret_with(&auth(Some("from-file"), false), Some("  ".into())).unwrap();
        assert_eq!(resolved.source, SecretSource::ConfigFile);
    }

    #[test]
    fn test_fallback_only_in_dev_mode() {
        let resolved = resolve_secret_with(&auth(None, true), None).unwrap();
        assert_eq!(resolved.token, INSECURE_FALLBACK_TOKEN);
        assert!(resolved.is_insecure());

        assert_matches!(
            resolve_secret_with(&auth(None, false), None),
            Err(ValidationError::MissingSecret { var }) if var == SECRET_TOKEN_ENV
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let resolved = resolve_secret_with(&auth(None, false), Some("hunter2".into())).unwrap();
        assert!(!format!("{:?}", resolved).contains("hunter2"));
    }
}
