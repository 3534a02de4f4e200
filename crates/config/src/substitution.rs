use anyhow::Result;
use regex::Regex;
use std::env;
use std::sync::OnceLock;
use tracing::{debug, warn};

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{(\w+)\}|\$(\w+)").expect("placeholder pattern is a valid regex")
    })
}

/// Substitute environment variables in the format ${VAR_NAME} or $VAR_NAME
///
/// Unset variables keep their placeholder; the validator reports them.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();
    let mut missing_vars = Vec::new();

    for caps in placeholder_pattern().captures_iter(content) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1).or(caps.get(2))) else {
            continue;
        };
        let var_name = name.as_str();

        match env::var(var_name) {
            Ok(value) => {
                // values can be secrets, only the name is logged
                debug!("Substituting environment variable: {}", var_name);
                result = result.replace(whole.as_str(), &value);
            }
            Err(_) => {
                warn!("Environment variable '{}' not set", var_name);
                missing_vars.push(var_name.to_string());
            }
        }
    }

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables not set (may use defaults or fail validation): {:?}",
            missing_vars
        );
    }

    Ok(result)
}

/// Check if a string contains unresolved environment variable placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    placeholder_pattern().is_match(content)
}
