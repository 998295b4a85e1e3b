use anyhow::Result;
use regex::{Captures, Regex};
use std::env;
use std::sync::OnceLock;
use tracing::{debug, warn};

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{(\w+)\}|\$(\w+)").expect("env var pattern is valid"))
}

/// Substitute environment variables in the format ${VAR_NAME} or $VAR_NAME
///
/// Unset variables keep their placeholder so validation can name the field.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let mut missing_vars = Vec::new();

    let result = env_var_pattern().replace_all(content, |caps: &Captures<'_>| {
        let placeholder = &caps[0];
        let Some(name) = caps.get(1).or_else(|| caps.get(2)) else {
            return placeholder.to_string();
        };

        match env::var(name.as_str()) {
            Ok(value) => {
                debug!(var = name.as_str(), "Substituted environment variable");
                value
            }
            Err(_) => {
                warn!("Environment variable '{}' not set", name.as_str());
                missing_vars.push(name.as_str().to_string());
                placeholder.to_string()
            }
        }
    });

    if !missing_vars.is_empty() {
        debug!(?missing_vars, "Placeholders left unresolved");
    }

    Ok(result.into_owned())
}

/// Check if a string contains unresolved environment variable placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    env_var_pattern().is_match(content)
}
