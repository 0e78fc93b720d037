//! Client credential lookup
//!
//! The API3 client secret comes from the `LOOKER_CLIENT_SECRET` environment
//! variable (or `--client-secret`). It is never written to the config file.

use std::env;

pub const CLIENT_SECRET_ENV: &str = "LOOKER_CLIENT_SECRET";

/// Get the client secret from the environment if set and non-empty
pub fn get_client_secret() -> Option<String> {
    env::var(CLIENT_SECRET_ENV).ok().filter(|k| !k.is_empty())
}

/// Mask a secret for display, keeping only a short prefix and suffix
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "*****".to_string()
    }
}
