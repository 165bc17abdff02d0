use crate::model::Credential;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

pub const LOGIN_ENV: &str = "GITHUB_LOGIN";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

const LOG_TARGET: &str = "credentials";

/// Take the credential from the environment when both variables are set,
/// otherwise ask on the terminal.
pub fn resolve() -> Result<Credential> {
    if let Some(credential) = from_env(|key| std::env::var(key).ok()) {
        log::debug!(target: LOG_TARGET, "Using credentials from {LOGIN_ENV}/{TOKEN_ENV}");
        return Ok(credential);
    }
    prompt()
}

pub fn from_env<F: Fn(&str) -> Option<String>>(lookup: F) -> Option<Credential> {
    let login = lookup(LOGIN_ENV).filter(|v| !v.is_empty())?;
    let secret = lookup(TOKEN_ENV).filter(|v| !v.is_empty())?;
    Some(Credential::new(login, secret))
}

/// Read the login as visible text and the secret without echo.
fn prompt() -> Result<Credential> {
    print!("Github login: ");
    io::stdout().flush()?;
    let mut login = String::new();
    io::stdin()
        .lock()
        .read_line(&mut login)
        .context("failed to read login")?;

    let secret = rpassword::prompt_password("Github pass: ").context("failed to read password")?;
    Ok(Credential::new(login.trim(), secret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn both_variables_required() {
        let credential = from_env(lookup(&[(LOGIN_ENV, "octocat"), (TOKEN_ENV, "ghp_x")])).unwrap();
        assert_eq!(credential.login, "octocat");
        assert_eq!(credential.secret, "ghp_x");

        assert!(from_env(lookup(&[(LOGIN_ENV, "octocat")])).is_none());
        assert!(from_env(lookup(&[(TOKEN_ENV, "ghp_x")])).is_none());
        assert!(from_env(lookup(&[(LOGIN_ENV, ""), (TOKEN_ENV, "ghp_x")])).is_none());
    }
}
