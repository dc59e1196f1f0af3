use std::{
    fmt,
    io::{self, BufRead, Write},
};

use crate::{configuration::LinkedinSettings, error::CredentialError};

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Takes the login from configuration, asking on the terminal when either
/// half is missing.
pub fn resolve_credentials(settings: &LinkedinSettings) -> Result<Credentials, CredentialError> {
    let configured = Credentials::new(settings.username.trim(), settings.password.trim());
    if configured.is_complete() {
        return Ok(configured);
    }

    log::info!("LinkedIn credentials not configured, prompting");
    let username = prompt_line("Enter your LinkedIn username: ")?;
    let password = rpassword::prompt_password("Enter your LinkedIn password: ")?;
    check_credentials(Credentials::new(username.trim(), password.trim()))
}

fn check_credentials(credentials: Credentials) -> Result<Credentials, CredentialError> {
    match credentials.is_complete() {
        true => Ok(credentials),
        false => Err(CredentialError::Missing),
    }
}

fn prompt_line(prompt: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_credentials_are_used_without_prompting() {
        let settings = LinkedinSettings {
            login_url: "https://www.linkedin.com/login".to_string(),
            username: " alice@example.com ".to_string(),
            password: "hunter2".to_string(),
        };

        let credentials = resolve_credentials(&settings).unwrap();

        assert_eq!(credentials.username, "alice@example.com");
        assert_eq!(credentials.password, "hunter2");
    }

    #[test]
    fn blank_half_is_missing() {
        assert!(matches!(
            check_credentials(Credentials::new("alice", "")),
            Err(CredentialError::Missing)
        ));
    }

    #[test]
    fn debug_hides_password() {
        let printed = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(!printed.contains("hunter2"));
    }
}
