use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Environment {
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "TEST",
            Environment::Production => "PRODUCTION",
        }
    }
}

impl FromStr for Environment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "TEST" => Ok(Environment::Test),
            "PRODUCTION" => Ok(Environment::Production),
            other => Err(GatewayError::validation(format!(
                "unknown environment '{other}', expected TEST or PRODUCTION"
            ))),
        }
    }
}

/// API credentials for a single store scope.
///
/// Values are checked when the credentials are created, never when they are
/// used, so a `Credentials` value in hand is always valid.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    environment: Environment,
    country: Option<String>,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        environment: Environment,
    ) -> Result<Self> {
        let username = username.into().trim().to_string();
        let password = password.into();

        if username.is_empty() {
            return Err(GatewayError::validation("username must not be empty"));
        }
        if password.trim().is_empty() {
            return Err(GatewayError::validation("password must not be empty"));
        }

        Ok(Self {
            username,
            password,
            environment,
            country: None,
        })
    }

    pub fn with_country(mut self, country: &str) -> Result<Self> {
        let country = country.trim();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GatewayError::validation(format!(
                "country '{country}' must be a two letter code"
            )));
        }
        self.country = Some(country.to_uppercase());
        Ok(self)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("environment", &self.environment)
            .field("country", &self.country)
            .finish()
    }
}

/// Wire shape used by the admin credentials endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsInput {
    pub username: String,
    pub password: String,
    pub environment: String,
    pub country: Option<String>,
}

impl TryFrom<CredentialsInput> for Credentials {
    type Error = GatewayError;

    fn try_from(input: CredentialsInput) -> Result<Self> {
        let environment = input.environment.parse::<Environment>()?;
        let creds = Credentials::new(input.username, input.password, environment)?;
        match input.country.as_deref() {
            Some(c) if !c.trim().is_empty() => creds.with_country(c),
            _ => Ok(creds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_username_at_creation() {
        let err = Credentials::new("  ", "secret", Environment::Test).unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[test]
    fn rejects_blank_password_at_creation() {
        let err = Credentials::new("tester", "   ", Environment::Test).unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[test]
    fn normalises_country() {
        let creds = Credentials::new("tester", "secret", Environment::Production)
            .unwrap()
            .with_country("se")
            .unwrap();
        assert_eq!(creds.country(), Some("SE"));
        assert!(Credentials::new("tester", "secret", Environment::Test)
            .unwrap()
            .with_country("SWE")
            .is_err());
    }

    #[test]
    fn debug_masks_password() {
        let creds = Credentials::new("tester", "SomeCoolPassword123234", Environment::Test).unwrap();
        let out = format!("{creds:?}");
        assert!(!out.contains("SomeCoolPassword123234"));
        assert!(out.contains("tester"));
    }

    #[test]
    fn parses_environment_case_insensitively() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn builds_from_admin_input() {
        let input = CredentialsInput {
            username: "tester".to_string(),
            password: "secret".to_string(),
            environment: "test".to_string(),
            country: Some("".to_string()),
        };
        let creds = Credentials::try_from(input).unwrap();
        assert_eq!(creds.environment(), Environment::Test);
        assert_eq!(creds.country(), None);
    }
}
