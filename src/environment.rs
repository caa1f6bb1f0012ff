//! Typed view of the `ENVIRONMENT` variable the handler is deployed with

use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The current environment the handler is running in
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// Running against a local emulator
    Local,
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("could not convert {0} into an environment value")]
pub struct UnknownEnvironment(String);

/// Why the `ENVIRONMENT` variable could not be turned into an [Environment]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvironmentErr {
    #[error("ENVIRONMENT is not set or not unicode")]
    Unset(#[from] std::env::VarError),
    #[error(transparent)]
    Unknown(#[from] UnknownEnvironment),
}

impl Environment {
    const VAR: &'static str = "ENVIRONMENT";

    /// Attempt to read the [Environment] from the `ENVIRONMENT` variable
    pub fn new_from_env() -> Result<Self, EnvironmentErr> {
        Self::from_var(std::env::var(Self::VAR))
    }

    fn from_var(var: Result<String, std::env::VarError>) -> Result<Self, EnvironmentErr> {
        Ok(var?.trim().parse()?)
    }

    /// Attempt to read the [Environment], falling back to production
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(environment: &str) -> Result<Self, UnknownEnvironment> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownEnvironment(s.to_string())),
        }
    }
}
