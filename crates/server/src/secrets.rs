//! Two-tier secret resolution.
//!
//! Secrets are looked up in the process environment first. On a miss,
//! if `SSM_PATH` names a base path in AWS Systems Manager Parameter
//! Store, the value is fetched from `{SSM_PATH}/{name}` with decryption.
//! Resolution happens once at startup; per-request code never touches
//! this module.

use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use thiserror::Error;

/// Environment variable naming the parameter store base path.
const SSM_PATH_VAR: &str = "SSM_PATH";

/// Why a secret could not be resolved.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The secret is absent from the environment and the parameter store.
    #[error("secret {0} not found in environment or parameter store")]
    NotFound(String),

    /// The environment lookup missed and no parameter store base path is
    /// configured, so there is nowhere else to look.
    #[error("secret {0} not in environment and SSM_PATH is not set")]
    StoreUnconfigured(String),

    /// The parameter store read itself failed (network, permissions).
    /// Distinct from a logical miss; retrying may succeed.
    #[error("parameter store read for {name} failed")]
    Store {
        name: String,
        #[source]
        source: Box<aws_sdk_ssm::Error>,
    },
}

/// Ordered key-value lookup over the environment and SSM.
#[derive(Debug, Clone)]
pub struct SecretStore {
    ssm: aws_sdk_ssm::Client,
    base_path: Option<String>,
}

impl SecretStore {
    /// Build a store from ambient AWS configuration and `SSM_PATH`.
    pub async fn from_env() -> Self {
        let aws_config = aws_config::load_from_env().await;
        Self::new(
            aws_sdk_ssm::Client::new(&aws_config),
            std::env::var(SSM_PATH_VAR).ok(),
        )
    }

    /// Build a store with an explicit client and base path.
    #[must_use]
    pub const fn new(ssm: aws_sdk_ssm::Client, base_path: Option<String>) -> Self {
        Self { ssm, base_path }
    }

    /// Resolve a secret by name.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError`] when the value is absent everywhere, when
    /// the store is unconfigured, or when the store read fails.
    pub async fn get(&self, name: &str) -> Result<String, SecretError> {
        if let Ok(value) = std::env::var(name)
            && !value.is_empty()
        {
            return Ok(value);
        }

        let Some(base_path) = &self.base_path else {
            return Err(SecretError::StoreUnconfigured(name.to_string()));
        };

        let parameter = format!("{}/{name}", base_path.trim_end_matches('/'));

        let response = self
            .ssm
            .get_parameter()
            .name(&parameter)
            .with_decryption(true)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(GetParameterError::is_parameter_not_found)
                {
                    SecretError::NotFound(name.to_string())
                } else {
                    SecretError::Store {
                        name: name.to_string(),
                        source: Box::new(err.into()),
                    }
                }
            })?;

        response
            .parameter
            .and_then(|p| p.value)
            .ok_or_else(|| SecretError::NotFound(name.to_string()))
    }
}
