//! The admission boundary for pool objects
//!
//! Requests to create or update a pool are checked before the pool is stored.
//! A rejected request carries every problem found, in the order validation
//! found them, so a caller can fix them all in one go.

use serde::Serialize;

use crate::{
    pool::{GenericPool, PoolObject, GROUP},
    validation::{self, ErrorList, Value},
};

/// Reasons a pool request is refused
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("{}.{} {:?} is invalid: {}", .kind, GROUP, .name, .errors)]
    Invalid {
        kind: &'static str,
        name: String,
        errors: ErrorList,
    },
    #[error("{0}")]
    BadRequest(String),
}

/// Validating and defaulting hooks for `InClusterIPPool` and `GlobalInClusterIPPool` objects
#[derive(Debug, Default, Clone, Copy)]
pub struct PoolWebhook;

impl PoolWebhook {
    /// Construct a new `PoolWebhook`
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decode a request body into one of the supported pool kinds
    pub fn decode(&self, body: &str) -> Result<PoolObject, WebhookError> {
        PoolObject::from_json(body).map_err(|error| {
            WebhookError::BadRequest(format!(
                "expected an InClusterIPPool or a GlobalInClusterIPPool but got: {error}"
            ))
        })
    }

    /// Fill in defaults. Pools currently have none
    pub fn default_pool(&self, _pool: &mut PoolObject) {}

    /// Check a pool that is about to be created
    pub fn validate_create(&self, pool: &dyn GenericPool) -> Result<(), WebhookError> {
        into_result(pool, validation::validate(None, pool))
    }

    /// Check a pool that is about to replace `old`
    pub fn validate_update(
        &self,
        old: &dyn GenericPool,
        new: &dyn GenericPool,
    ) -> Result<(), WebhookError> {
        into_result(new, validation::validate(Some(old), new))
    }

    /// Deleting a pool is always allowed
    pub fn validate_delete(&self, _pool: &dyn GenericPool) -> Result<(), WebhookError> {
        Ok(())
    }
}

/// Turn a validation outcome into an admission outcome
fn into_result(pool: &dyn GenericPool, errors: ErrorList) -> Result<(), WebhookError> {
    if errors.is_empty() {
        log::debug!("Allowing {} {:?}", pool.kind(), pool.name());
        return Ok(());
    }

    log::debug!(
        "Rejecting {} {:?} with {} error(s)",
        pool.kind(),
        pool.name(),
        errors.len()
    );
    Err(WebhookError::Invalid {
        kind: pool.kind(),
        name: pool.name().to_owned(),
        errors,
    })
}

/// One rejected field of a [`Rejection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cause {
    pub field: String,
    pub value: Value,
    pub reason: String,
}

/// Structured payload describing why a request was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    /// Kind of the refused object. Empty if the body was not a pool at all
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Name of the refused object
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub group: &'static str,
    pub message: String,
    /// Rejected fields, in the order they were found
    pub causes: Vec<Cause>,
}

impl From<&WebhookError> for Rejection {
    fn from(error: &WebhookError) -> Self {
        let (kind, name, causes) = match error {
            WebhookError::Invalid { kind, name, errors } => (
                (*kind).to_owned(),
                name.clone(),
                errors
                    .iter()
                    .map(|error| Cause {
                        field: error.field.to_string(),
                        value: error.value.clone(),
                        reason: error.reason.clone(),
                    })
                    .collect(),
            ),
            WebhookError::BadRequest(_) => (String::new(), String::new(), Vec::new()),
        };
        Self {
            kind,
            name,
            group: GROUP,
            message: error.to_string(),
            causes,
        }
    }
}

/// Final answer for one admission request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl From<&Result<(), WebhookError>> for Verdict {
    fn from(result: &Result<(), WebhookError>) -> Self {
        match result {
            Ok(()) => Self {
                allowed: true,
                rejection: None,
            },
            Err(error) => Self {
                allowed: false,
                rejection: Some(Rejection::from(error)),
            },
        }
    }
}
