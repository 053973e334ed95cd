use thiserror::Error;

use sgm_plans::PlanError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },

    #[error("invalid {name} fixture: {source}")]
    Fixture {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Plan(#[from] PlanError),
}
