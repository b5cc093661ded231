use catchpoint_api::ClientError;
use catchpoint_api::TestId;
use catchpoint_api::enums::UnknownName;
use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

/// Problems found in a resource before anything is sent to the API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    UnknownName(#[from] UnknownName),

    #[error("invalid {field} '{value}' for {resource}, expected one of: {allowed}")]
    NotAllowed {
        resource: &'static str,
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error(
        "must specify at least 1 node_ids or node_group_ids in a list. to inherit, remove the schedule_settings attribute"
    )]
    MissingNodes,

    #[error("operation_type is required for alert type '{0}'")]
    OperationTypeRequired(String),

    #[error(
        "must specify at least 1 node threshold type: threshold_number_of_runs or threshold_percentage_of_runs"
    )]
    MissingNodeThreshold,

    #[error("must specify the alert sub type for alert type '{0}', for example 'test' for 'availability'")]
    AlertSubTypeRequired(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{block} is not supported by {resource}")]
    UnsupportedBlock {
        block: &'static str,
        resource: &'static str,
    },

    #[error("{0} is required")]
    Required(&'static str),

    #[error("unknown resource type '{0}'")]
    UnknownResourceType(String),
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("could not encode section: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("test {0} disappeared before it could be read back")]
    Vanished(TestId),

    #[error("missing API token, set api_token or CATCHPOINT_API_TOKEN")]
    MissingToken,
}
