use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("unknown scoring profile `{name}` (available: {})", available.join(", "))]
    UnknownProfile {
        name: String,
        available: Vec<String>,
    },
}
