use es_domain::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("command {command} not registered")]
    NotRegistered { command: String },

    #[error("command already registered: {command}")]
    AlreadyRegistered { command: String },

    #[error("panic in register: command_type={command_type}, reason={reason}")]
    NamingFailed {
        command_type: &'static str,
        reason: String,
    },

    #[error("command {command:?} is {found}, expected {expected}")]
    TypeMismatch {
        command: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("validation: {0}")]
    Validation(String),

    #[error("rejected: {0}")]
    Rejected(String),
}

pub type CommandResult<T> = Result<T, CommandError>;
