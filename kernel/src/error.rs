use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum KernelError {
    NotFound,
    Invalid { field: &'static str },
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Entity not found"),
            KernelError::Invalid { field } => write!(f, "Missing required field {field}"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
