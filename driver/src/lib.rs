use error_stack::ResultExt;

use kernel::KernelError;

use crate::error::ConvertError;

pub mod database;
mod error;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .convert_error()
        .attach_printable_lazy(|| format!("Failed to read environment variable {key}"))
}
