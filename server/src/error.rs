use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::{FrameKind, Report};
use kernel::KernelError;

pub const NO_BOOK_EXISTS: &str = "no book exists";
pub const MISSING_TITLE: &str = "missing required field title";

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Plain-text error response.
///
/// A missing field always renders as `missing required field <name>`. Any other
/// failure renders as the route's fixed message, or, when the route has none,
/// as the message of the innermost error in the report.
#[derive(Debug)]
pub struct ErrorStatus {
    report: Report<KernelError>,
    message: Option<&'static str>,
}

impl ErrorStatus {
    pub fn with_message(message: &'static str) -> impl FnOnce(Report<KernelError>) -> Self {
        move |report| Self {
            report,
            message: Some(message),
        }
    }

    fn status(&self) -> StatusCode {
        match self.report.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Invalid { .. } => StatusCode::BAD_REQUEST,
            KernelError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> String {
        match (self.report.current_context(), self.message) {
            (KernelError::Invalid { field }, _) => format!("missing required field {field}"),
            (_, Some(message)) => message.to_string(),
            (_, None) => root_cause(&self.report),
        }
    }
}

fn root_cause(report: &Report<KernelError>) -> String {
    report
        .frames()
        .filter_map(|frame| match frame.kind() {
            FrameKind::Context(context) => Some(context.to_string()),
            _ => None,
        })
        .last()
        .unwrap_or_else(|| report.current_context().to_string())
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(report: Report<KernelError>) -> Self {
        Self {
            report,
            message: None,
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.report);
        } else {
            tracing::debug!("{:?}", self.report);
        }
        (status, self.body()).into_response()
    }
}
