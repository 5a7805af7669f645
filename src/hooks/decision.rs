use std::future::Future;

use crate::errors::{AppError, RestError};

use super::HookContext;

/// Result of an authorization check.
///
/// `Ok(false)` is a denial. `Err` means the check could not be evaluated and
/// says nothing about whether the caller would have been allowed.
pub type Decision = Result<bool, RestError>;

/// Runs a decision under the request deadline and turns it into control flow:
/// a denial becomes `403`, an operational failure keeps its own status.
pub async fn authorize<F>(ctx: &HookContext, what: &str, decision: F) -> Result<(), AppError>
where
    F: Future<Output = Decision>,
{
    match ctx.guard(decision).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            tracing::debug!(
                request_id = %ctx.request_id,
                principal = ?ctx.principal,
                action = %what,
                "request denied by authorization hook"
            );
            Err(AppError::forbidden(format!("You don't have permissions to {what}")))
        }
        Err(err) => Err(err.into()),
    }
}
