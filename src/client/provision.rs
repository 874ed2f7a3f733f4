//! Store provisioning support: detecting the missing-project failure that
//! warrants auto-creating the project before one retry.

use crate::Error;

/// Marker the backend embeds in its error text when the owning project does
/// not exist.
///
/// Heuristic coupling to the backend's current error message format; the
/// error shape offers no structured signal for this condition. Single point
/// of change if the wording moves.
pub(crate) const PROJECT_NOT_EXIST_MARKER: &str = "ProjectNotExist";

/// Description attached to projects the provisioner creates on the caller's
/// behalf.
pub(crate) const AUTO_PROJECT_DESCRIPTION: &str = "Auto-created by LogLake Memory SDK";

/// Whether a store-creation failure means the owning project is missing.
/// Everything else propagates to the caller untouched.
pub(crate) fn indicates_missing_project(error: &Error) -> bool {
    error.to_string().contains(PROJECT_NOT_EXIST_MARKER)
}
