//! Request admission.
//!
//! The shared front door for every tool invocation: cancellation is
//! observed first, then the session token, then every path argument.
//! A failure here short-circuits before any operation handler runs,
//! so a rejected request has no side effects.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::authz::PathAuthorizer;
use crate::error::{EditorError, Result};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct RequestAdmission {
    sessions: SessionStore,
    authorizer: Arc<PathAuthorizer>,
}

impl RequestAdmission {
    pub fn new(sessions: SessionStore, authorizer: Arc<PathAuthorizer>) -> Self {
        Self {
            sessions,
            authorizer,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn authorizer(&self) -> &Arc<PathAuthorizer> {
        &self.authorizer
    }

    /// Admit a request: valid session, then every path authorized
    pub fn admit(&self, token: &str, paths: &[&Path]) -> Result<()> {
        self.sessions.require_valid_session(token)?;
        for path in paths {
            self.authorizer.require_allowed(path)?;
        }
        Ok(())
    }

    /// Admit with a cooperative cancellation check up front
    pub fn admit_with_cancel(
        &self,
        token: &str,
        paths: &[&Path],
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(EditorError::Canceled);
        }
        self.admit(token, paths)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn admission() -> RequestAdmission {
        let authorizer =
            Arc::new(PathAuthorizer::new(vec![PathBuf::from("/work/app")]).unwrap());
        RequestAdmission::new(SessionStore::new(), authorizer)
    }

    #[test]
    fn test_rejects_bad_token_before_paths() {
        let admission = admission();
        // The path is allowed, so the failure must come from the token
        let err = admission
            .admit("bogus", &[Path::new("/work/app/src/lib.rs")])
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid or expired session token");
    }

    #[test]
    fn test_rejects_disallowed_path() {
        let admission = admission();
        let session = admission.sessions().new_session().unwrap();

        let err = admission
            .admit(&session.token, &[Path::new("/etc/passwd")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "access denied: path not allowed: /etc/passwd"
        );
    }

    #[test]
    fn test_admits_valid_request() {
        let admission = admission();
        let session = admission.sessions().new_session().unwrap();

        admission
            .admit(
                &session.token,
                &[
                    Path::new("/work/app/src/lib.rs"),
                    Path::new("/work/app/README.md"),
                ],
            )
            .unwrap();
    }

    #[test]
    fn test_pathless_operation_only_needs_session() {
        let admission = admission();
        let session = admission.sessions().new_session().unwrap();
        admission.admit(&session.token, &[]).unwrap();
    }

    #[test]
    fn test_canceled_request_short_circuits() {
        let admission = admission();
        let session = admission.sessions().new_session().unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = admission
            .admit_with_cancel(&session.token, &[], &cancel)
            .unwrap_err();
        assert_eq!(err.to_string(), "request canceled");
    }
}
