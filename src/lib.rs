pub mod admission;
pub mod authz;
pub mod clock;
pub mod error;
pub mod languages;
pub mod ops;
pub mod paginate;
pub mod project;
pub mod session;

use once_cell::sync::Lazy;

pub use admission::RequestAdmission;
pub use authz::PathAuthorizer;
pub use clock::{Clock, SystemClock};
pub use error::{EditorError, Result};
pub use languages::{LanguageGrammar, LanguageRegistry};
pub use ops::{
    DocIssue, DocScan, IssueSeverity, PartKind, PartReplaceOutcome, ReplaceOutcome,
    SyntaxErrorInfo, SyntaxReport,
};
pub use paginate::{Page, Paginator, DEFAULT_BUDGET_CHARS, DEFAULT_SHRINK_MARGIN};
pub use project::{ProjectDetection, ProjectDetector, ProjectInfo};
pub use session::{Session, SessionStore, SESSION_TTL_SECS};

/// Global language registry instance (lazily initialized)
pub static REGISTRY: Lazy<LanguageRegistry> = Lazy::new(LanguageRegistry::new);
