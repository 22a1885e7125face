//! Integration tests for the admission sequence: token check, path
//! check, then the operation handler. A rejected request must leave
//! no side effects behind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use code_editor::ops;
use code_editor::{PathAuthorizer, RequestAdmission, Result, SessionStore};

struct Fixture {
    root: TempDir,
    admission: RequestAdmission,
    token: String,
}

fn fixture() -> Fixture {
    let root = TempDir::new().unwrap();
    let authorizer =
        Arc::new(PathAuthorizer::new(vec![root.path().to_path_buf()]).unwrap());
    let admission = RequestAdmission::new(SessionStore::new(), authorizer);
    let token = admission.sessions().new_session().unwrap().token;

    Fixture {
        root,
        admission,
        token,
    }
}

/// The dispatch sequence every write-style tool goes through
fn guarded_write(
    admission: &RequestAdmission,
    token: &str,
    path: &Path,
    content: &str,
) -> Result<()> {
    admission.admit(token, &[path])?;
    ops::write_file(path, content)
}

#[test]
fn valid_request_reaches_the_handler() {
    let fx = fixture();
    let target = fx.root.path().join("src/lib.rs");

    guarded_write(&fx.admission, &fx.token, &target, "fn main() {}").unwrap();
    assert_eq!(ops::read_file(&target).unwrap(), "fn main() {}");
}

#[test]
fn invalid_token_short_circuits_without_side_effects() {
    let fx = fixture();
    let target = fx.root.path().join("never.rs");

    let err = guarded_write(&fx.admission, "bogus", &target, "x").unwrap_err();
    assert_eq!(err.to_string(), "invalid or expired session token");
    assert!(!target.exists());
}

#[test]
fn disallowed_path_short_circuits_without_side_effects() {
    let fx = fixture();
    let outside = TempDir::new().unwrap();
    let target = outside.path().join("escape.rs");

    let err = guarded_write(&fx.admission, &fx.token, &target, "x").unwrap_err();
    assert!(err
        .to_string()
        .starts_with("access denied: path not allowed:"));
    assert!(!target.exists());
}

#[test]
fn traversal_out_of_root_is_denied() {
    let fx = fixture();
    let sneaky: PathBuf = fx.root.path().join("../sneaky.rs");

    let err = fx.admission.admit(&fx.token, &[&sneaky]).unwrap_err();
    assert!(err.to_string().starts_with("access denied"));
}

#[test]
fn expired_session_is_rejected() {
    let root = TempDir::new().unwrap();
    let authorizer =
        Arc::new(PathAuthorizer::new(vec![root.path().to_path_buf()]).unwrap());
    let admission =
        RequestAdmission::new(SessionStore::new().with_ttl(0), authorizer);
    let token = admission.sessions().new_session().unwrap().token;

    let err = admission.admit(&token, &[]).unwrap_err();
    assert_eq!(err.to_string(), "invalid or expired session token");
}

#[test]
fn full_edit_cycle_through_admission() {
    let fx = fixture();
    let target = fx.root.path().join("app.rs");

    guarded_write(
        &fx.admission,
        &fx.token,
        &target,
        "fn greet() -> &'static str {\n    \"hello\"\n}\n",
    )
    .unwrap();

    fx.admission.admit(&fx.token, &[&target]).unwrap();
    let outcome = ops::replace_pattern(&target, "hello", "goodbye", true).unwrap();
    assert_eq!(outcome.replacements, 1);

    fx.admission.admit(&fx.token, &[&target]).unwrap();
    let report = ops::validate_syntax(&target, None).unwrap();
    assert!(report.valid);

    fx.admission.admit(&fx.token, &[&target]).unwrap();
    ops::delete_file(&target).unwrap();
    assert!(!target.exists());
}
