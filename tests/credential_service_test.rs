//! Tests for CredentialService
//!
//! Precedence: environment variable, token file, `token =` line in the
//! balena CLI config file.

mod common;

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use balena_wrap::application::services::{CredentialService, CredentialSources};
use balena_wrap::application::ApplicationError;
use balena_wrap::infrastructure::traits::RealFileSystem;

use common::{MockEnvironment, MockFileSystem};

const TOKEN_VAR: &str = "BALENA_AUTH_TOKEN";

fn sources(dir: &Path) -> CredentialSources {
    CredentialSources {
        env_var: TOKEN_VAR.to_string(),
        token_file: dir.join("token"),
        config_file: dir.join("balena.cfg"),
    }
}

fn service(dir: &Path, env: MockEnvironment) -> CredentialService {
    CredentialService::new(Arc::new(RealFileSystem), Arc::new(env), sources(dir))
}

fn no_env() -> MockEnvironment {
    MockEnvironment::new("/usr/local/bin/balena-wrap")
}

// ============================================================
// Environment variable
// ============================================================

#[test]
fn given_env_var_when_resolving_then_used_without_reading_files() {
    let dir = Path::new("/home/user/.balena");
    let fs = Arc::new(
        MockFileSystem::new()
            .with_file(dir.join("token"), "file-token")
            .with_file(dir.join("balena.cfg"), "token = cfg-token"),
    );
    let env = no_env().with_var(TOKEN_VAR, "env-token");
    let service = CredentialService::new(fs.clone(), Arc::new(env), sources(dir));

    let credential = service.resolve().unwrap();

    assert_eq!(credential.expose(), "env-token");
    assert!(fs.reads().is_empty());
}

#[test]
fn given_env_var_with_whitespace_when_resolving_then_used_verbatim() {
    let temp = TempDir::new().unwrap();
    let env = no_env().with_var(TOKEN_VAR, " padded ");

    let credential = service(temp.path(), env).resolve().unwrap();

    assert_eq!(credential.expose(), " padded ");
}

// ============================================================
// Token file
// ============================================================

#[test]
fn given_token_file_when_resolving_then_trimmed_content_returned() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("token"), "  file-token\n").unwrap();

    let credential = service(temp.path(), no_env()).resolve().unwrap();

    assert_eq!(credential.expose(), "file-token");
}

#[test]
fn given_token_file_and_config_when_resolving_then_token_file_wins() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("token"), "file-token").unwrap();
    std::fs::write(temp.path().join("balena.cfg"), "token = cfg-token\n").unwrap();

    let credential = service(temp.path(), no_env()).resolve().unwrap();

    assert_eq!(credential.expose(), "file-token");
}

#[test]
fn given_whitespace_only_token_file_when_resolving_then_empty_token_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("token"), " \n\t\n").unwrap();
    std::fs::write(temp.path().join("balena.cfg"), "token = cfg-token\n").unwrap();

    let err = service(temp.path(), no_env()).resolve().unwrap_err();

    match err {
        ApplicationError::EmptyTokenFile(path) => {
            assert_eq!(path, temp.path().join("token"));
        }
        other => panic!("expected EmptyTokenFile, got {:?}", other),
    }
}

// ============================================================
// Config file
// ============================================================

#[test]
fn given_config_with_token_line_when_resolving_then_value_returned() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("balena.cfg"),
        "balenaUrl = balena-cloud.com\ntoken =   cfg-token  \n",
    )
    .unwrap();

    let credential = service(temp.path(), no_env()).resolve().unwrap();

    assert_eq!(credential.expose(), "cfg-token");
}

#[test]
fn given_config_without_token_when_resolving_then_token_not_found_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("balena.cfg"), "balenaUrl = balena-cloud.com\n").unwrap();

    let err = service(temp.path(), no_env()).resolve().unwrap_err();

    assert!(matches!(err, ApplicationError::TokenNotFoundInConfig(_)));
}

// ============================================================
// No source
// ============================================================

#[test]
fn given_no_sources_when_resolving_then_error_names_both_files() {
    let temp = TempDir::new().unwrap();

    let err = service(temp.path(), no_env()).resolve().unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::CredentialSourceMissing { .. }
    ));
    let message = err.to_string();
    assert!(message.contains(&temp.path().join("token").display().to_string()));
    assert!(message.contains(&temp.path().join("balena.cfg").display().to_string()));
}

#[test]
fn given_credential_when_debug_formatting_then_secret_hidden() {
    let env = no_env().with_var(TOKEN_VAR, "very-secret");
    let temp = TempDir::new().unwrap();

    let credential = service(temp.path(), env).resolve().unwrap();

    assert!(!format!("{:?}", credential).contains("very-secret"));
}
