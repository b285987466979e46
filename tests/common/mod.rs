//! Common test utilities for make-builder tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// The make-builder binary, isolated from user config files
pub fn make_builder(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("make-builder").expect("make-builder binary");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("MAKE_BUILDER_MAKE__PROGRAM")
        .env_remove("MAKE_BUILDER_MAKE__SEARCH_PATH")
        .env_remove("RUST_LOG");
    cmd
}

/// Creates a temporary directory with a makefile named `name`
pub fn create_makefile_project(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let makefile_path = dir.path().join(name);
    std::fs::write(&makefile_path, content).expect("Failed to write makefile");
    (dir, makefile_path)
}

/// Creates a temporary directory holding an executable `make` stub
#[cfg(unix)]
pub fn create_fake_make_dir() -> TempDir {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let make = dir.path().join("make");
    std::fs::write(&make, "#!/bin/sh\nexit 0\n").expect("Failed to write make stub");
    let mut perms = std::fs::metadata(&make)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&make, perms).expect("Failed to set permissions");
    dir
}

/// Whether a real `make` is available on `PATH`
pub fn has_make() -> bool {
    which::which("make").is_ok()
}

/// Parse a single-line JSON document from stdout
pub fn parse_json(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stdout);
    assert_eq!(text.trim_end().lines().count(), 1, "expected one line: {}", text);
    serde_json::from_str(text.trim_end()).expect("stdout is not JSON")
}

/// Sample Makefile content for testing
pub const SAMPLE_MAKEFILE: &str = "\
CC = gcc
CFLAGS = -O2 -Wall

all: app

app: main.o
\t$(CC) $(CFLAGS) -o app main.o

main.o:
\ttouch main.o

clean:
\trm -f app main.o

.PHONY: all clean
";
