//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries
//! (domain → application → infra/commands/output) hold.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(") && trimmed.contains("test") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-test, non-comment lines of every file under `src/<layer>`, with
/// their 1-based line numbers and a display path.
fn production_lines(layer: &str) -> Vec<(String, usize, String)> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer);
    let mut out = Vec::new();
    for file in collect_rs_files(&dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") {
                continue;
            }
            out.push((rel.clone(), i + 1, line.to_string()));
        }
    }
    out
}

fn assert_no_match(layer: &str, forbidden: &[&str], rule: &str) {
    let violations: Vec<String> = production_lines(layer)
        .into_iter()
        .filter(|(_, _, line)| forbidden.iter().any(|f| line.contains(f)))
        .map(|(rel, lineno, line)| format!("{rel}:{lineno}: {}", line.trim()))
        .collect();

    assert!(
        violations.is_empty(),
        "{rule}:\n{}",
        violations.join("\n")
    );
}

// ── Layer imports ─────────────────────────────────────────────────────────────

#[test]
fn domain_is_pure() {
    assert_no_match(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio",
            "std::fs",
            "std::process",
        ],
        "domain/ must stay free of I/O and outer layers",
    );
}

#[test]
fn application_depends_only_on_domain() {
    assert_no_match(
        "application",
        &["crate::infra", "crate::commands", "crate::output", "std::fs"],
        "application/ must only import from domain/",
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    assert_no_match(
        "infra",
        &["crate::commands", "crate::output"],
        "infra/ must not import from commands/ or output/",
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    assert_no_match(
        "infra",
        &["println!", "eprintln!"],
        "infra/ must not use println!/eprintln! outside #[cfg(test)]",
    );
}

// ── Process execution routes through the gateway ─────────────────────────────

#[test]
fn no_process_spawning_outside_infra() {
    for layer in ["domain", "application", "commands", "output"] {
        assert_no_match(
            layer,
            &["tokio::process", "std::process::Command", "TokioCommandRunner::new"],
            "processes must only be spawned by infra/",
        );
    }
}

#[test]
fn services_take_trait_bounds_not_concrete_adapters() {
    let violations: Vec<String> = production_lines("application")
        .into_iter()
        .filter(|(_, _, line)| {
            line.contains("fn ") && (line.contains("HelmCli") || line.contains("TokioCommandRunner"))
        })
        .map(|(rel, lineno, line)| format!("{rel}:{lineno}: {}", line.trim()))
        .collect();

    assert!(
        violations.is_empty(),
        "application/ services must take port traits, not infra types:\n{}",
        violations.join("\n")
    );
}
