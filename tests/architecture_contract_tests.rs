//! Architecture contract tests.

mod support;

use support::architecture::{find_lines_containing, find_non_export_lines_in_mod_files, read_relative};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::application",
            "crate::infrastructure",
            "crate::port",
            "tracing::",
            "std::fs",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn port_depends_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &["crate::adapter", "crate::application", "crate::infrastructure"],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_lines_containing("src/application", &["crate::adapter::"]);
    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn cli_handlers_do_not_print_directly() {
    let hits = find_lines_containing("src/adapter/cli", &["println!", "eprintln!"])
        .into_iter()
        .filter(|(path, _, _)| !path.ends_with("cli/output.rs"))
        .collect::<Vec<_>>();

    assert!(
        hits.is_empty(),
        "CLI handlers should print through the output module: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn store_port_has_no_filesystem_types() {
    let source = read_relative("src/port/store.rs");
    assert!(
        !source.contains("PathBuf") && !source.contains("std::path"),
        "ledger store port should stay storage-agnostic"
    );
}
