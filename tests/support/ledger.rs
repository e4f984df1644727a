use std::fs;
use std::path::{Path, PathBuf};

/// Path to the checked-in ledger fixture.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ledger.json")
}

/// Copy the ledger fixture into `dir` so a test may modify it.
pub fn copy_fixture(dir: &Path) -> PathBuf {
    let target = dir.join("ledger.json");
    fs::copy(fixture_path(), &target).expect("copy ledger fixture");
    target
}
