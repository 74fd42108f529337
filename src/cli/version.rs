//! Version command for the folio CLI.

/// The current version of folio, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text printed by `folio --version`.
pub fn version_line() -> String {
    format!("folio {}", VERSION)
}
