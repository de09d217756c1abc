// SWIFT Code Directory - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod db;
pub mod directory;
pub mod dto;
pub mod entities;
pub mod error;
pub mod logger;
pub mod seed;
pub mod validator;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::Config;
pub use directory::BankDirectory;
pub use dto::{
    BankRecord, BankSummary, BranchSummary, CountrySummary, SingleBank, SwiftCodeSummary,
};
pub use entities::{Bank, BankBranch, Country};
pub use error::{DirectoryError, Result};
pub use seed::{seed_from_path, seed_from_reader, SeedReport};
pub use validator::{validate_country, validate_iso2_code, validate_swift_code};
