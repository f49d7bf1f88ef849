//! Build identity
//!
//! `build.rs` stamps every compile with a counter, a UTC timestamp and the cargo
//! profile. Import reports carry this so a written table can be traced to a binary.

use std::fmt;

use serde::Serialize;

/// Which binary produced an import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// 0 when built without the build script's counter
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            build_number: parse_build_number(option_env!("USDA_IMPORT_BUILD_NUMBER")),
            build_timestamp: option_env!("USDA_IMPORT_BUILD_TIMESTAMP").unwrap_or("unknown"),
            profile: option_env!("USDA_IMPORT_BUILD_PROFILE").unwrap_or("unknown"),
        }
    }
}

fn parse_build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} #{} ({}, {})",
            self.name, self.version, self.build_number, self.profile, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("===============================================");
    eprintln!("  USDA FoodData Central Importer");
    eprintln!("  {}", BuildInfo::current());
    eprintln!("===============================================");
}
