//! Build script for usda-import
//!
//! Embeds a build number and timestamp so import runs can be traced back to a build.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let counter_path = Path::new("build_number.txt");

    let previous: u64 = fs::read_to_string(counter_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let build_number = previous + 1;

    if let Err(e) = fs::write(counter_path, build_number.to_string()) {
        println!("cargo:warning=could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=USDA_IMPORT_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=USDA_IMPORT_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=USDA_IMPORT_BUILD_PROFILE={}", profile);
}
