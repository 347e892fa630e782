//! Verify content binary - checks translation files without starting the server
//!
//! Usage:
//!   cargo run --bin verify-content                 # Verify ./messages
//!   cargo run --bin verify-content -- path/to/dir  # Verify another directory
//!   cargo run --bin verify-content -- --strict     # Also fail on warnings and collisions
//!
//! Optional environment variables:
//! - CONTENT_DIR (defaults to messages; a path argument takes precedence)
//!
//! Exits non-zero when a manifest entry is missing or malformed.

use anyhow::{bail, Result};
use site_content::content::{manifest, verify_manifest, NamespaceLoader};
use site_content::i18n::{supported_locales, ValidationReport};
use site_content::pages::PageRegistry;
use std::path::PathBuf;
use tracing::info;

struct VerifyOptions {
    content_dir: PathBuf,
    strict: bool,
}

impl VerifyOptions {
    fn from_args_and_env() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let strict = args.iter().any(|arg| arg == "--strict");
        let content_dir = args
            .iter()
            .find(|arg| !arg.starts_with("--"))
            .map(PathBuf::from)
            .or_else(|| std::env::var("CONTENT_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("messages"));

        Self {
            content_dir,
            strict,
        }
    }
}

/// Merge every page in every locale and collect key collisions.
fn check_page_collisions(loader: &NamespaceLoader, pages: &PageRegistry) -> ValidationReport {
    let mut report = ValidationReport::new();

    for page in pages.pages() {
        let Some(namespaces) = pages.namespaces_for(page.key) else {
            continue;
        };
        for locale in supported_locales() {
            if let Ok((_, page_report)) =
                loader.load_page_namespaces_checked(locale.code(), &namespaces)
            {
                for collision in page_report.collisions {
                    report.push_collision(collision);
                }
            }
        }
    }

    report
}

fn print_section(title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!("--- {} ({}) ---", title, lines.len());
    for line in lines {
        println!("  • {}", line);
    }
    println!();
}

fn main() -> Result<()> {
    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_content=info".parse()?),
        )
        .init();

    let options = VerifyOptions::from_args_and_env();
    let pages = PageRegistry::site();
    let loader = NamespaceLoader::with_cache(&options.content_dir);

    info!("Verifying content in {:?}", options.content_dir);

    let mut report = verify_manifest(&loader, &pages);
    report.extend(check_page_collisions(&loader, &pages));

    println!();
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                    CONTENT VERIFICATION                          ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║ Directory: {:54}║", options.content_dir.display().to_string());
    println!("║ Manifest entries: {:>5}                                          ║", manifest(&pages).len());
    println!("║ Errors: {:>5}   Warnings: {:>5}   Collisions: {:>5}              ║",
        report.errors.len(),
        report.warnings.len(),
        report.collisions.len()
    );
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    print_section("Errors", &report.errors);
    print_section("Warnings", &report.warnings);

    if report.has_errors() {
        bail!("{} content error(s)", report.errors.len());
    }
    if options.strict && report.has_warnings() {
        bail!("{} content warning(s) in strict mode", report.warnings.len());
    }

    println!("✓ Content verified");
    Ok(())
}
