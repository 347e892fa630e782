//! Locale handling shared by the content loader and the sitemap.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the closed set of site locales
//! - `locale`: Validated `Locale` type, URL prefixes and the route-guard predicate
//! - `validator`: Reports for key collisions and manifest verification
//! - `metrics`: Content pipeline counters
//!
//! # Example
//!
//! ```rust,ignore
//! use site_content::i18n::{is_supported_locale, Locale};
//!
//! let german = Locale::from_code("de")?;
//! assert_eq!(german.url_prefix(), "/de");
//! assert!(!is_supported_locale("fr"));
//! ```

mod locale;
mod metrics;
mod registry;
mod validator;

pub use locale::{is_supported_locale, supported_locales, Locale};
pub use metrics::{ContentMetrics, MetricsReport};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use validator::{KeyCollision, ValidationReport};
