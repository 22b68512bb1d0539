//! Publish color overrides for a mobile app stylesheet.
//!
//! This crate wraps the [`mobilecss_style`] color engine with what is needed to
//! run it for real:
//!
//! - **Wizard**: A session holding the parsed base stylesheet between steps
//! - **Generated files**: Custom CSS and overrides in one marked-up file
//! - **Store**: Atomic publishing with a cache-busting URL
//! - **Config**: TOML settings for the output location
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use mobilecss::{Config, CssFileStore, WizardSession};
//!
//! let config = Config::load(Config::DEFAULT_PATH)?;
//! let store = CssFileStore::from_config(&config.output);
//!
//! let session = WizardSession::start(".header { color: #fff; }")?;
//! let custom_css = session.existing_custom_css(&store)?;
//!
//! let replacements = HashMap::from([("#fff".to_string(), "#138f87".to_string())]);
//! let published = session.finish(&replacements, &custom_css, &store, config.output.current_url.as_deref())?;
//! println!("{}", published.url);
//! # Ok::<(), mobilecss::Error>(())
//! ```

pub mod config;
pub mod generated;
pub mod store;
pub mod wizard;

mod error;
mod writer;

pub use config::{Config, OutputConfig};
pub use error::{Error, Result};
pub use generated::{GeneratedFile, MissingMarkerError, existing_custom_css};
pub use store::{CssFileStore, PublishedFile, cache_busting_url};
pub use wizard::{WizardSession, parse_replacement};
