//! Sidebar navigation tree normalization for docnav.
//!
//! This crate provides:
//! - [`normalize`]: validates a [`RawNavigationConfig`] and builds a [`NavState`]
//! - [`NavStore`]: process-wide current state with rebuild-and-swap reload
//! - [`ContentSource`]: existence checks for sidebar entries
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_config::Config;
//! use docnav_nav::{FsContent, NavStore, verify_content};
//!
//! let config = Config::load(None, None)?;
//! let source = FsContent::new(config.docs_resolved.source_dir.clone());
//! let store = NavStore::load(config.into_site())?;
//!
//! let nav = store.current();
//! verify_content(&nav, &source)?;
//! for section in nav.sidebar() {
//!     for entry in &section.entries {
//!         let _link = nav.link_for(&entry.path);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`RawNavigationConfig`]: docnav_config::RawNavigationConfig

mod content;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod normalize;
pub mod path;
mod state;
mod store;

pub use content::{ContentError, ContentSource, FsContent, verify_content};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockContent;
pub use normalize::normalize;
pub use state::{ContentRef, NavState, SidebarEntry, SidebarSection, SidebarTree, SiteSettings};
pub use store::NavStore;

// Re-export for callers matching on normalization errors
pub use docnav_config::ConfigError;
