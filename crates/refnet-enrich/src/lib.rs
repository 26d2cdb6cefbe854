//! refnet Enrichment
//!
//! Read-only decoration of network trees with the user and campaign
//! records they reference.
//!
//! # Overview
//!
//! - **Directory**: async source of records, with an in-memory implementation
//! - **CachedDirectory**: moka-backed cache in front of any directory
//! - **Enricher**: resolves every referenced id once, sequentially or
//!   concurrently, and returns an annotated copy of the tree
//!
//! # Example
//!
//! ```rust
//! use refnet_core::{NetworkNode, UserRecord};
//! use refnet_enrich::{EnrichMode, Enricher, MemoryDirectory};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! runtime.block_on(async {
//!     let directory = MemoryDirectory::new().with_user(UserRecord::new(1, "Ana"));
//!     let enricher = Enricher::new(directory).with_mode(EnrichMode::Concurrent { limit: 8 });
//!
//!     let tree = NetworkNode::new(1, "admin").with_child(NetworkNode::new(2, "user"));
//!     let enriched = enricher.enrich(&tree).await.unwrap();
//!     assert_eq!(enriched.user.unwrap().name, "Ana");
//!     assert!(enriched.children[0].user.is_none());
//! });
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod directory;
pub mod enricher;
pub mod error;

// Re-exports
pub use cache::{CacheStats, CachedDirectory};
pub use directory::{Directory, MemoryDirectory};
pub use enricher::{annotate, EnrichMode, Enricher, ResolvedRecords};
pub use error::EnrichError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
