//! Tofu: dynamically-typed value cells and the containers built on them.
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`tofu_value`] | [`TofuValue`], [`Kind`] registry, [`TofuError`], seeded hashing |
//! | [`tofu_skiplist`] | [`SkipList`], an ordered set of cells |
//! | [`tofu_trie`] | [`Trie`], a string-keyed prefix tree of cells |
//! | [`tofu_bloom`] | [`BloomFilter`], a fixed-capacity membership filter |
//!
//! Every container owns its cells outright; nothing is shared between
//! containers and no operation blocks.

use std::sync::Once;

pub use tofu_bloom::BloomFilter;
pub use tofu_skiplist::{SkipList, SkipListConfig};
pub use tofu_trie::Trie;
pub use tofu_value::{
    hash64, hash64_seed, Attribute, Kind, Mutability, TofuError, TofuResult, TofuValue,
};

static TRACING_INIT: Once = Once::new();

/// Name of the variable holding the log filter, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "TOFU_LOG";

/// Install a `tracing` subscriber for the tofu crates.
///
/// The filter directives come from `TOFU_LOG`, or `RUST_LOG` when that is
/// unset. With neither set nothing is installed. Safe to call repeatedly.
///
/// ```bash
/// TOFU_LOG=tofu_skiplist=trace cargo test
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = log_directives() else {
            return;
        };
        let filter = EnvFilter::new(directives);
        // Another subscriber may already be installed by the host.
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init()
            .is_ok();
        tracing::debug!(installed, "tofu tracing initialised");
    });
}

fn log_directives() -> Option<String> {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
}
