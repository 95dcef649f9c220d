/*! Integration tests for reorder.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - position: Tests for key allocation and rebalancing
 * - diff: Tests for edit scripts between sequences
 * - collection: Tests for set_order, snapshots and configuration
 * - backend: Tests for the InMemory context
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("reorder=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod backend;
mod collection;
mod diff;
mod position;
