/*! Integration tests for Doable.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - ordering: Tests for the ordering engine (append index, reorder
 *   validation, delete policies)
 * - service: Tests for the ListService operations and their invariants
 * - store: Tests for the ListStore trait and the InMemory backend
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("doable=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod store;
