/*! Integration tests for Amity.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - storage: Tests for the Adapter trait, the InMemory adapter, and file snapshots
 * - directory: Tests for user CRUD, shallow merges, and search
 * - session: Tests for register/login/logout, session restore, and route policies
 * - graph: Tests for friend-list operations
 * - feed: Tests for posting and feed aggregation
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("amity=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod directory;
mod feed;
mod storage;
