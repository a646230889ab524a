/*! Integration tests for sitebuilder.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * - accounts: signup, login and the administrator bootstrap
 * - domains: registration, ownership and suggestions
 * - editing: editor sessions, drafts and publishing
 * - persistence: the JSON store file across restarts
 * - scenario: whole user journeys from signup to visit
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sitebuilder=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod accounts;
mod domains;
mod editing;
mod helpers;
mod persistence;
mod scenario;
