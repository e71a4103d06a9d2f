//! Test doubles shared by the integration tests.

pub mod mock_content_source;
pub mod mock_provider;

#[allow(unused_imports)]
pub use mock_content_source::MockContentSource;
#[allow(unused_imports)]
pub use mock_provider::{MockOutcome, MockProvider};
