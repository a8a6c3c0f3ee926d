// New-technology submissions: validated here, forwarded as GitHub issues
// on the catalog repository for maintainers to review.

pub mod handlers;
pub mod relay;

pub use relay::SubmissionRelay;
