mod privacy;

pub use privacy::{PrivacyPolicy, SuppressReason};
