mod credentials;

pub use credentials::CredentialManager;
pub use credentials::RENEWAL_INTERVAL;
pub use credentials::RETRY_INTERVAL;
pub use credentials::RenewalSchedule;
pub use credentials::TOKEN_REQUEST_TIMEOUT;
