// Default URLs
pub static DEFAULT_PRODUCTION_URL: &str = "https://api.starkbank.com";
pub static DEFAULT_SANDBOX_URL: &str = "https://sandbox.api.starkbank.com";
pub static API_VERSION: &str = "v2";

// Header names
pub static ACCESS_ID_HEADER: &str = "Access-Id";
pub static ACCESS_TIME_HEADER: &str = "Access-Time";
pub static ACCESS_SIGNATURE_HEADER: &str = "Access-Signature";
pub static DIGITAL_SIGNATURE_HEADER: &str = "Digital-Signature";

pub static DEFAULT_LANGUAGE: &str = "en-US";

/// Largest page the server hands out in a single list request.
pub const MAX_PAGE_SIZE: usize = 100;
