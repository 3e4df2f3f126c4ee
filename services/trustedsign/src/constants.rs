// Env values used by the trustedsign client.
pub const TRUSTEDSIGN_APP_KEY: &str = "TRUSTEDSIGN_APP_KEY";
pub const TRUSTEDSIGN_APP_SECRET: &str = "TRUSTEDSIGN_APP_SECRET";
pub const TRUSTEDSIGN_HOST: &str = "TRUSTEDSIGN_HOST";

// Authentication headers, wire names must not change.
pub const APP_KEY: &str = "App-Key";
pub const NONCE: &str = "Nonce";
pub const TIMESTAMP: &str = "Timestamp";
pub const SIGNATURE: &str = "Signature";

pub const CONTENT_TYPE: &str = "Content-Type";

// Content types produced by the body encoder.
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_MULTIPART: &str = "multipart/form-data";
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

pub const DEFAULT_HOST: &str = "api.trustedsign.com/app";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 120;
