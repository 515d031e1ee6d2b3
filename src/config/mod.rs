//! Configuration and settings management.
//!
//! Settings are stored in the user's config directory as JSON, with
//! environment variables overriding individual values at load time.

mod settings;

pub use settings::{AiSettings, ExtractionSettings, MailSettings, Settings};
