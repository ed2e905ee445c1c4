//! Application services

pub mod credentials;
pub mod locator;
pub mod resolver;

pub use credentials::{CredentialService, CredentialSources};
pub use locator::CliLocator;
pub use resolver::DeviceResolver;
