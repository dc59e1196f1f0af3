pub mod authenticator;
pub mod crawler;
pub mod credentials;
pub mod droid;
pub mod exporter;
pub mod openai_client;
pub mod page_fetcher;
pub mod profile_parser;

#[cfg(test)]
pub mod fake;

pub use authenticator::*;
pub use crawler::*;
pub use credentials::*;
pub use droid::*;
pub use exporter::*;
pub use openai_client::*;
pub use page_fetcher::*;
pub use profile_parser::*;
