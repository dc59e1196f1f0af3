pub mod batch;
pub mod profile;
pub mod profile_url;
