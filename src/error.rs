use thiserror::Error;

/// Failures of a single browser session call.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("WebDriver call failed: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("Could not find element: {0}")]
    ElementNotFound(String),

    #[error("Browser session is already closed")]
    Closed,
}

#[derive(Error, Debug)]
pub enum AuthenticationError {
    #[error("Login form element missing: {0}")]
    MissingElement(#[source] SessionError),

    #[error("Login failed - still on login page or checkpoint ({0})")]
    Rejected(String),

    #[error("Login failed: {0}")]
    Session(#[from] SessionError),
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Profile content is empty")]
    EmptyPage,

    #[error("Failed to parse profile data")]
    NoJsonObject,

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Completion(String),
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid LinkedIn profile URLs provided")]
    InvalidProfiles,

    #[error("Could not initialize any WebDriver: {0}")]
    DriverInitialization(String),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error("Could not load profile page: {0}")]
    Fetch(#[from] SessionError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode CSV row: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Missing LinkedIn credentials")]
    Missing,

    #[error("Could not read credentials from the terminal: {0}")]
    Prompt(#[from] std::io::Error),
}
