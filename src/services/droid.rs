use std::{fmt, time::Duration};

use async_trait::async_trait;
use thirtyfour::{prelude::*, ChromiumLikeCapabilities};

use crate::{
    configuration::{Browser, DriverEngine},
    error::{CrawlError, SessionError},
};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Id(String),
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn id(id: &str) -> Self {
        Locator::Id(id.to_string())
    }

    pub fn css(selector: &str) -> Self {
        Locator::Css(selector.to_string())
    }

    pub fn xpath(path: &str) -> Self {
        Locator::XPath(path.to_string())
    }

    fn by(&self) -> By {
        match self {
            Locator::Id(id) => By::Id(id.as_str()),
            Locator::Css(selector) => By::Css(selector.as_str()),
            Locator::XPath(path) => By::XPath(path.as_str()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::Css(selector) => write!(f, "css `{}`", selector),
            Locator::XPath(path) => write!(f, "xpath `{}`", path),
        }
    }
}

/// The browser operations the crawler needs from one logged-in session.
#[async_trait]
pub trait BrowserSession: Send {
    async fn goto(&mut self, url: &str) -> Result<(), SessionError>;

    /// Blocks until `locator` is present or `timeout` elapses.
    async fn wait_for(&mut self, locator: &Locator, timeout: Duration)
        -> Result<(), SessionError>;

    async fn exists(&mut self, locator: &Locator) -> Result<bool, SessionError>;

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<(), SessionError>;

    async fn click(&mut self, locator: &Locator) -> Result<(), SessionError>;

    async fn current_url(&mut self) -> Result<String, SessionError>;

    async fn page_source(&mut self) -> Result<String, SessionError>;

    /// Ends the session. Calling it twice is a no-op.
    async fn quit(&mut self) -> Result<(), SessionError>;
}

#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self) -> Result<Self::Session, CrawlError>;
}

pub struct Droid {
    driver: Option<WebDriver>,
}

impl Droid {
    pub async fn new(engine: &DriverEngine) -> Result<Self, SessionError> {
        let driver = match engine.browser {
            Browser::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if engine.headless {
                    caps.set_headless()?;
                }
                WebDriver::new(engine.server_url.as_str(), caps).await?
            }
            Browser::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if engine.headless {
                    caps.set_headless()?;
                }
                caps.add_arg("--no-sandbox")?;
                caps.add_arg("--disable-dev-shm-usage")?;
                caps.add_arg("--disable-gpu")?;
                WebDriver::new(engine.server_url.as_str(), caps).await?
            }
        };
        if let Err(e) = driver.maximize_window().await {
            log::warn!("Could not maximize browser window: {:?}", e);
        }

        Ok(Droid {
            driver: Some(driver),
        })
    }

    fn driver(&self) -> Result<&WebDriver, SessionError> {
        self.driver
            .as_ref()
            .ok_or(SessionError::Closed)
    }
}

#[async_trait]
impl BrowserSession for Droid {
    async fn goto(&mut self, url: &str) -> Result<(), SessionError> {
        self.driver()?.goto(url).await?;
        Ok(())
    }

    async fn wait_for(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), SessionError> {
        self.driver()?
            .query(locator.by())
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await
            .map_err(|e| {
                log::warn!("Timed out waiting for {}: {:?}", locator, e);
                SessionError::ElementNotFound(locator.to_string())
            })?;
        Ok(())
    }

    async fn exists(&mut self, locator: &Locator) -> Result<bool, SessionError> {
        let elements = self.driver()?.find_all(locator.by()).await?;
        Ok(!elements.is_empty())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<(), SessionError> {
        let element = self.driver()?.find(locator.by()).await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), SessionError> {
        let element = self.driver()?.find(locator.by()).await?;
        element.click().await?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, SessionError> {
        let url = self.driver()?.current_url().await?;
        Ok(url.to_string())
    }

    async fn page_source(&mut self) -> Result<String, SessionError> {
        Ok(self.driver()?.source().await?)
    }

    async fn quit(&mut self) -> Result<(), SessionError> {
        if let Some(driver) = self.driver.take() {
            driver.quit().await?;
        }
        Ok(())
    }
}

/// Opens a [`Droid`] on the first engine that starts.
pub struct DroidLauncher {
    engines: Vec<DriverEngine>,
}

impl DroidLauncher {
    pub fn new(engines: Vec<DriverEngine>) -> Self {
        DroidLauncher { engines }
    }
}

#[async_trait]
impl SessionLauncher for DroidLauncher {
    type Session = Droid;

    async fn launch(&self) -> Result<Droid, CrawlError> {
        let mut failures = vec![];

        for engine in self.engines.iter() {
            log::info!(
                "Starting {:?} session on {}",
                engine.browser,
                engine.server_url
            );
            match Droid::new(engine).await {
                Ok(droid) => return Ok(droid),
                Err(e) => {
                    log::warn!("{:?} driver failed: {}", engine.browser, e);
                    failures.push(format!("{:?} at {}: {}", engine.browser, engine.server_url, e));
                }
            }
        }

        if failures.is_empty() {
            failures.push("no WebDriver engines configured".to_string());
        }
        log::error!("Could not initialize any WebDriver");
        Err(CrawlError::DriverInitialization(failures.join("; ")))
    }
}
