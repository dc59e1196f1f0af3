use crate::{
    configuration::CrawlerSettings,
    error::{AuthenticationError, SessionError},
};

use super::{BrowserSession, Credentials, Locator};

const REJECTED_URL_MARKERS: [&str; 2] = ["checkpoint", "login"];

/// Submit button candidates, most specific first.
fn submit_locators() -> [Locator; 3] {
    [
        Locator::css("button[type='submit']"),
        Locator::xpath("//button[contains(@class, 'login')]"),
        Locator::css("form button"),
    ]
}

pub async fn login<S: BrowserSession + ?Sized>(
    session: &mut S,
    login_url: &str,
    credentials: &Credentials,
    settings: &CrawlerSettings,
) -> Result<(), AuthenticationError> {
    log::info!("Navigating to LinkedIn login page");
    session.goto(login_url).await?;

    let username = Locator::id("username");
    session
        .wait_for(&username, settings.login_timeout())
        .await
        .map_err(AuthenticationError::MissingElement)?;
    session
        .type_text(&username, &credentials.username)
        .await
        .map_err(AuthenticationError::MissingElement)?;
    session
        .type_text(&Locator::id("password"), &credentials.password)
        .await
        .map_err(AuthenticationError::MissingElement)?;

    let submit = find_submit(session).await?;
    session
        .click(&submit)
        .await
        .map_err(AuthenticationError::MissingElement)?;

    log::info!("Waiting for login to complete");
    tokio::time::sleep(settings.redirect_wait()).await;

    let landed_on = session.current_url().await?;
    if REJECTED_URL_MARKERS
        .iter()
        .any(|marker| landed_on.contains(marker))
    {
        log::error!("Login unsuccessful. Check credentials or verify if there's a CAPTCHA.");
        return Err(AuthenticationError::Rejected(landed_on));
    }

    log::info!("Login successful");
    Ok(())
}

async fn find_submit<S: BrowserSession + ?Sized>(
    session: &mut S,
) -> Result<Locator, AuthenticationError> {
    for locator in submit_locators() {
        if session.exists(&locator).await? {
            return Ok(locator);
        }
        log::debug!("No login button at {}", locator);
    }

    Err(AuthenticationError::MissingElement(
        SessionError::ElementNotFound("login button".to_string()),
    ))
}
