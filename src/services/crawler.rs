use chrono::Local;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    configuration::CrawlerSettings,
    domain::{
        batch::BatchState,
        profile::{ProfileRecord, LINKEDIN_URL, UPDATED_TIMESTAMP},
        profile_url::validate_profiles,
    },
    error::CrawlError,
};

use super::{
    fetch_profile_text, login, BrowserSession, Credentials, ProfileExtractor, SessionLauncher,
};

/// Runs one batch at a time: log in once, then scrape and parse every
/// profile in order.
pub struct ProfileCrawler<L, E> {
    launcher: L,
    extractor: E,
    credentials: Credentials,
    login_url: String,
    settings: CrawlerSettings,
    batch_lock: Mutex<()>,
}

impl<L: SessionLauncher, E: ProfileExtractor> ProfileCrawler<L, E> {
    pub fn new(
        launcher: L,
        extractor: E,
        credentials: Credentials,
        login_url: impl Into<String>,
        settings: CrawlerSettings,
    ) -> Self {
        ProfileCrawler {
            launcher,
            extractor,
            credentials,
            login_url: login_url.into(),
            settings,
            batch_lock: Mutex::new(()),
        }
    }

    /// One record per url, in input order. Profiles that fail are recorded
    /// as error records; only validation, driver start and login abort.
    pub async fn crawl_profiles(
        &self,
        profiles: &[String],
    ) -> Result<Vec<ProfileRecord>, CrawlError> {
        if !validate_profiles(profiles) {
            return Err(CrawlError::InvalidProfiles);
        }

        let _batch = self.batch_lock.lock().await;
        let batch_id = Uuid::new_v4();
        log::info!(
            "[{}] {} | starting batch of {} profiles",
            batch_id,
            BatchState::Idle,
            profiles.len()
        );

        let mut session = self.launcher.launch().await?;
        let outcome = self.run_batch(&mut session, profiles, batch_id).await;

        log::info!("[{}] {}", batch_id, BatchState::Closing);
        if let Err(e) = session.quit().await {
            log::error!("[{}] Failed to close browser session: {}", batch_id, e);
        }

        match outcome {
            Ok(ref results) => log::info!(
                "[{}] {} | {} profiles, {} failed",
                batch_id,
                BatchState::Done,
                results.len(),
                results.iter().filter(|r| r.is_error()).count()
            ),
            Err(ref e) => log::error!("[{}] batch aborted: {}", batch_id, e),
        }
        outcome
    }

    async fn run_batch(
        &self,
        session: &mut L::Session,
        profiles: &[String],
        batch_id: Uuid,
    ) -> Result<Vec<ProfileRecord>, CrawlError> {
        log::info!("[{}] {}", batch_id, BatchState::Authenticating);
        if let Err(e) = login(session, &self.login_url, &self.credentials, &self.settings).await {
            log::error!("[{}] {} | {}", batch_id, BatchState::AuthFailed, e);
            return Err(e.into());
        }

        let mut results = Vec::with_capacity(profiles.len());
        for url in profiles {
            let record = self.scrape_profile(session, url, batch_id).await;
            log::info!("[{}] {} | {}", batch_id, BatchState::Recording, url);
            results.push(record);

            tokio::time::sleep(self.settings.request_delay()).await;
        }

        Ok(results)
    }

    async fn scrape_profile(
        &self,
        session: &mut L::Session,
        url: &str,
        batch_id: Uuid,
    ) -> ProfileRecord {
        log::info!("[{}] {} | {}", batch_id, BatchState::Fetching, url);
        let text = match fetch_profile_text(session, url, self.settings.settle_delay()).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("[{}] Error scraping profile {}: {}", batch_id, url, e);
                return ProfileRecord::not_found(url);
            }
        };

        log::info!("[{}] {} | {}", batch_id, BatchState::Extracting, url);
        let mut record = self.extractor.extract(&text).await;
        record.insert(LINKEDIN_URL, url);
        record.insert(
            UPDATED_TIMESTAMP,
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        record
    }
}
