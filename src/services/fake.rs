//! In-memory stand-ins for the browser and the language model.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::error::{CrawlError, ExtractionError, SessionError};

use super::{BrowserSession, ChatCompletion, Locator, SessionLauncher};

#[derive(Default)]
pub struct FakeBrowser {
    pub present: HashSet<Locator>,
    pub pages: HashMap<String, String>,
    pub broken_pages: HashSet<String>,
    pub url_after_submit: String,
    pub current_url: String,
    pub visited: Vec<String>,
    pub typed: Vec<(Locator, String)>,
    pub clicked: Vec<Locator>,
    pub quit_calls: usize,
}

/// A scripted browser. Clones share state so tests can inspect it after the
/// crawler consumed its session.
#[derive(Clone, Default)]
pub struct FakeSession {
    pub state: Arc<Mutex<FakeBrowser>>,
}

impl FakeSession {
    /// A session whose login form is complete and whose submit lands on the feed.
    pub fn with_login_form() -> Self {
        let session = FakeSession::default();
        {
            let mut state = session.state.lock().unwrap();
            state.present.insert(Locator::id("username"));
            state.present.insert(Locator::id("password"));
            state.present.insert(Locator::css("button[type='submit']"));
            state.url_after_submit = "https://www.linkedin.com/feed/".to_string();
        }
        session
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_broken_page(self, url: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .broken_pages
            .insert(url.to_string());
        self
    }

    pub fn browser(&self) -> std::sync::MutexGuard<'_, FakeBrowser> {
        self.state.lock().unwrap()
    }

    fn require(&self, locator: &Locator) -> Result<(), SessionError> {
        match self.browser().present.contains(locator) {
            true => Ok(()),
            false => Err(SessionError::ElementNotFound(locator.to_string())),
        }
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn goto(&mut self, url: &str) -> Result<(), SessionError> {
        let mut state = self.browser();
        state.visited.push(url.to_string());
        if state.broken_pages.contains(url) {
            return Err(SessionError::ElementNotFound(format!(
                "net::ERR_CONNECTION_RESET at {}",
                url
            )));
        }
        state.current_url = url.to_string();
        Ok(())
    }

    async fn wait_for(&mut self, locator: &Locator, _: Duration) -> Result<(), SessionError> {
        self.require(locator)
    }

    async fn exists(&mut self, locator: &Locator) -> Result<bool, SessionError> {
        Ok(self.browser().present.contains(locator))
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<(), SessionError> {
        self.require(locator)?;
        self.browser()
            .typed
            .push((locator.clone(), text.to_string()));
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), SessionError> {
        self.require(locator)?;
        let mut state = self.browser();
        state.clicked.push(locator.clone());
        state.current_url = state.url_after_submit.clone();
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, SessionError> {
        Ok(self.browser().current_url.clone())
    }

    async fn page_source(&mut self) -> Result<String, SessionError> {
        let state = self.browser();
        Ok(state
            .pages
            .get(&state.current_url)
            .cloned()
            .unwrap_or_default())
    }

    async fn quit(&mut self) -> Result<(), SessionError> {
        self.browser().quit_calls += 1;
        Ok(())
    }
}

pub struct FakeLauncher {
    pub session: FakeSession,
    pub fail: bool,
    pub launches: AtomicUsize,
}

impl FakeLauncher {
    pub fn new(session: FakeSession) -> Self {
        FakeLauncher {
            session,
            fail: false,
            launches: AtomicUsize::new(0),
        }
    }

    pub fn broken() -> Self {
        FakeLauncher {
            fail: true,
            ..FakeLauncher::new(FakeSession::default())
        }
    }

    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    type Session = FakeSession;

    async fn launch(&self) -> Result<FakeSession, CrawlError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        match self.fail {
            true => Err(CrawlError::DriverInitialization(
                "Firefox at http://localhost:4444: connection refused".to_string(),
            )),
            false => Ok(self.session.clone()),
        }
    }
}

/// Replies with queued answers, in order, and remembers every prompt.
#[derive(Default)]
pub struct FakeCompletion {
    pub replies: Mutex<VecDeque<Result<String, String>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeCompletion {
    pub fn replying(replies: &[&str]) -> Self {
        let completion = FakeCompletion::default();
        completion
            .replies
            .lock()
            .unwrap()
            .extend(replies.iter().map(|r| Ok(r.to_string())));
        completion
    }

    pub fn failing(message: &str) -> Self {
        let completion = FakeCompletion::default();
        completion
            .replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        completion
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatCompletion for FakeCompletion {
    async fn complete(
        &self,
        _model: &str,
        _instructions: &str,
        prompt: &str,
    ) -> Result<String, ExtractionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ExtractionError::Completion(message)),
            None => Err(ExtractionError::Completion("no reply queued".to_string())),
        }
    }
}
