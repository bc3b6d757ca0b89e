/// Scoped HTTP session
///
/// One session is opened per report run and handed to the fetch source.
/// Dropping it releases the connection pool; the drop is logged so every
/// exit path of a run is visible with `--debug-api`.
use crate::config::RugcheckConfig;
use crate::errors::FetchError;
use crate::logger::{self, LogTag};
use once_cell::sync::Lazy;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Ids of sessions that have been opened and not yet dropped
static OPEN_SESSIONS: Lazy<Mutex<HashSet<u64>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// True while the session with `id` is alive
pub fn is_session_open(id: u64) -> bool {
    match OPEN_SESSIONS.lock() {
        Ok(open) => open.contains(&id),
        Err(poisoned) => poisoned.into_inner().contains(&id),
    }
}

/// Number of sessions currently alive in this process
pub fn open_session_count() -> usize {
    match OPEN_SESSIONS.lock() {
        Ok(open) => open.len(),
        Err(poisoned) => poisoned.into_inner().len(),
    }
}

fn set_session_open(id: u64, open: bool) {
    let mut guard = match OPEN_SESSIONS.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if open {
        guard.insert(id);
    } else {
        guard.remove(&id);
    }
}

pub struct HttpSession {
    id: u64,
    client: Client,
    opened_at: Instant,
    requests: AtomicU32,
}

impl HttpSession {
    pub fn open(config: &RugcheckConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Session(e.to_string()))?;

        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        set_session_open(id, true);
        logger::debug(
            LogTag::Api,
            &format!(
                "HTTP session #{} opened (timeout {}s)",
                id,
                config.timeout_secs.max(1)
            ),
        );

        Ok(Self {
            id,
            client,
            opened_at: Instant::now(),
            requests: AtomicU32::new(0),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Count an outbound request made through this session
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_count(&self) -> u32 {
        self.requests.load(Ordering::Relaxed)
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        set_session_open(self.id, false);
        logger::debug(
            LogTag::Api,
            &format!(
                "HTTP session #{} closed after {} request(s) in {}ms",
                self.id,
                self.request_count(),
                self.opened_at.elapsed().as_millis()
            ),
        );
    }
}
