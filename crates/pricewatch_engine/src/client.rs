use std::sync::Arc;
use std::time::Duration;

use pricewatch_logging::{watch_debug, watch_warn};
use reqwest::cookie::{CookieStore, Jar};
use url::Url;

use crate::wire::{ScheduleForm, ScheduleResponse};
use crate::{FailureKind, FetchError, TaskRequest};

/// Django's anti-forgery cookie and the header it has to be echoed in.
pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const DEFAULT_SCHEDULE_PATH: &str = "/get-celery-task-schedule/";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin of the dashboard page, e.g. `https://dashboard.example.org/`.
    pub base_url: String,
    /// Endpoint path, resolved against `base_url`.
    pub schedule_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Cookies the browser session would carry (session id, csrftoken).
    pub cookies: Vec<(String, String)>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            schedule_path: DEFAULT_SCHEDULE_PATH.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            cookies: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
pub trait ScheduleClient: Send + Sync {
    async fn fetch_schedule(&self, task: &TaskRequest) -> Result<ScheduleResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestScheduleClient {
    client: reqwest::Client,
    jar: Arc<Jar>,
    page_origin: Url,
    endpoint: Url,
}

impl ReqwestScheduleClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let page_origin = Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let endpoint = page_origin
            .join(&settings.schedule_path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let jar = Arc::new(Jar::default());
        for (name, value) in &settings.cookies {
            jar.add_cookie_str(&format!("{name}={value}"), &page_origin);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_provider(jar.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            jar,
            page_origin,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Token to echo in [`CSRF_HEADER`], if the request needs one.
    ///
    /// POST is never a CSRF-safe method, so only the origin check remains:
    /// the token is not leaked to endpoints on another origin.
    fn csrf_token(&self) -> Option<String> {
        if self.endpoint.origin() != self.page_origin.origin() {
            return None;
        }
        let header = self.jar.cookies(&self.page_origin)?;
        let cookies = header.to_str().ok()?;
        cookie_value(cookies, CSRF_COOKIE)
    }
}

#[async_trait::async_trait]
impl ScheduleClient for ReqwestScheduleClient {
    async fn fetch_schedule(&self, task: &TaskRequest) -> Result<ScheduleResponse, FetchError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .form(&ScheduleForm::from(task));
        match self.csrf_token() {
            Some(token) => request = request.header(CSRF_HEADER, token),
            None => watch_debug!("No {} cookie for {}", CSRF_COOKIE, self.endpoint),
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            watch_warn!("Schedule endpoint {} answered {}", self.endpoint, status);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<ScheduleResponse>()
            .await
            .map_err(map_reqwest_error)
    }
}

/// Look up `name` in a `Cookie` header value (`a=1; b=2`).
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
