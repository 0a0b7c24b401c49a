use crate::office::OfficeSource;

#[derive(Clone)]
pub struct AppConfig {
    pub mapbox_token: String,
    pub office: OfficeSource,
    pub region_lookup: bool,
    pub request_timeout_secs: u64,
    pub max_concurrent_rows: usize,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("mapbox_token", &"[redacted]")
            .field("office", &self.office)
            .field("region_lookup", &self.region_lookup)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_concurrent_rows", &self.max_concurrent_rows)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
