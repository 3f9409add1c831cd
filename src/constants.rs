use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "courier-zone-briefing/0.1.0";

/// OpenWeatherMap API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";

/// NewsAPI.ai base URL
pub const NEWS_API_BASE: &str = "https://www.newsapi.ai";

/// Per-request timeout for outbound calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default location of the briefing snapshot file
pub const DEFAULT_SNAPSHOT_PATH: &str = "last_briefing.json";

/// Default auto-refresh interval in minutes
pub const DEFAULT_REFRESH_INTERVAL_MINUTES: u32 = 15;

/// Longest accepted auto-refresh interval in minutes
pub const MAX_REFRESH_INTERVAL_MINUTES: u32 = 60;

/// Title keywords marking a headline as delivery-relevant
pub const RELEVANCE_KEYWORDS: [&str; 5] = ["traffic", "road", "accident", "protest", "closure"];

/// How many articles are inspected by the relevance filter
pub const NEWS_CANDIDATE_LIMIT: usize = 10;

/// How many headlines end up in a briefing
pub const NEWS_RESULT_LIMIT: usize = 5;

pub const NO_NEWS_TITLE: &str = "No significant news affecting deliveries at this time";
