//! Delivery-relevant headlines for a zone.
//!
//! The zone query is tried first; an empty answer triggers one fallback to
//! general national headlines. Candidates are then narrowed to titles that
//! mention traffic disruption, falling back to unfiltered headlines and
//! finally to a placeholder so the briefing always has something to show.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::constants::{
    NEWS_CANDIDATE_LIMIT, NEWS_RESULT_LIMIT, NO_NEWS_TITLE, RELEVANCE_KEYWORDS, USER_AGENT,
};
use crate::error::NewsError;
use crate::models::{Article, HeadlinesResponse, Location, NewsItem};

/// Anything that can produce a headline list for a zone
pub trait NewsSource {
    fn headlines(
        &self,
        location: &Location,
    ) -> impl Future<Output = Result<Vec<NewsItem>, NewsError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlineQuery {
    /// Top headlines in `country` mentioning `keyword`
    Zone { country: String, keyword: String },
    /// General top headlines in `country`
    General { country: String },
}

impl HeadlineQuery {
    pub fn zone(location: &Location) -> Self {
        HeadlineQuery::Zone {
            country: location.country_code().to_string(),
            keyword: location.name().to_string(),
        }
    }

    pub fn general(location: &Location) -> Self {
        HeadlineQuery::General {
            country: location.country_code().to_string(),
        }
    }
}

/// Raw answer of one headline request. `articles` is empty unless `status` is 200.
#[derive(Debug, Default)]
pub struct FeedPage {
    pub status: u16,
    pub articles: Vec<Article>,
}

/// Transport for top-headline queries
pub trait HeadlineFeed {
    fn top_headlines(
        &self,
        query: &HeadlineQuery,
    ) -> impl Future<Output = Result<FeedPage, NewsError>> + Send;
}

/// NewsAPI.ai top-headlines endpoint
#[derive(Debug, Clone)]
pub struct NewsApiFeed {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiFeed {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }
}

impl HeadlineFeed for NewsApiFeed {
    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<FeedPage, NewsError> {
        let url = format!("{}/api/top-headlines", self.base_url);
        let params: Vec<(&str, &str)> = match query {
            HeadlineQuery::Zone { country, keyword } => vec![
                ("country", country.as_str()),
                ("q", keyword.as_str()),
                ("apiKey", self.api_key.as_str()),
            ],
            HeadlineQuery::General { country } => vec![
                ("country", country.as_str()),
                ("category", "general"),
                ("apiKey", self.api_key.as_str()),
            ],
        };

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok(FeedPage {
                status: status.as_u16(),
                articles: Vec::new(),
            });
        }

        let body = response.json::<HeadlinesResponse>().await?;
        Ok(FeedPage {
            status: status.as_u16(),
            articles: body.articles,
        })
    }
}

/// Headline provider with fallback and relevance filtering over any feed
#[derive(Debug, Clone)]
pub struct NewsProvider<F> {
    feed: F,
}

impl<F: HeadlineFeed> NewsProvider<F> {
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    async fn collect_candidates(&self, location: &Location) -> Result<Option<Vec<Article>>, NewsError> {
        let primary = self.feed.top_headlines(&HeadlineQuery::zone(location)).await?;
        if primary.status != 200 {
            tracing::warn!(
                "News API answered {} for {}, showing placeholder",
                primary.status,
                location.name()
            );
            return Ok(None);
        }

        if !primary.articles.is_empty() {
            return Ok(Some(primary.articles));
        }

        tracing::debug!(
            "No headlines mention {}, falling back to general news for {}",
            location.name(),
            location.country_code()
        );
        let fallback = self
            .feed
            .top_headlines(&HeadlineQuery::general(location))
            .await?;
        if fallback.status == 200 {
            Ok(Some(fallback.articles))
        } else {
            Ok(Some(Vec::new()))
        }
    }
}

impl<F: HeadlineFeed + Sync> NewsSource for NewsProvider<F> {
    async fn headlines(&self, location: &Location) -> Result<Vec<NewsItem>, NewsError> {
        tracing::info!(
            "Fetching local news for {}, {}",
            location.name(),
            location.country_code().to_uppercase()
        );

        match self.collect_candidates(location).await {
            Ok(Some(candidates)) => Ok(select_headlines(&candidates)),
            Ok(None) => Ok(vec![no_news_item()]),
            Err(err) => {
                tracing::warn!("News lookup for {} failed: {}", location.name(), err);
                Err(err)
            }
        }
    }
}

/// Picks up to five headlines, preferring ones that mention traffic disruption
pub fn select_headlines(candidates: &[Article]) -> Vec<NewsItem> {
    let pool = &candidates[..candidates.len().min(NEWS_CANDIDATE_LIMIT)];

    let relevant: Vec<&Article> = pool.iter().filter(|article| is_relevant(article)).collect();

    let chosen: Vec<NewsItem> = if relevant.is_empty() {
        pool.iter().take(NEWS_RESULT_LIMIT).map(NewsItem::from).collect()
    } else {
        relevant
            .into_iter()
            .take(NEWS_RESULT_LIMIT)
            .map(NewsItem::from)
            .collect()
    };

    if chosen.is_empty() {
        vec![no_news_item()]
    } else {
        chosen
    }
}

fn is_relevant(article: &Article) -> bool {
    let title = article.title.as_deref().unwrap_or_default().to_lowercase();
    RELEVANCE_KEYWORDS
        .iter()
        .any(|keyword| title.contains(keyword))
}

pub fn no_news_item() -> NewsItem {
    NewsItem {
        title: NO_NEWS_TITLE.to_string(),
        url: "#".to_string(),
        source: "System".to_string(),
    }
}
