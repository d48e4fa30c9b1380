//! # Bounty Fetcher
//!
//! Reads the open bounty listing from the upstream API.
//!
//! - One `GET {api}/bounties` per call, no caching and no retries
//! - Records are schema checked on decode, a record missing a field fails the whole fetch
//! - Status filtering happens here, upstream order is preserved
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{config::Config, error::AppError};

pub const OPEN: &str = "open";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Bounty {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward: String,
    pub tags: Vec<String>,
    pub status: String,
}

#[derive(Clone)]
pub struct BountyClient {
    client: Client,
    endpoint: String,
}

impl BountyClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/bounties", config.bounty_api),
        })
    }

    pub async fn fetch_bounties(&self, status: &str) -> Result<Vec<Bounty>, AppError> {
        let bytes = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let bounties = parse_bounties(&bytes, status)?;
        debug!(status, count = bounties.len(), "fetched bounties");

        Ok(bounties)
    }

    pub async fn fetch_open(&self) -> Result<Vec<Bounty>, AppError> {
        self.fetch_bounties(OPEN).await
    }
}

pub fn parse_bounties(bytes: &[u8], status: &str) -> Result<Vec<Bounty>, AppError> {
    let bounties: Vec<Bounty> = serde_json::from_slice(bytes)?;

    Ok(bounties.into_iter().filter(|b| b.status == status).collect())
}
