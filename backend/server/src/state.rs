use std::sync::Arc;

use super::{bounties::BountyClient, config::Config, error::AppError};

pub struct AppState {
    pub config: Config,
    pub bounties: BountyClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let bounties = BountyClient::new(&config)?;

        Ok(Arc::new(Self { config, bounties }))
    }
}
