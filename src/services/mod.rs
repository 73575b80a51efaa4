//! Business logic services

pub mod accounts;
pub mod catalog;
pub mod lending;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub accounts: accounts::AccountsService,
    pub catalog: catalog::CatalogService,
    pub lending: lending::LendingService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            accounts: accounts::AccountsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            lending: lending::LendingService::new(repository),
        }
    }
}
