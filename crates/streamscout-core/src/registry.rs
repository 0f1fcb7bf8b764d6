//! Scraper registry
//!
//! A static name -> scraper table the host player reads once at load
//! time. All built-in scrapers share one rate-limited HTTP client.

use std::collections::HashMap;
use std::sync::Arc;

use crate::client::{ClientConfig, HttpClient};
use crate::error::Result;
use crate::scraper::Scraper;
use crate::scrapers::{VadapavScraper, VidSrcScraper};

/// Registry name resolving to the default scraper
pub const DEFAULT_SCRAPER: &str = "DEFAULT";

/// Registry for managing the available scrapers
pub struct ScraperRegistry {
    scrapers: HashMap<String, Arc<dyn Scraper>>,
}

impl ScraperRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            scrapers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in scrapers registered.
    ///
    /// Registers `vadapav` and `vidsrcto`, with `DEFAULT` aliasing the
    /// vadapav scraper.
    ///
    /// # Errors
    /// Returns an error if the shared HTTP client cannot be created.
    pub fn with_builtin(config: ClientConfig) -> Result<Self> {
        let client = Arc::new(HttpClient::with_config(config)?);

        let vadapav: Arc<dyn Scraper> = Arc::new(VadapavScraper::new(Arc::clone(&client)));
        let vidsrc: Arc<dyn Scraper> = Arc::new(VidSrcScraper::new(client));

        let mut registry = Self::new();
        registry.register_as(DEFAULT_SCRAPER, Arc::clone(&vadapav));
        registry.register(vadapav);
        registry.register(vidsrc);
        Ok(registry)
    }

    /// Register a scraper under its own id
    pub fn register(&mut self, scraper: Arc<dyn Scraper>) {
        self.scrapers.insert(scraper.id().to_string(), scraper);
    }

    /// Register a scraper under an explicit name (aliases)
    pub fn register_as(&mut self, name: &str, scraper: Arc<dyn Scraper>) {
        self.scrapers.insert(name.to_string(), scraper);
    }

    /// Get a scraper by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Scraper>> {
        self.scrapers.get(name).cloned()
    }

    /// List all registered names, sorted for stable output
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scrapers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ScraperRegistry {
    fn default() -> Self {
        Self::new()
    }
}
