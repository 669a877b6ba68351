//! Itinerary generation pipeline
//!
//! trip request → duration → prompt → (cache) → model → normalizer

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::RngExt;
use tracing::{debug, info, instrument, warn};

use crate::cache::PersistentCache;
use crate::config::TravelAiConfig;
use crate::duration::TripDuration;
use crate::itinerary::{ItineraryNormalizer, build_itinerary_prompt};
use crate::llm::LlmClient;
use crate::models::{GeneratedItinerary, TripRequest};
use crate::{Result, TravelAiError};

/// Settings the planner needs from the application config
#[derive(Debug, Clone)]
pub struct PlannerSettings {
    pub currency_symbol: String,
    /// Model name, part of the cache key
    pub model: String,
    pub cache_ttl: Duration,
}

impl From<&TravelAiConfig> for PlannerSettings {
    fn from(config: &TravelAiConfig) -> Self {
        Self {
            currency_symbol: config.defaults.currency_symbol.clone(),
            model: config.llm.effective_model().to_string(),
            cache_ttl: Duration::from_secs(u64::from(config.cache.ttl_hours) * 3600),
        }
    }
}

pub struct ItineraryPlanner {
    client: Arc<dyn LlmClient>,
    cache: Option<PersistentCache>,
    normalizer: ItineraryNormalizer,
    settings: PlannerSettings,
}

impl ItineraryPlanner {
    #[must_use]
    pub fn new(
        client: Arc<dyn LlmClient>,
        cache: Option<PersistentCache>,
        settings: PlannerSettings,
    ) -> Self {
        let mut normalizer = ItineraryNormalizer::new();
        if let Some(marker) = settings.currency_symbol.chars().next() {
            normalizer = normalizer.with_currency_marker(marker);
        }
        Self {
            client,
            cache,
            normalizer,
            settings,
        }
    }

    /// Generate (or fetch from cache) a normalized itinerary for `request`
    #[instrument(skip(self, request), fields(location = %request.location))]
    pub async fn plan(&self, request: &TripRequest) -> Result<GeneratedItinerary> {
        request.validate()?;

        let duration =
            TripDuration::from_dates(request.start_date.as_deref(), request.end_date.as_deref());
        debug!(
            "Trip spans {} day(s), requesting {}",
            duration.diff_days, duration.total_days
        );

        let key = self.cache_key(request, duration.total_days);
        if let Some(cached) = self.cached(&key).await {
            info!("Serving itinerary for '{}' from cache", request.location);
            return Ok(cached);
        }

        let prompt =
            build_itinerary_prompt(request, duration.total_days, &self.settings.currency_symbol);
        let raw = self.client.generate(&prompt).await?;

        let mut itinerary = self.normalizer.normalize(&raw);
        let limit = duration.total_days as usize;
        if itinerary.days.len() > limit {
            warn!(
                "Model returned {} day sections, keeping the first {}",
                itinerary.days.len(),
                limit
            );
            itinerary.days.truncate(limit);
        }
        if itinerary.is_empty() {
            warn!("Model response for '{}' contained no itinerary", request.location);
        }

        let generated = GeneratedItinerary {
            request: request.clone(),
            diff_days: duration.diff_days,
            total_days: duration.total_days,
            provider: self.client.provider(),
            itinerary,
            cached: false,
            generated_at: Utc::now(),
        };

        // Empty results are not worth keeping; the next attempt should regenerate.
        if !generated.itinerary.is_empty() {
            self.store(&key, &generated).await;
        }

        info!(
            "Generated {} day(s) with {} activities for '{}'",
            generated.itinerary.days.len(),
            generated.itinerary.activity_count(),
            request.location
        );
        Ok(generated)
    }

    /// Results differ per provider, model and currency, so all of them key the cache
    fn cache_key(&self, request: &TripRequest, total_days: u32) -> String {
        format!(
            "{}:{}:{}:{}",
            request.cache_key(total_days),
            self.client.provider(),
            self.settings.model,
            self.settings.currency_symbol
        )
    }

    async fn cached(&self, key: &str) -> Option<GeneratedItinerary> {
        let cache = self.cache.as_ref()?;
        match cache.get::<GeneratedItinerary>(key).await {
            Ok(Some(mut hit)) => {
                hit.cached = true;
                Some(hit)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Itinerary cache lookup failed: {e:#}");
                None
            }
        }
    }

    async fn store(&self, key: &str, generated: &GeneratedItinerary) {
        let Some(cache) = &self.cache else {
            return;
        };
        let jitter: f64 = rand::rng().random_range(0.9..1.1);
        let ttl = self.settings.cache_ttl.mul_f64(jitter);
        if let Err(e) = cache.put(key, generated.clone(), ttl).await {
            warn!("{}", TravelAiError::cache(format!("{e:#}")));
        }
    }
}
