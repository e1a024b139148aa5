//! Breed directory service: fetch, normalize, filter, paginate, enrich.

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use petdex_breed_client::{BreedApiClient, ImageSearchQuery};
use petdex_models::{paginate, BreedFilter, BreedRecord, ImageRecord, Page, Species};

use crate::error::{ApiError, ApiResult};

/// How a breed listing gets its image URLs.
///
/// Both strategies existed as revisions of the upstream service; they stay
/// selectable instead of merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageEnrichment {
    /// Deterministic: fetch the breed's reference image
    #[default]
    Reference,
    /// One random hit from the image search endpoint per breed
    RandomSearch,
}

impl FromStr for ImageEnrichment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(Self::Reference),
            "random" => Ok(Self::RandomSearch),
            other => Err(format!("unknown enrichment strategy: {}", other)),
        }
    }
}

/// TTL cache for the normalized bulk breed list.
///
/// Injected per service rather than held as process-global state, bounded
/// by a TTL, and safe under concurrent handlers.
pub struct BreedCache {
    ttl: Duration,
    slot: RwLock<Option<CachedList>>,
}

struct CachedList {
    fetched_at: Instant,
    breeds: Vec<BreedRecord>,
}

impl BreedCache {
    /// A TTL of zero disables the cache entirely.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached list if present and fresh.
    pub async fn get(&self) -> Option<Vec<BreedRecord>> {
        if self.ttl.is_zero() {
            return None;
        }

        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.breeds.clone())
    }

    pub async fn store(&self, breeds: Vec<BreedRecord>) {
        if self.ttl.is_zero() {
            return;
        }

        let mut slot = self.slot.write().await;
        *slot = Some(CachedList {
            fetched_at: Instant::now(),
            breeds,
        });
    }

    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}

/// Read operations over one upstream breed directory.
#[derive(Clone)]
pub struct BreedDirectoryService {
    species: Species,
    client: Arc<BreedApiClient>,
    cache: Arc<BreedCache>,
    enrichment: ImageEnrichment,
}

impl BreedDirectoryService {
    pub fn new(
        species: Species,
        client: Arc<BreedApiClient>,
        cache: Arc<BreedCache>,
        enrichment: ImageEnrichment,
    ) -> Self {
        Self {
            species,
            client,
            cache,
            enrichment,
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    /// Fetch and normalize the full breed list.
    ///
    /// An upstream failure is logged and yields an empty list; this path
    /// never errors.
    pub async fn all_breeds(&self) -> Vec<BreedRecord> {
        match self.client.list_breeds().await {
            Ok(raw) => raw
                .iter()
                .map(|breed| BreedRecord::from_raw(self.species, breed, self.client.cdn_base()))
                .collect(),
            Err(e) => {
                warn!("Failed to fetch {} breeds: {}", self.species.as_str(), e);
                Vec::new()
            }
        }
    }

    /// Cached variant of [`Self::all_breeds`] used by the paged listing.
    async fn all_breeds_cached(&self) -> Vec<BreedRecord> {
        if let Some(breeds) = self.cache.get().await {
            debug!("Using cached {} breed list", self.species.as_str());
            return breeds;
        }

        let breeds = self.all_breeds().await;
        if !breeds.is_empty() {
            self.cache.store(breeds.clone()).await;
        }
        breeds
    }

    /// Full list with per-breed image enrichment.
    ///
    /// A failed image fetch empties that one breed's `image_url` and the
    /// loop moves on.
    pub async fn breeds_with_images(&self) -> Vec<BreedRecord> {
        let mut breeds = self.all_breeds().await;
        for breed in &mut breeds {
            let url = self.enriched_image_url(breed).await.unwrap_or_default();
            breed.image_url = url;
        }
        breeds
    }

    /// Filtered view of the full list.
    pub async fn filter_breeds(&self, filter: &BreedFilter) -> Vec<BreedRecord> {
        filter.apply(&self.all_breeds().await)
    }

    /// One breed by upstream id. `None` covers both an upstream failure
    /// and a payload that normalized to an empty id.
    pub async fn breed_by_id(&self, breed_id: &str) -> Option<BreedRecord> {
        match self.client.get_breed(breed_id).await {
            Ok(raw) => {
                let breed = BreedRecord::from_raw(self.species, &raw, self.client.cdn_base());
                (!breed.id.is_empty()).then_some(breed)
            }
            Err(e) => {
                warn!(
                    "Failed to fetch {} breed {}: {}",
                    self.species.as_str(),
                    breed_id,
                    e
                );
                None
            }
        }
    }

    /// One random image with breed metadata.
    pub async fn random_image(&self) -> Option<ImageRecord> {
        let query = ImageSearchQuery {
            breed_id: None,
            limit: 1,
        };

        match self.client.search_images(&query).await {
            Ok(images) => images.into_iter().next(),
            Err(e) => {
                warn!(
                    "Failed to fetch random {} image: {}",
                    self.species.as_str(),
                    e
                );
                None
            }
        }
    }

    /// Up to `limit` images of one breed, picked from an oversampled
    /// search so repeated calls vary. Failure yields an empty list.
    pub async fn images_for_breed(&self, breed_id: &str, limit: usize) -> Vec<ImageRecord> {
        let query = ImageSearchQuery {
            breed_id: Some(breed_id.to_string()),
            limit: (limit * 2) as u32,
        };

        match self.client.search_images(&query).await {
            Ok(mut images) => {
                if images.len() <= limit {
                    return images;
                }
                images.shuffle(&mut rand::thread_rng());
                images.truncate(limit);
                images
            }
            Err(e) => {
                warn!(
                    "Failed to fetch images for {} breed {}: {}",
                    self.species.as_str(),
                    breed_id,
                    e
                );
                Vec::new()
            }
        }
    }

    /// One page of breeds, enriched after pagination so only the visible
    /// page costs image requests.
    ///
    /// A breed whose image fetch fails is dropped from the page; an
    /// entirely empty result is an error the surface reports as 500.
    pub async fn paged_breeds_with_images(
        &self,
        limit: Option<usize>,
        page: usize,
    ) -> ApiResult<Page<BreedRecord>> {
        let breeds = self.all_breeds_cached().await;
        let mut paged = paginate(&breeds, limit, page);

        let mut enriched = Vec::with_capacity(paged.items.len());
        for mut breed in paged.items {
            match self.enriched_image_url(&breed).await {
                Some(url) => {
                    breed.image_url = url;
                    enriched.push(breed);
                }
                None => {
                    warn!(
                        "Skipping {} breed {}: image enrichment failed",
                        self.species.as_str(),
                        breed.id
                    );
                }
            }
        }

        if enriched.is_empty() {
            return Err(ApiError::upstream(format!(
                "No {} breeds could be enriched with images",
                self.species.as_str()
            )));
        }

        paged.items = enriched;
        Ok(paged)
    }

    /// Resolve one breed's image URL via the configured strategy.
    ///
    /// `None` means the upstream call failed; `Some("")` means it worked
    /// but there was nothing to attach. Callers decide whether that
    /// distinction drops the breed or just empties its image.
    async fn enriched_image_url(&self, breed: &BreedRecord) -> Option<String> {
        match self.enrichment {
            ImageEnrichment::Reference => {
                if breed.reference_image_id.is_empty() {
                    return Some(String::new());
                }
                match self.client.get_image(&breed.reference_image_id).await {
                    Ok(image) => Some(image.url),
                    Err(e) => {
                        warn!(
                            "Reference image fetch failed for {} breed {}: {}",
                            self.species.as_str(),
                            breed.id,
                            e
                        );
                        None
                    }
                }
            }
            ImageEnrichment::RandomSearch => {
                let query = ImageSearchQuery {
                    breed_id: Some(breed.id.clone()),
                    limit: 1,
                };
                match self.client.search_images(&query).await {
                    Ok(images) => Some(
                        images
                            .into_iter()
                            .next()
                            .map(|image| image.url)
                            .unwrap_or_default(),
                    ),
                    Err(e) => {
                        warn!(
                            "Image search failed for {} breed {}: {}",
                            self.species.as_str(),
                            breed.id,
                            e
                        );
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrichment_strategy_parses_from_env_values() {
        assert_eq!(
            "reference".parse::<ImageEnrichment>().unwrap(),
            ImageEnrichment::Reference
        );
        assert_eq!(
            "RANDOM".parse::<ImageEnrichment>().unwrap(),
            ImageEnrichment::RandomSearch
        );
        assert!("shuffled".parse::<ImageEnrichment>().is_err());
    }

    #[tokio::test]
    async fn cache_returns_stored_list_while_fresh() {
        let cache = BreedCache::new(Duration::from_secs(60));
        assert!(cache.get().await.is_none());

        cache.store(vec![BreedRecord::default()]).await;
        assert_eq!(cache.get().await.unwrap().len(), 1);

        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn zero_ttl_disables_the_cache() {
        let cache = BreedCache::new(Duration::ZERO);
        cache.store(vec![BreedRecord::default()]).await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_are_not_served() {
        let cache = BreedCache::new(Duration::from_millis(10));
        cache.store(vec![BreedRecord::default()]).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get().await.is_none());
    }
}
