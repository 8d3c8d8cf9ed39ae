use crate::generator::{HashGenerator, Sha256Base62};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};
use zoorl_core::error::Result;
use zoorl_core::{
    compute_expiration, resolve_ttl_hours, Clock, CreateUrlHashRequest, SystemClock, UrlHash,
    UrlHashError, UrlHashRepository, UrlHashResponse, UrlShortener,
};

/// A concrete implementation of the [`UrlShortener`] trait.
///
/// This service wraps a repository, a hash generator and a clock:
/// - the generator derives the hash from the URL
/// - the clock anchors the expiration arithmetic
/// - the repository persists and looks up records
///
/// No uniqueness check is made before saving, so a colliding hash replaces
/// the earlier record. Expiration is left to the storage backend; a read
/// returns whatever the repository still holds.
pub struct UrlHashService<R, G = Sha256Base62, C = SystemClock> {
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
}

impl<R, G, C> Clone for UrlHashService<R, G, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: UrlHashRepository> UrlHashService<R> {
    /// Creates a service with the SHA-256/base 62 generator and the system clock.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(Sha256Base62),
            clock: Arc::new(SystemClock),
        }
    }
}

impl<R: UrlHashRepository, G: HashGenerator, C: Clock> UrlHashService<R, G, C> {
    /// Replaces the hash generator.
    pub fn with_generator<G2: HashGenerator>(self, generator: G2) -> UrlHashService<R, G2, C> {
        UrlHashService {
            repository: self.repository,
            generator: Arc::new(generator),
            clock: self.clock,
        }
    }

    /// Replaces the clock used to compute expirations.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> UrlHashService<R, G, C2> {
        UrlHashService {
            repository: self.repository,
            generator: self.generator,
            clock: Arc::new(clock),
        }
    }

    /// Returns a reference to the repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: UrlHashRepository, G: HashGenerator, C: Clock> UrlShortener for UrlHashService<R, G, C> {
    async fn create_hash(&self, request: CreateUrlHashRequest) -> Result<UrlHashResponse> {
        if request.url.trim().is_empty() {
            return Err(UrlHashError::InvalidInput("url is required".to_string()));
        }

        let hours = resolve_ttl_hours(request.ttl);
        let expiration = compute_expiration(self.clock.as_ref(), hours)?;

        let record = UrlHash {
            hash: self.generator.generate(&request.url),
            url: request.url,
            expiration,
        };

        if let Err(e) = self.repository.save(record.clone()).await {
            error!(hash = %record.hash, url = %record.url, error = %e, "Failed to save URL hash");
            return Err(e.into());
        }

        info!(hash = %record.hash, url = %record.url, expiration, "Created URL hash");
        Ok(record.into())
    }

    async fn read_hash(&self, hash: &str) -> Result<UrlHashResponse> {
        if hash.is_empty() {
            return Err(UrlHashError::InvalidInput("hash is required".to_string()));
        }

        let record = self.repository.get_by_hash(hash).await.map_err(|e| {
            error!(hash = %hash, error = %e, "Failed to read URL hash");
            UrlHashError::from(e)
        })?;

        match record {
            Some(record) => {
                debug!(hash = %hash, url = %record.url, "Resolved URL hash");
                Ok(record.into())
            }
            None => {
                debug!(hash = %hash, "URL hash not found");
                Err(UrlHashError::NotFound(hash.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use zoorl_core::repository::Result as StorageResult;
    use zoorl_core::{FixedClock, StorageError};
    use zoorl_storage::InMemoryRepository;

    const NOW: i64 = 1_700_000_000;

    /// Hashes every URL to the same value.
    struct ConstantGenerator(&'static str);

    impl HashGenerator for ConstantGenerator {
        fn generate(&self, _url: &str) -> String {
            self.0.to_string()
        }
    }

    /// A backend that is always down.
    struct UnavailableRepository;

    #[async_trait]
    impl UrlHashRepository for UnavailableRepository {
        async fn save(&self, _record: UrlHash) -> StorageResult<()> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn get_by_hash(&self, _hash: &str) -> StorageResult<Option<UrlHash>> {
            Err(StorageError::Timeout("no reply".to_string()))
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock::new(Timestamp::from_second(NOW).unwrap())
    }

    fn test_service() -> UrlHashService<Arc<InMemoryRepository>, Sha256Base62, FixedClock> {
        UrlHashService::new(Arc::new(InMemoryRepository::new())).with_clock(fixed_clock())
    }

    #[tokio::test]
    async fn create_with_default_ttl() {
        let service = test_service();

        let response = service
            .create_hash(CreateUrlHashRequest::new("https://example.com"))
            .await
            .unwrap();

        assert_eq!(
            response,
            UrlHashResponse {
                url_hash: "1wBqbv".to_string(),
                url: "https://example.com".to_string(),
                ttl: 1_700_086_400,
            }
        );
    }

    #[tokio::test]
    async fn create_with_explicit_ttl() {
        let service = test_service();

        for hours in [1, 48, 24 * 30] {
            let response = service
                .create_hash(CreateUrlHashRequest::new("https://example.com").with_ttl(hours))
                .await
                .unwrap();
            assert_eq!(response.ttl, NOW + hours * 3600);
        }
    }

    #[tokio::test]
    async fn create_with_zero_ttl_uses_default() {
        let service = test_service();

        let response = service
            .create_hash(CreateUrlHashRequest::new("https://example.com").with_ttl(0))
            .await
            .unwrap();
        assert_eq!(response.ttl, NOW + 24 * 3600);
    }

    /// Negative TTLs are accepted and produce an expiration in the past.
    #[tokio::test]
    async fn create_with_negative_ttl_is_not_rejected() {
        let service = test_service();

        let response = service
            .create_hash(CreateUrlHashRequest::new("https://example.com").with_ttl(-2))
            .await
            .unwrap();
        assert_eq!(response.ttl, NOW - 2 * 3600);
    }

    #[tokio::test]
    async fn create_persists_record() {
        let service = test_service();

        service
            .create_hash(CreateUrlHashRequest::new("http://www.google.com"))
            .await
            .unwrap();

        let stored = service
            .repository()
            .get_by_hash("bJd4bYF")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.url, "http://www.google.com");
        assert_eq!(stored.expiration, 1_700_086_400);
    }

    #[tokio::test]
    async fn create_rejects_empty_url() {
        let service = test_service();

        let err = service
            .create_hash(CreateUrlHashRequest::new("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, UrlHashError::InvalidInput(_)));
        assert!(service.repository().is_empty());
    }

    #[tokio::test]
    async fn create_with_overflowing_ttl_saves_nothing() {
        let service = test_service();

        let err = service
            .create_hash(CreateUrlHashRequest::new("https://example.com").with_ttl(i64::MAX))
            .await
            .unwrap_err();
        assert!(matches!(err, UrlHashError::InvalidInput(_)));
        assert!(service.repository().is_empty());
    }

    #[tokio::test]
    async fn round_trip() {
        let service = test_service();

        let created = service
            .create_hash(CreateUrlHashRequest::new("https://example.com/a").with_ttl(5))
            .await
            .unwrap();
        let read = service.read_hash(&created.url_hash).await.unwrap();

        assert_eq!(read.url, "https://example.com/a");
        assert_eq!(read.ttl, created.ttl);
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn read_is_idempotent() {
        let service = test_service();

        let created = service
            .create_hash(CreateUrlHashRequest::new("https://example.com/b"))
            .await
            .unwrap();

        let first = service.read_hash(&created.url_hash).await.unwrap();
        let second = service.read_hash(&created.url_hash).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn read_missing_hash_is_not_found() {
        let service = test_service();

        let err = service.read_hash("doesnotexist").await.unwrap_err();
        assert!(matches!(err, UrlHashError::NotFound(ref hash) if hash == "doesnotexist"));
    }

    #[tokio::test]
    async fn read_rejects_empty_hash() {
        let service = test_service();

        let err = service.read_hash("").await.unwrap_err();
        assert!(matches!(err, UrlHashError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn read_does_not_check_expiration_itself() {
        let clock = fixed_clock();
        let service = UrlHashService::new(Arc::new(InMemoryRepository::new()))
            .with_clock(clock.clone());

        let created = service
            .create_hash(CreateUrlHashRequest::new("https://example.com").with_ttl(1))
            .await
            .unwrap();

        // Past the expiration, the record is still served until the store drops it.
        clock.advance(SignedDuration::from_hours(2));
        assert!(service.read_hash(&created.url_hash).await.is_ok());

        service.repository().purge_expired(clock.now());
        let err = service.read_hash(&created.url_hash).await.unwrap_err();
        assert!(matches!(err, UrlHashError::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn purge_task_stops_serving_expired_records() {
        let clock = fixed_clock();
        let repository = Arc::new(InMemoryRepository::new());
        let task = Arc::clone(&repository)
            .spawn_purge_task(clock.clone(), std::time::Duration::from_millis(10));
        let service = UrlHashService::new(repository).with_clock(clock.clone());

        let created = service
            .create_hash(CreateUrlHashRequest::new("https://example.com").with_ttl(1))
            .await
            .unwrap();
        assert_eq!(created.ttl, NOW + 3600);

        clock.advance(SignedDuration::from_hours(24 * 365));
        awaitility::at_most(std::time::Duration::from_secs(5))
            .poll_interval(std::time::Duration::from_millis(10))
            .until_async(|| async {
                matches!(
                    service.read_hash(&created.url_hash).await,
                    Err(UrlHashError::NotFound(_))
                )
            })
            .await;

        task.abort();
    }

    #[tokio::test]
    async fn colliding_hashes_keep_last_write() {
        let service = test_service().with_generator(ConstantGenerator("same"));

        service
            .create_hash(CreateUrlHashRequest::new("https://first.example"))
            .await
            .unwrap();
        service
            .create_hash(CreateUrlHashRequest::new("https://second.example"))
            .await
            .unwrap();

        let read = service.read_hash("same").await.unwrap();
        assert_eq!(read.url, "https://second.example");
        assert_eq!(service.repository().len(), 1);
    }

    #[tokio::test]
    async fn same_url_twice_yields_same_hash() {
        let service = test_service();

        let first = service
            .create_hash(CreateUrlHashRequest::new("https://example.com"))
            .await
            .unwrap();
        let second = service
            .create_hash(CreateUrlHashRequest::new("https://example.com").with_ttl(2))
            .await
            .unwrap();

        assert_eq!(first.url_hash, second.url_hash);
        let read = service.read_hash(&first.url_hash).await.unwrap();
        assert_eq!(read.ttl, NOW + 2 * 3600);
    }

    #[tokio::test]
    async fn save_failure_is_storage_unavailable() {
        let service = UrlHashService::new(UnavailableRepository).with_clock(fixed_clock());

        let err = service
            .create_hash(CreateUrlHashRequest::new("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UrlHashError::StorageUnavailable(StorageError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn read_failure_is_distinct_from_not_found() {
        let service = UrlHashService::new(UnavailableRepository);

        let err = service.read_hash("abc123").await.unwrap_err();
        assert!(matches!(err, UrlHashError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn service_is_shareable() {
        let service: Arc<dyn UrlShortener> = Arc::new(test_service());
        let mut handles = vec![];

        for i in 0..10 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                let url = format!("https://example{i}.com");
                let created = service
                    .create_hash(CreateUrlHashRequest::new(url.clone()))
                    .await
                    .unwrap();
                let read = service.read_hash(&created.url_hash).await.unwrap();
                assert_eq!(read.url, url);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }
    }
}
