//! # Integration Test Flows
//!
//! The registry service wired to real adapters: the shared event bus, the
//! file-backed store and the verification JSON handler.
//!
//! ## Flows Tested
//!
//! 1. **Registry → Event Bus**: every committed mutation reaches async subscribers in order
//! 2. **Registry → Indexer**: a topic-filtered stream rebuilds the certificate list
//! 3. **Registry → File Store**: tables survive a process restart
//! 4. **Registry → Verify API**: JSON payloads reflect stored records

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    use bc_01_certificate_registry::{
        handle_verify_request, BincodeStateSerializer, CertificateRegistryApi,
        CertificateRegistryService, FileBackedKVStore, InMemoryKVStore, ManualTimeSource,
        RegistryDependencies, RegistryError,
    };
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, RegistryEvent};
    use shared_types::Principal;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const OWNER: Principal = Principal::new([0xA1; 20]);
    const HARVARD: Principal = Principal::new([0xB2; 20]);
    const MIT: Principal = Principal::new([0xC3; 20]);
    const ISSUE_TIME: u64 = 1_717_171_717;

    fn memory_registry(
        bus: Arc<InMemoryEventBus>,
    ) -> CertificateRegistryService<
        InMemoryKVStore,
        ManualTimeSource,
        BincodeStateSerializer,
        Arc<InMemoryEventBus>,
    > {
        let deps = RegistryDependencies {
            kv_store: InMemoryKVStore::new(),
            time_source: ManualTimeSource::new(ISSUE_TIME),
            serializer: BincodeStateSerializer,
            publisher: bus,
        };
        CertificateRegistryService::new(deps, Some(OWNER)).unwrap()
    }

    fn file_registry(
        path: &std::path::Path,
        bus: Arc<InMemoryEventBus>,
    ) -> Result<
        CertificateRegistryService<
            FileBackedKVStore,
            ManualTimeSource,
            BincodeStateSerializer,
            Arc<InMemoryEventBus>,
        >,
        RegistryError,
    > {
        let deps = RegistryDependencies {
            kv_store: FileBackedKVStore::open(path)?,
            time_source: ManualTimeSource::new(ISSUE_TIME),
            serializer: BincodeStateSerializer,
            publisher: bus,
        };
        CertificateRegistryService::new(deps, Some(OWNER))
    }

    fn issue(registry: &mut impl CertificateRegistryApi, issuer: Principal, student: &str, hash: &str) {
        registry
            .create_certificate(
                issuer,
                student.to_string(),
                "Distributed Systems".to_string(),
                hash.to_string(),
            )
            .unwrap();
    }

    // =============================================================================
    // REGISTRY → EVENT BUS
    // =============================================================================

    #[tokio::test]
    async fn test_async_subscriber_sees_commits_in_order() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut subscription = bus.subscribe(EventFilter::all());
        let mut registry = memory_registry(Arc::clone(&bus));

        registry
            .register_issuer(OWNER, HARVARD, "Harvard".to_string())
            .unwrap();
        issue(&mut registry, HARVARD, "Alice", "hash-a");

        let mut received = Vec::new();
        for _ in 0..3 {
            let published = timeout(Duration::from_millis(200), subscription.recv())
                .await
                .expect("timed out waiting for event")
                .expect("bus closed");
            received.push(published);
        }

        assert_eq!(
            received.iter().map(|p| p.sequence).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(matches!(
            received[0].event,
            RegistryEvent::OwnershipTransferred { previous: None, .. }
        ));
        assert_eq!(
            received[2].event,
            RegistryEvent::CertificateIssued {
                hash: "hash-a".to_string(),
                issuer: HARVARD
            }
        );
    }

    #[tokio::test]
    async fn test_indexer_rebuilds_certificate_list() {
        let bus = Arc::new(InMemoryEventBus::new());
        let stream = bus.event_stream(EventFilter::topics(vec![EventTopic::Certificates]));

        let indexer = tokio::spawn(async move {
            stream
                .filter_map(|published| match published.event {
                    RegistryEvent::CertificateIssued { hash, issuer } => Some((hash, issuer)),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .await
        });

        {
            let mut registry = memory_registry(Arc::clone(&bus));
            registry
                .register_issuer(OWNER, HARVARD, "Harvard".to_string())
                .unwrap();
            registry
                .register_issuer(OWNER, MIT, "MIT".to_string())
                .unwrap();
            issue(&mut registry, HARVARD, "Alice", "h1");
            issue(&mut registry, MIT, "Bob", "h2");
            registry.deactivate_issuer(OWNER, MIT).unwrap();
            // Rejected: MIT is no longer active.
            assert!(registry
                .create_certificate(MIT, "Eve".to_string(), "X".to_string(), "h3".to_string())
                .is_err());
        }
        drop(bus);

        let indexed = timeout(Duration::from_secs(1), indexer)
            .await
            .expect("indexer did not finish")
            .unwrap();
        assert_eq!(
            indexed,
            vec![("h1".to_string(), HARVARD), ("h2".to_string(), MIT)]
        );
    }

    // =============================================================================
    // REGISTRY → FILE STORE
    // =============================================================================

    #[test]
    fn test_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.db");

        let issued = {
            let mut registry = file_registry(&path, Arc::new(InMemoryEventBus::new())).unwrap();
            registry
                .register_issuer(OWNER, HARVARD, "Harvard".to_string())
                .unwrap();
            issue(&mut registry, HARVARD, "Alice", "hash123");
            registry.transfer_ownership(OWNER, MIT).unwrap();
            registry.verify_certificate("hash123")
        };

        let bus = Arc::new(InMemoryEventBus::new());
        let mut subscription = bus.subscribe(EventFilter::all());
        let mut registry = file_registry(&path, Arc::clone(&bus)).unwrap();

        // Reloading replays nothing onto the bus.
        assert!(subscription.drain().is_empty());
        assert_eq!(registry.current_owner(), Some(MIT));
        assert_eq!(registry.verify_certificate("hash123"), issued);
        assert!(matches!(
            registry.create_certificate(
                HARVARD,
                "Alice".to_string(),
                "Again".to_string(),
                "hash123".to_string()
            ),
            Err(RegistryError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_file_store_is_single_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.db");

        let _first = file_registry(&path, Arc::new(InMemoryEventBus::new())).unwrap();
        let second = file_registry(&path, Arc::new(InMemoryEventBus::new()));

        assert!(matches!(second, Err(RegistryError::Storage { .. })));
    }

    // =============================================================================
    // REGISTRY → VERIFY API
    // =============================================================================

    #[test]
    fn test_verify_api_after_deactivation() {
        let mut registry = memory_registry(Arc::new(InMemoryEventBus::new()));
        registry
            .register_issuer(OWNER, HARVARD, "Harvard".to_string())
            .unwrap();
        issue(&mut registry, HARVARD, "Alice", "hash123");
        registry.deactivate_issuer(OWNER, HARVARD).unwrap();

        let value = handle_verify_request(&registry, r#"{"certificateId":"hash123"}"#);
        assert_eq!(
            value,
            serde_json::json!({
                "isValid": true,
                "studentName": "Alice",
                "courseName": "Distributed Systems",
                "certHash": "hash123",
                "issueDate": ISSUE_TIME.to_string(),
                "university": "Harvard",
            })
        );
    }
}
