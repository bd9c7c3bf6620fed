//! # Randomized Property Checks
//!
//! Drives the registry with seeded random operation sequences and checks
//! every outcome against a plain reference model:
//!
//! - **Uniqueness**: at most one create per hash succeeds
//! - **Write-once**: a record never changes after creation
//! - **Access gating**: mutations succeed iff the caller holds the role at call time
//! - **Rollback**: failed calls change nothing and emit nothing

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use bc_01_certificate_registry::{
        BincodeStateSerializer, CertificateRecord, CertificateRegistryApi,
        CertificateRegistryService, ErrorKind, InMemoryKVStore, ManualTimeSource,
        RegistryDependencies, RegistryResult, TimeSource,
    };
    use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus};
    use shared_types::Principal;

    const SEEDS: u64 = 64;
    const STEPS: usize = 300;

    /// Small pools so collisions happen often.
    fn principals() -> Vec<Principal> {
        let mut pool: Vec<_> = (1..=5u8).map(|b| Principal::new([b; 20])).collect();
        pool.push(Principal::ZERO);
        pool
    }

    const HASHES: &[&str] = &["", "h0", "h1", "h2", "h3", "H0", "h0 "];
    const NAMES: &[&str] = &["Harvard", "MIT", "Oxford"];

    #[derive(Debug, Clone)]
    enum Op {
        Transfer(Principal, Principal),
        Renounce(Principal),
        Register(Principal, Principal, String),
        Deactivate(Principal, Principal),
        Create(Principal, String, String),
    }

    fn random_op(rng: &mut StdRng, pool: &[Principal]) -> Op {
        let pick = |rng: &mut StdRng| *pool.choose(rng).unwrap();
        match rng.gen_range(0..20) {
            0 => Op::Transfer(pick(rng), pick(rng)),
            1 => Op::Renounce(pick(rng)),
            2..=6 => Op::Register(pick(rng), pick(rng), NAMES.choose(rng).unwrap().to_string()),
            7..=9 => Op::Deactivate(pick(rng), pick(rng)),
            _ => Op::Create(
                pick(rng),
                format!("student-{}", rng.gen_range(0..1000)),
                HASHES.choose(rng).unwrap().to_string(),
            ),
        }
    }

    /// Reference model of the registry.
    #[derive(Default)]
    struct Model {
        owner: Option<Principal>,
        issuers: HashMap<Principal, (String, bool)>,
        records: HashMap<String, CertificateRecord>,
    }

    impl Model {
        fn is_owner(&self, caller: Principal) -> bool {
            self.owner == Some(caller)
        }

        fn is_active(&self, caller: Principal) -> bool {
            self.issuers.get(&caller).is_some_and(|(_, active)| *active)
        }

        /// Expected outcome; applies the change when it succeeds.
        fn step(&mut self, op: &Op, now: u64) -> Result<(), ErrorKind> {
            match op {
                Op::Transfer(caller, new_owner) => {
                    if !self.is_owner(*caller) {
                        return Err(ErrorKind::Unauthorized);
                    }
                    if new_owner.is_zero() {
                        return Err(ErrorKind::InvalidArgument);
                    }
                    self.owner = Some(*new_owner);
                }
                Op::Renounce(caller) => {
                    if !self.is_owner(*caller) {
                        return Err(ErrorKind::Unauthorized);
                    }
                    self.owner = None;
                }
                Op::Register(caller, principal, name) => {
                    if !self.is_owner(*caller) {
                        return Err(ErrorKind::Unauthorized);
                    }
                    if principal.is_zero() {
                        return Err(ErrorKind::InvalidArgument);
                    }
                    self.issuers.insert(*principal, (name.clone(), true));
                }
                Op::Deactivate(caller, principal) => {
                    if !self.is_owner(*caller) {
                        return Err(ErrorKind::Unauthorized);
                    }
                    if let Some(entry) = self.issuers.get_mut(principal) {
                        entry.1 = false;
                    }
                }
                Op::Create(caller, student, hash) => {
                    if !self.is_active(*caller) {
                        return Err(ErrorKind::Unauthorized);
                    }
                    if hash.is_empty() {
                        return Err(ErrorKind::InvalidArgument);
                    }
                    if self.records.contains_key(hash) {
                        return Err(ErrorKind::AlreadyExists);
                    }
                    let issuer_name = self.issuers[caller].0.clone();
                    self.records.insert(
                        hash.clone(),
                        CertificateRecord {
                            subject_name: student.clone(),
                            course_or_subject: "Course".to_string(),
                            hash: hash.clone(),
                            issued_at: now,
                            issuer_name,
                            valid: true,
                        },
                    );
                }
            }
            Ok(())
        }
    }

    fn apply(registry: &mut impl CertificateRegistryApi, op: &Op) -> RegistryResult<()> {
        match op.clone() {
            Op::Transfer(caller, new_owner) => registry.transfer_ownership(caller, new_owner),
            Op::Renounce(caller) => registry.renounce_ownership(caller),
            Op::Register(caller, principal, name) => {
                registry.register_issuer(caller, principal, name)
            }
            Op::Deactivate(caller, principal) => registry.deactivate_issuer(caller, principal),
            Op::Create(caller, student, hash) => registry
                .create_certificate(caller, student, "Course".to_string(), hash)
                .map(|_| ()),
        }
    }

    fn run_seed(seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let pool = principals();
        let genesis = pool[0];

        let bus = Arc::new(InMemoryEventBus::new());
        let mut subscription = bus.subscribe(EventFilter::all());
        let clock = ManualTimeSource::new(1_000);
        let deps = RegistryDependencies {
            kv_store: InMemoryKVStore::new(),
            time_source: clock.clone(),
            serializer: BincodeStateSerializer,
            publisher: Arc::clone(&bus),
        };
        let mut registry = CertificateRegistryService::new(deps, Some(genesis)).unwrap();
        let mut model = Model {
            owner: Some(genesis),
            ..Model::default()
        };
        let mut successes = 1u64; // genesis
        let mut create_wins: HashMap<String, u32> = HashMap::new();

        for step in 0..STEPS {
            clock.advance(rng.gen_range(0..5));
            let op = random_op(&mut rng, &pool);
            let now = clock.now();

            let events_before = bus.events_published();
            let expected = model.step(&op, now);
            let actual = apply(&mut registry, &op).map_err(|e| e.kind());
            assert_eq!(actual, expected, "seed {} step {}: {:?}", seed, step, op);

            match actual {
                Ok(()) => {
                    successes += 1;
                    assert_eq!(bus.events_published(), events_before + 1);
                    if let Op::Create(_, _, hash) = &op {
                        *create_wins.entry(hash.clone()).or_default() += 1;
                    }
                }
                Err(_) => assert_eq!(bus.events_published(), events_before),
            }

            // Access gating is observable only through the role queries.
            assert_eq!(registry.current_owner(), model.owner);
            for principal in &pool {
                assert_eq!(
                    registry.is_active_issuer(*principal),
                    model.is_active(*principal)
                );
            }
        }

        // Uniqueness.
        assert!(create_wins.values().all(|wins| *wins == 1));

        // Write-once: every record matches the state captured at creation.
        assert_eq!(registry.certificate_count(), model.records.len());
        for (hash, record) in &model.records {
            let verification = registry.verify_certificate(hash);
            assert!(verification.found);
            assert_eq!(verification.record.as_ref(), Some(record));
        }

        // One event per success, nothing else.
        assert_eq!(subscription.drain().len() as u64, successes);
    }

    #[test]
    fn test_random_sequences_match_model() {
        for seed in 0..SEEDS {
            run_seed(seed);
        }
    }

    #[test]
    fn test_renouncement_locks_every_caller() {
        let mut rng = StdRng::seed_from_u64(0xCE57);
        let pool = principals();
        let deps = RegistryDependencies {
            kv_store: InMemoryKVStore::new(),
            time_source: ManualTimeSource::new(0),
            serializer: BincodeStateSerializer,
            publisher: Arc::new(InMemoryEventBus::new()),
        };
        let mut registry = CertificateRegistryService::new(deps, Some(pool[0])).unwrap();
        registry.renounce_ownership(pool[0]).unwrap();

        for _ in 0..500 {
            let caller = Principal::new(rng.gen());
            let target = *pool.choose(&mut rng).unwrap();
            let results = [
                registry.transfer_ownership(caller, target),
                registry.renounce_ownership(caller),
                registry.register_issuer(caller, target, "X".to_string()),
                registry.deactivate_issuer(caller, target),
            ];
            for result in results {
                assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::Unauthorized));
            }
        }
        assert_eq!(registry.current_owner(), None);
    }
}
