//! Single-entry facade over the file store.
//!
//! Each operation takes the registry lock, loads the whole collection, applies one
//! in-memory step and saves if it changed anything. Holding the lock across the cycle
//! keeps concurrent requests in this process from overwriting each other's writes.

use crate::error::RegistryResult;
use crate::persistence::FileStore;
use crate::repository::{CoasterRepository, CoasterSpec};
use crate::types::{Coaster, CoasterId, CoasterUpdate, NewCoaster, NewWagon, Wagon, WagonId};
use crate::wagons::WagonSpec;
use log::info;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Coaster registry backed by one JSON file.
///
/// Use [`CoasterRegistry::create`] and [`CoasterRegistry::update`] for coasters and
/// [`CoasterRegistry::add_wagon`] / [`CoasterRegistry::remove_wagon`] for wagons.
#[derive(Debug)]
pub struct CoasterRegistry {
    store: FileStore,
    lock: Mutex<()>,
}

impl CoasterRegistry {
    pub fn new(store: FileStore) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Registry over the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(FileStore::new(path))
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> RegistryResult<CoasterRepository> {
        Ok(CoasterRepository::new(self.store.load()?))
    }

    /// All coasters in insertion order.
    pub fn list(&self) -> RegistryResult<Vec<Coaster>> {
        let _guard = self.guard();
        Ok(self.load()?.into_inner())
    }

    /// One coaster by id.
    pub fn get(&self, id: &CoasterId) -> RegistryResult<Coaster> {
        let _guard = self.guard();
        Ok(self.load()?.find(id)?.clone())
    }

    /// Creates a coaster with a fresh id and no wagons.
    ///
    /// Returns `Err(Validation)` if any field is missing, zero or empty; the store is not
    /// read or written in that case.
    pub fn create(&self, new: NewCoaster) -> RegistryResult<Coaster> {
        let spec = CoasterSpec::try_from(new)?;
        let _guard = self.guard();
        let mut repo = self.load()?;
        let coaster = repo.append(spec).clone();
        self.store.save(repo.as_slice())?;
        info!(
            "coaster created coaster_id={} staff={} customers={} track_length={}",
            coaster.id, coaster.staff_count, coaster.customer_count, coaster.track_length
        );
        Ok(coaster)
    }

    /// Applies the truthy fields of `update` to an existing coaster.
    pub fn update(&self, id: &CoasterId, update: CoasterUpdate) -> RegistryResult<Coaster> {
        let _guard = self.guard();
        let mut repo = self.load()?;
        let coaster = repo.update(id, update)?.clone();
        self.store.save(repo.as_slice())?;
        info!(
            "coaster updated coaster_id={} staff={} customers={} open={} close={}",
            coaster.id, coaster.staff_count, coaster.customer_count, coaster.open_time, coaster.close_time
        );
        Ok(coaster)
    }

    /// Adds a wagon to a coaster. Fields are checked before the store is read.
    pub fn add_wagon(&self, coaster_id: &CoasterId, new: NewWagon) -> RegistryResult<Wagon> {
        let spec = WagonSpec::try_from(new)?;
        let _guard = self.guard();
        let mut repo = self.load()?;
        let wagon = repo.find_mut(coaster_id)?.add_wagon(spec).clone();
        self.store.save(repo.as_slice())?;
        info!(
            "wagon added coaster_id={} wagon_id={} seats={} speed={}",
            coaster_id, wagon.id, wagon.seat_count, wagon.wagon_speed
        );
        Ok(wagon)
    }

    /// Removes a wagon from a coaster.
    pub fn remove_wagon(&self, coaster_id: &CoasterId, wagon_id: &WagonId) -> RegistryResult<()> {
        let _guard = self.guard();
        let mut repo = self.load()?;
        repo.find_mut(coaster_id)?.remove_wagon(wagon_id)?;
        self.store.save(repo.as_slice())?;
        info!("wagon removed coaster_id={} wagon_id={}", coaster_id, wagon_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use std::sync::Arc;

    fn init_log() {
        let _ = env_logger::try_init();
    }

    fn registry() -> (tempfile::TempDir, CoasterRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let registry = CoasterRegistry::open(dir.path().join("coasters.json"));
        (dir, registry)
    }

    fn new_coaster() -> NewCoaster {
        NewCoaster {
            staff_count: Some(5),
            customer_count: Some(100),
            track_length: Some(250.5),
            open_time: Some("09:00".into()),
            close_time: Some("18:00".into()),
        }
    }

    fn new_wagon() -> NewWagon {
        NewWagon {
            seat_count: Some(4),
            wagon_speed: Some(12.5),
        }
    }

    #[test]
    fn create_persists_coaster() {
        init_log();
        let (_dir, registry) = registry();
        let coaster = registry.create(new_coaster()).unwrap();
        assert!(coaster.wagons.is_empty());
        let stored = registry.store().load().unwrap();
        assert_eq!(stored, vec![coaster]);
    }

    #[test]
    fn create_missing_field_does_not_touch_store() {
        init_log();
        let (_dir, registry) = registry();
        let mut req = new_coaster();
        req.open_time = None;
        let err = registry.create(req).unwrap_err();
        assert!(matches!(err, RegistryError::Validation { field: "openTime" }));
        assert!(!registry.store().path().exists());
    }

    #[test]
    fn wagon_lifecycle_add_then_remove() {
        init_log();
        let (_dir, registry) = registry();
        let coaster = registry.create(new_coaster()).unwrap();
        let wagon = registry.add_wagon(&coaster.id, new_wagon()).unwrap();
        assert!(wagon.id.0.starts_with("wagon_"));
        assert_eq!(registry.get(&coaster.id).unwrap().wagons, vec![wagon.clone()]);

        registry.remove_wagon(&coaster.id, &wagon.id).unwrap();
        assert!(registry.get(&coaster.id).unwrap().wagons.is_empty());

        let err = registry.remove_wagon(&coaster.id, &wagon.id).unwrap_err();
        assert!(matches!(err, RegistryError::WagonNotFound { .. }));
    }

    #[test]
    fn add_wagon_unknown_coaster_leaves_store_unchanged() {
        init_log();
        let (_dir, registry) = registry();
        registry.create(new_coaster()).unwrap();
        let before = std::fs::read_to_string(registry.store().path()).unwrap();
        let err = registry
            .add_wagon(&CoasterId::from("coaster_missing"), new_wagon())
            .unwrap_err();
        assert!(matches!(err, RegistryError::CoasterNotFound(_)));
        let after = std::fs::read_to_string(registry.store().path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn remove_wagon_unknown_coaster_is_coaster_not_found() {
        init_log();
        let (_dir, registry) = registry();
        let err = registry
            .remove_wagon(&CoasterId::from("x"), &WagonId::from("y"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::CoasterNotFound(_)));
    }

    #[test]
    fn update_keeps_track_length_and_wagons() {
        init_log();
        let (_dir, registry) = registry();
        let coaster = registry.create(new_coaster()).unwrap();
        registry.add_wagon(&coaster.id, new_wagon()).unwrap();
        let updated = registry
            .update(
                &coaster.id,
                CoasterUpdate {
                    staff_count: Some(7),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.staff_count, 7);
        assert_eq!(updated.track_length, 250.5);
        assert_eq!(updated.wagons.len(), 1);
        assert_eq!(registry.get(&coaster.id).unwrap(), updated);
    }

    #[test]
    fn corrupt_file_surfaces_corrupt_data() {
        init_log();
        let (_dir, registry) = registry();
        std::fs::write(registry.store().path(), "[{]").unwrap();
        assert!(matches!(
            registry.create(new_coaster()).unwrap_err(),
            RegistryError::CorruptData { .. }
        ));
        assert!(matches!(registry.list().unwrap_err(), RegistryError::CorruptData { .. }));
    }

    #[test]
    fn create_missing_field_over_corrupt_file_is_validation() {
        init_log();
        let (_dir, registry) = registry();
        std::fs::write(registry.store().path(), "[{]").unwrap();
        let err = registry.create(NewCoaster::default()).unwrap_err();
        assert!(matches!(err, RegistryError::Validation { field: "staffCount" }));
        let err = registry
            .add_wagon(&CoasterId::from("x"), NewWagon::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::Validation { field: "seatCount" }));
    }

    #[test]
    fn concurrent_creates_are_all_persisted() {
        init_log();
        let (_dir, registry) = registry();
        let registry = Arc::new(registry);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        registry.create(new_coaster()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.list().unwrap().len(), 80);
    }
}
