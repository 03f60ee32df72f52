//! In-memory coaster collection loaded from the store.
//!
//! Supports find, append and field updates. Does not touch the file; the
//! [`crate::registry`] facade loads and saves around these calls.

use crate::error::{RegistryError, RegistryResult};
use crate::ids;
use crate::types::{truthy, Coaster, CoasterId, CoasterUpdate, NewCoaster};

/// Fields of a create request, all present and truthy.
#[derive(Clone, Debug, PartialEq)]
pub struct CoasterSpec {
    pub staff_count: u32,
    pub customer_count: u32,
    pub track_length: f64,
    pub open_time: String,
    pub close_time: String,
}

impl TryFrom<NewCoaster> for CoasterSpec {
    type Error = RegistryError;

    fn try_from(new: NewCoaster) -> RegistryResult<Self> {
        Ok(Self {
            staff_count: require(truthy(new.staff_count), "staffCount")?,
            customer_count: require(truthy(new.customer_count), "customerCount")?,
            track_length: require(truthy(new.track_length), "trackLength")?,
            open_time: require(truthy(new.open_time), "openTime")?,
            close_time: require(truthy(new.close_time), "closeTime")?,
        })
    }
}

/// Coaster collection in insertion order.
#[derive(Debug, Default)]
pub struct CoasterRepository {
    coasters: Vec<Coaster>,
}

impl CoasterRepository {
    pub fn new(coasters: Vec<Coaster>) -> Self {
        Self { coasters }
    }

    pub fn as_slice(&self) -> &[Coaster] {
        &self.coasters
    }

    pub fn into_inner(self) -> Vec<Coaster> {
        self.coasters
    }

    pub fn len(&self) -> usize {
        self.coasters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coasters.is_empty()
    }

    pub fn contains(&self, id: &CoasterId) -> bool {
        self.coasters.iter().any(|c| &c.id == id)
    }

    pub fn find(&self, id: &CoasterId) -> RegistryResult<&Coaster> {
        self.coasters
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| RegistryError::CoasterNotFound(id.clone()))
    }

    pub fn find_mut(&mut self, id: &CoasterId) -> RegistryResult<&mut Coaster> {
        self.coasters
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RegistryError::CoasterNotFound(id.clone()))
    }

    /// Assigns a fresh id and appends a coaster with no wagons.
    pub fn append(&mut self, spec: CoasterSpec) -> &Coaster {
        let id = ids::coaster_id(|id| self.contains(id));
        self.coasters.push(Coaster {
            id,
            staff_count: spec.staff_count,
            customer_count: spec.customer_count,
            track_length: spec.track_length,
            open_time: spec.open_time,
            close_time: spec.close_time,
            wagons: Vec::new(),
        });
        &self.coasters[self.coasters.len() - 1]
    }

    /// Overwrites each supplied truthy field; `trackLength` is never changed here.
    pub fn update(&mut self, id: &CoasterId, update: CoasterUpdate) -> RegistryResult<&Coaster> {
        let coaster = self.find_mut(id)?;
        if let Some(v) = truthy(update.staff_count) {
            coaster.staff_count = v;
        }
        if let Some(v) = truthy(update.customer_count) {
            coaster.customer_count = v;
        }
        if let Some(v) = truthy(update.open_time) {
            coaster.open_time = v;
        }
        if let Some(v) = truthy(update.close_time) {
            coaster.close_time = v;
        }
        Ok(&*coaster)
    }
}

pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> RegistryResult<T> {
    value.ok_or(RegistryError::Validation { field })
}
