//! Wagon operations over a coaster's own wagon list.

use crate::error::{RegistryError, RegistryResult};
use crate::ids;
use crate::repository::require;
use crate::types::{truthy, Coaster, NewWagon, Wagon, WagonId};

/// Seat count and speed from a request, both present and truthy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WagonSpec {
    pub seat_count: u32,
    pub wagon_speed: f64,
}

impl TryFrom<NewWagon> for WagonSpec {
    type Error = RegistryError;

    fn try_from(new: NewWagon) -> RegistryResult<Self> {
        Ok(Self {
            seat_count: require(truthy(new.seat_count), "seatCount")?,
            wagon_speed: require(truthy(new.wagon_speed), "wagonSpeed")?,
        })
    }
}

impl Coaster {
    pub fn has_wagon(&self, id: &WagonId) -> bool {
        self.wagons.iter().any(|w| &w.id == id)
    }

    /// Appends a wagon with an id not yet used in this coaster.
    pub fn add_wagon(&mut self, spec: WagonSpec) -> &Wagon {
        let id = ids::wagon_id(|id| self.has_wagon(id));
        self.wagons.push(Wagon {
            id,
            seat_count: spec.seat_count,
            wagon_speed: spec.wagon_speed,
        });
        &self.wagons[self.wagons.len() - 1]
    }

    /// Removes the first wagon with `id` and returns it.
    pub fn remove_wagon(&mut self, id: &WagonId) -> RegistryResult<Wagon> {
        let index = self
            .wagons
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| RegistryError::WagonNotFound {
                coaster_id: self.id.clone(),
                wagon_id: id.clone(),
            })?;
        Ok(self.wagons.remove(index))
    }
}
