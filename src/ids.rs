//! Id generation for coasters and wagons.
//!
//! Ids look like `coaster_<unix millis>_<8 hex digits>`. The random suffix keeps ids
//! distinct when several are created within the same millisecond; callers still check
//! against the ids already in use and draw again on a clash.

use crate::types::{CoasterId, WagonId};
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn generate(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("{}_{}_{:08x}", prefix, unix_millis(), suffix)
}

/// Fresh coaster id for which `taken` returns false.
pub fn coaster_id(taken: impl Fn(&CoasterId) -> bool) -> CoasterId {
    loop {
        let id = CoasterId(generate("coaster"));
        if !taken(&id) {
            return id;
        }
    }
}

/// Fresh wagon id for which `taken` returns false.
pub fn wagon_id(taken: impl Fn(&WagonId) -> bool) -> WagonId {
    loop {
        let id = WagonId(generate("wagon"));
        if !taken(&id) {
            return id;
        }
    }
}
