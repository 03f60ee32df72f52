//! Core records and IDs for the coaster store.
//!
//! Identifiers are newtype wrappers serialized as plain strings. [`Coaster`] owns its
//! [`Wagon`]s; the request field sets ([`NewCoaster`], [`CoasterUpdate`], [`NewWagon`])
//! carry optional values so presence can be checked before anything is stored.

/// Coaster identifier, unique across the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CoasterId(pub String);

/// Wagon identifier, unique within its owning coaster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct WagonId(pub String);

impl std::fmt::Display for CoasterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for WagonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CoasterId {
    fn from(s: &str) -> Self {
        CoasterId(s.to_string())
    }
}

impl From<&str> for WagonId {
    fn from(s: &str) -> Self {
        WagonId(s.to_string())
    }
}

/// Stored coaster record.
///
/// The aliases accept documents written with the legacy Polish keys; saving always
/// uses the camelCase names. Only the key names are mapped: legacy values must already
/// have the typed shape (numbers for counts and lengths, strings for times). A legacy file
/// holding e.g. `"liczba_personelu": "5"` does not load and is reported as corrupt data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coaster {
    pub id: CoasterId,
    #[serde(alias = "liczba_personelu")]
    pub staff_count: u32,
    #[serde(alias = "liczba_klientow")]
    pub customer_count: u32,
    #[serde(alias = "dl_trasy")]
    pub track_length: f64,
    #[serde(alias = "godziny_od")]
    pub open_time: String,
    #[serde(alias = "godziny_do")]
    pub close_time: String,
    #[serde(default)]
    pub wagons: Vec<Wagon>,
}

/// Stored wagon record.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wagon {
    pub id: WagonId,
    #[serde(alias = "ilosc_miejsc")]
    pub seat_count: u32,
    #[serde(alias = "predkosc_wagonu")]
    pub wagon_speed: f64,
}

/// Body of a create-coaster request. Every field is required.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoaster {
    pub staff_count: Option<u32>,
    pub customer_count: Option<u32>,
    pub track_length: Option<f64>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

/// Body of an update-coaster request. Any subset may be supplied; `trackLength` has no
/// update path and is ignored if sent.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoasterUpdate {
    pub staff_count: Option<u32>,
    pub customer_count: Option<u32>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

/// Body of an add-wagon request. Both fields are required.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWagon {
    pub seat_count: Option<u32>,
    pub wagon_speed: Option<f64>,
}

/// Presence in the loose sense the API uses: zero, NaN and the empty string count as
/// "not provided".
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for u32 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// Returns the value only if it is present and truthy.
pub fn truthy<T: Truthy>(value: Option<T>) -> Option<T> {
    value.filter(Truthy::is_truthy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_filters_zero_nan_and_empty() {
        assert_eq!(truthy(Some(0u32)), None);
        assert_eq!(truthy(Some(3u32)), Some(3));
        assert_eq!(truthy(Some(f64::NAN)), None);
        assert_eq!(truthy(Some(0.0f64)), None);
        assert_eq!(truthy(Some(String::new())), None);
        assert_eq!(truthy(Some("09:00".to_string())), Some("09:00".to_string()));
        assert_eq!(truthy::<u32>(None), None);
    }

    #[test]
    fn coaster_serializes_camel_case() {
        let coaster = Coaster {
            id: CoasterId::from("coaster_1"),
            staff_count: 5,
            customer_count: 100,
            track_length: 250.5,
            open_time: "09:00".into(),
            close_time: "18:00".into(),
            wagons: vec![],
        };
        let json = serde_json::to_value(&coaster).unwrap();
        assert_eq!(json["id"], "coaster_1");
        assert_eq!(json["staffCount"], 5);
        assert_eq!(json["trackLength"], 250.5);
        assert_eq!(json["closeTime"], "18:00");
        assert_eq!(json["wagons"], serde_json::json!([]));
    }

    #[test]
    fn coaster_reads_legacy_keys() {
        let json = serde_json::json!({
            "id": "coaster_1700000000000",
            "liczba_personelu": 4,
            "liczba_klientow": 60,
            "dl_trasy": 1200,
            "godziny_od": "08:00",
            "godziny_do": "16:00",
            "wagons": [{ "id": "wagon_1", "ilosc_miejsc": 32, "predkosc_wagonu": 1.2 }]
        });
        let coaster: Coaster = serde_json::from_value(json).unwrap();
        assert_eq!(coaster.staff_count, 4);
        assert_eq!(coaster.track_length, 1200.0);
        assert_eq!(coaster.wagons[0].seat_count, 32);
        assert_eq!(coaster.wagons[0].id, WagonId::from("wagon_1"));
    }

    #[test]
    fn legacy_string_counts_are_rejected() {
        let json = serde_json::json!({
            "id": "coaster_1700000000000",
            "liczba_personelu": "5",
            "liczba_klientow": 60,
            "dl_trasy": 1200,
            "godziny_od": "08:00",
            "godziny_do": "16:00",
            "wagons": []
        });
        assert!(serde_json::from_value::<Coaster>(json).is_err());
    }

    #[test]
    fn coaster_without_wagons_key_loads_empty() {
        let json = serde_json::json!({
            "id": "c",
            "staffCount": 1,
            "customerCount": 1,
            "trackLength": 1.0,
            "openTime": "a",
            "closeTime": "b"
        });
        let coaster: Coaster = serde_json::from_value(json).unwrap();
        assert!(coaster.wagons.is_empty());
    }
}
