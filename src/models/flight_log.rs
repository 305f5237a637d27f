// Flight log data model
// Matches the `flight_logs` store entry (and backup file) structure

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single flown (or planned) flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLog {
    pub id: String,
    date: NaiveDate,
    year: i32,
    pub origin: String,
    pub destination: String,
    /// Connecting airport name, empty for direct flights
    #[serde(default)]
    pub via: String,
    pub pp: u64,
    pub price: u64,
}

/// Editable fields; the route never changes after creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEdit {
    pub date: Option<NaiveDate>,
    pub pp: Option<u64>,
    pub price: Option<u64>,
}

impl LogEdit {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.pp.is_none() && self.price.is_none()
    }
}

impl FlightLog {
    /// Create a new log entry with a fresh id
    pub fn new(
        date: NaiveDate,
        origin: impl Into<String>,
        destination: impl Into<String>,
        via: impl Into<String>,
        pp: u64,
        price: u64,
    ) -> Self {
        Self {
            id: new_id(),
            date,
            year: date.year(),
            origin: origin.into(),
            destination: destination.into(),
            via: via.into(),
            pp,
            price,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.year = date.year();
    }

    /// Re-derive the year from the date (used for imported entries)
    pub fn sync_year(&mut self) {
        self.year = self.date.year();
    }

    /// Copy of this entry under a new id
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id(),
            ..self.clone()
        }
    }

    pub fn apply_edit(&mut self, edit: &LogEdit) {
        if let Some(date) = edit.date {
            self.set_date(date);
        }
        if let Some(pp) = edit.pp {
            self.pp = pp;
        }
        if let Some(price) = edit.price {
            self.price = price;
        }
    }

    /// "Osaka (Itami) → Ishigaki (via Okinawa (Naha))"
    pub fn route_label(&self) -> String {
        if self.via.is_empty() {
            format!("{} → {}", self.origin, self.destination)
        } else {
            format!("{} → {} (via {})", self.origin, self.destination, self.via)
        }
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_follows_date() {
        let mut log = FlightLog::new(
            date(2025, 12, 31),
            "Osaka (Itami)",
            "Okinawa (Naha)",
            "",
            2173,
            12500,
        );
        assert_eq!(log.year(), 2025);

        log.apply_edit(&LogEdit {
            date: Some(date(2026, 1, 2)),
            ..Default::default()
        });
        assert_eq!(log.date(), date(2026, 1, 2));
        assert_eq!(log.year(), 2026);
    }

    #[test]
    fn test_edit_keeps_route() {
        let mut log = FlightLog::new(
            date(2026, 3, 1),
            "Tokyo (Haneda)",
            "Ishigaki",
            "",
            2590,
            40000,
        );
        let id = log.id.clone();
        log.apply_edit(&LogEdit {
            date: None,
            pp: Some(2600),
            price: Some(39000),
        });
        assert_eq!(log.id, id);
        assert_eq!(log.origin, "Tokyo (Haneda)");
        assert_eq!(log.pp, 2600);
        assert_eq!(log.price, 39000);
        assert_eq!(log.year(), 2026);
    }

    #[test]
    fn test_duplicate_gets_new_id() {
        let log = FlightLog::new(
            date(2026, 5, 20),
            "Osaka (Itami)",
            "Ishigaki",
            "Okinawa (Naha)",
            3165,
            25000,
        );
        let copy = log.duplicate();
        assert_ne!(copy.id, log.id);
        assert_eq!(FlightLog { id: log.id.clone(), ..copy }, log);
    }

    #[test]
    fn test_json_shape() {
        let mut log = FlightLog::new(
            date(2026, 2, 19),
            "Osaka (Itami)",
            "Okinawa (Naha)",
            "",
            2173,
            25000,
        );
        log.id = "abc".to_string();
        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc",
                "date": "2026-02-19",
                "year": 2026,
                "origin": "Osaka (Itami)",
                "destination": "Okinawa (Naha)",
                "via": "",
                "pp": 2173,
                "price": 25000
            })
        );
    }

    #[test]
    fn test_route_label() {
        let direct = FlightLog::new(date(2026, 1, 1), "A", "B", "", 0, 0);
        assert_eq!(direct.route_label(), "A → B");
        let via = FlightLog::new(date(2026, 1, 1), "A", "C", "B", 0, 0);
        assert_eq!(via.route_label(), "A → C (via B)");
    }

    #[test]
    fn test_empty_edit() {
        assert!(LogEdit::default().is_empty());
        assert!(!LogEdit { pp: Some(1), ..Default::default() }.is_empty());
    }
}
