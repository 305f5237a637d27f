// Flight log book
// Reads and writes the `flight_logs` and `target_type` store keys

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::api::store::{JsonStore, StoreError};
use crate::models::flight_log::{FlightLog, LogEdit};
use crate::models::stats::TargetStatus;
use crate::utils::airports;
use crate::utils::config::{FLIGHT_LOGS_KEY, TARGET_TYPE_KEY};
use crate::utils::pp::{PpResult, Route, TripType};

/// Shortest id prefix accepted when addressing a log entry
pub const MIN_ID_PREFIX: usize = 4;

/// Validation failures that block a save before anything is written
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("Please enter the boarding date (YYYY-MM-DD).")]
    MissingDate,
    #[error("Please enter the return boarding date (YYYY-MM-DD).")]
    MissingReturnDate,
}

#[derive(Debug, Error)]
pub enum LogbookError {
    #[error("No flight found with id `{0}`.")]
    NotFound(String),
    #[error("Id `{0}` matches more than one flight, use a longer id.")]
    Ambiguous(String),
    #[error("Id `{0}` is too short, use at least {} characters.", MIN_ID_PREFIX)]
    IdTooShort(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A calculation the user wants to record
#[derive(Debug, Clone)]
pub struct SavePlan<'a> {
    pub route: &'a Route,
    pub result: &'a PpResult,
    pub trip_type: TripType,
    pub ticket_price: u64,
    pub date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
}

/// Build the entries to record: one for one-way, outbound and return for round trips.
/// Both legs carry the one-way points; the price is split so the legs add up.
pub fn plan_entries(plan: &SavePlan<'_>) -> Result<Vec<FlightLog>, SaveError> {
    let date = plan.date.ok_or(SaveError::MissingDate)?;

    let origin = airports::display_name(&plan.route.origin);
    let destination = airports::display_name(&plan.route.destination);
    let via = plan
        .route
        .via
        .as_deref()
        .map(airports::display_name)
        .unwrap_or_default();
    let pp = plan.result.base_pp;

    match plan.trip_type {
        TripType::OneWay => Ok(vec![FlightLog::new(
            date,
            origin,
            destination,
            via,
            pp,
            plan.ticket_price,
        )]),
        TripType::RoundTrip => {
            let return_date = plan.return_date.ok_or(SaveError::MissingReturnDate)?;
            let (outbound_price, return_price) = split_price(plan.ticket_price);

            Ok(vec![
                FlightLog::new(
                    date,
                    origin.clone(),
                    destination.clone(),
                    via.clone(),
                    pp,
                    outbound_price,
                ),
                FlightLog::new(return_date, destination, origin, via, pp, return_price),
            ])
        }
    }
}

/// First leg gets the floor half, second leg the remainder
pub fn split_price(total: u64) -> (u64, u64) {
    let first = total / 2;
    (first, total - first)
}

/// All stored flights in insertion order
pub async fn load_logs(store: &JsonStore) -> Result<Vec<FlightLog>, StoreError> {
    Ok(store.get::<Vec<FlightLog>>(FLIGHT_LOGS_KEY).await?.unwrap_or_default())
}

/// Replace the stored flight sequence
pub async fn save_logs(store: &JsonStore, logs: &[FlightLog]) -> Result<(), StoreError> {
    store.set(FLIGHT_LOGS_KEY, logs).await
}

/// Append entries; returns the new total count
pub async fn append_logs(store: &JsonStore, entries: Vec<FlightLog>) -> Result<usize, StoreError> {
    let added = entries.len();
    let total = store
        .update(FLIGHT_LOGS_KEY, |logs: &mut Vec<FlightLog>| {
            logs.extend(entries);
            Ok::<_, StoreError>(logs.len())
        })
        .await?;
    info!("Recorded {} flight(s), {} total", added, total);
    Ok(total)
}

/// Index of the entry whose id equals or starts with `query`
pub fn resolve_id(logs: &[FlightLog], query: &str) -> Result<usize, LogbookError> {
    let query = query.trim();

    if let Some(index) = logs.iter().position(|l| l.id == query) {
        return Ok(index);
    }
    if query.len() < MIN_ID_PREFIX {
        return Err(LogbookError::IdTooShort(query.to_string()));
    }

    let mut matches = logs
        .iter()
        .enumerate()
        .filter(|(_, l)| l.id.starts_with(query))
        .map(|(i, _)| i);

    match (matches.next(), matches.next()) {
        (Some(index), None) => Ok(index),
        (Some(_), Some(_)) => Err(LogbookError::Ambiguous(query.to_string())),
        (None, _) => Err(LogbookError::NotFound(query.to_string())),
    }
}

pub async fn delete_log(store: &JsonStore, id: &str) -> Result<FlightLog, LogbookError> {
    let removed = store
        .update(FLIGHT_LOGS_KEY, |logs: &mut Vec<FlightLog>| {
            let index = resolve_id(logs, id)?;
            Ok::<_, LogbookError>(logs.remove(index))
        })
        .await?;
    info!("Deleted flight {}", removed.id);
    Ok(removed)
}

/// Copy an entry (new id) to the end of the log
pub async fn duplicate_log(store: &JsonStore, id: &str) -> Result<FlightLog, LogbookError> {
    let (source, copy) = store
        .update(FLIGHT_LOGS_KEY, |logs: &mut Vec<FlightLog>| {
            let index = resolve_id(logs, id)?;
            let copy = logs[index].duplicate();
            logs.push(copy.clone());
            Ok::<_, LogbookError>((logs[index].id.clone(), copy))
        })
        .await?;
    info!("Duplicated flight {} as {}", source, copy.id);
    Ok(copy)
}

pub async fn edit_log(
    store: &JsonStore,
    id: &str,
    edit: &LogEdit,
) -> Result<FlightLog, LogbookError> {
    let edited = store
        .update(FLIGHT_LOGS_KEY, |logs: &mut Vec<FlightLog>| {
            let index = resolve_id(logs, id)?;
            logs[index].apply_edit(edit);
            Ok::<_, LogbookError>(logs[index].clone())
        })
        .await?;
    info!("Edited flight {}", edited.id);
    Ok(edited)
}

/// Drop every stored flight; returns whether anything was stored
pub async fn clear_logs(store: &JsonStore) -> Result<bool, StoreError> {
    let removed = store.remove(FLIGHT_LOGS_KEY).await?;
    info!("Cleared flight log (had data: {})", removed);
    Ok(removed)
}

pub async fn load_target(store: &JsonStore) -> Result<TargetStatus, StoreError> {
    Ok(store
        .get::<String>(TARGET_TYPE_KEY)
        .await?
        .map(|key| TargetStatus::from_key(&key))
        .unwrap_or_default())
}

pub async fn save_target(store: &JsonStore, target: TargetStatus) -> Result<(), StoreError> {
    store.set(TARGET_TYPE_KEY, target.key()).await
}

/// A year's flights, oldest first
pub fn year_logs(logs: &[FlightLog], year: i32) -> Vec<&FlightLog> {
    let mut selected: Vec<&FlightLog> = logs.iter().filter(|l| l.year() == year).collect();
    selected.sort_by_key(|l| l.date());
    selected
}

/// Short id shown in listings
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fares::{FareEra, FareSelection};
    use crate::utils::mileage::MileageTable;
    use crate::utils::pp::{compute_pp, PpInput};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calculate(route: &Route, trip_type: TripType, ticket_price: u64) -> PpResult {
        let fare = FareSelection::new(FareEra::Current);
        compute_pp(
            &PpInput {
                route,
                fare: &fare,
                distance_override: None,
                trip_type,
                ticket_price,
            },
            MileageTable::builtin(),
        )
    }

    fn entry(id: &str, y: i32, m: u32, d: u32) -> FlightLog {
        let mut log = FlightLog::new(date(y, m, d), "A", "B", "", 100, 1000);
        log.id = id.to_string();
        log
    }

    #[test]
    fn test_round_trip_price_split() {
        let route = Route::new("ITM", None, "OKA");
        let result = calculate(&route, TripType::RoundTrip, 25001);
        let entries = plan_entries(&SavePlan {
            route: &route,
            result: &result,
            trip_type: TripType::RoundTrip,
            ticket_price: 25001,
            date: Some(date(2026, 5, 20)),
            return_date: Some(date(2026, 5, 21)),
        })
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].price, 12500);
        assert_eq!(entries[1].price, 12501);
        assert_eq!(entries[0].price + entries[1].price, 25001);

        // both legs carry the one-way points
        assert_eq!(entries[0].pp, 2173);
        assert_eq!(entries[1].pp, 2173);

        assert_eq!(entries[0].origin, "Osaka (Itami)");
        assert_eq!(entries[0].destination, "Okinawa (Naha)");
        assert_eq!(entries[1].origin, "Okinawa (Naha)");
        assert_eq!(entries[1].destination, "Osaka (Itami)");
        assert_eq!(entries[1].date(), date(2026, 5, 21));
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_one_way_entry() {
        let route = Route::new("ITM", Some("OKA"), "ISG");
        let result = calculate(&route, TripType::OneWay, 30000);
        let entries = plan_entries(&SavePlan {
            route: &route,
            result: &result,
            trip_type: TripType::OneWay,
            ticket_price: 30000,
            date: Some(date(2026, 2, 19)),
            return_date: None,
        })
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pp, 3165);
        assert_eq!(entries[0].price, 30000);
        assert_eq!(entries[0].via, "Okinawa (Naha)");
        assert_eq!(entries[0].year(), 2026);
    }

    #[test]
    fn test_unknown_airports_pass_through() {
        let route = Route::new("ITM", None, "ZZZ");
        let result = calculate(&route, TripType::OneWay, 0);
        let entries = plan_entries(&SavePlan {
            route: &route,
            result: &result,
            trip_type: TripType::OneWay,
            ticket_price: 0,
            date: Some(date(2026, 2, 19)),
            return_date: None,
        })
        .unwrap();
        assert_eq!(entries[0].destination, "ZZZ");
        assert_eq!(entries[0].via, "");
    }

    #[test]
    fn test_missing_dates_block_save() {
        let route = Route::new("ITM", None, "OKA");
        let result = calculate(&route, TripType::RoundTrip, 100);
        let mut plan = SavePlan {
            route: &route,
            result: &result,
            trip_type: TripType::RoundTrip,
            ticket_price: 100,
            date: None,
            return_date: Some(date(2026, 1, 1)),
        };
        assert_eq!(plan_entries(&plan).unwrap_err(), SaveError::MissingDate);

        plan.date = Some(date(2026, 1, 1));
        plan.return_date = None;
        assert_eq!(plan_entries(&plan).unwrap_err(), SaveError::MissingReturnDate);
    }

    #[test]
    fn test_split_price() {
        assert_eq!(split_price(25000), (12500, 12500));
        assert_eq!(split_price(1), (0, 1));
        assert_eq!(split_price(0), (0, 0));
    }

    #[test]
    fn test_resolve_id() {
        let logs = vec![entry("abcd1111", 2026, 1, 1), entry("abcd2222", 2026, 1, 2)];
        assert_eq!(resolve_id(&logs, "abcd2222").unwrap(), 1);
        assert_eq!(resolve_id(&logs, "abcd1").unwrap(), 0);
        assert!(matches!(resolve_id(&logs, "abcd"), Err(LogbookError::Ambiguous(_))));
        assert!(matches!(resolve_id(&logs, "ab"), Err(LogbookError::IdTooShort(_))));
        assert!(matches!(resolve_id(&logs, "ffff"), Err(LogbookError::NotFound(_))));
    }

    #[test]
    fn test_year_logs_sorted() {
        let logs = vec![
            entry("c", 2026, 3, 1),
            entry("a", 2026, 1, 5),
            entry("x", 2025, 2, 1),
            entry("b", 2026, 2, 1),
        ];
        let ids: Vec<&str> = year_logs(&logs, 2026).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[tokio::test]
    async fn test_store_round_trip_operations() {
        let store = JsonStore::in_memory();
        assert!(load_logs(&store).await.unwrap().is_empty());

        let total = append_logs(
            &store,
            vec![entry("aaaa0001", 2026, 1, 1), entry("bbbb0002", 2026, 1, 2)],
        )
        .await
        .unwrap();
        assert_eq!(total, 2);

        let copy = duplicate_log(&store, "aaaa").await.unwrap();
        let logs = load_logs(&store).await.unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[2].id, copy.id);
        assert_eq!(logs[2].date(), logs[0].date());

        let edited = edit_log(
            &store,
            "bbbb0002",
            &LogEdit {
                date: Some(date(2027, 4, 1)),
                pp: Some(999),
                price: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(edited.year(), 2027);
        assert_eq!(edited.pp, 999);
        assert_eq!(edited.price, 1000);

        let removed = delete_log(&store, "aaaa0001").await.unwrap();
        assert_eq!(removed.id, "aaaa0001");
        let logs = load_logs(&store).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id, "bbbb0002");

        assert!(matches!(
            delete_log(&store, "zzzz").await,
            Err(LogbookError::NotFound(_))
        ));

        assert!(clear_logs(&store).await.unwrap());
        assert!(load_logs(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_lookup_writes_nothing() {
        let store = JsonStore::in_memory();
        assert!(matches!(
            delete_log(&store, "zzzz").await,
            Err(LogbookError::NotFound(_))
        ));
        assert_eq!(store.get_raw(FLIGHT_LOGS_KEY).await, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_keep_every_flight() {
        let path = std::env::temp_dir()
            .join(format!("sfc-tracker-logbook-{}", uuid::Uuid::new_v4()))
            .join("store.json");
        let store = std::sync::Arc::new(JsonStore::open(&path).await.unwrap());
        append_logs(&store, vec![entry("seed0001", 2026, 1, 1)])
            .await
            .unwrap();

        let mut handles = Vec::new();
        for day in 1..=20u32 {
            let store_a = store.clone();
            handles.push(tokio::spawn(async move {
                append_logs(&store_a, vec![entry(&format!("save{:04}", day), 2026, 2, day)])
                    .await
                    .map(|_| ())
                    .map_err(LogbookError::from)
            }));
            let store_b = store.clone();
            handles.push(tokio::spawn(async move {
                duplicate_log(&store_b, "seed0001").await.map(|_| ())
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let logs = load_logs(&store).await.unwrap();
        assert_eq!(logs.len(), 41);
        let reopened = JsonStore::open(&path).await.unwrap();
        assert_eq!(load_logs(&reopened).await.unwrap().len(), 41);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_target_persistence() {
        let store = JsonStore::in_memory();
        assert_eq!(load_target(&store).await.unwrap(), TargetStatus::PlatinumStd);

        save_target(&store, TargetStatus::DiamondStd).await.unwrap();
        assert_eq!(load_target(&store).await.unwrap(), TargetStatus::DiamondStd);
        assert_eq!(
            store.get_raw(TARGET_TYPE_KEY).await,
            Some(serde_json::json!("diamond_std"))
        );
    }
}
