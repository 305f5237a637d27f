// Statistics models for the yearly dashboard

use chrono::Datelike;

use super::flight_log::FlightLog;

/// Status the user is working toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetStatus {
    BronzeLs,
    BronzeStd,
    PlatinumLs,
    #[default]
    PlatinumStd,
    DiamondLs5m,
    DiamondLs4m,
    DiamondStd,
}

impl TargetStatus {
    pub const ALL: [TargetStatus; 7] = [
        TargetStatus::BronzeLs,
        TargetStatus::BronzeStd,
        TargetStatus::PlatinumLs,
        TargetStatus::PlatinumStd,
        TargetStatus::DiamondLs5m,
        TargetStatus::DiamondLs4m,
        TargetStatus::DiamondStd,
    ];

    /// Key stored under `target_type`
    pub fn key(&self) -> &'static str {
        match self {
            TargetStatus::BronzeLs => "bronze_ls",
            TargetStatus::BronzeStd => "bronze_std",
            TargetStatus::PlatinumLs => "platinum_ls",
            TargetStatus::PlatinumStd => "platinum_std",
            TargetStatus::DiamondLs5m => "diamond_ls_5m",
            TargetStatus::DiamondLs4m => "diamond_ls_4m",
            TargetStatus::DiamondStd => "diamond_std",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetStatus::BronzeLs => "Bronze (Life Solution)",
            TargetStatus::BronzeStd => "Bronze (standard)",
            TargetStatus::PlatinumLs => "Platinum (Life Solution)",
            TargetStatus::PlatinumStd => "Platinum / SFC (standard)",
            TargetStatus::DiamondLs5m => "Diamond (LS / ¥5M)",
            TargetStatus::DiamondLs4m => "Diamond (LS / ¥4M)",
            TargetStatus::DiamondStd => "Diamond (standard)",
        }
    }

    /// PP needed within the calendar year
    pub fn pp(&self) -> u64 {
        match self {
            TargetStatus::BronzeLs => 15_000,
            TargetStatus::BronzeStd => 30_000,
            TargetStatus::PlatinumLs => 30_000,
            TargetStatus::PlatinumStd => 50_000,
            TargetStatus::DiamondLs5m => 50_000,
            TargetStatus::DiamondLs4m => 80_000,
            TargetStatus::DiamondStd => 100_000,
        }
    }

    /// Parse a stored key; unknown keys fall back to the default target
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .unwrap_or_default()
    }
}

/// Aggregated numbers for one calendar year
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub target: TargetStatus,
    pub flights: usize,
    pub current_pp: u64,
    pub spent: u64,
    /// Yen per point, 0.0 with no points
    pub average_unit_price: f64,
    /// 0..=100
    pub progress_percent: f64,
    pub remaining_pp: u64,
    /// PP per month, January first
    pub monthly_pp: [u64; 12],
}

impl YearSummary {
    pub fn from_logs(logs: &[FlightLog], year: i32, target: TargetStatus) -> Self {
        let mut summary = YearSummary {
            year,
            target,
            flights: 0,
            current_pp: 0,
            spent: 0,
            average_unit_price: 0.0,
            progress_percent: 0.0,
            remaining_pp: target.pp(),
            monthly_pp: [0; 12],
        };

        for log in logs.iter().filter(|l| l.year() == year) {
            summary.flights += 1;
            // imported values are unbounded
            summary.current_pp = summary.current_pp.saturating_add(log.pp);
            summary.spent = summary.spent.saturating_add(log.price);
            let month = &mut summary.monthly_pp[log.date().month0() as usize];
            *month = month.saturating_add(log.pp);
        }

        if summary.current_pp > 0 {
            summary.average_unit_price = summary.spent as f64 / summary.current_pp as f64;
        }
        summary.progress_percent =
            (summary.current_pp as f64 / target.pp() as f64 * 100.0).min(100.0);
        summary.remaining_pp = target.pp().saturating_sub(summary.current_pp);

        summary
    }

    pub fn achieved(&self) -> bool {
        self.remaining_pp == 0
    }
}
