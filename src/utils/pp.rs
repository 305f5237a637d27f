// Premium point (PP) calculation
//
// Points per segment are floor(miles × rate × 2) + boarding bonus. The ×2 is
// applied before flooring: 739 mi at 120% is floor(1773.6) = 1773, whereas
// flooring first and doubling afterwards would give 1772.

use super::airports::normalize_code;
use super::fares::FareSelection;
use super::mileage::MileageTable;

/// One-way or round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "One-way",
            TripType::RoundTrip => "Round trip",
        }
    }

    fn multiplier(self) -> u64 {
        match self {
            TripType::OneWay => 1,
            TripType::RoundTrip => 2,
        }
    }
}

/// Origin, optional connecting airport, destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub origin: String,
    pub via: Option<String>,
    pub destination: String,
}

impl Route {
    /// Codes are upper-cased; a blank via means a direct flight
    pub fn new(origin: &str, via: Option<&str>, destination: &str) -> Self {
        Self {
            origin: normalize_code(origin),
            via: via.map(normalize_code).filter(|v| !v.is_empty()),
            destination: normalize_code(destination),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            origin: self.destination.clone(),
            via: self.via.clone(),
            destination: self.origin.clone(),
        }
    }

    /// Table distance of each leg: one leg when direct, two via a connection
    pub fn leg_distances(&self, table: &MileageTable) -> Vec<u32> {
        match &self.via {
            Some(via) => vec![
                table.distance(&self.origin, via),
                table.distance(via, &self.destination),
            ],
            None => vec![table.distance(&self.origin, &self.destination)],
        }
    }

    /// Total one-way distance before any manual override
    pub fn default_distance(&self, table: &MileageTable) -> u32 {
        self.leg_distances(table).iter().sum()
    }
}

/// Everything the calculator needs, as one snapshot
#[derive(Debug, Clone)]
pub struct PpInput<'a> {
    pub route: &'a Route,
    pub fare: &'a FareSelection,
    /// Manual total one-way distance; `None` uses the table
    pub distance_override: Option<u32>,
    pub trip_type: TripType,
    /// Ticket price in yen (round-trip total for round trips)
    pub ticket_price: u64,
}

/// Points earned on one flown section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPoints {
    pub from: String,
    pub to: String,
    pub miles: u32,
    /// floor(miles × rate × 2)
    pub flown: u64,
    pub bonus: u32,
    pub points: u64,
}

impl SegmentPoints {
    fn new(from: &str, to: &str, miles: u32, rate_percent: u32, bonus: u32) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            miles,
            flown: flown_points(miles, rate_percent),
            bonus,
            points: segment_points(miles, rate_percent, bonus),
        }
    }
}

/// How the one-way base points were derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Breakdown {
    /// No connection: one section, one bonus
    Direct(SegmentPoints),
    /// Connection with table distances: each section rounded and boosted on its own
    Segmented([SegmentPoints; 2]),
    /// Connection with a manual total: rounded once, bonus counted twice
    Combined { miles: u32, flown: u64, bonus: u32, points: u64 },
}

/// Calculator output
#[derive(Debug, Clone, PartialEq)]
pub struct PpResult {
    /// One-way distance used for the calculation
    pub distance: u32,
    pub rate_percent: u32,
    /// One-way points
    pub base_pp: u64,
    /// Points for the whole trip (doubled for round trips)
    pub total_pp: u64,
    /// Yen per point, 0.0 when no points are earned
    pub per_point_price: f64,
    pub breakdown: Breakdown,
}

/// floor(miles × rate × 2), in exact integer arithmetic
pub fn flown_points(miles: u32, rate_percent: u32) -> u64 {
    (miles as u64 * rate_percent as u64 * 2) / 100
}

/// Points for one section including its boarding bonus
pub fn segment_points(miles: u32, rate_percent: u32, bonus: u32) -> u64 {
    flown_points(miles, rate_percent) + bonus as u64
}

/// Ticket price divided by points, 0.0 instead of dividing by zero
pub fn per_point_price(ticket_price: u64, total_pp: u64) -> f64 {
    if total_pp == 0 {
        0.0
    } else {
        ticket_price as f64 / total_pp as f64
    }
}

/// Compute one-way and trip points for a full input snapshot
pub fn compute_pp(input: &PpInput<'_>, table: &MileageTable) -> PpResult {
    let route = input.route;
    let rate_percent = input.fare.fare().rate_percent;
    let bonus = input.fare.bonus().points();

    let (distance, breakdown) = match &route.via {
        Some(via) => {
            let dist1 = table.distance(&route.origin, via);
            let dist2 = table.distance(via, &route.destination);
            let table_total = dist1 + dist2;
            let total = input.distance_override.unwrap_or(table_total);

            if total == table_total {
                let first = SegmentPoints::new(&route.origin, via, dist1, rate_percent, bonus);
                let second =
                    SegmentPoints::new(via, &route.destination, dist2, rate_percent, bonus);
                (total, Breakdown::Segmented([first, second]))
            } else {
                let flown = flown_points(total, rate_percent);
                let bonus = bonus * 2;
                (
                    total,
                    Breakdown::Combined {
                        miles: total,
                        flown,
                        bonus,
                        points: flown + bonus as u64,
                    },
                )
            }
        }
        None => {
            let total = input
                .distance_override
                .unwrap_or_else(|| table.distance(&route.origin, &route.destination));
            let segment = SegmentPoints::new(
                &route.origin,
                &route.destination,
                total,
                rate_percent,
                bonus,
            );
            (total, Breakdown::Direct(segment))
        }
    };

    let base_pp = match &breakdown {
        Breakdown::Direct(segment) => segment.points,
        Breakdown::Segmented([first, second]) => first.points + second.points,
        Breakdown::Combined { points, .. } => *points,
    };
    let total_pp = base_pp * input.trip_type.multiplier();

    PpResult {
        distance,
        rate_percent,
        base_pp,
        total_pp,
        per_point_price: per_point_price(input.ticket_price, total_pp),
        breakdown,
    }
}
