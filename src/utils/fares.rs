// Fare tables for the two fare eras
// Rates are integer percentages so point math stays exact

use std::fmt;
use std::str::FromStr;

/// Per-segment boarding bonus; only these three amounts exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardingBonus {
    None,
    Transit,
    Full,
}

impl BoardingBonus {
    pub fn points(self) -> u32 {
        match self {
            BoardingBonus::None => 0,
            BoardingBonus::Transit => 200,
            BoardingBonus::Full => 400,
        }
    }
}

/// One fare class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareDefinition {
    pub key: &'static str,
    pub label: &'static str,
    /// Accrual rate in percent (120 = 1.20x)
    pub rate_percent: u32,
    pub bonus: BoardingBonus,
}

impl FareDefinition {
    pub fn rate(&self) -> f64 {
        self.rate_percent as f64 / 100.0
    }
}

const fn fare(
    key: &'static str,
    label: &'static str,
    rate_percent: u32,
    bonus: BoardingBonus,
) -> FareDefinition {
    FareDefinition {
        key,
        label,
        rate_percent,
        bonus,
    }
}

static LEGACY_FARES: [FareDefinition; 6] = [
    fare("old_fare1_3", "Fare 1-3 (Premium etc. 125%)", 125, BoardingBonus::Full),
    fare("old_fare4", "Fare 4 (ANA FLEX etc. 100%)", 100, BoardingBonus::Full),
    fare("old_fare5", "Fare 5 (ANA VALUE etc. 75%)", 75, BoardingBonus::Full),
    fare("old_fare6", "Fare 6 (Value Transit 75%)", 75, BoardingBonus::Transit),
    fare("old_fare7", "Fare 7 (SUPER VALUE etc. 75%)", 75, BoardingBonus::None),
    fare("old_fare8", "Fare 8 (SV SALE etc. 50%)", 50, BoardingBonus::None),
];

static CURRENT_FARES: [FareDefinition; 9] = [
    fare("p_flex", "Premium Fare (150%)", 150, BoardingBonus::Full),
    fare("p_value", "Premium Value (125%)", 125, BoardingBonus::Full),
    fare("p_simple", "Premium Simple (120%)", 120, BoardingBonus::Full),
    fare("flex", "Flex / Fare 1 (100%)", 100, BoardingBonus::Full),
    fare("value", "Value / Fare 2 (75%)", 75, BoardingBonus::Full),
    fare("value_transit", "Value Transit / Fare 6 (75%)", 75, BoardingBonus::Transit),
    fare("super_value", "Super Value / Fare 7 (75%)", 75, BoardingBonus::None),
    fare("simple", "Simple / Fare 8 equivalent (70%)", 70, BoardingBonus::None),
    fare("sale", "Sale / Fare 8 (50%)", 50, BoardingBonus::None),
];

/// Fare regime in effect (legacy until 5/18, current from 5/19)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FareEra {
    #[default]
    Legacy,
    Current,
}

impl FareEra {
    pub fn label(&self) -> &'static str {
        match self {
            FareEra::Legacy => "Legacy fares (until 5/18)",
            FareEra::Current => "Current fares (from 5/19)",
        }
    }

    pub fn default_key(&self) -> &'static str {
        match self {
            FareEra::Legacy => "old_fare7",
            FareEra::Current => "p_simple",
        }
    }

    pub fn fares(&self) -> &'static [FareDefinition] {
        match self {
            FareEra::Legacy => &LEGACY_FARES,
            FareEra::Current => &CURRENT_FARES,
        }
    }

    pub fn find(&self, key: &str) -> Option<&'static FareDefinition> {
        self.fares().iter().find(|f| f.key == key.trim())
    }

    pub fn default_fare(&self) -> &'static FareDefinition {
        // Every era table contains its default key
        self.find(self.default_key())
            .unwrap_or(&self.fares()[0])
    }

    /// The fare for `key`, or this era's default fare
    pub fn resolve(&self, key: &str) -> &'static FareDefinition {
        self.find(key).unwrap_or_else(|| self.default_fare())
    }
}

impl fmt::Display for FareEra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FareEra::Legacy => "legacy",
            FareEra::Current => "current",
        })
    }
}

impl FromStr for FareEra {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "old" => Ok(FareEra::Legacy),
            "current" | "new" => Ok(FareEra::Current),
            _ => Err(format!("Unknown fare era: {}", s)),
        }
    }
}

/// The fare and bonus picked in the calculator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareSelection {
    era: FareEra,
    fare_key: String,
    bonus: BoardingBonus,
}

impl FareSelection {
    pub fn new(era: FareEra) -> Self {
        let fare = era.default_fare();
        Self {
            era,
            fare_key: fare.key.to_string(),
            bonus: fare.bonus,
        }
    }

    /// Switch era: fare key goes back to the era default, bonus follows it
    pub fn switch_era(&mut self, era: FareEra) {
        *self = Self::new(era);
    }

    /// Pick a fare; the bonus is re-derived from it
    pub fn select_fare(&mut self, key: &str) {
        let fare = self.era.resolve(key);
        self.fare_key = fare.key.to_string();
        self.bonus = fare.bonus;
    }

    /// User override, independent of the fare from here on
    pub fn override_bonus(&mut self, bonus: BoardingBonus) {
        self.bonus = bonus;
    }

    pub fn era(&self) -> FareEra {
        self.era
    }

    pub fn fare_key(&self) -> &str {
        &self.fare_key
    }

    pub fn fare(&self) -> &'static FareDefinition {
        self.era.resolve(&self.fare_key)
    }

    pub fn bonus(&self) -> BoardingBonus {
        self.bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys_exist() {
        for era in [FareEra::Legacy, FareEra::Current] {
            assert!(era.find(era.default_key()).is_some());
        }
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(FareEra::Current.resolve("p_flex").rate_percent, 150);
        assert_eq!(FareEra::Current.resolve("old_fare4").key, "p_simple");
        assert_eq!(FareEra::Legacy.resolve("nope").key, "old_fare7");
    }

    #[test]
    fn test_bonus_points() {
        assert_eq!(BoardingBonus::None.points(), 0);
        assert_eq!(BoardingBonus::Transit.points(), 200);
        assert_eq!(BoardingBonus::Full.points(), 400);
    }

    #[test]
    fn test_switch_era_resets_key_and_bonus() {
        let mut selection = FareSelection::new(FareEra::Legacy);
        assert_eq!(selection.fare_key(), "old_fare7");
        assert_eq!(selection.bonus(), BoardingBonus::None);

        selection.switch_era(FareEra::Current);
        assert_eq!(selection.fare_key(), "p_simple");
        assert_eq!(selection.bonus(), BoardingBonus::Full);

        selection.select_fare("sale");
        selection.switch_era(FareEra::Legacy);
        assert_eq!(selection.fare_key(), "old_fare7");
        assert_eq!(selection.bonus(), BoardingBonus::None);
    }

    #[test]
    fn test_select_fare_rederives_bonus() {
        let mut selection = FareSelection::new(FareEra::Current);
        selection.select_fare("value_transit");
        assert_eq!(selection.bonus(), BoardingBonus::Transit);
        selection.select_fare("unknown");
        assert_eq!(selection.fare_key(), "p_simple");
        assert_eq!(selection.bonus(), BoardingBonus::Full);
    }

    #[test]
    fn test_bonus_override_is_decoupled() {
        let mut selection = FareSelection::new(FareEra::Current);
        selection.override_bonus(BoardingBonus::None);
        assert_eq!(selection.fare().bonus, BoardingBonus::Full);
        assert_eq!(selection.bonus(), BoardingBonus::None);
    }

    #[test]
    fn test_era_from_str() {
        assert_eq!("Current".parse::<FareEra>(), Ok(FareEra::Current));
        assert_eq!("old".parse::<FareEra>(), Ok(FareEra::Legacy));
        assert!("future".parse::<FareEra>().is_err());
    }
}
