// Sectional mileage table
// Sparse: routes missing here need a manual distance

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::airports::normalize_code;

/// Known (from, to, miles) sections; each pair is listed once
const SECTIONS: &[(&str, &str, u32)] = &[
    ("HND", "OKA", 984),
    ("HND", "ISG", 1095),
    ("HND", "CTS", 510),
    ("HND", "FUK", 567),
    ("HND", "ITM", 280),
    ("HND", "KIX", 280),
    ("HND", "NGO", 193),
    ("HND", "KOJ", 601),
    ("HND", "KMJ", 565),
    ("HND", "NGS", 610),
    ("HND", "MYJ", 438),
    ("HND", "TAK", 354),
    ("HND", "HIJ", 414),
    ("HND", "TOY", 176),
    ("HND", "KMQ", 211),
    ("HND", "HKD", 424),
    ("HND", "AKJ", 576),
    ("ITM", "OKA", 739),
    ("ITM", "ISG", 869),
    ("ITM", "CTS", 666),
    ("ITM", "FUK", 282),
    ("ITM", "KOJ", 329),
    ("ITM", "KMJ", 295),
    ("ITM", "NGS", 334),
    ("ITM", "MYJ", 159),
    ("ITM", "KIJ", 246),
    ("ITM", "SDJ", 315),
    ("ITM", "HKD", 536),
    ("ITM", "AKJ", 672),
    ("KIX", "OKA", 739),
    ("KIX", "ISG", 1214),
    ("KIX", "CTS", 666),
    ("KIX", "MMY", 893),
    ("OKA", "FUK", 537),
    ("OKA", "ISG", 247),
    ("OKA", "MMY", 177),
    ("OKA", "NGO", 809),
    ("OKA", "CTS", 1397),
    ("OKA", "SDJ", 1130),
    ("OKA", "HIJ", 524),
    ("OKA", "TAK", 574),
    ("OKA", "KMJ", 466),
    ("ISG", "NGO", 1030),
    ("ISG", "FUK", 715),
    ("CTS", "FUK", 882),
    ("CTS", "NGO", 595),
    ("CTS", "SDJ", 335),
    ("CTS", "KIJ", 382),
    ("CTS", "TOY", 442),
    ("CTS", "KMQ", 466),
    ("CTS", "HIJ", 768),
    ("CTS", "OKJ", 729),
    ("FUK", "NGO", 374),
    ("FUK", "SDJ", 665),
    ("FUK", "KIJ", 521),
    ("FUK", "KMQ", 414),
];

static DEFAULT_TABLE: Lazy<MileageTable> =
    Lazy::new(|| MileageTable::from_sections(SECTIONS.iter().copied()));

/// Point-to-point distances, looked up symmetrically
#[derive(Debug, Clone, Default)]
pub struct MileageTable {
    miles: HashMap<(String, String), u32>,
}

impl MileageTable {
    pub fn from_sections<'a>(sections: impl IntoIterator<Item = (&'a str, &'a str, u32)>) -> Self {
        let miles = sections
            .into_iter()
            .map(|(from, to, miles)| ((normalize_code(from), normalize_code(to)), miles))
            .collect();
        Self { miles }
    }

    /// The built-in table
    pub fn builtin() -> &'static MileageTable {
        &DEFAULT_TABLE
    }

    /// table[from][to], else table[to][from]
    pub fn lookup(&self, from: &str, to: &str) -> Option<u32> {
        let from = normalize_code(from);
        let to = normalize_code(to);
        self.miles
            .get(&(from.clone(), to.clone()))
            .or_else(|| self.miles.get(&(to, from)))
            .copied()
    }

    /// Distance in miles, 0 when the pair is unknown
    pub fn distance(&self, from: &str, to: &str) -> u32 {
        self.lookup(from, to).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.miles.len()
    }

    #[cfg(test)]
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.miles
            .iter()
            .map(|((from, to), miles)| (from.as_str(), to.as_str(), *miles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_distances() {
        let table = MileageTable::builtin();
        assert_eq!(table.distance("ITM", "OKA"), 739);
        assert_eq!(table.distance("OKA", "ISG"), 247);
        assert_eq!(table.distance("hnd", "cts"), 510);
    }

    #[test]
    fn test_symmetry() {
        let table = MileageTable::builtin();
        for (from, to, miles) in table.pairs() {
            assert_eq!(table.distance(from, to), miles);
            assert_eq!(table.distance(to, from), miles, "{} <-> {}", from, to);
        }
    }

    #[test]
    fn test_each_pair_listed_once() {
        let mut seen = HashSet::new();
        for (from, to, _) in SECTIONS {
            let key = if from < to { (*from, *to) } else { (*to, *from) };
            assert!(seen.insert(key), "duplicate section {}-{}", from, to);
        }
        assert_eq!(MileageTable::builtin().len(), SECTIONS.len());
    }

    #[test]
    fn test_unknown_pair_is_zero() {
        let table = MileageTable::builtin();
        assert_eq!(table.lookup("NRT", "TSJ"), None);
        assert_eq!(table.distance("NRT", "TSJ"), 0);
        assert_eq!(table.distance("LAX", "HND"), 0);
    }

    #[test]
    fn test_custom_table() {
        let table = MileageTable::from_sections([("aaa", "bbb", 100)]);
        assert_eq!(table.distance("BBB", "AAA"), 100);
    }
}
