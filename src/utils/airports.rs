// Airport reference data (Japanese domestic network)

/// A known airport code with its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
}

const fn airport(code: &'static str, name: &'static str) -> Airport {
    Airport { code, name }
}

pub static AIRPORTS: [Airport; 50] = [
    airport("HND", "Tokyo (Haneda)"),
    airport("NRT", "Tokyo (Narita)"),
    airport("ITM", "Osaka (Itami)"),
    airport("KIX", "Osaka (Kansai)"),
    airport("UKB", "Kobe"),
    airport("NGO", "Nagoya (Chubu)"),
    airport("CTS", "Sapporo (New Chitose)"),
    airport("OKA", "Okinawa (Naha)"),
    airport("FUK", "Fukuoka"),
    airport("ISG", "Ishigaki"),
    airport("MMY", "Miyako"),
    airport("AKJ", "Asahikawa"),
    airport("HKD", "Hakodate"),
    airport("KUH", "Kushiro"),
    airport("MMB", "Memanbetsu"),
    airport("OBO", "Obihiro"),
    airport("WKJ", "Wakkanai"),
    airport("RIS", "Rishiri"),
    airport("OIR", "Okushiri"),
    airport("AOJ", "Aomori"),
    airport("OJA", "Odate-Noshiro"),
    airport("AXT", "Akita"),
    airport("SYO", "Shonai"),
    airport("SDJ", "Sendai"),
    airport("FKS", "Fukushima"),
    airport("KIJ", "Niigata"),
    airport("HAC", "Hachijojima"),
    airport("TOY", "Toyama"),
    airport("KMQ", "Komatsu"),
    airport("NTQ", "Noto"),
    airport("OKJ", "Okayama"),
    airport("HIJ", "Hiroshima"),
    airport("IWK", "Iwakuni"),
    airport("UBJ", "Yamaguchi-Ube"),
    airport("TTJ", "Tottori"),
    airport("YGJ", "Yonago"),
    airport("IWJ", "Hagi-Iwami"),
    airport("TAK", "Takamatsu"),
    airport("TKS", "Tokushima"),
    airport("MYJ", "Matsuyama"),
    airport("KCZ", "Kochi"),
    airport("KKJ", "Kitakyushu"),
    airport("HSG", "Saga"),
    airport("OIT", "Oita"),
    airport("KMJ", "Kumamoto"),
    airport("NGS", "Nagasaki"),
    airport("KMI", "Miyazaki"),
    airport("KOJ", "Kagoshima"),
    airport("FUJ", "Goto-Fukue"),
    airport("TSJ", "Tsushima"),
];

/// Normalize user input into a code (trimmed, upper case)
pub fn normalize_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

/// Look up a known airport by code
pub fn find(code: &str) -> Option<&'static Airport> {
    let code = normalize_code(code);
    AIRPORTS.iter().find(|a| a.code == code)
}

/// Display name for a code; unknown codes are shown as given
pub fn display_name(code: &str) -> String {
    match find(code) {
        Some(a) => a.name.to_string(),
        None => code.trim().to_string(),
    }
}

/// Airports whose name or code contains the query (case-insensitive)
pub fn search(query: &str) -> Vec<&'static Airport> {
    let query = query.trim().to_lowercase();
    AIRPORTS
        .iter()
        .filter(|a| {
            query.is_empty()
                || a.name.to_lowercase().contains(&query)
                || a.code.to_lowercase().contains(&query)
        })
        .collect()
}
