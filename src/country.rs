//! Calling code to country resolution
//!
//! pawaPay identifies countries by ISO 3166-1 alpha-3 code while callers hold
//! phone numbers split into an ITU calling code and a subscriber number. This
//! table is the only country-resolution mechanism in the crate; payouts,
//! deposits and their bulk variants all go through [`resolve_country`].

use crate::error::{PawaPayError, PawaPayResult};

/// (calling code, alpha-3). Codes shared by several countries map to the
/// primary one, e.g. `1` is the United States and `7` is Russia.
const CALLING_CODES: &[(&str, &str)] = &[
    ("1", "USA"),
    ("7", "RUS"),
    ("20", "EGY"),
    ("27", "ZAF"),
    ("30", "GRC"),
    ("31", "NLD"),
    ("32", "BEL"),
    ("33", "FRA"),
    ("34", "ESP"),
    ("36", "HUN"),
    ("39", "ITA"),
    ("40", "ROU"),
    ("41", "CHE"),
    ("43", "AUT"),
    ("44", "GBR"),
    ("45", "DNK"),
    ("46", "SWE"),
    ("47", "NOR"),
    ("48", "POL"),
    ("49", "DEU"),
    ("51", "PER"),
    ("52", "MEX"),
    ("54", "ARG"),
    ("55", "BRA"),
    ("56", "CHL"),
    ("57", "COL"),
    ("60", "MYS"),
    ("61", "AUS"),
    ("62", "IDN"),
    ("63", "PHL"),
    ("64", "NZL"),
    ("65", "SGP"),
    ("66", "THA"),
    ("81", "JPN"),
    ("82", "KOR"),
    ("84", "VNM"),
    ("86", "CHN"),
    ("90", "TUR"),
    ("91", "IND"),
    ("92", "PAK"),
    ("93", "AFG"),
    ("94", "LKA"),
    ("95", "MMR"),
    ("98", "IRN"),
    ("211", "SSD"),
    ("212", "MAR"),
    ("213", "DZA"),
    ("216", "TUN"),
    ("218", "LBY"),
    ("220", "GMB"),
    ("221", "SEN"),
    ("222", "MRT"),
    ("223", "MLI"),
    ("224", "GIN"),
    ("225", "CIV"),
    ("226", "BFA"),
    ("227", "NER"),
    ("228", "TGO"),
    ("229", "BEN"),
    ("230", "MUS"),
    ("231", "LBR"),
    ("232", "SLE"),
    ("233", "GHA"),
    ("234", "NGA"),
    ("235", "TCD"),
    ("236", "CAF"),
    ("237", "CMR"),
    ("238", "CPV"),
    ("239", "STP"),
    ("240", "GNQ"),
    ("241", "GAB"),
    ("242", "COG"),
    ("243", "COD"),
    ("244", "AGO"),
    ("245", "GNB"),
    ("248", "SYC"),
    ("249", "SDN"),
    ("250", "RWA"),
    ("251", "ETH"),
    ("252", "SOM"),
    ("253", "DJI"),
    ("254", "KEN"),
    ("255", "TZA"),
    ("256", "UGA"),
    ("257", "BDI"),
    ("258", "MOZ"),
    ("260", "ZMB"),
    ("261", "MDG"),
    ("263", "ZWE"),
    ("264", "NAM"),
    ("265", "MWI"),
    ("266", "LSO"),
    ("267", "BWA"),
    ("268", "SWZ"),
    ("269", "COM"),
    ("291", "ERI"),
    ("351", "PRT"),
    ("352", "LUX"),
    ("353", "IRL"),
    ("354", "ISL"),
    ("358", "FIN"),
    ("380", "UKR"),
    ("420", "CZE"),
    ("421", "SVK"),
    ("880", "BGD"),
    ("961", "LBN"),
    ("962", "JOR"),
    ("963", "SYR"),
    ("964", "IRQ"),
    ("965", "KWT"),
    ("966", "SAU"),
    ("968", "OMN"),
    ("971", "ARE"),
    ("972", "ISR"),
    ("974", "QAT"),
];

/// Resolve an ITU calling code (`"233"`, `"+233"`) to the alpha-3 country
/// code pawaPay expects (`"GHA"`).
pub fn resolve_country(calling_code: &str) -> PawaPayResult<&'static str> {
    let code = calling_code.trim();
    let code = code.strip_prefix('+').unwrap_or(code);

    CALLING_CODES
        .iter()
        .find(|(calling, _)| *calling == code)
        .map(|(_, alpha3)| *alpha3)
        .ok_or_else(|| PawaPayError::unknown_calling_code(calling_code))
}

/// Reverse lookup, used by the correspondent catalog
pub fn calling_code_for(alpha3: &str) -> Option<&'static str> {
    CALLING_CODES
        .iter()
        .find(|(_, country)| country.eq_ignore_ascii_case(alpha3))
        .map(|(calling, _)| *calling)
}
