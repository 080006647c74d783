//! IANA timezone table and offset lookup, backed by `chrono-tz`.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::{Tz, TZ_VARIANTS};

use crate::error::{OverlapError, Result};

/// Every IANA zone name known to the bundled rule tables, sorted.
pub fn list_zones() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    names.sort_unstable();
    names
}

/// Case-insensitive substring search over [`list_zones`].
///
/// An empty (or all-whitespace) query returns the full list.
pub fn search_zones(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    list_zones()
        .into_iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .collect()
}

/// Parse an IANA zone name (e.g. `"Europe/London"`).
///
/// # Errors
/// Returns `OverlapError::InvalidTimezone` for names outside the rule tables.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| OverlapError::InvalidTimezone(name.to_string()))
}

/// The UTC offset `tz` applies at `instant`, DST included.
pub fn offset_for(tz: Tz, instant: DateTime<Utc>) -> FixedOffset {
    tz.offset_from_utc_datetime(&instant.naive_utc()).fix()
}

/// Serde adapter storing a [`Tz`] as its IANA name.
pub(crate) mod serde_tz {
    use chrono_tz::Tz;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(tz.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Tz, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse::<Tz>()
            .map_err(|_| de::Error::custom(format!("unknown timezone '{}'", name)))
    }
}
