//! Wall-clock time for the page footer.
//!
//! The footer names the zone by its abbreviation (`CET`, `UTC`). chrono's
//! `Local` only knows the numeric offset, so the local zone is looked up by
//! IANA name and the time is taken in that zone through `chrono-tz`.
//!
//! Lookup order:
//! 1. `TZ` environment variable, with or without the leading `:`
//! 2. the system zone (`/etc/localtime` and friends, via `iana-time-zone`)
//! 3. UTC

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

/// Current time in the local zone.
pub fn now() -> DateTime<Tz> {
    Utc::now().with_timezone(&local_zone())
}

/// The local zone, falling back to UTC when it cannot be determined.
pub fn local_zone() -> Tz {
    let tz_env = std::env::var("TZ").ok();
    let system = iana_time_zone::get_timezone().ok();
    resolve_zone(tz_env.as_deref(), system.as_deref())
}

/// Pick a zone from the `TZ` value and the system zone name.
///
/// Unparseable candidates are skipped, so a `TZ` like `EST5EDT,M3.2.0` still
/// falls through to the system zone.
pub fn resolve_zone(tz_env: Option<&str>, system: Option<&str>) -> Tz {
    let from_env = tz_env
        .map(|name| name.trim_start_matches(':'))
        .filter(|name| !name.is_empty())
        .and_then(parse_zone);
    if let Some(zone) = from_env {
        debug!(zone = %zone, "time zone from TZ");
        return zone;
    }
    if let Some(zone) = system.and_then(parse_zone) {
        debug!(zone = %zone, "system time zone");
        return zone;
    }
    warn!("could not determine the local time zone, using UTC");
    Tz::UTC
}

fn parse_zone(name: &str) -> Option<Tz> {
    name.parse::<Tz>().ok()
}
