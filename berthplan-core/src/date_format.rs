use chrono::{DateTime, NaiveDate, NaiveDateTime};

static OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Reformats a source timestamp to `YYYY-MM-DDTHH:MM:SS.000Z`.
///
/// Values containing a `T` are read as naive local date-times, with or without fractional
/// seconds. Other values are read as ISO-8601 dates or space separated date-times with an
/// optional offset (`Z` meaning `+00:00`); the wall-clock time is kept as is. A value that
/// cannot be parsed is returned unchanged so a single bad timestamp never aborts a document.
pub fn format_datetime(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let parsed = if value.contains('T') {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
    } else {
        parse_iso_with_offset(&value.replace('Z', "+00:00"))
    };

    match parsed {
        Some(v) => v.format(OUTPUT_FORMAT).to_string(),
        None => value.to_owned(),
    }
}

fn parse_iso_with_offset(value: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M%:z"]
        .iter()
        .find_map(|f| DateTime::parse_from_str(value, f).ok())
        .map(|v| v.naive_local())
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|v| v.and_hms_opt(0, 0, 0))
        })
}
