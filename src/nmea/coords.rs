// src/nmea/coords.rs
//! NMEA packed-angle to decimal-degree conversion

use crate::error::{Result, TrackerError};

/// Convert an NMEA `DDDMM.MMMM` angle plus hemisphere letter to signed
/// decimal degrees.
///
/// The degree part is every digit before the last two integer digits, located
/// from the decimal point; strings without a fractional minutes part split the
/// same way by length. `S` and `W` negate the result; any other hemisphere value
/// (including an empty field) leaves it positive, matching receiver output
/// where the letter is sometimes omitted.
pub fn to_decimal_degrees(raw: &str, hemisphere: &str) -> Result<f64> {
    if raw.is_empty() {
        return Err(TrackerError::MalformedCoordinate(
            "empty coordinate field".to_string(),
        ));
    }

    let mut dots = 0;
    for c in raw.chars() {
        match c {
            '0'..='9' => {}
            '.' => dots += 1,
            _ => {
                return Err(TrackerError::MalformedCoordinate(format!(
                    "unexpected character in coordinate: {:?}",
                    raw
                )))
            }
        }
    }
    if dots > 1 {
        return Err(TrackerError::MalformedCoordinate(format!(
            "multiple decimal points in coordinate: {:?}",
            raw
        )));
    }

    // Degree part is every digit before the last two integer digits; the
    // integer part ends at the decimal point, or at the end of the string
    // when there is no fractional minutes part.
    let int_len = raw.find('.').unwrap_or(raw.len());
    let Some(deg_len) = int_len.checked_sub(2) else {
        return Err(TrackerError::MalformedCoordinate(format!(
            "no degree/minute split in coordinate: {:?}",
            raw
        )));
    };

    let (deg_str, min_str) = match (raw.get(..deg_len), raw.get(deg_len..)) {
        (Some(d), Some(m)) if !d.is_empty() && !m.is_empty() => (d, m),
        _ => {
            return Err(TrackerError::MalformedCoordinate(format!(
                "no degree/minute split in coordinate: {:?}",
                raw
            )))
        }
    };

    let degrees: f64 = deg_str.parse().map_err(|_| {
        TrackerError::MalformedCoordinate(format!("unparseable degrees: {:?}", deg_str))
    })?;
    let minutes: f64 = min_str.parse().map_err(|_| {
        TrackerError::MalformedCoordinate(format!("unparseable minutes: {:?}", min_str))
    })?;

    if minutes >= 60.0 {
        return Err(TrackerError::MalformedCoordinate(format!(
            "minutes out of range: {:?}",
            min_str
        )));
    }

    let mut decimal = degrees + minutes / 60.0;
    if hemisphere == "S" || hemisphere == "W" {
        decimal = -decimal;
    }
    Ok(decimal)
}

/// Convert a latitude field, rejecting values outside [-90, 90].
pub fn to_latitude(raw: &str, hemisphere: &str) -> Result<f64> {
    let lat = to_decimal_degrees(raw, hemisphere)?;
    if lat.abs() > 90.0 {
        return Err(TrackerError::MalformedCoordinate(format!(
            "latitude out of range: {}",
            lat
        )));
    }
    Ok(lat)
}

/// Convert a longitude field, rejecting values outside [-180, 180].
pub fn to_longitude(raw: &str, hemisphere: &str) -> Result<f64> {
    let lon = to_decimal_degrees(raw, hemisphere)?;
    if lon.abs() > 180.0 {
        return Err(TrackerError::MalformedCoordinate(format!(
            "longitude out of range: {}",
            lon
        )));
    }
    Ok(lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_fixture() {
        let lat = to_decimal_degrees("4916.45", "N").unwrap();
        assert!((lat - 49.274166666666666).abs() < 1e-9);
    }

    #[test]
    fn test_longitude_fixture() {
        let lon = to_decimal_degrees("12311.12", "W").unwrap();
        assert!((lon - (-123.18533333333333)).abs() < 1e-9);
    }

    #[test]
    fn test_southern_hemisphere_negates() {
        let lat = to_decimal_degrees("4807.038", "S").unwrap();
        assert!(lat < 0.0);
        assert!((lat + 48.1173).abs() < 1e-3);
    }

    #[test]
    fn test_no_fractional_minutes() {
        // Length-based split when there is no decimal point.
        let lat = to_decimal_degrees("4916", "N").unwrap();
        assert!((lat - (49.0 + 16.0 / 60.0)).abs() < 1e-9);

        let lon = to_decimal_degrees("12311", "E").unwrap();
        assert!((lon - (123.0 + 11.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_string_rejected() {
        assert!(matches!(
            to_decimal_degrees("", "N"),
            Err(TrackerError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(to_decimal_degrees("abc.def", "N").is_err());
        assert!(to_decimal_degrees(".", "N").is_err());
        assert!(to_decimal_degrees("12.34.56", "N").is_err());
    }

    #[test]
    fn test_minutes_out_of_range_rejected() {
        assert!(to_decimal_degrees("4999.99", "N").is_err());
    }

    #[test]
    fn test_latitude_range_enforced() {
        // 99 degrees packed form is structurally valid but out of range.
        assert!(to_latitude("9916.45", "N").is_err());
        assert!(to_latitude("4916.45", "N").is_ok());
    }

    #[test]
    fn test_longitude_range_enforced() {
        assert!(to_longitude("19311.12", "W").is_err());
        assert!(to_longitude("12311.12", "W").is_ok());
    }

    #[test]
    fn test_missing_hemisphere_stays_positive() {
        let lat = to_decimal_degrees("4916.45", "").unwrap();
        assert!(lat > 0.0);
    }
}
