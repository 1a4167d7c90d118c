// src/nmea/sentence.rs
//! NMEA sentence frame validation and fix extraction

use super::{coords, time};
use crate::error::{Result, TrackerError};
use crate::position::Position;

/// Decoded sentence kind. Only the two fix-bearing kinds are interpreted;
/// everything else the receiver emits lands in `Unsupported` and carries no
/// position.
#[derive(Debug, Clone, PartialEq)]
pub enum FixKind {
    /// GGA fix data: altitude present, time-of-day only. Presence of lat/lon
    /// implies a usable fix; there is no explicit validity flag.
    FixData(Option<Position>),
    /// RMC recommended minimum: explicit active/void status and a calendar
    /// date, never an altitude. A void status yields no position even with
    /// well-formed coordinates.
    RecommendedMinimum(Option<Position>),
    Unsupported,
}

impl FixKind {
    pub fn position(&self) -> Option<Position> {
        match self {
            FixKind::FixData(pos) | FixKind::RecommendedMinimum(pos) => *pos,
            FixKind::Unsupported => None,
        }
    }
}

/// Decode one raw line into at most one position.
///
/// Checksum and framing failures are errors; an unsupported sentence kind, a
/// void RMC status, or missing required fields are a normal `Ok(None)`.
pub fn decode(line: &str) -> Result<Option<Position>> {
    Ok(decode_sentence(line)?.position())
}

/// Validate the frame and dispatch on sentence kind.
pub fn decode_sentence(line: &str) -> Result<FixKind> {
    let payload = frame_payload(line)?;
    let fields: Vec<&str> = payload.split(',').collect();

    // Talker-agnostic dispatch: GPGGA, GNGGA, GLGGA, ... all carry the same
    // GGA body.
    let address = fields[0];
    let kind = address
        .get(address.len().saturating_sub(3)..)
        .unwrap_or_default();

    match kind {
        "GGA" => decode_gga(&fields),
        "RMC" => decode_rmc(&fields),
        _ => Ok(FixKind::Unsupported),
    }
}

/// Strip the frame and verify the checksum, returning the payload between
/// `$` and `*`. A missing checksum is tolerated; a present-but-wrong one is
/// rejected.
fn frame_payload(line: &str) -> Result<&str> {
    let payload = line
        .strip_prefix('$')
        .ok_or_else(|| TrackerError::UnparseableSentence(format!("no leading '$': {:?}", line)))?;

    let Some((body, checksum)) = payload.rsplit_once('*') else {
        return Ok(payload);
    };

    let expected = u8::from_str_radix(checksum.trim(), 16).map_err(|_| {
        TrackerError::UnparseableSentence(format!("bad checksum field: {:?}", checksum))
    })?;

    let actual = body.bytes().fold(0u8, |acc, b| acc ^ b);
    if actual != expected {
        return Err(TrackerError::ChecksumInvalid(format!(
            "expected {:02X}, computed {:02X}",
            expected, actual
        )));
    }

    Ok(body)
}

/// GGA body: time(1), lat(2), N/S(3), lon(4), E/W(5), quality(6), sats(7),
/// hdop(8), altitude(9).
fn decode_gga(fields: &[&str]) -> Result<FixKind> {
    if fields.len() < 6 || fields[2].is_empty() || fields[4].is_empty() {
        return Ok(FixKind::FixData(None));
    }

    let latitude = coords::to_latitude(fields[2], fields[3])?;
    let longitude = coords::to_longitude(fields[4], fields[5])?;

    let altitude = fields
        .get(9)
        .filter(|f| !f.is_empty())
        .and_then(|f| f.parse::<f64>().ok());

    let timestamp = time::parse_hms(fields[1]).and_then(time::time_of_day_to_epoch);

    Ok(FixKind::FixData(Some(Position::new(
        latitude, longitude, altitude, timestamp,
    ))))
}

/// RMC body: time(1), status(2), lat(3), N/S(4), lon(5), E/W(6), speed(7),
/// course(8), date(9). Status must be `A` (active); `V` marks a void fix.
fn decode_rmc(fields: &[&str]) -> Result<FixKind> {
    if fields.len() < 7 || fields[3].is_empty() || fields[5].is_empty() || fields[2] != "A" {
        return Ok(FixKind::RecommendedMinimum(None));
    }

    let latitude = coords::to_latitude(fields[3], fields[4])?;
    let longitude = coords::to_longitude(fields[5], fields[6])?;

    let date = fields.get(9).and_then(|f| time::parse_ddmmyy(f));
    let timestamp = time::date_time_to_epoch(date, time::parse_hms(fields[1]));

    Ok(FixKind::RecommendedMinimum(Some(Position::new(
        latitude, longitude, None, timestamp,
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &str = "$GPGGA,123519,4916.45,N,12311.12,W,1,08,0.9,545.4,M,46.9,M,,*5F";
    const GGA_GN: &str = "$GNGGA,123519,4916.45,N,12311.12,W,1,08,0.9,545.4,M,46.9,M,,*41";
    const RMC_ACTIVE: &str = "$GPRMC,123519,A,4916.45,N,12311.12,W,022.4,084.4,230394,003.1,W*72";
    const RMC_VOID: &str = "$GPRMC,123519,V,4916.45,N,12311.12,W,022.4,084.4,230394,003.1,W*65";
    const GSV: &str = "$GPGSV,3,1,12,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*7F";

    #[test]
    fn test_gga_decodes_position() {
        let pos = decode(GGA).unwrap().unwrap();
        assert!((pos.latitude - 49.274166666666666).abs() < 1e-9);
        assert!((pos.longitude + 123.18533333333333).abs() < 1e-9);
        assert_eq!(pos.altitude, Some(545.4));
        assert!(pos.timestamp.is_some());
    }

    #[test]
    fn test_talker_agnostic_dispatch() {
        let pos = decode(GGA_GN).unwrap().unwrap();
        assert!((pos.latitude - 49.274166666666666).abs() < 1e-9);
    }

    #[test]
    fn test_rmc_active_decodes_position() {
        let kind = decode_sentence(RMC_ACTIVE).unwrap();
        let pos = match kind {
            FixKind::RecommendedMinimum(Some(pos)) => pos,
            other => panic!("unexpected kind: {:?}", other),
        };
        assert!((pos.latitude - 49.274166666666666).abs() < 1e-9);
        assert_eq!(pos.altitude, None);
        // Date field 230394 resolves independently of today's clock date.
        assert!(pos.timestamp.is_some());
    }

    #[test]
    fn test_rmc_void_yields_no_position() {
        let kind = decode_sentence(RMC_VOID).unwrap();
        assert_eq!(kind, FixKind::RecommendedMinimum(None));
        assert_eq!(decode(RMC_VOID).unwrap(), None);
    }

    #[test]
    fn test_unsupported_kind_ignored() {
        assert_eq!(decode_sentence(GSV).unwrap(), FixKind::Unsupported);
        assert_eq!(decode(GSV).unwrap(), None);
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        let corrupted = "$GPGGA,123519,4916.45,N,12311.12,W,1,08,0.9,545.4,M,46.9,M,,*00";
        assert!(matches!(
            decode(corrupted),
            Err(TrackerError::ChecksumInvalid(_))
        ));
    }

    #[test]
    fn test_missing_checksum_tolerated() {
        let bare = "$GPGGA,123519,4916.45,N,12311.12,W,1,08,0.9,545.4,M,46.9,M,,";
        assert!(decode(bare).unwrap().is_some());
    }

    #[test]
    fn test_non_sentence_rejected() {
        assert!(matches!(
            decode("not an nmea line"),
            Err(TrackerError::UnparseableSentence(_))
        ));
    }

    #[test]
    fn test_gga_empty_coordinates_yield_nothing() {
        let empty = "$GPGGA,123519,,,,,0,00,,,M,,M,,*6B";
        assert_eq!(decode(empty).unwrap(), None);
    }

    #[test]
    fn test_gga_out_of_range_latitude_rejected() {
        let bad = "$GPGGA,123519,9916.45,N,12311.12,W,1,08,0.9,545.4,M,46.9,M,,*52";
        assert!(matches!(
            decode(bad),
            Err(TrackerError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn test_gga_without_altitude() {
        // Truncated body still yields a fix; altitude stays absent.
        let short = "$GPGGA,123519,4916.45,N,12311.12,W";
        let pos = decode(short).unwrap().unwrap();
        assert_eq!(pos.altitude, None);
    }
}
