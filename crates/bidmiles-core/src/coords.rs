//! Free-form coordinate text normalization.
//!
//! Accepts the formats that show up in bid sheets and survey exports:
//!
//! - `45.490665, -118.416460`
//! - `45.490665°, -118.416460°` (degree glyphs on either or both values)
//! - `Lat: 36.342148° N Lon: 79.818933° W`
//!
//! Commas and whitespace are interchangeable separators and may repeat.

use crate::error::ParseError;
use crate::geo::GeoPoint;

const DEGREE_GLYPH: char = '\u{00B0}';
const LABELS: [&str; 2] = ["Lat:", "Lon:"];

/// Parses a coordinate string into a [`GeoPoint`].
///
/// When any token is a hemisphere letter (`N`, `S`, `E`, `W`, any case) the
/// input must be exactly `<lat> <N|S> <lon> <E|W>`. Otherwise the first two
/// tokens are read as decimal latitude and longitude and any surplus tokens
/// are ignored.
///
/// # Errors
///
/// - [`ParseError::InsufficientTokens`] if fewer than two values are present.
/// - [`ParseError::InvalidNumber`] if a value token is not a finite number.
/// - [`ParseError::MalformedHemisphere`] if the cardinal form is out of order,
///   repeats a hemisphere, or carries a signed magnitude.
/// - [`ParseError::OutOfRange`] if the result is not a valid point.
pub fn parse_coordinates(text: &str) -> Result<GeoPoint, ParseError> {
    let mut cleaned = text.trim().replace(DEGREE_GLYPH, "");
    for label in LABELS {
        cleaned = cleaned.replace(label, " ");
    }

    let tokens: Vec<&str> = cleaned
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.iter().any(|t| hemisphere(t).is_some()) {
        parse_cardinal(&tokens)
    } else {
        parse_decimal_pair(&tokens)
    }
}

fn parse_decimal_pair(tokens: &[&str]) -> Result<GeoPoint, ParseError> {
    let [lat, lon, ..] = tokens else {
        return Err(ParseError::InsufficientTokens {
            found: tokens.len(),
        });
    };
    GeoPoint::new(parse_number(lat)?, parse_number(lon)?)
}

fn parse_cardinal(tokens: &[&str]) -> Result<GeoPoint, ParseError> {
    let [lat, lat_hemi, lon, lon_hemi] = tokens else {
        return Err(malformed(format!(
            "expected 4 tokens `<lat> <N|S> <lon> <E|W>`, found {}",
            tokens.len()
        )));
    };

    let lat_sign = match hemisphere(lat_hemi) {
        Some('N') => 1.0,
        Some('S') => -1.0,
        _ => {
            return Err(malformed(format!(
                "expected N or S after latitude, found \"{lat_hemi}\""
            )))
        }
    };
    let lon_sign = match hemisphere(lon_hemi) {
        Some('E') => 1.0,
        Some('W') => -1.0,
        _ => {
            return Err(malformed(format!(
                "expected E or W after longitude, found \"{lon_hemi}\""
            )))
        }
    };

    let lat = parse_magnitude(lat)?;
    let lon = parse_magnitude(lon)?;
    GeoPoint::new(lat_sign * lat, lon_sign * lon)
}

/// Uppercased hemisphere letter if `token` is exactly one of `NSEW`.
fn hemisphere(token: &str) -> Option<char> {
    let mut chars = token.chars();
    let c = chars.next()?.to_ascii_uppercase();
    (chars.next().is_none() && matches!(c, 'N' | 'S' | 'E' | 'W')).then_some(c)
}

fn parse_number(token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            token: token.to_owned(),
        })
}

// The hemisphere letter carries the sign.
fn parse_magnitude(token: &str) -> Result<f64, ParseError> {
    if token.starts_with(['-', '+']) {
        return Err(malformed(format!(
            "signed magnitude \"{token}\" with a hemisphere letter"
        )));
    }
    parse_number(token)
}

fn malformed(reason: String) -> ParseError {
    ParseError::MalformedHemisphere { reason }
}

#[cfg(test)]
#[path = "coords_test.rs"]
mod tests;
