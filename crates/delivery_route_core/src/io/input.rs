use std::{
    fmt, fs,
    io::{self, Read},
};

use super::options::{IoFormat, RouteOptions};
use crate::{Delivery, Error, GeoPoint, Located, Result};

/// A stop read from plain text: coordinates plus an optional label.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStop {
    pub point: GeoPoint,
    pub label: Option<String>,
}

impl Located for TextStop {
    fn latitude(&self) -> f64 {
        self.point.lat
    }

    fn longitude(&self) -> f64 {
        self.point.lng
    }
}

impl fmt::Display for TextStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} {label}", self.point),
            None => write!(f, "{}", self.point),
        }
    }
}

/// Stops handed to the binary, in whichever shape the input format carries.
#[derive(Clone, Debug)]
pub enum RouteInput {
    Stops(Vec<TextStop>),
    Deliveries(Vec<Delivery>),
}

impl RouteInput {
    /// Reads from `--input` or stdin.
    pub fn read(options: &RouteOptions) -> Result<Self> {
        let raw = match options.input_path() {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::invalid_input(format!("failed to read input {}: {e}", path.display()))
            })?,
            None => {
                let mut raw = String::new();
                io::stdin().read_to_string(&mut raw)?;
                raw
            }
        };
        Self::parse(&raw, options.format)
    }

    pub fn parse(raw: &str, format: IoFormat) -> Result<Self> {
        match format {
            IoFormat::Text => parse_stops(raw).map(Self::Stops),
            IoFormat::Json => parse_deliveries(raw).map(Self::Deliveries),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Stops(stops) => stops.len(),
            Self::Deliveries(deliveries) => deliveries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for RouteInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stops(stops) => write!(f, "format=text n={}", stops.len()),
            Self::Deliveries(deliveries) => write!(f, "format=json n={}", deliveries.len()),
        }
    }
}

fn parse_stops(input: &str) -> Result<Vec<TextStop>> {
    let mut stops = Vec::new();
    for (idx, tok) in input.split_whitespace().enumerate() {
        let mut it = tok.splitn(3, ',');
        let lat_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing latitude", idx + 1)))?;
        let lng_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing longitude", idx + 1)))?;
        let label = it.next().filter(|l| !l.is_empty()).map(str::to_owned);

        let lat: f64 = lat_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid latitude: {}", idx + 1, lat_s))
        })?;
        let lng: f64 = lng_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid longitude: {}", idx + 1, lng_s))
        })?;

        stops.push(TextStop {
            point: GeoPoint::new(lat, lng),
            label,
        });
    }
    Ok(stops)
}

fn parse_deliveries(input: &str) -> Result<Vec<Delivery>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::{RouteInput, parse_deliveries, parse_stops};
    use crate::io::options::IoFormat;

    #[test]
    fn parse_stops_reads_whitespace_separated_tokens() {
        let stops = parse_stops("1.0,2.0\n3.0,4.0,depot 5.0,6.0").expect("parse stops");
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].to_string(), "1.0,2.0");
        assert_eq!(stops[1].label.as_deref(), Some("depot"));
        assert_eq!(stops[1].to_string(), "3.0,4.0 depot");
    }

    #[test]
    fn label_may_contain_commas() {
        let stops = parse_stops("1,2,order-9,box-3").expect("parse stops");
        assert_eq!(stops[0].label.as_deref(), Some("order-9,box-3"));
    }

    #[test]
    fn empty_text_is_an_empty_route() {
        let stops = parse_stops(" \n\t ").expect("empty input is fine");
        assert!(stops.is_empty());
    }

    #[test]
    fn missing_longitude_is_rejected() {
        let err = parse_stops("1.0").expect_err("missing longitude should fail");
        assert!(err.to_string().contains("Token 1: missing longitude"));
    }

    #[test]
    fn non_numeric_coordinates_are_rejected() {
        let err = parse_stops("1,2 a,2").expect_err("invalid latitude should fail");
        assert!(err.to_string().contains("Token 2: invalid latitude: a"));
    }

    #[test]
    fn parse_deliveries_reads_json_array() {
        let deliveries = parse_deliveries(
            r#"[{"id": 1, "latitude": -23.5, "longitude": -46.6},
                {"id": 2, "latitude": null, "longitude": null}]"#,
        )
        .expect("parse deliveries");
        assert_eq!(deliveries.len(), 2);
        assert!(deliveries[1].coordinates().is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = RouteInput::parse("[{\"id\": }]", IoFormat::Json).expect_err("bad json");
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn display_reports_format_and_size() {
        let input = RouteInput::parse("1,2 3,4", IoFormat::Text).expect("parse");
        assert_eq!(input.to_string(), "format=text n=2");
        assert!(!input.is_empty());
    }
}
