use crate::camera::GeoPoint;
use crate::stream::error::StreamError;

/// One fix from the route dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub latitude: f64,
    pub longitude: f64,
    pub heading: f32,
}

impl Sample {
    /// Parse one dataset row. Latitude is the first column, longitude the
    /// second and heading the last; columns in between are ignored.
    pub fn from_record(row: usize, record: &csv::StringRecord) -> Result<Self, StreamError> {
        if record.len() < 3 {
            return Err(StreamError::MalformedSample(
                row,
                format!("expected latitude, longitude and heading, got {} columns", record.len()),
            ));
        }

        Ok(Sample {
            latitude: parse_field(&record[0], row, "latitude")?,
            longitude: parse_field(&record[1], row, "longitude")?,
            heading: parse_field(&record[record.len() - 1], row, "heading")?,
        })
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

fn parse_field<T: std::str::FromStr>(value: &str, row: usize, name: &str) -> Result<T, StreamError> {
    value
        .trim()
        .parse()
        .map_err(|_| StreamError::MalformedSample(row, format!("bad {name}: {value:?}")))
}
