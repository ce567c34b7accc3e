use async_trait::async_trait;
use serde::Deserialize;
use std::{collections::HashMap, fs::File, io::Read, path::Path};

use super::LocationResolver;
use crate::{error::WeatherError, model::Location};

/// Offline resolver backed by a static city reference table.
///
/// The table is a CSV file with `name,lat,lon` columns, loaded wholesale at
/// construction and read-only afterwards. A missing or malformed file is a
/// fatal configuration error; an unmatched city is an ordinary `CityNotFound`.
#[derive(Debug, Clone)]
pub struct CityTableResolver {
    /// Keyed by lowercased city name.
    cities: HashMap<String, (f64, f64)>,
}

#[derive(Debug, Deserialize)]
struct CityRow {
    name: String,
    lat: f64,
    lon: f64,
}

impl CityTableResolver {
    pub fn from_csv_path(path: &Path) -> Result<Self, WeatherError> {
        let file = File::open(path).map_err(|e| {
            WeatherError::Config(format!("cannot open city table {}: {e}", path.display()))
        })?;

        Self::from_reader(file).map_err(|e| {
            WeatherError::Config(format!("cannot load city table {}: {e}", path.display()))
        })
    }

    fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut cities = HashMap::new();

        let mut rdr = csv::Reader::from_reader(reader);
        for row in rdr.deserialize() {
            let row: CityRow = row?;
            cities.insert(row.name.to_lowercase(), (row.lat, row.lon));
        }

        tracing::debug!(count = cities.len(), "city reference table loaded");

        Ok(Self { cities })
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[async_trait]
impl LocationResolver for CityTableResolver {
    async fn resolve(&self, city: &str) -> Result<Location, WeatherError> {
        let key = city.trim().to_lowercase();

        let (lat, lon) = self
            .cities
            .get(&key)
            .copied()
            .ok_or_else(|| WeatherError::CityNotFound { city: city.to_string() })?;

        Ok(Location { city: city.trim().to_string(), latitude: lat, longitude: lon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "name,lat,lon\nMumbai,19.076,72.8777\nDelhi,28.7041,77.1025\n";

    fn write_table(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(contents.as_bytes()).expect("write table");
        file
    }

    #[tokio::test]
    async fn match_is_case_insensitive() {
        let file = write_table(TABLE);
        let resolver = CityTableResolver::from_csv_path(file.path()).expect("load");

        let loc = resolver.resolve("mUMBAI").await.expect("resolve");
        assert_eq!(loc.latitude, 19.076);
        assert_eq!(loc.longitude, 72.8777);
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_ignored() {
        let file = write_table(TABLE);
        let resolver = CityTableResolver::from_csv_path(file.path()).expect("load");

        let loc = resolver.resolve("  Delhi ").await.expect("resolve");
        assert_eq!(loc.city, "Delhi");
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let file = write_table(TABLE);
        let resolver = CityTableResolver::from_csv_path(file.path()).expect("load");

        let err = resolver.resolve("Atlantis").await.unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound { .. }));
    }

    #[test]
    fn missing_file_is_fatal_config_error() {
        let err = CityTableResolver::from_csv_path(Path::new("/no/such/cities.csv")).unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
    }

    #[test]
    fn malformed_row_is_fatal_config_error() {
        let file = write_table("name,lat,lon\nMumbai,not-a-number,72.8\n");
        let err = CityTableResolver::from_csv_path(file.path()).unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
    }

    #[test]
    fn loads_all_rows() {
        let file = write_table(TABLE);
        let resolver = CityTableResolver::from_csv_path(file.path()).expect("load");
        assert_eq!(resolver.len(), 2);
    }
}
