use crate::types::station::Station;

/// Stations processed by the default run, in processing order.
const DEFAULT_STATIONS: [(&str, f64, f64); 4] = [
    ("k12", 51.18128712, 71.46580696),
    ("k8", 51.18611299, 71.34372285),
    ("k7", 51.1231206, 71.48337096),
    ("k9", 51.15841381, 71.46746001),
];

/// An ordered, fixed collection of stations.
///
/// Iteration yields stations in the order they were added. The pipeline relies on
/// this: stations are fetched and written strictly in registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|station| station.id == id)
    }
}

impl Default for StationRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_STATIONS
                .iter()
                .map(|&(id, lat, lon)| Station::new(id, lat, lon))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a StationRegistry {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}
