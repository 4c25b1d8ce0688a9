//! Film-count filtering and resident join
//!
//! Given the full planet catalog, keeps the planets that appear in more films
//! than the requested threshold and resolves their residents into names.

use tracing::debug;

use crate::client::SwapiClient;
use crate::error::UpstreamError;
use crate::model::{PlanetRecord, PlanetResidency};

/// Returns true when `film_count` is strictly greater than `threshold`
///
/// A negative threshold accepts every planet, including those with no films.
pub fn exceeds_threshold(film_count: usize, threshold: i64) -> bool {
    usize::try_from(threshold).map_or(true, |threshold| film_count > threshold)
}

/// Planets whose film count exceeds `threshold`, in catalog order
pub fn qualifying_planets(
    planets: &[PlanetRecord],
    threshold: i64,
) -> impl Iterator<Item = &PlanetRecord> {
    planets
        .iter()
        .filter(move |planet| exceeds_threshold(planet.films.len(), threshold))
}

/// Builds the residency list for every qualifying planet
///
/// Planets are resolved one after another in catalog order. The first
/// resolution failure aborts the aggregation, so callers never see a
/// residency list covering only part of the qualifying planets.
pub async fn aggregate(
    swapi: &SwapiClient,
    planets: &[PlanetRecord],
    threshold: i64,
) -> Result<Vec<PlanetResidency>, UpstreamError> {
    let mut residencies = Vec::new();

    for planet in qualifying_planets(planets, threshold) {
        let residents = swapi.resolve_resident_names(&planet.residents).await?;
        debug!(
            "planet {} ({} films) has {} residents",
            planet.name,
            planet.films.len(),
            residents.len()
        );

        residencies.push(PlanetResidency {
            name: planet.name.clone(),
            residents,
        });
    }

    Ok(residencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(name: &str, films: usize) -> PlanetRecord {
        PlanetRecord {
            name: name.to_string(),
            films: (0..films).map(|i| format!("film-{}", i)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!exceeds_threshold(2, 2));
        assert!(exceeds_threshold(3, 2));
        assert!(!exceeds_threshold(0, 0));
        assert!(exceeds_threshold(1, 0));
    }

    #[test]
    fn negative_threshold_accepts_everything() {
        assert!(exceeds_threshold(0, -1));
        assert!(exceeds_threshold(5, i64::MIN));
    }

    #[test]
    fn qualifying_planets_keep_catalog_order() {
        let planets = vec![
            planet("Tatooine", 5),
            planet("Alderaan", 2),
            planet("Yavin IV", 1),
            planet("Hoth", 3),
        ];

        for threshold in -1..=6 {
            let expected: Vec<&str> = planets
                .iter()
                .filter(|p| (p.films.len() as i64) > threshold)
                .map(|p| p.name.as_str())
                .collect();
            let actual: Vec<&str> = qualifying_planets(&planets, threshold)
                .map(|p| p.name.as_str())
                .collect();
            assert_eq!(actual, expected, "threshold {}", threshold);
        }

        let names: Vec<&str> = qualifying_planets(&planets, 1)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Tatooine", "Alderaan", "Hoth"]);
    }
}
