//! Breed filtering.

use crate::breed::BreedRecord;
use crate::size::classify_weight;

/// Optional predicates over a normalized breed list.
///
/// Filters compose as a logical AND: each one, when present, narrows the
/// current candidate set in a fixed order (size, energy, intelligence,
/// breed group, temperament). Relative order of surviving records is
/// preserved, and an empty result is a valid outcome, not an error.
#[derive(Debug, Clone, Default)]
pub struct BreedFilter {
    /// Size bucket name, matched case-insensitively against the classifier
    pub size: Option<String>,
    pub energy_level: Option<i64>,
    pub intelligence: Option<i64>,
    /// Exact breed group, case-insensitive
    pub breed_group: Option<String>,
    /// Case-insensitive substring of the temperament text
    pub temperament: Option<String>,
}

impl BreedFilter {
    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.energy_level.is_none()
            && self.intelligence.is_none()
            && self.breed_group.is_none()
            && self.temperament.is_none()
    }

    /// Apply every present filter as a sequential narrowing pass.
    pub fn apply(&self, breeds: &[BreedRecord]) -> Vec<BreedRecord> {
        let mut filtered: Vec<BreedRecord> = breeds.to_vec();

        if let Some(size) = &self.size {
            let wanted = size.to_lowercase();
            filtered.retain(|breed| classify_weight(&breed.weight).category().as_str() == wanted);
        }

        if let Some(energy_level) = self.energy_level {
            filtered.retain(|breed| breed.energy_level == energy_level);
        }

        if let Some(intelligence) = self.intelligence {
            filtered.retain(|breed| breed.intelligence == intelligence);
        }

        if let Some(breed_group) = &self.breed_group {
            filtered.retain(|breed| {
                breed
                    .breed_group
                    .as_deref()
                    .unwrap_or_default()
                    .eq_ignore_ascii_case(breed_group)
            });
        }

        if let Some(temperament) = &self.temperament {
            let needle = temperament.to_lowercase();
            filtered.retain(|breed| breed.temperament.to_lowercase().contains(&needle));
        }

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::Measurement;

    fn breed(name: &str, temperament: &str, energy_level: i64) -> BreedRecord {
        BreedRecord {
            id: name.to_lowercase(),
            name: name.to_string(),
            temperament: temperament.to_string(),
            energy_level,
            ..Default::default()
        }
    }

    fn sample() -> Vec<BreedRecord> {
        vec![
            breed("Basset", "Calm, Loyal", 3),
            breed("Border Collie", "Active, Playful", 5),
        ]
    }

    #[test]
    fn temperament_is_case_insensitive_substring() {
        let filter = BreedFilter {
            temperament: Some("loyal".to_string()),
            ..Default::default()
        };

        let result = filter.apply(&sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Basset");
    }

    #[test]
    fn energy_level_is_exact_match() {
        let filter = BreedFilter {
            energy_level: Some(5),
            ..Default::default()
        };

        let result = filter.apply(&sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Border Collie");
    }

    #[test]
    fn filters_compose_as_and() {
        let filter = BreedFilter {
            temperament: Some("loyal".to_string()),
            energy_level: Some(5),
            ..Default::default()
        };

        assert!(filter.apply(&sample()).is_empty());
    }

    #[test]
    fn absent_filters_pass_everything_through() {
        let breeds = sample();
        let filtered = BreedFilter::default().apply(&breeds);
        assert_eq!(filtered, breeds);
    }

    #[test]
    fn size_filter_uses_the_classifier() {
        let mut small = breed("Chihuahua", "Alert", 4);
        small.weight = Measurement {
            imperial: "4 - 6".to_string(),
            metric: "2 - 3".to_string(),
        };
        let mut large = breed("Mastiff", "Calm", 2);
        large.weight = Measurement {
            imperial: "120 - 230".to_string(),
            metric: "54 - 104".to_string(),
        };

        let filter = BreedFilter {
            size: Some("Small".to_string()),
            ..Default::default()
        };

        let result = filter.apply(&[small.clone(), large]);
        assert_eq!(result, vec![small]);
    }

    #[test]
    fn breed_group_matches_case_insensitively() {
        let mut sporting = breed("Labrador", "Kind", 4);
        sporting.breed_group = Some("Sporting".to_string());
        let mut working = breed("Husky", "Outgoing", 5);
        working.breed_group = Some("Working".to_string());

        let filter = BreedFilter {
            breed_group: Some("sporting".to_string()),
            ..Default::default()
        };

        let result = filter.apply(&[sporting, working]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Labrador");
    }

    #[test]
    fn preserves_relative_order() {
        let breeds = vec![
            breed("A", "Loyal", 3),
            breed("B", "Loyal", 3),
            breed("C", "Loyal", 3),
        ];

        let filter = BreedFilter {
            temperament: Some("loyal".to_string()),
            ..Default::default()
        };

        let names: Vec<String> = filter.apply(&breeds).into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
