//! Bodyplan geometry for hit location
//!
//! Attacks declare an orientation and alignment; bodyparts carry the same
//! coordinates plus a hit weight. Target selection is weighted random over
//! the matching parts.

use crate::core::BodypartId;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Vertical band of a bodypart or an attack
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BodyOrientation {
    Lowest,
    Low,
    Centre,
    High,
    Highest,
}

impl BodyOrientation {
    /// One band up, saturating
    pub fn shifted_up(&self) -> BodyOrientation {
        match self {
            BodyOrientation::Lowest => BodyOrientation::Low,
            BodyOrientation::Low => BodyOrientation::Centre,
            BodyOrientation::Centre => BodyOrientation::High,
            BodyOrientation::High | BodyOrientation::Highest => BodyOrientation::Highest,
        }
    }

    /// One band down, saturating
    pub fn shifted_down(&self) -> BodyOrientation {
        match self {
            BodyOrientation::Highest => BodyOrientation::High,
            BodyOrientation::High => BodyOrientation::Centre,
            BodyOrientation::Centre => BodyOrientation::Low,
            BodyOrientation::Low | BodyOrientation::Lowest => BodyOrientation::Lowest,
        }
    }

    fn band(&self) -> i32 {
        match self {
            BodyOrientation::Lowest => 0,
            BodyOrientation::Low => 1,
            BodyOrientation::Centre => 2,
            BodyOrientation::High => 3,
            BodyOrientation::Highest => 4,
        }
    }

    /// Within one band of another orientation?
    pub fn adjacent_to(&self, other: BodyOrientation) -> bool {
        (self.band() - other.band()).abs() <= 1
    }
}

/// Lateral side of a bodypart or an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Centre,
    Right,
}

impl Alignment {
    /// Centre matches everything; sides only match themselves
    pub fn matches(&self, other: Alignment) -> bool {
        *self == Alignment::Centre || other == Alignment::Centre || *self == other
    }
}

/// A single targetable bodypart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bodypart {
    pub name: String,
    pub orientation: BodyOrientation,
    pub alignment: Alignment,
    /// Relative probability of being struck
    pub hit_weight: f64,
    /// Vital parts are biased against helpless targets
    pub vital: bool,
    /// Material density of the part, for relative hardness
    pub natural_hardness: f64,
}

/// An actor's complete body geometry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bodyplan {
    pub parts: Vec<Bodypart>,
}

impl Bodyplan {
    /// A body that cannot be wounded (no parts)
    pub fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    /// Standard humanoid bodyplan
    pub fn humanoid() -> Self {
        let part = |name: &str,
                    orientation: BodyOrientation,
                    alignment: Alignment,
                    hit_weight: f64,
                    vital: bool,
                    natural_hardness: f64| Bodypart {
            name: name.to_string(),
            orientation,
            alignment,
            hit_weight,
            vital,
            natural_hardness,
        };
        Self {
            parts: vec![
                part("head", BodyOrientation::Highest, Alignment::Centre, 0.08, true, 1.1),
                part("neck", BodyOrientation::Highest, Alignment::Centre, 0.03, true, 0.6),
                part("chest", BodyOrientation::High, Alignment::Centre, 0.23, true, 0.9),
                part("abdomen", BodyOrientation::Centre, Alignment::Centre, 0.12, false, 0.5),
                part("right arm", BodyOrientation::High, Alignment::Right, 0.10, false, 0.7),
                part("left arm", BodyOrientation::High, Alignment::Left, 0.10, false, 0.7),
                part("right hand", BodyOrientation::Centre, Alignment::Right, 0.03, false, 0.7),
                part("left hand", BodyOrientation::Centre, Alignment::Left, 0.03, false, 0.7),
                part("right leg", BodyOrientation::Low, Alignment::Right, 0.12, false, 0.8),
                part("left leg", BodyOrientation::Low, Alignment::Left, 0.12, false, 0.8),
                part("right foot", BodyOrientation::Lowest, Alignment::Right, 0.02, false, 0.8),
                part("left foot", BodyOrientation::Lowest, Alignment::Left, 0.02, false, 0.8),
            ],
        }
    }

    pub fn is_woundable(&self) -> bool {
        !self.parts.is_empty()
    }

    pub fn get(&self, id: BodypartId) -> Option<&Bodypart> {
        self.parts.get(id.0)
    }

    /// Find a part by name
    pub fn find(&self, name: &str) -> Option<BodypartId> {
        self.parts
            .iter()
            .position(|part| part.name == name)
            .map(BodypartId)
    }

    /// Weighted random selection over parts passing `filter`
    ///
    /// `vital_bias` multiplies the weight of vital parts (1.0 = no bias).
    /// Falls back to the unfiltered body when nothing matches the filter.
    pub fn select_weighted<R: Rng>(
        &self,
        rng: &mut R,
        vital_bias: f64,
        filter: impl Fn(&Bodypart) -> bool,
    ) -> Option<BodypartId> {
        let weigh = |part: &Bodypart| {
            if part.vital {
                part.hit_weight * vital_bias
            } else {
                part.hit_weight
            }
        };

        let candidates: Vec<(usize, f64)> = self
            .parts
            .iter()
            .enumerate()
            .filter(|(_, part)| filter(part))
            .map(|(index, part)| (index, weigh(part)))
            .collect();

        let pool = if candidates.is_empty() {
            self.parts
                .iter()
                .enumerate()
                .map(|(index, part)| (index, weigh(part)))
                .collect()
        } else {
            candidates
        };

        let total: f64 = pool.iter().map(|(_, weight)| weight).sum();
        if total <= 0.0 {
            return pool.first().map(|(index, _)| BodypartId(*index));
        }

        let mut point = rng.gen_range(0.0..total);
        for (index, weight) in &pool {
            point -= weight;
            if point <= 0.0 {
                return Some(BodypartId(*index));
            }
        }
        pool.last().map(|(index, _)| BodypartId(*index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_humanoid_weights_sum_to_one() {
        let body = Bodyplan::humanoid();
        let total: f64 = body.parts.iter().map(|p| p.hit_weight).sum();
        assert!((total - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_body_not_woundable() {
        assert!(!Bodyplan::empty().is_woundable());
        assert!(Bodyplan::humanoid().is_woundable());
    }

    #[test]
    fn test_orientation_shifts_saturate() {
        assert_eq!(BodyOrientation::Highest.shifted_up(), BodyOrientation::Highest);
        assert_eq!(BodyOrientation::Lowest.shifted_down(), BodyOrientation::Lowest);
        assert_eq!(BodyOrientation::Centre.shifted_up(), BodyOrientation::High);
    }

    #[test]
    fn test_alignment_matching() {
        assert!(Alignment::Centre.matches(Alignment::Left));
        assert!(Alignment::Left.matches(Alignment::Centre));
        assert!(Alignment::Left.matches(Alignment::Left));
        assert!(!Alignment::Left.matches(Alignment::Right));
    }

    #[test]
    fn test_selection_respects_filter() {
        let body = Bodyplan::humanoid();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let id = body
                .select_weighted(&mut rng, 1.0, |part| {
                    part.orientation == BodyOrientation::Highest
                })
                .unwrap();
            let part = body.get(id).unwrap();
            assert_eq!(part.orientation, BodyOrientation::Highest);
        }
    }

    #[test]
    fn test_selection_falls_back_when_filter_empty() {
        let body = Bodyplan::humanoid();
        let mut rng = StdRng::seed_from_u64(2);
        let id = body.select_weighted(&mut rng, 1.0, |_| false);
        assert!(id.is_some());
    }

    #[test]
    fn test_vital_bias_shifts_distribution() {
        let body = Bodyplan::humanoid();
        let mut rng = StdRng::seed_from_u64(3);
        let mut vital_hits = 0;
        let trials = 2000;
        for _ in 0..trials {
            let id = body.select_weighted(&mut rng, 10.0, |_| true).unwrap();
            if body.get(id).unwrap().vital {
                vital_hits += 1;
            }
        }
        // head+neck+chest carry 0.34 weight unbiased; a 10x bias should
        // push them well past half of all hits.
        assert!(vital_hits > trials / 2);
    }
}
