use rand::Rng;

use crate::*;

/// Walks `weights` with a uniform `draw` in `[0, 1)` and returns the chosen position.
///
/// Entry `i` is returned with probability `weights[i] / sum(weights)`. Entries with a zero (or otherwise
/// non-positive) weight are never chosen. Returns `None` only when there is nothing to choose from.
pub fn select_index<I>(weights: I, draw: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let weights = weights.into_iter();
    let total: f64 = weights.clone().filter(|&weight| weight > 0.0).sum();
    if !(total > 0.0) {
        return None;
    }

    let mut remaining = draw.clamp(0.0, 1.0) * total;
    let mut last_positive = None;
    for (index, weight) in weights.enumerate() {
        if !(weight > 0.0) {
            continue;
        }
        last_positive = Some(index);
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(index);
        }
    }

    log::warn!(
        "Weighted walk exhausted for draw {}, falling back to last option",
        draw
    );
    last_positive
}

/// Position of the option chosen by `draw`, always in range for a valid catalog.
pub fn select_position(catalog: &RewardCatalog, draw: f64) -> usize {
    select_index(catalog.weights(), draw).unwrap_or(catalog.len() - 1)
}

pub fn select(catalog: &RewardCatalog, draw: f64) -> &RewardOption {
    &catalog[select_position(catalog, draw)]
}

pub fn pick<'a, R: Rng + ?Sized>(catalog: &'a RewardCatalog, rng: &mut R) -> &'a RewardOption {
    select(catalog, rng.random())
}

/// Uniform choice among `count` equally likely slots.
pub fn pick_slot<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Option<usize> {
    select_index(core::iter::repeat_n(1.0, count), rng.random())
}

/// Uniform choice that ignores the catalog weights.
pub fn pick_uniform<'a, R: Rng + ?Sized>(
    catalog: &'a RewardCatalog,
    rng: &mut R,
) -> &'a RewardOption {
    let slot = pick_slot(catalog.len(), rng).unwrap_or(0);
    &catalog[slot]
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const DRAWS: usize = 10_000;

    fn catalog(weights: &[f64]) -> RewardCatalog {
        let options = weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| {
                RewardOption::new(format!("CODE{i}"), 5 * i as u32, format!("option {i}"))
                    .with_weight(weight)
            })
            .collect();
        RewardCatalog::new(options).unwrap()
    }

    #[test]
    fn always_returns_a_member() {
        let catalog = catalog(&[0.5, 3.0, 1.25, 0.0, 7.0]);
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..DRAWS {
            let chosen = pick(&catalog, &mut rng);
            assert!(catalog.iter().any(|option| option == chosen));
        }
    }

    #[test]
    fn single_option_is_always_chosen() {
        let catalog = catalog(&[2.0]);

        for draw in [0.0, 0.25, 0.5, 0.999_999, 1.0] {
            assert_eq!(select(&catalog, draw).code, "CODE0");
        }
    }

    #[test]
    fn equal_weights_are_roughly_uniform() {
        let catalog = catalog(&[1.0, 1.0, 1.0, 1.0]);
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut counts = [0usize; 4];

        for _ in 0..DRAWS {
            counts[select_position(&catalog, rng.random())] += 1;
        }

        for count in counts {
            let frequency = count as f64 / DRAWS as f64;
            assert!(
                frequency > 0.22 && frequency < 0.28,
                "frequency {frequency} is outside 25% +/- 3%"
            );
        }
    }

    #[test]
    fn zero_weight_options_are_never_chosen() {
        let catalog = catalog(&[0.0, 1.0, 0.0]);
        let mut rng = SmallRng::seed_from_u64(99);

        for _ in 0..DRAWS {
            assert_eq!(select_position(&catalog, rng.random()), 1);
        }
        assert_eq!(select_position(&catalog, 0.0), 1);
        assert_eq!(select_position(&catalog, 1.0), 1);
    }

    #[test]
    fn walk_boundaries_follow_cumulative_weights() {
        let weights = [1.0, 2.0, 1.0];

        assert_eq!(select_index(weights, 0.0), Some(0));
        assert_eq!(select_index(weights, 0.25), Some(0));
        assert_eq!(select_index(weights, 0.26), Some(1));
        assert_eq!(select_index(weights, 0.74), Some(1));
        assert_eq!(select_index(weights, 0.76), Some(2));
        assert_eq!(select_index(weights, 1.0), Some(2));
    }

    #[test]
    fn nothing_to_choose_from() {
        assert_eq!(select_index(Vec::<f64>::new(), 0.5), None);
        assert_eq!(select_index(vec![0.0, 0.0], 0.5), None);
        assert_eq!(pick_slot(0, &mut SmallRng::seed_from_u64(1)), None);
    }

    #[test]
    fn slots_cover_every_position() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = [false; 9];

        for _ in 0..1_000 {
            let slot = pick_slot(9, &mut rng).unwrap();
            seen[slot] = true;
        }

        assert!(seen.iter().all(|&hit| hit));
    }
}
