//! Reservoir sampling

use rand::Rng;

/// Picks up to `k` items uniformly at random in a single pass.
///
/// The first `k` items fill the reservoir. Each later item at position
/// `n` replaces slot `s`, drawn from `[0, n]`, when `s < k`. Fewer than `k`
/// items are returned unchanged; `k == 0` yields an empty list.
pub fn sample<T, I, R>(items: I, k: usize, rng: &mut R) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    R: Rng + ?Sized,
{
    let mut reservoir = Vec::new();

    if k == 0 {
        return reservoir;
    }

    for (n, item) in items.into_iter().enumerate() {
        if n < k {
            reservoir.push(item);
            continue;
        }

        let s = rng.gen_range(0..=n);
        if s < k {
            reservoir[s] = item;
        }
    }

    reservoir
}
