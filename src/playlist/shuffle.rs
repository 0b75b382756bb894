use rand::Rng;

/// Uniform in-place permutation: walk from the last index down to 1 and swap
/// each element with a random one at or below it.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
