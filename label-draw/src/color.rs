use rand::{rngs::StdRng, Rng, SeedableRng};

/// Seed for the per-class colour table, fixed so the same dataset gets
/// the same colours on every run.
const COLOR_SEED: u64 = 42;

pub type Rgb = [u8; 3];

/// Builds one RGB triple per class, index-aligned with the class list.
pub fn class_colors(class_count: usize) -> Vec<Rgb> {
    let mut rng = StdRng::seed_from_u64(COLOR_SEED);
    (0..class_count).map(|_| rng.gen()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_color_per_class() {
        assert_eq!(class_colors(0).len(), 0);
        assert_eq!(class_colors(5).len(), 5);
    }

    #[test]
    fn colors_are_stable_across_runs() {
        assert_eq!(class_colors(8), class_colors(8));
    }
}
