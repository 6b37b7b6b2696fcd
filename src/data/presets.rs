//! Built-in datasets used by the demo front-end and the tests.

use crate::domain::{LinearSystem, Sample};

/// Intel CPU transistor counts by year of introduction (4004 through Pentium 4).
const MOORE_DATA: [(f64, f64); 11] = [
    (1971.0, 2_250.0),
    (1972.0, 3_300.0),
    (1974.0, 6_000.0),
    (1978.0, 29_000.0),
    (1982.0, 134_000.0),
    (1986.0, 275_000.0),
    (1989.0, 1_200_000.0),
    (1993.0, 3_100_000.0),
    (1997.0, 7_500_000.0),
    (1999.0, 9_500_000.0),
    (2000.0, 42_000_000.0),
];

/// Years the Moore's-law report predicts by default.
pub const MOORE_PREDICTION_YEARS: [f64; 2] = [2010.0, 2020.0];

/// Moore's-law sample set: `x` = year, `y` = transistor count.
pub fn moore_samples() -> Vec<Sample> {
    MOORE_DATA.iter().map(|&(x, y)| Sample::new(x, y)).collect()
}

/// Three mines producing three ores; each row is the share of one ore per
/// mine, the right-hand side the required tonnage.
pub fn mines_system() -> LinearSystem {
    let rows = [
        vec![0.55, 0.25, 0.25],
        vec![0.30, 0.45, 0.20],
        vec![0.15, 0.30, 0.55],
    ];
    match LinearSystem::from_rows(&rows, &[4800.0, 5800.0, 5700.0]) {
        Ok(system) => system,
        Err(e) => unreachable!("built-in mines system is well formed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moore_samples_are_positive_and_ordered() {
        let samples = moore_samples();
        assert_eq!(samples.len(), 11);
        assert!(samples.iter().all(|s| s.y > 0.0));
        assert!(samples.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn mines_system_shape() {
        let sys = mines_system();
        assert_eq!(sys.size(), 3);
        assert_eq!(sys.b()[2], 5700.0);
    }
}
