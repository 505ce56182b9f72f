use std::sync::OnceLock;

use log::debug;

/// Largest index of the radial weight table.
pub const EWA_MAXIDX: usize = 255;
pub const EWA_TABLE_LEN: usize = EWA_MAXIDX + 1;

/// Exponent of the falloff `(exp(k*r) - exp(k)) / (1 - exp(k))`. A true
/// Gaussian leaves visible rings at strong magnification; this curve reaches
/// exactly zero at the footprint boundary.
const FALLOFF: f64 = -2.0;

static EWA_WTS: OnceLock<[f32; EWA_TABLE_LEN]> = OnceLock::new();

/// Radial weights indexed by quantized normalized squared radius: entry `i`
/// covers `r^2 = i / EWA_MAXIDX`.
///
/// Built on first use and read-only afterwards.
pub fn ewa_weights() -> &'static [f32; EWA_TABLE_LEN] {
    EWA_WTS.get_or_init(build_table)
}

/// Builds the weight table eagerly, e.g. before spawning sampling threads.
pub fn init_ewa_weights() {
    ewa_weights();
}

fn build_table() -> [f32; EWA_TABLE_LEN] {
    let tail = FALLOFF.exp();
    let table = core::array::from_fn(|i| {
        let r = i as f64 / EWA_MAXIDX as f64;
        (((FALLOFF * r).exp() - tail) / (1.0 - tail)) as f32
    });
    debug!("built EWA weight table: {EWA_TABLE_LEN} bins, falloff {FALLOFF}");
    table
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{EWA_MAXIDX, ewa_weights, init_ewa_weights};

    #[test]
    fn center_is_max_and_weights_never_increase() {
        init_ewa_weights();
        let w = ewa_weights();

        assert_eq!(w[0], 1.0);
        assert_eq!(w[EWA_MAXIDX], 0.0);
        assert!(w.iter().all(|&x| x <= w[0]));
        for pair in w.windows(2) {
            assert!(pair[1] <= pair[0], "{pair:?}");
        }
    }

    #[test]
    fn matches_reference_samples() {
        let w = ewa_weights();

        assert_abs_diff_eq!(w[1], 0.990965, epsilon = 1e-5);
        assert_abs_diff_eq!(w[2], 0.982, epsilon = 1e-4);
        assert_abs_diff_eq!(w[128], 0.267276, epsilon = 1e-5);
    }

    #[test]
    fn shared_across_threads() {
        let base = ewa_weights().as_ptr() as usize;
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| ewa_weights().as_ptr() as usize))
            .collect();
        for h in handles {
            assert_eq!(h.join().expect("thread finished"), base);
        }
    }
}
