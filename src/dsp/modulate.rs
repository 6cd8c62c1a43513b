//! Amplitude and frequency modulation math.

/*
Modulation for Communications Signals
=====================================

Modulation is using one signal to continuously vary a parameter of another.
In a synthesizer that makes sounds move; in a communications link it is how
information rides on a carrier.

Vocabulary
----------

  carrier       The high-frequency signal being modulated (fc).

  modulator     The message signal doing the controlling (fm). Here a sine,
                outputting values in [-1.0, +1.0].

  depth         How far the parameter moves. For AM it is the modulation
                index m; for FM it is the peak deviation as a FRACTION of the
                carrier frequency, not an absolute number of Hz.

  bipolar       Modulator swings positive AND negative (-1 to +1).

  unipolar      Modulator only swings positive (0 to 1).
                  unipolar = (bipolar + 1.0) × 0.5


Amplitude Modulation (double sideband)
--------------------------------------

The carrier's instantaneous amplitude follows the modulator:

    envelope(t) = 1 - depth × (1 - unipolar(m(t)))
    s(t)        = envelope(t) × carrier(t)

    m(t) = +1  →  envelope = 1
    m(t) = -1  →  envelope = 1 - depth

So the envelope always stays inside [1 - depth, 1]. With depth = 1 the
carrier is fully pinched off at the modulator's troughs (100% modulation);
with depth = 0 the carrier passes unchanged. In the spectrum this shows up as
the carrier plus two sidebands at fc ± fm, each depth/4 of the carrier's
peak.


Frequency Modulation
--------------------

The carrier's instantaneous FREQUENCY follows the modulator:

    f(t) = fc + (depth × fc) × m(t)

The deviation therefore never exceeds ± depth × fc. The carrier phase is the
running integral of f(t), which the phase-accumulator oscillator does for
free when it is given one frequency per sample. The spectrum spreads into a
family of sidebands spaced fm apart (Carson's rule: bandwidth ≈ 2(Δf + fm)).


Sample-Rate Modulation
----------------------

Both kinds are evaluated per sample, not per block. The modulators here run
at 5-200 Hz, well into audio-rate territory, and block-rate stepping would
show up as spurious sidebands at the block frequency.
*/

/// Calculate the modulated parameter value.
///
/// # Arguments
/// * `base_value` - The parameter's center/default value
/// * `modulator` - The control signal value (typically -1.0 to +1.0)
/// * `depth` - How much the parameter should vary
///
/// # Returns
/// The modulated value: base + (modulator × depth)
#[inline]
pub fn apply_modulation(base_value: f32, modulator: f32, depth: f32) -> f32 {
    base_value + (modulator * depth)
}

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// AM envelope for a bipolar modulator value. Stays within `[1 - depth, 1]`.
#[inline]
pub fn am_envelope(modulator: f32, depth: f32) -> f32 {
    1.0 - depth * (1.0 - bipolar_to_unipolar(modulator))
}

/// Instantaneous FM carrier frequency; deviation is `depth × carrier_hz`.
#[inline]
pub fn fm_frequency(carrier_hz: f32, modulator: f32, depth: f32) -> f32 {
    apply_modulation(carrier_hz, modulator, depth * carrier_hz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_modulation_center() {
        assert_eq!(apply_modulation(1000.0, 0.0, 500.0), 1000.0);
    }

    #[test]
    fn test_apply_modulation_extremes() {
        assert_eq!(apply_modulation(1000.0, 1.0, 500.0), 1500.0);
        assert_eq!(apply_modulation(1000.0, -1.0, 500.0), 500.0);
    }

    #[test]
    fn test_bipolar_to_unipolar() {
        assert!((bipolar_to_unipolar(-1.0) - 0.0).abs() < 1e-6);
        assert!((bipolar_to_unipolar(0.0) - 0.5).abs() < 1e-6);
        assert!((bipolar_to_unipolar(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_am_envelope_bounds() {
        for &depth in &[0.0, 0.25, 0.5, 0.9, 1.0] {
            for step in 0..=200 {
                let m = -1.0 + step as f32 * 0.01;
                let env = am_envelope(m, depth);
                assert!(
                    env >= 1.0 - depth - 1e-6 && env <= 1.0 + 1e-6,
                    "depth {} modulator {} gave envelope {}",
                    depth,
                    m,
                    env
                );
            }
            assert!((am_envelope(1.0, depth) - 1.0).abs() < 1e-6);
            assert!((am_envelope(-1.0, depth) - (1.0 - depth)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fm_deviation_is_fraction_of_carrier() {
        let carrier = 800.0;
        let depth = 0.25;
        assert_eq!(fm_frequency(carrier, 1.0, depth), 1000.0);
        assert_eq!(fm_frequency(carrier, -1.0, depth), 600.0);
        assert_eq!(fm_frequency(carrier, 0.0, depth), 800.0);
    }
}
