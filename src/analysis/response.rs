use crate::model::FilterKind;

/*
Theoretical Response
====================

Closed-form magnitude of an ideal second-order Butterworth section, drawn
over the measured spectrum so the two can be compared by eye:

    LowPass:   |H(f)| = 1 / sqrt(1 + (f/fc)^4)
    HighPass:  |H(f)| = 1 / sqrt(1 + (fc/f)^4)

Both equal 1/√2 (−3 dB) at the cutoff and roll off at 12 dB/octave beyond
it. Q is not part of the model, so a resonant filter will show a peak in the
measured curve that the theoretical curve does not.

BandPass and BandStop are drawn flat at 1.
*/

/// Magnitude of the idealized response of `kind` at `frequency_hz`, in [0, 1].
pub fn magnitude_at(kind: FilterKind, cutoff_hz: f32, frequency_hz: f32) -> f32 {
    let fc = cutoff_hz.abs().max(f32::MIN_POSITIVE);
    let f = frequency_hz.abs();

    let ratio = match kind {
        FilterKind::LowPass => f / fc,
        FilterKind::HighPass => {
            if f == 0.0 {
                return 0.0;
            }
            fc / f
        }
        FilterKind::BandPass | FilterKind::BandStop => return 1.0,
    };

    let r2 = ratio * ratio;
    (1.0 / (1.0 + r2 * r2).sqrt()).clamp(0.0, 1.0)
}
