use std::f32::consts::PI;

/*
Four-Stage Ladder Low-Pass
==========================

| stage | input              | state | slope         |
| ----- | ------------------ | ----- | ------------- |
| 1     | saturated input u  | s[0]  | 6 dB/oct      |
| 2     | y[0]               | s[1]  | 12 dB/oct     |
| 3     | y[1]               | s[2]  | 18 dB/oct     |
| 4     | y[2]               | s[3]  | 24 dB/oct     |

Four identical one-pole low-passes in series, with the output fed back
(inverted, scaled by k) to the input. Feedback near the cutoff frequency
arrives in phase after the four poles' 180° shift, so it boosts a peak there:
that's resonance.

Each one-pole is a trapezoidal (TPT) integrator:

    v = (input - s) * G        G = g / (1 + g)
    y = v + s
    s = y + v

with g = π * cutoff / sample_rate. The zero-delay form keeps the cutoff
accurate at high frequencies and stays stable when the cutoff is modulated
every sample.

Feedback without a unit delay needs the output before it is computed. The
states give an estimate of the loop's contribution,

    S = g³·s[0] + g²·s[1] + g·s[2] + s[3]

so the stage-1 input solves to

    u = tanh((x - k·S) / (1 + k·g⁴))

The tanh soft-saturates the loop, which keeps it bounded as k approaches
self-oscillation. Resonance eats passband level, so the output is trimmed
by (1 + 2k).
*/

/// Power-on cutoff in Hz.
pub const DEFAULT_CUTOFF: f32 = 10_000.0;
/// Power-on feedback amount.
pub const DEFAULT_RESONANCE: f32 = 0.2;
/// Largest feedback amount.
pub const MAX_RESONANCE: f32 = 2.0;

pub struct LadderFilter {
    sample_rate: f32,
    cutoff_hz: f32,
    k: f32, // feedback amount, 0..=2

    g: f32,
    g_lp: f32,
    g_total: f32,
    trim: f32,

    v: [f32; 4],
    s: [f32; 4],
    y: [f32; 4],
}

impl LadderFilter {
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            sample_rate,
            cutoff_hz: DEFAULT_CUTOFF,
            k: 0.0,
            g: 0.0,
            g_lp: 0.0,
            g_total: 0.0,
            trim: 1.0,
            v: [0.0; 4],
            s: [0.0; 4],
            y: [0.0; 4],
        };
        filter.set_cutoff(DEFAULT_CUTOFF);
        filter.set_resonance(DEFAULT_RESONANCE);
        filter
    }

    /// Recompute the stage gains. Cheap enough to call every sample.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz.max(0.0);
        self.g = PI * self.cutoff_hz / self.sample_rate;
        self.g_lp = self.g / (1.0 + self.g);
        self.g_total = self.g * self.g * self.g * self.g;
    }

    /// Set the feedback amount k (clamped to 0..=2) and the matching trim.
    pub fn set_resonance(&mut self, k: f32) {
        self.k = k.clamp(0.0, MAX_RESONANCE);
        self.trim = 1.0 + 2.0 * self.k;
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let g = self.g;
        let feedback = g * g * g * self.s[0] + g * g * self.s[1] + g * self.s[2] + self.s[3];
        let u = ((x - self.k * feedback) / (1.0 + self.k * self.g_total)).tanh();

        let mut input = u;
        for stage in 0..4 {
            self.v[stage] = (input - self.s[stage]) * self.g_lp;
            self.y[stage] = self.v[stage] + self.s[stage];
            self.s[stage] = self.y[stage] + self.v[stage];
            input = self.y[stage];
        }

        self.y[3] * self.trim
    }

    /// Filter a block in place, updating the cutoff per sample.
    pub fn render(&mut self, cutoffs: &[f32], buffer: &mut [f32]) {
        debug_assert_eq!(cutoffs.len(), buffer.len());

        for (&cutoff, sample) in cutoffs.iter().zip(buffer.iter_mut()) {
            self.set_cutoff(cutoff);
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.v = [0.0; 4];
        self.s = [0.0; 4];
        self.y = [0.0; 4];
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.k
    }

    /// Output gain compensating for resonance, 1 + 2k.
    pub fn trim(&self) -> f32 {
        self.trim
    }

    /// Stage outputs from the most recent sample.
    pub fn stage_outputs(&self) -> [f32; 4] {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_828.0;

    fn step_response(k: f32, cutoff: f32, level: f32, n: usize) -> Vec<f32> {
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        filter.set_cutoff(cutoff);
        filter.set_resonance(k);
        (0..n).map(|_| filter.process(level)).collect()
    }

    fn peak(buffer: &[f32]) -> f32 {
        buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn no_resonance_rises_monotonically_without_overshoot() {
        let level: f32 = 0.5;
        let target = level.tanh();
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        filter.set_cutoff(500.0);
        filter.set_resonance(0.0);

        let mut previous = [0.0f32; 4];
        for _ in 0..20_000 {
            filter.process(level);
            let stages = filter.stage_outputs();
            for i in 0..4 {
                assert!(stages[i] >= previous[i] - 1e-6, "stage {} fell", i);
                assert!(stages[i] <= target + 1e-4, "stage {} overshot", i);
            }
            previous = stages;
        }

        assert!((previous[3] - target).abs() < 1e-3, "settled at {}", previous[3]);
    }

    #[test]
    fn resonance_adds_overshoot() {
        let flat = step_response(0.0, 1_000.0, 0.1, 4_000);
        let ringing = step_response(MAX_RESONANCE, 1_000.0, 0.1, 4_000);

        let flat_ratio = peak(&flat) / flat[flat.len() - 1];
        let ringing_ratio = peak(&ringing) / ringing[ringing.len() - 1];

        assert!(flat_ratio < 1.001, "flat overshoot {}", flat_ratio);
        assert!(ringing_ratio > 1.1, "resonant overshoot {}", ringing_ratio);
    }

    #[test]
    fn saturation_keeps_output_bounded() {
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        filter.set_resonance(MAX_RESONANCE);

        // Square wave at the cutoff, well past full scale
        let cutoff = 2_000.0;
        filter.set_cutoff(cutoff);
        let half_period = (SAMPLE_RATE / cutoff / 2.0) as usize;
        let bound = 1.0 + 2.0 * MAX_RESONANCE;

        for i in 0..50_000 {
            let x = if (i / half_period) % 2 == 0 { 10.0 } else { -10.0 };
            let y = filter.process(x);
            assert!(y.is_finite());
            assert!(y.abs() <= bound + 1e-4, "output {} exceeds {}", y, bound);
        }
    }

    #[test]
    fn attenuates_above_cutoff() {
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        filter.set_cutoff(300.0);
        filter.set_resonance(0.0);

        let freq = 6_000.0;
        let out: Vec<f32> = (0..4_096)
            .map(|i| {
                let x = 0.5 * (2.0 * PI * freq * i as f32 / SAMPLE_RATE).sin();
                filter.process(x)
            })
            .collect();

        assert!(peak(&out[512..]) < 0.01, "peak {}", peak(&out[512..]));
    }

    #[test]
    fn per_sample_cutoff_sweep_is_stable() {
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        filter.set_resonance(1.5);

        let n = 48_828;
        let cutoffs: Vec<f32> = (0..n)
            .map(|i| 100.0 + 15_000.0 * (0.5 + 0.5 * (i as f32 * 0.001).sin()))
            .collect();
        let mut buffer: Vec<f32> = (0..n).map(|i| if i % 200 < 100 { 0.8 } else { -0.8 }).collect();

        filter.render(&cutoffs, &mut buffer);

        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() <= 4.0 + 1e-4));
        assert_eq!(filter.cutoff(), cutoffs[n - 1]);
    }

    #[test]
    fn power_on_state_uses_defaults() {
        let filter = LadderFilter::new(SAMPLE_RATE);
        assert_eq!(filter.cutoff(), DEFAULT_CUTOFF);
        assert_eq!(filter.resonance(), DEFAULT_RESONANCE);
        assert_eq!(filter.trim(), 1.0 + 2.0 * DEFAULT_RESONANCE);
    }

    #[test]
    fn resonance_is_clamped() {
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        filter.set_resonance(5.0);
        assert_eq!(filter.resonance(), MAX_RESONANCE);
        filter.set_resonance(-1.0);
        assert_eq!(filter.resonance(), 0.0);
    }

    #[test]
    fn reset_clears_state() {
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        for _ in 0..100 {
            filter.process(1.0);
        }
        filter.reset();
        assert_eq!(filter.stage_outputs(), [0.0; 4]);
        // Zero state, zero input
        assert_eq!(filter.process(0.0), 0.0);
    }
}
