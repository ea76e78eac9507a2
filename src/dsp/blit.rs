use std::f32::consts::TAU;

use crate::dsp::oscillator::Waveform;

/*
Band-Limited Impulse Trains
===========================

A naive sawtooth jumps from +1 to -1 inside a single sample. That jump
contains energy at every frequency, and everything above Nyquist folds back
into the audible band as inharmonic aliasing. BLIT synthesis replaces each
jump with a short band-limited impulse (a windowed sinc) and integrates the
impulses back into the waveform.

Vocabulary
----------

  edge          The point in a period where the waveform jumps. A square has
                a positive edge at the period start and a negative edge at
                the half period. A sawtooth only has the negative edge.

  sub-sample    Edges rarely land on integer sample positions. The fractional
  offset        part (0..1) selects which precomputed kernel row to use, so
                the impulse is centred on the true edge time.

  kernel        16 taps of sin(2π·0.45·t)/t, windowed by a raised cosine and
                normalised to sum to 1. A unit impulse smeared over 16
                samples, with nothing above 0.45 cycles/sample.

  ring buffer   256 slots of pending impulse energy. When an edge occurs the
                kernel row is added into the 16 slots starting at the cursor.
                Each sample consumes one slot, clears it, and moves on.

  leaky         acc = acc * 0.999 + input. The leak keeps round-off and
  integrator    start-up offsets from accumulating into DC.


The Three Waves
---------------

    impulses:    ↑        ↓        ↑        ↓          (square edges)
    square:      ┌────────┐        ┌────────┐
                 ┘        └────────┘        └───       ∫ impulses

    impulses:             ↓                 ↓          (saw edges)
    sawtooth:      ╱╲       ╱╲       ╱╲                ∫ (impulses + f/sr)
                  ╱  ╲     ╱  ╲     ╱  ╲               (ramp up, drop by 1)

    triangle:     ╱╲╱╲╱╲                               ∫ square * 4f/sr

The sawtooth ramp term adds f/sr each sample, so over one period the ramp
climbs by exactly 1 and the negative impulse removes exactly 1.


Edge Bookkeeping
----------------

    positive_edge = sample_rate / f + positive_offset
    negative_edge = (positive_edge + positive_offset) / 2

`sample_count` counts samples since the last period start. When it reaches
int(positive_edge) a new period starts: the count resets and the fractional
part of positive_edge becomes the next offset. Carrying the fraction forward
keeps the long-run period at exactly sample_rate / f even though each period
is a whole number of samples. The negative edge fires at most once per
period, guarded by `negative_passed`.
*/

/// Fractional offsets covered by the correction table.
pub const TABLE_ROWS: usize = 256;
/// Taps per correction kernel.
pub const KERNEL_TAPS: usize = 16;
/// Length of the pending-correction rings. Matches the table width so the
/// cursor wraps once per 256 samples.
pub const RING_SIZE: usize = 256;
/// Integrator leak shared by all three accumulators.
pub const LEAK: f32 = 0.999;

/// Kernel cutoff in cycles per sample.
const CUTOFF: f32 = 0.45;

/// Windowed-sinc correction kernels, one row per fractional edge offset.
///
/// Generated once when the oscillator is built and read-only afterwards.
pub struct BlitTable {
    rows: [[f32; KERNEL_TAPS]; TABLE_ROWS],
}

impl BlitTable {
    pub fn generate() -> Self {
        let mut rows = [[0.0; KERNEL_TAPS]; TABLE_ROWS];
        let centre = (KERNEL_TAPS / 2) as f32;

        for (i, row) in rows.iter_mut().enumerate() {
            let fraction = i as f32 / TABLE_ROWS as f32;

            for (x, tap) in row.iter_mut().enumerate() {
                let t = x as f32 - centre - fraction;
                let sinc = if t.abs() < f32::EPSILON {
                    TAU * CUTOFF
                } else {
                    (TAU * CUTOFF * t).sin() / t
                };
                let window =
                    0.51 - 0.49 * (TAU * (x as f32 - fraction) / KERNEL_TAPS as f32).cos();
                *tap = sinc * window;
            }

            let sum: f32 = row.iter().sum();
            for tap in row.iter_mut() {
                *tap /= sum;
            }
        }

        Self { rows }
    }

    /// Kernel row for a fractional edge offset in [0, 1).
    #[inline]
    pub fn row(&self, offset: f32) -> &[f32; KERNEL_TAPS] {
        let index = (offset * TABLE_ROWS as f32) as usize;
        &self.rows[index.min(TABLE_ROWS - 1)]
    }

    pub fn rows(&self) -> &[[f32; KERNEL_TAPS]; TABLE_ROWS] {
        &self.rows
    }
}

/// Snapshot of the three leaky integrators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulators {
    pub triangle: f32,
    pub sawtooth: f32,
    pub square: f32,
}

pub struct BlitOscillator {
    sample_rate: f32,
    sample_period: f32,

    positive_edge: f32,
    negative_edge: f32,
    positive_offset: f32,
    negative_offset: f32,
    leak: f32,
    triangle_leak: f32,
    ramp_step: f32, // f / sample_rate, refreshed every sample

    triangle: f32,
    sawtooth: f32,
    square: f32,

    sample_count: u32,
    negative_passed: bool,
    cursor: usize,
    positive: [f32; RING_SIZE],
    negative: [f32; RING_SIZE],
    table: BlitTable,
}

impl BlitOscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            sample_period: 1.0 / sample_rate,

            positive_edge: 0.0,
            negative_edge: 0.0,
            positive_offset: 0.0,
            negative_offset: 0.0,
            leak: LEAK,
            triangle_leak: LEAK,
            ramp_step: 0.0,

            triangle: 0.0,
            sawtooth: 0.0,
            square: 0.0,

            sample_count: 0,
            negative_passed: false,
            cursor: 0,
            positive: [0.0; RING_SIZE],
            negative: [0.0; RING_SIZE],
            table: BlitTable::generate(),
        }
    }

    /// Generate one sample of `waveform` at `frequency` Hz.
    ///
    /// `frequency` must be positive; the oscillator wrapper only routes
    /// frequencies above its low-frequency threshold here.
    pub fn next_sample(&mut self, frequency: f32, waveform: Waveform) -> f32 {
        self.ramp_step = frequency * self.sample_period;

        let sample = match waveform {
            Waveform::Triangle => self.next_triangle(frequency),
            Waveform::Sawtooth => self.next_sawtooth(frequency),
            Waveform::Square => self.next_square(frequency),
        };

        self.positive[self.cursor] = 0.0;
        self.negative[self.cursor] = 0.0;
        self.sample_count += 1;
        self.cursor = (self.cursor + 1) % RING_SIZE;

        sample
    }

    fn next_triangle(&mut self, frequency: f32) -> f32 {
        let square = self.next_square(frequency);
        self.triangle =
            self.triangle * self.triangle_leak + square * 4.0 * frequency * self.sample_period;
        self.triangle
    }

    fn next_sawtooth(&mut self, frequency: f32) -> f32 {
        self.negative_edge = self.sample_rate / frequency + self.negative_offset;

        if self.sample_count >= self.negative_edge as u32 {
            self.sample_count = 0;
            self.inject_negative();
        }

        self.sawtooth = self.sawtooth * self.leak + self.negative[self.cursor] + self.ramp_step;
        self.sawtooth
    }

    fn next_square(&mut self, frequency: f32) -> f32 {
        self.positive_edge = self.sample_rate / frequency + self.positive_offset;
        self.negative_edge = (self.positive_edge + self.positive_offset) * 0.5;

        if self.sample_count >= self.positive_edge as u32 {
            self.negative_passed = false;
            self.sample_count = 0;
            self.inject_positive();
        }

        if self.negative_edge_crossed() {
            self.inject_negative();
        }

        self.square = self.square * self.leak
            + self.positive[self.cursor]
            + self.negative[self.cursor];
        self.square
    }

    fn negative_edge_crossed(&mut self) -> bool {
        let crossed = !self.negative_passed && self.sample_count >= self.negative_edge as u32;
        if crossed {
            self.negative_passed = true;
        }
        crossed
    }

    fn inject_positive(&mut self) {
        self.positive_offset = self.positive_edge.fract();
        let row = self.table.row(self.positive_offset);
        for (i, tap) in row.iter().enumerate() {
            self.positive[(self.cursor + i) % RING_SIZE] += tap;
        }
    }

    fn inject_negative(&mut self) {
        self.negative_offset = self.negative_edge.fract();
        let row = self.table.row(self.negative_offset);
        for (i, tap) in row.iter().enumerate() {
            self.negative[(self.cursor + i) % RING_SIZE] -= tap;
        }
    }

    /// Zero the integrators and restart the period count.
    ///
    /// Pending ring corrections are kept; they drain within 16 samples.
    pub fn clear_accumulators(&mut self) {
        self.triangle = 0.0;
        self.sawtooth = 0.0;
        self.square = 0.0;
        self.sample_count = 0;
    }

    pub fn accumulators(&self) -> Accumulators {
        Accumulators {
            triangle: self.triangle,
            sawtooth: self.sawtooth,
            square: self.square,
        }
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn table(&self) -> &BlitTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_828.0;

    fn render(osc: &mut BlitOscillator, frequency: f32, waveform: Waveform, n: usize) -> Vec<f32> {
        (0..n).map(|_| osc.next_sample(frequency, waveform)).collect()
    }

    fn falling_zero_crossings(samples: &[f32]) -> Vec<usize> {
        samples
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] >= 0.0 && w[1] < 0.0)
            .map(|(i, _)| i + 1)
            .collect()
    }

    #[test]
    fn every_table_row_sums_to_one() {
        let table = BlitTable::generate();
        for (i, row) in table.rows().iter().enumerate() {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "row {} sums to {}", i, sum);
        }
    }

    #[test]
    fn zero_offset_kernel_peaks_at_centre_tap() {
        let table = BlitTable::generate();
        let row = table.row(0.0);
        let peak = row
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc });
        assert_eq!(peak.0, KERNEL_TAPS / 2);
    }

    #[test]
    fn row_lookup_clamps_to_last_row() {
        let table = BlitTable::generate();
        let last = table.rows()[TABLE_ROWS - 1];
        assert_eq!(*table.row(0.99999), last);
    }

    #[test]
    fn sawtooth_period_matches_frequency() {
        let mut osc = BlitOscillator::new(SAMPLE_RATE);
        let samples = render(&mut osc, 440.0, Waveform::Sawtooth, 12_000);

        // Skip the leak's start-up settling
        let crossings = falling_zero_crossings(&samples[6_000..]);
        assert!(crossings.len() > 40);

        for pair in crossings.windows(2) {
            let spacing = pair[1] - pair[0];
            assert!((109..=113).contains(&spacing), "spacing {}", spacing);
        }

        let span = (crossings[crossings.len() - 1] - crossings[0]) as f32;
        let mean = span / (crossings.len() - 1) as f32;
        let expected = SAMPLE_RATE / 440.0;
        assert!((mean - expected).abs() < 0.25, "mean period {} vs {}", mean, expected);
    }

    #[test]
    fn square_alternates_between_two_levels() {
        let mut osc = BlitOscillator::new(SAMPLE_RATE);
        let samples = render(&mut osc, 1_000.0, Waveform::Square, 20_000);
        let steady = &samples[10_000..];

        let max = steady.iter().fold(f32::MIN, |acc, &x| acc.max(x));
        let min = steady.iter().fold(f32::MAX, |acc, &x| acc.min(x));
        let swing = max - min;
        assert!(swing > 0.9 && swing < 1.4, "square swing {}", swing);

        let mean = steady.iter().sum::<f32>() / steady.len() as f32;
        assert!(mean.abs() < 0.1, "square should settle around zero, mean {}", mean);
    }

    #[test]
    fn triangle_is_continuous() {
        let mut osc = BlitOscillator::new(SAMPLE_RATE);
        let samples = render(&mut osc, 500.0, Waveform::Triangle, 30_000);
        let steady = &samples[20_000..];

        // Slope bound: square level (~0.5) * 4f/sr, with headroom for kernel ringing
        let max_step = 4.0 * 500.0 / SAMPLE_RATE;
        for pair in steady.windows(2) {
            assert!((pair[1] - pair[0]).abs() < max_step, "jump {:?}", pair);
        }
    }

    #[test]
    fn clear_zeroes_accumulators_and_counter() {
        let mut osc = BlitOscillator::new(SAMPLE_RATE);
        render(&mut osc, 220.0, Waveform::Triangle, 1_000);
        render(&mut osc, 220.0, Waveform::Sawtooth, 1_000);
        assert_ne!(osc.accumulators().square, 0.0);
        assert_ne!(osc.accumulators().sawtooth, 0.0);

        osc.clear_accumulators();

        assert_eq!(
            osc.accumulators(),
            Accumulators {
                triangle: 0.0,
                sawtooth: 0.0,
                square: 0.0
            }
        );
        assert_eq!(osc.sample_count(), 0);
    }

    #[test]
    fn frequency_sweep_stays_bounded() {
        // Vibrato-style per-sample frequency changes across the audio band
        for waveform in [Waveform::Sawtooth, Waveform::Square] {
            let mut osc = BlitOscillator::new(SAMPLE_RATE);
            let n = 96_000;
            for i in 0..n {
                let t = i as f32 / n as f32;
                let frequency = 40.0 * 2.0_f32.powf(t * 7.0);
                let s = osc.next_sample(frequency, waveform);
                assert!(s.is_finite());
                assert!(s.abs() < 4.0, "{:?} sample {} at {} Hz", waveform, s, frequency);
            }
        }
    }

    #[test]
    fn cursor_wraps_without_losing_corrections() {
        let mut osc = BlitOscillator::new(SAMPLE_RATE);
        // 255 samples puts the next injection across the ring seam
        let samples = render(&mut osc, 190.0, Waveform::Sawtooth, 5 * RING_SIZE + 40);
        assert!(samples.iter().all(|s| s.is_finite() && s.abs() < 2.0));
    }
}
