use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trellis_codec::{ComplexSample, RealSample};

/// Adds uniformly distributed noise of a fixed amplitude to channel samples.
/// Seeded, so every test run sees the same noise.
pub struct NoisyChannel {
    rng: StdRng,
    amplitude: f64,
}

impl NoisyChannel {
    pub fn new(seed: u64, amplitude: f64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), amplitude }
    }

    fn noise(&mut self) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        self.amplitude * self.rng.random_range(-1.0..1.0)
    }

    pub fn real<const N: usize>(&mut self, samples: [RealSample; N]) -> [RealSample; N] {
        samples.map(|s| s + self.noise())
    }

    pub fn complex<const N: usize>(&mut self, samples: [ComplexSample; N]) -> [ComplexSample; N] {
        samples.map(|s| ComplexSample::new(s.re + self.noise(), s.im + self.noise()))
    }
}
