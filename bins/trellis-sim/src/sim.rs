use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use trellis_codec::{ComplexSample, K3Decoder, K3Encoder, V32Decoder, V32Encoder, ViterbiInitErr};
use trellis_config::{CfgChannel, CodeVariant, SimConfig};

/// Outcome of sending one message through encoder, channel and decoder
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub decoded: Vec<u8>,
    pub byte_errors: usize,
    pub bit_errors: u32,
}

impl PassReport {
    /// Compare decoded output against what was sent. Missing bytes count as wrong in all bits.
    pub fn compare(sent: &[u8], decoded: Vec<u8>) -> Self {
        let mut byte_errors = 0;
        let mut bit_errors = 0;
        for (i, &tx) in sent.iter().enumerate() {
            let rx_bits = match decoded.get(i) {
                Some(&rx) => (tx ^ rx).count_ones(),
                None => 8,
            };
            if rx_bits != 0 {
                byte_errors += 1;
                bit_errors += rx_bits;
            }
        }
        Self { decoded, byte_errors, bit_errors }
    }

    pub fn is_clean(&self) -> bool {
        self.byte_errors == 0
    }

    pub fn decoded_text(&self) -> String {
        String::from_utf8_lossy(&self.decoded).into_owned()
    }
}

/// Adds `noise * U(-1, 1)` to every real component
pub struct NoiseSource {
    rng: StdRng,
    amplitude: f64,
}

impl NoiseSource {
    pub fn new(cfg: &CfgChannel) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, amplitude: cfg.noise }
    }

    #[inline]
    fn next(&mut self) -> f64 {
        self.amplitude * self.rng.random_range(-1.0..1.0)
    }

    pub fn add_real<const N: usize>(&mut self, samples: [f64; N]) -> [f64; N] {
        samples.map(|s| s + self.next())
    }

    pub fn add_complex<const N: usize>(&mut self, samples: [ComplexSample; N]) -> [ComplexSample; N] {
        samples.map(|s| ComplexSample::new(s.re + self.next(), s.im + self.next()))
    }
}

enum Codec {
    K3 { encoder: K3Encoder, decoder: K3Decoder },
    V32 { encoder: V32Encoder, decoder: V32Decoder },
}

/// Encoder, noisy channel and decoder for one code variant
pub struct Simulator {
    codec: Codec,
    noise: NoiseSource,
}

impl Simulator {
    pub fn new(cfg: &SimConfig) -> Result<Self, ViterbiInitErr> {
        let params = cfg.decoder.params;
        let codec = match cfg.decoder.variant {
            CodeVariant::K3 => Codec::K3 { encoder: K3Encoder::new(), decoder: K3Decoder::new(params)? },
            CodeVariant::V32 => Codec::V32 { encoder: V32Encoder::new(), decoder: V32Decoder::new(params)? },
        };
        Ok(Self { codec, noise: NoiseSource::new(&cfg.channel) })
    }

    /// Zero bytes needed after a message to push its last bits out of the decoder
    pub fn flush_bytes(&self) -> usize {
        match &self.codec {
            // One decoded bit per sample pair, 8 per byte
            Codec::K3 { decoder, .. } => (decoder.trace_back_depth() - 1).div_ceil(8),
            // One decoded nibble per symbol, 2 per byte
            Codec::V32 { decoder, .. } => (decoder.trace_back_depth() - 1).div_ceil(2),
        }
    }

    /// Send `message` from a freshly initialised encoder and decoder
    pub fn run_pass(&mut self, message: &[u8]) -> PassReport {
        let flush = self.flush_bytes();
        let input = message.iter().cloned().chain(std::iter::repeat_n(0, flush));
        let noise = &mut self.noise;

        let mut decoded: Vec<u8> = match &mut self.codec {
            Codec::K3 { encoder, decoder } => {
                encoder.reset();
                decoder.init();
                input
                    .filter_map(|byte| decoder.decode_byte(&noise.add_real(encoder.encode_samples(byte))))
                    .collect()
            }
            Codec::V32 { encoder, decoder } => {
                encoder.reset();
                decoder.init();
                input
                    .filter_map(|byte| decoder.decode_byte(noise.add_complex(encoder.encode_byte(byte))))
                    .collect()
            }
        };
        decoded.truncate(message.len());
        tracing::debug!("pass decoded {} of {} bytes", decoded.len(), message.len());

        PassReport::compare(message, decoded)
    }
}
