use serde::Deserialize;
use trellis_core::{NormalisePolicy, ViterbiParams};

/// Which trellis code to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CodeVariant {
    /// K=3, rate 1/2 convolutional code, antipodal samples
    K3,
    /// 8-state V.32 style trellis code, 32-point QAM
    V32,
}

#[derive(Debug, Clone)]
pub struct CfgDecoder {
    pub variant: CodeVariant,
    pub params: ViterbiParams,
}

impl Default for CfgDecoder {
    fn default() -> Self {
        Self {
            variant: CodeVariant::K3,
            params: ViterbiParams::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CfgChannel {
    /// Peak amplitude of the uniform noise added to every real component
    pub noise: f64,
    /// Noise generator seed. Seeded from the OS if absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct CfgSource {
    pub message: String,
    /// Number of passes in non-continuous mode
    pub repeat: u32,
}

impl Default for CfgSource {
    fn default() -> Self {
        Self {
            message: "Hello World, this is a trellis coded message".to_string(),
            repeat: 1,
        }
    }
}

/// Complete simulator configuration
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    /// Optional verbose log file
    pub debug_log: Option<String>,
    pub decoder: CfgDecoder,
    pub channel: CfgChannel,
    pub source: CfgSource,
}

impl SimConfig {
    pub fn normalise_policy(&self) -> NormalisePolicy {
        self.decoder.params.normalise
    }
}
