use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;
use trellis_core::{NormalisePolicy, ViterbiParams};

use super::sim_config::{CfgChannel, CfgDecoder, CfgSource, CodeVariant, SimConfig};

/// Build `SimConfig` from a TOML configuration string
pub fn from_toml_str(toml_str: &str) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if !root.decoder.extra.is_empty() {
        return Err(format!("Unrecognized fields in decoder: {:?}", sorted_keys(&root.decoder.extra)).into());
    }
    if let Some(ref ch) = root.channel {
        if !ch.extra.is_empty() {
            return Err(format!("Unrecognized fields in channel: {:?}", sorted_keys(&ch.extra)).into());
        }
    }
    if let Some(ref src) = root.source {
        if !src.extra.is_empty() {
            return Err(format!("Unrecognized fields in source: {:?}", sorted_keys(&src.extra)).into());
        }
    }

    // Build config from required and optional values
    let mut cfg = SimConfig {
        debug_log: root.debug_log,
        decoder: CfgDecoder {
            variant: root.decoder.variant,
            params: ViterbiParams::default(),
        },
        channel: CfgChannel::default(),
        source: CfgSource::default(),
    };

    apply_decoder_patch(&mut cfg.decoder, root.decoder);
    cfg.decoder.params.validate()?;

    if let Some(ch) = root.channel {
        apply_channel_patch(&mut cfg.channel, ch)?;
    }
    if let Some(src) = root.source {
        apply_source_patch(&mut cfg.source, src)?;
    }

    Ok(cfg)
}

/// Build `SimConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SimConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_decoder_patch(dst: &mut CfgDecoder, src: DecoderDto) {
    if let Some(v) = src.trace_back_depth {
        dst.params.trace_back_depth = v;
    }
    if let Some(v) = src.normalise_error {
        dst.params.normalise = NormalisePolicy::from_flag(v);
    }
}

fn apply_channel_patch(dst: &mut CfgChannel, src: ChannelDto) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(v) = src.noise {
        if !v.is_finite() || v < 0.0 {
            return Err(format!("channel.noise must be a non-negative number, got {}", v).into());
        }
        dst.noise = v;
    }
    dst.seed = src.seed;
    Ok(())
}

fn apply_source_patch(dst: &mut CfgSource, src: SourceDto) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(v) = src.message {
        if v.is_empty() {
            return Err("source.message must not be empty".into());
        }
        dst.message = v;
    }
    if let Some(v) = src.repeat {
        if v == 0 {
            return Err("source.repeat must be at least 1".into());
        }
        dst.repeat = v;
    }
    Ok(())
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    decoder: DecoderDto,

    #[serde(default)]
    channel: Option<ChannelDto>,

    #[serde(default)]
    source: Option<SourceDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct DecoderDto {
    variant: CodeVariant,
    trace_back_depth: Option<usize>,
    normalise_error: Option<bool>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct ChannelDto {
    noise: Option<f64>,
    seed: Option<u64>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct SourceDto {
    message: Option<String>,
    repeat: Option<u32>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}


#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{DEFAULT_TRACE_BACK_DEPTH, MAX_TRACE_BACK_DEPTH};

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = from_toml_str("config_version = \"0.1\"\n[decoder]\nvariant = \"V32\"\n").unwrap();
        assert_eq!(cfg.decoder.variant, CodeVariant::V32);
        assert_eq!(cfg.decoder.params.trace_back_depth, DEFAULT_TRACE_BACK_DEPTH);
        assert_eq!(cfg.decoder.params.normalise, NormalisePolicy::Disabled);
        assert_eq!(cfg.channel.noise, 0.0);
        assert_eq!(cfg.channel.seed, None);
        assert_eq!(cfg.source.repeat, 1);
        assert!(cfg.debug_log.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            config_version = "0.1"
            debug_log = "trellis.log"

            [decoder]
            variant = "K3"
            trace_back_depth = 20
            normalise_error = true

            [channel]
            noise = 0.75
            seed = 1234

            [source]
            message = "abc"
            repeat = 3
        "#;
        let cfg = from_toml_str(toml).unwrap();
        assert_eq!(cfg.debug_log.as_deref(), Some("trellis.log"));
        assert_eq!(cfg.decoder.variant, CodeVariant::K3);
        assert_eq!(cfg.decoder.params, ViterbiParams::new(20).with_normalise(NormalisePolicy::SubtractMinimum));
        assert_eq!(cfg.channel.noise, 0.75);
        assert_eq!(cfg.channel.seed, Some(1234));
        assert_eq!(cfg.source.message, "abc");
        assert_eq!(cfg.source.repeat, 3);
    }

    #[test]
    fn test_shipped_configs_parse() {
        let k3 = from_toml_str(include_str!("../../../configs/k3.toml")).unwrap();
        assert_eq!(k3.decoder.variant, CodeVariant::K3);
        let v32 = from_toml_str(include_str!("../../../configs/v32.toml")).unwrap();
        assert_eq!(v32.decoder.variant, CodeVariant::V32);
    }

    #[test]
    fn test_rejects_wrong_version() {
        let err = from_toml_str("config_version = \"0.5\"\n[decoder]\nvariant = \"K3\"\n").unwrap_err();
        assert!(err.to_string().contains("config_version"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let top = "config_version = \"0.1\"\nfoo = 1\n[decoder]\nvariant = \"K3\"\n";
        assert!(from_toml_str(top).unwrap_err().to_string().contains("foo"));

        let nested = "config_version = \"0.1\"\n[decoder]\nvariant = \"K3\"\ndepth = 3\n";
        assert!(from_toml_str(nested).unwrap_err().to_string().contains("depth"));

        let channel = "config_version = \"0.1\"\n[decoder]\nvariant = \"K3\"\n[channel]\nsnr = 3.0\n";
        assert!(from_toml_str(channel).unwrap_err().to_string().contains("snr"));
    }

    #[test]
    fn test_rejects_unknown_variant() {
        assert!(from_toml_str("config_version = \"0.1\"\n[decoder]\nvariant = \"K7\"\n").is_err());
    }

    #[test]
    fn test_rejects_invalid_depth() {
        let zero = "config_version = \"0.1\"\n[decoder]\nvariant = \"K3\"\ntrace_back_depth = 0\n";
        assert!(from_toml_str(zero).is_err());

        let huge = format!(
            "config_version = \"0.1\"\n[decoder]\nvariant = \"K3\"\ntrace_back_depth = {}\n",
            MAX_TRACE_BACK_DEPTH + 1
        );
        assert!(from_toml_str(&huge).is_err());
    }

    #[test]
    fn test_rejects_negative_noise() {
        let toml = "config_version = \"0.1\"\n[decoder]\nvariant = \"K3\"\n[channel]\nnoise = -0.1\n";
        assert!(from_toml_str(toml).is_err());
    }

    #[test]
    fn test_from_reader() {
        let toml = "config_version = \"0.1\"\n[decoder]\nvariant = \"V32\"\n[source]\nrepeat = 2\n";
        let cfg = from_reader(toml.as_bytes()).unwrap();
        assert_eq!(cfg.source.repeat, 2);
    }
}
