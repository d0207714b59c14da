use trellis_codec::{K3Decoder, K3Encoder, V32Decoder, V32Encoder};

use super::NoisyChannel;

/// Encode `message`, pass it through `channel` and decode it again.
/// Zero bytes are appended to push the last message bits through the
/// decoder, the output is cut to the message length.
pub fn k3_round_trip(message: &[u8], decoder: &mut K3Decoder, channel: &mut NoisyChannel) -> Vec<u8> {
    let mut encoder = K3Encoder::new();
    let flush = (decoder.trace_back_depth() - 1).div_ceil(8);
    let mut out: Vec<u8> = message
        .iter()
        .cloned()
        .chain(std::iter::repeat_n(0, flush))
        .filter_map(|byte| decoder.decode_byte(&channel.real(encoder.encode_samples(byte))))
        .collect();
    out.truncate(message.len());
    out
}

/// Like `k3_round_trip()`, for the V.32 code
pub fn v32_round_trip(message: &[u8], decoder: &mut V32Decoder, channel: &mut NoisyChannel) -> Vec<u8> {
    let mut encoder = V32Encoder::new();
    let flush = (decoder.trace_back_depth() - 1).div_ceil(2);
    let mut out: Vec<u8> = message
        .iter()
        .cloned()
        .chain(std::iter::repeat_n(0, flush))
        .filter_map(|byte| decoder.decode_byte(channel.complex(encoder.encode_byte(byte))))
        .collect();
    out.truncate(message.len());
    out
}
