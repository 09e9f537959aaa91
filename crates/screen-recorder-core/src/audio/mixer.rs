//! Channel conversion and sample-wise mixing of per-source audio.
//!
//! Every source is brought to the output channel layout first, then the
//! tracks are summed frame by frame. The shorter track is treated as
//! silence past its end and the sum is hard-clipped to `[-1.0, 1.0]`.

/// Sample rate of the intermediate audio track.
pub(crate) const OUTPUT_SAMPLE_RATE: u32 = 44_100;

/// Convert interleaved audio between channel counts.
///
/// Only mono and stereo targets are produced. Down-mixing averages the
/// source channels; up-mixing from mono duplicates; stereo taken from a
/// multichannel source uses the first two channels.
pub(crate) fn remix(interleaved: &[f32], from: u16, to: u16) -> Vec<f32> {
    let from = usize::from(from.max(1));
    let whole = interleaved.len() - interleaved.len() % from;
    let frames = interleaved[..whole].chunks_exact(from);

    match (from, to) {
        (f, t) if f == usize::from(t) => interleaved[..whole].to_vec(),
        (_, 1) => frames
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect(),
        (1, _) => frames.flat_map(|frame| [frame[0], frame[0]]).collect(),
        _ => frames.flat_map(|frame| [frame[0], frame[1]]).collect(),
    }
}

/// Sum equally laid-out interleaved tracks into one, clipping the result.
pub(crate) fn mix_tracks(tracks: &[Vec<f32>]) -> Vec<f32> {
    let len = tracks.iter().map(Vec::len).max().unwrap_or(0);
    let mut mixed = vec![0.0f32; len];

    for track in tracks {
        for (out, sample) in mixed.iter_mut().zip(track) {
            *out += sample;
        }
    }

    for sample in &mut mixed {
        *sample = sample.clamp(-1.0, 1.0);
    }

    mixed
}

/// Quantize a float sample to 16-bit PCM.
pub(crate) fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16
}
