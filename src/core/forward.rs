//! Inference for the 2-layer network: tanh hidden layer, softmax output.

use super::topology::Topology;
use super::weights::WeightStore;

/// Activations derived from one input vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Activations {
    /// Hidden layer before tanh.
    pub hidden_pre: Vec<f32>,
    pub hidden: Vec<f32>,
    /// Softmax probabilities.
    pub output: Vec<f32>,
}

/// Dense layer without bias: `out[j] = Σ_i input[i] * weights[i * out_size + j]`.
///
/// Missing weight or input entries count as zero, so undersized arrays never
/// panic; the result always has `out_size` entries.
pub fn dense_forward(input: &[f32], weights: &[f32], in_size: usize, out_size: usize) -> Vec<f32> {
    let mut out = vec![0.0_f32; out_size];
    for (i, &x) in input.iter().take(in_size).enumerate() {
        if x == 0.0 {
            continue;
        }
        let row_start = i * out_size;
        if row_start >= weights.len() {
            break;
        }
        let row_end = (row_start + out_size).min(weights.len());
        for (o, w) in out.iter_mut().zip(&weights[row_start..row_end]) {
            *o += x * w;
        }
    }
    out
}

/// Numerically stable softmax. Degrades to uniform when the input is not finite.
pub fn softmax(x: &[f32]) -> Vec<f32> {
    if x.is_empty() {
        return Vec::new();
    }
    let max = x.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = x.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        let uniform = 1.0 / x.len() as f32;
        return vec![uniform; x.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

pub fn forward_pass(input: &[f32], weights: &WeightStore, topology: &Topology) -> Activations {
    let hidden_pre = dense_forward(
        input,
        weights.dense_0(),
        topology.input_size,
        topology.hidden_size,
    );
    let hidden: Vec<f32> = hidden_pre.iter().map(|v| v.tanh()).collect();
    let logits = dense_forward(
        &hidden,
        weights.dense_1(),
        topology.hidden_size,
        topology.output_size,
    );
    Activations {
        hidden_pre,
        hidden,
        output: softmax(&logits),
    }
}
