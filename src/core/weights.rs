use super::protocol::WeightsPayload;

/// Latest dense weight matrices, flattened row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightStore {
    dense_0: Option<Vec<f32>>,
    dense_1: Option<Vec<f32>>,
}

impl WeightStore {
    /// Replace each matrix present in the payload; absent ones are kept.
    pub fn replace(&mut self, payload: WeightsPayload) -> bool {
        let mut changed = false;
        if let Some(w) = payload.dense_0 {
            self.dense_0 = Some(w);
            changed = true;
        }
        if let Some(w) = payload.dense_1 {
            self.dense_1 = Some(w);
            changed = true;
        }
        changed
    }

    pub fn clear(&mut self) {
        self.dense_0 = None;
        self.dense_1 = None;
    }

    /// Input→hidden weights; empty until the first push carrying them.
    #[inline]
    pub fn dense_0(&self) -> &[f32] {
        self.dense_0.as_deref().unwrap_or(&[])
    }

    /// Hidden→output weights; empty until the first push carrying them.
    #[inline]
    pub fn dense_1(&self) -> &[f32] {
        self.dense_1.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.dense_0.is_none() && self.dense_1.is_none()
    }
}
