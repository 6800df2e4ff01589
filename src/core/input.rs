/// Client-owned input vector plus the draw-gesture flag.
///
/// Values always stay within `[0, 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    values: Vec<f32>,
    drawing: bool,
}

impl InputState {
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![0.0; size],
            drawing: false,
        }
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flip a cell between 0 and 1. Returns false for an out-of-range index.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.values.get_mut(index) {
            Some(v) => {
                *v = if *v > 0.0 { 0.0 } else { 1.0 };
                true
            }
            None => false,
        }
    }

    pub fn begin_draw(&mut self) {
        self.drawing = true;
    }

    pub fn end_draw(&mut self) {
        self.drawing = false;
    }

    #[inline]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Add `increment` to a cell, saturating at 1. Returns true if the value changed.
    pub fn draw(&mut self, index: usize, increment: f32) -> bool {
        match self.values.get_mut(index) {
            Some(v) => {
                let next = (*v + increment).clamp(0.0, 1.0);
                let changed = next != *v;
                *v = next;
                changed
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
        self.drawing = false;
    }
}
