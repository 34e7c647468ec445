use super::AngleFilter;
use std::collections::VecDeque;

/// Moving average over the last `window_size` readings
pub struct MovingAverageFilter {
    window_size: usize,
    neck_buffer: VecDeque<f64>,
    torso_buffer: VecDeque<f64>,
}

impl MovingAverageFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            neck_buffer: VecDeque::with_capacity(window_size),
            torso_buffer: VecDeque::with_capacity(window_size),
        }
    }

    fn push(buffer: &mut VecDeque<f64>, window_size: usize, value: f64) -> f64 {
        if buffer.len() >= window_size {
            buffer.pop_front();
        }
        buffer.push_back(value);
        buffer.iter().sum::<f64>() / buffer.len() as f64
    }
}

impl AngleFilter for MovingAverageFilter {
    fn apply(&mut self, neck: f64, torso: f64) -> (f64, f64) {
        let neck_avg = Self::push(&mut self.neck_buffer, self.window_size, neck);
        let torso_avg = Self::push(&mut self.torso_buffer, self.window_size, torso);
        (neck_avg, torso_avg)
    }

    fn reset(&mut self) {
        self.neck_buffer.clear();
        self.torso_buffer.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}
