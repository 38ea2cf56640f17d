//! Fixed-capacity ring buffer of sensor samples.
//!
//! Samples are written at a cursor that wraps modulo the capacity. The buffer
//! is "full" exactly when a write brings the cursor back to slot 0, which is
//! the signal for the pipeline to reduce the current generation.

/// Outcome of pushing one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The cursor advanced without wrapping.
    Filling { cursor: usize },
    /// The write completed a generation; the cursor is back at 0.
    Wrapped,
}

/// Ring of the most recent `capacity` samples.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    slots: Vec<f64>,
    cursor: usize,
}

impl SampleBuffer {
    /// Create a zero-filled buffer. A capacity of 0 is bumped to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0.0; capacity.max(1)],
            cursor: 0,
        }
    }

    /// Write a sample at the cursor and advance it.
    pub fn push(&mut self, sample: f64) -> PushOutcome {
        self.slots[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % self.slots.len();
        if self.cursor == 0 {
            PushOutcome::Wrapped
        } else {
            PushOutcome::Filling {
                cursor: self.cursor,
            }
        }
    }

    /// All slots in index order.
    pub fn as_slice(&self) -> &[f64] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index the next sample will be written to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of samples written in the current generation.
    pub fn pending(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = SampleBuffer::new(4);
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn test_wraps_after_capacity_writes() {
        let mut buffer = SampleBuffer::new(4);
        assert_eq!(buffer.push(1.0), PushOutcome::Filling { cursor: 1 });
        assert_eq!(buffer.push(2.0), PushOutcome::Filling { cursor: 2 });
        assert_eq!(buffer.push(3.0), PushOutcome::Filling { cursor: 3 });
        assert_eq!(buffer.push(4.0), PushOutcome::Wrapped);
        assert_eq!(buffer.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_second_generation_overwrites_in_place() {
        let mut buffer = SampleBuffer::new(2);
        buffer.push(1.0);
        buffer.push(2.0);
        buffer.push(9.0);
        assert_eq!(buffer.as_slice(), &[9.0, 2.0]);
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let mut buffer = SampleBuffer::new(0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.push(5.0), PushOutcome::Wrapped);
    }
}
