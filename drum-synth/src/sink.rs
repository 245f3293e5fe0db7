//! Output sinks for rendered samples

use ringbuf::traits::RingBuffer;

/// Destination of rendered samples
///
/// The render loop only asks how much room is left and pushes one byte at a
/// time, overwriting the oldest sample when full.
pub trait SampleSink {
    /// Free slots
    fn writable(&self) -> usize;

    /// Push a sample, dropping the oldest one if there is no room
    fn overwrite(&mut self, sample: u8);
}

impl<R: RingBuffer<Item = u8>> SampleSink for R {
    fn writable(&self) -> usize {
        self.vacant_len()
    }

    fn overwrite(&mut self, sample: u8) {
        let _ = self.push_overwrite(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbuf::HeapRb;
    use ringbuf::traits::Consumer;

    #[test]
    fn test_ring_buffer_sink() {
        let mut rb = HeapRb::<u8>::new(4);
        assert_eq!(SampleSink::writable(&rb), 4);
        for sample in 1..=3 {
            rb.overwrite(sample);
        }
        assert_eq!(SampleSink::writable(&rb), 1);
        rb.overwrite(4);
        rb.overwrite(5);
        assert_eq!(SampleSink::writable(&rb), 0);
        let drained: Vec<u8> = rb.pop_iter().collect();
        assert_eq!(drained, vec![2, 3, 4, 5]);
    }
}
