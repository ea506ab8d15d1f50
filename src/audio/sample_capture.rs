// src/audio/sample_capture.rs
//! A wrapper source that taps decoded audio into a shared buffer for analysis.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use ringbuf::{traits::*, HeapRb};
use rodio::Source;

/// Mono samples recently played, plus the rate they were played at.
pub struct CaptureBuffer {
    samples: Mutex<HeapRb<f32>>,
    sample_rate: AtomicU32,
}

impl CaptureBuffer {
    /// Create a buffer holding at most `capacity` mono samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Mutex::new(HeapRb::new(capacity)),
            sample_rate: AtomicU32::new(44_100),
        }
    }

    /// Append a sample, dropping the oldest one when full.
    pub fn push(&self, sample: f32) {
        if let Ok(mut buf) = self.samples.lock() {
            if buf.is_full() {
                let _ = buf.try_pop();
            }
            let _ = buf.try_push(sample);
        }
    }

    /// Copy out the most recent `count` samples (fewer if not enough were captured).
    pub fn latest(&self, count: usize) -> Vec<f32> {
        match self.samples.lock() {
            Ok(buf) => {
                let available = buf.occupied_len();
                let start = available.saturating_sub(count);
                buf.iter().skip(start).copied().collect()
            }
            Err(_) => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut buf) = self.samples.lock() {
            buf.clear();
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.load(Ordering::Relaxed)
    }

    pub fn set_sample_rate(&self, rate: u32) {
        self.sample_rate.store(rate, Ordering::Relaxed);
    }
}

/// Passes samples through unchanged while pushing a mono downmix of every
/// frame into a [`CaptureBuffer`].
pub struct SampleCapture<S> {
    source: S,
    buffer: Arc<CaptureBuffer>,
    /// Sum of the channels seen so far in the current frame
    frame_sum: f32,
    /// Channel index within the current frame
    channel: u16,
}

impl<S> SampleCapture<S>
where
    S: Source<Item = f32>,
{
    /// Create a new sample capture wrapper around an existing source.
    pub fn new(source: S, buffer: Arc<CaptureBuffer>) -> Self {
        buffer.set_sample_rate(source.sample_rate());
        Self {
            source,
            buffer,
            frame_sum: 0.0,
            channel: 0,
        }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.source.next()?;
        let channels = self.source.channels().max(1);

        self.frame_sum += sample;
        self.channel += 1;
        if self.channel >= channels {
            self.buffer.push(self.frame_sum / channels as f32);
            self.frame_sum = 0.0;
            self.channel = 0;
        }
        Some(sample)
    }
}

impl<S> Source for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        self.source.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::buffer::SamplesBuffer;

    #[test]
    fn test_stereo_frames_are_downmixed() {
        let buffer = Arc::new(CaptureBuffer::new(16));
        let source = SamplesBuffer::new(2, 48_000, vec![1.0f32, 0.0, 0.5, 0.5, -1.0, -0.5]);
        let passed: Vec<f32> = SampleCapture::new(source, buffer.clone()).collect();

        assert_eq!(passed.len(), 6);
        assert_eq!(buffer.latest(16), vec![0.5, 0.5, -0.75]);
        assert_eq!(buffer.sample_rate(), 48_000);
    }

    #[test]
    fn test_buffer_keeps_only_the_newest_samples() {
        let buffer = CaptureBuffer::new(3);
        for s in [1.0, 2.0, 3.0, 4.0, 5.0] {
            buffer.push(s);
        }
        assert_eq!(buffer.latest(10), vec![3.0, 4.0, 5.0]);
        assert_eq!(buffer.latest(2), vec![4.0, 5.0]);
        buffer.clear();
        assert!(buffer.latest(10).is_empty());
    }
}
