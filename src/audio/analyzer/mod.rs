// src/audio/analyzer/mod.rs
//! Amplitude and frequency-band analysis of the audio currently playing.

mod fft;

use std::sync::Arc;

use fft::{FftProcessor, BIN_COUNT, FFT_SIZE};

use super::sample_capture::CaptureBuffer;

/// Samples used for the amplitude estimate.
const LEVEL_WINDOW: usize = 1024;
/// Below this many captured samples the input reads as silence.
const MIN_SAMPLES: usize = 64;

/// Named frequency ranges that can be queried for energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Bass,
    Mid,
    HighMid,
}

impl Band {
    /// Frequency limits in Hz.
    pub fn range_hz(self) -> (f32, f32) {
        match self {
            Band::Bass => (20.0, 140.0),
            Band::Mid => (400.0, 2600.0),
            Band::HighMid => (2600.0, 5200.0),
        }
    }
}

/// What the visual layers read from the analyzer each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpectrumSample {
    /// Loudness in `[0, 1]`.
    pub amplitude: f32,
    /// Band energies in `[0, 255]`.
    pub bass: f32,
    pub mid: f32,
    pub high_mid: f32,
}

/// Analyzer over the samples captured from the player.
pub struct SpectrumAnalyzer {
    capture: Arc<CaptureBuffer>,
    fft: FftProcessor,
    /// Spectrum bound by the last `analyze_spectrum` call
    spectrum: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(capture: Arc<CaptureBuffer>) -> Self {
        Self {
            capture,
            fft: FftProcessor::new(0.8),
            spectrum: vec![0.0; BIN_COUNT],
        }
    }

    /// RMS level of the most recent samples.
    pub fn sample_amplitude(&self) -> f32 {
        let samples = self.capture.latest(LEVEL_WINDOW);
        if samples.len() < MIN_SAMPLES {
            return 0.0;
        }
        let rms = (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt();
        rms.clamp(0.0, 1.0)
    }

    /// Analyze the latest samples and bind the result for [`Self::band_energy`].
    pub fn analyze_spectrum(&mut self) -> &[f32] {
        let samples = self.capture.latest(FFT_SIZE);
        if samples.len() < MIN_SAMPLES {
            self.fft.reset();
            self.spectrum.iter_mut().for_each(|e| *e = 0.0);
        } else {
            self.spectrum = self.fft.compute(&samples);
        }
        &self.spectrum
    }

    /// Mean energy of the bound spectrum within `band`.
    pub fn band_energy(&self, band: Band) -> f32 {
        band_energy(&self.spectrum, self.capture.sample_rate(), band)
    }

    /// Amplitude, then a fresh spectrum, then the band queries.
    pub fn sample(&mut self) -> SpectrumSample {
        let amplitude = self.sample_amplitude();
        self.analyze_spectrum();
        SpectrumSample {
            amplitude,
            bass: self.band_energy(Band::Bass),
            mid: self.band_energy(Band::Mid),
            high_mid: self.band_energy(Band::HighMid),
        }
    }
}

/// Average of the bins between the band's limits, inclusive.
pub fn band_energy(spectrum: &[f32], sample_rate: u32, band: Band) -> f32 {
    if spectrum.is_empty() || sample_rate == 0 {
        return 0.0;
    }
    let nyquist = sample_rate as f32 / 2.0;
    let last = spectrum.len() - 1;
    let index = |hz: f32| ((hz / nyquist * spectrum.len() as f32).round() as usize).min(last);

    let (low_hz, high_hz) = band.range_hz();
    let (low, high) = (index(low_hz), index(high_hz));
    let bins = &spectrum[low..=high];
    bins.iter().sum::<f32>() / bins.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn tone(freq: f32, amplitude: f32, rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / rate as f32).sin() * amplitude)
            .collect()
    }

    fn analyzer_with(samples: &[f32], rate: u32) -> SpectrumAnalyzer {
        let capture = Arc::new(CaptureBuffer::new(4096));
        capture.set_sample_rate(rate);
        for &s in samples {
            capture.push(s);
        }
        SpectrumAnalyzer::new(capture)
    }

    #[test]
    fn test_empty_capture_reads_as_silence() {
        let mut analyzer = analyzer_with(&[], 44_100);
        assert_eq!(analyzer.sample(), SpectrumSample::default());
    }

    #[test]
    fn test_amplitude_of_sine_is_its_rms() {
        let analyzer = analyzer_with(&tone(440.0, 0.5, 44_100, 4096), 44_100);
        let level = analyzer.sample_amplitude();
        assert!((level - 0.5 / 2f32.sqrt()).abs() < 0.01, "level {level}");
    }

    #[test]
    fn test_bass_tone_lands_in_bass_band() {
        let mut analyzer = analyzer_with(&tone(80.0, 0.5, 44_100, 4096), 44_100);
        let sample = analyzer.sample();
        assert!(sample.bass > 100.0, "bass {}", sample.bass);
        assert!(sample.bass > sample.mid + 50.0);
        assert!(sample.bass > sample.high_mid + 50.0);
    }

    #[test]
    fn test_high_mid_tone_lands_in_high_mid_band() {
        let mut analyzer = analyzer_with(&tone(3800.0, 0.5, 44_100, 4096), 44_100);
        let sample = analyzer.sample();
        assert!(sample.high_mid > sample.bass);
        assert!(sample.high_mid > sample.mid);
    }

    #[test]
    fn test_band_energy_averages_inclusive_range() {
        // 1024 bins at 44.1kHz: bass spans bins 1..=7
        let mut spectrum = vec![0.0; 1024];
        for bin in 1..=7 {
            spectrum[bin] = 70.0;
        }
        assert_eq!(band_energy(&spectrum, 44_100, Band::Bass), 70.0);
        assert_eq!(band_energy(&spectrum, 44_100, Band::HighMid), 0.0);
    }

    #[test]
    fn test_energies_stay_in_byte_range() {
        let mut analyzer = analyzer_with(&tone(1000.0, 1.0, 48_000, 4096), 48_000);
        for _ in 0..5 {
            let s = analyzer.sample();
            for e in [s.bass, s.mid, s.high_mid] {
                assert!((0.0..=255.0).contains(&e));
            }
            assert!((0.0..=1.0).contains(&s.amplitude));
        }
    }
}
