use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

pub fn render(frame: &mut Frame, samples: &[f32], sample_rate: f32, spectrum: &[(f64, f64)]) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(frame.area());
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_chunks[1]);

    // Downsample the waveform to the chart width.
    let target_w = main_chunks[0].width.max(1) as usize;
    let step = samples.len().div_ceil(target_w).max(1);
    let points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .step_by(step)
        .map(|(i, &s)| (i as f64, s as f64))
        .collect();

    let wave = Chart::new(vec![Dataset::default()
        .name("Waveform")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)])
    .block(
        Block::default()
            .title("Oscilloscope - Press any key to quit")
            .borders(Borders::ALL),
    )
    .x_axis(
        Axis::default()
            .title("Sample")
            .bounds([0.0, samples.len() as f64]),
    )
    .y_axis(Axis::default().title("Amp").bounds([-1.0, 1.0]));

    let spec_chart = render_spectrum(spectrum);

    let peak = samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    let rms = if samples.is_empty() {
        0.0
    } else {
        (samples.iter().map(|&x| x * x).sum::<f32>() / samples.len() as f32).sqrt()
    };
    let info_lines = vec![
        format!("Peak: {peak:.3}").into(),
        format!("RMS:  {rms:.3}").into(),
        format!("Window: {} samples", samples.len()).into(),
        format!("Sample Rate: {sample_rate:.1} Hz").into(),
    ];
    let info =
        Paragraph::new(info_lines).block(Block::default().title("Info").borders(Borders::ALL));

    frame.render_widget(wave, main_chunks[0]);
    frame.render_widget(spec_chart, right_chunks[0]);
    frame.render_widget(info, right_chunks[1]);
}

fn render_spectrum(data: &[(f64, f64)]) -> Chart {
    let dataset = Dataset::default()
        .name("Spectrum")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(data);

    let max_freq = data.iter().map(|(f, _)| *f).fold(0.0, f64::max).max(1.0);
    let max_db = data.iter().map(|(_, db)| *db).fold(-100.0, f64::max);

    Chart::new(vec![dataset])
        .block(
            Block::default()
                .title("Spectrum Analyzer")
                .borders(Borders::ALL),
        )
        .x_axis(Axis::default().title("Hz").bounds([0.0, max_freq]))
        .y_axis(
            Axis::default()
                .title("dB")
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"]),
        )
}

/// Windowed FFT over the scope snapshot, reduced to log-spaced display bins.
pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    freq_bins: Vec<f64>,
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(window_len: usize, sample_rate: f32, num_bins: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_len);

        // Hann window
        let window: Vec<f32> = (0..window_len)
            .map(|i| {
                if window_len > 1 {
                    let denom = (window_len - 1) as f32;
                    0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        // Log-spaced display bins from 20 Hz to Nyquist.
        let half = (window_len / 2).max(1);
        let max_freq = (sample_rate as f64 / 2.0).max(1.0);
        let min_freq = 20.0f64.min(max_freq);
        let ratio = (max_freq / min_freq).max(1.0);

        let mut freq_bins = Vec::with_capacity(num_bins);
        let mut bin_indices = Vec::with_capacity(num_bins);
        for i in 0..num_bins {
            let t = if num_bins > 1 {
                i as f64 / (num_bins - 1) as f64
            } else {
                0.0
            };
            let freq = min_freq * ratio.powf(t);
            let index =
                ((freq * window_len as f64 / sample_rate as f64).round() as usize).min(half - 1);
            freq_bins.push(freq);
            bin_indices.push(index);
        }

        let scratch = vec![Complex::new(0.0, 0.0); window_len];
        let spectrum = freq_bins.iter().map(|&f| (f, -120.0)).collect();

        Self {
            window,
            freq_bins,
            bin_indices,
            fft,
            scratch,
            spectrum,
        }
    }

    pub fn update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for (slot, (&sample, &w)) in self
            .scratch
            .iter_mut()
            .zip(samples.iter().zip(&self.window))
        {
            slot.re = sample * w;
            slot.im = 0.0;
        }
        self.fft.process(&mut self.scratch);

        for (i, &idx) in self.bin_indices.iter().enumerate() {
            let bin = self.scratch[idx];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            self.spectrum[i] = (self.freq_bins[i], 10.0 * (power as f64).log10());
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}
