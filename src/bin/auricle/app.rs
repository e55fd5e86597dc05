use std::{thread, time::Duration};

use auricle_dsp::dsp::buffer::DspBuffer;
use auricle_dsp::synth::message::SynthMessage;
use auricle_dsp::{EngineConfig, SynthEngine, MAX_BLOCK_SIZE};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ratatui::DefaultTerminal;
use rtrb::RingBuffer;

use crate::ui::{self, SpectrumAnalyzer};

// Tunables
const VIS_WINDOW: usize = 1024; // Samples per scope frame (~47 FPS @ 48 kHz)
const SPECTRUM_BINS: usize = 48;
const MESSAGE_QUEUE_SIZE: usize = 64;

pub fn run(mut terminal: DefaultTerminal) -> EyreResult<()> {
    // --- Audio device ---

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let sample_rate = config.sample_rate().0 as f32;
    let device_channels = config.channels() as usize;

    // --- Engine + control queue ---

    let (msg_tx, msg_rx) = RingBuffer::<SynthMessage>::new(MESSAGE_QUEUE_SIZE);

    let engine_config = EngineConfig {
        sample_rate,
        channels: device_channels.min(2),
        ..EngineConfig::default()
    };
    let mut engine = SynthEngine::new(engine_config);
    engine.apply_patch(&auricle_dsp::patch::Patch::default());
    let scope = engine.scope();

    // --- Audio callback ---

    let stream = device
        .build_output_stream(
            &config.into(),
            {
                let mut msg_rx = msg_rx;
                let mut block =
                    DspBuffer::new(engine_config.channels, engine_config.block_size);
                move |data: &mut [f32], _| {
                    engine.drain_messages(&mut msg_rx);

                    let total_frames = data.len() / device_channels;
                    let mut written = 0;
                    while written < total_frames {
                        let frames = (total_frames - written).min(MAX_BLOCK_SIZE);
                        block.resize(engine_config.channels, frames);
                        engine.render(&mut block);

                        // Interleave the planar block into the device layout,
                        // duplicating the last rendered channel if the device
                        // has more.
                        for i in 0..frames {
                            for ch in 0..device_channels {
                                let src = ch.min(block.channels() - 1);
                                data[(written + i) * device_channels + ch] =
                                    block.channel(src)[i];
                            }
                        }
                        written += frames;
                    }
                }
            },
            move |err| eprintln!("stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;
    stream.play().wrap_err("failed to start output stream")?;

    // --- Arpeggio driver so there's sound ---

    thread::spawn({
        let mut tx = msg_tx;
        move || loop {
            for &note in &[57u8, 60, 64, 67] {
                let _ = tx.push(SynthMessage::NoteOn {
                    note,
                    velocity: 100,
                });
                thread::sleep(Duration::from_millis(400));
                let _ = tx.push(SynthMessage::NoteOff { note });
                thread::sleep(Duration::from_millis(100));
            }
        }
    });

    // --- UI loop ---

    let mut snapshot = Vec::with_capacity(VIS_WINDOW);
    let mut spectrum = SpectrumAnalyzer::new(VIS_WINDOW, sample_rate, SPECTRUM_BINS);

    loop {
        scope.snapshot_into(&mut snapshot, VIS_WINDOW);
        spectrum.update(&snapshot);

        terminal.draw(|frame| {
            ui::render(frame, &snapshot, sample_rate, spectrum.data());
        })?;

        if crossterm::event::poll(Duration::from_millis(33))? {
            if matches!(crossterm::event::read()?, crossterm::event::Event::Key(_)) {
                break;
            }
        }
    }

    Ok(())
}
