//! auricle - terminal oscilloscope for the synthesizer core
//!
//! Run with: cargo run
//!
//! Plays an arpeggio through the default output device and draws the
//! engine's scope buffer as a waveform and spectrum. Press any key to quit.

mod app;
mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let terminal = ratatui::init();

    let res = app::run(terminal);

    ratatui::restore();
    res
}
