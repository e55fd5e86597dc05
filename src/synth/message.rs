#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Control-plane messages for driving the engine from another thread.
///
/// The render path itself takes no locks; a queue of these messages is the
/// sanctioned handoff for note events and parameter changes. Waveform
/// selection travels as a plain index because external decoders (MIDI, OSC,
/// preset text) speak indices; out-of-range values are dropped on apply.
#[derive(Debug, Copy, Clone)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    AllNotesOff,
    SetWaveform { index: usize },
    SetFilterCutoff { hz: f32 },
    SetFilterResonance { amount: f32 },
    SetEnvelope { attack: f32, decay: f32, sustain: f32, release: f32 },
    SetMasterVolume { gain: f32 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// In-memory receiver for tests and single-threaded tools.
impl MessageReceiver for std::collections::VecDeque<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        self.pop_front()
    }
}
