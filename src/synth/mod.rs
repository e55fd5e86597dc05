// Voice management and polyphony above the graph layer.

pub mod engine;
pub mod message;
pub mod voice;
