use crate::dsp::buffer::DspBuffer;
use crate::graph::node::{DspNode, NoteEvent, ParamChange};

/// An ordered, owned sequence of processing nodes sharing one buffer.
///
/// `process` runs every node in insertion order against the same buffer, so
/// each node's output is the next node's input. The graph is itself a
/// [`DspNode`], which lets sub-chains nest without special casing.
#[derive(Default)]
pub struct DspGraph {
    nodes: Vec<Box<dyn DspNode>>,
}

impl DspGraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: impl DspNode + 'static) {
        self.nodes.push(Box::new(node));
    }

    /// Builder-style variant of [`push`](Self::push) for chain construction.
    pub fn with_node(mut self, node: impl DspNode + 'static) -> Self {
        self.push(node);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl DspNode for DspGraph {
    fn prepare(&mut self, sample_rate: f32, block_size: usize) {
        for node in &mut self.nodes {
            node.prepare(sample_rate, block_size);
        }
    }

    fn process(&mut self, buffer: &mut DspBuffer) {
        for node in &mut self.nodes {
            node.process(buffer);
        }
    }

    fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    fn note_on(&mut self, event: &NoteEvent) {
        for node in &mut self.nodes {
            node.note_on(event);
        }
    }

    fn note_off(&mut self) {
        for node in &mut self.nodes {
            node.note_off();
        }
    }

    fn is_active(&self) -> bool {
        self.nodes.iter().any(|node| node.is_active())
    }

    fn apply(&mut self, change: ParamChange) {
        for node in &mut self.nodes {
            node.apply(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records processing order and writes a marker into the buffer.
    struct TagNode {
        tag: f32,
    }

    impl DspNode for TagNode {
        fn prepare(&mut self, _sample_rate: f32, _block_size: usize) {}

        fn process(&mut self, buffer: &mut DspBuffer) {
            for channel in buffer.channels_mut() {
                for sample in channel {
                    *sample = *sample * 10.0 + self.tag;
                }
            }
        }
    }

    struct GateNode {
        open: bool,
    }

    impl DspNode for GateNode {
        fn prepare(&mut self, _sample_rate: f32, _block_size: usize) {}

        fn process(&mut self, _buffer: &mut DspBuffer) {}

        fn note_on(&mut self, _event: &NoteEvent) {
            self.open = true;
        }

        fn note_off(&mut self) {
            self.open = false;
        }

        fn is_active(&self) -> bool {
            self.open
        }
    }

    #[test]
    fn processes_in_insertion_order() {
        let mut graph = DspGraph::new()
            .with_node(TagNode { tag: 1.0 })
            .with_node(TagNode { tag: 2.0 });

        let mut buffer = DspBuffer::new(1, 4);
        graph.process(&mut buffer);

        // First node writes 1, second sees it and produces 1*10 + 2.
        assert!(buffer.channel(0).iter().all(|&s| s == 12.0));
    }

    #[test]
    fn activity_is_any_node_active() {
        let mut graph = DspGraph::new()
            .with_node(TagNode { tag: 0.0 })
            .with_node(GateNode { open: false });
        assert!(!graph.is_active());

        graph.note_on(&NoteEvent::from_freq(440.0, 1.0));
        assert!(graph.is_active());

        graph.note_off();
        assert!(!graph.is_active());
    }

    #[test]
    fn empty_graph_leaves_buffer_untouched() {
        let mut graph = DspGraph::new();
        let mut buffer = DspBuffer::new(2, 8);
        buffer.channel_mut(0).fill(0.5);

        graph.process(&mut buffer);
        assert!(buffer.channel(0).iter().all(|&s| s == 0.5));
        assert!(graph.is_empty());
    }

    #[test]
    fn graphs_nest_as_nodes() {
        let inner = DspGraph::new().with_node(TagNode { tag: 3.0 });
        let mut outer = DspGraph::new().with_node(inner);

        let mut buffer = DspBuffer::new(1, 2);
        outer.process(&mut buffer);
        assert!(buffer.channel(0).iter().all(|&s| s == 3.0));
        assert_eq!(outer.len(), 1);
    }
}
