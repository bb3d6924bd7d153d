// Scripted engines: each step pops the next scripted action, so tests can
// drive any status, cursor movement and terminal transition they need.

use std::collections::VecDeque;

use streamdeflate::engine::{
    BlockState, CompressEngine, CompressStatus, DecompressEngine, DeflateState, InflateState,
    InflateStatus, ZState,
};

pub const FILL: u8 = 0xAB;

/// One scripted engine step.
#[derive(Debug, Clone, Copy)]
pub struct Action<S> {
    pub consume: usize,
    pub produce: usize,
    pub status: S,
    pub terminal: bool,
    /// Report one more byte of input left than was supplied.
    pub overreport: bool,
}

impl<S> Action<S> {
    pub fn new(consume: usize, produce: usize, status: S) -> Self {
        Action {
            consume,
            produce,
            status,
            terminal: false,
            overreport: false,
        }
    }

    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn overreport(mut self) -> Self {
        self.overreport = true;
        self
    }
}

/// What the engine saw on one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seen {
    pub in_len: usize,
    pub out_len: usize,
    pub end_of_stream: bool,
    pub workspace_len: usize,
}

#[derive(Debug, Default)]
pub struct ScriptedCompress {
    pub script: VecDeque<Action<CompressStatus>>,
    pub inits: usize,
    pub seen: Vec<Seen>,
}

impl ScriptedCompress {
    pub fn new(actions: impl IntoIterator<Item = Action<CompressStatus>>) -> Self {
        ScriptedCompress {
            script: actions.into_iter().collect(),
            ..ScriptedCompress::default()
        }
    }
}

impl CompressEngine for ScriptedCompress {
    fn init(&mut self, state: &mut DeflateState) {
        state.clear();
        self.inits += 1;
    }

    fn step(
        &mut self,
        state: &mut DeflateState,
        next_in: &[u8],
        next_out: &mut [u8],
        workspace: &mut [u8],
    ) -> CompressStatus {
        self.seen.push(Seen {
            in_len: next_in.len(),
            out_len: next_out.len(),
            end_of_stream: state.end_of_stream,
            workspace_len: workspace.len(),
        });
        let action = self
            .script
            .pop_front()
            .unwrap_or(Action::new(0, 0, CompressStatus::Ok));
        let consume = action.consume.min(next_in.len());
        let produce = action.produce.min(next_out.len());
        next_out[..produce].fill(FILL);
        state.avail_in = next_in.len() - consume + usize::from(action.overreport);
        state.avail_out = next_out.len() - produce;
        state.total_in += consume as u64;
        state.total_out += produce as u64;
        if action.terminal {
            state.state = ZState::End;
        } else if state.state == ZState::Init {
            state.state = ZState::Body;
        }
        action.status
    }
}

#[derive(Debug, Default)]
pub struct ScriptedInflate {
    pub script: VecDeque<Action<InflateStatus>>,
    pub inits: usize,
    pub seen: Vec<Seen>,
}

impl ScriptedInflate {
    pub fn new(actions: impl IntoIterator<Item = Action<InflateStatus>>) -> Self {
        ScriptedInflate {
            script: actions.into_iter().collect(),
            ..ScriptedInflate::default()
        }
    }
}

impl DecompressEngine for ScriptedInflate {
    fn init(&mut self, state: &mut InflateState) {
        state.clear();
        self.inits += 1;
    }

    fn step(
        &mut self,
        state: &mut InflateState,
        next_in: &[u8],
        next_out: &mut [u8],
    ) -> InflateStatus {
        self.seen.push(Seen {
            in_len: next_in.len(),
            out_len: next_out.len(),
            end_of_stream: false,
            workspace_len: 0,
        });
        let action = self
            .script
            .pop_front()
            .unwrap_or(Action::new(0, 0, InflateStatus::EndInput));
        let consume = action.consume.min(next_in.len());
        let produce = action.produce.min(next_out.len());
        next_out[..produce].fill(FILL);
        state.avail_in = next_in.len() - consume + usize::from(action.overreport);
        state.avail_out = next_out.len() - produce;
        state.total_out += produce as u64;
        if action.terminal {
            state.block_state = BlockState::Finish;
        } else if state.block_state == BlockState::Header {
            state.block_state = BlockState::Body;
        }
        action.status
    }
}
