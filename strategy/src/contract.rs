use tucano_model::{Execution, Signal};

/// A strategy's single operation (C6): given one execution, decide a [`Signal`]. Grounded on
/// the reference `BaseStrategy.make_decision`, which threads any state it needs through `&mut
/// self` rather than an external parameter — a strategy with no memory simply ignores it.
pub trait Strategy {
    fn on_execution(&mut self, execution: &Execution) -> Signal;
}
