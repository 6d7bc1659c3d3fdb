//! End-of-run bookkeeping

use super::Interpreter;

impl<I, O> Interpreter<I, O> {
    /// Release every registered heap object.
    ///
    /// Runs on `HLT`, after [`run`](Self::run) and on the crash path.
    pub(crate) fn sweep(&mut self) {
        let released = self.arena.sweep();
        tracing::debug!(released, "swept object arena");
    }
}
