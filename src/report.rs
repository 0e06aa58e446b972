/// Gate for the classification sink: open at most once per interval.
pub struct Reporter {
    interval_ms: u32,
    last_emit_ms: u32,
}

impl Reporter {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_emit_ms: 0,
        }
    }

    /// Whether an emission is due at `now_ms`; arms the next interval when it
    /// is. Wrapping arithmetic keeps the gate sound across counter roll-over.
    pub fn should_emit(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_emit_ms) >= self.interval_ms {
            self.last_emit_ms = now_ms;
            return true;
        }
        false
    }
}
