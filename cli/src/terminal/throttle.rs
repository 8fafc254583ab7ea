/// Caps how many "no response" lines a run may print.
///
/// Everything past the limit is only counted, so the summary can still report it.
#[derive(Debug, Clone)]
pub struct NoResponseThrottle {
    limit: usize,
    shown: usize,
    suppressed: usize,
}

impl NoResponseThrottle {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            shown: 0,
            suppressed: 0,
        }
    }

    /// Returns `true` if the caller may print one more line.
    pub fn admit(&mut self) -> bool {
        if self.shown < self.limit {
            self.shown += 1;
            true
        } else {
            self.suppressed += 1;
            false
        }
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
