//! Pipeline statistics.

use std::time::Duration;

use observability::SessionMetrics;

/// Statistics from one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Records loaded from the data source
    pub records_loaded: usize,

    /// Time spent loading and parsing
    pub load_duration: Duration,

    /// Session commands processed
    pub commands: u64,

    /// Total session duration
    pub duration: Duration,

    /// Number of sinks that received frames
    pub active_sinks: usize,

    /// Render statistics
    pub session_metrics: SessionMetrics,
}

impl PipelineStats {
    /// Write the end-of-session summary
    pub fn write_summary<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "Records loaded: {} ({:.1} ms)",
            self.records_loaded,
            self.load_duration.as_secs_f64() * 1000.0
        )?;
        writeln!(out, "Session duration: {:.2}s", self.duration.as_secs_f64())?;
        writeln!(out, "Commands: {}", self.commands)?;
        writeln!(out, "Active sinks: {}", self.active_sinks)?;
        write!(out, "{}", self.session_metrics.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines() {
        let stats = PipelineStats {
            records_loaded: 9994,
            commands: 3,
            active_sinks: 1,
            ..Default::default()
        };
        let mut out = Vec::new();
        stats.write_summary(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Records loaded: 9994"));
        assert!(text.contains("Commands: 3"));
        assert!(text.contains("=== Session Summary ==="));
    }
}
