//! 报表指标收集模块
//!
//! 各阶段通过 `metrics` facade 上报；`SessionMetrics` 在进程内聚合一次会话的渲染统计。

use std::collections::BTreeMap;

use contracts::{PipelineStage, ReportFrame};
use metrics::{counter, histogram};

/// 记录一次 sink 渲染结果
pub fn record_render(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "superstore_report_renders_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// 记录某阶段耗时
pub fn record_stage_duration(stage: PipelineStage, elapsed_ms: f64) {
    histogram!(
        "superstore_report_stage_duration_ms",
        "stage" => stage.as_str()
    )
    .record(elapsed_ms);
}

/// 会话指标聚合器
///
/// 每次渲染后调用 `update`，会话结束时输出摘要。
#[derive(Debug, Clone, Default)]
pub struct SessionMetrics {
    /// 渲染次数
    pub renders: u64,

    /// 结果为空的渲染次数
    pub empty_renders: u64,

    /// 被拒绝的选择变更
    pub rejected_selections: u64,

    /// 渲染耗时 (毫秒)
    pub latency_stats: RunningStats,

    /// 过滤后行数
    pub row_stats: RunningStats,

    /// 各 sink 失败次数
    pub sink_failures: BTreeMap<String, u64>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, frame: &ReportFrame, elapsed_ms: f64) {
        self.renders += 1;
        if frame.results.is_empty() {
            self.empty_renders += 1;
        }
        self.latency_stats.push(elapsed_ms);
        self.row_stats.push(frame.results.record_count as f64);
    }

    pub fn record_rejected(&mut self) {
        self.rejected_selections += 1;
    }

    pub fn record_sink_failure(&mut self, sink_name: &str) {
        *self.sink_failures.entry(sink_name.to_string()).or_insert(0) += 1;
    }

    /// 生成摘要报告
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            renders: self.renders,
            empty_renders: self.empty_renders,
            rejected_selections: self.rejected_selections,
            latency_ms: StatsSummary::from(&self.latency_stats),
            filtered_rows: StatsSummary::from(&self.row_stats),
            sink_failures: self.sink_failures.clone(),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 会话摘要
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub renders: u64,
    pub empty_renders: u64,
    pub rejected_selections: u64,
    pub latency_ms: StatsSummary,
    pub filtered_rows: StatsSummary,
    pub sink_failures: BTreeMap<String, u64>,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Session Summary ===")?;
        writeln!(f, "Renders: {}", self.renders)?;
        writeln!(f, "Empty selections: {}", self.empty_renders)?;
        writeln!(f, "Rejected selections: {}", self.rejected_selections)?;
        writeln!(f, "Render latency (ms): {}", self.latency_ms)?;
        writeln!(f, "Filtered rows: {}", self.filtered_rows)?;

        if !self.sink_failures.is_empty() {
            writeln!(f, "Sink failures:")?;
            for (sink, count) in &self.sink_failures {
                writeln!(f, "  {}: {}", sink, count)?;
            }
        }

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 样本方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AggregateResults, FilterSelection};

    fn frame(rows: usize) -> ReportFrame {
        let results = AggregateResults {
            record_count: rows,
            ..Default::default()
        };
        ReportFrame::new(1, "t", FilterSelection::default(), results)
    }

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();
        for v in [2.0, 4.0, 6.0] {
            stats.push(v);
        }

        assert_eq!(stats.count(), 3);
        assert!((stats.mean() - 4.0).abs() < 1e-10);
        assert!((stats.min() - 2.0).abs() < 1e-10);
        assert!((stats.max() - 6.0).abs() < 1e-10);
        assert!((stats.variance() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_session_metrics_update() {
        let mut metrics = SessionMetrics::new();
        metrics.update(&frame(120), 1.5);
        metrics.update(&frame(0), 0.5);
        metrics.record_rejected();
        metrics.record_sink_failure("json");

        assert_eq!(metrics.renders, 2);
        assert_eq!(metrics.empty_renders, 1);
        assert_eq!(metrics.rejected_selections, 1);
        assert_eq!(metrics.sink_failures.get("json"), Some(&1));
        assert!((metrics.row_stats.mean() - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_display() {
        let mut metrics = SessionMetrics::new();
        metrics.update(&frame(10), 2.0);

        let output = metrics.summary().to_string();
        assert!(output.contains("Renders: 1"));
        assert!(output.contains("n=1"));
        assert!(!output.contains("Sink failures"));

        metrics.reset();
        assert!(metrics.summary().to_string().contains("N/A"));
    }
}
