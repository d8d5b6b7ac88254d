//! 冲突检测指标收集模块
//!
//! 基于每次成对检测的结果收集和统计检测器的运行指标。

use std::collections::HashMap;

use contracts::{ConflictResult, SurfaceId};
use metrics::{counter, gauge, histogram};

/// 一次成对检测的记录
#[derive(Debug, Clone, Copy)]
pub struct DetectionRecord<'a> {
    /// 轨迹 A 所在地图
    pub map: &'a SurfaceId,
    /// 是否通过 broad phase
    pub passed_broad_phase: bool,
    /// 检测结果
    pub result: &'a ConflictResult,
    /// 检测耗时 (毫秒)
    pub elapsed_ms: f64,
}

/// 从检测记录写入指标
///
/// 每完成一对轨迹的检测时调用此函数。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::{record_detection, DetectionRecord};
///
/// let result = detector.between(&a, &b);
/// record_detection(&DetectionRecord {
///     map: a.map(),
///     passed_broad_phase: DetectConflict::broad_phase(&a, &b),
///     result: &result,
///     elapsed_ms,
/// });
/// ```
pub fn record_detection(record: &DetectionRecord<'_>) {
    // 检测计数器
    counter!("fleet_conflict_pairs_checked_total").increment(1);

    if !record.passed_broad_phase {
        counter!("fleet_conflict_pairs_rejected_total").increment(1);
    }

    // 检测耗时
    histogram!("fleet_conflict_pair_check_ms").record(record.elapsed_ms);

    // 冲突
    if let Ok(conflict) = record.result.data() {
        counter!(
            "fleet_conflict_conflicts_total",
            "map" => record.map.to_string()
        )
        .increment(1);
        gauge!("fleet_conflict_last_conflict_time").set(conflict.time());
    }
}

/// 记录场景规模
pub fn record_scenario_size(trajectories: usize, pairs: usize) {
    gauge!("fleet_conflict_scenario_trajectories").set(trajectories as f64);
    gauge!("fleet_conflict_scenario_pairs").set(pairs as f64);
}

/// 检测指标聚合器
///
/// 在内存中聚合指标，便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct DetectionMetricsAggregator {
    /// 已检测的轨迹对数
    pub total_pairs: u64,

    /// 被 broad phase 拒绝的对数
    pub broad_phase_rejected: u64,

    /// 冲突对数
    pub total_conflicts: u64,

    /// 单对检测耗时统计 (毫秒)
    pub check_time_stats: RunningStats,

    /// 冲突时刻统计 (秒)
    pub conflict_time_stats: RunningStats,

    /// 各地图冲突次数
    pub conflicts_per_map: HashMap<String, u64>,
}

impl DetectionMetricsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, record: &DetectionRecord<'_>) {
        self.total_pairs += 1;
        if !record.passed_broad_phase {
            self.broad_phase_rejected += 1;
        }

        self.check_time_stats.push(record.elapsed_ms);

        if let Ok(conflict) = record.result.data() {
            self.total_conflicts += 1;
            self.conflict_time_stats.push(conflict.time());
            *self
                .conflicts_per_map
                .entry(record.map.to_string())
                .or_insert(0) += 1;
        }
    }

    /// 生成摘要报告
    pub fn summary(&self) -> DetectionSummary {
        let rate = |count: u64| {
            if self.total_pairs > 0 {
                count as f64 / self.total_pairs as f64 * 100.0
            } else {
                0.0
            }
        };

        DetectionSummary {
            total_pairs: self.total_pairs,
            broad_phase_rejected: self.broad_phase_rejected,
            total_conflicts: self.total_conflicts,
            rejection_rate: rate(self.broad_phase_rejected),
            conflict_rate: rate(self.total_conflicts),
            check_time_ms: StatsSummary::from(&self.check_time_stats),
            conflict_time: StatsSummary::from(&self.conflict_time_stats),
            conflicts_per_map: self.conflicts_per_map.clone(),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 指标摘要
#[derive(Debug, Clone, Default)]
pub struct DetectionSummary {
    pub total_pairs: u64,
    pub broad_phase_rejected: u64,
    pub total_conflicts: u64,
    pub rejection_rate: f64,
    pub conflict_rate: f64,
    pub check_time_ms: StatsSummary,
    pub conflict_time: StatsSummary,
    pub conflicts_per_map: HashMap<String, u64>,
}

impl std::fmt::Display for DetectionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Conflict Detection Summary ===")?;
        writeln!(f, "Pairs checked: {}", self.total_pairs)?;
        writeln!(
            f,
            "Rejected by broad phase: {} ({:.2}%)",
            self.broad_phase_rejected, self.rejection_rate
        )?;
        writeln!(
            f,
            "Conflicts: {} ({:.2}%)",
            self.total_conflicts, self.conflict_rate
        )?;
        writeln!(f, "Check time (ms): {}", self.check_time_ms)?;
        writeln!(f, "Conflict time (s): {}", self.conflict_time)?;

        if !self.conflicts_per_map.is_empty() {
            writeln!(f, "Conflicts per map:")?;
            let mut maps: Vec<_> = self.conflicts_per_map.iter().collect();
            maps.sort();
            for (map, count) in maps {
                writeln!(f, "  {}: {}", map, count)?;
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

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
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

    /// 标准差
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
