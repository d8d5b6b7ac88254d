//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 场景文件 -> 轨迹 -> 冲突检测 的端到端测试
//! - 检测器性质的随机回归

#[cfg(test)]
mod contract_tests {
    use contracts::{BadConflictAccess, ConflictError, ConflictResult};

    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_bad_access_converts_into_conflict_error() {
        let result = ConflictResult::none();
        let err: ConflictError = result.data().map(|_| ()).unwrap_err().into();
        assert!(matches!(err, ConflictError::BadAccess(BadConflictAccess)));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ConfigLoader};
    use conflict_engine::{DetectConflict, MotionPath};
    use contracts::{ConflictError, ScenarioBlueprint};
    use observability::{DetectionMetricsAggregator, DetectionRecord};
    use trajectory::Trajectory;

    /// Crossing at an intersection, a late robot, and a robot on another floor.
    const WAREHOUSE: &str = r#"
[detector]
time_tolerance = 0.0001

# Eastbound along y = 0
[[trajectories]]
id = "tug_1"
map = "L1"
[[trajectories.waypoints]]
t = 0.0
x = 0.0
y = 0.0
vx = 1.0
radius = 0.5
[[trajectories.waypoints]]
t = 10.0
x = 10.0
y = 0.0
vx = 1.0
radius = 0.5

# Northbound along x = 5, reaches the crossing at t = 5
[[trajectories]]
id = "tug_2"
map = "L1"
[[trajectories.waypoints]]
t = 0.0
x = 5.0
y = -5.0
vy = 1.0
radius = 0.5
[[trajectories.waypoints]]
t = 10.0
x = 5.0
y = 5.0
vy = 1.0
radius = 0.5

# Same lane as tug_1, but only after it has left
[[trajectories]]
id = "cleaner"
map = "L1"
[[trajectories.waypoints]]
t = 20.0
x = 0.0
y = 0.0
radius = 0.5
[[trajectories.waypoints]]
t = 30.0
x = 0.0
y = 0.0
radius = 0.5

# Same footprint as tug_1, different floor
[[trajectories]]
id = "lift_bot"
map = "L2"
[[trajectories.waypoints]]
t = 0.0
x = 0.0
y = 0.0
vx = 1.0
radius = 0.5
[[trajectories.waypoints]]
t = 10.0
x = 10.0
y = 0.0
vx = 1.0
radius = 0.5
"#;

    fn load() -> (ScenarioBlueprint, Vec<Trajectory>) {
        let blueprint = ConfigLoader::load_from_str(WAREHOUSE, ConfigFormat::Toml).unwrap();
        let trajectories = blueprint
            .trajectories
            .iter()
            .map(|config| Trajectory::from_config(config).unwrap())
            .collect();
        (blueprint, trajectories)
    }

    fn conflicting_pairs(
        detector: &DetectConflict,
        trajectories: &[Trajectory],
    ) -> Vec<(usize, usize, f64)> {
        let mut found = Vec::new();
        for i in 0..trajectories.len() {
            for j in i + 1..trajectories.len() {
                if let Ok(data) = detector.between(&trajectories[i], &trajectories[j]).data() {
                    found.push((i, j, data.time()));
                }
            }
        }
        found
    }

    /// End-to-end test: scenario TOML -> Trajectory -> DetectConflict
    #[test]
    fn test_e2e_scenario_sweep() {
        let (blueprint, trajectories) = load();
        let detector = DetectConflict::new(blueprint.detector).unwrap();

        let found = conflicting_pairs(&detector, &trajectories);
        assert_eq!(found.len(), 1, "unexpected conflicts: {found:?}");

        // Centres 1.0 apart when |5 - t| * sqrt(2) = 1.0
        let (a, b, time) = found[0];
        assert_eq!((a, b), (0, 1));
        let expected = 5.0 - 1.0 / 2f64.sqrt();
        assert!((time - expected).abs() <= 1e-3, "got {time}, expected {expected}");

        assert!(!DetectConflict::broad_phase(&trajectories[0], &trajectories[2]));
        assert!(!DetectConflict::broad_phase(&trajectories[0], &trajectories[3]));
    }

    #[test]
    fn test_e2e_narrow_phase_errors_on_gated_pairs() {
        let (_, trajectories) = load();
        let detector = DetectConflict::default();

        let err = detector
            .narrow_phase(&trajectories[0], &trajectories[3])
            .unwrap_err();
        assert!(err.is_precondition_violation());

        let err = detector
            .narrow_phase(&trajectories[0], &trajectories[2])
            .unwrap_err();
        assert!(matches!(err, ConflictError::DisjointTimeSpans { .. }));
    }

    #[test]
    fn test_e2e_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(WAREHOUSE.as_bytes()).unwrap();

        let blueprint = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(blueprint.trajectories.len(), 4);

        // Round-trip through JSON and check the same pairs conflict.
        let json = ConfigLoader::to_json(&blueprint).unwrap();
        let reloaded = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        let trajectories: Vec<_> = reloaded
            .trajectories
            .iter()
            .map(|config| Trajectory::from_config(config).unwrap())
            .collect();
        let detector = DetectConflict::new(reloaded.detector).unwrap();
        assert_eq!(conflicting_pairs(&detector, &trajectories).len(), 1);
    }

    /// 并发检测：每对轨迹在 blocking 线程池上执行
    #[tokio::test]
    async fn test_e2e_concurrent_sweep_matches_sequential() {
        let (blueprint, trajectories) = load();
        let detector = DetectConflict::new(blueprint.detector).unwrap();
        let sequential = conflicting_pairs(&detector, &trajectories);

        let trajectories = Arc::new(trajectories);
        let mut handles = Vec::new();
        for i in 0..trajectories.len() {
            for j in i + 1..trajectories.len() {
                let trajectories = Arc::clone(&trajectories);
                let detector = detector.clone();
                handles.push(tokio::task::spawn_blocking(move || {
                    let result = detector.between(&trajectories[i], &trajectories[j]);
                    (i, j, result)
                }));
            }
        }

        let mut aggregator = DetectionMetricsAggregator::new();
        let mut concurrent = Vec::new();
        for handle in handles {
            let (i, j, result) = handle.await.unwrap();
            aggregator.update(&DetectionRecord {
                map: trajectories[i].surface_id(),
                passed_broad_phase: DetectConflict::broad_phase(
                    &trajectories[i],
                    &trajectories[j],
                ),
                result: &result,
                elapsed_ms: 0.0,
            });
            if let Ok(data) = result.data() {
                concurrent.push((i, j, data.time()));
            }
        }

        assert_eq!(concurrent, sequential);
        let summary = aggregator.summary();
        assert_eq!(summary.total_pairs, 6);
        assert_eq!(summary.total_conflicts, 1);
        // Both tugs against cleaner, plus every pair with lift_bot
        assert_eq!(summary.broad_phase_rejected, 5);
    }
}

#[cfg(test)]
mod property_tests {
    use conflict_engine::DetectConflict;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use trajectory::{Trajectory, Waypoint};

    fn random_trajectory(rng: &mut impl Rng, map: &str) -> Trajectory {
        let mut t = rng.random_range(0.0..5.0);
        let mut waypoints = Vec::new();
        for _ in 0..rng.random_range(2..5) {
            waypoints.push(Waypoint::new(
                t,
                [rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0)],
                [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)],
                rng.random_range(0.2..0.6),
            ));
            t += rng.random_range(1.0..3.0);
        }
        Trajectory::from_waypoints(map, waypoints).unwrap()
    }

    #[test]
    fn test_between_is_symmetric_and_deterministic() {
        let detector = DetectConflict::default();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let a = random_trajectory(&mut rng, "L1");
            let b = random_trajectory(&mut rng, "L1");

            let ab = detector.between(&a, &b);
            let ba = detector.between(&b, &a);
            assert_eq!(ab, detector.between(&a, &b), "seed {seed}");
            assert_eq!(ab.has_conflict(), ba.has_conflict(), "seed {seed}");
            if let (Ok(x), Ok(y)) = (ab.data(), ba.data()) {
                assert_eq!(*x, y.swapped(), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_self_conflict_at_shared_start() {
        let detector = DetectConflict::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let a = random_trajectory(&mut rng, "L1");
            let data = detector.between(&a, &a).into_data().unwrap();
            assert_eq!(Some(data.time()), a.start_time(), "seed {seed}");
        }
    }
}
