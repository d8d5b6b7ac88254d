//! 配置校验模块
//!
//! 校验规则：
//! - detector 配置合法 (time_tolerance > 0 且有限)
//! - trajectory id 唯一且非空
//! - 每条轨迹至少 2 个路点
//! - 路点时间有限且严格递增
//! - 坐标与速度有限
//! - radius >= 0

use std::collections::HashSet;

use contracts::{ConflictError, ScenarioBlueprint, TrajectoryConfig};

/// 校验 ScenarioBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &ScenarioBlueprint) -> Result<(), ConflictError> {
    blueprint.detector.check()?;
    validate_trajectory_ids(blueprint)?;
    for trajectory in &blueprint.trajectories {
        validate_waypoint_count(trajectory)?;
        validate_waypoint_times(trajectory)?;
        validate_waypoint_values(trajectory)?;
    }
    Ok(())
}

/// 校验 trajectory id 唯一性
fn validate_trajectory_ids(blueprint: &ScenarioBlueprint) -> Result<(), ConflictError> {
    let mut seen = HashSet::new();
    for (idx, trajectory) in blueprint.trajectories.iter().enumerate() {
        if trajectory.id.is_empty() {
            return Err(ConflictError::config_validation(
                format!("trajectories[{idx}].id"),
                "trajectory id cannot be empty",
            ));
        }
        if !seen.insert(trajectory.id.as_str()) {
            return Err(ConflictError::config_validation(
                format!("trajectories[id={}]", trajectory.id),
                "duplicate trajectory id",
            ));
        }
    }
    Ok(())
}

/// 校验路点数量 (少于 2 个路点无法形成轨迹段)
fn validate_waypoint_count(trajectory: &TrajectoryConfig) -> Result<(), ConflictError> {
    if trajectory.waypoints.len() < 2 {
        return Err(ConflictError::config_validation(
            format!("trajectories[{}].waypoints", trajectory.id),
            format!(
                "at least 2 waypoints required, got {}",
                trajectory.waypoints.len()
            ),
        ));
    }
    Ok(())
}

/// 校验路点时间
fn validate_waypoint_times(trajectory: &TrajectoryConfig) -> Result<(), ConflictError> {
    for (idx, waypoint) in trajectory.waypoints.iter().enumerate() {
        if !waypoint.t.is_finite() {
            return Err(ConflictError::config_validation(
                format!("trajectories[{}].waypoints[{idx}].t", trajectory.id),
                format!("time must be finite, got {}", waypoint.t),
            ));
        }
    }

    for (idx, pair) in trajectory.waypoints.windows(2).enumerate() {
        if pair[1].t <= pair[0].t {
            return Err(ConflictError::config_validation(
                format!("trajectories[{}].waypoints[{}].t", trajectory.id, idx + 1),
                format!(
                    "times must be strictly increasing, got {} after {}",
                    pair[1].t, pair[0].t
                ),
            ));
        }
    }
    Ok(())
}

/// 校验坐标、速度与半径
fn validate_waypoint_values(trajectory: &TrajectoryConfig) -> Result<(), ConflictError> {
    for (idx, waypoint) in trajectory.waypoints.iter().enumerate() {
        let field = |name: &str| format!("trajectories[{}].waypoints[{idx}].{name}", trajectory.id);

        for (name, value) in [
            ("x", waypoint.x),
            ("y", waypoint.y),
            ("vx", waypoint.vx),
            ("vy", waypoint.vy),
        ] {
            if !value.is_finite() {
                return Err(ConflictError::config_validation(
                    field(name),
                    format!("{name} must be finite, got {value}"),
                ));
            }
        }

        // NaN 也在此处拒绝
        if !(waypoint.radius >= 0.0) || !waypoint.radius.is_finite() {
            return Err(ConflictError::config_validation(
                field("radius"),
                format!("radius must be finite and >= 0, got {}", waypoint.radius),
            ));
        }
    }
    Ok(())
}
