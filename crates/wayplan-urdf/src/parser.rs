//! URDF XML parsing using `urdf-rs`.
//!
//! Converts `urdf_rs` types into the crate's canonical [`RobotModel`]
//! representation, discarding everything a planner does not consume.

// All conversions from urdf-rs f64 → wayplan f32 are intentional truncations.
#![allow(clippy::cast_possible_truncation)]

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::UrdfError;
use crate::types::{JointData, JointLimits, JointType, Origin, RobotModel};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a URDF file from disk into a [`RobotModel`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<RobotModel, UrdfError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| UrdfError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_string(&content)
}

/// Parse a URDF XML string into a [`RobotModel`].
pub fn parse_string(xml: &str) -> Result<RobotModel, UrdfError> {
    let robot = urdf_rs::read_from_string(xml).map_err(|e| UrdfError::Parse(e.to_string()))?;
    convert_robot(&robot)
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn convert_robot(robot: &urdf_rs::Robot) -> Result<RobotModel, UrdfError> {
    let links: Vec<String> = robot.links.iter().map(|l| l.name.clone()).collect();

    let joints: HashMap<String, JointData> = robot
        .joints
        .iter()
        .map(|j| convert_joint(j).map(|jd| (jd.name.clone(), jd)))
        .collect::<Result<_, _>>()?;

    // Root link = a link that is never a child of any joint.
    let child_links: HashSet<&str> = joints.values().map(|j| j.child.as_str()).collect();
    let root_link = links
        .iter()
        .find(|name| !child_links.contains(name.as_str()))
        .ok_or(UrdfError::NoRootLink)?
        .clone();

    Ok(RobotModel {
        name: robot.name.clone(),
        links,
        joints,
        root_link,
    })
}

fn convert_joint(joint: &urdf_rs::Joint) -> Result<JointData, UrdfError> {
    Ok(JointData {
        name: joint.name.clone(),
        joint_type: convert_joint_type(&joint.joint_type)?,
        parent: joint.parent.link.clone(),
        child: joint.child.link.clone(),
        origin: convert_pose(&joint.origin),
        axis: vec3_to_f32(&joint.axis.xyz),
        limits: convert_limits(&joint.limit),
    })
}

fn convert_joint_type(jt: &urdf_rs::JointType) -> Result<JointType, UrdfError> {
    match jt {
        urdf_rs::JointType::Revolute => Ok(JointType::Revolute),
        urdf_rs::JointType::Continuous => Ok(JointType::Continuous),
        urdf_rs::JointType::Prismatic => Ok(JointType::Prismatic),
        urdf_rs::JointType::Fixed => Ok(JointType::Fixed),
        urdf_rs::JointType::Floating => Ok(JointType::Floating),
        urdf_rs::JointType::Planar => Ok(JointType::Planar),
        urdf_rs::JointType::Spherical => Err(UrdfError::UnsupportedJointType("Spherical".into())),
    }
}

fn convert_limits(limit: &urdf_rs::JointLimit) -> JointLimits {
    // urdf-rs defaults lower/upper to 0.0 for joints without limits.
    // We map lower == upper == 0.0 as "no position limits".
    let has_limits = (limit.lower - limit.upper).abs() > f64::EPSILON;
    JointLimits {
        lower: has_limits.then(|| limit.lower as f32),
        upper: has_limits.then(|| limit.upper as f32),
    }
}

fn convert_pose(pose: &urdf_rs::Pose) -> Origin {
    Origin {
        xyz: vec3_to_f32(&pose.xyz),
        rpy: vec3_to_f32(&pose.rpy),
    }
}

fn vec3_to_f32(v: &[f64; 3]) -> [f32; 3] {
    [v[0] as f32, v[1] as f32, v[2] as f32]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        <robot name="minimal">
            <link name="base"/>
            <link name="arm"/>
            <joint name="shoulder" type="revolute">
                <parent link="base"/><child link="arm"/>
                <origin xyz="0 0 0.1" rpy="0 0 0"/>
                <axis xyz="0 1 0"/>
                <limit lower="-1.0" upper="2.0" effort="10" velocity="1"/>
            </joint>
        </robot>
    "#;

    #[test]
    fn parse_minimal_robot() {
        let model = parse_string(MINIMAL).unwrap();
        assert_eq!(model.name, "minimal");
        assert_eq!(model.links.len(), 2);
        assert_eq!(model.joints.len(), 1);
        assert_eq!(model.root_link, "base");
    }

    #[test]
    fn parse_joint_fields() {
        let model = parse_string(MINIMAL).unwrap();
        let j = model.joint("shoulder").unwrap();
        assert_eq!(j.joint_type, JointType::Revolute);
        assert_eq!(j.parent, "base");
        assert_eq!(j.child, "arm");
        assert!((j.origin.xyz[2] - 0.1).abs() < 1e-6);
        assert!((j.axis[1] - 1.0).abs() < 1e-6);
        assert_eq!(j.limits.lower, Some(-1.0));
        assert_eq!(j.limits.upper, Some(2.0));
    }

    #[test]
    fn continuous_joint_has_no_limits() {
        let xml = r#"
            <robot name="spinner">
                <link name="base"/>
                <link name="wheel"/>
                <joint name="axle" type="continuous">
                    <parent link="base"/><child link="wheel"/>
                    <axis xyz="0 0 1"/>
                </joint>
            </robot>
        "#;
        let model = parse_string(xml).unwrap();
        let j = model.joint("axle").unwrap();
        assert!(j.limits.lower.is_none());
        assert!(j.limits.upper.is_none());
    }

    #[test]
    fn parse_invalid_xml_fails() {
        assert!(matches!(
            parse_string("<robot name='x'><link"),
            Err(UrdfError::Parse(_))
        ));
    }

    #[test]
    fn parse_file_missing_path_fails() {
        assert!(matches!(
            parse_file("/nonexistent/robot.urdf"),
            Err(UrdfError::Io { .. })
        ));
    }

    #[test]
    fn dof_counts_only_actuated() {
        let xml = r#"
            <robot name="mixed">
                <link name="a"/><link name="b"/><link name="c"/>
                <joint name="j1" type="revolute">
                    <parent link="a"/><child link="b"/>
                    <limit lower="-1" upper="1" effort="1" velocity="1"/>
                </joint>
                <joint name="j2" type="fixed">
                    <parent link="b"/><child link="c"/>
                </joint>
            </robot>
        "#;
        let model = parse_string(xml).unwrap();
        assert_eq!(model.dof(), 1);
    }
}
