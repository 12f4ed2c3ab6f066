//! URDF fixture strings shared by test suites across the workspace.

/// 2-DOF planar arm: shoulder + elbow pitch joints, fixed end-effector.
///
/// At `q = [0, 0]` the end effector sits at `z = 0.6` above the base.
pub const TWO_LINK_ARM_URDF: &str = r#"
    <robot name="two_link_arm">
        <link name="base"/>
        <link name="upper_arm"/>
        <link name="forearm"/>
        <link name="end_effector"/>
        <joint name="shoulder" type="revolute">
            <parent link="base"/><child link="upper_arm"/>
            <origin xyz="0 0 0.05" rpy="0 0 0"/>
            <axis xyz="0 1 0"/>
            <limit lower="-2.617" upper="2.617" effort="50" velocity="3"/>
        </joint>
        <joint name="elbow" type="revolute">
            <parent link="upper_arm"/><child link="forearm"/>
            <origin xyz="0 0 0.3" rpy="0 0 0"/>
            <axis xyz="0 1 0"/>
            <limit lower="-2.094" upper="2.094" effort="30" velocity="5"/>
        </joint>
        <joint name="ee_fixed" type="fixed">
            <parent link="forearm"/><child link="end_effector"/>
            <origin xyz="0 0 0.25"/>
        </joint>
    </robot>
"#;

/// 7-DOF articulated arm in the iiwa joint pattern: alternating yaw/pitch
/// axes, all revolute, fixed tool flange.
///
/// At `q = [0; 7]` the end effector sits at `z = 1.25` above the base.
pub const SEVEN_DOF_ARM_URDF: &str = r#"
    <robot name="seven_dof_arm">
        <link name="base"/>
        <link name="shoulder_link"/>
        <link name="upper_arm"/>
        <link name="elbow_link"/>
        <link name="forearm"/>
        <link name="wrist_link_1"/>
        <link name="wrist_link_2"/>
        <link name="flange"/>
        <link name="end_effector"/>
        <joint name="j1_shoulder_yaw" type="revolute">
            <parent link="base"/><child link="shoulder_link"/>
            <origin xyz="0 0 0.15"/><axis xyz="0 0 1"/>
            <limit lower="-2.967" upper="2.967" effort="176" velocity="1.71"/>
        </joint>
        <joint name="j2_shoulder_pitch" type="revolute">
            <parent link="shoulder_link"/><child link="upper_arm"/>
            <origin xyz="0 0 0.19"/><axis xyz="0 1 0"/>
            <limit lower="-2.094" upper="2.094" effort="176" velocity="1.71"/>
        </joint>
        <joint name="j3_arm_roll" type="revolute">
            <parent link="upper_arm"/><child link="elbow_link"/>
            <origin xyz="0 0 0.21"/><axis xyz="0 0 1"/>
            <limit lower="-2.967" upper="2.967" effort="110" velocity="1.74"/>
        </joint>
        <joint name="j4_elbow_pitch" type="revolute">
            <parent link="elbow_link"/><child link="forearm"/>
            <origin xyz="0 0 0.19"/><axis xyz="0 1 0"/>
            <limit lower="-2.094" upper="2.094" effort="110" velocity="2.27"/>
        </joint>
        <joint name="j5_forearm_roll" type="revolute">
            <parent link="forearm"/><child link="wrist_link_1"/>
            <origin xyz="0 0 0.21"/><axis xyz="0 0 1"/>
            <limit lower="-2.967" upper="2.967" effort="110" velocity="2.44"/>
        </joint>
        <joint name="j6_wrist_pitch" type="revolute">
            <parent link="wrist_link_1"/><child link="wrist_link_2"/>
            <origin xyz="0 0 0.19"/><axis xyz="0 1 0"/>
            <limit lower="-2.094" upper="2.094" effort="40" velocity="3.14"/>
        </joint>
        <joint name="j7_wrist_roll" type="revolute">
            <parent link="wrist_link_2"/><child link="flange"/>
            <origin xyz="0 0 0.08"/><axis xyz="0 0 1"/>
            <limit lower="-3.054" upper="3.054" effort="40" velocity="3.14"/>
        </joint>
        <joint name="tool_fixed" type="fixed">
            <parent link="flange"/><child link="end_effector"/>
            <origin xyz="0 0 0.03"/>
        </joint>
    </robot>
"#;
