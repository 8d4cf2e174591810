use serde::{Deserialize, Serialize};

/// A numbered position on the robot deck where a piece of labware sits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot(pub u8);

/// Which of the two arms a pipette is mounted on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mount {
    Left,
    Right,
}

/// Opaque handle to a loaded piece of labware, assigned by the hardware
/// layer. The protocol only ever uses it as a coordinate lookup key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabwareId(pub u32);

/// Opaque handle to a loaded pipette.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipetteId(pub u32);

/// Parameters for a touch-tip move against a well wall, used to shed the
/// droplet hanging from the tip after a dispense.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchTip {
    /// Vertical offset from the well top at which to touch, in millimeters.
    pub v_offset: f64,
    /// Fraction of the well radius at which the tip touches the wall.
    pub radius: f64,
}
