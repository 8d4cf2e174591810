use serde::{Deserialize, Serialize};

use crate::LabwareId;

/// A displacement in millimeters relative to a reference point of a well.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// The point of a well or tube that a location's offset is measured from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reference {
    Top,
    Bottom,
    Center,
}

/// A physical target for a pipette tip: a well of some labware, plus a
/// millimeter offset from one of the well's reference points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub labware: LabwareId,
    /// The well address within the labware, e.g. `"B3"` on a plate or
    /// `"A1"` on a tube rack.
    pub well: String,
    pub reference: Reference,
    pub offset: Point,
}

impl Location {
    /// A location `z` millimeters above the top of the well (negative `z`
    /// goes inside).
    pub fn top(labware: LabwareId, well: impl Into<String>, z: f64) -> Location {
        Location {
            labware,
            well: well.into(),
            reference: Reference::Top,
            offset: Point { x: 0.0, y: 0.0, z },
        }
    }

    /// A location `z` millimeters above the bottom of the well.
    pub fn bottom(labware: LabwareId, well: impl Into<String>, z: f64) -> Location {
        Location {
            labware,
            well: well.into(),
            reference: Reference::Bottom,
            offset: Point { x: 0.0, y: 0.0, z },
        }
    }

    /// The center of the well.
    pub fn center(labware: LabwareId, well: impl Into<String>) -> Location {
        Location {
            labware,
            well: well.into(),
            reference: Reference::Center,
            offset: Point::default(),
        }
    }

    /// Shifts the location by the given millimeter amounts, keeping the
    /// reference point.
    pub fn offset_by(mut self, x: f64, y: f64, z: f64) -> Location {
        self.offset.x += x;
        self.offset.y += y;
        self.offset.z += z;
        self
    }
}
