use crate::protocol::ProtocolError;

/// Fraction of the tube capacity subtracted from the remaining volume
/// before estimating the surface, so the tip always ends up under it.
const SUBMERSION_MARGIN: f64 = 0.03;

/// Calibration constants of a conical reservoir tube: two (volume, height)
/// points the liquid level is linearly interpolated between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicalCalibration {
    /// Volume below which interpolation gives way to a fixed bottom offset, in mL.
    pub volume_offset_ml: f64,
    /// Volume at the upper calibration point, in mL.
    pub volume_step_ml: f64,
    /// Height of the liquid top relative to the tube top at the lower
    /// calibration point, in mm.
    pub top_offset_mm: f64,
    /// Vertical distance the surface travels between the two calibration
    /// points, in mm.
    pub depth_range_mm: f64,
    /// Capacity of the tube, in mL.
    pub max_volume_ml: f64,
}

/// Geometry of a reservoir container, deciding how aspiration depth is picked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TubeGeometry {
    /// Conical tube with a calibrated level interpolation.
    Conical(ConicalCalibration),
    /// Small single-sample vial; level tracking is pointless there, just
    /// aspirate near the bottom.
    SampleVial,
}

impl TubeGeometry {
    /// Greiner 50 mL conical tube.
    pub const GREINER_50ML: TubeGeometry = TubeGeometry::Conical(ConicalCalibration {
        volume_offset_ml: 5.0,
        volume_step_ml: 50.0,
        top_offset_mm: -93.25,
        depth_range_mm: 81.1,
        max_volume_ml: 50.0,
    });

    /// Where to aim the tip for a withdrawal that leaves `remaining_ul` in
    /// the container. Near-empty tubes get a fixed shallow offset from the
    /// bottom so the tip never aspirates dry; otherwise the target hangs
    /// off the estimated liquid surface, measured from the tube top.
    pub fn immersion_target(&self, remaining_ul: f64) -> VerticalTarget {
        let cal = match self {
            TubeGeometry::SampleVial => return VerticalTarget::FromBottom(5.0),
            TubeGeometry::Conical(cal) => cal,
        };

        let volume_ml = (remaining_ul - SUBMERSION_MARGIN * cal.max_volume_ml * 1000.0) / 1000.0;
        if volume_ml < cal.volume_offset_ml {
            return VerticalTarget::FromBottom(2.0);
        }

        let slope = -cal.depth_range_mm / (cal.volume_step_ml - cal.volume_offset_ml);
        let intercept = cal.top_offset_mm + cal.depth_range_mm;
        // treat an over-full tube as full
        let volume_ml = volume_ml.min(cal.max_volume_ml);
        let height_mm = intercept + (cal.max_volume_ml - volume_ml) * slope;
        VerticalTarget::FromTop(round_to(height_mm, 2))
    }
}

/// A vertical coordinate for the pipette tip inside a container, in mm.
/// Negative from-top values go below the rim. The hardware driver expects
/// heights rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalTarget {
    FromBottom(f64),
    FromTop(f64),
}

/// Tracks how much liquid is left in one dye tube. Each protocol phase
/// owns the reservoirs it drinks from and passes them along explicitly;
/// there is no shared counter anywhere.
#[derive(Debug, Clone)]
pub struct Reservoir {
    /// Dye name, for logs and errors.
    pub name: &'static str,
    /// Position of the tube in the rack, e.g. "A1".
    pub tube: &'static str,
    pub geometry: TubeGeometry,
    pub remaining_ul: f64,
}

impl Reservoir {
    pub fn new(
        name: &'static str,
        tube: &'static str,
        geometry: TubeGeometry,
        starting_ml: f64,
    ) -> Reservoir {
        Reservoir {
            name,
            tube,
            geometry,
            remaining_ul: starting_ml * 1000.0,
        }
    }

    /// Debits `volume_ul` and returns where to aspirate from. The target is
    /// computed from the level that will remain once the withdrawal has
    /// happened, so the tip follows the surface down. Overdrawing the tube
    /// is an error, not a negative counter.
    pub fn withdraw(&mut self, volume_ul: f64) -> Result<VerticalTarget, ProtocolError> {
        if volume_ul > self.remaining_ul {
            return Err(ProtocolError::ReservoirOverdraw {
                name: self.name,
                tube: self.tube,
                requested_ul: volume_ul,
                remaining_ul: self.remaining_ul,
            });
        }
        self.remaining_ul -= volume_ul;
        Ok(self.geometry.immersion_target(self.remaining_ul))
    }
}

pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
