use std::time::Duration;

use async_trait::async_trait;
use definitions::{LabwareId, Location, Mount, PipetteId, Reference, Slot, TouchTip};

use super::{Actuator, ActuatorError};
use crate::constants::{TIPS_10UL_KIND, TIPS_200UL_KIND};

/// Stand-in for the physical robot. It enforces the same preconditions the
/// hardware raises on (tip state, tip capacity) and logs every command, so
/// a full protocol can be rehearsed without liquid.
#[derive(Debug, Default)]
pub struct SimulatedDeck {
    labware: Vec<LoadedLabware>,
    pipettes: Vec<LoadedPipette>,
    /// Multiplier for settling delays; 0 skips the waiting entirely.
    time_scale: f64,
}

#[derive(Debug)]
struct LoadedLabware {
    kind: String,
    slot: Slot,
}

#[derive(Debug)]
struct LoadedPipette {
    kind: String,
    mount: Mount,
    /// Capacity of the tips this pipette draws, in uL.
    capacity_ul: f64,
    has_tip: bool,
    held_ul: f64,
}

impl SimulatedDeck {
    pub fn new(time_scale: f64) -> SimulatedDeck {
        SimulatedDeck {
            time_scale,
            ..SimulatedDeck::default()
        }
    }

    fn tip_capacity_ul(tip_rack_kind: &str) -> Option<f64> {
        match tip_rack_kind {
            TIPS_200UL_KIND => Some(200.0),
            TIPS_10UL_KIND => Some(10.0),
            _ => None,
        }
    }

    fn labware(&self, id: LabwareId) -> Result<&LoadedLabware, ActuatorError> {
        self.labware
            .get(id.0 as usize)
            .ok_or(ActuatorError::LabwareNotLoaded(id))
    }

    fn pipette_mut(&mut self, id: PipetteId) -> Result<&mut LoadedPipette, ActuatorError> {
        self.pipettes
            .get_mut(id.0 as usize)
            .ok_or(ActuatorError::PipetteNotLoaded(id))
    }

    fn tip_attached(&mut self, id: PipetteId) -> Result<&mut LoadedPipette, ActuatorError> {
        let pipette = self.pipette_mut(id)?;
        if !pipette.has_tip {
            return Err(ActuatorError::NoTipAttached(id));
        }
        Ok(pipette)
    }

    fn describe(&self, location: &Location) -> String {
        let well = &location.well;
        let labware = match self.labware(location.labware) {
            Ok(labware) => format!("{} (slot {})", labware.kind, labware.slot.0),
            Err(_) => "<unloaded labware>".to_string(),
        };
        let reference = match location.reference {
            Reference::Top => "top",
            Reference::Bottom => "bottom",
            Reference::Center => "center",
        };
        let o = location.offset;
        format!("{labware} {well} {reference}+({:.2}, {:.2}, {:.2})", o.x, o.y, o.z)
    }
}

#[async_trait]
impl Actuator for SimulatedDeck {
    async fn load_labware(&mut self, kind: &str, slot: Slot) -> Result<LabwareId, ActuatorError> {
        let id = LabwareId(self.labware.len() as u32);
        log::info!("load labware {kind} into slot {}", slot.0);
        self.labware.push(LoadedLabware {
            kind: kind.to_string(),
            slot,
        });
        Ok(id)
    }

    async fn load_pipette(
        &mut self,
        kind: &str,
        mount: Mount,
        tip_rack: LabwareId,
    ) -> Result<PipetteId, ActuatorError> {
        let rack_kind = self.labware(tip_rack)?.kind.clone();
        let capacity_ul = Self::tip_capacity_ul(&rack_kind)
            .ok_or(ActuatorError::UnknownTipRack(rack_kind))?;

        let id = PipetteId(self.pipettes.len() as u32);
        log::info!("load pipette {kind} on the {mount:?} mount ({capacity_ul} uL tips)");
        self.pipettes.push(LoadedPipette {
            kind: kind.to_string(),
            mount,
            capacity_ul,
            has_tip: false,
            held_ul: 0.0,
        });
        Ok(id)
    }

    async fn pick_up_tip(&mut self, pipette: PipetteId) -> Result<(), ActuatorError> {
        let p = self.pipette_mut(pipette)?;
        if p.has_tip {
            return Err(ActuatorError::TipAlreadyAttached(pipette));
        }
        p.has_tip = true;
        log::debug!("{} ({:?} mount): pick up tip", p.kind, p.mount);
        Ok(())
    }

    async fn drop_tip(&mut self, pipette: PipetteId) -> Result<(), ActuatorError> {
        let p = self.tip_attached(pipette)?;
        p.has_tip = false;
        p.held_ul = 0.0;
        log::debug!("{}: drop tip", p.kind);
        Ok(())
    }

    async fn aspirate(
        &mut self,
        pipette: PipetteId,
        volume_ul: f64,
        location: &Location,
    ) -> Result<(), ActuatorError> {
        let p = self.tip_attached(pipette)?;
        if p.held_ul + volume_ul > p.capacity_ul + 1e-6 {
            return Err(ActuatorError::VolumeExceedsTip {
                requested_ul: volume_ul,
                held_ul: p.held_ul,
                capacity_ul: p.capacity_ul,
            });
        }
        p.held_ul += volume_ul;
        let kind = p.kind.clone();
        log::debug!("{kind}: aspirate {volume_ul:.1} uL at {}", self.describe(location));
        Ok(())
    }

    async fn dispense(
        &mut self,
        pipette: PipetteId,
        volume_ul: f64,
        location: &Location,
        rate: f64,
    ) -> Result<(), ActuatorError> {
        let p = self.tip_attached(pipette)?;
        // dispensing more than the tip holds is a blow-out, not an error
        p.held_ul = (p.held_ul - volume_ul).max(0.0);
        let kind = p.kind.clone();
        log::debug!(
            "{kind}: dispense {volume_ul:.1} uL (rate {rate}) at {}",
            self.describe(location)
        );
        Ok(())
    }

    async fn move_to(
        &mut self,
        pipette: PipetteId,
        location: &Location,
    ) -> Result<(), ActuatorError> {
        let kind = self.pipette_mut(pipette)?.kind.clone();
        log::debug!("{kind}: move to {}", self.describe(location));
        Ok(())
    }

    async fn touch_tip(
        &mut self,
        pipette: PipetteId,
        touch: TouchTip,
    ) -> Result<(), ActuatorError> {
        let p = self.tip_attached(pipette)?;
        log::debug!(
            "{}: touch tip at {} mm, radius {}",
            p.kind,
            touch.v_offset,
            touch.radius
        );
        Ok(())
    }

    async fn delay(&mut self, seconds: f64) -> Result<(), ActuatorError> {
        let scaled = seconds * self.time_scale;
        if scaled > 0.0 {
            tokio::time::sleep(Duration::from_secs_f64(scaled)).await;
        }
        Ok(())
    }
}
