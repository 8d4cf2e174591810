use async_trait::async_trait;
use definitions::{LabwareId, Location, Mount, PipetteId, Slot, TouchTip};

use super::{Actuator, ActuatorError};

/// One recorded hardware command.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    LoadLabware {
        kind: String,
        slot: Slot,
    },
    LoadPipette {
        kind: String,
        mount: Mount,
        tip_rack: LabwareId,
    },
    PickUpTip(PipetteId),
    DropTip(PipetteId),
    Aspirate {
        pipette: PipetteId,
        volume_ul: f64,
        location: Location,
    },
    Dispense {
        pipette: PipetteId,
        volume_ul: f64,
        location: Location,
        rate: f64,
    },
    MoveTo {
        pipette: PipetteId,
        location: Location,
    },
    TouchTip {
        pipette: PipetteId,
        touch: TouchTip,
    },
    Delay(f64),
}

/// Test double that records every command it is given and always reports
/// success, so the sequencing logic can be asserted on without hardware.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    pub ops: Vec<Op>,
    labware_count: u32,
    pipette_count: u32,
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn load_labware(&mut self, kind: &str, slot: Slot) -> Result<LabwareId, ActuatorError> {
        let id = LabwareId(self.labware_count);
        self.labware_count += 1;
        self.ops.push(Op::LoadLabware {
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
        let id = PipetteId(self.pipette_count);
        self.pipette_count += 1;
        self.ops.push(Op::LoadPipette {
            kind: kind.to_string(),
            mount,
            tip_rack,
        });
        Ok(id)
    }

    async fn pick_up_tip(&mut self, pipette: PipetteId) -> Result<(), ActuatorError> {
        self.ops.push(Op::PickUpTip(pipette));
        Ok(())
    }

    async fn drop_tip(&mut self, pipette: PipetteId) -> Result<(), ActuatorError> {
        self.ops.push(Op::DropTip(pipette));
        Ok(())
    }

    async fn aspirate(
        &mut self,
        pipette: PipetteId,
        volume_ul: f64,
        location: &Location,
    ) -> Result<(), ActuatorError> {
        self.ops.push(Op::Aspirate {
            pipette,
            volume_ul,
            location: location.clone(),
        });
        Ok(())
    }

    async fn dispense(
        &mut self,
        pipette: PipetteId,
        volume_ul: f64,
        location: &Location,
        rate: f64,
    ) -> Result<(), ActuatorError> {
        self.ops.push(Op::Dispense {
            pipette,
            volume_ul,
            location: location.clone(),
            rate,
        });
        Ok(())
    }

    async fn move_to(
        &mut self,
        pipette: PipetteId,
        location: &Location,
    ) -> Result<(), ActuatorError> {
        self.ops.push(Op::MoveTo {
            pipette,
            location: location.clone(),
        });
        Ok(())
    }

    async fn touch_tip(
        &mut self,
        pipette: PipetteId,
        touch: TouchTip,
    ) -> Result<(), ActuatorError> {
        self.ops.push(Op::TouchTip { pipette, touch });
        Ok(())
    }

    async fn delay(&mut self, seconds: f64) -> Result<(), ActuatorError> {
        self.ops.push(Op::Delay(seconds));
        Ok(())
    }
}
