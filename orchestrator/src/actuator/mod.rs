#[cfg(test)]
pub mod recording;
pub mod simulator;

use async_trait::async_trait;
use definitions::{LabwareId, Location, Mount, PipetteId, Slot, TouchTip};
use thiserror::Error;

/// Errors the hardware layer reports for commands it cannot execute.
/// The sequencer never retries: any of these aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActuatorError {
    #[error("no tip rack of kind {0:?} is known")]
    UnknownTipRack(String),
    #[error("no such labware loaded: {0:?}")]
    LabwareNotLoaded(LabwareId),
    #[error("no such pipette loaded: {0:?}")]
    PipetteNotLoaded(PipetteId),
    #[error("pipette {0:?} already has a tip attached")]
    TipAlreadyAttached(PipetteId),
    #[error("pipette {0:?} has no tip attached")]
    NoTipAttached(PipetteId),
    #[error("aspirating {requested_ul} uL onto {held_ul} uL would exceed the {capacity_ul} uL tip")]
    VolumeExceedsTip {
        requested_ul: f64,
        held_ul: f64,
        capacity_ul: f64,
    },
}

/// The command surface of the liquid-handling robot.
///
/// One implementor talks to the real hardware driver (out of scope here);
/// [`simulator::SimulatedDeck`] mimics its preconditions for dry runs, and
/// the recording actuator captures command sequences for tests. Every
/// command blocks until the hardware acknowledges it.
#[async_trait]
pub trait Actuator {
    async fn load_labware(&mut self, kind: &str, slot: Slot) -> Result<LabwareId, ActuatorError>;

    /// Loads a pipette on the given mount, drawing tips from `tip_rack`.
    async fn load_pipette(
        &mut self,
        kind: &str,
        mount: Mount,
        tip_rack: LabwareId,
    ) -> Result<PipetteId, ActuatorError>;

    async fn pick_up_tip(&mut self, pipette: PipetteId) -> Result<(), ActuatorError>;

    async fn drop_tip(&mut self, pipette: PipetteId) -> Result<(), ActuatorError>;

    async fn aspirate(
        &mut self,
        pipette: PipetteId,
        volume_ul: f64,
        location: &Location,
    ) -> Result<(), ActuatorError>;

    /// `rate` is a fraction of the pipette's default flow rate.
    async fn dispense(
        &mut self,
        pipette: PipetteId,
        volume_ul: f64,
        location: &Location,
        rate: f64,
    ) -> Result<(), ActuatorError>;

    async fn move_to(&mut self, pipette: PipetteId, location: &Location)
        -> Result<(), ActuatorError>;

    async fn touch_tip(&mut self, pipette: PipetteId, touch: TouchTip)
        -> Result<(), ActuatorError>;

    /// Settling pause between commands, in seconds.
    async fn delay(&mut self, seconds: f64) -> Result<(), ActuatorError>;
}
