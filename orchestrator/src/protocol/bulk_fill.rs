use definitions::Location;

use super::{Deck, Protocol, ProtocolError};
use crate::actuator::Actuator;
use crate::constants::{
    DISPENSE_DEPTH_MM, DISPENSE_RATE, P300_PARK_UL, P300_TIP_UL, RADIAL_OFFSET_MM,
};
use crate::recipe::Component;
use crate::reservoir::Reservoir;

/// Splits `volume_ul` into the fewest equal parts that each fit within a
/// single withdrawal of at most `limit_ul`. The parts sum back to the
/// original volume; nothing is lost to a remainder.
pub(crate) fn split_volume(volume_ul: f64, limit_ul: f64) -> (u32, f64) {
    let runs = (volume_ul / limit_ul).ceil() as u32;
    (runs, volume_ul / f64::from(runs))
}

impl Protocol {
    /// Phase 1: pour each dye component into every well, one component per
    /// tip pass, in recipe order red, blue, clear. Returns the three dye
    /// reservoirs with their counters drawn down.
    pub(super) async fn bulk_fill(
        &self,
        bot: &mut impl Actuator,
        deck: &Deck,
        reservoirs: [Reservoir; 3],
    ) -> Result<[Reservoir; 3], ProtocolError> {
        let [magenta, teal, water] = reservoirs;
        let magenta = self.fill_component(bot, deck, Component::Red, magenta).await?;
        let teal = self.fill_component(bot, deck, Component::Blue, teal).await?;
        let water = self.fill_component(bot, deck, Component::Clear, water).await?;
        Ok([magenta, teal, water])
    }

    async fn fill_component(
        &self,
        bot: &mut impl Actuator,
        deck: &Deck,
        component: Component,
        mut reservoir: Reservoir,
    ) -> Result<Reservoir, ProtocolError> {
        log::info!(
            "pouring {component} from the {} tube at {}",
            reservoir.name,
            reservoir.tube
        );

        bot.pick_up_tip(deck.p300).await?;
        self.settle(bot).await?;

        // reverse pipetting: park a constant volume in the tip for the
        // whole pass, it leaves with the tip
        let target = reservoir.withdraw(P300_PARK_UL)?;
        let location = self.tube_location(deck, &reservoir, target);
        bot.aspirate(deck.p300, P300_PARK_UL, &location).await?;
        self.settle(bot).await?;

        // pour from the 12 o'clock position of the reservoir ring
        let (x_offset, y_offset) = (0.0, RADIAL_OFFSET_MM);

        for &well in &self.wells {
            let volume_ul = self.recipes[&well].volume_of(component);
            if volume_ul == 0.0 {
                continue;
            }

            let (runs, per_run_ul) = split_volume(volume_ul, P300_TIP_UL - P300_PARK_UL);
            for _ in 0..runs {
                let target = reservoir.withdraw(per_run_ul)?;
                let location = self.tube_location(deck, &reservoir, target);
                bot.aspirate(deck.p300, per_run_ul, &location).await?;
                self.settle(bot).await?;

                let above = self.above_well(deck, well, x_offset, y_offset);
                bot.move_to(deck.p300, &above).await?;
                self.settle(bot).await?;

                let pour = Location::center(deck.plate, well.address())
                    .offset_by(x_offset, y_offset, DISPENSE_DEPTH_MM);
                bot.dispense(deck.p300, per_run_ul, &pour, DISPENSE_RATE).await?;
                self.settle(bot).await?;

                bot.move_to(deck.p300, &above).await?;
                self.settle(bot).await?;
            }
        }

        bot.drop_tip(deck.p300).await?;
        Ok(reservoir)
    }
}
