use definitions::{Location, TouchTip};

use super::{Deck, Protocol, ProtocolError};
use crate::actuator::Actuator;
use crate::constants::{
    DISPENSE_DEPTH_MM, DISPENSE_RATE, DOSE_EXCESS_FACTOR, GROWTH_HALF_VOL_UL, PEDESTAL_DEPTH_MM,
    RADIAL_OFFSET_MM, TOUCH_TIP_DROP_MM, TOUCH_TIP_RADIUS,
};
use crate::reservoir::Reservoir;

impl Protocol {
    /// Phase 3: seed each growth pedestal with equal parts protein dye and
    /// the well's own reservoir. A single P10 tip serves the whole pass:
    /// the carryover between wells is wanted, it encourages mixing in the
    /// tip. Returns the protein reservoir with its counter drawn down.
    pub(super) async fn dose(
        &self,
        bot: &mut impl Actuator,
        deck: &Deck,
        mut protein: Reservoir,
    ) -> Result<Reservoir, ProtocolError> {
        bot.pick_up_tip(deck.p10).await?;
        self.settle(bot).await?;

        for &well in &self.wells {
            let target = protein.withdraw(GROWTH_HALF_VOL_UL)?;
            let location = self.tube_location(deck, &protein, target);
            bot.aspirate(deck.p10, GROWTH_HALF_VOL_UL, &location).await?;
            self.settle(bot).await?;

            let above = self.above_well(deck, well, 0.0, RADIAL_OFFSET_MM);
            bot.move_to(deck.p10, &above).await?;
            self.settle(bot).await?;

            // descend into the reservoir ring before aspirating from it
            let inside = Location::top(deck.plate, well.address(), DISPENSE_DEPTH_MM)
                .offset_by(0.0, RADIAL_OFFSET_MM, 0.0);
            bot.move_to(deck.p10, &inside).await?;
            self.settle(bot).await?;

            let ring = Location::center(deck.plate, well.address())
                .offset_by(0.0, RADIAL_OFFSET_MM, DISPENSE_DEPTH_MM);
            bot.aspirate(deck.p10, GROWTH_HALF_VOL_UL, &ring).await?;
            self.settle(bot).await?;

            bot.move_to(deck.p10, &above).await?;
            self.settle(bot).await?;

            // both aliquots plus a margin, so the whole drop leaves the tip
            // as smoothly as possible
            let pedestal = Location::center(deck.plate, well.address())
                .offset_by(0.0, 0.0, PEDESTAL_DEPTH_MM);
            let drop_ul = GROWTH_HALF_VOL_UL * DOSE_EXCESS_FACTOR;
            bot.dispense(deck.p10, drop_ul, &pedestal, DISPENSE_RATE).await?;
            self.settle(bot).await?;

            // shed whatever still hangs off the tip onto the pedestal wall
            let touch = TouchTip {
                v_offset: PEDESTAL_DEPTH_MM - TOUCH_TIP_DROP_MM,
                radius: TOUCH_TIP_RADIUS,
            };
            bot.touch_tip(deck.p10, touch).await?;
            self.settle(bot).await?;
        }

        bot.drop_tip(deck.p10).await?;
        Ok(protein)
    }
}
