use std::f64::consts::PI;

use definitions::Location;

use super::{Deck, Protocol, ProtocolError};
use crate::actuator::Actuator;
use crate::constants::{
    DISPENSE_DEPTH_MM, DISPENSE_RATE, LAP_DELAY_S, P300_TIP_UL, RADIAL_OFFSET_MM, REMIX_EXTRA_DEPTH_MM,
    REMIX_LAPS,
};
use crate::reservoir::round_to;

impl Protocol {
    /// Phase 2: the bulk fill layers the dyes on top of each other, so pull
    /// a full tip out of each well and redistribute it around the reservoir
    /// ring in equal laps to homogenize the bath.
    pub(super) async fn remix(
        &self,
        bot: &mut impl Actuator,
        deck: &Deck,
    ) -> Result<(), ProtocolError> {
        let lap_volume_ul = round_to(P300_TIP_UL / f64::from(REMIX_LAPS), 1);
        let slice = PI / f64::from(REMIX_LAPS);
        let depth_mm = DISPENSE_DEPTH_MM - REMIX_EXTRA_DEPTH_MM;

        for &well in &self.wells {
            bot.pick_up_tip(deck.p300).await?;
            self.settle(bot).await?;

            let above = self.above_well(deck, well, 0.0, RADIAL_OFFSET_MM);
            bot.move_to(deck.p300, &above).await?;
            self.settle(bot).await?;

            let column = Location::center(deck.plate, well.address())
                .offset_by(0.0, RADIAL_OFFSET_MM, depth_mm);
            bot.aspirate(deck.p300, P300_TIP_UL, &column).await?;
            self.settle(bot).await?;

            bot.move_to(deck.p300, &above).await?;
            self.settle(bot).await?;

            for lap in 0..REMIX_LAPS {
                let angle = -slice * f64::from(lap);
                let x = angle.cos() * RADIAL_OFFSET_MM;
                let y = angle.sin() * RADIAL_OFFSET_MM;

                // enter the circle from above the first time, to not drag
                // the tip through the well wall
                if lap == 0 {
                    bot.move_to(deck.p300, &self.above_well(deck, well, x, y)).await?;
                    bot.delay(LAP_DELAY_S).await?;
                }

                let at = Location::center(deck.plate, well.address()).offset_by(x, y, depth_mm);
                bot.dispense(deck.p300, lap_volume_ul, &at, DISPENSE_RATE).await?;
                bot.delay(LAP_DELAY_S).await?;
            }

            bot.drop_tip(deck.p300).await?;
        }

        Ok(())
    }
}
