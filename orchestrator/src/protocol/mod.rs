mod bulk_fill;
mod dose;
mod remix;
pub(crate) mod tests;

use std::collections::BTreeMap;

use definitions::{LabwareId, Location, PipetteId, Row, WellId};
use thiserror::Error;

use crate::actuator::{Actuator, ActuatorError};
use crate::constants::{
    MAGENTA_TUBE, P10_KIND, P10_MOUNT, P300_KIND, P300_MOUNT, PLATE_COLUMNS, PLATE_KIND,
    PLATE_SLOT, SAFE_HEIGHT_MM, TEAL_TUBE, TIPS_10UL_KIND, TIPS_10UL_SLOT, TIPS_200UL_KIND,
    TIPS_200UL_SLOT, TUBE_RACK_KIND, TUBE_RACK_SLOT, WATER_TUBE, YELLOW_TUBE,
};
use crate::parameters::RunParameters;
use crate::recipe::{build_recipe_table, parse_well, WellRecipe};
use crate::reservoir::{Reservoir, TubeGeometry, VerticalTarget};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    #[error("row {0:?} is not one of the plate rows A-D")]
    UnsupportedRow(char),
    #[error("malformed well address {0:?}")]
    BadWellAddress(String),
    #[error("well {well}: {dye_ul} uL of dye exceeds the {total_ul} uL well total")]
    RecipeOverflow {
        well: WellId,
        dye_ul: f64,
        total_ul: f64,
    },
    #[error("{name} tube ({tube}): cannot withdraw {requested_ul} uL, only {remaining_ul} uL left")]
    ReservoirOverdraw {
        name: &'static str,
        tube: &'static str,
        requested_ul: f64,
        remaining_ul: f64,
    },
    #[error(transparent)]
    Actuator(#[from] ActuatorError),
}

/// Handles to the loaded labware and pipettes, valid for one run.
#[derive(Debug, Clone, Copy)]
pub struct Deck {
    pub colors: LabwareId,
    pub plate: LabwareId,
    pub p300: PipetteId,
    pub p10: PipetteId,
}

impl Deck {
    /// Loads the deck layout: both tip racks, the dye tube rack and the
    /// crystallization plate, then the two pipettes.
    pub async fn load(bot: &mut impl Actuator) -> Result<Deck, ActuatorError> {
        let tips_200 = bot.load_labware(TIPS_200UL_KIND, TIPS_200UL_SLOT).await?;
        let tips_10 = bot.load_labware(TIPS_10UL_KIND, TIPS_10UL_SLOT).await?;
        let colors = bot.load_labware(TUBE_RACK_KIND, TUBE_RACK_SLOT).await?;
        let plate = bot.load_labware(PLATE_KIND, PLATE_SLOT).await?;

        let p300 = bot.load_pipette(P300_KIND, P300_MOUNT, tips_200).await?;
        let p10 = bot.load_pipette(P10_KIND, P10_MOUNT, tips_10).await?;

        Ok(Deck {
            colors,
            plate,
            p300,
            p10,
        })
    }
}

/// Liquid left in each dye tube at the end of a run, in uL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub magenta_ul: f64,
    pub teal_ul: f64,
    pub water_ul: f64,
    pub yellow_ul: f64,
}

/// The crystallization protocol: three phases run once each, in order.
/// Bulk dye fill of every well, remixing of the layered pours, then the
/// protein/precipitant dose onto each growth pedestal.
#[derive(Debug, Clone)]
pub struct Protocol {
    params: RunParameters,
    wells: Vec<WellId>,
    recipes: BTreeMap<WellId, WellRecipe>,
}

impl Protocol {
    /// Resolves the well list and builds the recipe table up front, so a
    /// bad parameter set fails before any hardware command is issued.
    pub fn new(params: RunParameters) -> Result<Protocol, ProtocolError> {
        let wells = if params.wells.is_empty() {
            Row::ALL
                .iter()
                .flat_map(|&row| (1..=PLATE_COLUMNS).map(move |column| WellId::new(row, column)))
                .collect()
        } else {
            params
                .wells
                .iter()
                .map(|address| parse_well(address))
                .collect::<Result<Vec<_>, _>>()?
        };

        let recipes = build_recipe_table(&wells, &params.recipe)?;
        Ok(Protocol {
            params,
            wells,
            recipes,
        })
    }

    pub async fn run(&self, bot: &mut impl Actuator) -> Result<RunReport, ProtocolError> {
        let deck = Deck::load(bot).await?;

        let volumes = &self.params.starting_volumes;
        let magenta = Reservoir::new("magenta", MAGENTA_TUBE, TubeGeometry::GREINER_50ML, volumes.magenta_ml);
        let teal = Reservoir::new("teal", TEAL_TUBE, TubeGeometry::GREINER_50ML, volumes.teal_ml);
        let water = Reservoir::new("water", WATER_TUBE, TubeGeometry::GREINER_50ML, volumes.water_ml);
        let yellow = Reservoir::new("yellow", YELLOW_TUBE, TubeGeometry::GREINER_50ML, volumes.yellow_ml);

        log::info!("bulk fill: coloring {} wells", self.wells.len());
        let [magenta, teal, water] = self.bulk_fill(bot, &deck, [magenta, teal, water]).await?;

        log::info!("remix: homogenizing the well reservoirs");
        self.remix(bot, &deck).await?;

        log::info!("dose: seeding the growth pedestals");
        let yellow = self.dose(bot, &deck, yellow).await?;

        Ok(RunReport {
            magenta_ul: magenta.remaining_ul,
            teal_ul: teal.remaining_ul,
            water_ul: water.remaining_ul,
            yellow_ul: yellow.remaining_ul,
        })
    }

    /// Hover position above a well, shifted horizontally by `(x, y)` mm.
    fn above_well(&self, deck: &Deck, well: WellId, x: f64, y: f64) -> Location {
        Location::top(deck.plate, well.address(), SAFE_HEIGHT_MM).offset_by(x, y, 0.0)
    }

    /// The aspiration location inside a dye tube for the given target.
    fn tube_location(&self, deck: &Deck, reservoir: &Reservoir, target: VerticalTarget) -> Location {
        match target {
            VerticalTarget::FromBottom(z) => Location::bottom(deck.colors, reservoir.tube, z),
            VerticalTarget::FromTop(z) => Location::top(deck.colors, reservoir.tube, z),
        }
    }

    /// The fixed settling pause issued after every hardware command, to let
    /// the arm and the liquid come to rest.
    async fn settle(&self, bot: &mut impl Actuator) -> Result<(), ActuatorError> {
        bot.delay(self.params.settle_delay_s).await
    }
}
