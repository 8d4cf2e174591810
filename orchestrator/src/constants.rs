use definitions::{Mount, Slot};

// Deck layout, matching the physical setup the heights below were tuned on.
pub const TIPS_200UL_KIND: &str = "opentrons_96_filtertiprack_200ul";
pub const TIPS_200UL_SLOT: Slot = Slot(4);
pub const TIPS_10UL_KIND: &str = "geb_96_tiprack_10ul";
pub const TIPS_10UL_SLOT: Slot = Slot(1);
pub const TUBE_RACK_KIND: &str = "opentrons_6_tuberack_nest_50ml_conical";
pub const TUBE_RACK_SLOT: Slot = Slot(2);
pub const PLATE_KIND: &str = "hamptonresearch_24_wellplate_24x500ul_jd";
pub const PLATE_SLOT: Slot = Slot(3);

pub const P300_KIND: &str = "p300_single_gen2";
pub const P300_MOUNT: Mount = Mount::Right;
pub const P10_KIND: &str = "p10_single";
pub const P10_MOUNT: Mount = Mount::Left;

// Tube rack positions of the four dye tubes.
pub const MAGENTA_TUBE: &str = "A1";
pub const TEAL_TUBE: &str = "B1";
pub const WATER_TUBE: &str = "A2";
pub const YELLOW_TUBE: &str = "B2";

pub const PLATE_COLUMNS: u8 = 6;

/// How far above a well top to hover between moves, in mm. Comically far,
/// but collisions with a loaded plate are expensive.
pub const SAFE_HEIGHT_MM: f64 = 8.0;
/// How far below a well top to go when pouring into the reservoir ring.
pub const DISPENSE_DEPTH_MM: f64 = -10.0;
/// Radial distance from the well center to the reservoir ring, in mm.
pub const RADIAL_OFFSET_MM: f64 = 5.5;
/// Remix aspirates and dispenses this much deeper than the bulk pours.
pub const REMIX_EXTRA_DEPTH_MM: f64 = 2.5;
pub const REMIX_LAPS: u32 = 8;
/// Short pause between remix laps, in seconds.
pub const LAP_DELAY_S: f64 = 0.1;

/// Effective capacity of the P300 with the 200 uL filter tips, in uL.
pub const P300_TIP_UL: f64 = 200.0;
/// Reverse-pipetting parking volume kept in the P300 tip, in uL.
pub const P300_PARK_UL: f64 = 20.0;

/// One aliquot of the growth-well drop (protein, and again reservoir), in uL.
pub const GROWTH_HALF_VOL_UL: f64 = 5.0;
/// Dispense this multiple of the aliquot so the whole drop leaves the tip.
pub const DOSE_EXCESS_FACTOR: f64 = 2.5;
/// Depth of the growth pedestal below the well top, in mm.
pub const PEDESTAL_DEPTH_MM: f64 = -2.0;
/// The touch-tip to shed the droplet happens this far below the pedestal, in mm.
pub const TOUCH_TIP_DROP_MM: f64 = 2.5;
pub const TOUCH_TIP_RADIUS: f64 = 0.125;

/// All dispenses run at half the default flow rate, for the liquid's benefit.
pub const DISPENSE_RATE: f64 = 0.5;
