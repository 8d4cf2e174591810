use std::collections::BTreeMap;
use std::fmt;

use definitions::{Row, WellId};

use crate::constants::PLATE_COLUMNS;
use crate::parameters::RecipeParameters;
use crate::protocol::ProtocolError;

/// The three dye components of the bulk fill, in pour order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Component {
    Red,
    Blue,
    Clear,
}

impl Component {
    pub const FILL_ORDER: [Component; 3] = [Component::Red, Component::Blue, Component::Clear];
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Component::Red => "red",
            Component::Blue => "blue",
            Component::Clear => "clear",
        })
    }
}

/// The dye volumes one well receives during the bulk fill, in uL.
/// The three components always sum to the configured well total.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WellRecipe {
    pub red_ul: f64,
    pub blue_ul: f64,
    pub clear_ul: f64,
}

impl WellRecipe {
    pub fn volume_of(&self, component: Component) -> f64 {
        match component {
            Component::Red => self.red_ul,
            Component::Blue => self.blue_ul,
            Component::Clear => self.clear_ul,
        }
    }

    pub fn total_ul(&self) -> f64 {
        self.red_ul + self.blue_ul + self.clear_ul
    }
}

/// Builds the per-well recipe table: red grows down the rows, blue grows
/// across the columns, clear tops the well up to the configured total.
///
/// A parameter set whose red and blue volumes overflow the well total is
/// rejected here, before any hardware command is issued.
pub fn build_recipe_table(
    wells: &[WellId],
    params: &RecipeParameters,
) -> Result<BTreeMap<WellId, WellRecipe>, ProtocolError> {
    let mut table = BTreeMap::new();
    for &well in wells {
        let red_ul = f64::from(well.row.index()) * params.red_step_ul;
        let blue_ul = f64::from(well.column - 1) * params.blue_step_ul;
        let clear_ul = params.total_well_ul - red_ul - blue_ul;
        if clear_ul < 0.0 {
            return Err(ProtocolError::RecipeOverflow {
                well,
                dye_ul: red_ul + blue_ul,
                total_ul: params.total_well_ul,
            });
        }
        table.insert(well, WellRecipe { red_ul, blue_ul, clear_ul });
    }
    Ok(table)
}

/// Parses a well address like `"B3"`, rejecting rows outside A-D and
/// columns outside the plate.
pub fn parse_well(address: &str) -> Result<WellId, ProtocolError> {
    let mut chars = address.chars();
    let letter = chars
        .next()
        .ok_or_else(|| ProtocolError::BadWellAddress(address.to_string()))?;
    let row =
        Row::from_letter(letter).ok_or(ProtocolError::UnsupportedRow(letter))?;
    let column = chars
        .as_str()
        .parse::<u8>()
        .map_err(|_| ProtocolError::BadWellAddress(address.to_string()))?;
    if column == 0 || column > PLATE_COLUMNS {
        return Err(ProtocolError::BadWellAddress(address.to_string()));
    }
    Ok(WellId::new(row, column))
}
