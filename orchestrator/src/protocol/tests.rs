#![cfg(test)]

use definitions::PipetteId;

use super::bulk_fill::split_volume;
use super::*;
use crate::actuator::recording::{Op, RecordingActuator};
use crate::actuator::simulator::SimulatedDeck;
use crate::constants::{DISPENSE_DEPTH_MM, P300_PARK_UL, P300_TIP_UL};

const P300: PipetteId = PipetteId(0);
const P10: PipetteId = PipetteId(1);

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

async fn record_run(params: RunParameters) -> (Vec<Op>, RunReport) {
    let protocol = Protocol::new(params).unwrap();
    let mut bot = RecordingActuator::default();
    let report = protocol.run(&mut bot).await.unwrap();
    (bot.ops, report)
}

/// Dispenses into the reservoir ring of `well` during the bulk fill.
fn bulk_pours_into(ops: &[Op], well: &str) -> Vec<f64> {
    ops.iter()
        .filter_map(|op| match op {
            Op::Dispense {
                pipette,
                volume_ul,
                location,
                ..
            } if *pipette == P300
                && location.well == well
                && location.offset.z == DISPENSE_DEPTH_MM =>
            {
                Some(*volume_ul)
            }
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn full_run_leaves_the_expected_volumes() {
    let (_, report) = record_run(RunParameters::default()).await;

    // dye passes cost the recipe total plus the 20 uL parked in each tip:
    // red 6*(0+50+100+150), blue 4*(0+30+...+150), clear tops up to 9600
    assert_close(report.magenta_ul, 49_000.0 - 1_820.0);
    assert_close(report.teal_ul, 49_000.0 - 1_820.0);
    assert_close(report.water_ul, 49_000.0 - 6_020.0);
    // the dose draws 5 uL per well
    assert_close(report.yellow_ul, 49_000.0 - 120.0);
}

#[tokio::test]
async fn deck_is_loaded_before_anything_moves() {
    let (ops, _) = record_run(RunParameters::default()).await;
    assert!(matches!(ops[0], Op::LoadLabware { .. }));
    assert!(matches!(ops[3], Op::LoadLabware { .. }));
    assert!(matches!(ops[4], Op::LoadPipette { .. }));
    assert!(matches!(ops[5], Op::LoadPipette { .. }));
    assert!(matches!(ops[6], Op::PickUpTip(P300)));
}

#[tokio::test]
async fn bulk_fill_skips_zero_volumes_and_splits_the_rest() {
    let (ops, _) = record_run(RunParameters::default()).await;

    // A1 gets no red and no blue, so its 400 uL of clear arrive in the
    // minimum 3 sub-withdrawals of the 180 uL working volume
    let a1 = bulk_pours_into(&ops, "A1");
    assert_eq!(a1.len(), 3);
    assert_close(a1.iter().sum(), 400.0);

    // D6 gets one pour of each component
    let d6 = bulk_pours_into(&ops, "D6");
    assert_eq!(d6, vec![150.0, 150.0, 100.0]);
}

#[tokio::test]
async fn bulk_fill_uses_one_tip_per_component() {
    let (ops, _) = record_run(RunParameters::default()).await;
    let p300_picks = ops.iter().filter(|op| **op == Op::PickUpTip(P300)).count();
    let p300_drops = ops.iter().filter(|op| **op == Op::DropTip(P300)).count();
    // 3 component passes plus one remix tip per well
    assert_eq!(p300_picks, 3 + 24);
    assert_eq!(p300_drops, 3 + 24);
}

#[tokio::test]
async fn remix_dispenses_eight_equal_laps_per_well() {
    let (ops, _) = record_run(RunParameters::default()).await;

    let laps: Vec<f64> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Dispense {
                volume_ul,
                location,
                ..
            } if location.offset.z == DISPENSE_DEPTH_MM - 2.5 => Some(*volume_ul),
            _ => None,
        })
        .collect();

    assert_eq!(laps.len(), 24 * 8);
    for lap in &laps {
        assert_eq!(*lap, 25.0);
    }
    // each well's laps redistribute exactly the full tip withdrawn
    assert_close(laps[..8].iter().sum(), P300_TIP_UL);

    let pulls = ops
        .iter()
        .filter(|op| {
            matches!(op, Op::Aspirate { volume_ul, .. } if *volume_ul == P300_TIP_UL)
        })
        .count();
    assert_eq!(pulls, 24);
}

#[tokio::test]
async fn dose_reuses_a_single_tip_across_the_plate() {
    let (ops, _) = record_run(RunParameters::default()).await;

    let p10_picks = ops.iter().filter(|op| **op == Op::PickUpTip(P10)).count();
    let p10_drops = ops.iter().filter(|op| **op == Op::DropTip(P10)).count();
    assert_eq!(p10_picks, 1);
    assert_eq!(p10_drops, 1);

    let touches = ops
        .iter()
        .filter(|op| matches!(op, Op::TouchTip { .. }))
        .count();
    assert_eq!(touches, 24);

    // the dose phase starts only after the P300 is done
    let first_p10_pick = ops.iter().position(|op| *op == Op::PickUpTip(P10)).unwrap();
    let last_p300_drop = ops.iter().rposition(|op| *op == Op::DropTip(P300)).unwrap();
    assert!(last_p300_drop < first_p10_pick);
}

#[tokio::test]
async fn no_aspirate_exceeds_the_working_volume() {
    let (ops, _) = record_run(RunParameters::default()).await;
    for op in &ops {
        if let Op::Aspirate {
            pipette, volume_ul, ..
        } = op
        {
            assert!(*volume_ul <= P300_TIP_UL);
            if *pipette == P300 && *volume_ul < P300_TIP_UL {
                // anything below a full tip must leave room for the parked volume
                assert!(*volume_ul + P300_PARK_UL <= P300_TIP_UL + 1e-9);
            }
        }
    }
}

#[tokio::test]
async fn subset_runs_only_touch_the_requested_wells() {
    let mut params = RunParameters::default();
    params.wells = vec!["A1".to_string(), "D6".to_string()];
    let (ops, _) = record_run(params).await;

    assert!(!bulk_pours_into(&ops, "A1").is_empty());
    assert!(!bulk_pours_into(&ops, "D6").is_empty());
    assert!(bulk_pours_into(&ops, "B3").is_empty());

    let touches = ops
        .iter()
        .filter(|op| matches!(op, Op::TouchTip { .. }))
        .count();
    assert_eq!(touches, 2);
}

#[tokio::test]
async fn unknown_wells_fail_before_the_run_starts() {
    let mut params = RunParameters::default();
    params.wells = vec!["E1".to_string()];
    assert!(matches!(
        Protocol::new(params),
        Err(ProtocolError::UnsupportedRow('E'))
    ));
}

#[tokio::test]
async fn the_simulated_deck_accepts_a_full_run() {
    let protocol = Protocol::new(RunParameters::default()).unwrap();
    let mut deck = SimulatedDeck::new(0.0);
    let report = protocol.run(&mut deck).await.unwrap();
    assert!(report.yellow_ul > 0.0);
}

#[test]
fn split_volume_minimizes_runs_without_losing_a_remainder() {
    let limit = P300_TIP_UL - P300_PARK_UL;

    let (runs, per) = split_volume(400.0, limit);
    assert_eq!(runs, 3);
    assert_eq!(per * f64::from(runs), 400.0);

    assert_eq!(split_volume(180.0, limit), (1, 180.0));
    assert_eq!(split_volume(181.0, limit), (2, 90.5));
    assert_eq!(split_volume(30.0, limit), (1, 30.0));
}
