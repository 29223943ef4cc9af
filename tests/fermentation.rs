use approx::assert_relative_eq;
use brewcalc::fermentation::*;
use brewcalc::BrewError;

// ═══════════════════════════════════════════════════════════════════
//  Progress
// ═══════════════════════════════════════════════════════════════════

#[test]
fn halfway_to_target() {
    // 40 % apparent attenuation of an 80 % target
    let p = fermentation_progress(1.050, 1.030, 1.010).unwrap();
    assert_relative_eq!(p, 50.0, epsilon = 1e-9);
}

#[test]
fn progress_is_capped_at_100() {
    let p = fermentation_progress(1.050, 1.005, 1.010).unwrap();
    assert_eq!(p, 100.0);
}

#[test]
fn no_progress_at_pitching() {
    let p = fermentation_progress(1.050, 1.050, 1.010).unwrap();
    assert_eq!(p, 0.0);
}

#[test]
fn unreachable_target_gives_zero() {
    assert_eq!(fermentation_progress(1.050, 1.040, 1.050).unwrap(), 0.0);
    assert_eq!(fermentation_progress(1.050, 1.040, 1.060).unwrap(), 0.0);
}

#[test]
fn og_of_water_is_rejected() {
    let err = fermentation_progress(1.000, 0.998, 0.995).unwrap_err();
    assert!(matches!(err, BrewError::InvalidGravity(_)), "got {err:?}");
}

#[test]
fn default_target_is_ten_points_down() {
    assert_relative_eq!(default_target_fg(1.050), 1.040, epsilon = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════
//  Readings
// ═══════════════════════════════════════════════════════════════════

#[test]
fn warm_sample_reads_low() {
    let reading = GravityReading::at_temperature(1.050, 25.0);
    assert_relative_eq!(reading.corrected_gravity(), 1.0505, epsilon = 1e-12);
}

#[test]
fn reading_at_calibration_temperature_is_unchanged() {
    assert_eq!(GravityReading::at_temperature(1.050, CALIBRATION_TEMP_C).corrected_gravity(), 1.050);
    assert_eq!(GravityReading::new(1.012).corrected_gravity(), 1.012);
}

// ═══════════════════════════════════════════════════════════════════
//  Duration
// ═══════════════════════════════════════════════════════════════════

#[test]
fn fermentation_days_by_style() {
    assert_eq!(estimate_fermentation_days("American Pale Ale", 1.050), 7);
    assert_eq!(estimate_fermentation_days("German Lager", 1.050), 21);
    assert_eq!(estimate_fermentation_days("Imperial Stout", 1.080), 13);
    assert_eq!(estimate_fermentation_days("Robust Porter", 1.060), 10);
}

#[test]
fn fermentation_days_never_below_five() {
    // 7 − 1 (wheat) − 2 (light) = 4
    assert_eq!(estimate_fermentation_days("Wheat", 1.040), 5);
}

#[test]
fn end_of_fermentation_by_style() {
    assert_eq!(estimated_fermentation_end_days("Pale Ale"), 14);
    assert_eq!(estimated_fermentation_end_days("Pilsner Lager"), 21);
}

#[test]
fn alcohol_tolerance_of_known_strains() {
    assert_eq!(alcohol_tolerance("US-05"), 11.0);
    assert_eq!(alcohol_tolerance("S-04"), 9.5);
    assert_eq!(alcohol_tolerance("WB-06"), 8.0);
    assert_eq!(alcohol_tolerance("Mystery Strain"), 10.0);
}
