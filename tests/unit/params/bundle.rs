use super::*;

fn assert_in_ranges(p: &ParameterBundle) {
    assert!((8..=15).contains(&p.point_count), "{}", p.point_count);
    assert!((3..=7).contains(&p.ring_count), "{}", p.ring_count);
    assert!(PRIMARY_SYMMETRIES.contains(&p.primary_symmetry));
    assert!(SECONDARY_SYMMETRIES.contains(&p.secondary_symmetry));
    assert!((0.0..360.0).contains(&p.base_hue), "{}", p.base_hue);
    assert!((1..4).contains(&p.complexity));
    assert!((0.05..0.20).contains(&p.pulse_amplitude), "{}", p.pulse_amplitude);
    assert!((0.015..0.045).contains(&p.pulse_speed));
    assert!((0.001..0.005).contains(&p.spin_speed));
    for axis in p.tilt {
        assert!((0.1..0.35).contains(&axis.amplitude));
        assert!((0.0..TAU).contains(&axis.phase));
        assert!((0.002..0.008).contains(&axis.speed));
    }
    assert!((0.1..0.5).contains(&p.hue_drift));
    assert!((1..8).contains(&p.connection_skip));
    assert!(LISSAJOUS_RATIOS.contains(&(p.lissajous.a, p.lissajous.b)));
    assert!((0.0..PI).contains(&p.lissajous.delta));
    for s in p.fold_speeds {
        assert!(s > 0.0 && s <= MAX_FOLD_SPEED, "{s}");
    }
    assert!((0.3..0.8).contains(&p.w_scale));
    assert!((0.02..0.08).contains(&p.evolve_skip_speed));
    assert!((0.02..0.08).contains(&p.evolve_symmetry_speed));
}

#[test]
fn boundary_digests_stay_in_range() {
    let lo = ParameterBundle::extract(&Digest::filled(0x00));
    assert_in_ranges(&lo);
    assert_eq!(lo.point_count, 8);
    assert_eq!(lo.ring_count, 3);
    assert_eq!(lo.primary_symmetry, 6);
    assert_eq!(lo.pulse_amplitude, 0.05);
    assert_eq!(lo.projection, ProjectionKind::Orthographic);

    let hi = ParameterBundle::extract(&Digest::filled(0xFF));
    assert_in_ranges(&hi);
    assert_eq!(hi.point_count, 15);
    assert_eq!(hi.ring_count, 3 + 255 % 5);
    assert_eq!(hi.primary_symmetry, 16);
    assert!(hi.pulse_amplitude < 0.20);
    assert!(hi.base_hue < 360.0);
}

#[test]
fn hashed_inputs_stay_in_range() {
    for i in 0..256 {
        let d = Digest::of_text(&format!("intention #{i}"));
        assert_in_ranges(&ParameterBundle::extract(&d));
    }
}

#[test]
fn extraction_is_deterministic() {
    let d = Digest::of_text("I am at peace");
    assert_eq!(ParameterBundle::extract(&d), ParameterBundle::extract(&d));
}

#[test]
fn point_count_reads_first_byte() {
    let d = Digest::of_text("I am at peace");
    let p = ParameterBundle::extract(&d);
    assert_eq!(p.point_count, 8 + usize::from(d.as_bytes()[0] % 8));
}

#[test]
fn one_character_change_moves_many_parameters() {
    let a = ParameterBundle::extract(&Digest::of_text("I am at peace"));
    let b = ParameterBundle::extract(&Digest::of_text("I am at peace "));
    let continuous_changed = [
        a.base_hue != b.base_hue,
        a.pulse_amplitude != b.pulse_amplitude,
        a.pulse_speed != b.pulse_speed,
        a.spin_speed != b.spin_speed,
        a.hue_drift != b.hue_drift,
        a.w_scale != b.w_scale,
        a.lissajous.delta != b.lissajous.delta,
        a.tilt[0].phase != b.tilt[0].phase,
    ]
    .iter()
    .filter(|c| **c)
    .count();
    assert!(continuous_changed >= 6, "{continuous_changed}");
}

#[test]
fn evolving_selection_stays_in_tables() {
    let p = ParameterBundle::extract(&Digest::of_text("evolve"));
    let mut seen_skips = std::collections::BTreeSet::new();
    for step in 0..20_000 {
        let t = f64::from(step) * 0.05;
        let skip = p.evolving_skip(t);
        assert!((1..=7).contains(&skip));
        seen_skips.insert(skip);
        assert!(SECONDARY_SYMMETRIES.contains(&p.evolving_secondary_symmetry(t)));
    }
    assert!(seen_skips.len() > 3, "skip should actually evolve: {seen_skips:?}");
}

#[test]
fn pulse_is_bounded_by_amplitude() {
    let p = ParameterBundle::extract(&Digest::of_text("pulse"));
    assert_eq!(p.pulse(0.0), 1.0);
    for step in 0..1000 {
        let v = p.pulse(f64::from(step) * 0.1);
        assert!((v - 1.0).abs() <= 1.2 * p.pulse_amplitude + 1e-12);
    }
}
