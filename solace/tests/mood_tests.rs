use solace::mood::{mood_table, BlobSimulation, MoodKey, Vec2, POINT_COUNT};

#[test]
fn test_blob_keeps_sixteen_points_through_interaction() {
    let mut sim = BlobSimulation::new(MoodKey::Calm);
    sim.pointer_down(Vec2::new(250.0, 210.0));
    for frame in 0..60 {
        sim.pointer_move(Vec2::new(250.0 + frame as f64, 210.0));
        sim.step(frame as f64 * 16.0);
    }
    sim.pointer_up();
    sim.step(1_000.0);

    assert_eq!(sim.points().len(), POINT_COUNT);
    assert_eq!(sim.frame().segments.len(), POINT_COUNT);
}

#[test]
fn test_released_blob_settles_when_idle_is_frozen() {
    let mut sim = BlobSimulation::new(MoodKey::Sad);
    sim.pointer_down(Vec2::new(310.0, 200.0));
    for frame in 0..10 {
        sim.step(frame as f64 * 16.0);
    }
    sim.pointer_up();
    sim.freeze_idle(true);

    for frame in 10..600 {
        sim.step(frame as f64 * 16.0);
    }
    assert!(sim.max_speed() < 1e-3, "speed {}", sim.max_speed());
}

#[test]
fn test_every_mood_renders_its_own_fill() {
    let mut sim = BlobSimulation::new(MoodKey::Neutral);
    for sample in mood_table() {
        sim.set_mood(sample.key);
        let svg = sim.frame().to_svg();
        assert!(svg.contains(&sample.gradient.0.hex()), "{}", sample.key);
        assert!(svg.contains(&sample.gradient.1.hex()), "{}", sample.key);
    }
}

#[test]
fn test_frame_is_saved_as_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("blob.svg");

    let mut sim = BlobSimulation::new(MoodKey::Excited);
    sim.step(16.0);
    sim.frame().save_svg(&out).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("<svg"));
    assert!(written.contains("blob-highlight"));
}

#[test]
fn test_saving_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("blob.svg");

    let err = BlobSimulation::new(MoodKey::Happy)
        .frame()
        .save_svg(&out)
        .unwrap_err();
    assert!(err.to_string().starts_with("IO error"));
}
