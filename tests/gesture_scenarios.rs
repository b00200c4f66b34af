#[cfg(test)]
mod gesture_scenarios {
    use pinchable::{
        core::transform::pan_range,
        replay::{self, Script},
        EngineBuilder, EventHandled, GestureEngine, GestureSample, Transform, ViewportSize,
        VirtualPlatform,
    };
    use std::{cell::RefCell, rc::Rc};

    fn engine_at_scale(scale: f64) -> GestureEngine<VirtualPlatform> {
        EngineBuilder::new()
            .initial_scale(scale)
            .viewport(400.0, 300.0)
            .build(VirtualPlatform::touch())
            .unwrap()
    }

    /// Records pinch notifications in order as "start" / "stop"
    fn record_pinches(engine: &mut GestureEngine<VirtualPlatform>) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let starts = log.clone();
        let stops = log.clone();
        engine.on_pinch_start(move || starts.borrow_mut().push("start".to_string()));
        engine.on_pinch_stop(move |_| stops.borrow_mut().push("stop".to_string()));
        log
    }

    #[test]
    fn test_drag_at_unit_scale_does_not_move() {
        let mut engine = engine_at_scale(1.0);
        let _ = engine.on_gesture_start(&GestureSample::pan(200.0, 150.0));
        let _ = engine.on_gesture_move(&GestureSample::pan(250.0, 150.0));
        engine.on_gesture_end();
        engine.advance_ms(16);

        assert_eq!(engine.transform().x, 0.0);
        assert_eq!(engine.transform().y, 0.0);
    }

    #[test]
    fn test_drag_at_double_scale_moves_within_range() {
        let mut engine = engine_at_scale(2.0);
        let _ = engine.on_gesture_start(&GestureSample::pan(200.0, 150.0));
        let _ = engine.on_gesture_move(&GestureSample::pan(250.0, 150.0));
        engine.on_gesture_end();
        engine.advance_ms(16);

        assert_eq!(engine.transform(), Transform::new(2.0, 50.0, 0.0));
        assert_eq!(engine.render_transform().x, "50.00");
    }

    #[test]
    fn test_pinch_scale_always_within_bounds() {
        let viewport = ViewportSize::new(400.0, 300.0);
        for start_scale in [1.0, 1.3, 1.7, 2.0] {
            for target in (0..=40).map(|i| i as f64 * 10.0) {
                let mut engine = engine_at_scale(start_scale);
                let _ = engine.on_gesture_start(&GestureSample::pinch(viewport.width / 2.0, 150.0));
                let _ = engine.on_gesture_move(&GestureSample::pinch(target, 150.0));
                engine.advance_ms(16);
                let scale = engine.transform().scale;
                assert!(
                    (1.0..=2.0).contains(&scale),
                    "scale {} out of bounds for start {} target {}",
                    scale,
                    start_scale,
                    target
                );
            }
        }

        for hint in [0.1, 0.9, 1.5, 2.5, 10.0] {
            let mut engine = engine_at_scale(1.0);
            let _ = engine.on_gesture_start(&GestureSample::pinch(200.0, 150.0));
            let _ = engine.on_gesture_move(&GestureSample::pinch(200.0, 150.0).with_native_scale(hint));
            assert!((1.0..=2.0).contains(&engine.latest_transform().scale));
        }
    }

    #[test]
    fn test_pan_always_within_range() {
        let viewport = ViewportSize::new(400.0, 300.0);
        for scale in [1.0, 1.25, 1.5, 2.0] {
            let range = pan_range(scale, &viewport);
            for dx in (-6..=6).map(|i| i as f64 * 50.0) {
                for dy in (-4..=4).map(|i| i as f64 * 50.0) {
                    let mut engine = engine_at_scale(scale);
                    let _ = engine.on_gesture_start(&GestureSample::pan(200.0, 150.0));
                    let _ = engine.on_gesture_move(&GestureSample::pan(200.0 + dx, 150.0 + dy));
                    engine.advance_ms(16);
                    let t = engine.transform();
                    assert!(t.x.abs() <= range.x, "x {} exceeds {}", t.x, range.x);
                    assert!(t.y.abs() <= range.y, "y {} exceeds {}", t.y, range.y);
                }
            }
        }
    }

    #[test]
    fn test_repeated_identical_samples_commit_once() {
        let mut engine = engine_at_scale(2.0);
        let commits = Rc::new(RefCell::new(0));
        let counter = commits.clone();
        engine.on_render(move |_| *counter.borrow_mut() += 1);

        let _ = engine.on_gesture_start(&GestureSample::pan(200.0, 150.0));
        for _ in 0..5 {
            let _ = engine.on_gesture_move(&GestureSample::pan(230.0, 170.0));
            engine.advance_ms(16);
        }

        assert_eq!(*commits.borrow(), 1);
        assert_eq!(engine.transform(), Transform::new(2.0, 30.0, 20.0));
    }

    #[test]
    fn test_single_scale_change_starts_and_stops_once() {
        let mut engine = engine_at_scale(1.0);
        let log = record_pinches(&mut engine);

        let _ = engine.on_gesture_start(&GestureSample::pinch(300.0, 150.0));
        let _ = engine.on_gesture_move(&GestureSample::pinch(340.0, 150.0));
        engine.advance_ms(2000);

        assert_eq!(*log.borrow(), vec!["start", "stop"]);
    }

    #[test]
    fn test_continuous_pinch_stays_active() {
        let mut engine = engine_at_scale(1.0);
        let log = record_pinches(&mut engine);

        let _ = engine.on_gesture_start(&GestureSample::pinch(210.0, 150.0));
        for step in 1..=20 {
            let _ = engine.on_gesture_move(&GestureSample::pinch(210.0 + step as f64 * 8.0, 150.0));
            engine.advance_ms(100);
            assert!(engine.is_pinching());
        }
        assert_eq!(*log.borrow(), vec!["start"]);

        engine.advance_ms(399);
        assert_eq!(*log.borrow(), vec!["start"]);
        engine.advance_ms(1);
        assert_eq!(*log.borrow(), vec!["start", "stop"]);
    }

    #[test]
    fn test_snap_to_origin_in_same_update() {
        let mut engine = engine_at_scale(1.5);
        let _ = engine.on_gesture_start(&GestureSample::pan(200.0, 150.0));
        let _ = engine.on_gesture_move(&GestureSample::pan(250.0, 180.0));
        engine.on_gesture_end();
        engine.advance_ms(16);
        assert_eq!(engine.transform(), Transform::new(1.5, 50.0, 30.0));

        let _ = engine.on_gesture_start(&GestureSample::pinch(400.0, 150.0));
        let _ = engine.on_gesture_move(&GestureSample::pinch(200.0, 150.0));
        let snapped = engine.latest_transform();
        assert!(snapped.scale < 1.01);
        assert_eq!((snapped.x, snapped.y), (0.0, 0.0));
    }

    #[test]
    fn test_disabled_manipulation_never_mutates() {
        let mut engine = EngineBuilder::new()
            .manipulation_enabled(false)
            .viewport(400.0, 300.0)
            .build(VirtualPlatform::touch())
            .unwrap();
        let log = record_pinches(&mut engine);

        let samples = [
            GestureSample::pinch(300.0, 150.0),
            GestureSample::pinch(400.0, 150.0),
            GestureSample::pan(10.0, 10.0),
            GestureSample::pinch(0.0, 0.0).with_native_scale(2.0),
        ];
        for sample in &samples {
            assert_eq!(engine.on_gesture_start(sample), EventHandled::NotHandled);
            assert_eq!(engine.on_gesture_move(sample), EventHandled::NotHandled);
            engine.on_gesture_end();
            engine.advance_ms(100);
        }
        engine.advance_ms(1000);

        assert_eq!(engine.transform(), Transform::identity());
        assert_eq!(engine.platform().frame_requests(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_initial_scale_reset_keeps_out_of_range_pan() {
        let mut engine = engine_at_scale(2.0);
        let _ = engine.on_gesture_start(&GestureSample::pan(200.0, 150.0));
        let _ = engine.on_gesture_move(&GestureSample::pan(300.0, 150.0));
        engine.on_gesture_end();
        engine.advance_ms(16);
        assert_eq!(engine.transform().x, 100.0);

        // x stays where it was even though the range at scale 1 is zero
        engine.set_initial_scale(1.0).unwrap();
        assert_eq!(engine.transform(), Transform::new(1.0, 100.0, 0.0));

        // the next pan re-clamps from the stale start offset
        let _ = engine.on_gesture_start(&GestureSample::pan(200.0, 150.0));
        let _ = engine.on_gesture_move(&GestureSample::pan(201.0, 150.0));
        engine.advance_ms(16);
        assert_eq!(engine.transform().x, 0.0);
    }

    #[test]
    fn test_pinch_to_eighth_renders_rounded_up() {
        let mut engine = engine_at_scale(1.0);
        let _ = engine.on_gesture_start(&GestureSample::pinch(300.0, 150.0));
        let _ = engine.on_gesture_move(&GestureSample::pinch(350.0, 150.0));
        engine.advance_ms(16);

        assert_eq!(engine.transform().scale, 1.125);
        assert_eq!(engine.render_transform().scale, "1.13");
    }

    #[test]
    fn test_bundled_replay_script() {
        let json = include_str!("../pinchable-replay/scripts/pinch_and_pan.json");
        let script = Script::from_json(json).unwrap();
        let report = replay::run(&script).unwrap();

        assert_eq!(report.pinch_starts(), 1);
        assert_eq!(report.pinch_stops(), 1);
        assert_eq!(report.final_transform.scale, "1.25");
        assert_eq!(report.final_transform.x, "-40.00");
        assert_eq!(report.final_transform.y, "-30.00");
    }
}
