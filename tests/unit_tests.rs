// tests/unit_tests.rs
use burn_index::processing::evaluator::{MAX_INDEX, MIN_INDEX, TRANSPARENT};
use burn_index::processing::indices::{IndexCalculator, Nbr};
use burn_index::processing::ramp::{ColorStop, BURN_SCAR_STOPS};
use burn_index::utils::Color;
use burn_index::{setup, BandSample, ColorRamp, IndexEvaluator};

/// Helper function to build samples from parallel band values
fn create_samples(b08_values: &[f32], b12_values: &[f32], mask_values: &[u8]) -> Vec<BandSample> {
    b08_values
        .iter()
        .zip(b12_values)
        .zip(mask_values)
        .map(|((&b08, &b12), &data_mask)| BandSample::new(b08, b12, data_mask))
        .collect()
}

/// Test the burn-scar ramp at and between its control points
#[test]
fn test_ramp_reference_colors() {
    let ramp = ColorRamp::burn_scar();

    let test_cases = [
        // value, expected RGB
        (0.0, Color::new(20, 11, 52)),
        (0.25, Color::new(132, 32, 107)),
        (0.75, Color::new(229, 92, 48)),
        (1.0, Color::new(246, 215, 70)),
        (0.5, Color::new(181, 62, 78)), // midpoint of [0.25, 0.75]
    ];

    for (value, expected) in test_cases {
        assert_eq!(ramp.process(value), expected, "at {}", value);
    }
}

/// Interior values lie strictly between the bracketing stop colors
#[test]
fn test_ramp_interior_between_brackets() {
    let ramp = ColorRamp::burn_scar();
    let low = ramp.process(0.25);
    let mid = ramp.process(0.5);
    let high = ramp.process(0.75);

    assert!(low.r < mid.r && mid.r < high.r);
    assert!(low.g < mid.g && mid.g < high.g);
    assert!(low.b > mid.b && mid.b > high.b);
}

/// Each channel moves monotonically inside every segment
#[test]
fn test_ramp_monotonic_within_segments() {
    let ramp = ColorRamp::burn_scar();

    for pair in BURN_SCAR_STOPS.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let mut previous = ramp.process(lower.position);

        for step in 1..=64 {
            let value = lower.position + (upper.position - lower.position) * step as f32 / 64.0;
            let current = ramp.process(value);

            for (channel, (prev, curr)) in previous.to_array().iter().zip(current.to_array()).enumerate() {
                let (a, b) = (lower.color.to_array()[channel], upper.color.to_array()[channel]);
                if a <= b {
                    assert!(*prev <= curr, "channel {} decreased at {}", channel, value);
                } else {
                    assert!(*prev >= curr, "channel {} increased at {}", channel, value);
                }
            }
            previous = current;
        }
    }
}

/// Worked example: B08=0.6, B12=0.2 gives an index of 0.5
#[test]
fn test_evaluate_reference_pixel() {
    let evaluator = IndexEvaluator::default();
    let output = evaluator.evaluate(BandSample::new(0.6, 0.2, 1));

    // 0.4 / 0.8 = 0.5, the midpoint of the [0.25, 0.75] segment
    assert_eq!(output.index, 0.5);
    assert_eq!(output.default, [181, 62, 78, 1]);

    let color = evaluator.ramp().process(0.5);
    assert_eq!(output.default, [color.r, color.g, color.b, 1]);
}

/// Equal, nonzero bands give index 0 and the first stop color
#[test]
fn test_equal_bands_give_zero_index() {
    let evaluator = IndexEvaluator::default();

    for (value, data_mask) in [(0.1, 1), (3000.0, 1), (0.42, 0), (-0.2, 1)] {
        let output = evaluator.evaluate(BandSample::new(value, value, data_mask));
        assert_eq!(output.default, [20, 11, 52, data_mask]);
        if data_mask == 1 {
            assert_eq!(output.index, 0.0);
        }
    }
}

/// Zero denominators and out-of-range indices render transparent
#[test]
fn test_out_of_domain_pixels_are_transparent() {
    let evaluator = IndexEvaluator::default();
    let samples = create_samples(
        &[1.0, 0.0, 0.1, 5000.0, -0.5],
        &[-1.0, 0.0, 0.9, -1000.0, 0.25],
        &[1, 1, 1, 1, 1],
    );

    for sample in samples {
        let output = evaluator.evaluate(sample);
        let index = Nbr::default().compute(&sample);
        assert!(
            !index.is_finite() || !(MIN_INDEX..=MAX_INDEX).contains(&index),
            "sample {:?} unexpectedly in range",
            sample
        );
        assert_eq!(output.default, TRANSPARENT, "sample {:?}", sample);
    }
}

/// Masked pixels never carry a numeric value
#[test]
fn test_masked_pixels_have_no_data() {
    let evaluator = IndexEvaluator::default();
    let samples = create_samples(
        &[0.6, 1.0, 0.0, 0.2, 0.3],
        &[0.2, -1.0, 0.0, 0.6, 0.3],
        &[0, 0, 0, 0, 0],
    );

    for output in evaluator.evaluate_all(&samples) {
        assert!(output.index.is_nan());
        assert_eq!(output.default[3], 0);
    }
}

/// Same input, bit-identical output
#[test]
fn test_evaluation_is_idempotent() {
    let evaluator = IndexEvaluator::default();
    let samples = create_samples(&[0.6, 0.0, 1.0, 0.3], &[0.2, 0.0, -1.0, 0.1], &[1, 1, 0, 1]);

    for sample in samples {
        let first = evaluator.evaluate(sample);
        let second = evaluator.evaluate(sample);
        assert_eq!(first.default, second.default);
        assert_eq!(first.index.to_bits(), second.index.to_bits());
    }
}

/// Block output agrees with per-pixel evaluation on a larger tile
#[test]
fn test_block_evaluation_matches_pixels() {
    let evaluator = IndexEvaluator::default();
    let size = 64 * 64;

    let b08: Vec<f32> = (0..size).map(|i| 0.05 + (i % 97) as f32 / 100.0).collect();
    let b12: Vec<f32> = (0..size).map(|i| 0.05 + (i % 53) as f32 / 100.0).collect();
    let mask: Vec<u8> = (0..size).map(|i| (i % 7 != 0) as u8).collect();

    let block = evaluator.evaluate_block(&b08, &b12, &mask).unwrap();
    let pixels = evaluator.evaluate_all(&create_samples(&b08, &b12, &mask));

    assert_eq!(block.len(), size);
    for (i, pixel) in pixels.iter().enumerate() {
        assert_eq!(&block.rgba[i * 4..(i + 1) * 4], &pixel.rgba8());
        assert_eq!(block.rgba[i * 4 + 3], if pixel.default[3] == 1 { 255 } else { 0 });
        assert_eq!(block.index[i].to_bits(), pixel.index.to_bits());
    }
}

/// One evaluator can be shared across threads
#[test]
fn test_evaluator_shared_across_threads() {
    let evaluator = IndexEvaluator::default();
    let sample = BandSample::new(0.6, 0.2, 1);
    let expected = evaluator.evaluate(sample);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| evaluator.evaluate(sample)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().default, expected.default);
        }
    });
}

/// Custom ramps flow through the evaluator
#[test]
fn test_custom_ramp() {
    let ramp = ColorRamp::new(vec![
        ColorStop::packed(0.0, 0x000000),
        ColorStop::packed(0.5, 0xff0000),
        ColorStop::packed(1.0, 0xffffff),
    ])
    .unwrap();
    let evaluator = IndexEvaluator::new(ramp);

    let output = evaluator.evaluate(BandSample::new(0.75, 0.25, 1));
    assert_eq!(output.default, [255, 0, 0, 1]);
}

#[test]
fn test_setup_declaration() {
    let evaluator = IndexEvaluator::default();
    assert_eq!(evaluator.setup(), setup());
    assert_eq!(setup().input, vec!["B08", "B12", "dataMask"]);
}

#[test]
fn test_band_sample_uses_host_field_names() {
    let sample: BandSample = serde_json::from_str(r#"{ "B08": 0.6, "B12": 0.2, "dataMask": 1 }"#).unwrap();
    assert_eq!(sample, BandSample::new(0.6, 0.2, 1));
    assert!(serde_json::from_str::<BandSample>(r#"{ "B08": 0.6, "dataMask": 1 }"#).is_err());
}
