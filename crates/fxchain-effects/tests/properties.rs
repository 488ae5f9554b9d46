//! Property-based tests for the reference stages.
//!
//! Uses proptest to verify that every stage keeps its invariants for random
//! valid parameters: finite output, bounded output, documented length.

use fxchain_core::SampleBuffer;
use fxchain_effects::{
    BufferStage, DelayParams, DistortionParams, LowpassParams, Pipeline, Stage, StageList,
};
use proptest::prelude::*;

fn buffer(samples: Vec<f32>, sample_rate: u32) -> SampleBuffer {
    SampleBuffer::new(samples, sample_rate).unwrap()
}

fn any_stage() -> impl Strategy<Value = Stage> {
    prop_oneof![
        (0.0f32..50.0, 0.01f32..2.0).prop_map(|(g, t)| Stage::from(DistortionParams::new(g, t))),
        (0.0f32..0.05, 0.0f32..0.99).prop_map(|(s, d)| Stage::from(DelayParams::new(s, d))),
        (1.0f32..40000.0, any::<bool>())
            .prop_map(|(c, seed)| Stage::from(LowpassParams::new(c).with_seed_first_sample(seed))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every stage produces finite output bounded by 1.0 for canonical input.
    #[test]
    fn stages_finite_and_bounded(
        input in prop::collection::vec(-1.0f32..=1.0f32, 0..512),
        stage in any_stage(),
        sample_rate in prop::sample::select(vec![8000u32, 22050, 44100, 48000]),
    ) {
        let out = stage.apply(buffer(input, sample_rate)).unwrap();
        for &s in out.samples() {
            prop_assert!(s.is_finite(), "{:?} produced {}", stage, s);
            prop_assert!(s.abs() <= 1.0 + 1e-5, "{:?} produced {}", stage, s);
        }
    }

    /// Delay output is exactly `len + floor(sr * delay)` samples long.
    #[test]
    fn delay_length_law(
        input in prop::collection::vec(-1.0f32..=1.0f32, 0..256),
        delay_seconds in 0.0f32..0.1,
        decay in 0.0f32..0.99,
    ) {
        let params = DelayParams::new(delay_seconds, decay);
        let expected = input.len() + params.delay_samples(44100);
        let out = params.apply(buffer(input, 44100)).unwrap();
        prop_assert_eq!(out.len(), expected);
    }

    /// Distortion with unity gain and a threshold above the peak only normalizes.
    #[test]
    fn unity_distortion_only_normalizes(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..256),
    ) {
        let normalized = buffer(input.clone(), 44100).normalized();
        let out = DistortionParams::new(1.0, 1.0).apply(buffer(input, 44100)).unwrap();
        for (a, b) in out.samples().iter().zip(normalized.samples()) {
            prop_assert!((a - b).abs() < 1e-6);
        }
    }

    /// The lowpass never changes length and never reports a first sample
    /// other than zero unless seeded.
    #[test]
    fn lowpass_first_sample(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..256),
        cutoff in 1.0f32..20000.0,
    ) {
        let len = input.len();
        let out = LowpassParams::new(cutoff).apply(buffer(input, 44100)).unwrap();
        prop_assert_eq!(out.len(), len);
        prop_assert_eq!(out.samples()[0], 0.0);
    }

    /// Any list of valid stages runs to completion and keeps the sample rate.
    #[test]
    fn random_pipelines_complete(
        input in prop::collection::vec(-1.0f32..=1.0f32, 0..256),
        stages in prop::collection::vec(any_stage(), 0..5),
    ) {
        let list: StageList = stages.into_iter().collect();
        let out = Pipeline::new(list).process(buffer(input, 22050)).unwrap();
        prop_assert_eq!(out.sample_rate(), 22050);
        prop_assert!(out.samples().iter().all(|s| s.is_finite()));
    }
}
