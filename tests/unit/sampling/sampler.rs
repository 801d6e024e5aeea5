use proptest::prelude::*;

use super::*;

fn sampler(num: (i64, i64), len: (i64, i64), fonts: usize) -> ParameterSampler {
    ParameterSampler::new(
        DiscreteParam::Uniform(num.0, num.1),
        DiscreteParam::Uniform(len.0, len.1),
        ContinuousParam::Uniform(0.5, 0.9),
        fonts,
        &SymbolAlphabet::default(),
    )
    .unwrap()
}

#[test]
fn draw_order_is_counts_lengths_fonts_intensities_characters() {
    let s = sampler((1, 3), (1, 2), 5);
    let params = s.draw(2, &mut RandomStream::from_seed(42)).unwrap();

    let mut manual = RandomStream::from_seed(42);
    let counts: Vec<i64> = (0..2).map(|_| manual.int_inclusive(1, 3)).collect();
    let lengths: Vec<i64> = (0..6).map(|_| manual.int_inclusive(1, 2)).collect();
    let fonts: Vec<i64> = (0..6).map(|_| manual.int_inclusive(0, 4)).collect();
    let intensities: Vec<f64> = (0..6).map(|_| manual.uniform_f64(0.5, 0.9)).collect();
    let chars: Vec<i64> = (0..12).map(|_| manual.int_inclusive(0, 61)).collect();

    for i in 0..2 {
        assert_eq!(params.num_overlays(i) as i64, counts[i]);
        for j in 0..3 {
            assert_eq!(params.length(i, j) as i64, lengths[i * 3 + j]);
            assert_eq!(params.font_id(i, j) as i64, fonts[i * 3 + j]);
            assert_eq!(params.intensity(i, j), intensities[i * 3 + j]);
            for k in 0..2 {
                assert_eq!(params.char_id(i, j, k) as i64, chars[(i * 3 + j) * 2 + k]);
            }
        }
    }
}

#[test]
fn overlay_plans_follow_sampled_slots() {
    let s = sampler((2, 2), (3, 3), 1);
    let params = s.draw(1, &mut RandomStream::from_seed(7)).unwrap();
    let plans = params.overlay_plans(0, &SymbolAlphabet::default()).unwrap();
    assert_eq!(plans.len(), 2);
    for (j, plan) in plans.iter().enumerate() {
        assert_eq!(plan.font_id, 0);
        assert_eq!(plan.symbols.chars().count(), 3);
        assert_eq!(plan.intensity, params.intensity(0, j));
    }
}

#[test]
fn zero_overlays_yield_no_plans() {
    let s = sampler((0, 0), (1, 2), 3);
    let params = s.draw(4, &mut RandomStream::from_seed(1)).unwrap();
    for i in 0..4 {
        assert!(params.overlay_plans(i, &SymbolAlphabet::default()).unwrap().is_empty());
    }
}

#[test]
fn construction_rejects_empty_catalog_and_bad_ranges() {
    let alphabet = SymbolAlphabet::default();
    let intensity = ContinuousParam::Uniform(0.5, 0.9);
    assert!(matches!(
        ParameterSampler::new(
            DiscreteParam::Uniform(1, 2),
            DiscreteParam::Uniform(1, 2),
            intensity.clone(),
            0,
            &alphabet
        ),
        Err(OverlayError::Configuration(_))
    ));
    assert!(
        ParameterSampler::new(
            DiscreteParam::Uniform(1, 2),
            DiscreteParam::Uniform(0, 2),
            intensity.clone(),
            1,
            &alphabet
        )
        .is_err()
    );
    assert!(
        ParameterSampler::new(
            DiscreteParam::Uniform(3, 2),
            DiscreteParam::Uniform(1, 2),
            intensity,
            1,
            &alphabet
        )
        .is_err()
    );
}

#[test]
fn oversized_count_and_length_ranges_are_rejected_up_front() {
    let alphabet = SymbolAlphabet::default();
    let intensity = ContinuousParam::Uniform(0.5, 0.9);
    assert!(matches!(
        ParameterSampler::new(
            DiscreteParam::Uniform(0, i64::MAX / 2),
            DiscreteParam::Uniform(1, 2),
            intensity.clone(),
            1,
            &alphabet
        ),
        Err(OverlayError::Configuration(_))
    ));
    assert!(matches!(
        ParameterSampler::new(
            DiscreteParam::Uniform(1, 2),
            DiscreteParam::Choice {
                choice: vec![1, MAX_SYMBOLS_PER_OVERLAY + 1]
            },
            intensity.clone(),
            1,
            &alphabet
        ),
        Err(OverlayError::Configuration(_))
    ));
    ParameterSampler::new(
        DiscreteParam::Constant(MAX_OVERLAYS_PER_IMAGE),
        DiscreteParam::Constant(MAX_SYMBOLS_PER_OVERLAY),
        intensity,
        1,
        &alphabet,
    )
    .unwrap();
}

#[test]
fn slot_overflow_is_an_error_not_a_panic() {
    let s = sampler((1, 2), (1, 2), 1);
    let mut stream = RandomStream::from_seed(0);
    assert!(matches!(
        s.draw(usize::MAX, &mut stream),
        Err(OverlayError::Input(_))
    ));
}

proptest! {
    #[test]
    fn sampled_values_stay_in_configured_ranges(
        seed in any::<u64>(),
        batch in 1usize..6,
        num_lo in 0i64..3,
        num_span in 0i64..3,
        len_lo in 1i64..4,
        len_span in 0i64..3,
        fonts in 1usize..9,
    ) {
        let s = sampler((num_lo, num_lo + num_span), (len_lo, len_lo + len_span), fonts);
        let p = s.draw(batch, &mut RandomStream::from_seed(seed)).unwrap();
        let alphabet = SymbolAlphabet::default();
        for i in 0..batch {
            let n = p.num_overlays(i) as i64;
            prop_assert!(n >= num_lo && n <= num_lo + num_span);
            for j in 0..p.max_overlays() {
                let l = p.length(i, j) as i64;
                prop_assert!(l >= len_lo && l <= len_lo + len_span);
                prop_assert!(p.font_id(i, j) < fonts);
                let v = p.intensity(i, j);
                prop_assert!((0.5..=0.9).contains(&v));
                for k in 0..p.max_length() {
                    prop_assert!(p.char_id(i, j, k) < alphabet.len());
                }
            }
        }
    }
}
