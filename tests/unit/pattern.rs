use super::*;

#[test]
fn generate_is_deterministic() {
    let a = Pattern::generate("I am at peace", EngineFeatures::default()).unwrap();
    let b = Pattern::generate("I am at peace", EngineFeatures::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.points.len(), a.params.point_count);
    assert_eq!(
        a.params.point_count,
        8 + usize::from(a.digest.as_bytes()[0] % 8)
    );
}

#[test]
fn empty_and_whitespace_are_rejected() {
    for text in ["", " ", "\n\t  "] {
        assert!(matches!(
            Pattern::generate(text, EngineFeatures::default()),
            Err(MandalaError::EmptyInput)
        ));
    }
}

#[test]
fn whitespace_is_significant() {
    let a = Pattern::generate("peace", EngineFeatures::default()).unwrap();
    let b = Pattern::generate("peace ", EngineFeatures::default()).unwrap();
    assert_ne!(a.digest, b.digest);
}

#[test]
fn long_input_is_accepted() {
    let text = vec!["word"; 200].join(" ");
    let p = Pattern::generate(&text, EngineFeatures::cosmic()).unwrap();
    assert_eq!(p.text, text);
}

#[test]
fn features_do_not_change_derivation() {
    let a = Pattern::generate("same", EngineFeatures::flat()).unwrap();
    let b = a.clone().with_features(EngineFeatures::cosmic());
    assert_eq!(a.params, b.params);
    assert_eq!(a.points, b.points);
    assert_ne!(a.features, b.features);
}
