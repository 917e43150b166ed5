use super::*;

#[test]
fn keyword_classifier_three_states() {
    let c = KeywordClassifier::default();
    assert_eq!(c.classify("I am at peace"), Verdict::Pass);
    assert!(matches!(c.classify("I will never rest"), Verdict::Warn(_)));
    assert!(matches!(c.classify("Destroy everything"), Verdict::Block(_)));
    // Hard words win over soft words.
    assert!(matches!(c.classify("never hate"), Verdict::Block(_)));
}

#[test]
fn matching_is_whole_word_and_case_insensitive() {
    let c = KeywordClassifier::new(vec!["kill".into()], vec![]);
    assert_eq!(c.classify("skills and killjoys"), Verdict::Pass);
    assert!(matches!(c.classify("KILL."), Verdict::Block(_)));
}

#[test]
fn apostrophes_are_part_of_words() {
    let c = KeywordClassifier::default();
    assert!(matches!(c.classify("I can't"), Verdict::Warn(_)));
    assert!(matches!(c.classify("I can’t"), Verdict::Warn(_)));
    assert_eq!(c.classify("I can"), Verdict::Pass);
}

#[test]
fn allow_all_passes() {
    assert_eq!(AllowAll.classify("destroy"), Verdict::Pass);
}
