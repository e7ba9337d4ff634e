//! End-to-end matching and report tests on realistic draft text

use draftmatch_core::report::TextFormatter;
use draftmatch_core::{find_matches, render, Document, MatchConfig, Matcher};

const AGREEMENT: &str = "Die Parteien vereinbaren eine Verkürzung der Arbeitszeit auf 13 Wochen.";

fn render_text(a: &Document, b: &Document, config: &MatchConfig) -> String {
    let matcher = Matcher::new(a, b, config);
    let mut out = Vec::new();
    render(matcher.matches(), a, b, config, TextFormatter::new(&mut out)).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_identical_agreement_sentence() {
    let a = Document::from_text("entwurf_a.pdf", AGREEMENT);
    let b = Document::from_text("entwurf_b.pdf", AGREEMENT);

    let matches = find_matches(&a, &b, &MatchConfig::default());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].key, "der arbeitszeit auf 13 wochen.");
    assert_eq!(matches[0].chunk_a, "der Arbeitszeit auf 13 Wochen.");

    let report = render_text(&a, &b, &MatchConfig::default());
    assert!(report.starts_with(
        "=== Übereinstimmung 1 ===\nGefundener Übereinstimmender Text:\n>>> der Arbeitszeit auf 13 Wochen.\n"
    ));
    assert!(report.contains("Kontext aus 'entwurf_a.pdf':\n-------------------\n>>> Die Parteien"));
    assert!(report.contains("Kontext aus 'entwurf_b.pdf':"));
    assert!(report.ends_with("1 einzigartige Übereinstimmungen gefunden.\n"));
}

#[test]
fn test_umlaut_keys_per_mode() {
    let a = Document::from_text("a", AGREEMENT);
    let b = Document::from_text("b", AGREEMENT);

    let legacy = Matcher::new(&a, &b, &MatchConfig::default());
    assert!(legacy.index_a().contains("eine verkrzung der arbeitszeit auf"));

    let config = MatchConfig::builder().normalization("unicode").build().unwrap();
    let unicode = Matcher::new(&a, &b, &config);
    assert!(unicode.index_a().contains("eine verkurzung der arbeitszeit auf"));
    assert_eq!(unicode.matches().count(), 1);
}

#[test]
fn test_short_overlap_yields_nothing() {
    let a = Document::from_text("a", "A B C D E F.");
    let b = Document::from_text("b", "X B C D E Y.");
    assert!(find_matches(&a, &b, &MatchConfig::default()).is_empty());
}

#[test]
fn test_duplicate_sentence_is_not_reused() {
    let sentence = "Wir bauen die Bahn im ganzen Land weiter aus.";
    let a = Document::from_sentences("a", [sentence, sentence]);
    let b = Document::from_sentences("b", [sentence]);

    let matches = find_matches(&a, &b, &MatchConfig::default());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].sentence_a.index, 0);
    assert_eq!(matches[0].sentence_b.index, 0);
}

#[test]
fn test_empty_document_reports_none() {
    let a = Document::from_text("leer.pdf", "");
    let b = Document::from_text("b.pdf", AGREEMENT);
    assert!(a.is_empty());

    let report = render_text(&a, &b, &MatchConfig::default());
    assert_eq!(report, "Keine Übereinstimmungen gefunden.\n");
}

#[test]
fn test_layout_text_with_bullets() {
    let a = Document::from_text(
        "a",
        "Ziele der Regierung:\n• Wir senken die Lohnnebenkosten für kleine Betriebe.\n• Wir stärken den ländlichen Raum.",
    );
    let b = Document::from_text(
        "b",
        "Maßnahmen\n  1. wir senken die Lohnnebenkosten für alle Betriebe.\n",
    );

    let matches = find_matches(&a, &b, &MatchConfig::default());
    assert_eq!(matches.len(), 1);
    assert!(matches[0].sentence_a.text.contains("Lohnnebenkosten für kleine"));
    assert!(matches[0].sentence_b.text.contains("Lohnnebenkosten für alle"));
}

#[test]
fn test_context_width_is_configurable() {
    let a = Document::from_sentences(
        "a",
        [
            "Eins.",
            "Zwei.",
            "Drei.",
            "Wir fördern erneuerbare Energie in Gemeinden.",
            "Vier.",
        ],
    );
    let b = Document::from_sentences("b", ["Wir fördern erneuerbare Energie in Gemeinden."]);

    let narrow = MatchConfig::builder().context_sentences(1).build().unwrap();
    let report = render_text(&a, &b, &narrow);
    assert!(report.contains("    Drei.\n>>> Wir fördern"));
    assert!(!report.contains("Zwei."));

    let wide = render_text(&a, &b, &MatchConfig::default());
    assert!(wide.contains("    Zwei.\n    Drei.\n>>> Wir fördern"));
    assert!(!wide.contains("Eins."));
}

#[test]
fn test_runs_are_deterministic() {
    let text_a = "Wir senken die Steuern für Familien. Die Pflege wird ausgebaut und besser bezahlt. Wir bauen die Bahn weiter aus.";
    let text_b = "Die Pflege wird ausgebaut und besser bezahlt. Wir senken die Steuern für Familien deutlich.";
    let a = Document::from_text("a", text_a);
    let b = Document::from_text("b", text_b);
    let config = MatchConfig::default();

    let first = find_matches(&a, &b, &config);
    let second = find_matches(&a, &b, &config);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(render_text(&a, &b, &config), render_text(&a, &b, &config));
}
