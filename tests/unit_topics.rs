// Unit tests for label normalization and topic matching.
//
// Tests the pure functions in isolation: normalize() properties, the
// built-in catalog's classifications, ordering behavior, and the fuzzy pass.

use std::sync::Arc;

use quizbridge::topics::catalog::{Catalog, TopicSignature};
use quizbridge::topics::matcher::{MatchKind, TopicMatcher};
use quizbridge::topics::normalize::normalize;
use quizbridge::topics::traits::TopicClassifier;

fn builtin_matcher() -> TopicMatcher {
    TopicMatcher::new(Arc::new(Catalog::builtin()))
}

// ============================================================
// normalize: properties
// ============================================================

#[test]
fn normalize_without_diacritics_is_trim_then_uppercase() {
    let inputs = [
        "union europea",
        "  Ley Carrera Militar  ",
        "OTAN - test 5",
        "\tmixed Case 123\n",
        "",
        "ley 39/2015, art. 21",
        "한국어",
        " 国际关系 ",
        "\u{212A}elvin",
        "\u{2126}hm",
        "ΑΘΗΝΑ και σπαρτη",
        "москва",
    ];
    for s in inputs {
        assert_eq!(normalize(s), s.trim().to_uppercase(), "input: {s:?}");
    }
}

#[test]
fn normalize_is_idempotent() {
    let inputs = [
        "Unión Europea",
        "  régimen jurídico del sector público ",
        "Tropa y Marinería",
        "Ejército del Aire",
        "ñandú",
        "a \u{0301}",
        "Ça va",
        "",
    ];
    for s in inputs {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "input: {s:?}");
    }
}

#[test]
fn normalize_spanish_letters() {
    assert_eq!(normalize("áéíóúñ"), "AEIOUN");
    assert_eq!(normalize("ÁÉÍÓÚÑ"), "AEIOUN");
    assert_eq!(normalize("Pingüino"), "PINGUINO");
}

// ============================================================
// Built-in catalog classifications
// ============================================================

#[test]
fn matches_union_europea_with_accent() {
    assert_eq!(
        builtin_matcher().extract_topic("Unión Europea"),
        Some("UNION EUROPEA".to_string())
    );
}

#[test]
fn matches_regimen_juridico() {
    assert_eq!(
        builtin_matcher().extract_topic("Régimen Jurídico del Sector Público"),
        Some("REGIMEN JURIDICO DEL SECTOR PUBLICO".to_string())
    );
}

#[test]
fn unrelated_text_is_no_match() {
    assert!(builtin_matcher()
        .classify("completely unrelated text")
        .is_none());
}

#[test]
fn historically_problematic_topics_are_detected() {
    let matcher = builtin_matcher();
    let cases = [
        ("OTAN", "ORGANIZACION DEL TRATADO DEL ATLANTICO NORTE (OTAN)"),
        ("UNION EUROPEA", "UNION EUROPEA"),
        (
            "PROCEDIMIENTO ADMINISTRATIVO COMÚN DE LAS ADMINISTRACIONES PÚBLICAS",
            "PROCEDIMIENTO ADMINISTRATIVO COMUN DE LAS ADMINISTRACIONES PUBLICAS",
        ),
        (
            "IGUALDAD EFECTIVA DE MUJERES Y HOMBRES",
            "IGUALDAD EFECTIVA DE MUJERES Y HOMBRES",
        ),
        (
            "RÉGIMEN DISCIPLINARIO DE LAS FUERZAS ARMADAS",
            "REGIMEN DISCIPLINARIO DE LAS FUERZAS ARMADAS",
        ),
        (
            "DERECHOS Y DEBERES DE LOS MIEMBROS DE LAS FAS",
            "DERECHOS Y DEBERES DE LOS MIEMBROS DE LAS FAS",
        ),
        ("LEY CARRERA MILITAR", "LEY CARRERA MILITAR"),
        ("MINISTERIO DE DEFENSA", "MINISTERIO DE DEFENSA"),
        ("ORGANIZACIÓN BÁSICA FAS", "ORGANIZACION BASICA FAS"),
        ("ORGANIZACIÓN BÁSICA ARMADA", "ORGANIZACION BASICA ARMADA"),
    ];
    for (label, expected) in cases {
        assert_eq!(
            matcher.extract_topic(label).as_deref(),
            Some(expected),
            "label: {label}"
        );
    }
}

#[test]
fn quiz_suffixes_do_not_prevent_detection() {
    let matcher = builtin_matcher();
    for label in ["OTAN - TEST 5", "OTAN - TEST 1", "OTAN - TEST ALEATORIO"] {
        assert_eq!(
            matcher.extract_topic(label).as_deref(),
            Some("ORGANIZACION DEL TRATADO DEL ATLANTICO NORTE (OTAN)"),
        );
    }
    assert_eq!(
        matcher
            .extract_topic("Tramitación iniciativas y quejas - Test 4")
            .as_deref(),
        Some("TRAMITACION INICIATIVAS Y QUEJAS")
    );
}

#[test]
fn armada_espanola_normalizes_the_enye() {
    assert_eq!(
        builtin_matcher()
            .extract_topic("La Armada Española hoy")
            .as_deref(),
        Some("ORGANIZACION BASICA ARMADA")
    );
}

#[test]
fn specific_fas_topics_precede_generic_one() {
    let matcher = builtin_matcher();
    assert_eq!(
        matcher
            .extract_topic("Organización básica de las FAS")
            .as_deref(),
        Some("ORGANIZACION BASICA FAS")
    );
    assert_eq!(
        matcher
            .extract_topic("Organización de las FAS - repaso")
            .as_deref(),
        Some("ORGANIZACION DE LAS FAS")
    );
}

#[test]
fn observatorio_yields_to_earlier_military_topics() {
    assert_eq!(
        builtin_matcher()
            .extract_topic("Observatorio militar y carrera militar")
            .as_deref(),
        Some("LEY CARRERA MILITAR")
    );
    assert_eq!(
        builtin_matcher()
            .extract_topic("Observatorio Militar para la Igualdad - Test 1")
            .as_deref(),
        Some("OBSERVATORIO MILITAR PARA LA IGUALDAD")
    );
}

// ============================================================
// Ordering with custom catalogs
// ============================================================

#[test]
fn catalog_order_decides_between_overlapping_signatures() {
    let label = "Organización de las FAS";

    let specific_first = Catalog::new(vec![
        TopicSignature::new("ORGANIZACION DE LAS FAS", &["ORGANIZACION DE LAS FAS"]),
        TopicSignature::new("ORGANIZACION", &["ORGANIZACION"]),
    ])
    .unwrap();
    let general_first = Catalog::new(vec![
        TopicSignature::new("ORGANIZACION", &["ORGANIZACION"]),
        TopicSignature::new("ORGANIZACION DE LAS FAS", &["ORGANIZACION DE LAS FAS"]),
    ])
    .unwrap();

    assert_eq!(
        TopicMatcher::new(Arc::new(specific_first))
            .extract_topic(label)
            .as_deref(),
        Some("ORGANIZACION DE LAS FAS")
    );
    assert_eq!(
        TopicMatcher::new(Arc::new(general_first))
            .extract_topic(label)
            .as_deref(),
        Some("ORGANIZACION")
    );
}

#[test]
fn json_catalog_with_accented_patterns() {
    let catalog = Catalog::from_json(
        r#"{"topics": [{"name": "EJERCITO DE TIERRA", "patterns": ["ejército de tierra"]}]}"#,
    )
    .unwrap();
    let matcher = TopicMatcher::new(Arc::new(catalog));
    assert_eq!(
        matcher.extract_topic("EJERCITO DE TIERRA: test").as_deref(),
        Some("EJERCITO DE TIERRA")
    );
}

#[test]
fn json_catalog_names_become_normalized_keys() {
    let catalog = Catalog::from_json(
        r#"{"topics": [{"name": "Unión Europea", "patterns": ["union europea"]}]}"#,
    )
    .unwrap();
    assert_eq!(catalog.signatures()[0].name, "UNION EUROPEA");

    let matcher = TopicMatcher::new(Arc::new(catalog));
    assert_eq!(
        matcher.extract_topic("La Unión Europea").as_deref(),
        Some("UNION EUROPEA")
    );
}

// ============================================================
// Fuzzy fallback
// ============================================================

#[test]
fn fuzzy_is_off_by_default() {
    assert!(builtin_matcher().classify("Union Europa").is_none());
}

#[test]
fn fuzzy_recovers_single_letter_typos() {
    let found = builtin_matcher()
        .with_fuzzy(true)
        .classify("Union Europa")
        .unwrap();
    assert_eq!(found.topic, "UNION EUROPEA");
    assert_eq!(found.kind, MatchKind::Fuzzy);
}

#[test]
fn fuzzy_still_rejects_unrelated_text() {
    assert!(builtin_matcher()
        .with_fuzzy(true)
        .classify("completely unrelated text")
        .is_none());
}
