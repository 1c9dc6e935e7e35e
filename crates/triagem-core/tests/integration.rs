//! End-to-end tests for page classification against the builtin catalog and
//! for roster normalization.
//!
//! Pages are built in memory; the payload is an opaque marker that must come
//! back untouched. Rosters come from workbooks under `tests/fixtures/`.

use triagem_core::catalog::builtin::default_catalog;
use triagem_core::catalog::parse_catalog_str;
use triagem_core::classify::{Classification, ClassificationResult};
use triagem_core::error::TriagemError;
use triagem_core::model::PageRecord;
use triagem_core::{classify_json, classify_pages, normalize_schedule};

fn page(number: i64, text: &str) -> PageRecord {
    PageRecord {
        page_number: number,
        filename: format!("lote_{number}.pdf"),
        payload: format!("cGFnZS0{number}"),
        text: text.to_string(),
    }
}

fn sector(stamp: &str) -> Classification {
    Classification::Sector(stamp.to_string())
}

const ROSTER_PAGE: &str = "\
Nome                 Cargo        01  02  03
Maria Aparecida      Enfermeira   M   T   PSS
José Carlos Pereira  Técnico      N   N   CH";

// ---------------------------------------------------------------------------
// Order preservation
// ---------------------------------------------------------------------------
#[test]
fn empty_batch_yields_empty_result() {
    let catalog = default_catalog().unwrap();
    assert!(classify_pages(&[], &catalog).is_empty());
}

#[test]
fn results_mirror_input_order() {
    let catalog = default_catalog().unwrap();
    let pages = vec![
        page(10, "SETOR: PEDIATRIA"),
        page(3, ""),
        page(7, ROSTER_PAGE),
        page(1, "RETIFICAÇÃO"),
    ];

    let results = classify_pages(&pages, &catalog);

    assert_eq!(results.len(), pages.len());
    for (p, r) in pages.iter().zip(&results) {
        assert_eq!(p.page_number, r.page_number);
        assert_eq!(p.filename, r.filename);
        assert_eq!(p.payload, r.payload);
    }
}

// ---------------------------------------------------------------------------
// Header matching
// ---------------------------------------------------------------------------
#[test]
fn single_pattern_header_maps_to_its_stamp() {
    let catalog = default_catalog().unwrap();
    let cases = [
        ("SETOR: HEMODIÁLISE", "Hemodiálise"),
        ("Unidade/Setor: Centro Cirúrgico 2º andar", "Centro Cirúrgico"),
        ("setor - farmácia central", "Farmácia"),
        ("SETOR: EMERGÊNCIA ADULTO", "Pronto Socorro"),
    ];
    for (text, stamp) in cases {
        let results = classify_pages(&[page(1, text)], &catalog);
        assert_eq!(results[0].classification, sector(stamp), "text: {text}");
        assert_eq!(results[0].stamp.as_deref(), Some(stamp));
    }
}

#[test]
fn sector_words_containing_uti_keep_their_own_stamp() {
    let catalog = default_catalog().unwrap();
    let results = classify_pages(
        &[
            page(1, "SETOR: ASSISTÊNCIA FARMACÊUTICA"),
            page(2, "SETOR: RADIOLOGIA TERAPÊUTICA"),
            page(3, "SETOR: UTI GERAL"),
        ],
        &catalog,
    );

    let labels: Vec<&str> = results.iter().map(|r| r.classification.as_str()).collect();
    assert_eq!(labels, vec!["Farmácia", "Radiologia", "UTI Adulto"]);
}

#[test]
fn earlier_catalog_entry_wins_when_two_match() {
    let json = r#"{
        "name": "Ordem",
        "version": "1",
        "entries": [
            { "pattern": "CLÍNICA", "stamp": "Clínica" },
            { "pattern": "CLÍNICA MÉDICA", "stamp": "Clínica Médica" }
        ]
    }"#;
    let catalog = parse_catalog_str(json).unwrap();
    let results = classify_pages(&[page(1, "SETOR: CLÍNICA MÉDICA")], &catalog);
    assert_eq!(results[0].stamp.as_deref(), Some("Clínica"));

    let builtin = default_catalog().unwrap();
    let results = classify_pages(&[page(1, "SETOR: CLÍNICA MÉDICA")], &builtin);
    assert_eq!(results[0].stamp.as_deref(), Some("Clínica Médica"));
}

// ---------------------------------------------------------------------------
// Context carry-forward
// ---------------------------------------------------------------------------
#[test]
fn continuation_then_discard_keep_context() {
    let catalog = default_catalog().unwrap();
    let results = classify_pages(
        &[
            page(1, "SETOR: PARECER"),
            page(2, ROSTER_PAGE),
            page(3, "Documento sem informação relevante"),
        ],
        &catalog,
    );

    assert_eq!(results[0].classification, sector("Parecer"));
    assert_eq!(results[1].classification, sector("Parecer"));
    assert_eq!(results[1].stamp.as_deref(), Some("Parecer"));
    assert_eq!(results[2].classification, Classification::Discarded);
    assert_eq!(results[2].stamp.as_deref(), Some("Parecer"));
}

// ---------------------------------------------------------------------------
// Retroactive discard
// ---------------------------------------------------------------------------
#[test]
fn retraction_discards_previous_valid_page() {
    let catalog = default_catalog().unwrap();
    let results = classify_pages(
        &[
            page(1, "SETOR: PARECER"),
            page(2, "RETIFICAÇÃO DA ESCALA PUBLICADA"),
        ],
        &catalog,
    );

    assert_eq!(results[0].classification, Classification::Discarded);
    assert_eq!(results[0].stamp.as_deref(), Some("Parecer"));
    assert_eq!(results[1].classification, Classification::Retracted);
    assert_eq!(results[1].stamp.as_deref(), Some("Parecer"));
}

#[test]
fn retraction_reaches_past_discarded_pages() {
    let catalog = default_catalog().unwrap();
    let results = classify_pages(
        &[
            page(1, "SETOR: PARECER"),
            page(2, ROSTER_PAGE),
            page(3, ""),
            page(4, "alteração"),
        ],
        &catalog,
    );

    let labels: Vec<&str> = results.iter().map(|r| r.classification.as_str()).collect();
    assert_eq!(labels, vec!["Parecer", "descartada", "descartada", "retificada"]);
}

#[test]
fn lone_retraction_has_no_stamp_and_no_side_effect() {
    let catalog = default_catalog().unwrap();
    let results = classify_pages(&[page(1, "ALTERAÇÃO DE PLANTÃO")], &catalog);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].classification, Classification::Retracted);
    assert_eq!(results[0].stamp, None);
}

// ---------------------------------------------------------------------------
// Unrecognized header keeps context
// ---------------------------------------------------------------------------
#[test]
fn unknown_header_does_not_clear_context() {
    let catalog = default_catalog().unwrap();
    let results = classify_pages(
        &[
            page(1, "SETOR: PARECER"),
            page(2, "SETOR: SOME UNKNOWN SECTOR"),
            page(3, ROSTER_PAGE),
        ],
        &catalog,
    );

    assert_eq!(results[1].classification, Classification::PatternNotFound);
    assert_eq!(results[1].stamp, None);
    assert_eq!(results[2].classification, sector("Parecer"));
    assert_eq!(results[2].stamp.as_deref(), Some("Parecer"));
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------
#[test]
fn rerun_produces_identical_output() {
    let catalog = default_catalog().unwrap();
    let pages = vec![
        page(1, "SETOR: UTI NEONATAL"),
        page(2, ROSTER_PAGE),
        page(3, "RETIFICAÇÃO"),
        page(4, "SETOR: ???"),
        page(5, "nada"),
    ];

    let first = classify_pages(&pages, &catalog);
    let second = classify_pages(&pages, &catalog);
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------
#[test]
fn json_request_round_trips_through_classifier() {
    let catalog = default_catalog().unwrap();
    let request = br#"[
        { "pagina": 1, "arquivo": "a.pdf", "conteudo": "QUJD", "texto": "SETOR: PARECER" },
        { "pagina": 2, "arquivo": "a.pdf", "conteudo": "REVG", "texto": "" }
    ]"#;

    let results = classify_json(request, &catalog).unwrap();
    let value = serde_json::to_value(&results).unwrap();

    assert_eq!(value[0]["classificacao"], "Parecer");
    assert_eq!(value[0]["carimbo"], "Parecer");
    assert_eq!(value[0]["conteudo"], "QUJD");
    assert_eq!(value[1]["classificacao"], "descartada");
    assert_eq!(value[1]["carimbo"], "Parecer");

    let back: Vec<ClassificationResult> = serde_json::from_value(value).unwrap();
    assert_eq!(back, results);
}

#[test]
fn malformed_request_is_json_error() {
    let catalog = default_catalog().unwrap();
    let err = classify_json(b"{ not json", &catalog).unwrap_err();
    assert!(matches!(err, TriagemError::Json(_)));
}

// ---------------------------------------------------------------------------
// Schedule normalizer container check
// ---------------------------------------------------------------------------
#[test]
fn schedule_rejects_non_xlsx_input() {
    let err = normalize_schedule(b"%PDF-1.4 not a workbook").unwrap_err();
    assert!(matches!(err, TriagemError::InvalidWorkbook(_)));
}

// ---------------------------------------------------------------------------
// Schedule normalizer on a real workbook
// ---------------------------------------------------------------------------
/// Two sheets: "Escala" with its used range starting at B2 and the name and
/// role of Ana Lima merged over two rows, and a "Capa" cover sheet.
const ESCALA_ABRIL: &[u8] = include_bytes!("fixtures/escala_abril.xlsx");

#[test]
fn schedule_reads_offset_range_and_merged_name_cells() {
    let extraction = normalize_schedule(ESCALA_ABRIL).unwrap();

    let ana: Vec<_> = extraction
        .records
        .iter()
        .filter(|r| r.name == "Ana Lima")
        .collect();
    assert_eq!(ana.len(), 2);
    assert_eq!(ana.iter().map(|r| r.day).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(ana.iter().map(|r| r.shift.as_str()).collect::<Vec<_>>(), vec!["M", "T"]);
    for record in &ana {
        assert_eq!(record.role, "Enfermeira");
        assert_eq!(record.unit.as_deref(), Some("Central"));
        assert_eq!(record.sector.as_deref(), Some("UTI Adulto"));
        assert_eq!(record.month, Some(4));
        assert_eq!(record.year, Some(2024));
        assert_eq!(record.sheet, "Escala");
    }

    // Bruno Reis on both days; the legend row yields nothing
    assert_eq!(extraction.records.len(), 4);
    assert!(extraction.records.iter().all(|r| !r.name.starts_with("Legenda")));

    assert_eq!(extraction.skipped_sheets.len(), 1);
    assert_eq!(extraction.skipped_sheets[0].sheet, "Capa");
}
