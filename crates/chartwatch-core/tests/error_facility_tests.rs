use chartwatch_core::errors::{ChartError, ExError, ExErrorKind};

#[test]
fn test_invalid_date_verifiable_by_kind() {
    let err = ChartError::InvalidDate {
        value: "2026/01/02".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidDate);
    assert_eq!(ex_err.code(), "ERR_INVALID_DATE");
    assert_eq!(ex_err.entity_id(), Some("2026/01/02"));
    assert!(ex_err.message().contains("YYYY-MM-DD"));
}

#[test]
fn test_invalid_rank_maps_to_invalid_input() {
    let err = ChartError::InvalidRank {
        title: "孤勇者".to_string(),
        rank: 3,
        expected: 2,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.entity_id(), Some("孤勇者"));
    assert!(ex_err.message().contains("expected 2"));
}

#[test]
fn test_nothing_extracted_distinct_from_not_found() {
    let ex_err: ExError = ChartError::NothingExtracted {
        strategies: vec!["data_index_rows", "text_lines"],
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::ExtractionFailed);
    assert_ne!(ex_err.kind(), ExErrorKind::NotFound);
    assert!(ex_err.message().contains("data_index_rows, text_lines"));
}

#[test]
fn test_builder_context_survives_display() {
    let err = ExError::new(ExErrorKind::ExternalService)
        .with_op("fetch_chart")
        .with_entity_id("https://example.com/chart")
        .with_message("HTTP 503");

    assert_eq!(err.op(), Some("fetch_chart"));
    assert_eq!(
        err.to_string(),
        "[ERR_EXTERNAL_SERVICE] in operation 'fetch_chart': HTTP 503 (https://example.com/chart)"
    );
}

#[test]
fn test_every_kind_has_distinct_code() {
    let kinds = [
        ExErrorKind::InvalidInput,
        ExErrorKind::InvalidDate,
        ExErrorKind::InvalidConfig,
        ExErrorKind::NotFound,
        ExErrorKind::ExtractionFailed,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
        ExErrorKind::Persistence,
        ExErrorKind::ExternalService,
        ExErrorKind::Timeout,
    ];
    let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}
