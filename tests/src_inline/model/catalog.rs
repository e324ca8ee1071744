use super::*;

fn class(code: &str) -> ClassInfo {
    ClassInfo {
        code: code.to_string(),
        label: code.to_uppercase(),
        description: String::new(),
        risk: RiskLevel::Low,
        action: String::new(),
    }
}

#[test]
fn test_ham10000_index_contract() {
    let catalog = ClassCatalog::ham10000();
    assert_eq!(
        catalog.codes(),
        vec!["akiec", "bcc", "bkl", "df", "mel", "nv", "vasc"]
    );
    assert_eq!(catalog.index_of("nv"), Some(5));
    assert_eq!(catalog.get(4).unwrap().label, "Melanoma");
    assert_eq!(catalog.get(4).unwrap().risk, RiskLevel::VeryHigh);
    assert!(catalog.get(7).is_none());
}

#[test]
fn test_catalog_rejects_duplicates() {
    let err = ClassCatalog::new(vec![class("a"), class("b"), class("a")]).unwrap_err();
    assert!(matches!(err, CalibrationError::InvalidParameter(_)));
}

#[test]
fn test_catalog_rejects_duplicate_or_empty_labels() {
    let mut twin = class("b");
    twin.label = "A".to_string();
    let err = ClassCatalog::new(vec![class("a"), twin]).unwrap_err();
    assert!(matches!(err, CalibrationError::InvalidParameter(_)));

    let mut blank = class("b");
    blank.label = "  ".to_string();
    assert!(matches!(
        ClassCatalog::new(vec![class("a"), blank]),
        Err(CalibrationError::InvalidParameter(_))
    ));

    let distinct = ClassCatalog::new(vec![class("a"), class("b")]).unwrap();
    assert_eq!(distinct.len(), 2);
}

#[test]
fn test_catalog_rejects_empty() {
    assert!(ClassCatalog::new(Vec::new()).is_err());
    assert!(ClassCatalog::new(vec![class(" ")]).is_err());
}

#[test]
fn test_risk_elevation() {
    assert!(RiskLevel::VeryHigh.is_elevated());
    assert!(RiskLevel::High.is_elevated());
    assert!(!RiskLevel::Moderate.is_elevated());
    assert_eq!(RiskLevel::VeryHigh.as_str(), "very_high");
}
