// Integration tests for supplier-match
use std::io::Write;
use supplier_match::prelude::*;
use supplier_match::{io, Error};
use tempfile::NamedTempFile;

const CATALOG: &str = "\
Id,SupplierName,City
101,Acme Corp,Springfield
102,Globex Industries,Cypress Creek
103,Initech Software Ltd,Austin
104,Smith & Sons Hardware,Leeds
105,Umbrella Pharmaceuticals,Raccoon City
";

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn invoice_lines(words: &[(u32, u32, u32, &str)]) -> String {
    words
        .iter()
        .map(|(page, line, pos, word)| {
            format!("{{'page_id': {page}, 'line_id': {line}, 'pos_id': {pos}, 'word': '{word}'}}\n")
        })
        .collect()
}

fn fitted(config: MatchConfig) -> FittedResolver {
    let catalog = write_file(CATALOG);
    Resolver::new(config)
        .unwrap()
        .load_catalog(read_catalog(catalog.path()).unwrap())
        .fit()
        .unwrap()
}

#[test]
fn test_end_to_end_from_files() {
    let invoice = write_file(&invoice_lines(&[
        (1, 1, 1, "INVOICE"),
        (1, 1, 2, "#4471"),
        (1, 2, 1, "Initech"),
        (1, 2, 2, "Software"),
        (1, 2, 3, "Ltd"),
        (1, 3, 1, "www.initech.com"),
        (1, 4, 1, "Total"),
        (1, 4, 2, "$1,250.00"),
    ]));

    let resolver = fitted(MatchConfig::default());
    let words = read_invoice(invoice.path()).unwrap();
    let resolution = resolver.resolve_words(&words).unwrap();

    assert_eq!(resolution.result.supplier_id, "103");
    assert_eq!(
        resolution.result.to_string(),
        "(103, 'Initech Software Ltd')"
    );
}

#[test]
fn test_out_of_order_words_are_sorted() {
    let invoice = write_file(&invoice_lines(&[
        (1, 2, 1, "Hardware"),
        (1, 1, 3, "Sons"),
        (1, 1, 1, "Smith"),
        (1, 1, 2, "&"),
    ]));
    let words = read_invoice(invoice.path()).unwrap();
    assert_eq!(reconstruct_text(&words), "Smith & Sons Hardware");

    let resolution = fitted(MatchConfig::default())
        .resolve_words(&words)
        .unwrap();
    assert_eq!(resolution.result.supplier_id, "104");
}

#[test]
fn test_identity_match_both_policies() {
    for policy in [Policy::CharNgram, Policy::WordNgram] {
        let resolver = fitted(MatchConfig::for_policy(policy));
        for record in resolver.catalog().records() {
            let resolution = resolver.resolve(&record.name).unwrap();
            assert_eq!(resolution.result.supplier_id, record.id, "{policy:?}");
        }
    }
}

#[test]
fn test_word_policy_ignores_stop_words_and_plurals() {
    let resolver = fitted(MatchConfig::for_policy(Policy::WordNgram));
    let resolution = resolver
        .resolve("Invoice from the Umbrella Pharmaceutical company")
        .unwrap();
    assert_eq!(resolution.result.supplier_id, "105");
    assert_eq!(resolution.fragments, 1);
}

#[test]
fn test_repeated_resolves_reuse_fitted_space() {
    let resolver = fitted(MatchConfig::default());
    let dim = resolver.space().dim();

    let first = resolver.resolve("acme corp springfield").unwrap();
    let unknown = resolver.resolve("qwxz vbnm").unwrap();
    let again = resolver.resolve("acme corp springfield").unwrap();

    assert_eq!(first, again);
    assert_eq!(resolver.space().dim(), dim);
    assert!(resolver
        .catalog()
        .records()
        .iter()
        .any(|r| r.id == unknown.result.supplier_id));
}

#[test]
fn test_empty_catalog_file() {
    let catalog = write_file("Id,SupplierName\n");
    let result = Resolver::new(MatchConfig::default())
        .unwrap()
        .load_catalog(read_catalog(catalog.path()).unwrap())
        .fit();
    assert!(matches!(result, Err(Error::EmptyCatalog)));
}

#[test]
fn test_missing_catalog_column() {
    let catalog = write_file("Id,Supplier\n1,Acme\n");
    assert!(matches!(
        read_catalog(catalog.path()),
        Err(io::Error::MissingColumn("SupplierName"))
    ));
}

#[test]
fn test_malformed_invoice() {
    let invoice = write_file("{'page_id': 1, 'line_id': 1, 'pos_id': 1, 'word': 'Acme'}\nnot a record\n");
    assert!(matches!(
        read_invoice(invoice.path()),
        Err(io::Error::MalformedInvoice { line: 2, .. })
    ));
}

#[test]
fn test_invoice_of_noise_is_empty_query() {
    let invoice = write_file(&invoice_lines(&[(1, 1, 1, "$12.50"), (1, 1, 2, "01/02/2021")]));
    let words = read_invoice(invoice.path()).unwrap();
    assert!(matches!(
        fitted(MatchConfig::default()).resolve_words(&words),
        Err(Error::EmptyQuery)
    ));
}

#[test]
fn test_config_from_json_drives_resolver() {
    let config = MatchConfig::from_json(r#"{"policy": "word_ngram", "distance": "cosine"}"#).unwrap();
    let resolver = fitted(config);
    assert_eq!(resolver.config().analyzer_range(), (1, 4));
    let resolution = resolver.resolve("GLOBEX INDUSTRIES INC").unwrap();
    assert_eq!(resolution.result.supplier_id, "102");
}
