//! Integration tests for PDF text extraction.

use std::io::Write;

use borme::{Borme, Error, ExtractOptions, LopdfTextSource, PageSelection, PageTextSource};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Text lines of each page, drawn top to bottom.
fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let pages = pages
        .iter()
        .map(|lines| {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                font(),
                Operation::new("Td", vec![Object::Integer(50), Object::Integer(800)]),
            ];
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    operations.push(Operation::new(
                        "Td",
                        vec![Object::Integer(0), Object::Integer(-12)],
                    ));
                }
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            }
            operations.push(Operation::new("ET", vec![]));
            operations
        })
        .collect();
    build_pdf_from_operations(pages)
}

fn font() -> Operation {
    Operation::new(
        "Tf",
        vec![Object::Name(b"F1".to_vec()), Object::Integer(10)],
    )
}

/// Text matrix placing the baseline at (x, y).
fn tm(x: i64, y: i64) -> Operation {
    Operation::new(
        "Tm",
        vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
            Object::Integer(x),
            Object::Integer(y),
        ],
    )
}

/// One content stream per page.
fn build_pdf_from_operations(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}

fn bulletin() -> Vec<u8> {
    build_pdf(&[
        &[
            "1 - ACME SL. Constitucion.",
            "Capital: 3000 euros.",
            "2 - BETA SA. Disolucion.",
        ],
        &["Continua en la pagina dos.", "3 - GAMMA SL. Ceses."],
    ])
}

#[test]
fn test_page_count_and_version() {
    let source = LopdfTextSource::from_bytes(&bulletin()).unwrap();
    assert_eq!(source.page_count(), 2);
    assert_eq!(source.version(), "1.5");
}

#[test]
fn test_line_moves_become_gaps() {
    let source = LopdfTextSource::from_bytes(&bulletin()).unwrap();
    let page = source.page_text(1).unwrap();

    assert_eq!(page.number, 1);
    assert!(
        page.text
            .starts_with("1 - ACME SL. Constitucion.  Capital: 3000 euros.  2 - BETA SA."),
        "{:?}",
        page.text
    );
}

#[test]
fn test_positioned_text_and_kerning() {
    let data = build_pdf_from_operations(vec![vec![
        Operation::new("BT", vec![]),
        font(),
        tm(50, 700),
        Operation::new("Tj", vec![Object::string_literal("1 - ACME SL.")]),
        tm(120, 700),
        Operation::new("Tj", vec![Object::string_literal("Constitucion.")]),
        tm(50, 688),
        Operation::new(
            "TJ",
            vec![Object::Array(vec![
                Object::string_literal("2 - BETA"),
                Object::Integer(-300),
                Object::string_literal("SA."),
                Object::Integer(-300),
                Object::string_literal("Dis"),
                Object::Integer(-50),
                Object::string_literal("olucion."),
            ])],
        ),
        Operation::new("ET", vec![]),
    ]]);

    let source = LopdfTextSource::from_bytes(&data).unwrap();
    let page = source.page_text(1).unwrap();
    assert!(
        page.text
            .starts_with("1 - ACME SL. Constitucion.  2 - BETA SA. Disolucion."),
        "{:?}",
        page.text
    );

    let report = Borme::new().parse_bytes(&data).unwrap();
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].entry.text, "ACME SL. Constitucion.");
    assert_eq!(report.entries[1].entry.text, "BETA SA. Disolucion.");
}

#[test]
fn test_page_out_of_range() {
    let source = LopdfTextSource::from_bytes(&bulletin()).unwrap();
    assert!(matches!(
        source.page_text(3),
        Err(Error::PageOutOfRange(3, 2))
    ));
}

#[test]
fn test_entries_from_pdf() {
    let report = Borme::new().parse_bytes(&bulletin()).unwrap();

    assert_eq!(report.stats.page_count, 2);
    assert_eq!(report.stats.entry_count, 3);
    assert_eq!(report.stats.incorporation_count, 1);

    let first = &report.entries[0];
    assert_eq!(first.entry.text, "ACME SL. Constitucion. Capital: 3000 euros.");
    let fields = first.incorporation.as_ref().unwrap();
    assert_eq!(fields.nombre.as_deref(), Some("ACME SL."));
    assert_eq!(fields.capital.as_deref(), Some("3000 euros"));

    assert_eq!(
        report.entries[1].entry.text,
        "BETA SA. Disolucion. Continua en la pagina dos."
    );
}

#[test]
fn test_page_selection() {
    let report = Borme::new()
        .with_pages(PageSelection::Pages(vec![2]))
        .parse_bytes(&bulletin())
        .unwrap();

    assert_eq!(report.stats.page_count, 1);
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].entry.id, "3");
}

#[test]
fn test_open_from_file() {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(&bulletin()).unwrap();

    let source =
        LopdfTextSource::open_with_options(file.path(), ExtractOptions::new().lenient()).unwrap();
    assert_eq!(source.page_texts().unwrap().len(), 2);

    let report = borme::parse_file(file.path()).unwrap();
    assert_eq!(report.stats.entry_count, 3);
}
