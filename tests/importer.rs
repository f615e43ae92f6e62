use std::io::Write;

use phrasefix::{corrector, importer::ImportError, init};

fn dict(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

#[test]
fn loads_dictionaries_into_tries() {
    let en = dict("en\tsome phrase\t1.0\nen\tbeach  bar\t2\n\nen\tcocktail\t3.5\n");
    let de = dict("de\tschön\t1\n");

    let tries = init::load_tries(&[en.path(), de.path()]).unwrap();
    assert_eq!(tries.languages(), vec!["de", "en"]);

    let trie = tries.get("en").unwrap();
    assert_eq!(trie.num_phrases(), 3);
    assert!(trie.lookup("beach bar").is_some());

    let out = corrector::correct(&tries, "beahc bar", "en", &[4, 9], 5);
    assert_eq!(out[0].text, "beach bar");
    assert_eq!(out[0].score, 2.0);
}

#[test]
fn lowercases_phrases() {
    let f = dict("de\tSchöne Grüße\t1\n");
    let tries = init::load_tries(&[f.path()]).unwrap();

    let trie = tries.get("de").unwrap();
    assert!(trie.lookup("schöne grüße").is_some());
    assert!(trie.lookup("Schöne").is_none());
}

#[test]
fn reports_the_file_and_line_of_bad_rows() {
    let f = dict("en\tsome phrase\t1\nen\tbroken\n");

    match init::load_tries(&[f.path()]) {
        Err(ImportError::Validation(msg)) => {
            assert!(msg.starts_with(&f.path().display().to_string()), "{}", msg);
            assert!(msg.contains("line 2"), "{}", msg);
        }
        r => panic!("expected validation error, got {:?}", r.map(|_| ())),
    }
}

#[test]
fn rejects_missing_files() {
    let r = init::load_tries(&["/nonexistent/phrasefix/dict.tsv"]);
    assert!(matches!(r, Err(ImportError::Io(_))));
}

#[test]
fn loads_nothing_without_dictionaries() {
    let paths: [&str; 0] = [];
    let tries = init::load_tries(&paths).unwrap();
    assert!(tries.is_empty());
}
