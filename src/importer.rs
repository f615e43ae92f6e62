use std::{io::Read, path::Path};

use regex::Regex;

use crate::corrector::Tries;

const COL_COUNT: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("{0}")]
    Validation(String),
}

/// Dictionary row.
struct Entry {
    lang: String,   // 0
    phrase: String, // 1
    score: f64,     // 2
}

/// Import a tab separated dictionary file into the tries. Returns the number
/// of entries read.
pub fn import_file(file_path: &Path, tries: &mut Tries) -> Result<usize, ImportError> {
    log::info!("importing dictionary from {} ...", file_path.display());

    let file = std::fs::File::open(file_path)?;
    let n = import_reader(file, tries)?;

    log::info!("finished. imported {} entries from {}", n, file_path.display());
    Ok(n)
}

/// Import tab separated `language<TAB>phrase<TAB>score` lines. Blank lines
/// and rows without a language or phrase are skipped.
pub fn import_reader<R: Read>(reader: R, tries: &mut Tries) -> Result<usize, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let re_spaces = Regex::new(r"\s+")?;
    let mut n = 0;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(n as u64 + 1);

        if let Some(entry) = read_entry(&record, line, &re_spaces)? {
            tries.insert(&entry.lang, &entry.phrase, entry.score);
            n += 1;
        }
    }

    Ok(n)
}

fn read_entry(
    record: &csv::StringRecord,
    line: u64,
    re_spaces: &Regex,
) -> Result<Option<Entry>, ImportError> {
    if record.len() != COL_COUNT {
        return Err(ImportError::Validation(format!(
            "line {}: every line should have exactly {} columns. Found {}",
            line,
            COL_COUNT,
            record.len()
        )));
    }

    let get = |i: usize| clean_string(record.get(i).unwrap_or(""), re_spaces);

    let lang = get(0);
    let phrase = get(1);
    if lang.is_empty() || phrase.is_empty() {
        log::warn!("line {}: skipping entry with empty language or phrase", line);
        return Ok(None);
    }

    let raw = get(2);
    let score = raw.parse::<f64>().map_err(|e| {
        ImportError::Validation(format!(
            "line {}: invalid score '{}' at column 2: {}",
            line, raw, e
        ))
    })?;

    Ok(Some(Entry {
        lang,
        phrase,
        score,
    }))
}

fn clean_string(s: &str, re_spaces: &Regex) -> String {
    re_spaces.replace_all(s.trim(), " ").to_string()
}
