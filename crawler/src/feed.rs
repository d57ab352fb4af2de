use crate::RawDocument;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One record of a JSON / JSONL document feed.
#[derive(Debug, Deserialize)]
struct FeedRecord {
    id: String,
    #[serde(default)]
    title: Option<String>,
    body: String,
}

impl From<FeedRecord> for RawDocument {
    fn from(r: FeedRecord) -> Self {
        RawDocument { id: r.id, title: r.title, text: r.body }
    }
}

/// Read one record per non-blank line.
pub fn read_jsonl(file: &Path) -> Result<Vec<RawDocument>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let mut out = Vec::new();
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", file.display()))?;
        if line.trim().is_empty() { continue; }
        let rec: FeedRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed record", file.display(), lineno + 1))?;
        out.push(rec.into());
    }
    Ok(out)
}

/// Read a single record object or an array of records.
pub fn read_json(file: &Path) -> Result<Vec<RawDocument>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    let records: Vec<FeedRecord> = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .with_context(|| format!("{}: malformed record", file.display()))?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)
            .with_context(|| format!("{}: malformed record", file.display()))?],
        _ => bail!("{}: expected an object or an array of objects", file.display()),
    };
    Ok(records.into_iter().map(RawDocument::from).collect())
}
