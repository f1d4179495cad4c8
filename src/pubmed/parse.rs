use crate::pubmed::structure::{Article, Author, DateParts, JournalPubDate, PubmedRecord};
use crate::{PaperError, Result};
use itertools::Itertools;
use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::io::BufRead;

/// Decode an `efetch` XML document (`PubmedArticleSet`) into its `PubmedArticle` records.
///
/// Elements that are not needed are skipped wholesale; missing elements leave the
/// corresponding field empty. Only malformed XML or an NCBI `ERROR` element fails.
pub(crate) fn parse_pubmed_xml(content: &str) -> Result<Vec<PubmedRecord>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_str(content);
    let mut records = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let name = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => e.name().as_ref().to_vec(),
            Event::Eof => break,
            _ => continue,
        };
        match name.as_slice() {
            b"PubmedArticle" => records.push(parse_article_record(&mut reader, &mut buf)?),
            b"ERROR" => {
                let message = extract_text(&mut reader, &mut buf, b"ERROR")?;
                return Err(PaperError::InvalidResponse(format!(
                    "efetch returned an error: {}",
                    message.unwrap_or_default()
                )));
            }
            // Containers such as PubmedArticleSet are descended into.
            _ => (),
        }
    }

    Ok(records)
}

/// Returns the name of the next child element of `parent`, or `None` once the
/// closing tag of `parent` is reached. Self-closing children carry no data and are passed over.
fn next_child<B: BufRead>(
    reader: &mut Reader<B>,
    buf: &mut Vec<u8>,
    parent: &[u8],
) -> Result<Option<Vec<u8>>> {
    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(e) => return Ok(Some(e.name().as_ref().to_vec())),
            Event::End(e) if e.name().as_ref() == parent => return Ok(None),
            Event::Eof => return Err(unexpected_eof(parent)),
            _ => continue,
        }
    }
}

/// Consume everything up to and including the closing tag of `name`.
fn skip<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>, name: &[u8]) -> Result<()> {
    buf.clear();
    reader.read_to_end_into(QName(name), buf)?;
    Ok(())
}

/// Extracts text content until the closing tag is found, flattening inline
/// markup such as `<i>` or `<sup>`. Only surrounding whitespace is trimmed.
fn extract_text<B: BufRead>(
    reader: &mut Reader<B>,
    buf: &mut Vec<u8>,
    closing_tag: &[u8],
) -> Result<Option<String>> {
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Text(e) => {
                let unescaped = e
                    .unescape()
                    .map_err(|e| PaperError::InvalidResponse(format!("Invalid XML text: {e}")))?;
                text.push_str(&unescaped);
            }
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
            Event::Start(e) if e.name().as_ref() == closing_tag => depth += 1,
            Event::End(e) if e.name().as_ref() == closing_tag => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Eof => return Err(unexpected_eof(closing_tag)),
            _ => continue,
        }
    }

    let text = text.trim();
    Ok(if text.is_empty() { None } else { Some(text.to_string()) })
}

fn unexpected_eof(tag: &[u8]) -> PaperError {
    PaperError::InvalidResponse(format!(
        "Unexpected EOF while looking for closing tag '{}'",
        String::from_utf8_lossy(tag)
    ))
}

fn parse_article_record<B: BufRead>(
    reader: &mut Reader<B>,
    buf: &mut Vec<u8>,
) -> Result<PubmedRecord> {
    let mut record = PubmedRecord::default();
    while let Some(name) = next_child(reader, buf, b"PubmedArticle")? {
        match name.as_slice() {
            b"MedlineCitation" => parse_medline_citation(reader, buf, &mut record)?,
            _ => skip(reader, buf, &name)?,
        }
    }
    Ok(record)
}

fn parse_medline_citation<B: BufRead>(
    reader: &mut Reader<B>,
    buf: &mut Vec<u8>,
    record: &mut PubmedRecord,
) -> Result<()> {
    while let Some(name) = next_child(reader, buf, b"MedlineCitation")? {
        match name.as_slice() {
            b"PMID" => record.pmid = extract_text(reader, buf, b"PMID")?,
            b"Article" => record.article = Some(parse_article(reader, buf)?),
            b"DateCreated" => {
                record.date_created = Some(parse_date_parts(reader, buf, b"DateCreated")?)
            }
            _ => skip(reader, buf, &name)?,
        }
    }
    Ok(())
}

fn parse_article<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Article> {
    let mut article = Article::default();
    while let Some(name) = next_child(reader, buf, b"Article")? {
        match name.as_slice() {
            b"ArticleTitle" => {
                article.title = extract_text(reader, buf, b"ArticleTitle")?
                    .map(|title| title.split_whitespace().join(" "))
            }
            b"Journal" => article.journal_pub_date = parse_journal(reader, buf)?,
            b"AuthorList" => article.authors = Some(parse_author_list(reader, buf)?),
            b"ArticleDate" => article
                .article_dates
                .push(parse_date_parts(reader, buf, b"ArticleDate")?),
            _ => skip(reader, buf, &name)?,
        }
    }
    Ok(article)
}

/// Digs `JournalIssue/PubDate` out of a `Journal` element.
fn parse_journal<B: BufRead>(
    reader: &mut Reader<B>,
    buf: &mut Vec<u8>,
) -> Result<Option<JournalPubDate>> {
    let mut pub_date = None;
    while let Some(name) = next_child(reader, buf, b"Journal")? {
        if name.as_slice() != b"JournalIssue" {
            skip(reader, buf, &name)?;
            continue;
        }
        while let Some(inner) = next_child(reader, buf, b"JournalIssue")? {
            match inner.as_slice() {
                b"PubDate" => pub_date = Some(parse_pub_date(reader, buf)?),
                _ => skip(reader, buf, &inner)?,
            }
        }
    }
    Ok(pub_date)
}

fn parse_pub_date<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<JournalPubDate> {
    let mut date = JournalPubDate::default();
    while let Some(name) = next_child(reader, buf, b"PubDate")? {
        match name.as_slice() {
            b"Year" => date.year = extract_text(reader, buf, b"Year")?,
            b"Month" => date.month = extract_text(reader, buf, b"Month")?,
            b"Day" => date.day = extract_text(reader, buf, b"Day")?,
            b"MedlineDate" => date.medline_date = extract_text(reader, buf, b"MedlineDate")?,
            _ => skip(reader, buf, &name)?,
        }
    }
    Ok(date)
}

fn parse_date_parts<B: BufRead>(
    reader: &mut Reader<B>,
    buf: &mut Vec<u8>,
    parent: &[u8],
) -> Result<DateParts> {
    let mut date = DateParts::default();
    while let Some(name) = next_child(reader, buf, parent)? {
        match name.as_slice() {
            b"Year" => date.year = extract_text(reader, buf, b"Year")?,
            b"Month" => date.month = extract_text(reader, buf, b"Month")?,
            b"Day" => date.day = extract_text(reader, buf, b"Day")?,
            _ => skip(reader, buf, &name)?,
        }
    }
    Ok(date)
}

fn parse_author_list<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Vec<Author>> {
    let mut authors = Vec::new();
    while let Some(name) = next_child(reader, buf, b"AuthorList")? {
        match name.as_slice() {
            b"Author" => authors.push(parse_author(reader, buf)?),
            _ => skip(reader, buf, &name)?,
        }
    }
    Ok(authors)
}

fn parse_author<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Author> {
    let mut author = Author::default();
    while let Some(name) = next_child(reader, buf, b"Author")? {
        match name.as_slice() {
            b"LastName" => author.last_name = extract_text(reader, buf, b"LastName")?,
            b"ForeName" => author.fore_name = extract_text(reader, buf, b"ForeName")?,
            b"Identifier" => author
                .identifiers
                .extend(extract_text(reader, buf, b"Identifier")?),
            b"AffiliationInfo" => {
                while let Some(inner) = next_child(reader, buf, b"AffiliationInfo")? {
                    match inner.as_slice() {
                        b"Affiliation" => author
                            .affiliations
                            .extend(extract_text(reader, buf, b"Affiliation")?),
                        _ => skip(reader, buf, &inner)?,
                    }
                }
            }
            _ => skip(reader, buf, &name)?,
        }
    }
    Ok(author)
}
