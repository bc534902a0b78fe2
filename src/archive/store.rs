//! XML persistence for archives
//!
//! Layout, with attributes always written in this order:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <spelling_bees>
//!   <puzzle date="2025-04-01" url="..." puzzleid="..." letters="EBOY" jumbled="true">
//!     <word length="3" original_word="BEE">EBE</word>
//!     <letter1>0</letter1>
//!   </puzzle>
//! </spelling_bees>
//! ```
//!
//! Output depends only on the archive contents, so saving a freshly loaded
//! archive reproduces the file byte for byte.

use super::Archive;
use crate::config::ROOT_TAG;
use crate::core::{LetterSet, PuzzleId, PuzzleRecord, WordEntry};
use crate::error::ArchiveError;
use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const INDENT: &str = "  ";
const DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_LETTER_INDEX: usize = 26;

/// An archive file on disk
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    path: PathBuf,
    root_tag: String,
}

impl ArchiveStore {
    /// Store at `path` using the default root tag
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root_tag: ROOT_TAG.to_string(),
        }
    }

    /// Use a different root tag when writing
    ///
    /// Any root tag is accepted when reading.
    #[must_use]
    pub fn with_root_tag(mut self, root_tag: impl Into<String>) -> Self {
        self.root_tag = root_tag.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the archive
    ///
    /// A missing file is an empty archive. Duplicate dates keep their first
    /// record.
    ///
    /// # Errors
    /// - `ArchiveError::Corrupt` if the file is not a readable archive
    /// - `ArchiveError::Io` for any other read failure
    pub fn load(&self) -> Result<Archive, ArchiveError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} not found, starting empty", self.path.display());
                return Ok(Archive::new());
            }
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Err(self.corrupt("not valid UTF-8".to_string()));
            }
            Err(source) => {
                return Err(ArchiveError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        self.parse(&text)
    }

    /// Parse archive text as if it had been read from this store's path
    ///
    /// # Errors
    /// Returns `ArchiveError::Corrupt` if the text is not a readable archive.
    pub fn parse(&self, text: &str) -> Result<Archive, ArchiveError> {
        let records = parse_document(text).map_err(|reason| self.corrupt(reason))?;
        let (archive, dropped) = Archive::from_records(records);
        if dropped > 0 {
            warn!(
                "{}: dropped {dropped} puzzle(s) with a duplicate date",
                self.path.display()
            );
        }
        Ok(archive)
    }

    /// Serialize the archive
    ///
    /// # Errors
    /// Returns `ArchiveError::Encode` if the XML writer fails.
    pub fn to_xml(&self, archive: &Archive) -> Result<Vec<u8>, ArchiveError> {
        encode_document(archive, &self.root_tag).map_err(|reason| ArchiveError::Encode {
            path: self.path.clone(),
            reason,
        })
    }

    /// Write the archive, replacing the file
    ///
    /// The document goes to a sibling `.tmp` file first and is renamed into
    /// place, so a failed write leaves the previous file intact.
    ///
    /// # Errors
    /// Returns `ArchiveError::Io` if the file cannot be written.
    pub fn save(&self, archive: &Archive) -> Result<(), ArchiveError> {
        let bytes = self.to_xml(archive)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io(source))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, &bytes).map_err(|source| self.io(source))?;
        fs::rename(&temp, &self.path).map_err(|source| self.io(source))?;

        debug!(
            "saved {} puzzle(s) to {}",
            archive.len(),
            self.path.display()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn corrupt(&self, reason: String) -> ArchiveError {
        ArchiveError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }

    fn io(&self, source: io::Error) -> ArchiveError {
        ArchiveError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

// ─── Writing ──────────────────────────────────────────────────────────────────

fn encode_document(archive: &Archive, root_tag: &str) -> Result<Vec<u8>, String> {
    let mut writer = Writer::new(Vec::new());

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    newline(&mut writer, 0)?;
    emit(&mut writer, Event::Start(BytesStart::new(root_tag)))?;

    for record in archive.iter() {
        newline(&mut writer, 1)?;
        encode_puzzle(&mut writer, record)?;
    }

    newline(&mut writer, 0)?;
    emit(&mut writer, Event::End(BytesEnd::new(root_tag)))?;
    newline(&mut writer, 0)?;

    Ok(writer.into_inner())
}

fn encode_puzzle(writer: &mut Writer<Vec<u8>>, record: &PuzzleRecord) -> Result<(), String> {
    let date = record.date.format(DATE_FORMAT).to_string();
    let mut start = BytesStart::new("puzzle");
    start.push_attribute(("date", date.as_str()));
    start.push_attribute(("url", record.url.as_str()));
    if let Some(id) = &record.puzzle_id {
        start.push_attribute(("puzzleid", id.as_str()));
    }
    if let Some(letters) = &record.letters {
        start.push_attribute(("letters", letters.to_string().as_str()));
    }
    if record.jumbled {
        start.push_attribute(("jumbled", "true"));
    }
    emit(writer, Event::Start(start))?;

    for word in &record.words {
        newline(writer, 2)?;
        let length = word.length.to_string();
        let mut start = BytesStart::new("word");
        start.push_attribute(("length", length.as_str()));
        if let Some(original) = &word.original {
            start.push_attribute(("original_word", original.as_str()));
        }
        text_element(writer, start, &word.text)?;
    }

    for (idx, count) in record.letter_counts.iter().enumerate() {
        newline(writer, 2)?;
        let tag = format!("letter{}", idx + 1);
        text_element(writer, BytesStart::new(tag.as_str()), &count.to_string())?;
    }

    newline(writer, 1)?;
    emit(writer, Event::End(BytesEnd::new("puzzle")))
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    start: BytesStart<'_>,
    text: &str,
) -> Result<(), String> {
    let end = start.to_end().into_owned();
    emit(writer, Event::Start(start))?;
    if !text.is_empty() {
        emit(writer, Event::Text(BytesText::new(text)))?;
    }
    emit(writer, Event::End(end))
}

fn newline(writer: &mut Writer<Vec<u8>>, level: usize) -> Result<(), String> {
    let ws = format!("\n{}", INDENT.repeat(level));
    emit(writer, Event::Text(BytesText::new(&ws)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), String> {
    writer.write_event(event).map_err(|err| err.to_string())
}

// ─── Reading ──────────────────────────────────────────────────────────────────

/// Element currently collecting text inside a `<puzzle>`
enum Field {
    Word {
        length: Option<usize>,
        original: Option<String>,
    },
    LetterCount(usize),
}

struct PuzzleBuilder {
    date: NaiveDate,
    url: String,
    puzzle_id: Option<PuzzleId>,
    letters: Option<LetterSet>,
    jumbled: bool,
    words: Vec<WordEntry>,
    counts: BTreeMap<usize, u32>,
}

impl PuzzleBuilder {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, String> {
        let mut date = None;
        let mut url = String::new();
        let mut puzzle_id = None;
        let mut letters = None;
        let mut jumbled = false;

        for (key, value) in attributes(start)? {
            match key.as_str() {
                "date" => {
                    let parsed = NaiveDate::parse_from_str(&value, DATE_FORMAT)
                        .map_err(|err| format!("bad puzzle date '{value}': {err}"))?;
                    date = Some(parsed);
                }
                "url" => url = value,
                "puzzleid" if !value.is_empty() => puzzle_id = Some(PuzzleId::from(value)),
                "letters" => letters = value.parse().ok(),
                "jumbled" => jumbled = value == "true",
                _ => {}
            }
        }

        Ok(Self {
            date: date.ok_or("puzzle without a date")?,
            url,
            puzzle_id,
            letters,
            jumbled,
            words: Vec::new(),
            counts: BTreeMap::new(),
        })
    }

    fn finish(self) -> PuzzleRecord {
        PuzzleRecord {
            date: self.date,
            url: self.url,
            puzzle_id: self.puzzle_id,
            letters: self.letters,
            words: self.words,
            letter_counts: dense_counts(self.counts),
            jumbled: self.jumbled,
        }
    }
}

/// `letterN` values by position; a missing N reads as 0
fn dense_counts(counts: BTreeMap<usize, u32>) -> Vec<u32> {
    let len = counts.keys().next_back().copied().unwrap_or(0);
    let mut dense = vec![0; len];
    for (idx, count) in counts {
        dense[idx - 1] = count;
    }
    dense
}

fn word_field(start: &BytesStart<'_>) -> Result<Field, String> {
    let mut length = None;
    let mut original = None;
    for (key, value) in attributes(start)? {
        match key.as_str() {
            "length" => {
                let parsed = value
                    .parse()
                    .map_err(|_| format!("bad word length '{value}'"))?;
                length = Some(parsed);
            }
            "original_word" => original = Some(value),
            _ => {}
        }
    }
    Ok(Field::Word { length, original })
}

fn finish_field(field: Field, text: &str, puzzle: &mut PuzzleBuilder) -> Result<(), String> {
    match field {
        Field::Word { length, original } => puzzle.words.push(WordEntry {
            text: text.to_string(),
            length: length.unwrap_or_else(|| text.chars().count()),
            original,
        }),
        Field::LetterCount(idx) => {
            let count = text
                .trim()
                .parse()
                .map_err(|_| format!("bad letter count '{text}'"))?;
            puzzle.counts.insert(idx, count);
        }
    }
    Ok(())
}

/// `letterN` with 1 <= N <= 26
fn letter_index(name: &[u8]) -> Option<usize> {
    let digits = name.strip_prefix(b"letter")?;
    std::str::from_utf8(digits)
        .ok()?
        .parse()
        .ok()
        .filter(|n| (1..=MAX_LETTER_INDEX).contains(n))
}

fn attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>, String> {
    start
        .attributes()
        .map(|attr| {
            let attr = attr.map_err(|err| err.to_string())?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| err.to_string())?
                .into_owned();
            Ok((key, value))
        })
        .collect()
}

#[allow(clippy::too_many_lines)] // One flat event loop
fn parse_document(text: &str) -> Result<Vec<PuzzleRecord>, String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut root_open = false;
    let mut root_closed = false;
    let mut puzzle: Option<PuzzleBuilder> = None;
    let mut field: Option<Field> = None;
    let mut field_text = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|err| format!("at byte {}: {err}", reader.buffer_position()))?;

        match event {
            Event::Start(start) => {
                if root_closed {
                    return Err("content after the root element".to_string());
                }
                if !root_open {
                    root_open = true;
                    continue;
                }
                let name = start.name();
                let name = name.as_ref();
                match (puzzle.is_some(), field.is_some()) {
                    (false, _) if name == b"puzzle" => {
                        puzzle = Some(PuzzleBuilder::from_start(&start)?);
                    }
                    (true, false) if name == b"word" => {
                        field = Some(word_field(&start)?);
                        field_text.clear();
                    }
                    (true, false) if letter_index(name).is_some() => {
                        field = letter_index(name).map(Field::LetterCount);
                        field_text.clear();
                    }
                    _ => {
                        let end = start.to_end().into_owned();
                        debug!(
                            "skipping unknown element <{}>",
                            String::from_utf8_lossy(end.name().as_ref())
                        );
                        reader
                            .read_to_end(end.name())
                            .map_err(|err| err.to_string())?;
                    }
                }
            }
            Event::Empty(start) => {
                if root_closed {
                    return Err("content after the root element".to_string());
                }
                if !root_open {
                    // `<spelling_bees/>`
                    root_open = true;
                    root_closed = true;
                    continue;
                }
                let name = start.name();
                let name = name.as_ref();
                if puzzle.is_none() && name == b"puzzle" {
                    records.push(PuzzleBuilder::from_start(&start)?.finish());
                } else if let Some(builder) = puzzle.as_mut()
                    && field.is_none()
                    && name == b"word"
                {
                    finish_field(word_field(&start)?, "", builder)?;
                }
            }
            Event::Text(content) => {
                if field.is_some() {
                    let unescaped = content.unescape().map_err(|err| err.to_string())?;
                    field_text.push_str(&unescaped);
                }
            }
            Event::End(_) => {
                if let Some(done) = field.take() {
                    if let Some(builder) = puzzle.as_mut() {
                        finish_field(done, &field_text, builder)?;
                    }
                } else if let Some(builder) = puzzle.take() {
                    records.push(builder.finish());
                } else if root_open {
                    root_closed = true;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_open {
        return Err("no root element".to_string());
    }
    if !root_closed {
        return Err("unexpected end of document".to_string());
    }
    Ok(records)
}
