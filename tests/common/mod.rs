//! Common test utilities for reading generated workbooks back.
//!
//! The export tests never trust the writer's own strings: every assertion
//! goes through a ZIP + quick-xml read of the produced bytes.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};

use contentsheet::Record;

/// What a consumer would see when opening the workbook.
#[derive(Debug, Default)]
pub struct WorkbookSnapshot {
    pub sheet_names: Vec<String>,
    pub dimension: Option<String>,
    /// Cell text by row; value-less cells read as ""
    pub rows: Vec<Vec<String>>,
    /// Style index per cell, parallel to `rows`
    pub styles: Vec<Vec<Option<u32>>>,
    /// `<b val=..>` per font in styles.xml; `None` if the font has no `<b>`
    pub font_bold: Vec<Option<bool>>,
    /// fontId per `cellXfs` entry
    pub xf_fonts: Vec<u32>,
}

impl WorkbookSnapshot {
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    /// Bold flag of the font used by cell (row, col).
    pub fn cell_bold(&self, row: usize, col: usize) -> Option<bool> {
        let xf = self.styles[row][col].unwrap_or(0) as usize;
        let font = self.xf_fonts[xf] as usize;
        self.font_bold[font]
    }
}

/// Read a part of the package as a string.
pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid ZIP");
    let mut part = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"));
    let mut out = String::new();
    part.read_to_string(&mut out).expect("UTF-8 part");
    out
}

/// Parse the generated workbook into a snapshot.
pub fn read_workbook(bytes: &[u8]) -> WorkbookSnapshot {
    let mut snap = WorkbookSnapshot::default();
    read_workbook_xml(&read_part(bytes, "xl/workbook.xml"), &mut snap);
    read_sheet_xml(&read_part(bytes, "xl/worksheets/sheet1.xml"), &mut snap);
    read_styles_xml(&read_part(bytes, "xl/styles.xml"), &mut snap);
    snap
}

fn read_workbook_xml(xml: &str, snap: &mut WorkbookSnapshot) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().expect("workbook.xml parses") {
            Event::Start(ref e) | Event::Empty(ref e) if local_name_string(e) == "sheet" => {
                let name = e
                    .try_get_attribute("name")
                    .unwrap()
                    .expect("sheet has a name");
                snap.sheet_names
                    .push(name.unescape_value().unwrap().into_owned());
            }
            Event::Eof => break,
            _ => {}
        }
    }
}

fn start_cell(e: &quick_xml::events::BytesStart<'_>, snap: &mut WorkbookSnapshot) {
    let r = attr_string(e, b"r").expect("cell has r");
    let (col, row_idx) = parse_cell_ref(&r).expect("valid cell ref");
    assert_eq!(row_idx as usize + 1, snap.rows.len(), "cell {r} outside its row");

    let cells = snap.rows.last_mut().expect("cell inside row");
    assert_eq!(col as usize, cells.len(), "cells out of order at {r}");
    cells.push(String::new());
    snap.styles
        .last_mut()
        .unwrap()
        .push(attr_string(e, b"s").map(|s| s.parse().unwrap()));
}

fn read_sheet_xml(xml: &str, snap: &mut WorkbookSnapshot) {
    let mut reader = Reader::from_str(xml);
    let mut in_text = false;
    loop {
        match reader.read_event().expect("sheet1.xml parses") {
            Event::Start(ref e) => match local_name_string(e).as_str() {
                "row" => {
                    snap.rows.push(Vec::new());
                    snap.styles.push(Vec::new());
                }
                "c" => start_cell(e, snap),
                "t" => in_text = true,
                _ => {}
            },
            Event::Empty(ref e) => match local_name_string(e).as_str() {
                "dimension" => snap.dimension = attr_string(e, b"ref"),
                "c" => start_cell(e, snap),
                "row" => {
                    snap.rows.push(Vec::new());
                    snap.styles.push(Vec::new());
                }
                _ => {}
            },
            Event::Text(ref t) if in_text => {
                let text = t.unescape().expect("text unescapes");
                snap.rows
                    .last_mut()
                    .and_then(|r| r.last_mut())
                    .expect("text inside cell")
                    .push_str(&text);
            }
            Event::End(ref e) if e.local_name().as_ref() == b"t" => in_text = false,
            Event::Eof => break,
            _ => {}
        }
    }
}

fn read_styles_xml(xml: &str, snap: &mut WorkbookSnapshot) {
    let mut reader = Reader::from_str(xml);
    let mut in_fonts = false;
    let mut in_cell_xfs = false;
    loop {
        match reader.read_event().expect("styles.xml parses") {
            Event::Start(ref e) => match local_name_string(e).as_str() {
                "fonts" => in_fonts = true,
                "cellXfs" => in_cell_xfs = true,
                "font" if in_fonts => snap.font_bold.push(None),
                "xf" if in_cell_xfs => snap
                    .xf_fonts
                    .push(attr_string(e, b"fontId").unwrap().parse().unwrap()),
                _ => {}
            },
            Event::Empty(ref e) => match local_name_string(e).as_str() {
                "b" if in_fonts => {
                    let bold = attr_string(e, b"val").map_or(true, |v| v == "1" || v == "true");
                    *snap.font_bold.last_mut().unwrap() = Some(bold);
                }
                "xf" if in_cell_xfs => snap
                    .xf_fonts
                    .push(attr_string(e, b"fontId").unwrap().parse().unwrap()),
                _ => {}
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"fonts" => in_fonts = false,
                b"cellXfs" => in_cell_xfs = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
}

// ============================================================================
// XML and cell reference helpers
// ============================================================================

/// Raw (still escaped) attribute value by key.
pub fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| std::str::from_utf8(&attr.value).ok().map(str::to_string))
}

pub fn local_name_string(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Parse a reference like "AJ10" into 0-indexed (col, row).
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let cell_ref = cell_ref.trim();
    let split = cell_ref.find(|c: char| !c.is_ascii_alphabetic())?;
    let (letters, digits) = cell_ref.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut col: u32 = 0;
    for b in letters.bytes() {
        let digit = u32::from(b.to_ascii_uppercase() - b'A' + 1);
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    let row: u32 = digits.parse().ok()?;
    Some((col.checked_sub(1)?, row.checked_sub(1)?))
}

/// Parse "A1:B10" or "A1" into (start_row, start_col, end_row, end_col).
pub fn parse_cell_range(range: &str) -> Option<(u32, u32, u32, u32)> {
    let (start, end) = range.split_once(':').unwrap_or((range, range));
    let (start_col, start_row) = parse_cell_ref(start)?;
    let (end_col, end_row) = parse_cell_ref(end)?;
    Some((start_row, start_col, end_row, end_col))
}

/// Record from `(field, value)` pairs.
pub fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().copied().collect()
}
