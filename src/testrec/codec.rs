//! # CSV Codec
//!
//! Translates between the record sequence and the on-disk text:
//!
//! ```text
//! TestID,SystemName,TestType,TestResult,Active
//! 5,Core DB,UnitTest,Passed,1
//! ```
//!
//! Fields are never quoted or escaped, so values must not contain commas.
//! Decoding is row-tolerant: a bad row is skipped or repaired and reported as a
//! [`DecodeWarning`], it never fails the whole file. The only hard failure is a
//! header that does not match [`HEADER`] exactly.

use crate::model::{Record, TestResult};
use crate::validate::parse_id;
use std::collections::HashSet;
use std::fmt;

pub const HEADER: &str = "TestID,SystemName,TestType,TestResult,Active";

const FIELD_COUNT: usize = 5;

/// Largest ID a file may hold; `u64::MAX` is kept free so `max + 1` always fits.
pub const MAX_ID: u64 = u64::MAX - 1;

/// Why a row did not load exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Result token coerced to `Pending`.
    UnrecognizedResult(String),
    /// Active flag was neither `0` nor `1`; treated as inactive.
    UnrecognizedActive(String),
    /// ID already used by an earlier row; the row was dropped.
    DuplicateId(u64),
    /// More than five fields; the extras were ignored.
    ExtraFields(usize),
    /// ID above [`MAX_ID`]; the row was dropped.
    IdOutOfRange(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeWarning {
    /// 1-based line number, header is line 1.
    pub line: usize,
    pub kind: WarningKind,
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnrecognizedResult(token) => write!(
                f,
                "line {}: unknown test result {:?}, using Pending",
                self.line, token
            ),
            WarningKind::UnrecognizedActive(token) => write!(
                f,
                "line {}: unknown active flag {:?}, marking deleted",
                self.line, token
            ),
            WarningKind::DuplicateId(id) => {
                write!(f, "line {}: duplicate test ID {}, row skipped", self.line, id)
            }
            WarningKind::ExtraFields(n) => {
                write!(f, "line {}: {} extra field(s) ignored", self.line, n)
            }
            WarningKind::IdOutOfRange(id) => {
                write!(f, "line {}: test ID {} is too large, row skipped", self.line, id)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Decoded {
    pub records: Vec<Record>,
    pub warnings: Vec<DecodeWarning>,
}

/// Returns `None` when the first line is not the exact header.
pub fn decode(text: &str) -> Option<Decoded> {
    let mut lines = text.lines();
    let header = lines.next()?;
    if strip_cr(header) != HEADER {
        return None;
    }

    let mut decoded = Decoded::default();
    let mut seen = HashSet::new();

    for (offset, raw_line) in lines.enumerate() {
        let line_no = offset + 2;
        let fields: Vec<&str> = strip_cr(raw_line).split(',').collect();

        // Rows without a usable ID (blank lines included) are dropped silently.
        let Some(id) = parse_id(fields[0]) else {
            continue;
        };
        if id > MAX_ID {
            decoded.warnings.push(DecodeWarning {
                line: line_no,
                kind: WarningKind::IdOutOfRange(id),
            });
            continue;
        }
        if !seen.insert(id) {
            decoded.warnings.push(DecodeWarning {
                line: line_no,
                kind: WarningKind::DuplicateId(id),
            });
            continue;
        }
        if fields.len() > FIELD_COUNT {
            decoded.warnings.push(DecodeWarning {
                line: line_no,
                kind: WarningKind::ExtraFields(fields.len() - FIELD_COUNT),
            });
        }

        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        let result = match field(3).parse::<TestResult>() {
            Ok(result) => result,
            Err(unrecognized) => {
                decoded.warnings.push(DecodeWarning {
                    line: line_no,
                    kind: WarningKind::UnrecognizedResult(unrecognized.0),
                });
                TestResult::Pending
            }
        };

        let active = match field(4).trim() {
            "1" => true,
            "0" | "" => false,
            other => {
                decoded.warnings.push(DecodeWarning {
                    line: line_no,
                    kind: WarningKind::UnrecognizedActive(other.to_string()),
                });
                false
            }
        };

        decoded.records.push(Record {
            id,
            system_name: field(1).to_string(),
            test_type: field(2).to_string(),
            result,
            active,
        });
    }

    Some(decoded)
}

pub fn encode(records: &[Record]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + records.len() * 32);
    out.push_str(HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&encode_row(record));
        out.push('\n');
    }
    out
}

pub fn encode_row(record: &Record) -> String {
    format!(
        "{},{},{},{},{}",
        record.id,
        record.system_name,
        record.test_type,
        record.result.name(),
        if record.active { '1' } else { '0' }
    )
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u64, name: &str, ty: &str, result: TestResult, active: bool) -> Record {
        Record {
            id,
            system_name: name.into(),
            test_type: ty.into(),
            result,
            active,
        }
    }

    #[test]
    fn rejects_missing_or_wrong_header() {
        assert!(decode("").is_none());
        assert!(decode("testid,systemname,testtype,testresult,active\n").is_none());
        assert!(decode("TestID,SystemName,TestType,TestResult\n1,a,b,Passed,1\n").is_none());
        assert!(decode(" TestID,SystemName,TestType,TestResult,Active\n").is_none());
    }

    #[test]
    fn header_only_is_empty() {
        let decoded = decode(HEADER).unwrap();
        assert!(decoded.records.is_empty());
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn loads_sample_and_tolerates_bad_rows() {
        let text = format!(
            "{HEADER}\n5,Core DB,UnitTest,Passed,1\nabc,Bad,Row,Passed,1\n6,Web UI,Smoke,Bogus,1\n"
        );
        let decoded = decode(&text).unwrap();

        assert_eq!(
            decoded.records,
            vec![
                rec(5, "Core DB", "UnitTest", TestResult::Passed, true),
                rec(6, "Web UI", "Smoke", TestResult::Pending, true),
            ]
        );
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning {
                line: 4,
                kind: WarningKind::UnrecognizedResult("Bogus".into()),
            }]
        );
    }

    #[test]
    fn skips_rows_with_unusable_ids_silently() {
        let text = format!("{HEADER}\n\n0,Zero,Row,Passed,1\n-1,Neg,Row,Passed,1\n7x,a,b,Passed,1\n");
        let decoded = decode(&text).unwrap();
        assert!(decoded.records.is_empty());
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn missing_trailing_fields_default() {
        let text = format!("{HEADER}\n9,Only Name\n");
        let decoded = decode(&text).unwrap();
        assert_eq!(
            decoded.records,
            vec![rec(9, "Only Name", "", TestResult::Pending, false)]
        );
        // absent result token is still reported
        assert_eq!(decoded.warnings.len(), 1);
    }

    #[test]
    fn duplicate_ids_keep_first_row() {
        let text = format!("{HEADER}\n3,First,Unit,Passed,1\n3,Second,Unit,Failed,1\n");
        let decoded = decode(&text).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].system_name, "First");
        assert_eq!(decoded.warnings[0].kind, WarningKind::DuplicateId(3));
    }

    #[test]
    fn largest_u64_id_is_skipped_with_warning() {
        let text = format!("{HEADER}\n18446744073709551615,Core DB,UnitTest,Passed,1\n18446744073709551614,Edge,Unit,Passed,1\n");
        let decoded = decode(&text).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].id, MAX_ID);
        assert_eq!(
            decoded.warnings[0].kind,
            WarningKind::IdOutOfRange(u64::MAX)
        );
    }

    #[test]
    fn odd_active_flag_and_extra_fields_warn() {
        let text = format!("{HEADER}\n4,Sys,Unit,Passed,yes\n5,Sys,Unit,Passed,1,extra\n");
        let decoded = decode(&text).unwrap();
        assert!(!decoded.records[0].active);
        assert!(decoded.records[1].active);
        assert_eq!(
            decoded.warnings.iter().map(|w| w.kind.clone()).collect::<Vec<_>>(),
            vec![
                WarningKind::UnrecognizedActive("yes".into()),
                WarningKind::ExtraFields(1),
            ]
        );
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let text = format!("{HEADER}\r\n1,Core DB,UnitTest,Failed,0\r\n");
        let decoded = decode(&text).unwrap();
        assert_eq!(
            decoded.records,
            vec![rec(1, "Core DB", "UnitTest", TestResult::Failed, false)]
        );
    }

    #[test]
    fn canonical_text_is_stable() {
        let text = format!(
            "{HEADER}\n2,Core DB,UnitTest,Passed,1\n1,Web (eu),Smoke,Success,0\n10,Batch,Load,Failed,1\n"
        );
        let decoded = decode(&text).unwrap();
        assert_eq!(encode(&decoded.records), text);
    }

    #[test]
    fn encode_keeps_sequence_order() {
        let records = vec![
            rec(8, "B sys", "Unit", TestResult::Pending, true),
            rec(2, "A sys", "Unit", TestResult::Success, false),
        ];
        let text = encode(&records);
        assert_eq!(
            text,
            format!("{HEADER}\n8,B sys,Unit,Pending,1\n2,A sys,Unit,Success,0\n")
        );
        assert_eq!(decode(&text).unwrap().records, records);
    }
}
