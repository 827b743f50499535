use bookkeep_core::PasswordList;
use bookkeep_engine::{DocumentOutcome, ExtractionEngine, OutputFormat, SourceDocument};
use bookkeep_ingest::parsers::tng_ewallet::tng_ewallet_layout;
use bookkeep_pdf::{DocumentError, DocumentOpener, DocumentUnlocker, StatementDocument};
use std::fs;

/// In-memory documents: `OPEN\n<text>` or `LOCKED:<password>\n<text>`.
struct FakeOpener;

struct FakeDocument {
    password: Option<String>,
    text: String,
}

impl DocumentOpener for FakeOpener {
    type Document = FakeDocument;

    fn open(&self, bytes: &[u8]) -> bookkeep_pdf::Result<FakeDocument> {
        let raw = std::str::from_utf8(bytes).map_err(|e| DocumentError::Read(e.to_string()))?;
        let (head, text) = raw
            .split_once('\n')
            .ok_or_else(|| DocumentError::Read("no header".into()))?;
        let password = match head {
            "OPEN" => None,
            _ => Some(
                head.strip_prefix("LOCKED:")
                    .ok_or_else(|| DocumentError::Read("bad header".into()))?
                    .to_string(),
            ),
        };
        Ok(FakeDocument {
            password,
            text: text.to_string(),
        })
    }
}

impl StatementDocument for FakeDocument {
    fn is_restricted(&self) -> bool {
        self.password.is_some()
    }

    fn page_count(&self) -> usize {
        1
    }

    fn decrypt(&mut self, password: &str) -> bookkeep_pdf::Result<()> {
        if self.password.as_deref() == Some(password) {
            self.password = None;
            Ok(())
        } else {
            Err(DocumentError::Decrypt("wrong password".into()))
        }
    }

    fn extract_text(&self) -> bookkeep_pdf::Result<String> {
        if self.is_restricted() {
            return Err(DocumentError::StillRestricted);
        }
        Ok(self.text.clone())
    }

    fn save(&mut self) -> bookkeep_pdf::Result<Vec<u8>> {
        Ok(format!("OPEN\n{}", self.text).into_bytes())
    }
}

fn engine(passwords: &[&str]) -> ExtractionEngine<FakeOpener> {
    ExtractionEngine::new(
        DocumentUnlocker::new(FakeOpener),
        tng_ewallet_layout().unwrap(),
        PasswordList::new(passwords.iter().copied()),
    )
}

fn doc(id: &str, body: &str) -> SourceDocument {
    SourceDocument::new(id, body.as_bytes().to_vec())
}

#[test]
fn test_outcomes_are_distinguished_per_document() {
    let docs = vec![
        doc(
            "open.pdf",
            "OPEN\nHeader\n30/9/2025 Success Reload 2025 RM15.00 RM15.00\n29/9/2025 Success Payment\n793Parking 21216RM2.00 RM0.00\n",
        ),
        doc("locked.pdf", "LOCKED:s3cret\n1/10/2025 Success Reload RM1.00 RM1.00\n"),
        doc("empty.pdf", "OPEN\nNo transactions this month\n"),
        doc("garbage.pdf", "\u{0}\u{1}binary"),
        doc("unlockable.pdf", "LOCKED:pw2\n2/10/2025 Failed Payment RM9.00 RM1.00\n"),
    ];

    let report = engine(&["pw1", "pw2"]).extract_all(&docs);
    let ids: Vec<_> = report.documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["open.pdf", "locked.pdf", "empty.pdf", "garbage.pdf", "unlockable.pdf"]);

    let open = report.get("open.pdf").unwrap();
    assert_eq!(open.transactions().len(), 2);
    assert_eq!(open.transactions()[0].transaction_type, "Reload");
    assert_eq!(open.transactions()[1].amount, "2.00");

    assert_eq!(report.get("locked.pdf"), Some(&DocumentOutcome::Locked { attempts: 2 }));
    assert_eq!(
        report.get("empty.pdf"),
        Some(&DocumentOutcome::Empty { matched_password: None })
    );
    assert!(matches!(
        report.get("garbage.pdf"),
        Some(DocumentOutcome::Unreadable { .. })
    ));

    match report.get("unlockable.pdf").unwrap() {
        DocumentOutcome::Extracted {
            matched_password,
            transactions,
        } => {
            assert_eq!(matched_password.as_deref(), Some("pw2"));
            assert_eq!(transactions[0].amount, "9.00");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let summary = report.summary();
    assert_eq!(summary.documents, 5);
    assert_eq!(summary.extracted, 2);
    assert_eq!(summary.empty, 1);
    assert_eq!(summary.locked, 1);
    assert_eq!(summary.unreadable, 1);
    assert_eq!(summary.transactions, 3);
    assert_eq!(summary.succeeded(), 3);
}

#[test]
fn test_records_keep_statement_order() {
    let docs = vec![doc(
        "order.pdf",
        "OPEN\n1/10/2025 Success Payment RM1.00 RM5.00\n15/9/2025 Success Reload RM6.00 RM6.00\n20/9/2025 Success Payment RM1.00 RM5.00\n",
    )];
    let report = engine(&[]).extract_all(&docs);
    let dates: Vec<_> = report.documents[0]
        .outcome
        .transactions()
        .iter()
        .map(|t| t.date.as_str())
        .collect();
    assert_eq!(dates, ["1/10/2025", "15/9/2025", "20/9/2025"]);
}

#[test]
fn test_write_outputs_one_file_per_document() {
    let docs = vec![
        doc("sept.pdf", "OPEN\n30/9/2025 Success Reload RM15.00 RM15.00\n"),
        doc("empty.pdf", "OPEN\nnothing\n"),
    ];
    let report = engine(&[]).extract_all(&docs);

    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join("sept_transactions.csv"), "existing").unwrap();

    let written = report.write_outputs(out.path(), OutputFormat::Csv);
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].0, "sept.pdf");
    assert_eq!(
        written[0].1.as_ref().unwrap(),
        &out.path().join("sept_transactions_1.csv")
    );
    assert_eq!(
        fs::read_to_string(out.path().join("sept_transactions.csv")).unwrap(),
        "existing"
    );
    assert!(!out.path().join("empty_transactions.csv").exists());
}

#[test]
fn test_failed_write_does_not_stop_later_documents() {
    let docs = vec![
        // A NUL byte cannot appear in a file name, so this write fails.
        doc("bad\u{0}name.pdf", "OPEN\n30/9/2025 Success Reload RM15.00 RM15.00\n"),
        doc("oct.pdf", "OPEN\n1/10/2025 Success Payment RM1.00 RM14.00\n"),
    ];
    let report = engine(&[]).extract_all(&docs);

    let out = tempfile::tempdir().unwrap();
    let written = report.write_outputs(out.path(), OutputFormat::Json);
    assert_eq!(written.len(), 2);
    assert!(written[0].1.is_err());
    assert_eq!(written[1].0, "oct.pdf");
    assert_eq!(
        written[1].1.as_ref().unwrap(),
        &out.path().join("oct_transactions.json")
    );
    assert!(out.path().join("oct_transactions.json").exists());
}
