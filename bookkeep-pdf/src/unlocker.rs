//! Password brute-force over an ordered candidate list.
//!
//! Candidates are tried strictly in order and the first one that removes the
//! restriction wins. Every attempt runs on a freshly opened handle: a handle
//! whose decrypt call failed may hold partial state and is never reused.

use tracing::{debug, info};

use crate::document::{DocumentOpener, StatementDocument};
use crate::error::{DocumentError, Result};
use crate::lopdf_backend::LopdfOpener;

/// Terminal outcome of [`DocumentUnlocker::attempt_unlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// The document was never restricted; no candidate was consumed.
    NotRestricted,
    /// `attempt` is the 1-based position of `password` in the list.
    Unlocked { password: String, attempt: usize },
    /// Every candidate was rejected. A result, not an error.
    Exhausted { attempts: usize },
}

impl UnlockOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, UnlockOutcome::Exhausted { .. })
    }

    pub fn matched_password(&self) -> Option<&str> {
        match self {
            UnlockOutcome::Unlocked { password, .. } => Some(password),
            _ => None,
        }
    }
}

/// Unrestricted document content plus the candidate that produced it.
#[derive(Debug, Clone)]
pub struct UnlockedDocument {
    pub bytes: Vec<u8>,
    pub matched_password: Option<String>,
    pub page_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentUnlocker<O = LopdfOpener> {
    opener: O,
}

impl DocumentUnlocker<LopdfOpener> {
    pub fn lopdf() -> Self {
        Self::new(LopdfOpener)
    }
}

impl<O: DocumentOpener> DocumentUnlocker<O> {
    pub fn new(opener: O) -> Self {
        Self { opener }
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// `DocumentError::Read` if the bytes are not a document; that is distinct
    /// from `Ok(false)`.
    pub fn is_restricted(&self, bytes: &[u8]) -> Result<bool> {
        Ok(self.opener.open(bytes)?.is_restricted())
    }

    pub fn attempt_unlock<S: AsRef<str>>(&self, bytes: &[u8], passwords: &[S]) -> Result<UnlockOutcome> {
        if !self.is_restricted(bytes)? {
            return Ok(UnlockOutcome::NotRestricted);
        }

        let total = passwords.len();
        for (i, password) in passwords.iter().enumerate() {
            let attempt = i + 1;
            debug!(attempt, total, "trying candidate password");

            let mut doc = self.opener.open(bytes)?;
            match doc.decrypt(password.as_ref()) {
                Ok(()) => {
                    info!(attempt, total, "password matched");
                    return Ok(UnlockOutcome::Unlocked {
                        password: password.as_ref().to_string(),
                        attempt,
                    });
                }
                Err(DocumentError::Decrypt(reason)) => {
                    debug!(attempt, %reason, "candidate rejected");
                }
                Err(other) => return Err(other),
            }
        }

        info!(attempts = total, "no candidate password matched");
        Ok(UnlockOutcome::Exhausted { attempts: total })
    }

    /// Open a fresh handle with the restriction removed.
    pub fn open_unlocked(&self, bytes: &[u8], password: Option<&str>) -> Result<O::Document> {
        let mut doc = self.opener.open(bytes)?;
        if !doc.is_restricted() {
            return Ok(doc);
        }
        match password {
            Some(password) => {
                doc.decrypt(password)?;
                Ok(doc)
            }
            None => Err(DocumentError::StillRestricted),
        }
    }

    /// Fully unrestricted content. An unrestricted document is returned as a
    /// verbatim copy of `bytes`.
    pub fn materialize(&self, bytes: &[u8], password: Option<&str>) -> Result<Vec<u8>> {
        if !self.is_restricted(bytes)? {
            return Ok(bytes.to_vec());
        }
        self.open_unlocked(bytes, password)?.save()
    }

    pub fn extract_text(&self, bytes: &[u8], password: Option<&str>) -> Result<String> {
        self.open_unlocked(bytes, password)?.extract_text()
    }

    /// `attempt_unlock` followed by `materialize`. `Ok(None)` when the list is
    /// exhausted.
    pub fn process<S: AsRef<str>>(&self, bytes: &[u8], passwords: &[S]) -> Result<Option<UnlockedDocument>> {
        let matched_password = match self.attempt_unlock(bytes, passwords)? {
            UnlockOutcome::Exhausted { .. } => return Ok(None),
            outcome => outcome.matched_password().map(str::to_string),
        };

        let doc = self.open_unlocked(bytes, matched_password.as_deref())?;
        let page_count = doc.page_count();
        let bytes = self.materialize(bytes, matched_password.as_deref())?;
        Ok(Some(UnlockedDocument {
            bytes,
            matched_password,
            page_count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Restricted documents accept any password in `accepted`. A handle that
    /// already failed a decrypt refuses every later call.
    #[derive(Default)]
    struct FakeOpener {
        restricted: bool,
        unsupported: bool,
        accepted: Vec<&'static str>,
        opens: Cell<usize>,
        tried: RefCell<Vec<String>>,
    }

    struct FakeDocument<'a> {
        opener: &'a FakeOpener,
        restricted: bool,
        poisoned: bool,
    }

    impl<'a> DocumentOpener for &'a FakeOpener {
        type Document = FakeDocument<'a>;

        fn open(&self, bytes: &[u8]) -> Result<FakeDocument<'a>> {
            if bytes != b"%PDF" {
                return Err(DocumentError::Read("not a pdf".into()));
            }
            self.opens.set(self.opens.get() + 1);
            Ok(FakeDocument {
                opener: *self,
                restricted: self.restricted,
                poisoned: false,
            })
        }
    }

    impl StatementDocument for FakeDocument<'_> {
        fn is_restricted(&self) -> bool {
            self.restricted
        }

        fn page_count(&self) -> usize {
            2
        }

        fn decrypt(&mut self, password: &str) -> Result<()> {
            assert!(!self.poisoned, "handle reused after a failed decrypt");
            self.opener.tried.borrow_mut().push(password.to_string());
            if self.opener.unsupported {
                return Err(DocumentError::Unsupported("unknown security handler".into()));
            }
            if self.opener.accepted.iter().any(|a| *a == password) {
                self.restricted = false;
                Ok(())
            } else {
                self.poisoned = true;
                Err(DocumentError::Decrypt("bad password".into()))
            }
        }

        fn extract_text(&self) -> Result<String> {
            if self.restricted {
                return Err(DocumentError::StillRestricted);
            }
            Ok("1/1/2025 Success Reload RM1.00 RM1.00\n".to_string())
        }

        fn save(&mut self) -> Result<Vec<u8>> {
            Ok(b"%PDF-unlocked".to_vec())
        }
    }

    fn restricted(accepted: Vec<&'static str>) -> FakeOpener {
        FakeOpener {
            restricted: true,
            accepted,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_match_wins() {
        let opener = restricted(vec!["p2", "p3"]);
        let unlocker = DocumentUnlocker::new(&opener);
        let outcome = unlocker.attempt_unlock(b"%PDF", &["p1", "p2", "p3"]).unwrap();
        assert_eq!(
            outcome,
            UnlockOutcome::Unlocked {
                password: "p2".to_string(),
                attempt: 2
            }
        );
        assert_eq!(*opener.tried.borrow(), ["p1", "p2"]);
    }

    #[test]
    fn test_fresh_handle_per_attempt() {
        let opener = restricted(vec!["p3"]);
        let unlocker = DocumentUnlocker::new(&opener);
        let outcome = unlocker.attempt_unlock(b"%PDF", &["p1", "p2", "p3"]).unwrap();
        assert_eq!(outcome.matched_password(), Some("p3"));
        // one open for the restriction check plus one per attempt
        assert_eq!(opener.opens.get(), 4);
    }

    #[test]
    fn test_unrestricted_passes_through_without_candidates() {
        let opener = FakeOpener::default();
        let unlocker = DocumentUnlocker::new(&opener);
        let outcome = unlocker.attempt_unlock(b"%PDF", &["p1", "p2"]).unwrap();
        assert_eq!(outcome, UnlockOutcome::NotRestricted);
        assert!(outcome.is_success());
        assert_eq!(outcome.matched_password(), None);
        assert!(opener.tried.borrow().is_empty());
    }

    #[test]
    fn test_exhausted_is_a_result_not_an_error() {
        let opener = restricted(vec!["secret"]);
        let unlocker = DocumentUnlocker::new(&opener);
        let outcome = unlocker.attempt_unlock(b"%PDF", &["a", "b"]).unwrap();
        assert_eq!(outcome, UnlockOutcome::Exhausted { attempts: 2 });
        assert!(!outcome.is_success());

        let none: [&str; 0] = [];
        let outcome = unlocker.attempt_unlock(b"%PDF", &none).unwrap();
        assert_eq!(outcome, UnlockOutcome::Exhausted { attempts: 0 });
    }

    #[test]
    fn test_passwords_are_case_and_whitespace_sensitive() {
        let opener = restricted(vec!["Secret"]);
        let unlocker = DocumentUnlocker::new(&opener);
        let outcome = unlocker.attempt_unlock(b"%PDF", &["secret", " Secret", "Secret"]).unwrap();
        assert_eq!(outcome.matched_password(), Some("Secret"));
    }

    #[test]
    fn test_read_error_is_distinct_from_unrestricted() {
        let opener = FakeOpener::default();
        let unlocker = DocumentUnlocker::new(&opener);
        assert!(matches!(unlocker.is_restricted(b"garbage"), Err(DocumentError::Read(_))));
        assert!(matches!(
            unlocker.attempt_unlock(b"garbage", &["p"]),
            Err(DocumentError::Read(_))
        ));
    }

    #[test]
    fn test_materialize_verbatim_when_unrestricted() {
        let opener = FakeOpener::default();
        let unlocker = DocumentUnlocker::new(&opener);
        assert_eq!(unlocker.materialize(b"%PDF", None).unwrap(), b"%PDF");
    }

    #[test]
    fn test_materialize_ignores_password_when_unrestricted() {
        let opener = FakeOpener::default();
        let unlocker = DocumentUnlocker::new(&opener);
        assert_eq!(unlocker.materialize(b"%PDF", Some("pw")).unwrap(), b"%PDF");
        assert!(opener.tried.borrow().is_empty());
    }

    #[test]
    fn test_unsupported_scheme_stops_the_loop() {
        let opener = FakeOpener {
            unsupported: true,
            ..restricted(vec!["p2"])
        };
        let unlocker = DocumentUnlocker::new(&opener);
        let err = unlocker.attempt_unlock(b"%PDF", &["p1", "p2", "p3"]).unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported(_)));
        assert_eq!(*opener.tried.borrow(), ["p1"]);
        assert!(matches!(
            unlocker.process(b"%PDF", &["p1"]),
            Err(DocumentError::Unsupported(_))
        ));
    }

    #[test]
    fn test_materialize_reapplies_password() {
        let opener = restricted(vec!["pw"]);
        let unlocker = DocumentUnlocker::new(&opener);
        assert_eq!(unlocker.materialize(b"%PDF", Some("pw")).unwrap(), b"%PDF-unlocked");
        assert!(matches!(
            unlocker.materialize(b"%PDF", None),
            Err(DocumentError::StillRestricted)
        ));
    }

    #[test]
    fn test_process_and_extract_text() {
        let opener = restricted(vec!["pw"]);
        let unlocker = DocumentUnlocker::new(&opener);
        let unlocked = unlocker.process(b"%PDF", &["nope", "pw"]).unwrap().unwrap();
        assert_eq!(unlocked.matched_password.as_deref(), Some("pw"));
        assert_eq!(unlocked.page_count, 2);
        let text = unlocker.extract_text(b"%PDF", Some("pw")).unwrap();
        assert!(text.contains("Reload"));

        assert!(unlocker.process(b"%PDF", &["nope"]).unwrap().is_none());
    }
}
