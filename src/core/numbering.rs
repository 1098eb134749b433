use chrono::{Datelike, NaiveDate};

use super::error::AngebotError;

/// Offer numbers of the form `{prefix}{year}-{counter}`, e.g. "AN-2024-001".
///
/// The year is the issue year of the offer and the counter restarts at 1
/// when an offer dated in a later year is numbered. Offers that are
/// discarded as drafts never consume a number: a new draft shows
/// [`Self::peek`] and only [`Self::issue_for`] (or [`Self::next_number`])
/// commits it.
#[derive(Debug, Clone)]
pub struct OfferNumberSequence {
    prefix: String,
    year: i32,
    next: u64,
    width: usize,
}

impl OfferNumberSequence {
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self::starting_at(prefix, year, 1)
    }

    /// Resume after the last stored offer of `year`; `next` is its counter + 1.
    pub fn starting_at(prefix: impl Into<String>, year: i32, next: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next: next.max(1),
            width: 3,
        }
    }

    /// Zero-pad the counter to `width` digits (default 3).
    pub fn with_padding(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Number an offer issued on `date`, moving to the date's year first if
    /// it is later than the current one. Back-dated offers keep the current
    /// year's numbering.
    pub fn issue_for(&mut self, date: NaiveDate) -> String {
        self.auto_advance(date);
        self.next_number()
    }

    /// Commit and return the next number of the current year.
    pub fn next_number(&mut self) -> String {
        let number = self.format(self.next);
        self.next = self.next.saturating_add(1);
        number
    }

    /// Number a new draft would get if it were saved now.
    pub fn peek(&self) -> String {
        self.format(self.next)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn next_raw(&self) -> u64 {
        self.next
    }

    /// Switch to `new_year` and restart the counter. Going back to an
    /// earlier or the same year would reissue numbers and is rejected.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), AngebotError> {
        if new_year <= self.year {
            return Err(AngebotError::Numbering(format!(
                "cannot move offer numbering from {} back to {new_year}",
                self.year
            )));
        }
        self.year = new_year;
        self.next = 1;
        Ok(())
    }

    /// Move to the year of `date` when it is later. Returns true if it did.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        if date.year() <= self.year {
            return false;
        }
        self.year = date.year();
        self.next = 1;
        true
    }

    fn format(&self, n: u64) -> String {
        format!("{}{}-{:0>width$}", self.prefix, self.year, n, width = self.width)
    }
}
