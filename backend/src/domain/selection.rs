//! Worked/not-worked state of every cell of the displayed month.

use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;

use crate::domain::models::{CalendarCell, EngineError};

/// Owns the cell sequence for one displayed month.
///
/// The store is replaced wholesale on every month change; cell identity
/// never survives a rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    cells: Vec<CalendarCell>,
}

impl SelectionStore {
    pub fn new(cells: Vec<CalendarCell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flip a working-day cell. Weekend and placeholder cells are left
    /// untouched and report `false`.
    pub fn toggle(&mut self, index: usize) -> Result<bool, EngineError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(EngineError::CellOutOfRange { index, len })?;

        if !cell.is_toggleable() {
            debug!("Ignoring toggle of non-working cell {}", index);
            return Ok(false);
        }

        cell.is_worked = !cell.is_worked;
        Ok(true)
    }

    /// Mark exactly the cells whose `YYYY-MM-DD` rendering appears in
    /// `persisted`; every other real cell becomes unworked.
    pub fn apply_persisted<S: AsRef<str>>(&mut self, persisted: &[S]) {
        let saved: HashSet<&str> = persisted.iter().map(|d| d.as_ref()).collect();

        for cell in self.cells.iter_mut() {
            if let Some(iso) = cell.iso_date() {
                cell.is_worked = saved.contains(iso.as_str());
            }
        }
    }

    /// Worked working days in ascending date order
    pub fn worked_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .cells
            .iter()
            .filter(|cell| cell.counts_as_worked())
            .filter_map(|cell| cell.date)
            .collect();
        dates.sort();
        dates
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.cells.iter().position(|cell| cell.date == Some(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::CalendarService;

    fn february_2024() -> SelectionStore {
        // Thursday start: three placeholders
        SelectionStore::new(CalendarService::new().build_month_grid(2024, 2).unwrap())
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    #[test]
    fn test_toggle_working_day() {
        let mut store = february_2024();
        let index = store.index_of(date(1)).unwrap();

        assert!(store.toggle(index).unwrap());
        assert!(store.cells()[index].is_worked);
        assert!(store.toggle(index).unwrap());
        assert!(!store.cells()[index].is_worked);
    }

    #[test]
    fn test_toggle_placeholder_and_weekend_is_noop() {
        let mut store = february_2024();
        let before = store.clone();

        assert!(!store.toggle(0).unwrap());
        let saturday = store.index_of(date(3)).unwrap();
        assert!(!store.toggle(saturday).unwrap());

        assert_eq!(store, before);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut store = february_2024();
        let len = store.len();

        assert!(matches!(
            store.toggle(len),
            Err(EngineError::CellOutOfRange { index, .. }) if index == len
        ));
    }

    #[test]
    fn test_apply_persisted_replaces_selection() {
        let mut store = february_2024();
        let first = store.index_of(date(1)).unwrap();
        store.toggle(first).unwrap();

        store.apply_persisted(&["2024-02-05", "2024-02-06", "2024-03-01"]);

        assert!(!store.cells()[first].is_worked);
        assert_eq!(store.worked_dates(), vec![date(5), date(6)]);
        assert!(store.cells()[..3].iter().all(|c| !c.is_worked));
    }

    #[test]
    fn test_persisted_weekend_is_marked_but_not_counted() {
        let mut store = february_2024();
        store.apply_persisted(&["2024-02-03".to_string()]);

        let saturday = store.index_of(date(3)).unwrap();
        assert!(store.cells()[saturday].is_worked);
        assert!(store.worked_dates().is_empty());
    }
}
