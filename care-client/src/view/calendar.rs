//! Month calendar of appointments

use chrono::{Datelike, Duration, NaiveDate};
use shared::models::{Consultation, ConsultationStatus};

use crate::error::{ClientError, ClientResult};

/// One day of the month grid
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Sorted by start
    pub appointments: Vec<Consultation>,
}

/// Sunday-first month grid
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st (0 = month starts on Sunday)
    pub leading_blanks: usize,
    pub days: Vec<DayCell>,
}

impl MonthView {
    /// Grid for `year`/`month`; cancelled consultations are left out
    pub fn build(year: i32, month: u32, consultations: &[Consultation]) -> ClientResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ClientError::Validation(format!("Mês inválido: {year}-{month}")))?;

        let mut days = Vec::with_capacity(31);
        let mut date = first;
        while date.month() == month {
            days.push(DayCell {
                date,
                appointments: appointments_on(consultations, date),
            });
            date += Duration::days(1);
        }

        Ok(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday() as usize,
            days,
        })
    }

    pub fn for_date(date: NaiveDate, consultations: &[Consultation]) -> ClientResult<Self> {
        Self::build(date.year(), date.month(), consultations)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Rows of 7 cells, `None` for blanks
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let mut cells: Vec<Option<&DayCell>> = vec![None; self.leading_blanks];
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(<[_]>::to_vec).collect()
    }

    /// (year, month) before and after this one
    pub fn neighbours(&self) -> ((i32, u32), (i32, u32)) {
        let prev = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        let next = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        (prev, next)
    }
}

/// Non-cancelled consultations on `date`, ordered by start
pub fn appointments_on(consultations: &[Consultation], date: NaiveDate) -> Vec<Consultation> {
    let mut items: Vec<Consultation> = consultations
        .iter()
        .filter(|c| c.date == date && c.status != ConsultationStatus::Cancelled)
        .cloned()
        .collect();
    items.sort_by_key(Consultation::scheduled_at);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn consultation(id: i64, date: &str, time: &str, status: &str) -> Consultation {
        serde_json::from_value(json!({
            "id": id, "date": date, "time": time, "reason": "Sessão", "status": status,
            "childId": 1, "psychologistId": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_month_grid() {
        // March 2024 starts on a Friday
        let view = MonthView::build(2024, 3, &[]).unwrap();
        assert_eq!(view.days.len(), 31);
        assert_eq!(view.leading_blanks, 5);
        let weeks = view.weeks();
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert_eq!(view.neighbours(), ((2024, 2), (2024, 4)));
    }

    #[test]
    fn test_leap_february() {
        let view = MonthView::build(2024, 2, &[]).unwrap();
        assert_eq!(view.days.len(), 29);
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(MonthView::build(2024, 13, &[]), Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_appointments_sorted_by_start() {
        let consultations = vec![
            consultation(1, "2024-03-05", "15:00", "scheduled"),
            consultation(2, "2024-03-05", "09:30", "done"),
            consultation(3, "2024-03-05", "11:00", "cancelled"),
            consultation(4, "2024-03-06", "08:00", "scheduled"),
        ];
        let view = MonthView::build(2024, 3, &consultations).unwrap();
        let day = view.day(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).unwrap();
        let ids: Vec<i64> = day.appointments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
