//! Role dashboards
//!
//! Admin: counts across the practice. Parent: one card per child.
//! Psychologist: today's agenda and the coming week.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use shared::models::{Child, ChildStatus, Consultation, ConsultationStatus, Invoice, InvoiceStatus, Role, User};

/// Scheduled consultations sorted by start
fn scheduled<'a>(consultations: impl IntoIterator<Item = &'a Consultation>) -> Vec<Consultation> {
    let mut items: Vec<Consultation> = consultations
        .into_iter()
        .filter(|c| c.status == ConsultationStatus::Scheduled)
        .cloned()
        .collect();
    items.sort_by_key(Consultation::scheduled_at);
    items
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminOverview {
    /// One entry per role, zero counts included
    pub users_by_role: BTreeMap<String, usize>,
    pub active_users: usize,
    pub inactive_users: usize,
    pub active_children: usize,
    pub consultations_today: usize,
    pub consultations_this_month: usize,
    pub pending_invoices: usize,
    pub pending_total: Decimal,
    pub overdue_invoices: usize,
}

impl AdminOverview {
    pub fn build(
        users: &[User],
        children: &[Child],
        consultations: &[Consultation],
        invoices: &[Invoice],
        today: NaiveDate,
    ) -> Self {
        let mut overview = Self {
            users_by_role: Role::ALL.iter().map(|r| (r.as_str().to_string(), 0)).collect(),
            ..Self::default()
        };

        for user in users {
            *overview
                .users_by_role
                .entry(user.role.as_str().to_string())
                .or_default() += 1;
            if user.is_active {
                overview.active_users += 1;
            } else {
                overview.inactive_users += 1;
            }
        }

        overview.active_children = children
            .iter()
            .filter(|c| c.status == ChildStatus::Active)
            .count();

        for c in consultations.iter().filter(|c| c.status != ConsultationStatus::Cancelled) {
            if c.date == today {
                overview.consultations_today += 1;
            }
            if c.date.year() == today.year() && c.date.month() == today.month() {
                overview.consultations_this_month += 1;
            }
        }

        for invoice in invoices.iter().filter(|i| i.status == InvoiceStatus::Pending) {
            overview.pending_invoices += 1;
            overview.pending_total += invoice.total;
            if invoice.is_overdue(today) {
                overview.overdue_invoices += 1;
            }
        }

        overview
    }

    pub fn users_with_role(&self, role: Role) -> usize {
        self.users_by_role.get(role.as_str()).copied().unwrap_or(0)
    }
}

/// One child on the parent dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct ChildCard {
    pub child: Child,
    pub age: u32,
    pub next_consultation: Option<Consultation>,
    pub done_consultations: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParentOverview {
    pub children: Vec<ChildCard>,
    /// Next scheduled consultation across all children
    pub next_consultation: Option<Consultation>,
}

impl ParentOverview {
    /// Cards for the children of `parent_id`, by name
    pub fn build(
        parent_id: i64,
        children: &[Child],
        consultations: &[Consultation],
        now: NaiveDateTime,
    ) -> Self {
        let mut cards: Vec<ChildCard> = children
            .iter()
            .filter(|c| c.parent_id == parent_id)
            .map(|child| {
                let own = consultations.iter().filter(|c| c.child_id == child.id);
                ChildCard {
                    child: child.clone(),
                    age: child.age_on(now.date()),
                    next_consultation: scheduled(own.clone())
                        .into_iter()
                        .find(|c| c.scheduled_at() >= now),
                    done_consultations: own
                        .filter(|c| c.status == ConsultationStatus::Done)
                        .count(),
                }
            })
            .collect();
        cards.sort_by(|a, b| a.child.name.cmp(&b.child.name));

        let next_consultation = cards
            .iter()
            .filter_map(|card| card.next_consultation.as_ref())
            .min_by_key(|c| c.scheduled_at())
            .cloned();

        Self {
            children: cards,
            next_consultation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PsychologistAgenda {
    /// Today's scheduled consultations, by time (past ones included)
    pub today: Vec<Consultation>,
    /// Tomorrow through the next 7 days
    pub upcoming_week: Vec<Consultation>,
    /// First scheduled consultation at or after `now`
    pub next: Option<Consultation>,
    pub followed_children: usize,
}

impl PsychologistAgenda {
    pub fn build(
        psychologist_id: i64,
        children: &[Child],
        consultations: &[Consultation],
        now: NaiveDateTime,
    ) -> Self {
        let today = now.date();
        let week_end = today + Duration::days(7);
        let own = scheduled(
            consultations
                .iter()
                .filter(|c| c.psychologist_id == psychologist_id),
        );

        Self {
            today: own.iter().filter(|c| c.date == today).cloned().collect(),
            upcoming_week: own
                .iter()
                .filter(|c| c.date > today && c.date <= week_end)
                .cloned()
                .collect(),
            next: own.iter().find(|c| c.scheduled_at() >= now).cloned(),
            followed_children: children
                .iter()
                .filter(|c| c.is_followed_by(psychologist_id))
                .count(),
        }
    }
}
