//! List filters
//!
//! Each filter is a conjunction of independent predicates over one item,
//! so applying two filters in either order gives the same rows.

use chrono::NaiveDate;
use shared::models::{
    Child, ChildStatus, Consultation, ConsultationStatus, Goal, GoalStatus, Invoice, InvoiceStatus,
    Report, Role, User,
};

/// Case-insensitive substring match of `query` against any field.
/// A blank query matches everything.
pub fn matches_text<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
}

/// Pure predicate over list items
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// Rows this filter keeps, in source order
    fn apply(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }

    fn count(&self, items: &[T]) -> usize {
        items.iter().filter(|i| self.matches(i)).count()
    }
}

// ========== Children ==========

#[derive(Debug, Clone, Default)]
pub struct ChildFilter {
    pub status: Option<ChildStatus>,
    pub search: String,
    pub parent_id: Option<i64>,
    pub psychologist_id: Option<i64>,
}

impl ChildFilter {
    pub fn status(status: ChildStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: query.into(),
            ..Default::default()
        }
    }
}

impl ListFilter<Child> for ChildFilter {
    fn matches(&self, child: &Child) -> bool {
        self.status.is_none_or(|s| child.status == s)
            && self.parent_id.is_none_or(|p| child.parent_id == p)
            && self.psychologist_id.is_none_or(|p| child.is_followed_by(p))
            && matches_text(
                &self.search,
                [
                    child.name.as_str(),
                    child.parent.as_ref().map(|p| p.name.as_str()).unwrap_or_default(),
                ],
            )
    }
}

// ========== Users ==========

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub active: Option<bool>,
    pub search: String,
}

impl UserFilter {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Default::default()
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: query.into(),
            ..Default::default()
        }
    }
}

impl ListFilter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        self.role.is_none_or(|r| user.role == r)
            && self.active.is_none_or(|a| user.is_active == a)
            && matches_text(
                &self.search,
                [
                    user.name.as_str(),
                    user.email.as_str(),
                    user.phone.as_deref().unwrap_or_default(),
                ],
            )
    }
}

// ========== Consultations ==========

/// Position of a consultation's date relative to today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Recency {
    #[default]
    All,
    Upcoming,
    Today,
    Past,
}

impl Recency {
    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Recency::All => true,
            Recency::Upcoming => date > today,
            Recency::Today => date == today,
            Recency::Past => date < today,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsultationFilter {
    pub today: NaiveDate,
    pub status: Option<ConsultationStatus>,
    pub recency: Recency,
    pub search: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub child_id: Option<i64>,
    pub psychologist_id: Option<i64>,
}

impl ConsultationFilter {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            status: None,
            recency: Recency::All,
            search: String::new(),
            from: None,
            to: None,
            child_id: None,
            psychologist_id: None,
        }
    }

    pub fn with_status(mut self, status: ConsultationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_recency(mut self, recency: Recency) -> Self {
        self.recency = recency;
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Matching rows ordered for display: upcoming soonest first, others latest first
    pub fn apply_sorted(&self, items: &[Consultation]) -> Vec<Consultation> {
        let mut rows = self.apply(items);
        match self.recency {
            Recency::Upcoming | Recency::Today => rows.sort_by_key(Consultation::scheduled_at),
            Recency::Past | Recency::All => {
                rows.sort_by_key(|c| std::cmp::Reverse(c.scheduled_at()))
            }
        }
        rows
    }
}

impl ListFilter<Consultation> for ConsultationFilter {
    fn matches(&self, c: &Consultation) -> bool {
        self.status.is_none_or(|s| c.status == s)
            && self.recency.matches(c.date, self.today)
            && in_range(c.date, self.from, self.to)
            && self.child_id.is_none_or(|id| c.child_id == id)
            && self.psychologist_id.is_none_or(|id| c.psychologist_id == id)
            && matches_text(
                &self.search,
                [
                    c.reason.as_str(),
                    c.notes.as_deref().unwrap_or_default(),
                    c.child_name().unwrap_or_default(),
                    c.psychologist_name().unwrap_or_default(),
                ],
            )
    }
}

// ========== Goals ==========

#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    pub status: Option<GoalStatus>,
    pub category_id: Option<i64>,
    /// Keep goals of these consultations only (e.g. one child's consultations)
    pub consultation_ids: Option<Vec<i64>>,
    pub search: String,
}

impl ListFilter<Goal> for GoalFilter {
    fn matches(&self, goal: &Goal) -> bool {
        self.status.is_none_or(|s| goal.status == s)
            && self.category_id.is_none_or(|id| goal.category_id == Some(id))
            && self
                .consultation_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&goal.consultation_id))
            && matches_text(
                &self.search,
                [
                    goal.title.as_str(),
                    goal.description.as_deref().unwrap_or_default(),
                ],
            )
    }
}

// ========== Invoices ==========

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: String,
}

impl ListFilter<Invoice> for InvoiceFilter {
    fn matches(&self, invoice: &Invoice) -> bool {
        self.status.is_none_or(|s| invoice.status == s)
            && self.customer_id.is_none_or(|id| invoice.customer_id == id)
            && in_range(invoice.date, self.from, self.to)
            && matches_text(
                &self.search,
                [
                    invoice.number.as_str(),
                    invoice
                        .customer
                        .as_ref()
                        .map(|c| c.name.as_str())
                        .unwrap_or_default(),
                ],
            )
    }
}

// ========== Reports ==========

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub search: String,
    /// Compared against the creation date
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ListFilter<Report> for ReportFilter {
    fn matches(&self, report: &Report) -> bool {
        let dated = match report.created_at {
            Some(at) => in_range(at.date_naive(), self.from, self.to),
            None => self.from.is_none() && self.to.is_none(),
        };
        dated
            && matches_text(
                &self.search,
                [
                    report.title.as_str(),
                    report.description.as_deref().unwrap_or_default(),
                ],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserRef;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn child(id: i64, name: &str, status: ChildStatus) -> Child {
        Child {
            id,
            name: name.into(),
            birthdate: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
            gender: None,
            parent_id: 100 + id,
            psychologist_id: None,
            status,
            parent: Some(UserRef { id: 100 + id, name: format!("Pai {name}") }),
            psychologists: vec![],
        }
    }

    fn consultation(id: i64, date: NaiveDate, status: ConsultationStatus, reason: &str) -> Consultation {
        Consultation {
            id,
            date,
            time: "10:00".into(),
            reason: reason.into(),
            status,
            notes: None,
            child_id: 1,
            psychologist_id: 9,
            start_at: None,
            end_at: None,
            is_in_person: None,
            location: None,
            child: Some(UserRef { id: 1, name: "Bia".into() }),
            psychologist: None,
        }
    }

    #[test]
    fn test_matches_text() {
        assert!(matches_text("", ["x"]));
        assert!(matches_text("  ANA ", ["Mariana"]));
        assert!(!matches_text("ana", ["Bia", ""]));
    }

    #[test]
    fn test_child_filters_commute() {
        let children = vec![
            child(1, "Ana", ChildStatus::Active),
            child(2, "Anabela", ChildStatus::Inactive),
            child(3, "Bruno", ChildStatus::Active),
            child(4, "Joana", ChildStatus::Active),
        ];
        let status = ChildFilter::status(ChildStatus::Active);
        let search = ChildFilter::search("ana");

        let a = search.apply(&status.apply(&children));
        let b = status.apply(&search.apply(&children));
        assert_eq!(a, b);
        let ids: Vec<i64> = a.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_child_search_includes_parent_name() {
        let children = vec![child(1, "Ana", ChildStatus::Active), child(3, "Bruno", ChildStatus::Active)];
        assert_eq!(ChildFilter::search("pai bruno").count(&children), 1);
    }

    #[test]
    fn test_user_filters_commute() {
        let user = |id: i64, name: &str, role: Role, active: bool| User {
            id,
            name: name.into(),
            email: format!("{}@clinic.test", name.to_lowercase()),
            phone: None,
            birthdate: None,
            gender: None,
            role,
            is_active: active,
        };
        let users = vec![
            user(1, "Carla", Role::Psychologist, true),
            user(2, "Carlos", Role::Parent, true),
            user(3, "Caio", Role::Psychologist, false),
            user(4, "Dora", Role::Psychologist, true),
        ];
        let role = UserFilter::role(Role::Psychologist);
        let search = UserFilter::search("car");
        assert_eq!(search.apply(&role.apply(&users)), role.apply(&search.apply(&users)));
        assert_eq!(UserFilter::search("dora@").count(&users), 1);
        assert_eq!(UserFilter::active(false).count(&users), 1);
    }

    #[test]
    fn test_consultation_filters_commute() {
        let today = day(15);
        let items = vec![
            consultation(1, day(10), ConsultationStatus::Done, "Ansiedade"),
            consultation(2, day(15), ConsultationStatus::Scheduled, "Ansiedade escolar"),
            consultation(3, day(20), ConsultationStatus::Scheduled, "Sono"),
            consultation(4, day(21), ConsultationStatus::Cancelled, "ansiedade"),
        ];
        let status = ConsultationFilter::new(today).with_status(ConsultationStatus::Scheduled);
        let search = ConsultationFilter::new(today).with_search("ansiedade");
        let a = search.apply(&status.apply(&items));
        let b = status.apply(&search.apply(&items));
        assert_eq!(a, b);
        assert_eq!(a.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_recency() {
        let today = day(15);
        let items = vec![
            consultation(1, day(14), ConsultationStatus::Done, "a"),
            consultation(2, day(15), ConsultationStatus::Scheduled, "b"),
            consultation(3, day(16), ConsultationStatus::Scheduled, "c"),
        ];
        let ids = |r: Recency| {
            ConsultationFilter::new(today)
                .with_recency(r)
                .apply(&items)
                .iter()
                .map(|c| c.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Recency::Upcoming), vec![3]);
        assert_eq!(ids(Recency::Today), vec![2]);
        assert_eq!(ids(Recency::Past), vec![1]);
        assert_eq!(ids(Recency::All), vec![1, 2, 3]);
    }

    #[test]
    fn test_sorted_and_range() {
        let today = day(1);
        let items = vec![
            consultation(1, day(20), ConsultationStatus::Scheduled, "a"),
            consultation(2, day(5), ConsultationStatus::Scheduled, "b"),
            consultation(3, day(12), ConsultationStatus::Scheduled, "c"),
        ];
        let upcoming = ConsultationFilter::new(today).with_recency(Recency::Upcoming);
        let ids: Vec<i64> = upcoming.apply_sorted(&items).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let ranged = ConsultationFilter::new(today).with_range(Some(day(5)), Some(day(12)));
        let ids: Vec<i64> = ranged.apply_sorted(&items).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_report_range_excludes_undated() {
        let report = Report {
            id: 1,
            title: "Relatório inicial".into(),
            description: None,
            consultation_id: 1,
            created_at: None,
            updated_at: None,
        };
        let reports = vec![report];
        assert_eq!(ReportFilter::default().count(&reports), 1);
        let ranged = ReportFilter {
            from: Some(day(1)),
            ..Default::default()
        };
        assert_eq!(ranged.count(&reports), 0);
    }
}
