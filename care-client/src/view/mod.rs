//! Headless screen logic
//!
//! Everything a dashboard, table or form derives from fetched data:
//! load/submit state, filters, pagination, analytics, agendas and the
//! calendar grid. All functions are pure; "today" and "now" are arguments.

pub mod analytics;
pub mod calendar;
pub mod dashboard;
pub mod filter;
pub mod pagination;
pub mod state;

pub use analytics::{CategoryStats, GoalStats};
pub use calendar::{DayCell, MonthView};
pub use dashboard::{AdminOverview, ChildCard, ParentOverview, PsychologistAgenda};
pub use filter::{
    ChildFilter, ConsultationFilter, GoalFilter, InvoiceFilter, ListFilter, Recency, ReportFilter,
    UserFilter,
};
pub use pagination::{Page, Paginator};
pub use state::{Identified, LoadState, Notice, NoticeLevel, Screen};
