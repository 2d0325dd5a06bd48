//! Per-resource repositories
//!
//! Each repository borrows the [`CareClient`](crate::CareClient) and maps one
//! backend resource to typed calls. Calls never catch errors; they surface
//! to the caller as [`ClientError`](crate::ClientError).

mod categories;
mod chats;
mod children;
mod consultations;
mod goals;
mod invoices;
mod locations;
mod profile;
mod reports;
mod users;

pub use categories::CategoryRepository;
pub use chats::ChatRepository;
pub use children::ChildRepository;
pub use consultations::ConsultationRepository;
pub use goals::GoalRepository;
pub use invoices::InvoiceRepository;
pub use locations::LocationRepository;
pub use profile::ProfileRepository;
pub use reports::ReportRepository;
pub use users::UserRepository;

use serde::de::DeserializeOwned;

use crate::CareClient;
use crate::error::{ClientError, ClientResult};

/// Lite list with graceful degradation.
///
/// Tries `lite_path?search=query`; if the backend has no such endpoint
/// (404) it fetches `full_path`, keeps the items `matches` accepts and maps
/// them to the lite shape, preserving backend order. An empty query keeps
/// every item.
pub(crate) async fn lite_with_fallback<Full, Lite, F>(
    client: &CareClient,
    lite_path: &str,
    full_path: &str,
    query: &str,
    matches: F,
) -> ClientResult<Vec<Lite>>
where
    Full: DeserializeOwned,
    Lite: DeserializeOwned + for<'a> From<&'a Full>,
    F: Fn(&Full, &str) -> bool,
{
    let query = query.trim();
    let params: Vec<(&str, &str)> = if query.is_empty() {
        Vec::new()
    } else {
        vec![("search", query)]
    };

    match client.get_query::<Vec<Lite>>(lite_path, &params).await {
        Err(ClientError::NotFound(_)) => {
            tracing::warn!(
                "{} not available, filtering {} in memory",
                lite_path,
                full_path
            );
            let items: Vec<Full> = client.get(full_path).await?;
            Ok(items
                .iter()
                .filter(|item| query.is_empty() || matches(item, query))
                .map(Lite::from)
                .collect())
        }
        other => other,
    }
}
