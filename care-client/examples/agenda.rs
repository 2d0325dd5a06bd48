//! Print a psychologist's agenda
//!
//! ```bash
//! CARE_API_URL=http://localhost:3000 \
//!   cargo run -p care-client --example agenda -- joao@clinica.pt segredo
//! ```

use care_client::logger::init_logger_from_env;
use care_client::models::Role;
use care_client::view::PsychologistAgenda;
use care_client::{CareClient, ClientResult};
use chrono::Local;

#[tokio::main]
async fn main() -> ClientResult<()> {
    init_logger_from_env();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(password)) = (args.next(), args.next()) else {
        eprintln!("usage: agenda <email> <password>");
        std::process::exit(2);
    };

    let client = CareClient::from_env()?;
    let user = client.login(&email, &password).await?;
    if user.role != Role::Psychologist {
        eprintln!("{} is not a psychologist ({})", user.name, user.role);
        return Ok(());
    }

    let children = client.children().list().await?;
    let consultations = client.consultations().list().await?;
    let agenda = PsychologistAgenda::build(
        user.id,
        &children,
        &consultations,
        Local::now().naive_local(),
    );

    println!("{} - {} children followed", user.name, agenda.followed_children);
    println!("Today:");
    for c in &agenda.today {
        println!("  {} {} ({})", c.time, c.child_name().unwrap_or("?"), c.reason);
    }
    println!("Next 7 days:");
    for c in &agenda.upcoming_week {
        println!("  {} {} {} ({})", c.date, c.time, c.child_name().unwrap_or("?"), c.reason);
    }

    client.logout()?;
    Ok(())
}
