//! `billbook` command-line entry point.
//!
//! Lists invoices for the signed-in user: `billbook [all|draft|final]`.

use anyhow::{bail, Context, Result};

use billbook_auth::{FileStore, Session};
use billbook_client::{listing, ClientConfig, HttpApi};
use billbook_invoicing::StatusFilter;

#[tokio::main]
async fn main() -> Result<()> {
    billbook_observability::init();

    let filter: StatusFilter = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("unknown status filter `{arg}` (expected all, draft or final)"))?,
        None => StatusFilter::All,
    };

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, session_file = %config.session_file.display(), "starting");

    let session = Session::restore(FileStore::new(&config.session_file))
        .context("failed to read the stored session")?;
    let Some(token) = session.token() else {
        bail!("not signed in (no token in {})", config.session_file.display());
    };

    let api = HttpApi::new(&config)
        .context("failed to build the HTTP client")?
        .with_token(Some(token));

    let rows = listing::load_list(&api, filter)
        .await
        .context("failed to load invoices")?;

    if rows.is_empty() {
        println!("No invoices found.");
        return Ok(());
    }

    for row in rows {
        println!(
            "{:<12} {:<12} {:<24} {:<14} {:>12}  {:<15} {}",
            row.invoice_id,
            row.order_id,
            row.customer_name,
            row.invoice_date,
            row.grand_total,
            row.payment_status,
            row.status
        );
    }
    Ok(())
}
