//! Order listing for operators without panel access.
//!
//! # Usage
//!
//! ```bash
//! otomono-cli orders list
//! otomono-cli orders list --status pending
//! ```

use std::str::FromStr;

use otomono_core::OrderStatus;

use super::{CliError, order_service_from_env};

/// List orders, newest first, optionally filtered by status.
pub async fn list(status: Option<&str>) -> Result<(), CliError> {
    let filter = status
        .map(OrderStatus::from_str)
        .transpose()
        .map_err(CliError::InvalidArg)?;

    let service = order_service_from_env()?;
    let orders = service.list().await?;

    let rows: Vec<_> = orders
        .into_iter()
        .filter(|o| filter.is_none_or(|f| o.status == f))
        .collect();

    #[allow(clippy::print_stdout)]
    {
        if rows.is_empty() {
            println!("no orders found");
            return Ok(());
        }
        println!(
            "{:<30} {:<24} {:>4} {:>10} {:<12} {}",
            "ORDER", "CUSTOMER", "QTY", "TOTAL", "STATUS", "PLACED"
        );
        for order in &rows {
            println!(
                "{:<30} {:<24} {:>4} {:>10} {:<12} {}",
                order.order_id.as_str(),
                order.customer_name,
                order.quantity,
                order.total_amount.to_string(),
                order.status.to_string(),
                order.created_at.format("%Y-%m-%d %H:%M")
            );
        }
        println!("{} order(s)", rows.len());
    }
    Ok(())
}
