//! Example: Query the Columbus mainnet LCD for recent transactions.
//!
//! Run with: cargo run --example columbus

use terra_lcd_client::{LcdClient, TxSearchRequest, client::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let client = LcdClient::columbus();

    println!("=== Terra Columbus LCD Client ===\n");

    // 1. Recent send transactions
    println!("1. Searching for send transactions...");
    let page = client
        .txs(&TxSearchRequest::new().action("send").page(1).limit(5))
        .await?;
    println!("   Total matches: {}", page.total_count);
    println!("   Page {} of {}", page.page_number, page.page_total);
    for tx in &page.txs {
        println!(
            "   {} at height {} (gas {}/{})",
            tx.txhash, tx.height, tx.gas_used, tx.gas_wanted
        );
    }
    println!();

    // 2. Look one of them up by hash
    if let Some(first) = page.txs.first() {
        println!("2. Fetching {} by hash...", first.txhash);
        let tx = client.tx_by_hash(&first.txhash).await?;
        println!("   Height: {}", tx.height);
        println!("   Succeeded: {}", tx.succeeded());
        if let Some(timestamp) = tx.timestamp {
            println!("   Timestamp: {timestamp}");
        }
        for log in &tx.logs {
            for event in &log.events {
                println!("   Event: {} ({} attrs)", event.type_, event.attributes.len());
            }
        }
    }

    Ok(())
}
