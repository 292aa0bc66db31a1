use anyhow::Context;
use deckhand_client::{ActionApi, SyncCoordinator};
use deckhand_core::ActionRecord;
use std::collections::HashMap;
use std::time::Duration;

/// Poll the service and print a line per observed change. Polling stands in
/// for the streaming feed; the view converges on every cycle because a bulk
/// reload is authoritative.
pub async fn run(server: &str, interval: u64) -> anyhow::Result<()> {
    let mut coordinator = SyncCoordinator::new(ActionApi::new(server));
    coordinator
        .refresh()
        .await
        .context("failed to fetch actions")?;

    let mut previous = coordinator.snapshot();
    println!(
        "Watching {} actions (every {interval}s, ctrl-c to stop)",
        previous.len()
    );
    for record in &previous {
        println!("  {} {} [{}]", record.id, record.repo_url, record.state_label());
    }

    loop {
        tokio::time::sleep(Duration::from_secs(interval)).await;
        if let Err(e) = coordinator.refresh().await {
            // Transient fetch failures keep the last-known view; just report.
            eprintln!("refresh failed: {e:#}");
            continue;
        }
        let current = coordinator.snapshot();
        for line in changes(&previous, &current) {
            println!("{line}");
        }
        previous = current;
    }
}

/// Diff two snapshots into display lines: `+` created, `~` state change,
/// `-` removed.
fn changes(previous: &[ActionRecord], current: &[ActionRecord]) -> Vec<String> {
    let before: HashMap<u32, &ActionRecord> = previous.iter().map(|r| (r.id, r)).collect();
    let after: HashMap<u32, &ActionRecord> = current.iter().map(|r| (r.id, r)).collect();

    let mut lines = Vec::new();
    for record in current {
        match before.get(&record.id) {
            None => lines.push(format!(
                "+ {} {} [{}]",
                record.id,
                record.repo_url,
                record.state_label()
            )),
            Some(old) if old.state != record.state => lines.push(format!(
                "~ {} {} -> {}",
                record.id,
                old.state_label(),
                record.state_label()
            )),
            Some(_) => {}
        }
    }
    for record in previous {
        if !after.contains_key(&record.id) {
            lines.push(format!("- {} {}", record.id, record.repo_url));
        }
    }
    lines
}
