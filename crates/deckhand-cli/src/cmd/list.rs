use crate::output::{print_json, print_table};
use anyhow::Context;
use deckhand_client::{ActionApi, SyncCoordinator};

pub async fn run(server: &str, json: bool) -> anyhow::Result<()> {
    let mut coordinator = SyncCoordinator::new(ActionApi::new(server));
    coordinator
        .refresh()
        .await
        .context("failed to fetch actions")?;
    let actions = coordinator.snapshot();

    if json {
        return print_json(&actions);
    }

    if actions.is_empty() {
        println!("No actions. Submit one with: deckhand create");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = actions
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.repo_url.clone(),
                a.image.clone(),
                a.state_label(),
            ]
        })
        .collect();
    print_table(&["ID", "REPOSITORY", "IMAGE", "STATE"], rows);
    Ok(())
}
