use crate::output::print_json;
use anyhow::Context;
use deckhand_client::{ActionApi, CreateActionRequest, SyncCoordinator};

pub async fn run(
    server: &str,
    image: String,
    repo_url: String,
    action_id: u32,
    commands: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let request = CreateActionRequest {
        image,
        commands,
        repo_url,
        action_id,
    };
    let mut coordinator = SyncCoordinator::new(ActionApi::new(server));
    let record = coordinator
        .submit_action(&request)
        .await
        .context("failed to create action")?;

    if json {
        return print_json(&record);
    }

    println!("Created action {} ({})", record.id, record.state_label());
    Ok(())
}
