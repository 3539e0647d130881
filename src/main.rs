use fieldops_app::Config;
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn};

use fieldops_app::adapters::inbound::InMemoryRecordStore;
use fieldops_app::adapters::outbound::{init_console_logger, init_file_logger};
use fieldops_app::application::{BoardService, DispatchService};
use fieldops_app::domains::dispatch::BoardFilter;
use fieldops_app::domains::engineer::{Engineer, EngineerStatus};
use fieldops_app::domains::work_order::{NewWorkOrder, Priority};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting FieldOps dispatch demo");

    // Load configuration, falling back to defaults when no file is present
    let config = match Config::from_file("config.toml").await {
        Ok(config) => config,
        Err(err) => {
            warn!("config.toml not loaded ({err}), using defaults");
            Config::default()
        }
    };

    let logger = match &config.log_file {
        Some(path) => init_file_logger(path)?,
        None => init_console_logger(),
    };

    // In-memory store wiring; swap in PostgresRecordStore against a real
    // database using config.postgres.
    let store = Arc::new(InMemoryRecordStore::new());
    for (id, name, load) in [
        ("eng-ada", "Ada Fernandez", 2u32),
        ("eng-bo", "Bo Lindqvist", 0),
        ("eng-chi", "Chi Okafor", 5),
    ] {
        store
            .insert_engineer(Engineer {
                id: id.to_string(),
                name: name.to_string(),
                email: format!("{id}@fieldops.example"),
                phone: "555-0100".to_string(),
                department_id: Some("maintenance".to_string()),
                skills: vec!["hvac".to_string(), "electrical".to_string()],
                status: EngineerStatus::Active,
                total_projects: load,
                completed_projects: load,
            })
            .await;
    }

    let dispatch = DispatchService::new(
        store.clone(),
        store.clone(),
        logger,
        config.dispatch.clone(),
    );
    let board = BoardService::new(store.clone(), store.clone(), store.clone());

    // Walk one work order through its whole lifecycle.
    let picks = board.recommendations(chrono::Utc::now()).await?;
    info!(
        "recommended engineers: {:?}",
        picks.iter().map(|e| e.name.as_str()).collect::<Vec<_>>()
    );

    let draft = NewWorkOrder {
        title: "Replace compressor belt".to_string(),
        description: "Unit 7 compressor belt shows cracking".to_string(),
        location: "Plant 4, roof level".to_string(),
        priority: Priority::High,
        assigned_engineer_id: None,
        estimated_minutes: 150,
        due_date: None,
    };
    let order = dispatch.create_work_order(draft, None).await?;
    info!(id = %order.id, status = %order.status, "created");

    let engineer = picks.first().expect("seeded roster has active engineers");
    let order = dispatch.assign_engineer(&order.id, &engineer.id, None).await?;
    info!(id = %order.id, status = %order.status, engineer = %engineer.name, "assigned");

    let order = dispatch.start_work(&order.id).await?;
    info!(id = %order.id, status = %order.status, "started");

    let order = dispatch.complete_work(&order.id).await?;
    info!(id = %order.id, status = %order.status, "completed");

    let view = board.board_view(&BoardFilter::default()).await?;
    info!(
        "board: {} unassigned / {} assigned / {} in progress / {} completed",
        view.columns.unassigned.len(),
        view.columns.assigned.len(),
        view.columns.in_progress.len(),
        view.columns.completed.len(),
    );
    info!("priority totals: {:?}", view.priorities);

    Ok(())
}
