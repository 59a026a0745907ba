//! KEYSTONE Mortgage Assistant — Demo CLI
//!
//! Runs the action-group handlers against runtime events read from a file or
//! built from flags, and prints the response envelope. The supervisor talks to
//! a scripted in-process fleet unless built with `--features bedrock` and run
//! with `--bedrock`.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- existing-mortgage --customer-id 12345
//!   cargo run -p demo -- document-status --event demo/events/document_status.json
//!   cargo run -p demo -- supervisor --input-text "What am I missing?" --trace

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keystone_contracts::{
    error::{ToolError, ToolResult},
    event::{ActionGroupEvent, Parameter},
};
use keystone_core::{
    config::SUB_AGENT_IDS_VAR, handle_raw_event, mock::MockFleet, supervisor::INPUT_TEXT_PARAM,
    traits::ActionHandler, SupervisorConfig, SupervisorRouter,
};
use keystone_ref_mortgage::{
    handlers::{
        document_status::GET_DOCUMENT_STATUS, existing_mortgage::GET_EXISTING_MORTGAGE_DETAILS,
        CUSTOMER_ID_PARAM,
    },
    DocumentStatusHandler, ExistingMortgageHandler,
};

const DEFAULT_FLEET: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/sub_agents.toml");
const DEFAULT_SUB_AGENT_FUNCTION: &str = "invoke-mortgage-application-agent";

// ── CLI definition ────────────────────────────────────────────────────────────

/// KEYSTONE — mortgage assistant action-group handlers.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "KEYSTONE mortgage assistant action-group demo",
    long_about = "Runs the KEYSTONE action-group handlers against orchestration runtime\n\
                  events and prints the response envelope as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three handlers in sequence against the scripted fleet.
    RunAll {
        /// Fleet definition for the supervisor's sub-agents.
        #[arg(long, default_value = DEFAULT_FLEET)]
        fleet: PathBuf,
    },
    /// Existing-mortgage handler (get_existing_mortgage_details).
    ExistingMortgage(ProviderArgs),
    /// Document-status handler (get_mortgage_application_document_status).
    DocumentStatus(ProviderArgs),
    /// Supervisor handler: route input text to a sub-agent.
    Supervisor(SupervisorArgs),
}

#[derive(Args)]
struct ProviderArgs {
    /// Read the runtime event from this JSON file instead of building one.
    #[arg(long)]
    event: Option<PathBuf>,
    /// Override the function name in the built event.
    #[arg(long)]
    function: Option<String>,
    #[arg(long, default_value = "12345")]
    customer_id: String,
}

#[derive(Args)]
struct SupervisorArgs {
    /// Read the runtime event from this JSON file instead of building one.
    #[arg(long)]
    event: Option<PathBuf>,
    /// Dispatch key of the sub-agent to call.
    #[arg(long, default_value = DEFAULT_SUB_AGENT_FUNCTION)]
    function: String,
    #[arg(long, default_value = "Which documents am I still missing?")]
    input_text: String,
    /// Session id for the built event. A random one is generated if omitted.
    #[arg(long)]
    session_id: Option<String>,
    /// Fleet definition for the scripted sub-agents.
    #[arg(long, default_value = DEFAULT_FLEET)]
    fleet: PathBuf,
    /// Request and log sub-agent trace frames.
    #[arg(long)]
    trace: bool,
    /// Use Amazon Bedrock Agents instead of the scripted fleet.
    #[cfg(feature = "bedrock")]
    #[arg(long)]
    bedrock: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialize structured logging.  Set RUST_LOG=info to see events and responses.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command) -> ToolResult<()> {
    match command {
        Command::RunAll { fleet } => run_all(&fleet).await,
        Command::ExistingMortgage(args) => {
            let raw = provider_event(&args, "ExistingMortgageActions", GET_EXISTING_MORTGAGE_DETAILS)?;
            run_and_print(&ExistingMortgageHandler, raw).await
        }
        Command::DocumentStatus(args) => {
            let raw = provider_event(&args, "MortgageApplicationActions", GET_DOCUMENT_STATUS)?;
            run_and_print(&DocumentStatusHandler, raw).await
        }
        Command::Supervisor(args) => run_supervisor(args).await,
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn run_and_print(handler: &dyn ActionHandler, raw: Value) -> ToolResult<()> {
    let response = handle_raw_event(handler, raw).await?;
    let rendered =
        serde_json::to_string_pretty(&response).map_err(|e| ToolError::ResponseEncoding {
            reason: e.to_string(),
        })?;
    println!("{}", rendered);
    Ok(())
}

async fn run_supervisor(args: SupervisorArgs) -> ToolResult<()> {
    let raw = match &args.event {
        Some(path) => read_event(path)?,
        None => {
            let session_id = args
                .session_id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let event = ActionGroupEvent::new(
                "SupervisorActions",
                args.function.clone(),
                vec![Parameter::new(INPUT_TEXT_PARAM, args.input_text.clone())],
            )
            .with_session_id(session_id)
            .with_session_attributes(None, None);
            to_raw(&event)?
        }
    };

    #[cfg(feature = "bedrock")]
    {
        if args.bedrock {
            let router = bedrock_supervisor(args.trace).await?;
            return run_and_print(&router, raw).await;
        }
    }

    let fleet = Arc::new(MockFleet::from_file(&args.fleet)?);
    let router = fleet_supervisor(fleet, args.trace).await?;
    run_and_print(&router, raw).await
}

/// Build a supervisor over the scripted fleet.
///
/// `SUB_AGENT_IDS` selects a subset of the fleet when set; otherwise every
/// fleet agent is registered.
async fn fleet_supervisor(fleet: Arc<MockFleet>, trace: bool) -> ToolResult<SupervisorRouter> {
    let mut config = if std::env::var(SUB_AGENT_IDS_VAR).is_ok() {
        SupervisorConfig::from_env()?
    } else {
        SupervisorConfig::new(fleet.ids())
    };
    config.enable_trace |= trace;
    info!(
        sub_agents = config.sub_agent_ids.len(),
        trace = config.enable_trace,
        "bootstrapping supervisor over scripted fleet"
    );

    SupervisorRouter::bootstrap(&config, fleet.as_ref(), fleet.clone()).await
}

#[cfg(feature = "bedrock")]
async fn bedrock_supervisor(trace: bool) -> ToolResult<SupervisorRouter> {
    use keystone_core::bedrock::{BedrockAgentDirectory, BedrockAgentRuntime};

    let mut config = SupervisorConfig::from_env()?;
    config.enable_trace |= trace;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let directory = BedrockAgentDirectory::from_conf(&sdk_config);
    let runtime = Arc::new(BedrockAgentRuntime::from_conf(&sdk_config));

    SupervisorRouter::bootstrap(&config, &directory, runtime).await
}

// ── Run-all walkthrough ───────────────────────────────────────────────────────

async fn run_all(fleet_path: &Path) -> ToolResult<()> {
    print_banner();

    println!("[1] Existing mortgage: get_existing_mortgage_details(customer_id=12345)");
    let event = ActionGroupEvent::new(
        "ExistingMortgageActions",
        GET_EXISTING_MORTGAGE_DETAILS,
        vec![Parameter::new(CUSTOMER_ID_PARAM, "12345")],
    );
    print_body(&ExistingMortgageHandler, &event).await?;

    println!("[2] Application documents: get_mortgage_application_document_status(customer_id=12345)");
    let event = ActionGroupEvent::new(
        "MortgageApplicationActions",
        GET_DOCUMENT_STATUS,
        vec![Parameter::new(CUSTOMER_ID_PARAM, "12345")],
    );
    print_body(&DocumentStatusHandler, &event).await?;

    let fleet = Arc::new(MockFleet::from_file(fleet_path)?);
    let router = fleet_supervisor(fleet, false).await?;
    let session_id = uuid::Uuid::new_v4().to_string();

    let keys: Vec<String> = router.registry().keys().map(str::to_string).collect();
    println!("[3] Supervisor: {} sub-agent(s) registered", keys.len());
    for key in &keys {
        println!("  -> {}", key);
        let event = ActionGroupEvent::new(
            "SupervisorActions",
            key.clone(),
            vec![Parameter::new(INPUT_TEXT_PARAM, "Give me a status summary.")],
        )
        .with_session_id(session_id.clone())
        .with_session_attributes(None, None);
        print_body(&router, &event).await?;
    }

    println!("[4] Supervisor: unregistered function is rejected");
    let event = ActionGroupEvent::new(
        "SupervisorActions",
        "invoke-unknown-agent",
        vec![Parameter::new(INPUT_TEXT_PARAM, "hello")],
    )
    .with_session_id(session_id)
    .with_session_attributes(None, None);
    match router.handle(&event).await {
        Err(e) => println!("  error: {}", e),
        Ok(envelope) => println!("  unexpectedly answered: {}", envelope.body()),
    }
    println!();

    println!("All selected handlers completed successfully.");
    Ok(())
}

async fn print_body(handler: &dyn ActionHandler, event: &ActionGroupEvent) -> ToolResult<()> {
    let envelope = handler.handle(event).await?;
    println!("  body: {}", envelope.body());
    println!();
    Ok(())
}

// ── Event construction ────────────────────────────────────────────────────────

fn provider_event(args: &ProviderArgs, action_group: &str, function: &str) -> ToolResult<Value> {
    if let Some(path) = &args.event {
        return read_event(path);
    }
    let event = ActionGroupEvent::new(
        action_group,
        args.function.as_deref().unwrap_or(function),
        vec![Parameter::new(CUSTOMER_ID_PARAM, args.customer_id.clone())],
    );
    to_raw(&event)
}

fn read_event(path: &Path) -> ToolResult<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| ToolError::InvalidEvent {
        reason: format!("failed to read event file '{}': {}", path.display(), e),
    })?;
    serde_json::from_str(&contents).map_err(|e| ToolError::InvalidEvent {
        reason: format!("event file '{}' is not valid JSON: {}", path.display(), e),
    })
}

fn to_raw(event: &ActionGroupEvent) -> ToolResult<Value> {
    serde_json::to_value(event).map_err(|e| ToolError::InvalidEvent {
        reason: e.to_string(),
    })
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("KEYSTONE — Mortgage Assistant Action Groups");
    println!("===========================================");
    println!();
    println!("Per invocation:");
    println!("  [1] Decode the runtime event and read named parameters (first match wins)");
    println!("  [2] Run the selected function: mock lookup, or sub-agent dispatch");
    println!("  [3] Supervisor: skip trace frames, return the first answer chunk");
    println!("  [4] Wrap the result as a single text body in the response envelope");
    println!();
}
