//! GRC - command line host for the rules companion's action library.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grc_domain::{ActionDraft, ActionTarget};
use grc_engine::infrastructure::config::CompanionConfig;
use grc_engine::use_cases::presentation::render_action_detail;
use grc_engine::use_cases::{ChangeReport, ListedAction};
use grc_engine::App;
use grc_shared::ImportPayload;

/// Browse and edit the GURPS action library.
#[derive(Parser, Debug)]
#[command(name = "grc")]
#[command(about = "Browse and edit the GURPS Rules Companion action library")]
struct Cli {
    #[command(flatten)]
    config: CompanionConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories and their subcategories
    Categories,
    /// List the actions of one category or subcategory
    List(TargetArgs),
    /// Show default and custom entries of one list separately (GM only)
    Layers(TargetArgs),
    /// Render an action's detail pane
    Show(PositionArgs),
    /// Post an action to chat
    Chat(PositionArgs),
    /// Add a custom action
    Add {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Replace the action at a merged-view index
    Edit {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete the action at a merged-view index
    Delete(PositionArgs),
    /// Write all data to a JSON file
    Export {
        /// Output file (defaults to gurps-actions-<date>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load data from an exported JSON file
    Import {
        file: PathBuf,
    },
    /// Delete every custom action
    ResetCustom,
    /// Reload defaults from the baseline and drop all edits
    ResetAll,
}

#[derive(Args, Debug)]
struct TargetArgs {
    category: String,
    /// Subcategory inside a nested category
    #[arg(long)]
    sub: Option<String>,
}

impl TargetArgs {
    fn target(&self) -> ActionTarget {
        ActionTarget::new(self.category.clone(), self.sub.as_deref())
    }
}

#[derive(Args, Debug)]
struct PositionArgs {
    #[command(flatten)]
    target: TargetArgs,
    /// Index in the merged list, as shown by `list`
    index: usize,
}

#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long)]
    name: String,
    #[arg(long = "ref", default_value = "")]
    reference: String,
    #[arg(long, default_value = "")]
    notes: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Comma separated
    #[arg(long, default_value = "")]
    tags: String,
    #[arg(long)]
    attack: bool,
    #[arg(long)]
    movement: bool,
    #[arg(long)]
    dodge: bool,
    #[arg(long)]
    block: bool,
    #[arg(long)]
    parry: bool,
}

impl From<FormArgs> for ActionDraft {
    fn from(form: FormArgs) -> Self {
        Self {
            name: form.name,
            reference: form.reference,
            notes: form.notes,
            description: form.description,
            tags: form.tags,
            attack: form.attack,
            movement: form.movement,
            dodge: form.dodge,
            block: form.block,
            parry: form.parry,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grc_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut app = App::from_config(&cli.config)
        .await
        .context("Failed to open settings store")?;
    let report = app
        .library
        .load()
        .await
        .context("Failed to load actions data")?;
    notify(&report);

    run(&mut app, cli.command).await
}

async fn run(app: &mut App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Categories => {
            let library = &app.library;
            for category in library.main_categories() {
                println!("{} ({})", library.format_category_name(category), category);
                for sub in library.subcategories(category) {
                    println!("  - {} ({})", library.format_category_name(sub), sub);
                }
            }
        }
        Command::List(args) => {
            let target = args.target();
            let library = &app.library;
            let actions = match target.subcategory() {
                Some(sub) => library.actions_for_subcategory(target.category(), sub),
                None => library.actions_for_main_category(target.category()),
            };
            if actions.is_empty() {
                println!("No actions in {target}");
            }
            for (index, action) in actions.iter().enumerate() {
                let source = library.action_source(&target, index);
                let marker = library
                    .action(&target, index)
                    .map_or("", |view| if view.is_modified { " *" } else { "" });
                println!("{index:>3}  [{source}] {}{marker}", action.name);
            }
        }
        Command::Layers(args) => {
            let target = args.target();
            let editor = app.editor()?;
            let listing = editor.layer_listing(&target);
            if listing.is_empty() {
                println!("No actions yet. Use `grc add` to create one.");
            }
            print_layer("Default Actions", &listing.default);
            print_layer("Custom Actions", &listing.custom);
        }
        Command::Show(args) => {
            let view = app.library.action(&args.target.target(), args.index);
            println!("{}", render_action_detail(view.as_ref().map(|v| &v.action)));
        }
        Command::Chat(args) => {
            let view = app.library.action(&args.target.target(), args.index);
            app.send_to_chat()
                .execute(view.as_ref().map(|v| &v.action), &args.target.category)
                .await?;
            println!("info: sent to chat");
        }
        Command::Add { target, form } => {
            let target = target.target();
            let report = app.editor()?.save(&target, form.into(), None).await?;
            notify(&report);
            println!("info: action added");
        }
        Command::Edit { position, form } => {
            let target = position.target.target();
            let located = app
                .library
                .locate(&target, position.index)
                .with_context(|| format!("No action {} in {target}", position.index))?;
            let report = app
                .editor()?
                .save(
                    &located.target,
                    form.into(),
                    Some((located.source, located.index)),
                )
                .await?;
            notify(&report);
            println!("info: action updated");
        }
        Command::Delete(args) => {
            let target = args.target.target();
            let located = app
                .library
                .locate(&target, args.index)
                .with_context(|| format!("No action {} in {target}", args.index))?;
            let report = app
                .editor()?
                .delete(&located.target, located.source, located.index)
                .await?;
            notify(&report);
            println!("info: action deleted");
        }
        Command::Export { out } => {
            let path = out.unwrap_or_else(|| PathBuf::from(app.export_file_name()));
            let payload = app.library.export_all_data();
            let json = serde_json::to_string_pretty(&payload)?;
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("info: actions exported to {}", path.display());
        }
        Command::Import { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let payload: ImportPayload = serde_json::from_str(&text)
                .context("Failed to import file. Please check the JSON format.")?;
            let report = app.editor()?.import(payload).await?;
            notify(&report);
            println!("info: actions imported");
        }
        Command::ResetCustom => {
            let report = app.editor()?.reset_custom().await?;
            notify(&report);
            println!("info: custom actions reset");
        }
        Command::ResetAll => {
            let report = app.editor()?.reset_all().await?;
            notify(&report);
            println!("info: all actions reset to defaults");
        }
    }
    Ok(())
}

fn notify(report: &ChangeReport) {
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
}

fn print_layer(title: &str, rows: &[ListedAction]) {
    if rows.is_empty() {
        return;
    }
    println!("{title}");
    for row in rows {
        let marker = if row.is_modified { " *" } else { "" };
        println!("{:>3}  {}{marker}", row.index, row.action.name);
    }
}
