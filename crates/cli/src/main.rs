use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use storynav_sidebar::{InMemoryApi, SidebarApi, SidebarMapper};
use storynav_types::{KeyCombo, ShortcutAction, ShortcutKeys, State};
use storynav_util::{Platform, ShortcutPreferences, shortcut_to_human_string};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "storynav", version, about = "Build the story explorer sidebar model from a state snapshot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Map a state snapshot (JSON) to sidebar props and print them as JSON.
    Props {
        /// Path to the state snapshot.
        state: PathBuf,
        /// Platform used to label shortcuts.
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,
        /// Report that a newer version is available.
        #[arg(long)]
        update_available: bool,
        /// Activate the menu entry with this id; may be repeated.
        #[arg(long = "click", value_name = "ID")]
        clicks: Vec<String>,
    },
    /// Inspect or change shortcut bindings.
    Shortcuts {
        #[command(subcommand)]
        command: ShortcutsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum ShortcutsCommand {
    /// Print every binding with its display label.
    List {
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,
    },
    /// Rebind an action, e.g. `set toggleNav ctrl+B`.
    Set { action: String, combo: String },
    /// Restore the default bindings.
    Reset,
    /// Show which action a key combination triggers, e.g. `resolve alt+ArrowUp`.
    Resolve { combo: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    Mac,
    Other,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Mac => Platform::Mac,
            PlatformArg::Other => Platform::Other,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Props {
            state,
            platform,
            update_available,
            clicks,
        } => run_props(&state, resolve_platform(platform), update_available, &clicks),
        Command::Shortcuts { command } => run_shortcuts(command),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_platform(platform: Option<PlatformArg>) -> Platform {
    platform.map(Platform::from).unwrap_or_else(Platform::current)
}

fn load_preferences() -> ShortcutPreferences {
    ShortcutPreferences::new().unwrap_or_else(|error| {
        warn!(error = %error, "Failed to load shortcut preferences; using defaults");
        ShortcutPreferences::ephemeral()
    })
}

/// What `props` prints: the mapped props and, when entries were clicked, the
/// api call log and resulting layout.
#[derive(Debug)]
struct PropsReport {
    props: serde_json::Value,
    outcome: Option<serde_json::Value>,
}

fn run_props(path: &Path, platform: Platform, update_available: bool, clicks: &[String]) -> Result<()> {
    let data = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let state: State =
        serde_json::from_str(&data).with_context(|| format!("failed to parse state snapshot {}", path.display()))?;

    let preferences = load_preferences();
    let report = build_props_report(&state, preferences.shortcut_keys(), platform, update_available, clicks)?;
    println!("{}", serde_json::to_string_pretty(&report.props)?);
    if let Some(outcome) = report.outcome {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    Ok(())
}

fn build_props_report(
    state: &State,
    shortcut_keys: ShortcutKeys,
    platform: Platform,
    update_available: bool,
    clicks: &[String],
) -> Result<PropsReport> {
    let in_memory = Arc::new(InMemoryApi::new(state.layout, shortcut_keys).with_update_available(update_available));
    let api: Arc<dyn SidebarApi> = in_memory.clone();

    let mut mapper = SidebarMapper::new(platform);
    let props = mapper.map(state, &api);
    let props_json = serde_json::to_value(&props)?;

    if clicks.is_empty() {
        return Ok(PropsReport {
            props: props_json,
            outcome: None,
        });
    }
    for id in clicks {
        let Some(item) = props.menu.iter().find(|item| item.id == id.as_str()) else {
            let known: Vec<_> = props.menu.iter().map(|item| item.id).collect();
            bail!("no menu entry '{}'; expected one of {}", id, known.join(", "));
        };
        info!(id = item.id, title = item.title, "activating menu entry");
        item.on_click();
    }
    let outcome = serde_json::json!({
        "calls": serde_json::to_value(in_memory.calls())?,
        "layout": serde_json::to_value(in_memory.layout())?,
    });
    Ok(PropsReport {
        props: props_json,
        outcome: Some(outcome),
    })
}

/// Resolves a key combination to the action bound to it.
fn resolve_shortcut(shortcut_keys: &ShortcutKeys, combo: &str) -> Result<Option<ShortcutAction>> {
    let combo: KeyCombo = combo.parse().with_context(|| format!("invalid key combination '{combo}'"))?;
    let event = combo
        .to_key_event()
        .with_context(|| format!("'{combo}' needs exactly one non-modifier key"))?;
    Ok(shortcut_keys.action_for(&event))
}

fn run_shortcuts(command: ShortcutsCommand) -> Result<()> {
    let preferences = ShortcutPreferences::new().context("failed to open shortcut preferences")?;
    match command {
        ShortcutsCommand::List { platform } => {
            let platform = resolve_platform(platform);
            for (action, combo) in preferences.shortcut_keys().iter() {
                println!(
                    "{:<16} {:<20} {}",
                    action.as_str(),
                    combo.to_string(),
                    shortcut_to_human_string(combo, platform)
                );
            }
        }
        ShortcutsCommand::Set { action, combo } => {
            let action: ShortcutAction = action.parse()?;
            let combo: KeyCombo = combo.parse().with_context(|| format!("invalid key combination for {action}"))?;
            preferences.set_shortcut(action, combo.clone())?;
            println!("{action} = {combo} ({})", preferences.path().display());
        }
        ShortcutsCommand::Reset => {
            preferences.restore_defaults()?;
            println!("restored default shortcuts ({})", preferences.path().display());
        }
        ShortcutsCommand::Resolve { combo } => match resolve_shortcut(&preferences.shortcut_keys(), &combo)? {
            Some(action) => println!("{combo} -> {action}"),
            None => println!("{combo} is not bound"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_props_with_repeated_clicks() {
        let cli = Cli::try_parse_from([
            "storynav",
            "props",
            "state.json",
            "--platform",
            "mac",
            "--click",
            "S",
            "--click",
            "about",
        ])
        .expect("parse props");
        match cli.command {
            Command::Props {
                state,
                platform,
                update_available,
                clicks,
            } => {
                assert_eq!(state, PathBuf::from("state.json"));
                assert!(matches!(platform, Some(PlatformArg::Mac)));
                assert!(!update_available);
                assert_eq!(clicks, vec!["S", "about"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    const SNAPSHOT: &str = r#"{
        "ui": { "name": "Widgets" },
        "storyId": "button--primary",
        "layout": { "isFullscreen": false, "showPanel": true, "showNav": true, "panelPosition": "bottom" },
        "storiesHash": {
            "intro": { "id": "intro", "isComponent": true, "children": ["intro--page"] },
            "intro--page": { "id": "intro--page", "isLeaf": true, "parent": "intro", "parameters": { "docsOnly": true } },
            "button": { "id": "button", "isComponent": true, "children": ["button--primary"] },
            "button--primary": { "id": "button--primary", "isLeaf": true, "parent": "button" }
        },
        "storiesConfigured": true
    }"#;

    fn snapshot() -> State {
        serde_json::from_str(SNAPSHOT).expect("valid snapshot")
    }

    #[test]
    fn props_report_without_clicks_has_no_outcome() {
        let report = build_props_report(&snapshot(), ShortcutKeys::default(), Platform::Other, true, &[])
            .expect("build report");
        assert!(report.outcome.is_none());
        assert_eq!(report.props["title"], "Widgets");
        assert_eq!(report.props["menuHighlighted"], true);
        let story_ids: Vec<_> = report.props["stories"].as_object().expect("stories").keys().cloned().collect();
        assert_eq!(story_ids, vec!["intro--page", "button", "button--primary"]);
    }

    #[test]
    fn props_report_records_clicked_entries() {
        let clicks = vec!["S".to_string(), "D".to_string(), "about".to_string()];
        let report = build_props_report(&snapshot(), ShortcutKeys::default(), Platform::Other, false, &clicks)
            .expect("build report");
        let outcome = report.outcome.expect("clicks produce an outcome");
        assert_eq!(
            outcome["calls"],
            serde_json::json!([
                { "call": "toggleNav" },
                { "call": "togglePanelPosition" },
                { "call": "navigate", "argument": "/settings/about" }
            ])
        );
        assert_eq!(outcome["layout"]["showNav"], false);
        assert_eq!(outcome["layout"]["panelPosition"], "right");
        // Props reflect the snapshot, not the clicks that followed.
        assert_eq!(report.props["menu"][0]["left"]["kind"], "check");
    }

    #[test]
    fn unknown_menu_entry_is_rejected() {
        let clicks = vec!["zoom".to_string()];
        let error = build_props_report(&snapshot(), ShortcutKeys::default(), Platform::Other, false, &clicks)
            .expect_err("unknown id");
        let message = error.to_string();
        assert!(message.contains("no menu entry 'zoom'"), "{message}");
        assert!(message.contains("shortcuts"), "{message}");
    }

    #[test]
    fn resolves_bound_and_unbound_combos() {
        let keys = ShortcutKeys::default();
        assert_eq!(resolve_shortcut(&keys, "alt+ArrowDown").unwrap(), Some(ShortcutAction::NextComponent));
        assert_eq!(resolve_shortcut(&keys, "s").unwrap(), Some(ShortcutAction::ToggleNav));
        assert_eq!(resolve_shortcut(&keys, "ctrl+q").unwrap(), None);
        assert!(resolve_shortcut(&keys, "alt+shift").is_err());
        assert!(resolve_shortcut(&keys, "hyper+x").is_err());
    }

    #[test]
    fn parses_shortcut_rebinding() {
        let cli = Cli::try_parse_from(["storynav", "shortcuts", "set", "toggleNav", "ctrl+B"]).expect("parse set");
        assert!(matches!(
            cli.command,
            Command::Shortcuts {
                command: ShortcutsCommand::Set { ref action, ref combo }
            } if action == "toggleNav" && combo == "ctrl+B"
        ));
    }
}
