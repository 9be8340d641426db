use anyhow::{bail, Context, Result};
use storefront_assistant::{AssistantController, RunOutcome};
use storefront_core::SizePreset;
use storefront_editor::{EditOutcome, EditorSession};
use tokio::sync::Mutex;
use tracing::debug;

use crate::cli::Command;
use crate::terminal::Terminal;

/// Run one subcommand against the session.
pub async fn execute(
    command: Command,
    session: &Mutex<EditorSession>,
    controller: &AssistantController,
    terminal: &Terminal,
) -> Result<()> {
    debug!(?command, "Running command");
    match command {
        Command::Show { content } => {
            let session = session.lock().await;
            terminal.print_layout(&session)?;
            if content {
                terminal.print_content(&session)?;
            }
        }

        Command::Move {
            component,
            column,
            row,
        } => {
            let changed = session.lock().await.move_component(component, column, row);
            report(terminal, changed, &format!("Moved {component}"))?;
        }

        Command::Resize {
            component,
            size,
            rows,
        } => {
            let mut session = session.lock().await;
            let changed = match size.parse::<SizePreset>() {
                Ok(preset) => session.resize_preset(component, preset),
                Err(_) => {
                    let span: i64 = size
                        .parse()
                        .with_context(|| format!("invalid size '{}'", size))?;
                    session.resize(component, span, rows)
                }
            };
            report(terminal, changed, &format!("Resized {component}"))?;
        }

        Command::Swap { dragged, target } => {
            let changed = session.lock().await.drag(dragged, target);
            report(terminal, changed, &format!("Dropped {dragged} onto {target}"))?;
        }

        Command::Reorder { from, to } => {
            let changed = session.lock().await.reorder(from, to);
            report(terminal, changed, &format!("Moved #{from} to #{to}"))?;
        }

        Command::Remove { component } => {
            let changed = session.lock().await.remove(component);
            report(terminal, changed, &format!("Removed {component}"))?;
        }

        Command::Restore { component } => {
            let changed = session.lock().await.restore(component);
            report(terminal, changed, &format!("Restored {}", component.label()))?;
        }

        Command::ResetLayout => {
            session.lock().await.reset_layout();
            terminal.print_info("Layout reset to defaults.")?;
        }

        Command::ResetContent => {
            session.lock().await.reset_content();
            terminal.print_info("Content reset to defaults.")?;
        }

        Command::Edit {
            section,
            field,
            value,
        } => {
            let mut session = session.lock().await;
            if !session.content().edit_mode() {
                session.toggle_edit_mode();
            }
            let mut edit = session.begin_edit(section, &field)?;
            edit.input(value);
            match edit.blur(session.content_mut()) {
                EditOutcome::Committed(_) => {
                    terminal.print_info(&format!("Updated {section}.{field}"))?
                }
                _ => terminal.print_info("Value unchanged.")?,
            }
        }

        Command::Scheme { id } => {
            session.lock().await.set_color_scheme(&id)?;
            terminal.print_info(&format!("Color scheme set to {id}"))?;
        }

        Command::Schemes => {
            let active = session.lock().await.content().color_scheme();
            terminal.print_schemes(active)?;
        }

        Command::Events { limit } => {
            let events = session.lock().await.events();
            let skip = limit.map_or(0, |n| events.len().saturating_sub(n));
            terminal.print_events(&events[skip..])?;
        }

        Command::Context => {
            let context = session.lock().await.assistant_context();
            println!("{}", serde_json::to_string_pretty(&context)?);
        }

        Command::Apply { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let outcome = controller.process_response_str(session, &raw).await;
            print_outcome(terminal, outcome)?;
        }

        Command::Mock => {
            let outcome = controller.mock_response(session).await;
            print_outcome(terminal, outcome)?;
        }

        Command::Ask { prompt } => {
            let outcome = controller.run(session, &prompt).await;
            print_outcome(terminal, outcome)?;
        }
    }
    Ok(())
}

fn report(terminal: &Terminal, changed: bool, done: &str) -> Result<()> {
    if changed {
        terminal.print_info(done)
    } else {
        terminal.print_info("No change (unknown component, or not available in this layout mode).")
    }
}

fn print_outcome(
    terminal: &Terminal,
    outcome: Result<RunOutcome, storefront_assistant::AssistantError>,
) -> Result<()> {
    match outcome {
        Ok(outcome) => terminal.print_applied(&outcome.reason, &outcome.applied_changes),
        Err(e) => {
            terminal.print_error(&e.to_string())?;
            bail!("assistant changes were not applied")
        }
    }
}
