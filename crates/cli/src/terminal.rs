use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};
use storefront_core::{ActionEvent, ColorScheme, ContentSection, LayoutMode};
use storefront_editor::EditorSession;

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const VISIBLE: Color = Color::Green;
    const HIDDEN: Color = Color::DarkGrey;
    const CHANGE: Color = Color::Cyan;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
}

pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }

    fn header(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print(format!("{}\n", text)),
            ResetColor,
        )?;
        Ok(())
    }

    /// Layout, theme and restore menu.
    pub fn print_layout(&self, session: &EditorSession) -> Result<()> {
        let layout = session.layout();
        let state = layout.state();
        let scheme = session.content().color_scheme();
        let prefs = session.preferences();

        self.header(&format!(
            "Layout ({} mode, {} rows) | scheme: {} | {:?}, {:?}",
            layout.mode(),
            layout.max_row(),
            scheme.id,
            prefs.mode,
            prefs.spacing
        ))?;

        let ids = match layout.mode() {
            LayoutMode::Grid => state.ordered_by_position(),
            LayoutMode::List => state.components.iter().map(|c| c.id).collect(),
        };

        let mut stdout = io::stdout();
        for (index, id) in ids.into_iter().enumerate() {
            let Some(component) = state.get(id) else {
                continue;
            };
            let color = if component.visible {
                Colors::VISIBLE
            } else {
                Colors::HIDDEN
            };
            let placement = match layout.mode() {
                LayoutMode::Grid => format!(
                    "row {:>2}  col {:>2}  span {:>2}x{}",
                    component.row, component.column, component.column_span, component.row_span
                ),
                LayoutMode::List => format!("#{}", index),
            };
            execute!(
                stdout,
                SetForegroundColor(color),
                Print(format!("  {:<18}", id.as_str())),
                ResetColor,
                Print(format!(
                    "{}{}\n",
                    placement,
                    if component.visible { "" } else { "  (hidden)" }
                )),
            )?;
        }

        let restorable = session.restorable();
        if !restorable.is_empty() {
            let labels: Vec<&str> = restorable.iter().map(|(_, label)| *label).collect();
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!("Restorable: {}\n", labels.join(", "))),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_content(&self, session: &EditorSession) -> Result<()> {
        let content = session.content().content();
        let mut stdout = io::stdout();
        for section in ContentSection::ALL {
            self.header(section.as_str())?;
            for field in section.fields() {
                let value = content.field(section, field).unwrap_or_default();
                execute!(
                    stdout,
                    SetForegroundColor(Colors::DIM),
                    Print(format!("  {:<16}", field)),
                    ResetColor,
                    Print(format!("{}\n", value.replace('\n', "\n                  "))),
                )?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_schemes(&self, active: &ColorScheme) -> Result<()> {
        let mut stdout = io::stdout();
        for scheme in ColorScheme::catalog() {
            let marker = if scheme.id == active.id { "*" } else { " " };
            execute!(
                stdout,
                Print(format!("{} {:<8} {:<10} ", marker, scheme.id, scheme.name)),
                SetForegroundColor(Colors::DIM),
                Print(format!("{} / {}\n", scheme.primary, scheme.accent)),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_events(&self, events: &[ActionEvent]) -> Result<()> {
        if events.is_empty() {
            return self.print_info("No layout events recorded.");
        }
        let mut stdout = io::stdout();
        for event in events {
            let detail = serde_json::to_string(event)?;
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!("{} ", event.timestamp.format("%Y-%m-%d %H:%M:%S"))),
                ResetColor,
                Print(format!("{:<8} {:<18} ", event.action, event.component_id)),
                SetForegroundColor(Colors::DIM),
                Print(format!("{}\n", detail)),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Applied-change lines from a change list.
    pub fn print_applied(&self, reason: &str, applied: &[String]) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("Reason: {}\n", reason)),
            ResetColor,
        )?;
        if applied.is_empty() {
            return self.print_info("No changes applied.");
        }
        for line in applied {
            execute!(
                stdout,
                SetForegroundColor(Colors::CHANGE),
                Print(format!("  ✓ {}\n", line)),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_info(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("{}\n", msg)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_error(&self, msg: &str) -> Result<()> {
        let mut stderr = io::stderr();
        execute!(
            stderr,
            SetForegroundColor(Colors::ERROR),
            Print(format!("Error: {}\n", msg)),
            ResetColor,
        )?;
        stderr.flush()?;
        Ok(())
    }
}
