use crate::config::AppConfig;
use crate::controller::{FilterController, FilterState};
use crate::display::{format_results_text, summary_line};
use crate::export::export_csv_to_path;
use crate::menu::{LogicOp, MenuSection, build_menu, flatten_menu};
use crate::results::ResultEntry;
use std::io::{self, BufRead, Write};
use std::path::Path;

const HELP: &str = "\
Any line replaces the query. Commands:
  :and / :or        append a logical keyword
  :add TERM         append a condition (joined with AND)
  :menu             list quick filters
  :pick N           append quick filter N
  :clear            remove the query
  :text             print the current query
  :show             print the visible rows
  :export PATH      write all rows to CSV
  :quit             leave";

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub colorize: bool,
}

enum Step {
    Continue,
    Quit,
}

/// Drive a line-oriented filter session until `:quit` or end of input.
///
/// Each plain line is a text change for the controller.
pub fn run_session<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    entries: &[ResultEntry],
    controller: &mut FilterController,
    config: &AppConfig,
    options: SessionOptions,
) -> io::Result<()> {
    let menu = build_menu(&config.menu);
    writeln!(
        writer,
        "{} (type :help for commands)",
        summary_line(entries.len(), entries.len(), false)
    )?;

    for line in reader.lines() {
        let line = line?;
        match handle_line(&line, &mut writer, entries, controller, config, &menu, options)? {
            Step::Continue => {}
            Step::Quit => break,
        }
        // No input widget to focus in a line session; reading clears the one-shot request.
        if controller.take_focus_request() {
            tracing::trace!("Query input focus requested");
        }
    }

    writer.flush()
}

fn handle_line<W: Write>(
    line: &str,
    writer: &mut W,
    entries: &[ResultEntry],
    controller: &mut FilterController,
    config: &AppConfig,
    menu: &[MenuSection],
    options: SessionOptions,
) -> io::Result<Step> {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        controller.set_text(line);
        write_status(writer, entries, controller)?;
        return Ok(Step::Continue);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "q" | "quit" | "exit" => return Ok(Step::Quit),
        "help" | "h" => writeln!(writer, "{HELP}")?,
        "and" => {
            controller.append_operator(LogicOp::And);
            write_status(writer, entries, controller)?;
        }
        "or" => {
            controller.append_operator(LogicOp::Or);
            write_status(writer, entries, controller)?;
        }
        "add" if !arg.is_empty() => {
            controller.append_condition(arg);
            write_status(writer, entries, controller)?;
        }
        "menu" => write_menu(writer, menu)?,
        "pick" => {
            let items = flatten_menu(menu);
            match arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(idx) if idx < items.len() => {
                    controller.append(items[idx]);
                    write_status(writer, entries, controller)?;
                }
                _ => writeln!(writer, "Pick a number between 1 and {}", items.len())?,
            }
        }
        "clear" => {
            controller.clear();
            write_status(writer, entries, controller)?;
        }
        "text" => writeln!(writer, "query: {}", controller.text())?,
        "show" => {
            let indices = controller.visible_indices(entries);
            let filtered = controller.state() == FilterState::Filtered;
            write!(
                writer,
                "{}",
                format_results_text(entries, &indices, filtered, &config.display, options.colorize)
            )?;
        }
        "export" if !arg.is_empty() => match export_csv_to_path(entries, Path::new(arg)) {
            Ok(count) => writeln!(writer, "Exported {count} rows to {arg}")?,
            Err(e) => writeln!(writer, "Export failed: {e}")?,
        },
        _ => writeln!(writer, "Unknown command ':{name}'. Type :help for commands.")?,
    }

    Ok(Step::Continue)
}

fn write_status<W: Write>(
    writer: &mut W,
    entries: &[ResultEntry],
    controller: &FilterController,
) -> io::Result<()> {
    let visible = controller.visible_indices(entries).len();
    let filtered = controller.state() == FilterState::Filtered;
    writeln!(writer, "query: {}", controller.text())?;
    writeln!(writer, "{}", summary_line(visible, entries.len(), filtered))
}

fn write_menu<W: Write>(writer: &mut W, menu: &[MenuSection]) -> io::Result<()> {
    let mut number = 1;
    for section in menu {
        writeln!(writer, "{}:", section.title)?;
        for item in &section.items {
            writeln!(writer, "  {number:>3}. {:<14} {item}", item.label())?;
            number += 1;
        }
    }
    Ok(())
}
