//! Task book commands: add, list, edit, remove.
use dayplan_core::api::{self as core_api, CliError, Task, TaskBook, TaskDraft, TaskPatch};

use crate::commands::cli::{OutputFormat, TaskCommand, TasksArgs};

pub fn handle_tasks(args: TasksArgs, ctx: &core_api::AppContext) -> Result<(), CliError> {
    let path = book_path(args.book.as_deref(), ctx);
    let mut book = TaskBook::open(&path)?;

    match args.action {
        TaskCommand::Add(add) => {
            let task = book.add(TaskDraft {
                name: add.name,
                duration_minutes: add.duration,
                importance: add.importance,
                deadline: add.deadline,
                ..TaskDraft::default()
            })?;
            println!("Added {}: {}", short_id(&task.id), task.name);
            book.save()?;
        }
        TaskCommand::List(list) => match list.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(book.tasks())
                    .map_err(|e| CliError::Command(e.to_string()))?;
                println!("{json}");
            }
            OutputFormat::Text => {
                if book.tasks().is_empty() {
                    println!("No tasks in {}", book.path().display());
                }
                for task in book.tasks() {
                    println!("{}", format_task_row(task));
                }
            }
        },
        TaskCommand::Edit(edit) => {
            let patch = TaskPatch {
                name: edit.name,
                duration_minutes: edit.duration,
                importance: edit.importance,
                deadline: if edit.clear_deadline {
                    Some(None)
                } else {
                    edit.deadline.map(Some)
                },
            };
            if patch.is_empty() {
                return Err(CliError::Command("nothing to edit".to_string()));
            }
            let task = book.update(&edit.id, &patch)?;
            println!("Updated {}", format_task_row(task));
            book.save()?;
        }
        TaskCommand::Remove(remove) => {
            let task = book.remove(&remove.id)?;
            println!("Removed {}: {}", short_id(&task.id), task.name);
            book.save()?;
        }
    }
    Ok(())
}

pub fn book_path(flag: Option<&str>, ctx: &core_api::AppContext) -> String {
    match flag {
        Some(p) => core_api::expand_path(p),
        None => core_api::expand_path(&ctx.cfg().tasks.book),
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn format_task_row(task: &Task) -> String {
    let deadline = task
        .deadline
        .map(|d| d.format(core_api::DEADLINE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {}  {} min  imp {}  due {}",
        short_id(&task.id),
        task.name,
        task.duration_minutes,
        task.importance,
        deadline
    )
}
