use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use dayplan_core::api::{ModeKind, NotesStrategy};

#[derive(Parser, Debug)]
#[command(name = "dayplan", version, about = "Plan a day of tasks and work through it")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.dayplan/config.toml, then ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the task book
    Tasks(TasksArgs),
    /// Print today's schedule
    Plan(PlanArgs),
    /// Plan, then execute the schedule
    Run(RunArgs),
    /// Query the configured note lookup
    Notes(NotesArgs),
    /// List registered tools
    Tools,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub action: TaskCommand,

    /// Task book path (default from config: ~/.dayplan/tasks.json)
    #[arg(long, global = true)]
    pub book: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    Add(TaskAddArgs),
    List(TaskListArgs),
    Edit(TaskEditArgs),
    Remove(TaskRemoveArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TaskAddArgs {
    #[arg(long)]
    pub name: String,

    /// Duration in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: i64,

    /// 1 (low) to 5 (high)
    #[arg(long, allow_hyphen_values = true)]
    pub importance: i64,

    /// YYYY-MM-DD
    #[arg(long)]
    pub deadline: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TaskListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TaskEditArgs {
    /// Task id or unique id prefix
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<i64>,

    #[arg(long, allow_hyphen_values = true)]
    pub importance: Option<i64>,

    #[arg(long, conflicts_with = "clear_deadline")]
    pub deadline: Option<String>,

    #[arg(long)]
    pub clear_deadline: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TaskRemoveArgs {
    /// Task id or unique id prefix
    pub id: String,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFormat {
    Text,
    Jsonl,
}

impl StreamFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Jsonl => "jsonl",
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Sequential,
    Parallel,
}

impl From<ModeArg> for ModeKind {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Sequential => ModeKind::Sequential,
            ModeArg::Parallel => ModeKind::Parallel,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesArg {
    None,
    Keyword,
    Substring,
    Embedding,
}

impl From<NotesArg> for NotesStrategy {
    fn from(n: NotesArg) -> Self {
        match n {
            NotesArg::None => NotesStrategy::None,
            NotesArg::Keyword => NotesStrategy::Keyword,
            NotesArg::Substring => NotesStrategy::Substring,
            NotesArg::Embedding => NotesStrategy::Embedding,
        }
    }
}

/// Where tasks come from and how the day is shaped.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct PlanningArgs {
    /// Task file (JSON or TOML); defaults to the task book
    #[arg(long)]
    pub tasks: Option<PathBuf>,

    /// Task book path, used when --tasks is not given
    #[arg(long)]
    pub book: Option<String>,

    /// Available hours
    #[arg(long)]
    pub hours: Option<u32>,

    /// Start time, HH:MM
    #[arg(long)]
    pub start: Option<String>,

    /// Day to plan, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub planning: PlanningArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Note lookup selection shared by `run` and `notes`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct NotesSourceArgs {
    #[arg(long, value_enum)]
    pub notes: Option<NotesArg>,

    /// Document glob for substring/embedding lookup; repeatable
    #[arg(long = "docs", action = clap::ArgAction::Append)]
    pub docs: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub planning: PlanningArgs,

    #[command(flatten)]
    pub notes: NotesSourceArgs,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    #[arg(long)]
    pub max_workers: Option<usize>,

    /// Skip the tool call for each task
    #[arg(long)]
    pub no_tools: bool,

    #[arg(long, value_enum, default_value_t = StreamFormat::Text)]
    pub stream_format: StreamFormat,

    /// Do not sleep between progress ticks
    #[arg(long)]
    pub fast: bool,

    /// ASCII markers instead of emoji
    #[arg(long)]
    pub ascii: bool,

    /// Show progress bars
    #[arg(long)]
    pub progress: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct NotesArgs {
    pub query: String,

    #[command(flatten)]
    pub source: NotesSourceArgs,

    #[arg(long)]
    pub limit: Option<usize>,
}
