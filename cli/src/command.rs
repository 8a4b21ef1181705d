//! Line commands understood by the shell.

use std::str::FromStr;

use task_core::types::ParseEnumError;
use task_core::{TaskId, TaskPriority, TaskStatus};

pub const USAGE: &str = "\
Commands:
  title <text>               set the draft title
  description <text>         set the draft description
  priority <level>           set the draft priority (low|medium|high|critical)
  submit                     create a task from the draft
  status <id> <status>       change a task's status (todo|doing|done)
  set-priority <id> <level>  change a task's priority
  delete <id>                delete a task
  show <id>                  fetch one task from the server
  reload                     reload all tasks
  help                       show this help
  quit                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Description(String),
    Priority(TaskPriority),
    Submit,
    Status(TaskId, TaskStatus),
    SetPriority(TaskId, TaskPriority),
    Delete(TaskId),
    Show(TaskId),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("invalid task id `{0}`")]
    InvalidId(String),
    #[error(transparent)]
    InvalidValue(#[from] ParseEnumError),
}

fn parse_id(raw: Option<&str>, command: &'static str) -> Result<TaskId, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument(command, "a task id"))?;
    match raw.parse::<TaskId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CommandError::InvalidId(raw.to_string())),
    }
}

fn required<'a>(
    raw: Option<&'a str>,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    raw.ok_or(CommandError::MissingArgument(command, what))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        match name {
            "" => Err(CommandError::Empty),
            // Free text keeps inner spacing; an empty value clears the field.
            "title" => Ok(Command::Title(rest.to_string())),
            "description" => Ok(Command::Description(rest.to_string())),
            "priority" => Ok(Command::Priority(
                required(args.next(), "priority", "a level")?.parse()?,
            )),
            "submit" => Ok(Command::Submit),
            "status" => {
                let id = parse_id(args.next(), "status")?;
                let status = required(args.next(), "status", "a status")?.parse()?;
                Ok(Command::Status(id, status))
            }
            "set-priority" => {
                let id = parse_id(args.next(), "set-priority")?;
                let priority = required(args.next(), "set-priority", "a level")?.parse()?;
                Ok(Command::SetPriority(id, priority))
            }
            "delete" => Ok(Command::Delete(parse_id(args.next(), "delete")?)),
            "show" => Ok(Command::Show(parse_id(args.next(), "show")?)),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_keeps_spacing() {
        assert_eq!(
            "title  Buy  milk ".parse::<Command>().unwrap(),
            Command::Title("Buy  milk".to_string())
        );
        assert_eq!(
            "description".parse::<Command>().unwrap(),
            Command::Description(String::new())
        );
    }

    #[test]
    fn parses_task_commands() {
        assert_eq!(
            "status 3 done".parse::<Command>().unwrap(),
            Command::Status(3, TaskStatus::Done)
        );
        assert_eq!(
            "set-priority 12 critical".parse::<Command>().unwrap(),
            Command::SetPriority(12, TaskPriority::Critical)
        );
        assert_eq!("delete 1".parse::<Command>().unwrap(), Command::Delete(1));
        assert_eq!("show 4".parse::<Command>().unwrap(), Command::Show(4));
        assert_eq!("priority low".parse::<Command>().unwrap(), Command::Priority(TaskPriority::Low));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<Command>().unwrap_err(), CommandError::Empty);
        assert_eq!(
            "frobnicate".parse::<Command>().unwrap_err(),
            CommandError::Unknown("frobnicate".to_string())
        );
        assert_eq!(
            "delete".parse::<Command>().unwrap_err(),
            CommandError::MissingArgument("delete", "a task id")
        );
        assert_eq!(
            "delete -1".parse::<Command>().unwrap_err(),
            CommandError::InvalidId("-1".to_string())
        );
        assert!(matches!(
            "status 1 blocked".parse::<Command>().unwrap_err(),
            CommandError::InvalidValue(_)
        ));
    }
}
