//! Read-eval-render loop over a [`TaskController`].

use std::io::{self, BufRead, Write};

use task_core::{FormField, TaskController, TaskList, Transport};

use crate::command::{Command, USAGE};

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<T> {
    controller: TaskController<T>,
}

impl<T: Transport> Shell<T> {
    pub fn new(controller: TaskController<T>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &TaskController<T> {
        &self.controller
    }

    /// Mounts the controller, then handles one command per input line and
    /// re-renders after each. Stops at `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        self.controller.mount();
        self.render(&mut out)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.handle(command, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => {
                    writeln!(out, "error: {err}")?;
                    writeln!(out, "type `help` for a list of commands")?;
                    continue;
                }
            }
            self.render(&mut out)?;
        }
        Ok(())
    }

    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        tracing::debug!(?command, "handling command");
        let controller = &mut self.controller;
        match command {
            Command::Title(title) => controller.edit_form(FormField::Title(title)),
            Command::Description(text) => controller.edit_form(FormField::Description(text)),
            Command::Priority(priority) => controller.edit_form(FormField::Priority(priority)),
            Command::Submit => controller.submit_form(),
            Command::Status(id, status) => {
                let action = TaskList::new(controller.tasks()).status_changed(id, status);
                controller.dispatch(action);
            }
            Command::SetPriority(id, priority) => {
                let action = TaskList::new(controller.tasks()).priority_changed(id, priority);
                controller.dispatch(action);
            }
            Command::Delete(id) => {
                let action = TaskList::new(controller.tasks()).delete_clicked(id);
                controller.dispatch(action);
            }
            Command::Show(id) => match controller.fetch_task(id) {
                Ok(task) => writeln!(
                    out,
                    "#{} {} [{} / {}] created {} updated {}\n{}",
                    task.id,
                    task.title,
                    task.status,
                    task.priority,
                    task.created_at,
                    task.updated_at,
                    task.description
                )?,
                Err(err) => writeln!(out, "could not fetch task {id}: {err}")?,
            },
            Command::Reload => controller.load(),
            Command::Help => writeln!(out, "{USAGE}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.controller.view().render_text())?;
        out.flush()
    }
}
