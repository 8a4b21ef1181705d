//! Drives the shell with scripted input against a live mock server.

use std::io::Cursor;

use task_cli::shell::Shell;
use task_cli::transport::UreqTransport;
use task_core::{TaskApi, TaskClient, TaskController, TaskPriority, TaskStatus};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn shell(base_url: &str) -> Shell<UreqTransport> {
    let api = TaskApi::new(TaskClient::new(base_url), UreqTransport::new());
    Shell::new(TaskController::new(api))
}

fn run(shell: &mut Shell<UreqTransport>, script: &str) -> String {
    let mut out = Vec::new();
    shell.run(Cursor::new(script.to_string()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn scripted_session() {
    let mut shell = shell(&start_server());
    let output = run(
        &mut shell,
        "title Write report\n\
         description for Monday\n\
         priority high\n\
         submit\n\
         title   \n\
         submit\n\
         status 1 doing\n\
         set-priority 1 critical\n",
    );

    assert!(output.contains("No tasks yet. Create your first task above!"));
    assert!(output.contains("Tasks (1)"));

    let tasks = shell.controller().tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Write report");
    assert_eq!(tasks[0].description, "for Monday");
    assert_eq!(tasks[0].status, TaskStatus::Doing);
    assert_eq!(tasks[0].priority, TaskPriority::Critical);
    assert_eq!(shell.controller().error(), None);
}

#[test]
fn failures_show_banner_and_keep_state() {
    let mut shell = shell(&start_server());
    let output = run(&mut shell, "title keep me\nsubmit\ndelete 99\nstatus 1 done\nquit\ntitle ignored\n");

    assert!(output.contains("! Failed to delete task"));
    let tasks = shell.controller().tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::Done);
    // A later success leaves the stale banner in place.
    assert_eq!(shell.controller().error(), Some("Failed to delete task"));
    // Nothing after `quit` was read.
    assert!(shell.controller().form().draft().title.is_empty());
}

#[test]
fn bad_commands_print_usage_hint() {
    let mut shell = shell(&start_server());
    let output = run(&mut shell, "frobnicate\nstatus x done\nshow 5\n");

    assert!(output.contains("error: unknown command `frobnicate`"));
    assert!(output.contains("error: invalid task id `x`"));
    assert!(output.contains("could not fetch task 5: resource not found"));
}

#[test]
fn unreachable_server_shows_load_failure() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut shell = shell(&format!("http://{addr}"));
    let output = run(&mut shell, "");

    assert!(output.contains("! Failed to load tasks"));
    assert!(shell.controller().tasks().is_empty());
}
