// File: tests/session_persistence.rs
use chrono::NaiveDate;
use std::fs;
use tasklet::context::{AppContext, TestContext};
use tasklet::controller::{Session, SessionState};
use tasklet::model::{FixedDateParser, Task};
use tasklet::presenter::TerminalPresenter;
use tasklet::storage::LocalStorage;
use tasklet::store::TaskStore;

fn open(ctx: &TestContext) -> Session {
    let mut storage = LocalStorage::new(ctx).unwrap();
    let tasks = storage.load().unwrap();
    Session::new(TaskStore::from_tasks(tasks), Some(storage)).with_date_parser(Box::new(
        FixedDateParser::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()),
    ))
}

fn feed(session: &mut Session, lines: &[&str]) -> (SessionState, String) {
    let mut presenter = TerminalPresenter::new(Vec::new(), "");
    let mut state = SessionState::Continue;
    for line in lines {
        state = session.handle_line(line, &mut presenter);
        if state == SessionState::Exit {
            break;
        }
    }
    (state, String::from_utf8(presenter.into_inner()).unwrap())
}

#[test]
fn test_mutations_survive_a_restart() {
    let ctx = TestContext::new();

    let mut first = open(&ctx);
    assert!(first.is_persistent());
    feed(
        &mut first,
        &[
            "todo read book",
            "deadline return book /by friday 6pm",
            "mark 1",
        ],
    );
    drop(first);

    let second = open(&ctx);
    let tasks = second.store().tasks();
    assert_eq!(tasks.len(), 2);
    assert!(tasks[0].done);
    assert_eq!(
        tasks[1],
        Task::deadline(
            "return book",
            NaiveDate::from_ymd_opt(2025, 1, 17)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap()
        )
    );
}

#[test]
fn test_bye_ends_session_with_goodbye() {
    let ctx = TestContext::new();
    let mut session = open(&ctx);

    let (state, out) = feed(&mut session, &["todo a", "bye", "todo never"]);

    assert_eq!(state, SessionState::Exit);
    assert!(out.ends_with("Bye. Hope to see you again soon!\n"));
    assert_eq!(session.store().len(), 1);
}

#[test]
fn test_failed_command_does_not_touch_the_file() {
    let ctx = TestContext::new();
    let mut session = open(&ctx);
    feed(&mut session, &["todo a"]);

    let path = ctx.get_task_file_path().unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let (_, out) = feed(&mut session, &["delete 5", "event x /from today"]);

    assert_eq!(out.matches("OOPS!!!").count(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_corrupt_file_is_never_overwritten() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path().unwrap();
    fs::write(&path, "{ not json").unwrap();

    let mut storage = LocalStorage::new(&ctx).unwrap();
    assert!(storage.load().is_err());

    let mut session = Session::new(TaskStore::new(), Some(storage));
    let (_, out) = feed(&mut session, &["todo a"]);

    assert_eq!(session.store().len(), 1);
    assert!(out.contains("could not be saved"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_in_memory_session_writes_nothing() {
    let ctx = TestContext::new();
    let mut session = Session::new(TaskStore::new(), None);
    assert!(!session.is_persistent());

    feed(&mut session, &["todo a", "list"]);

    assert_eq!(session.store().len(), 1);
    assert!(!ctx.get_task_file_path().unwrap().exists());
}
