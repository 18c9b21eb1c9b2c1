use super::*;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingOps {
    calls: Mutex<Vec<&'static str>>,
    fail_enter: bool,
}

impl TerminalOps for RecordingOps {
    fn enter(&self) -> io::Result<()> {
        self.calls.lock().unwrap().push("enter");
        if self.fail_enter {
            return Err(io::Error::other("no tty"));
        }
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        self.calls.lock().unwrap().push("leave");
        Ok(())
    }
}

#[test]
fn guard_leaves_terminal_mode_on_drop() {
    let ops = Arc::new(RecordingOps::default());
    {
        let _guard = TerminalGuard::with_ops(ops.clone()).unwrap();
    }
    assert_eq!(&*ops.calls.lock().unwrap(), &["enter", "leave"]);
}

#[test]
fn early_restore_is_not_repeated_by_drop() {
    let ops = Arc::new(RecordingOps::default());
    let guard = TerminalGuard::with_ops(ops.clone()).unwrap();
    let restorer = guard.restorer();

    restorer.restore().unwrap();
    restorer.restore().unwrap();
    drop(guard);

    assert_eq!(&*ops.calls.lock().unwrap(), &["enter", "leave"]);
}

#[test]
fn failed_enter_yields_no_guard() {
    let ops = Arc::new(RecordingOps {
        fail_enter: true,
        ..RecordingOps::default()
    });
    assert!(TerminalGuard::with_ops(ops.clone()).is_err());
    assert_eq!(&*ops.calls.lock().unwrap(), &["enter"]);
}
