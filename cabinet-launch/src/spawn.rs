//! Process invocation, abstracted so the dispatcher is testable.

use std::io;
use std::path::Path;

/// Starts external programs and URI hand-offs on behalf of the
/// dispatcher.
///
/// Both operations are fire-and-forget: implementations start the
/// external process and return without waiting for it or monitoring its
/// lifetime.
pub trait ProcessSpawner {
    /// Start `program` with `args`, optionally in a working directory.
    fn spawn(&self, program: &Path, args: &[String], cwd: Option<&Path>) -> io::Result<()>;

    /// Open a URI with whatever the OS has registered for its scheme.
    fn open_uri(&self, uri: &str) -> io::Result<()>;
}

/// The production spawner, backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, program: &Path, args: &[String], cwd: Option<&Path>) -> io::Result<()> {
        let mut command = std::process::Command::new(program);
        command.args(args);
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }
        // The Child handle is dropped immediately; nothing waits on it.
        command.spawn()?;
        Ok(())
    }

    fn open_uri(&self, uri: &str) -> io::Result<()> {
        #[cfg(target_os = "windows")]
        {
            // `start` needs the empty title argument so the URI isn't
            // mistaken for one.
            std::process::Command::new("cmd")
                .args(["/C", "start", "", uri])
                .spawn()?;
            Ok(())
        }
        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open").arg(uri).spawn()?;
            Ok(())
        }
        #[cfg(target_os = "linux")]
        {
            std::process::Command::new("xdg-open").arg(uri).spawn()?;
            Ok(())
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            let _ = uri;
            Err(io::Error::other("no URI handler on this platform"))
        }
    }
}
