use crate::command::{Command, HELP};
use anyhow::{Result, anyhow, bail};
use std::io::{BufRead, Write};
use strqueue::{FaultInjector, Queue, handle};

pub(crate) enum Step {
    Continue,
    Quit,
}

/// Interpreter state: the queue under test and the fault settings applied
/// to every queue it creates.
pub(crate) struct Session {
    queue: Option<Queue>,
    fail_rate: u8,
    seed: Option<u64>,
    bufsize: usize,
}

impl Session {
    pub fn new(bufsize: usize) -> Self {
        Self {
            queue: None,
            fail_rate: 0,
            seed: None,
            bufsize,
        }
    }

    pub fn fail_rate(&mut self, pct: u8) -> &mut Self {
        self.fail_rate = pct;
        self.install_faults();
        self
    }

    pub fn seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self.install_faults();
        self
    }

    fn install_faults(&mut self) {
        let Some(q) = self.queue.as_mut() else {
            return;
        };
        let faults = match (self.fail_rate, self.seed) {
            (0, _) => None,
            (pct, Some(seed)) => Some(FaultInjector::with_seed(pct, seed)),
            (pct, None) => Some(FaultInjector::new(pct)),
        };
        q.set_faults(faults);
    }

    /// Runs every command from `input`, returning the number of failures.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write, strict: bool) -> Result<usize> {
        let mut failures = 0;
        for (lineno, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            writeln!(out, "cmd> {line}")?;
            let step = line
                .parse::<Command>()
                .map_err(|e| anyhow!(e))
                .and_then(|cmd| self.execute(&cmd, out));
            match step {
                Ok(Step::Continue) => {},
                Ok(Step::Quit) => break,
                Err(e) => {
                    failures += 1;
                    tracing::warn!("command failed, line={}: {e}", lineno + 1);
                    writeln!(out, "ERROR: {e}")?;
                    if strict {
                        break;
                    }
                },
            }
        }
        Ok(failures)
    }

    pub fn execute(&mut self, cmd: &Command, out: &mut impl Write) -> Result<Step> {
        match cmd {
            Command::New => {
                handle::destroy(self.queue.take());
                self.queue = handle::create();
                self.install_faults();
                self.show(out)?;
            },
            Command::Free => {
                handle::destroy(self.queue.take());
                self.show(out)?;
            },
            Command::InsertHead { value, count } => {
                self.insert(value, *count, handle::insert_head)?;
                self.show(out)?;
            },
            Command::InsertTail { value, count } => {
                self.insert(value, *count, handle::insert_tail)?;
                self.show(out)?;
            },
            Command::RemoveHead { expected } => {
                let mut buf = vec![0u8; self.bufsize];
                let len = handle::remove_head(self.queue.as_mut(), Some(&mut buf[..]))?;
                let removed = String::from_utf8_lossy(&buf[..len]);
                writeln!(out, "Removed {removed} from queue")?;
                if let Some(expected) = expected {
                    if *expected != removed {
                        bail!("removed {removed:?}, expected {expected:?}");
                    }
                }
                self.show(out)?;
            },
            Command::RemoveHeadQuiet => {
                handle::remove_head(self.queue.as_mut(), None)?;
                self.show(out)?;
            },
            Command::Size { expected } => {
                let size = handle::size(self.queue.as_ref());
                writeln!(out, "Queue size = {size}")?;
                if let Some(expected) = expected {
                    if *expected != size {
                        bail!("size is {size}, expected {expected}");
                    }
                }
            },
            Command::Show => self.show(out)?,
            Command::Reverse => {
                self.warn_if_absent("reverse");
                handle::reverse(self.queue.as_mut());
                self.show(out)?;
            },
            Command::Sort => {
                self.warn_if_absent("sort");
                handle::sort(self.queue.as_mut());
                self.show(out)?;
            },
            Command::FailRate(pct) => {
                self.fail_rate(*pct);
            },
            Command::Seed(seed) => {
                self.seed(Some(*seed));
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Step::Quit),
        }
        Ok(Step::Continue)
    }

    fn insert(
        &mut self,
        value: &str,
        count: usize,
        op: fn(Option<&mut Queue>, &str) -> strqueue::Result<()>,
    ) -> Result<()> {
        for i in 0..count {
            op(self.queue.as_mut(), value)
                .map_err(|e| anyhow!("insertion {} of {count} failed: {e}", i + 1))?;
        }
        Ok(())
    }

    fn warn_if_absent(&self, op: &str) {
        if self.queue.is_none() {
            tracing::warn!("calling {op} on an absent queue");
        }
    }

    fn show(&self, out: &mut impl Write) -> Result<()> {
        match &self.queue {
            Some(q) => writeln!(out, "q = {q:?}")?,
            None => writeln!(out, "q = NULL")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> (usize, String) {
        let mut out = Vec::new();
        let failures = Session::new(1024)
            .run(script.as_bytes(), &mut out, false)
            .unwrap();
        (failures, String::from_utf8(out).unwrap())
    }

    #[test]
    fn fruit_script() {
        let (failures, out) = run("
            new
            it banana
            it apple
            ih cherry   # goes first
            size 3
            sort
            reverse
            rh cherry
            size 2
            show
            free
            ");
        assert_eq!(failures, 0, "{out}");
        assert!(out.contains(r#"q = ["cherry", "banana", "apple"]"#));
        assert!(out.contains(r#"q = ["apple", "banana", "cherry"]"#));
        assert!(out.contains("Removed cherry from queue"));
        assert!(out.ends_with("q = NULL\n"));
    }

    #[test]
    fn failures_are_counted() {
        let (failures, out) = run("
            rh
            ih x
            new
            ih x 2
            rh y
            size 5
            bogus
            quit
            size 0
            ");
        assert_eq!(failures, 5, "{out}");
        assert!(!out.contains("cmd> size 0"));
    }

    #[test]
    fn strict_stops_early() {
        let mut out = Vec::new();
        let failures = Session::new(16)
            .run("rhq\nnew\n".as_bytes(), &mut out, true)
            .unwrap();
        assert_eq!(failures, 1);
        assert!(!String::from_utf8(out).unwrap().contains("cmd> new"));
    }

    #[test]
    fn small_buffer_truncates() {
        let mut out = Vec::new();
        let failures = Session::new(4)
            .run("new\nit img10\nrh img\n".as_bytes(), &mut out, false)
            .unwrap();
        assert_eq!(failures, 0);
        assert!(String::from_utf8(out).unwrap().contains("Removed img from queue"));
    }

    #[test]
    fn injected_faults() {
        let (failures, out) = run("
            new
            option seed 3
            option fail 100
            ih x
            it x
            size 0
            option fail 0
            it x 4
            size 4
            ");
        assert_eq!(failures, 2, "{out}");
        assert!(out.contains("failed to allocate queue storage"));
    }
}
