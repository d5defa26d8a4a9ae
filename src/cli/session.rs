//! Request loop
//!
//! Reads requests line by line, echoes each accepted line, runs it against
//! the catalog and prints the report. A failing request prints `!!! <error>`
//! on the error stream and the loop moves on to the next line.

use std::io::{self, BufRead, Write};

use crate::cli::report::Reporter;
use crate::cli::request::{strip_comment, Request};
use crate::core::catalog::Catalog;
use crate::core::error::{InventoryError, InventoryResult};
use crate::core::policy;
use crate::core::resolver::Resolution;

/// Whether the loop keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What a request left to report
enum Outcome {
    Silent,
    Production(Resolution),
    Inventory(Option<String>),
    Parts,
    Help,
    Quit,
}

/// One inventory session: a catalog plus its output streams
pub struct Session<W: Write, E: Write> {
    catalog: Catalog,
    reporter: Reporter,
    echo: bool,
    out: W,
    err: E,
}

impl<W: Write, E: Write> Session<W, E> {
    pub fn new(reporter: Reporter, echo: bool, out: W, err: E) -> Self {
        Self {
            catalog: Catalog::new(),
            reporter,
            echo,
            out,
            err,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run every request in `input`, stopping early on `quit`
    ///
    /// The catalog is cleared once input ends. Bytes that are not valid
    /// UTF-8 are replaced, so a bad line fails on its own.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if self.handle_line(line)? == Flow::Quit {
                break;
            }
        }
        self.catalog.clear();
        self.out.flush()
    }

    /// Run a single raw input line
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let text = strip_comment(line);
        if text.is_empty() {
            return Ok(Flow::Continue);
        }
        if self.echo {
            writeln!(self.out, "+ {}", text)?;
        }

        match Request::parse(text).and_then(|request| self.apply(request)) {
            Ok(outcome) => self.render(outcome),
            Err(err) => {
                tracing::warn!(kind = err.kind(), "{}", err);
                self.out.flush()?;
                writeln!(self.err, "!!! {}", err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn apply(&mut self, request: Request) -> InventoryResult<Outcome> {
        tracing::info!(request = request.keyword(), "request");
        let catalog = &mut self.catalog;

        match request {
            Request::AddPart { id } => {
                catalog.define_part(&id)?;
                Ok(Outcome::Silent)
            }
            Request::AddAssembly {
                id,
                capacity,
                components,
            } => {
                let components = components.iter().map(|(c, q)| (c.as_str(), *q));
                catalog.define_assembly_from(&id, capacity, components)?;
                Ok(Outcome::Silent)
            }
            Request::FulfillOrder { lines } => {
                let lines = lines.iter().map(|(a, q)| (a.as_str(), *q));
                policy::fulfill_order(catalog, lines).map(Outcome::Production)
            }
            Request::Stock { id, quantity } => {
                policy::stock(catalog, &id, quantity).map(Outcome::Production)
            }
            Request::Restock { id } => {
                policy::restock(catalog, id.as_deref()).map(Outcome::Production)
            }
            Request::Empty { id } => {
                policy::empty(catalog, &id)?;
                Ok(Outcome::Silent)
            }
            Request::Inventory { id: Some(id) } => {
                if catalog.assembly(&id).is_none() {
                    return Err(InventoryError::UnknownComponent(id));
                }
                Ok(Outcome::Inventory(Some(id)))
            }
            Request::Inventory { id: None } => Ok(Outcome::Inventory(None)),
            Request::Parts => Ok(Outcome::Parts),
            Request::Help => Ok(Outcome::Help),
            Request::Clear => {
                catalog.clear();
                Ok(Outcome::Silent)
            }
            Request::Quit => {
                catalog.clear();
                Ok(Outcome::Quit)
            }
        }
    }

    fn render(&mut self, outcome: Outcome) -> io::Result<Flow> {
        let out = &mut self.out;
        match outcome {
            Outcome::Silent => {}
            Outcome::Production(resolution) => self.reporter.production(out, &resolution)?,
            Outcome::Inventory(None) => self.reporter.inventory(out, &self.catalog)?,
            Outcome::Inventory(Some(id)) => {
                if let Some(asm) = self.catalog.assembly(&id) {
                    self.reporter.assembly(out, asm)?;
                }
            }
            Outcome::Parts => self.reporter.parts(out, &self.catalog)?,
            Outcome::Help => self.reporter.help(out)?,
            Outcome::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    struct Run {
        out: String,
        err: String,
    }

    fn run_script(script: &str, echo: bool) -> Run {
        run_bytes(script.as_bytes(), echo)
    }

    fn run_bytes(input: &[u8], echo: bool) -> Run {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut session = Session::new(Reporter::new(OutputFormat::Plain), echo, &mut out, &mut err);
        session.run(input).unwrap();
        drop(session);
        Run {
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    #[test]
    fn test_echo_and_comments() {
        let run = run_script("# header\n\n  addPart P1   # first part\nparts\n", true);
        assert_eq!(
            run.out,
            "+ addPart P1\n\
             + parts\n\
             Part inventory:\n\
             ---------------\n\
             Part ID\n\
             ===========\n\
             P1\n"
        );
        assert!(run.err.is_empty());
    }

    #[test]
    fn test_no_echo() {
        let run = run_script("addPart P1\n", false);
        assert!(run.out.is_empty());
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let run = run_script("frobnicate\naddPart X1\naddPart P1\naddPart P1\nparts\n", true);
        assert_eq!(
            run.err,
            "!!! frobnicate: unknown command\n\
             !!! X1: part ID must start with 'P'\n\
             !!! P1: duplicate part ID\n"
        );
        assert!(run.out.ends_with("P1\n"));
    }

    #[test]
    fn test_stock_example() {
        let run = run_script(
            "addPart P1\naddAssembly A1 10 P1 2\nstock A1 7\ninventory\n",
            false,
        );
        assert_eq!(
            run.out,
            ">>> make 7 units of assembly A1\n\
             Parts needed:\n\
             -------------\n\
             Part ID     quantity\n\
             =========== ========\n\
             P1                14\n\
             Assembly inventory:\n\
             -------------------\n\
             Assembly ID Capacity On Hand\n\
             =========== ======== =======\n\
             A1                10       7\n"
        );
    }

    #[test]
    fn test_order_with_unknown_assembly_is_canceled() {
        let run = run_script(
            "addPart P1\naddAssembly A1 10 P1 2\nstock A1 4\nfulfillOrder A1 2 A9 1\ninventory A1\n",
            false,
        );
        assert!(run
            .err
            .contains("!!! A9: assembly ID is not in the inventory -- order canceled"));
        assert!(run.out.contains("on-hand:      4\n"));
    }

    #[test]
    fn test_inventory_of_unknown_id() {
        let run = run_script("addPart P1\ninventory P1\ninventory A7\n", false);
        assert_eq!(
            run.err,
            "!!! P1: part/assembly ID is not in the inventory\n\
             !!! A7: part/assembly ID is not in the inventory\n"
        );
    }

    #[test]
    fn test_quit_stops_reading() {
        let run = run_script("addPart P1\nquit\nparts\n", true);
        assert_eq!(run.out, "+ addPart P1\n+ quit\n");
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut out = Vec::new();
        let mut session = Session::new(Reporter::default(), false, &mut out, io::sink());
        session.handle_line("addPart P1").unwrap();
        session.handle_line("addAssembly A1 3 P1 1").unwrap();
        assert_eq!(session.catalog().assemblies().len(), 1);
        session.handle_line("clear").unwrap();
        assert!(session.catalog().is_empty());
        assert_eq!(session.handle_line("quit").unwrap(), Flow::Quit);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_session() {
        let run = run_bytes(b"addPart P1\naddPart P\xe92 # caf\xe9\naddPart P3\nparts\n", true);
        assert!(run.out.contains("+ addPart P3\n+ parts\n"));
        // The replaced byte leaves a valid id that sorts last
        assert!(run.out.contains("===========\nP1\nP3\nP\u{fffd}2\n"));
        assert!(run.err.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let run = run_script("addPart P1\r\nparts\r\n", false);
        assert!(run.out.ends_with("P1\n"));
        assert!(run.err.is_empty());
    }

    #[test]
    fn test_empty_order_is_silent() {
        let run = run_script("fulfillOrder\n", true);
        assert_eq!(run.out, "+ fulfillOrder\n");
        assert!(run.err.is_empty());
    }
}
