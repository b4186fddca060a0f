//! Terminal message sinks for command output.
//!
//! Informational and success lines go to stdout, failures to stderr. The
//! `--no-symbols` flag swaps the prefixes for plain labels so output stays
//! greppable in logs and on terminals without the glyphs.

pub struct Display {
    no_symbols: bool,
}

impl Display {
    pub fn new(no_symbols: bool) -> Self {
        Self { no_symbols }
    }

    fn prefix(&self, symbol: &'static str, label: &'static str) -> &'static str {
        if self.no_symbols {
            label
        } else {
            symbol
        }
    }

    pub fn info(&self, msg: &str) {
        println!("{} {}", self.prefix(".", "Info:"), msg);
    }

    pub fn success(&self, msg: &str) {
        println!("{} {}", self.prefix("✔", "Success:"), msg);
    }

    pub fn failure(&self, msg: &str) {
        eprintln!("{} {}", self.prefix("✘", "Error:"), msg);
    }
}
