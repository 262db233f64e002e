//! Session commands read from stdin.
//!
//! One command per line:
//!
//! ```text
//! region East,West      category none      region all
//! show                  reset              help        quit
//! ```

use contracts::{Dimension, FilterSelection};
use report_engine::ObservedValues;

/// Help text printed by the `help` command
pub const HELP: &str = "\
Commands:
  region <a,b,...>     select regions (also: region all | region none)
  category <a,b,...>   select categories (also: category all | category none)
  show                 re-render the current selection
  reset                select every region and category
  help                 show this help
  quit                 end the session";

/// Value set named in a selection command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSet {
    All,
    None,
    List(Vec<String>),
}

/// One parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCommand {
    Select { dimension: Dimension, values: ValueSet },
    Show,
    Reset,
    Help,
    Quit,
}

impl SelectionCommand {
    /// Parse one input line; blank lines and `#` comments yield `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "region" | "regions" => Self::select(Dimension::Region, rest)?,
            "category" | "categories" => Self::select(Dimension::Category, rest)?,
            "show" | "render" if rest.is_empty() => Self::Show,
            "reset" if rest.is_empty() => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(format!("unknown command '{line}' (type 'help')")),
        };
        Ok(Some(command))
    }

    fn select(dimension: Dimension, rest: &str) -> Result<Self, String> {
        let values = match rest.to_ascii_lowercase().as_str() {
            "" => return Err(format!("'{dimension}' needs values, 'all' or 'none'")),
            "all" | "*" => ValueSet::All,
            "none" => ValueSet::None,
            _ => ValueSet::List(
                rest.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        };
        Ok(Self::Select { dimension, values })
    }
}

/// Selection after applying `values` to one dimension of `current`
pub fn next_selection(
    current: &FilterSelection,
    observed: &ObservedValues,
    dimension: Dimension,
    values: &ValueSet,
) -> FilterSelection {
    let current = current.clone();
    match values {
        ValueSet::All => current.with_values(dimension, observed.values(dimension).iter().cloned()),
        ValueSet::None => current.with_values(dimension, Vec::<String>::new()),
        ValueSet::List(list) => current.with_values(dimension, list.iter().cloned()),
    }
}
