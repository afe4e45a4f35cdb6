//! Compare command - order two statuses by progress

use clap::Args;
use miette::{IntoDiagnostic, Result};
use std::cmp::Ordering;

use crate::cli::helpers::load_context;
use crate::cli::GlobalOpts;

/// Compare two statuses by progress
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Workflow name (see `whflow list`)
    pub workflow: String,

    pub a: String,

    pub b: String,
}

pub fn ordering_label(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

impl CompareArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let (_config, registry) = load_context(global)?;
        let ordering = registry
            .compare(&self.workflow, &self.a, &self.b)
            .into_diagnostic()?;
        println!("{}", ordering_label(ordering));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_label() {
        assert_eq!(ordering_label(Ordering::Less), "less");
        assert_eq!(ordering_label(Ordering::Equal), "equal");
        assert_eq!(ordering_label(Ordering::Greater), "greater");
    }
}
