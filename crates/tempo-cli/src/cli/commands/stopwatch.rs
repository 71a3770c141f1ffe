//! Stopwatch command handler.

use anyhow::Result;
use tempo_tui::SetupError;

pub fn run(verbose: bool) -> Result<()> {
    match tempo_tui::run_stopwatch(verbose) {
        Ok(Some(report)) => {
            println!("{report}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            // A terminal too small for the header reports like a quit:
            // message on stdout, success exit. Nothing was drawn.
            if let Some(setup) = err.downcast_ref::<SetupError>() {
                println!("{setup}");
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}
