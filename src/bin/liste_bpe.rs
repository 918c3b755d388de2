//! Generate the BPE listing of the project this executable lives in.
//!
//! Usage:
//!   liste_bpe
//!
//! The project root is three directories above the executable's own folder;
//! the listing and `info.log` are written next to the executable. Console
//! verbosity follows `RUST_LOG` (default `info`).

use std::io::IsTerminal;
use std::process::ExitCode;

use bpe_listing::{
    ConsoleNotifier, HeadlessNotifier, ListingConfig, ListingGenerator, Notifier, RunOutcome,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ListingConfig::from_executable() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{} : {}", e.label(), e);
            eprintln!("[Erreur] {} : {}", e.label(), e);
            return ExitCode::FAILURE;
        },
    };
    log::debug!(
        "Project root {}, output in {}",
        config.project_root.display(),
        config.output_dir.display()
    );

    let mut notifier: Box<dyn Notifier> = if std::io::stdin().is_terminal() {
        Box::new(ConsoleNotifier::stdio())
    } else {
        Box::new(HeadlessNotifier::new(true))
    };

    match ListingGenerator::new(config).generate(notifier.as_mut()) {
        RunOutcome::Written { path, documents, .. } => {
            log::info!("{} documents listed in {}", documents, path.display());
            ExitCode::SUCCESS
        },
        RunOutcome::Declined => ExitCode::SUCCESS,
        RunOutcome::Failed(_) => ExitCode::FAILURE,
    }
}
