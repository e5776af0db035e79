use inquire::{Confirm, InquireError};
use renamap_core::Confirmation;
use std::path::Path;
use tracing::warn;

pub fn show_rename_and_confirm(old_path: &Path, new_path: &Path) -> Confirmation {
    println!("\n📁 File rename:");
    println!("  \x1b[31m- {}\x1b[0m", old_path.display());
    println!("  \x1b[32m+ {}\x1b[0m", new_path.display());

    let answer = Confirm::new("Apply this rename?")
        .with_default(true)
        .with_help_message("Esc cancels the remaining renames")
        .prompt();

    confirmation_from(answer)
}

fn confirmation_from(answer: Result<bool, InquireError>) -> Confirmation {
    match answer {
        Ok(true) => Confirmation::Accept,
        Ok(false) => Confirmation::Skip,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Confirmation::Abort
        }
        Err(err) => {
            warn!("Prompt failed, aborting: {}", err);
            Confirmation::Abort
        }
    }
}
