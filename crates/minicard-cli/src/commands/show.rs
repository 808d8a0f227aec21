use crate::commands::common::{finish, print_stage, CommandContext};
use crate::error::CliError;

pub fn run_show(context: &CommandContext) -> Result<(), CliError> {
    let mut session = context.open_session()?;
    finish(&mut session, Ok(()))?;
    print_stage(&session);
    Ok(())
}
