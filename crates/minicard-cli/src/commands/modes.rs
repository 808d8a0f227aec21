use crate::commands::common::{finish, CliSession, CommandContext};
use crate::error::CliError;

pub fn run_secret(context: &CommandContext) -> Result<(), CliError> {
    let mut session = context.open_session()?;
    let result = session.toggle_secret_mode();
    let enabled = finish(&mut session, result)?;
    println!("Secret mode {}", if enabled { "on" } else { "off" });
    Ok(())
}

/// Grab the side bar just inside its edge and move it by `delta` pixels
pub fn run_resize(delta: i32, context: &CommandContext) -> Result<(), CliError> {
    let mut session = context.open_session()?;
    let edge = i32::try_from(session.state().side_bar_width)
        .unwrap_or(i32::MAX)
        .saturating_sub(1);

    let result = resize(&mut session, edge, delta);
    let width = finish(&mut session, result)?.unwrap_or(session.state().side_bar_width);
    println!("Side bar width {width}px");
    Ok(())
}

fn resize(session: &mut CliSession, edge: i32, delta: i32) -> minicard_core::Result<Option<u32>> {
    let Some(mut gesture) = session.begin_resize(edge) else {
        return Ok(None);
    };
    gesture.move_to(edge.saturating_add(delta))?;
    Ok(Some(gesture.release()))
}
