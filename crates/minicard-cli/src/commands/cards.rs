use minicard_core::{CardId, Point, StylePosition};

use crate::commands::common::{finish, resolve_card_content, CliSession, CommandContext};
use crate::error::CliError;
use crate::prompt::CliPrompt;

pub fn run_add(content_parts: &[String], context: &CommandContext) -> Result<(), CliError> {
    let content = resolve_card_content(content_parts)?;

    let mut session = context.open_session()?;
    session.type_input(&content);
    let result = session.submit_input(false);
    if let Some(id) = finish(&mut session, result)? {
        println!("{id}");
    }
    Ok(())
}

pub fn run_delete(card: CardId, context: &CommandContext) -> Result<(), CliError> {
    let mut session = context.open_session()?;
    let result = session.delete_card(card);
    if finish(&mut session, result)? {
        println!("{card}");
    } else {
        eprintln!("Card {card} is already gone");
    }
    Ok(())
}

pub fn run_edit(
    card: CardId,
    text: Option<String>,
    context: &CommandContext,
) -> Result<(), CliError> {
    let mut session = context.open_session()?;
    ensure_card(&session, card)?;

    let mut prompt = text.map_or(CliPrompt::Editor, CliPrompt::answer);
    let result = session.edit_card(card, &mut prompt);
    if finish(&mut session, result)? {
        println!("{card}");
    } else {
        eprintln!("Card {card} left unchanged");
    }
    Ok(())
}

/// Press on the card at `from`, move to `to` and let go there
pub fn run_drag(
    card: CardId,
    to: Point,
    from: Option<Point>,
    context: &CommandContext,
) -> Result<(), CliError> {
    let mut session = context.open_session()?;
    ensure_card(&session, card)?;

    let from = from.unwrap_or_else(|| {
        let corner = session.view().offset_of(card).unwrap_or_default();
        Point::new(corner.x(), corner.y())
    });
    let layout = drag(&mut session, card, from, to);
    let Some(layout) = finish(&mut session, layout)? else {
        return Err(CliError::CardNotFound(card));
    };

    let position = session
        .state()
        .effective_note()
        .and_then(|note| note.cards.get(&card))
        .map(|card| card.position)
        .unwrap_or_default();
    match layout {
        StylePosition::Static => println!("{card} back in flow"),
        StylePosition::Absolute => {
            println!("{card} at {},{}", position.x(), position.y());
        }
    }
    Ok(())
}

fn drag(
    session: &mut CliSession,
    card: CardId,
    from: Point,
    to: Point,
) -> minicard_core::Result<Option<StylePosition>> {
    let Some(mut gesture) = session.begin_drag(card, from)? else {
        return Ok(None);
    };
    gesture.move_to(to)?;
    gesture.release(to)
}

fn ensure_card(session: &CliSession, card: CardId) -> Result<(), CliError> {
    let exists = session
        .state()
        .effective_note()
        .is_some_and(|note| note.cards.contains_key(&card));
    if exists {
        Ok(())
    } else {
        Err(CliError::CardNotFound(card))
    }
}
