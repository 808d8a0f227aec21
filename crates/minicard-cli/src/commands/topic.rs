use minicard_core::NoteId;

use crate::cli::TopicCommands;
use crate::commands::common::{finish, print_stage, CommandContext};
use crate::error::CliError;
use crate::prompt::CliPrompt;

pub fn run_topic(command: TopicCommands, context: &CommandContext) -> Result<(), CliError> {
    let mut session = context.open_session()?;

    match command {
        TopicCommands::New { label } => {
            let mut prompt = CliPrompt::answer_or_terminal(joined_label(&label));
            let result = session.create_topic(&mut prompt);
            match finish(&mut session, result)? {
                Some(id) => println!("{id}"),
                None => eprintln!("No topic label given, nothing created"),
            }
        }
        TopicCommands::Rm => {
            let result = session.delete_current_topic();
            match finish(&mut session, result)? {
                Some(id) => println!("{id}"),
                None => eprintln!("No topic to delete"),
            }
        }
        TopicCommands::Edit { label } => {
            let mut prompt = CliPrompt::answer_or_terminal(joined_label(&label));
            let result = session.edit_topic(&mut prompt);
            if !finish(&mut session, result)? {
                eprintln!("No topic to edit");
            }
        }
        TopicCommands::Next => {
            let result = session.next_topic();
            finish(&mut session, result)?;
            print_stage(&session);
        }
        TopicCommands::Prev => {
            let result = session.previous_topic();
            finish(&mut session, result)?;
            print_stage(&session);
        }
        TopicCommands::Switch { id } => {
            let result = session.switch_topic(&NoteId::from(id.trim()));
            finish(&mut session, result)?;
            print_stage(&session);
        }
        TopicCommands::List => {
            for (line, id) in session.topic_lines().iter().zip(session.state().notes.keys()) {
                println!("{line}  [{id}]");
            }
        }
    }

    Ok(())
}

/// Words given on the command line as one label, `None` when there are none
pub fn joined_label(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
