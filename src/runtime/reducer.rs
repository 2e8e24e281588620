use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::widgets::shell::Shell;
use crate::widgets::traits::{InteractionResult, Interactive};

pub struct Reducer;

impl Reducer {
    pub fn reduce(shell: &mut Shell, command: Command) -> Vec<Effect> {
        match command {
            Command::Exit => {
                shell.request_exit();
                vec![Effect::RequestRender]
            }
            Command::Cancel => {
                if shell.dismiss_notice() {
                    vec![Effect::RequestRender]
                } else {
                    vec![]
                }
            }
            Command::NextFocus => collect_effects(shell.focus_next()),
            Command::PrevFocus => collect_effects(shell.focus_prev()),
            Command::SubmitForm => collect_effects(shell.builder_mut().submit()),
            Command::EditForm => collect_effects(shell.builder_mut().edit_form()),
            Command::Save => collect_effects(shell.builder_mut().save()),
            Command::Load => collect_effects(shell.builder_mut().load()),
            Command::InputKey(key) => collect_effects(shell.on_key(key)),
            Command::TextAction(action) => collect_effects(shell.on_text_action(action)),
            Command::Tick | Command::Noop => vec![],
        }
    }
}

fn collect_effects(result: InteractionResult) -> Vec<Effect> {
    let mut effects: Vec<Effect> = result.actions.into_iter().map(Effect::Action).collect();
    if result.request_render {
        effects.push(Effect::RequestRender);
    }
    effects
}
