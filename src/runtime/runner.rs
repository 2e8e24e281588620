use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::RenderFrame;
use crate::ui::theme::Theme;
use crate::widgets::shell::Shell;
use crate::widgets::traits::{Drawable, RenderContext};
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(120);

pub struct Runtime {
    shell: Shell,
    terminal: Terminal,
    key_bindings: KeyBindings,
    theme: Theme,
}

impl Runtime {
    pub fn new(shell: Shell, terminal: Terminal) -> Self {
        Self::with_key_bindings(shell, terminal, KeyBindings::new())
    }

    pub fn with_key_bindings(shell: Shell, terminal: Terminal, key_bindings: KeyBindings) -> Self {
        Self {
            shell,
            terminal,
            key_bindings,
            theme: Theme::default(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;
            while !self.shell.should_exit() {
                let event = self.terminal.poll_event(POLL_INTERVAL)?;
                self.dispatch(event)?;
            }
            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn dispatch(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                let command = self
                    .key_bindings
                    .resolve(key)
                    .unwrap_or(Command::InputKey(key));
                tracing::trace!(?command, "dispatch");
                self.process_command(command)
            }
            TerminalEvent::Tick => self.process_command(Command::Tick),
        }
    }

    fn process_command(&mut self, command: Command) -> io::Result<()> {
        let effects = Reducer::reduce(&mut self.shell, command);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let mut render_requested = false;
        for effect in effects {
            match effect {
                Effect::Action(action) => {
                    render_requested |= self.shell.apply_action(action);
                }
                Effect::RequestRender => render_requested = true,
            }
        }
        if render_requested {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let ctx = RenderContext {
            theme: &self.theme,
            width: self.terminal.size().width,
        };
        let mut frame = RenderFrame::new();
        frame.push(self.shell.draw(&ctx));
        self.terminal.render_frame(&frame)
    }
}
